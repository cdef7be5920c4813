use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use folio::{LogSink, MemoryTarget, Renderer};
use serde_json::{json, Value};

fn project_doc(n: usize) -> Value {
    Value::Array(
        (0..n)
            .map(|i| {
                if i % 3 == 0 {
                    json!({ "description": "no title here" })
                } else {
                    json!({ "title": format!("Project {}", i), "image": format!("images/{}.png", i), "description": "A project" })
                }
            })
            .collect(),
    )
}

fn bench_render_memory(c: &mut Criterion) {
    let doc = project_doc(1000);
    let renderer = Renderer::new(LogSink);
    let mut target = MemoryTarget::new();

    c.bench_function("render_projects_memory_1000", |b| {
        b.iter(|| {
            let n = renderer
                .render_projects(Some(black_box(&doc)), &mut target, Some("h2"))
                .unwrap();
            black_box(n);
        })
    });
}

#[cfg(feature = "html")]
fn bench_render_html(c: &mut Criterion) {
    use folio::PageDocument;

    let doc = project_doc(200);
    let renderer = Renderer::new(LogSink);
    let page = PageDocument::parse("<html><body><div class=\"projects\"></div></body></html>");

    // Fresh page per iteration; replaced nodes stay in a document's arena
    c.bench_function("render_projects_html_200", |b| {
        b.iter_batched(
            || page.clone(),
            |mut page| {
                let mut target = page.target(".projects");
                let n = renderer
                    .render_projects(Some(black_box(&doc)), &mut target, Some("h2"))
                    .unwrap();
                black_box(n);
            },
            BatchSize::SmallInput,
        )
    });
}

#[cfg(not(feature = "html"))]
fn bench_render_html(_c: &mut Criterion) {}

criterion_group!(benches, bench_render_memory, bench_render_html);
criterion_main!(benches);
