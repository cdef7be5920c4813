//! Project list and profile summary rendering.
//!
//! Rendering is clear-then-rebuild: every call first empties the target and
//! then appends one block per record, so repeated calls never accumulate.
//! Empty, null or non-array input produces exactly one placeholder block.

use crate::diagnostics::DiagnosticSink;
use crate::error::RenderError;
use crate::model::{HeadingRank, ProfileSummary, ProjectRecord};
use crate::target::{DisplayBlock, DisplayTarget, Heading, ImageRef, ProfileBlock, ProjectBlock};
use serde_json::Value;

pub const UNTITLED_PROJECT: &str = "Untitled Project";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const PLACEHOLDER_IMAGE: &str = "https://vis-society.github.io/labs/2/images/empty.svg";
pub const PROFILE_TITLE: &str = "GitHub Profile Stats";

const SCOPE: &str = "render";

/// Renders records into display targets, reporting soft failures to a sink.
pub struct Renderer<S> {
    sink: S,
}

impl<S: DiagnosticSink> Renderer<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Resolve a heading hint. Missing hints use the default silently;
    /// unrecognised ones use the default and emit a warning.
    pub fn heading_rank(&self, hint: Option<&str>) -> HeadingRank {
        match hint {
            None => HeadingRank::default(),
            Some(h) => HeadingRank::parse(h).unwrap_or_else(|| {
                self.sink.warn(
                    SCOPE,
                    &format!("invalid heading level {h:?}; defaulting to h2"),
                );
                HeadingRank::default()
            }),
        }
    }

    /// Render a fetched JSON document (or no data at all) into `target`.
    ///
    /// Returns the number of blocks written.
    pub fn render_projects<T>(
        &self,
        records: Option<&Value>,
        target: &mut T,
        heading: Option<&str>,
    ) -> Result<usize, RenderError>
    where
        T: DisplayTarget + ?Sized,
    {
        self.check_target(target)?;
        let rank = self.heading_rank(heading);
        let list: Option<Vec<ProjectRecord>> = records.and_then(crate::model::project_list);
        Ok(fill(target, list.as_deref(), rank))
    }

    /// Typed variant of [`Renderer::render_projects`].
    pub fn render_records<T>(
        &self,
        records: Option<&[ProjectRecord]>,
        target: &mut T,
        rank: HeadingRank,
    ) -> Result<usize, RenderError>
    where
        T: DisplayTarget + ?Sized,
    {
        self.check_target(target)?;
        Ok(fill(target, records, rank))
    }

    /// Replace `target` with the profile counters.
    ///
    /// A missing profile or a missing target leaves everything untouched;
    /// profile stats are decorative, so neither case is an error.
    pub fn format_profile<T>(&self, profile: Option<&ProfileSummary>, target: Option<&mut T>)
    where
        T: DisplayTarget + ?Sized,
    {
        let (Some(profile), Some(target)) = (profile, target) else {
            return;
        };
        if !target.is_surface() {
            return;
        }
        target.clear();
        target.append(profile_block(profile));
    }

    fn check_target<T: DisplayTarget + ?Sized>(&self, target: &T) -> Result<(), RenderError> {
        if target.is_surface() {
            return Ok(());
        }
        let err = RenderError::InvalidTarget("target is not a display surface".into());
        self.sink.error(SCOPE, &err.to_string());
        Err(err)
    }
}

fn fill<T: DisplayTarget + ?Sized>(
    target: &mut T,
    records: Option<&[ProjectRecord]>,
    rank: HeadingRank,
) -> usize {
    target.clear();
    match records {
        Some(records) if !records.is_empty() => {
            for record in records {
                target.append(project_block(record, rank));
            }
            records.len()
        }
        _ => {
            target.append(DisplayBlock::placeholder());
            1
        }
    }
}

fn present(field: Option<&str>) -> Option<&str> {
    field.filter(|s| !s.trim().is_empty())
}

/// Build the block for one record, applying each fallback independently.
pub fn project_block(record: &ProjectRecord, rank: HeadingRank) -> DisplayBlock {
    let title = present(record.title.as_deref()).unwrap_or(UNTITLED_PROJECT);
    let src = present(record.image.as_deref()).unwrap_or(PLACEHOLDER_IMAGE);
    let description = present(record.description.as_deref()).unwrap_or(NO_DESCRIPTION);
    DisplayBlock::Project(ProjectBlock {
        heading: Heading {
            rank,
            text: title.to_string(),
        },
        image: ImageRef {
            src: src.to_string(),
            alt: title.to_string(),
        },
        description: description.to_string(),
    })
}

pub fn profile_block(profile: &ProfileSummary) -> DisplayBlock {
    let entries = [
        ("Public Repos:", profile.public_repo_count),
        ("Public Gists:", profile.public_gist_count),
        ("Followers:", profile.follower_count),
        ("Following:", profile.following_count),
    ];
    DisplayBlock::Profile(ProfileBlock {
        title: PROFILE_TITLE.to_string(),
        entries: entries
            .iter()
            .map(|(label, n)| (label.to_string(), n.to_string()))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticLevel, RecordingSink};
    use crate::target::MemoryTarget;
    use serde_json::json;

    fn project(block: &DisplayBlock) -> &ProjectBlock {
        match block {
            DisplayBlock::Project(p) => p,
            other => panic!("expected project block, got {:?}", other),
        }
    }

    #[test]
    fn renders_one_block_per_record_with_fallbacks() {
        let r = Renderer::new(RecordingSink::new());
        let mut t = MemoryTarget::new();
        let input = json!([{"title": "A"}, {"description": "d"}]);

        let n = r.render_projects(Some(&input), &mut t, Some("h2")).unwrap();
        assert_eq!(n, 2);
        assert_eq!(t.len(), 2);

        let first = project(&t.blocks()[0]);
        assert_eq!(first.heading.text, "A");
        assert_eq!(first.heading.rank, HeadingRank::H2);
        assert_eq!(first.image.src, PLACEHOLDER_IMAGE);
        assert_eq!(first.image.alt, "A");
        assert_eq!(first.description, NO_DESCRIPTION);

        let second = project(&t.blocks()[1]);
        assert_eq!(second.heading.text, UNTITLED_PROJECT);
        assert_eq!(second.image.alt, UNTITLED_PROJECT);
        assert_eq!(second.description, "d");
        assert!(r.sink().is_empty());
    }

    #[test]
    fn empty_null_and_non_array_inputs_render_placeholder() {
        let r = Renderer::new(RecordingSink::new());
        for input in [Some(json!([])), None, Some(json!({"title": "x"})), Some(json!("str"))] {
            let mut t = MemoryTarget::with_blocks(vec![DisplayBlock::placeholder(); 4]);
            let n = r.render_projects(input.as_ref(), &mut t, None).unwrap();
            assert_eq!(n, 1);
            assert_eq!(t.blocks(), &[DisplayBlock::placeholder()]);
        }
    }

    #[test]
    fn blank_fields_fall_back_but_present_fields_are_not_trimmed() {
        let r = Renderer::new(RecordingSink::new());
        let mut t = MemoryTarget::new();
        let input = json!([{"title": "   ", "image": "  pic.png ", "description": " spaced "}]);
        r.render_projects(Some(&input), &mut t, None).unwrap();

        let p = project(&t.blocks()[0]);
        assert_eq!(p.heading.text, UNTITLED_PROJECT);
        assert_eq!(p.image.src, "  pic.png ");
        assert_eq!(p.description, " spaced ");
    }

    #[test]
    fn non_object_entries_still_produce_blocks() {
        let r = Renderer::new(RecordingSink::new());
        let mut t = MemoryTarget::new();
        let input = json!([1, null, {"title": "ok"}]);
        assert_eq!(r.render_projects(Some(&input), &mut t, None).unwrap(), 3);
        assert_eq!(project(&t.blocks()[0]).heading.text, UNTITLED_PROJECT);
        assert_eq!(project(&t.blocks()[2]).heading.text, "ok");
    }

    #[test]
    fn rendering_twice_does_not_accumulate() {
        let r = Renderer::new(RecordingSink::new());
        let input = json!([{"title": "A"}, {"title": "B"}, {"title": "C"}]);
        let mut once = MemoryTarget::new();
        r.render_projects(Some(&input), &mut once, None).unwrap();

        let mut twice = MemoryTarget::new();
        r.render_projects(Some(&input), &mut twice, None).unwrap();
        r.render_projects(Some(&input), &mut twice, None).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn invalid_target_is_rejected_without_writes() {
        let sink = RecordingSink::new();
        let r = Renderer::new(&sink);
        let mut t = MemoryTarget::detached();
        let err = r
            .render_projects(Some(&json!([{"title": "A"}])), &mut t, None)
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidTarget(_)));
        assert!(t.is_empty());
        assert_eq!(sink.count_at(DiagnosticLevel::Error), 1);
    }

    #[test]
    fn invalid_heading_hint_warns_and_uses_h2() {
        let sink = RecordingSink::new();
        let r = Renderer::new(&sink);
        let mut t = MemoryTarget::new();
        r.render_projects(Some(&json!([{"title": "A"}])), &mut t, Some("h9")).unwrap();
        assert_eq!(project(&t.blocks()[0]).heading.rank, HeadingRank::H2);
        assert_eq!(sink.count_at(DiagnosticLevel::Warn), 1);

        r.render_projects(Some(&json!([{"title": "A"}])), &mut t, Some("h4")).unwrap();
        assert_eq!(project(&t.blocks()[0]).heading.rank, HeadingRank::H4);
        assert_eq!(sink.count_at(DiagnosticLevel::Warn), 1);

        r.render_projects(Some(&json!([{"title": "A"}])), &mut t, Some("h+4")).unwrap();
        assert_eq!(project(&t.blocks()[0]).heading.rank, HeadingRank::H2);
        assert_eq!(sink.count_at(DiagnosticLevel::Warn), 2);
    }

    #[test]
    fn typed_records_render_in_order() {
        let r = Renderer::new(RecordingSink::new());
        let records = vec![
            ProjectRecord { title: Some("one".into()), ..Default::default() },
            ProjectRecord { title: Some("two".into()), ..Default::default() },
        ];
        let mut t = MemoryTarget::new();
        r.render_records(Some(&records), &mut t, HeadingRank::H3).unwrap();
        let titles: Vec<_> = t.blocks().iter().map(|b| project(b).heading.text.clone()).collect();
        assert_eq!(titles, ["one", "two"]);
    }

    #[test]
    fn profile_replaces_target_content_verbatim() {
        let r = Renderer::new(RecordingSink::new());
        let mut t = MemoryTarget::with_blocks(vec![DisplayBlock::placeholder()]);
        let p = ProfileSummary {
            public_repo_count: 1234567,
            public_gist_count: 0,
            follower_count: 5,
            following_count: 9,
        };
        r.format_profile(Some(&p), Some(&mut t));
        assert_eq!(t.len(), 1);
        match &t.blocks()[0] {
            DisplayBlock::Profile(block) => {
                assert_eq!(block.title, PROFILE_TITLE);
                assert_eq!(block.entries[0], ("Public Repos:".to_string(), "1234567".to_string()));
                assert_eq!(block.entries.len(), 4);
            }
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn missing_profile_leaves_target_untouched() {
        let r = Renderer::new(RecordingSink::new());
        let before = MemoryTarget::with_blocks(vec![DisplayBlock::placeholder()]);
        let mut t = before.clone();
        r.format_profile(None, Some(&mut t));
        assert_eq!(t, before);

        let p = ProfileSummary {
            public_repo_count: 1,
            public_gist_count: 1,
            follower_count: 1,
            following_count: 1,
        };
        r.format_profile::<MemoryTarget>(Some(&p), None);
        assert!(r.sink().is_empty());
    }
}
