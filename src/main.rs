//! `folio`: headless preview of the portfolio pages.
//!
//! Loads a page, runs the same components a browser would and prints the
//! resulting document.

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use folio::site::{PageReport, Site};
use folio::theme::{FileStore, MemoryStore};
use folio::{ColorScheme, HttpFetcher, LogSink, PageDocument, PreferenceStore, SiteConfig, ThemeSwitcher};
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Parser)]
#[command(name = "folio", version, about = "Headless preview of portfolio pages")]
struct Cli {
    /// Log every component event to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Home page: latest projects and profile stats
    Home(PageArgs),
    /// Projects page: the full project list
    Projects(PageArgs),
    /// Print the mailto URL the contact form would open
    Contact {
        #[arg(long)]
        page: PathBuf,
        /// Submitted value, as name=value (repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

#[derive(clap::Args)]
struct PageArgs {
    /// Page HTML file
    #[arg(long)]
    page: PathBuf,
    /// Location the page is served from (defaults to the file itself)
    #[arg(long)]
    location: Option<String>,
    /// Project list locator, relative to the location
    #[arg(long)]
    data: Option<String>,
    #[arg(long)]
    github_user: Option<String>,
    /// Switch to this color scheme before rendering
    #[arg(long, value_enum)]
    theme: Option<SchemeArg>,
    /// JSON file holding saved preferences
    #[arg(long)]
    prefs: Option<PathBuf>,
    /// Pretend the system prefers a dark color scheme
    #[arg(long)]
    prefers_dark: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemeArg {
    Auto,
    Light,
    Dark,
}

impl From<SchemeArg> for ColorScheme {
    fn from(s: SchemeArg) -> Self {
        match s {
            SchemeArg::Auto => ColorScheme::Automatic,
            SchemeArg::Light => ColorScheme::Light,
            SchemeArg::Dark => ColorScheme::Dark,
        }
    }
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got {:?}", s))
}

fn log_level(verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    }
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(log_level(verbose))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn page_location(page: &Path, location: Option<&str>) -> anyhow::Result<Url> {
    match location {
        Some(loc) => Url::parse(loc).with_context(|| format!("invalid location {}", loc)),
        None => {
            let abs = page
                .canonicalize()
                .with_context(|| format!("cannot resolve {}", page.display()))?;
            Url::from_file_path(&abs).map_err(|_| anyhow!("cannot turn {} into a URL", abs.display()))
        }
    }
}

async fn run_page<P: PreferenceStore>(home: bool, args: &PageArgs, store: P) -> anyhow::Result<String> {
    let source = std::fs::read_to_string(&args.page)
        .with_context(|| format!("cannot read {}", args.page.display()))?;
    let location = page_location(&args.page, args.location.as_deref())?;

    let mut config = SiteConfig {
        base_url: Some(location.to_string()),
        ..Default::default()
    };
    if let Some(data) = &args.data {
        config.projects_locator = data.clone();
    }
    if let Some(user) = &args.github_user {
        config.github_user = user.clone();
    }

    let mut theme = ThemeSwitcher::init(store, &config.theme_key, args.prefers_dark, &LogSink);
    if let Some(scheme) = args.theme {
        theme.set(scheme.into())?;
    }

    let fetcher = HttpFetcher::new(&config)?;
    let site = Site::new(config, fetcher, LogSink);
    let mut doc = PageDocument::parse(&source);

    let report: PageReport = if home {
        site.home_page(&mut doc, &location, &theme).await
    } else {
        site.projects_page(&mut doc, &location, &theme).await
    };
    log::info!(target: "folio", "{:?}", report);

    Ok(doc.to_html())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = match &cli.command {
        Command::Home(args) | Command::Projects(args) => {
            let home = matches!(cli.command, Command::Home(_));
            match &args.prefs {
                Some(path) => run_page(home, args, FileStore::new(path)).await?,
                None => run_page(home, args, MemoryStore::new()).await?,
            }
        }
        Command::Contact { page, fields } => {
            let source = std::fs::read_to_string(page)
                .with_context(|| format!("cannot read {}", page.display()))?;
            let doc = PageDocument::parse(&source);
            let form = doc
                .contact_form()
                .ok_or_else(|| anyhow!("no mailto: form in {}", page.display()))?;
            let values: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            form.submit(&values)
        }
    };

    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flag_selects_log_level() {
        assert_eq!(log_level(false), log::LevelFilter::Warn);
        assert_eq!(log_level(true), log::LevelFilter::Info);

        let cli = Cli::try_parse_from(["folio", "-v", "contact", "--page", "c.html"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn repeated_fields_are_kept_in_order() {
        let cli = Cli::try_parse_from([
            "folio", "contact", "--page", "c.html", "--field", "to=a", "--field", "to=b",
        ])
        .unwrap();
        match cli.command {
            Command::Contact { fields, .. } => assert_eq!(
                fields,
                vec![("to".to_string(), "a".to_string()), ("to".to_string(), "b".to_string())]
            ),
            _ => panic!("expected contact"),
        }
    }
}
