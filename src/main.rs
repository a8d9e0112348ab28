mod api;
mod app;
mod input;
mod logging;
mod opener;
mod plain;
mod text;
mod tui;
mod ui;
mod views;

use anyhow::Context;
use api::load::{load_feed, search};
use api::{ClientConfig, Feed, HnClient};
use app::{Launch, ListSource, Settings};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "hnterm",
    version,
    about = "Browse Hacker News from your terminal",
    long_about = "Run without arguments to browse top stories interactively.\n\
                  Use --plain (or pipe the output) for plain text."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Number of stories to fetch.
    #[arg(short = 'n', long, global = true, default_value_t = 30)]
    pub count: usize,

    /// Plain text output; implied when stdout is not a terminal.
    #[arg(short, long, global = true)]
    pub plain: bool,

    /// Max simultaneous item requests.
    #[arg(long, global = true, default_value_t = 20)]
    pub concurrency: usize,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Hacker News API base URL.
    #[arg(long, global = true, default_value = "https://hacker-news.firebaseio.com/v0")]
    pub base_url: String,

    /// Search API base URL.
    #[arg(long, global = true, default_value = "https://hn.algolia.com/api/v1")]
    pub search_url: String,

    /// Theme file; defaults to ui-config.toml in the config directory.
    #[arg(long, global = true)]
    pub ui_config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Top stories
    Top,
    /// Newest stories
    New,
    /// Best stories
    Best,
    /// Ask HN
    Ask,
    /// Show HN
    Show,
    /// Job postings
    Jobs,
    /// A story and its comments
    Item { id: u64 },
    /// A user profile
    User { name: String },
    /// Full-text story search
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.count > 0, "--count must be > 0");
        anyhow::ensure!(self.concurrency > 0, "--concurrency must be > 0");
        anyhow::ensure!(self.timeout_secs > 0, "--timeout-secs must be > 0");
        anyhow::ensure!(
            !self.base_url.trim().is_empty(),
            "--base-url must be non-empty"
        );
        anyhow::ensure!(
            !self.search_url.trim().is_empty(),
            "--search-url must be non-empty"
        );
        if let Some(Command::User { name }) = &self.command {
            anyhow::ensure!(!name.trim().is_empty(), "user name must be non-empty");
        }
        Ok(())
    }

    fn is_plain(&self) -> bool {
        self.plain || !std::io::stdout().is_terminal()
    }

    fn theme_candidates(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(path) = &self.ui_config {
            paths.push(path.clone());
        }
        if let Some(dirs) = directories::ProjectDirs::from("dev", "hnterm", "hnterm") {
            paths.push(dirs.config_dir().join("ui-config.toml"));
        }
        paths
    }
}

fn feed_of(command: &Option<Command>) -> Option<Feed> {
    match command {
        None | Some(Command::Top) => Some(Feed::Top),
        Some(Command::New) => Some(Feed::New),
        Some(Command::Best) => Some(Feed::Best),
        Some(Command::Ask) => Some(Feed::Ask),
        Some(Command::Show) => Some(Feed::Show),
        Some(Command::Jobs) => Some(Feed::Jobs),
        Some(_) => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    let plain_mode = cli.is_plain();
    match logging::init() {
        Ok(path) => tracing::debug!(path = %path.display(), "logging to file"),
        Err(err) if plain_mode => eprintln!("warning: {err:#}"),
        Err(_) => {}
    }

    let api = HnClient::new(ClientConfig {
        base_url: cli.base_url.clone(),
        search_url: cli.search_url.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
    })?;

    let result = if plain_mode {
        run_plain(&cli, &api).await
    } else {
        run_interactive(&cli, api).await
    };
    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    result
}

async fn run_plain(cli: &Cli, api: &HnClient) -> anyhow::Result<()> {
    let mut out = std::io::stdout();
    if let Some(feed) = feed_of(&cli.command) {
        let load = load_feed(api, feed, cli.count, cli.concurrency).await?;
        if let Some(err) = load.error {
            return Err(err).context("load stories");
        }
        return plain::print_stories(&mut out, &load.items);
    }
    match &cli.command {
        Some(Command::Item { id }) => {
            plain::print_item(&mut out, api, *id, cli.concurrency).await
        }
        Some(Command::User { name }) => plain::print_user(&mut out, api, name).await,
        Some(Command::Search { query }) => {
            let items = search(api, &query.join(" "), cli.count).await?;
            plain::print_stories(&mut out, &items)
        }
        _ => Ok(()),
    }
}

async fn run_interactive(cli: &Cli, api: HnClient) -> anyhow::Result<()> {
    let (theme, theme_path) = ui::theme::load_from_candidates(&cli.theme_candidates())?;
    if let Some(path) = theme_path {
        tracing::info!(path = %path.display(), "loaded ui config");
    }

    let launch = match &cli.command {
        Some(Command::Item { id }) => Launch::Item(*id),
        Some(Command::User { name }) => Launch::User(name.clone()),
        Some(Command::Search { query }) => {
            let query = query.join(" ");
            let items = search(&api, &query, cli.count).await?;
            Launch::Prefetched {
                source: ListSource::Search {
                    query,
                    limit: cli.count,
                },
                items,
            }
        }
        command => Launch::List(ListSource::Feed {
            feed: feed_of(command).unwrap_or(Feed::Top),
            count: cli.count,
        }),
    };

    let settings = Settings {
        concurrency: cli.concurrency,
    };
    app::run(api, launch, settings, theme).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_top_stories() {
        let cli = Cli::try_parse_from(["hnterm"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.count, 30);
        assert_eq!(cli.concurrency, 20);
        assert_eq!(feed_of(&cli.command), Some(Feed::Top));
        cli.validate().unwrap();
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli =
            Cli::try_parse_from(["hnterm", "search", "rust", "async", "-n", "5", "-p"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Search {
                query: vec!["rust".to_string(), "async".to_string()]
            })
        );
        assert_eq!(cli.count, 5);
        assert!(cli.plain);
        assert!(cli.is_plain());
    }

    #[test]
    fn rejects_zero_count() {
        let cli = Cli::try_parse_from(["hnterm", "new", "--count", "0"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn item_requires_numeric_id() {
        assert!(Cli::try_parse_from(["hnterm", "item", "abc"]).is_err());
        let cli = Cli::try_parse_from(["hnterm", "item", "8863"]).unwrap();
        assert_eq!(cli.command, Some(Command::Item { id: 8863 }));
        assert_eq!(feed_of(&cli.command), None);
    }
}
