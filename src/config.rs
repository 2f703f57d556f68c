// Command-line arguments and resolved runtime configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::activity::FilterSpec;
use crate::cache;
use crate::github::GITHUB_API_BASE;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "gh-activity")]
#[command(about = "Show a GitHub user's recent public activity")]
#[command(version)]
pub struct Cli {
    /// GitHub username
    pub username: String,

    /// Number of activities to display
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// GitHub personal access token
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Filter by event types (e.g. PushEvent IssuesEvent)
    #[arg(long, num_args = 1..)]
    pub types: Vec<String>,

    /// Filter by repositories (owner/name)
    #[arg(long, num_args = 1..)]
    pub repos: Vec<String>,

    /// Disable caching
    #[arg(long)]
    pub no_cache: bool,

    /// Enable colored output
    #[arg(long)]
    pub color: bool,

    /// Enrich with repository details
    #[arg(long)]
    pub enrich: bool,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = GITHUB_API_BASE)]
    pub api_url: String,

    /// Path of the activity cache database
    #[arg(long, env = "GH_ACTIVITY_CACHE")]
    pub cache_path: Option<PathBuf>,
}

/// Everything one run needs, resolved from the command line and environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub api_url: String,
    pub token: Option<String>,
    /// `None` disables the cache.
    pub cache_path: Option<PathBuf>,
    pub filter: FilterSpec,
    pub limit: usize,
    pub format: OutputFormat,
    pub color: bool,
    pub enrich: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let cache_path = if cli.no_cache {
            None
        } else {
            cli.cache_path.or_else(cache::db_path)
        };

        Self {
            username: cli.username,
            api_url: cli.api_url,
            token: cli.token.filter(|t| !t.is_empty()),
            cache_path,
            filter: FilterSpec::new(cli.types, cli.repos),
            limit: cli.limit,
            format: cli.format,
            color: cli.color,
            enrich: cli.enrich,
        }
    }
}
