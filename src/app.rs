// Application pipeline.
// Wires the cache, fetcher, filter, enrichment, and formatter for one run.

use tracing::{debug, warn};

use crate::activity::{ActivityFetcher, enrich_all, select};
use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::output;

/// One invocation of the tool.
pub struct App {
    config: Config,
    client: GitHubClient,
    cache: Option<CacheStore>,
}

impl App {
    /// Build the client and open the cache described by `config`.
    ///
    /// A cache that cannot be opened is logged and the run continues without it.
    pub fn new(config: Config) -> Result<Self> {
        let client = GitHubClient::new(&config.api_url, config.token.as_deref())?;

        let cache = match &config.cache_path {
            Some(path) => match CacheStore::open(path) {
                Ok(store) => Some(store),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cache unavailable, continuing without it");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            config,
            client,
            cache,
        })
    }

    /// Run the pipeline and return the rendered output.
    pub async fn run(&mut self) -> Result<String> {
        let events = ActivityFetcher::new(&mut self.client, self.cache.as_mut())
            .fetch(&self.config.username)
            .await?;

        let quota = self.client.rate_limit();
        debug!(limit = ?quota.limit, remaining = ?quota.remaining, "rate limit");

        let total = events.len();
        let mut selected = select(events, &self.config.filter, self.config.limit);
        debug!(total, selected = selected.len(), "filtered events");

        if self.config.enrich {
            selected = enrich_all(&mut self.client, selected).await;
        }

        output::render(&selected, self.config.format, self.config.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::FilterSpec;
    use crate::github::{Event, RepoDetails};
    use crate::output::OutputFormat;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_url: &str, format: OutputFormat) -> Config {
        Config {
            username: "octocat".to_string(),
            api_url: api_url.to_string(),
            token: None,
            cache_path: None,
            filter: FilterSpec::new(vec!["PushEvent".to_string()], vec![]),
            limit: 10,
            format,
            color: false,
            enrich: false,
        }
    }

    fn cached_pair() -> Vec<Event> {
        vec![
            Event::new("PushEvent", "a/b").with_created_at("2024-01-15T10:30:00Z"),
            Event::new("IssuesEvent", "a/b").with_created_at("2024-01-15T11:00:00Z"),
        ]
    }

    #[tokio::test]
    async fn test_cached_events_filtered_in_every_format() {
        // Any request reaching the server would fail the expectation.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let db = temp_dir.path().join("activity.db");
        CacheStore::open(&db)
            .unwrap()
            .put("octocat", &cached_pair())
            .unwrap();

        for format in [
            OutputFormat::Text,
            OutputFormat::Json,
            OutputFormat::Yaml,
            OutputFormat::Table,
        ] {
            let mut config = config(&server.uri(), format);
            config.cache_path = Some(db.clone());
            let out = App::new(config).unwrap().run().await.unwrap();

            assert!(out.contains("PushEvent"), "{format:?}: {out}");
            assert!(!out.contains("IssuesEvent"), "{format:?}: {out}");
            match format {
                OutputFormat::Text => assert_eq!(out, "- PushEvent: "),
                OutputFormat::Json => {
                    let parsed: Vec<Event> = serde_json::from_str(&out).unwrap();
                    assert_eq!(parsed, vec![cached_pair()[0].clone()]);
                }
                OutputFormat::Yaml => {
                    let parsed: Vec<Event> = serde_yaml::from_str(&out).unwrap();
                    assert_eq!(parsed, vec![cached_pair()[0].clone()]);
                }
                OutputFormat::Table => {
                    assert_eq!(out.lines().count(), 3);
                    assert!(out.ends_with("| 2024-01-15 10:30 | PushEvent | a/b |  |"));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_filter_limit_and_enrich() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/events"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[
                    {"type": "PushEvent", "repo": {"name": "a/b"}, "created_at": "2024-01-15T10:30:00Z"},
                    {"type": "PushEvent", "repo": {"name": "gone/away"}, "created_at": "2024-01-15T10:00:00Z"},
                    {"type": "PushEvent", "repo": {"name": "a/b"}, "created_at": "2024-01-15T09:00:00Z"}
                ]"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/a/b"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"stargazers_count": 5, "forks_count": 1, "description": "demo"}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/gone/away"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut config = config(&server.uri(), OutputFormat::Json);
        config.limit = 2;
        config.enrich = true;

        let out = App::new(config).unwrap().run().await.unwrap();
        let events: Vec<Event> = serde_json::from_str(&out).unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0].repo_details,
            Some(RepoDetails::Summary { stars: 5, .. })
        ));
        assert!(matches!(
            events[1].repo_details,
            Some(RepoDetails::Error { .. })
        ));
    }

    #[tokio::test]
    async fn test_primary_fetch_error_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = App::new(config(&server.uri(), OutputFormat::Text))
            .unwrap()
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::ActivityError::Decode(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_unopenable_cache_runs_without_it() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/events"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"type": "PushEvent", "repo": {"name": "a/b"}}]"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        // A directory cannot be opened as a database file.
        let temp_dir = TempDir::new().unwrap();
        let mut config = config(&server.uri(), OutputFormat::Text);
        config.cache_path = Some(temp_dir.path().to_path_buf());

        let mut app = App::new(config).unwrap();
        assert!(app.cache.is_none());
        assert_eq!(app.run().await.unwrap(), "- PushEvent: ");
    }
}
