//! `MapsParser` orchestration against scripted expanders and a live
//! `wiremock` expansion endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use atlas_core::{AppConfig, Environment, ParsedLocation};
use atlas_maps::{
    EdgeExpander, ExpandError, MapsParser, RedirectResolver, UnconfiguredExpander, UrlExpander,
};

/// Answers every call with a fixed outcome and counts invocations.
struct ScriptedExpander {
    outcome: Result<String, fn() -> ExpandError>,
    calls: AtomicUsize,
}

impl ScriptedExpander {
    fn succeeding(url: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(url.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(err: fn() -> ExpandError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(err),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UrlExpander for ScriptedExpander {
    async fn expand(&self, _short_url: &str) -> Result<String, ExpandError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(url) => Ok(url.clone()),
            Err(make) => Err(make()),
        }
    }
}

/// Succeeds, but only after sleeping for `delay`.
struct SlowExpander {
    delay: Duration,
}

#[async_trait]
impl UrlExpander for SlowExpander {
    async fn expand(&self, _short_url: &str) -> Result<String, ExpandError> {
        tokio::time::sleep(self.delay).await;
        Ok("https://www.google.com/maps/place/Too+Late/@1.5,2.5,15z".to_string())
    }
}

#[tokio::test]
async fn direct_link_never_calls_expander() {
    let expander = ScriptedExpander::succeeding("https://www.google.com/maps/place/Unused");
    let parser = MapsParser::new(expander.clone());

    let parsed = parser
        .parse("https://www.google.com/maps/place/Eiffel+Tower/@48.8584,2.2945,15z")
        .await;

    assert_eq!(parsed.name.as_deref(), Some("Eiffel Tower"));
    assert_eq!(parsed.lat, Some(48.8584));
    assert_eq!(parsed.lng, Some(2.2945));
    assert!(!parsed.expanded);
    assert!(!parsed.is_short_url);
    assert_eq!(expander.calls(), 0);
}

#[tokio::test]
async fn short_link_is_expanded_and_re_extracted() {
    let expander = ScriptedExpander::succeeding(
        "https://www.google.com/maps/place/Sydney+Opera+House,+Sydney,+Australia/@-33.8568,151.2153,17z",
    );
    let parser = MapsParser::new(expander.clone());

    let parsed = parser.parse("https://maps.app.goo.gl/abc123").await;

    assert_eq!(
        parsed.name.as_deref(),
        Some("Sydney Opera House, Sydney, Australia")
    );
    assert_eq!(parsed.lat, Some(-33.8568));
    assert_eq!(parsed.lng, Some(151.2153));
    assert_eq!(parsed.country.as_deref(), Some("Australia"));
    assert_eq!(parsed.country_code.as_deref(), Some("AU"));
    assert!(parsed.expanded);
    assert!(!parsed.is_short_url);
    assert_eq!(expander.calls(), 1);
}

#[tokio::test]
async fn expansion_to_featureless_url_is_still_marked_expanded() {
    let expander = ScriptedExpander::succeeding("https://www.google.com/maps");
    let parsed = MapsParser::new(expander)
        .parse("https://goo.gl/maps/xyz")
        .await;

    assert!(parsed.expanded);
    assert!(parsed.is_empty());
    assert!(!parsed.is_short_url);
}

#[tokio::test]
async fn failed_expansion_returns_short_url_hint() {
    let expander = ScriptedExpander::failing(|| ExpandError::Timeout);
    let parser = MapsParser::new(expander.clone());

    let parsed = parser.parse("https://maps.app.goo.gl/abc123").await;

    assert_eq!(parsed, ParsedLocation::short_url_hint());
    assert!(parsed.is_short_url);
    assert!(!parsed.expanded);
    assert_eq!(expander.calls(), 1);
}

#[tokio::test]
async fn slow_expansion_is_cut_off_at_budget() {
    let parser = MapsParser::new(Arc::new(SlowExpander {
        delay: Duration::from_secs(5),
    }))
    .with_expand_budget(Duration::from_millis(100));

    let started = Instant::now();
    let parsed = parser.parse("https://maps.app.goo.gl/slow").await;
    let elapsed = started.elapsed();

    assert_eq!(parsed, ParsedLocation::short_url_hint());
    assert!(
        elapsed < Duration::from_secs(2),
        "parse should return within the budget, took {elapsed:?}"
    );
}

#[tokio::test]
async fn expansion_within_budget_succeeds() {
    let parser = MapsParser::new(Arc::new(SlowExpander {
        delay: Duration::from_millis(10),
    }))
    .with_expand_budget(Duration::from_secs(2));

    let parsed = parser.parse("https://maps.app.goo.gl/quick").await;

    assert_eq!(parsed.name.as_deref(), Some("Too Late"));
    assert!(parsed.expanded);
}

/// Follows redirects from a fixed local URL in place of the real short-link host.
struct LocalResolver {
    resolver: RedirectResolver,
    start_url: String,
}

#[async_trait]
impl UrlExpander for LocalResolver {
    async fn expand(&self, _short_url: &str) -> Result<String, ExpandError> {
        self.resolver.resolve(&self.start_url).await
    }
}

#[tokio::test]
async fn slow_redirect_chain_is_cut_off_at_budget() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let expander = LocalResolver {
        resolver: RedirectResolver::new(10, RedirectResolver::DEFAULT_USER_AGENT, 10)
            .expect("failed to build test RedirectResolver"),
        start_url: format!("{}/slow", server.uri()),
    };
    let parser =
        MapsParser::new(Arc::new(expander)).with_expand_budget(Duration::from_millis(200));

    let started = Instant::now();
    let parsed = parser.parse("https://maps.app.goo.gl/slow").await;
    let elapsed = started.elapsed();

    assert_eq!(parsed, ParsedLocation::short_url_hint());
    assert!(
        elapsed < Duration::from_secs(2),
        "parse should return within the budget, took {elapsed:?}"
    );
}

#[test]
fn budget_defaults_to_five_seconds_and_follows_config() {
    assert_eq!(
        MapsParser::offline().expand_budget(),
        Duration::from_millis(5_000)
    );

    let mut config = test_config();
    config.expand_timeout_ms = 750;
    let parser = MapsParser::from_config(Arc::new(UnconfiguredExpander), &config);
    assert_eq!(parser.expand_budget(), Duration::from_millis(750));
}

fn test_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:0".parse().expect("socket addr"),
        log_level: "info".to_string(),
        expand_endpoint: None,
        expand_timeout_ms: 5_000,
        redirect_max_hops: 10,
        redirect_timeout_secs: 10,
        redirect_user_agent: "test-agent".to_string(),
        rate_limit_max_requests: 120,
        rate_limit_window_secs: 60,
    }
}

#[tokio::test]
async fn unrecognized_link_returns_empty_result() {
    let expander = ScriptedExpander::succeeding("https://www.google.com/maps/place/Unused");
    let parser = MapsParser::new(expander.clone());

    let parsed = parser.parse("https://example.com/nothing-here").await;

    assert_eq!(parsed, ParsedLocation::default());
    assert_eq!(expander.calls(), 0);
}

#[tokio::test]
async fn concurrent_parses_are_independent() {
    let parser = MapsParser::new(ScriptedExpander::succeeding(
        "https://www.google.com/maps/place/Louvre/@48.8606,2.3376,17z",
    ));

    let (short, direct) = tokio::join!(
        parser.parse("https://maps.app.goo.gl/louvre"),
        parser.parse("https://www.google.com/maps?q=40.7128,-74.0060"),
    );

    assert_eq!(short.name.as_deref(), Some("Louvre"));
    assert!(short.expanded);
    assert_eq!(direct.name, None);
    assert_eq!(direct.lat, Some(40.7128));
    assert!(!direct.expanded);
}

#[tokio::test]
async fn edge_expander_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/expand-url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "expandedUrl": "https://www.google.com/maps/place/Colosseum,+Rome,+Italy/@41.8902,12.4922,17z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let expander = EdgeExpander::new(
        &format!("{}/functions/v1/expand-url", server.uri()),
        EdgeExpander::DEFAULT_TIMEOUT_MS,
    )
    .expect("failed to build test EdgeExpander");
    let parser = MapsParser::new(Arc::new(expander));

    let parsed = parser.parse("https://maps.app.goo.gl/colosseum").await;

    assert_eq!(parsed.name.as_deref(), Some("Colosseum, Rome, Italy"));
    assert_eq!(parsed.country_code.as_deref(), Some("IT"));
    assert!(parsed.expanded);
}

#[tokio::test]
async fn edge_expander_failure_degrades_to_hint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/expand-url"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Failed to expand URL"
        })))
        .mount(&server)
        .await;

    let expander = EdgeExpander::new(
        &format!("{}/functions/v1/expand-url", server.uri()),
        EdgeExpander::DEFAULT_TIMEOUT_MS,
    )
    .expect("failed to build test EdgeExpander");

    let parsed = MapsParser::new(Arc::new(expander))
        .parse("https://maps.app.goo.gl/broken")
        .await;

    assert_eq!(parsed, ParsedLocation::short_url_hint());
}
