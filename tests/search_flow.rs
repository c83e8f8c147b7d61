use std::sync::Arc;
use std::time::Duration;

use clarity::api::{HttpNewsApi, NewsApi};
use clarity::config::ApiConfig;
use clarity::domain::Category;
use clarity::feed::ArticleFeedProjector;
use clarity::routing::{AppRouter, Navigator, QueryCodec};
use clarity::search::{LifecycleState, SearchLifecycle, ERROR_MESSAGE};
use tokio::time::timeout;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> Arc<dyn NewsApi> {
    Arc::new(
        HttpNewsApi::new(&ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        })
        .expect("client builds"),
    )
}

async fn settle(lifecycle: &SearchLifecycle) -> LifecycleState {
    let mut rx = lifecycle.subscribe();
    let state = timeout(Duration::from_secs(5), rx.wait_for(LifecycleState::is_terminal))
        .await
        .expect("search settles")
        .expect("lifecycle alive");
    state.clone()
}

#[tokio::test]
async fn navigation_drives_search_to_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "Global Warming"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"title": "Warming", "content": ["p1"], "relatedsearch": ["Sea Level", "Carbon Tax"]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut router = AppRouter::new();
    router.navigate(&QueryCodec::search_path("Global Warming"));

    let lifecycle = SearchLifecycle::new(api_for(&server), &router.current_params());
    assert!(lifecycle.state().is_loading());
    assert_eq!(lifecycle.loading_message(), Some("Fetching top articles..."));

    let state = settle(&lifecycle).await;
    let result = state.result().expect("success");
    assert_eq!(result.title, "Warming");
    assert_eq!(result.related_search, vec!["Sea Level", "Carbon Tax"]);

    // Same query again does not refetch.
    assert!(!lifecycle.sync(&router.current_params()));
}

#[tokio::test]
async fn failed_search_can_be_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"title": "Economy", "content": ["Growth slowed."], "relatedsearch": []}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let lifecycle = SearchLifecycle::new(
        api_for(&server),
        &clarity::routing::RouteParams::with_query("economy"),
    );

    let state = settle(&lifecycle).await;
    assert_eq!(
        state,
        LifecycleState::Error {
            message: ERROR_MESSAGE.to_string()
        }
    );

    assert!(lifecycle.retry());
    assert!(lifecycle.state().is_loading());

    let state = settle(&lifecycle).await;
    assert_eq!(state.result().map(|r| r.title.as_str()), Some("Economy"));
}

#[tokio::test]
async fn null_result_shows_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("null", "application/json"))
        .mount(&server)
        .await;

    let lifecycle = SearchLifecycle::new(
        api_for(&server),
        &clarity::routing::RouteParams::with_query("xyzzy"),
    );

    let state = settle(&lifecycle).await;
    assert!(state.result().is_some_and(|r| r.is_empty()));
}

#[tokio::test]
async fn newer_query_wins_over_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"title": "Slow", "content": [], "relatedsearch": []}"#, "application/json")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"title": "Fast", "content": ["now"], "relatedsearch": []}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let lifecycle = SearchLifecycle::new(
        api_for(&server),
        &clarity::routing::RouteParams::with_query("slow"),
    );
    assert!(lifecycle.start("fast"));

    let state = settle(&lifecycle).await;
    assert_eq!(state.result().map(|r| r.title.as_str()), Some("Fast"));

    tokio::time::sleep(Duration::from_millis(700)).await;
    assert_eq!(
        lifecycle.state().result().map(|r| r.title.as_str()),
        Some("Fast")
    );
}

#[tokio::test]
async fn feed_projection_follows_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[
                {"id": 1, "title": "Markets rally", "img_url": "", "category": "finance"},
                {"id": 2, "title": "New telescope", "img_url": "", "category": "techsci"},
                {"id": 3, "title": "Gallery opens", "img_url": "", "category": "artcul"}
            ]"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let feed = ArticleFeedProjector::new(api_for(&server));
    feed.load();
    timeout(Duration::from_secs(5), feed.settled())
        .await
        .expect("feed settles");

    assert_eq!(feed.visible().len(), 3);

    assert_eq!(feed.set_category_by_name("Tech & Science"), Category::TechScience);
    let titles: Vec<String> = feed
        .visible()
        .iter()
        .map(|a| a.title.clone())
        .collect();
    assert_eq!(titles, vec!["New telescope"]);

    assert_eq!(feed.set_category_by_name("Sports"), Category::Top);
    assert_eq!(feed.visible().len(), 3);
}
