// Tests for the crawl driver against a mocked Lens API

use lensgraph_core::LensConfig;
use lensgraph_core::crawl::{CrawlOptions, crawl_handle, execute_crawl};
use lensgraph_core::lens::LensClient;
use lensgraph_network::model::{DEFAULT_FOLLOWER_PICTURE, DEFAULT_PROFILE_PICTURE};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method},
};

fn stats() -> serde_json::Value {
    json!({ "followers": 1, "following": 1, "lensClassifierScore": 0.5 })
}

async fn mount_profile(server: &MockServer, handle: &str, id: &str) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "request": { "forHandle": handle } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "profile": { "id": id, "metadata": null, "stats": stats() } }
        })))
        .mount(server)
        .await;
}

async fn mount_unknown_profile(server: &MockServer, handle: &str) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "request": { "forHandle": handle } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "profile": null }
        })))
        .mount(server)
        .await;
}

async fn mount_followers(server: &MockServer, of: &str, followers: &[(&str, &str)]) {
    let items: Vec<serde_json::Value> = followers
        .iter()
        .map(|(id, handle)| {
            json!({
                "id": id,
                "handle": { "fullHandle": handle, "localName": handle },
                "metadata": null,
                "stats": stats()
            })
        })
        .collect();

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "request": { "of": of } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "followers": { "items": items } }
        })))
        .mount(server)
        .await;
}

fn config_for(server: &MockServer) -> LensConfig {
    LensConfig::default().with_endpoint(&server.uri()).unwrap()
}

#[tokio::test]
async fn test_empty_picture_uris_get_fallbacks() {
    let server = MockServer::start().await;
    let blank = json!({ "picture": { "optimized": { "uri": "" } } });
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "request": { "forHandle": "lens/a" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "profile": { "id": "A", "metadata": blank, "stats": stats() } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "request": { "of": "A" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "followers": { "items": [{
                "id": "B",
                "handle": { "fullHandle": "lens/b", "localName": "b" },
                "metadata": blank,
                "stats": stats()
            }] } }
        })))
        .mount(&server)
        .await;

    let client = LensClient::new(config_for(&server)).unwrap();
    let network = crawl_handle(&client, "lens/a", 2, None).await.unwrap();

    assert_eq!(network.node("A").unwrap().picture, DEFAULT_PROFILE_PICTURE);
    assert_eq!(network.node("B").unwrap().picture, DEFAULT_FOLLOWER_PICTURE);
}

#[tokio::test]
async fn test_crawl_handle_builds_network() {
    let server = MockServer::start().await;
    mount_profile(&server, "lens/alice", "A").await;
    mount_followers(&server, "A", &[("B", "lens/bob"), ("C", "lens/carol")]).await;
    mount_followers(&server, "B", &[("A", "lens/alice")]).await;
    mount_followers(&server, "C", &[]).await;

    let client = LensClient::new(config_for(&server)).unwrap();
    let network = crawl_handle(&client, "lens/alice", 10, None).await.unwrap();

    let ids: Vec<&str> = network.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    assert_eq!(network.links.len(), 3);
    assert_eq!(network.nodes[0].picture, "default_profile.png");
    assert_eq!(network.nodes[1].picture, "default_image.png");
}

#[tokio::test]
async fn test_execute_crawl_records_each_handle() {
    let server = MockServer::start().await;
    mount_profile(&server, "lens/alice", "A").await;
    mount_followers(&server, "A", &[("B", "lens/bob")]).await;
    mount_followers(&server, "B", &[]).await;
    mount_unknown_profile(&server, "lens/ghost").await;

    let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let messages_clone = messages.clone();

    let options = CrawlOptions {
        handles: vec!["lens/ghost".to_string(), "lens/alice".to_string()],
        max_nodes: 200,
        config: config_for(&server),
        show_progress_bars: false,
    };

    let outcomes = execute_crawl(
        options,
        Some(Arc::new(move |msg: String| {
            messages_clone.lock().unwrap().push(msg);
        })),
    )
    .await
    .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].handle, "lens/ghost");
    assert!(!outcomes[0].is_success());
    let err = outcomes[0].result.as_ref().unwrap_err();
    assert!(err.contains("Network construction failed"));
    assert!(err.contains("lens/ghost"));

    assert!(outcomes[1].is_success());
    assert_eq!(outcomes[1].result.as_ref().unwrap().nodes.len(), 2);

    let messages = messages.lock().unwrap();
    assert!(messages.iter().any(|m| m.contains("Crawling handle 1/2: lens/ghost")));
    assert!(messages.iter().any(|m| m.contains("Failed to crawl lens/ghost")));
}

#[tokio::test]
async fn test_execute_crawl_listing_failure_fails_handle() {
    let server = MockServer::start().await;
    mount_profile(&server, "lens/alice", "A").await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "request": { "of": "A" } }
        })))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let options = CrawlOptions {
        handles: vec!["lens/alice".to_string()],
        max_nodes: 200,
        config: config_for(&server),
        show_progress_bars: false,
    };

    let outcomes = execute_crawl(options, None).await.unwrap();
    let err = outcomes[0].result.as_ref().unwrap_err();
    assert!(err.contains("could not list followers"));
    assert!(err.contains("500"));
}

#[tokio::test]
async fn test_execute_crawl_requires_handles() {
    let options = CrawlOptions {
        handles: vec![],
        max_nodes: 200,
        config: LensConfig::default(),
        show_progress_bars: false,
    };

    let result = execute_crawl(options, None).await;
    assert_eq!(result.unwrap_err(), "No handles provided");
}
