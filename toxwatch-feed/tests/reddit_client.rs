use toxwatch_feed::reddit::client::{RedditApi, RedditCredentials};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_creds() -> RedditCredentials {
    RedditCredentials {
        client_id: "cid".into(),
        client_secret: "csecret".into(),
        username: "toxbot".into(),
        password: "hunter2".into(),
        user_agent: "toxwatch/0.1 test".into(),
    }
}

fn token_body() -> serde_json::Value {
    serde_json::json!({
        "access_token": "tok-123",
        "token_type": "bearer",
        "expires_in": 86400,
        "scope": "*"
    })
}

fn listing_body() -> serde_json::Value {
    serde_json::json!({
        "kind": "Listing",
        "data": {
            "after": null,
            "children": [
                { "kind": "t3", "data": { "title": "First post", "selftext": "with a body", "id": "aaa" } },
                { "kind": "t3", "data": { "title": "Link post", "selftext": "", "id": "bbb" } }
            ]
        }
    })
}

#[tokio::test]
async fn exchanges_token_and_fetches_hot_listing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=toxbot"))
        .and(header("user-agent", "toxwatch/0.1 test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/r/rust/hot"))
        .and(query_param("limit", "2"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body()))
        .expect(1)
        .mount(&server)
        .await;

    let api = RedditApi::with_endpoints(test_creds(), &server.uri(), &server.uri()).unwrap();
    let posts = api.hot_posts("rust", 2).await.expect("listing fetch");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "First post");
    assert_eq!(posts[0].combined_text(), "First post\nwith a body");
    assert_eq!(posts[1].combined_text(), "Link post");
}

#[tokio::test]
async fn reuses_cached_token_across_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1) // second fetch must not hit the token endpoint again
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/r/rust/hot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body()))
        .expect(2)
        .mount(&server)
        .await;

    let api = RedditApi::with_endpoints(test_creds(), &server.uri(), &server.uri()).unwrap();
    api.hot_posts("rust", 5).await.expect("first fetch");
    api.hot_posts("rust", 5).await.expect("second fetch");
}

#[tokio::test]
async fn rejected_credentials_surface_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": "invalid_grant"
            })),
        )
        .mount(&server)
        .await;

    let api = RedditApi::with_endpoints(test_creds(), &server.uri(), &server.uri()).unwrap();
    let err = api.hot_posts("rust", 5).await.unwrap_err();
    assert!(err.to_string().contains("token exchange"));
}
