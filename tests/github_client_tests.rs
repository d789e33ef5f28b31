use ghsearch::github::{
    ErrorKind, GithubClient, GithubError, HttpGithubClient, SearchQuery,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, header_exists, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn query(fragment: &str) -> SearchQuery {
    SearchQuery {
        fragment: fragment.to_string(),
        per_page: 20,
    }
}

fn items_body() -> serde_json::Value {
    json!({
        "total_count": 1,
        "incomplete_results": false,
        "items": [{
            "login": "abc1",
            "id": 42,
            "avatar_url": "https://avatars.githubusercontent.com/u/42?v=4",
            "type": "User",
            "site_admin": false,
            "score": 1.0
        }]
    })
}

// ============================================================================
// Search Tests
// ============================================================================

#[tokio::test]
async fn test_search_sends_query_params_and_reads_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .and(query_param("q", "abc"))
        .and(query_param("per_page", "20"))
        .and(header_exists("user-agent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(items_body())
                .insert_header("X-RateLimit-Remaining", "58"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpGithubClient::new(&mock_server.uri(), None).unwrap();
    let page = client.search_users(&query("abc")).await.unwrap();

    assert_eq!(page.remaining, Some(58));
    assert_eq!(page.users.len(), 1);
    assert_eq!(page.users[0].login, "abc1");
    assert_eq!(page.users[0].kind, "User");
}

#[tokio::test]
async fn test_search_fragment_is_encoded_once() {
    let mock_server = MockServer::start().await;

    // The matcher compares decoded values, so a double-encoded
    // fragment ("octo%2520cat") would not match.
    Mock::given(method("GET"))
        .and(path("/search/users"))
        .and(query_param("q", "octo cat&x=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpGithubClient::new(&mock_server.uri(), None).unwrap();
    let page = client.search_users(&query("octo cat&x=1")).await.unwrap();

    assert!(page.users.is_empty());
    assert_eq!(page.remaining, None);
}

#[tokio::test]
async fn test_search_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .and(header("authorization", "Bearer ghp_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpGithubClient::new(&mock_server.uri(), Some("ghp_test")).unwrap();
    assert!(client.search_users(&query("abc")).await.is_ok());
}

#[tokio::test]
async fn test_search_422_is_validation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "documentation_url": "https://docs.github.com/v3/search"
        })))
        .mount(&mock_server)
        .await;

    let client = HttpGithubClient::new(&mock_server.uri(), None).unwrap();
    let err = client.search_users(&query("abc")).await.unwrap_err();

    assert_eq!(
        err,
        GithubError::Api {
            status: 422,
            message: "Validation Failed".to_string()
        }
    );
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("422"));
}

#[tokio::test]
async fn test_search_403_is_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API rate limit exceeded"))
        .mount(&mock_server)
        .await;

    let client = HttpGithubClient::new(&mock_server.uri(), None).unwrap();
    let err = client.search_users(&query("abc")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RateLimited);
    assert_eq!(
        err.to_string(),
        "Request failed with status code 403: API rate limit exceeded"
    );
}

#[tokio::test]
async fn test_search_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"total_count\": 3}"))
        .mount(&mock_server)
        .await;

    let client = HttpGithubClient::new(&mock_server.uri(), None).unwrap();
    let err = client.search_users(&query("abc")).await.unwrap_err();

    assert!(matches!(err, GithubError::Parse(_)));
}

#[tokio::test]
async fn test_search_connection_refused_is_network() {
    // Nothing listens on port 9 in the test environment.
    let client = HttpGithubClient::new("http://127.0.0.1:9", None).unwrap();
    let err = client.search_users(&query("abc")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
}

// ============================================================================
// Rate Limit Tests
// ============================================================================

#[tokio::test]
async fn test_rate_limit_reads_search_remaining() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rate_limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": {
                "core": { "limit": 60, "remaining": 59 },
                "search": { "limit": 10, "remaining": 12 }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpGithubClient::new(&mock_server.uri(), None).unwrap();
    assert_eq!(client.search_rate_limit().await.unwrap(), 12);
}

#[tokio::test]
async fn test_rate_limit_missing_field_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rate_limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "resources": {} })))
        .mount(&mock_server)
        .await;

    let client = HttpGithubClient::new(&mock_server.uri(), None).unwrap();
    let err = client.search_rate_limit().await.unwrap_err();

    assert!(matches!(err, GithubError::Parse(_)));
}

#[tokio::test]
async fn test_base_url_with_trailing_slash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rate_limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": { "search": { "remaining": 3 } }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = format!("{}/", mock_server.uri());
    let client = HttpGithubClient::new(&base, None).unwrap();
    assert_eq!(client.search_rate_limit().await.unwrap(), 3);
}
