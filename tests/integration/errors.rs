use super::*;
use integrations_facebook::{is_temporary, FacebookError, HttpMethod, Params};
use serde_json::json;

async fn call(server: &MockServer) -> Result<serde_json::Value, FacebookError> {
    client_for(server)
        .execute(HttpMethod::Get, "me", Params::new(), vec![])
        .await
}

#[tokio::test]
async fn test_rate_limit_is_not_temporary() {
    let server = setup_mock_server().await;

    mock_with_token("GET", "/v2.11/me")
        .respond_with(error_response(
            400,
            json!({"error": {
                "message": "Calls to this api have exceeded the rate limit.",
                "type": "OAuthException",
                "code": 613,
                "fbtrace_id": "AbC"
            }}),
        ))
        .mount(&server)
        .await;

    let err = call(&server).await.unwrap_err();
    let api = err.api_error().unwrap();
    assert_eq!(api.code, 613);
    assert_eq!(api.fbtrace_id, "AbC");
    assert!(!is_temporary(&err));
}

#[tokio::test]
async fn test_other_api_error_is_temporary() {
    let server = setup_mock_server().await;

    mock_with_token("GET", "/v2.11/me")
        .respond_with(error_response(
            500,
            json!({"error": {"message": "An unexpected error has occurred.", "code": 2, "is_transient": true}}),
        ))
        .mount(&server)
        .await;

    let err = call(&server).await.unwrap_err();
    assert!(err.api_error().unwrap().is_transient);
    assert!(is_temporary(&err));
}

#[tokio::test]
async fn test_unstructured_error_body() {
    let server = setup_mock_server().await;

    mock_with_token("GET", "/v2.11/me")
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = call(&server).await.unwrap_err();
    assert_eq!(err.status_code().map(|s| s.as_u16()), Some(502));
    assert!(!is_temporary(&err));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let config = FacebookConfig::builder()
        .access_token(TEST_TOKEN)
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();
    let client = FacebookClient::new(config).unwrap();

    let err = client
        .execute::<serde_json::Value>(HttpMethod::Get, "me", Params::new(), vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, FacebookError::Transport(_)));
    assert!(!is_temporary(&err));
}
