use super::*;
use serde_json::json;
use wiremock::matchers::query_param;

#[tokio::test]
async fn test_get_profile() {
    let server = setup_mock_server().await;

    mock_with_token("GET", "/v2.11/me")
        .and(query_param("fields", "id,first_name"))
        .respond_with(success_response(json!({"id": "123", "first_name": "Ann"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let value: serde_json::Value = client
        .execute(
            integrations_facebook::HttpMethod::Get,
            "me",
            integrations_facebook::Params::fields(&["id", "first_name"]),
            vec![],
        )
        .await
        .unwrap();

    assert_eq!(value["id"], "123");
    assert_eq!(value["first_name"], "Ann");
}

#[tokio::test]
async fn test_profile_service() {
    let server = setup_mock_server().await;

    mock_with_token("GET", "/v2.11/me")
        .and(query_param(
            "fields",
            "first_name,last_name,email,picture,adaccounts,accounts{name,id,access_token,picture}",
        ))
        .respond_with(success_response(json!({
            "id": "123",
            "first_name": "Ann",
            "last_name": "Lee",
            "picture": {"data": {"url": "https://cdn.example.com/ann.jpg"}},
            "adaccounts": {"data": [{"id": "act_42", "account_id": "42"}]},
            "accounts": {"data": [{"id": "p1", "name": "Ann's Page"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = client_for(&server).users().profile("me").await.unwrap();

    assert_eq!(profile.last_name, "Lee");
    assert_eq!(profile.picture, "https://cdn.example.com/ann.jpg");
    assert_eq!(profile.ad_accounts[0].account_id, "42");
    assert_eq!(profile.accounts[0].name, "Ann's Page");
    assert!(profile.accounts[0].access_token.is_none());
}
