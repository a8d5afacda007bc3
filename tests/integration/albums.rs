use super::*;
use integrations_facebook::Privacy;
use serde_json::json;
use wiremock::matchers::{body_string_contains, query_param};

#[tokio::test]
async fn test_create_album() {
    let server = setup_mock_server().await;

    mock_with_token("POST", "/v2.11/me/albums")
        .and(body_string_contains("name=test"))
        .and(body_string_contains("privacy=%7B%22value%22%3A%22SELF%22%7D"))
        .respond_with(success_response(json!({"id": "album-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let album = client_for(&server)
        .albums()
        .create("me", "test", "delete me!", Privacy::SelfOnly)
        .await
        .unwrap();

    assert_eq!(album.id, "album-1");
    assert_eq!(album.name, "test");
}

#[tokio::test]
async fn test_get_album_with_photos() {
    let server = setup_mock_server().await;

    mock_with_token("GET", "/v2.11/album-1")
        .and(query_param("fields", "id,name,photos{images}"))
        .respond_with(success_response(json!({
            "id": "album-1",
            "name": "test",
            "photos": {"data": [{
                "id": "ph1",
                "images": [
                    {"width": 1024, "height": 768, "source": "https://cdn.example.com/big.jpg"},
                    {"width": 320, "height": 240, "source": "https://cdn.example.com/small.jpg"}
                ]
            }]}
        })))
        .mount(&server)
        .await;

    let album = client_for(&server).albums().get("album-1").await.unwrap();

    assert_eq!(album.images.len(), 1);
    assert_eq!(album.images[0].images[1].width, 320);
}
