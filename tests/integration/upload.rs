use super::*;
use integrations_facebook::{UploadSession, UploadState};
use serde_json::json;
use std::io::Write;
use wiremock::matchers::body_string_contains;

const FILE_SIZE: usize = 5000;
const CHUNK: usize = 1000;

fn video_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let data: Vec<u8> = (0..FILE_SIZE).map(|i| b'a' + (i / CHUNK) as u8).collect();
    file.write_all(&data).unwrap();
    file.flush().unwrap();
    file
}

fn text_field(name: &str, value: impl std::fmt::Display) -> String {
    format!("name=\"{}\"\r\n\r\n{}\r\n", name, value)
}

async fn mount_upload_api(server: &MockServer) {
    mock_with_token("POST", "/v2.11/act_123/advideos")
        .and(body_string_contains("upload_phase=start"))
        .and(body_string_contains("file_size=5000"))
        .respond_with(success_response(json!({
            "upload_session_id": "S1",
            "video_id": "V1",
            "start_offset": "0",
            "end_offset": "1000"
        })))
        .expect(1)
        .mount(server)
        .await;

    for start in (0..FILE_SIZE).step_by(CHUNK) {
        let next = start + CHUNK;
        let end = (next + CHUNK).min(FILE_SIZE);
        mock_with_token("POST", "/v2.11/act_123/advideos")
            .and(body_string_contains(text_field("upload_phase", "transfer")))
            .and(body_string_contains(text_field("start_offset", start)))
            .and(body_string_contains(text_field("upload_session_id", "S1")))
            .respond_with(success_response(json!({
                "start_offset": next.to_string(),
                "end_offset": end.to_string()
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    mock_with_token("POST", "/v2.11/act_123/advideos")
        .and(body_string_contains("upload_phase=finish"))
        .and(body_string_contains("title=Chunked+Upload"))
        .respond_with(success_response(json!({"success": true})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_upload_step_by_step() {
    let server = setup_mock_server().await;
    mount_upload_api(&server).await;
    let file = video_file();
    let client = client_for(&server);
    let videos = client.videos();

    let mut session = UploadSession::new("act_123", file.path()).with_title("Chunked Upload");
    assert_eq!(session.progress(), 0.0);

    assert_eq!(videos.advance(&mut session).await.unwrap(), UploadState::Transferring);
    assert_eq!(session.upload_session_id(), "S1");
    assert_eq!(session.size(), Some(5000));
    assert_eq!((session.start_offset(), session.end_offset()), (0, 1000));
    assert_eq!(session.progress(), 0.0);

    assert_eq!(videos.advance(&mut session).await.unwrap(), UploadState::Transferring);
    assert_eq!((session.start_offset(), session.end_offset()), (1000, 2000));
    assert!((session.progress() - 0.2).abs() < f64::EPSILON);

    let mut steps = 0;
    while videos.advance(&mut session).await.unwrap() == UploadState::Transferring {
        steps += 1;
    }
    assert_eq!(steps, 3);
    assert_eq!(session.state(), UploadState::Finishing);
    assert_eq!(session.progress(), 1.0);

    assert_eq!(videos.advance(&mut session).await.unwrap(), UploadState::Done);
    assert_eq!(session.success(), Some(true));
    assert_eq!(session.video_id(), "V1");
    assert_eq!(session.progress(), 1.0);

    // Each transfer carried exactly the requested bytes.
    let requests = server.received_requests().await.unwrap();
    let transfers: Vec<_> = requests
        .iter()
        .filter(|r| String::from_utf8_lossy(&r.body).contains("video_file_chunk"))
        .collect();
    assert_eq!(transfers.len(), 5);
    for (i, request) in transfers.iter().enumerate() {
        let body = String::from_utf8_lossy(&request.body);
        let letter = (b'a' + i as u8) as char;
        assert!(body.contains(&letter.to_string().repeat(CHUNK)));
        assert!(!body.contains(&letter.to_string().repeat(CHUNK + 1)));
        assert!(!body.contains("access_token"));
    }
}

#[tokio::test]
async fn test_upload_to_completion() {
    let server = setup_mock_server().await;
    mount_upload_api(&server).await;
    let file = video_file();

    let mut session = UploadSession::new("act_123", file.path()).with_title("Chunked Upload");
    let success = client_for(&server).videos().upload(&mut session).await.unwrap();

    assert!(success);
    assert!(session.is_done());
    assert_eq!(server.received_requests().await.unwrap().len(), 7);
}

#[tokio::test]
async fn test_session_survives_serialization() {
    let server = setup_mock_server().await;
    mount_upload_api(&server).await;
    let file = video_file();
    let videos = client_for(&server).videos();

    let mut session = UploadSession::new("act_123", file.path()).with_title("Chunked Upload");
    videos.advance(&mut session).await.unwrap();
    videos.advance(&mut session).await.unwrap();

    let saved = serde_json::to_string(&session).unwrap();
    let mut resumed: UploadSession = serde_json::from_str(&saved).unwrap();
    assert_eq!(resumed, session);

    assert!(videos.upload(&mut resumed).await.unwrap());
    assert_eq!(resumed.video_id(), "V1");
}

#[tokio::test]
async fn test_finish_without_success_is_decode_error() {
    let server = setup_mock_server().await;

    mock_with_token("POST", "/v2.11/act_9/advideos")
        .and(body_string_contains("upload_phase=start"))
        .respond_with(success_response(json!({
            "upload_session_id": "S9",
            "start_offset": "10",
            "end_offset": "10"
        })))
        .mount(&server)
        .await;
    mock_with_token("POST", "/v2.11/act_9/advideos")
        .and(body_string_contains("upload_phase=finish"))
        .respond_with(success_response(json!({})))
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"0123456789").unwrap();
    file.flush().unwrap();

    let videos = client_for(&server).videos();
    let mut session = UploadSession::new("act_9", file.path());
    assert_eq!(videos.advance(&mut session).await.unwrap(), UploadState::Finishing);

    let err = videos.advance(&mut session).await.unwrap_err();
    assert!(matches!(err, integrations_facebook::FacebookError::Decode(_)));
    assert_eq!(session.state(), UploadState::Finishing);
    assert_eq!(session.success(), None);
}
