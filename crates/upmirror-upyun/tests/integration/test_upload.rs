//! Upload outcome classification and integrity metadata

use std::io::Write;

use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use upmirror_core::domain::newtypes::RemotePath;
use upmirror_core::ports::object_store::{ObjectStore, UploadError};
use upmirror_upyun::upload::upload_file;
use upmirror_upyun::{RestClient, UpyunStore};

use crate::common::{setup_client, TEST_BUCKET};

fn dest(name: &str) -> RemotePath {
    RemotePath::new("/media".to_string()).unwrap().join(name).unwrap()
}

fn temp_file(content: &[u8]) -> tempfile::NamedTempFile {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(content).unwrap();
    tmp.flush().unwrap();
    tmp
}

#[tokio::test]
async fn successful_upload_sends_body_and_checksum() {
    let (server, client) = setup_client().await;
    let tmp = temp_file(b"hello world");

    // md5("hello world"). The checksum must ride under the API's
    // verification key with the streamed digest as its value.
    Mock::given(method("PUT"))
        .and(path(format!("/{TEST_BUCKET}/media/clip.mp4")))
        .and(header("Content-MD5", "5eb63bbbe01eeed093cb22bb8f5acdc3"))
        .and(body_bytes(b"hello world".to_vec()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    upload_file(&client, tmp.path(), &dest("clip.mp4"))
        .await
        .expect("upload succeeds");
}

#[tokio::test]
async fn wire_request_carries_checksum_key_and_digest() {
    // Below the mock layer: capture the raw request bytes and verify the
    // verification key and digest actually reach the socket. Field names
    // are case-insensitive on the wire (RFC 9110), so the key is matched
    // ignoring case; the digest value must be exact.
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        // read until the 5-byte body has arrived
        while !request.windows(5).any(|w| w == b"hello") {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before the body arrived");
            request.extend_from_slice(&chunk[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\n\r\n")
            .await
            .unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });

    let client = RestClient::with_base_url(TEST_BUCKET, "op", "pw", format!("http://{addr}"));
    let tmp = temp_file(b"hello");
    upload_file(&client, tmp.path(), &dest("clip.bin"))
        .await
        .expect("upload succeeds");

    let request = server.await.unwrap();
    let checksum_line = request
        .lines()
        .find(|line| line.to_ascii_lowercase().starts_with("content-md5:"))
        .expect("checksum header present on the wire");
    // md5("hello")
    assert!(checksum_line.ends_with("5d41402abc4b2a76b9719d911017c592"));
}

#[tokio::test]
async fn created_status_counts_as_success() {
    let (server, client) = setup_client().await;
    let tmp = temp_file(b"payload");

    Mock::given(method("PUT"))
        .and(path(format!("/{TEST_BUCKET}/media/new.bin")))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    assert!(upload_file(&client, tmp.path(), &dest("new.bin")).await.is_ok());
}

#[tokio::test]
async fn rejected_upload_carries_status_and_body() {
    let (server, client) = setup_client().await;
    let tmp = temp_file(b"payload");

    Mock::given(method("PUT"))
        .and(path(format!("/{TEST_BUCKET}/media/bad.bin")))
        .respond_with(ResponseTemplate::new(403).set_body_string("checksum mismatch"))
        .mount(&server)
        .await;

    let err = upload_file(&client, tmp.path(), &dest("bad.bin"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        UploadError::Status {
            status: 403,
            body: "checksum mismatch".to_string(),
        }
    );
    // The rendered reason is what ends up in cycle logs.
    assert!(err.to_string().contains("403"));
    assert!(err.to_string().contains("checksum mismatch"));
}

#[tokio::test]
async fn missing_local_file_is_io_error_without_any_request() {
    let (server, client) = setup_client().await;
    // No mocks mounted: any request would come back 404 and misclassify.

    let err = upload_file(
        &client,
        std::path::Path::new("/nonexistent/file.bin"),
        &dest("file.bin"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, UploadError::Io(_)));
    drop(server);
}

#[tokio::test]
async fn transport_error_surfaces_as_upload_error() {
    let client = RestClient::with_base_url(TEST_BUCKET, "op", "pw", "http://127.0.0.1:9");
    let tmp = temp_file(b"payload");

    let err = upload_file(&client, tmp.path(), &dest("x.bin"))
        .await
        .unwrap_err();
    assert!(matches!(err, UploadError::Transport(_)));
}

#[tokio::test]
async fn store_adapter_round_trip() {
    let (server, client) = setup_client().await;
    let tmp = temp_file(b"via the port");

    Mock::given(method("PUT"))
        .and(path(format!("/{TEST_BUCKET}/media/port.bin")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let store = UpyunStore::new(client);
    store
        .upload_file(tmp.path(), &dest("port.bin"))
        .await
        .expect("upload through the port succeeds");
}
