//! Listing pagination, folder filtering, and failure semantics

use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use upmirror_core::domain::newtypes::RemotePath;
use upmirror_core::ports::object_store::ListError;
use upmirror_upyun::listing::{list_dir, LIST_ITER_EOF};
use upmirror_upyun::RestClient;

use crate::common::{
    listing_page, mount_listing_cursor_page, mount_listing_single_page, setup_client, TEST_BUCKET,
};

fn media() -> RemotePath {
    RemotePath::new("/media".to_string()).unwrap()
}

#[tokio::test]
async fn aggregates_pages_until_sentinel() {
    let (server, client) = setup_client().await;

    // Continuation pages match only when the client echoes the cursor back.
    mount_listing_cursor_page(
        &server,
        "/media/",
        "c1",
        listing_page(&[("b.txt", "file")], "c2"),
    )
    .await;
    mount_listing_cursor_page(
        &server,
        "/media/",
        "c2",
        listing_page(&[("c.txt", "file"), ("nested", "folder")], LIST_ITER_EOF),
    )
    .await;

    // First page: no cursor header yet; exhausted after one use.
    Mock::given(method("GET"))
        .and(path(format!("/{TEST_BUCKET}/media/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_page(
            &[("a.txt", "file"), ("tmp", "folder")],
            "c1",
        )))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let names = list_dir(&client, &media()).await.expect("listing succeeds");

    let expected: Vec<&str> = vec!["a.txt", "b.txt", "c.txt"];
    assert_eq!(names.iter().map(String::as_str).collect::<Vec<_>>(), expected);
}

#[tokio::test]
async fn excludes_folder_entries() {
    let (server, client) = setup_client().await;
    mount_listing_single_page(
        &server,
        "/media/",
        &[
            ("clip.mp4", "file"),
            ("archive", "folder"),
            ("notes.txt", "file"),
        ],
    )
    .await;

    let names = list_dir(&client, &media()).await.unwrap();
    assert_eq!(names.len(), 2);
    assert!(names.contains("clip.mp4"));
    assert!(names.contains("notes.txt"));
    assert!(!names.contains("archive"));
}

#[tokio::test]
async fn empty_listing_yields_empty_set() {
    let (server, client) = setup_client().await;
    mount_listing_single_page(&server, "/media/", &[]).await;

    let names = list_dir(&client, &media()).await.unwrap();
    assert!(names.is_empty());
}

#[tokio::test]
async fn root_destination_is_addressed_with_single_slash() {
    let (server, client) = setup_client().await;
    mount_listing_single_page(&server, "/", &[("a.txt", "file")]).await;

    let names = list_dir(&client, &RemotePath::root()).await.unwrap();
    assert!(names.contains("a.txt"));
}

#[tokio::test]
async fn non_200_first_page_fails_listing() {
    let (server, client) = setup_client().await;
    Mock::given(method("GET"))
        .and(path(format!("/{TEST_BUCKET}/media/")))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let err = list_dir(&client, &media()).await.unwrap_err();
    assert_eq!(
        err,
        ListError::Status {
            status: 401,
            body: "bad credentials".to_string(),
        }
    );
}

#[tokio::test]
async fn non_200_later_page_fails_whole_listing() {
    let (server, client) = setup_client().await;

    // Second page breaks; the entries from page one must not leak out.
    Mock::given(method("GET"))
        .and(path(format!("/{TEST_BUCKET}/media/")))
        .and(wiremock::matchers::header("x-list-iter", "c1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend unavailable"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/{TEST_BUCKET}/media/")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing_page(&[("a.txt", "file")], "c1")),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let err = list_dir(&client, &media()).await.unwrap_err();
    match err {
        ListError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "backend unavailable");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_error_surfaces_as_list_error() {
    // Nothing listens on this port.
    let client = RestClient::with_base_url(TEST_BUCKET, "op", "pw", "http://127.0.0.1:9");

    let err = list_dir(&client, &media()).await.unwrap_err();
    assert!(matches!(err, ListError::Transport(_)));
}

#[tokio::test]
async fn malformed_body_surfaces_as_decode_error() {
    let (server, client) = setup_client().await;
    Mock::given(method("GET"))
        .and(path(format!("/{TEST_BUCKET}/media/")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = list_dir(&client, &media()).await.unwrap_err();
    assert!(matches!(err, ListError::Decode(_)));
}
