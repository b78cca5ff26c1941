use std::net::TcpListener;
use std::time::Duration;

use gridfetch_engine::{FailureKind, FetchSettings, Fetcher, ReqwestFetcher};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(settings: FetchSettings) -> ReqwestFetcher {
    ReqwestFetcher::new(settings).expect("client builds")
}

#[tokio::test]
async fn fetcher_returns_body_and_metadata() {
    let server = MockServer::start().await;
    let body: Vec<u8> = (0..2048u32).map(|i| (i % 251) as u8).collect();
    Mock::given(method("GET"))
        .and(path("/img/1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.clone(), "image/jpeg"))
        .mount(&server)
        .await;

    let url = format!("{}/img/1", server.uri());
    let output = fetcher(FetchSettings::default())
        .fetch(&url)
        .await
        .expect("fetch ok");

    assert_eq!(output.bytes.as_ref(), body.as_slice());
    assert_eq!(output.metadata.original_url, url);
    assert_eq!(output.metadata.final_url, url);
    assert_eq!(output.metadata.byte_len, 2048);
    assert_eq!(output.metadata.content_type.as_deref(), Some("image/jpeg"));
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let err = fetcher(FetchSettings::default()).fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn bad_status_wins_over_a_non_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error page"))
        .mount(&server)
        .await;

    let url = format!("{}/broken", server.uri());
    let err = fetcher(FetchSettings::default()).fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn fetcher_rejects_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let url = format!("{}/empty", server.uri());
    let err = fetcher(FetchSettings::default()).fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::EmptyBody);
}

#[tokio::test]
async fn fetcher_times_out_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..FetchSettings::default()
    };
    let url = format!("{}/slow", server.uri());
    let err = fetcher(settings).fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Transport);
    assert!(err.message.contains("timed out"), "{}", err.message);
}

#[tokio::test]
async fn malformed_url_is_a_transport_error() {
    let err = fetcher(FetchSettings::default())
        .fetch("not a url")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Transport);
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    // Pooled mock servers keep listening after drop; a bare listener does not.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/gone", listener.local_addr().unwrap());
    drop(listener);

    let err = fetcher(FetchSettings::default()).fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Transport);
}
