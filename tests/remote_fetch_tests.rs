#![cfg(feature = "remote")]

use course_catalog::{CourseSource, LoadError, fetch_courses};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves one canned HTTP response and returns the URL to fetch it from.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.expect("read request");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/csv; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/pub?output=csv")
}

#[tokio::test]
async fn fetches_and_parses_published_sheet() {
    let url = serve_once(
        "200 OK",
        "id,name,department,rating\nR1,Remote Course,History,4.0\nR1,Duplicate,History,1.0\n,No id,,\n",
    )
    .await;
    let courses = fetch_courses(&url).await.expect("fetch");
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].name, "Remote Course");
    assert_eq!(courses[0].rating, Some(4.0));
}

#[tokio::test]
async fn non_success_status_is_a_load_error() {
    let url = serve_once("404 Not Found", "missing").await;
    match fetch_courses(&url).await {
        Err(LoadError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn url_source_loads_through_http() {
    let url = serve_once("200 OK", "id,name\nU1,From source\n").await;
    let courses = CourseSource::parse(&url).load().await.expect("load");
    assert_eq!(courses[0].id, "U1");
}

#[tokio::test]
async fn unreachable_host_is_a_load_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let result = fetch_courses(&format!("http://{addr}/closed.csv")).await;
    assert!(matches!(result, Err(LoadError::Http(_))));
}
