//! Wire-level behavior against a local single-shot HTTP stub.

use nasapy::{Error, Nasa};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::JoinHandle;
use tracing_subscriber::EnvFilter;

// Honors RUST_LOG so the request lines show up when a test fails.
fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Serves exactly one connection with a canned response.
fn serve_once(status_line: &str, headers: &str, body: &str) -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
        status_line,
        body.len(),
        headers,
        body
    );

    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 8192];
        let _ = stream.read(&mut request);
        stream.write_all(response.as_bytes()).unwrap();
    });

    (addr, handle)
}

#[test]
fn non_success_status_surfaces_status_and_body() {
    init_logs();
    let (addr, handle) = serve_once("429 Too Many Requests", "", "OVER_RATE_LIMIT");
    let nasa = Nasa::new(None).with_host(format!("http://{}", addr));

    let err = nasa.picture_of_the_day(None, false).unwrap_err();
    match err {
        Error::Http { status, body, .. } => {
            assert_eq!(status, 429);
            assert!(body.contains("OVER_RATE_LIMIT"));
        }
        other => panic!("expected Http error, got {:?}", other),
    }

    handle.join().unwrap();
}

#[test]
fn success_records_rate_limit_and_parses_json() {
    init_logs();
    let (addr, handle) = serve_once(
        "200 OK",
        "X-RateLimit-Remaining: 39\r\n",
        r#"{"title":"M31","hdurl":"https://apod.nasa.gov/apod/image/m31.jpg"}"#,
    );
    let nasa = Nasa::new(None).with_host(format!("http://{}", addr));

    let json = nasa.picture_of_the_day(None, true).unwrap();
    assert_eq!(json["title"], "M31");
    assert_eq!(nasa.limit_remaining(), Some(39));

    handle.join().unwrap();
}

#[test]
fn empty_body_maps_to_empty_object() {
    init_logs();
    let (addr, handle) = serve_once("200 OK", "", "");
    let nasa = Nasa::new(None).with_host(format!("http://{}", addr));

    let json = nasa.geomagnetic_storm(None, None).unwrap();
    assert_eq!(json, serde_json::json!({}));

    handle.join().unwrap();
}
