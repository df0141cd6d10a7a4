use quake_processor::lookup::IpLookupClient;
use quake_processor::ProcessingError;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve a single HTTP response on a random local port and return its URL.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let address = listener.local_addr().expect("Stub server has no address");

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Failed to accept");

        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let read = socket.read(&mut buffer).await.expect("Failed to read request");
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buffer[..read]);
        }

        let response = format!(
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("Failed to write response");
        socket.shutdown().await.ok();
    });

    format!("http://{}/json/", address)
}

#[tokio::test]
async fn test_lookup_success() {
    let url = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"status":"success","country":"Chile","regionName":"Santiago Metropolitan","city":"Santiago","lat":-33.45,"lon":-70.66,"isp":"Example ISP","query":"198.51.100.20"}"#,
    )
    .await;

    let client = IpLookupClient::new(&url, Duration::from_secs(5)).unwrap();
    let location = client.lookup().await.unwrap();

    assert_eq!(location.country, "Chile");
    assert_eq!(location.region_name, "Santiago Metropolitan");
    assert_eq!(location.longitude, -70.66);
}

#[tokio::test]
async fn test_lookup_missing_field() {
    let url = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"status":"success","country":"Chile","query":"198.51.100.20"}"#,
    )
    .await;

    let client = IpLookupClient::new(&url, Duration::from_secs(5)).unwrap();
    let result = client.lookup().await;

    assert!(matches!(result, Err(ProcessingError::MissingField(field)) if field == "regionName"));
}

#[tokio::test]
async fn test_lookup_http_error_is_network_error() {
    let url = serve_once("HTTP/1.1 503 Service Unavailable", "{}").await;

    let client = IpLookupClient::new(&url, Duration::from_secs(5)).unwrap();
    let result = client.lookup().await;

    assert!(matches!(result, Err(ProcessingError::Network(_))));
}

#[tokio::test]
async fn test_lookup_connection_refused() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let client =
        IpLookupClient::new(&format!("http://{}/json/", address), Duration::from_secs(5)).unwrap();
    let result = client.lookup().await;

    assert!(matches!(result, Err(ProcessingError::Network(_))));
}
