//! Runs the HTTP login client against a one-shot local server.

use pl_core::login::submit_login;
use pl_core::{LoginClient, LoginCredentials, LoginError, LoginForm, LoginOutcome};
use pl_ui::login::HttpLoginClient;
use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Answers a single request with `status` and hands back the raw request.
async fn serve_once(status: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];

        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if request_complete(&raw) {
                break;
            }
        }

        let response =
            format!("HTTP/1.1 {status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();

        String::from_utf8(raw).unwrap()
    });

    (base, handle)
}

/// Headers received and the body is as long as `Content-Length` says.
fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some((head, body)) = text.split_once("\r\n\r\n") else {
        return false;
    };
    let length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    body.len() >= length
}

fn credentials() -> LoginCredentials {
    LoginCredentials {
        email: "user@example.com".to_string(),
        password: "password123".to_string(),
    }
}

#[tokio::test]
async fn ok_status_is_success_and_body_is_json() {
    let (base, server) = serve_once("200 OK").await;
    let client = HttpLoginClient::new(&base);

    let outcome = client.login(&credentials()).await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(
        outcome,
        LoginOutcome::Success {
            redirect: "/dashboard".to_string()
        }
    );
    assert!(request.starts_with("POST /api/login HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("content-type: application/json"));

    let body = request.split_once("\r\n\r\n").unwrap().1;
    let sent: LoginCredentials = serde_json::from_str(body).unwrap();
    assert_eq!(sent, credentials());
}

#[tokio::test]
async fn unauthorized_status_is_rejected() {
    let (base, server) = serve_once("401 Unauthorized").await;
    let client = HttpLoginClient::new(&base);

    let outcome = submit_login(&client, &LoginForm::new("user@example.com", "password123")).await;
    server.await.unwrap();

    assert_eq!(outcome, Ok(LoginOutcome::Rejected { status: 401 }));
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let result = HttpLoginClient::new(&base).login(&credentials()).await;

    assert!(matches!(result, Err(LoginError::Network(_))));
}
