// tests/webhook_sink.rs

mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use slurm_monitor::errors::NotifyError;
use slurm_monitor::notify::{Icon, Notification, NotificationSink, WebhookSink};

type TestResult = Result<(), Box<dyn Error>>;

/// Accept one HTTP request, answer with `status_line`, and return the body.
async fn one_shot_server(status_line: &'static str) -> std::io::Result<(String, JoinHandle<String>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://{}/hook", listener.local_addr()?);

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        let body_start = loop {
            let n = socket.read(&mut buf).await.expect("read");
            assert!(n > 0, "client closed before sending headers");
            request.extend_from_slice(&buf[..n]);
            if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let headers = String::from_utf8_lossy(&request[..body_start]).to_lowercase();
        let length: usize = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .map(|v| v.trim().parse().expect("content-length"))
            .unwrap_or(0);
        while request.len() < body_start + length {
            let n = socket.read(&mut buf).await.expect("read body");
            assert!(n > 0, "client closed mid-body");
            request.extend_from_slice(&buf[..n]);
        }

        let reply = format!("{status_line}\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok");
        socket.write_all(reply.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&request[body_start..body_start + length]).to_string()
    });

    Ok((url, handle))
}

fn notification() -> Notification {
    Notification {
        message: "Job started: 1 (train) on gpu, GPUs: 2".to_string(),
        icon: Icon::Started,
    }
}

#[tokio::test]
async fn posts_slack_compatible_payload() -> TestResult {
    init_tracing();

    let (url, server) = one_shot_server("HTTP/1.1 200 OK").await?;
    let sink = WebhookSink::new(url.clone(), Duration::from_secs(5))?;
    assert_eq!(sink.url(), url);

    with_timeout(sink.send(&notification())).await?;

    let body: serde_json::Value = serde_json::from_str(&with_timeout(server).await?)?;
    assert_eq!(body["text"], "Job started: 1 (train) on gpu, GPUs: 2");
    assert_eq!(body["icon_emoji"], ":rocket:");
    Ok(())
}

#[tokio::test]
async fn error_status_is_reported() -> TestResult {
    init_tracing();

    let (url, server) = one_shot_server("HTTP/1.1 404 Not Found").await?;
    let sink = WebhookSink::new(url, Duration::from_secs(5))?;

    let err = with_timeout(sink.send(&notification()))
        .await
        .expect_err("404 must fail");
    assert!(matches!(err, NotifyError::Status { status: 404, ref body } if body == "ok"));

    with_timeout(server).await?;
    Ok(())
}

#[tokio::test]
async fn unreachable_webhook_is_an_http_error() -> TestResult {
    init_tracing();

    // Reserve a port, then close it again so nothing is listening.
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://{}/hook", listener.local_addr()?);
    drop(listener);

    let sink = WebhookSink::new(url, Duration::from_secs(2))?;
    let err = with_timeout(sink.send(&notification()))
        .await
        .expect_err("nothing is listening");

    assert!(matches!(err, NotifyError::Http(_)));
    Ok(())
}
