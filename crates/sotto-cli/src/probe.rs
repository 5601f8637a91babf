//! Minimal liveness probe.
//!
//! Answers `/health` with a JSON status body; any other path gets a
//! plain "running" line. Deliberately hand-rolled: one request per
//! connection, no keep-alive, no routing beyond the request target.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    uptime_secs: u64,
    ledger_accessible: bool,
}

/// Serve the probe until the process is stopped.
pub async fn serve(ledger_path: PathBuf, port: u16) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    let started = Instant::now();
    info!(port, "liveness probe listening");

    loop {
        let (stream, _) = listener.accept().await?;
        if let Err(err) = answer(stream, &ledger_path, started).await {
            warn!(%err, "probe connection failed");
        }
    }
}

async fn answer(mut stream: TcpStream, ledger_path: &Path, started: Instant) -> Result<()> {
    let mut buf = [0u8; 1024];
    let read = stream.read(&mut buf).await?;
    let request = String::from_utf8_lossy(&buf[..read]);

    let response = if request_path(&request) == Some("/health") {
        let ledger_accessible = tokio::fs::metadata(ledger_path).await.is_ok();
        let health = HealthStatus {
            status: if ledger_accessible { "healthy" } else { "unhealthy" },
            uptime_secs: started.elapsed().as_secs(),
            ledger_accessible,
        };
        let body = serde_json::to_string(&health)?;
        let code = if ledger_accessible {
            "200 OK"
        } else {
            "500 Internal Server Error"
        };
        http_response(code, "application/json", &body)
    } else {
        http_response("200 OK", "text/plain", "Relay is running")
    };

    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

fn http_response(code: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {code}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Extract the request target from the first request line.
fn request_path(request: &str) -> Option<&str> {
    request.lines().next()?.split_whitespace().nth(1)
}
