use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use anyhow::Result;
use serde_json::{Value, json};
use thiserror::Error;
use tokio::time::timeout;

/// Failure taxonomy for a single JSON-RPC probe
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    #[error("network error: {0}")]
    Network(String),

    #[error("endpoint returned JSON-RPC error: {0}")]
    Rpc(Value),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Outcome of one probe call, with the measured wall-clock duration
#[derive(Debug)]
pub struct ProbeOutcome {
    pub result: Result<Value, ProbeError>,
    pub elapsed_ms: u64,
}

/// Probe seam for issuing one bounded JSON-RPC call to an endpoint
#[async_trait::async_trait]
pub trait RpcProbe: Send + Sync {
    /// Issue a single call with a hard deadline; cancellation past the
    /// deadline affects only this call
    async fn call(&self, url: &str, method: &str, deadline: Duration) -> ProbeOutcome;
}

/// JSON-RPC 2.0 probe over HTTP POST
pub struct HttpRpcProbe {
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpRpcProbe {
    pub fn new() -> Result<Self> {
        // Deadlines are enforced per call, not on the client
        let client = reqwest::Client::builder().user_agent("rpcwatch/0.1").build()?;

        Ok(Self { client, next_id: AtomicU64::new(1) })
    }

    async fn send_request(&self, url: &str, method: &str) -> Result<Value, ProbeError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
            "method": method,
            "params": [],
        });

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProbeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Network(format!("HTTP status {}", status.as_u16())));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProbeError::Malformed(format!("invalid JSON body: {e}")))?;

        if let Some(error) = body.get("error") {
            return Err(ProbeError::Rpc(error.clone()));
        }

        match body.get("result") {
            Some(result) => Ok(result.clone()),
            None => Err(ProbeError::Malformed("response has neither result nor error".to_string())),
        }
    }
}

#[async_trait::async_trait]
impl RpcProbe for HttpRpcProbe {
    async fn call(&self, url: &str, method: &str, deadline: Duration) -> ProbeOutcome {
        let start = Instant::now();

        // Dropping the request future on expiry aborts the in-flight call
        let result = match timeout(deadline, self.send_request(url, method)).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout(deadline.as_millis() as u64)),
        };

        ProbeOutcome { result, elapsed_ms: start.elapsed().as_millis() as u64 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one HTTP response with the given body on a local socket,
    /// delaying by `delay` before responding
    async fn serve_once(body: &'static str, delay: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            tokio::time::sleep(delay).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_successful_probe_returns_result_field() {
        let url =
            serve_once(r#"{"jsonrpc":"2.0","id":1,"result":12345}"#, Duration::ZERO).await;
        let probe = HttpRpcProbe::new().unwrap();

        let outcome = probe.call(&url, "getSlot", Duration::from_secs(5)).await;
        assert_eq!(outcome.result.unwrap(), serde_json::json!(12345));
    }

    #[tokio::test]
    async fn test_rpc_error_envelope() {
        let url = serve_once(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"method not found"}}"#,
            Duration::ZERO,
        )
        .await;
        let probe = HttpRpcProbe::new().unwrap();

        let outcome = probe.call(&url, "getSlot", Duration::from_secs(5)).await;
        assert!(matches!(outcome.result, Err(ProbeError::Rpc(_))));
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let url = serve_once(r#"{"jsonrpc":"2.0","id":1}"#, Duration::ZERO).await;
        let probe = HttpRpcProbe::new().unwrap();

        let outcome = probe.call(&url, "getSlot", Duration::from_secs(5)).await;
        assert!(matches!(outcome.result, Err(ProbeError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind a listener to reserve a port, then drop it
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let probe = HttpRpcProbe::new().unwrap();
        let outcome = probe.call(&url, "getSlot", Duration::from_secs(5)).await;
        assert!(matches!(outcome.result, Err(ProbeError::Network(_))));
    }

    #[tokio::test]
    async fn test_deadline_exceeded_is_timeout() {
        let url = serve_once(
            r#"{"jsonrpc":"2.0","id":1,"result":1}"#,
            Duration::from_secs(5),
        )
        .await;
        let probe = HttpRpcProbe::new().unwrap();

        let outcome = probe.call(&url, "getSlot", Duration::from_millis(100)).await;
        assert!(matches!(outcome.result, Err(ProbeError::Timeout(_))));
        assert!(outcome.elapsed_ms >= 100);
    }
}
