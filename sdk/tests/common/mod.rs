use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Single-purpose HTTP endpoint answering every request with the same JSON
/// body and forwarding the received request bodies to the test.
pub struct CannedRpcServer {
    pub address: SocketAddr,
    pub requests: mpsc::UnboundedReceiver<serde_json::Value>,
}

impl CannedRpcServer {
    pub async fn start(response_body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind canned RPC server");
        let address = listener.local_addr().expect("Missing local address");
        let (sender, requests) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let sender = sender.clone();
                tokio::spawn(async move {
                    let body = read_request_body(&mut stream).await;
                    if let Ok(json) = serde_json::from_slice(&body) {
                        let _ = sender.send(json);
                    }
                    let response = format!(
                        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        response_body.len(),
                        response_body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { address, requests }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.address)
    }
}

async fn read_request_body(stream: &mut tokio::net::TcpStream) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let read = match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return Vec::new(),
            Ok(read) => read,
        };
        buffer.extend_from_slice(&chunk[..read]);
        let Some(headers_end) = find_headers_end(&buffer) else {
            continue;
        };
        let content_length = content_length(&buffer[..headers_end]);
        let body_start = headers_end + 4;
        if buffer.len() >= body_start + content_length {
            return buffer[body_start..body_start + content_length].to_vec();
        }
    }
}

fn find_headers_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

fn content_length(headers: &[u8]) -> usize {
    String::from_utf8_lossy(headers)
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}
