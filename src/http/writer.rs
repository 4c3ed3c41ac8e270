use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::http::response::{Body, Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Chunk size for streaming file bodies.
const BUFFER_SIZE: usize = 8192;

fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n");
    buf
}

/// Writes a response to the client, streaming file bodies in chunks.
///
/// With `head_only` (HEAD requests) the headers, including Content-Length,
/// are sent and the body is skipped.
pub struct ResponseWriter {
    response: Response,
    head_only: bool,
}

impl ResponseWriter {
    pub fn new(response: Response, head_only: bool) -> Self {
        Self {
            response,
            head_only,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.response.status
    }

    pub async fn write_to_stream(&mut self, stream: &mut TcpStream) -> anyhow::Result<()> {
        let head = serialize_head(&self.response);
        stream.write_all(&head).await?;

        if !self.head_only {
            let body = std::mem::replace(&mut self.response.body, Body::Bytes(Vec::new()));

            match body {
                Body::Bytes(bytes) => {
                    stream.write_all(&bytes).await?;
                }
                Body::File { file, .. } => {
                    // File handles come from the blocking resolver; hand the
                    // descriptor to tokio for the streaming reads.
                    let mut file = tokio::fs::File::from_std(file);
                    let mut chunk = [0u8; BUFFER_SIZE];

                    loop {
                        let n = file.read(&mut chunk).await?;
                        if n == 0 {
                            break;
                        }
                        stream.write_all(&chunk[..n]).await?;
                    }
                }
            }
        }

        stream.flush().await?;
        Ok(())
    }
}
