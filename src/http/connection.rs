use std::sync::Arc;
use std::time::Instant;

use bytes::{Buf, BytesMut};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::config::Config;
use crate::fs::{self, Resolved, ResolveError};
use crate::http::access_log::AccessLog;
use crate::http::mime;
use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::http::writer::ResponseWriter;

/// Upper bound on buffered request bytes before the connection is dropped.
const MAX_REQUEST_SIZE: usize = 64 * 1024;

pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    config: Arc<Config>,
    log: AccessLog,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing {
        writer: ResponseWriter,
        keep_alive: bool,
        path: String,
        started: Instant,
    },
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, config: Arc<Config>) -> Self {
        let log = AccessLog::new(config.logging);

        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            config,
            log,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(req) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    None => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req) => {
                    let started = Instant::now();
                    let path = req.path();
                    let keep_alive = req.keep_alive();
                    let head_only = req.method == Method::HEAD;

                    let response = Self::handle_request(&self.config, req);
                    let writer = ResponseWriter::new(response, head_only);

                    self.state = ConnectionState::Writing {
                        writer,
                        keep_alive,
                        path,
                        started,
                    };
                }

                ConnectionState::Writing {
                    writer,
                    keep_alive,
                    path,
                    started,
                } => {
                    let keep_alive = *keep_alive;
                    writer.write_to_stream(&mut self.stream).await?;
                    self.log.record(path, writer.status(), *started);

                    if keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(Some(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => {
                    return Err(anyhow::anyhow!("HTTP parse error: {:?}", e));
                }
            }

            if self.buffer.len() > MAX_REQUEST_SIZE {
                anyhow::bail!("request too large");
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                // Client closed connection
                return Ok(None);
            }
        }
    }

    /// Maps a request through the resolver onto a response.
    fn handle_request(config: &Config, req: &Request) -> Response {
        if !matches!(req.method, Method::GET | Method::HEAD) {
            return Self::finish(config, Response::method_not_allowed());
        }

        let path = req.path();

        let response = match fs::resolve(&config.root, config, &path) {
            Ok(Resolved::File(f)) => ResponseBuilder::new(StatusCode::Ok)
                .header("Content-Type", mime::content_type(&f.path))
                .file(f.file, f.len)
                .build(),

            Ok(Resolved::Directory(dir)) => match fs::list_dir(&dir, config) {
                Ok(entries) => {
                    let page = fs::listing::render_index(&path, &entries);
                    ResponseBuilder::new(StatusCode::Ok)
                        .header("Content-Type", "text/html; charset=utf-8")
                        .body(page.into_bytes())
                        .build()
                }
                Err(e) => {
                    tracing::error!(path = %path, error = %e, "Directory listing failed");
                    Response::internal_error()
                }
            },

            Err(ResolveError::Forbidden) => Response::forbidden(),
            Err(ResolveError::NotFound) => Response::not_found(),
            Err(ResolveError::Io(e)) => {
                tracing::error!(path = %path, error = %e, "Resolution failed");
                Response::internal_error()
            }
        };

        Self::finish(config, response)
    }

    fn finish(config: &Config, mut response: Response) -> Response {
        if config.no_cache {
            response
                .headers
                .insert("Cache-Control".to_string(), "no-cache".to_string());
        }
        response
    }
}
