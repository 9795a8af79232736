//! HTTP server for the interactive upload page
//!
//! `copycheck serve` → starts server, opens browser, page posts uploads to
//! `/api/analyze` and renders the returned report.
//!
//! Requests are handled one at a time on the accept loop, which also owns
//! the single random source.

use crate::analyzer::{AnalysisReport, Analyzer};
use crate::audio::AudioInput;
use crate::error::{Error, Result};
use crate::report::ReportView;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::io::Read;
use tiny_http::{Header, Method, Request, Response, Server};

// Embed the UI directly in the binary
const UI_HTML: &str = include_str!("ui.html");

pub const DEFAULT_MAX_UPLOAD_MB: u64 = 200;

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self { ok: true, data: Some(data), error: None }
    }
}

impl ApiResponse<()> {
    fn failure(message: impl Into<String>) -> Self {
        Self { ok: false, data: None, error: Some(message.into()) }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct AnalyzeParams {
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize)]
struct Health {
    version: &'static str,
}

#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
    pub seed: Option<u64>,
    pub max_upload_bytes: u64,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            open_browser: true,
            seed: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

/// A rendered HTTP reply, independent of the transport
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self { status: 200, content_type: "text/html; charset=utf-8", body }
    }

    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        // Serializing our own response types cannot fail; fall back to a bare error
        let body = serde_json::to_string(value)
            .unwrap_or_else(|_| r#"{"ok":false,"data":null,"error":"serialization failed"}"#.to_string());
        Self { status, content_type: "application/json", body }
    }

    fn error(err: &Error) -> Self {
        let status = match err {
            Error::UploadTooLarge { .. } => 413,
            e if e.is_client_error() => 400,
            _ => 500,
        };
        Self::json(status, &ApiResponse::failure(err.to_string()))
    }

    fn not_found() -> Self {
        Self { status: 404, content_type: "text/plain", body: "Not found".to_string() }
    }
}

/// Request routing state: the analyzer plus the random source it draws from
pub struct App {
    analyzer: Analyzer,
    rng: StdRng,
    max_upload_bytes: u64,
}

impl App {
    pub fn new(analyzer: Analyzer, seed: Option<u64>, max_upload_bytes: u64) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { analyzer, rng, max_upload_bytes }
    }

    /// Route one request. `url` includes the query string.
    pub fn route(
        &mut self,
        method: &Method,
        url: &str,
        body: &mut dyn Read,
        content_length: Option<usize>,
    ) -> Reply {
        let path = url.split('?').next().unwrap_or("/");

        match (method, path) {
            (&Method::Get, "/") => Reply::html(UI_HTML.to_string()),

            (&Method::Get, "/api/health") => Reply::json(
                200,
                &ApiResponse::success(Health { version: env!("CARGO_PKG_VERSION") }),
            ),

            (&Method::Post, "/api/analyze") => {
                match self.analyze_upload(url, body, content_length) {
                    Ok(report) => Reply::json(200, &ApiResponse::success(ReportView::new(&report))),
                    Err(e) => {
                        tracing::warn!(error = %e, "upload rejected");
                        Reply::error(&e)
                    }
                }
            }

            _ => Reply::not_found(),
        }
    }

    fn analyze_upload(
        &mut self,
        url: &str,
        body: &mut dyn Read,
        content_length: Option<usize>,
    ) -> Result<AnalysisReport> {
        let params = parse_params(url);
        let bytes = read_limited(body, content_length, self.max_upload_bytes)?;
        let input = AudioInput::new(params.name, bytes)?;

        tracing::info!(file = input.file_name(), bytes = input.size_bytes(), "analyzing upload");
        Ok(self.analyzer.analyze(&mut self.rng, &input))
    }
}

/// Start server, open browser, serve UI
pub fn start(config: ServeConfig, analyzer: Analyzer) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let server = Server::http(&addr).map_err(|e| Error::Server(e.to_string()))?;

    let url = format!("http://localhost:{}", config.port);

    eprintln!("\n\x1b[1;32m🎵 copycheck\x1b[0m");
    eprintln!("   {}\n", url);
    tracing::info!(%addr, seeded = config.seed.is_some(), "server listening");

    if config.open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    let mut app = App::new(analyzer, config.seed, config.max_upload_bytes);

    // Handle requests
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(&mut app, request) {
            tracing::error!(error = %e, "request failed");
        }
    }

    Ok(())
}

fn handle_request(app: &mut App, mut request: Request) -> Result<()> {
    let method = request.method().clone();
    let url = request.url().to_string();
    let content_length = request.body_length();

    tracing::debug!(%method, %url, "request");

    let reply = app.route(&method, &url, request.as_reader(), content_length);

    let header = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
        .map_err(|_| Error::Server("invalid content type header".to_string()))?;
    let response = Response::from_string(reply.body)
        .with_status_code(reply.status)
        .with_header(header);

    request.respond(response)?;
    Ok(())
}

fn parse_params(url: &str) -> AnalyzeParams {
    url.split('?')
        .nth(1)
        .and_then(|query| serde_urlencoded::from_str::<AnalyzeParams>(query).ok())
        .unwrap_or_default()
}

fn read_limited(body: &mut dyn Read, content_length: Option<usize>, limit: u64) -> Result<Vec<u8>> {
    if content_length.is_some_and(|len| len as u64 > limit) {
        return Err(Error::UploadTooLarge { limit_bytes: limit });
    }

    let mut bytes = Vec::new();
    body.take(limit + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > limit {
        return Err(Error::UploadTooLarge { limit_bytes: limit });
    }
    Ok(bytes)
}
