//! HTTP transport for feed payloads, behind a trait so tests can stub it.

use async_trait::async_trait;
use reqwest::{Request, Response};

use crate::error::LoadError;

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: Request) -> reqwest::Result<Response> {
        self.0.execute(req).await
    }
}

/// Downloads a feed payload. A non-2xx status is a fetch failure; there
/// are no retries and no timeout beyond the client's own.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>, LoadError> {
    let url = url
        .parse()
        .map_err(|_| LoadError::InvalidUrl(url.to_string()))?;
    let req = Request::new(reqwest::Method::GET, url);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}
