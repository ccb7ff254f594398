//! Where the input text comes from.

use std::future::Future;

use tracing::{debug, info};

use crate::{Error, Result};

/// Document fetched when no address is given.
pub const DEFAULT_URL: &str = "https://gutenberg.net.au/ebooks01/0100021.txt";

/// Retrieves a whole text document by address.
pub trait TextSource {
    /// Returns the full body, or [`Error::Fetch`] if it could not be
    /// retrieved. Bodies that are not UTF-8 fail with [`Error::Decode`].
    fn fetch(&self, address: &str) -> impl Future<Output = Result<String>> + Send;
}

fn fetch_error(address: &str, source: impl Into<anyhow::Error>) -> Error {
    Error::Fetch {
        address: address.to_owned(),
        source: source.into(),
    }
}

/// Plain HTTP GET. Any non-2xx status is a failure.
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl TextSource for HttpSource {
    async fn fetch(&self, address: &str) -> Result<String> {
        debug!(address, "sending request");
        let response = self
            .client
            .get(address)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| fetch_error(address, e))?;
        let body = response.bytes().await.map_err(|e| fetch_error(address, e))?;
        info!(address, bytes = body.len(), "downloaded text");

        Ok(std::str::from_utf8(&body)?.to_owned())
    }
}

/// Reads the document from the local filesystem; the address is a path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl TextSource for FileSource {
    async fn fetch(&self, address: &str) -> Result<String> {
        let body = tokio::fs::read(address)
            .await
            .map_err(|e| fetch_error(address, e))?;
        info!(path = address, bytes = body.len(), "read text");

        Ok(String::from_utf8(body).map_err(|e| e.utf8_error())?)
    }
}
