//! Boundary file fetch collaborator.
//!
//! The core never performs IO itself: it asks for a URL and later receives
//! either a parsed feature collection or a [`FetchError`]. Implementations
//! live with the application (HTTP, filesystem); [`MemoryFetcher`] serves
//! canned responses.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use formats::feature::{FeatureCollection, FeatureError};
use parking_lot::Mutex;
use tracing::{info, warn};

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-success status.
    Status(u16),
    /// The request never produced a response (DNS, IO, missing file).
    Transport(String),
    /// A response arrived but was not a feature collection.
    Decode(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Status(code) => write!(f, "unexpected status {code}"),
            FetchError::Transport(msg) => write!(f, "transport error: {msg}"),
            FetchError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<FeatureError> for FetchError {
    fn from(e: FeatureError) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Source of boundary feature collections.
///
/// Implementations must be `Send + Sync`; methods return boxed futures for
/// dyn-compatibility. No retries: one call, one answer.
pub trait Fetcher: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<FeatureCollection, FetchError>>;
}

/// Fetches `url` and logs the outcome the same way for every fetcher.
pub async fn fetch_logged(
    fetcher: &dyn Fetcher,
    url: &str,
) -> Result<FeatureCollection, FetchError> {
    let result = fetcher.fetch(url).await;
    match &result {
        Ok(fc) => info!(url, features = fc.len(), "boundary file loaded"),
        Err(err) => warn!(url, %err, "boundary file fetch failed"),
    }
    result
}

/// In-memory fetcher keyed by exact URL; unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    responses: BTreeMap<String, Result<Vec<u8>, FetchError>>,
    requested: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.into(), Ok(body.into()));
        self
    }

    pub fn with_error(mut self, url: impl Into<String>, err: FetchError) -> Self {
        self.responses.insert(url.into(), Err(err));
        self
    }

    /// URLs requested so far, in call order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }

    fn respond(&self, url: &str) -> Result<FeatureCollection, FetchError> {
        self.requested.lock().push(url.to_string());
        match self.responses.get(url) {
            Some(Ok(body)) => Ok(FeatureCollection::from_slice(body)?),
            Some(Err(err)) => Err(err.clone()),
            None => Err(FetchError::Status(404)),
        }
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<FeatureCollection, FetchError>> {
        Box::pin(async move { self.respond(url) })
    }
}
