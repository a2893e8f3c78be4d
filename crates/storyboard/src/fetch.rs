//! Concurrent retrieval and decoding of storyboard fragments.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::debug;

use crate::error::{FetchFailure, StoryboardError};
use crate::frames::FragmentImage;
use crate::transport::Transport;

/// Downloads composite storyboard images over the shared transport.
#[derive(Clone)]
pub struct FragmentFetcher {
    transport: Arc<dyn Transport>,
}

impl FragmentFetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch and decode every URL, all requests in flight at once, output in
    /// input order.
    ///
    /// The batch is all-or-nothing: the first failing fetch or decode aborts
    /// the rest and surfaces as [`StoryboardError::FragmentFetch`].
    pub async fn fetch_all(&self, urls: &[String]) -> Result<Vec<FragmentImage>, StoryboardError> {
        debug!(count = urls.len(), "fetching storyboard fragments");
        try_join_all(urls.iter().map(|url| self.fetch_one(url))).await
    }

    async fn fetch_one(&self, url: &str) -> Result<FragmentImage, StoryboardError> {
        let bytes = self
            .transport
            .get(url)
            .await
            .map_err(|source| StoryboardError::FragmentFetch {
                url: url.to_string(),
                source,
            })?;

        image::load_from_memory(&bytes).map_err(|e| StoryboardError::FragmentFetch {
            url: url.to_string(),
            source: FetchFailure::Decode(e),
        })
    }
}
