use reqwest::StatusCode;
use thiserror::Error;

/// Failure cause for a single fragment request.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request failed with HTTP {0}")]
    Status(StatusCode),
    #[error("body is not a decodable image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Errors surfaced by the public session operations.
///
/// Every variant is terminal for the operation that produced it: nothing is
/// retried internally and partial results are discarded.
#[derive(Debug, Error)]
pub enum StoryboardError {
    /// The metadata collaborator returned no result for the video id.
    #[error("no metadata available for video")]
    MetadataUnavailable,

    /// The format list contains no usable storyboard stream.
    #[error("no storyboard stream in the format list")]
    StoryboardUnavailable,

    /// A single fragment fetch or decode failed, aborting the whole batch.
    #[error("fragment fetch failed for {url}: {source}")]
    FragmentFetch {
        url: String,
        #[source]
        source: FetchFailure,
    },

    /// A dispatched worker task failed to complete.
    #[error("worker task failed: {0}")]
    Task(String),
}
