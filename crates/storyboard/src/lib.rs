//! Sparse frame and text sampling for remotely hosted videos.
//!
//! Instead of downloading or decoding a video stream, this library leans on
//! the hosting platform's storyboard images (composite grids of evenly
//! spaced thumbnails, generated by the platform for its seek bar) and turns
//! a budgeted selection of them into individual frames.
//!
//! A [`VideoSession`] drives the whole pipeline for one video: resolve the
//! metadata and pick a storyboard stream, sub-sample the fragment list
//! against the frame budget, fetch the selected composites concurrently,
//! crop each into its grid cells on the blocking pool, and memoize the
//! flattened frame sequence for the rest of the session.
//!
//! ```no_run
//! use std::sync::Arc;
//! use storyboard_sampler::{HttpTransport, VideoSession, YtDlpSource};
//!
//! # async fn run() -> Result<(), storyboard_sampler::StoryboardError> {
//! let mut session = VideoSession::new(
//!     "dQw4w9WgXcQ",
//!     Arc::new(YtDlpSource::new()),
//!     HttpTransport::shared(),
//! );
//!
//! let (categories, text) = session.text_info().await?;
//! let frames = session.frames().await?;
//! println!("{categories:?} {text}: {} frames", frames.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod fetch;
pub mod frames;
pub mod media;
pub mod sampling;
pub mod session;
pub mod transport;

pub use config::SessionConfig;
pub use error::{FetchFailure, StoryboardError};
pub use extractor::{MetadataResolver, MetadataSource, YtDlpSource};
pub use fetch::FragmentFetcher;
pub use frames::{Frame, FragmentImage};
pub use media::{FormatInfo, FragmentInfo, Storyboard, StoryboardSelector, VideoInfo};
pub use session::VideoSession;
pub use transport::{HttpTransport, Transport, default_client};
