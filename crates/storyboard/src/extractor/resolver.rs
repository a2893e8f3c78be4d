//! Metadata resolution and storyboard selection.

use std::sync::Arc;

use tracing::debug;

use crate::error::StoryboardError;
use crate::media::{LexicalSelector, Storyboard, StoryboardSelector, VideoInfo};

/// Blocking call into the external metadata service.
///
/// Implementations return `None` when the service has no result for the id.
/// The resolver runs the call on the blocking pool, so sessions suspend
/// cooperatively while it executes.
pub trait MetadataSource: Send + Sync {
    fn extract(&self, video_id: &str) -> Option<VideoInfo>;
}

/// Resolves a video id into metadata plus the selected storyboard stream.
///
/// Both are always resolved together, in one call, even for operations that
/// only need the text fields.
#[derive(Clone)]
pub struct MetadataResolver {
    source: Arc<dyn MetadataSource>,
    selector: Arc<dyn StoryboardSelector>,
}

impl MetadataResolver {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self::with_selector(source, Arc::new(LexicalSelector))
    }

    pub fn with_selector(
        source: Arc<dyn MetadataSource>,
        selector: Arc<dyn StoryboardSelector>,
    ) -> Self {
        Self { source, selector }
    }

    pub async fn resolve(
        &self,
        video_id: &str,
    ) -> Result<(VideoInfo, Storyboard), StoryboardError> {
        let source = Arc::clone(&self.source);
        let id = video_id.to_owned();
        let info = tokio::task::spawn_blocking(move || source.extract(&id))
            .await
            .map_err(|e| StoryboardError::Task(format!("metadata task failed: {e}")))?
            .ok_or(StoryboardError::MetadataUnavailable)?;

        let storyboard = self
            .selector
            .select(&info.formats)
            .and_then(Storyboard::from_format)
            .ok_or(StoryboardError::StoryboardUnavailable)?;

        debug!(
            format_id = %storyboard.format_id,
            fragments = storyboard.fragment_urls.len(),
            "selected storyboard stream"
        );
        Ok((info, storyboard))
    }
}
