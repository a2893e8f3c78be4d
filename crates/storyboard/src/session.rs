//! Per-video sampling session.

use std::sync::Arc;

use tracing::debug;

use crate::config::SessionConfig;
use crate::error::StoryboardError;
use crate::extractor::{MetadataResolver, MetadataSource};
use crate::fetch::FragmentFetcher;
use crate::frames::{self, Frame};
use crate::media::{Storyboard, VideoInfo};
use crate::sampling;
use crate::transport::Transport;

/// Monotonic session state: `Uninitialized → MetadataResolved →
/// FramesComputed`, no back-transitions. Re-entering a reached state is a
/// pure read of the memoized data.
enum SessionState {
    Uninitialized,
    MetadataResolved {
        info: VideoInfo,
        storyboard: Storyboard,
    },
    FramesComputed {
        info: VideoInfo,
        storyboard: Storyboard,
        frames: Vec<Frame>,
    },
}

/// A single-video sampling session.
///
/// Owns the video id and the lazily-populated metadata, storyboard and frame
/// sequence. Metadata and storyboard resolve together on the first call to
/// either public operation; the frame sequence is computed at most once and
/// never invalidated. Sessions share the transport by reference but nothing
/// else, so no locking is involved.
pub struct VideoSession {
    video_id: String,
    resolver: MetadataResolver,
    fetcher: FragmentFetcher,
    config: SessionConfig,
    state: SessionState,
}

impl VideoSession {
    pub fn new(
        video_id: impl Into<String>,
        source: Arc<dyn MetadataSource>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self::with_config(video_id, source, transport, SessionConfig::default())
    }

    pub fn with_config(
        video_id: impl Into<String>,
        source: Arc<dyn MetadataSource>,
        transport: Arc<dyn Transport>,
        config: SessionConfig,
    ) -> Self {
        Self::with_resolver(video_id, MetadataResolver::new(source), transport, config)
    }

    /// Session over a custom resolver, e.g. one with a non-default
    /// storyboard selection strategy.
    pub fn with_resolver(
        video_id: impl Into<String>,
        resolver: MetadataResolver,
        transport: Arc<dyn Transport>,
        config: SessionConfig,
    ) -> Self {
        Self {
            video_id: video_id.into(),
            resolver,
            fetcher: FragmentFetcher::new(transport),
            config,
            state: SessionState::Uninitialized,
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    /// Category list and the space-joined title + description.
    ///
    /// Resolution always populates metadata and storyboard together, so this
    /// fails on a missing storyboard even though the text itself would not
    /// need one.
    pub async fn text_info(&mut self) -> Result<(Vec<String>, String), StoryboardError> {
        self.ensure_resolved().await?;
        let info = self.resolved_info();
        Ok((info.categories.clone(), info.text()))
    }

    /// The sampled frame sequence, computed on first call and memoized.
    ///
    /// Frames are ordered by sub-sampled fragment position, then row-major
    /// within each fragment.
    pub async fn frames(&mut self) -> Result<&[Frame], StoryboardError> {
        if !matches!(self.state, SessionState::FramesComputed { .. }) {
            self.ensure_resolved().await?;
            self.compute_frames().await?;
        }

        match &self.state {
            SessionState::FramesComputed { frames, .. } => Ok(frames),
            _ => unreachable!("frames computed above"),
        }
    }

    async fn ensure_resolved(&mut self) -> Result<(), StoryboardError> {
        if !matches!(self.state, SessionState::Uninitialized) {
            return Ok(());
        }

        let (info, storyboard) = self.resolver.resolve(&self.video_id).await?;
        self.state = SessionState::MetadataResolved { info, storyboard };
        Ok(())
    }

    async fn compute_frames(&mut self) -> Result<(), StoryboardError> {
        let SessionState::MetadataResolved { storyboard, .. } = &self.state else {
            unreachable!("resolution precedes frame computation");
        };

        let step = sampling::fragment_step(
            storyboard.rows,
            storyboard.columns,
            storyboard.fragment_urls.len(),
            self.config.frame_budget,
        );
        let selected = sampling::sub_sample(&storyboard.fragment_urls, step);
        debug!(
            video_id = %self.video_id,
            step,
            selected = selected.len(),
            total = storyboard.fragment_urls.len(),
            "sub-sampled storyboard fragments"
        );

        // On failure the session stays in MetadataResolved; nothing partial
        // is kept.
        let fragments = self.fetcher.fetch_all(&selected).await?;
        let computed = frames::extract_all(fragments, storyboard).await?;

        let SessionState::MetadataResolved { info, storyboard } =
            std::mem::replace(&mut self.state, SessionState::Uninitialized)
        else {
            unreachable!("state checked above");
        };
        self.state = SessionState::FramesComputed {
            info,
            storyboard,
            frames: computed,
        };
        Ok(())
    }

    fn resolved_info(&self) -> &VideoInfo {
        match &self.state {
            SessionState::MetadataResolved { info, .. }
            | SessionState::FramesComputed { info, .. } => info,
            SessionState::Uninitialized => unreachable!("resolution precedes reads"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchFailure;
    use crate::media::{FormatInfo, FragmentInfo};
    use async_trait::async_trait;
    use bytes::Bytes;
    use image::{GenericImageView, Rgba, RgbaImage};
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource(Option<VideoInfo>);

    impl MetadataSource for StubSource {
        fn extract(&self, _video_id: &str) -> Option<VideoInfo> {
            self.0.clone()
        }
    }

    struct MapTransport {
        bodies: HashMap<String, Bytes>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for MapTransport {
        async fn get(&self, url: &str) -> Result<Bytes, FetchFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.bodies
                .get(url)
                .cloned()
                .ok_or(FetchFailure::Status(StatusCode::NOT_FOUND))
        }
    }

    /// PNG of a 2x2 grid of 10x10 tiles; pixels encode (seed, row, col).
    fn fragment_png(seed: u8) -> Bytes {
        let img = RgbaImage::from_fn(20, 20, |x, y| {
            Rgba([seed, (y / 10) as u8, (x / 10) as u8, 255])
        });
        let mut buf = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        Bytes::from(buf.into_inner())
    }

    fn fragment_url(index: usize) -> String {
        format!("https://example.invalid/sb0/M{index}.png")
    }

    fn info_with_storyboard(num_fragments: usize) -> VideoInfo {
        VideoInfo {
            title: "A title".to_string(),
            description: "a description".to_string(),
            categories: vec!["Music".to_string(), "Entertainment".to_string()],
            formats: vec![
                FormatInfo {
                    format_id: "251".to_string(),
                    rows: None,
                    columns: None,
                    width: None,
                    height: None,
                    fragments: vec![],
                },
                FormatInfo {
                    format_id: "sb0".to_string(),
                    rows: Some(2),
                    columns: Some(2),
                    width: Some(10),
                    height: Some(10),
                    fragments: (0..num_fragments)
                        .map(|i| FragmentInfo {
                            url: fragment_url(i),
                        })
                        .collect(),
                },
            ],
        }
    }

    fn transport_for(num_fragments: usize) -> Arc<MapTransport> {
        Arc::new(MapTransport {
            bodies: (0..num_fragments)
                .map(|i| (fragment_url(i), fragment_png(i as u8)))
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }

    fn session(num_fragments: usize, transport: Arc<MapTransport>) -> VideoSession {
        VideoSession::new(
            "abc123",
            Arc::new(StubSource(Some(info_with_storyboard(num_fragments)))),
            transport,
        )
    }

    #[tokio::test]
    async fn test_frames_returns_rows_times_columns_per_fragment() {
        let transport = transport_for(3);
        let mut session = session(3, Arc::clone(&transport));

        // 12 total cells < default budget, so every fragment is selected
        let frames = session.frames().await.unwrap();
        assert_eq!(frames.len(), 12);

        // flattened order: fragment, then row-major within the fragment
        for (index, frame) in frames.iter().enumerate() {
            let Rgba([seed, row, col, _]) = frame.get_pixel(0, 0);
            assert_eq!(seed as usize, index / 4);
            assert_eq!(row as usize, (index % 4) / 2);
            assert_eq!(col as usize, index % 2);
        }
    }

    #[tokio::test]
    async fn test_frames_are_memoized() {
        let transport = transport_for(3);
        let mut session = session(3, Arc::clone(&transport));

        let first: Vec<Vec<u8>> = session
            .frames()
            .await
            .unwrap()
            .iter()
            .map(|f| f.to_rgba8().into_raw())
            .collect();
        let fetches_after_first = transport.calls.load(Ordering::SeqCst);
        assert_eq!(fetches_after_first, 3);

        let second: Vec<Vec<u8>> = session
            .frames()
            .await
            .unwrap()
            .iter()
            .map(|f| f.to_rgba8().into_raw())
            .collect();

        assert_eq!(first, second);
        assert_eq!(transport.calls.load(Ordering::SeqCst), fetches_after_first);
    }

    #[tokio::test]
    async fn test_budget_sub_samples_fragments() {
        // 4 fragments of 4 cells each, budget 8 -> step 2 -> fragments 0, 2
        let transport = transport_for(4);
        let mut session = VideoSession::with_config(
            "abc123",
            Arc::new(StubSource(Some(info_with_storyboard(4)))),
            transport.clone(),
            SessionConfig { frame_budget: 8 },
        );

        let frames = session.frames().await.unwrap();
        assert_eq!(frames.len(), 8);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);

        let seeds: Vec<u8> = frames.iter().map(|f| f.get_pixel(0, 0)[0]).collect();
        assert_eq!(seeds, [0, 0, 0, 0, 2, 2, 2, 2]);
    }

    #[tokio::test]
    async fn test_text_info() {
        let mut session = session(3, transport_for(3));

        let (categories, text) = session.text_info().await.unwrap();
        assert_eq!(categories, vec!["Music", "Entertainment"]);
        assert_eq!(text, "A title a description");
    }

    #[tokio::test]
    async fn test_text_info_requires_metadata() {
        let mut session = VideoSession::new(
            "abc123",
            Arc::new(StubSource(None)),
            transport_for(0),
        );

        let err = session.text_info().await.unwrap_err();
        assert!(matches!(err, StoryboardError::MetadataUnavailable));
    }

    #[tokio::test]
    async fn test_text_info_requires_a_storyboard_stream() {
        // resolution populates metadata and storyboard together, so text
        // info fails even though it never touches the fragments
        let mut info = info_with_storyboard(3);
        info.formats.retain(|f| f.format_id == "251");
        let mut session = VideoSession::new(
            "abc123",
            Arc::new(StubSource(Some(info))),
            transport_for(0),
        );

        let err = session.text_info().await.unwrap_err();
        assert!(matches!(err, StoryboardError::StoryboardUnavailable));
    }

    #[tokio::test]
    async fn test_one_failed_fragment_yields_no_frames() {
        // transport only knows fragments 0 and 2
        let transport = Arc::new(MapTransport {
            bodies: [0usize, 2]
                .into_iter()
                .map(|i| (fragment_url(i), fragment_png(i as u8)))
                .collect(),
            calls: AtomicUsize::new(0),
        });
        let mut session = session(3, transport);

        let err = session.frames().await.unwrap_err();
        match err {
            StoryboardError::FragmentFetch { url, .. } => assert_eq!(url, fragment_url(1)),
            other => panic!("expected FragmentFetch, got {other:?}"),
        }
    }
}
