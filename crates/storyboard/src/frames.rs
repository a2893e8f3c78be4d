//! Frame extraction from composite storyboard images.
//!
//! Cropping is CPU-bound, so whole fragments are dispatched to the blocking
//! thread pool and joined in submission order: the async scheduler is never
//! blocked and the output order stays deterministic.

use image::DynamicImage;
use tracing::debug;

use crate::error::StoryboardError;
use crate::media::Storyboard;

/// A decoded composite storyboard image holding a grid of frames.
pub type FragmentImage = DynamicImage;

/// One thumbnail cropped out of a fragment grid.
pub type Frame = DynamicImage;

/// Crop a fragment into its grid cells in row-major order: for each row from
/// the top, each column from the left, the rectangle at
/// `(col * width, row * height)` with size `(width, height)`.
pub fn crop_grid(
    fragment: &FragmentImage,
    rows: u32,
    columns: u32,
    width: u32,
    height: u32,
) -> Vec<Frame> {
    let mut frames = Vec::with_capacity((rows * columns) as usize);
    for row in 0..rows {
        for col in 0..columns {
            frames.push(fragment.crop_imm(col * width, row * height, width, height));
        }
    }
    frames
}

/// Extract the frames of every fragment concurrently and flatten them in
/// fragment order.
pub async fn extract_all(
    fragments: Vec<FragmentImage>,
    storyboard: &Storyboard,
) -> Result<Vec<Frame>, StoryboardError> {
    let (rows, columns) = (storyboard.rows, storyboard.columns);
    let (width, height) = (storyboard.frame_width, storyboard.frame_height);

    let tasks: Vec<_> = fragments
        .into_iter()
        .map(|fragment| {
            tokio::task::spawn_blocking(move || crop_grid(&fragment, rows, columns, width, height))
        })
        .collect();

    let mut frames = Vec::with_capacity(tasks.len() * (rows * columns) as usize);
    for task in tasks {
        let cropped = task
            .await
            .map_err(|e| StoryboardError::Task(format!("frame extraction task failed: {e}")))?;
        frames.extend(cropped);
    }

    debug!(count = frames.len(), "extracted storyboard frames");
    Ok(frames)
}
