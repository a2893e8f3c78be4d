use super::video_info::FormatInfo;

/// Marker substring identifying storyboard entries in the format list.
pub const STORYBOARD_MARKER: &str = "sb";

/// The selected storyboard stream: grid geometry plus the ordered fragment
/// URLs. Constructed only through [`Storyboard::from_format`], so rows,
/// columns and tile dimensions are always non-zero and the fragment list is
/// never empty.
#[derive(Debug, Clone)]
pub struct Storyboard {
    pub format_id: String,
    pub rows: u32,
    pub columns: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    pub fragment_urls: Vec<String>,
}

impl Storyboard {
    /// Grid cells per fragment.
    pub fn frames_per_fragment(&self) -> u32 {
        self.rows * self.columns
    }

    /// Validating conversion from a raw format entry. Returns `None` when a
    /// grid dimension is missing or zero, or the fragment list is empty.
    pub fn from_format(format: &FormatInfo) -> Option<Self> {
        let rows = format.rows.filter(|&v| v > 0)?;
        let columns = format.columns.filter(|&v| v > 0)?;
        let frame_width = format.width.filter(|&v| v > 0)?;
        let frame_height = format.height.filter(|&v| v > 0)?;
        if format.fragments.is_empty() {
            return None;
        }

        Some(Self {
            format_id: format.format_id.clone(),
            rows,
            columns,
            frame_width,
            frame_height,
            fragment_urls: format.fragments.iter().map(|f| f.url.clone()).collect(),
        })
    }
}

/// Strategy for choosing which storyboard stream to extract from.
///
/// The hosting platform usually names its highest-quality storyboard with
/// the smallest identifier (`sb0`), but that naming scheme is not
/// guaranteed, so the policy stays swappable.
pub trait StoryboardSelector: Send + Sync {
    fn select<'a>(&self, formats: &'a [FormatInfo]) -> Option<&'a FormatInfo>;
}

/// Default selection: filter on the storyboard marker, sort the candidates
/// by format id ascending, take the first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalSelector;

impl StoryboardSelector for LexicalSelector {
    fn select<'a>(&self, formats: &'a [FormatInfo]) -> Option<&'a FormatInfo> {
        formats
            .iter()
            .filter(|f| f.format_id.contains(STORYBOARD_MARKER))
            .min_by(|a, b| a.format_id.cmp(&b.format_id))
    }
}
