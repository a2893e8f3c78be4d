use serde::Deserialize;

/// Metadata for a single video as returned by the metadata collaborator.
///
/// Field names follow the collaborator's JSON dump shape, so the whole
/// struct deserializes straight out of its output. Fetched at most once per
/// session and immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub formats: Vec<FormatInfo>,
}

impl VideoInfo {
    /// Title and description joined by a single space.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// One entry of the format list.
///
/// Only storyboard entries carry the grid geometry and fragment list;
/// audio/video entries leave them unset.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatInfo {
    pub format_id: String,
    pub rows: Option<u32>,
    pub columns: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(default)]
    pub fragments: Vec<FragmentInfo>,
}

/// A single composite image of a storyboard stream.
#[derive(Debug, Clone, Deserialize)]
pub struct FragmentInfo {
    pub url: String,
}
