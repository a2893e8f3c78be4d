pub mod storyboard;
pub mod video_info;

pub use storyboard::{LexicalSelector, STORYBOARD_MARKER, Storyboard, StoryboardSelector};
pub use video_info::{FormatInfo, FragmentInfo, VideoInfo};
