pub mod resolver;
pub mod ytdlp;

pub use resolver::{MetadataResolver, MetadataSource};
pub use ytdlp::YtDlpSource;
