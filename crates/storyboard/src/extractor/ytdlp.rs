//! `yt-dlp` backed metadata source.
//!
//! Shells out to the `yt-dlp` binary in JSON dump mode (`-J`), the same
//! service the surrounding system already relies on for format lists. The
//! call is blocking and is meant to run on the blocking pool via
//! [`MetadataResolver`](crate::extractor::MetadataResolver).

use std::process::{Command, Stdio};
use std::sync::LazyLock;

use tracing::warn;

use crate::extractor::resolver::MetadataSource;
use crate::media::VideoInfo;

const DEFAULT_YTDLP_PATH: &str = "yt-dlp";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

static YTDLP_AVAILABLE: LazyLock<bool> = LazyLock::new(|| {
    Command::new(DEFAULT_YTDLP_PATH)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
});

/// Metadata source backed by the `yt-dlp` executable.
///
/// Any spawn, exit or parse failure is logged and reported as "no result",
/// keeping the collaborator contract at `info | absent`.
#[derive(Debug, Clone)]
pub struct YtDlpSource {
    binary_path: String,
}

impl YtDlpSource {
    pub fn is_available() -> bool {
        *YTDLP_AVAILABLE
    }

    /// Binary path from the `YTDLP_PATH` environment variable, falling back
    /// to the bare binary name on `PATH`.
    pub fn new() -> Self {
        Self::with_binary_path(
            std::env::var("YTDLP_PATH").unwrap_or_else(|_| DEFAULT_YTDLP_PATH.to_string()),
        )
    }

    pub fn with_binary_path(binary_path: impl Into<String>) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }
}

impl Default for YtDlpSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataSource for YtDlpSource {
    fn extract(&self, video_id: &str) -> Option<VideoInfo> {
        let url = format!("{WATCH_URL}{video_id}");
        let out = Command::new(&self.binary_path)
            .arg("-J")
            .arg("--no-download")
            .arg(&url)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        let out = match out {
            Ok(out) => out,
            Err(e) => {
                warn!(error = %e, "failed to spawn yt-dlp");
                return None;
            }
        };

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            warn!(status = %out.status, stderr = %stderr.trim(), "yt-dlp exited with an error");
            return None;
        }

        match serde_json::from_slice::<VideoInfo>(&out.stdout) {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(error = %e, "failed to parse yt-dlp JSON output");
                None
            }
        }
    }
}
