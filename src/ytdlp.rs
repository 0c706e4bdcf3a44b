use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::downloader::{Downloader, TrackInfo};
use crate::error::{Error, Result};

pub const AUDIO_FORMAT: &str = "mp3";

// yt-dlp names the file from the video title and sanitizes it itself.
const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// External downloader backed by the `yt-dlp` executable.
pub struct YtDlp {
    program: PathBuf,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Verify the executable runs before starting a batch.
    pub async fn ensure_available(&self) -> Result<()> {
        let available = Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false);

        if available {
            Ok(())
        } else {
            Err(Error::MissingDependency(
                self.program.display().to_string(),
            ))
        }
    }

    fn download_args(dest_dir: &Path, url: &str) -> Vec<String> {
        vec![
            "--quiet".to_string(),
            "--no-warnings".to_string(),
            "-x".to_string(),
            "--audio-format".to_string(),
            AUDIO_FORMAT.to_string(),
            // "0" selects the best quality the source offers
            "--audio-quality".to_string(),
            "0".to_string(),
            "-o".to_string(),
            dest_dir.join(OUTPUT_TEMPLATE).to_string_lossy().into_owned(),
            "--print".to_string(),
            "after_move:filepath".to_string(),
            url.to_string(),
        ]
    }
}

#[async_trait]
impl Downloader for YtDlp {
    async fn probe(&self, url: &str) -> Result<TrackInfo> {
        let output = Command::new(&self.program)
            .arg("-J")
            .arg("--no-warnings")
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            return Err(Error::Metadata {
                url: url.to_string(),
                reason: stderr_reason(&output.stderr),
            });
        }

        let info: TrackInfo = serde_json::from_slice(&output.stdout)?;
        Ok(info)
    }

    async fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        let output = Command::new(&self.program)
            .args(Self::download_args(dest_dir, url))
            .output()
            .await?;

        if !output.status.success() {
            return Err(Error::DownloadFailed {
                url: url.to_string(),
                reason: stderr_reason(&output.stderr),
            });
        }

        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if path.is_empty() {
            return Err(Error::DownloadFailed {
                url: url.to_string(),
                reason: "no output file reported".to_string(),
            });
        }
        Ok(PathBuf::from(path))
    }
}

/// Last non-empty stderr line, the one yt-dlp puts its `ERROR:` summary on.
fn stderr_reason(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    text.lines()
        .rev()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .unwrap_or("unknown error")
        .to_string()
}
