use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Metadata for one track, as reported by the external downloader.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackInfo {
    pub id: String,
    pub title: String,
}

/// A track that made it to disk.
#[derive(Debug, Clone)]
pub struct DownloadedTrack {
    pub info: TrackInfo,
    pub path: PathBuf,
}

/// Capability to turn a watch URL into an audio file on disk.
#[async_trait]
pub trait Downloader {
    /// Fetch metadata without downloading anything.
    async fn probe(&self, url: &str) -> Result<TrackInfo>;

    /// Download the audio track into `dest_dir` and return the written file.
    async fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf>;
}

/// Receiver of per-item and batch-level status during a run.
pub trait ProgressSink {
    fn on_item_complete(&mut self, index: usize, total: usize, track: &DownloadedTrack);
    fn on_item_failed(&mut self, index: usize, total: usize, url: &str, error: &Error);
    fn on_batch_complete(&mut self, summary: &BatchSummary);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Download every URL in order, one at a time.
///
/// Each item emits exactly one progress update once it completes, successful
/// or not. The first failure aborts the rest of the batch unless `keep_going`
/// is set; a fully processed batch ends with one terminal `on_batch_complete`.
pub async fn download_batch<D, S>(
    urls: &[String],
    dest_dir: &Path,
    downloader: &D,
    sink: &mut S,
    keep_going: bool,
) -> Result<BatchSummary>
where
    D: Downloader,
    S: ProgressSink,
{
    if urls.is_empty() {
        return Err(Error::NoValidUrls);
    }

    let total = urls.len();
    let mut summary = BatchSummary {
        total,
        ..BatchSummary::default()
    };

    for (idx, url) in urls.iter().enumerate() {
        let index = idx + 1;
        match fetch_one(downloader, url, dest_dir).await {
            Ok(track) => {
                summary.completed += 1;
                tracing::info!(
                    "downloaded {} [{}] -> {}",
                    url,
                    track.info.id,
                    track.path.display()
                );
                sink.on_item_complete(index, total, &track);
            }
            Err(e) => {
                summary.failed += 1;
                tracing::error!("failed to download {}: {}", url, e);
                sink.on_item_failed(index, total, url, &e);
                if !keep_going {
                    return Err(e);
                }
            }
        }
    }

    tracing::info!(
        "batch finished: {}/{} downloaded, {} failed",
        summary.completed,
        summary.total,
        summary.failed
    );
    sink.on_batch_complete(&summary);
    Ok(summary)
}

async fn fetch_one<D: Downloader>(
    downloader: &D,
    url: &str,
    dest_dir: &Path,
) -> Result<DownloadedTrack> {
    let info = downloader.probe(url).await?;
    let path = downloader.fetch(url, dest_dir).await?;
    Ok(DownloadedTrack { info, path })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct MockDownloader {
        fail: Vec<String>,
        fetched: Mutex<Vec<String>>,
    }

    impl MockDownloader {
        fn new(fail: &[&str]) -> Self {
            Self {
                fail: fail.iter().map(|s| s.to_string()).collect(),
                fetched: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Downloader for MockDownloader {
        async fn probe(&self, url: &str) -> Result<TrackInfo> {
            Ok(TrackInfo {
                id: "xxxxxxxxxxx".to_string(),
                title: format!("track for {url}"),
            })
        }

        async fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
            if self.fail.iter().any(|u| u == url) {
                return Err(Error::DownloadFailed {
                    url: url.to_string(),
                    reason: "simulated".to_string(),
                });
            }
            self.fetched.lock().unwrap().push(url.to_string());
            Ok(dest_dir.join("track.mp3"))
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Complete(usize, usize),
        Failed(usize, usize, String),
        Batch(BatchSummary),
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<Event>,
    }

    impl ProgressSink for RecordingSink {
        fn on_item_complete(&mut self, index: usize, total: usize, _track: &DownloadedTrack) {
            self.events.push(Event::Complete(index, total));
        }

        fn on_item_failed(&mut self, index: usize, total: usize, url: &str, _error: &Error) {
            self.events.push(Event::Failed(index, total, url.to_string()));
        }

        fn on_batch_complete(&mut self, summary: &BatchSummary) {
            self.events.push(Event::Batch(summary.clone()));
        }
    }

    fn batch(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    #[tokio::test]
    async fn emits_one_update_per_item_then_batch_complete() {
        let urls = batch(&["https://a", "https://b", "https://c"]);
        let downloader = MockDownloader::new(&[]);
        let mut sink = RecordingSink::default();

        let summary = download_batch(&urls, Path::new("/tmp"), &downloader, &mut sink, false)
            .await
            .unwrap();

        assert_eq!(summary.completed, 3);
        assert_eq!(summary.failed, 0);
        assert_eq!(
            sink.events,
            vec![
                Event::Complete(1, 3),
                Event::Complete(2, 3),
                Event::Complete(3, 3),
                Event::Batch(summary),
            ]
        );
    }

    #[tokio::test]
    async fn aborts_on_first_failure_by_default() {
        let urls = batch(&["https://a", "https://b", "https://c"]);
        let downloader = MockDownloader::new(&["https://b"]);
        let mut sink = RecordingSink::default();

        let result = download_batch(&urls, Path::new("/tmp"), &downloader, &mut sink, false).await;

        assert!(matches!(result, Err(Error::DownloadFailed { url, .. }) if url == "https://b"));
        // The failing item still got its progress update, the rest of the
        // batch was never attempted and no terminal signal fired.
        assert_eq!(
            sink.events,
            vec![
                Event::Complete(1, 3),
                Event::Failed(2, 3, "https://b".to_string()),
            ]
        );
        assert_eq!(*downloader.fetched.lock().unwrap(), vec!["https://a"]);
    }

    #[tokio::test]
    async fn keep_going_skips_failures_and_finishes() {
        let urls = batch(&["https://a", "https://b", "https://c"]);
        let downloader = MockDownloader::new(&["https://b"]);
        let mut sink = RecordingSink::default();

        let summary = download_batch(&urls, Path::new("/tmp"), &downloader, &mut sink, true)
            .await
            .unwrap();

        assert_eq!(
            summary,
            BatchSummary {
                total: 3,
                completed: 2,
                failed: 1
            }
        );
        assert_eq!(
            sink.events,
            vec![
                Event::Complete(1, 3),
                Event::Failed(2, 3, "https://b".to_string()),
                Event::Complete(3, 3),
                Event::Batch(summary),
            ]
        );
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let downloader = MockDownloader::new(&[]);
        let mut sink = RecordingSink::default();

        let result = download_batch(&[], Path::new("/tmp"), &downloader, &mut sink, false).await;

        assert!(matches!(result, Err(Error::NoValidUrls)));
        assert!(sink.events.is_empty());
    }
}
