use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::downloader::{BatchSummary, DownloadedTrack, ProgressSink};
use crate::error::Error;

/// Terminal progress: a determinate bar plus one line per finished item.
pub struct CliProgress {
    bar: ProgressBar,
    quiet: bool,
}

impl CliProgress {
    pub fn new(total: usize, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("█▓░"),
            );
            pb
        };
        Self { bar, quiet }
    }
}

impl ProgressSink for CliProgress {
    fn on_item_complete(&mut self, index: usize, total: usize, track: &DownloadedTrack) {
        self.bar.set_position(index as u64);
        if !self.quiet {
            self.bar.println(format!(
                "{} [{}/{}] Downloaded: {}",
                style("[tunepull]").cyan().bold(),
                index,
                total,
                style(&track.info.title).yellow()
            ));
        }
    }

    fn on_item_failed(&mut self, index: usize, total: usize, url: &str, error: &Error) {
        self.bar.set_position(index as u64);
        if !self.quiet {
            self.bar.println(format!(
                "{} [{}/{}] Failed: {} ({})",
                style("[tunepull]").red().bold(),
                index,
                total,
                url,
                error
            ));
        }
    }

    fn on_batch_complete(&mut self, summary: &BatchSummary) {
        self.bar.finish_and_clear();
        if !self.quiet {
            println!(
                "{} Batch complete: {} succeeded, {} failed",
                style("[tunepull]").cyan().bold(),
                style(summary.completed).green(),
                if summary.failed > 0 {
                    style(summary.failed).red()
                } else {
                    style(summary.failed).dim()
                }
            );
        }
    }
}
