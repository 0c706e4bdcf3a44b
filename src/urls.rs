use std::collections::HashSet;
use std::path::Path;

use regex::Regex;

use crate::error::Result;

const WATCH_URL_PATTERN: &str = r"^https://www\.youtube\.com/watch\?v=";
const PLAYLIST_MARKER: &str = "&list=";

/// Valid and invalid entries from one pass over an input file.
#[derive(Debug, Default)]
pub struct ProcessedUrls {
    /// Deduplicated watch URLs with any playlist suffix removed, in
    /// first-seen order.
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

/// Read an input file into trimmed lines, skipping blanks and `#` comments.
pub fn load_batch_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.to_string())
        .collect())
}

/// Check whether the input looks like a YouTube watch URL.
pub fn validate_url(url: &str) -> bool {
    let pattern = Regex::new(WATCH_URL_PATTERN).unwrap();
    pattern.is_match(url)
}

/// Partition raw lines into watch URLs and rejects.
///
/// Valid entries have any `&list=` playlist suffix stripped and are then
/// deduplicated, so a video shared from within a playlist downloads as a
/// single track.
pub fn process_urls(lines: &[String]) -> ProcessedUrls {
    let mut processed = ProcessedUrls::default();
    let mut seen = HashSet::new();

    for line in lines {
        if !validate_url(line) {
            processed.invalid.push(line.clone());
            continue;
        }
        let url = match line.find(PLAYLIST_MARKER) {
            Some(pos) => &line[..pos],
            None => line.as_str(),
        };
        if seen.insert(url.to_string()) {
            processed.valid.push(url.to_string());
        }
    }

    processed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_watch_urls_only() {
        assert!(validate_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(!validate_url("https://www.invalidurl.com/watch?v=dQw4w9WgXcQ"));
        assert!(!validate_url("just some random text"));
        // Scheme and case are strict
        assert!(!validate_url("http://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(!validate_url("HTTPS://www.youtube.com/watch?v=dQw4w9WgXcQ"));
    }

    #[test]
    fn strips_playlists_dedupes_and_flags_rejects() {
        let lines = vec![
            "https://www.youtube.com/watch?v=AAA&list=PL123".to_string(),
            "https://www.youtube.com/watch?v=AAA".to_string(),
            "not a url".to_string(),
        ];

        let processed = process_urls(&lines);

        assert_eq!(processed.valid, vec!["https://www.youtube.com/watch?v=AAA"]);
        assert_eq!(processed.invalid, vec!["not a url"]);
    }

    #[test]
    fn processing_is_idempotent() {
        let lines = vec![
            "https://www.youtube.com/watch?v=AAA&list=PL123".to_string(),
            "https://www.youtube.com/watch?v=BBB".to_string(),
        ];

        let first = process_urls(&lines);
        let second = process_urls(&first.valid);

        assert_eq!(second.valid, first.valid);
        assert!(second.invalid.is_empty());
    }

    #[test]
    fn loads_batch_file_skipping_blanks_and_comments() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("music_list.txt");
        std::fs::write(
            &file,
            "# my playlist\n\nhttps://www.youtube.com/watch?v=AAA\n  https://www.youtube.com/watch?v=BBB  \n\n",
        )
        .unwrap();

        let lines = load_batch_file(&file).unwrap();

        assert_eq!(
            lines,
            vec![
                "https://www.youtube.com/watch?v=AAA",
                "https://www.youtube.com/watch?v=BBB"
            ]
        );
    }
}
