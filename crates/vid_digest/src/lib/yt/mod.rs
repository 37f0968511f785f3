pub mod fetcher;

use std::future::Future;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::error::FetchError;

/// Resolves a video URL to a local audio file named `<id>.<ext>` under the
/// fetcher's output directory.
pub trait MediaFetcher {
    fn fetch(&self, url: &str, id: &str) -> impl Future<Output = Result<PathBuf, FetchError>>;
}

/// Known YouTube URL shapes, in priority order: watch query parameter,
/// short link, embed path; then a watch URL with `v=` anywhere in the query.
static VIDEO_ID_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)")
            .expect("valid video id regex"),
        Regex::new(r"youtube\.com/watch\?.*v=([^&\n?#]+)").expect("valid video id regex"),
    ]
});

/// Number of hash hex characters kept for the fallback identifier.
const FALLBACK_ID_LEN: usize = 12;

/// Derives a stable, filesystem-safe identifier from a video URL.
///
/// The first matching pattern's capture wins; URLs that match nothing fall
/// back to a truncated SHA-256 of the whole URL, so every URL maps to the
/// same identifier on every run.
pub fn video_id(url: &str) -> String {
    for pattern in VIDEO_ID_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(url) {
            if let Some(id) = captures.get(1) {
                return id.as_str().to_string();
            }
        }
    }

    let digest = Sha256::digest(url.as_bytes());
    let hex = format!("{digest:x}");
    hex[..FALLBACK_ID_LEN].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_link_url_resolves_to_its_id() {
        assert_eq!(video_id("https://youtu.be/abc123XYZ0"), "abc123XYZ0");
    }

    #[test]
    fn watch_url_resolves_to_its_id() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn embed_url_resolves_to_its_id() {
        assert_eq!(
            video_id("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn watch_url_with_leading_params_resolves_v() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?feature=shared&v=dQw4w9WgXcQ"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn query_params_are_stripped_from_the_id() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn unknown_url_falls_back_to_stable_hash() {
        let id = video_id("https://example.com/some/video.mp4");
        assert_eq!(id.len(), FALLBACK_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        // Stable across repeated calls.
        assert_eq!(id, video_id("https://example.com/some/video.mp4"));
        assert_ne!(id, video_id("https://example.com/other/video.mp4"));
    }
}
