//! Video metadata and subtitle download through an external extractor.
//!
//! The extractor is an opaque collaborator: given a video URL it reports the
//! available subtitle tracks, and given a track it drops the caption file
//! into a directory. All failures collapse into [`ExtractorError`] so the CLI
//! can surface them as-is without retrying.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

mod info;
mod ytdlp;

pub use info::{SubtitleFormat, SubtitleTrack, TrackKind, VideoInfo};
pub use ytdlp::YtDlpExtractor;

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("{0} was not found in PATH. Install yt-dlp or set extractor.command in the config file")]
    NotInstalled(String),
    #[error("Extraction Error: {0}")]
    ExtractionFailed(String),
    #[error("No subtitle file was produced for the selected track")]
    NoOutput,
}

/// A single subtitle download.
#[derive(Debug, Clone, Copy)]
pub struct DownloadRequest<'a> {
    pub url: &'a str,
    pub track: &'a SubtitleTrack,
    /// Convert the downloaded file to SRT before it lands in the directory
    pub convert_to_srt: bool,
}

#[async_trait]
pub trait SubtitleExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch video metadata without downloading anything.
    async fn fetch_info(&self, url: &str) -> Result<VideoInfo, ExtractorError>;

    /// Download the requested subtitle track into `dest_dir`.
    async fn download_subtitle(
        &self,
        request: &DownloadRequest<'_>,
        dest_dir: &Path,
    ) -> Result<(), ExtractorError>;
}

/// Find a track by language code and kind.
pub fn find_track<'a>(
    tracks: &'a [SubtitleTrack],
    code: &str,
    kind: TrackKind,
) -> Option<&'a SubtitleTrack> {
    tracks.iter().find(|t| t.code == code && t.kind == kind)
}

/// Pick a track without asking: manual track in the preferred language, then
/// automatic captions in that language, then whatever is listed first.
pub fn select_default_track<'a>(
    tracks: &'a [SubtitleTrack],
    preferred_language: Option<&str>,
) -> Option<&'a SubtitleTrack> {
    if let Some(language) = preferred_language {
        if let Some(track) = find_track(tracks, language, TrackKind::Manual)
            .or_else(|| find_track(tracks, language, TrackKind::Auto))
        {
            return Some(track);
        }
    }

    tracks.first()
}
