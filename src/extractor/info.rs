//! Video metadata as reported by the extractor's JSON dump.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Subset of the yt-dlp info dictionary used for display and track listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoInfo {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    /// Duration in seconds
    pub duration: Option<f64>,
    pub uploader: Option<String>,
    pub view_count: Option<u64>,
    /// Uploader-authored subtitles keyed by language code
    pub subtitles: Option<BTreeMap<String, Vec<SubtitleFormat>>>,
    /// Machine-generated captions keyed by language code
    pub automatic_captions: Option<BTreeMap<String, Vec<SubtitleFormat>>>,
}

/// One downloadable format of a subtitle track.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubtitleFormat {
    pub ext: Option<String>,
    pub url: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    Manual,
    Auto,
}

impl TrackKind {
    pub fn is_auto(self) -> bool {
        self == TrackKind::Auto
    }

    pub fn label(self) -> &'static str {
        match self {
            TrackKind::Manual => "Manual",
            TrackKind::Auto => "Auto",
        }
    }
}

/// A selectable subtitle track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    pub code: String,
    pub name: String,
    pub kind: TrackKind,
}

impl SubtitleTrack {
    fn from_formats(code: &str, formats: &[SubtitleFormat], kind: TrackKind) -> Self {
        let name = formats
            .first()
            .and_then(|f| f.name.clone())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| code.to_string());

        Self {
            code: code.to_string(),
            name,
            kind,
        }
    }

    /// Display label, e.g. "✅ English (Manual)" or "🤖 English (Auto)".
    pub fn label(&self) -> String {
        let icon = match self.kind {
            TrackKind::Manual => "✅",
            TrackKind::Auto => "🤖",
        };
        format!("{} {} ({})", icon, self.name, self.kind.label())
    }
}

impl VideoInfo {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown Title")
    }

    /// Title used to name saved files.
    pub fn file_title(&self) -> &str {
        self.title.as_deref().unwrap_or("subtitles")
    }

    pub fn display_uploader(&self) -> &str {
        self.uploader.as_deref().unwrap_or("Unknown")
    }

    /// Duration as H:MM:SS, or "Unknown" when missing or zero.
    pub fn display_duration(&self) -> String {
        match self.duration {
            Some(seconds) if seconds > 0.0 => format_duration(seconds),
            _ => "Unknown".to_string(),
        }
    }

    pub fn display_views(&self) -> String {
        format_thousands(self.view_count.unwrap_or(0))
    }

    /// Manual tracks first, then automatic captions, each ordered by language code.
    pub fn tracks(&self) -> Vec<SubtitleTrack> {
        let manual = self
            .subtitles
            .iter()
            .flatten()
            .map(|(code, formats)| SubtitleTrack::from_formats(code, formats, TrackKind::Manual));
        let auto = self
            .automatic_captions
            .iter()
            .flatten()
            .map(|(code, formats)| SubtitleTrack::from_formats(code, formats, TrackKind::Auto));

        manual.chain(auto).collect()
    }
}

fn format_duration(seconds: f64) -> String {
    let total = seconds.round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{}:{:02}:{:02}", hours, minutes, secs)
}

fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
