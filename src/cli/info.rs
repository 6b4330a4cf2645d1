//! CLI handler for inspecting a video and its subtitle tracks.

use anyhow::Result;
use serde::Serialize;

use crate::cli::args::InfoCliArgs;
use crate::cli::fetch_video_info;
use crate::config::Config;
use crate::extractor::{SubtitleTrack, VideoInfo, YtDlpExtractor};

/// Video summary printed by `info --json`.
#[derive(Debug, Serialize)]
struct InfoSummary<'a> {
    title: &'a str,
    duration: String,
    channel: &'a str,
    views: u64,
    thumbnail: Option<&'a str>,
    tracks: Vec<SubtitleTrack>,
}

pub async fn handle_info_command(args: InfoCliArgs) -> Result<()> {
    let config = Config::load()?;
    let extractor = YtDlpExtractor::from_config(&config.extractor, args.cookies.as_deref())?;

    let info = fetch_video_info(&extractor, &args.url, !args.no_progress).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary(&info))?);
    } else {
        print!("{}", render_info(&info));
    }

    Ok(())
}

fn summary(info: &VideoInfo) -> InfoSummary<'_> {
    InfoSummary {
        title: info.display_title(),
        duration: info.display_duration(),
        channel: info.display_uploader(),
        views: info.view_count.unwrap_or(0),
        thumbnail: info.thumbnail.as_deref(),
        tracks: info.tracks(),
    }
}

fn render_info(info: &VideoInfo) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n\n", info.display_title()));
    out.push_str(&format!("Duration:  {}\n", info.display_duration()));
    out.push_str(&format!("Channel:   {}\n", info.display_uploader()));
    out.push_str(&format!("Views:     {}\n", info.display_views()));
    if let Some(thumbnail) = &info.thumbnail {
        out.push_str(&format!("Thumbnail: {}\n", thumbnail));
    }
    out.push('\n');

    let tracks = info.tracks();
    if tracks.is_empty() {
        out.push_str("No subtitles detected for this video.\n");
        return out;
    }

    out.push_str(&format!("Subtitle tracks ({}):\n", tracks.len()));
    for track in &tracks {
        out.push_str(&format!("  {:<12} {}\n", track.code, track.label()));
    }
    out.push_str("\nDownload with: subpro download <URL> --lang <CODE> [--auto]\n");

    out
}
