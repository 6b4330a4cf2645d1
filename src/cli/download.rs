//! CLI handler for downloading a subtitle track.
//!
//! Fetches metadata, picks a track, runs the subtitle pipeline and writes the
//! result to disk, stdout or the clipboard.

use anyhow::{anyhow, bail, Result};
use dialoguer::{theme::ColorfulTheme, Select};
use std::io::{self, IsTerminal};
use tracing::info;

use crate::cli::args::DownloadCliArgs;
use crate::cli::{create_spinner, fetch_video_info};
use crate::config::Config;
use crate::extractor::{
    find_track, select_default_track, DownloadRequest, SubtitleTrack, TrackKind, YtDlpExtractor,
};
use crate::global;
use crate::normalizer::Normalizer;
use crate::subtitles::process_subtitles;
use crate::text_io::copy_to_clipboard_sync;

pub async fn handle_download_command(args: DownloadCliArgs) -> Result<()> {
    let config = Config::load()?;
    let extractor = YtDlpExtractor::from_config(&config.extractor, args.cookies.as_deref())?;
    let show_progress = !args.no_progress;

    // 1. Inspect the video
    let info = fetch_video_info(&extractor, &args.url, show_progress).await?;
    let tracks = info.tracks();
    if tracks.is_empty() {
        bail!("No subtitles detected for this video.");
    }

    // 2. Pick a track
    let track = if let Some(lang) = args.lang.as_deref() {
        requested_track(&tracks, lang, args.auto)?
    } else if io::stdin().is_terminal() && io::stderr().is_terminal() {
        prompt_for_track(&tracks)?
    } else {
        let preferred = config.output.language.as_deref();
        select_default_track(&tracks, preferred)
            .ok_or_else(|| anyhow!("No subtitle track available"))?
    };
    info!("Selected track: {}", track.label());

    // 3. Download and convert
    let clean = !args.raw && config.output.clean_transcript;
    let normalizer = Normalizer::create(clean)?;
    let request = DownloadRequest {
        url: &args.url,
        track,
        convert_to_srt: !clean && config.output.convert_raw_to_srt,
    };

    let pb = create_spinner(show_progress, "Downloading subtitles...")?;
    let result = process_subtitles(&extractor, &request, info.file_title(), &normalizer).await;
    if let Some(pb) = pb {
        if result.is_ok() {
            pb.finish_with_message("Download complete");
        } else {
            pb.abandon_with_message("Download failed");
        }
    }
    let artifact = result?;

    // 4. Deliver
    if args.stdout {
        println!("{}", artifact.contents);
    } else {
        let dir = match args.output_dir.or(config.output.directory) {
            Some(dir) => dir,
            None => global::default_output_dir()?,
        };
        let path = artifact.write_to(&dir)?;
        eprintln!("Saved: {}", path.display());
    }

    if args.copy {
        copy_to_clipboard_sync(&artifact.contents)?;
        eprintln!("Copied to clipboard");
    }

    Ok(())
}

/// Resolve `--lang` / `--auto` against the listed tracks.
fn requested_track<'a>(
    tracks: &'a [SubtitleTrack],
    lang: &str,
    auto: bool,
) -> Result<&'a SubtitleTrack> {
    let kind = if auto { TrackKind::Auto } else { TrackKind::Manual };

    find_track(tracks, lang, kind).ok_or_else(|| {
        let hint = match kind {
            TrackKind::Manual if find_track(tracks, lang, TrackKind::Auto).is_some() => {
                " (an auto-generated track exists, add --auto)"
            }
            _ => "",
        };
        anyhow!(
            "No {} subtitle track for language '{}'{}. Run `subpro info <URL>` to list tracks.",
            kind.label(),
            lang,
            hint
        )
    })
}

fn prompt_for_track(tracks: &[SubtitleTrack]) -> Result<&SubtitleTrack> {
    let labels: Vec<String> = tracks.iter().map(|t| t.label()).collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose Language & Type")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(&tracks[selection])
}
