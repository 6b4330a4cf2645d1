//! Subtitle download pipeline.
//!
//! Downloads one track into a scratch directory, picks up the file the
//! extractor produced and turns it into the artifact that gets saved: the
//! untouched subtitle file, or a cleaned transcript named `<title>.txt`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

use crate::extractor::{DownloadRequest, ExtractorError, SubtitleExtractor};
use crate::normalizer::Normalizer;

/// A subtitle file or transcript ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleArtifact {
    pub file_name: String,
    pub contents: String,
}

impl SubtitleArtifact {
    /// Write the artifact into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Saved {} ({} bytes)", path.display(), self.contents.len());
        Ok(path)
    }
}

/// Download a subtitle track and build the artifact for it.
///
/// `title` names the output file. The scratch directory is removed when this
/// returns, whether or not the download succeeded.
pub async fn process_subtitles(
    extractor: &dyn SubtitleExtractor,
    request: &DownloadRequest<'_>,
    title: &str,
    normalizer: &Normalizer,
) -> Result<SubtitleArtifact> {
    let scratch = TempDir::new().context("Failed to create temporary directory")?;

    extractor
        .download_subtitle(request, scratch.path())
        .await?;

    let source = first_file(scratch.path())?.ok_or(ExtractorError::NoOutput)?;
    debug!("{} produced {}", extractor.name(), source.display());

    let bytes = std::fs::read(&source)
        .with_context(|| format!("Failed to read {}", source.display()))?;
    let raw = String::from_utf8_lossy(&bytes);

    let stem = sanitize_file_stem(title);
    let artifact = if normalizer.is_clean() {
        SubtitleArtifact {
            file_name: format!("{}.txt", stem),
            contents: normalizer.run(&raw),
        }
    } else {
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        SubtitleArtifact {
            file_name: format!("{}{}", stem, ext),
            contents: normalizer.run(&raw),
        }
    };

    Ok(artifact)
}

/// First regular file in `dir`, by name.
fn first_file(dir: &Path) -> Result<Option<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).context("Failed to list download directory")? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files.into_iter().next())
}

/// Longest stem in bytes. Leaves room for an extension under the usual
/// 255-byte file name limit.
const MAX_STEM_BYTES: usize = 200;

/// Turn a video title into a file stem.
///
/// Only path separators and control characters are replaced; emoji and
/// other symbols are kept as-is. Long titles are cut on a character boundary.
pub fn sanitize_file_stem(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let cleaned = truncate_to_bytes(cleaned.trim(), MAX_STEM_BYTES).trim();
    if cleaned.is_empty() {
        "subtitles".to_string()
    } else {
        cleaned.to_string()
    }
}

fn truncate_to_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
