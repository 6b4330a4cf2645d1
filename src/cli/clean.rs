//! CLI handler for cleaning a local caption file.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::cli::args::CleanCliArgs;
use crate::normalizer::Normalizer;
use crate::text_io::copy_to_clipboard_sync;

pub fn handle_clean_command(args: CleanCliArgs) -> Result<()> {
    let transcript = clean_file(&args.file)?;

    if let Some(output_path) = &args.output {
        std::fs::write(output_path, &transcript).context("Failed to write output file")?;
        eprintln!("Transcript saved to: {}", output_path.display());
    } else {
        println!("{}", transcript);
    }

    if args.copy {
        copy_to_clipboard_sync(&transcript)?;
        eprintln!("Copied to clipboard");
    }

    Ok(())
}

/// Read a caption file and return its clean transcript.
fn clean_file(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }

    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let raw = String::from_utf8_lossy(&bytes);

    let normalizer = Normalizer::create(true)?;
    Ok(normalizer.run(&raw))
}
