use anyhow::Result;
use tracing::{debug, info};

use crate::normalizer::{CaptionTextNormalizer, PassthroughNormalizer, TranscriptNormalizer};

/// Enum to hold the normalizer selected by the output mode
pub enum Normalizer {
    CaptionText(CaptionTextNormalizer),
    Passthrough(PassthroughNormalizer),
}

impl Normalizer {
    /// Create a normalizer based on whether a clean transcript was requested
    pub fn create(clean_transcript: bool) -> Result<Self> {
        if clean_transcript {
            info!("Clean transcript mode: timestamps and markup will be removed");
            Ok(Normalizer::CaptionText(CaptionTextNormalizer::new()?))
        } else {
            info!("Raw subtitle mode: payload is saved unchanged");
            Ok(Normalizer::Passthrough(PassthroughNormalizer::new()))
        }
    }

    /// Whether this normalizer produces a plain-text transcript
    pub fn is_clean(&self) -> bool {
        matches!(self, Normalizer::CaptionText(_))
    }

    /// Run normalization using the selected normalizer
    pub fn run(&self, raw_captions: &str) -> String {
        match self {
            Normalizer::CaptionText(n) => {
                debug!("Running {}", n.name());
                n.normalize(raw_captions)
            }
            Normalizer::Passthrough(n) => {
                debug!("Running {}", n.name());
                n.normalize(raw_captions)
            }
        }
    }
}
