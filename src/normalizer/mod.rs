mod caption_text;
mod normalizer;
mod passthrough;
mod transcript_normalizer;

pub use caption_text::CaptionTextNormalizer;
pub use normalizer::Normalizer;
pub use passthrough::PassthroughNormalizer;
pub use transcript_normalizer::TranscriptNormalizer;
