pub mod cli;
pub mod config;
pub mod extractor;
pub mod global;
pub mod normalizer;
pub mod subtitles;
pub mod text_io;
