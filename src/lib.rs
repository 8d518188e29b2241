#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod fetch;
pub mod localizer;
pub mod rewrite;

pub use config::{ArchiveConfig, ArchiveLayout};
pub use fetch::{AssetFetcher, HttpFetcher};
pub use localizer::{ArchiveLocalizer, LocalizeSummary};
