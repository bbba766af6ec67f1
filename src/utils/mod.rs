//! Utility modules shared by the sitemap and registry steps.

pub mod date;
pub mod log;
pub mod version;
