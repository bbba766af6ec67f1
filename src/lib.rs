//! Build and deploy helpers for the higher-kinded-j documentation site.
//!
//! Two independent batch steps share this crate:
//!
//! | Binary         | Module                 | Output                     |
//! |----------------|------------------------|----------------------------|
//! | `hkj-sitemap`  | [`generator::sitemap`] | `<book>/sitemap.xml`       |
//! | `hkj-versions` | [`registry`]           | `<repo>/versions.json`     |
//!
//! Each run reads its inputs once, writes its output once and exits.

pub mod cli;
pub mod config;
pub mod generator;
pub mod registry;
pub mod utils;
