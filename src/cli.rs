//! Command-line interface definitions.
//!
//! Defines the arguments of both binaries using clap.

use crate::config::defaults;
use clap::Parser;
use std::path::PathBuf;

/// Generate sitemap.xml for the rendered book.
///
/// Every option can also be set through its environment variable, which is
/// how the publishing workflow drives it.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct SitemapCli {
    /// Directory holding the rendered HTML book
    #[arg(long, env = "BOOK_DIR", default_value = defaults::BOOK_DIR)]
    pub book_dir: PathBuf,

    /// Public root URL of the site
    #[arg(long, env = "BASE_URL", default_value = defaults::BASE_URL)]
    pub base_url: String,

    /// Optional TOML file overriding exclusions and priority rules
    #[arg(short = 'C', long, env = "SITEMAP_CONFIG")]
    pub config: Option<PathBuf>,
}

impl SitemapCli {
    /// Sitemap destination, always at the book root.
    pub fn output_path(&self) -> PathBuf {
        self.book_dir.join(defaults::SITEMAP_FILE)
    }
}

/// Record a docs deployment in versions.json.
#[derive(Parser, Debug, Clone)]
#[command(about, long_about = None, disable_version_flag = true)]
pub struct VersionsCli {
    /// Directory containing (or receiving) versions.json
    #[arg(long)]
    pub repo_dir: PathBuf,

    /// `latest` for the rolling snapshot, or a release id such as v1.2.3
    #[arg(long)]
    pub version: String,

    /// Label shown in the version switcher
    #[arg(long)]
    pub version_label: String,
}

impl VersionsCli {
    pub fn registry_path(&self) -> PathBuf {
        self.repo_dir.join(defaults::REGISTRY_FILE)
    }
}
