//! Sitemap rules, optionally loaded from a TOML file.
//!
//! Every field has a built-in default, so an empty file (or no file at all)
//! yields the standard rules for the book.
//!
//! # Example
//!
//! ```toml
//! changefreq = "weekly"
//! exclude = ["404.html", "print.html"]
//!
//! [priority]
//! key_features = ["effect_path_overview"]
//! core_docs = ["core-concepts", "quickstart"]
//! sections = ["/effect/", "/optics/"]
//! guides = ["/tutorials/", "/hkts/"]
//! ```

pub mod defaults;
mod error;

pub use error::ConfigError;

use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Change frequencies accepted by the sitemap protocol.
const CHANGEFREQS: &[&str] = &[
    "always", "hourly", "daily", "weekly", "monthly", "yearly", "never",
];

// ============================================================================
// Root Configuration
// ============================================================================

/// Rules controlling which pages enter the sitemap and how they rank.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    /// `<changefreq>` written for every entry.
    #[serde(default = "defaults::sitemap::changefreq")]
    #[educe(Default = defaults::sitemap::changefreq())]
    pub changefreq: String,

    /// File names skipped during the walk, matched against the bare name.
    #[serde(default = "defaults::sitemap::exclude")]
    #[educe(Default = defaults::sitemap::exclude())]
    pub exclude: Vec<String>,

    /// URL fragments for each priority tier.
    #[serde(default)]
    pub priority: PriorityConfig,
}

/// Fragment lists for the priority tiers, checked in declaration order.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PriorityConfig {
    /// Tier 0.9
    #[serde(default = "defaults::sitemap::priority::key_features")]
    #[educe(Default = defaults::sitemap::priority::key_features())]
    pub key_features: Vec<String>,

    /// Tier 0.8
    #[serde(default = "defaults::sitemap::priority::core_docs")]
    #[educe(Default = defaults::sitemap::priority::core_docs())]
    pub core_docs: Vec<String>,

    /// Tier 0.7
    #[serde(default = "defaults::sitemap::priority::sections")]
    #[educe(Default = defaults::sitemap::priority::sections())]
    pub sections: Vec<String>,

    /// Tier 0.6
    #[serde(default = "defaults::sitemap::priority::guides")]
    #[educe(Default = defaults::sitemap::priority::guides())]
    pub guides: Vec<String>,
}

impl SitemapConfig {
    /// Parse rules from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SitemapConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load rules from a file path.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load rules from `path` when given, built-in rules otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::from_path)
    }

    /// Whether a file name is on the exclusion list.
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.exclude.iter().any(|name| name == file_name)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !CHANGEFREQS.contains(&self.changefreq.as_str()) {
            return Err(ConfigError::Validation(format!(
                "changefreq `{}` is not one of: {}",
                self.changefreq,
                CHANGEFREQS.join(", ")
            )));
        }

        let p = &self.priority;
        let tiers = [&p.key_features, &p.core_docs, &p.sections, &p.guides];
        if tiers.iter().flat_map(|tier| tier.iter()).any(String::is_empty) {
            return Err(ConfigError::Validation(
                "priority fragments must not be empty".into(),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
