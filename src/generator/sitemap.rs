//! Sitemap generation.
//!
//! Walks the rendered book and writes a sitemap.xml listing every page for
//! search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://higher-kinded-j.github.io/index.html</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use crate::config::{PriorityConfig, SitemapConfig};
use quick_xml::escape::escape;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Extension of pages that are listed.
const PAGE_SUFFIX: &str = ".html";

/// Priority tiers, highest first.
pub mod priority {
    pub const HOME: f32 = 1.0;
    pub const KEY_FEATURE: f32 = 0.9;
    pub const CORE_DOC: f32 = 0.8;
    pub const SECTION: f32 = 0.7;
    pub const GUIDE: f32 = 0.6;
    pub const DEFAULT: f32 = 0.5;
}

// ============================================================================
// Errors
// ============================================================================

/// Sitemap generation errors
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("book directory `{0}` does not exist")]
    MissingRoot(PathBuf),

    #[error("book path `{0}` is not a directory")]
    NotADirectory(PathBuf),

    #[error("failed to walk book directory")]
    Walk(#[from] walkdir::Error),

    #[error("failed to write sitemap to `{0}`")]
    Write(PathBuf, #[source] io::Error),
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

/// Sitemap data structure
#[derive(Debug)]
pub struct Sitemap {
    /// List of URL entries, sorted by `loc`
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    /// Full URL location
    pub loc: String,
    /// Last modification date (YYYY-MM-DD format)
    pub lastmod: String,
    /// Change frequency label
    pub changefreq: String,
    /// Priority in `[0.0, 1.0]`
    pub priority: f32,
}

impl Sitemap {
    /// Scan `root` for pages and classify each one.
    ///
    /// `lastmod` is stamped on every entry unchanged, so one run produces a
    /// single date no matter how old individual files are.
    pub fn scan(
        root: &Path,
        base_url: &str,
        config: &SitemapConfig,
        lastmod: &str,
    ) -> Result<Self, SitemapError> {
        check_root(root)?;
        let base_url = normalize_base_url(base_url);

        let mut urls = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if !name.ends_with(PAGE_SUFFIX) || config.is_excluded(&name) {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let loc = format!("{base_url}{}", url_path(relative));
            let priority = classify(&loc, &base_url, &config.priority);

            urls.push(UrlEntry {
                loc,
                lastmod: lastmod.to_owned(),
                changefreq: config.changefreq.clone(),
                priority,
            });
        }

        urls.sort_by(|a, b| a.loc.cmp(&b.loc));
        Ok(Self { urls })
    }

    pub fn urls(&self) -> &[UrlEntry] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Generate sitemap XML string.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(128 + self.urls.len() * 192);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in &self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape(entry.loc.as_str())));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                entry.changefreq
            ));
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to `path`, creating its parent directory if needed.
    pub fn write(&self, path: &Path) -> Result<(), SitemapError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|err| SitemapError::Write(path.to_path_buf(), err))?;
        }
        fs::write(path, self.to_xml()).map_err(|err| SitemapError::Write(path.to_path_buf(), err))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Ensure the book root exists and is a directory.
pub fn check_root(root: &Path) -> Result<(), SitemapError> {
    if !root.exists() {
        return Err(SitemapError::MissingRoot(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(SitemapError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Force exactly one trailing slash.
pub fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

/// Priority for a page URL. The first matching tier wins.
pub fn classify(url: &str, base_url: &str, rules: &PriorityConfig) -> f32 {
    let contains_any = |fragments: &[String]| fragments.iter().any(|f| url.contains(f.as_str()));

    if url.ends_with("index.html")
        || url.ends_with("home.html")
        || url == base_url.trim_end_matches('/')
    {
        priority::HOME
    } else if contains_any(&rules.key_features) {
        priority::KEY_FEATURE
    } else if contains_any(&rules.core_docs) {
        priority::CORE_DOC
    } else if contains_any(&rules.sections) {
        priority::SECTION
    } else if contains_any(&rules.guides) {
        priority::GUIDE
    } else {
        priority::DEFAULT
    }
}

/// Join path components with `/` regardless of the host separator.
fn url_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Sorted entry names of `dir`, directories suffixed with `/`.
///
/// Used to show what the process can actually see when the book directory
/// is missing.
pub fn list_dir(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = fs::read_dir(dir)?
        .map(|entry| -> io::Result<String> {
            let entry = entry?;
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_dir() {
                name.push('/');
            }
            Ok(name)
        })
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

// ============================================================================
// Tests
// ============================================================================
