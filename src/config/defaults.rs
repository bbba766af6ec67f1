//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

use std::path::PathBuf;

/// Directory holding the rendered book.
pub const BOOK_DIR: &str = "hkj-book/book";

/// Public root of the documentation site.
pub const BASE_URL: &str = "https://higher-kinded-j.github.io/";

/// File name of the generated sitemap, written at the book root.
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// File name of the version registry, written at the repository root.
pub const REGISTRY_FILE: &str = "versions.json";

pub fn book_dir() -> PathBuf {
    BOOK_DIR.into()
}

// ============================================================================
// Sitemap Defaults
// ============================================================================

pub mod sitemap {
    pub fn changefreq() -> String {
        "weekly".into()
    }

    /// Error page and print view are never listed.
    pub fn exclude() -> Vec<String> {
        vec!["404.html".into(), "print.html".into()]
    }

    pub mod priority {
        /// Pages that sell the library: its headline features.
        pub fn key_features() -> Vec<String> {
            [
                "effect_path_overview",
                "effect/effect_path",
                "optics/optics_intro",
                "optics/focus_dsl",
                "spring/spring_boot_integration",
                "order-walkthrough",
            ]
            .into_iter()
            .map(Into::into)
            .collect()
        }

        /// Pages every reader needs before anything else.
        pub fn core_docs() -> Vec<String> {
            [
                "core-concepts",
                "hkt_introduction",
                "usage-guide",
                "quickstart",
                "cheatsheet",
                "glossary",
            ]
            .into_iter()
            .map(Into::into)
            .collect()
        }

        pub fn sections() -> Vec<String> {
            vec!["/effect/".into(), "/optics/".into()]
        }

        pub fn guides() -> Vec<String> {
            vec!["/tutorials/".into(), "/hkts/".into()]
        }
    }
}
