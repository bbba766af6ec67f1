//! Semantic version keys for ordering release identifiers.

/// `(major, minor, patch)` used to order releases numerically.
///
/// Field order matches comparison order, so the derived `Ord` compares
/// major first, then minor, then patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionKey {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionKey {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a release identifier such as `v1.2.3` or `0.4.10`.
    ///
    /// One leading `v` is stripped, then the first three dot-separated
    /// components are read as integers; anything after the third is ignored.
    /// Any failure (`banana`, `v1.2`, `v1.2.3-rc1`) yields `0.0.0`, so an
    /// unparseable identifier sorts after every real release.
    pub fn parse(s: &str) -> Self {
        Self::try_parse(s).unwrap_or_default()
    }

    /// Strict form of [`VersionKey::parse`]: `None` on any failure.
    pub fn try_parse(s: &str) -> Option<Self> {
        let s = s.strip_prefix('v').unwrap_or(s);
        let mut parts = s.split('.').map(|part| part.parse::<u64>().ok());

        let major = parts.next()??;
        let minor = parts.next()??;
        let patch = parts.next()??;
        Some(Self::new(major, minor, patch))
    }
}

impl std::fmt::Display for VersionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_prefix() {
        assert_eq!(VersionKey::parse("v1.2.3"), VersionKey::new(1, 2, 3));
    }

    #[test]
    fn test_parse_without_prefix() {
        assert_eq!(VersionKey::parse("0.4.10"), VersionKey::new(0, 4, 10));
    }

    #[test]
    fn test_parse_ignores_fourth_component() {
        assert_eq!(VersionKey::parse("v1.2.3.4"), VersionKey::new(1, 2, 3));
        assert_eq!(VersionKey::parse("v1.2.3.beta"), VersionKey::new(1, 2, 3));
    }

    #[test]
    fn test_parse_falls_back_to_zero() {
        for bad in ["banana", "", "v", "v1", "v1.2", "v1.x.3", "v1.2.3-rc1", "vv1.2.3"] {
            assert_eq!(VersionKey::parse(bad), VersionKey::default(), "input: {bad:?}");
            assert_eq!(VersionKey::try_parse(bad), None, "input: {bad:?}");
        }
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(VersionKey::parse("v0.1.10") > VersionKey::parse("v0.1.9"));
        assert!(VersionKey::parse("v1.0.0") > VersionKey::parse("v0.99.99"));
        assert!(VersionKey::parse("v2.1.0") > VersionKey::parse("v2.0.7"));
    }

    #[test]
    fn test_fallback_sorts_below_real_releases() {
        assert!(VersionKey::parse("banana") < VersionKey::parse("v0.0.1"));
        assert_eq!(VersionKey::parse("banana"), VersionKey::parse("v0.0.0"));
    }

    #[test]
    fn test_display() {
        assert_eq!(VersionKey::new(1, 2, 3).to_string(), "1.2.3");
    }
}
