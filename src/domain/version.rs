use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed version string '{0}': expected major.minor.patch")]
pub struct ParseVersionError(pub String);

/// Three-component version, ordered lexicographically by (major, minor, patch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemVer {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The version compiled into this binary.
    pub fn current() -> Result<Self, ParseVersionError> {
        env!("CARGO_PKG_VERSION").parse()
    }

    pub fn is_newer_than(self, other: SemVer) -> bool {
        self > other
    }
}

impl FromStr for SemVer {
    type Err = ParseVersionError;

    // Components beyond the third are ignored; fewer than three is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.split('.');
        let major = parse_component(parts.next(), s)?;
        let minor = parse_component(parts.next(), s)?;
        let patch = parse_component(parts.next(), s)?;
        Ok(Self {
            major,
            minor,
            patch,
        })
    }
}

fn parse_component(part: Option<&str>, input: &str) -> Result<u64, ParseVersionError> {
    let raw = part.ok_or_else(|| ParseVersionError(input.to_string()))?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseVersionError(input.to_string()));
    }
    raw.parse()
        .map_err(|_| ParseVersionError(input.to_string()))
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SemVer {
        s.parse().unwrap()
    }

    #[test]
    fn parses_three_components() {
        assert_eq!(v("1.2.3"), SemVer::new(1, 2, 3));
        assert_eq!(v("0.0.0"), SemVer::new(0, 0, 0));
        assert_eq!(v(" 10.20.30 "), SemVer::new(10, 20, 30));
    }

    #[test]
    fn ignores_components_beyond_the_third() {
        assert_eq!(v("1.2.3.4"), SemVer::new(1, 2, 3));
        assert_eq!(v("1.2.3.4.5"), SemVer::new(1, 2, 3));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("".parse::<SemVer>().is_err());
        assert!("1".parse::<SemVer>().is_err());
        assert!("1.2".parse::<SemVer>().is_err());
        assert!("1.2.x".parse::<SemVer>().is_err());
        assert!("a.b.c".parse::<SemVer>().is_err());
        assert!("1.2.-3".parse::<SemVer>().is_err());
        assert!("1.2.+3".parse::<SemVer>().is_err());
        assert!("1..3".parse::<SemVer>().is_err());
    }

    #[test]
    fn display_round_trips_first_three_components() {
        assert_eq!(v("1.2.3").to_string(), "1.2.3");
        assert_eq!(v("1.2.3.4").to_string(), "1.2.3");
    }

    #[test]
    fn orders_lexicographically() {
        assert!(v("2.0.0") > v("1.9.9"));
        assert!(v("1.10.0") > v("1.9.9"));
        assert!(v("1.0.10") > v("1.0.9"));
        assert_eq!(v("1.2.3"), v("1.2.3"));
        assert!(v("0.9.9") < v("1.0.0"));
    }

    #[test]
    fn ordering_is_transitive_and_antisymmetric() {
        let a = v("1.0.0");
        let b = v("1.1.0");
        let c = v("2.0.0");
        assert!(a < b && b < c && a < c);
        assert!(!(b < a));
    }

    #[test]
    fn is_newer_than_is_strict() {
        assert!(v("1.0.7").is_newer_than(v("1.0.6")));
        assert!(!v("1.0.6").is_newer_than(v("1.0.6")));
        assert!(!v("1.0.5").is_newer_than(v("1.0.6")));
    }

    #[test]
    fn current_version_parses() {
        assert!(SemVer::current().is_ok());
    }
}
