//! Build metadata embedded by build.rs

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Incremented on each recompilation; 0 when build.rs did not set it
pub const BUILD_NUMBER: u64 = match option_env!("FITTRACK_BUILD_NUMBER") {
    Some(raw) => match parse_u64(raw) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

pub const BUILD_TIMESTAMP: &str = match option_env!("FITTRACK_BUILD_TIMESTAMP") {
    Some(ts) => ts,
    None => "unknown",
};

const fn parse_u64(raw: &str) -> Option<u64> {
    let digits = raw.as_bytes();
    if digits.is_empty() {
        return None;
    }
    let mut value: u64 = 0;
    let mut i = 0;
    while i < digits.len() {
        if !digits[i].is_ascii_digit() {
            return None;
        }
        value = value * 10 + (digits[i] - b'0') as u64;
        i += 1;
    }
    Some(value)
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
        }
    }
}

/// Banner on stderr; stdout belongs to the MCP transport
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("-----------------------------------------------");
    eprintln!(" FitTrack {} (build {})", info.version, info.build_number);
    eprintln!(" compiled {}", info.build_timestamp);
    eprintln!("-----------------------------------------------");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("42"), Some(42));
        assert_eq!(parse_u64("4a2"), None);
        assert_eq!(parse_u64(""), None);
    }

    #[test]
    fn test_current_matches_package() {
        let info = BuildInfo::current();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(!info.build_timestamp.is_empty());
    }
}
