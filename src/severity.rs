//! Severity levels for report events.
//!
//! `Severity` is a total order from [`Severity::Trace`] up to
//! [`Severity::Fatal`]. The append pipeline compares an event against the
//! configured threshold with [`Severity::at_least`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Event severity, least to most severe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
}

/// Error returned when a severity name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity: {0:?}")]
pub struct ParseSeverityError(String);

impl Severity {
    /// Upper-case name, matching the `Display` output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// `true` when `self` is at least as severe as `threshold`.
    #[must_use]
    pub fn at_least(self, threshold: Severity) -> bool {
        self >= threshold
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Parse a severity name, ignoring case and surrounding whitespace.
    ///
    /// `WARNING` and `CRITICAL` are accepted as aliases for `WARN` and
    /// `FATAL` so configuration written for other frameworks keeps working.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let eq = |candidate: &str| name.eq_ignore_ascii_case(candidate);
        if eq("TRACE") {
            Ok(Self::Trace)
        } else if eq("DEBUG") {
            Ok(Self::Debug)
        } else if eq("INFO") {
            Ok(Self::Info)
        } else if eq("WARN") || eq("WARNING") {
            Ok(Self::Warn)
        } else if eq("ERROR") {
            Ok(Self::Error)
        } else if eq("FATAL") || eq("CRITICAL") {
            Ok(Self::Fatal)
        } else {
            Err(ParseSeverityError(name.to_owned()))
        }
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn ordering_is_total_and_ascending() {
        assert!(Severity::Trace < Severity::Debug);
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[rstest]
    #[case("trace", Severity::Trace)]
    #[case("DEBUG", Severity::Debug)]
    #[case("Info", Severity::Info)]
    #[case("warn", Severity::Warn)]
    #[case("WARNING", Severity::Warn)]
    #[case("error", Severity::Error)]
    #[case("fatal", Severity::Fatal)]
    #[case("critical", Severity::Fatal)]
    #[case("  ERROR  ", Severity::Error)]
    fn parses_known_names(#[case] input: &str, #[case] expected: Severity) {
        assert_eq!(input.parse::<Severity>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("verbose".parse::<Severity>().is_err());
        assert!("".parse::<Severity>().is_err());
    }

    #[rstest]
    #[case(Severity::Error, Severity::Error, true)]
    #[case(Severity::Fatal, Severity::Error, true)]
    #[case(Severity::Warn, Severity::Error, false)]
    #[case(Severity::Trace, Severity::Trace, true)]
    fn at_least_compares_against_threshold(
        #[case] severity: Severity,
        #[case] threshold: Severity,
        #[case] expected: bool,
    ) {
        assert_eq!(severity.at_least(threshold), expected);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Severity::Fatal.to_string(), "FATAL");
        assert_eq!(Severity::Warn.as_str(), "WARN");
    }
}
