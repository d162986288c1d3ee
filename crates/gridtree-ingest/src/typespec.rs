//! Length/decimals specification parsing.
//!
//! The spec cell is human-authored text like `"10.2"`, `"8,2"` or `"5-"`.
//! Parsing never fails: malformed segments are logged and the affected
//! values keep their defaults. The resolver is only consulted when the
//! attribute has no explicit shared-type reference; a shared type governs
//! the representation on its own.

use tracing::warn;

/// Resolved length, decimal count, and sign flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthSpec {
    pub length: Option<u32>,
    pub decimals: Option<u32>,
    pub sign: bool,
}

/// Parse a length/decimals specification.
///
/// Grammar, applied to the trimmed input:
/// 1. a trailing `-` sets the sign flag and is stripped,
/// 2. the rest splits on `.` when one is present, else on `,`,
/// 3. the first segment is the length, an optional second the decimals.
///
/// Segments that fail integer parsing are skipped with a warning.
pub fn resolve_length_spec(raw: &str) -> LengthSpec {
    let mut spec = LengthSpec::default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return spec;
    }

    let mut text = trimmed.to_string();
    if text.ends_with('-') {
        spec.sign = true;
        text = text.replace('-', "");
    }
    let text = text.trim();

    let segments: Vec<&str> = if text.contains('.') {
        text.split('.').collect()
    } else {
        text.split(',').collect()
    };

    if let Some(first) = segments.first() {
        match first.trim().parse::<u32>() {
            Ok(length) => spec.length = Some(length),
            Err(_) => warn!(spec = raw, "length segment is not numeric; keeping default"),
        }
    }
    if segments.len() == 2 {
        match segments[1].trim().parse::<u32>() {
            Ok(decimals) => spec.decimals = Some(decimals),
            Err(_) => warn!(spec = raw, "decimals segment is not numeric; keeping default"),
        }
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_and_decimals_split_on_dot() {
        assert_eq!(
            resolve_length_spec("10.2"),
            LengthSpec {
                length: Some(10),
                decimals: Some(2),
                sign: false,
            }
        );
    }

    #[test]
    fn comma_is_an_alternate_separator() {
        assert_eq!(
            resolve_length_spec("8,2"),
            LengthSpec {
                length: Some(8),
                decimals: Some(2),
                sign: false,
            }
        );
    }

    #[test]
    fn trailing_dash_sets_sign() {
        assert_eq!(
            resolve_length_spec("5-"),
            LengthSpec {
                length: Some(5),
                decimals: None,
                sign: true,
            }
        );
    }

    #[test]
    fn signed_length_and_decimals() {
        assert_eq!(
            resolve_length_spec("12.4-"),
            LengthSpec {
                length: Some(12),
                decimals: Some(4),
                sign: true,
            }
        );
    }

    #[test]
    fn malformed_input_keeps_defaults() {
        assert_eq!(resolve_length_spec("abc"), LengthSpec::default());
        assert_eq!(resolve_length_spec(""), LengthSpec::default());
        assert_eq!(resolve_length_spec("   "), LengthSpec::default());
    }

    #[test]
    fn partial_failure_keeps_the_parsed_part() {
        // Length parses, decimals does not: length stands, decimals stays
        // unset.
        assert_eq!(
            resolve_length_spec("10.x"),
            LengthSpec {
                length: Some(10),
                decimals: None,
                sign: false,
            }
        );
        // Length fails, decimals parses.
        assert_eq!(
            resolve_length_spec("x.2"),
            LengthSpec {
                length: None,
                decimals: Some(2),
                sign: false,
            }
        );
    }

    #[test]
    fn more_than_two_segments_only_sets_length() {
        assert_eq!(
            resolve_length_spec("1.2.3"),
            LengthSpec {
                length: Some(1),
                decimals: None,
                sign: false,
            }
        );
    }

    #[test]
    fn whitespace_is_tolerated() {
        assert_eq!(
            resolve_length_spec("  10.2  "),
            LengthSpec {
                length: Some(10),
                decimals: Some(2),
                sign: false,
            }
        );
    }
}
