//! Embed color helpers
//!
//! Discord embeds carry their border color as a plain integer; the admin
//! configures it as a `#rrggbb` (or `#rgb`) string.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new(r"^([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").unwrap();
}

/// True iff the value is a 3- or 6-digit hex color, `#` prefix optional
pub fn is_valid_hex_color(color: &str) -> bool {
    HEX_COLOR.is_match(color.trim_start_matches('#'))
}

/// Parse a hex color into the integer Discord expects.
///
/// Returns `0` for anything unparseable; never panics.
pub fn hex_to_int(color: &str) -> u32 {
    let stripped = color.trim_start_matches('#');
    if !HEX_COLOR.is_match(stripped) {
        return 0;
    }
    u32::from_str_radix(stripped, 16).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_hex_colors() {
        assert!(is_valid_hex_color("#1a2b3c"));
        assert!(is_valid_hex_color("1a2b3c"));
        assert!(is_valid_hex_color("#fff"));
        assert!(!is_valid_hex_color("#12"));
        assert!(!is_valid_hex_color("zzzzzz"));
        assert!(!is_valid_hex_color(""));
    }

    #[test]
    fn test_hex_to_int() {
        assert_eq!(hex_to_int("#ffffff"), 16777215);
        assert_eq!(hex_to_int("000000"), 0);
        assert_eq!(hex_to_int("#ff0000"), 0xff0000);
        assert_eq!(hex_to_int("fff"), 0xfff);
    }

    #[test]
    fn test_hex_to_int_never_fails() {
        assert_eq!(hex_to_int("not-hex"), 0);
        assert_eq!(hex_to_int("#12"), 0);
        assert_eq!(hex_to_int(""), 0);
    }
}
