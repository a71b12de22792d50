//! Identifier and name normalization
//!
//! Dialect 2 addresses entities by a lowercase alphanumeric identifier,
//! while dialect 1 requires `metadata.name` to be a short token restricted
//! to alphanumerics and `-_.` separators.

/// Placeholder used whenever a name or identifier cannot be derived
pub const UNKNOWN: &str = "unknown";

/// Maximum length of a dialect-2 identifier
pub const MAX_IDENTIFIER_LEN: usize = 128;

/// Maximum length of a dialect-1 `metadata.name`
pub const MAX_NAME_LEN: usize = 63;

/// Derive a dialect-2 identifier from a human readable name
///
/// Lowercases, drops everything outside `[a-z0-9]` and truncates to
/// [`MAX_IDENTIFIER_LEN`]. Returns [`UNKNOWN`] when nothing survives.
#[must_use]
pub fn to_identifier(name: Option<&str>) -> String {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return UNKNOWN.to_string();
    };

    let identifier: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .take(MAX_IDENTIFIER_LEN)
        .collect();

    if identifier.is_empty() {
        UNKNOWN.to_string()
    } else {
        identifier
    }
}

/// Sanitize a name for dialect-1 `metadata.name`
///
/// Trims surrounding whitespace, replaces each character outside
/// `[A-Za-z0-9-_.]` with `-` and truncates to [`MAX_NAME_LEN`].
#[must_use]
pub fn sanitize_name(name: Option<&str>) -> String {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return UNKNOWN.to_string();
    };

    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| if is_name_char(c) { c } else { '-' })
        .take(MAX_NAME_LEN)
        .collect();

    if sanitized.is_empty() {
        UNKNOWN.to_string()
    } else {
        sanitized
    }
}

/// Recover a display name from a dialect-2 identifier
#[must_use]
pub fn identifier_to_name(identifier: Option<&str>) -> String {
    match identifier {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

#[inline]
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_strips_and_lowercases() {
        assert_eq!(to_identifier(Some("Artist Lookup")), "artistlookup");
        assert_eq!(to_identifier(Some("artists-db")), "artistsdb");
        assert_eq!(to_identifier(Some("create_java_based_new_service")), "createjavabasednewservice");
    }

    #[test]
    fn identifier_falls_back_to_unknown() {
        assert_eq!(to_identifier(None), UNKNOWN);
        assert_eq!(to_identifier(Some("")), UNKNOWN);
        assert_eq!(to_identifier(Some("--- !!")), UNKNOWN);
    }

    #[test]
    fn identifier_truncates() {
        let long = "a".repeat(300);
        assert_eq!(to_identifier(Some(&long)).len(), MAX_IDENTIFIER_LEN);
    }

    #[test]
    fn sanitize_replaces_invalid_chars() {
        assert_eq!(sanitize_name(Some("  Create JAVA service  ")), "Create-JAVA-service");
        assert_eq!(sanitize_name(Some("user:pranay.shah")), "user-pranay.shah");
        assert_eq!(sanitize_name(Some("a_b-c.d")), "a_b-c.d");
    }

    #[test]
    fn sanitize_falls_back_to_unknown() {
        assert_eq!(sanitize_name(None), UNKNOWN);
        assert_eq!(sanitize_name(Some("")), UNKNOWN);
        assert_eq!(sanitize_name(Some("    ")), UNKNOWN);
    }

    #[test]
    fn sanitize_truncates() {
        let long = "x".repeat(100);
        assert_eq!(sanitize_name(Some(&long)).len(), MAX_NAME_LEN);
    }

    #[test]
    fn identifier_to_name_is_passthrough() {
        assert_eq!(identifier_to_name(Some("stocopy2")), "stocopy2");
        assert_eq!(identifier_to_name(Some("")), UNKNOWN);
        assert_eq!(identifier_to_name(None), UNKNOWN);
    }
}
