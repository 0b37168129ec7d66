use reel_core::WrapMode;

/// Parse a boolean value from a raw string, accepting common env-style forms.
///
/// Accepted truthy values (case-insensitive): `"1"`, `"true"`, `"yes"`, `"on"`.
/// Accepted falsy values: `"0"`, `"false"`, `"no"`, `"off"`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `finite`/`infinite`, or a boolean meaning "infinite".
pub fn parse_wrap_mode(raw: &str) -> Option<WrapMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "finite" => Some(WrapMode::Finite),
        "infinite" => Some(WrapMode::Infinite),
        other => parse_bool(other).map(|infinite| {
            if infinite {
                WrapMode::Infinite
            } else {
                WrapMode::Finite
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_forms() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn wrap_mode_forms() {
        assert_eq!(parse_wrap_mode("Infinite"), Some(WrapMode::Infinite));
        assert_eq!(parse_wrap_mode("0"), Some(WrapMode::Finite));
        assert_eq!(parse_wrap_mode("loop"), None);
    }
}
