//! Identifier folding and quoting.
//!
//! Unquoted identifiers fold to upper case, as in standard SQL.
//! An identifier wrapped in double quotes keeps its case with the quotes
//! stripped. Emitted SQL always quotes, so family-qualified names such as
//! `CF1.A` survive as a single identifier.

/// Normalize a user-supplied identifier.
///
/// `fold = false` leaves unquoted identifiers untouched.
#[must_use]
pub fn normalize(ident: &str, fold: bool) -> String {
    let trimmed = ident.trim();
    if let Some(inner) = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return inner.replace("\"\"", "\"");
    }
    if fold {
        trimmed.to_uppercase()
    } else {
        trimmed.to_string()
    }
}

/// Normalize a column name, prefixing its column family when it has one.
#[must_use]
pub fn qualified(family: Option<&str>, name: &str, fold: bool) -> String {
    match family {
        Some(family) => format!("{}.{}", normalize(family, fold), normalize(name, fold)),
        None => normalize(name, fold),
    }
}

/// Quote a normalized identifier for emitted SQL.
#[must_use]
pub fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a_string", true, "A_STRING")]
    #[case("  col1 ", true, "COL1")]
    #[case("\"v1\"", true, "v1")]
    #[case("\"Mixed\"\"Quote\"", true, "Mixed\"Quote")]
    #[case("a_string", false, "a_string")]
    fn normalize_cases(#[case] input: &str, #[case] fold: bool, #[case] expected: &str) {
        assert_eq!(normalize(input, fold), expected);
    }

    #[test]
    fn family_qualifies_name() {
        assert_eq!(qualified(Some("cf1"), "a", true), "CF1.A");
        assert_eq!(qualified(None, "col2", true), "COL2");
        assert_eq!(qualified(Some("cf2"), "\"d\"", true), "CF2.d");
    }

    #[test]
    fn quote_doubles_embedded_quotes() {
        assert_eq!(quote("CF1.A"), "\"CF1.A\"");
        assert_eq!(quote("a\"b"), "\"a\"\"b\"");
    }
}
