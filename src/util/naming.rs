//! Column and table name mangling
//!
//! A separator is inserted only where a lowercase letter or digit is
//! immediately followed by an uppercase letter. Uppercase runs are never
//! split, so `userPWDuser` becomes `user_pwduser`, not `user_pwd_user`.
//! Existing column names depend on this exact rule.

use std::sync::OnceLock;

use regex::Regex;

static CAMEL_BOUNDARY: OnceLock<Regex> = OnceLock::new();

fn camel_boundary() -> &'static Regex {
    CAMEL_BOUNDARY.get_or_init(|| {
        Regex::new(r"([a-z0-9])([A-Z])").expect("camel boundary pattern is a valid regex")
    })
}

/// Convert a camelCase identifier into snake_case
pub fn camel_to_snake(s: &str) -> String {
    camel_boundary()
        .replace_all(s, "${1}_${2}")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviation() {
        assert_eq!(camel_to_snake("ID"), "id");
    }

    #[test]
    fn test_digit_boundary() {
        assert_eq!(camel_to_snake("Table1Name"), "table1_name");
    }

    // These pin the boundary rule: uppercase runs stay together.
    #[test]
    fn test_trailing_upper_run() {
        assert_eq!(camel_to_snake("userPWD"), "user_pwd");
    }

    #[test]
    fn test_upper_run_followed_by_lower() {
        assert_eq!(camel_to_snake("userPWDuser"), "user_pwduser");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(camel_to_snake("TestModel"), "test_model");
        assert_eq!(camel_to_snake("FirstName"), "first_name");
        assert_eq!(camel_to_snake("HTTPServer"), "httpserver");
    }

    #[test]
    fn test_idempotent_on_snake_case() {
        for s in ["first_name", "age", "table1_name", "user_pwduser", ""] {
            assert_eq!(camel_to_snake(s), s);
            assert_eq!(camel_to_snake(&camel_to_snake(s)), camel_to_snake(s));
        }
    }
}
