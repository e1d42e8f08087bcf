//! Input formats accepted at sign-in and vehicle registration.

use regex::Regex;
use std::sync::LazyLock;

static MOBILE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("Invalid regex"));

// Indian plates, e.g. "MH 01 AB 1234", "KA-05-M-42", "DL3CA1234"
static REGISTRATION_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z]{2}[\s-]?[0-9]{1,2}[\s-]?[A-Z]{1,2}[\s-]?[0-9]{1,4}$")
        .expect("Invalid regex")
});

pub fn is_valid_mobile_number(input: &str) -> bool {
    MOBILE_NUMBER.is_match(input)
}

pub fn is_valid_registration_number(input: &str) -> bool {
    REGISTRATION_NUMBER.is_match(input.trim())
}

/// Trimmed and upper-cased, the form plates are stored in.
pub fn normalize_registration_number(input: &str) -> String {
    input.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_numbers() {
        assert!(is_valid_mobile_number("9876543210"));
        assert!(is_valid_mobile_number("+919876543210"));
        assert!(!is_valid_mobile_number("98765"));
        assert!(!is_valid_mobile_number("98765 43210"));
        assert!(!is_valid_mobile_number("+91-9876543210"));
    }

    #[test]
    fn registration_numbers() {
        for plate in ["MH 01 AB 1234", "ka-05-m-42", "DL3CA1234", " MH12DE1433 "] {
            assert!(is_valid_registration_number(plate), "{plate}");
        }
        for plate in ["", "MH", "1234 AB", "MH 01 ABC 1234", "MH 01 AB 12345"] {
            assert!(!is_valid_registration_number(plate), "{plate}");
        }
        assert_eq!(normalize_registration_number(" ka-05-m-42 "), "KA-05-M-42");
    }
}
