//! Phone contact validation
//!
//! Contacts are Egyptian mobile numbers in international form,
//! e.g. `+201009129288`: a leading '+' followed by 12 digits.

/// Expected total length: '+' sign plus 12 digits.
const CONTACT_FIXED_LENGTH: usize = 13;

/// Check whether a contact string is a deliverable SMS address.
///
/// All three must hold: the string contains the `+20` country-code marker
/// and ends in a digit, every character after position 0 is a digit, and
/// the total length is exactly 13. Never panics on any input.
pub fn is_valid_contact(contact: &str) -> bool {
    let has_marker = contact.contains("+20");
    let ends_in_digit = contact
        .chars()
        .last()
        .map(|c| c.is_ascii_digit())
        .unwrap_or(false);
    let all_digits_after_sign = contact.len() > 1
        && contact.chars().skip(1).all(|c| c.is_ascii_digit());
    let valid_length = contact.chars().count() == CONTACT_FIXED_LENGTH;

    has_marker && ends_in_digit && all_digits_after_sign && valid_length
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_contact() {
        assert!(is_valid_contact("+201009129288"));
        assert!(is_valid_contact("+200000000000"));
    }

    #[test]
    fn test_missing_plus_sign() {
        // right digits, wrong length and no '+20' at the front
        assert!(!is_valid_contact("01009129288"));
    }

    #[test]
    fn test_wrong_length() {
        assert!(!is_valid_contact("+2010091292"));
        assert!(!is_valid_contact("+2010091292881"));
    }

    #[test]
    fn test_wrong_country_code() {
        assert!(!is_valid_contact("+211009129288"));
    }

    #[test]
    fn test_non_numeric() {
        assert!(!is_valid_contact("+20100912928a"));
        assert!(!is_valid_contact("+20100x129288"));
    }

    #[test]
    fn test_must_end_in_digit() {
        assert!(!is_valid_contact("+20100912928+"));
    }

    #[test]
    fn test_empty_and_degenerate_input() {
        assert!(!is_valid_contact(""));
        assert!(!is_valid_contact("+"));
        assert!(!is_valid_contact("+20"));
    }
}
