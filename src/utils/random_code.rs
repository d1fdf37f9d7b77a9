//! Human-readable document numbers.
//!
//! Numbers are date-prefixed with a random suffix; uniqueness is enforced by
//! the database and callers retry on conflict.

use chrono::NaiveDate;
use rand::Rng;

const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

fn random_suffix(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// `RCP-20250114-7KQ2MZ`
pub fn receipt_number(date: NaiveDate) -> String {
    format!("RCP-{}-{}", date.format("%Y%m%d"), random_suffix(6))
}

/// `INV-202501-4HX9T`
pub fn invoice_number(date: NaiveDate) -> String {
    format!("INV-{}-{}", date.format("%Y%m"), random_suffix(5))
}

/// `MBR-2025-P3WD`
pub fn membership_number(join_date: NaiveDate) -> String {
    format!("MBR-{}-{}", join_date.format("%Y"), random_suffix(4))
}

/// Initial admin password when none is configured: 14 characters with at
/// least one upper case letter, one lower case letter and one digit.
pub fn generate_password() -> String {
    let mut rng = rand::rng();
    let mut chars: Vec<char> = random_suffix(11).chars().collect();
    for required in [
        (b'A' + rng.random_range(0..26u8)) as char,
        (b'a' + rng.random_range(0..26u8)) as char,
        (b'2' + rng.random_range(0..8u8)) as char,
    ] {
        let at = rng.random_range(0..=chars.len());
        chars.insert(at, required);
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_password;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 14).unwrap()
    }

    #[test]
    fn test_number_formats() {
        let receipt = receipt_number(day());
        assert!(receipt.starts_with("RCP-20250114-"));
        assert_eq!(receipt.len(), "RCP-20250114-".len() + 6);

        assert!(invoice_number(day()).starts_with("INV-202501-"));
        assert!(membership_number(day()).starts_with("MBR-2025-"));
    }

    #[test]
    fn test_generated_password_passes_policy() {
        for _ in 0..50 {
            let password = generate_password();
            assert_eq!(password.len(), 14);
            assert!(validate_password(&password).is_valid, "{password}");
        }
    }
}
