use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// Optional +, optional leading 1, then 9 to 15 digits
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?1?\d{9,15}$").expect("Invalid phone regex"));

// Also used as the PDF file name, so no separators or quotes
static INVOICE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("Invalid invoice number regex"));

const WEAK_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "abcd1234",
    "welcome1",
];

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username may only contain letters, digits, dots, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// Spaces, dashes and parentheses are ignored.
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let compact: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    if !PHONE_RE.is_match(&compact) {
        return Err("Phone number must contain 9 to 15 digits, optionally prefixed with +");
    }
    Ok(())
}

pub fn validate_invoice_number(number: &str) -> Result<(), &'static str> {
    if !INVOICE_NUMBER_RE.is_match(number) {
        return Err("Invoice number may only contain letters, digits, underscores or hyphens (max 64)");
    }
    Ok(())
}

/// Inclusive 0..=100.
pub fn validate_percentage(value: Decimal, field: &str) -> Result<(), String> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(format!("{field} must be between 0 and 100"));
    }
    Ok(())
}

pub fn validate_positive_amount(value: Decimal, field: &str) -> Result<(), String> {
    if value <= Decimal::ZERO {
        return Err(format!("{field} must be greater than 0"));
    }
    Ok(())
}

pub fn validate_non_negative_amount(value: Decimal, field: &str) -> Result<(), String> {
    if value < Decimal::ZERO {
        return Err(format!("{field} must not be negative"));
    }
    Ok(())
}

pub fn validate_required(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// At least 8 characters with upper case, lower case and a digit, and not on
/// the common-password list.
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }
    if WEAK_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_invoice_number() {
        assert!(validate_invoice_number("INV-202501-0042").is_ok());
        assert!(validate_invoice_number("coop_2025_7").is_ok());
        assert!(validate_invoice_number("").is_err());
        assert!(validate_invoice_number("../../etc/passwd").is_err());
        assert!(validate_invoice_number("INV/2025/1").is_err());
        assert!(validate_invoice_number("INV\"x").is_err());
        assert!(validate_invoice_number("INV\r\n1").is_err());
        assert!(validate_invoice_number(&"9".repeat(65)).is_err());
    }

    #[test]
    fn test_phone_numbers() {
        assert!(validate_phone("+212612345678").is_ok());
        assert!(validate_phone("0612345678").is_ok());
        assert!(validate_phone("06 12-34 56 78").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("+21261234567890123").is_err());
        assert!(validate_phone("06abc45678").is_err());
    }

    #[test]
    fn test_emails_and_usernames() {
        assert!(validate_email("parent@example.ma").is_ok());
        assert!(validate_email("parent@example").is_err());
        assert!(validate_username("j.doe").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_amount_rules() {
        assert!(validate_percentage(Decimal::ZERO, "share").is_ok());
        assert!(validate_percentage(Decimal::ONE_HUNDRED, "share").is_ok());
        assert!(validate_percentage(Decimal::new(10001, 2), "share").is_err());
        assert!(validate_positive_amount(Decimal::ZERO, "amount").is_err());
        assert!(validate_non_negative_amount(Decimal::ZERO, "discount").is_ok());
        assert_eq!(
            validate_required("  ", "full_name").unwrap_err(),
            "full_name is required"
        );
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Cooperative2025").is_valid);

        let short = validate_password("Ab1");
        assert!(!short.is_valid);
        assert!(
            short
                .errors
                .contains(&"Password must be at least 8 characters long")
        );

        let lower_only = validate_password("abcdefgh1");
        assert!(
            lower_only
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );

        let common = validate_password("Password1");
        assert!(
            common
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
