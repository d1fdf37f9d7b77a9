use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_str_enum;

define_str_enum!(
    /// How a stored setting value is interpreted
    SettingValueType, "../frontend/src/types/generated/system.ts" {
        String => "string",
        Integer => "integer",
        Decimal => "decimal",
        Boolean => "boolean",
        JsonArray => "json_array",
    }
);

impl SettingValueType {
    /// Checks that `value` parses as this type.
    pub fn validate(&self, value: &str) -> Result<(), String> {
        match self {
            SettingValueType::String => Ok(()),
            SettingValueType::Integer => value
                .trim()
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| format!("'{value}' is not an integer")),
            SettingValueType::Decimal => value
                .trim()
                .parse::<Decimal>()
                .map(|_| ())
                .map_err(|_| format!("'{value}' is not a decimal number")),
            SettingValueType::Boolean => match value.trim() {
                "true" | "false" => Ok(()),
                _ => Err(format!("'{value}' is not a boolean")),
            },
            SettingValueType::JsonArray => serde_json::from_str::<Vec<serde_json::Value>>(value)
                .map(|_| ())
                .map_err(|_| format!("'{value}' is not a JSON array")),
        }
    }
}

/// Settings editable at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownSettingKey {
    CooperativeName,
    CooperativeAddress,
    CooperativePhone,
    CooperativeEmail,
    Currency,
    DefaultTaxRate,
    RetainedEarningsPercentage,
    AccessTokenExpiry,
    RefreshTokenExpiry,
    ReminderPaymentDays,
    ReminderOverdueDays,
}

impl KnownSettingKey {
    pub const ALL: &'static [KnownSettingKey] = &[
        KnownSettingKey::CooperativeName,
        KnownSettingKey::CooperativeAddress,
        KnownSettingKey::CooperativePhone,
        KnownSettingKey::CooperativeEmail,
        KnownSettingKey::Currency,
        KnownSettingKey::DefaultTaxRate,
        KnownSettingKey::RetainedEarningsPercentage,
        KnownSettingKey::AccessTokenExpiry,
        KnownSettingKey::RefreshTokenExpiry,
        KnownSettingKey::ReminderPaymentDays,
        KnownSettingKey::ReminderOverdueDays,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KnownSettingKey::CooperativeName => "cooperative.name",
            KnownSettingKey::CooperativeAddress => "cooperative.address",
            KnownSettingKey::CooperativePhone => "cooperative.phone",
            KnownSettingKey::CooperativeEmail => "cooperative.email",
            KnownSettingKey::Currency => "finance.currency",
            KnownSettingKey::DefaultTaxRate => "finance.default_tax_rate",
            KnownSettingKey::RetainedEarningsPercentage => "finance.retained_earnings_percentage",
            KnownSettingKey::AccessTokenExpiry => "jwt.access_token_expiry",
            KnownSettingKey::RefreshTokenExpiry => "jwt.refresh_token_expiry",
            KnownSettingKey::ReminderPaymentDays => "reminders.payment_days",
            KnownSettingKey::ReminderOverdueDays => "reminders.overdue_days",
        }
    }

    pub fn value_type(&self) -> SettingValueType {
        match self {
            KnownSettingKey::CooperativeName
            | KnownSettingKey::CooperativeAddress
            | KnownSettingKey::CooperativePhone
            | KnownSettingKey::CooperativeEmail
            | KnownSettingKey::Currency => SettingValueType::String,
            KnownSettingKey::DefaultTaxRate | KnownSettingKey::RetainedEarningsPercentage => {
                SettingValueType::Decimal
            }
            KnownSettingKey::AccessTokenExpiry | KnownSettingKey::RefreshTokenExpiry => {
                SettingValueType::Integer
            }
            KnownSettingKey::ReminderPaymentDays | KnownSettingKey::ReminderOverdueDays => {
                SettingValueType::JsonArray
            }
        }
    }

    /// Type check plus the range rules of the individual key.
    pub fn validate(&self, value: &str) -> Result<(), String> {
        self.value_type().validate(value)?;
        match self {
            KnownSettingKey::DefaultTaxRate | KnownSettingKey::RetainedEarningsPercentage => {
                let pct: Decimal = value.trim().parse().map_err(|_| "invalid decimal")?;
                if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
                    return Err(format!("{} must be between 0 and 100", self.as_str()));
                }
            }
            KnownSettingKey::AccessTokenExpiry | KnownSettingKey::RefreshTokenExpiry => {
                let n: i64 = value.trim().parse().map_err(|_| "invalid integer")?;
                if n <= 0 {
                    return Err(format!("{} must be positive", self.as_str()));
                }
            }
            KnownSettingKey::ReminderPaymentDays | KnownSettingKey::ReminderOverdueDays => {
                let days: Vec<i64> = serde_json::from_str(value)
                    .map_err(|_| format!("{} must be a list of day counts", self.as_str()))?;
                if days.iter().any(|d| *d < 0) {
                    return Err(format!("{} cannot contain negative days", self.as_str()));
                }
            }
            KnownSettingKey::Currency | KnownSettingKey::CooperativeName => {
                if value.trim().is_empty() {
                    return Err(format!("{} cannot be empty", self.as_str()));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl std::str::FromStr for KnownSettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnownSettingKey::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown setting key: {s}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
    pub value_type: SettingValueType,
    pub description: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub updated_by: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SettingAudit {
    pub id: i64,
    pub setting_key: String,
    pub old_value: Option<String>,
    pub new_value: String,
    pub changed_by: i64,
    pub changed_at: chrono::DateTime<chrono::Utc>,
    pub ip_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_lookup() {
        let key: KnownSettingKey = "finance.retained_earnings_percentage".parse().unwrap();
        assert_eq!(key, KnownSettingKey::RetainedEarningsPercentage);
        assert_eq!(key.value_type(), SettingValueType::Decimal);
        assert!("upload.max_size".parse::<KnownSettingKey>().is_err());
    }

    #[test]
    fn test_value_validation() {
        assert!(KnownSettingKey::DefaultTaxRate.validate("12.5").is_ok());
        assert!(KnownSettingKey::DefaultTaxRate.validate("101").is_err());
        assert!(KnownSettingKey::DefaultTaxRate.validate("ten").is_err());
        assert!(KnownSettingKey::AccessTokenExpiry.validate("0").is_err());
        assert!(KnownSettingKey::ReminderPaymentDays.validate("[7, 3, 1]").is_ok());
        assert!(KnownSettingKey::ReminderPaymentDays.validate("[\"a\"]").is_err());
        assert!(KnownSettingKey::Currency.validate(" ").is_err());
        assert!(KnownSettingKey::CooperativeAddress.validate("").is_ok());
    }

    #[test]
    fn test_boolean_type() {
        assert!(SettingValueType::Boolean.validate("true").is_ok());
        assert!(SettingValueType::Boolean.validate("yes").is_err());
    }
}
