//! Enums stored as lowercase strings in the database and on the wire.

/// Declares a string-backed enum with `Display`, `FromStr`, serde and ts-rs support.
///
/// ```rust,ignore
/// define_str_enum!(CourseStatus, "../frontend/src/types/generated/course.ts" {
///     Pending => "pending",
///     Active => "active",
/// });
/// ```
#[macro_export]
macro_rules! define_str_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $ts_path:tt {
            $($variant:ident => $value:tt),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, ts_rs::TS)]
        #[ts(export, export_to = $ts_path)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            pub fn accepted_values() -> String {
                [$($value),+].join(", ")
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!(
                        "Invalid {}: '{}'. Accepted values: {}",
                        stringify!($name),
                        s,
                        Self::accepted_values()
                    )),
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::models::payments::entities::PaymentStatus;

    #[test]
    fn test_round_trip_through_strings() {
        assert_eq!(PaymentStatus::PartiallyPaid.to_string(), "partially_paid");
        assert_eq!("paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::ALL.len(), 6);
    }

    #[test]
    fn test_rejects_unknown_values() {
        let err = "settled".parse::<PaymentStatus>().unwrap_err();
        assert!(err.contains("pending, paid, partially_paid"));
        assert!(serde_json::from_str::<PaymentStatus>("\"PAID\"").is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::PartiallyPaid).unwrap(),
            "\"partially_paid\""
        );
        let parsed: PaymentStatus = serde_json::from_str("\"overdue\"").unwrap();
        assert_eq!(parsed, PaymentStatus::Overdue);
    }
}
