//! Closed vocabularies with human-readable labels.
//!
//! Every status, category and mode in HMS is stored and transmitted by its
//! display label (`"Under Observation"`, `"In-person"`). Parsing is lenient on
//! case and separators so CLI input like `on-leave` resolves to `On Leave`.

/// Lowercase alphanumerics only, for separator-insensitive comparison.
pub(crate) fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! labeled_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Display label.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Parse from a label, ignoring case, spaces, dashes and underscores.
            pub fn parse(s: &str) -> Option<Self> {
                let wanted = $crate::labels::normalize(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| $crate::labels::normalize(v.as_str()) == wanted)
            }

            /// Parse user input, failing with a validation error that lists valid values.
            pub fn parse_input(s: &str) -> $crate::error::HmsResult<Self> {
                Self::parse(s).ok_or_else(|| {
                    let valid: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                    $crate::error::HmsError::validation(format!(
                        "Invalid {} '{}'. Valid values: {}",
                        $field,
                        s,
                        valid.join(", ")
                    ))
                })
            }

            /// Parse a stored label; a mismatch means the record is corrupt.
            pub(crate) fn from_stored(s: &str) -> $crate::error::HmsResult<Self> {
                Self::parse(s).ok_or_else(|| {
                    $crate::error::HmsError::CorruptRecord(format!("unknown {} '{}'", $field, s))
                })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use labeled_enum;

labeled_enum! {
    /// Patient gender.
    Gender, "gender" {
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
}

labeled_enum! {
    /// Hospital department.
    Department, "department" {
        Cardiology => "Cardiology",
        Neurology => "Neurology",
        Pediatrics => "Pediatrics",
        Orthopedics => "Orthopedics",
        General => "General",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse("  MALE "), Some(Gender::Male));
        assert_eq!(Department::parse("orthopedics"), Some(Department::Orthopedics));
        assert_eq!(Department::parse("Dermatology"), None);
    }

    #[test]
    fn test_parse_input_lists_valid_values() {
        let err = Gender::parse_input("x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Invalid gender 'x'. Valid values: Male, Female, Other"
        );
    }

    #[test]
    fn test_serde_uses_label() {
        assert_eq!(serde_json::to_string(&Department::General).unwrap(), "\"General\"");
        let g: Gender = serde_json::from_str("\"Other\"").unwrap();
        assert_eq!(g, Gender::Other);
    }

    #[test]
    fn test_corrupt_label() {
        assert!(matches!(
            Gender::from_stored("Robot"),
            Err(crate::error::HmsError::CorruptRecord(_))
        ));
    }
}
