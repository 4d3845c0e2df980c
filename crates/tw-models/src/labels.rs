//! Closed enumerations with canonical wire labels
//!
//! Every status/severity/priority enum serialises as a SCREAMING_SNAKE_CASE
//! label and exposes that same label to the query engine, so a filter value
//! either names a variant or matches nothing.

macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$( Self::$variant ),+];

            /// Canonical wire label
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label ),+
                }
            }

            /// Parse a label, ignoring case and space/dash/underscore differences
            pub fn from_str(s: &str) -> Option<Self> {
                let wanted = tw_core::types::normalize_label(s);
                Self::ALL.iter().copied().find(|v| v.as_str() == wanted)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use label_enum;

#[cfg(test)]
mod tests {
    use super::*;

    label_enum! {
        pub enum Sample {
            First => "FIRST",
            SecondValue => "SECOND_VALUE",
        }
    }

    #[test]
    fn test_label_roundtrip() {
        assert_eq!(Sample::from_str("second value"), Some(Sample::SecondValue));
        assert_eq!(Sample::from_str("third"), None);
        assert_eq!(Sample::First.to_string(), "FIRST");
        assert_eq!(Sample::ALL.len(), 2);
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Sample::SecondValue).unwrap();
        assert_eq!(json, "\"SECOND_VALUE\"");
        assert!(serde_json::from_str::<Sample>("\"second_value\"").is_err());
    }
}
