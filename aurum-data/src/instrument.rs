use derive_more::Display;
use serde::{Deserialize, Serialize};
use smol_str::{SmolStr, StrExt};
use std::borrow::Borrow;

/// Exchange `SmolStr` representation of an instrument symbol, eg/ "XAUUSDT".
///
/// Binance symbols are upper case, so names are normalised on construction.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Display)]
pub struct InstrumentName(SmolStr);

impl InstrumentName {
    pub fn new<S>(name: S) -> Self
    where
        S: Into<SmolStr>,
    {
        let name = name.into();
        if name.chars().any(char::is_lowercase) {
            Self(name.to_uppercase_smolstr())
        } else {
            Self(name)
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.0
    }
}

impl From<&str> for InstrumentName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Borrow<str> for InstrumentName {
    fn borrow(&self) -> &str {
        self.0.borrow()
    }
}

impl AsRef<str> for InstrumentName {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl<'de> Deserialize<'de> for InstrumentName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let name = <&str>::deserialize(deserializer)?;
        Ok(InstrumentName::new(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_name_new() {
        struct TestCase {
            input: &'static str,
            expected: &'static str,
        }

        let tests = vec![
            TestCase {
                // TC0: already upper case
                input: "XAUUSDT",
                expected: "XAUUSDT",
            },
            TestCase {
                // TC1: lower case is normalised
                input: "xauusdt",
                expected: "XAUUSDT",
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = InstrumentName::new(test.input);
            assert_eq!(actual.as_ref(), test.expected, "TC{} failed", index);
        }
    }
}
