use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CepError;

/// Brazilian postal code used as the race lookup key.
///
/// Stored in normalized form: exactly eight ASCII digits, no separator.
/// The race coordinator never looks inside; only adapters do, when they
/// build their request URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cep(String);

impl Cep {
    /// Number of digits in a CEP.
    pub const LEN: usize = 8;

    /// Parse and normalize a CEP.
    ///
    /// Accepts `"01001000"` and `"01001-000"`; surrounding whitespace is
    /// ignored.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the input is not eight digits with an optional
    /// hyphen after the fifth one.
    pub fn parse(raw: &str) -> Result<Self, CepError> {
        let trimmed = raw.trim();
        let digits: String = match trimmed.split_once('-') {
            Some((head, tail)) if head.len() == 5 && tail.len() == 3 => format!("{head}{tail}"),
            Some(_) => return Err(Self::invalid(raw)),
            None => trimmed.to_string(),
        };
        if digits.len() != Self::LEN || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Self::invalid(raw));
        }
        Ok(Self(digits))
    }

    /// Wrap a key without validation.
    ///
    /// Use this for opaque keys handed to providers that accept other formats.
    pub fn new_unchecked(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Normalized key as sent to providers.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Conventional `NNNNN-NNN` rendering; unchecked keys are returned as-is.
    #[must_use]
    pub fn formatted(&self) -> String {
        if self.0.len() == Self::LEN && self.0.is_ascii() {
            format!("{}-{}", &self.0[..5], &self.0[5..])
        } else {
            self.0.clone()
        }
    }

    fn invalid(raw: &str) -> CepError {
        CepError::InvalidArg(format!("invalid CEP {raw:?}: expected 8 digits"))
    }
}

impl FromStr for Cep {
    type Err = CepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cep {
    type Error = CepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cep> for String {
    fn from(cep: Cep) -> Self {
        cep.0
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Cep {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
