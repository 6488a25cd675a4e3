//! Status code keys.
//!
//! A `responses` object in a specification is keyed either by an HTTP status
//! code or by the literal `default`. [`StatusKey`] carries both cases as a
//! tagged union so that negotiation never compares against magic integers.

use std::fmt;
use std::str::FromStr;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw representation of the `default` response slot.
///
/// Lies outside the range of real HTTP status codes.
pub const DEFAULT_STATUS_CODE: u16 = 1000;

/// Literal token used by specifications for the default response.
const DEFAULT_TOKEN: &str = "default";

/// Key of a response definition within its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKey {
    /// A concrete HTTP status code in `100..=599`.
    Code(u16),
    /// The `default` response, used when no specific status matches.
    Default,
}

/// Error returned when a raw status token cannot become a [`StatusKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusKeyError {
    /// The token is neither an integer nor `default`.
    #[error("status token '{0}' is neither an integer nor \"default\"")]
    NotAnInteger(String),

    /// The token is an integer outside the HTTP status range.
    #[error("status code {0} is outside the range 100..=599")]
    OutOfRange(i64),
}

impl StatusKey {
    /// Creates a concrete status key, checking the HTTP range.
    pub fn code(code: u16) -> Result<Self, StatusKeyError> {
        if (100..=599).contains(&code) {
            Ok(Self::Code(code))
        } else {
            Err(StatusKeyError::OutOfRange(i64::from(code)))
        }
    }

    /// Normalizes a raw status token taken from a `responses` object.
    ///
    /// Integer tokens parse directly. The literal `default`, and any integer
    /// token whose value is zero, map to [`StatusKey::Default`].
    ///
    /// Note that `"0"` and `"default"` therefore share one slot.
    ///
    /// # Example
    ///
    /// ```
    /// use mimic_core::StatusKey;
    ///
    /// assert_eq!(StatusKey::parse_token("200").unwrap(), StatusKey::Code(200));
    /// assert_eq!(StatusKey::parse_token("default").unwrap(), StatusKey::Default);
    /// assert_eq!(StatusKey::parse_token("0").unwrap(), StatusKey::Default);
    /// assert!(StatusKey::parse_token("2XX").is_err());
    /// ```
    pub fn parse_token(token: &str) -> Result<Self, StatusKeyError> {
        if token == DEFAULT_TOKEN {
            return Ok(Self::Default);
        }

        let value: i64 = token
            .parse()
            .map_err(|_| StatusKeyError::NotAnInteger(token.to_string()))?;

        if value == 0 {
            return Ok(Self::Default);
        }

        match u16::try_from(value) {
            Ok(code) if (100..=599).contains(&code) => Ok(Self::Code(code)),
            _ => Err(StatusKeyError::OutOfRange(value)),
        }
    }

    /// Returns the raw integer form, [`DEFAULT_STATUS_CODE`] for the default slot.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        match self {
            Self::Code(code) => *code,
            Self::Default => DEFAULT_STATUS_CODE,
        }
    }

    /// Returns `true` for the default slot.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Returns `true` for a concrete 2xx code.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Code(200..=299))
    }

    /// Returns the concrete HTTP status, or `None` for the default slot.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Code(code) => StatusCode::from_u16(*code).ok(),
            Self::Default => None,
        }
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Default => f.write_str(DEFAULT_TOKEN),
        }
    }
}

impl FromStr for StatusKey {
    type Err = StatusKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_token(s)
    }
}
