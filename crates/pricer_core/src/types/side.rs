//! Option side (call or put).

use std::fmt;
use std::str::FromStr;

use super::error::PricingError;

/// Side of a vanilla European option.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
///
/// assert!(OptionSide::Call.is_call());
/// assert_eq!(OptionSide::Call.opposite(), OptionSide::Put);
/// assert_eq!("CALL".parse::<OptionSide>().unwrap(), OptionSide::Call);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionSide {
    /// Right to buy the underlying at the strike.
    #[default]
    Call,
    /// Right to sell the underlying at the strike.
    Put,
}

impl OptionSide {
    /// Payoff direction: +1 for call, -1 for put.
    #[inline]
    pub fn phi(&self) -> f64 {
        match self {
            OptionSide::Call => 1.0,
            OptionSide::Put => -1.0,
        }
    }

    /// Returns true for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionSide::Call)
    }

    /// Returns true for a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionSide::Put)
    }

    /// The other side of the same strike.
    #[inline]
    pub fn opposite(&self) -> Self {
        match self {
            OptionSide::Call => OptionSide::Put,
            OptionSide::Put => OptionSide::Call,
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionSide::Call => "call",
            OptionSide::Put => "put",
        }
    }
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionSide {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionSide::Call),
            "put" | "p" => Ok(OptionSide::Put),
            other => Err(PricingError::InvalidInput(format!(
                "Unknown option side: {}. Supported: call, put",
                other
            ))),
        }
    }
}
