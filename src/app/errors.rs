//! User-facing error taxonomy of the calculator. Every failure of a
//! submission maps to one of three message classes; which class tells
//! the user which validation stage failed.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum CalcError {
    /// The expression is empty, unparseable or uses a name outside the
    /// allow-list. Nothing downstream runs.
    InvalidFunction(String),
    /// A limit is missing, non-numeric, non-finite or the pair is not
    /// strictly increasing. Nothing downstream runs.
    InvalidLimits(String),
    /// Quadrature or rendering failed; carries the underlying reason.
    Calculation(String),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::InvalidFunction(msg) => {
                write!(f, "Error: Invalid mathematical expression: {}", msg)
            }
            CalcError::InvalidLimits(msg) => {
                write!(f, "Error: Invalid integration limits: {}", msg)
            }
            CalcError::Calculation(msg) => write!(f, "Error: Calculation failed: {}", msg),
        }
    }
}

impl std::error::Error for CalcError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_classes() {
        let parse = CalcError::InvalidFunction("cannot parse 'x +'".to_string());
        assert!(format!("{}", parse).starts_with("Error: Invalid mathematical expression:"));

        let limits = CalcError::InvalidLimits("'abc' is not a number".to_string());
        assert!(format!("{}", limits).starts_with("Error: Invalid integration limits:"));

        let calc = CalcError::Calculation("the integral estimate is not a finite number".into());
        assert!(format!("{}", calc).starts_with("Error: Calculation failed:"));
    }
}
