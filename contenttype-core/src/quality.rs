//! Quality values (`q=`) of `Accept` media ranges.

use std::fmt;

use crate::error::{Error, Result};

/// A preference weight between 0 and 1 with at most three decimals.
///
/// Stored exactly as thousandths so comparisons never involve floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u16);

impl Quality {
    /// `q=0`, "not acceptable".
    pub const ZERO: Quality = Quality(0);

    /// `q=1`, the default.
    pub const ONE: Quality = Quality(1000);

    /// Build from thousandths; `None` above 1000.
    pub const fn from_millis(millis: u16) -> Option<Self> {
        if millis <= 1000 {
            Some(Quality(millis))
        } else {
            None
        }
    }

    pub const fn millis(self) -> u16 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn as_f32(self) -> f32 {
        f32::from(self.0) / 1000.0
    }

    /// Parse a `qvalue`: `0`, `1`, `0.` or `1.` followed by up to three
    /// digits, where every digit after `1.` must be zero.
    ///
    /// ```
    /// use contenttype_core::Quality;
    ///
    /// assert_eq!(Quality::parse("0.25").unwrap().millis(), 250);
    /// assert_eq!(Quality::parse("1.").unwrap(), Quality::ONE);
    /// assert!(Quality::parse("1.001").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.is_empty() || bytes.len() > 5 {
            return Err(Error::InvalidWeight);
        }

        let whole = match bytes[0] {
            b'0' => 0,
            b'1' => 1000,
            _ => return Err(Error::InvalidWeight),
        };

        match bytes.get(1) {
            None => return Ok(Quality(whole)),
            Some(b'.') => {}
            Some(_) => return Err(Error::InvalidWeight),
        }

        let mut millis = whole;
        let mut scale = 100;
        for &digit in &bytes[2..] {
            if !digit.is_ascii_digit() || (whole == 1000 && digit != b'0') {
                return Err(Error::InvalidWeight);
            }
            millis += u16::from(digit - b'0') * scale;
            scale /= 10;
        }

        Ok(Quality(millis))
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality::ONE
    }
}

/// Shortest `qvalue` spelling: `1`, `0`, `0.5`, `0.125`.
impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1000 => f.write_str("1"),
            0 => f.write_str("0"),
            millis => {
                let digits = format!("{:03}", millis);
                write!(f, "0.{}", digits.trim_end_matches('0'))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let cases = [
            ("0", 0),
            ("1", 1000),
            ("0.", 0),
            ("1.", 1000),
            ("0.5", 500),
            ("0.05", 50),
            ("0.001", 1),
            ("0.999", 999),
            ("1.000", 1000),
        ];
        for (input, millis) in cases {
            assert_eq!(Quality::parse(input).map(Quality::millis), Ok(millis), "{}", input);
        }
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "a", "11", "2", "1.0000", "0.0001", "1.a", "1.100", "1.001", ".5", "0,5", " 1"] {
            assert_eq!(Quality::parse(input), Err(Error::InvalidWeight), "{:?}", input);
        }
    }

    #[test]
    fn test_ordering() {
        assert!(Quality::ZERO < Quality::parse("0.001").unwrap());
        assert!(Quality::parse("0.2").unwrap() < Quality::parse("0.25").unwrap());
        assert!(Quality::parse("0.999").unwrap() < Quality::ONE);
    }

    #[test]
    fn test_display() {
        assert_eq!(Quality::ONE.to_string(), "1");
        assert_eq!(Quality::ZERO.to_string(), "0");
        assert_eq!(Quality::parse("0.50").unwrap().to_string(), "0.5");
        assert_eq!(Quality::parse("0.125").unwrap().to_string(), "0.125");
        assert_eq!(Quality::parse("0.01").unwrap().to_string(), "0.01");
    }

    #[test]
    fn test_from_millis() {
        assert_eq!(Quality::from_millis(1000), Some(Quality::ONE));
        assert_eq!(Quality::from_millis(1001), None);
        assert!((Quality::from_millis(250).unwrap().as_f32() - 0.25).abs() < f32::EPSILON);
    }
}
