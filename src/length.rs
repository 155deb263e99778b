// src/length.rs

use crate::error::{Error, Result};
use crate::units;

/// Splits `"2.54cm"` into `(2.54, "cm")`.
///
/// The numeric part is the leading run of an optional sign followed by digits
/// and decimal points. Without a numeric part the coefficient is 1.0, so
/// `"tex_letter_width"` means one text width.
pub fn split_num_unit(input: &str) -> Result<(f64, &str)> {
    let mut split = 0;
    for (i, ch) in input.char_indices() {
        let is_sign = i == 0 && (ch == '-' || ch == '+');
        if is_sign || ch.is_ascii_digit() || ch == '.' {
            split = i + ch.len_utf8();
        } else {
            break;
        }
    }
    let (prefix, unit) = input.split_at(split);
    if prefix.is_empty() {
        return Ok((1.0, unit));
    }
    let num = prefix.parse::<f64>().map_err(|_| Error::InvalidLength {
        input: input.to_string(),
        prefix: prefix.to_string(),
    })?;
    Ok((num, unit))
}

/// Converts a `NUMUNIT` string to inches, e.g. `len2inch("2.54cm") == 1.0`.
///
/// A string without a unit (`"12"`) is rejected: the empty key is not a unit.
pub fn len2inch(input: &str) -> Result<f64> {
    let (num, unit) = split_num_unit(input.trim())?;
    let per_unit = units::inches_per(unit).ok_or_else(|| Error::UnknownUnit {
        input: input.to_string(),
        unit: unit.to_string(),
    })?;
    Ok(num * per_unit)
}

/// A figure dimension: left to the size calculator, given in inches, or given
/// as a length string resolved through the unit table.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dim {
    #[default]
    Default,
    Inches(f64),
    Length(String),
}

impl Dim {
    pub fn is_default(&self) -> bool {
        matches!(self, Dim::Default)
    }

    /// `None` for `Dim::Default`.
    pub fn to_inches(&self) -> Result<Option<f64>> {
        match self {
            Dim::Default => Ok(None),
            Dim::Inches(v) => Ok(Some(*v)),
            Dim::Length(s) => len2inch(s).map(Some),
        }
    }
}

impl From<f64> for Dim {
    fn from(v: f64) -> Self {
        Dim::Inches(v)
    }
}

impl From<&str> for Dim {
    fn from(s: &str) -> Self {
        Dim::Length(s.to_string())
    }
}

impl From<String> for Dim {
    fn from(s: String) -> Self {
        Dim::Length(s)
    }
}

impl<T: Into<Dim>> From<Option<T>> for Dim {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UNITS;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_split_num_unit() {
        assert_eq!(split_num_unit("2.54cm").unwrap(), (2.54, "cm"));
        assert_eq!(split_num_unit("-3in").unwrap(), (-3.0, "in"));
        assert_eq!(split_num_unit("pt").unwrap(), (1.0, "pt"));
        assert_eq!(split_num_unit("12").unwrap(), (12.0, ""));
    }

    #[test]
    fn test_len2inch_every_unit() {
        for u in UNITS {
            for c in [0.5, 1.0, 2.0, 17.25] {
                let got = len2inch(&format!("{c}{}", u.name)).unwrap();
                assert!(close(got, c * u.inches), "{c}{}", u.name);
            }
            // Omitting the coefficient is the same as 1.
            assert!(close(len2inch(u.name).unwrap(), u.inches));
        }
    }

    #[test]
    fn test_len2inch_examples() {
        assert!(close(len2inch("2.54cm").unwrap(), 1.0));
        assert!(close(len2inch("15pt").unwrap(), 15.0 / 72.27));
        assert!(close(len2inch("0.5tex_letter_width").unwrap(), 0.5 * 4.77376504773765));
    }

    #[test]
    fn test_unknown_units_fail() {
        for bad in ["3furlong", "12", "", "cmx", "2 cm"] {
            match len2inch(bad) {
                Err(Error::UnknownUnit { .. }) => {}
                other => panic!("expected unknown unit for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_bad_numeric_prefix() {
        assert!(matches!(len2inch("1.2.3cm"), Err(Error::InvalidLength { .. })));
        assert!(matches!(len2inch("-cm"), Err(Error::InvalidLength { .. })));
    }

    #[test]
    fn test_dim_conversions() {
        assert_eq!(Dim::from(2.0).to_inches().unwrap(), Some(2.0));
        assert_eq!(Dim::from("1in").to_inches().unwrap(), Some(1.0));
        assert_eq!(Dim::from(None::<f64>).to_inches().unwrap(), None);
        assert!(Dim::default().is_default());
    }
}
