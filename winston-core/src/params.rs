use serde::Serialize;
use crate::error::Error;

/// Validated analysis preferences, serialized as the `/analyze` request body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AnalysisParameters {
    #[serde(rename = "BB_size")]
    pub bb_size: i64,
    #[serde(rename = "lowdensity")]
    pub low_density: bool,
    #[serde(rename = "tolerance")]
    pub tolerance_mm: i64,
}

impl AnalysisParameters {
    /// Build parameters from the raw text of the input fields.
    ///
    /// Both numeric fields must be non-empty before anything else is checked,
    /// so an empty field always reports `MissingParameters`.
    pub fn from_inputs(bb_size: &str, low_density: bool, tolerance: &str) -> Result<Self, Error> {
        if bb_size.trim().is_empty() || tolerance.trim().is_empty() {
            return Err(Error::MissingParameters);
        }
        Ok(Self {
            bb_size: parse_leading_int("BB size", bb_size)?,
            low_density,
            tolerance_mm: parse_leading_int("Tolerance", tolerance)?,
        })
    }
}

/// Parse an optional sign followed by leading digits, ignoring whatever
/// trails them ("12mm" -> 12).
fn parse_leading_int(field: &'static str, text: &str) -> Result<i64, Error> {
    let invalid = || Error::InvalidParameter { field, value: text.to_string() };
    let t = text.trim();
    let (negative, rest) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return Err(invalid());
    }
    // Only overflow can fail here: the slice is all ASCII digits.
    let magnitude: i64 = rest[..digits_end]
        .parse()
        .map_err(|_| Error::ParameterOutOfRange { field, value: text.to_string() })?;
    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tolerance_is_missing() {
        assert_eq!(
            AnalysisParameters::from_inputs("10", false, ""),
            Err(Error::MissingParameters)
        );
        assert_eq!(
            AnalysisParameters::from_inputs("  ", true, "2"),
            Err(Error::MissingParameters)
        );
    }

    #[test]
    fn valid_inputs() {
        let p = AnalysisParameters::from_inputs("10", false, "2").unwrap();
        assert_eq!(p, AnalysisParameters { bb_size: 10, low_density: false, tolerance_mm: 2 });
    }

    #[test]
    fn leading_integer_semantics() {
        let p = AnalysisParameters::from_inputs(" 8mm", true, "+3.5").unwrap();
        assert_eq!(p.bb_size, 8);
        assert_eq!(p.tolerance_mm, 3);
        assert_eq!(parse_leading_int("x", "-4").unwrap(), -4);
    }

    #[test]
    fn non_numeric_is_invalid() {
        let err = AnalysisParameters::from_inputs("abc", false, "2").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { field: "BB size", .. }));
        assert!(parse_leading_int("x", "-").is_err());
    }

    #[test]
    fn oversized_number_is_out_of_range() {
        let err = AnalysisParameters::from_inputs("99999999999999999999", false, "2").unwrap_err();
        assert_eq!(
            err,
            Error::ParameterOutOfRange { field: "BB size", value: "99999999999999999999".into() }
        );
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn request_body_uses_server_field_names() {
        let p = AnalysisParameters { bb_size: 10, low_density: false, tolerance_mm: 2 };
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json, serde_json::json!({ "BB_size": 10, "lowdensity": false, "tolerance": 2 }));
    }
}
