//! Shaping the `/analyze` response into table rows.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use serde::Deserialize;

/// Successful `/analyze` response body.
///
/// Angle tables are keyed by the server's original image key; the distance
/// and name tables by the short `imageN` key. `key_mapping` links the two.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub results: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub gantry_dict: HashMap<String, f64>,
    #[serde(default)]
    pub collimator_dict: HashMap<String, f64>,
    #[serde(default)]
    pub table_dict: HashMap<String, f64>,
    pub caxtobb_dict: HashMap<String, f64>,
    #[serde(default)]
    pub names_dict: Option<HashMap<String, String>>,
    #[serde(default)]
    pub key_mapping: HashMap<String, String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    /// Pass when the measured distance is within tolerance, boundary included.
    pub fn evaluate(cax_to_bb_mm: f64, tolerance_mm: f64) -> Self {
        if cax_to_bb_mm <= tolerance_mm {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Pass => "green",
            Self::Fail => "red",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultRow {
    pub image_key: String,
    pub display_name: Option<String>,
    pub gantry: Option<f64>,
    pub collimator: Option<f64>,
    pub table: Option<f64>,
    pub cax_to_bb_mm: f64,
    pub status: Status,
}

/// Integer formed by the trailing digits of `key` ("image12" -> 12).
pub fn trailing_number(key: &str) -> Option<u64> {
    let digits_start = key
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    key[digits_start..].parse().ok()
}

/// Numbered keys ascend by number; unnumbered keys follow, lexicographically.
fn compare_image_keys(a: &str, b: &str) -> Ordering {
    match (trailing_number(a), trailing_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

pub fn sort_image_keys<S: AsRef<str>>(keys: &mut [S]) {
    keys.sort_by(|a, b| compare_image_keys(a.as_ref(), b.as_ref()));
}

impl AnalysisResult {
    pub fn has_names(&self) -> bool {
        self.names_dict.is_some()
    }

    /// Rows in render order with pass/fail evaluated against `tolerance_mm`.
    pub fn rows(&self, tolerance_mm: f64) -> Vec<ResultRow> {
        let mut keys: Vec<&String> = self.caxtobb_dict.keys().collect();
        sort_image_keys(&mut keys);

        keys.into_iter()
            .map(|key| {
                let cax_to_bb_mm = self.caxtobb_dict[key];
                let original = self.key_mapping.get(key);
                let angle = |table: &HashMap<String, f64>| original.and_then(|k| table.get(k)).copied();
                ResultRow {
                    image_key: key.clone(),
                    display_name: self
                        .names_dict
                        .as_ref()
                        .and_then(|names| names.get(key))
                        .cloned(),
                    gantry: angle(&self.gantry_dict),
                    collimator: angle(&self.collimator_dict),
                    table: angle(&self.table_dict),
                    cax_to_bb_mm,
                    status: Status::evaluate(cax_to_bb_mm, tolerance_mm),
                }
            })
            .collect()
    }

    /// Summary values as display text, in key order.
    pub fn summary(&self) -> Vec<(String, String)> {
        self.results
            .iter()
            .filter(|(_, v)| !v.is_object() && !v.is_array())
            .map(|(k, v)| {
                let text = match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), text)
            })
            .collect()
    }
}

/// Display text for an optional table cell.
pub fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "\u{2014}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisResult {
        serde_json::from_str(
            r#"{
                "results": {"num_total_images": 2, "max_2d_cax_to_bb_mm": "3.00", "keyed_image_details": {}},
                "gantry_dict": {"G0B0P0": 0, "G90B0P0": 90},
                "collimator_dict": {"G0B0P0": 0, "G90B0P0": 0},
                "table_dict": {"G0B0P0": 0, "G90B0P0": 0},
                "caxtobb_dict": {"image2": 3.0, "image1": 1.5},
                "names_dict": {"image1": "a.dcm", "image2": "b.dcm"},
                "key_mapping": {"image1": "G0B0P0", "image2": "G90B0P0"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn numeric_suffix_ordering() {
        let mut keys = vec!["image2", "image10", "image1"];
        sort_image_keys(&mut keys);
        assert_eq!(keys, ["image1", "image2", "image10"]);
    }

    #[test]
    fn unnumbered_keys_sort_last() {
        let mut keys = vec!["extra", "image3", "alpha", "image02", "image2"];
        sort_image_keys(&mut keys);
        assert_eq!(keys, ["image02", "image2", "image3", "alpha", "extra"]);
    }

    #[test]
    fn trailing_number_extraction() {
        assert_eq!(trailing_number("image10"), Some(10));
        assert_eq!(trailing_number("7"), Some(7));
        assert_eq!(trailing_number("image"), None);
        assert_eq!(trailing_number(""), None);
    }

    #[test]
    fn status_boundary_is_pass() {
        assert_eq!(Status::evaluate(2.0, 2.0), Status::Pass);
        assert_eq!(Status::evaluate(2.0001, 2.0), Status::Fail);
        assert_eq!(Status::evaluate(0.0, 0.0), Status::Pass);
        assert_eq!(Status::evaluate(-1.0, 0.0), Status::Pass);
    }

    #[test]
    fn two_image_scenario() {
        let rows = sample().rows(2.0);
        let summary: Vec<_> = rows.iter().map(|r| (r.image_key.as_str(), r.status)).collect();
        assert_eq!(summary, [("image1", Status::Pass), ("image2", Status::Fail)]);
        assert_eq!(rows[1].gantry, Some(90.0));
        assert_eq!(rows[0].display_name.as_deref(), Some("a.dcm"));
    }

    #[test]
    fn missing_mapping_leaves_angles_empty() {
        let mut result = sample();
        result.key_mapping.remove("image2");
        result.names_dict = None;
        let rows = result.rows(5.0);
        assert_eq!(rows[1].gantry, None);
        assert_eq!(rows[1].display_name, None);
        assert_eq!(cell(rows[1].table), "\u{2014}");
        assert_eq!(cell(rows[0].gantry), "0");
    }

    #[test]
    fn summary_skips_nested_values() {
        let summary = sample().summary();
        assert_eq!(
            summary,
            [
                ("max_2d_cax_to_bb_mm".to_string(), "3.00".to_string()),
                ("num_total_images".to_string(), "2".to_string()),
            ]
        );
    }
}
