use winston_core::results::{cell, ResultRow};

/// Plain-text results table, one line per image in render order.
pub fn format_table(rows: &[ResultRow], show_names: bool) -> String {
    let mut header = vec!["Image"];
    if show_names {
        header.push("File Name");
    }
    header.extend(["Gantry", "Coll", "Table", "\u{2206} (mm)", "Status"]);

    let lines: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            let mut line = vec![r.image_key.clone()];
            if show_names {
                line.push(r.display_name.clone().unwrap_or_default());
            }
            line.extend([
                cell(r.gantry),
                cell(r.collimator),
                cell(r.table),
                r.cax_to_bb_mm.to_string(),
                r.status.label().to_string(),
            ]);
            line
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for line in &lines {
        for (w, v) in widths.iter_mut().zip(line) {
            *w = (*w).max(v.chars().count());
        }
    }

    let render = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<w$}", v, w = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = header.into_iter().map(String::from).collect();
    let mut out = render(&header);
    out.push('\n');
    for line in &lines {
        out.push_str(&render(line));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use winston_core::results::AnalysisResult;

    #[test]
    fn rows_print_in_numeric_order_with_status() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"caxtobb_dict": {"image10": 0.2, "image2": 3.0, "image1": 1.5}}"#,
        )
        .unwrap();
        let text = format_table(&result.rows(2.0), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Image"));
        assert!(lines[1].starts_with("image1 ") && lines[1].ends_with("Pass"));
        assert!(lines[2].starts_with("image2 ") && lines[2].ends_with("Fail"));
        assert!(lines[3].starts_with("image10") && lines[3].ends_with("Pass"));
    }

    #[test]
    fn name_column_only_when_requested() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"caxtobb_dict": {"image1": 0.5}, "names_dict": {"image1": "a.dcm"}}"#,
        )
        .unwrap();
        assert!(format_table(&result.rows(1.0), true).contains("a.dcm"));
        assert!(!format_table(&result.rows(1.0), false).contains("File Name"));
    }
}
