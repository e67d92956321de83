use crate::models::ForecastRecord;

const HEADERS: [&str; 4] = ["Location", "Min °C", "Max °C", "Description"];

/// Temperature text as a number, for display-side ordering only.
pub fn parse_temperature(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|t| t.is_finite())
}

/// Render records as a fixed-width table. `limit` of 0 prints everything.
pub fn render_table(records: &[ForecastRecord], limit: usize) -> String {
    let shown = if limit == 0 {
        records
    } else {
        &records[..limit.min(records.len())]
    };

    let rows: Vec<[&str; 4]> = shown
        .iter()
        .map(|r| {
            [
                r.location.as_str(),
                r.min_temp.as_str(),
                r.max_temp.as_str(),
                r.description.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(display_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }

    let mut table = String::new();
    push_row(&mut table, &HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    table.push_str(&rule.join("-+-"));
    table.push('\n');
    for row in &rows {
        push_row(&mut table, row, &widths);
    }

    if shown.len() < records.len() {
        table.push_str(&format!(
            "... {} more rows not shown\n",
            records.len() - shown.len()
        ));
    }

    table
}

/// One-line summary of the coldest minimum and warmest maximum.
pub fn temperature_summary(records: &[ForecastRecord]) -> Option<String> {
    let coldest = records
        .iter()
        .filter_map(|r| parse_temperature(&r.min_temp).map(|t| (t, r)))
        .min_by(|a, b| a.0.total_cmp(&b.0));
    let warmest = records
        .iter()
        .filter_map(|r| parse_temperature(&r.max_temp).map(|t| (t, r)))
        .max_by(|a, b| a.0.total_cmp(&b.0));

    match (coldest, warmest) {
        (None, None) => None,
        (coldest, warmest) => {
            let mut parts = Vec::new();
            if let Some((t, r)) = coldest {
                parts.push(format!("coldest minimum {}°C at {}", t, r.location));
            }
            if let Some((t, r)) = warmest {
                parts.push(format!("warmest maximum {}°C at {}", t, r.location));
            }
            Some(parts.join(", "))
        }
    }
}

fn push_row(table: &mut String, cells: &[&str; 4], widths: &[usize; 4]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(display_width(cell));
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    table.push_str(padded.join(" | ").trim_end());
    table.push('\n');
}

/// Terminal columns taken by `text`; CJK ideographs and full-width forms count double.
fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| match c as u32 {
            0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F | 0xFF00..=0xFF60 | 0xFFE0..=0xFFE6 => 2,
            _ => 1,
        })
        .sum()
}
