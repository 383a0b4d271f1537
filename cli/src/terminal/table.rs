//! The bordered result table:
//!
//! ```text
//! +------------------+-----------+-------------------+--------------+
//! | IP Address       | Time (ms) | MAC Address       | Manufacturer |
//! +------------------+-----------+-------------------+--------------+
//! | 192.168.0.1      | 5         | AA-BB-CC-00-00-01 | Acme         |
//! +------------------+-----------+-------------------+--------------+
//! ```

use colored::*;
use sweepr_core::report::ProbeReport;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 4] = ["IP Address", "Time (ms)", "MAC Address", "Manufacturer"];
const MIN_WIDTHS: [usize; 4] = [16, 9, 17, 12];

/// Renders the ordered reports to stdout.
pub fn render(reports: &[ProbeReport]) {
    let rows: Vec<[String; 4]> = reports
        .iter()
        .map(|report| {
            [
                report.addr.to_string(),
                report.rtt_ms.to_string(),
                report.mac_display(),
                report.vendor.clone(),
            ]
        })
        .collect();

    let widths = column_widths(&rows);

    separator(&widths);
    let header_cells: Vec<String> = HEADERS
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(header, *width))
        .collect();
    println!("| {} |", header_cells.join(" | "));
    separator(&widths);

    for row in &rows {
        println!(
            "| {} | {} | {} | {} |",
            pad(&row[0], widths[0]).blue(),
            pad(&row[1], widths[1]),
            pad(&row[2], widths[2]).green(),
            pad(&row[3], widths[3]).yellow(),
        );
    }
    separator(&widths);
}

fn column_widths(rows: &[[String; 4]]) -> [usize; 4] {
    let mut widths = MIN_WIDTHS;
    for (i, header) in HEADERS.iter().enumerate() {
        widths[i] = widths[i].max(header.width());
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }
    widths
}

fn separator(widths: &[usize; 4]) {
    let segments: Vec<String> = widths.iter().map(|width| "-".repeat(width + 2)).collect();
    println!("+{}+", segments.join("+"));
}

/// Left-aligned padding by display width, so wide vendor glyphs don't shear
/// the table.
fn pad(cell: &str, width: usize) -> String {
    let padding = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(padding))
}
