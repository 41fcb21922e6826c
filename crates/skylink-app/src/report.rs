//! Frame report summaries for the log.

use tracing::{debug, info, warn};

use skylink_core::enums::AlertLevel;
use skylink_core::state::{AntennaStatusRow, FrameReport};

const HEADER: [&str; 8] = ["ANTENNA", "STATE", "TYPE", "BAND", "LOS", "LOCKED", "ZONE", "POSITION"];

/// Log one frame. The status table is logged every `status_interval` ticks
/// (never when zero).
pub fn summarize(report: &FrameReport, status_interval: u64) {
    debug!(
        "tick {} progress {:.3}: {} links, {} events",
        report.time.tick,
        report.progress,
        report.lines.len(),
        report.events.len()
    );
    for line in &report.lines {
        debug!(
            "  {} <- {} {:.0} ({:?}{})",
            line.antenna,
            line.tower,
            line.distance,
            line.band,
            if line.blocked { ", blocked" } else { "" }
        );
    }
    for alert in report.events.iter().filter_map(|e| e.to_alert(report.time.tick)) {
        match alert.level {
            AlertLevel::Warning => warn!("[tick {}] {}", alert.tick, alert.message),
            AlertLevel::Info => debug!("[tick {}] {}", alert.tick, alert.message),
        }
    }
    if status_interval > 0 && report.time.tick.is_multiple_of(status_interval) {
        info!("antenna status at tick {}\n{}", report.time.tick, format_status_table(&report.status));
    }
}

/// Fixed-width antenna status table, one row per antenna.
pub fn format_status_table(rows: &[AntennaStatusRow]) -> String {
    let cells: Vec<[String; 8]> = rows
        .iter()
        .map(|row| {
            [
                row.name.clone(),
                row.state.to_string(),
                row.antenna_type.clone(),
                row.frequency_band.clone(),
                row.los_label().to_string(),
                row.locked_label().to_string(),
                row.zone.to_string(),
                row.position_label.clone(),
            ]
        })
        .collect();

    let mut widths = HEADER.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = format_row(HEADER.iter().copied(), &widths);
    out.push('\n');
    out.push_str(&format_row(widths.iter().map(|w| "-".repeat(*w)), &widths));
    for row in &cells {
        out.push('\n');
        out.push_str(&format_row(row.iter(), &widths));
    }
    out
}

fn format_row<T: AsRef<str>>(cells: impl Iterator<Item = T>, widths: &[usize; 8]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
