use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::rhythm::intervals::RhythmInterval;
use crate::rhythm::summary::RhythmSummaryRow;

/// Write any table as a pretty-printed JSON file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

/// Flat CSV projection of an interval table. Nested signal and event columns
/// are JSON-only.
pub fn write_intervals_csv(path: &Path, intervals: &[RhythmInterval]) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = WriterBuilder::new().from_writer(file);
    writer.write_record(&[
        "record",
        "fs",
        "label",
        "start",
        "end",
        "duration_s",
        "pac_count",
        "pvc_count",
    ])?;
    for interval in intervals {
        writer.write_record(&[
            interval.record.clone(),
            interval.fs.to_string(),
            interval.label.clone(),
            interval.start.to_string(),
            interval.end.to_string(),
            interval.duration_s.to_string(),
            interval.pac_count.to_string(),
            interval.pvc_count.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// CSV projection of a summary table.
pub fn write_summary_csv(path: &Path, rows: &[RhythmSummaryRow]) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = WriterBuilder::new().from_writer(file);
    writer.write_record(&[
        "label",
        "frequency",
        "min_s",
        "max_s",
        "mean_s",
        "std_s",
        "total_s",
        "pac_count",
        "pvc_count",
    ])?;
    for row in rows {
        writer.write_record(&[
            row.label.clone(),
            row.frequency.to_string(),
            row.min_s.to_string(),
            row.max_s.to_string(),
            row.mean_s.to_string(),
            row.std_s.to_string(),
            row.total_s.to_string(),
            row.pac_count.to_string(),
            row.pvc_count.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
