use anyhow::Result;
use polars::prelude::*;

use crate::rhythm::intervals::RhythmInterval;
use crate::rhythm::segments::Segment;
use crate::rhythm::summary::RhythmSummaryRow;

/// Flat DataFrame projection of an interval table.
pub fn intervals_df(intervals: &[RhythmInterval]) -> Result<DataFrame> {
    let df = df!(
        "record" => intervals.iter().map(|iv| iv.record.clone()).collect::<Vec<_>>(),
        "fs" => intervals.iter().map(|iv| iv.fs).collect::<Vec<_>>(),
        "label" => intervals.iter().map(|iv| iv.label.clone()).collect::<Vec<_>>(),
        "start" => intervals.iter().map(|iv| iv.start as i64).collect::<Vec<_>>(),
        "end" => intervals.iter().map(|iv| iv.end as i64).collect::<Vec<_>>(),
        "duration_s" => intervals.iter().map(|iv| iv.duration_s).collect::<Vec<_>>(),
        "pac_count" => intervals.iter().map(|iv| iv.pac_count as i64).collect::<Vec<_>>(),
        "pvc_count" => intervals.iter().map(|iv| iv.pvc_count as i64).collect::<Vec<_>>(),
    )?;
    Ok(df)
}

/// Flat DataFrame projection of a summary table.
pub fn summary_df(rows: &[RhythmSummaryRow]) -> Result<DataFrame> {
    let df = df!(
        "label" => rows.iter().map(|r| r.label.clone()).collect::<Vec<_>>(),
        "frequency" => rows.iter().map(|r| r.frequency as i64).collect::<Vec<_>>(),
        "min_s" => rows.iter().map(|r| r.min_s).collect::<Vec<_>>(),
        "max_s" => rows.iter().map(|r| r.max_s).collect::<Vec<_>>(),
        "mean_s" => rows.iter().map(|r| r.mean_s).collect::<Vec<_>>(),
        "std_s" => rows.iter().map(|r| r.std_s).collect::<Vec<_>>(),
        "total_s" => rows.iter().map(|r| r.total_s).collect::<Vec<_>>(),
        "pac_count" => rows.iter().map(|r| r.pac_count as i64).collect::<Vec<_>>(),
        "pvc_count" => rows.iter().map(|r| r.pvc_count as i64).collect::<Vec<_>>(),
    )?;
    Ok(df)
}

/// Flat DataFrame projection of a segment table. Signal and beat payloads
/// stay in the typed rows; this carries their sizes.
pub fn segments_df(segments: &[Segment]) -> Result<DataFrame> {
    let df = df!(
        "record" => segments.iter().map(|s| s.record.clone()).collect::<Vec<_>>(),
        "interval_index" => segments.iter().map(|s| s.interval_index as i64).collect::<Vec<_>>(),
        "label" => segments.iter().map(|s| s.label.clone()).collect::<Vec<_>>(),
        "samples" => segments.iter().map(|s| s.signal.len() as i64).collect::<Vec<_>>(),
        "beats" => segments.iter().map(|s| s.beats.len() as i64).collect::<Vec<_>>(),
    )?;
    Ok(df)
}
