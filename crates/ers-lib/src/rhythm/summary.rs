use serde::{Deserialize, Serialize};

use crate::beats::{count_symbol, PAC_SYMBOL, PVC_SYMBOL};
use crate::rhythm::intervals::RhythmInterval;

/// Aggregate statistics for one rhythm label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RhythmSummaryRow {
    pub label: String,
    /// Number of intervals carrying this label
    pub frequency: usize,
    pub min_s: f64,
    pub max_s: f64,
    pub mean_s: f64,
    /// Population standard deviation of interval durations
    pub std_s: f64,
    pub total_s: f64,
    pub pac_count: usize,
    pub pvc_count: usize,
}

/// Aggregate an interval table into one row per label, ordered by descending
/// frequency. Ties keep the order labels first appear in the table.
pub fn summarize_intervals(intervals: &[RhythmInterval]) -> Vec<RhythmSummaryRow> {
    let mut labels: Vec<&str> = Vec::new();
    for interval in intervals {
        if !labels.iter().any(|l| *l == interval.label) {
            labels.push(&interval.label);
        }
    }

    let mut rows = Vec::with_capacity(labels.len());
    for label in labels {
        let group: Vec<&RhythmInterval> =
            intervals.iter().filter(|iv| iv.label == label).collect();
        let durations: Vec<f64> = group.iter().map(|iv| iv.duration_s).collect();
        let n = durations.len() as f64;
        let mean_s = durations.iter().sum::<f64>() / n;
        let variance = durations
            .iter()
            .map(|d| (d - mean_s) * (d - mean_s))
            .sum::<f64>()
            / n;
        let beat_symbols = group
            .iter()
            .flat_map(|iv| iv.beats.iter().map(|b| b.symbol));
        rows.push(RhythmSummaryRow {
            label: label.to_string(),
            frequency: group.len(),
            min_s: durations.iter().cloned().fold(f64::INFINITY, f64::min),
            max_s: durations.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            mean_s,
            std_s: variance.sqrt(),
            total_s: durations.iter().sum(),
            pac_count: count_symbol(beat_symbols.clone(), PAC_SYMBOL),
            pvc_count: count_symbol(beat_symbols, PVC_SYMBOL),
        });
    }
    rows.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    rows
}
