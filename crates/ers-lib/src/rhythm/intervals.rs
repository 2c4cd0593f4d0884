use serde::{Deserialize, Serialize};

use crate::beats::{count_symbol, PAC_SYMBOL, PVC_SYMBOL};
use crate::record::{BeatEvent, Record, RhythmMark};

/// A maximal run of samples holding one rhythm label.
///
/// `start` and `end` are absolute sample positions, both inside the run.
/// `signal` is the `[start, end)` slice of the lead; `beats` and
/// `rhythm_marks` are the events falling in `[start, end]`, re-based to
/// `start`. The closed membership means a beat on `end` is kept even though
/// the signal slice stops just short of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RhythmInterval {
    pub record: String,
    pub fs: f64,
    /// Label with the archive's leading '(' stripped
    pub label: String,
    pub start: usize,
    pub end: usize,
    /// Seconds, rounded to two decimals
    pub duration_s: f64,
    pub signal: Vec<f64>,
    pub beats: Vec<BeatEvent>,
    pub rhythm_marks: Vec<RhythmMark>,
    pub pac_count: usize,
    pub pvc_count: usize,
}

/// Split a record into contiguous rhythm intervals, one per label change.
///
/// Intervals are ordered by start and partition the span from the first
/// change to the last sample; each ends one sample before the next change.
/// Samples before the first change are not covered by any interval. A record
/// with no rhythm labels yields an empty table.
pub fn extract_intervals(record: &Record) -> Vec<RhythmInterval> {
    let n = record.len();
    let changes = record.rhythm_changes();
    if changes.is_empty() {
        log::warn!("record {}: no rhythm labels", record.name);
        return Vec::new();
    }
    if n == 0 {
        return Vec::new();
    }
    if changes[0].sample > 0 {
        log::debug!(
            "record {}: first rhythm label at sample {}, earlier samples are uncovered",
            record.name,
            changes[0].sample
        );
    }

    let all_beats = record.beat_events();
    let mut intervals = Vec::with_capacity(changes.len());
    for (i, change) in changes.iter().enumerate() {
        let start = change.sample;
        let end = match changes.get(i + 1) {
            Some(next) => next.sample.saturating_sub(1),
            None => n - 1,
        };

        let beats: Vec<BeatEvent> = all_beats
            .iter()
            .filter(|b| b.sample >= start && b.sample <= end)
            .map(|b| BeatEvent {
                sample: b.sample - start,
                symbol: b.symbol,
            })
            .collect();
        let rhythm_marks: Vec<RhythmMark> = changes
            .iter()
            .filter(|m| m.sample >= start && m.sample <= end)
            .map(|m| RhythmMark {
                sample: m.sample - start,
                label: m.label.clone(),
            })
            .collect();

        let lo = start.min(n);
        let hi = end.min(n);
        let signal: Vec<f64> = if lo < hi {
            record.signal[lo..hi].to_vec()
        } else {
            Vec::new()
        };
        let duration_s = round2(signal.len() as f64 / record.fs);
        let pac_count = count_symbol(beats.iter().map(|b| b.symbol), PAC_SYMBOL);
        let pvc_count = count_symbol(beats.iter().map(|b| b.symbol), PVC_SYMBOL);
        let label = change
            .label
            .strip_prefix('(')
            .unwrap_or(&change.label)
            .to_string();

        intervals.push(RhythmInterval {
            record: record.name.clone(),
            fs: record.fs,
            label,
            start,
            end,
            duration_s,
            signal,
            beats,
            rhythm_marks,
            pac_count,
            pvc_count,
        });
    }
    intervals
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
