use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Premature atrial contraction.
pub const PAC_SYMBOL: char = 'A';
/// Premature ventricular contraction.
pub const PVC_SYMBOL: char = 'V';
/// Unclassifiable beat.
pub const UNKNOWN_SYMBOL: char = 'Q';
/// Missed-beat marker.
pub const MISSED_SYMBOL: char = '"';
/// Rhythm change; the annotation's aux text carries the new label.
pub const RHYTHM_CHANGE_SYMBOL: char = '+';

/// Count occurrences of one annotation symbol. Every ectopic-beat count in
/// the crate goes through here.
pub fn count_symbol<I>(symbols: I, symbol: char) -> usize
where
    I: IntoIterator<Item = char>,
{
    symbols.into_iter().filter(|&s| s == symbol).count()
}

pub fn pac_count(record: &Record) -> usize {
    count_symbol(record.symbols.iter().copied(), PAC_SYMBOL)
}

pub fn pvc_count(record: &Record) -> usize {
    count_symbol(record.symbols.iter().copied(), PVC_SYMBOL)
}

pub fn has_pac(record: &Record) -> bool {
    pac_count(record) > 0
}

pub fn has_pvc(record: &Record) -> bool {
    pvc_count(record) > 0
}

pub fn has_unknown_beat(record: &Record) -> bool {
    record.symbols.contains(&UNKNOWN_SYMBOL)
}

pub fn has_missed_beat(record: &Record) -> bool {
    record.symbols.contains(&MISSED_SYMBOL)
}

/// PAC share of all annotations, as a percentage. 0 for an empty stream.
pub fn pac_percentage(record: &Record) -> f64 {
    percentage(pac_count(record), record.symbols.len())
}

/// PVC share of all annotations, as a percentage. 0 for an empty stream.
pub fn pvc_percentage(record: &Record) -> f64 {
    percentage(pvc_count(record), record.symbols.len())
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Beat statistics for a whole record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordReport {
    pub name: String,
    pub fs: f64,
    pub samples: usize,
    pub duration_s: f64,
    pub annotations: usize,
    pub pac_count: usize,
    pub pvc_count: usize,
    pub pac_percentage: f64,
    pub pvc_percentage: f64,
    pub has_unknown_beat: bool,
    pub has_missed_beat: bool,
}

pub fn record_report(record: &Record) -> RecordReport {
    RecordReport {
        name: record.name.clone(),
        fs: record.fs,
        samples: record.len(),
        duration_s: record.duration(),
        annotations: record.symbols.len(),
        pac_count: pac_count(record),
        pvc_count: pvc_count(record),
        pac_percentage: pac_percentage(record),
        pvc_percentage: pvc_percentage(record),
        has_unknown_beat: has_unknown_beat(record),
        has_missed_beat: has_missed_beat(record),
    }
}
