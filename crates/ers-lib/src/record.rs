use serde::{Deserialize, Serialize};

/// One beat annotation: a sample position and its symbol.
///
/// The position is absolute on a record and window-relative on intervals and
/// segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatEvent {
    pub sample: usize,
    pub symbol: char,
}

/// A rhythm label change marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhythmMark {
    pub sample: usize,
    /// Raw label text as annotated, e.g. "(AFIB"
    pub label: String,
}

/// A loaded record: one signal lead plus its annotation stream.
///
/// `samples`, `symbols` and `aux` are parallel arrays with one entry per
/// annotation, ordered by sample position ascending. `aux` is empty except
/// where the annotation carries a free-text payload; rhythm labels ride as
/// aux text on '+' annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    /// Uniform sampling frequency in Hz
    pub fs: f64,
    /// Samples of the selected lead, in physical units
    pub signal: Vec<f64>,
    pub samples: Vec<usize>,
    pub symbols: Vec<char>,
    pub aux: Vec<String>,
}

impl Record {
    pub fn len(&self) -> usize {
        self.signal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.signal.len() as f64 / self.fs
    }

    /// All annotations as typed events, in stream order.
    pub fn beat_events(&self) -> Vec<BeatEvent> {
        self.samples
            .iter()
            .zip(&self.symbols)
            .map(|(&sample, &symbol)| BeatEvent { sample, symbol })
            .collect()
    }

    /// The sparse rhythm-change stream: annotations with a non-empty aux
    /// label. Archives that store an aux slot per annotation collapse to
    /// change points here.
    pub fn rhythm_changes(&self) -> Vec<RhythmMark> {
        self.samples
            .iter()
            .zip(&self.aux)
            .filter(|(_, aux)| !aux.is_empty())
            .map(|(&sample, aux)| RhythmMark {
                sample,
                label: aux.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            name: "rec".into(),
            fs: 10.0,
            signal: vec![0.0; 40],
            samples: vec![0, 12, 25],
            symbols: vec!['+', 'N', 'A'],
            aux: vec!["(N".into(), "".into(), "".into()],
        }
    }

    #[test]
    fn projects_beat_events() {
        let events = record().beat_events();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[2],
            BeatEvent {
                sample: 25,
                symbol: 'A'
            }
        );
    }

    #[test]
    fn rhythm_changes_keep_only_labeled_annotations() {
        let changes = record().rhythm_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].sample, 0);
        assert_eq!(changes[0].label, "(N");
    }

    #[test]
    fn duration_follows_fs() {
        assert_eq!(record().duration(), 4.0);
    }
}
