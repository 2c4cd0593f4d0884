use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::BeatEvent;
use crate::rhythm::intervals::RhythmInterval;

/// Sliding-window parameters, in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowConfig {
    pub window_size_s: f64,
    pub window_step_s: f64,
}

impl WindowConfig {
    pub fn new(window_size_s: f64, window_step_s: f64) -> Result<Self> {
        let config = Self {
            window_size_s,
            window_step_s,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.window_size_s.is_finite() || self.window_size_s <= 0.0 {
            return Err(Error::InvalidWindow {
                message: format!("window size must be positive, got {}", self.window_size_s),
            });
        }
        if !self.window_step_s.is_finite() || self.window_step_s <= 0.0 {
            return Err(Error::InvalidWindow {
                message: format!("window step must be positive, got {}", self.window_step_s),
            });
        }
        Ok(())
    }
}

/// One fixed-width window cut from a rhythm interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub record: String,
    /// Position of the parent interval in the interval table
    pub interval_index: usize,
    /// Label inherited from the parent interval
    pub label: String,
    pub signal: Vec<f64>,
    /// Beat events re-based to the window start
    pub beats: Vec<BeatEvent>,
}

/// Cut fixed-size, fixed-step windows from every sufficiently long interval.
pub fn segment_intervals(
    intervals: &[RhythmInterval],
    config: &WindowConfig,
) -> Result<Vec<Segment>> {
    segment_intervals_with_progress(intervals, config, |_| {})
}

/// Like [`segment_intervals`], reporting per-interval progress through a
/// callback. The callback never changes the result.
///
/// Windows advance by the step while the left edge stays strictly below
/// `len - window`, so a window whose left edge lands exactly on
/// `len - window` is not emitted. An interval shorter than the window is
/// skipped with a progress message.
pub fn segment_intervals_with_progress(
    intervals: &[RhythmInterval],
    config: &WindowConfig,
    mut progress: impl FnMut(&str),
) -> Result<Vec<Segment>> {
    config.validate()?;
    let mut segments = Vec::new();
    for (index, interval) in intervals.iter().enumerate() {
        if interval.duration_s < config.window_size_s {
            progress(&format!(
                "skipping interval {} of {} (duration {}s)",
                index, interval.record, interval.duration_s
            ));
            continue;
        }

        let len = interval.signal.len();
        let window = (config.window_size_s * interval.fs) as usize;
        let step = (config.window_step_s * interval.fs) as usize;
        if step == 0 {
            return Err(Error::InvalidWindow {
                message: format!(
                    "window step {}s is shorter than one sample at {} Hz",
                    config.window_step_s, interval.fs
                ),
            });
        }
        progress(&format!(
            "processing interval {} of {} (duration {}s)",
            index, interval.record, interval.duration_s
        ));

        let emitted_before = segments.len();
        let mut left = 0usize;
        let mut right = window;
        while (left as i64) < len as i64 - window as i64 && right <= len {
            let beats: Vec<BeatEvent> = interval
                .beats
                .iter()
                .filter(|b| b.sample >= left && b.sample < right)
                .map(|b| BeatEvent {
                    sample: b.sample - left,
                    symbol: b.symbol,
                })
                .collect();
            segments.push(Segment {
                record: interval.record.clone(),
                interval_index: index,
                label: interval.label.clone(),
                signal: interval.signal[left..right].to_vec(),
                beats,
            });
            left = left.saturating_add(step);
            right = left.saturating_add(window);
        }
        progress(&format!(
            "created {} segments",
            segments.len() - emitted_before
        ));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::rhythm::intervals::extract_intervals;

    fn synthetic_record(n: usize, fs: f64, annotations: &[(usize, char, &str)]) -> Record {
        Record {
            name: "rec".into(),
            fs,
            signal: (0..n).map(|i| (i as f64 * 0.1).sin()).collect(),
            samples: annotations.iter().map(|a| a.0).collect(),
            symbols: annotations.iter().map(|a| a.1).collect(),
            aux: annotations.iter().map(|a| a.2.to_string()).collect(),
        }
    }

    /// One interval spanning [0, 50], signal length 50, 5s at 10 Hz.
    fn single_interval() -> Vec<RhythmInterval> {
        let record = synthetic_record(
            51,
            10.0,
            &[(0, '+', "(N"), (5, 'N', ""), (25, 'A', ""), (45, 'V', "")],
        );
        extract_intervals(&record)
    }

    #[test]
    fn strict_left_bound_drops_the_exact_tail_window() {
        let intervals = single_interval();
        assert_eq!(intervals[0].signal.len(), 50);

        let config = WindowConfig::new(2.0, 1.0).unwrap();
        let segments = segment_intervals(&intervals, &config).unwrap();
        // left advances over {0, 10, 20}; 30 == len - window is excluded by
        // the strict bound even though [30, 50) would fit
        assert_eq!(segments.len(), 3);
        for segment in &segments {
            assert_eq!(segment.signal.len(), 20);
        }
        // the beat at sample 45 only fits the dropped tail window
        assert!(segments.iter().all(|s| s
            .beats
            .iter()
            .all(|b| b.symbol != 'V')));
    }

    #[test]
    fn rebases_beats_into_window_coordinates() {
        let intervals = single_interval();
        let config = WindowConfig::new(2.0, 1.0).unwrap();
        let segments = segment_intervals(&intervals, &config).unwrap();

        // window [0, 20): beats at 0 and 5
        let locals: Vec<usize> = segments[0].beats.iter().map(|b| b.sample).collect();
        assert_eq!(locals, vec![0, 5]);
        // window [10, 30): beat at 25 lands on local 15
        let locals: Vec<usize> = segments[1].beats.iter().map(|b| b.sample).collect();
        assert_eq!(locals, vec![15]);
        for segment in &segments {
            assert!(segment.beats.iter().all(|b| b.sample < 20));
        }
    }

    #[test]
    fn window_membership_is_right_exclusive() {
        let record = synthetic_record(51, 10.0, &[(0, '+', "(N"), (10, 'A', "")]);
        let intervals = extract_intervals(&record);
        let config = WindowConfig::new(1.0, 1.0).unwrap();
        let segments = segment_intervals(&intervals, &config).unwrap();

        // the beat at 10 is excluded from [0, 10) and opens [10, 20)
        assert!(segments[0].beats.iter().all(|b| b.symbol != 'A'));
        assert_eq!(segments[1].beats.len(), 1);
        assert_eq!(segments[1].beats[0].sample, 0);
    }

    #[test]
    fn duration_equal_to_window_emits_no_segment() {
        let intervals = single_interval();
        let mut messages = Vec::new();
        let config = WindowConfig::new(5.0, 1.0).unwrap();
        let segments =
            segment_intervals_with_progress(&intervals, &config, |m| messages.push(m.to_string()))
                .unwrap();
        assert!(segments.is_empty());
        assert!(messages[0].starts_with("processing interval 0"));
        assert_eq!(messages[1], "created 0 segments");
    }

    #[test]
    fn short_interval_is_skipped_with_a_message() {
        let intervals = single_interval();
        let mut messages = Vec::new();
        let config = WindowConfig::new(6.0, 1.0).unwrap();
        let segments =
            segment_intervals_with_progress(&intervals, &config, |m| messages.push(m.to_string()))
                .unwrap();
        assert!(segments.is_empty());
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("skipping interval 0 of rec"));
    }

    #[test]
    fn callback_does_not_change_the_result() {
        let intervals = single_interval();
        let config = WindowConfig::new(2.0, 1.0).unwrap();
        let silent = segment_intervals(&intervals, &config).unwrap();
        let verbose =
            segment_intervals_with_progress(&intervals, &config, |_| {}).unwrap();
        assert_eq!(silent, verbose);
    }

    #[test]
    fn keeps_interval_order_and_back_references() {
        let record = synthetic_record(100, 10.0, &[(0, '+', "(N"), (50, '+', "(AFIB")]);
        let intervals = extract_intervals(&record);
        let config = WindowConfig::new(2.0, 1.0).unwrap();
        let segments = segment_intervals(&intervals, &config).unwrap();

        // both intervals slice to 49 samples -> lefts {0, 10, 20} each
        assert_eq!(segments.len(), 6);
        assert!(segments[..3].iter().all(|s| s.interval_index == 0));
        assert!(segments[..3].iter().all(|s| s.label == "N"));
        assert!(segments[3..].iter().all(|s| s.interval_index == 1));
        assert!(segments[3..].iter().all(|s| s.label == "AFIB"));
        assert!(segments.iter().all(|s| s.record == "rec"));
    }

    #[test]
    fn windows_use_each_intervals_own_fs() {
        let base = single_interval().remove(0);
        let mut fast = base.clone();
        fast.fs = 100.0;
        fast.signal = (0..500).map(|i| i as f64).collect();
        fast.duration_s = 5.0;
        let intervals = vec![base, fast];

        let config = WindowConfig::new(2.0, 2.0).unwrap();
        let segments = segment_intervals(&intervals, &config).unwrap();
        // 10 Hz interval: window 20, lefts {0, 20} under the strict bound;
        // 100 Hz interval: window 200, lefts {0, 200}
        assert_eq!(segments[0].signal.len(), 20);
        let fast_segments: Vec<_> = segments.iter().filter(|s| s.interval_index == 1).collect();
        assert!(fast_segments.iter().all(|s| s.signal.len() == 200));
    }

    #[test]
    fn non_positive_config_is_rejected_up_front() {
        assert!(WindowConfig::new(0.0, 1.0).is_err());
        assert!(WindowConfig::new(2.0, 0.0).is_err());
        assert!(WindowConfig::new(-1.0, 1.0).is_err());

        let config = WindowConfig {
            window_size_s: 2.0,
            window_step_s: 0.0,
        };
        let err = segment_intervals(&single_interval(), &config).unwrap_err();
        assert!(matches!(err, Error::InvalidWindow { .. }));
    }

    #[test]
    fn non_finite_windows_are_rejected_up_front() {
        assert!(WindowConfig::new(f64::NAN, 1.0).is_err());
        assert!(WindowConfig::new(2.0, f64::NAN).is_err());
        assert!(WindowConfig::new(f64::INFINITY, 1.0).is_err());
        assert!(WindowConfig::new(2.0, f64::NEG_INFINITY).is_err());

        // NaN passes any < comparison, so it has to be caught at validation
        // instead of reaching the duration gate and emitting empty windows
        let config = WindowConfig {
            window_size_s: f64::NAN,
            window_step_s: 1.0,
        };
        let err = segment_intervals(&single_interval(), &config).unwrap_err();
        assert!(matches!(err, Error::InvalidWindow { .. }));
    }

    #[test]
    fn sub_sample_step_fails_for_eligible_intervals() {
        let intervals = single_interval();
        // 0.05s at 10 Hz floors to a zero-sample step
        let config = WindowConfig::new(2.0, 0.05).unwrap();
        let err = segment_intervals(&intervals, &config).unwrap_err();
        assert!(matches!(err, Error::InvalidWindow { .. }));
    }

    #[test]
    fn empty_interval_table_segments_to_nothing() {
        let config = WindowConfig::new(2.0, 1.0).unwrap();
        assert!(segment_intervals(&[], &config).unwrap().is_empty());
    }
}
