use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::record::Record;

/// One parsed WFDB annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct WfdbAnnotation {
    pub sample: usize,
    pub symbol: char,
    /// Aux payload, empty for most annotations
    pub aux: String,
}

/// Load one lead of a WFDB record together with its sibling `.atr`
/// annotation file.
///
/// `header_path` points at the `.hea` file; the signal data and annotations
/// are located next to it. Raw ADC values are converted to physical units
/// with the lead's gain and baseline.
pub fn load_record(header_path: &Path, lead: usize) -> Result<Record> {
    // wfdb-rust reads the header and data files itself, so surface a typed
    // error for the common missing-file case first
    fs::metadata(header_path).map_err(|source| Error::DataSource {
        path: header_path.to_path_buf(),
        source,
    })?;

    let (header, signals) = wfdb_rust::parse_wfdb(header_path);
    check_lead(header_path, signals.len(), lead)?;
    let spec = &header.signal_specs[lead];
    let raw = &signals[lead];
    let gain = spec.adc_gain.unwrap_or(1.0) as f64;
    let baseline = spec.baseline.or(spec.adc_zero).unwrap_or(0) as f64;
    let fs = header
        .record
        .sampling_frequency
        .map(|f| f as f64)
        .unwrap_or(250.0);
    let signal: Vec<f64> = raw
        .iter()
        .map(|&sample| (sample as f64 - baseline) / gain)
        .collect();

    let name = header_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("record")
        .to_string();
    let annotations = load_annotation_file(&header_path.with_extension("atr"))?;
    let (samples, symbols, aux) = annotation_arrays(annotations);

    log::debug!(
        "loaded record {} ({} samples at {} Hz, {} annotations)",
        name,
        signal.len(),
        fs,
        samples.len()
    );
    Ok(Record {
        name,
        fs,
        signal,
        samples,
        symbols,
        aux,
    })
}

fn check_lead(path: &Path, available: usize, requested: usize) -> Result<()> {
    if requested >= available {
        return Err(Error::LeadOutOfRange {
            path: path.to_path_buf(),
            available,
            requested,
        });
    }
    Ok(())
}

/// Read a WFDB annotation file (`.atr`).
pub fn load_annotation_file(path: &Path) -> Result<Vec<WfdbAnnotation>> {
    let buf = fs::read(path).map_err(|source| Error::DataSource {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_annotations(&buf))
}

/// Split parsed annotations into the parallel arrays a [`Record`] carries.
pub fn annotation_arrays(annotations: Vec<WfdbAnnotation>) -> (Vec<usize>, Vec<char>, Vec<String>) {
    let mut samples = Vec::with_capacity(annotations.len());
    let mut symbols = Vec::with_capacity(annotations.len());
    let mut aux = Vec::with_capacity(annotations.len());
    for annotation in annotations {
        samples.push(annotation.sample);
        symbols.push(annotation.symbol);
        aux.push(annotation.aux);
    }
    (samples, symbols, aux)
}

/// Parse the MIT annotation binary stream.
///
/// Little-endian 16-bit words: the top 6 bits are the annotation code, the
/// bottom 10 the sample interval from the previous annotation. SKIP carries a
/// 4-byte interval, NUM/SUB/CHN modify the previous annotation without
/// advancing time, AUX attaches a counted string (padded to even length) to
/// the previous annotation. A zero word terminates the stream.
pub fn parse_annotations(buf: &[u8]) -> Vec<WfdbAnnotation> {
    let mut out: Vec<WfdbAnnotation> = Vec::new();
    let mut idx = 0;
    let mut sample: usize = 0;
    while idx + 2 <= buf.len() {
        let word = u16::from_le_bytes([buf[idx], buf[idx + 1]]);
        idx += 2;
        let code = (word >> 10) as u8;
        let diff = (word & 0x03FF) as usize;
        if code == 0 && diff == 0 {
            break;
        }
        match code {
            59 => {
                if idx + 4 > buf.len() {
                    break;
                }
                let high = u16::from_le_bytes([buf[idx], buf[idx + 1]]) as u32;
                let low = u16::from_le_bytes([buf[idx + 2], buf[idx + 3]]) as u32;
                idx += 4;
                let skip = (high << 16) | low;
                sample = sample.wrapping_add(skip as usize);
            }
            60..=62 => {
                // NUM/SUB/CHN carry a value, not a time interval
            }
            63 => {
                let end = (idx + diff).min(buf.len());
                let text: String = buf[idx..end]
                    .iter()
                    .take_while(|&&b| b != 0)
                    .map(|&b| b as char)
                    .collect();
                if let Some(last) = out.last_mut() {
                    last.aux = text;
                }
                idx = end;
                if diff % 2 != 0 && idx < buf.len() {
                    idx += 1;
                }
            }
            _ => {
                sample = sample.wrapping_add(diff);
                out.push(WfdbAnnotation {
                    sample,
                    symbol: symbol_for_code(code),
                    aux: String::new(),
                });
            }
        }
    }
    out
}

/// The standard MIT annotation code table.
pub fn symbol_for_code(code: u8) -> char {
    match code {
        1 => 'N',
        2 => 'L',
        3 => 'R',
        4 => 'a',
        5 => 'V',
        6 => 'F',
        7 => 'J',
        8 => 'A',
        9 => 'S',
        10 => 'E',
        11 => 'j',
        12 => '/',
        13 => 'Q',
        14 => '~',
        16 => '|',
        18 => 's',
        19 => 'T',
        20 => '*',
        21 => 'D',
        22 => '"',
        23 => '=',
        24 => 'p',
        25 => 'B',
        26 => '^',
        27 => 't',
        28 => '+',
        29 => 'u',
        30 => '?',
        31 => '!',
        32 => '[',
        33 => ']',
        34 => 'e',
        35 => 'n',
        36 => '@',
        37 => 'x',
        38 => 'f',
        39 => '(',
        40 => ')',
        41 => 'r',
        _ => '?',
    }
}
