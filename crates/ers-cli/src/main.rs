use anyhow::Result;
use clap::{Parser, Subcommand};
use ers_lib::{
    beats,
    io::{export, text as text_io, wfdb as wfdb_io},
    record::Record,
    rhythm::{extract_intervals, segment_intervals_with_progress, summarize_intervals, WindowConfig},
};
use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(
    name = "ers",
    version,
    about = "ERS: ECG rhythm interval extraction and segmentation tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract contiguous rhythm intervals from a record
    Intervals {
        /// WFDB header (.hea); signal and .atr annotations live next to it
        #[arg(long)]
        record: Option<PathBuf>,
        #[arg(long, default_value_t = 0)]
        lead: usize,
        /// Newline-delimited samples, read from stdin when absent
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value_t = 250.0)]
        fs: f64,
        #[arg(long, default_value = "record")]
        name: String,
        /// Annotation file (.atr) for sample input
        #[arg(long)]
        annotations: Option<PathBuf>,
        /// Write the interval table as JSON
        #[arg(long)]
        out: Option<PathBuf>,
        /// Write a flat CSV projection
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Summarize per-rhythm statistics over the extracted intervals
    Summary {
        #[arg(long)]
        record: Option<PathBuf>,
        #[arg(long, default_value_t = 0)]
        lead: usize,
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value_t = 250.0)]
        fs: f64,
        #[arg(long, default_value = "record")]
        name: String,
        #[arg(long)]
        annotations: Option<PathBuf>,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Cut fixed-size sliding windows from every sufficiently long interval
    Segment {
        #[arg(long)]
        record: Option<PathBuf>,
        #[arg(long, default_value_t = 0)]
        lead: usize,
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value_t = 250.0)]
        fs: f64,
        #[arg(long, default_value = "record")]
        name: String,
        #[arg(long)]
        annotations: Option<PathBuf>,
        /// Window length in seconds
        #[arg(long, default_value_t = 30.0)]
        window_size: f64,
        /// Window step in seconds
        #[arg(long, default_value_t = 5.0)]
        window_step: f64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Report beat statistics for a record
    Info {
        #[arg(long)]
        record: Option<PathBuf>,
        #[arg(long, default_value_t = 0)]
        lead: usize,
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value_t = 250.0)]
        fs: f64,
        #[arg(long, default_value = "record")]
        name: String,
        #[arg(long)]
        annotations: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Intervals {
            record,
            lead,
            input,
            fs,
            name,
            annotations,
            out,
            csv,
        } => cmd_intervals(
            record.as_deref(),
            lead,
            input.as_deref(),
            fs,
            &name,
            annotations.as_deref(),
            out.as_deref(),
            csv.as_deref(),
        )?,
        Commands::Summary {
            record,
            lead,
            input,
            fs,
            name,
            annotations,
            out,
            csv,
        } => cmd_summary(
            record.as_deref(),
            lead,
            input.as_deref(),
            fs,
            &name,
            annotations.as_deref(),
            out.as_deref(),
            csv.as_deref(),
        )?,
        Commands::Segment {
            record,
            lead,
            input,
            fs,
            name,
            annotations,
            window_size,
            window_step,
            out,
        } => cmd_segment(
            record.as_deref(),
            lead,
            input.as_deref(),
            fs,
            &name,
            annotations.as_deref(),
            window_size,
            window_step,
            out.as_deref(),
        )?,
        Commands::Info {
            record,
            lead,
            input,
            fs,
            name,
            annotations,
        } => cmd_info(
            record.as_deref(),
            lead,
            input.as_deref(),
            fs,
            &name,
            annotations.as_deref(),
        )?,
    }
    Ok(())
}

fn read_samples(input: Option<&Path>) -> Result<Vec<f64>> {
    match input {
        Some(path) => text_io::read_series(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            text_io::parse_series(&buf)
        }
    }
}

fn load_record(
    record: Option<&Path>,
    lead: usize,
    input: Option<&Path>,
    fs: f64,
    name: &str,
    annotations: Option<&Path>,
) -> Result<Record> {
    if let Some(header) = record {
        return Ok(wfdb_io::load_record(header, lead)?);
    }
    let signal = read_samples(input)?;
    let (samples, symbols, aux) = match annotations {
        Some(path) => wfdb_io::annotation_arrays(wfdb_io::load_annotation_file(path)?),
        None => (Vec::new(), Vec::new(), Vec::new()),
    };
    Ok(Record {
        name: name.to_string(),
        fs,
        signal,
        samples,
        symbols,
        aux,
    })
}

#[allow(clippy::too_many_arguments)]
fn cmd_intervals(
    record: Option<&Path>,
    lead: usize,
    input: Option<&Path>,
    fs: f64,
    name: &str,
    annotations: Option<&Path>,
    out: Option<&Path>,
    csv: Option<&Path>,
) -> Result<()> {
    let record = load_record(record, lead, input, fs, name, annotations)?;
    let intervals = extract_intervals(&record);
    if let Some(path) = out {
        export::write_json(path, &intervals)?;
    }
    if let Some(path) = csv {
        export::write_intervals_csv(path, &intervals)?;
    }
    println!("{}", serde_json::to_string(&intervals)?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_summary(
    record: Option<&Path>,
    lead: usize,
    input: Option<&Path>,
    fs: f64,
    name: &str,
    annotations: Option<&Path>,
    out: Option<&Path>,
    csv: Option<&Path>,
) -> Result<()> {
    let record = load_record(record, lead, input, fs, name, annotations)?;
    let intervals = extract_intervals(&record);
    let rows = summarize_intervals(&intervals);
    if let Some(path) = out {
        export::write_json(path, &rows)?;
    }
    if let Some(path) = csv {
        export::write_summary_csv(path, &rows)?;
    }
    println!("{}", serde_json::to_string(&rows)?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_segment(
    record: Option<&Path>,
    lead: usize,
    input: Option<&Path>,
    fs: f64,
    name: &str,
    annotations: Option<&Path>,
    window_size: f64,
    window_step: f64,
    out: Option<&Path>,
) -> Result<()> {
    let record = load_record(record, lead, input, fs, name, annotations)?;
    let intervals = extract_intervals(&record);
    let config = WindowConfig::new(window_size, window_step)?;
    let segments =
        segment_intervals_with_progress(&intervals, &config, |message| log::info!("{}", message))?;
    if let Some(path) = out {
        export::write_json(path, &segments)?;
    }
    println!("{}", serde_json::to_string(&segments)?);
    Ok(())
}

fn cmd_info(
    record: Option<&Path>,
    lead: usize,
    input: Option<&Path>,
    fs: f64,
    name: &str,
    annotations: Option<&Path>,
) -> Result<()> {
    let record = load_record(record, lead, input, fs, name, annotations)?;
    let report = beats::record_report(&record);
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
