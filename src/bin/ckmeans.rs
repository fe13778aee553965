//! Reads a cluster count followed by values from standard input, one number
//! per line, and prints each value with the index of its optimal cluster.
//!
//! Usage: `printf '3\n1\n2\n50\n51\n100\n' | ckmeans`
//!
//! Output lines are `<cluster> <value>`, lowest cluster first. Set `RUST_LOG`
//! to see engine diagnostics on stderr.

use std::io::{self, BufRead, BufWriter, Write};
use std::process;

use ckmeans_dp::partition;
use thiserror::Error;

#[derive(Error, Debug)]
enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: `{text}` is not a number")]
    NotANumber { line: usize, text: String },

    #[error("line {line}: cluster count must be a non-negative whole number, got {value}")]
    BadClusterCount { line: usize, value: f64 },

    #[error("missing cluster count")]
    MissingClusterCount,
}

/// The parsed request: how many clusters, and the values to put in them.
#[derive(Debug, PartialEq)]
struct Request {
    clusters: usize,
    values: Vec<f64>,
}

fn parse_input<R: BufRead>(reader: R) -> Result<Request, InputError> {
    let mut clusters = None;
    let mut values = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let value: f64 = text.parse().map_err(|_| InputError::NotANumber {
            line: index + 1,
            text: text.to_string(),
        })?;

        if clusters.is_none() {
            if value < 0.0 || value.fract() != 0.0 || !value.is_finite() {
                return Err(InputError::BadClusterCount {
                    line: index + 1,
                    value,
                });
            }
            clusters = Some(value as usize);
        } else {
            values.push(value);
        }
    }

    let clusters = clusters.ok_or(InputError::MissingClusterCount)?;
    Ok(Request { clusters, values })
}

fn write_clusters<W: Write>(writer: &mut W, clusters: &[Vec<f64>]) -> io::Result<()> {
    for (index, cluster) in clusters.iter().enumerate() {
        for value in cluster {
            writeln!(writer, "{} {}", index, value)?;
        }
    }
    writer.flush()
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let request = parse_input(stdin.lock())?;
    log::debug!(
        "read {} values, {} clusters requested",
        request.values.len(),
        request.clusters
    );

    let clusters = partition(&request.values, request.clusters)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_clusters(&mut writer, &clusters)?;
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("ckmeans: {}", err);
        process::exit(1);
    }
}
