//! Offset isolation across memory dump snapshots
//!
//! Snapshots are compared pairwise in command-line order. Under `=` an
//! offset survives only if the new snapshot keeps the previous value; under
//! `!=` only if the value changed. Once eliminated, an offset stays
//! eliminated. What survives the last snapshot is reported with its value in
//! every snapshot.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors from loading or comparing snapshots
#[derive(Error, Debug)]
pub enum IsolateError {
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_name}: not a hex byte: {token:?}")]
    InvalidToken { source_name: String, token: String },

    #[error("{source_name} has {len} values, fewer than the {previous} of the previous snapshot")]
    LengthMismatch {
        source_name: String,
        len: usize,
        previous: usize,
    },
}

/// Comparison applied between consecutive snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    /// Keep offsets whose value did not change
    #[default]
    Eq,
    /// Keep offsets whose value changed
    Neq,
}

impl Operator {
    fn keeps(self, previous: u8, current: u8) -> bool {
        match self {
            Operator::Eq => previous == current,
            Operator::Neq => previous != current,
        }
    }
}

/// One command-line argument of `hori-isolate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IsolateArg {
    Operator(Operator),
    File(PathBuf),
}

impl IsolateArg {
    pub fn parse(arg: &str) -> Self {
        match arg {
            "=" | "==" => IsolateArg::Operator(Operator::Eq),
            "!=" => IsolateArg::Operator(Operator::Neq),
            path => IsolateArg::File(PathBuf::from(path)),
        }
    }
}

/// Parse whitespace-separated hex values
pub fn parse_snapshot(source_name: &str, text: &str) -> Result<Vec<u8>, IsolateError> {
    text.split_whitespace()
        .map(|token| {
            let digits = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token);
            u8::from_str_radix(digits, 16).map_err(|_| IsolateError::InvalidToken {
                source_name: source_name.to_string(),
                token: token.to_string(),
            })
        })
        .collect()
}

/// Narrowing state over the snapshots seen so far
#[derive(Debug, Default)]
pub struct Isolator {
    operator: Operator,
    snapshots: Vec<Vec<u8>>,
    /// Surviving flag per offset of the first snapshot
    alive: Vec<bool>,
}

impl Isolator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operator used for the following snapshots
    pub fn set_operator(&mut self, operator: Operator) {
        self.operator = operator;
    }

    /// Compare a new snapshot with the previous one
    pub fn push(&mut self, source_name: &str, values: Vec<u8>) -> Result<(), IsolateError> {
        match self.snapshots.last() {
            None => self.alive = vec![true; values.len()],
            Some(previous) => {
                if values.len() < previous.len() {
                    return Err(IsolateError::LengthMismatch {
                        source_name: source_name.to_string(),
                        len: values.len(),
                        previous: previous.len(),
                    });
                }
                for (i, alive) in self.alive.iter_mut().enumerate() {
                    *alive = *alive && self.operator.keeps(previous[i], values[i]);
                }
            }
        }

        debug!(
            "{source_name}: {} values, {} offsets remaining",
            values.len(),
            self.survivors().len()
        );
        self.snapshots.push(values);
        Ok(())
    }

    /// Offsets still under consideration, ascending
    pub fn survivors(&self) -> Vec<usize> {
        self.alive
            .iter()
            .enumerate()
            .filter_map(|(i, &alive)| alive.then_some(i))
            .collect()
    }

    /// `{offset:04x} ` followed by `{value:02x} ` per snapshot, one line per
    /// surviving offset. Empty unless at least two snapshots were compared.
    pub fn report(&self) -> Vec<String> {
        if self.snapshots.len() < 2 {
            return Vec::new();
        }
        self.survivors()
            .into_iter()
            .map(|offset| {
                let mut line = format!("{offset:04x} ");
                for snapshot in &self.snapshots {
                    let _ = write!(line, "{:02x} ", snapshot[offset]);
                }
                line
            })
            .collect()
    }
}

/// Read and compare dump files according to the argument list
pub fn run<S: AsRef<str>>(args: &[S]) -> Result<Vec<String>, IsolateError> {
    let mut isolator = Isolator::new();
    for arg in args {
        match IsolateArg::parse(arg.as_ref()) {
            IsolateArg::Operator(op) => isolator.set_operator(op),
            IsolateArg::File(path) => {
                let values = load_snapshot(&path)?;
                isolator.push(&path.display().to_string(), values)?;
            }
        }
    }
    Ok(isolator.report())
}

fn load_snapshot(path: &Path) -> Result<Vec<u8>, IsolateError> {
    let text = std::fs::read_to_string(path).map_err(|source| IsolateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_snapshot(&path.display().to_string(), &text)
}
