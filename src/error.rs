use std::{io, path::PathBuf};

/// Everything that can abort a plotting run
///
/// None of these are recovered from: they all describe input that must not be
/// plotted, or an output that could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open result store {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("malformed result store: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("result store has no `{0}` table")]
    MissingTable(String),

    #[error("invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("found {algs} distinct algorithms but the palette has {colors} colors")]
    PaletteMismatch { algs: usize, colors: usize },

    #[error("task `{0}` has no display name or random baseline configured")]
    UnknownTask(String),

    #[error("expert returns for task `{task}` differ between row 0 and row {row} (deviation {deviation})")]
    InconsistentExpert {
        task: String,
        row: usize,
        deviation: f64,
    },

    #[error("no rows for task `{task}`, algorithm `{alg}` at num_trajs = {num_trajs}")]
    MissingCombination {
        task: String,
        alg: String,
        num_trajs: u32,
    },

    #[error("cannot summarize an empty sample: {0}")]
    EmptySample(String),

    #[error("failed to draw figure: {0}")]
    Render(String),

    #[error("failed to write results table: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write diagnostics: {0}")]
    Console(io::Error),

    #[error("failed to write {}: {source}", path.display())]
    Output { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
