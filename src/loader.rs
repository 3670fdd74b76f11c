use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::{
    error::{Error, Result},
    record::{ResultRecord, ResultTable},
};

/// Key of the table holding the evaluation results
pub const RESULTS_KEY: &str = "results";

/// Load the `results` table from a result store on disk
///
/// A result store is a JSON object mapping table keys to arrays of rows. The file
/// handle is dropped as soon as the document is parsed.
pub fn load(path: impl AsRef<Path>) -> Result<ResultTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = load_from_reader(BufReader::new(file))?;
    debug!("loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Load the `results` table from any reader producing a result store
pub fn load_from_reader<R: Read>(reader: R) -> Result<ResultTable> {
    let mut store: Map<String, Value> = serde_json::from_reader(reader)?;
    let rows = store
        .remove(RESULTS_KEY)
        .ok_or_else(|| Error::MissingTable(RESULTS_KEY.into()))?;
    let records: Vec<ResultRecord> = serde_json::from_value(rows)?;

    for (row, record) in records.iter().enumerate() {
        validate(row, record)?;
    }

    Ok(ResultTable::new(records))
}

fn validate(row: usize, record: &ResultRecord) -> Result<()> {
    if record.num_trajs == 0 {
        return Err(Error::InvalidRecord {
            row,
            reason: "num_trajs must be positive".into(),
        });
    }
    if !record.alg_traj_lengths.is_empty()
        && record.alg_traj_lengths.len() != record.alg_traj_returns.len()
    {
        warn!(
            "row {row}: {} episode lengths for {} episode returns",
            record.alg_traj_lengths.len(),
            record.alg_traj_returns.len()
        );
    }
    Ok(())
}
