use std::collections::BTreeSet;

use serde::Deserialize;

/// One evaluation run of one algorithm on one task at one dataset size
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultRecord {
    pub task: String,
    pub alg: String,
    /// Number of expert demonstrations the algorithm was trained on
    pub num_trajs: u32,
    /// Episode returns of the trained policy
    pub alg_traj_returns: Vec<f64>,
    /// Episode lengths of the trained policy
    #[serde(default)]
    pub alg_traj_lengths: Vec<u32>,
    /// Episode returns of the expert, repeated on every row of a task
    pub ex_traj_returns: Vec<f64>,
}

/// An immutable, in-memory table of [`ResultRecord`]s
///
/// Filtering produces a new table; nothing is ever mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    records: Vec<ResultRecord>,
}

impl ResultTable {
    pub fn new(records: Vec<ResultRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keep only the rows matching `predicate`
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&ResultRecord) -> bool,
    {
        Self {
            records: self
                .records
                .iter()
                .filter(|r| predicate(r))
                .cloned()
                .collect(),
        }
    }

    pub fn for_task(&self, task: &str) -> Self {
        self.filter(|r| r.task == task)
    }

    pub fn for_alg(&self, alg: &str) -> Self {
        self.filter(|r| r.alg == alg)
    }

    pub fn for_num_trajs(&self, num_trajs: u32) -> Self {
        self.filter(|r| r.num_trajs == num_trajs)
    }

    /// Distinct task identifiers, in increasing order
    pub fn tasks(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.task.as_str()).collect()
    }

    /// Distinct algorithm identifiers, in increasing order
    pub fn algs(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.alg.as_str()).collect()
    }

    /// Distinct dataset sizes, in increasing order
    pub fn num_trajs(&self) -> BTreeSet<u32> {
        self.records.iter().map(|r| r.num_trajs).collect()
    }

    /// The `alg_traj_returns` column, in row order
    pub fn column_returns(&self) -> Vec<&[f64]> {
        self.records
            .iter()
            .map(|r| r.alg_traj_returns.as_slice())
            .collect()
    }

    /// The `alg_traj_lengths` column, in row order
    pub fn column_lengths(&self) -> Vec<&[u32]> {
        self.records
            .iter()
            .map(|r| r.alg_traj_lengths.as_slice())
            .collect()
    }

    /// The `ex_traj_returns` column, in row order
    pub fn column_expert_returns(&self) -> Vec<&[f64]> {
        self.records
            .iter()
            .map(|r| r.ex_traj_returns.as_slice())
            .collect()
    }
}

impl FromIterator<ResultRecord> for ResultTable {
    fn from_iter<I: IntoIterator<Item = ResultRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
