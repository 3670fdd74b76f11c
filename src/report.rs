use std::{fs::File, io, path::Path};

use serde::Serialize;

use crate::{
    aggregate::TaskSummary,
    error::{Error, Result},
};

/// File name of the results table inside the output directory
pub const TABLE_FILE: &str = "results.csv";

/// Label used in the `alg` column for expert baseline rows
pub const EXPERT_ROW: &str = "expert";

#[derive(Debug, Serialize)]
struct Row<'a> {
    task: &'a str,
    alg: &'a str,
    num_trajs: Option<u32>,
    mean: f64,
    std: f64,
    runs: usize,
    episodes: usize,
    mean_episode_length: Option<f64>,
}

fn rows(summary: &TaskSummary) -> impl Iterator<Item = Row<'_>> {
    let expert = Row {
        task: &summary.display_name,
        alg: EXPERT_ROW,
        num_trajs: None,
        mean: summary.expert.mean,
        std: summary.expert.std,
        runs: 1,
        episodes: summary.expert.len,
        mean_episode_length: None,
    };
    let curves = summary.curves.iter().flat_map(move |curve| {
        curve.points.iter().map(move |p| Row {
            task: &summary.display_name,
            alg: &curve.alg,
            num_trajs: Some(p.num_trajs),
            mean: p.returns.mean,
            std: p.returns.std,
            runs: p.runs,
            episodes: p.returns.len,
            mean_episode_length: p.mean_episode_length,
        })
    });
    std::iter::once(expert).chain(curves)
}

/// Write every task's expert baseline and curve points as one CSV table
pub fn write_table<W: io::Write>(summaries: &[TaskSummary], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in summaries.iter().flat_map(rows) {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the results table to `path`, replacing any previous table
pub fn write_table_to(summaries: &[TaskSummary], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| Error::Output {
        path: path.to_path_buf(),
        source,
    })?;
    write_table(summaries, file)
}
