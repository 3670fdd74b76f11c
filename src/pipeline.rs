use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::info;

use crate::{
    aggregate::{aggregate, TaskSummary},
    config::PlotConfig,
    error::{Error, Result},
    loader,
    render::render_task,
    report::{write_table_to, TABLE_FILE},
};

/// What a completed run wrote
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    /// One figure per task, in task order
    pub figures: Vec<PathBuf>,
    pub table: PathBuf,
}

/// Write the console diagnostics for one task: its name, expert statistics and every curve point
pub fn write_task_report<W: Write>(summary: &TaskSummary, out: &mut W) -> io::Result<()> {
    writeln!(out, "\nPlotting for task/env = {}", summary.display_name)?;
    writeln!(
        out,
        "expert mean: {} and std: {} and length: {}",
        summary.expert.mean, summary.expert.std, summary.expert.len
    )?;
    for curve in &summary.curves {
        for point in &curve.points {
            writeln!(
                out,
                "  {} @ {} trajs: {:.2} +/- {:.2} over {} runs, episodes per run {:?}",
                curve.alg,
                point.num_trajs,
                point.returns.mean,
                point.returns.std,
                point.runs,
                point.episodes_per_run
            )?;
        }
    }
    Ok(())
}

/// Load a result store, aggregate it and write one figure per task plus the results table
///
/// Aggregation covers every task before the first figure is drawn, so inconsistent
/// input leaves the output directory untouched.
pub fn run(result_file: &Path, config: &PlotConfig) -> Result<RunOutput> {
    let table = loader::load(result_file)?;
    info!(
        "{} rows, {} tasks, {} algorithms, num_trajs {:?}",
        table.len(),
        table.tasks().len(),
        table.algs().len(),
        table.num_trajs()
    );

    let summaries = aggregate(&table, config)?;
    drop(table);

    let mut figures = Vec::with_capacity(summaries.len());
    for summary in &summaries {
        write_task_report(summary, &mut io::stdout().lock()).map_err(Error::Console)?;

        let path = render_task(summary, config)?;
        println!("saved {}", path.display());
        figures.push(path);
    }

    let table = config.output_dir.join(TABLE_FILE);
    write_table_to(&summaries, &table)?;
    println!("saved {}", table.display());

    Ok(RunOutput { figures, table })
}
