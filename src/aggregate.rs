use log::{debug, info, warn};
use plotters::style::RGBColor;

use crate::{
    config::PlotConfig,
    error::{Error, Result},
    record::ResultTable,
    stats::{total_abs_deviation, Summary, EXPERT_TOLERANCE},
};

/// Statistics of one algorithm at one dataset size, pooled over all runs
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePoint {
    pub num_trajs: u32,
    /// Summary of the concatenated returns of every run
    pub returns: Summary,
    pub runs: usize,
    /// Number of evaluation episodes each run produced, in row order
    pub episodes_per_run: Vec<usize>,
    /// `None` when no run recorded episode lengths
    pub mean_episode_length: Option<f64>,
}

/// One algorithm's curve across the dataset sizes, ordered by `num_trajs`
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmCurve {
    pub alg: String,
    pub color: RGBColor,
    pub points: Vec<CurvePoint>,
}

/// Everything needed to draw one task's figure
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSummary {
    pub task: String,
    pub display_name: String,
    pub random_score: f64,
    pub expert: Summary,
    pub curves: Vec<AlgorithmCurve>,
}

/// Pair each distinct algorithm with a palette color
///
/// Algorithms are taken in lexicographic order so the same table always gets the
/// same colors.
pub fn assign_colors(table: &ResultTable, palette: &[RGBColor]) -> Result<Vec<(String, RGBColor)>> {
    let algs = table.algs();
    if algs.len() != palette.len() {
        return Err(Error::PaletteMismatch {
            algs: algs.len(),
            colors: palette.len(),
        });
    }
    Ok(algs
        .into_iter()
        .map(String::from)
        .zip(palette.iter().copied())
        .collect())
}

/// Check that every row of a task carries the same expert returns and summarize them
pub fn expert_summary(task: &str, task_table: &ResultTable) -> Result<Summary> {
    let experts = task_table.column_expert_returns();
    let Some((&first, rest)) = experts.split_first() else {
        return Err(Error::EmptySample(format!("no rows for task `{task}`")));
    };

    for (i, &other) in rest.iter().enumerate() {
        let deviation = total_abs_deviation(first, other).unwrap_or(f64::INFINITY);
        // NaN never compares within tolerance
        if !(deviation <= EXPERT_TOLERANCE) {
            return Err(Error::InconsistentExpert {
                task: task.into(),
                row: i + 1,
                deviation,
            });
        }
    }

    Summary::of(first, || format!("expert returns of task `{task}`"))
}

/// Pool all runs of one (task, algorithm, num_trajs) condition
pub fn curve_point(task: &str, alg: &str, num_trajs: u32, runs: &ResultTable) -> Result<CurvePoint> {
    if runs.is_empty() {
        return Err(Error::MissingCombination {
            task: task.into(),
            alg: alg.into(),
            num_trajs,
        });
    }

    // Runs do not always produce the same number of episodes; pool them all as-is.
    let episodes_per_run: Vec<usize> = runs.column_returns().iter().map(|r| r.len()).collect();
    debug!("{task}/{alg}/{num_trajs}: episodes per run {episodes_per_run:?}");
    if episodes_per_run.windows(2).any(|w| w[0] != w[1]) {
        warn!("{task}/{alg}/{num_trajs}: runs disagree on episode count {episodes_per_run:?}");
    }

    let pooled: Vec<f64> = runs.column_returns().concat();
    let returns = Summary::of(&pooled, || {
        format!("returns of `{alg}` on `{task}` at num_trajs = {num_trajs}")
    })?;

    let lengths: Vec<f64> = runs
        .column_lengths()
        .concat()
        .into_iter()
        .map(f64::from)
        .collect();
    let mean_episode_length = Summary::of(&lengths, String::new).ok().map(|s| s.mean);

    Ok(CurvePoint {
        num_trajs,
        returns,
        runs: runs.len(),
        episodes_per_run,
        mean_episode_length,
    })
}

/// Aggregate a whole table into one [`TaskSummary`] per task, ordered by task identifier
///
/// Every consistency check runs here, so a bad table fails before anything is drawn.
pub fn aggregate(table: &ResultTable, config: &PlotConfig) -> Result<Vec<TaskSummary>> {
    let colors = assign_colors(table, &config.palette)?;
    let sizes = table.num_trajs();

    let mut summaries = Vec::new();
    for task in table.tasks() {
        let info = config
            .task(task)
            .ok_or_else(|| Error::UnknownTask(task.into()))?;
        let task_table = table.for_task(task);

        let expert = expert_summary(task, &task_table)?;
        info!(
            "{}: expert mean {} std {} over {} episodes",
            info.display_name, expert.mean, expert.std, expert.len
        );

        let mut curves = Vec::with_capacity(colors.len());
        for (alg, color) in &colors {
            let alg_table = task_table.for_alg(alg);
            let points = sizes
                .iter()
                .map(|&n| curve_point(task, alg, n, &alg_table.for_num_trajs(n)))
                .collect::<Result<Vec<_>>>()?;
            curves.push(AlgorithmCurve {
                alg: alg.clone(),
                color: *color,
                points,
            });
        }

        summaries.push(TaskSummary {
            task: task.into(),
            display_name: info.display_name.clone(),
            random_score: info.random_score,
            expert,
            curves,
        });
    }

    Ok(summaries)
}
