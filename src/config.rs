use std::{collections::BTreeMap, path::PathBuf};

use plotters::style::{RGBColor, BLACK, BLUE, RED};

/// How a task is presented on its figure
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInfo {
    /// Figure title, also used as the output file stem
    pub display_name: String,
    /// Score of an untrained policy, drawn as the "Random" line
    pub random_score: f64,
}

impl TaskInfo {
    pub fn new(display_name: impl Into<String>, random_score: f64) -> Self {
        Self {
            display_name: display_name.into(),
            random_score,
        }
    }
}

/// Numeric styling of a figure, sizes are in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub width: u32,
    pub height: u32,
    pub title_size: u32,
    pub tick_size: u32,
    pub legend_size: u32,
    pub label_size: u32,
    pub line_width: u32,
    pub marker_size: u32,
    pub marker_width: u32,
    /// Opacity of the mean ± std band
    pub band_alpha: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            title_size: 22,
            tick_size: 18,
            legend_size: 17,
            label_size: 18,
            line_width: 3,
            marker_size: 12,
            marker_width: 5,
            band_alpha: 0.25,
        }
    }
}

/// Configuration shared by the aggregation and rendering passes
///
/// [`PlotConfig::default`] carries the classic-control task set. Other task sets
/// are built with the `with_*` methods:
///
/// ```
/// use rl_plot::{PlotConfig, TaskInfo};
///
/// let config = PlotConfig::default()
///     .with_task("acrobot", TaskInfo::new("Acrobot-v1", -500.0))
///     .with_output_dir("out/figures");
/// assert_eq!(config.tasks.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Task identifier -> presentation
    pub tasks: BTreeMap<String, TaskInfo>,
    /// Ordered line colors, one per algorithm
    pub palette: Vec<RGBColor>,
    pub style: Style,
    /// Directory the figures and the results table are written to
    pub output_dir: PathBuf,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::from([
                ("cartpole".into(), TaskInfo::new("CartPole-v0", 20.08)),
                ("mountaincar".into(), TaskInfo::new("MountainCar-v0", -200.0)),
            ]),
            palette: vec![RED, BLUE, BLACK],
            style: Style::default(),
            output_dir: PathBuf::from("figures"),
        }
    }
}

impl PlotConfig {
    /// Register or replace a task
    pub fn with_task(mut self, task: impl Into<String>, info: TaskInfo) -> Self {
        self.tasks.insert(task.into(), info);
        self
    }

    /// Replace the palette; its length fixes the number of algorithms a table must hold
    pub fn with_palette(mut self, palette: Vec<RGBColor>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn task(&self, task: &str) -> Option<&TaskInfo> {
        self.tasks.get(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables() {
        let config = PlotConfig::default();
        assert_eq!(config.palette.len(), 3, "three algorithm colors");
        assert_eq!(
            config.task("cartpole"),
            Some(&TaskInfo::new("CartPole-v0", 20.08)),
            "cartpole entry"
        );
        assert_eq!(
            config.task("mountaincar").map(|t| t.random_score),
            Some(-200.0),
            "mountaincar random baseline"
        );
        assert_eq!(config.output_dir, PathBuf::from("figures"));
    }

    #[test]
    fn builder_replaces_entries() {
        let config = PlotConfig::default()
            .with_task("cartpole", TaskInfo::new("CartPole-v1", 22.0))
            .with_palette(vec![RED])
            .with_output_dir("elsewhere");
        assert_eq!(config.tasks.len(), 2, "no duplicate task entry");
        assert_eq!(config.task("cartpole").unwrap().display_name, "CartPole-v1");
        assert_eq!(config.palette, vec![RED]);
        assert_eq!(config.output_dir, PathBuf::from("elsewhere"));
    }
}
