use std::{
    error::Error as StdError,
    fs,
    ops::Range,
    path::{Path, PathBuf},
};

use plotters::prelude::*;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::{
    aggregate::TaskSummary,
    config::{PlotConfig, Style},
    error::{Error, Result},
};

const FONT: &str = "sans-serif";
const GRAY: RGBColor = RGBColor(128, 128, 128);
const LIGHT_BLUE: RGBColor = RGBColor(173, 216, 230);
const LEGEND_SWATCH: i32 = 20;

/// Reference levels drawn as horizontal lines across the whole figure
#[derive(Debug, Clone, Copy, PartialEq, Display, EnumIter)]
pub enum Baseline {
    Expert,
    Random,
}

impl Baseline {
    pub fn color(self) -> RGBColor {
        match self {
            Self::Expert => GRAY,
            Self::Random => LIGHT_BLUE,
        }
    }

    pub fn score(self, summary: &TaskSummary) -> f64 {
        match self {
            Self::Expert => summary.expert.mean,
            Self::Random => summary.random_score,
        }
    }
}

/// Running extent of the values drawn along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    lo: f64,
    hi: f64,
}

impl Bounds {
    fn new() -> Self {
        Self {
            lo: f64::MAX,
            hi: f64::MIN,
        }
    }

    fn update(&mut self, value: f64) {
        if value < self.lo {
            self.lo = value;
        }
        if value > self.hi {
            self.hi = value;
        }
    }

    /// Widen by `ratio` of the span on both sides; a degenerate span is widened around its value
    fn padded(self, ratio: f64) -> Range<f64> {
        if self.lo > self.hi {
            return 0.0..1.0;
        }
        let span = self.hi - self.lo;
        let pad = if span > 1e-6 {
            span * ratio
        } else {
            self.hi.abs().max(1.0) * ratio
        };
        (self.lo - pad)..(self.hi + pad)
    }
}

fn axis_ranges(summary: &TaskSummary) -> (Range<f64>, Range<f64>) {
    let mut x = Bounds::new();
    let mut y = Bounds::new();
    for baseline in Baseline::iter() {
        y.update(baseline.score(summary));
    }
    for point in summary.curves.iter().flat_map(|c| &c.points) {
        x.update(f64::from(point.num_trajs));
        y.update(point.returns.lower());
        y.update(point.returns.upper());
    }
    (x.padded(0.05), y.padded(0.1))
}

/// Output location of a task's figure
pub fn figure_path(config: &PlotConfig, display_name: &str) -> PathBuf {
    config.output_dir.join(format!("{display_name}.png"))
}

/// Draw one task's figure into the configured output directory and return its path
///
/// An existing figure of the same name is overwritten.
pub fn render_task(summary: &TaskSummary, config: &PlotConfig) -> Result<PathBuf> {
    fs::create_dir_all(&config.output_dir).map_err(|source| Error::Output {
        path: config.output_dir.clone(),
        source,
    })?;
    let path = figure_path(config, &summary.display_name);
    draw(summary, &config.style, &path).map_err(|e| Error::Render(e.to_string()))?;
    Ok(path)
}

fn draw(summary: &TaskSummary, style: &Style, path: &Path) -> std::result::Result<(), Box<dyn StdError>> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_range, y_range) = axis_ranges(summary);
    let mut chart = ChartBuilder::on(&root)
        .caption(&summary.display_name, (FONT, style.title_size))
        .margin(20)
        .x_label_area_size(style.label_size * 3)
        .y_label_area_size(style.label_size * 5)
        .build_cartesian_2d(x_range.clone(), y_range)?;

    chart
        .configure_mesh()
        .x_desc("Number of Trajectories")
        .y_desc("Scores")
        .axis_desc_style((FONT, style.label_size))
        .label_style((FONT, style.tick_size))
        .draw()?;

    for baseline in Baseline::iter() {
        let y = baseline.score(summary);
        let line_style = baseline.color().stroke_width(style.line_width);
        chart
            .draw_series(LineSeries::new(
                [(x_range.start, y), (x_range.end, y)],
                line_style,
            ))?
            .label(baseline.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_SWATCH, y)], line_style));
    }

    for curve in &summary.curves {
        let color = curve.color;
        // Upper edge left to right, then lower edge back
        let band: Vec<(f64, f64)> = curve
            .points
            .iter()
            .map(|p| (f64::from(p.num_trajs), p.returns.upper()))
            .chain(
                curve
                    .points
                    .iter()
                    .rev()
                    .map(|p| (f64::from(p.num_trajs), p.returns.lower())),
            )
            .collect();
        chart.draw_series(std::iter::once(Polygon::new(
            band,
            color.mix(style.band_alpha).filled(),
        )))?;

        let line: Vec<(f64, f64)> = curve
            .points
            .iter()
            .map(|p| (f64::from(p.num_trajs), p.returns.mean))
            .collect();
        let line_style = color.stroke_width(style.line_width);
        chart
            .draw_series(LineSeries::new(line.clone(), line_style))?
            .label(curve.alg.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_SWATCH, y)], line_style));

        let marker_style = color.stroke_width(style.marker_width);
        chart.draw_series(
            line.into_iter()
                .map(|p| Cross::new(p, style.marker_size, marker_style)),
        )?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .label_font((FONT, style.legend_size))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
