use std::{fs, path::Path};

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rl_plot::{aggregate, Error, PlotConfig, ResultRecord, ResultTable};
use serde_json::json;
use tempfile::TempDir;

const SIZES: [u32; 4] = [1, 4, 7, 10];
const RUNS: usize = 7;

fn expert_returns() -> Vec<f64> {
    (0..10).map(|i| 19.0 + 0.2 * f64::from(i) + 0.18).collect()
}

fn records(rng: &mut StdRng, tasks: &[&str], algs: &[&str]) -> Vec<ResultRecord> {
    let mut rows = Vec::new();
    for task in tasks {
        for alg in algs {
            for n in SIZES {
                for _ in 0..RUNS {
                    // Evaluation sometimes yields a few extra episodes
                    let episodes = rng.gen_range(50..=53);
                    let returns: Vec<f64> = (0..episodes)
                        .map(|_| rng.gen_range(0.0..20.0) * f64::from(n))
                        .collect();
                    rows.push(ResultRecord {
                        task: task.to_string(),
                        alg: alg.to_string(),
                        num_trajs: n,
                        alg_traj_lengths: returns.iter().map(|r| *r as u32 + 1).collect(),
                        alg_traj_returns: returns,
                        ex_traj_returns: expert_returns(),
                    });
                }
            }
        }
    }
    rows
}

fn write_store(dir: &Path, rows: &[ResultRecord]) -> std::path::PathBuf {
    let rows: Vec<_> = rows
        .iter()
        .map(|r| {
            json!({
                "task": r.task,
                "alg": r.alg,
                "num_trajs": r.num_trajs,
                "alg_traj_returns": r.alg_traj_returns,
                "alg_traj_lengths": r.alg_traj_lengths,
                "ex_traj_returns": r.ex_traj_returns,
            })
        })
        .collect();
    let path = dir.join("results.json");
    fs::write(&path, json!({ "results": rows }).to_string()).unwrap();
    path
}

fn setup(rows: &[ResultRecord]) -> (TempDir, std::path::PathBuf, PlotConfig) {
    let dir = tempfile::tempdir().unwrap();
    let store = write_store(dir.path(), rows);
    let config = PlotConfig::default().with_output_dir(dir.path().join("figures"));
    (dir, store, config)
}

#[test]
fn cartpole_sweep() {
    let mut rng = StdRng::seed_from_u64(0);
    let rows = records(&mut rng, &["cartpole"], &["A", "B", "C"]);
    let (_dir, store, config) = setup(&rows);

    let output = rl_plot::run(&store, &config).unwrap();

    let figure = config.output_dir.join("CartPole-v0.png");
    assert_eq!(output.figures, [figure.clone()], "one figure for the one task");
    assert!(figure.is_file(), "figure written");
    assert!(output.table.is_file(), "results table written");
}

#[test]
fn one_figure_per_task() {
    let mut rng = StdRng::seed_from_u64(1);
    let rows = records(&mut rng, &["mountaincar", "cartpole"], &["bc", "dagger", "gail"]);
    let (_dir, store, config) = setup(&rows);

    rl_plot::run(&store, &config).unwrap();

    let mut pngs: Vec<String> = fs::read_dir(&config.output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .filter(|name| name.ends_with(".png"))
        .collect();
    pngs.sort();
    assert_eq!(pngs, ["CartPole-v0.png", "MountainCar-v0.png"]);
}

#[test]
fn pooled_statistics_ignore_row_order() {
    let mut rng = StdRng::seed_from_u64(2);
    let rows = records(&mut rng, &["cartpole"], &["A", "B", "C"]);
    let mut shuffled = rows.clone();
    shuffled.shuffle(&mut rng);

    let config = PlotConfig::default();
    let a = aggregate(&ResultTable::new(rows.clone()), &config).unwrap();
    let b = aggregate(&ResultTable::new(shuffled), &config).unwrap();

    for (ca, cb) in a[0].curves.iter().zip(&b[0].curves) {
        assert_eq!(ca.alg, cb.alg, "colors and order are stable");
        assert_eq!(ca.color, cb.color);
        for (pa, pb) in ca.points.iter().zip(&cb.points) {
            assert_eq!(pa.returns.len, pb.returns.len);
            assert!((pa.returns.mean - pb.returns.mean).abs() < 1e-9);
            assert!((pa.returns.std - pb.returns.std).abs() < 1e-9);
        }
    }

    // Check one point against a direct computation over the concatenation
    let pooled: Vec<f64> = rows
        .iter()
        .filter(|r| r.alg == "B" && r.num_trajs == 7)
        .flat_map(|r| r.alg_traj_returns.iter().copied())
        .collect();
    let n = pooled.len() as f64;
    let mean = pooled.iter().sum::<f64>() / n;
    let std = (pooled.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();
    let point = &a[0].curves[1].points[2];
    assert_eq!(point.num_trajs, 7);
    assert!((point.returns.mean - mean).abs() < 1e-9, "arithmetic mean");
    assert!((point.returns.std - std).abs() < 1e-9, "population std");
}

#[test]
fn too_few_algorithms() {
    let mut rng = StdRng::seed_from_u64(3);
    let rows = records(&mut rng, &["cartpole"], &["A", "B"]);
    let (_dir, store, config) = setup(&rows);

    let err = rl_plot::run(&store, &config).unwrap_err();
    assert!(matches!(err, Error::PaletteMismatch { algs: 2, colors: 3 }), "got {err:?}");
    assert!(!config.output_dir.exists(), "nothing written");
}

#[test]
fn inconsistent_expert_in_later_task() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut rows = records(&mut rng, &["cartpole", "mountaincar"], &["A", "B", "C"]);
    let last = rows.len() - 1;
    rows[last].ex_traj_returns[3] += 0.5;
    let (_dir, store, config) = setup(&rows);

    let err = rl_plot::run(&store, &config).unwrap_err();
    assert!(
        matches!(err, Error::InconsistentExpert { ref task, .. } if task == "mountaincar"),
        "got {err:?}"
    );
    assert!(!config.output_dir.exists(), "no figure drawn for the earlier task either");
}

#[test]
fn empty_expert_returns() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut rows = records(&mut rng, &["cartpole"], &["A", "B", "C"]);
    for row in &mut rows {
        row.ex_traj_returns.clear();
    }
    let (_dir, store, config) = setup(&rows);

    let err = rl_plot::run(&store, &config).unwrap_err();
    assert!(matches!(err, Error::EmptySample(_)), "got {err:?}");
    assert!(!config.output_dir.exists(), "nothing written");
}

#[test]
fn missing_result_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlotConfig::default().with_output_dir(dir.path().join("figures"));
    let err = rl_plot::run(&dir.path().join("absent.json"), &config).unwrap_err();
    assert!(matches!(err, Error::Io { .. }), "got {err:?}");
}
