//! Search driver: enumerate, evaluate, validate, select.
//!
//! Every candidate in the grid is visited; there is no early exit on a
//! "good enough" design. Each evaluation is a pure function of the candidate
//! and the configuration, so the scan parallelizes over index ranges when the
//! `parallel` feature is enabled, with results bit-identical to the
//! sequential scan.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::GearConfig;
use crate::evaluator::{evaluate, DerivedDesign};
use crate::grid::{CandidateGrid, RawCandidate};
use crate::materials::{MaterialCatalog, MaterialCheck, StrengthChecker};
use crate::tracker::{BestDesign, OptimizationTracker};

/// Candidates between progress reports in the sequential scan.
const PROGRESS_INTERVAL: usize = 10_000;

/// Result of one complete search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Lightest feasible design, or `None` when the entire grid is
    /// infeasible. Infeasibility is a normal result, not an error.
    pub best: Option<BestDesign>,
    /// Candidates enumerated (the full grid size).
    pub evaluated: usize,
    /// Candidates that passed both the hard constraints and material
    /// validation.
    pub feasible: usize,
}

/// Progress snapshot handed to the optional callback.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub completed: usize,
    pub total: usize,
    pub feasible: usize,
    /// Selection-metric weight of the current best, if any (g).
    pub best_weight: Option<f64>,
}

/// Run the full search.
///
/// Uses the parallel scan when the `parallel` feature is enabled, otherwise
/// the sequential scan. Both produce identical outcomes for identical
/// configurations.
pub fn run_search(config: &GearConfig) -> SearchOutcome {
    #[cfg(feature = "parallel")]
    {
        parallel_scan(config)
    }
    #[cfg(not(feature = "parallel"))]
    {
        run_search_with_progress::<fn(ProgressUpdate)>(config, None)
    }
}

/// Sequential scan with an optional progress callback, reported every
/// [`PROGRESS_INTERVAL`] candidates and once at the end.
pub fn run_search_with_progress<F>(config: &GearConfig, mut on_progress: Option<F>) -> SearchOutcome
where
    F: FnMut(ProgressUpdate),
{
    let grid = CandidateGrid::new(config);
    let checker = StrengthChecker::new(config.pressure_angle);
    let catalog = MaterialCatalog::default();

    let mut tracker = OptimizationTracker::new();
    let mut feasible = 0usize;
    let total = grid.len();

    for (index, candidate) in grid.iter() {
        if let Some((design, material)) = accept(&candidate, config, &checker, &catalog) {
            feasible += 1;
            tracker.offer(BestDesign::new(index, design, Some(material), config));
        }

        let completed = index + 1;
        if let Some(progress) = on_progress.as_mut() {
            if completed % PROGRESS_INTERVAL == 0 || completed == total {
                progress(ProgressUpdate {
                    completed,
                    total,
                    feasible,
                    best_weight: tracker.best().map(|b| b.design.gear_weight),
                });
            }
        }
    }

    SearchOutcome {
        best: tracker.into_best(),
        evaluated: total,
        feasible,
    }
}

/// Evaluate one candidate through both feasibility stages.
fn accept(
    candidate: &RawCandidate,
    config: &GearConfig,
    checker: &StrengthChecker,
    catalog: &MaterialCatalog,
) -> Option<(DerivedDesign, MaterialCheck)> {
    let design = evaluate(candidate, config).ok()?;
    let material = checker.validate(
        catalog,
        config.material_mode,
        &design,
        config.motor_torque_lower,
    )?;
    Some((design, material))
}

/// Parallel scan: partition the index range, fold per worker, merge with the
/// tracker's replace rule. The index tie-break keeps the result independent
/// of thread count and chunking.
#[cfg(feature = "parallel")]
fn parallel_scan(config: &GearConfig) -> SearchOutcome {
    let grid = CandidateGrid::new(config);
    let checker = StrengthChecker::new(config.pressure_angle);
    let catalog = MaterialCatalog::default();
    let total = grid.len();

    let (tracker, feasible) = (0..total)
        .into_par_iter()
        .fold(
            || (OptimizationTracker::new(), 0usize),
            |(mut tracker, mut feasible), index| {
                let candidate = grid.candidate_at(index);
                if let Some((design, material)) = accept(&candidate, config, &checker, &catalog) {
                    feasible += 1;
                    tracker.offer(BestDesign::new(index, design, Some(material), config));
                }
                (tracker, feasible)
            },
        )
        .reduce(
            || (OptimizationTracker::new(), 0usize),
            |(mut left, lcount), (right, rcount)| {
                left.merge(right);
                (left, lcount + rcount)
            },
        );

    SearchOutcome {
        best: tracker.into_best(),
        evaluated: total,
        feasible,
    }
}
