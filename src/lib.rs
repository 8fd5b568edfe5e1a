//! Exhaustive design search for a two-stage gear reduction.
//!
//! Given a motor envelope and fixed output requirements, the crate scans the
//! Cartesian product of module options and nominal gear diameters, derives
//! the dependent quantities for each candidate (tooth counts, realized
//! diameters, ratios, center distances, speeds, torques, weight), applies the
//! kinematic and geometric hard constraints plus a tooth-root strength check,
//! and keeps the lightest feasible design.
//!
//! The design space is small and finite by construction; enumeration is the
//! algorithm, not an approximation of one. With the default `parallel`
//! feature the scan is partitioned across rayon workers and reduced with a
//! deterministic tie-break, so results are identical at any thread count.
//!
//! # Example
//!
//! ```
//! use gear_train_opt::{run_search, GearConfig};
//!
//! // Coarsen the diameter step for a quick scan.
//! let config = GearConfig {
//!     step: 4,
//!     ..GearConfig::default()
//! };
//!
//! let outcome = run_search(&config);
//! match &outcome.best {
//!     Some(best) => println!("{best}"),
//!     None => println!(
//!         "no feasible design among {} candidates",
//!         outcome.evaluated
//!     ),
//! }
//! ```

pub mod config;
pub mod evaluator;
pub mod grid;
pub mod materials;
pub mod search;
pub mod tracker;

pub use config::{DiameterRange, GearConfig};
pub use evaluator::{evaluate, DerivedDesign, Rejection};
pub use grid::{CandidateGrid, RawCandidate};
pub use materials::{
    Material, MaterialCatalog, MaterialCheck, MaterialKey, MaterialMode, StrengthChecker,
};
pub use search::{run_search, run_search_with_progress, ProgressUpdate, SearchOutcome};
pub use tracker::{BestDesign, OptimizationTracker};
