//! Best-so-far selection over the stream of accepted designs.

use std::fmt;

use crate::config::GearConfig;
use crate::evaluator::DerivedDesign;
use crate::materials::MaterialCheck;

/// Snapshot of the lightest accepted design seen so far.
///
/// Replacement is atomic: either the whole record swaps or nothing does.
/// `grid_index` is the candidate's lexicographic position, used to break
/// weight ties deterministically regardless of scan parallelism.
#[derive(Debug, Clone, PartialEq)]
pub struct BestDesign {
    pub grid_index: usize,
    pub design: DerivedDesign,
    /// The material that validated the design (present whenever material
    /// validation ran).
    pub material: Option<MaterialCheck>,
    /// Gear-train weight at the bound material's density (g); equals the
    /// design's steel-density weight when no material is bound.
    pub gear_weight: f64,
    pub total_weight: f64,
}

impl BestDesign {
    /// Assemble a record from an accepted design.
    ///
    /// The recorded weights use the bound material's density; the selection
    /// metric stays the design's steel-density weight so the choice of
    /// material never reorders candidates mid-run.
    pub fn new(
        grid_index: usize,
        design: DerivedDesign,
        material: Option<MaterialCheck>,
        config: &GearConfig,
    ) -> Self {
        let gear_weight = match &material {
            Some(check) => design.gear_weight * (check.density / config.steel_density),
            None => design.gear_weight,
        };
        let total_weight = gear_weight + config.motor_weight;
        Self {
            grid_index,
            design,
            material,
            gear_weight,
            total_weight,
        }
    }

    /// Weight the tracker minimizes (g).
    fn selection_weight(&self) -> f64 {
        self.design.gear_weight
    }
}

impl fmt::Display for BestDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.design;
        writeln!(f, "Best design:")?;
        writeln!(f, "  Modules: m1={:.2} mm, m2={:.2} mm", d.m1, d.m2)?;
        writeln!(
            f,
            "  Teeth: z1={}, z2={}, z3={}, z4={}",
            d.z1, d.z2, d.z3, d.z4
        )?;
        writeln!(
            f,
            "  Pitch diameters: D1={:.1}, D2={:.1}, D3={:.1}, D4={:.1} mm",
            d.d1, d.d2, d.d3, d.d4
        )?;
        writeln!(
            f,
            "  Tooth widths: b1={:.1} mm, b2={:.1} mm",
            d.width1, d.width2
        )?;
        writeln!(
            f,
            "  Center distances: a1={:.1} mm, a2={:.1} mm",
            d.center_distance1, d.center_distance2
        )?;
        writeln!(
            f,
            "  Ratios: i1={:.2}, i2={:.2}, total={:.2}",
            d.i1, d.i2, d.total_ratio
        )?;
        writeln!(f, "  Required motor speed: {:.0} rpm", d.motor_speed)?;
        writeln!(f, "  Delivered output torque: {:.2} N·m", d.output_torque)?;
        if let Some(material) = &self.material {
            writeln!(
                f,
                "  Material: {} (σ_max={:.1} MPa, σ_allow={:.1} MPa)",
                material.key.as_str(),
                material.max_stress,
                material.allow_stress
            )?;
        }
        writeln!(f, "  Gear-train weight: {:.1} g", self.gear_weight)?;
        writeln!(f, "  Total system weight: {:.1} g", self.total_weight)?;
        write!(f, "  Radial stack-up: {:.1} mm", d.total_length)
    }
}

/// Folds accepted designs into a single best record under a strict-minimum
/// rule.
///
/// A new record replaces the current one only when its weight is strictly
/// lower, or equal with a strictly lower grid index. Under sequential
/// enumeration indices only grow, so this is exactly first-found-wins; under
/// a parallel reduction it makes the result independent of partitioning.
#[derive(Debug, Clone, Default)]
pub struct OptimizationTracker {
    best: Option<BestDesign>,
}

impl OptimizationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one accepted design to the fold.
    pub fn offer(&mut self, candidate: BestDesign) {
        match &self.best {
            None => self.best = Some(candidate),
            Some(current) => {
                if prefer(&candidate, current) {
                    self.best = Some(candidate);
                }
            }
        }
    }

    /// Merge another tracker's result (parallel combine step).
    pub fn merge(&mut self, other: OptimizationTracker) {
        if let Some(candidate) = other.best {
            self.offer(candidate);
        }
    }

    pub fn best(&self) -> Option<&BestDesign> {
        self.best.as_ref()
    }

    /// Finish the fold: the lightest feasible design, or `None` when the
    /// whole grid was infeasible.
    pub fn into_best(self) -> Option<BestDesign> {
        self.best
    }
}

fn prefer(candidate: &BestDesign, current: &BestDesign) -> bool {
    match candidate
        .selection_weight()
        .total_cmp(&current.selection_weight())
    {
        std::cmp::Ordering::Less => true,
        std::cmp::Ordering::Equal => candidate.grid_index < current.grid_index,
        std::cmp::Ordering::Greater => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GearConfig;
    use crate::evaluator::evaluate;
    use crate::grid::RawCandidate;

    fn design_with_width_scale(scale: f64) -> DerivedDesign {
        // Scaling the width factors scales weight linearly without touching
        // any other constraint.
        let config = GearConfig {
            output_torque: 5.0,
            width_factor1: 8.0 * scale,
            width_factor2: 10.0 * scale,
            ..GearConfig::default()
        };
        let candidate = RawCandidate {
            m1: 0.5,
            m2: 1.0,
            d1: 25,
            d2: 75,
            d3: 20,
            d4: 60,
        };
        evaluate(&candidate, &config).expect("reference design is feasible")
    }

    fn record(grid_index: usize, scale: f64) -> BestDesign {
        BestDesign::new(
            grid_index,
            design_with_width_scale(scale),
            None,
            &GearConfig::default(),
        )
    }

    #[test]
    fn starts_with_sentinel() {
        let tracker = OptimizationTracker::new();
        assert!(tracker.best().is_none());
    }

    #[test]
    fn keeps_strictly_lighter_design() {
        let mut tracker = OptimizationTracker::new();
        tracker.offer(record(0, 1.0));
        tracker.offer(record(1, 0.5));
        assert_eq!(tracker.best().unwrap().grid_index, 1);
    }

    #[test]
    fn ignores_heavier_design() {
        let mut tracker = OptimizationTracker::new();
        tracker.offer(record(0, 1.0));
        tracker.offer(record(1, 2.0));
        assert_eq!(tracker.best().unwrap().grid_index, 0);
    }

    #[test]
    fn equal_weight_keeps_first_found() {
        let mut tracker = OptimizationTracker::new();
        tracker.offer(record(3, 1.0));
        tracker.offer(record(7, 1.0));
        assert_eq!(tracker.best().unwrap().grid_index, 3);
    }

    #[test]
    fn equal_weight_lower_index_wins_on_merge() {
        // Partitions may meet in either order; the lower index must win.
        let mut left = OptimizationTracker::new();
        left.offer(record(9, 1.0));
        let mut right = OptimizationTracker::new();
        right.offer(record(2, 1.0));

        left.merge(right);
        assert_eq!(left.into_best().unwrap().grid_index, 2);
    }

    #[test]
    fn material_density_adjusts_recorded_weight_only() {
        use crate::materials::{MaterialCatalog, MaterialKey, MaterialMode, StrengthChecker};

        let config = GearConfig {
            output_torque: 5.0,
            ..GearConfig::default()
        };
        let design = design_with_width_scale(1.0);
        let checker = StrengthChecker::new(config.pressure_angle);
        let catalog = MaterialCatalog::default();
        let binding = checker
            .validate(&catalog, MaterialMode::Fixed(MaterialKey::Steel), &design, 0.7)
            .unwrap();

        let steel_metric = design.gear_weight;
        let best = BestDesign::new(0, design, Some(binding), &config);
        // Steel density equals the metric density here, so both agree.
        assert!((best.gear_weight - steel_metric).abs() < 1e-9);
        assert!((best.total_weight - (steel_metric + config.motor_weight)).abs() < 1e-9);
    }
}
