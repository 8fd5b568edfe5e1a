//! Run configuration for the gear reduction search.

use serde::{Deserialize, Serialize};

use crate::materials::MaterialMode;

/// Inclusive diameter search range in whole millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiameterRange {
    pub min: u32,
    pub max: u32,
}

impl DiameterRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Number of grid points at the given step.
    ///
    /// An inverted range (min > max) or a zero step yields zero points, so a
    /// malformed configuration degrades to an empty candidate sequence.
    pub fn count(&self, step: u32) -> usize {
        if self.min > self.max || step == 0 {
            0
        } else {
            ((self.max - self.min) / step + 1) as usize
        }
    }

    /// Diameter at grid position `idx`. Callers keep `idx < count(step)`.
    pub fn value_at(&self, idx: usize, step: u32) -> u32 {
        self.min + idx as u32 * step
    }
}

/// Complete configuration for one search run.
///
/// Immutable once the search starts. Defaults mirror the reference design
/// brief: a Ø75 mm motor driving a fixed 260 rpm output that must deliver at
/// least 7 N·m.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearConfig {
    /// Motor envelope diameter (mm); no driven gear may exceed it.
    pub motor_diameter: f64,
    /// Fixed output shaft speed (rpm).
    pub output_speed: f64,
    /// Minimum delivered output torque (N·m).
    pub output_torque: f64,
    /// Motor rated torque lower bound (N·m); delivered torque is computed
    /// from this bound.
    pub motor_torque_lower: f64,
    /// Motor rated torque upper bound (N·m).
    pub motor_torque_upper: f64,
    /// Motor weight (g), added to the gear-train weight for the system total.
    pub motor_weight: f64,
    /// Maximum allowed motor speed (rpm).
    pub max_motor_speed: f64,
    /// Steel density (kg/mm³), used for the weight selection metric.
    pub steel_density: f64,
    /// Minimum diameter clearance between the stage-1 and stage-2 drive
    /// gears (mm); both sit next to each other across the intermediate shaft.
    pub min_clearance: f64,
    /// Minimum tooth count (anti-undercut limit for standard gears).
    pub min_teeth: u32,
    /// Module options for stage 1 (high-speed stage favours small modules).
    pub m1_options: Vec<f64>,
    /// Module options for stage 2 (low-speed stage favours large modules).
    pub m2_options: Vec<f64>,
    /// Nominal diameter ranges for the four gears (mm).
    pub d1_range: DiameterRange,
    pub d2_range: DiameterRange,
    pub d3_range: DiameterRange,
    pub d4_range: DiameterRange,
    /// Diameter scan step (mm), shared by all four ranges.
    pub step: u32,
    /// Tooth width = factor × module, per stage.
    pub width_factor1: f64,
    pub width_factor2: f64,
    /// Pressure angle (degrees) for the tooth-root strength model.
    pub pressure_angle: f64,
    /// Material selection policy for the strength check.
    pub material_mode: MaterialMode,
}

impl Default for GearConfig {
    fn default() -> Self {
        Self {
            motor_diameter: 75.0,
            output_speed: 260.0,
            output_torque: 7.0,
            motor_torque_lower: 0.7,
            motor_torque_upper: 1.2,
            motor_weight: 300.0,
            max_motor_speed: 3000.0,
            steel_density: 7.85e-6,
            min_clearance: 1.0,
            min_teeth: 17,
            m1_options: vec![0.3, 0.4, 0.5, 0.8, 1.0, 1.25, 1.5],
            m2_options: vec![0.5, 0.8, 1.0, 1.25, 1.5, 2.0, 2.5],
            d1_range: DiameterRange::new(20, 40),
            d2_range: DiameterRange::new(50, 100),
            d3_range: DiameterRange::new(18, 40),
            d4_range: DiameterRange::new(40, 80),
            step: 1,
            width_factor1: 8.0,
            width_factor2: 10.0,
            pressure_angle: 20.0,
            material_mode: MaterialMode::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_count_is_inclusive() {
        let range = DiameterRange::new(20, 40);
        assert_eq!(range.count(1), 21);
        assert_eq!(range.count(2), 11);
        assert_eq!(range.count(5), 5);
    }

    #[test]
    fn range_count_handles_uneven_step() {
        // 50, 54, ..., 98 — the last step does not land on max.
        let range = DiameterRange::new(50, 100);
        assert_eq!(range.count(4), 13);
        assert_eq!(range.value_at(12, 4), 98);
    }

    #[test]
    fn inverted_range_is_empty() {
        let range = DiameterRange::new(40, 20);
        assert_eq!(range.count(1), 0);
    }

    #[test]
    fn zero_step_is_empty() {
        let range = DiameterRange::new(20, 40);
        assert_eq!(range.count(0), 0);
    }

    #[test]
    fn default_config_is_well_formed() {
        let config = GearConfig::default();
        assert!(config.m1_options.iter().all(|m| *m > 0.0));
        assert!(config.m2_options.iter().all(|m| *m > 0.0));
        assert!(config.d1_range.count(config.step) > 0);
        assert!(config.motor_torque_lower <= config.motor_torque_upper);
    }
}
