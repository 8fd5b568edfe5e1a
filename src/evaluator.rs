//! Candidate evaluation: derivation of dependent quantities and the ordered
//! hard-constraint checks.
//!
//! Constraint violations are normal, frequent outcomes — a rejected candidate
//! is a value, not an error. Checks run cheapest-first and short-circuit the
//! remaining derivation.

use std::f64::consts::PI;

use crate::config::GearConfig;
use crate::grid::RawCandidate;

/// Mesh efficiency per gear stage.
pub const STAGE_EFFICIENCY: f64 = 0.95;

/// Fraction of the solid-cylinder volume kept after tooth cutting and webbing.
pub const HOLLOWING_FACTOR: f64 = 0.5;

/// Why a candidate failed a hard constraint, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A tooth count fell below the anti-undercut minimum.
    Undercut,
    /// A center distance came out non-positive (degenerate input).
    CenterDistance,
    /// The required motor speed exceeds the allowed maximum.
    MotorSpeed,
    /// Delivered output torque falls short of the requirement.
    OutputTorque,
    /// A driven gear exceeds the motor envelope diameter.
    Envelope,
    /// The stage-1 drive gear does not clear the stage-2 drive gear.
    AxialClearance,
}

/// A candidate with every dependent quantity derived and all geometric and
/// kinematic hard constraints satisfied.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedDesign {
    pub m1: f64,
    pub m2: f64,
    /// Tooth counts for drive/driven gears of stage 1 then stage 2.
    pub z1: u32,
    pub z2: u32,
    pub z3: u32,
    pub z4: u32,
    /// Realized pitch diameters (mm), consistent with integer tooth counts.
    pub d1: f64,
    pub d2: f64,
    pub d3: f64,
    pub d4: f64,
    /// Stage transmission ratios and their product.
    pub i1: f64,
    pub i2: f64,
    pub total_ratio: f64,
    /// Center distances per stage (mm).
    pub center_distance1: f64,
    pub center_distance2: f64,
    /// Tooth widths per stage (mm).
    pub width1: f64,
    pub width2: f64,
    /// Motor speed required to hold the fixed output speed (rpm).
    pub motor_speed: f64,
    /// Output torque delivered at the lower motor-torque bound (N·m).
    pub output_torque: f64,
    /// Gear-train weight at the configured steel density (g). This is the
    /// selection metric regardless of which material later binds.
    pub gear_weight: f64,
    /// Gear-train weight plus motor weight (g).
    pub total_weight: f64,
    /// Radial stack-up: motor radius plus all four pitch radii (mm).
    pub total_length: f64,
}

/// Tooth count from a nominal diameter and module.
///
/// Ties round half away from zero, and the choice is fixed for a whole run:
/// it decides which grid points are feasible.
fn tooth_count(nominal_diameter: u32, module: f64) -> u32 {
    (nominal_diameter as f64 / module).round() as u32
}

/// Derive a candidate and apply the hard constraints in order.
pub fn evaluate(candidate: &RawCandidate, config: &GearConfig) -> Result<DerivedDesign, Rejection> {
    let RawCandidate { m1, m2, .. } = *candidate;

    let z1 = tooth_count(candidate.d1, m1);
    let z2 = tooth_count(candidate.d2, m1);
    let z3 = tooth_count(candidate.d3, m2);
    let z4 = tooth_count(candidate.d4, m2);

    if z1.min(z2).min(z3).min(z4) < config.min_teeth {
        return Err(Rejection::Undercut);
    }

    // Realized diameters differ from the grid's nominal ones: the grid
    // samples diameter space, physical gears need integer teeth.
    let d1 = z1 as f64 * m1;
    let d2 = z2 as f64 * m1;
    let d3 = z3 as f64 * m2;
    let d4 = z4 as f64 * m2;

    let i1 = z2 as f64 / z1 as f64;
    let i2 = z4 as f64 / z3 as f64;
    let total_ratio = i1 * i2;

    let center_distance1 = (d1 + d2) / 2.0;
    let center_distance2 = (d3 + d4) / 2.0;
    if center_distance1 <= 0.0 || center_distance2 <= 0.0 {
        return Err(Rejection::CenterDistance);
    }

    let width1 = config.width_factor1 * m1;
    let width2 = config.width_factor2 * m2;

    let motor_speed = config.output_speed * total_ratio;
    if motor_speed > config.max_motor_speed {
        return Err(Rejection::MotorSpeed);
    }

    let output_torque =
        config.motor_torque_lower * total_ratio * STAGE_EFFICIENCY * STAGE_EFFICIENCY;
    if output_torque < config.output_torque {
        return Err(Rejection::OutputTorque);
    }

    if d2.max(d4) > config.motor_diameter {
        return Err(Rejection::Envelope);
    }

    // The stage-2 drive gear mounts on the intermediate shaft next to the
    // stage-1 drive gear; require D1 to exceed D3 by the clearance.
    if d1 - d3 < config.min_clearance {
        return Err(Rejection::AxialClearance);
    }

    let volume = PI * (d1 / 2.0).powi(2) * width1
        + PI * (d2 / 2.0).powi(2) * width1
        + PI * (d3 / 2.0).powi(2) * width2
        + PI * (d4 / 2.0).powi(2) * width2;
    let gear_weight = HOLLOWING_FACTOR * volume * config.steel_density * 1000.0;
    let total_weight = gear_weight + config.motor_weight;

    let total_length = config.motor_diameter / 2.0 + (d1 + d2 + d3 + d4) / 2.0;

    Ok(DerivedDesign {
        m1,
        m2,
        z1,
        z2,
        z3,
        z4,
        d1,
        d2,
        d3,
        d4,
        i1,
        i2,
        total_ratio,
        center_distance1,
        center_distance2,
        width1,
        width2,
        motor_speed,
        output_torque,
        gear_weight,
        total_weight,
        total_length,
    })
}
