//! Material catalog and tooth-root strength validation.
//!
//! Geometry that survives the hard constraints still has to carry the load:
//! the maximum bending stress at any tooth root must stay under the
//! material's allowable stress, and the root thickness must be adequate for
//! the material class (plastics need proportionally thicker roots than
//! steel). Validation either binds one material to the design or rejects the
//! candidate outright.

use serde::{Deserialize, Serialize};

use crate::evaluator::{DerivedDesign, STAGE_EFFICIENCY};

/// Stress correction factor Y_S (simplified, standard gears).
const STRESS_CORRECTION: f64 = 1.0;

/// Contact ratio factor Y_ε (simplified).
const CONTACT_RATIO_FACTOR: f64 = 0.7;

/// Dedendum coefficient used in the root-thickness estimate.
const DEDENDUM_COEFF: f64 = 1.25;

/// Supported gear materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKey {
    Steel,
    Peek,
    Pom,
    Nylon,
}

impl MaterialKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialKey::Steel => "steel",
            MaterialKey::Peek => "peek",
            MaterialKey::Pom => "pom",
            MaterialKey::Nylon => "nylon",
        }
    }
}

/// Material selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialMode {
    /// Try catalog materials lightest-first; bind the first that passes.
    #[default]
    Auto,
    /// Exactly this material must pass, otherwise the candidate is rejected.
    Fixed(MaterialKey),
}

/// Strength-relevant properties of one candidate material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub key: MaterialKey,
    pub name: &'static str,
    /// Density (kg/mm³).
    pub density: f64,
    /// Bending fatigue limit σ_F (MPa).
    pub sigma_f: f64,
    /// Minimum tooth-root-thickness / module ratio this material tolerates.
    pub sf_min_ratio: f64,
    /// Safety factor dividing σ_F into the allowable stress.
    pub safety_factor: f64,
}

impl Material {
    /// Case-hardened alloy steel (20CrMnTi).
    pub fn steel() -> Self {
        Self {
            key: MaterialKey::Steel,
            name: "Alloy steel (20CrMnTi)",
            density: 7.85e-6,
            sigma_f: 600.0,
            sf_min_ratio: 0.3,
            safety_factor: 2.0,
        }
    }

    pub fn peek() -> Self {
        Self {
            key: MaterialKey::Peek,
            name: "PEEK",
            density: 1.32e-6,
            sigma_f: 90.0,
            sf_min_ratio: 0.8,
            safety_factor: 2.5,
        }
    }

    pub fn pom() -> Self {
        Self {
            key: MaterialKey::Pom,
            name: "POM (acetal)",
            density: 1.41e-6,
            sigma_f: 65.0,
            sf_min_ratio: 1.0,
            safety_factor: 3.0,
        }
    }

    pub fn nylon() -> Self {
        Self {
            key: MaterialKey::Nylon,
            name: "Nylon 66 (PA66)",
            density: 1.15e-6,
            sigma_f: 70.0,
            sf_min_ratio: 0.9,
            safety_factor: 2.8,
        }
    }

    /// Allowable bending stress (MPa).
    pub fn allowable_stress(&self) -> f64 {
        self.sigma_f / self.safety_factor
    }
}

/// Static table of candidate materials.
#[derive(Debug, Clone)]
pub struct MaterialCatalog {
    entries: Vec<Material>,
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self {
            entries: vec![
                Material::steel(),
                Material::peek(),
                Material::pom(),
                Material::nylon(),
            ],
        }
    }
}

impl MaterialCatalog {
    pub fn get(&self, key: MaterialKey) -> Option<&Material> {
        self.entries.iter().find(|m| m.key == key)
    }

    pub fn entries(&self) -> &[Material] {
        &self.entries
    }

    /// Catalog entries in automatic-mode priority order: density ascending,
    /// catalog order breaking density ties.
    pub fn by_density(&self) -> Vec<&Material> {
        let mut sorted: Vec<&Material> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.density.total_cmp(&b.density));
        sorted
    }
}

/// Outcome of checking one material against one design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialCheck {
    pub key: MaterialKey,
    /// Largest tooth-root bending stress over the four gears (MPa).
    pub max_stress: f64,
    pub allow_stress: f64,
    pub strength_ok: bool,
    pub root_ok: bool,
    /// allow_stress / max_stress; +∞ for an unloaded mesh.
    pub safety_margin: f64,
    pub density: f64,
}

impl MaterialCheck {
    pub fn suitable(&self) -> bool {
        self.strength_ok && self.root_ok
    }
}

/// Pure strength model: a function of design geometry and load only.
#[derive(Debug, Clone, Copy)]
pub struct StrengthChecker {
    root_ratio: f64,
}

impl StrengthChecker {
    pub fn new(pressure_angle_deg: f64) -> Self {
        let alpha = pressure_angle_deg.to_radians();
        let root_ratio =
            std::f64::consts::FRAC_PI_2 * alpha.cos() - 2.0 * DEDENDUM_COEFF * alpha.tan();
        Self { root_ratio }
    }

    /// Tooth-root thickness / module ratio implied by the tooth geometry.
    /// Independent of module for standard gears.
    pub fn root_thickness_ratio(&self) -> f64 {
        self.root_ratio
    }

    /// Tooth-root bending stress (MPa):
    /// σ_F = 2·T·Y_F·Y_S·Y_ε / (b·m²·z), with Y_F = 2.1 + 3.5/z and T in
    /// N·mm. Degenerate input (z < 12, non-positive width or module) yields
    /// +∞ so it can never pass a check.
    pub fn bending_stress(&self, module: f64, teeth: u32, width: f64, torque_nm: f64) -> f64 {
        if teeth < 12 || width <= 0.0 || module <= 0.0 {
            return f64::INFINITY;
        }
        let z = teeth as f64;
        let y_f = 2.1 + 3.5 / z;
        let t = torque_nm * 1000.0;
        (2.0 * t * y_f * STRESS_CORRECTION * CONTACT_RATIO_FACTOR) / (width * module * module * z)
    }

    /// Check one material against a design loaded at `motor_torque` (N·m).
    ///
    /// Stage loads: the stage-1 drive gear carries the motor torque, its mate
    /// sees it multiplied by the tooth ratio; stage 2 receives the stage-1
    /// output derated by one mesh efficiency.
    pub fn check(
        &self,
        material: &Material,
        design: &DerivedDesign,
        motor_torque: f64,
    ) -> MaterialCheck {
        let t1 = motor_torque;
        let t2 = t1 * design.i1 * STAGE_EFFICIENCY;

        let stresses = [
            self.bending_stress(design.m1, design.z1, design.width1, t1),
            self.bending_stress(design.m1, design.z2, design.width1, t1 * design.i1),
            self.bending_stress(design.m2, design.z3, design.width2, t2),
            self.bending_stress(design.m2, design.z4, design.width2, t2 * design.i2),
        ];
        let max_stress = stresses.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let allow_stress = material.allowable_stress();

        let strength_ok = max_stress <= allow_stress;
        let root_ok = self.root_ratio >= material.sf_min_ratio;
        let safety_margin = if max_stress > 0.0 {
            allow_stress / max_stress
        } else {
            f64::INFINITY
        };

        MaterialCheck {
            key: material.key,
            max_stress,
            allow_stress,
            strength_ok,
            root_ok,
            safety_margin,
            density: material.density,
        }
    }

    /// Bind a material to a geometry-feasible design, or reject it.
    ///
    /// Automatic mode walks the catalog lightest-first and binds the first
    /// material passing both checks. Fixed mode checks only the named
    /// material and fails hard when it does not pass, or when the catalog
    /// does not contain it.
    pub fn validate(
        &self,
        catalog: &MaterialCatalog,
        mode: MaterialMode,
        design: &DerivedDesign,
        motor_torque: f64,
    ) -> Option<MaterialCheck> {
        match mode {
            MaterialMode::Auto => catalog
                .by_density()
                .into_iter()
                .map(|material| self.check(material, design, motor_torque))
                .find(MaterialCheck::suitable),
            MaterialMode::Fixed(key) => {
                let material = catalog.get(key)?;
                let check = self.check(material, design, motor_torque);
                check.suitable().then_some(check)
            }
        }
    }
}
