// src/input/input_deck.rs
use log::warn;
use serde::Deserialize;

use crate::grid::Geometry;
use crate::input::ConfigError;

/// Physics module the run is configured for. Only hydrodynamics is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Physics {
    Hd,
    Mhd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Reconstruction {
    Flat,
    Linear,
    Weno3,
    Parabolic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeStepping {
    Euler,
    Rk2,
    Rk3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Eos {
    Ideal,
    Isothermal,
}

/// How a parabolic term is integrated by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParabolicTreatment {
    No,
    Explicit,
    SuperTimeStepping,
}

/// Build-time switches of the Kelvin-Helmholtz configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhysicsSwitches {
    pub physics: Physics,
    pub dimensions: usize,
    pub geometry: Geometry,
    pub body_force: bool,
    pub cooling: bool,
    pub reconstruction: Reconstruction,
    pub time_stepping: TimeStepping,
    pub ntracer: usize,
    pub particles: bool,
    pub dust_fluid: bool,
    pub eos: Eos,
    pub entropy_switch: bool,
    pub thermal_conduction: ParabolicTreatment,
    pub viscosity: ParabolicTreatment,
    pub rotating_frame: bool,
    pub multiple_log_files: bool,
}

impl Default for PhysicsSwitches {
    fn default() -> Self {
        PhysicsSwitches {
            physics: Physics::Hd,
            dimensions: 2,
            geometry: Geometry::Cartesian,
            body_force: false,
            cooling: false,
            reconstruction: Reconstruction::Weno3,
            time_stepping: TimeStepping::Rk3,
            ntracer: 1,
            particles: false,
            dust_fluid: false,
            eos: Eos::Ideal,
            entropy_switch: false,
            thermal_conduction: ParabolicTreatment::Explicit,
            viscosity: ParabolicTreatment::Explicit,
            rotating_frame: false,
            multiple_log_files: true,
        }
    }
}

/// Labels of the user parameter table, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterIndex {
    DelRhoByRho0 = 0,
    Reynolds = 1,
    Amp = 2,
    Y1 = 3,
    Y2 = 4,
    Sigma = 5,
    TanhA = 6,
    UFlow = 7,
    Rho0 = 8,
    Prs0 = 9,
    Length = 10,
}

impl ParameterIndex {
    pub const COUNT: usize = 11;

    pub const ALL: [ParameterIndex; ParameterIndex::COUNT] = [
        ParameterIndex::DelRhoByRho0,
        ParameterIndex::Reynolds,
        ParameterIndex::Amp,
        ParameterIndex::Y1,
        ParameterIndex::Y2,
        ParameterIndex::Sigma,
        ParameterIndex::TanhA,
        ParameterIndex::UFlow,
        ParameterIndex::Rho0,
        ParameterIndex::Prs0,
        ParameterIndex::Length,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ParameterIndex::DelRhoByRho0 => "DEL_RHO_BY_RHO0",
            ParameterIndex::Reynolds => "REYNOLDS",
            ParameterIndex::Amp => "AMP",
            ParameterIndex::Y1 => "Y1",
            ParameterIndex::Y2 => "Y2",
            ParameterIndex::Sigma => "SIGMA",
            ParameterIndex::TanhA => "TANH_A",
            ParameterIndex::UFlow => "U_FLOW",
            ParameterIndex::Rho0 => "RHO0",
            ParameterIndex::Prs0 => "PRS0",
            ParameterIndex::Length => "LENGTH",
        }
    }
}

/// The eleven user-defined parameters of the problem.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ProblemParameters {
    pub del_rho_by_rho0: f64, // density contrast across the shear layers
    pub reynolds: f64,
    pub amp: f64,    // transverse velocity perturbation amplitude
    pub y1: f64,     // lower shear interface
    pub y2: f64,     // upper shear interface
    pub sigma: f64,  // perturbation width
    pub tanh_a: f64, // shear layer thickness
    pub u_flow: f64,
    pub rho0: f64,
    pub prs0: f64,
    pub length: f64,
}

impl Default for ProblemParameters {
    /// Lecoanet et al. (2016) reference run at Re = 1e5.
    fn default() -> Self {
        ProblemParameters {
            del_rho_by_rho0: 0.0,
            reynolds: 1.0e5,
            amp: 0.01,
            y1: 0.5,
            y2: 1.5,
            sigma: 0.2,
            tanh_a: 0.05,
            u_flow: 1.0,
            rho0: 1.0,
            prs0: 10.0,
            length: 1.0,
        }
    }
}

impl ProblemParameters {
    pub fn get(&self, index: ParameterIndex) -> f64 {
        self.as_array()[index as usize]
    }

    /// Parameters laid out in table order.
    pub fn as_array(&self) -> [f64; ParameterIndex::COUNT] {
        [
            self.del_rho_by_rho0,
            self.reynolds,
            self.amp,
            self.y1,
            self.y2,
            self.sigma,
            self.tanh_a,
            self.u_flow,
            self.rho0,
            self.prs0,
            self.length,
        ]
    }

    pub fn unit_length(&self) -> f64 {
        self.length
    }

    pub fn unit_density(&self) -> f64 {
        self.rho0
    }

    pub fn unit_velocity(&self) -> f64 {
        self.u_flow
    }

    /// Dimensionless tracer diffusivity `nu = chi / (L_unit * V_unit)`,
    /// with `chi = LENGTH * (2 U_FLOW) / REYNOLDS`.
    pub fn diffusivity(&self) -> f64 {
        let del_u = 2.0 * self.u_flow;
        let chi = self.length * del_u / self.reynolds;
        chi / (self.unit_length() * self.unit_velocity())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ParameterIndex::Reynolds,
            ParameterIndex::Sigma,
            ParameterIndex::TanhA,
            ParameterIndex::Rho0,
            ParameterIndex::Prs0,
            ParameterIndex::Length,
        ];
        for index in ParameterIndex::ALL {
            let value = self.get(index);
            let invalid = !value.is_finite()
                || (positive.contains(&index) && value <= 0.0)
                || (index == ParameterIndex::UFlow && value == 0.0);
            if invalid {
                return Err(ConfigError::InvalidParameter {
                    name: index.label(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Extent of the computational domain along one direction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AxisSettings {
    pub n_cells: usize,  // active cells
    pub lower: f64,      // [code length]
    pub upper: f64,      // [code length]
    #[serde(default = "default_ghosts")]
    pub ghosts: usize,
}

fn default_ghosts() -> usize {
    2
}

impl AxisSettings {
    pub fn new(n_cells: usize, lower: f64, upper: f64) -> Self {
        AxisSettings {
            n_cells,
            lower,
            upper,
            ghosts: default_ghosts(),
        }
    }

    /// A direction that is switched off: one unit cell, no ghosts.
    pub fn collapsed() -> Self {
        AxisSettings {
            n_cells: 1,
            lower: 0.0,
            upper: 1.0,
            ghosts: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridSettings {
    pub x1: AxisSettings,
    #[serde(default)]
    pub x2: Option<AxisSettings>,
    #[serde(default)]
    pub x3: Option<AxisSettings>,
}

impl GridSettings {
    /// Axis settings for the three directions, with switched-off directions collapsed.
    pub fn axes(&self, dimensions: usize) -> [AxisSettings; 3] {
        let pick = |axis: &Option<AxisSettings>, enabled: bool| match (axis, enabled) {
            (Some(a), true) => a.clone(),
            _ => AxisSettings::collapsed(),
        };
        [
            self.x1.clone(),
            pick(&self.x2, dimensions >= 2),
            pick(&self.x3, dimensions >= 3),
        ]
    }

    pub fn validate(&self, dimensions: usize) -> Result<(), ConfigError> {
        let names = ["x1", "x2", "x3"];
        let given = [Some(&self.x1), self.x2.as_ref(), self.x3.as_ref()];
        for d in 0..dimensions {
            let axis = given[d]
                .ok_or_else(|| ConfigError::InvalidGrid(format!("missing settings for {}", names[d])))?;
            if axis.n_cells == 0 {
                return Err(ConfigError::InvalidGrid(format!("{} has no active cells", names[d])));
            }
            if !(axis.lower.is_finite() && axis.upper.is_finite()) || axis.upper <= axis.lower {
                return Err(ConfigError::InvalidGrid(format!(
                    "{} bounds [{}, {}] are not increasing",
                    names[d], axis.lower, axis.upper
                )));
            }
            if axis.ghosts == 0 {
                return Err(ConfigError::InvalidGrid(format!(
                    "{} needs at least one ghost cell",
                    names[d]
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputDeck {
    #[serde(default)]
    pub switches: PhysicsSwitches,
    #[serde(default)]
    pub parameters: ProblemParameters,
    pub grid: GridSettings,
}

impl InputDeck {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let switches = &self.switches;
        if switches.physics != Physics::Hd {
            return Err(ConfigError::UnsupportedPhysics(format!("{:?}", switches.physics)));
        }
        if !(1..=3).contains(&switches.dimensions) {
            return Err(ConfigError::UnsupportedDimensions(switches.dimensions));
        }
        if switches.ntracer == 0 {
            return Err(ConfigError::NoTracers);
        }
        self.parameters.validate()?;
        self.grid.validate(switches.dimensions)?;

        if switches.dimensions >= 2 {
            if let Some(x2) = &self.grid.x2 {
                let dy = (x2.upper - x2.lower) / x2.n_cells as f64;
                if dy > self.parameters.tanh_a {
                    warn!(
                        "shear layer of width {} is not resolved by dy = {} at Re = {}",
                        self.parameters.tanh_a, dy, self.parameters.reynolds
                    );
                }
            }
        }
        Ok(())
    }
}
