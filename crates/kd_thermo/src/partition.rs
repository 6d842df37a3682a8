use std::f64::consts::PI;
use log::trace;

use crate::PhysicalConstants;
use crate::ThermoError;

fn check_temperature(temperature: f64) -> Result<(), ThermoError> {
    if temperature > 0. && temperature.is_finite() {
        Ok(())
    } else {
        Err(ThermoError::Domain("temperature must be positive", temperature))
    }
}

/// Partition functions evaluated against one set of physical constants.
///
/// All functions take the temperature in Kelvin and fail with
/// [`ThermoError::Domain`] if it is not strictly positive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThermoMath {
    constants: PhysicalConstants,
}

impl From<PhysicalConstants> for ThermoMath {
    fn from(constants: PhysicalConstants) -> Self {
        Self { constants }
    }
}

impl ThermoMath {
    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Harmonic-oscillator partition function over all modes (in meV).
    ///
    /// Each mode contributes `1 / (1 - exp(-hv/kT))`, times `exp(-hv/2kT)`
    /// if the zero-point energy is included. No modes gives exactly 1.0.
    pub fn vibrational_partition_function(&self,
        temperature: f64,
        modes: &[f64],
        include_zpe: bool
    ) -> Result<f64, ThermoError> {
        check_temperature(temperature)?;
        let kt = self.constants.kt_ev(temperature);
        let mut q_vib = 1.0;
        for &mode in modes {
            if !(mode > 0. && mode.is_finite()) {
                return Err(ThermoError::Domain("vibrational modes must be positive", mode));
            }
            let x = mode / 1000. / kt;
            let mut factor = 1. / (1. - (-x).exp());
            if include_zpe {
                factor *= (-x / 2.).exp();
            }
            q_vib *= factor;
        }
        trace!("q_vib(T={}, {:?}, zpe={}) = {}", temperature, modes, include_zpe, q_vib);
        Ok(q_vib)
    }

    /// Rigid-rotor partition function from moments of inertia in amu Å².
    ///
    /// One moment selects the linear rotor `8π²IkT/(σh²)`, three moments the
    /// non-linear rotor `(√(π·Ia·Ib·Ic)/σ)·(8π²kT/h²)^{3/2}`.
    pub fn rotational_partition_function(&self,
        temperature: f64,
        inertia: &[f64],
        symmetry_number: u32
    ) -> Result<f64, ThermoError> {
        check_temperature(temperature)?;
        if symmetry_number == 0 {
            return Err(ThermoError::Domain("symmetry number must be positive", 0.));
        }
        let c = &self.constants;
        let sigma = symmetry_number as f64;
        let theta = 8. * PI * PI * c.k_b * temperature / (c.h * c.h);

        let q_rot = match inertia {
            [i] => theta * c.inertia_si(*i) / sigma,
            [ia, ib, ic] => {
                let product = c.inertia_si(*ia) * c.inertia_si(*ib) * c.inertia_si(*ic);
                (PI * product).sqrt() / sigma * theta.powf(1.5)
            }
            _ => return Err(ThermoError::InvalidRotor { found: inertia.len() }),
        };
        trace!("q_rot(T={}, {:?}, sigma={}) = {}", temperature, inertia, symmetry_number, q_rot);
        Ok(q_rot)
    }

    /// Two-dimensional translational partition function `A·2π·m·k·T/h²`
    /// for a gas molecule of mass `mass` [kg] confined to `area` [m²].
    pub fn translational_partition_function_2d(&self,
        temperature: f64,
        area: f64,
        mass: f64
    ) -> Result<f64, ThermoError> {
        check_temperature(temperature)?;
        let c = &self.constants;
        Ok(area * 2. * PI * mass * c.k_b * temperature / (c.h * c.h))
    }

    /// Hertz-Knudsen collision factor `A/√(2π·m·k·T)`.
    pub fn collision_factor(&self,
        temperature: f64,
        area: f64,
        mass: f64
    ) -> Result<f64, ThermoError> {
        check_temperature(temperature)?;
        Ok(area / (2. * PI * mass * self.constants.k_b * temperature).sqrt())
    }
}
