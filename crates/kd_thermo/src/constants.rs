/// Boltzmann constant [J/K].
pub const K_B: f64 = 1.380649e-23;
/// Planck constant [J s].
pub const H_PLANCK: f64 = 6.62607015e-34;
/// Avogadro constant [1/mol].
pub const N_A: f64 = 6.02214076e23;
/// Boltzmann constant [eV/K].
pub const K_B_EV: f64 = 8.617333262e-5;
/// Atomic mass unit [kg].
pub const AMU: f64 = 1.66054e-27;
/// One square Ångström in m².
pub const ANGSTROM2: f64 = 1e-20;

/// An immutable bundle of the physical constants used by every partition
/// function. The default is CODATA 2018.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// Boltzmann constant [J/K].
    pub k_b: f64,
    /// Planck constant [J s].
    pub h: f64,
    /// Avogadro constant [1/mol].
    pub n_a: f64,
    /// Boltzmann constant [eV/K].
    pub k_b_ev: f64,
    /// Atomic mass unit [kg].
    pub amu: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            k_b: K_B,
            h: H_PLANCK,
            n_a: N_A,
            k_b_ev: K_B_EV,
            amu: AMU,
        }
    }
}

impl PhysicalConstants {
    /// Thermal energy k*T in eV.
    pub fn kt_ev(&self, temperature: f64) -> f64 {
        self.k_b_ev * temperature
    }

    /// The TST frequency factor k*T/h [1/s].
    pub fn thermal_frequency(&self, temperature: f64) -> f64 {
        self.k_b * temperature / self.h
    }

    /// Molecular weight [g/mol] to the mass of a single molecule [kg].
    pub fn molecular_mass_kg(&self, molecular_weight: f64) -> f64 {
        molecular_weight / 1000. / self.n_a
    }

    /// Moment of inertia [amu Å²] to [kg m²].
    pub fn inertia_si(&self, inertia: f64) -> f64 {
        inertia * self.amu * ANGSTROM2
    }
}

/// Area [Å²] to [m²].
pub fn angstrom2_to_m2(area: f64) -> f64 {
    area * ANGSTROM2
}
