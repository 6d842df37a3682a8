use log::debug;

use kd_thermo::ThermoMath;
use kd_thermo::ThermoError;
use kd_thermo::PhysicalConstants;
use kd_thermo::angstrom2_to_m2;
use kd_tables::RateData;
use kd_tables::AdsorptionData;
use kd_tables::ScalingFactor;
use kd_tables::GasSpeciesRecord;
use kd_tables::ReactionStepRecord;

use crate::RateError;
use crate::PreExponentials;

pub trait PreExponentialModel {
    /// Forward and reverse pre-exponential factors of a step at `temperature`.
    /// Adsorption steps need the record of the gas species they reference.
    fn pre_exponentials(&self,
        step: &ReactionStepRecord,
        gas: Option<&GasSpeciesRecord>,
        temperature: f64,
    ) -> Result<PreExponentials, RateError>;

    /// As [`PreExponentialModel::pre_exponentials`], with an optional
    /// scaling applied to both directions.
    fn scaled_pre_exponentials(&self,
        step: &ReactionStepRecord,
        gas: Option<&GasSpeciesRecord>,
        temperature: f64,
        scaling: Option<&ScalingFactor>,
    ) -> Result<PreExponentials, RateError> {
        let pe = self.pre_exponentials(step, gas, temperature)?;
        Ok(match scaling {
            Some(s) => pe.scaled(s),
            None => pe,
        })
    }
}

/// Pre-exponential factors from harmonic transition-state theory.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionStateTheory {
    thermo: ThermoMath,
    include_zpe: bool,
}

impl TransitionStateTheory {
    pub fn new(constants: PhysicalConstants, include_zpe: bool) -> Self {
        Self {
            thermo: ThermoMath::from(constants),
            include_zpe,
        }
    }

    pub fn thermo(&self) -> &ThermoMath {
        &self.thermo
    }

    fn q_vib(&self, temperature: f64, modes: &[f64]) -> Result<f64, ThermoError> {
        self.thermo.vibrational_partition_function(temperature, modes, self.include_zpe)
    }

    /// Electronic, vibrational, rotational and 2D-translational partition
    /// function of the gas molecule, and its collision factor.
    fn gas_phase(&self,
        temperature: f64,
        ads: &AdsorptionData,
        gas: &GasSpeciesRecord,
    ) -> Result<(f64, f64), ThermoError> {
        let c = self.thermo.constants();
        let area = angstrom2_to_m2(ads.site_area);
        let mass = c.molecular_mass_kg(gas.molecular_weight);

        let q_elec = gas.degeneracy as f64;
        let q_vib = self.q_vib(temperature, &ads.vib_gas)?;
        let q_rot = self.thermo.rotational_partition_function(temperature, &gas.inertia, gas.symmetry_number)?;
        let q_trans = self.thermo.translational_partition_function_2d(temperature, area, mass)?;
        let collision = self.thermo.collision_factor(temperature, area, mass)?;
        Ok((q_elec * q_vib * q_rot * q_trans, collision))
    }

    /// Direct (non-activated) adsorption: collision theory forward, TST reverse.
    pub fn non_activated_adsorption(&self,
        temperature: f64,
        ads: &AdsorptionData,
        gas: &GasSpeciesRecord,
    ) -> Result<PreExponentials, ThermoError> {
        let (q_gas, collision) = self.gas_phase(temperature, ads, gas)?;
        let q_ads = self.q_vib(temperature, &ads.vib_ads)?;
        let kt_h = self.thermo.constants().thermal_frequency(temperature);
        Ok(PreExponentials::new(collision, q_gas / q_ads * kt_h))
    }

    /// Adsorption through a transition state with partition function `q_ts`.
    pub fn activated_adsorption(&self,
        temperature: f64,
        ads: &AdsorptionData,
        vib_ts: &[f64],
        gas: &GasSpeciesRecord,
    ) -> Result<PreExponentials, ThermoError> {
        let (q_gas, collision) = self.gas_phase(temperature, ads, gas)?;
        let q_ads = self.q_vib(temperature, &ads.vib_ads)?;
        let q_ts = self.q_vib(temperature, vib_ts)?;
        let kt_h = self.thermo.constants().thermal_frequency(temperature);
        Ok(PreExponentials::new(q_ts / q_gas * collision, q_ts / q_ads * kt_h))
    }

    pub fn surface_reaction(&self,
        temperature: f64,
        vib_initial: &[f64],
        vib_ts: &[f64],
        vib_final: &[f64],
    ) -> Result<PreExponentials, ThermoError> {
        let q_initial = self.q_vib(temperature, vib_initial)?;
        let q_ts = self.q_vib(temperature, vib_ts)?;
        let q_final = self.q_vib(temperature, vib_final)?;
        let kt_h = self.thermo.constants().thermal_frequency(temperature);
        Ok(PreExponentials::new(q_ts / q_initial * kt_h, q_ts / q_final * kt_h))
    }
}

/// The gas record an adsorption step refers to.
fn gas_for<'g>(
    step: &ReactionStepRecord,
    ads: &AdsorptionData,
    gas: Option<&'g GasSpeciesRecord>,
) -> Result<&'g GasSpeciesRecord, RateError> {
    gas.filter(|g| g.name == ads.gas_species)
        .ok_or_else(|| RateError::MissingGasSpecies {
            step: step.name.clone(),
            species: ads.gas_species.clone(),
        })
}

impl PreExponentialModel for TransitionStateTheory {
    fn pre_exponentials(&self,
        step: &ReactionStepRecord,
        gas: Option<&GasSpeciesRecord>,
        temperature: f64,
    ) -> Result<PreExponentials, RateError> {
        let result = match &step.rate {
            RateData::NonActivatedAdsorption(ads) => {
                self.non_activated_adsorption(temperature, ads, gas_for(step, ads, gas)?)
            }
            RateData::ActivatedAdsorption { adsorption, vib_ts } => {
                self.activated_adsorption(temperature, adsorption, vib_ts, gas_for(step, adsorption, gas)?)
            }
            RateData::SurfaceReaction { vib_initial, vib_ts, vib_final } => {
                self.surface_reaction(temperature, vib_initial, vib_ts, vib_final)
            }
        };
        let pe = result.map_err(|source| RateError::Thermo { step: step.name.clone(), source })?;
        debug!("{} ({}): pe_fwd = {:e}, pe_rev = {:e}", step.name, step.kind(), pe.forward, pe.reverse);
        Ok(pe)
    }
}
