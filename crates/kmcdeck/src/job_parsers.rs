use clap::Args;
use anyhow::Result;
use anyhow::bail;
use anyhow::anyhow;
use log::debug;

use kd_tables::ScalingFactor;
use kd_thermo::PhysicalConstants;
use kd_kinetics::TransitionStateTheory;

use crate::SimulationSettings;
use crate::serializer::TagStyle;
use crate::serializer::MechanismOptions;

fn parse_key_value(s: &str) -> Result<(String, String)> {
    let (key, value) = s.split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("empty key in '{}'", s);
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn parse_scaling(s: &str) -> Result<(String, u32)> {
    let (step, decades) = parse_key_value(s)?;
    Ok((step, decades.parse()?))
}

#[derive(Debug, Args)]
pub struct SimulationArguments {
    /// Temperature in Kelvin; repeat for one job per temperature.
    #[arg(short, long = "temperature", value_name = "KELVIN", default_values_t = [300.0])]
    pub temperatures: Vec<f64>,

    /// Total pressure in bar.
    #[arg(short, long, default_value_t = 1.0)]
    pub pressure: f64,

    /// Fix the random seed instead of drawing one per job.
    #[arg(long)]
    pub seed: Option<u32>,

    /// How keywords are separated from values in simulation_input.dat.
    #[arg(long, value_enum, default_value_t = TagStyle::TabAligned)]
    pub tag_style: TagStyle,

    /// Extra simulation_input.dat keyword, e.g. --tag max_steps=infinity
    #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub tags: Vec<(String, String)>,
}

impl SimulationArguments {
    /// Validate that all parameters make sense.
    pub fn validate(&self) -> Result<()> {
        if let Some(t) = self.temperatures.iter().find(|t| !(**t > 0.0 && t.is_finite())) {
            bail!("temperature must be positive (got {})", t);
        }
        if !(self.pressure >= 0.0 && self.pressure.is_finite()) {
            bail!("pressure must be non-negative (got {})", self.pressure);
        }
        if let Some(seed) = self.seed && seed == 0 {
            bail!("random seed must be positive");
        }
        Ok(())
    }

    pub fn settings(&self, temperature: f64) -> SimulationSettings {
        SimulationSettings {
            temperature,
            pressure: self.pressure,
            random_seed: self.seed,
            tags: self.tags.clone(),
            tag_style: self.tag_style,
        }
    }
}

/// Pre-exponential factor parameters.
#[derive(Debug, Args)]
pub struct RateModelArguments {
    /// Include zero-point energies in the vibrational partition functions.
    #[arg(long)]
    pub include_zpe: bool,

    /// Scale a step down by 10^N, overriding its own scaling, e.g. --scale CO_adsorption=3
    #[arg(long = "scale", value_name = "STEP=N", value_parser = parse_scaling)]
    pub scaling: Vec<(String, u32)>,

    /// Mark a step as stiffness_scalable.
    #[arg(long = "stiffness-scalable", value_name = "STEP")]
    pub stiffness_scalable: Vec<String>,
}

impl RateModelArguments {
    pub fn build_model(&self) -> TransitionStateTheory {
        debug!("Transition-state theory, include ZPE: {}", self.include_zpe);
        TransitionStateTheory::new(PhysicalConstants::default(), self.include_zpe)
    }

    pub fn mechanism_options(&self) -> MechanismOptions {
        MechanismOptions {
            manual_scaling: self.scaling.iter()
                .map(|(step, n)| (step.clone(), ScalingFactor::Decades(*n)))
                .collect(),
            stiffness_scalable: self.stiffness_scalable.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        simulation: SimulationArguments,
        #[command(flatten)]
        rates: RateModelArguments,
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["kd"]).unwrap();
        cli.simulation.validate().unwrap();
        assert_eq!(cli.simulation.temperatures, vec![300.0]);
        assert_eq!(cli.simulation.pressure, 1.0);
        assert_eq!(cli.simulation.seed, None);
        assert_eq!(cli.simulation.tag_style, TagStyle::TabAligned);
        assert!(!cli.rates.include_zpe);
        assert_eq!(cli.rates.mechanism_options(), MechanismOptions::default());
    }

    #[test]
    fn test_repeated_arguments() {
        let cli = Cli::try_parse_from([
            "kd", "-t", "400", "--temperature", "500", "--tag-style", "key-equals",
            "--tag", "max_steps=infinity", "--tag", "snapshots = on time 0.5",
            "--scale", "CO_adsorption=3", "--stiffness-scalable", "CO_diffusion", "--include-zpe",
        ]).unwrap();
        cli.simulation.validate().unwrap();
        assert_eq!(cli.simulation.temperatures, vec![400.0, 500.0]);
        assert_eq!(cli.simulation.tag_style, TagStyle::KeyEquals);

        let s = cli.simulation.settings(500.0);
        assert_eq!(s.temperature, 500.0);
        assert_eq!(s.tags, vec![
            ("max_steps".to_string(), "infinity".to_string()),
            ("snapshots".to_string(), "on time 0.5".to_string()),
        ]);

        let options = cli.rates.mechanism_options();
        assert_eq!(options.manual_scaling.get("CO_adsorption"), Some(&ScalingFactor::Decades(3)));
        assert!(options.stiffness_scalable.contains("CO_diffusion"));
        assert!(cli.rates.include_zpe);
    }

    #[test]
    fn test_validation() {
        let cli = Cli::try_parse_from(["kd", "-t", "300", "-t", "0"]).unwrap();
        assert!(cli.simulation.validate().is_err());
        let cli = Cli::try_parse_from(["kd", "--seed", "0"]).unwrap();
        assert!(cli.simulation.validate().is_err());
        assert!(Cli::try_parse_from(["kd", "--tag", "novalue"]).is_err());
        assert!(Cli::try_parse_from(["kd", "--scale", "step=lots"]).is_err());
    }
}
