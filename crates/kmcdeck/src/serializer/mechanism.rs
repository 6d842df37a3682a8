use std::io::Write;

use ahash::AHashMap;
use ahash::AHashSet;
use log::debug;
use log::warn;

use kd_tables::LatticeState;
use kd_tables::ReactionStepRecord;
use kd_tables::ScalingFactor;
use kd_kinetics::PreExponentialModel;

use crate::Deck;
use crate::DeckError;
use crate::StepRates;
use crate::serializer::format::{fixed2, sci3, write_header, write_separator};

/// Per-run overrides of the mechanism, keyed by step name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MechanismOptions {
    /// Replaces the scaling factor of a step.
    pub manual_scaling: AHashMap<String, ScalingFactor>,
    /// Steps marked `stiffness_scalable` in addition to the flagged rows.
    pub stiffness_scalable: AHashSet<String>,
}

impl MechanismOptions {
    pub fn scaling_for(&self, step: &ReactionStepRecord) -> Option<ScalingFactor> {
        self.manual_scaling.get(&step.name).copied().or(step.scaling)
    }

    pub fn is_stiffness_scalable(&self, step: &ReactionStepRecord) -> bool {
        step.stiffness_scalable || self.stiffness_scalable.contains(&step.name)
    }

    /// Warn about options naming steps the deck does not contain.
    pub fn check(&self, deck: &Deck) {
        let names = self.manual_scaling.keys().chain(self.stiffness_scalable.iter());
        for name in names.filter(|n| !deck.steps().contains(n)) {
            warn!("Option refers to unknown step '{}' (ignored)", name);
        }
    }
}

/// `# scaled ...` annotation after `pre_expon`.
fn scaling_note(scaling: &ScalingFactor) -> String {
    match scaling {
        ScalingFactor::Decades(n) => format!("1e-{}", n),
        ScalingFactor::Multiplier(x) => sci3(*x),
    }
}

fn write_state<W: Write>(w: &mut W, keyword: &str, state: &LatticeState) -> std::io::Result<()> {
    writeln!(w, "  {}", keyword)?;
    for entry in state.iter() {
        writeln!(w, "    {}", entry)?;
    }
    Ok(())
}

fn write_step<W: Write>(
    w: &mut W,
    step: &ReactionStepRecord,
    rates: &StepRates,
    stiffness_scalable: bool,
) -> std::io::Result<()> {
    writeln!(w, "reversible_step {}", step.name)?;
    writeln!(w)?;
    if let Some(gas) = step.rate.gas_species() {
        writeln!(w, "  gas_reacs_prods {} -1", gas)?;
    }
    writeln!(w, "  sites {}", step.sites)?;
    if let Some(neighboring) = &step.neighboring {
        writeln!(w, "  neighboring {}", neighboring)?;
    }
    write_state(w, "initial", &step.initial)?;
    write_state(w, "final", &step.final_state)?;
    if let Some(site_types) = &step.site_types {
        writeln!(w, "  site_types {}", site_types)?;
    }
    match &rates.scaling {
        Some(s) => writeln!(w, "  pre_expon {}   # scaled {}", sci3(rates.rates.forward), scaling_note(s))?,
        None => writeln!(w, "  pre_expon {}", sci3(rates.rates.forward))?,
    }
    writeln!(w, "  pe_ratio {}", sci3(rates.rates.ratio()))?;
    writeln!(w, "  activ_eng {}", fixed2(step.activation_energy))?;
    if let Some(prox) = step.prox_factor {
        writeln!(w, "  prox_factor {}", prox)?;
    }
    if let Some(angles) = &step.angles {
        writeln!(w, "  angles {}", angles)?;
    }
    // Bare keyword, no trailing blank.
    if stiffness_scalable {
        writeln!(w, "  stiffness_scalable")?;
    }
    writeln!(w)?;
    writeln!(w, "end_reversible_step")?;
    writeln!(w)?;
    write_separator(w)
}

/// Write `mechanism_input.dat`.
///
/// All pre-exponential factors are evaluated before the first byte is
/// written, so a failing step leaves `w` untouched.
pub fn write_mechanism<W: Write, M: PreExponentialModel>(
    w: &mut W,
    deck: &Deck,
    model: &M,
    options: &MechanismOptions,
) -> Result<(), DeckError> {
    let rates = deck.rate_table(model, options)?;

    write_header(w)?;
    writeln!(w, "mechanism")?;
    writeln!(w)?;
    write_separator(w)?;
    for (step, rates) in deck.steps().iter().zip(&rates) {
        debug!("reversible_step {}: pre_expon {} pe_ratio {}",
            step.name, sci3(rates.rates.forward), sci3(rates.rates.ratio()));
        write_step(w, step, rates, options.is_stiffness_scalable(step))?;
    }
    writeln!(w, "end_mechanism")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kd_tables::TableError;
    use kd_kinetics::TransitionStateTheory;
    use crate::testdata::{deck_input, settings};

    fn render(options: &MechanismOptions) -> String {
        let deck = deck_input().into_deck(settings()).unwrap();
        let mut buf = Vec::new();
        write_mechanism(&mut buf, &deck, &TransitionStateTheory::default(), options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_mechanism_golden() {
        let text = render(&MechanismOptions::default());
        let sep = "#".repeat(76);
        let sep = sep.as_str();
        let expected = [
            "mechanism",
            "",
            sep,
            "",
            "reversible_step CO_adsorption",
            "",
            "  gas_reacs_prods CO -1",
            "  sites 1",
            "  initial",
            "    1 * 1",
            "  final",
            "    1 CO* 1",
            "  site_types top",
            "  pre_expon 2.875e+03",
            "  pe_ratio 9.304e-14",
            "  activ_eng 0.00",
            "",
            "end_reversible_step",
            "",
            sep,
            "",
            "reversible_step CO_diffusion",
            "",
            "  sites 2",
            "  neighboring 1-2",
            "  initial",
            "    1 CO* 1",
            "    2 * 1",
            "  final",
            "    1 * 1",
            "    2 CO* 1",
            "  site_types top top",
            "  pre_expon 6.249e+09   # scaled 1e-3",
            "  pe_ratio 1.193e+00",
            "  activ_eng 0.83",
            "  prox_factor 0.5",
            "",
            "end_reversible_step",
            "",
            sep,
            "",
            "end_mechanism",
        ];
        let body: Vec<&str> = text.lines().skip(7).collect();
        assert_eq!(body, expected);
        assert!(text.ends_with("end_mechanism\n"));
    }

    #[test]
    fn test_manual_scaling_overrides_row() {
        let mut options = MechanismOptions::default();
        options.manual_scaling.insert("CO_adsorption".into(), ScalingFactor::Decades(2));
        options.manual_scaling.insert("CO_diffusion".into(), ScalingFactor::Multiplier(0.5));
        let text = render(&options);
        assert!(text.contains("  pre_expon 2.875e+01   # scaled 1e-2\n"));
        assert!(text.contains("  pre_expon 3.124e+12   # scaled 5.000e-01\n"));
        // The ratio does not depend on scaling.
        assert!(text.contains("  pe_ratio 9.304e-14\n"));
        assert!(text.contains("  pe_ratio 1.193e+00\n"));
    }

    #[test]
    fn test_invalid_manual_scaling_is_rejected() {
        let deck = deck_input().into_deck(settings()).unwrap();
        let model = TransitionStateTheory::default();
        for bad in [ScalingFactor::Decades(400), ScalingFactor::Multiplier(0.0), ScalingFactor::Multiplier(-2.0)] {
            let mut options = MechanismOptions::default();
            options.manual_scaling.insert("CO_adsorption".into(), bad);
            let mut buf = Vec::new();
            let err = write_mechanism(&mut buf, &deck, &model, &options).unwrap_err();
            assert!(matches!(err, DeckError::Table(TableError::InvalidField { ref row, field: "scaling", .. })
                if row == "CO_adsorption"));
            assert!(buf.is_empty());
        }
    }

    #[test]
    fn test_stiffness_scalable() {
        let mut options = MechanismOptions::default();
        options.stiffness_scalable.insert("CO_adsorption".into());
        let text = render(&options);
        assert!(text.contains("  activ_eng 0.00\n  stiffness_scalable\n\nend_reversible_step\n"));
        assert_eq!(text.matches("  stiffness_scalable\n").count(), 1);
        let at = text.find("stiffness_scalable").unwrap();
        assert!(at < text.find("reversible_step CO_diffusion").unwrap());

        let mut input = deck_input();
        input.steps[1].stiffness_scalable = true;
        let deck = input.into_deck(settings()).unwrap();
        let mut buf = Vec::new();
        write_mechanism(&mut buf, &deck, &TransitionStateTheory::default(), &options).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().matches("  stiffness_scalable\n").count(), 2);
    }

    #[test]
    fn test_failing_step_writes_nothing() {
        let deck = deck_input()
            .into_deck(crate::SimulationSettings { temperature: 0.0, ..settings() })
            .unwrap();
        let mut buf = Vec::new();
        let res = write_mechanism(&mut buf, &deck, &TransitionStateTheory::default(), &MechanismOptions::default());
        assert!(res.is_err());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_formatted_numbers_parse_back() {
        let text = render(&MechanismOptions::default());
        let values: Vec<f64> = text.lines()
            .filter_map(|l| l.trim().strip_prefix("pre_expon "))
            .map(|v| v.split_whitespace().next().unwrap().parse().unwrap())
            .collect();
        assert_eq!(values, vec![2.875e3, 6.249e9]);
    }
}
