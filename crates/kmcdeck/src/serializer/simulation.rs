use std::io;
use std::io::Write;

use log::debug;

use crate::Deck;
use crate::serializer::format::{fixed2, write_header};

fn joined<I: Iterator<Item = String>>(items: I) -> String {
    items.collect::<Vec<_>>().join(" ")
}

/// Write `simulation_input.dat`.
///
/// Gas species come from the gas table; surface species and their dentate
/// counts are collected from the cluster lattice states.
pub fn write_simulation<W: Write>(w: &mut W, deck: &Deck) -> io::Result<()> {
    let settings = deck.settings();
    let gas = deck.gas_species();
    let surface = deck.clusters().surface_species();
    debug!("simulation_input.dat: {} gas and {} surface species", gas.len(), surface.len());

    let mut lines: Vec<(&str, String)> = vec![
        ("random_seed", deck.random_seed().to_string()),
        ("temperature", settings.temperature.to_string()),
        ("pressure", settings.pressure.to_string()),
        ("n_gas_species", gas.len().to_string()),
        ("gas_specs_names", joined(gas.iter().map(|g| g.name.clone()))),
        ("gas_energies", joined(gas.iter().map(|g| fixed2(g.energy)))),
        ("gas_molec_weights", joined(gas.iter().map(|g| fixed2(g.molecular_weight)))),
        ("gas_molar_fracs", joined(gas.iter().map(|g| g.molar_fraction.to_string()))),
        ("n_surf_species", surface.len().to_string()),
        ("surf_specs_names", joined(surface.iter().map(|(name, _)| name.clone()))),
        ("surf_specs_dent", joined(surface.iter().map(|(_, dent)| dent.to_string()))),
    ];
    lines.extend(settings.tags.iter().map(|(k, v)| (k.as_str(), v.clone())));

    write_header(w)?;
    for (key, value) in lines {
        writeln!(w, "{}", settings.tag_style.line(key, &value))?;
    }
    writeln!(w, "no_restart")?;
    writeln!(w, "finish")
}
