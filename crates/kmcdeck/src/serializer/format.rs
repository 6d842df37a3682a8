//! Number and keyword formatting shared by all `*_input.dat` writers.

use std::io;
use std::io::Write;

use clap::ValueEnum;

/// Width of a line in the header box and of the record separator.
pub const LINE_WIDTH: usize = 76;

/// Tab stop used by [`TagStyle::TabAligned`].
pub const TAB_STOP: usize = 26;

const HEADER_LINES: [&str; 4] = [
    "Zacros input file generated with kmcdeck",
    "Pre-exponential factors from harmonic transition-state theory",
    "",
    concat!("kmcdeck v", env!("CARGO_PKG_VERSION")),
];

/// How `simulation_input.dat` keywords are separated from their values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TagStyle {
    /// Keyword followed by spaces up to the next multiple of 26 columns.
    #[default]
    TabAligned,
    /// `keyword = value`
    KeyEquals,
}

impl TagStyle {
    pub fn line(&self, key: &str, value: &str) -> String {
        match self {
            TagStyle::TabAligned => {
                let pad = TAB_STOP - key.chars().count() % TAB_STOP;
                format!("{}{:pad$}{}", key, "", value)
            }
            TagStyle::KeyEquals => format!("{} = {}", key, value),
        }
    }
}

/// Scientific notation with three decimals, an explicit exponent sign and
/// at least two exponent digits: `2.875e+03`.
pub fn sci3(x: f64) -> String {
    let raw = format!("{:.3e}", x);
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    match exponent.parse::<i32>() {
        Ok(e) => format!("{}e{}{:02}", mantissa, if e < 0 { '-' } else { '+' }, e.abs()),
        Err(_) => raw,
    }
}

/// Energies and molecular weights: two decimals.
pub fn fixed2(x: f64) -> String {
    format!("{:.2}", x)
}

pub fn separator() -> String {
    "#".repeat(LINE_WIDTH)
}

/// The comment box every file starts with, followed by a blank line.
pub fn write_header<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w, "{}", separator())?;
    for line in HEADER_LINES {
        writeln!(w, "# {:<width$} #", line, width = LINE_WIDTH - 4)?;
    }
    writeln!(w, "{}", separator())?;
    writeln!(w)
}

/// Separator line framed by blank lines, closing a record.
pub(crate) fn write_separator<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w, "{}", separator())?;
    writeln!(w)
}
