use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;

use log::warn;

/// An existing `lattice_input.dat`, kept as raw lines so that it is copied
/// byte for byte unless the cell size is changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatticeModel {
    lines: Vec<Vec<u8>>,
}

impl From<&[u8]> for LatticeModel {
    fn from(bytes: &[u8]) -> Self {
        Self {
            lines: bytes.split_inclusive(|&b| b == b'\n').map(<[u8]>::to_vec).collect(),
        }
    }
}

impl From<&str> for LatticeModel {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

fn mentions(line: &[u8], keyword: &[u8]) -> bool {
    line.windows(keyword.len()).any(|w| w == keyword)
}

impl LatticeModel {
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::from(fs::read(path)?.as_slice()))
    }

    /// Rewrite every `repeat_cell` line to `size`. Returns the number of
    /// lines changed.
    pub fn update_size(&mut self, size: [u32; 2]) -> usize {
        let mut changed = 0;
        for line in self.lines.iter_mut().filter(|l| mentions(l, b"repeat_cell")) {
            let eol = if line.ends_with(b"\r\n") {
                "\r\n"
            } else if line.ends_with(b"\n") {
                "\n"
            } else {
                ""
            };
            *line = format!("   repeat_cell {} {}{}", size[0], size[1], eol).into_bytes();
            changed += 1;
        }
        if changed == 0 {
            warn!("Lattice has no repeat_cell keyword; size {:?} not applied", size);
        }
        changed
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for line in &self.lines {
            w.write_all(line)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.concat()
    }
}
