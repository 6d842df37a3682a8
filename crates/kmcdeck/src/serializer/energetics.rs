use std::io;
use std::io::Write;

use log::debug;

use kd_tables::ClusterTable;
use kd_tables::SurfaceClusterRecord;

use crate::serializer::format::{fixed2, write_header, write_separator};

fn write_cluster<W: Write>(w: &mut W, cluster: &SurfaceClusterRecord) -> io::Result<()> {
    writeln!(w, "cluster {}", cluster.name)?;
    writeln!(w)?;
    writeln!(w, "  sites {}", cluster.sites)?;
    if let Some(neighboring) = &cluster.neighboring {
        writeln!(w, "  neighboring {}", neighboring)?;
    }
    writeln!(w, "  lattice_state")?;
    for entry in cluster.lattice_state.iter() {
        writeln!(w, "    {}", entry)?;
    }
    if let Some(site_types) = &cluster.site_types {
        writeln!(w, "  site_types {}", site_types)?;
    }
    if let Some(multiplicity) = cluster.graph_multiplicity {
        writeln!(w, "  graph_multiplicity {}", multiplicity)?;
    }
    if let Some(angles) = &cluster.angles {
        writeln!(w, "  angles {}", angles)?;
    }
    writeln!(w, "  cluster_eng {}", fixed2(cluster.energy))?;
    writeln!(w)?;
    writeln!(w, "end_cluster")?;
    writeln!(w)?;
    write_separator(w)
}

/// Write `energetics_input.dat`.
pub fn write_energetics<W: Write>(w: &mut W, clusters: &ClusterTable) -> io::Result<()> {
    write_header(w)?;
    writeln!(w, "energetics")?;
    writeln!(w)?;
    write_separator(w)?;
    for cluster in clusters.iter() {
        debug!("cluster {}: {} site(s), {} eV", cluster.name, cluster.sites, fixed2(cluster.energy));
        write_cluster(w, cluster)?;
    }
    writeln!(w, "end_energetics")
}
