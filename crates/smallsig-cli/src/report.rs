//! The full DC report for the simplified netlist format.

use std::io::Write;

use anyhow::Result;
use smallsig_core::{Circuit, NodeId};
use smallsig_solver::CircuitSolver;

/// Write node potentials, per-component measurements, and the total
/// dissipated power. Node labels are shifted back to the 1-based numbering
/// the simplified format uses.
pub fn write_report(
    circuit: &Circuit,
    solver: &CircuitSolver<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "Node potentials:")?;
    let mut labels: Vec<NodeId> = solver.node_map().keys().copied().collect();
    labels.sort();
    for label in labels {
        let v = solver.voltage_between(label, NodeId::GROUND)?;
        writeln!(out, "\tV({}) = {} V", label.as_i32() + 1, v.re)?;
    }
    writeln!(out)?;

    for (reference, component) in circuit.iter() {
        let Some((pos, neg)) = component.terminals() else {
            continue;
        };
        writeln!(
            out,
            "{} - [{}, {}]:",
            reference,
            neg.as_i32() + 1,
            pos.as_i32() + 1
        )?;
        writeln!(out, "\tV({reference}) = {} V", solver.voltage(reference)?.re)?;
        writeln!(out, "\tI({reference}) = {} A", solver.current(reference)?.re)?;
        writeln!(out, "\tP({reference}) = {} W", solver.power(reference)?.re)?;
        writeln!(out)?;
    }

    let mut total = 0.0;
    for (reference, component) in circuit.iter() {
        if component.is_passive() {
            total += solver.power(reference)?.re;
        }
    }
    writeln!(out, "Total dissipated power: {total} W")?;

    Ok(())
}
