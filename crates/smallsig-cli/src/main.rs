//! smallsig command-line interface.

mod probes;
mod report;

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use smallsig_parser::{AcCommand, AcSweep, Simulation};
use smallsig_solver::{
    AcParams, AcSweepType, CircuitSolver, angular_frequency, generate_frequencies,
};

#[derive(Parser)]
#[command(name = "smallsig")]
#[command(about = "A small-signal linear circuit simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Input netlist file (stdin when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Netlist grammar
    #[arg(long, value_enum, default_value = "spice")]
    format: Format,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// SPICE-like netlist with .ac and .print directives
    Spice,
    /// Simplified positional netlist, DC only
    Simple,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let content = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read netlist: {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read netlist from stdin")?;
            buffer
        }
    };

    let mut output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    match cli.format {
        Format::Spice => run_spice(&content, &cli, output.as_mut()),
        Format::Simple => run_simple(&content, output.as_mut()),
    }
}

fn run_spice(content: &str, cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let sim = smallsig_parser::parse(content).context("failed to parse netlist")?;

    if cli.verbose {
        let title = if sim.title.is_empty() {
            "(untitled)"
        } else {
            sim.title.as_str()
        };
        eprintln!("Circuit: {title}");
        eprintln!("Components: {}", sim.circuit.len());
        eprintln!("Voltage sources: {}", sim.circuit.num_voltage_sources());
        eprintln!("Op-amps: {}", sim.circuit.num_opamps());
        eprintln!("Probes: {}", sim.probes.len());
        eprintln!();
    }

    let mut solver = CircuitSolver::new(&sim.circuit);

    match sim.ac {
        Some(ac) => run_ac_sweep(&sim, &ac, &mut solver, out),
        None => run_dc(&sim, &mut solver, out),
    }
}

/// DC operating point: one solve, one `name = value` line per probe.
fn run_dc(sim: &Simulation, solver: &mut CircuitSolver<'_>, out: &mut dyn Write) -> Result<()> {
    solver.solve(0.0).context("DC analysis failed")?;

    for probe in &sim.probes {
        let value = probes::evaluate(solver, probe)
            .with_context(|| format!("probing '{}' failed", probe.name()))?;
        writeln!(out, "{} = {}", probe.name(), value)?;
    }

    Ok(())
}

/// AC sweep: one solve per grid frequency, probes as TSV columns.
fn run_ac_sweep(
    sim: &Simulation,
    ac: &AcCommand,
    solver: &mut CircuitSolver<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let sweep_type = match ac.sweep {
        AcSweep::Lin => AcSweepType::Linear,
        AcSweep::Dec => AcSweepType::Decade,
        AcSweep::Oct => AcSweepType::Octave,
    };
    let params = AcParams {
        fstart: ac.fstart,
        fstop: ac.fstop,
        num_points: ac.num_points,
        sweep_type,
    };
    let frequencies = generate_frequencies(&params);

    write!(out, "step\tfrequency")?;
    for probe in &sim.probes {
        write!(out, "\t{}", probe.name())?;
    }
    writeln!(out)?;

    for (step, &frequency) in frequencies.iter().enumerate() {
        solver
            .solve(angular_frequency(frequency))
            .with_context(|| format!("AC analysis failed at step {step}"))?;

        write!(out, "{step}\t{frequency}")?;
        for probe in &sim.probes {
            let value = probes::evaluate(solver, probe)
                .with_context(|| format!("probing '{}' failed", probe.name()))?;
            write!(out, "\t{value}")?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Simplified-format run: DC solve and the full legacy report.
fn run_simple(content: &str, out: &mut dyn Write) -> Result<()> {
    let circuit = smallsig_parser::parse_simple(content).context("failed to parse netlist")?;
    let mut solver = CircuitSolver::new(&circuit);
    solver.solve(0.0).context("DC analysis failed")?;
    report::write_report(&circuit, &solver, out)
}
