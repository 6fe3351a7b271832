//! # smallsig
//!
//! A small-signal linear circuit simulator: resistors, inductors,
//! capacitors, independent sources, and ideal op-amps, analyzed by
//! Modified Nodal Analysis with a complex-valued Gaussian elimination
//! solver.
//!
//! ## Quick start
//!
//! ```rust
//! use smallsig::prelude::*;
//!
//! let netlist = "Divider\nV1 1 0 10\nR1 1 2 1k\nR2 2 0 1k\n.print V(2)\n";
//! let sim = smallsig::parse(netlist).unwrap();
//!
//! let mut solver = CircuitSolver::new(&sim.circuit);
//! solver.solve(0.0).unwrap();
//!
//! let v2 = solver.voltage_between(NodeId::new(2), NodeId::GROUND).unwrap();
//! assert!((v2.re - 5.0).abs() < 1e-9);
//! ```
//!
//! DC analysis is selected by solving at `omega = 0`; any positive angular
//! frequency runs an AC solve against the sources' AC amplitudes.

// Re-export the member crates.
pub use smallsig_core as core;
pub use smallsig_parser as parser;
pub use smallsig_solver as solver;

// Circuit representation.
pub use smallsig_core::{Circuit, Component, Error as CoreError, NodeId};

// Netlist parsing.
pub use smallsig_parser::{
    AcCommand, AcSweep, Error as ParseError, Probe, ProbeMethod, Simulation, parse, parse_simple,
};

// Analysis.
pub use smallsig_solver::{
    AcParams, AcSweepType, CircuitSolver, Error as SolverError, MnaProblem, MnaSolution,
    angular_frequency, generate_frequencies,
};

// Commonly used external types.
pub use nalgebra::{DMatrix, DVector};
pub use num_complex::Complex;

/// Prelude module containing the commonly used types.
///
/// ```rust
/// use smallsig::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Circuit, Component, NodeId};
    pub use crate::{AcCommand, Probe, ProbeMethod, Simulation, parse, parse_simple};
    pub use crate::{AcParams, AcSweepType, CircuitSolver, MnaProblem, MnaSolution};
    pub use crate::{Complex, DMatrix, DVector};
}
