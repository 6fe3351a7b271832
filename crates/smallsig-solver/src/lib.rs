//! MNA assembly and linear analysis for the smallsig simulator.
//!
//! The analysis pipeline runs in one direction:
//!
//! ```text
//! Circuit -> (node renumbering, per-omega lowering) -> MnaProblem
//!         -> [A | z] -> Gaussian elimination -> MnaSolution -> measurements
//! ```
//!
//! [`CircuitSolver`] drives the whole pipeline for a borrowed
//! [`Circuit`](smallsig_core::Circuit); [`MnaProblem`] and the
//! [`linear`] module are usable on their own for callers that already work
//! in dense node indices.
//!
//! Solving is one-shot and synchronous: every call to
//! [`CircuitSolver::solve`] rebuilds the system for the requested angular
//! frequency, and independent solvers over independent circuits may run in
//! parallel without coordination.

pub mod ac;
pub mod analysis;
pub mod error;
pub mod linear;
pub mod matrix;
pub mod mna;

pub use ac::{AcParams, AcSweepType, angular_frequency, generate_frequencies};
pub use analysis::CircuitSolver;
pub use error::{Error, Result};
pub use mna::{MnaProblem, MnaSolution};
