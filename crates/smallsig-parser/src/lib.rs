//! Netlist parsing for the smallsig simulator.
//!
//! Two grammars are supported:
//!
//! - [`parse`] reads the SPICE-like format: a title line, component lines
//!   with SI-suffixed values and optional `AC` amplitude tails, and `.ac` /
//!   `.print` directives.
//! - [`parse_simple`] reads the simplified positional format: bare
//!   `T nb na value` lines with 1-based node labels.
//!
//! Both produce [`Circuit`](smallsig_core::Circuit) values whose component
//! ordering follows the netlist, which fixes the MNA branch indices of
//! voltage sources and op-amps.

pub mod error;
pub mod parser;
pub mod simple;

pub use error::{Error, Result};
pub use parser::{AcCommand, AcSweep, Probe, ProbeMethod, Simulation, parse};
pub use simple::parse_simple;
