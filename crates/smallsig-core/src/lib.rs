//! Circuit representation for the smallsig small-signal simulator.
//!
//! This crate provides the user-facing data model: node labels, typed
//! components, and the insertion-ordered circuit container. The analysis
//! layer lives in `smallsig-solver`.
//!
//! # Overview
//!
//! - [`NodeId`] - a user-chosen integer node label; label 0 is ground
//! - [`Component`] - a tagged variant over resistors, inductors,
//!   capacitors, independent sources, and ideal op-amps
//! - [`Circuit`] - an ordered `reference -> component` map; the ordering of
//!   voltage sources and op-amps fixes their MNA branch indices
//!
//! # Example
//!
//! ```rust
//! use smallsig_core::{Circuit, Component, NodeId};
//!
//! // Resistive divider driven by a 10 V source.
//! let mut circuit = Circuit::with_title("divider");
//! circuit
//!     .add(
//!         "V1",
//!         Component::VoltageSource {
//!             node_pos: NodeId::new(1),
//!             node_neg: NodeId::GROUND,
//!             dc_volts: 10.0,
//!             ac_volts: 0.0,
//!         },
//!     )
//!     .unwrap();
//! circuit
//!     .add(
//!         "R1",
//!         Component::Resistor {
//!             node_pos: NodeId::new(1),
//!             node_neg: NodeId::new(2),
//!             resistance: 1e3,
//!         },
//!     )
//!     .unwrap();
//! circuit
//!     .add(
//!         "R2",
//!         Component::Resistor {
//!             node_pos: NodeId::new(2),
//!             node_neg: NodeId::GROUND,
//!             resistance: 1e3,
//!         },
//!     )
//!     .unwrap();
//!
//! assert_eq!(circuit.len(), 3);
//! assert_eq!(circuit.num_voltage_sources(), 1);
//! ```

pub mod circuit;
pub mod component;
pub mod error;
pub mod node;
pub mod units;

pub use circuit::Circuit;
pub use component::Component;
pub use error::{Error, Result};
pub use node::NodeId;
