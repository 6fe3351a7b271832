//! The simplified positional netlist format.
//!
//! Each line is `T nb na value`: a component type letter (`R`, `I`, or
//! `E`), the two node labels with the `+` node listed second, and the
//! value as a plain number. Node labels are 1-based with node 1 as the
//! reference node, so every label is shifted down by one on load; a
//! netlist without node 1 will solve against an arbitrary reference.
//! References are generated in file order (`R1`, `I1`, `E1`, ...).

use smallsig_core::{Circuit, Component, NodeId};

use crate::error::{Error, Result};

/// Parse a simplified positional netlist into a circuit.
pub fn parse_simple(input: &str) -> Result<Circuit> {
    let mut circuit = Circuit::new();
    let mut r_count = 0u32;
    let mut i_count = 0u32;
    let mut e_count = 0u32;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != 4 {
            return Err(Error::MalformedLine { line: line_no });
        }

        let parse_node = |token: &str| -> Result<NodeId> {
            let label: i32 = token.parse().map_err(|_| Error::InvalidNode {
                line: line_no,
                value: token.to_string(),
            })?;
            Ok(NodeId::new(label - 1))
        };
        let node_neg = parse_node(tokens[1])?;
        let node_pos = parse_node(tokens[2])?;
        let value: f64 = tokens[3].parse().map_err(|_| Error::InvalidValue {
            line: line_no,
            value: tokens[3].to_string(),
        })?;

        let (reference, component) = match tokens[0] {
            "R" => {
                r_count += 1;
                (
                    format!("R{r_count}"),
                    Component::Resistor {
                        node_pos,
                        node_neg,
                        resistance: value,
                    },
                )
            }
            "I" => {
                i_count += 1;
                (
                    format!("I{i_count}"),
                    Component::CurrentSource {
                        node_pos,
                        node_neg,
                        dc_amps: value,
                        ac_amps: 0.0,
                    },
                )
            }
            "E" => {
                e_count += 1;
                (
                    format!("E{e_count}"),
                    Component::VoltageSource {
                        node_pos,
                        node_neg,
                        dc_volts: value,
                        ac_volts: 0.0,
                    },
                )
            }
            other => {
                return Err(Error::UnknownComponentType {
                    line: line_no,
                    reference: other.to_string(),
                })
            }
        };

        circuit.add(reference, component).map_err(|err| match err {
            smallsig_core::Error::DuplicateReference(reference) => Error::DuplicateReference {
                line: line_no,
                reference,
            },
        })?;
    }

    Ok(circuit)
}
