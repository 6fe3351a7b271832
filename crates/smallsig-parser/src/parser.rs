//! The SPICE-like netlist grammar.
//!
//! The first line of the input is the title. Every following non-empty
//! line is either a component (`R1 1 2 4.7k`, `V1 1 0 10 AC 1`,
//! `OPA1 0 2 3`) or a dot-directive. Recognized directives are
//! `.ac lin|dec|oct N fstart fstop` and `.print` with probes such as
//! `V(2)`, `Vmag(1, 2)`, `I(R1)`, `Pph(C1)`; anything else is skipped with
//! a warning. Values accept SI suffixes (`k`, `u`, `Meg`, ...).

use smallsig_core::units::parse_value;
use smallsig_core::{Circuit, Component, NodeId};

use crate::error::{Error, Result};

/// How a complex measurement is rendered as a real number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeMethod {
    /// Real part at DC, modulus for AC.
    #[default]
    Default,
    Magnitude,
    Phase,
    Real,
    Imaginary,
}

impl ProbeMethod {
    /// Parse a probe-name suffix: empty, `re`, `im`, `mag`, or `ph`.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "" => Some(ProbeMethod::Default),
            "re" => Some(ProbeMethod::Real),
            "im" => Some(ProbeMethod::Imaginary),
            "mag" => Some(ProbeMethod::Magnitude),
            "ph" => Some(ProbeMethod::Phase),
            _ => None,
        }
    }

    /// Suffix used in displayed probe names; phase renders as `p`.
    pub fn display_suffix(self) -> &'static str {
        match self {
            ProbeMethod::Default => "",
            ProbeMethod::Magnitude => "mag",
            ProbeMethod::Phase => "p",
            ProbeMethod::Real => "re",
            ProbeMethod::Imaginary => "im",
        }
    }
}

/// A measurement requested by a `.print` directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Probe {
    /// Voltage between two node labels; the second defaults to ground.
    NodeVoltage {
        pos: i32,
        neg: i32,
        method: ProbeMethod,
    },
    /// Voltage across a two-terminal component.
    ComponentVoltage {
        reference: String,
        method: ProbeMethod,
    },
    /// Current through a component.
    Current {
        reference: String,
        method: ProbeMethod,
    },
    /// Power dissipated in a component.
    Power {
        reference: String,
        method: ProbeMethod,
    },
}

impl Probe {
    /// Display name, e.g. `V(2)`, `Vmag(1, 2)`, `Ip(R1)`.
    pub fn name(&self) -> String {
        match self {
            Probe::NodeVoltage { pos, neg, method } => {
                if *neg != 0 {
                    format!("V{}({}, {})", method.display_suffix(), pos, neg)
                } else {
                    format!("V{}({})", method.display_suffix(), pos)
                }
            }
            Probe::ComponentVoltage { reference, method } => {
                format!("V{}({})", method.display_suffix(), reference)
            }
            Probe::Current { reference, method } => {
                format!("I{}({})", method.display_suffix(), reference)
            }
            Probe::Power { reference, method } => {
                format!("P{}({})", method.display_suffix(), reference)
            }
        }
    }
}

/// AC sweep spacing named by the `.ac` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcSweep {
    Lin,
    Dec,
    Oct,
}

/// Parameters of an `.ac` directive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcCommand {
    pub sweep: AcSweep,
    /// Total points for `lin`, points per decade/octave otherwise.
    pub num_points: usize,
    /// Start frequency (Hz).
    pub fstart: f64,
    /// Stop frequency (Hz).
    pub fstop: f64,
}

/// A parsed simulation: the circuit plus its directives.
#[derive(Debug)]
pub struct Simulation {
    pub title: String,
    pub circuit: Circuit,
    pub ac: Option<AcCommand>,
    pub probes: Vec<Probe>,
}

/// Parse a SPICE-like netlist.
pub fn parse(input: &str) -> Result<Simulation> {
    let mut lines = input.lines().enumerate();
    let title = lines
        .next()
        .map(|(_, line)| line.trim().to_string())
        .unwrap_or_default();

    let mut circuit = Circuit::with_title(title.clone());
    let mut commands: Vec<(usize, &str)> = Vec::new();

    for (index, line) in lines {
        let line_no = index + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        // Directives are interpreted after the whole circuit is known.
        if tokens[0].starts_with('.') {
            commands.push((line_no, line));
            continue;
        }

        let (reference, component) = parse_component(&tokens, line_no)?;
        circuit.add(reference, component).map_err(|err| match err {
            smallsig_core::Error::DuplicateReference(reference) => {
                Error::DuplicateReference {
                    line: line_no,
                    reference,
                }
            }
        })?;
    }

    let mut ac = None;
    let mut probes = Vec::new();
    for (line_no, command) in commands {
        let tokens: Vec<&str> = command.split_whitespace().collect();
        match tokens[0].to_ascii_lowercase().as_str() {
            ".ac" => ac = Some(parse_ac_command(&tokens, line_no)?),
            ".print" => probes.extend(parse_print_command(command, line_no)?),
            ".end" => {}
            other => log::warn!("line {line_no}: ignoring command '{other}'"),
        }
    }

    Ok(Simulation {
        title,
        circuit,
        ac,
        probes,
    })
}

/// Build one component from a tokenized netlist line. The reference prefix
/// up to the first digit selects the component type.
fn parse_component(tokens: &[&str], line: usize) -> Result<(String, Component)> {
    let reference = tokens[0];
    let kind: String = reference
        .chars()
        .take_while(|c| !c.is_ascii_digit())
        .collect::<String>()
        .to_ascii_uppercase();

    let node = |index: usize| -> Result<NodeId> {
        let token = *tokens.get(index).ok_or_else(|| Error::MissingArgument {
            line,
            reference: reference.to_string(),
        })?;
        token
            .parse::<i32>()
            .map(NodeId::new)
            .map_err(|_| Error::InvalidNode {
                line,
                value: token.to_string(),
            })
    };
    let value = |index: usize| -> Result<f64> {
        let token = *tokens.get(index).ok_or_else(|| Error::MissingArgument {
            line,
            reference: reference.to_string(),
        })?;
        parse_value(token).ok_or_else(|| Error::InvalidValue {
            line,
            value: token.to_string(),
        })
    };

    let component = match kind.as_str() {
        "R" => Component::Resistor {
            node_pos: node(1)?,
            node_neg: node(2)?,
            resistance: value(3)?,
        },
        "L" => Component::Inductor {
            node_pos: node(1)?,
            node_neg: node(2)?,
            inductance: value(3)?,
        },
        "C" => Component::Capacitor {
            node_pos: node(1)?,
            node_neg: node(2)?,
            capacitance: value(3)?,
        },
        "V" | "E" => Component::VoltageSource {
            node_pos: node(1)?,
            node_neg: node(2)?,
            dc_volts: value(3)?,
            ac_volts: ac_amplitude(tokens, line)?,
        },
        "I" => Component::CurrentSource {
            node_pos: node(1)?,
            node_neg: node(2)?,
            dc_amps: value(3)?,
            ac_amps: ac_amplitude(tokens, line)?,
        },
        "OPA" => Component::OpAmp {
            input_pos: node(1)?,
            input_neg: node(2)?,
            output: node(3)?,
        },
        _ => {
            return Err(Error::UnknownComponentType {
                line,
                reference: reference.to_string(),
            })
        }
    };

    Ok((reference.to_string(), component))
}

/// Optional `AC <amplitude>` tail on source lines.
fn ac_amplitude(tokens: &[&str], line: usize) -> Result<f64> {
    if tokens.len() >= 6 && tokens[4].eq_ignore_ascii_case("ac") {
        parse_value(tokens[5]).ok_or_else(|| Error::InvalidValue {
            line,
            value: tokens[5].to_string(),
        })
    } else {
        Ok(0.0)
    }
}

fn parse_ac_command(tokens: &[&str], line: usize) -> Result<AcCommand> {
    if tokens.len() != 5 {
        return Err(Error::InvalidCommand {
            line,
            message: "expected '.ac lin|dec|oct N fstart fstop'".into(),
        });
    }

    let sweep = match tokens[1].to_ascii_lowercase().as_str() {
        "lin" => AcSweep::Lin,
        "dec" => AcSweep::Dec,
        "oct" => AcSweep::Oct,
        other => {
            return Err(Error::InvalidCommand {
                line,
                message: format!("invalid sweep type '{other}'"),
            })
        }
    };

    let num_points: usize = tokens[2].parse().map_err(|_| Error::InvalidValue {
        line,
        value: tokens[2].to_string(),
    })?;
    let fstart = parse_value(tokens[3]).ok_or_else(|| Error::InvalidValue {
        line,
        value: tokens[3].to_string(),
    })?;
    let fstop = parse_value(tokens[4]).ok_or_else(|| Error::InvalidValue {
        line,
        value: tokens[4].to_string(),
    })?;

    if num_points == 0 || fstart <= 0.0 || fstop <= fstart {
        return Err(Error::InvalidCommand {
            line,
            message: "invalid .ac parameter value".into(),
        });
    }

    Ok(AcCommand {
        sweep,
        num_points,
        fstart,
        fstop,
    })
}

/// Collect the probes of a `.print` directive.
///
/// Probes look like `V(1)`, `V(1, 2)`, `Imag(R1)`, `Pph(C2)`; a voltage
/// probe argument that is not an integer names a component instead. Text
/// between probes is skipped.
fn parse_print_command(command: &str, line: usize) -> Result<Vec<Probe>> {
    let rest = match command.find(char::is_whitespace) {
        Some(index) => &command[index..],
        None => "",
    };

    let mut probes = Vec::new();
    for chunk in rest.split(')') {
        let Some(open) = chunk.find('(') else {
            continue;
        };
        let head = chunk[..open].split_whitespace().last().unwrap_or("");
        let mut head_chars = head.chars();
        let Some(kind) = head_chars.next() else {
            continue;
        };
        let kind = kind.to_ascii_lowercase();
        if !matches!(kind, 'v' | 'i' | 'p') {
            continue;
        }

        let suffix = head_chars.as_str();
        let method = ProbeMethod::from_suffix(suffix).ok_or_else(|| Error::InvalidCommand {
            line,
            message: format!("invalid probing method '{suffix}'"),
        })?;

        let args: Vec<&str> = chunk[open + 1..].split(',').map(str::trim).collect();

        if kind == 'v' {
            match args.as_slice() {
                [single] if !single.is_empty() => {
                    if let Ok(pos) = single.parse::<i32>() {
                        probes.push(Probe::NodeVoltage {
                            pos,
                            neg: 0,
                            method,
                        });
                    } else {
                        probes.push(Probe::ComponentVoltage {
                            reference: single.to_string(),
                            method,
                        });
                    }
                }
                [pos, neg] => {
                    let parse_node = |token: &str| -> Result<i32> {
                        token.parse().map_err(|_| Error::InvalidNode {
                            line,
                            value: token.to_string(),
                        })
                    };
                    probes.push(Probe::NodeVoltage {
                        pos: parse_node(pos)?,
                        neg: parse_node(neg)?,
                        method,
                    });
                }
                _ => {
                    return Err(Error::InvalidCommand {
                        line,
                        message: "malformed voltage probe".into(),
                    })
                }
            }
            continue;
        }

        let reference = match args.as_slice() {
            [single] if !single.is_empty() => single.to_string(),
            _ => {
                return Err(Error::InvalidCommand {
                    line,
                    message: "probe expects a component reference".into(),
                })
            }
        };
        if kind == 'i' {
            probes.push(Probe::Current { reference, method });
        } else {
            probes.push(Probe::Power { reference, method });
        }
    }

    Ok(probes)
}
