//! Probe evaluation against a solved circuit.

use num_complex::Complex;
use smallsig_core::NodeId;
use smallsig_parser::{Probe, ProbeMethod};
use smallsig_solver::{CircuitSolver, Error, Result};

/// Render a complex quantity as a real number.
///
/// The `Default` method reports the real part at DC and the modulus for AC,
/// matching what a bench meter would show in either mode.
pub fn render(value: Complex<f64>, method: ProbeMethod, omega: f64) -> f64 {
    match method {
        ProbeMethod::Default => {
            if omega == 0.0 {
                value.re
            } else {
                value.norm()
            }
        }
        ProbeMethod::Magnitude => value.norm(),
        ProbeMethod::Phase => value.arg(),
        ProbeMethod::Real => value.re,
        ProbeMethod::Imaginary => value.im,
    }
}

/// Evaluate a probe. The solver must have been solved already.
pub fn evaluate(solver: &CircuitSolver, probe: &Probe) -> Result<f64> {
    let omega = solver.solution_omega().ok_or(Error::NotSolved)?;

    let value = match probe {
        Probe::NodeVoltage { pos, neg, .. } => {
            solver.voltage_between(NodeId::new(*pos), NodeId::new(*neg))?
        }
        Probe::ComponentVoltage { reference, .. } => {
            // Voltage probes by reference are restricted to two-terminal
            // components; an op-amp has no terminal pair to probe across.
            let component = solver
                .circuit()
                .get(reference)
                .ok_or_else(|| Error::UnknownReference(reference.clone()))?;
            if component.terminals().is_none() {
                return Err(Error::QueryUnsupported {
                    reference: reference.clone(),
                    quantity: "voltage",
                });
            }
            solver.voltage(reference)?
        }
        Probe::Current { reference, .. } => solver.current(reference)?,
        Probe::Power { reference, .. } => solver.power(reference)?,
    };

    let method = match probe {
        Probe::NodeVoltage { method, .. }
        | Probe::ComponentVoltage { method, .. }
        | Probe::Current { method, .. }
        | Probe::Power { method, .. } => *method,
    };

    Ok(render(value, method, omega))
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallsig_core::{Circuit, Component};

    fn solved_divider() -> Circuit {
        let mut circuit = Circuit::new();
        circuit
            .add(
                "V1",
                Component::VoltageSource {
                    node_pos: NodeId::new(1),
                    node_neg: NodeId::GROUND,
                    dc_volts: 10.0,
                    ac_volts: 0.0,
                },
            )
            .unwrap();
        circuit
            .add(
                "R1",
                Component::Resistor {
                    node_pos: NodeId::new(1),
                    node_neg: NodeId::new(2),
                    resistance: 1e3,
                },
            )
            .unwrap();
        circuit
            .add(
                "R2",
                Component::Resistor {
                    node_pos: NodeId::new(2),
                    node_neg: NodeId::GROUND,
                    resistance: 1e3,
                },
            )
            .unwrap();
        circuit
    }

    #[test]
    fn test_render_default_mode() {
        let value = Complex::new(3.0, 4.0);
        assert_eq!(render(value, ProbeMethod::Default, 0.0), 3.0);
        assert_eq!(render(value, ProbeMethod::Default, 100.0), 5.0);
        assert_eq!(render(value, ProbeMethod::Imaginary, 0.0), 4.0);
    }

    #[test]
    fn test_evaluate_node_voltage() {
        let circuit = solved_divider();
        let mut solver = CircuitSolver::new(&circuit);
        solver.solve(0.0).unwrap();

        let probe = Probe::NodeVoltage {
            pos: 2,
            neg: 0,
            method: ProbeMethod::Default,
        };
        let value = evaluate(&solver, &probe).unwrap();
        assert!((value - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_voltage_probe_rejects_opamp() {
        let mut circuit = solved_divider();
        circuit
            .add(
                "OPA1",
                Component::OpAmp {
                    input_pos: NodeId::GROUND,
                    input_neg: NodeId::new(2),
                    output: NodeId::new(2),
                },
            )
            .unwrap();
        let mut solver = CircuitSolver::new(&circuit);
        solver.solve(0.0).unwrap();

        let probe = Probe::ComponentVoltage {
            reference: "OPA1".into(),
            method: ProbeMethod::Default,
        };
        assert!(matches!(
            evaluate(&solver, &probe),
            Err(Error::QueryUnsupported { .. })
        ));
    }
}
