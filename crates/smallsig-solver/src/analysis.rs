//! Circuit-level analysis: node renumbering, lowering, and measurements.

use std::collections::HashMap;

use num_complex::Complex;
use smallsig_core::{Circuit, Component, NodeId};

use crate::error::{Error, Result};
use crate::mna::{self, MatrixNode, MnaProblem, MnaSolution};

/// Analyzer for linear circuits.
///
/// Wraps a circuit, renumbers its node labels into the dense index space
/// the MNA layer expects, and dispatches each component into an
/// [`MnaProblem`] for the requested angular frequency. After [`solve`]
/// succeeds, voltages, currents, and powers can be measured by component
/// reference.
///
/// [`solve`]: CircuitSolver::solve
#[derive(Debug)]
pub struct CircuitSolver<'a> {
    circuit: &'a Circuit,
    node_map: HashMap<NodeId, MatrixNode>,
    problem: MnaProblem,
    solution: Option<MnaSolution>,
    solution_omega: Option<f64>,
}

impl<'a> CircuitSolver<'a> {
    /// Create a solver for the given circuit.
    pub fn new(circuit: &'a Circuit) -> Self {
        let mut solver = Self {
            circuit,
            node_map: HashMap::new(),
            problem: MnaProblem::new(),
            solution: None,
            solution_omega: None,
        };
        solver.update_node_map();
        solver
    }

    /// The circuit under analysis.
    pub fn circuit(&self) -> &'a Circuit {
        self.circuit
    }

    /// The label-to-matrix-index mapping; ground maps to `None`.
    pub fn node_map(&self) -> &HashMap<NodeId, MatrixNode> {
        &self.node_map
    }

    /// Angular frequency the current solution was computed for.
    pub fn solution_omega(&self) -> Option<f64> {
        self.solution_omega
    }

    /// The raw MNA solution, if one has been computed.
    pub fn solution(&self) -> Option<&MnaSolution> {
        self.solution.as_ref()
    }

    /// Rebuild the node map; re-solves at the previous frequency if a
    /// solution had already been computed.
    pub fn update(&mut self) -> Result<()> {
        self.update_node_map();
        if let Some(omega) = self.solution_omega {
            self.solve(omega)?;
        }
        Ok(())
    }

    /// Analyze the circuit at angular frequency `omega` in rad/s; 0 selects
    /// DC. DC solves use the DC source amplitudes and AC solves the AC
    /// ones, so a source absent from one analysis simply carries a zero
    /// amplitude there.
    pub fn solve(&mut self, omega: f64) -> Result<()> {
        self.solution_omega = Some(omega);
        self.problem.clear();

        for (_, component) in self.circuit.iter() {
            match *component {
                Component::Resistor { node_pos, node_neg, .. }
                | Component::Inductor { node_pos, node_neg, .. }
                | Component::Capacitor { node_pos, node_neg, .. } => {
                    let admittance = component
                        .admittance(omega)
                        .expect("passive components always have an admittance");
                    let node_pos = self.map_node(node_pos)?;
                    let node_neg = self.map_node(node_neg)?;
                    self.problem.admittances.push(mna::Admittance {
                        node_pos,
                        node_neg,
                        admittance,
                    });
                }
                Component::VoltageSource {
                    node_pos,
                    node_neg,
                    dc_volts,
                    ac_volts,
                } => {
                    let voltage = if omega == 0.0 { dc_volts } else { ac_volts };
                    let node_pos = self.map_node(node_pos)?;
                    let node_neg = self.map_node(node_neg)?;
                    self.problem.voltage_sources.push(mna::VoltageSource {
                        node_pos,
                        node_neg,
                        voltage,
                    });
                }
                Component::CurrentSource {
                    node_pos,
                    node_neg,
                    dc_amps,
                    ac_amps,
                } => {
                    let current = if omega == 0.0 { dc_amps } else { ac_amps };
                    let node_pos = self.map_node(node_pos)?;
                    let node_neg = self.map_node(node_neg)?;
                    self.problem.current_sources.push(mna::CurrentSource {
                        node_pos,
                        node_neg,
                        current,
                    });
                }
                Component::OpAmp {
                    input_pos,
                    input_neg,
                    output,
                } => {
                    let input_pos = self.map_node(input_pos)?;
                    let input_neg = self.map_node(input_neg)?;
                    let output = self.map_node(output)?;
                    self.problem.opamps.push(mna::OpAmp {
                        input_pos,
                        input_neg,
                        output,
                    });
                }
            }
        }

        let solution = self.problem.solve().map_err(|source| Error::OperatingPoint {
            omega,
            source: Box::new(source),
        })?;
        self.solution = Some(solution);
        Ok(())
    }

    /// Potential difference between two node labels.
    pub fn voltage_between(&self, pos: NodeId, neg: NodeId) -> Result<Complex<f64>> {
        let (solution, _) = self.solved()?;
        solution.voltage(self.map_node(pos)?, self.map_node(neg)?)
    }

    /// Voltage across a component: the terminal pair for two-terminal
    /// components, the output potential against ground for op-amps.
    pub fn voltage(&self, reference: &str) -> Result<Complex<f64>> {
        let component = self.lookup(reference)?;
        match *component {
            Component::OpAmp { output, .. } => {
                let (solution, _) = self.solved()?;
                solution.voltage(self.map_node(output)?, None)
            }
            Component::Resistor { node_pos, node_neg, .. }
            | Component::Inductor { node_pos, node_neg, .. }
            | Component::Capacitor { node_pos, node_neg, .. }
            | Component::VoltageSource { node_pos, node_neg, .. }
            | Component::CurrentSource { node_pos, node_neg, .. } => {
                self.voltage_between(node_pos, node_neg)
            }
        }
    }

    /// Current through a component.
    ///
    /// Passives report voltage times admittance; voltage sources and
    /// op-amps report the branch current from the solution; current sources
    /// report the negated source amplitude (the current measured from the
    /// `+` terminal through the source).
    pub fn current(&self, reference: &str) -> Result<Complex<f64>> {
        let component = self.lookup(reference)?;
        let (solution, omega) = self.solved()?;
        match *component {
            Component::Resistor { .. }
            | Component::Inductor { .. }
            | Component::Capacitor { .. } => {
                let admittance = component
                    .admittance(omega)
                    .expect("passive components always have an admittance");
                Ok(self.voltage(reference)? * admittance)
            }
            Component::VoltageSource { .. } => {
                let index = self.voltage_source_position(reference)?;
                solution.voltage_source_current(index)
            }
            Component::CurrentSource { dc_amps, ac_amps, .. } => {
                let amps = if omega == 0.0 { dc_amps } else { ac_amps };
                Ok(Complex::from(-amps))
            }
            Component::OpAmp { .. } => {
                let index = self.opamp_position(reference)?;
                solution.opamp_current(index)
            }
        }
    }

    /// Power dissipated in a component: `voltage x current`.
    pub fn power(&self, reference: &str) -> Result<Complex<f64>> {
        Ok(self.voltage(reference)? * self.current(reference)?)
    }

    /// Rebuild the label-to-index map.
    ///
    /// Label 0 is bound to ground; every other label is assigned the next
    /// dense index on first encounter, walking the circuit in iteration
    /// order. The mapping is therefore fully reproducible for a given
    /// circuit.
    fn update_node_map(&mut self) {
        self.node_map.clear();
        self.node_map.insert(NodeId::GROUND, None);

        let mut next = 0usize;
        for (_, component) in self.circuit.iter() {
            for node in component.nodes() {
                self.node_map.entry(node).or_insert_with(|| {
                    let index = next;
                    next += 1;
                    Some(index)
                });
            }
        }
    }

    fn map_node(&self, node: NodeId) -> Result<MatrixNode> {
        self.node_map
            .get(&node)
            .copied()
            .ok_or(Error::UnknownNode(node.as_i32()))
    }

    fn lookup(&self, reference: &str) -> Result<&'a Component> {
        self.circuit
            .get(reference)
            .ok_or_else(|| Error::UnknownReference(reference.to_string()))
    }

    fn solved(&self) -> Result<(&MnaSolution, f64)> {
        match (&self.solution, self.solution_omega) {
            (Some(solution), Some(omega)) => Ok((solution, omega)),
            _ => Err(Error::NotSolved),
        }
    }

    /// Position of a voltage source among the circuit's voltage sources,
    /// which is also its MNA branch index.
    fn voltage_source_position(&self, reference: &str) -> Result<usize> {
        let mut count = 0;
        for (name, component) in self.circuit.iter() {
            if matches!(component, Component::VoltageSource { .. }) {
                if name == reference {
                    return Ok(count);
                }
                count += 1;
            }
        }
        Err(Error::UnknownReference(reference.to_string()))
    }

    /// Position of an op-amp among the circuit's op-amps.
    fn opamp_position(&self, reference: &str) -> Result<usize> {
        let mut count = 0;
        for (name, component) in self.circuit.iter() {
            if matches!(component, Component::OpAmp { .. }) {
                if name == reference {
                    return Ok(count);
                }
                count += 1;
            }
        }
        Err(Error::UnknownReference(reference.to_string()))
    }
}
