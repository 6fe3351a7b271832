//! Modified Nodal Analysis: problem assembly and solution queries.
//!
//! The circuit to analyze arrives here degenerated to flat lists of
//! inter-node admittances, voltage sources, current sources, and ideal
//! op-amps. Node indices at this level are dense matrix indices; `None`
//! stands for the reference node (ground).
//!
//! The linear system is arranged in the canonical MNA block form
//!
//! ```text
//! [ G  B ] [ v ]   [ i ]
//! [ C  D ] [ j ] = [ e ]
//! ```
//!
//! with `G: NxN` built from admittances, `B: NxM` and `C: MxN` coupling the
//! `M = V + P` branch current variables (one per voltage source, one per
//! op-amp output) into the node equations, and `D = 0`. The op-amp coupling
//! is deliberately asymmetric: its output current appears in `B` so KCL at
//! the output node balances, while its row in `C` imposes the virtual short
//! `v+ - v- = 0` over the inputs. The output node never appears in `C`.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

use crate::error::{Error, Result};
use crate::linear::gaussian_elimination;
use crate::matrix::{join_horizontal, join_vertical, replace};

/// Dense matrix index of a node; `None` is ground.
pub type MatrixNode = Option<usize>;

/// An inter-node admittance. Every passive component lowers to one of these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Admittance {
    pub node_pos: MatrixNode,
    pub node_neg: MatrixNode,
    /// Admittance in siemens.
    pub admittance: Complex<f64>,
}

/// An ideal EMF between two nodes. The first node is the `+` terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageSource {
    pub node_pos: MatrixNode,
    pub node_neg: MatrixNode,
    /// Source voltage in volts.
    pub voltage: f64,
}

/// An ideal current source, injecting `current` into the circuit at
/// `node_pos` and drawing it back at `node_neg`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentSource {
    pub node_pos: MatrixNode,
    pub node_neg: MatrixNode,
    /// Source current in amperes.
    pub current: f64,
}

/// An ideal op-amp, assumed to operate under negative feedback so that its
/// input potentials are equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpAmp {
    pub input_pos: MatrixNode,
    pub input_neg: MatrixNode,
    pub output: MatrixNode,
}

/// A circuit lowered to MNA form, ready to assemble and solve.
#[derive(Debug, Clone, Default)]
pub struct MnaProblem {
    pub admittances: Vec<Admittance>,
    pub voltage_sources: Vec<VoltageSource>,
    pub current_sources: Vec<CurrentSource>,
    pub opamps: Vec<OpAmp>,
}

impl MnaProblem {
    /// Create a new empty problem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every entry, keeping allocations.
    pub fn clear(&mut self) {
        self.admittances.clear();
        self.voltage_sources.clear();
        self.current_sources.clear();
        self.opamps.clear();
    }

    /// Number of matrix nodes: the highest dense index plus one, zero when
    /// every entry touches only ground.
    pub fn node_count(&self) -> usize {
        self.max_node().map_or(0, |max| max + 1)
    }

    /// Number of branch current variables (voltage sources + op-amps).
    pub fn num_branches(&self) -> usize {
        self.voltage_sources.len() + self.opamps.len()
    }

    /// Assemble `[A | z]` and solve it.
    pub fn solve(&self) -> Result<MnaSolution> {
        let node_count = self.node_count();
        let a = self.system_matrix(node_count)?;
        let z = self.excitation_vector(node_count)?;
        let system = join_horizontal(&a, &z)?;

        log::debug!(
            "solving MNA system: {} nodes, {} branch currents",
            node_count,
            self.num_branches()
        );

        let x = gaussian_elimination(system)?;
        Ok(MnaSolution::new(x, node_count, self.voltage_sources.len()))
    }

    fn max_node(&self) -> Option<usize> {
        let mut max: Option<usize> = None;
        let mut see = |node: MatrixNode| {
            if let Some(index) = node {
                max = Some(max.map_or(index, |m| m.max(index)));
            }
        };

        for adm in &self.admittances {
            see(adm.node_pos);
            see(adm.node_neg);
        }
        for vs in &self.voltage_sources {
            see(vs.node_pos);
            see(vs.node_neg);
        }
        for cs in &self.current_sources {
            see(cs.node_pos);
            see(cs.node_neg);
        }
        for opa in &self.opamps {
            see(opa.input_pos);
            see(opa.input_neg);
            see(opa.output);
        }

        max
    }

    /// Build the coefficient matrix `A` from its G/B/C/D blocks.
    fn system_matrix(&self, node_count: usize) -> Result<DMatrix<Complex<f64>>> {
        let n = node_count;
        let v = self.voltage_sources.len();
        let m = self.num_branches();
        let zero = Complex::new(0.0, 0.0);
        let one = Complex::new(1.0, 0.0);

        let mut g = DMatrix::from_element(n, n, zero);
        let mut b = DMatrix::from_element(n, m, zero);
        let mut c = DMatrix::from_element(m, n, zero);
        let d = DMatrix::from_element(m, m, zero);

        // G: each diagonal entry sums the admittances touching that node;
        // the off-diagonal pair gets the negated admittance. Admittances
        // with one terminal on ground only contribute to the diagonal.
        for elem in &self.admittances {
            if let Some(i) = elem.node_pos {
                g[(i, i)] += elem.admittance;
            }
            if let Some(j) = elem.node_neg {
                g[(j, j)] += elem.admittance;
            }
            if let (Some(i), Some(j)) = (elem.node_pos, elem.node_neg) {
                g[(i, j)] -= elem.admittance;
                g[(j, i)] -= elem.admittance;
            }
        }

        // B: one column per voltage source, +1 at the positive node and -1
        // at the negative one.
        for (k, vs) in self.voltage_sources.iter().enumerate() {
            if let Some(i) = vs.node_pos {
                b[(i, k)] = one;
            }
            if let Some(j) = vs.node_neg {
                b[(j, k)] = -one;
            }
        }

        // C starts as the transpose of the voltage-source columns of B.
        if v > 0 {
            replace(&mut c, 0, 0, &b.columns(0, v).transpose())?;
        }

        // The op-amp output behaves as an EMF tied between ground and the
        // output node, so it shows up in B only.
        for (p, opa) in self.opamps.iter().enumerate() {
            if let Some(o) = opa.output {
                b[(o, v + p)] = one;
            }
        }

        // The op-amp row of C instead constrains the input pair: the
        // equation reads v+ - v- = 0. The output node is absent here.
        for (p, opa) in self.opamps.iter().enumerate() {
            if let Some(i) = opa.input_pos {
                c[(v + p, i)] = one;
            }
            if let Some(j) = opa.input_neg {
                c[(v + p, j)] = -one;
            }
        }

        let top = join_horizontal(&g, &b)?;
        let bottom = join_horizontal(&c, &d)?;
        join_vertical(&top, &bottom)
    }

    /// Build the excitation column `z = [i ; e]`.
    fn excitation_vector(&self, node_count: usize) -> Result<DMatrix<Complex<f64>>> {
        let m = self.num_branches();
        let zero = Complex::new(0.0, 0.0);

        let mut i_block = DMatrix::from_element(node_count, 1, zero);
        let mut e_block = DMatrix::from_element(m, 1, zero);

        // Nodal current injections.
        for cs in &self.current_sources {
            if let Some(i) = cs.node_pos {
                i_block[(i, 0)] += Complex::from(cs.current);
            }
            if let Some(j) = cs.node_neg {
                i_block[(j, 0)] -= Complex::from(cs.current);
            }
        }

        // EMF excitations. Op-amp rows stay zero: the virtual short is a
        // homogeneous constraint.
        for (k, vs) in self.voltage_sources.iter().enumerate() {
            e_block[(k, 0)] = Complex::from(vs.voltage);
        }

        join_vertical(&i_block, &e_block)
    }
}

/// Read-only view over a solved MNA system.
///
/// Layout of the underlying vector: node potentials first, then one branch
/// current per voltage source, then one output current per op-amp.
#[derive(Debug, Clone)]
pub struct MnaSolution {
    solution: DVector<Complex<f64>>,
    node_count: usize,
    vsource_count: usize,
}

impl MnaSolution {
    fn new(solution: DVector<Complex<f64>>, node_count: usize, vsource_count: usize) -> Self {
        Self {
            solution,
            node_count,
            vsource_count,
        }
    }

    /// Number of non-ground nodes in the solved system.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Potential difference between two nodes; `None` is ground (0 V).
    pub fn voltage(&self, pos: MatrixNode, neg: MatrixNode) -> Result<Complex<f64>> {
        Ok(self.potential(pos)? - self.potential(neg)?)
    }

    /// Current through a voltage source, positive when flowing from the `+`
    /// terminal into the source.
    pub fn voltage_source_current(&self, id: usize) -> Result<Complex<f64>> {
        if id >= self.vsource_count {
            return Err(Error::OutOfBounds {
                index: id,
                len: self.vsource_count,
            });
        }
        Ok(self.solution[self.node_count + id])
    }

    /// Current drawn from an op-amp output.
    pub fn opamp_current(&self, id: usize) -> Result<Complex<f64>> {
        let count = self.solution.len() - self.node_count - self.vsource_count;
        if id >= count {
            return Err(Error::OutOfBounds {
                index: id,
                len: count,
            });
        }
        Ok(self.solution[self.node_count + self.vsource_count + id])
    }

    /// The raw solution vector.
    pub fn vector(&self) -> &DVector<Complex<f64>> {
        &self.solution
    }

    fn potential(&self, node: MatrixNode) -> Result<Complex<f64>> {
        match node {
            None => Ok(Complex::new(0.0, 0.0)),
            Some(index) if index < self.node_count => Ok(self.solution[index]),
            Some(index) => Err(Error::OutOfBounds {
                index,
                len: self.node_count,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn y(re: f64) -> Complex<f64> {
        Complex::new(re, 0.0)
    }

    #[test]
    fn test_admittance_stamp() {
        let problem = MnaProblem {
            admittances: vec![Admittance {
                node_pos: Some(0),
                node_neg: Some(1),
                admittance: Complex::new(1.0, 2.0),
            }],
            ..Default::default()
        };

        let a = problem.system_matrix(2).unwrap();
        assert_eq!(a[(0, 0)], Complex::new(1.0, 2.0));
        assert_eq!(a[(1, 1)], Complex::new(1.0, 2.0));
        assert_eq!(a[(0, 1)], Complex::new(-1.0, -2.0));
        assert_eq!(a[(1, 0)], Complex::new(-1.0, -2.0));
        // G stays symmetric without conjugation
        assert_eq!(a[(0, 1)], a[(1, 0)]);
    }

    #[test]
    fn test_grounded_admittance_touches_diagonal_only() {
        let problem = MnaProblem {
            admittances: vec![Admittance {
                node_pos: Some(0),
                node_neg: None,
                admittance: y(0.01),
            }],
            ..Default::default()
        };

        let a = problem.system_matrix(1).unwrap();
        assert_eq!(a[(0, 0)], y(0.01));
    }

    #[test]
    fn test_voltage_source_blocks() {
        let problem = MnaProblem {
            voltage_sources: vec![VoltageSource {
                node_pos: Some(0),
                node_neg: Some(1),
                voltage: 5.0,
            }],
            ..Default::default()
        };

        let a = problem.system_matrix(2).unwrap();
        // B column
        assert_eq!(a[(0, 2)], y(1.0));
        assert_eq!(a[(1, 2)], y(-1.0));
        // C row equals the transposed B column
        assert_eq!(a[(2, 0)], y(1.0));
        assert_eq!(a[(2, 1)], y(-1.0));
        // D is zero
        assert_eq!(a[(2, 2)], y(0.0));

        let z = problem.excitation_vector(2).unwrap();
        assert_eq!(z[(2, 0)], y(5.0));
    }

    #[test]
    fn test_voltage_source_column_sums_to_zero() {
        // Invariant: each fully-internal voltage source column of B holds
        // exactly one +1 and one -1.
        let problem = MnaProblem {
            voltage_sources: vec![VoltageSource {
                node_pos: Some(2),
                node_neg: Some(0),
                voltage: 1.0,
            }],
            ..Default::default()
        };

        let a = problem.system_matrix(3).unwrap();
        let sum: Complex<f64> = (0..3).map(|i| a[(i, 3)]).sum();
        assert_eq!(sum, y(0.0));
    }

    #[test]
    fn test_opamp_blocks_are_asymmetric() {
        let problem = MnaProblem {
            voltage_sources: vec![VoltageSource {
                node_pos: Some(0),
                node_neg: None,
                voltage: 1.0,
            }],
            opamps: vec![OpAmp {
                input_pos: None,
                input_neg: Some(1),
                output: Some(2),
            }],
            ..Default::default()
        };

        let a = problem.system_matrix(3).unwrap();
        // Output current enters KCL at the output node (B block, column V+0).
        assert_eq!(a[(2, 4)], y(1.0));
        // The constraint row carries the inputs only.
        assert_eq!(a[(4, 1)], y(-1.0));
        // The output node is absent from the constraint row.
        assert_eq!(a[(4, 2)], y(0.0));
        // The op-amp excitation entry is homogeneous.
        let z = problem.excitation_vector(3).unwrap();
        assert_eq!(z[(4, 0)], y(0.0));
    }

    #[test]
    fn test_current_source_injection() {
        let problem = MnaProblem {
            current_sources: vec![CurrentSource {
                node_pos: Some(0),
                node_neg: Some(1),
                current: 0.01,
            }],
            ..Default::default()
        };

        let z = problem.excitation_vector(2).unwrap();
        assert_eq!(z[(0, 0)], y(0.01));
        assert_eq!(z[(1, 0)], y(-0.01));
    }

    #[test]
    fn test_solve_divider() {
        // V1 = 10 V on node 0, R1 = 1k from 0 to 1, R2 = 1k from 1 to ground.
        let problem = MnaProblem {
            admittances: vec![
                Admittance {
                    node_pos: Some(0),
                    node_neg: Some(1),
                    admittance: y(1e-3),
                },
                Admittance {
                    node_pos: Some(1),
                    node_neg: None,
                    admittance: y(1e-3),
                },
            ],
            voltage_sources: vec![VoltageSource {
                node_pos: Some(0),
                node_neg: None,
                voltage: 10.0,
            }],
            ..Default::default()
        };

        let solution = problem.solve().unwrap();
        assert_eq!(solution.node_count(), 2);

        let v1 = solution.voltage(Some(0), None).unwrap();
        let v2 = solution.voltage(Some(1), None).unwrap();
        assert!((v1.re - 10.0).abs() < 1e-9);
        assert!((v2.re - 5.0).abs() < 1e-9);

        // 5 mA leaves the + terminal, so the branch current is -5 mA.
        let i = solution.voltage_source_current(0).unwrap();
        assert!((i.re + 0.005).abs() < 1e-9);
    }

    #[test]
    fn test_ground_only_problem_is_trivial() {
        let problem = MnaProblem {
            admittances: vec![Admittance {
                node_pos: None,
                node_neg: None,
                admittance: y(1.0),
            }],
            ..Default::default()
        };

        assert_eq!(problem.node_count(), 0);
        let solution = problem.solve().unwrap();
        assert_eq!(solution.vector().len(), 0);
    }

    #[test]
    fn test_branch_without_nodes_is_singular() {
        // A voltage source shorted to ground on both terminals produces an
        // all-zero row; the solver must refuse.
        let problem = MnaProblem {
            voltage_sources: vec![VoltageSource {
                node_pos: None,
                node_neg: None,
                voltage: 1.0,
            }],
            ..Default::default()
        };

        assert!(matches!(problem.solve(), Err(Error::SingularSystem)));
    }

    #[test]
    fn test_solution_bounds() {
        let problem = MnaProblem {
            admittances: vec![Admittance {
                node_pos: Some(0),
                node_neg: None,
                admittance: y(1.0),
            }],
            current_sources: vec![CurrentSource {
                node_pos: Some(0),
                node_neg: None,
                current: 1.0,
            }],
            ..Default::default()
        };

        let solution = problem.solve().unwrap();
        assert!(matches!(
            solution.voltage(Some(1), None),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            solution.voltage_source_current(0),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            solution.opamp_current(0),
            Err(Error::OutOfBounds { .. })
        ));
    }
}
