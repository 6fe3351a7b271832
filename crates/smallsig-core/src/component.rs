//! Typed circuit components.

use num_complex::Complex;

use crate::node::NodeId;

/// A circuit component, tagged by kind.
///
/// Two-terminal components follow the SPICE terminal convention: the first
/// node is the `+` terminal. Independent sources carry separate DC and AC
/// amplitudes; the analysis mode selects which one applies.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// Ideal resistor, admittance `1/R` at every frequency.
    Resistor {
        node_pos: NodeId,
        node_neg: NodeId,
        /// Resistance in ohms.
        resistance: f64,
    },
    /// Ideal inductor, admittance `1/(jwL)`.
    ///
    /// At DC the true admittance is infinite; `admittance()` substitutes the
    /// admittance of a 1 nOhm resistance instead so the system matrix stays
    /// finite. Compatibility value, not a physical one.
    Inductor {
        node_pos: NodeId,
        node_neg: NodeId,
        /// Inductance in henries.
        inductance: f64,
    },
    /// Ideal capacitor, admittance `jwC` (an open circuit at DC).
    Capacitor {
        node_pos: NodeId,
        node_neg: NodeId,
        /// Capacitance in farads.
        capacitance: f64,
    },
    /// Ideal independent voltage source.
    VoltageSource {
        node_pos: NodeId,
        node_neg: NodeId,
        /// Amplitude in volts for DC analysis.
        dc_volts: f64,
        /// Amplitude in volts for AC analysis.
        ac_volts: f64,
    },
    /// Ideal independent current source, driving current into the circuit
    /// at `node_pos` and drawing it back at `node_neg`.
    CurrentSource {
        node_pos: NodeId,
        node_neg: NodeId,
        /// Amplitude in amperes for DC analysis.
        dc_amps: f64,
        /// Amplitude in amperes for AC analysis.
        ac_amps: f64,
    },
    /// Ideal operational amplifier.
    ///
    /// Assumed to operate in the linear region under negative feedback, so
    /// the analysis may impose equal potentials on the two inputs. A side
    /// effect of the idealisation is that swapping the inputs changes
    /// nothing.
    OpAmp {
        input_pos: NodeId,
        input_neg: NodeId,
        output: NodeId,
    },
}

impl Component {
    /// Complex admittance at angular frequency `omega`, for the passive
    /// variants; `None` for sources and op-amps.
    pub fn admittance(&self, omega: f64) -> Option<Complex<f64>> {
        match *self {
            Component::Resistor { resistance, .. } => Some(Complex::new(1.0 / resistance, 0.0)),
            Component::Inductor { inductance, .. } => Some(if omega == 0.0 {
                Complex::new(1.0 / 1e-9, 0.0)
            } else {
                Complex::new(1.0, 0.0) / Complex::new(0.0, omega * inductance)
            }),
            Component::Capacitor { capacitance, .. } => {
                Some(Complex::new(0.0, omega * capacitance))
            }
            _ => None,
        }
    }

    /// Whether this component lowers to an inter-node admittance.
    pub fn is_passive(&self) -> bool {
        matches!(
            self,
            Component::Resistor { .. } | Component::Inductor { .. } | Component::Capacitor { .. }
        )
    }

    /// Terminal pair for two-terminal components; `None` for op-amps.
    pub fn terminals(&self) -> Option<(NodeId, NodeId)> {
        match *self {
            Component::Resistor { node_pos, node_neg, .. }
            | Component::Inductor { node_pos, node_neg, .. }
            | Component::Capacitor { node_pos, node_neg, .. }
            | Component::VoltageSource { node_pos, node_neg, .. }
            | Component::CurrentSource { node_pos, node_neg, .. } => Some((node_pos, node_neg)),
            Component::OpAmp { .. } => None,
        }
    }

    /// All nodes this component connects to.
    pub fn nodes(&self) -> Vec<NodeId> {
        match *self {
            Component::OpAmp {
                input_pos,
                input_neg,
                output,
            } => vec![input_pos, input_neg, output],
            _ => {
                let (pos, neg) = self
                    .terminals()
                    .expect("every non-op-amp component is two-terminal");
                vec![pos, neg]
            }
        }
    }
}
