//! Insertion-ordered circuit container keyed by component reference.

use indexmap::IndexMap;

use crate::component::Component;
use crate::error::{Error, Result};

/// A circuit: a collection of components addressed by reference strings
/// such as `R1` or `OPA3`.
///
/// Iteration order is insertion order. The position of a voltage source or
/// op-amp among its kind determines its branch index in the MNA system, so
/// the ordering must stay stable and reproducible.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    components: IndexMap<String, Component>,
    title: Option<String>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Get the circuit title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the circuit title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Add a component under a unique reference.
    pub fn add(&mut self, reference: impl Into<String>, component: Component) -> Result<()> {
        let reference = reference.into();
        if self.components.contains_key(&reference) {
            return Err(Error::DuplicateReference(reference));
        }
        self.components.insert(reference, component);
        Ok(())
    }

    /// Look up a component by reference.
    pub fn get(&self, reference: &str) -> Option<&Component> {
        self.components.get(reference)
    }

    /// Iterate over `(reference, component)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Component)> {
        self.components.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check whether the circuit has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of independent voltage sources.
    pub fn num_voltage_sources(&self) -> usize {
        self.components
            .values()
            .filter(|c| matches!(c, Component::VoltageSource { .. }))
            .count()
    }

    /// Number of op-amps.
    pub fn num_opamps(&self) -> usize {
        self.components
            .values()
            .filter(|c| matches!(c, Component::OpAmp { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;

    fn resistor(a: i32, b: i32, r: f64) -> Component {
        Component::Resistor {
            node_pos: NodeId::new(a),
            node_neg: NodeId::new(b),
            resistance: r,
        }
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut circuit = Circuit::new();
        circuit.add("R2", resistor(1, 2, 100.0)).unwrap();
        circuit.add("R1", resistor(2, 0, 200.0)).unwrap();
        circuit.add("R3", resistor(1, 0, 300.0)).unwrap();

        let refs: Vec<&str> = circuit.iter().map(|(r, _)| r).collect();
        assert_eq!(refs, vec!["R2", "R1", "R3"]);
    }

    #[test]
    fn test_duplicate_reference_rejected() {
        let mut circuit = Circuit::new();
        circuit.add("R1", resistor(1, 0, 100.0)).unwrap();
        let err = circuit.add("R1", resistor(2, 0, 100.0)).unwrap_err();
        assert!(matches!(err, Error::DuplicateReference(r) if r == "R1"));
    }

    #[test]
    fn test_source_counts() {
        let mut circuit = Circuit::new();
        circuit
            .add(
                "V1",
                Component::VoltageSource {
                    node_pos: NodeId::new(1),
                    node_neg: NodeId::GROUND,
                    dc_volts: 5.0,
                    ac_volts: 0.0,
                },
            )
            .unwrap();
        circuit
            .add(
                "OPA1",
                Component::OpAmp {
                    input_pos: NodeId::GROUND,
                    input_neg: NodeId::new(2),
                    output: NodeId::new(3),
                },
            )
            .unwrap();
        circuit.add("R1", resistor(1, 2, 1000.0)).unwrap();

        assert_eq!(circuit.num_voltage_sources(), 1);
        assert_eq!(circuit.num_opamps(), 1);
        assert_eq!(circuit.len(), 3);
    }

    #[test]
    fn test_title() {
        let circuit = Circuit::with_title("RC low-pass");
        assert_eq!(circuit.title(), Some("RC low-pass"));
    }
}
