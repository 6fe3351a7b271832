//! Node labels for circuit descriptions.

use std::fmt;

/// User-visible label for a node in the circuit.
///
/// Label 0 is the reference node (ground). Other labels may be any integer
/// and need not be contiguous; the solver renumbers them into a dense index
/// space before analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) i32);

impl NodeId {
    /// The ground node (label 0).
    pub const GROUND: NodeId = NodeId(0);

    /// Create a new NodeId from a raw label.
    pub fn new(label: i32) -> Self {
        NodeId(label)
    }

    /// Get the raw label value.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Check if this is the ground node.
    pub fn is_ground(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ground() {
            write!(f, "GND")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_node() {
        assert!(NodeId::GROUND.is_ground());
        assert_eq!(NodeId::GROUND.as_i32(), 0);
        assert_eq!(NodeId::GROUND.to_string(), "GND");
    }

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert!(!id.is_ground());
        assert_eq!(id.as_i32(), 42);
        assert_eq!(id.to_string(), "42");
    }
}
