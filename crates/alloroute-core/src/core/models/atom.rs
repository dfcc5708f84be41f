use nalgebra::Point3;
use std::fmt;

/// Identifies one residue by its sequence number and chain label.
///
/// This is the user-facing way of naming a graph node: residues are uniquely
/// identifiable by (residue sequence number, chain label), and exactly one
/// alpha-carbon atom per residue is used as the node anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResidueSpec {
    /// The residue sequence number as it appears in the structure file.
    pub res_id: isize,
    /// The chain label the residue belongs to.
    pub chain_id: char,
}

impl fmt::Display for ResidueSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.res_id, self.chain_id)
    }
}

/// The alpha-carbon anchor of one residue, used as a node of the contact graph.
///
/// Only one atom per residue enters the graph; its `index` is the stable,
/// dense handle used by contacts and adjacency lists.
#[derive(Debug, Clone, PartialEq)]
pub struct CaAtom {
    /// Dense index of this atom within the owning topology.
    pub index: usize,
    /// Atom serial number from the structure file.
    pub serial: usize,
    /// Residue name (e.g., "HIS", "GLY").
    pub res_name: String,
    /// Residue sequence number.
    pub res_id: isize,
    /// Chain label.
    pub chain_id: char,
    /// Coordinates of the alpha carbon in Angstroms.
    pub position: Point3<f64>,
}

impl CaAtom {
    /// Renders the residue label used in path output, e.g. `HIS192A`.
    pub fn label(&self) -> String {
        format!("{}{}{}", self.res_name, self.res_id, self.chain_id)
    }

    /// The (residue sequence number, chain label) identity of this atom.
    pub fn spec(&self) -> ResidueSpec {
        ResidueSpec {
            res_id: self.res_id,
            chain_id: self.chain_id,
        }
    }
}
