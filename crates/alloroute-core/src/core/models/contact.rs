use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The evidence class a contact was derived from.
///
/// When several sources report the same residue pair, only one contact is
/// kept; `priority` decides which source wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactSource {
    /// Linkage between sequence-adjacent residues of the same chain.
    Backbone,
    /// Quantum-mechanical pairwise interaction record.
    Quantum,
    /// Statistical (Cieplak/Go-type) contact from a contact-map report.
    Statistical,
}

impl ContactSource {
    /// Duplicate-pair resolution order: backbone > QM > statistical.
    pub fn priority(&self) -> u8 {
        match self {
            ContactSource::Backbone => 2,
            ContactSource::Quantum => 1,
            ContactSource::Statistical => 0,
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid contact source string")]
pub struct ParseContactSourceError;

impl FromStr for ContactSource {
    type Err = ParseContactSourceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "backbone" | "bb" => Ok(Self::Backbone),
            "quantum" | "qm" => Ok(Self::Quantum),
            "statistical" | "cieplak" | "go" => Ok(Self::Statistical),
            _ => Err(ParseContactSourceError),
        }
    }
}

impl fmt::Display for ContactSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Backbone => "Backbone",
                Self::Quantum => "Quantum",
                Self::Statistical => "Statistical",
            }
        )
    }
}

/// An undirected, weighted contact between two residues.
///
/// `index` is the stable key used for penalty bookkeeping: the enumeration
/// engine keeps its mutable energy table outside the topology, indexed by
/// this value, so `energy` here is the immutable base energy from
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// Globally increasing index, continuing across contact sources.
    pub index: usize,
    /// Dense index of the first endpoint atom.
    pub atom1: usize,
    /// Dense index of the second endpoint atom.
    pub atom2: usize,
    /// Geometric distance between the endpoints in Angstroms.
    pub distance: f64,
    /// Sign-carrying interaction energy; larger magnitude = stronger contact.
    pub energy: f64,
    /// Which evidence class produced this contact.
    pub source: ContactSource,
}

impl Contact {
    pub fn new(
        index: usize,
        atom1: usize,
        atom2: usize,
        distance: f64,
        energy: f64,
        source: ContactSource,
    ) -> Self {
        Self {
            index,
            atom1,
            atom2,
            distance,
            energy,
            source,
        }
    }

    /// Traversal cost of this contact: weaker contacts are more expensive.
    pub fn weight(&self) -> f64 {
        1.0 / self.energy.abs()
    }

    /// Unordered-pair equality check: true if this contact links `a` and `b`
    /// in either endpoint order.
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.atom1 == a && self.atom2 == b) || (self.atom1 == b && self.atom2 == a)
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atom1 == atom || self.atom2 == atom
    }
}
