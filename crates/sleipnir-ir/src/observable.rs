//! Pauli-string and Hamiltonian observables.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::matrix::Matrix2;

/// A single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl Pauli {
    /// The 2x2 matrix of this Pauli.
    pub fn matrix(&self) -> Matrix2 {
        match self {
            Pauli::I => Matrix2::identity(),
            Pauli::X => Matrix2::x(),
            Pauli::Y => Matrix2::y(),
            Pauli::Z => Matrix2::z(),
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'I' | 'i' => Some(Pauli::I),
            'X' | 'x' => Some(Pauli::X),
            'Y' | 'y' => Some(Pauli::Y),
            'Z' | 'z' => Some(Pauli::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        };
        write!(f, "{c}")
    }
}

/// A tensor product of single-qubit Paulis, one per target qubit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliString(Vec<Pauli>);

impl PauliString {
    /// Create from individual Paulis.
    pub fn new(paulis: impl IntoIterator<Item = Pauli>) -> Self {
        Self(paulis.into_iter().collect())
    }

    /// Parse from text such as `"XIZY"`. Returns `None` on any character
    /// outside `IXYZ`.
    pub fn parse(text: &str) -> Option<Self> {
        text.chars()
            .map(Pauli::from_char)
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// Number of qubits (string length).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the string is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The Pauli at position `index`.
    pub fn pauli(&self, index: usize) -> Option<Pauli> {
        self.0.get(index).copied()
    }

    /// Iterate over the Paulis.
    pub fn iter(&self) -> impl Iterator<Item = Pauli> + '_ {
        self.0.iter().copied()
    }

    /// Check whether every position is the identity.
    pub fn is_identity(&self) -> bool {
        self.0.iter().all(|p| *p == Pauli::I)
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.0 {
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

/// One weighted term of a Hamiltonian: `coefficient · PauliString`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HamiltonianTerm {
    /// Real coefficient.
    pub coefficient: f64,
    /// The Pauli string the coefficient multiplies.
    pub pauli: PauliString,
}

impl HamiltonianTerm {
    /// Create a term.
    pub fn new(coefficient: f64, pauli: PauliString) -> Self {
        Self { coefficient, pauli }
    }
}

impl fmt::Display for HamiltonianTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}·{}", self.coefficient, self.pauli)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let ps = PauliString::parse("XIZY").unwrap();
        assert_eq!(ps.len(), 4);
        assert_eq!(ps.pauli(0), Some(Pauli::X));
        assert_eq!(ps.pauli(2), Some(Pauli::Z));
        assert_eq!(format!("{ps}"), "XIZY");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PauliString::parse("XQ").is_none());
    }

    #[test]
    fn test_identity_detection() {
        assert!(PauliString::parse("III").unwrap().is_identity());
        assert!(!PauliString::parse("IXI").unwrap().is_identity());
    }

    #[test]
    fn test_hamiltonian_term_display() {
        let term = HamiltonianTerm::new(0.5, PauliString::parse("ZZ").unwrap());
        assert_eq!(format!("{term}"), "0.5·ZZ");
    }
}
