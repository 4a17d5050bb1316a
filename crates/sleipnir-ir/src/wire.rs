//! Wire address spaces: qubits, classical bits and numeric z-registers.
//!
//! Instructions reference wires in three disjoint spaces. Qubits carry the
//! quantum state, classical bits receive measurement outcomes, and
//! z-registers hold complex numeric values produced by expectation values,
//! amplitude queries and classical arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a qubit wire within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl From<usize> for QubitId {
    fn from(id: usize) -> Self {
        QubitId(u32::try_from(id).expect("QubitId overflow: exceeds u32::MAX"))
    }
}

/// Unique identifier for a classical bit wire within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BitId(pub u32);

impl fmt::Display for BitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

impl From<u32> for BitId {
    fn from(id: u32) -> Self {
        BitId(id)
    }
}

impl From<usize> for BitId {
    fn from(id: usize) -> Self {
        BitId(u32::try_from(id).expect("BitId overflow: exceeds u32::MAX"))
    }
}

/// Unique identifier for a numeric z-register wire within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ZVarId(pub u32);

impl fmt::Display for ZVarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "z{}", self.0)
    }
}

impl From<u32> for ZVarId {
    fn from(id: u32) -> Self {
        ZVarId(id)
    }
}

impl From<usize> for ZVarId {
    fn from(id: usize) -> Self {
        ZVarId(u32::try_from(id).expect("ZVarId overflow: exceeds u32::MAX"))
    }
}

/// A fixed-width bit pattern.
///
/// Used as the guard of an `IfStatement` and as the target of amplitude
/// queries. Bit 0 is the leftmost character in the textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitString(Vec<bool>);

impl BitString {
    /// Create an all-zero bit string of the given width.
    pub fn zeros(width: usize) -> Self {
        Self(vec![false; width])
    }

    /// Create a bit string from individual bits.
    pub fn from_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        Self(bits.into_iter().collect())
    }

    /// Parse a bit string from text such as `"0101"`.
    ///
    /// Returns `None` if the text contains anything other than `0` and `1`.
    pub fn parse(text: &str) -> Option<Self> {
        text.chars()
            .map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// Width of the bit string.
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Get the bit at `index`.
    pub fn bit(&self, index: usize) -> Option<bool> {
        self.0.get(index).copied()
    }

    /// Set the bit at `index`.
    pub fn set(&mut self, index: usize, value: bool) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = value;
        }
    }

    /// Iterate over the bits.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_display() {
        assert_eq!(format!("{}", QubitId(3)), "q3");
        assert_eq!(format!("{}", BitId(0)), "b0");
        assert_eq!(format!("{}", ZVarId(7)), "z7");
    }

    #[test]
    fn test_bitstring_parse_roundtrip() {
        let bs = BitString::parse("0110").unwrap();
        assert_eq!(bs.width(), 4);
        assert_eq!(bs.bit(0), Some(false));
        assert_eq!(bs.bit(1), Some(true));
        assert_eq!(format!("{bs}"), "0110");
    }

    #[test]
    fn test_bitstring_rejects_garbage() {
        assert!(BitString::parse("01a1").is_none());
    }

    #[test]
    fn test_bitstring_set() {
        let mut bs = BitString::zeros(3);
        bs.set(2, true);
        assert_eq!(format!("{bs}"), "001");
    }
}
