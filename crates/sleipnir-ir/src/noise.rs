//! Noise channel operations.
//!
//! Channels are first-class instructions: the engine samples them
//! stochastically (Pauli/projective/mixed-unitary channels) or applies
//! their Kraus operators. Lowering treats every channel as an opaque leaf;
//! channels are never decomposed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::matrix::DenseMatrix;
use crate::observable::PauliString;

/// Measurement basis of a projective noise channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectiveBasis {
    /// Project onto the X eigenbasis.
    X,
    /// Project onto the Y eigenbasis.
    Y,
    /// Project onto the Z eigenbasis.
    Z,
}

/// A stochastic or Kraus-type noise channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum NoiseChannel {
    /// Depolarizing channel: with probability `p` the state is replaced by
    /// the maximally mixed state.
    Depolarizing {
        /// Error probability (0.0 to 1.0).
        p: f64,
    },

    /// Weighted Pauli channel: applies each Pauli string with its
    /// probability.
    PauliNoise {
        /// (probability, Pauli string) pairs; probabilities sum to 1.
        terms: Vec<(f64, PauliString)>,
    },

    /// Amplitude damping: energy relaxation (T1 decay).
    AmplitudeDamping {
        /// Damping parameter (0.0 to 1.0).
        gamma: f64,
    },

    /// Generalized amplitude damping toward a thermal state.
    GeneralizedAmplitudeDamping {
        /// Excited-state population (0.0 to 1.0).
        p: f64,
        /// Damping parameter (0.0 to 1.0).
        gamma: f64,
    },

    /// Combined phase and amplitude damping.
    PhaseAmplitudeDamping {
        /// Excited-state population (0.0 to 1.0).
        p: f64,
        /// Amplitude damping parameter (0.0 to 1.0).
        gamma: f64,
        /// Dephasing parameter (0.0 to 1.0).
        beta: f64,
    },

    /// Projective measurement noise in a fixed basis, outcome discarded.
    ProjectiveNoise {
        /// The measurement basis.
        basis: ProjectiveBasis,
    },

    /// Mixture of unitaries applied with given probabilities.
    MixedUnitary {
        /// (probability, unitary) pairs; probabilities sum to 1.
        terms: Vec<(f64, DenseMatrix)>,
    },

    /// General channel given by explicit Kraus operators.
    Kraus {
        /// The Kraus operators; all must share one dimension.
        operators: Vec<DenseMatrix>,
    },
}

impl NoiseChannel {
    /// Get a human-readable name for this channel.
    pub fn name(&self) -> &'static str {
        match self {
            NoiseChannel::Depolarizing { .. } => "depolarizing",
            NoiseChannel::PauliNoise { .. } => "pauli_noise",
            NoiseChannel::AmplitudeDamping { .. } => "amplitude_damping",
            NoiseChannel::GeneralizedAmplitudeDamping { .. } => "generalized_amplitude_damping",
            NoiseChannel::PhaseAmplitudeDamping { .. } => "phase_amplitude_damping",
            NoiseChannel::ProjectiveNoise { .. } => "projective_noise",
            NoiseChannel::MixedUnitary { .. } => "mixed_unitary",
            NoiseChannel::Kraus { .. } => "kraus",
        }
    }

    /// The number of qubits this channel acts on.
    pub fn num_qubits(&self) -> usize {
        match self {
            NoiseChannel::Depolarizing { .. }
            | NoiseChannel::AmplitudeDamping { .. }
            | NoiseChannel::GeneralizedAmplitudeDamping { .. }
            | NoiseChannel::PhaseAmplitudeDamping { .. }
            | NoiseChannel::ProjectiveNoise { .. } => 1,
            NoiseChannel::PauliNoise { terms } => {
                terms.first().map_or(1, |(_, pauli)| pauli.len())
            }
            NoiseChannel::MixedUnitary { terms } => {
                terms.first().map_or(1, |(_, m)| m.num_qubits())
            }
            NoiseChannel::Kraus { operators } => {
                operators.first().map_or(1, DenseMatrix::num_qubits)
            }
        }
    }

    /// The numeric probabilities/parameters of this channel, in a fixed
    /// order. Used by the interchange fidelity check.
    pub fn parameters(&self) -> Vec<f64> {
        match self {
            NoiseChannel::Depolarizing { p } => vec![*p],
            NoiseChannel::PauliNoise { terms } => terms.iter().map(|(p, _)| *p).collect(),
            NoiseChannel::AmplitudeDamping { gamma } => vec![*gamma],
            NoiseChannel::GeneralizedAmplitudeDamping { p, gamma } => vec![*p, *gamma],
            NoiseChannel::PhaseAmplitudeDamping { p, gamma, beta } => vec![*p, *gamma, *beta],
            NoiseChannel::ProjectiveNoise { .. } => vec![],
            NoiseChannel::MixedUnitary { terms } => terms.iter().map(|(p, _)| *p).collect(),
            NoiseChannel::Kraus { .. } => vec![],
        }
    }
}

impl fmt::Display for NoiseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseChannel::Depolarizing { p } => write!(f, "depolarizing(p={p:.4})"),
            NoiseChannel::PauliNoise { terms } => write!(f, "pauli_noise({} terms)", terms.len()),
            NoiseChannel::AmplitudeDamping { gamma } => {
                write!(f, "amplitude_damping(γ={gamma:.4})")
            }
            NoiseChannel::GeneralizedAmplitudeDamping { p, gamma } => {
                write!(f, "generalized_amplitude_damping(p={p:.4}, γ={gamma:.4})")
            }
            NoiseChannel::PhaseAmplitudeDamping { p, gamma, beta } => {
                write!(
                    f,
                    "phase_amplitude_damping(p={p:.4}, γ={gamma:.4}, β={beta:.4})"
                )
            }
            NoiseChannel::ProjectiveNoise { basis } => {
                let axis = match basis {
                    ProjectiveBasis::X => 'x',
                    ProjectiveBasis::Y => 'y',
                    ProjectiveBasis::Z => 'z',
                };
                write!(f, "projective_noise({axis})")
            }
            NoiseChannel::MixedUnitary { terms } => {
                write!(f, "mixed_unitary({} terms)", terms.len())
            }
            NoiseChannel::Kraus { operators } => write!(f, "kraus({} ops)", operators.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix2;

    #[test]
    fn test_channel_names() {
        assert_eq!(NoiseChannel::Depolarizing { p: 0.01 }.name(), "depolarizing");
        assert_eq!(
            NoiseChannel::AmplitudeDamping { gamma: 0.02 }.name(),
            "amplitude_damping"
        );
    }

    #[test]
    fn test_channel_arity() {
        assert_eq!(NoiseChannel::Depolarizing { p: 0.1 }.num_qubits(), 1);

        let two_qubit = NoiseChannel::PauliNoise {
            terms: vec![
                (0.9, PauliString::parse("II").unwrap()),
                (0.1, PauliString::parse("XX").unwrap()),
            ],
        };
        assert_eq!(two_qubit.num_qubits(), 2);

        let mixed = NoiseChannel::MixedUnitary {
            terms: vec![
                (0.5, Matrix2::identity().into()),
                (0.5, Matrix2::x().into()),
            ],
        };
        assert_eq!(mixed.num_qubits(), 1);
    }

    #[test]
    fn test_channel_parameters() {
        let ch = NoiseChannel::GeneralizedAmplitudeDamping { p: 0.3, gamma: 0.1 };
        assert_eq!(ch.parameters(), vec![0.3, 0.1]);
    }

    #[test]
    fn test_channel_display() {
        let ch = NoiseChannel::Depolarizing { p: 0.03 };
        assert_eq!(format!("{ch}"), "depolarizing(p=0.0300)");
    }
}
