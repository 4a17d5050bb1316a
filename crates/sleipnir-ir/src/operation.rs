//! The closed operation vocabulary.
//!
//! Every action an instruction can perform is one variant of [`Operation`]:
//! primitive gates, arbitrary-matrix gates, declared-gate calls, composite
//! modifiers (power, inverse, control), structural containers (block,
//! repeat, if-statement), measurement and reset, noise channels,
//! observables and annotations, classical z-register arithmetic,
//! tensor-network diagnostics, and oracles.
//!
//! [`OpKind`] is the per-variant tag used for capability membership.
//! Adding an operation means adding a variant here and a case to every
//! exhaustive match; the compiler flags anything missed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::{CustomGate, GateCall, StandardGate};
use crate::instruction::Instruction;
use crate::matrix::DenseMatrix;
use crate::noise::NoiseChannel;
use crate::observable::{HamiltonianTerm, PauliString};
use crate::wire::BitString;

/// Tag identifying an operation kind, used for capability membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    // Standard gates
    GateI,
    GateX,
    GateY,
    GateZ,
    GateH,
    GateS,
    GateSdg,
    GateT,
    GateTdg,
    GateSX,
    GateSXdg,
    GateP,
    GateRx,
    GateRy,
    GateRz,
    GateU,
    GateCX,
    GateCY,
    GateCZ,
    GateCH,
    GateCS,
    GateCP,
    GateCRx,
    GateCRy,
    GateCRz,
    GateSwap,
    GateRXX,
    GateRYY,
    GateRZZ,
    GateCCX,
    GateCSwap,
    // Parametrized families
    Custom,
    Call,
    // Composite modifiers
    Power,
    Inverse,
    Control,
    // Structural containers
    Block,
    Repeat,
    IfStatement,
    // Measurement and reset
    Measure,
    Reset,
    MeasureReset,
    // Annotations
    Barrier,
    Tick,
    Detector,
    ShiftCoordinates,
    QubitCoordinates,
    // Noise channels
    Depolarizing,
    PauliNoise,
    AmplitudeDamping,
    GeneralizedAmplitudeDamping,
    PhaseAmplitudeDamping,
    ProjectiveNoise,
    MixedUnitary,
    Kraus,
    // Observables
    ExpectationValue,
    PauliString,
    Hamiltonian,
    Amplitude,
    // Classical z-register arithmetic
    Add,
    Multiply,
    Pow,
    Not,
    // Tensor-network diagnostics
    BondDim,
    SchmidtRank,
    VonNeumannEntropy,
    // Oracles
    PolynomialOracle,
}

impl StandardGate {
    /// The kind tag of this gate.
    pub fn kind(&self) -> OpKind {
        match self {
            StandardGate::I => OpKind::GateI,
            StandardGate::X => OpKind::GateX,
            StandardGate::Y => OpKind::GateY,
            StandardGate::Z => OpKind::GateZ,
            StandardGate::H => OpKind::GateH,
            StandardGate::S => OpKind::GateS,
            StandardGate::Sdg => OpKind::GateSdg,
            StandardGate::T => OpKind::GateT,
            StandardGate::Tdg => OpKind::GateTdg,
            StandardGate::SX => OpKind::GateSX,
            StandardGate::SXdg => OpKind::GateSXdg,
            StandardGate::P(_) => OpKind::GateP,
            StandardGate::Rx(_) => OpKind::GateRx,
            StandardGate::Ry(_) => OpKind::GateRy,
            StandardGate::Rz(_) => OpKind::GateRz,
            StandardGate::U(_, _, _) => OpKind::GateU,
            StandardGate::CX => OpKind::GateCX,
            StandardGate::CY => OpKind::GateCY,
            StandardGate::CZ => OpKind::GateCZ,
            StandardGate::CH => OpKind::GateCH,
            StandardGate::CS => OpKind::GateCS,
            StandardGate::CP(_) => OpKind::GateCP,
            StandardGate::CRx(_) => OpKind::GateCRx,
            StandardGate::CRy(_) => OpKind::GateCRy,
            StandardGate::CRz(_) => OpKind::GateCRz,
            StandardGate::Swap => OpKind::GateSwap,
            StandardGate::RXX(_) => OpKind::GateRXX,
            StandardGate::RYY(_) => OpKind::GateRYY,
            StandardGate::RZZ(_) => OpKind::GateRZZ,
            StandardGate::CCX => OpKind::GateCCX,
            StandardGate::CSwap => OpKind::GateCSwap,
        }
    }
}

impl NoiseChannel {
    /// The kind tag of this channel.
    pub fn kind(&self) -> OpKind {
        match self {
            NoiseChannel::Depolarizing { .. } => OpKind::Depolarizing,
            NoiseChannel::PauliNoise { .. } => OpKind::PauliNoise,
            NoiseChannel::AmplitudeDamping { .. } => OpKind::AmplitudeDamping,
            NoiseChannel::GeneralizedAmplitudeDamping { .. } => {
                OpKind::GeneralizedAmplitudeDamping
            }
            NoiseChannel::PhaseAmplitudeDamping { .. } => OpKind::PhaseAmplitudeDamping,
            NoiseChannel::ProjectiveNoise { .. } => OpKind::ProjectiveNoise,
            NoiseChannel::MixedUnitary { .. } => OpKind::MixedUnitary,
            NoiseChannel::Kraus { .. } => OpKind::Kraus,
        }
    }
}

/// A circuit operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// A fixed-unitary standard gate.
    Gate(StandardGate),
    /// A gate defined by an explicit matrix.
    Custom(CustomGate),
    /// A call to a declared gate.
    Call(GateCall),

    /// Real power of a wrapped operation.
    Power {
        /// The wrapped operation.
        base: Box<Operation>,
        /// The exponent.
        exponent: f64,
    },
    /// Inverse of a wrapped operation.
    Inverse {
        /// The wrapped operation.
        base: Box<Operation>,
    },
    /// Controlled version of a wrapped operation.
    Control {
        /// Number of control qubits (at least 1), bound before the
        /// target wires.
        controls: usize,
        /// The wrapped operation.
        base: Box<Operation>,
    },

    /// A sub-circuit over block-local wires, executed once.
    Block {
        /// Qubit arity of the block.
        num_qubits: usize,
        /// Bit arity of the block.
        num_bits: usize,
        /// Z-register arity of the block.
        num_zvars: usize,
        /// Body over block-local wires.
        body: Vec<Instruction>,
    },
    /// A wrapped operation executed a fixed number of times.
    Repeat {
        /// Number of repetitions.
        times: u32,
        /// The repeated operation.
        base: Box<Operation>,
    },
    /// An operation guarded by a classical bit pattern.
    IfStatement {
        /// The guarded operation.
        base: Box<Operation>,
        /// Bit pattern the condition bits must match.
        condition: BitString,
    },

    /// Projective measurement into a classical bit.
    Measure,
    /// Reset a qubit to |0⟩.
    Reset,
    /// Measure into a classical bit, then reset to |0⟩.
    MeasureReset,

    /// Scheduling barrier over its qubits.
    Barrier {
        /// Number of qubits spanned.
        num_qubits: usize,
    },
    /// Global time-step annotation.
    Tick,
    /// Detector annotation over measurement record bits.
    Detector {
        /// Number of record bits referenced.
        num_bits: usize,
    },
    /// Shift the coordinate frame of subsequent annotations.
    ShiftCoordinates {
        /// Per-axis offsets.
        coordinates: Vec<f64>,
    },
    /// Attach spatial coordinates to a qubit.
    QubitCoordinates {
        /// Per-axis coordinates.
        coordinates: Vec<f64>,
    },

    /// A stochastic or Kraus-type noise channel.
    Noise(NoiseChannel),

    /// Expectation value of an observable, written to a z-register.
    ExpectationValue {
        /// The observed operation (a gate, Pauli string or Hamiltonian).
        observable: Box<Operation>,
    },
    /// A Pauli-string observable.
    PauliString(PauliString),
    /// A weighted sum of Pauli strings.
    Hamiltonian {
        /// The weighted terms; all share one width.
        terms: Vec<HamiltonianTerm>,
    },
    /// Amplitude query for a basis state, written to a z-register.
    Amplitude {
        /// The queried basis state.
        bitstring: BitString,
    },

    /// z₀ ← c + z₀ + z₁ + …
    Add {
        /// Number of z-register operands (including the destination).
        operands: usize,
        /// Constant summand.
        constant: f64,
    },
    /// z₀ ← c · z₀ · z₁ · …
    Multiply {
        /// Number of z-register operands (including the destination).
        operands: usize,
        /// Constant factor.
        constant: f64,
    },
    /// z₀ ← z₀ ^ exponent
    Pow {
        /// The exponent.
        exponent: f64,
    },
    /// z₀ ← 1 − z₀ (logical not of a 0/1 register).
    Not,

    /// Bond dimension across a bipartition (tensor-network diagnostic).
    BondDim {
        /// Qubits on one side of the bipartition.
        num_qubits: usize,
    },
    /// Schmidt rank across a bipartition (tensor-network diagnostic).
    SchmidtRank {
        /// Qubits on one side of the bipartition.
        num_qubits: usize,
    },
    /// Von Neumann entanglement entropy (tensor-network diagnostic).
    VonNeumannEntropy {
        /// Qubits on one side of the bipartition.
        num_qubits: usize,
    },

    /// Oracle for the polynomial a·xy + b·x + c·y + d over two registers.
    PolynomialOracle {
        /// Width of the x register.
        num_x: usize,
        /// Width of the y register.
        num_y: usize,
        /// Coefficient of x·y.
        a: i64,
        /// Coefficient of x.
        b: i64,
        /// Coefficient of y.
        c: i64,
        /// Constant term.
        d: i64,
    },
}

impl Operation {
    /// Wrap an operation in a power modifier.
    pub fn power(base: Operation, exponent: f64) -> Self {
        Operation::Power {
            base: Box::new(base),
            exponent,
        }
    }

    /// Wrap an operation in an inverse modifier.
    pub fn inverse(base: Operation) -> Self {
        Operation::Inverse {
            base: Box::new(base),
        }
    }

    /// Wrap an operation in a control modifier.
    pub fn control(controls: usize, base: Operation) -> Self {
        Operation::Control {
            controls,
            base: Box::new(base),
        }
    }

    /// Repeat an operation a fixed number of times.
    pub fn repeat(times: u32, base: Operation) -> Self {
        Operation::Repeat {
            times,
            base: Box::new(base),
        }
    }

    /// Guard an operation on a classical bit pattern.
    pub fn if_statement(base: Operation, condition: BitString) -> Self {
        Operation::IfStatement {
            base: Box::new(base),
            condition,
        }
    }

    /// Take the expectation value of an observable.
    pub fn expectation_value(observable: Operation) -> Self {
        Operation::ExpectationValue {
            observable: Box::new(observable),
        }
    }

    /// The kind tag of this operation.
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::Gate(g) => g.kind(),
            Operation::Custom(_) => OpKind::Custom,
            Operation::Call(_) => OpKind::Call,
            Operation::Power { .. } => OpKind::Power,
            Operation::Inverse { .. } => OpKind::Inverse,
            Operation::Control { .. } => OpKind::Control,
            Operation::Block { .. } => OpKind::Block,
            Operation::Repeat { .. } => OpKind::Repeat,
            Operation::IfStatement { .. } => OpKind::IfStatement,
            Operation::Measure => OpKind::Measure,
            Operation::Reset => OpKind::Reset,
            Operation::MeasureReset => OpKind::MeasureReset,
            Operation::Barrier { .. } => OpKind::Barrier,
            Operation::Tick => OpKind::Tick,
            Operation::Detector { .. } => OpKind::Detector,
            Operation::ShiftCoordinates { .. } => OpKind::ShiftCoordinates,
            Operation::QubitCoordinates { .. } => OpKind::QubitCoordinates,
            Operation::Noise(ch) => ch.kind(),
            Operation::ExpectationValue { .. } => OpKind::ExpectationValue,
            Operation::PauliString(_) => OpKind::PauliString,
            Operation::Hamiltonian { .. } => OpKind::Hamiltonian,
            Operation::Amplitude { .. } => OpKind::Amplitude,
            Operation::Add { .. } => OpKind::Add,
            Operation::Multiply { .. } => OpKind::Multiply,
            Operation::Pow { .. } => OpKind::Pow,
            Operation::Not => OpKind::Not,
            Operation::BondDim { .. } => OpKind::BondDim,
            Operation::SchmidtRank { .. } => OpKind::SchmidtRank,
            Operation::VonNeumannEntropy { .. } => OpKind::VonNeumannEntropy,
            Operation::PolynomialOracle { .. } => OpKind::PolynomialOracle,
        }
    }

    /// The name of this operation.
    pub fn name(&self) -> &str {
        match self {
            Operation::Gate(g) => g.name(),
            Operation::Custom(c) => &c.name,
            Operation::Call(call) => &call.decl.name,
            Operation::Power { .. } => "power",
            Operation::Inverse { .. } => "inverse",
            Operation::Control { .. } => "control",
            Operation::Block { .. } => "block",
            Operation::Repeat { .. } => "repeat",
            Operation::IfStatement { .. } => "if",
            Operation::Measure => "measure",
            Operation::Reset => "reset",
            Operation::MeasureReset => "measure_reset",
            Operation::Barrier { .. } => "barrier",
            Operation::Tick => "tick",
            Operation::Detector { .. } => "detector",
            Operation::ShiftCoordinates { .. } => "shift_coordinates",
            Operation::QubitCoordinates { .. } => "qubit_coordinates",
            Operation::Noise(ch) => ch.name(),
            Operation::ExpectationValue { .. } => "expectation_value",
            Operation::PauliString(_) => "pauli_string",
            Operation::Hamiltonian { .. } => "hamiltonian",
            Operation::Amplitude { .. } => "amplitude",
            Operation::Add { .. } => "add",
            Operation::Multiply { .. } => "multiply",
            Operation::Pow { .. } => "pow",
            Operation::Not => "not",
            Operation::BondDim { .. } => "bond_dim",
            Operation::SchmidtRank { .. } => "schmidt_rank",
            Operation::VonNeumannEntropy { .. } => "von_neumann_entropy",
            Operation::PolynomialOracle { .. } => "polynomial_oracle",
        }
    }

    /// Number of qubit wires this operation binds.
    pub fn num_qubits(&self) -> usize {
        match self {
            Operation::Gate(g) => g.num_qubits(),
            Operation::Custom(c) => c.num_qubits(),
            Operation::Call(call) => call.num_qubits(),
            Operation::Power { base, .. }
            | Operation::Inverse { base }
            | Operation::Repeat { base, .. }
            | Operation::IfStatement { base, .. } => base.num_qubits(),
            Operation::Control { controls, base } => controls + base.num_qubits(),
            Operation::Block { num_qubits, .. } => *num_qubits,
            Operation::Measure | Operation::Reset | Operation::MeasureReset => 1,
            Operation::Barrier { num_qubits } => *num_qubits,
            Operation::Tick => 0,
            Operation::Detector { .. } => 0,
            Operation::ShiftCoordinates { .. } => 0,
            Operation::QubitCoordinates { .. } => 1,
            Operation::Noise(ch) => ch.num_qubits(),
            Operation::ExpectationValue { observable } => observable.num_qubits(),
            Operation::PauliString(ps) => ps.len(),
            Operation::Hamiltonian { terms } => {
                terms.first().map_or(0, |t| t.pauli.len())
            }
            Operation::Amplitude { .. } => 0,
            Operation::Add { .. }
            | Operation::Multiply { .. }
            | Operation::Pow { .. }
            | Operation::Not => 0,
            Operation::BondDim { num_qubits }
            | Operation::SchmidtRank { num_qubits }
            | Operation::VonNeumannEntropy { num_qubits } => *num_qubits,
            Operation::PolynomialOracle { num_x, num_y, .. } => num_x + num_y,
        }
    }

    /// Number of classical bit wires this operation binds.
    pub fn num_bits(&self) -> usize {
        match self {
            Operation::Measure | Operation::MeasureReset => 1,
            Operation::IfStatement { base, condition } => condition.width() + base.num_bits(),
            Operation::Block { num_bits, .. } => *num_bits,
            Operation::Repeat { base, .. } => base.num_bits(),
            Operation::Detector { num_bits } => *num_bits,
            _ => 0,
        }
    }

    /// Number of z-register wires this operation binds.
    pub fn num_zvars(&self) -> usize {
        match self {
            Operation::Block { num_zvars, .. } => *num_zvars,
            Operation::Repeat { base, .. } => base.num_zvars(),
            Operation::ExpectationValue { .. } | Operation::Amplitude { .. } => 1,
            Operation::Add { operands, .. } | Operation::Multiply { operands, .. } => *operands,
            Operation::Pow { .. } | Operation::Not => 1,
            Operation::BondDim { .. }
            | Operation::SchmidtRank { .. }
            | Operation::VonNeumannEntropy { .. } => 1,
            _ => 0,
        }
    }

    /// Check if this is a composite modifier (power, inverse, control).
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Operation::Power { .. } | Operation::Inverse { .. } | Operation::Control { .. }
        )
    }

    /// The operation wrapped by a composite modifier.
    pub fn modifier_base(&self) -> Option<&Operation> {
        match self {
            Operation::Power { base, .. }
            | Operation::Inverse { base }
            | Operation::Control { base, .. } => Some(base),
            _ => None,
        }
    }

    /// Check if this operation denotes a unitary gate: a standard or
    /// custom gate, possibly under modifiers. Calls and declarations are
    /// excluded; their identity is symbolic, not a fixed operator.
    pub fn is_unitary_gate(&self) -> bool {
        match self {
            Operation::Gate(_) | Operation::Custom(_) => true,
            Operation::Power { base, .. }
            | Operation::Inverse { base }
            | Operation::Control { base, .. } => base.is_unitary_gate(),
            _ => false,
        }
    }

    /// The dense unitary of this operation, if it denotes a unitary gate
    /// with concrete parameters.
    pub fn matrix(&self) -> Option<DenseMatrix> {
        match self {
            Operation::Gate(g) => g.matrix(),
            Operation::Custom(c) => Some(c.matrix().clone()),
            Operation::Inverse { base } => base.matrix().map(|m| m.dagger()),
            Operation::Control { controls, base } => {
                base.matrix().map(|m| m.controlled(*controls))
            }
            Operation::Power { base, exponent } => {
                let m = base.matrix()?;
                if (exponent.fract()).abs() < f64::EPSILON {
                    Some(m.pow_int(*exponent as i64))
                } else if let Some(m2) = m.as_matrix2() {
                    Some(DenseMatrix::from(m2.powf(*exponent)))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl From<StandardGate> for Operation {
    fn from(gate: StandardGate) -> Self {
        Operation::Gate(gate)
    }
}

impl From<CustomGate> for Operation {
    fn from(gate: CustomGate) -> Self {
        Operation::Custom(gate)
    }
}

impl From<NoiseChannel> for Operation {
    fn from(channel: NoiseChannel) -> Self {
        Operation::Noise(channel)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Power { base, exponent } => write!(f, "power({base}, {exponent})"),
            Operation::Inverse { base } => write!(f, "inverse({base})"),
            Operation::Control { controls, base } => write!(f, "control({controls}, {base})"),
            Operation::Repeat { times, base } => write!(f, "repeat({times}, {base})"),
            Operation::IfStatement { base, condition } => write!(f, "if({base}, {condition})"),
            Operation::ExpectationValue { observable } => {
                write!(f, "expectation_value({observable})")
            }
            Operation::PauliString(ps) => write!(f, "pauli_string({ps})"),
            Operation::Amplitude { bitstring } => write!(f, "amplitude({bitstring})"),
            Operation::Noise(ch) => write!(f, "{ch}"),
            other => write!(f, "{}", other.name()),
        }
    }
}
