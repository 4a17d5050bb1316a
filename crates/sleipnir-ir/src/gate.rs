//! Primitive gate types: the fixed-unitary vocabulary, arbitrary-matrix
//! gates, and declared gate definitions.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::matrix::{DenseMatrix, Matrix2};
use crate::parameter::ParameterExpression;

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Single-qubit rotation gates
    /// Phase gate.
    P(ParameterExpression),
    /// Rotation around X axis.
    Rx(ParameterExpression),
    /// Rotation around Y axis.
    Ry(ParameterExpression),
    /// Rotation around Z axis.
    Rz(ParameterExpression),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(
        ParameterExpression,
        ParameterExpression,
        ParameterExpression,
    ),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// Controlled-S gate.
    CS,
    /// Controlled phase gate.
    CP(ParameterExpression),
    /// Controlled rotation around X.
    CRx(ParameterExpression),
    /// Controlled rotation around Y.
    CRy(ParameterExpression),
    /// Controlled rotation around Z.
    CRz(ParameterExpression),
    /// SWAP gate.
    Swap,
    /// XX rotation gate.
    RXX(ParameterExpression),
    /// YY rotation gate.
    RYY(ParameterExpression),
    /// ZZ rotation gate.
    RZZ(ParameterExpression),

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::P(_) => "p",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::U(_, _, _) => "u",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::CS => "cs",
            StandardGate::CP(_) => "cp",
            StandardGate::CRx(_) => "crx",
            StandardGate::CRy(_) => "cry",
            StandardGate::CRz(_) => "crz",
            StandardGate::Swap => "swap",
            StandardGate::RXX(_) => "rxx",
            StandardGate::RYY(_) => "ryy",
            StandardGate::RZZ(_) => "rzz",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::SXdg
            | StandardGate::P(_)
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::U(_, _, _) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::CS
            | StandardGate::CP(_)
            | StandardGate::CRx(_)
            | StandardGate::CRy(_)
            | StandardGate::CRz(_)
            | StandardGate::Swap
            | StandardGate::RXX(_)
            | StandardGate::RYY(_)
            | StandardGate::RZZ(_) => 2,

            StandardGate::CCX | StandardGate::CSwap => 3,
        }
    }

    /// Get parameters of this gate.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        match self {
            StandardGate::P(p)
            | StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::CP(p)
            | StandardGate::CRx(p)
            | StandardGate::CRy(p)
            | StandardGate::CRz(p)
            | StandardGate::RXX(p)
            | StandardGate::RYY(p)
            | StandardGate::RZZ(p) => vec![p],

            StandardGate::U(a, b, c) => vec![a, b, c],

            _ => vec![],
        }
    }

    /// Check if this gate has unbound symbolic parameters.
    pub fn is_parameterized(&self) -> bool {
        self.parameters().iter().any(|p| p.is_symbolic())
    }

    /// The gate implementing the inverse operation.
    pub fn inverse(&self) -> StandardGate {
        match self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::SX => StandardGate::SXdg,
            StandardGate::SXdg => StandardGate::SX,
            StandardGate::P(t) => StandardGate::P(-t.clone()),
            StandardGate::Rx(t) => StandardGate::Rx(-t.clone()),
            StandardGate::Ry(t) => StandardGate::Ry(-t.clone()),
            StandardGate::Rz(t) => StandardGate::Rz(-t.clone()),
            // U(θ,φ,λ)⁻¹ = U(-θ,-λ,-φ)
            StandardGate::U(theta, phi, lambda) => {
                StandardGate::U(-theta.clone(), -lambda.clone(), -phi.clone())
            }
            StandardGate::CS => StandardGate::CP(ParameterExpression::constant(
                -std::f64::consts::FRAC_PI_2,
            )),
            StandardGate::CP(t) => StandardGate::CP(-t.clone()),
            StandardGate::CRx(t) => StandardGate::CRx(-t.clone()),
            StandardGate::CRy(t) => StandardGate::CRy(-t.clone()),
            StandardGate::CRz(t) => StandardGate::CRz(-t.clone()),
            StandardGate::RXX(t) => StandardGate::RXX(-t.clone()),
            StandardGate::RYY(t) => StandardGate::RYY(-t.clone()),
            StandardGate::RZZ(t) => StandardGate::RZZ(-t.clone()),
            // Self-inverse gates.
            other => other.clone(),
        }
    }

    /// The native gate implementing this gate with one additional control,
    /// if one exists in the vocabulary.
    pub fn with_control(&self) -> Option<StandardGate> {
        match self {
            StandardGate::X => Some(StandardGate::CX),
            StandardGate::Y => Some(StandardGate::CY),
            StandardGate::Z => Some(StandardGate::CZ),
            StandardGate::H => Some(StandardGate::CH),
            StandardGate::S => Some(StandardGate::CS),
            StandardGate::P(t) => Some(StandardGate::CP(t.clone())),
            StandardGate::Rx(t) => Some(StandardGate::CRx(t.clone())),
            StandardGate::Ry(t) => Some(StandardGate::CRy(t.clone())),
            StandardGate::Rz(t) => Some(StandardGate::CRz(t.clone())),
            StandardGate::CX => Some(StandardGate::CCX),
            StandardGate::Swap => Some(StandardGate::CSwap),
            _ => None,
        }
    }

    /// The unitary matrix of this gate, or `None` while parameters are
    /// symbolic.
    pub fn matrix(&self) -> Option<DenseMatrix> {
        use num_complex::Complex64;

        let m2 = |m: Matrix2| Some(DenseMatrix::from(m));
        let ctrl = |m: Matrix2| Some(DenseMatrix::from(m).controlled(1));

        match self {
            StandardGate::I => m2(Matrix2::identity()),
            StandardGate::X => m2(Matrix2::x()),
            StandardGate::Y => m2(Matrix2::y()),
            StandardGate::Z => m2(Matrix2::z()),
            StandardGate::H => m2(Matrix2::h()),
            StandardGate::S => m2(Matrix2::s()),
            StandardGate::Sdg => m2(Matrix2::sdg()),
            StandardGate::T => m2(Matrix2::t()),
            StandardGate::Tdg => m2(Matrix2::tdg()),
            StandardGate::SX => m2(Matrix2::sx()),
            StandardGate::SXdg => m2(Matrix2::sxdg()),
            StandardGate::P(t) => m2(Matrix2::p(t.evaluate()?)),
            StandardGate::Rx(t) => m2(Matrix2::rx(t.evaluate()?)),
            StandardGate::Ry(t) => m2(Matrix2::ry(t.evaluate()?)),
            StandardGate::Rz(t) => m2(Matrix2::rz(t.evaluate()?)),
            StandardGate::U(theta, phi, lambda) => m2(Matrix2::u(
                theta.evaluate()?,
                phi.evaluate()?,
                lambda.evaluate()?,
            )),
            StandardGate::CX => ctrl(Matrix2::x()),
            StandardGate::CY => ctrl(Matrix2::y()),
            StandardGate::CZ => ctrl(Matrix2::z()),
            StandardGate::CH => ctrl(Matrix2::h()),
            StandardGate::CS => ctrl(Matrix2::s()),
            StandardGate::CP(t) => ctrl(Matrix2::p(t.evaluate()?)),
            StandardGate::CRx(t) => ctrl(Matrix2::rx(t.evaluate()?)),
            StandardGate::CRy(t) => ctrl(Matrix2::ry(t.evaluate()?)),
            StandardGate::CRz(t) => ctrl(Matrix2::rz(t.evaluate()?)),
            StandardGate::Swap => {
                let z = Complex64::new(0.0, 0.0);
                let o = Complex64::new(1.0, 0.0);
                DenseMatrix::from_vec(
                    2,
                    vec![o, z, z, z, z, z, o, z, z, o, z, z, z, z, z, o],
                )
            }
            StandardGate::RXX(t) => {
                let theta = t.evaluate()?;
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let ms = Complex64::new(0.0, -(theta / 2.0).sin());
                let z = Complex64::new(0.0, 0.0);
                DenseMatrix::from_vec(
                    2,
                    vec![c, z, z, ms, z, c, ms, z, z, ms, c, z, ms, z, z, c],
                )
            }
            StandardGate::RYY(t) => {
                let theta = t.evaluate()?;
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let ms = Complex64::new(0.0, -(theta / 2.0).sin());
                let ps = Complex64::new(0.0, (theta / 2.0).sin());
                let z = Complex64::new(0.0, 0.0);
                DenseMatrix::from_vec(
                    2,
                    vec![c, z, z, ps, z, c, ms, z, z, ms, c, z, ps, z, z, c],
                )
            }
            StandardGate::RZZ(t) => {
                let theta = t.evaluate()?;
                let em = Complex64::from_polar(1.0, -theta / 2.0);
                let ep = Complex64::from_polar(1.0, theta / 2.0);
                let z = Complex64::new(0.0, 0.0);
                DenseMatrix::from_vec(
                    2,
                    vec![em, z, z, z, z, ep, z, z, z, z, ep, z, z, z, z, em],
                )
            }
            StandardGate::CCX => Some(DenseMatrix::from(Matrix2::x()).controlled(2)),
            StandardGate::CSwap => StandardGate::Swap.matrix().map(|m| m.controlled(1)),
        }
    }
}

/// A gate defined by an explicit unitary matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The unitary matrix.
    matrix: DenseMatrix,
}

impl CustomGate {
    /// Create a custom gate from a row-major element vector.
    ///
    /// `matrix.len()` must equal `(2^num_qubits)^2`.
    pub fn new(
        name: impl Into<String>,
        num_qubits: usize,
        matrix: Vec<num_complex::Complex64>,
    ) -> IrResult<Self> {
        let name = name.into();
        let len = matrix.len();
        let matrix = DenseMatrix::from_vec(num_qubits, matrix).ok_or(IrError::InvalidMatrix {
            len,
            num_qubits,
            name: name.clone(),
        })?;
        Ok(Self { name, matrix })
    }

    /// Create a custom gate from a dense matrix.
    pub fn from_matrix(name: impl Into<String>, matrix: DenseMatrix) -> Self {
        Self {
            name: name.into(),
            matrix,
        }
    }

    /// The number of qubits this gate operates on.
    pub fn num_qubits(&self) -> usize {
        self.matrix.num_qubits()
    }

    /// The unitary matrix.
    pub fn matrix(&self) -> &DenseMatrix {
        &self.matrix
    }

    /// A custom gate implementing the inverse operation.
    pub fn inverse(&self) -> Self {
        Self {
            name: format!("{}_dg", self.name),
            matrix: self.matrix.dagger(),
        }
    }
}

/// A named, reusable gate declaration.
///
/// The body is a sequence of instructions over declaration-local wires
/// (qubit/bit/zvar indices below the declared arities).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateDecl {
    /// Declaration name.
    pub name: String,
    /// Number of qubit formals.
    pub num_qubits: usize,
    /// Body over declaration-local wires.
    pub body: Vec<Instruction>,
}

impl GateDecl {
    /// Create a declaration.
    pub fn new(name: impl Into<String>, num_qubits: usize, body: Vec<Instruction>) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            body,
        }
    }
}

/// A reference to a gate declaration, bound at instruction level to
/// concrete wires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateCall {
    /// The declaration being invoked.
    pub decl: Box<GateDecl>,
}

impl GateCall {
    /// Create a call to the given declaration.
    pub fn new(decl: GateDecl) -> Self {
        Self {
            decl: Box::new(decl),
        }
    }

    /// The number of qubits the call binds.
    pub fn num_qubits(&self) -> usize {
        self.decl.num_qubits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_arity() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
    }

    #[test]
    fn test_parameterized_flag() {
        assert!(!StandardGate::H.is_parameterized());
        assert!(!StandardGate::Rx(ParameterExpression::constant(1.0)).is_parameterized());
        assert!(StandardGate::Rx(ParameterExpression::symbol("theta")).is_parameterized());
    }

    #[test]
    fn test_inverse_pairs() {
        assert_eq!(StandardGate::S.inverse(), StandardGate::Sdg);
        assert_eq!(StandardGate::Tdg.inverse(), StandardGate::T);
        assert_eq!(StandardGate::CX.inverse(), StandardGate::CX);
    }

    #[test]
    fn test_inverse_matrix_is_dagger() {
        for gate in [
            StandardGate::S,
            StandardGate::T,
            StandardGate::SX,
            StandardGate::Rx(ParameterExpression::constant(0.7)),
            StandardGate::U(
                ParameterExpression::constant(0.3),
                ParameterExpression::constant(0.5),
                ParameterExpression::constant(0.9),
            ),
            StandardGate::CS,
            StandardGate::RZZ(ParameterExpression::constant(1.1)),
        ] {
            let m = gate.matrix().unwrap();
            let inv = gate.inverse().matrix().unwrap();
            assert!(
                m.dagger().approx_eq(&inv, 1e-12),
                "inverse of {} is not its dagger",
                gate.name()
            );
        }
    }

    #[test]
    fn test_symbolic_gate_has_no_matrix() {
        let gate = StandardGate::Rz(ParameterExpression::symbol("theta"));
        assert!(gate.matrix().is_none());
    }

    #[test]
    fn test_custom_gate_validates_matrix_size() {
        let bad = CustomGate::new("g", 2, vec![num_complex::Complex64::new(1.0, 0.0); 4]);
        assert!(matches!(bad, Err(IrError::InvalidMatrix { .. })));

        let good = CustomGate::new("g", 1, vec![num_complex::Complex64::new(1.0, 0.0); 4]);
        assert!(good.is_ok());
    }

    #[test]
    fn test_with_control_mapping() {
        assert_eq!(StandardGate::X.with_control(), Some(StandardGate::CX));
        assert_eq!(StandardGate::CX.with_control(), Some(StandardGate::CCX));
        assert_eq!(StandardGate::T.with_control(), None);
    }
}
