//! Dense unitary matrices for gate semantics.
//!
//! Two-qubit and smaller operators are all this crate ever materializes:
//! the lowering fallback replaces an unsupported unitary by its dense
//! matrix, and that fallback is restricted to at most two qubits.
//!
//! Convention: row-major storage, big-endian qubit order: the first wire
//! of an instruction is the most significant bit of the basis index.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Tolerance for floating point comparisons.
const EPSILON: f64 = 1e-10;

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Matrix2 {
    /// Create a new 2x2 matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    fn real(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::new(
            Complex64::new(a, 0.0),
            Complex64::new(b, 0.0),
            Complex64::new(c, 0.0),
            Complex64::new(d, 0.0),
        )
    }

    /// The identity matrix.
    pub fn identity() -> Self {
        Self::real(1.0, 0.0, 0.0, 1.0)
    }

    /// The Hadamard matrix.
    pub fn h() -> Self {
        let s = 1.0 / 2.0_f64.sqrt();
        Self::real(s, s, s, -s)
    }

    /// The Pauli-X matrix.
    pub fn x() -> Self {
        Self::real(0.0, 1.0, 1.0, 0.0)
    }

    /// The Pauli-Y matrix.
    pub fn y() -> Self {
        Self::new(
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, -1.0),
            Complex64::new(0.0, 1.0),
            Complex64::new(0.0, 0.0),
        )
    }

    /// The Pauli-Z matrix.
    pub fn z() -> Self {
        Self::real(1.0, 0.0, 0.0, -1.0)
    }

    /// The S gate (sqrt(Z)).
    pub fn s() -> Self {
        Self::p(PI / 2.0)
    }

    /// The S-dagger gate.
    pub fn sdg() -> Self {
        Self::p(-PI / 2.0)
    }

    /// The T gate (fourth root of Z).
    pub fn t() -> Self {
        Self::p(PI / 4.0)
    }

    /// The T-dagger gate.
    pub fn tdg() -> Self {
        Self::p(-PI / 4.0)
    }

    /// The SX gate (sqrt(X)).
    pub fn sx() -> Self {
        let half = Complex64::new(0.5, 0.0);
        let half_i = Complex64::new(0.0, 0.5);
        Self::new(half + half_i, half - half_i, half - half_i, half + half_i)
    }

    /// The SX-dagger gate.
    pub fn sxdg() -> Self {
        Self::sx().dagger()
    }

    /// Rotation around the X axis.
    pub fn rx(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(0.0, -s),
            Complex64::new(0.0, -s),
            Complex64::new(c, 0.0),
        )
    }

    /// Rotation around the Y axis.
    pub fn ry(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::real(c, -s, s, c)
    }

    /// Rotation around the Z axis.
    pub fn rz(theta: f64) -> Self {
        Self::new(
            Complex64::from_polar(1.0, -theta / 2.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// The phase gate P(lambda).
    pub fn p(lambda: f64) -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::from_polar(1.0, lambda),
        )
    }

    /// The universal gate U(theta, phi, lambda).
    pub fn u(theta: f64, phi: f64, lambda: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        )
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// The conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Real power U^t via the axis-angle form of SU(2).
    ///
    /// Writes U = e^{iδ}(cos(α)·I + i·sin(α)·n·σ) and scales δ and α by t
    /// on the principal branch (α in [0, π]).
    pub fn powf(&self, t: f64) -> Self {
        let [a, b, c, d] = self.data;
        let det = a * d - b * c;
        let delta = det.arg() / 2.0;
        let unphase = Complex64::from_polar(1.0, -delta);
        // SU(2) part
        let v = [a * unphase, b * unphase, c * unphase, d * unphase];

        let cos_a = ((v[0] + v[3]) / 2.0).re;
        // (V - cos(α)·I) / i = sin(α)·n·σ
        let m00 = (v[0] - Complex64::new(cos_a, 0.0)) * Complex64::new(0.0, -1.0);
        let m01 = v[1] * Complex64::new(0.0, -1.0);
        let m10 = v[2] * Complex64::new(0.0, -1.0);
        let snz = m00.re;
        let snx = (m01.re + m10.re) / 2.0;
        let sny = (m10.im - m01.im) / 2.0;
        let sin_a = (snx * snx + sny * sny + snz * snz).sqrt();

        let (nx, ny, nz) = if sin_a > EPSILON {
            (snx / sin_a, sny / sin_a, snz / sin_a)
        } else {
            // V = ±I; pick the Z axis for the degenerate -I case.
            (0.0, 0.0, 1.0)
        };

        let alpha = sin_a.atan2(cos_a);
        let ta = alpha * t;
        let (tc, ts) = (ta.cos(), ta.sin());

        // V^t = cos(tα)·I + i·sin(tα)·n·σ, then restore the phase e^{iδt}.
        let phase = Complex64::from_polar(1.0, delta * t);
        let i = Complex64::new(0.0, 1.0);
        Self::new(
            phase * (Complex64::new(tc, 0.0) + i * Complex64::new(ts * nz, 0.0)),
            phase * (i * Complex64::new(ts * nx, -ts * ny)),
            phase * (i * Complex64::new(ts * nx, ts * ny)),
            phase * (Complex64::new(tc, 0.0) - i * Complex64::new(ts * nz, 0.0)),
        )
    }

    /// Principal square root.
    pub fn sqrt(&self) -> Self {
        self.powf(0.5)
    }

    /// Check equality to another matrix up to a global phase.
    pub fn approx_eq_up_to_phase(&self, other: &Self, tol: f64) -> bool {
        // self† · other must be a unit scalar multiple of the identity.
        let p = self.dagger().mul(other);
        let [a, b, c, d] = p.data;
        b.norm() < tol && c.norm() < tol && (a - d).norm() < tol && (a.norm() - 1.0).abs() < tol
    }

    /// Decompose into `phase · Rz(alpha) · Ry(beta) · Rz(gamma)`.
    ///
    /// Returns `(alpha, beta, gamma, phase)`, the ZYZ Euler angles used by
    /// the controlled-unitary decomposition.
    pub fn zyz_decomposition(&self) -> (f64, f64, f64, f64) {
        let [a, b, c, d] = self.data;

        let det = a * d - b * c;
        let global_phase = det.arg() / 2.0;

        let phase_factor = Complex64::from_polar(1.0, -global_phase);
        let a = a * phase_factor;
        let b = b * phase_factor;
        let c = c * phase_factor;

        let beta = 2.0 * a.norm().clamp(0.0, 1.0).acos();

        if beta.abs() < EPSILON {
            // beta ≈ 0: pure Z rotation.
            let alpha_plus_gamma = -2.0 * a.arg();
            return (
                alpha_plus_gamma / 2.0,
                0.0,
                alpha_plus_gamma / 2.0,
                global_phase,
            );
        }

        if (beta - PI).abs() < EPSILON {
            // beta ≈ π: anti-diagonal.
            let alpha_minus_gamma = -2.0 * (-b).arg();
            return (
                alpha_minus_gamma / 2.0,
                PI,
                -alpha_minus_gamma / 2.0,
                global_phase,
            );
        }

        // a = cos(beta/2) e^{-i(alpha+gamma)/2}, c = sin(beta/2) e^{i(alpha-gamma)/2}
        let alpha_plus_gamma = -2.0 * a.arg();
        let alpha_minus_gamma = 2.0 * c.arg();

        let alpha = (alpha_plus_gamma + alpha_minus_gamma) / 2.0;
        let gamma = (alpha_plus_gamma - alpha_minus_gamma) / 2.0;

        (alpha, beta, gamma, global_phase)
    }
}

impl Default for Matrix2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Matrix2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Matrix2::mul(&self, &rhs)
    }
}

/// A dense unitary over one or two qubits, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseMatrix {
    num_qubits: usize,
    data: Vec<Complex64>,
}

impl DenseMatrix {
    /// Build from a row-major element vector. `data.len()` must be
    /// `(2^num_qubits)^2`; returns `None` otherwise.
    pub fn from_vec(num_qubits: usize, data: Vec<Complex64>) -> Option<Self> {
        let dim = 1usize << num_qubits;
        if data.len() == dim * dim {
            Some(Self { num_qubits, data })
        } else {
            None
        }
    }

    /// The identity on `num_qubits` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let mut data = vec![Complex64::new(0.0, 0.0); dim * dim];
        for r in 0..dim {
            data[r * dim + r] = Complex64::new(1.0, 0.0);
        }
        Self { num_qubits, data }
    }

    /// Number of qubits this operator acts on.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Matrix dimension (2^num_qubits).
    pub fn dim(&self) -> usize {
        1usize << self.num_qubits
    }

    /// Element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim() + col]
    }

    /// Row-major elements.
    pub fn elements(&self) -> &[Complex64] {
        &self.data
    }

    /// Consume into the row-major element vector.
    pub fn into_elements(self) -> Vec<Complex64> {
        self.data
    }

    /// Multiply: self * other. Both operands must act on the same qubits.
    pub fn mul(&self, other: &Self) -> Self {
        debug_assert_eq!(self.num_qubits, other.num_qubits);
        let dim = self.dim();
        let mut data = vec![Complex64::new(0.0, 0.0); dim * dim];
        for r in 0..dim {
            for k in 0..dim {
                let a = self.data[r * dim + k];
                if a.norm_sqr() == 0.0 {
                    continue;
                }
                for c in 0..dim {
                    data[r * dim + c] += a * other.data[k * dim + c];
                }
            }
        }
        Self {
            num_qubits: self.num_qubits,
            data,
        }
    }

    /// The conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        let dim = self.dim();
        let mut data = vec![Complex64::new(0.0, 0.0); dim * dim];
        for r in 0..dim {
            for c in 0..dim {
                data[c * dim + r] = self.data[r * dim + c].conj();
            }
        }
        Self {
            num_qubits: self.num_qubits,
            data,
        }
    }

    /// Kronecker product: self on the first wires, other on the last.
    pub fn kron(&self, other: &Self) -> Self {
        let da = self.dim();
        let db = other.dim();
        let dim = da * db;
        let mut data = vec![Complex64::new(0.0, 0.0); dim * dim];
        for ra in 0..da {
            for ca in 0..da {
                let a = self.data[ra * da + ca];
                for rb in 0..db {
                    for cb in 0..db {
                        data[(ra * db + rb) * dim + (ca * db + cb)] =
                            a * other.data[rb * db + cb];
                    }
                }
            }
        }
        Self {
            num_qubits: self.num_qubits + other.num_qubits,
            data,
        }
    }

    /// Embed as a controlled operator with `controls` control qubits in
    /// front: identity everywhere except the final block, which is `self`.
    pub fn controlled(&self, controls: usize) -> Self {
        let mut out = Self::identity(self.num_qubits + controls);
        let dim = out.dim();
        let d = self.dim();
        let offset = dim - d;
        for r in 0..d {
            for c in 0..d {
                out.data[(offset + r) * dim + (offset + c)] = self.data[r * d + c];
            }
        }
        out
    }

    /// Integer power; negative exponents use the dagger.
    pub fn pow_int(&self, exponent: i64) -> Self {
        let base = if exponent < 0 {
            self.dagger()
        } else {
            self.clone()
        };
        let mut out = Self::identity(self.num_qubits);
        for _ in 0..exponent.unsigned_abs() {
            out = out.mul(&base);
        }
        out
    }

    /// View as a 2x2 matrix, if this is a single-qubit operator.
    pub fn as_matrix2(&self) -> Option<Matrix2> {
        if self.num_qubits == 1 {
            Some(Matrix2::new(
                self.data[0],
                self.data[1],
                self.data[2],
                self.data[3],
            ))
        } else {
            None
        }
    }

    /// Element-wise approximate equality.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.num_qubits == other.num_qubits
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).norm() < tol)
    }

    /// Equality up to a global phase.
    pub fn approx_eq_up_to_phase(&self, other: &Self, tol: f64) -> bool {
        if self.num_qubits != other.num_qubits {
            return false;
        }
        // self† · other must be a unit scalar multiple of the identity.
        let p = self.dagger().mul(other);
        let dim = p.dim();
        let scalar = p.data[0];
        if (scalar.norm() - 1.0).abs() > tol {
            return false;
        }
        for r in 0..dim {
            for c in 0..dim {
                let expected = if r == c {
                    scalar
                } else {
                    Complex64::new(0.0, 0.0)
                };
                if (p.data[r * dim + c] - expected).norm() > tol {
                    return false;
                }
            }
        }
        true
    }
}

impl From<Matrix2> for DenseMatrix {
    fn from(m: Matrix2) -> Self {
        Self {
            num_qubits: 1,
            data: m.data.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hadamard_squared_is_identity() {
        let h = Matrix2::h();
        assert!((h * h).approx_eq_up_to_phase(&Matrix2::identity(), 1e-12));
    }

    #[test]
    fn test_pauli_squared() {
        for m in [Matrix2::x(), Matrix2::y(), Matrix2::z()] {
            assert!((m * m).approx_eq_up_to_phase(&Matrix2::identity(), 1e-12));
        }
    }

    #[test]
    fn test_sqrt_of_z_is_s() {
        let root = Matrix2::z().sqrt();
        for i in 0..4 {
            assert!((root.data[i] - Matrix2::s().data[i]).norm() < 1e-9);
        }
    }

    #[test]
    fn test_sqrt_of_x_squares_back() {
        let v = Matrix2::x().sqrt();
        let x = v * v;
        for i in 0..4 {
            assert!((x.data[i] - Matrix2::x().data[i]).norm() < 1e-9);
        }
    }

    #[test]
    fn test_powf_fractional_rotation() {
        // Rz(θ)^t == Rz(θ·t)
        let theta = 1.234;
        let powed = Matrix2::rz(theta).powf(0.25);
        let direct = Matrix2::rz(theta * 0.25);
        assert!(powed.approx_eq_up_to_phase(&direct, 1e-9));
    }

    #[test]
    fn test_zyz_reconstructs_hadamard() {
        let h = Matrix2::h();
        let (alpha, beta, gamma, phase) = h.zyz_decomposition();
        let rebuilt = Matrix2::rz(alpha) * Matrix2::ry(beta) * Matrix2::rz(gamma);
        let global = Complex64::from_polar(1.0, phase);
        for i in 0..4 {
            assert!((h.data[i] - rebuilt.data[i] * global).norm() < 1e-9);
        }
    }

    #[test]
    fn test_controlled_embedding_is_cx() {
        let cx = DenseMatrix::from(Matrix2::x()).controlled(1);
        let expected = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 0.0],
        ];
        for r in 0..4 {
            for c in 0..4 {
                assert!((cx.get(r, c).re - expected[r][c]).abs() < 1e-12);
                assert!(cx.get(r, c).im.abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_kron_dimensions() {
        let hh = DenseMatrix::from(Matrix2::h()).kron(&DenseMatrix::from(Matrix2::h()));
        assert_eq!(hh.num_qubits(), 2);
        assert!((hh.get(0, 0).re - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_pow_int_negative_is_inverse() {
        let s = DenseMatrix::from(Matrix2::s());
        let id = s.mul(&s.pow_int(-1));
        assert!(id.approx_eq(&DenseMatrix::identity(1), 1e-12));
    }
}
