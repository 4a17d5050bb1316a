//! Sleipnir Engine Boundary
//!
//! This crate pins down the two contracts between the lowering core and
//! the external statevector engine:
//!
//! - the [`Engine`] trait: a lowered circuit plus a [`RunConfig`] in,
//!   classical samples, amplitudes and z-register values out
//!   ([`RunResult`]);
//! - the circuit interchange boundary: any [`CircuitCodec`] crossing the
//!   boundary must be a bijection on instruction count, operation kind,
//!   wire assignment, and numeric parameters to a fixed tolerance
//!   ([`check_interchange`], [`INTERCHANGE_TOLERANCE`]).
//!
//! The engine itself (sampling, RNG, amplitude computation) and its
//! native binary codec are external; [`JsonCodec`] is a reference codec
//! for tests and local tooling.
//!
//! # Example: Lower, Check, Execute
//!
//! ```ignore
//! use sleipnir_hal::{check_interchange, CircuitCodec, JsonCodec, RunConfig,
//!                    INTERCHANGE_TOLERANCE};
//! use sleipnir_ir::Circuit;
//! use sleipnir_lower::{CapabilitySet, Lowering};
//!
//! let lowering = Lowering::new(CapabilitySet::statevector());
//! let lowered = lowering.lower(&Circuit::bell()?)?;
//!
//! let codec = JsonCodec;
//! let bytes = codec.encode(&lowered)?;
//! let decoded = codec.decode(&bytes)?;
//! check_interchange(&lowered, &decoded, INTERCHANGE_TOLERANCE)?;
//!
//! let result = engine.execute(&decoded, &RunConfig::new().with_seed(1)).await?;
//! ```

pub mod convert;
pub mod engine;
pub mod error;
pub mod result;

pub use convert::{CircuitCodec, INTERCHANGE_TOLERANCE, JsonCodec, check_interchange};
pub use engine::{Engine, RunConfig};
pub use error::{HalError, HalResult};
pub use result::{Counts, RunResult};
