#![deny(missing_docs)]
#![doc = "Rings, ideals and the shared error surface for comalg. Ideal arithmetic is exact over Z and Z/nZ."]

pub mod arith;
pub mod errors;
pub mod ideal;
pub mod ring;

pub use errors::{AlgebraError, ErrorInfo};
pub use ideal::{Ideal, IdealSummary};
pub use ring::{Ring, RingHandle, RingKind, Spectrum};
