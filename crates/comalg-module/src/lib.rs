#![deny(missing_docs)]
#![doc = "Finitely presented modules over comalg rings: Smith decomposition, annihilators, associated primes, Ext¹ and localization."]

pub mod ext;
pub mod localize;
pub mod module;
pub mod smith;

pub use ext::{ext1_order, syzygy_divisor, Projectivity};
pub use localize::{LocalFreeness, LocalModule, LocalRank, PrimeScope};
pub use module::{AssociatedPrime, Decomposition, Module, ModuleElement};
pub use smith::{smith_normal_form, SmithForm};
