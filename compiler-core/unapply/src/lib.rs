//! Recovers generic forms from applied types and looks up capabilities for them.
//!
//! Given `Pair Int String` and a capability such as `Functor`, resolution
//! decides which argument position is the hole, rebuilds the type as a form
//! applied to residuals, and finds an instance for the form. Candidate
//! decompositions come from fixed catalogs in [`pattern`] and are tried in
//! priority order; the first one with an instance wins.

pub mod cache;
pub mod capability;
pub mod dual;
pub mod error;
pub mod evidence;
pub mod nested;
pub mod pattern;
pub mod product;
pub mod search;
pub mod single;
pub mod trace;

pub use cache::ResolutionCache;
pub use capability::{Capability, InstanceEnvironment, InstanceHead, InstanceLookup};
pub use dual::Unapply2;
pub use error::{ErrorCrumb, ErrorKind, ResolveError};
pub use evidence::{Applied, CoercionError, Decomposed, Equality};
pub use nested::Unapply21;
pub use pattern::{Pattern, TrailingArity};
pub use product::{Isomorphism, UnapplyProduct};
pub use single::Unapply;
