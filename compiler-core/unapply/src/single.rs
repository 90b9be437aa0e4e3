//! Implements the single-hole resolver.

use shapes::{Form, TypeId, TypeStorage};

use crate::capability::{Capability, InstanceLookup};
use crate::error::ResolveError;
use crate::evidence::{Applied, CoercionError, Decomposed, Equality};
use crate::pattern::Pattern;
use crate::search::{self, Catalog, Found};

/// A resolved decomposition `applied = form[residual]` with an instance for
/// `capability[form]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unapply<I> {
    pattern: Pattern,
    capability: Capability,
    instance: I,
    equality: Equality,
}

impl<I> Unapply<I> {
    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    pub fn form(&self) -> &Form {
        self.equality.form()
    }

    pub fn residual(&self) -> TypeId {
        let [residual] = self.equality.residuals() else {
            unreachable!("invariant violated: single-hole form has one residual");
        };
        *residual
    }

    pub fn applied(&self) -> TypeId {
        self.equality.applied()
    }

    pub fn instance(&self) -> &I {
        &self.instance
    }

    pub fn equality(&self) -> &Equality {
        &self.equality
    }

    /// Views a value of the applied type as `form[residual]`.
    pub fn apply<V>(&self, value: V) -> Decomposed<V> {
        self.equality.decompose(value)
    }

    pub fn to_decomposed<V>(&self, value: Applied<V>) -> Result<Decomposed<V>, CoercionError> {
        self.equality.to_decomposed(value)
    }

    pub fn to_applied<V>(&self, value: Decomposed<V>) -> Result<Applied<V>, CoercionError> {
        self.equality.to_applied(value)
    }
}

/// Decomposes `applied` into a single-hole form with an instance of `capability`.
pub fn resolve<L>(
    storage: &TypeStorage,
    lookup: &L,
    capability: &Capability,
    applied: TypeId,
) -> Result<Unapply<L::Instance>, ResolveError>
where
    L: InstanceLookup + ?Sized,
{
    let Found { pattern, instance, equality } =
        search::search(storage, lookup, capability, applied, Catalog::Single)?;
    let capability = Capability::clone(capability);
    Ok(Unapply { pattern, capability, instance, equality })
}
