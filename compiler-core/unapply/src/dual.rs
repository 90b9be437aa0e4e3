//! Implements the dual-hole resolver.
//!
//! Capabilities over two-argument forms, such as `Bifunctor`, need both
//! residuals recovered at once. There is no constant fallback at this level.

use shapes::{Form, TypeId, TypeStorage};

use crate::capability::{Capability, InstanceLookup};
use crate::error::ResolveError;
use crate::evidence::{Decomposed, Equality};
use crate::pattern::Pattern;
use crate::search::{self, Catalog, Found};

/// A resolved decomposition `applied = form[first, second]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unapply2<I> {
    pattern: Pattern,
    capability: Capability,
    instance: I,
    equality: Equality,
}

impl<I> Unapply2<I> {
    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    pub fn form(&self) -> &Form {
        self.equality.form()
    }

    pub fn residuals(&self) -> (TypeId, TypeId) {
        let [first, second] = self.equality.residuals() else {
            unreachable!("invariant violated: dual-hole form has two residuals");
        };
        (*first, *second)
    }

    pub fn first_residual(&self) -> TypeId {
        self.residuals().0
    }

    pub fn second_residual(&self) -> TypeId {
        self.residuals().1
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

    pub fn apply<V>(&self, value: V) -> Decomposed<V> {
        self.equality.decompose(value)
    }
}

/// Decomposes `applied` into a two-hole form with an instance of `capability`.
pub fn resolve<L>(
    storage: &TypeStorage,
    lookup: &L,
    capability: &Capability,
    applied: TypeId,
) -> Result<Unapply2<L::Instance>, ResolveError>
where
    L: InstanceLookup + ?Sized,
{
    let Found { pattern, instance, equality } =
        search::search(storage, lookup, capability, applied, Catalog::Dual)?;
    let capability = Capability::clone(capability);
    Ok(Unapply2 { pattern, capability, instance, equality })
}
