//! Implements the nested-form resolver.
//!
//! For `M0 (F A) C B` where `F :: Type -> Type -> Type`, the recovered form is
//! `\a b -> M0 (F a) C b`. The instance is looked up for that form together
//! with `A`, which is threaded through the partially applied position.

use shapes::{Form, TypeId, TypeStorage};

use crate::capability::{Capability, InstanceLookup};
use crate::error::ResolveError;
use crate::evidence::{Decomposed, Equality};
use crate::search::{self, Catalog, Found};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unapply21<I> {
    capability: Capability,
    instance: I,
    equality: Equality,
}

impl<I> Unapply21<I> {
    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    pub fn form(&self) -> &Form {
        self.equality.form()
    }

    /// The argument of the partially applied generic, `A` in `F A`.
    pub fn argument(&self) -> TypeId {
        self.split().0
    }

    /// The trailing residual, `B`.
    pub fn residual(&self) -> TypeId {
        self.split().1
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

    fn split(&self) -> (TypeId, TypeId) {
        let [argument, residual] = self.equality.residuals() else {
            unreachable!("invariant violated: nested form has two residuals");
        };
        (*argument, *residual)
    }
}

pub fn resolve<L>(
    storage: &TypeStorage,
    lookup: &L,
    capability: &Capability,
    applied: TypeId,
) -> Result<Unapply21<L::Instance>, ResolveError>
where
    L: InstanceLookup + ?Sized,
{
    let Found { instance, equality, .. } =
        search::search(storage, lookup, capability, applied, Catalog::Nested)?;
    let capability = Capability::clone(capability);
    Ok(Unapply21 { capability, instance, equality })
}
