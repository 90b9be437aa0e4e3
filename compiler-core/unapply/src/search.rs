//! Implements the priority search shared by every resolver.

use std::sync::Arc;

use shapes::{TypeId, TypeStorage};

use crate::capability::{Capability, InstanceHead, InstanceLookup};
use crate::error::{ErrorCrumb, ErrorKind, ResolveError};
use crate::evidence::Equality;
use crate::pattern::{self, Candidate, Pattern};
use crate::{debug_fields, trace, trace_fields};

/// The pattern catalog a resolver searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    Single,
    Dual,
    Nested,
}

impl Catalog {
    pub fn patterns(self) -> &'static [Pattern] {
        match self {
            Catalog::Single => pattern::SINGLE_HOLE,
            Catalog::Dual => pattern::DUAL_HOLE,
            Catalog::Nested => pattern::NESTED,
        }
    }

    pub fn crumb(self) -> ErrorCrumb {
        match self {
            Catalog::Single => ErrorCrumb::Single,
            Catalog::Dual => ErrorCrumb::Dual,
            Catalog::Nested => ErrorCrumb::Nested,
        }
    }

    /// The key a candidate is looked up under.
    ///
    /// Nested forms are indexed by the form and the type threaded through
    /// its partially applied position.
    fn head(self, capability: &Capability, candidate: &Candidate) -> InstanceHead {
        let capability = Capability::clone(capability);
        let form = candidate.form.clone();
        match self {
            Catalog::Single | Catalog::Dual => InstanceHead::new(capability, form),
            Catalog::Nested => {
                let [argument, _] = candidate.residuals[..] else {
                    unreachable!("invariant violated: nested candidate has two residuals");
                };
                InstanceHead::with_arguments(capability, form, [argument])
            }
        }
    }
}

/// The winning attempt of a search.
#[derive(Debug)]
pub struct Found<I> {
    pub pattern: Pattern,
    pub instance: I,
    pub equality: Equality,
}

/// Tries each pattern of `catalog` in priority order.
///
/// Each structural match costs exactly one lookup. The first lookup that
/// yields an instance wins and later patterns are never examined.
pub fn search<L>(
    storage: &TypeStorage,
    lookup: &L,
    capability: &Capability,
    applied: TypeId,
    catalog: Catalog,
) -> Result<Found<L::Instance>, ResolveError>
where
    L: InstanceLookup + ?Sized,
{
    let _span = trace::resolve_span(catalog, storage, capability, applied);

    let mut attempted = vec![];

    for &pattern in catalog.patterns() {
        let Some(candidate) = pattern.candidate(storage, applied) else {
            continue;
        };

        attempted.push(pattern);

        let head = catalog.head(capability, &candidate);
        let instance = lookup.lookup_instance(&head);

        trace_fields!(storage, {
            pattern = pattern,
            form = &candidate.form,
            ?found = instance.is_some(),
        }, "attempt");

        let Some(instance) = instance else {
            continue;
        };

        let Candidate { form, residuals, .. } = candidate;
        let equality = Equality::certify(storage, applied, form, residuals).unwrap_or_else(|| {
            unreachable!("invariant violated: {pattern} does not reconstruct its applied type")
        });

        debug_fields!(storage, {
            pattern = pattern,
            form = equality.form(),
            residuals = equality.residuals(),
        }, "resolved");

        return Ok(Found { pattern, instance, equality });
    }

    debug_fields!(storage, { attempted = &attempted[..] }, "no viable decomposition");

    let capability = Capability::clone(capability);
    let attempted = Arc::from(attempted);
    let kind = ErrorKind::NoViableDecomposition { capability, applied, attempted };

    Err(ResolveError::new(kind).with_crumb(catalog.crumb()))
}
