//! Implements the capability-instance lookup contract.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use shapes::{Form, TypeId};
use smol_str::SmolStr;

/// An opaque capability interface, such as `Functor` or `Bifunctor`.
///
/// Capabilities are only ever compared and hashed; resolution never looks
/// inside them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capability(SmolStr);

impl Capability {
    pub fn new(name: impl Into<SmolStr>) -> Capability {
        Capability(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The key an instance is registered and looked up under.
///
/// Most capabilities are indexed by a form alone, `Functor (\a -> Pair Int a)`.
/// Capabilities over a two-argument form and a type, `TC (\a b -> M (F a) C b) A`,
/// carry their extra type arguments in `arguments`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceHead {
    pub capability: Capability,
    pub form: Form,
    pub arguments: Arc<[TypeId]>,
}

impl InstanceHead {
    pub fn new(capability: Capability, form: Form) -> InstanceHead {
        InstanceHead { capability, form, arguments: Arc::from([]) }
    }

    pub fn with_arguments(
        capability: Capability,
        form: Form,
        arguments: impl IntoIterator<Item = TypeId>,
    ) -> InstanceHead {
        let arguments = arguments.into_iter().collect();
        InstanceHead { capability, form, arguments }
    }
}

/// The external service that answers whether an instance exists for a head.
///
/// Resolvers query this at most once per pattern attempt.
pub trait InstanceLookup {
    type Instance;

    fn lookup_instance(&self, head: &InstanceHead) -> Option<Self::Instance>;
}

impl<L> InstanceLookup for &L
where
    L: InstanceLookup + ?Sized,
{
    type Instance = L::Instance;

    fn lookup_instance(&self, head: &InstanceHead) -> Option<Self::Instance> {
        L::lookup_instance(self, head)
    }
}

/// An in-memory registry of instances keyed by exact [`InstanceHead`].
#[derive(Debug)]
pub struct InstanceEnvironment<I> {
    instances: FxHashMap<InstanceHead, I>,
}

impl<I> Default for InstanceEnvironment<I> {
    fn default() -> InstanceEnvironment<I> {
        InstanceEnvironment { instances: FxHashMap::default() }
    }
}

impl<I> InstanceEnvironment<I> {
    /// Registers an instance, returning the one it replaces.
    pub fn register(&mut self, head: InstanceHead, instance: I) -> Option<I> {
        self.instances.insert(head, instance)
    }

    pub fn get(&self, head: &InstanceHead) -> Option<&I> {
        self.instances.get(head)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl<I> InstanceLookup for InstanceEnvironment<I>
where
    I: Clone,
{
    type Instance = I;

    fn lookup_instance(&self, head: &InstanceHead) -> Option<I> {
        self.instances.get(head).cloned()
    }
}
