//! Implements memoization for single-hole resolution.

use rustc_hash::FxHashMap;
use shapes::{TypeId, TypeStorage};

use crate::capability::{Capability, InstanceLookup};
use crate::error::ResolveError;
use crate::single::{self, Unapply};

/// Remembers single-hole resolutions, failures included.
///
/// A cache is only valid for the [`TypeStorage`] and the lookup service it
/// was first used with, while the set of instances remains unchanged.
#[derive(Debug)]
pub struct ResolutionCache<I> {
    entries: FxHashMap<(Capability, TypeId), Result<Unapply<I>, ResolveError>>,
    hits: usize,
}

impl<I> Default for ResolutionCache<I> {
    fn default() -> ResolutionCache<I> {
        ResolutionCache { entries: FxHashMap::default(), hits: 0 }
    }
}

impl<I> ResolutionCache<I>
where
    I: Clone,
{
    pub fn resolve<L>(
        &mut self,
        storage: &TypeStorage,
        lookup: &L,
        capability: &Capability,
        applied: TypeId,
    ) -> Result<Unapply<I>, ResolveError>
    where
        L: InstanceLookup<Instance = I> + ?Sized,
    {
        let key = (Capability::clone(capability), applied);
        if let Some(result) = self.entries.get(&key) {
            self.hits += 1;
            return result.clone();
        }

        let result = single::resolve(storage, lookup, capability, applied);
        self.entries.insert(key, result.clone());
        result
    }
}

impl<I> ResolutionCache<I> {
    /// The number of requests answered without resolving.
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
    }
}
