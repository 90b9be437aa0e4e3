//! Implements shared utilities for walking type applications.

use crate::core::{Type, TypeId};
use crate::storage::TypeStorage;

/// A type application flattened into its head and arguments.
///
/// For `Pair Int String`, the head is `Pair`, the arguments are
/// `[Int, String]` and the prefixes are `[Pair, Pair Int, Pair Int String]`.
/// Every prefix is a subterm of the original type, so it is always interned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spine {
    pub head: TypeId,
    pub arguments: Vec<TypeId>,
    prefixes: Vec<TypeId>,
}

impl Spine {
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// The head applied to the first `count` arguments.
    pub fn prefix(&self, count: usize) -> TypeId {
        self.prefixes[count]
    }

    /// The original, fully applied type.
    pub fn applied(&self) -> TypeId {
        self.prefixes[self.arguments.len()]
    }
}

pub fn spine(storage: &TypeStorage, id: TypeId) -> Spine {
    let mut arguments = vec![];
    let mut prefixes = vec![id];
    let mut current = id;

    while let Type::Application(function, argument) = storage[current] {
        arguments.push(argument);
        prefixes.push(function);
        current = function;
    }

    arguments.reverse();
    prefixes.reverse();

    Spine { head: current, arguments, prefixes }
}

/// Splits `function argument`, if `id` is an application.
pub fn split_application(storage: &TypeStorage, id: TypeId) -> Option<(TypeId, TypeId)> {
    if let Type::Application(function, argument) = storage[id] {
        Some((function, argument))
    } else {
        None
    }
}
