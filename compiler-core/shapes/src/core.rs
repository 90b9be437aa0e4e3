//! Implements core type structures.

use std::num::NonZeroU32;
use std::sync::Arc;

use smol_str::SmolStr;

/// An interned reference to a [`Type`] in [`TypeStorage`].
///
/// Types are hash-consed, so two [`TypeId`] values are equal if and only
/// if the types they refer to are structurally equal.
///
/// [`TypeStorage`]: crate::TypeStorage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub(crate) NonZeroU32);

impl TypeId {
    pub(crate) fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

/// The kind of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The kind of proper types, `Type`.
    Type,
    /// The kind of type constructors, `k1 -> k2`.
    Function(Arc<Kind>, Arc<Kind>),
}

impl Kind {
    pub fn function(argument: Kind, result: Kind) -> Kind {
        Kind::Function(Arc::new(argument), Arc::new(result))
    }

    /// Creates `Type -> ... -> Type` taking `arity` proper types.
    pub fn constructor(arity: usize) -> Kind {
        (0..arity).fold(Kind::Type, |result, _| Kind::function(Kind::Type, result))
    }

    pub fn is_type(&self) -> bool {
        matches!(self, Kind::Type)
    }

    /// Whether this is `Type -> Type`, the kind of one-argument generics.
    pub fn is_unary_constructor(&self) -> bool {
        match self {
            Kind::Function(argument, result) => argument.is_type() && result.is_type(),
            Kind::Type => false,
        }
    }

    /// Whether this is `Type -> Type -> Type`.
    pub fn is_binary_constructor(&self) -> bool {
        match self {
            Kind::Function(argument, result) => argument.is_type() && result.is_unary_constructor(),
            Kind::Type => false,
        }
    }

    pub fn split(&self) -> Option<(&Kind, &Kind)> {
        if let Kind::Function(argument, result) = self { Some((argument, result)) } else { None }
    }
}

/// The core type representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A named type constructor, `Pair`.
    Constructor(SmolStr),
    /// Type application, `Pair Int`.
    Application(TypeId, TypeId),
}
