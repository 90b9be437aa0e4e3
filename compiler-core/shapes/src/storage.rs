//! Implements hash-consed, kind-checked storage for [`Type`].

use std::hash::BuildHasher;
use std::num::NonZeroU32;
use std::ops;

use hashbrown::HashTable;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

use crate::core::{Kind, Type, TypeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindError {
    /// A constructor name was declared twice with different kinds.
    ConflictingDeclaration { name: SmolStr, existing: Kind, declared: Kind },
    /// A proper type was applied to an argument.
    NotAFunction { function: TypeId, kind: Kind },
    /// The argument kind does not match the parameter kind.
    ArgumentMismatch { function: TypeId, argument: TypeId, expected: Kind, actual: Kind },
}

#[derive(Debug, PartialEq, Eq)]
struct Entry {
    t: Type,
    kind: Kind,
}

/// Interns [`Type`] values along with their kinds.
///
/// Every stored type is well-kinded: constructors are declared with a kind
/// and applications are checked against it on insertion.
#[derive(Debug, Default)]
pub struct TypeStorage {
    entries: Vec<Entry>,
    table: HashTable<NonZeroU32>,
}

impl TypeStorage {
    /// Declares a named constructor, returning the existing one on redeclaration.
    pub fn declare(&mut self, name: impl Into<SmolStr>, kind: Kind) -> Result<TypeId, KindError> {
        let name = name.into();
        let t = Type::Constructor(SmolStr::clone(&name));

        if let Some(id) = self.lookup(&t) {
            let existing = self.kind(id);
            return if *existing == kind {
                Ok(id)
            } else {
                let existing = Kind::clone(existing);
                Err(KindError::ConflictingDeclaration { name, existing, declared: kind })
            };
        }

        Ok(self.insert(t, kind))
    }

    pub fn constructor(&self, name: &str) -> Option<TypeId> {
        self.lookup(&Type::Constructor(SmolStr::new(name)))
    }

    /// Interns `function argument`, checking the kind of the argument.
    pub fn apply(&mut self, function: TypeId, argument: TypeId) -> Result<TypeId, KindError> {
        let t = Type::Application(function, argument);
        if let Some(id) = self.lookup(&t) {
            return Ok(id);
        }

        let function_kind = self.kind(function);
        let Some((expected, result)) = function_kind.split() else {
            let kind = Kind::clone(function_kind);
            return Err(KindError::NotAFunction { function, kind });
        };

        let actual = self.kind(argument);
        if expected != actual {
            let expected = Kind::clone(expected);
            let actual = Kind::clone(actual);
            return Err(KindError::ArgumentMismatch { function, argument, expected, actual });
        }

        let result = Kind::clone(result);
        Ok(self.insert(t, result))
    }

    pub fn apply_all(
        &mut self,
        function: TypeId,
        arguments: impl IntoIterator<Item = TypeId>,
    ) -> Result<TypeId, KindError> {
        arguments.into_iter().try_fold(function, |function, argument| self.apply(function, argument))
    }

    /// Finds an already interned type without inserting it.
    pub fn lookup(&self, t: &Type) -> Option<TypeId> {
        let hash = FxBuildHasher.hash_one(t);
        let id = self.table.find(hash, |&id| self.entry(id).t == *t)?;
        Some(TypeId(*id))
    }

    pub fn kind(&self, id: TypeId) -> &Kind {
        &self.entry(id.0).kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, t: Type, kind: Kind) -> TypeId {
        let hash = FxBuildHasher.hash_one(&t);
        self.entries.push(Entry { t, kind });

        let index = self.entries.len();
        let id = NonZeroU32::new(index as u32).unwrap_or_else(|| {
            unreachable!("invariant violated: storage index is 1-based");
        });

        let TypeStorage { entries, table } = self;
        table.insert_unique(hash, id, |&id| {
            let entry = &entries[id.get() as usize - 1];
            FxBuildHasher.hash_one(&entry.t)
        });

        TypeId(id)
    }

    fn entry(&self, id: NonZeroU32) -> &Entry {
        self.entries.get(id.get() as usize - 1).unwrap_or_else(|| {
            unreachable!("invariant violated: {id} is not a valid index");
        })
    }
}

impl ops::Index<TypeId> for TypeStorage {
    type Output = Type;

    fn index(&self, id: TypeId) -> &Type {
        &self.entries[id.index()].t
    }
}

#[cfg(test)]
mod tests {
    use super::{KindError, TypeStorage};
    use crate::core::{Kind, Type};

    #[test]
    fn test_hash_consing() {
        let mut storage = TypeStorage::default();
        let int = storage.declare("Int", Kind::Type).unwrap();
        let string = storage.declare("String", Kind::Type).unwrap();
        let pair = storage.declare("Pair", Kind::constructor(2)).unwrap();

        let a = storage.apply_all(pair, [int, string]).unwrap();
        let b = storage.apply_all(pair, [int, string]).unwrap();
        let c = storage.apply_all(pair, [string, int]).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(storage.kind(a).is_type());
        assert_eq!(storage.len(), 7);
    }

    #[test]
    fn test_redeclaration() {
        let mut storage = TypeStorage::default();
        let box_a = storage.declare("Box", Kind::constructor(1)).unwrap();
        let box_b = storage.declare("Box", Kind::constructor(1)).unwrap();
        assert_eq!(box_a, box_b);

        let conflict = storage.declare("Box", Kind::Type);
        assert!(matches!(conflict, Err(KindError::ConflictingDeclaration { .. })));
        assert_eq!(storage.constructor("Box"), Some(box_a));
        assert_eq!(storage.constructor("Missing"), None);
    }

    #[test]
    fn test_kind_checking() {
        let mut storage = TypeStorage::default();
        let int = storage.declare("Int", Kind::Type).unwrap();
        let option = storage.declare("Option", Kind::constructor(1)).unwrap();
        let option_t = storage
            .declare("OptionT", Kind::function(Kind::constructor(1), Kind::constructor(1)))
            .unwrap();

        assert!(matches!(storage.apply(int, int), Err(KindError::NotAFunction { .. })));
        assert!(matches!(storage.apply(option_t, int), Err(KindError::ArgumentMismatch { .. })));

        let nested = storage.apply_all(option_t, [option, int]).unwrap();
        assert!(storage.kind(nested).is_type());

        let Type::Application(function, argument) = storage[nested] else {
            unreachable!("invariant violated");
        };
        assert_eq!(argument, int);
        assert!(storage.kind(function).is_unary_constructor());
    }

    #[test]
    fn test_failed_application_is_not_interned() {
        let mut storage = TypeStorage::default();
        let int = storage.declare("Int", Kind::Type).unwrap();
        let before = storage.len();
        let _ = storage.apply(int, int);
        assert_eq!(storage.len(), before);
    }
}
