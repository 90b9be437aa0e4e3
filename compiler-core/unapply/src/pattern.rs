//! Implements the fixed catalog of decomposition patterns.
//!
//! Each pattern describes a spine shape: how many arguments the applied type
//! has, which kind each argument must have, and which arguments become holes.
//! The catalogs below are ordered by priority; resolvers walk them front to
//! back and stop at the first pattern whose candidate form has an instance.

use std::fmt;

use shapes::{Form, Hole, Slot, TypeId, TypeStorage, toolkit};

/// A decomposition rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pattern {
    /// `M0 A0` to `\a -> M0 a`.
    Unary,
    /// `M0 F0 A0` to `\a -> M0 F0 a`, where `F0 :: Type -> Type`.
    ConstructorArgument,
    /// `M0 A0 B0` to `\a -> M0 a B0`.
    BinaryFirst,
    /// `M0 A0 B0` to `\a -> M0 A0 a`.
    BinarySecond,
    /// `M0 A0 .. Z0` to `\a -> M0 A0 .. a`, for arities 3 through 7.
    Trailing(TrailingArity),
    /// `M0 F A0 A0 B0` to `\a -> M0 F a a B0`.
    ConstructorCoupled,
    /// `M0 F A0 B0 C0` to `\a -> M0 F A0 B0 a`.
    ConstructorTrailing,
    /// `M0 F A0 B0` to `\a -> M0 F a B0`.
    ConstructorFirst,
    /// `M0 F A0 B0` to `\a -> M0 F A0 a`.
    ConstructorSecond,
    /// `X` to `\a -> X`.
    Constant,
    /// `M0 A0 B0` to `\a b -> M0 a b`.
    BinaryBoth,
    /// `M0 F A0 B0` to `\a b -> M0 F a b`.
    ConstructorBinaryBoth,
    /// `M0 (F A0) C B0` to `\a b -> M0 (F a) C b`.
    PartialBinary,
}

/// Single-hole patterns, highest priority first.
///
/// `BinaryFirst` before `BinarySecond` is a convention: when both positions
/// could vary, fixing the trailing argument is preferred.
pub const SINGLE_HOLE: &[Pattern] = &[
    Pattern::Unary,
    Pattern::ConstructorArgument,
    Pattern::BinaryFirst,
    Pattern::BinarySecond,
    Pattern::Trailing(TrailingArity(3)),
    Pattern::Trailing(TrailingArity(4)),
    Pattern::Trailing(TrailingArity(5)),
    Pattern::Trailing(TrailingArity(6)),
    Pattern::Trailing(TrailingArity(7)),
    Pattern::ConstructorCoupled,
    Pattern::ConstructorTrailing,
    Pattern::ConstructorFirst,
    Pattern::ConstructorSecond,
    Pattern::Constant,
];

/// The arity of a [`Pattern::Trailing`] rule, always within 3 through 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrailingArity(u8);

impl TrailingArity {
    pub const MIN: u8 = 3;
    pub const MAX: u8 = 7;

    pub fn new(arity: usize) -> Option<TrailingArity> {
        let arity = u8::try_from(arity).ok()?;
        let valid = (TrailingArity::MIN..=TrailingArity::MAX).contains(&arity);
        valid.then_some(TrailingArity(arity))
    }

    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

/// Dual-hole patterns, highest priority first.
pub const DUAL_HOLE: &[Pattern] = &[Pattern::BinaryBoth, Pattern::ConstructorBinaryBoth];

/// Nested-form patterns.
pub const NESTED: &[Pattern] = &[Pattern::PartialBinary];

/// The kind requirement placed on an argument position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// `Type`
    Proper,
    /// `Type -> Type`
    Constructor,
    /// `F A`, where `F :: Type -> Type -> Type` and `A :: Type`.
    Partial,
}

impl Position {
    fn admits(self, storage: &TypeStorage, argument: TypeId) -> bool {
        match self {
            Position::Proper => storage.kind(argument).is_type(),
            Position::Constructor => storage.kind(argument).is_unary_constructor(),
            Position::Partial => {
                let Some((function, inner)) = toolkit::split_application(storage, argument) else {
                    return false;
                };
                storage.kind(function).is_binary_constructor() && storage.kind(inner).is_type()
            }
        }
    }
}

/// A structural match proposed by a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub pattern: Pattern,
    pub form: Form,
    pub residuals: Vec<TypeId>,
}

const A: Slot = Slot::Hole(Hole::FIRST);
const B: Slot = Slot::Hole(Hole::SECOND);
const FIXED: Slot = Slot::Fixed;

impl Pattern {
    fn layout(self) -> Vec<(Position, Slot)> {
        use Position::{Constructor, Partial, Proper};

        match self {
            Pattern::Unary => vec![(Proper, A)],
            Pattern::ConstructorArgument => vec![(Constructor, FIXED), (Proper, A)],
            Pattern::BinaryFirst => vec![(Proper, A), (Proper, FIXED)],
            Pattern::BinarySecond => vec![(Proper, FIXED), (Proper, A)],
            Pattern::Trailing(arity) => {
                let mut layout = vec![(Proper, FIXED); arity.get() - 1];
                layout.push((Proper, A));
                layout
            }
            Pattern::ConstructorCoupled => {
                vec![(Constructor, FIXED), (Proper, A), (Proper, A), (Proper, FIXED)]
            }
            Pattern::ConstructorTrailing => {
                vec![(Constructor, FIXED), (Proper, FIXED), (Proper, FIXED), (Proper, A)]
            }
            Pattern::ConstructorFirst => vec![(Constructor, FIXED), (Proper, A), (Proper, FIXED)],
            Pattern::ConstructorSecond => vec![(Constructor, FIXED), (Proper, FIXED), (Proper, A)],
            Pattern::Constant => vec![],
            Pattern::BinaryBoth => vec![(Proper, A), (Proper, B)],
            Pattern::ConstructorBinaryBoth => vec![(Constructor, FIXED), (Proper, A), (Proper, B)],
            Pattern::PartialBinary => {
                vec![(Partial, Slot::Partial(Hole::FIRST)), (Proper, FIXED), (Proper, B)]
            }
        }
    }

    /// Matches `applied` against this pattern's shape.
    ///
    /// [`Pattern::Constant`] matches any type. Every other pattern requires
    /// `applied :: Type` and the kind of each argument position.
    pub fn candidate(self, storage: &TypeStorage, applied: TypeId) -> Option<Candidate> {
        if let Pattern::Constant = self {
            let form = Form::constant(applied);
            return Some(Candidate { pattern: self, form, residuals: vec![applied] });
        }

        if !storage.kind(applied).is_type() {
            return None;
        }

        let spine = toolkit::spine(storage, applied);
        let layout = self.layout();
        if layout.len() != spine.arity() {
            return None;
        }

        let admitted = layout
            .iter()
            .zip(&spine.arguments)
            .all(|(&(position, _), &argument)| position.admits(storage, argument));
        if !admitted {
            return None;
        }

        let slots: Vec<Slot> = layout.into_iter().map(|(_, slot)| slot).collect();
        let (form, residuals) = Form::decompose(storage, &spine, &slots)?;

        Some(Candidate { pattern: self, form, residuals })
    }

    pub fn describe(self) -> &'static str {
        match self {
            Pattern::Unary => "unary",
            Pattern::ConstructorArgument => "constructor-argument",
            Pattern::BinaryFirst => "binary-first",
            Pattern::BinarySecond => "binary-second",
            Pattern::Trailing(arity) => match arity.get() {
                3 => "trailing-3",
                4 => "trailing-4",
                5 => "trailing-5",
                6 => "trailing-6",
                7 => "trailing-7",
                _ => unreachable!("invariant violated: trailing arity outside 3..=7"),
            },
            Pattern::ConstructorCoupled => "constructor-coupled",
            Pattern::ConstructorTrailing => "constructor-trailing",
            Pattern::ConstructorFirst => "constructor-first",
            Pattern::ConstructorSecond => "constructor-second",
            Pattern::Constant => "constant",
            Pattern::BinaryBoth => "binary-both",
            Pattern::ConstructorBinaryBoth => "constructor-binary-both",
            Pattern::PartialBinary => "partial-binary",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
