//! Implements forms, type-level templates with numbered holes.
//!
//! A [`Form`] such as `\a -> Pair a String` is stored as a [`Template`]
//! over interned types. Templates are kept canonical: every subtree that
//! mentions no hole is collapsed into a single [`Template::Fixed`]. Since
//! [`TypeId`] equality is structural, two forms denoting the same type-level
//! function compare equal and hash identically, which lets them act as keys.

use std::sync::Arc;

use crate::core::TypeId;
use crate::storage::{KindError, TypeStorage};
use crate::toolkit::{self, Spine};

/// Forms have exactly one or exactly two holes.
pub const MAX_ARITY: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hole(pub u8);

impl Hole {
    pub const FIRST: Hole = Hole(0);
    pub const SECOND: Hole = Hole(1);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Template {
    /// A closed type.
    Fixed(TypeId),
    /// An open position.
    Hole(Hole),
    /// An application that mentions at least one hole.
    Application(Arc<Template>, Arc<Template>),
}

impl Template {
    pub fn application(function: Template, argument: Template) -> Template {
        Template::Application(Arc::new(function), Arc::new(argument))
    }

    pub fn application_all(
        function: Template,
        arguments: impl IntoIterator<Item = Template>,
    ) -> Template {
        arguments.into_iter().fold(function, Template::application)
    }

    pub fn is_closed(&self) -> bool {
        match self {
            Template::Fixed(_) => true,
            Template::Hole(_) => false,
            Template::Application(function, argument) => {
                function.is_closed() && argument.is_closed()
            }
        }
    }

    fn max_hole(&self) -> Option<Hole> {
        match self {
            Template::Fixed(_) => None,
            Template::Hole(hole) => Some(*hole),
            Template::Application(function, argument) => {
                function.max_hole().max(argument.max_hole())
            }
        }
    }

    fn canonicalize(&self, storage: &mut TypeStorage) -> Result<Template, KindError> {
        let Template::Application(function, argument) = self else {
            return Ok(Template::clone(self));
        };

        let function = function.canonicalize(storage)?;
        let argument = argument.canonicalize(storage)?;

        if let (Template::Fixed(function), Template::Fixed(argument)) = (&function, &argument) {
            Ok(Template::Fixed(storage.apply(*function, *argument)?))
        } else {
            Ok(Template::application(function, argument))
        }
    }

    fn reconstructs(&self, storage: &TypeStorage, residuals: &[TypeId], id: TypeId) -> bool {
        match self {
            Template::Fixed(fixed) => *fixed == id,
            Template::Hole(hole) => residuals.get(hole.index()) == Some(&id),
            Template::Application(function, argument) => {
                let Some((id_function, id_argument)) = toolkit::split_application(storage, id)
                else {
                    return false;
                };
                function.reconstructs(storage, residuals, id_function)
                    && argument.reconstructs(storage, residuals, id_argument)
            }
        }
    }

    fn instantiate(
        &self,
        storage: &mut TypeStorage,
        residuals: &[TypeId],
    ) -> Result<TypeId, FormError> {
        match self {
            Template::Fixed(id) => Ok(*id),
            Template::Hole(hole) => residuals
                .get(hole.index())
                .copied()
                .ok_or(FormError::HoleOutOfRange { hole: *hole, arity: residuals.len() as u8 }),
            Template::Application(function, argument) => {
                let function = function.instantiate(storage, residuals)?;
                let argument = argument.instantiate(storage, residuals)?;
                storage.apply(function, argument).map_err(FormError::Kind)
            }
        }
    }
}

/// What an argument position of a [`Spine`] becomes in a decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The argument is kept as is.
    Fixed,
    /// The argument is replaced by a hole and becomes its residual.
    Hole(Hole),
    /// The argument `F A` becomes `F hole`, and `A` becomes the residual.
    Partial(Hole),
}

impl Slot {
    pub fn hole(self) -> Option<Hole> {
        match self {
            Slot::Fixed => None,
            Slot::Hole(hole) | Slot::Partial(hole) => Some(hole),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    UnsupportedArity { arity: u8 },
    HoleOutOfRange { hole: Hole, arity: u8 },
    ResidualCount { expected: u8, actual: usize },
    Kind(KindError),
}

/// A type-level function with one or two holes, `\a -> Pair a String`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Form {
    arity: u8,
    body: Template,
}

impl Form {
    /// Creates a form, canonicalizing its body.
    pub fn new(storage: &mut TypeStorage, arity: u8, body: Template) -> Result<Form, FormError> {
        if !(1..=MAX_ARITY).contains(&arity) {
            return Err(FormError::UnsupportedArity { arity });
        }

        if let Some(hole) = body.max_hole()
            && hole.0 >= arity
        {
            return Err(FormError::HoleOutOfRange { hole, arity });
        }

        let body = body.canonicalize(storage).map_err(FormError::Kind)?;
        Ok(Form { arity, body })
    }

    /// The form `\a -> M a` for a constructor `M`.
    pub fn of_constructor(constructor: TypeId) -> Form {
        let body = Template::application(Template::Fixed(constructor), Template::Hole(Hole::FIRST));
        Form { arity: 1, body }
    }

    /// The form `\a -> X`, which ignores its argument.
    pub fn constant(applied: TypeId) -> Form {
        Form { arity: 1, body: Template::Fixed(applied) }
    }

    /// Matches a spine against one slot per argument.
    ///
    /// Leading fixed arguments are folded into the interned prefix of the
    /// spine, so the resulting form is canonical without touching storage.
    /// Returns [`None`] if the slot count differs from the spine arity, if a
    /// partial slot meets an argument that is not an application, if a hole
    /// used twice meets two different arguments, or if the holes used are
    /// not exactly `0..arity` for a supported arity.
    pub fn decompose(
        storage: &TypeStorage,
        spine: &Spine,
        slots: &[Slot],
    ) -> Option<(Form, Vec<TypeId>)> {
        if slots.len() != spine.arity() {
            return None;
        }

        let arity = slots.iter().filter_map(|slot| slot.hole()).map(|hole| hole.0 + 1).max()?;
        if arity > MAX_ARITY {
            return None;
        }

        let mut residuals: Vec<Option<TypeId>> = vec![None; arity as usize];

        let leading = slots.iter().take_while(|slot| matches!(slot, Slot::Fixed)).count();
        let mut body = Template::Fixed(spine.prefix(leading));

        for (&slot, &argument) in slots.iter().zip(&spine.arguments).skip(leading) {
            let (hole, residual, argument) = match slot {
                Slot::Fixed => {
                    body = Template::application(body, Template::Fixed(argument));
                    continue;
                }
                Slot::Hole(hole) => (hole, argument, Template::Hole(hole)),
                Slot::Partial(hole) => {
                    let (function, inner) = toolkit::split_application(storage, argument)?;
                    let partial =
                        Template::application(Template::Fixed(function), Template::Hole(hole));
                    (hole, inner, partial)
                }
            };

            let entry = &mut residuals[hole.index()];
            if entry.is_some_and(|existing| existing != residual) {
                return None;
            }
            *entry = Some(residual);

            body = Template::application(body, argument);
        }

        let residuals = residuals.into_iter().collect::<Option<Vec<_>>>()?;
        Some((Form { arity, body }, residuals))
    }

    pub fn arity(&self) -> u8 {
        self.arity
    }

    pub fn body(&self) -> &Template {
        &self.body
    }

    pub fn is_constant(&self) -> bool {
        self.body.is_closed()
    }

    /// Whether substituting `residuals` into this form yields `applied`.
    pub fn reconstructs(&self, storage: &TypeStorage, residuals: &[TypeId], applied: TypeId) -> bool {
        residuals.len() == self.arity as usize && self.body.reconstructs(storage, residuals, applied)
    }

    /// Interns the type obtained by substituting `residuals` into this form.
    pub fn instantiate(
        &self,
        storage: &mut TypeStorage,
        residuals: &[TypeId],
    ) -> Result<TypeId, FormError> {
        if residuals.len() != self.arity as usize {
            let expected = self.arity;
            let actual = residuals.len();
            return Err(FormError::ResidualCount { expected, actual });
        }
        self.body.instantiate(storage, residuals)
    }
}
