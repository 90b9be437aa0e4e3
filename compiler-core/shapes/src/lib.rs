//! Kinded type shapes: interned types, spines, and forms with holes.

pub mod core;
pub mod form;
pub mod pretty;
pub mod storage;
pub mod toolkit;

pub use crate::core::{Kind, Type, TypeId};
pub use crate::form::{Form, FormError, Hole, Slot, Template};
pub use crate::storage::{KindError, TypeStorage};
pub use crate::toolkit::Spine;
