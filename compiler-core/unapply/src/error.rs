//! Implements the errors emitted by resolution.

use std::fmt::Write;
use std::sync::Arc;

use itertools::Itertools;
use shapes::pretty::{print_form, print_type};
use shapes::{Form, TypeId, TypeStorage};

use crate::capability::Capability;
use crate::pattern::Pattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCrumb {
    Single,
    Dual,
    Nested,

    ProductFirst,
    ProductSecond,
}

impl ErrorCrumb {
    fn describe(self) -> &'static str {
        match self {
            ErrorCrumb::Single => "resolving a single-hole form",
            ErrorCrumb::Dual => "resolving a two-hole form",
            ErrorCrumb::Nested => "resolving a nested form",
            ErrorCrumb::ProductFirst => "resolving the first component of a product",
            ErrorCrumb::ProductSecond => "resolving the second component of a product",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No pattern in the catalog produced an instance.
    NoViableDecomposition {
        capability: Capability,
        applied: TypeId,
        attempted: Arc<[Pattern]>,
    },
    /// The components of a product were resolved for different capabilities.
    CapabilityMismatch {
        first: Capability,
        second: Capability,
    },
    /// The isomorphism of a product relates forms other than the resolved ones.
    IsomorphismMismatch {
        first: Form,
        second: Form,
        left: Form,
        right: Form,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveError {
    pub kind: ErrorKind,
    pub crumbs: Arc<[ErrorCrumb]>,
}

impl ResolveError {
    pub fn new(kind: ErrorKind) -> ResolveError {
        ResolveError { kind, crumbs: Arc::from([]) }
    }

    /// Records an enclosing step, outermost first.
    pub fn with_crumb(self, crumb: ErrorCrumb) -> ResolveError {
        let crumbs = std::iter::once(crumb).chain(self.crumbs.iter().copied()).collect();
        ResolveError { kind: self.kind, crumbs }
    }
}

/// Renders a human-readable message for an error.
pub fn render(storage: &TypeStorage, error: &ResolveError) -> String {
    let mut message = match &error.kind {
        ErrorKind::NoViableDecomposition { capability, applied, attempted } => {
            let applied = print_type(storage, *applied);
            let attempted = attempted.iter().join(", ");
            format!(
                "No instance of {capability} for any decomposition of '{applied}'\n\
                 attempted: {attempted}"
            )
        }
        ErrorKind::CapabilityMismatch { first, second } => {
            format!("Cannot combine resolutions for different capabilities {first} and {second}")
        }
        ErrorKind::IsomorphismMismatch { first, second, left, right } => {
            let [first, second, left, right] =
                [first, second, left, right].map(|form| print_form(storage, form));
            format!(
                "Isomorphism between '{left}' and '{right}' cannot relate '{first}' and '{second}'"
            )
        }
    };

    for crumb in error.crumbs.iter().rev() {
        let _ = write!(message, "\nwhile {}", crumb.describe());
    }

    message
}
