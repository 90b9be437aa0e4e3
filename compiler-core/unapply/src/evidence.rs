//! Implements equality evidence between an applied type and its decomposition.
//!
//! An [`Equality`] can only be obtained through [`Equality::certify`], which
//! checks that the form with its residuals substituted reproduces the applied
//! type. Conversions never touch the carried value; they only move it between
//! the two type views, [`Applied`] and [`Decomposed`].

use std::sync::Arc;

use shapes::{Form, TypeId, TypeStorage};

/// A value viewed at its applied type, `Pair Int String`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied<V> {
    pub ty: TypeId,
    pub value: V,
}

impl<V> Applied<V> {
    pub fn new(ty: TypeId, value: V) -> Applied<V> {
        Applied { ty, value }
    }
}

/// A value viewed at a form applied to residuals, `(\a -> Pair a String) Int`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposed<V> {
    pub form: Form,
    pub residuals: Arc<[TypeId]>,
    pub value: V,
}

impl<V> Decomposed<V> {
    pub fn map<W>(self, f: impl FnOnce(V) -> W) -> Decomposed<W> {
        let Decomposed { form, residuals, value } = self;
        Decomposed { form, residuals, value: f(value) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    /// The value is tagged with a different applied type.
    AppliedMismatch { expected: TypeId, actual: TypeId },
    /// The value is tagged with a different form or different residuals.
    DecomposedMismatch { expected: Form, actual: Form },
}

/// A checked proof that `applied` is `form` applied to `residuals`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Equality {
    applied: TypeId,
    form: Form,
    residuals: Arc<[TypeId]>,
}

impl Equality {
    /// Certifies the decomposition, or returns [`None`] if substituting
    /// `residuals` into `form` does not yield `applied`.
    pub fn certify(
        storage: &TypeStorage,
        applied: TypeId,
        form: Form,
        residuals: impl Into<Arc<[TypeId]>>,
    ) -> Option<Equality> {
        let residuals = residuals.into();
        if form.reconstructs(storage, &residuals, applied) {
            Some(Equality { applied, form, residuals })
        } else {
            None
        }
    }

    pub fn applied(&self) -> TypeId {
        self.applied
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn residuals(&self) -> &[TypeId] {
        &self.residuals
    }

    /// Views a value known to be of the applied type as the decomposition.
    pub fn decompose<V>(&self, value: V) -> Decomposed<V> {
        let form = Form::clone(&self.form);
        let residuals = Arc::clone(&self.residuals);
        Decomposed { form, residuals, value }
    }

    pub fn to_decomposed<V>(&self, value: Applied<V>) -> Result<Decomposed<V>, CoercionError> {
        if value.ty != self.applied {
            let expected = self.applied;
            return Err(CoercionError::AppliedMismatch { expected, actual: value.ty });
        }
        Ok(self.decompose(value.value))
    }

    pub fn to_applied<V>(&self, value: Decomposed<V>) -> Result<Applied<V>, CoercionError> {
        if value.form != self.form || value.residuals != self.residuals {
            let expected = Form::clone(&self.form);
            return Err(CoercionError::DecomposedMismatch { expected, actual: value.form });
        }
        Ok(Applied { ty: self.applied, value: value.value })
    }
}
