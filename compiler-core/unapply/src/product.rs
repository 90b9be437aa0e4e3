//! Implements the product combinator.
//!
//! Two single-hole resolutions `X1 = F1[A]` and `X2 = F2[B]` are combined
//! through an isomorphism between `F1` and `F2`, so that both values can be
//! handled as `F1`-shaped. The isomorphism is trusted: nothing checks that
//! its conversions are inverse to each other.

use std::fmt;
use std::sync::Arc;

use shapes::{Form, TypeId, TypeStorage};

use crate::capability::{Capability, InstanceLookup};
use crate::error::{ErrorCrumb, ErrorKind, ResolveError};
use crate::evidence::{Applied, CoercionError, Decomposed};
use crate::single::{self, Unapply};

type Conversion<V> = Arc<dyn Fn(V) -> V + Send + Sync>;

/// Conversions between values shaped by `left` and by `right`.
pub struct Isomorphism<V> {
    left: Form,
    right: Form,
    to: Conversion<V>,
    from: Conversion<V>,
}

impl<V> Isomorphism<V> {
    pub fn new(
        left: Form,
        right: Form,
        to: impl Fn(V) -> V + Send + Sync + 'static,
        from: impl Fn(V) -> V + Send + Sync + 'static,
    ) -> Isomorphism<V> {
        Isomorphism { left, right, to: Arc::new(to), from: Arc::new(from) }
    }

    pub fn left(&self) -> &Form {
        &self.left
    }

    pub fn right(&self) -> &Form {
        &self.right
    }

    /// `left ~> right`
    pub fn to(&self, value: V) -> V {
        (self.to)(value)
    }

    /// `right ~> left`
    pub fn from(&self, value: V) -> V {
        (self.from)(value)
    }
}

impl<V> Clone for Isomorphism<V> {
    fn clone(&self) -> Isomorphism<V> {
        Isomorphism {
            left: Form::clone(&self.left),
            right: Form::clone(&self.right),
            to: Arc::clone(&self.to),
            from: Arc::clone(&self.from),
        }
    }
}

impl<V> fmt::Debug for Isomorphism<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Isomorphism")
            .field("left", &self.left)
            .field("right", &self.right)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct UnapplyProduct<I, V> {
    first: Unapply<I>,
    second: Unapply<I>,
    isomorphism: Isomorphism<V>,
}

impl<I, V> UnapplyProduct<I, V> {
    /// Combines two resolutions of the same capability.
    ///
    /// The isomorphism must relate the first form to the second form.
    pub fn new(
        first: Unapply<I>,
        second: Unapply<I>,
        isomorphism: Isomorphism<V>,
    ) -> Result<UnapplyProduct<I, V>, ResolveError> {
        if first.capability() != second.capability() {
            let first = Capability::clone(first.capability());
            let second = Capability::clone(second.capability());
            return Err(ResolveError::new(ErrorKind::CapabilityMismatch { first, second }));
        }

        if isomorphism.left() != first.form() || isomorphism.right() != second.form() {
            let kind = ErrorKind::IsomorphismMismatch {
                first: Form::clone(first.form()),
                second: Form::clone(second.form()),
                left: Form::clone(isomorphism.left()),
                right: Form::clone(isomorphism.right()),
            };
            return Err(ResolveError::new(kind));
        }

        Ok(UnapplyProduct { first, second, isomorphism })
    }

    /// The shared form, `F1`.
    pub fn form(&self) -> &Form {
        self.first.form()
    }

    pub fn first_residual(&self) -> TypeId {
        self.first.residual()
    }

    pub fn second_residual(&self) -> TypeId {
        self.second.residual()
    }

    /// The instance for `F1`.
    pub fn instance(&self) -> &I {
        self.first.instance()
    }

    /// Converts a value of `X1` to `F1[A]`.
    pub fn first(&self, value: Applied<V>) -> Result<Decomposed<V>, CoercionError> {
        self.first.to_decomposed(value)
    }

    /// Converts a value of `X2` to `F2[B]`, then through the isomorphism to `F1[B]`.
    pub fn second(&self, value: Applied<V>) -> Result<Decomposed<V>, CoercionError> {
        let Decomposed { residuals, value, .. } = self.second.to_decomposed(value)?;
        let form = Form::clone(self.first.form());
        let value = self.isomorphism.from(value);
        Ok(Decomposed { form, residuals, value })
    }

    /// Converts `F1[A]` back to a value of `X1`.
    pub fn restore_first(&self, value: Decomposed<V>) -> Result<Applied<V>, CoercionError> {
        self.first.to_applied(value)
    }

    /// Converts `F1[B]` back through the isomorphism to a value of `X2`.
    pub fn restore_second(&self, value: Decomposed<V>) -> Result<Applied<V>, CoercionError> {
        let expected = self.first.form();
        if value.form != *expected {
            let expected = Form::clone(expected);
            return Err(CoercionError::DecomposedMismatch { expected, actual: value.form });
        }
        let Decomposed { residuals, value, .. } = value;
        let form = Form::clone(self.second.form());
        let value = self.isomorphism.to(value);
        self.second.to_applied(Decomposed { form, residuals, value })
    }

    /// Resolves `first` and `second` independently, then combines them.
    pub fn resolve<L>(
        storage: &TypeStorage,
        lookup: &L,
        capability: &Capability,
        first: TypeId,
        second: TypeId,
        isomorphism: Isomorphism<V>,
    ) -> Result<UnapplyProduct<I, V>, ResolveError>
    where
        L: InstanceLookup<Instance = I> + ?Sized,
    {
        let first = single::resolve(storage, lookup, capability, first)
            .map_err(|error| error.with_crumb(ErrorCrumb::ProductFirst))?;
        let second = single::resolve(storage, lookup, capability, second)
            .map_err(|error| error.with_crumb(ErrorCrumb::ProductSecond))?;
        UnapplyProduct::new(first, second, isomorphism)
    }
}

#[cfg(test)]
mod tests {
    use shapes::{Form, Kind, TypeStorage};

    use super::{Isomorphism, UnapplyProduct};
    use crate::capability::{Capability, InstanceEnvironment, InstanceHead};
    use crate::error::{ErrorCrumb, ErrorKind};
    use crate::evidence::Applied;

    #[test]
    fn test_isomorphism_mismatch() {
        let mut storage = TypeStorage::default();
        let int = storage.declare("Int", Kind::Type).unwrap();
        let option = storage.declare("Option", Kind::constructor(1)).unwrap();
        let list = storage.declare("List", Kind::constructor(1)).unwrap();
        let option_int = storage.apply(option, int).unwrap();
        let list_int = storage.apply(list, int).unwrap();

        let functor = Capability::new("Functor");
        let mut environment = InstanceEnvironment::default();
        for constructor in [option, list] {
            let form = Form::of_constructor(constructor);
            let head = InstanceHead::new(Capability::clone(&functor), form);
            environment.register(head, constructor);
        }

        let backwards = Isomorphism::new(
            Form::of_constructor(list),
            Form::of_constructor(option),
            |value: i32| value,
            |value: i32| value,
        );

        let error = UnapplyProduct::resolve(
            &storage,
            &environment,
            &functor,
            option_int,
            list_int,
            backwards,
        )
        .unwrap_err();

        assert!(matches!(error.kind, ErrorKind::IsomorphismMismatch { .. }));
    }

    #[test]
    fn test_second_failure_crumb() {
        let mut storage = TypeStorage::default();
        let int = storage.declare("Int", Kind::Type).unwrap();
        let option = storage.declare("Option", Kind::constructor(1)).unwrap();
        let option_int = storage.apply(option, int).unwrap();

        let functor = Capability::new("Functor");
        let mut environment = InstanceEnvironment::default();
        let head = InstanceHead::new(Capability::clone(&functor), Form::of_constructor(option));
        environment.register(head, ());

        let isomorphism = Isomorphism::new(
            Form::of_constructor(option),
            Form::constant(int),
            |value: i32| value,
            |value: i32| value,
        );

        let error =
            UnapplyProduct::resolve(&storage, &environment, &functor, option_int, int, isomorphism)
                .unwrap_err();
        assert_eq!(&*error.crumbs, [ErrorCrumb::ProductSecond, ErrorCrumb::Single]);
    }

    #[test]
    fn test_restore_second() {
        let mut storage = TypeStorage::default();
        let int = storage.declare("Int", Kind::Type).unwrap();
        let option = storage.declare("Option", Kind::constructor(1)).unwrap();
        let list = storage.declare("List", Kind::constructor(1)).unwrap();
        let option_int = storage.apply(option, int).unwrap();
        let list_int = storage.apply(list, int).unwrap();

        let functor = Capability::new("Functor");
        let mut environment = InstanceEnvironment::default();
        for constructor in [option, list] {
            let form = Form::of_constructor(constructor);
            let head = InstanceHead::new(Capability::clone(&functor), form);
            environment.register(head, ());
        }

        let isomorphism = Isomorphism::new(
            Form::of_constructor(option),
            Form::of_constructor(list),
            |value: i32| value * 10,
            |value: i32| value / 10,
        );

        let product = UnapplyProduct::resolve(
            &storage,
            &environment,
            &functor,
            option_int,
            list_int,
            isomorphism,
        )
        .unwrap();

        let second = product.second(Applied::new(list_int, 50)).unwrap();
        assert_eq!(second.form, Form::of_constructor(option));
        assert_eq!(second.value, 5);

        let restored = product.restore_second(second).unwrap();
        assert_eq!(restored, Applied::new(list_int, 50));
    }
}
