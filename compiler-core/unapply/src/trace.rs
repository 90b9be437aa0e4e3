//! Tracing infrastructure for resolution debugging.
//!
//! This module provides macros and helpers for emitting structured trace events
//! with pretty-printed type information. All tracing is compiled out when the
//! `no-tracing` feature is enabled.

#[cfg(not(feature = "no-tracing"))]
mod enabled {
    use std::fmt;

    use itertools::Itertools;
    use shapes::pretty::{print_form, print_type};
    use shapes::{Form, TypeId, TypeStorage};

    use crate::capability::Capability;
    use crate::pattern::Pattern;
    use crate::search::Catalog;

    /// A rendered type for tracing output.
    ///
    /// Implements both [`fmt::Display`] and [`fmt::Debug`], so it can be
    /// recorded with either the `%` or the `?` sigil.
    #[derive(Clone)]
    pub struct TypeTrace(String);

    impl fmt::Display for TypeTrace {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl fmt::Debug for TypeTrace {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }

    /// A trace value that can be either pretty-printed or debug-formatted.
    pub enum TraceValue {
        Pretty(TypeTrace),
        Debug(String),
    }

    impl fmt::Display for TraceValue {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                TraceValue::Pretty(trace) => fmt::Display::fmt(trace, f),
                TraceValue::Debug(s) => f.write_str(s),
            }
        }
    }

    impl fmt::Debug for TraceValue {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                TraceValue::Pretty(trace) => fmt::Debug::fmt(trace, f),
                TraceValue::Debug(s) => write!(f, "{:?}", s),
            }
        }
    }

    /// Trait for values that can be traced with access to type storage.
    pub trait Traceable {
        fn trace(self, storage: &TypeStorage) -> TraceValue;
    }

    impl Traceable for TypeId {
        fn trace(self, storage: &TypeStorage) -> TraceValue {
            TraceValue::Pretty(TypeTrace(print_type(storage, self).into()))
        }
    }

    impl Traceable for &[TypeId] {
        fn trace(self, storage: &TypeStorage) -> TraceValue {
            let types = self.iter().map(|&id| print_type(storage, id)).join(", ");
            TraceValue::Pretty(TypeTrace(format!("[{types}]")))
        }
    }

    impl Traceable for &Form {
        fn trace(self, storage: &TypeStorage) -> TraceValue {
            TraceValue::Pretty(TypeTrace(print_form(storage, self).into()))
        }
    }

    impl Traceable for Pattern {
        fn trace(self, _storage: &TypeStorage) -> TraceValue {
            TraceValue::Debug(self.describe().to_string())
        }
    }

    impl Traceable for &[Pattern] {
        fn trace(self, _storage: &TypeStorage) -> TraceValue {
            TraceValue::Debug(format!("[{}]", self.iter().join(", ")))
        }
    }

    impl Traceable for &Capability {
        fn trace(self, _storage: &TypeStorage) -> TraceValue {
            TraceValue::Debug(self.name().to_string())
        }
    }

    /// Wrapper for tracing arbitrary `Debug` types.
    pub struct TraceDebug<T>(pub T);

    impl<T> Traceable for TraceDebug<T>
    where
        T: fmt::Debug,
    {
        fn trace(self, _storage: &TypeStorage) -> TraceValue {
            TraceValue::Debug(format!("{:?}", self.0))
        }
    }

    /// Creates a debug-level span for a single resolution request.
    #[inline]
    pub fn resolve_span(
        catalog: Catalog,
        storage: &TypeStorage,
        capability: &Capability,
        applied: TypeId,
    ) -> tracing::span::EnteredSpan {
        let span = match catalog {
            Catalog::Single => {
                tracing::debug_span!("resolve_single", %capability, applied = %applied.trace(storage))
            }
            Catalog::Dual => {
                tracing::debug_span!("resolve_dual", %capability, applied = %applied.trace(storage))
            }
            Catalog::Nested => {
                tracing::debug_span!("resolve_nested", %capability, applied = %applied.trace(storage))
            }
        };
        span.entered()
    }
}

#[cfg(not(feature = "no-tracing"))]
pub use enabled::*;

/// Core macro for emitting type fields at a configurable tracing level.
///
/// Supports both pretty-printed types and debug-formatted values:
/// - `name = expr` - pretty-prints values via Traceable
/// - `?name = expr` - debug-formats arbitrary values via TraceDebug
///
/// # Examples
///
/// ```ignore
/// // Pretty-print a TypeId and a Form
/// trace_fields!(storage, { applied = applied, form = &form });
///
/// // Debug-format primitives with ? prefix
/// trace_fields!(storage, { ?found = found });
///
/// // Mix both with a message
/// debug_fields!(storage, { pattern = pattern, ?found = found }, "attempt");
/// ```
#[cfg(not(feature = "no-tracing"))]
#[macro_export]
macro_rules! type_fields {
    // Entry point: fields only
    ($level:expr, $storage:expr, { $($fields:tt)* }) => {
        $crate::type_fields!(@impl $level, $storage, [] { $($fields)* })
    };
    // Entry point: fields + message
    ($level:expr, $storage:expr, { $($fields:tt)* }, $($msg:tt)+) => {
        $crate::type_fields!(@impl_msg $level, $storage, [] { $($fields)* }, $($msg)+)
    };

    // === No-message variant ===

    // Done processing fields
    (@impl $level:expr, $storage:expr, [$(($name:ident, $bind:expr))*] { $(,)? }) => {
        if ::tracing::enabled!($level) {
            $(let $name = $bind;)*
            ::tracing::event!($level, $($name = %$name),*);
        }
    };

    // Match ?name = expr,
    (@impl $level:expr, $storage:expr, [$($acc:tt)*] { ? $name:ident = $value:expr, $($rest:tt)* }) => {
        $crate::type_fields!(@impl $level, $storage, [$($acc)* ($name, $crate::trace::Traceable::trace($crate::trace::TraceDebug($value), $storage))] { $($rest)* })
    };

    // Match ?name = expr (last, no comma)
    (@impl $level:expr, $storage:expr, [$($acc:tt)*] { ? $name:ident = $value:expr }) => {
        $crate::type_fields!(@impl $level, $storage, [$($acc)* ($name, $crate::trace::Traceable::trace($crate::trace::TraceDebug($value), $storage))] { })
    };

    // Match name = expr,
    (@impl $level:expr, $storage:expr, [$($acc:tt)*] { $name:ident = $value:expr, $($rest:tt)* }) => {
        $crate::type_fields!(@impl $level, $storage, [$($acc)* ($name, $crate::trace::Traceable::trace($value, $storage))] { $($rest)* })
    };

    // Match name = expr (last, no comma)
    (@impl $level:expr, $storage:expr, [$($acc:tt)*] { $name:ident = $value:expr }) => {
        $crate::type_fields!(@impl $level, $storage, [$($acc)* ($name, $crate::trace::Traceable::trace($value, $storage))] { })
    };

    // === Message variant ===

    // Done processing fields
    (@impl_msg $level:expr, $storage:expr, [$(($name:ident, $bind:expr))*] { $(,)? }, $($msg:tt)+) => {
        if ::tracing::enabled!($level) {
            $(let $name = $bind;)*
            ::tracing::event!($level, $($name = %$name,)* $($msg)+);
        }
    };

    // Match ?name = expr,
    (@impl_msg $level:expr, $storage:expr, [$($acc:tt)*] { ? $name:ident = $value:expr, $($rest:tt)* }, $($msg:tt)+) => {
        $crate::type_fields!(@impl_msg $level, $storage, [$($acc)* ($name, $crate::trace::Traceable::trace($crate::trace::TraceDebug($value), $storage))] { $($rest)* }, $($msg)+)
    };

    // Match ?name = expr (last, no comma)
    (@impl_msg $level:expr, $storage:expr, [$($acc:tt)*] { ? $name:ident = $value:expr }, $($msg:tt)+) => {
        $crate::type_fields!(@impl_msg $level, $storage, [$($acc)* ($name, $crate::trace::Traceable::trace($crate::trace::TraceDebug($value), $storage))] { }, $($msg)+)
    };

    // Match name = expr,
    (@impl_msg $level:expr, $storage:expr, [$($acc:tt)*] { $name:ident = $value:expr, $($rest:tt)* }, $($msg:tt)+) => {
        $crate::type_fields!(@impl_msg $level, $storage, [$($acc)* ($name, $crate::trace::Traceable::trace($value, $storage))] { $($rest)* }, $($msg)+)
    };

    // Match name = expr (last, no comma)
    (@impl_msg $level:expr, $storage:expr, [$($acc:tt)*] { $name:ident = $value:expr }, $($msg:tt)+) => {
        $crate::type_fields!(@impl_msg $level, $storage, [$($acc)* ($name, $crate::trace::Traceable::trace($value, $storage))] { }, $($msg)+)
    };
}

#[cfg(feature = "no-tracing")]
#[macro_export]
macro_rules! type_fields {
    ($($tt:tt)*) => {};
}

/// Emits a DEBUG-level event with type fields.
#[macro_export]
macro_rules! debug_fields {
    ($($args:tt)*) => {
        $crate::type_fields!(::tracing::Level::DEBUG, $($args)*)
    };
}

/// Emits a TRACE-level event with type fields.
#[macro_export]
macro_rules! trace_fields {
    ($($args:tt)*) => {
        $crate::type_fields!(::tracing::Level::TRACE, $($args)*)
    };
}

#[cfg(feature = "no-tracing")]
#[inline]
pub fn resolve_span(
    _catalog: crate::search::Catalog,
    _storage: &shapes::TypeStorage,
    _capability: &crate::capability::Capability,
    _applied: shapes::TypeId,
) {
}
