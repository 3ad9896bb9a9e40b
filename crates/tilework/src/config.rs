//! Helpers for applying loosely-typed parameter edits.
//!
//! Parameter layers hand us selector names as strings. A bad name must never
//! disturb the current state: it is logged and the previous value is kept.

use std::str::FromStr;

use crate::error::Error;

/// Parse `name` into `target`, keeping the old value when parsing fails.
///
/// Returns `true` when `target` was updated.
pub fn assign_by_name<T>(target: &mut T, name: &str) -> bool
where
    T: FromStr<Err = Error>,
{
    match name.parse::<T>() {
        Ok(value) => {
            *target = value;
            true
        }
        Err(err) => {
            tracing::warn!("{}; keeping previous value", err);
            false
        }
    }
}

/// Implements `FromStr`, `name()` and `all()` for a selector enum.
///
/// Names are the camelCase spellings used by parameter documents.
macro_rules! selector_names {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order.
            pub const fn all() -> &'static [$ty] {
                &[$($ty::$variant),+]
            }

            /// Name as written in parameter documents.
            pub const fn name(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                $ty::all()
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(s))
                    .ok_or_else(|| $crate::error::Error::UnknownVariant {
                        kind: $kind,
                        name: s.to_string(),
                    })
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

pub(crate) use selector_names;
