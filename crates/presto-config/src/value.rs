//! Conversions from raw property strings into typed values.

use presto_core::{PrestoError, Result};

mod sealed {
    pub trait Sealed {}
}

/// A type a property value can be read as.
///
/// The set is closed: `bool`, `String` and the integer types the catalogs use.
/// Booleans accept `true` or `false` in any ASCII case. Integers are decimal and
/// reject anything that does not fit the target type.
pub trait PropertyValue: sealed::Sealed + Sized {
    /// Name reported in conversion errors.
    const TYPE_NAME: &'static str;

    /// Convert `raw`, returning `None` if it is not a valid `Self`.
    fn from_property(raw: &str) -> Option<Self>;
}

impl sealed::Sealed for String {}

impl PropertyValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_property(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl sealed::Sealed for bool {}

impl PropertyValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_property(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

macro_rules! integer_property {
    ($($ty:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl PropertyValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_property(raw: &str) -> Option<Self> {
                    raw.trim().parse::<$ty>().ok()
                }
            }
        )*
    };
}

integer_property!(i32, i64, u16, u32, u64, usize);

/// Convert the raw value of property `name`, failing with a
/// [`PrestoError::TypeConversion`] that names the key, value and target type.
pub(crate) fn convert<T: PropertyValue>(name: &str, raw: &str) -> Result<T> {
    T::from_property(raw).ok_or_else(|| PrestoError::TypeConversion {
        name: name.to_string(),
        value: raw.to_string(),
        target: T::TYPE_NAME,
    })
}
