//! Coercion of loosely-typed targets.
//!
//! Comparison targets arrive as [`Dynamic`], an open set of Rust scalar and
//! list types plus caller-defined [`CustomValue`]s. The `try_coerce_to_*`
//! functions narrow a `Dynamic` to one concrete family.
//!
//! Narrowing rules:
//!
//! - Integer to integer conversions are checked; out-of-range values fail.
//! - Float to integer conversions truncate toward zero; non-finite or
//!   out-of-range values fail.
//! - Strings are parsed in base 10.

use std::any::{Any, TypeId};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::ConversionError;

// ============================================================================
// TYPE KEY
// ============================================================================

/// Identity of a Rust type, used to key the comparison registry.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    #[must_use]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl std::hash::Hash for TypeKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// ============================================================================
// CUSTOM VALUE
// ============================================================================

/// Caller-defined comparison target.
///
/// Keyed in the registry by the wrapped type, so a strategy registered for
/// `CustomValue::new(MyType { .. })` handles every `MyType` target.
#[derive(Clone)]
pub struct CustomValue {
    inner: Arc<dyn Any + Send + Sync>,
    key: TypeKey,
    rendered: String,
}

impl CustomValue {
    pub fn new<T: Any + Send + Sync + fmt::Debug>(value: T) -> Self {
        Self {
            rendered: format!("{value:?}"),
            key: TypeKey::of::<T>(),
            inner: Arc::new(value),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    pub fn type_key(&self) -> TypeKey {
        self.key
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.rendered == other.rendered
    }
}

// ============================================================================
// DYNAMIC
// ============================================================================

/// Loosely-typed comparison target or metadata value.
///
/// `Int` is the platform "int" family. Rust's default integer literal type
/// `i32` is kept as its own variant; the default registry treats it as part
/// of the int family.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Dynamic {
    Bool(bool),
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(usize),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    String(String),
    Strings(Vec<String>),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
    Custom(CustomValue),
}

impl Dynamic {
    /// Registry key of this value's family.
    pub fn type_key(&self) -> TypeKey {
        match self {
            Self::Bool(_) => TypeKey::of::<bool>(),
            Self::Int(_) => TypeKey::of::<isize>(),
            Self::Int8(_) => TypeKey::of::<i8>(),
            Self::Int16(_) => TypeKey::of::<i16>(),
            Self::Int32(_) => TypeKey::of::<i32>(),
            Self::Int64(_) => TypeKey::of::<i64>(),
            Self::Uint(_) => TypeKey::of::<usize>(),
            Self::Uint8(_) => TypeKey::of::<u8>(),
            Self::Uint16(_) => TypeKey::of::<u16>(),
            Self::Uint32(_) => TypeKey::of::<u32>(),
            Self::Uint64(_) => TypeKey::of::<u64>(),
            Self::Float32(_) => TypeKey::of::<f32>(),
            Self::Float64(_) => TypeKey::of::<f64>(),
            Self::Decimal(_) => TypeKey::of::<Decimal>(),
            Self::String(_) => TypeKey::of::<String>(),
            Self::Strings(_) => TypeKey::of::<Vec<String>>(),
            Self::Ints(_) => TypeKey::of::<Vec<i64>>(),
            Self::Floats(_) => TypeKey::of::<Vec<f64>>(),
            Self::Custom(custom) => custom.type_key(),
        }
    }

    /// Short type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Int8(_) => "int8",
            Self::Int16(_) => "int16",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Uint(_) => "uint",
            Self::Uint8(_) => "uint8",
            Self::Uint16(_) => "uint16",
            Self::Uint32(_) => "uint32",
            Self::Uint64(_) => "uint64",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::Decimal(_) => "decimal",
            Self::String(_) => "string",
            Self::Strings(_) => "[]string",
            Self::Ints(_) => "[]int64",
            Self::Floats(_) => "[]float64",
            Self::Custom(custom) => custom.type_key().name(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{item}")?;
            }
            f.write_str("]")
        }

        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Int8(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Uint8(v) => write!(f, "{v}"),
            Self::Uint16(v) => write!(f, "{v}"),
            Self::Uint32(v) => write!(f, "{v}"),
            Self::Uint64(v) => write!(f, "{v}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Strings(v) => list(f, v),
            Self::Ints(v) => list(f, v),
            Self::Floats(v) => list(f, v),
            Self::Custom(v) => write!(f, "{v:?}"),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Dynamic {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    isize => Int,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    usize => Uint,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    Decimal => Decimal,
    String => String,
    Vec<String> => Strings,
    Vec<i64> => Ints,
    Vec<f64> => Floats,
    CustomValue => Custom,
}

impl From<&str> for Dynamic {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<Vec<&str>> for Dynamic {
    fn from(value: Vec<&str>) -> Self {
        Self::Strings(value.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for Dynamic {
    fn from(value: &[&str]) -> Self {
        Self::Strings(value.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl From<Vec<i32>> for Dynamic {
    fn from(value: Vec<i32>) -> Self {
        Self::Ints(value.into_iter().map(i64::from).collect())
    }
}

impl From<Vec<isize>> for Dynamic {
    fn from(value: Vec<isize>) -> Self {
        Self::Ints(value.into_iter().map(|v| v as i64).collect())
    }
}

// ============================================================================
// COERCION
// ============================================================================

/// Narrow `value` to `bool`. Strings accept `"true"` and `"false"`.
pub fn try_coerce_to_bool(value: &Dynamic) -> Result<bool, ConversionError> {
    match value {
        Dynamic::Bool(b) => Ok(*b),
        Dynamic::String(s) => s
            .parse::<bool>()
            .map_err(|e| ConversionError::parse("bool", s.as_str(), e)),
        other => Err(ConversionError::unhandled("bool", other.type_name())),
    }
}

/// Narrow `value` to the 64-bit integer family.
pub fn try_coerce_to_int64(value: &Dynamic) -> Result<i64, ConversionError> {
    const TARGET: &str = "int64";
    fn out_of_range(literal: impl fmt::Display) -> ConversionError {
        ConversionError::out_of_range(TARGET, literal)
    }

    match value {
        Dynamic::Int(v) => i64::try_from(*v).map_err(|_| out_of_range(v)),
        Dynamic::Int8(v) => Ok(i64::from(*v)),
        Dynamic::Int16(v) => Ok(i64::from(*v)),
        Dynamic::Int32(v) => Ok(i64::from(*v)),
        Dynamic::Int64(v) => Ok(*v),
        Dynamic::Uint(v) => i64::try_from(*v).map_err(|_| out_of_range(v)),
        Dynamic::Uint8(v) => Ok(i64::from(*v)),
        Dynamic::Uint16(v) => Ok(i64::from(*v)),
        Dynamic::Uint32(v) => Ok(i64::from(*v)),
        Dynamic::Uint64(v) => i64::try_from(*v).map_err(|_| out_of_range(v)),
        Dynamic::Float32(v) => f64_to_i64(f64::from(*v)).ok_or_else(|| out_of_range(v)),
        Dynamic::Float64(v) => f64_to_i64(*v).ok_or_else(|| out_of_range(v)),
        Dynamic::Decimal(v) => v.trunc().to_i64().ok_or_else(|| out_of_range(v)),
        Dynamic::String(s) => s
            .parse::<i64>()
            .map_err(|e| ConversionError::parse(TARGET, s.as_str(), e)),
        other => Err(ConversionError::unhandled(TARGET, other.type_name())),
    }
}

/// Narrow `value` to the platform "int" family.
pub fn try_coerce_to_int(value: &Dynamic) -> Result<isize, ConversionError> {
    if let Dynamic::Int(v) = value {
        return Ok(*v);
    }
    let wide = try_coerce_to_int64(value).map_err(|err| match err {
        ConversionError::UnhandledType { found, .. } => ConversionError::unhandled("int", found),
        other => other,
    })?;
    isize::try_from(wide).map_err(|_| ConversionError::out_of_range("int", wide))
}

/// Narrow `value` to `f64`.
pub fn try_coerce_to_float64(value: &Dynamic) -> Result<f64, ConversionError> {
    const TARGET: &str = "float64";
    match value {
        Dynamic::Int(v) => Ok(*v as f64),
        Dynamic::Int8(v) => Ok(f64::from(*v)),
        Dynamic::Int16(v) => Ok(f64::from(*v)),
        Dynamic::Int32(v) => Ok(f64::from(*v)),
        Dynamic::Int64(v) => Ok(*v as f64),
        Dynamic::Uint(v) => Ok(*v as f64),
        Dynamic::Uint8(v) => Ok(f64::from(*v)),
        Dynamic::Uint16(v) => Ok(f64::from(*v)),
        Dynamic::Uint32(v) => Ok(f64::from(*v)),
        Dynamic::Uint64(v) => Ok(*v as f64),
        Dynamic::Float32(v) => Ok(f64::from(*v)),
        Dynamic::Float64(v) => Ok(*v),
        Dynamic::Decimal(v) => v
            .to_f64()
            .ok_or_else(|| ConversionError::out_of_range(TARGET, v)),
        Dynamic::String(s) => s
            .parse::<f64>()
            .map_err(|e| ConversionError::parse(TARGET, s.as_str(), e)),
        other => Err(ConversionError::unhandled(TARGET, other.type_name())),
    }
}

/// Narrow `value` to an arbitrary-precision decimal.
pub fn try_coerce_to_decimal(value: &Dynamic) -> Result<Decimal, ConversionError> {
    const TARGET: &str = "decimal";
    match value {
        Dynamic::Decimal(v) => Ok(*v),
        Dynamic::Float32(v) => {
            Decimal::try_from(*v).map_err(|_| ConversionError::out_of_range(TARGET, v))
        }
        Dynamic::Float64(v) => {
            Decimal::try_from(*v).map_err(|_| ConversionError::out_of_range(TARGET, v))
        }
        Dynamic::Uint64(v) => Ok(Decimal::from(*v)),
        Dynamic::Uint(v) => Ok(Decimal::from(*v)),
        Dynamic::String(s) => parse_decimal(s),
        other => try_coerce_to_int64(other)
            .map(Decimal::from)
            .map_err(|err| match err {
                ConversionError::UnhandledType { found, .. } => {
                    ConversionError::unhandled(TARGET, found)
                }
                other => other,
            }),
    }
}

/// Narrow a list-shaped `value` to 64-bit integers, element by element.
pub fn try_coerce_to_ints(value: &Dynamic) -> Result<Vec<i64>, ConversionError> {
    match value {
        Dynamic::Ints(v) => Ok(v.clone()),
        Dynamic::Strings(items) => coerce_elements(items, |s| {
            try_coerce_to_int64(&Dynamic::String(s.clone())).map_err(|e| (format!("{s:?}"), e))
        }),
        Dynamic::Floats(items) => coerce_elements(items, |f| {
            try_coerce_to_int64(&Dynamic::Float64(*f)).map_err(|e| (f.to_string(), e))
        }),
        other => Err(ConversionError::unhandled("[]int64", other.type_name())),
    }
}

/// Narrow a list-shaped `value` to floats, element by element.
pub fn try_coerce_to_floats(value: &Dynamic) -> Result<Vec<f64>, ConversionError> {
    match value {
        Dynamic::Floats(v) => Ok(v.clone()),
        Dynamic::Ints(v) => Ok(v.iter().map(|i| *i as f64).collect()),
        Dynamic::Strings(items) => coerce_elements(items, |s| {
            try_coerce_to_float64(&Dynamic::String(s.clone())).map_err(|e| (format!("{s:?}"), e))
        }),
        other => Err(ConversionError::unhandled("[]float64", other.type_name())),
    }
}

fn coerce_elements<T, U>(
    items: &[T],
    mut convert: impl FnMut(&T) -> Result<U, (String, ConversionError)>,
) -> Result<Vec<U>, ConversionError> {
    items
        .iter()
        .enumerate()
        .map(|(offset, item)| {
            convert(item).map_err(|(literal, err)| ConversionError::element(offset, literal, err))
        })
        .collect()
}

/// Truncate toward zero. `None` for non-finite or out-of-range input.
pub(crate) fn f64_to_i64(value: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; 2^63 is the first value past it.
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    if !value.is_finite() || value < -UPPER || value >= UPPER {
        return None;
    }
    Some(value.trunc() as i64)
}

pub(crate) fn parse_decimal(s: &str) -> Result<Decimal, ConversionError> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|e| ConversionError::parse("decimal", s, e))
}
