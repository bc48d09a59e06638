//! Tri-state attribute values.
//!
//! Every [`AttrValue`] is either *unknown* (not yet computed), *null*
//! (explicitly absent) or *known*. Collections and objects carry their static
//! element/attribute types even when unvalued, so an unvalued value still
//! reports its [`AttrType`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value as Json;

use crate::error::ValueError;
use crate::types::AttrType;

// ============================================================================
// TRISTATE
// ============================================================================

/// Definedness of a primitive payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tristate<T> {
    /// Not yet computable, typically because it depends on another value.
    Unknown,
    /// Explicitly absent.
    Null,
    /// Present.
    Known(T),
}

impl<T> Tristate<T> {
    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Borrow the known payload.
    #[inline]
    pub fn known(&self) -> Option<&T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Unknown | Self::Null => None,
        }
    }

    /// Take the known payload.
    #[inline]
    pub fn into_known(self) -> Option<T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Unknown | Self::Null => None,
        }
    }

    /// Map the known payload, keeping unknown and null as they are.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Tristate<U> {
        match self {
            Self::Unknown => Tristate::Unknown,
            Self::Null => Tristate::Null,
            Self::Known(v) => Tristate::Known(f(v)),
        }
    }
}

impl<T> From<Option<T>> for Tristate<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Known)
    }
}

// ============================================================================
// ATTRIBUTE VALUE
// ============================================================================

/// A typed configuration attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Bool(Tristate<bool>),
    Int64(Tristate<i64>),
    Float64(Tristate<f64>),
    /// Arbitrary-precision number.
    Number(Tristate<Decimal>),
    String(Tristate<String>),
    List {
        element_type: AttrType,
        elements: Tristate<Vec<AttrValue>>,
    },
    /// Unordered collection. Elements keep their construction order for
    /// iteration and display.
    Set {
        element_type: AttrType,
        elements: Tristate<Vec<AttrValue>>,
    },
    Map {
        element_type: AttrType,
        entries: Tristate<BTreeMap<String, AttrValue>>,
    },
    Object {
        attribute_types: BTreeMap<String, AttrType>,
        attributes: Tristate<BTreeMap<String, AttrValue>>,
    },
}

impl AttrValue {
    // ------------------------------------------------------------------------
    // Primitive constructors
    // ------------------------------------------------------------------------

    #[must_use]
    pub const fn bool_value(value: bool) -> Self {
        Self::Bool(Tristate::Known(value))
    }

    #[must_use]
    pub const fn bool_null() -> Self {
        Self::Bool(Tristate::Null)
    }

    #[must_use]
    pub const fn bool_unknown() -> Self {
        Self::Bool(Tristate::Unknown)
    }

    #[must_use]
    pub const fn int64_value(value: i64) -> Self {
        Self::Int64(Tristate::Known(value))
    }

    #[must_use]
    pub const fn int64_null() -> Self {
        Self::Int64(Tristate::Null)
    }

    #[must_use]
    pub const fn int64_unknown() -> Self {
        Self::Int64(Tristate::Unknown)
    }

    #[must_use]
    pub const fn float64_value(value: f64) -> Self {
        Self::Float64(Tristate::Known(value))
    }

    #[must_use]
    pub const fn float64_null() -> Self {
        Self::Float64(Tristate::Null)
    }

    #[must_use]
    pub const fn float64_unknown() -> Self {
        Self::Float64(Tristate::Unknown)
    }

    #[must_use]
    pub const fn number_value(value: Decimal) -> Self {
        Self::Number(Tristate::Known(value))
    }

    #[must_use]
    pub const fn number_null() -> Self {
        Self::Number(Tristate::Null)
    }

    #[must_use]
    pub const fn number_unknown() -> Self {
        Self::Number(Tristate::Unknown)
    }

    #[must_use]
    pub fn string_value(value: impl Into<String>) -> Self {
        Self::String(Tristate::Known(value.into()))
    }

    #[must_use]
    pub const fn string_null() -> Self {
        Self::String(Tristate::Null)
    }

    #[must_use]
    pub const fn string_unknown() -> Self {
        Self::String(Tristate::Unknown)
    }

    // ------------------------------------------------------------------------
    // Collection constructors
    // ------------------------------------------------------------------------

    /// Known list. Every element must have `element_type`.
    pub fn list_value(element_type: AttrType, elements: Vec<Self>) -> Result<Self, ValueError> {
        check_elements(&element_type, &elements)?;
        Ok(Self::List {
            element_type,
            elements: Tristate::Known(elements),
        })
    }

    #[must_use]
    pub const fn list_null(element_type: AttrType) -> Self {
        Self::List {
            element_type,
            elements: Tristate::Null,
        }
    }

    #[must_use]
    pub const fn list_unknown(element_type: AttrType) -> Self {
        Self::List {
            element_type,
            elements: Tristate::Unknown,
        }
    }

    /// Known set. Every element must have `element_type`.
    pub fn set_value(element_type: AttrType, elements: Vec<Self>) -> Result<Self, ValueError> {
        check_elements(&element_type, &elements)?;
        Ok(Self::Set {
            element_type,
            elements: Tristate::Known(elements),
        })
    }

    #[must_use]
    pub const fn set_null(element_type: AttrType) -> Self {
        Self::Set {
            element_type,
            elements: Tristate::Null,
        }
    }

    #[must_use]
    pub const fn set_unknown(element_type: AttrType) -> Self {
        Self::Set {
            element_type,
            elements: Tristate::Unknown,
        }
    }

    /// Known map. Every entry must have `element_type`.
    pub fn map_value(
        element_type: AttrType,
        entries: BTreeMap<String, Self>,
    ) -> Result<Self, ValueError> {
        for (key, value) in &entries {
            let found = value.attr_type();
            if found != element_type {
                return Err(ValueError::EntryTypeMismatch {
                    key: key.clone(),
                    expected: element_type,
                    found,
                });
            }
        }
        Ok(Self::Map {
            element_type,
            entries: Tristate::Known(entries),
        })
    }

    #[must_use]
    pub const fn map_null(element_type: AttrType) -> Self {
        Self::Map {
            element_type,
            entries: Tristate::Null,
        }
    }

    #[must_use]
    pub const fn map_unknown(element_type: AttrType) -> Self {
        Self::Map {
            element_type,
            entries: Tristate::Unknown,
        }
    }

    /// Known object. The supplied attributes must match the declared
    /// attribute types exactly.
    pub fn object_value(
        attribute_types: BTreeMap<String, AttrType>,
        attributes: BTreeMap<String, Self>,
    ) -> Result<Self, ValueError> {
        if let Some(name) = attributes
            .keys()
            .find(|name| !attribute_types.contains_key(*name))
        {
            return Err(ValueError::UndeclaredAttribute { name: name.clone() });
        }
        for (name, expected) in &attribute_types {
            let Some(value) = attributes.get(name) else {
                return Err(ValueError::MissingAttribute { name: name.clone() });
            };
            let found = value.attr_type();
            if &found != expected {
                return Err(ValueError::AttributeTypeMismatch {
                    name: name.clone(),
                    expected: expected.clone(),
                    found,
                });
            }
        }
        Ok(Self::Object {
            attribute_types,
            attributes: Tristate::Known(attributes),
        })
    }

    /// Known object built from `(name, value)` pairs; attribute types are
    /// taken from the values.
    #[must_use]
    pub fn object_from<I, K>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        let attributes: BTreeMap<String, Self> = attributes
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        let attribute_types = attributes
            .iter()
            .map(|(name, value)| (name.clone(), value.attr_type()))
            .collect();
        Self::Object {
            attribute_types,
            attributes: Tristate::Known(attributes),
        }
    }

    /// Null value of the given type.
    #[must_use]
    pub fn null_of(ty: &AttrType) -> Self {
        Self::unvalued_of(ty, false)
    }

    /// Unknown value of the given type.
    #[must_use]
    pub fn unknown_of(ty: &AttrType) -> Self {
        Self::unvalued_of(ty, true)
    }

    fn unvalued_of(ty: &AttrType, unknown: bool) -> Self {
        fn state<T>(unknown: bool) -> Tristate<T> {
            if unknown {
                Tristate::Unknown
            } else {
                Tristate::Null
            }
        }

        match ty {
            AttrType::Bool => Self::Bool(state(unknown)),
            AttrType::Int64 => Self::Int64(state(unknown)),
            AttrType::Float64 => Self::Float64(state(unknown)),
            AttrType::Number => Self::Number(state(unknown)),
            AttrType::String => Self::String(state(unknown)),
            AttrType::List(elem) => Self::List {
                element_type: (**elem).clone(),
                elements: state(unknown),
            },
            AttrType::Set(elem) => Self::Set {
                element_type: (**elem).clone(),
                elements: state(unknown),
            },
            AttrType::Map(elem) => Self::Map {
                element_type: (**elem).clone(),
                entries: state(unknown),
            },
            AttrType::Object(types) => Self::Object {
                attribute_types: types.clone(),
                attributes: state(unknown),
            },
        }
    }

    // ------------------------------------------------------------------------
    // Collection helpers
    // ------------------------------------------------------------------------

    /// List of strings. An empty input yields a null list when
    /// `null_on_empty` is set.
    #[must_use]
    pub fn strings_to_list<S: AsRef<str>>(values: &[S], null_on_empty: bool) -> Self {
        if values.is_empty() && null_on_empty {
            return Self::list_null(AttrType::String);
        }
        Self::List {
            element_type: AttrType::String,
            elements: Tristate::Known(string_elements(values)),
        }
    }

    /// Set of strings. An empty input yields a null set when
    /// `null_on_empty` is set.
    #[must_use]
    pub fn strings_to_set<S: AsRef<str>>(values: &[S], null_on_empty: bool) -> Self {
        if values.is_empty() && null_on_empty {
            return Self::set_null(AttrType::String);
        }
        Self::Set {
            element_type: AttrType::String,
            elements: Tristate::Known(string_elements(values)),
        }
    }

    /// List of int64 values. An empty input yields a null list when
    /// `null_on_empty` is set.
    #[must_use]
    pub fn ints_to_int64_list(values: &[i64], null_on_empty: bool) -> Self {
        if values.is_empty() && null_on_empty {
            return Self::list_null(AttrType::Int64);
        }
        Self::List {
            element_type: AttrType::Int64,
            elements: Tristate::Known(values.iter().copied().map(Self::int64_value).collect()),
        }
    }

    /// Set of int64 values. An empty input yields a null set when
    /// `null_on_empty` is set.
    #[must_use]
    pub fn ints_to_int64_set(values: &[i64], null_on_empty: bool) -> Self {
        if values.is_empty() && null_on_empty {
            return Self::set_null(AttrType::Int64);
        }
        Self::Set {
            element_type: AttrType::Int64,
            elements: Tristate::Known(values.iter().copied().map(Self::int64_value).collect()),
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Static type of this value.
    pub fn attr_type(&self) -> AttrType {
        match self {
            Self::Bool(_) => AttrType::Bool,
            Self::Int64(_) => AttrType::Int64,
            Self::Float64(_) => AttrType::Float64,
            Self::Number(_) => AttrType::Number,
            Self::String(_) => AttrType::String,
            Self::List { element_type, .. } => AttrType::list_of(element_type.clone()),
            Self::Set { element_type, .. } => AttrType::set_of(element_type.clone()),
            Self::Map { element_type, .. } => AttrType::map_of(element_type.clone()),
            Self::Object {
                attribute_types, ..
            } => AttrType::Object(attribute_types.clone()),
        }
    }

    /// Whether the value is unknown.
    pub fn is_unknown(&self) -> bool {
        match self {
            Self::Bool(t) => t.is_unknown(),
            Self::Int64(t) => t.is_unknown(),
            Self::Float64(t) => t.is_unknown(),
            Self::Number(t) => t.is_unknown(),
            Self::String(t) => t.is_unknown(),
            Self::List { elements, .. } | Self::Set { elements, .. } => elements.is_unknown(),
            Self::Map { entries, .. } => entries.is_unknown(),
            Self::Object { attributes, .. } => attributes.is_unknown(),
        }
    }

    /// Whether the value is null.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Bool(t) => t.is_null(),
            Self::Int64(t) => t.is_null(),
            Self::Float64(t) => t.is_null(),
            Self::Number(t) => t.is_null(),
            Self::String(t) => t.is_null(),
            Self::List { elements, .. } | Self::Set { elements, .. } => elements.is_null(),
            Self::Map { entries, .. } => entries.is_null(),
            Self::Object { attributes, .. } => attributes.is_null(),
        }
    }

    /// Whether the value is neither unknown nor null.
    pub fn is_known(&self) -> bool {
        !self.is_unknown() && !self.is_null()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(t) => t.known().copied(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(t) => t.known().copied(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float64(t) => t.known().copied(),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(t) => t.known().copied(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(t) => t.known().map(String::as_str),
            _ => None,
        }
    }

    /// Elements of a known list or set.
    pub fn elements(&self) -> Option<&[Self]> {
        match self {
            Self::List { elements, .. } | Self::Set { elements, .. } => {
                elements.known().map(Vec::as_slice)
            }
            _ => None,
        }
    }

    /// Entries of a known map, or attributes of a known object.
    pub fn entries(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Map { entries, .. } => entries.known(),
            Self::Object { attributes, .. } => attributes.known(),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // JSON decoding
    // ------------------------------------------------------------------------

    /// Decode a JSON document as a value of type `ty`.
    ///
    /// JSON `null` decodes to a null value of `ty`. Object attributes absent
    /// from the document decode as null.
    pub fn from_json(ty: &AttrType, json: &Json) -> Result<Self, ValueError> {
        if json.is_null() {
            return Ok(Self::null_of(ty));
        }
        let mismatch = || ValueError::JsonMismatch {
            expected: ty.clone(),
            found: json_kind(json),
        };
        let number_mismatch = |n: &serde_json::Number| ValueError::JsonNumber {
            expected: ty.clone(),
            literal: n.to_string(),
        };

        match (ty, json) {
            (AttrType::Bool, Json::Bool(b)) => Ok(Self::bool_value(*b)),
            (AttrType::Int64, Json::Number(n)) => n
                .as_i64()
                .map(Self::int64_value)
                .ok_or_else(|| number_mismatch(n)),
            (AttrType::Float64, Json::Number(n)) => n
                .as_f64()
                .map(Self::float64_value)
                .ok_or_else(|| number_mismatch(n)),
            (AttrType::Number, Json::Number(n)) => {
                let literal = n.to_string();
                Decimal::from_str(&literal)
                    .or_else(|_| Decimal::from_scientific(&literal))
                    .map(Self::number_value)
                    .map_err(|_| number_mismatch(n))
            }
            (AttrType::String, Json::String(s)) => Ok(Self::string_value(s.as_str())),
            (AttrType::List(elem) | AttrType::Set(elem), Json::Array(items)) => {
                let elements = items
                    .iter()
                    .map(|item| Self::from_json(elem, item))
                    .collect::<Result<Vec<_>, _>>()?;
                let element_type = (**elem).clone();
                Ok(if matches!(ty, AttrType::List(_)) {
                    Self::List {
                        element_type,
                        elements: Tristate::Known(elements),
                    }
                } else {
                    Self::Set {
                        element_type,
                        elements: Tristate::Known(elements),
                    }
                })
            }
            (AttrType::Map(elem), Json::Object(obj)) => {
                let entries = obj
                    .iter()
                    .map(|(key, item)| Ok((key.clone(), Self::from_json(elem, item)?)))
                    .collect::<Result<BTreeMap<_, _>, ValueError>>()?;
                Ok(Self::Map {
                    element_type: (**elem).clone(),
                    entries: Tristate::Known(entries),
                })
            }
            (AttrType::Object(types), Json::Object(obj)) => {
                if let Some(name) = obj.keys().find(|name| !types.contains_key(*name)) {
                    return Err(ValueError::UndeclaredAttribute { name: name.clone() });
                }
                let attributes = types
                    .iter()
                    .map(|(name, attr_ty)| {
                        let value = match obj.get(name) {
                            Some(item) => Self::from_json(attr_ty, item)?,
                            None => Self::null_of(attr_ty),
                        };
                        Ok((name.clone(), value))
                    })
                    .collect::<Result<BTreeMap<_, _>, ValueError>>()?;
                Ok(Self::Object {
                    attribute_types: types.clone(),
                    attributes: Tristate::Known(attributes),
                })
            }
            _ => Err(mismatch()),
        }
    }
}

fn check_elements(element_type: &AttrType, elements: &[AttrValue]) -> Result<(), ValueError> {
    for (index, element) in elements.iter().enumerate() {
        let found = element.attr_type();
        if &found != element_type {
            return Err(ValueError::ElementTypeMismatch {
                index,
                expected: element_type.clone(),
                found,
            });
        }
    }
    Ok(())
}

fn string_elements<S: AsRef<str>>(values: &[S]) -> Vec<AttrValue> {
    values
        .iter()
        .map(|s| AttrValue::string_value(s.as_ref()))
        .collect()
}

const fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

fn fmt_tristate<T>(
    f: &mut fmt::Formatter<'_>,
    state: &Tristate<T>,
    known: impl FnOnce(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    match state {
        Tristate::Unknown => f.write_str("<unknown>"),
        Tristate::Null => f.write_str("<null>"),
        Tristate::Known(v) => known(f, v),
    }
}

fn fmt_elements(f: &mut fmt::Formatter<'_>, elements: &[AttrValue]) -> fmt::Result {
    f.write_str("[")?;
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{element}")?;
    }
    f.write_str("]")
}

fn fmt_entries(f: &mut fmt::Formatter<'_>, entries: &BTreeMap<String, AttrValue>) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{key:?}:{value}")?;
    }
    f.write_str("}")
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(t) => fmt_tristate(f, t, |f, v| write!(f, "{v}")),
            Self::Int64(t) => fmt_tristate(f, t, |f, v| write!(f, "{v}")),
            Self::Float64(t) => fmt_tristate(f, t, |f, v| write!(f, "{v}")),
            Self::Number(t) => fmt_tristate(f, t, |f, v| write!(f, "{v}")),
            Self::String(t) => fmt_tristate(f, t, |f, v| write!(f, "{v:?}")),
            Self::List { elements, .. } | Self::Set { elements, .. } => {
                fmt_tristate(f, elements, |f, v| fmt_elements(f, v))
            }
            Self::Map { entries, .. } => fmt_tristate(f, entries, |f, v| fmt_entries(f, v)),
            Self::Object { attributes, .. } => {
                fmt_tristate(f, attributes, |f, v| fmt_entries(f, v))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn list_value_rejects_mixed_elements() {
        let err = AttrValue::list_value(
            AttrType::String,
            vec![AttrValue::string_value("a"), AttrValue::int64_value(1)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValueError::ElementTypeMismatch {
                index: 1,
                expected: AttrType::String,
                found: AttrType::Int64,
            }
        );
    }

    #[test]
    fn object_value_checks_declared_attributes() {
        let types = BTreeMap::from([("name".to_owned(), AttrType::String)]);
        let err = AttrValue::object_value(types.clone(), BTreeMap::new()).unwrap_err();
        assert_eq!(
            err,
            ValueError::MissingAttribute {
                name: "name".into()
            }
        );

        let attrs = BTreeMap::from([
            ("name".to_owned(), AttrValue::string_value("x")),
            ("extra".to_owned(), AttrValue::bool_value(true)),
        ]);
        let err = AttrValue::object_value(types, attrs).unwrap_err();
        assert_eq!(
            err,
            ValueError::UndeclaredAttribute {
                name: "extra".into()
            }
        );
    }

    #[test]
    fn unvalued_values_keep_their_type() {
        let ty = AttrType::list_of(AttrType::Int64);
        let null = AttrValue::null_of(&ty);
        let unknown = AttrValue::unknown_of(&ty);
        assert!(null.is_null());
        assert!(unknown.is_unknown());
        assert_eq!(null.attr_type(), ty);
        assert_eq!(unknown.attr_type(), ty);
    }

    #[rstest]
    #[case::empty_null(true, true)]
    #[case::empty_known(false, false)]
    fn strings_to_list_null_on_empty(#[case] null_on_empty: bool, #[case] expect_null: bool) {
        let empty: [&str; 0] = [];
        let value = AttrValue::strings_to_list(&empty, null_on_empty);
        assert_eq!(value.is_null(), expect_null);
        assert_eq!(value.attr_type(), AttrType::list_of(AttrType::String));
    }

    #[test]
    fn ints_to_int64_set_keeps_order() {
        let value = AttrValue::ints_to_int64_set(&[3, 1, 2], false);
        assert_eq!(value.to_string(), "[3,1,2]");
    }

    #[rstest]
    #[case(AttrValue::bool_value(true), "true")]
    #[case(AttrValue::int64_value(-4), "-4")]
    #[case(AttrValue::float64_value(1.5), "1.5")]
    #[case(AttrValue::number_value(Decimal::new(125, 2)), "1.25")]
    #[case(AttrValue::string_value("a\"b"), "\"a\\\"b\"")]
    #[case(AttrValue::string_null(), "<null>")]
    #[case(AttrValue::int64_unknown(), "<unknown>")]
    #[case(AttrValue::strings_to_list(&["x", "y"], false), "[\"x\",\"y\"]")]
    fn display(#[case] value: AttrValue, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn from_json_decodes_object_with_missing_attributes_as_null() {
        let ty = AttrType::object([
            ("name", AttrType::String),
            ("port", AttrType::Int64),
            ("ratio", AttrType::Number),
            ("tags", AttrType::set_of(AttrType::String)),
        ]);
        let value = AttrValue::from_json(
            &ty,
            &json!({ "name": "web", "ratio": 0.25, "tags": ["a", "b"] }),
        )
        .unwrap();

        let entries = value.entries().unwrap();
        assert_eq!(entries["name"].as_str(), Some("web"));
        assert!(entries["port"].is_null());
        assert_eq!(entries["ratio"].as_decimal(), Some(Decimal::new(25, 2)));
        assert_eq!(entries["tags"].elements().map(<[_]>::len), Some(2));
    }

    #[test]
    fn from_json_reports_mismatch() {
        let err = AttrValue::from_json(&AttrType::Bool, &json!("yes")).unwrap_err();
        assert_eq!(
            err,
            ValueError::JsonMismatch {
                expected: AttrType::Bool,
                found: "string",
            }
        );

        let err = AttrValue::from_json(&AttrType::Int64, &json!(1.5)).unwrap_err();
        assert!(matches!(err, ValueError::JsonNumber { .. }));
    }

    #[test]
    fn tristate_from_option() {
        assert_eq!(Tristate::from(Some(1)), Tristate::Known(1));
        assert_eq!(Tristate::<i32>::from(None), Tristate::Null);
        assert_eq!(Tristate::Known(2).map(|v| v * 2).into_known(), Some(4));
    }
}
