use std::collections::BTreeMap;
use std::fmt;

/// Static type of an attribute value.
///
/// Collection types carry their element type; object types carry the type of
/// every named attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttrType {
    Bool,
    Int64,
    Float64,
    Number,
    String,
    List(Box<AttrType>),
    Set(Box<AttrType>),
    Map(Box<AttrType>),
    Object(BTreeMap<String, AttrType>),
}

impl AttrType {
    /// List type with the given element type.
    #[must_use]
    pub fn list_of(element: Self) -> Self {
        Self::List(Box::new(element))
    }

    /// Set type with the given element type.
    #[must_use]
    pub fn set_of(element: Self) -> Self {
        Self::Set(Box::new(element))
    }

    /// Map type with the given element type.
    #[must_use]
    pub fn map_of(element: Self) -> Self {
        Self::Map(Box::new(element))
    }

    /// Object type from `(name, type)` pairs.
    #[must_use]
    pub fn object<I, K>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self::Object(
            attributes
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        )
    }

    /// Element type of a list, set or map.
    pub fn element_type(&self) -> Option<&Self> {
        match self {
            Self::List(elem) | Self::Set(elem) | Self::Map(elem) => Some(elem),
            _ => None,
        }
    }

    /// Whether values of this type are lists, sets or maps.
    pub fn is_collection(&self) -> bool {
        self.element_type().is_some()
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int64 => f.write_str("int64"),
            Self::Float64 => f.write_str("float64"),
            Self::Number => f.write_str("number"),
            Self::String => f.write_str("string"),
            Self::List(elem) => write!(f, "list[{elem}]"),
            Self::Set(elem) => write!(f, "set[{elem}]"),
            Self::Map(elem) => write!(f, "map[{elem}]"),
            Self::Object(attrs) => {
                f.write_str("object{")?;
                for (i, (name, ty)) in attrs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{name}:{ty}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_nested_types() {
        let ty = AttrType::object([
            ("tags", AttrType::set_of(AttrType::String)),
            ("ports", AttrType::list_of(AttrType::Int64)),
        ]);
        assert_eq!(ty.to_string(), "object{ports:list[int64],tags:set[string]}");
    }

    #[test]
    fn element_type_only_for_collections() {
        assert_eq!(
            AttrType::map_of(AttrType::Bool).element_type(),
            Some(&AttrType::Bool)
        );
        assert!(AttrType::String.element_type().is_none());
        assert!(!AttrType::object([("a", AttrType::Bool)]).is_collection());
    }
}
