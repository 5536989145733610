use std::collections::BTreeMap;
use std::ops::Index;

use serde::ser::SerializeStruct;

use crate::de::Decoder;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::extension::Slot;
use crate::unmarshal::Unmarshal;

/// A dynamically typed marshal value.
///
/// Decoding into a `Value` never fails on type grounds. Objects lose their class name and become
/// maps from field symbol to value, and hash keys are turned into strings, so that every map
/// has the same shape regardless of where it came from.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Symbol(String),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// An extension payload kept as raw bytes.
    UserDefined { class: String, data: Vec<u8> },
}

impl Value {
    /// Kind name used when reporting a type mismatch.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Array(_) => "array",
            Value::Map(_) => "hash",
            Value::UserDefined { .. } => "user defined",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_user_defined(&self) -> bool {
        matches!(self, Value::UserDefined { .. })
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        if let Value::Int(v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        if let Value::Float(v) = *self {
            Some(v)
        } else {
            None
        }
    }

    /// Get the text of a string or a symbol.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) | Value::Symbol(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        if let Value::Array(ref v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        if let Value::Array(ref mut v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        if let Value::Map(ref v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut BTreeMap<String, Value>> {
        if let Value::Map(ref mut v) = *self {
            Some(v)
        } else {
            None
        }
    }

    /// Get the class name and payload of an extension kept as raw bytes.
    pub fn as_user_defined(&self) -> Option<(&str, &[u8])> {
        if let Value::UserDefined { ref class, ref data } = *self {
            Some((class.as_str(), data.as_slice()))
        } else {
            None
        }
    }

    // Hash keys become strings. Integers are written out in decimal.
    fn into_key(self) -> Result<String> {
        match self {
            Value::Int(v) => Ok(v.to_string()),
            Value::Str(v) | Value::Symbol(v) => Ok(v),
            other => Err(Error::BadHashKey(format!(
                "expected string or int type but got {}",
                other.kind_name()
            ))),
        }
    }
}

impl std::default::Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

static NULL: Value = Value::Null;

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        self.as_array().and_then(|v| v.get(index)).unwrap_or(&NULL)
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, index: &str) -> &Self::Output {
        self.as_map().and_then(|v| v.get(index)).unwrap_or(&NULL)
    }
}

impl Unmarshal for Value {
    fn unmarshal<'a>(&mut self, elem: Element<'a>, de: &mut Decoder<'a>) -> Result<()> {
        let value = match elem {
            Element::Null => Value::Null,
            Element::Bool(v) => Value::Bool(v),
            Element::Int(v) => Value::Int(v),
            Element::Float(raw) => match de.parse_float(raw) {
                Some(v) => Value::Float(v),
                None => return Ok(()),
            },
            Element::Str(v) => Value::Str(v.into_owned()),
            Element::Symbol(v) => Value::Symbol(v),
            Element::Array(len) => {
                let mut seq = Vec::with_capacity(len.min(4096));
                for _ in 0..len {
                    let mut item = Value::Null;
                    de.bind(&mut item)?;
                    seq.push(item);
                }
                Value::Array(seq)
            }
            Element::Hash(len) => {
                let mut map = BTreeMap::new();
                for _ in 0..len {
                    let mut key = Value::Null;
                    de.bind(&mut key)?;
                    let mut value = Value::Null;
                    de.bind(&mut value)?;
                    map.insert(key.into_key()?, value);
                }
                Value::Map(map)
            }
            Element::Object { len, .. } => {
                let mut map = BTreeMap::new();
                for _ in 0..len {
                    let field = de.read_symbol()?;
                    let mut value = Value::Null;
                    de.bind(&mut value)?;
                    map.insert(field, value);
                }
                Value::Map(map)
            }
            Element::UserDefined { class, data } => {
                return de.load_user(&class, data, Slot::Dynamic(self))
            }
        };
        *self = value;
        Ok(())
    }
}

macro_rules! impl_value_from_integer {
    ($t: ty) => {
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(From::from(v))
            }
        }
    };
}

macro_rules! impl_value_from {
    ($t: ty, $p: ident) => {
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::$p(v)
            }
        }
    };
}

impl_value_from!(bool, Bool);
impl_value_from!(i64, Int);
impl_value_from!(f64, Float);
impl_value_from!(String, Str);
impl_value_from!(Vec<Value>, Array);
impl_value_from!(BTreeMap<String, Value>, Map);
impl_value_from_integer!(u8);
impl_value_from_integer!(u16);
impl_value_from_integer!(u32);
impl_value_from_integer!(i8);
impl_value_from_integer!(i16);
impl_value_from_integer!(i32);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl<V: Into<Value>> FromIterator<V> for Value {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let v: Vec<Value> = iter.into_iter().map(Into::into).collect();
        Value::Array(v)
    }
}

macro_rules! impl_try_from_value {
    ($t: ty, $p: ident) => {
        impl TryFrom<Value> for $t {
            type Error = Value;
            fn try_from(v: Value) -> std::result::Result<Self, Self::Error> {
                match v {
                    Value::$p(v) => Ok(v),
                    _ => Err(v),
                }
            }
        }
    };
}

macro_rules! impl_try_from_value_integer {
    ($t: ty) => {
        impl TryFrom<Value> for $t {
            type Error = Value;
            fn try_from(v: Value) -> std::result::Result<Self, Self::Error> {
                match v {
                    Value::Int(i) => TryFrom::try_from(i).map_err(|_| v),
                    _ => Err(v),
                }
            }
        }
    };
}

impl_try_from_value!(bool, Bool);
impl_try_from_value!(f64, Float);
impl_try_from_value!(Vec<Value>, Array);
impl_try_from_value!(BTreeMap<String, Value>, Map);
impl_try_from_value_integer!(u8);
impl_try_from_value_integer!(u16);
impl_try_from_value_integer!(u32);
impl_try_from_value_integer!(u64);
impl_try_from_value_integer!(i8);
impl_try_from_value_integer!(i16);
impl_try_from_value_integer!(i32);
impl_try_from_value_integer!(i64);

impl TryFrom<Value> for String {
    type Error = Value;
    fn try_from(v: Value) -> std::result::Result<Self, Self::Error> {
        match v {
            Value::Str(v) | Value::Symbol(v) => Ok(v),
            _ => Err(v),
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Str(v) => serializer.serialize_str(v),
            Value::Symbol(v) => serializer.serialize_str(v),
            Value::Array(v) => v.serialize(serializer),
            Value::Map(v) => v.serialize(serializer),
            Value::UserDefined { class, data } => {
                let mut s = serializer.serialize_struct("UserDefined", 2)?;
                s.serialize_field("class", class)?;
                s.serialize_field("data", serde_bytes::Bytes::new(data))?;
                s.end()
            }
        }
    }
}
