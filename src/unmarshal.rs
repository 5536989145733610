use std::any::{type_name, Any};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::de::Decoder;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::value::Value;

/// Caps preallocation for containers, since lengths come straight from untrusted data.
const MAX_PREALLOC: usize = 4096;

/// A destination that marshal data can be bound into.
///
/// Implementations receive the element that was read for them and pull any nested elements
/// through the decoder. An element the destination can't hold should go to
/// [`Decoder::bind_other`], which latches a mismatch and skips over it.
pub trait Unmarshal: Any {
    fn unmarshal<'a>(&mut self, elem: Element<'a>, de: &mut Decoder<'a>) -> Result<()>;
}

/// Short name of a type for error messages: `String` rather than `alloc::string::String`.
#[doc(hidden)]
pub fn type_label<T: ?Sized>() -> &'static str {
    let name = type_name::<T>();
    if name.contains('<') || name.contains('[') {
        name
    } else {
        name.rsplit("::").next().unwrap_or(name)
    }
}

impl Unmarshal for bool {
    fn unmarshal<'a>(&mut self, elem: Element<'a>, de: &mut Decoder<'a>) -> Result<()> {
        match elem {
            Element::Bool(v) => {
                *self = v;
                Ok(())
            }
            elem => de.bind_other(self, elem),
        }
    }
}

impl Unmarshal for String {
    fn unmarshal<'a>(&mut self, elem: Element<'a>, de: &mut Decoder<'a>) -> Result<()> {
        match elem {
            Element::Str(v) => *self = v.into_owned(),
            Element::Symbol(v) => *self = v,
            Element::Null => self.clear(),
            elem => return de.bind_other(self, elem),
        }
        Ok(())
    }
}

macro_rules! impl_unmarshal_int {
    ($($t:ty),*) => {
        $(
            impl Unmarshal for $t {
                fn unmarshal<'a>(&mut self, elem: Element<'a>, de: &mut Decoder<'a>) -> Result<()> {
                    match elem {
                        Element::Int(v) => match <$t>::try_from(v) {
                            Ok(v) => *self = v,
                            Err(_) => de.record(Error::IntOutOfRange {
                                value: v,
                                got: stringify!($t),
                            }),
                        },
                        Element::Null => *self = 0,
                        elem => return de.bind_other(self, elem),
                    }
                    Ok(())
                }
            }
        )*
    }
}

impl_unmarshal_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Unmarshal for f64 {
    fn unmarshal<'a>(&mut self, elem: Element<'a>, de: &mut Decoder<'a>) -> Result<()> {
        match elem {
            Element::Float(raw) => {
                if let Some(v) = de.parse_float(raw) {
                    *self = v;
                }
                Ok(())
            }
            elem => de.bind_other(self, elem),
        }
    }
}

impl Unmarshal for f32 {
    fn unmarshal<'a>(&mut self, elem: Element<'a>, de: &mut Decoder<'a>) -> Result<()> {
        match elem {
            Element::Float(raw) => {
                if let Some(v) = de.parse_float(raw) {
                    *self = v as f32;
                }
                Ok(())
            }
            elem => de.bind_other(self, elem),
        }
    }
}

fn latched_mismatch<T: ?Sized>(de: &Decoder<'_>) -> bool {
    matches!(de.error(), Some(Error::Mismatch { got, .. }) if *got == type_label::<T>())
}

impl<T: Unmarshal + Default> Unmarshal for Option<T> {
    fn unmarshal<'a>(&mut self, elem: Element<'a>, de: &mut Decoder<'a>) -> Result<()> {
        match elem {
            Element::Null => {
                *self = None;
                Ok(())
            }
            elem => {
                let was_set = self.is_some();
                let had_error = de.has_error();
                self.get_or_insert_with(T::default).unmarshal(elem, de)?;
                // Nothing was bound if the element itself didn't fit `T`
                if !was_set && !had_error && latched_mismatch::<T>(de) {
                    *self = None;
                }
                Ok(())
            }
        }
    }
}

impl<T: Unmarshal> Unmarshal for Box<T> {
    fn unmarshal<'a>(&mut self, elem: Element<'a>, de: &mut Decoder<'a>) -> Result<()> {
        self.as_mut().unmarshal(elem, de)
    }
}

impl<T: Unmarshal + Default> Unmarshal for Vec<T> {
    fn unmarshal<'a>(&mut self, elem: Element<'a>, de: &mut Decoder<'a>) -> Result<()> {
        match elem {
            Element::Array(len) => {
                self.clear();
                self.reserve(len.min(MAX_PREALLOC));
                for _ in 0..len {
                    let mut item = T::default();
                    de.bind(&mut item)?;
                    self.push(item);
                }
                Ok(())
            }
            elem => de.bind_other(self, elem),
        }
    }
}

impl<T: Unmarshal, const N: usize> Unmarshal for [T; N] {
    fn unmarshal<'a>(&mut self, elem: Element<'a>, de: &mut Decoder<'a>) -> Result<()> {
        match elem {
            Element::Array(len) if len == N => {
                for item in self.iter_mut() {
                    de.bind(item)?;
                }
                Ok(())
            }
            elem => de.bind_other(self, elem),
        }
    }
}

/// Types usable as keys of a statically typed map.
///
/// Hash keys are read as dynamic values first. A key that doesn't convert is latched as a
/// mismatch and its entry is dropped.
pub trait MapKey: Sized {
    fn from_key(key: &Value) -> Option<Self>;
}

impl MapKey for String {
    fn from_key(key: &Value) -> Option<Self> {
        match key {
            Value::Str(v) | Value::Symbol(v) => Some(v.clone()),
            _ => None,
        }
    }
}

macro_rules! impl_map_key_int {
    ($($t:ty),*) => {
        $(
            impl MapKey for $t {
                fn from_key(key: &Value) -> Option<Self> {
                    match *key {
                        Value::Int(v) => <$t>::try_from(v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    }
}

impl_map_key_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

// Reads `len` key-value pairs, handing each converted pair to `insert`.
fn bind_entries<'a, K, V, F>(de: &mut Decoder<'a>, len: usize, mut insert: F) -> Result<()>
where
    K: MapKey + 'static,
    V: Unmarshal + Default,
    F: FnMut(K, V),
{
    for _ in 0..len {
        let mut key = Value::Null;
        de.bind(&mut key)?;
        let mut value = V::default();
        de.bind(&mut value)?;
        match K::from_key(&key) {
            Some(key) => insert(key, value),
            None => de.record(Error::Mismatch {
                expected: key.kind_name(),
                got: type_label::<K>(),
            }),
        }
    }
    Ok(())
}

impl<K, V> Unmarshal for HashMap<K, V>
where
    K: MapKey + Eq + Hash + 'static,
    V: Unmarshal + Default,
{
    fn unmarshal<'a>(&mut self, elem: Element<'a>, de: &mut Decoder<'a>) -> Result<()> {
        match elem {
            Element::Hash(len) => {
                self.reserve(len.min(MAX_PREALLOC));
                bind_entries::<K, V, _>(de, len, |k, v| {
                    self.insert(k, v);
                })
            }
            elem => de.bind_other(self, elem),
        }
    }
}

impl<K, V> Unmarshal for BTreeMap<K, V>
where
    K: MapKey + Ord + 'static,
    V: Unmarshal + Default,
{
    fn unmarshal<'a>(&mut self, elem: Element<'a>, de: &mut Decoder<'a>) -> Result<()> {
        match elem {
            Element::Hash(len) => bind_entries::<K, V, _>(de, len, |k, v| {
                self.insert(k, v);
            }),
            elem => de.bind_other(self, elem),
        }
    }
}
