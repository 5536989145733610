//! Handlers for user-defined (`u`) payloads.
//!
//! A `u` element carries a class name and a run of bytes whose layout only the class itself
//! knows. Decoding one needs a handler registered under that class name in an [`Extensions`]
//! table, which is handed to every [`Decoder`][crate::Decoder]. The table is read-only while
//! decoding, so a single one can be shared between any number of decoders and threads.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::unmarshal::type_label;
use crate::value::Value;

/// A handler turns a payload into a value and stores it in the slot it is given.
pub type Handler = dyn Fn(&[u8], Slot<'_>) -> Result<()> + Send + Sync;

/// Where an extension handler should put the value it decodes.
pub enum Slot<'s> {
    /// A dynamically typed destination. Anything convertible into a [`Value`] fits.
    Dynamic(&'s mut Value),
    /// A statically typed destination. Only the exact type fits.
    Typed {
        dest: &'s mut dyn Any,
        type_name: &'static str,
    },
}

impl<'s> Slot<'s> {
    /// Store a decoded value.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Mismatch`] if the slot is typed and isn't a `T`. The decoder latches
    /// this error instead of aborting.
    pub fn put<T: Any + Into<Value>>(self, value: T) -> Result<()> {
        match self {
            Slot::Dynamic(dest) => {
                *dest = value.into();
                Ok(())
            }
            Slot::Typed { dest, type_name } => match dest.downcast_mut::<T>() {
                Some(dest) => {
                    *dest = value;
                    Ok(())
                }
                None => Err(Error::Mismatch {
                    expected: type_label::<T>(),
                    got: type_name,
                }),
            },
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Slot::Dynamic(_))
    }
}

/// Table of extension handlers, keyed by class name.
#[derive(Default)]
pub struct Extensions {
    handlers: HashMap<String, Box<Handler>>,
}

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for a class.
    ///
    /// # Panics
    ///
    /// Panics if a handler was already registered for `class`.
    pub fn register<F>(&mut self, class: &str, handler: F)
    where
        F: Fn(&[u8], Slot<'_>) -> Result<()> + Send + Sync + 'static,
    {
        if self.handlers.contains_key(class) {
            panic!("cannot add same user defined type more than once: {}", class);
        }
        self.handlers.insert(class.to_string(), Box::new(handler));
    }

    /// Builder form of [`register`][Self::register].
    pub fn with<F>(mut self, class: &str, handler: F) -> Self
    where
        F: Fn(&[u8], Slot<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.register(class, handler);
        self
    }

    /// Register a class whose payload should be kept as-is, as a [`Value::UserDefined`].
    pub fn register_raw(&mut self, class: &str) {
        let name = class.to_string();
        self.register(class, move |data, slot| {
            slot.put(Value::UserDefined {
                class: name.clone(),
                data: data.to_vec(),
            })
        });
    }

    pub fn get(&self, class: &str) -> Option<&Handler> {
        self.handlers.get(class).map(|h| h.as_ref())
    }

    pub fn contains(&self, class: &str) -> bool {
        self.handlers.contains_key(class)
    }

    /// Class names with a registered handler, in no particular order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(|k| k.as_str())
    }
}

impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut classes: Vec<&str> = self.classes().collect();
        classes.sort_unstable();
        f.debug_struct("Extensions")
            .field("classes", &classes)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[should_panic(expected = "more than once: Table")]
    fn duplicate_registration() {
        let mut ext = Extensions::new();
        ext.register("Table", |_, _| Ok(()));
        ext.register("Table", |_, _| Ok(()));
    }

    #[test]
    fn raw_payload() {
        let mut ext = Extensions::new();
        ext.register_raw("Color");
        let handler = ext.get("Color").unwrap();
        let mut value = Value::Null;
        handler(&[1, 2, 3], Slot::Dynamic(&mut value)).unwrap();
        assert_eq!(
            value,
            Value::UserDefined {
                class: "Color".to_string(),
                data: vec![1, 2, 3]
            }
        );
    }

    #[test]
    fn typed_slot_mismatch() {
        let mut dest = 0i32;
        let slot = Slot::Typed {
            dest: &mut dest,
            type_name: "i32",
        };
        let err = slot.put(String::from("x")).unwrap_err();
        assert!(err.is_recorded());
        assert!(matches!(err, Error::Mismatch { got: "i32", .. }));

        let mut dest = String::new();
        let slot = Slot::Typed {
            dest: &mut dest,
            type_name: "String",
        };
        slot.put(String::from("x")).unwrap();
        assert_eq!(dest, "x");
    }

    #[test]
    fn debug_lists_classes() {
        let ext = Extensions::new()
            .with("Tone", |_, _| Ok(()))
            .with("Table", |_, _| Ok(()));
        assert_eq!(
            format!("{:?}", ext),
            "Extensions { classes: [\"Table\", \"Tone\"] }"
        );
        assert!(ext.contains("Tone"));
        assert!(!ext.contains("Color"));
    }
}
