//! Statically typed records.
//!
//! A record is a struct whose fields are filled from a marshal object (or a hash) by field name.
//! Each field carries the wire name it is stored under, usually an instance variable like
//! `@tileset_id`. Records are declared with [`marshal_record!`], which builds the name lookup
//! at compile time:
//!
//! ```
//! use rvmarshal::{marshal_record, Extensions};
//!
//! marshal_record! {
//!     #[derive(Clone, Debug, Default, PartialEq)]
//!     pub struct Point {
//!         pub x: i32 => "@x",
//!         pub y: i32 => "@y",
//!     }
//! }
//!
//! // Point.new(3, 4), as marshalled by Ruby
//! let data = b"\x04\x08o:\x0aPoint\x07:\x07@xi\x08:\x07@yi\x09";
//! let point: Point = rvmarshal::from_slice(data, &Extensions::new()).unwrap();
//! assert_eq!(point, Point { x: 3, y: 4 });
//! ```
//!
//! Fields missing from the data keep their default value. Fields present in the data but not in
//! the record are an error, reported once the whole object has been read.

use crate::de::Decoder;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::unmarshal::Unmarshal;

/// One field of a record, ready to be bound.
pub struct Field<'r> {
    /// Name of the struct field.
    pub name: &'static str,
    /// Name of the field's type.
    pub type_name: &'static str,
    pub dest: &'r mut dyn Unmarshal,
}

/// A struct that binds marshal objects field by field. Implement it with [`marshal_record!`].
pub trait Record: Unmarshal + Default {
    /// Name used in error messages.
    const NAME: &'static str;
    /// Wire names of every field, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Look up a field by its wire name.
    fn field_mut(&mut self, name: &str) -> Option<Field<'_>>;
}

/// Bind an object or hash element into a record.
///
/// Nil resets the record to its default. Anything else goes through
/// [`Decoder::bind_other`].
pub fn unmarshal_record<'a, R: Record>(
    record: &mut R,
    elem: Element<'a>,
    de: &mut Decoder<'a>,
) -> Result<()> {
    let (len, symbol_keys) = match elem {
        Element::Object { len, .. } => (len, true),
        Element::Hash(len) => (len, false),
        Element::Null => {
            *record = R::default();
            return Ok(());
        }
        elem => return de.bind_other(record, elem),
    };

    let mut unknown = Vec::new();
    for _ in 0..len {
        let name = if symbol_keys {
            de.read_symbol()?
        } else {
            de.read_key()?
        };
        match record.field_mut(&name) {
            Some(field) => de.bind_field(R::NAME, field.name, field.type_name, field.dest)?,
            None => {
                de.skip_next()?;
                unknown.push(name);
            }
        }
    }

    if !unknown.is_empty() {
        log::warn!("{} has no fields named {:?}", R::NAME, unknown);
        return Err(Error::UnknownFields {
            record: R::NAME,
            fields: unknown,
        });
    }
    Ok(())
}

/// Declare a struct that can be decoded from a marshal object.
///
/// Every field is written as `name: Type => "wire name"`. Attributes on the struct and on
/// individual fields are passed through, and the struct must implement `Default`.
///
/// See the [module documentation](crate::record) for an example.
#[macro_export]
macro_rules! marshal_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty => $wire:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            const NAME: &'static str = stringify!($name);
            const FIELDS: &'static [&'static str] = &[$($wire),*];

            fn field_mut(&mut self, name: &str) -> Option<$crate::record::Field<'_>> {
                match name {
                    $(
                        $wire => Some($crate::record::Field {
                            name: stringify!($field),
                            type_name: $crate::type_label::<$ty>(),
                            dest: &mut self.$field,
                        }),
                    )*
                    _ => None,
                }
            }
        }

        impl $crate::Unmarshal for $name {
            fn unmarshal<'a>(
                &mut self,
                elem: $crate::Element<'a>,
                de: &mut $crate::Decoder<'a>,
            ) -> $crate::Result<()> {
                $crate::record::unmarshal_record(self, elem, de)
            }
        }
    };
}
