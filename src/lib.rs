//! rvmarshal reads Ruby's Marshal format (version 4.8) without a Ruby runtime, and binds the data
//! straight into Rust types. It exists to read RPG Maker VX Ace project data (`.rvdata2` files),
//! which are nothing more than marshalled `RPG::*` objects.
//!
//! Decoding is driven by the destination. Any type implementing [`Unmarshal`] can receive data:
//!
//! - [`Value`] takes anything, and is the way to look at a file of unknown shape.
//! - Records, declared with [`marshal_record!`], are filled from objects by field name.
//! - `Vec<T>`, `[T; N]`, `HashMap<K, V>`, `BTreeMap<K, V>`, `Option<T>` and `Box<T>` bind their
//!   contents recursively.
//! - `String`, `bool`, the integer types, `f32` and `f64` take the matching scalars.
//!
//! Data that doesn't fit its destination doesn't stop the decode. The first such mismatch is
//! remembered, the rest of the stream is still read, and the mismatch is returned at the end.
//! Malformed data stops the decode immediately. See [`Decoder`] for the details.
//!
//! Classes that marshal themselves as raw bytes (`_dump`/`_load`) need a handler registered in an
//! [`Extensions`] table. The [`rgss`] module has the handlers, records and a project loader for
//! RPG Maker VX Ace.
//!
//! ```
//! use rvmarshal::{Extensions, Value};
//!
//! // Marshal.dump({ 1 => "EV001" })
//! let data = b"\x04\x08{\x06i\x06\"\x0aEV001";
//! let value: Value = rvmarshal::from_slice(data, &Extensions::new()).unwrap();
//! assert_eq!(value["1"].as_str(), Some("EV001"));
//!
//! let err = rvmarshal::from_slice::<i32>(data, &Extensions::new()).unwrap_err();
//! assert_eq!(err.to_string(), "expected type hash but got i32");
//! ```
//!
//! Not every part of the format is supported. Object links (`@`), bignums, regular expressions,
//! structs, class and module references, and objects using `marshal_load` all fail with
//! [`Error::UnknownType`].

mod depth_tracking;
mod element;
mod error;
mod extension;
mod marker;
mod symbol;
mod unmarshal;
mod value;
mod varint;

pub mod de;
pub mod format;
pub mod record;
pub mod rgss;

pub use self::de::{decode_into, from_slice, Decoder, DecoderOptions};
pub use self::element::{parse_float, Element};
pub use self::error::{Error, Result};
pub use self::extension::{Extensions, Handler, Slot};
pub use self::record::Record;
pub use self::unmarshal::{type_label, MapKey, Unmarshal};
pub use self::value::Value;

/// Marshal format major version. Streams with any other major version are rejected.
pub const MAJOR_VERSION: u8 = 4;
/// Newest marshal format minor version understood.
pub const MINOR_VERSION: u8 = 8;
/// Default limit on how deeply containers may nest.
pub const MAX_DEPTH: usize = 256;
