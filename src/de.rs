//! Binding a marshal stream into destinations.
//!
//! The [`Decoder`] walks the stream one [`Element`] at a time and hands each one to the
//! [`Unmarshal`] implementation of the destination it belongs to. Errors come in two kinds:
//!
//! - Structural errors (truncated data, bad tags, unknown extensions, ...) mean the stream can't
//!   be walked any further, so they abort the decode immediately.
//! - Binding errors (a string where an integer was wanted, an integer too large for its
//!   destination, an unparseable float) leave the stream intact. The first of these is latched,
//!   the offending element is skipped, and decoding carries on. The latched error is returned
//!   once the whole stream has been consumed.
//!
//! Destinations are left partially filled when an error is returned. Every value bound before
//! the error, and every value bound after a latched one, stays in place.

use std::any::type_name;

use crate::depth_tracking::DepthTracker;
use crate::element::{self, Element, Parser};
use crate::error::{Error, Result};
use crate::extension::{Extensions, Slot};
use crate::unmarshal::{type_label, Unmarshal};
use crate::value::Value;
use crate::MAX_DEPTH;

/// Knobs for a [`Decoder`].
#[derive(Clone, Debug)]
pub struct DecoderOptions {
    /// How deeply containers may nest before decoding fails with [`Error::ParseLimit`].
    pub max_depth: usize,
    /// Accept bytes left over after the root value instead of failing with
    /// [`Error::TrailingData`].
    pub allow_trailing: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            allow_trailing: false,
        }
    }
}

/// Decoding state for a single stream.
pub struct Decoder<'a> {
    parser: Parser<'a>,
    extensions: &'a Extensions,
    depth_tracking: DepthTracker,
    allow_trailing: bool,
    saved_error: Option<Error>,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8], extensions: &'a Extensions) -> Self {
        Self::with_options(data, extensions, DecoderOptions::default())
    }

    pub fn with_options(
        data: &'a [u8],
        extensions: &'a Extensions,
        options: DecoderOptions,
    ) -> Self {
        Self {
            parser: Parser::new(data),
            extensions,
            depth_tracking: DepthTracker::new(options.max_depth),
            allow_trailing: options.allow_trailing,
            saved_error: None,
        }
    }

    /// Decode the whole stream into `dest`: header, then the root value.
    pub fn decode<T: Unmarshal + ?Sized>(mut self, dest: &mut T) -> Result<()> {
        self.parser.read_header()?;
        self.bind(dest)?;
        if !self.allow_trailing && self.parser.remaining() > 0 {
            return Err(Error::TrailingData(self.parser.remaining()));
        }
        match self.saved_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Read the next element and bind it into `dest`.
    pub fn bind<T: Unmarshal + ?Sized>(&mut self, dest: &mut T) -> Result<()> {
        let elem = self.parser.next_element()?;
        self.bind_element(dest, elem)
    }

    /// Bind an element that has already been read into `dest`.
    pub fn bind_element<T: Unmarshal + ?Sized>(
        &mut self,
        dest: &mut T,
        elem: Element<'a>,
    ) -> Result<()> {
        self.depth_tracking.enter()?;
        let result = dest.unmarshal(elem, self);
        self.depth_tracking.leave();
        result
    }

    /// Bind the next element into one field of a record. A mismatch that is latched while doing
    /// so is reported against the record and field.
    pub fn bind_field<T: Unmarshal + ?Sized>(
        &mut self,
        record: &'static str,
        field: &'static str,
        field_type: &'static str,
        dest: &mut T,
    ) -> Result<()> {
        let had_error = self.saved_error.is_some();
        self.bind(dest)?;
        if !had_error {
            if let Some(Error::Mismatch { expected, .. }) = self.saved_error {
                self.saved_error = Some(Error::FieldMismatch {
                    record,
                    field,
                    field_type,
                    expected,
                });
            }
        }
        Ok(())
    }

    /// Fallback for elements a destination has no binding for.
    ///
    /// An extension payload still goes to its handler, which may be able to produce a `T`.
    /// Anything else is a mismatch.
    pub fn bind_other<T: Unmarshal>(&mut self, dest: &mut T, elem: Element<'a>) -> Result<()> {
        match elem {
            Element::UserDefined { class, data } => self.load_user(
                &class,
                data,
                Slot::Typed {
                    dest,
                    type_name: type_label::<T>(),
                },
            ),
            elem => self.mismatch::<T>(elem),
        }
    }

    /// Latch a mismatch between `elem` and a destination of type `T`, then skip `elem`.
    pub fn mismatch<T: ?Sized>(&mut self, elem: Element<'a>) -> Result<()> {
        self.record(Error::Mismatch {
            expected: elem.kind_name(),
            got: type_label::<T>(),
        });
        self.skip(elem)
    }

    /// Run the extension handler registered for `class`.
    pub fn load_user(&mut self, class: &str, data: &[u8], slot: Slot<'_>) -> Result<()> {
        let extensions = self.extensions;
        let handler = extensions
            .get(class)
            .ok_or_else(|| Error::UnknownExtension(class.to_string()))?;
        match handler(data, slot) {
            Err(err) if err.is_recorded() => {
                self.record(err);
                Ok(())
            }
            result => result,
        }
    }

    /// Consume `elem` along with everything nested inside it.
    pub fn skip(&mut self, elem: Element<'a>) -> Result<()> {
        let mut sink = Value::Null;
        self.bind_element(&mut sink, elem)
    }

    /// Consume the next element along with everything nested inside it.
    pub fn skip_next(&mut self) -> Result<()> {
        let mut sink = Value::Null;
        self.bind(&mut sink)
    }

    /// Read a symbol, as found in class and field names.
    pub fn read_symbol(&mut self) -> Result<String> {
        self.parser.read_symbol()
    }

    /// Read a hash key that must name a record field.
    pub fn read_key(&mut self) -> Result<String> {
        match self.parser.next_element()? {
            Element::Str(key) => Ok(key.into_owned()),
            Element::Symbol(key) => Ok(key),
            other => Err(Error::BadHashKey(format!(
                "expected string or symbol key but got {}",
                other.kind_name()
            ))),
        }
    }

    /// Parse float text, latching the error if it isn't a number.
    pub fn parse_float(&mut self, raw: &[u8]) -> Option<f64> {
        match element::parse_float(raw) {
            Ok(v) => Some(v),
            Err(err) => {
                self.record(err);
                None
            }
        }
    }

    /// Latch `err` unless an earlier error has been latched already.
    pub fn record(&mut self, err: Error) {
        if self.saved_error.is_none() {
            log::debug!("latched decode error: {}", err);
            self.saved_error = Some(err);
        }
    }

    pub fn has_error(&self) -> bool {
        self.saved_error.is_some()
    }

    /// The error latched so far, if any.
    pub fn error(&self) -> Option<&Error> {
        self.saved_error.as_ref()
    }

    pub fn extensions(&self) -> &'a Extensions {
        self.extensions
    }

    pub fn depth(&self) -> usize {
        self.depth_tracking.depth()
    }
}

/// Decode a complete stream into a fresh `T`.
pub fn from_slice<T: Unmarshal + Default>(data: &[u8], extensions: &Extensions) -> Result<T> {
    let mut dest = T::default();
    Decoder::new(data, extensions).decode(&mut dest)?;
    Ok(dest)
}

/// Decode a complete stream into an existing destination. On error, `dest` holds whatever was
/// bound before decoding stopped.
pub fn decode_into<T: Unmarshal + ?Sized>(
    data: &[u8],
    extensions: &Extensions,
    dest: &mut T,
) -> Result<()> {
    log::trace!("decoding {} bytes into {}", data.len(), type_name::<T>());
    Decoder::new(data, extensions).decode(dest)
}
