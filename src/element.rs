use std::borrow::Cow;

use byteorder::ReadBytesExt;
use encoding_rs::{Encoding, UTF_8};

use crate::error::{Error, Result};
use crate::marker::Marker;
use crate::symbol::SymbolTable;
use crate::{varint, MAJOR_VERSION, MINOR_VERSION};

/// One decoded piece of a marshal stream.
///
/// Scalars are complete. Containers only carry their header: the nested elements follow in the
/// stream and are read by whoever binds the container.
#[derive(Clone, Debug, PartialEq)]
pub enum Element<'a> {
    Null,
    Bool(bool),
    Int(i64),
    /// Raw float literal, see [`parse_float`].
    Float(&'a [u8]),
    Str(Cow<'a, str>),
    Symbol(String),
    /// Followed by this many elements.
    Array(usize),
    /// Followed by this many key-value pairs.
    Hash(usize),
    /// Followed by this many field-name symbols, each with a value.
    Object { class: String, len: usize },
    /// An opaque payload for the extension registered under `class`.
    UserDefined { class: String, data: &'a [u8] },
}

impl<'a> Element<'a> {
    /// Kind name used when reporting a type mismatch.
    pub fn kind_name(&self) -> &'static str {
        use self::Element::*;
        match self {
            Null => "nil",
            Bool(_) => "bool",
            Int(_) => "int",
            Float(_) => "float",
            Str(_) => "string",
            Symbol(_) => "symbol",
            Array(_) => "array",
            Hash(_) => "hash",
            Object { .. } => "object",
            UserDefined { .. } => "user defined",
        }
    }

    /// Number of nested elements that follow this one in the stream.
    pub fn nested(&self) -> usize {
        match *self {
            Element::Array(len) => len,
            Element::Hash(len) => 2 * len,
            Element::Object { len, .. } => 2 * len,
            _ => 0,
        }
    }
}

/// Parse the text of a float element.
///
/// `nan`, `inf` and `-inf` are spelled out by the encoder. Infinities come back as `f64::MAX` and
/// `-f64::MAX`, which is what existing consumers of this data have always seen. Anything after an
/// embedded NUL is mantissa bookkeeping from old encoders and is ignored.
pub fn parse_float(raw: &[u8]) -> Result<f64> {
    match raw {
        b"nan" => return Ok(f64::NAN),
        b"inf" => return Ok(f64::MAX),
        b"-inf" => return Ok(-f64::MAX),
        _ => (),
    }
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    let text = std::str::from_utf8(&raw[..end]).map_err(|e| Error::InvalidFloat {
        value: String::from_utf8_lossy(&raw[..end]).into_owned(),
        reason: e.to_string(),
    })?;
    text.parse::<f64>().map_err(|e| Error::InvalidFloat {
        value: text.to_string(),
        reason: e.to_string(),
    })
}

fn decode_text<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Cow<'a, str> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        log::warn!("{} decode error", encoding.name());
    }
    text
}

enum IvarHead<'a> {
    Text(&'a [u8]),
    Symbol(String),
}

/// Cursor over a marshal stream. Owns the symbol table, since symbols are only meaningful in the
/// order the cursor meets them.
#[derive(Clone, Debug)]
pub struct Parser<'a> {
    data: &'a [u8],
    symbols: SymbolTable,
}

impl<'a> Parser<'a> {
    pub fn new(data: &'a [u8]) -> Parser<'a> {
        Self {
            data,
            symbols: SymbolTable::new(),
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len()
    }

    #[cfg(test)]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Check the 2-byte version header.
    pub fn read_header(&mut self) -> Result<()> {
        let major = self
            .data
            .read_u8()
            .map_err(|_| Error::short("decode major version", 0, 1))?;
        let minor = self
            .data
            .read_u8()
            .map_err(|_| Error::short("decode minor version", 0, 1))?;
        if major != MAJOR_VERSION || minor > MINOR_VERSION {
            return Err(Error::UnsupportedVersion { major, minor });
        }
        Ok(())
    }

    /// Read the next element.
    pub fn next_element(&mut self) -> Result<Element<'a>> {
        let marker = self.read_marker("decode type tag")?;
        self.parse_element(marker)
    }

    /// Read a class or field name, which must be a symbol or a symbol link.
    pub fn read_symbol(&mut self) -> Result<String> {
        match self.read_marker("decode symbol tag")? {
            Marker::Symbol => self.parse_symbol(),
            Marker::SymbolLink => self.parse_symbol_link(),
            other => Err(Error::ExpectedSymbol(other.into())),
        }
    }

    fn read_marker(&mut self, step: &'static str) -> Result<Marker> {
        let tag = self.data.read_u8().map_err(|_| Error::short(step, 0, 1))?;
        Ok(Marker::from_u8(tag))
    }

    fn read_len(&mut self, step: &'static str) -> Result<usize> {
        varint::read_len(&mut self.data, step)
    }

    fn read_bytes(&mut self, step: &'static str) -> Result<&'a [u8]> {
        let len = self.read_len(step)?;
        if len > self.data.len() {
            return Err(Error::short(step, self.data.len(), len));
        }
        let (bytes, data) = self.data.split_at(len);
        self.data = data;
        Ok(bytes)
    }

    fn parse_symbol(&mut self) -> Result<String> {
        let bytes = self.read_bytes("get Symbol content")?;
        let symbol = String::from_utf8_lossy(bytes).into_owned();
        Ok(self.symbols.push(symbol))
    }

    fn parse_symbol_link(&mut self) -> Result<String> {
        let index = varint::read(&mut self.data)?;
        Ok(self.symbols.resolve(index)?.to_string())
    }

    fn parse_element(&mut self, marker: Marker) -> Result<Element<'a>> {
        let elem = match marker {
            Marker::Null => Element::Null,
            Marker::True => Element::Bool(true),
            Marker::False => Element::Bool(false),
            Marker::Fixnum => Element::Int(varint::read(&mut self.data)?),
            Marker::Float => Element::Float(self.read_bytes("get Float content")?),
            Marker::Symbol => Element::Symbol(self.parse_symbol()?),
            Marker::SymbolLink => Element::Symbol(self.parse_symbol_link()?),
            Marker::String => {
                Element::Str(decode_text(self.read_bytes("get String content")?, UTF_8))
            }
            Marker::Ivar => self.parse_ivar()?,
            Marker::Array => {
                let len = self.read_len("decode Array length")?;
                if len > self.data.len() {
                    return Err(Error::short("get Array content", self.data.len(), len));
                }
                Element::Array(len)
            }
            Marker::Hash => {
                let len = self.read_len("decode Hash length")?;
                if len.saturating_mul(2) > self.data.len() {
                    return Err(Error::short(
                        "get Hash content",
                        self.data.len(),
                        len.saturating_mul(2),
                    ));
                }
                Element::Hash(len)
            }
            Marker::Object => {
                let class = self.read_symbol()?;
                let len = self.read_len("decode Object field count")?;
                if len.saturating_mul(2) > self.data.len() {
                    return Err(Error::short(
                        "get Object content",
                        self.data.len(),
                        len.saturating_mul(2),
                    ));
                }
                log::trace!("object {} with {} fields", class, len);
                Element::Object { class, len }
            }
            Marker::UserDefined => {
                let class = self.read_symbol()?;
                let data = self.read_bytes("get UserDefined content")?;
                Element::UserDefined { class, data }
            }
            Marker::Unknown(tag) => return Err(Error::UnknownType(tag)),
        };
        Ok(elem)
    }

    // Instance variables only ever wrap strings (and the odd non-ASCII symbol) in the data this
    // reads. They exist to name the string's encoding; everything else about them is dropped.
    fn parse_ivar(&mut self) -> Result<Element<'a>> {
        let head = match self.read_marker("decode Ivar inner tag")? {
            Marker::String => IvarHead::Text(self.read_bytes("get String content")?),
            Marker::Symbol => IvarHead::Symbol(self.parse_symbol()?),
            Marker::SymbolLink => IvarHead::Symbol(self.parse_symbol_link()?),
            other => {
                return Err(Error::BadIvar(format!(
                    "expected type '\"' but got {}",
                    crate::marker::describe_tag(other.into())
                )))
            }
        };

        let mut encoding = UTF_8;
        let count = self.read_len("decode Ivar count")?;
        for _ in 0..count {
            let name = self.read_symbol()?;
            let tag = self.read_marker("decode Ivar value tag")?;
            match (name.as_str(), tag) {
                // `E` is true for UTF-8 and false for US-ASCII, which UTF-8 covers.
                ("E", Marker::True) | ("E", Marker::False) => encoding = UTF_8,
                ("E", other) => {
                    return Err(Error::BadIvar(format!(
                        "expected type 'T' but got {}",
                        crate::marker::describe_tag(other.into())
                    )))
                }
                ("encoding", Marker::String) => {
                    let label = self.read_bytes("get encoding name")?;
                    encoding = Encoding::for_label(label).ok_or_else(|| {
                        Error::BadIvar(format!(
                            "unknown encoding {}",
                            String::from_utf8_lossy(label)
                        ))
                    })?;
                }
                (_, Marker::True) | (_, Marker::False) | (_, Marker::Null) => (),
                (_, Marker::Fixnum) => {
                    varint::read(&mut self.data)?;
                }
                (_, Marker::String) => {
                    self.read_bytes("get Ivar content")?;
                }
                (_, Marker::Symbol) => {
                    self.parse_symbol()?;
                }
                (_, Marker::SymbolLink) => {
                    self.parse_symbol_link()?;
                }
                (name, other) => {
                    return Err(Error::BadIvar(format!(
                        "unsupported value {} for {}",
                        crate::marker::describe_tag(other.into()),
                        name
                    )))
                }
            }
        }

        Ok(match head {
            IvarHead::Text(bytes) => Element::Str(decode_text(bytes, encoding)),
            IvarHead::Symbol(symbol) => Element::Symbol(symbol),
        })
    }
}
