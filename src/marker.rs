/// Marshal type tags. For internal use only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Null,
    True,
    False,
    Float,
    Fixnum,
    Symbol,
    SymbolLink,
    String,
    Ivar,
    Array,
    Hash,
    Object,
    UserDefined,
    Unknown(u8),
}

impl Marker {
    /// Construct a marker from a single byte.
    pub fn from_u8(n: u8) -> Marker {
        match n {
            b'0' => Marker::Null,
            b'T' => Marker::True,
            b'F' => Marker::False,
            b'f' => Marker::Float,
            b'i' => Marker::Fixnum,
            b':' => Marker::Symbol,
            b';' => Marker::SymbolLink,
            b'"' => Marker::String,
            b'I' => Marker::Ivar,
            b'[' => Marker::Array,
            b'{' => Marker::Hash,
            b'o' => Marker::Object,
            b'u' => Marker::UserDefined,
            n => Marker::Unknown(n),
        }
    }

    /// Converts a marker back into its tag byte.
    pub fn into_u8(self) -> u8 {
        match self {
            Marker::Null => b'0',
            Marker::True => b'T',
            Marker::False => b'F',
            Marker::Float => b'f',
            Marker::Fixnum => b'i',
            Marker::Symbol => b':',
            Marker::SymbolLink => b';',
            Marker::String => b'"',
            Marker::Ivar => b'I',
            Marker::Array => b'[',
            Marker::Hash => b'{',
            Marker::Object => b'o',
            Marker::UserDefined => b'u',
            Marker::Unknown(n) => n,
        }
    }
}

impl From<u8> for Marker {
    fn from(val: u8) -> Marker {
        Marker::from_u8(val)
    }
}

impl From<Marker> for u8 {
    fn from(val: Marker) -> u8 {
        val.into_u8()
    }
}

/// Render a tag byte for error messages, e.g. `'l' (byte: 108)`.
pub(crate) fn describe_tag(tag: u8) -> String {
    if tag.is_ascii_graphic() {
        format!("'{}' (byte: {})", tag as char, tag)
    } else {
        format!("byte {}", tag)
    }
}
