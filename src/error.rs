use std::fmt;
use std::io;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum Error {
    /// Stream ended before a value was complete.
    LengthTooShort {
        step: &'static str,
        actual: usize,
        expected: usize,
    },
    /// A length or count field decoded to a negative number.
    BadLength { step: &'static str, len: i64 },
    /// The 2-byte header didn't name a supported marshal version.
    UnsupportedVersion { major: u8, minor: u8 },
    /// A symbol link pointed past the end of the symbol table.
    BadSymbolLink { index: i64, len: usize },
    /// A class or field name wasn't encoded as a symbol or symbol link.
    ExpectedSymbol(u8),
    /// A type tag this decoder doesn't implement.
    UnknownType(u8),
    /// An instance-variable wrapper held something other than a string, or carried a malformed
    /// encoding annotation.
    BadIvar(String),
    /// A hash key couldn't be used as a key for the destination.
    BadHashKey(String),
    /// An extension payload didn't have the shape its handler requires.
    BadExtension { class: String, reason: String },
    /// No handler was registered for an extension class.
    UnknownExtension(String),
    /// A record received fields it doesn't declare.
    UnknownFields {
        record: &'static str,
        fields: Vec<String>,
    },
    /// Bytes remained after the root value was decoded.
    TrailingData(usize),
    /// Nesting went deeper than the configured limit.
    ParseLimit(String),
    /// The destination's type disagrees with the data. `expected` names what the data holds,
    /// `got` names the destination type.
    Mismatch {
        expected: &'static str,
        got: &'static str,
    },
    /// A [`Mismatch`][Error::Mismatch] that happened while binding a record field.
    FieldMismatch {
        record: &'static str,
        field: &'static str,
        field_type: &'static str,
        expected: &'static str,
    },
    /// An integer didn't fit the destination integer type.
    IntOutOfRange { value: i64, got: &'static str },
    /// A float literal couldn't be parsed.
    InvalidFloat { value: String, reason: String },
    /// Reading a project file failed.
    Io { path: String, err: io::Error },
    /// The project entrypoint file is missing its signature.
    InvalidProject,
    /// A map id was zero or not listed in the map infos.
    MissingMap(i32),
    /// A tileset id was zero or past the end of the tileset list.
    MissingTileset(i32),
}

impl Error {
    /// Recorded errors are latched by the decoder while it finishes walking the stream. Every
    /// other error aborts the decode on the spot.
    pub fn is_recorded(&self) -> bool {
        matches!(
            self,
            Error::Mismatch { .. }
                | Error::FieldMismatch { .. }
                | Error::IntOutOfRange { .. }
                | Error::InvalidFloat { .. }
        )
    }

    pub(crate) fn short(step: &'static str, actual: usize, expected: usize) -> Self {
        Error::LengthTooShort {
            step,
            actual,
            expected,
        }
    }

    pub(crate) fn bad_extension(class: &str, reason: impl Into<String>) -> Self {
        Error::BadExtension {
            class: class.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::LengthTooShort {
                step,
                actual,
                expected,
            } => write!(
                f,
                "Expected data length {}, but got {} on step [{}]",
                expected, actual, step
            ),
            Error::BadLength { step, len } => {
                write!(f, "Negative length {} on step [{}]", len, step)
            }
            Error::UnsupportedVersion { major, minor } => write!(
                f,
                "Unsupported marshal version {}.{} (supported: {}.0 to {}.{})",
                major,
                minor,
                crate::MAJOR_VERSION,
                crate::MAJOR_VERSION,
                crate::MINOR_VERSION
            ),
            Error::BadSymbolLink { index, len } => write!(
                f,
                "Symbol link {} is out of range, only {} symbols have been read",
                index, len
            ),
            Error::ExpectedSymbol(tag) => write!(
                f,
                "Expected symbol type ':' or ';' but got {}",
                crate::marker::describe_tag(tag)
            ),
            Error::UnknownType(tag) => write!(
                f,
                "Unimplemented type: {}",
                crate::marker::describe_tag(tag)
            ),
            Error::BadIvar(ref err) => write!(f, "Bad instance variables: {}", err),
            Error::BadHashKey(ref err) => write!(f, "Bad hash key: {}", err),
            Error::BadExtension {
                ref class,
                ref reason,
            } => write!(f, "{}: bad data format: {}", class, reason),
            Error::UnknownExtension(ref class) => {
                write!(f, "Unhandled user defined type: {}", class)
            }
            Error::UnknownFields { record, ref fields } => write!(
                f,
                "Unknown object fields [{}] for record {}",
                fields.join(", "),
                record
            ),
            Error::TrailingData(len) => {
                write!(f, "{} bytes left over after the root value", len)
            }
            Error::ParseLimit(ref err) => write!(f, "Hit parsing limit: {}", err),
            Error::Mismatch { expected, got } => {
                write!(f, "expected type {} but got {}", expected, got)
            }
            Error::FieldMismatch {
                record,
                field,
                field_type,
                expected,
            } => write!(
                f,
                "{} has field \"{}\" with type {}, but expected {}",
                record, field, field_type, expected
            ),
            Error::IntOutOfRange { value, got } => {
                write!(f, "integer {} doesn't fit in {}", value, got)
            }
            Error::InvalidFloat {
                ref value,
                ref reason,
            } => write!(f, "failed to parse float {:?}: {}", value, reason),
            Error::Io { ref path, ref err } => write!(f, "{}: {}", path, err),
            Error::InvalidProject => f.write_str("invalid project"),
            Error::MissingMap(id) => write!(f, "map does not exist: {}", id),
            Error::MissingTileset(id) => {
                write!(f, "invalid tileset id {} given, out of bounds", id)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io { ref err, .. } => Some(err),
            _ => None,
        }
    }
}
