use std::collections::BTreeMap;

use byteorder::{LittleEndian, ReadBytesExt};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::extension::Slot;
use crate::value::Value;

/// Color tone adjustment.
///
/// Stored as doubles but only ever set to whole numbers between -255 and 255, so each component
/// is truncated to an `i16`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Tone {
    pub red: i16,
    pub green: i16,
    pub blue: i16,
    pub gray: i16,
}

impl Tone {
    pub const CLASS: &'static str = "Tone";

    /// Parse a `Tone` payload: four little-endian `f64`.
    pub fn from_payload(mut buf: &[u8]) -> Result<Tone> {
        let mut channels = [0f64; 4];
        buf.read_f64_into::<LittleEndian>(&mut channels)
            .map_err(|_| Error::bad_extension(Self::CLASS, "expected 4 doubles"))?;
        // `as` truncates toward zero and saturates
        Ok(Tone {
            red: channels[0] as i16,
            green: channels[1] as i16,
            blue: channels[2] as i16,
            gray: channels[3] as i16,
        })
    }

    /// Extension handler for `Tone` payloads.
    pub fn load(data: &[u8], slot: Slot<'_>) -> Result<()> {
        slot.put(Self::from_payload(data)?)
    }
}

impl From<Tone> for Value {
    fn from(tone: Tone) -> Self {
        let mut map = BTreeMap::new();
        map.insert("red".to_string(), Value::from(tone.red));
        map.insert("green".to_string(), Value::from(tone.green));
        map.insert("blue".to_string(), Value::from(tone.blue));
        map.insert("gray".to_string(), Value::from(tone.gray));
        Value::Map(map)
    }
}
