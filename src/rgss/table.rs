use std::collections::BTreeMap;

use byteorder::{LittleEndian, ReadBytesExt};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::extension::Slot;
use crate::value::Value;

/// Dense three-dimensional grid of `i16`, stored x-fastest. Maps use it for tile ids (one layer
/// per `z`), tilesets for passage flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub data: Vec<i16>,
}

fn read_i32(buf: &mut &[u8], step: &str) -> Result<i32> {
    buf.read_i32::<LittleEndian>()
        .map_err(|_| Error::bad_extension(Table::CLASS, format!("missing {}", step)))
}

impl Table {
    pub const CLASS: &'static str = "Table";

    /// Parse a `Table` payload: five little-endian `i32` (dimension count, x, y, z, element
    /// count) followed by the elements.
    pub fn from_payload(mut buf: &[u8]) -> Result<Table> {
        read_i32(&mut buf, "dimension count")?;
        let x = read_i32(&mut buf, "x size")?;
        let y = read_i32(&mut buf, "y size")?;
        let z = read_i32(&mut buf, "z size")?;
        let count = read_i32(&mut buf, "element count")?;

        let size = i64::from(x)
            .checked_mul(i64::from(y))
            .and_then(|v| v.checked_mul(i64::from(z)));
        if x < 0 || y < 0 || z < 0 || size != Some(i64::from(count)) {
            return Err(Error::bad_extension(
                Self::CLASS,
                format!("{} elements for a {}x{}x{} table", count, x, y, z),
            ));
        }
        let count = count as usize;
        if buf.len() / 2 < count {
            return Err(Error::bad_extension(
                Self::CLASS,
                format!("{} bytes of data for {} elements", buf.len(), count),
            ));
        }

        let mut data = vec![0i16; count];
        buf.read_i16_into::<LittleEndian>(&mut data)
            .map_err(|_| Error::bad_extension(Self::CLASS, "truncated data"))?;
        Ok(Table { x, y, z, data })
    }

    /// Extension handler for `Table` payloads.
    pub fn load(data: &[u8], slot: Slot<'_>) -> Result<()> {
        slot.put(Self::from_payload(data)?)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if !(0..self.x).contains(&x) || !(0..self.y).contains(&y) || !(0..self.z).contains(&z) {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        let (w, h) = (self.x as usize, self.y as usize);
        z.checked_mul(h)?
            .checked_add(y)?
            .checked_mul(w)?
            .checked_add(x)
            .filter(|&i| i < self.data.len())
    }

    /// Element at `(x, y, z)`, or `None` if that's outside the table.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<i16> {
        self.index(x, y, z).and_then(|i| self.data.get(i).copied())
    }

    /// Like [`get`][Self::get], but `x` and `y` wrap around, as they do on looping maps.
    pub fn get_wrapped(&self, x: i32, y: i32, z: i32) -> Option<i16> {
        if self.x == 0 || self.y == 0 {
            return None;
        }
        self.get(x.rem_euclid(self.x), y.rem_euclid(self.y), z)
    }

    /// Set the element at `(x, y, z)`. Returns false if that's outside the table.
    pub fn set(&mut self, x: i32, y: i32, z: i32, value: i16) -> bool {
        match self.index(x, y, z).and_then(|i| self.data.get_mut(i)) {
            Some(v) => {
                *v = value;
                true
            }
            None => false,
        }
    }
}

impl From<Table> for Value {
    fn from(table: Table) -> Self {
        let mut map = BTreeMap::new();
        map.insert("x".to_string(), Value::from(table.x));
        map.insert("y".to_string(), Value::from(table.y));
        map.insert("z".to_string(), Value::from(table.z));
        map.insert(
            "data".to_string(),
            table.data.into_iter().collect::<Value>(),
        );
        Value::Map(map)
    }
}
