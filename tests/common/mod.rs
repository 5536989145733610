//! Test-only writer for marshal streams, so fixtures can be built up value by value instead of
//! spelled out as raw bytes.

#![allow(dead_code)]

use std::collections::HashMap;

#[derive(Default)]
pub struct Stream {
    buf: Vec<u8>,
    symbols: HashMap<String, usize>,
}

impl Stream {
    pub fn new() -> Self {
        let mut stream = Self::default();
        stream.buf.extend_from_slice(&[4, 8]);
        stream
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    pub fn long(&mut self, v: i64) -> &mut Self {
        if v == 0 {
            self.buf.push(0);
        } else if 0 < v && v < 123 {
            self.buf.push((v + 5) as u8);
        } else if -124 < v && v < 0 {
            self.buf.push(((v - 5) as i8) as u8);
        } else {
            let mut bytes = Vec::new();
            let mut x = v;
            for i in 1..=4i8 {
                bytes.push((x & 0xff) as u8);
                x >>= 8;
                if x == 0 {
                    self.buf.push(i as u8);
                    break;
                }
                if x == -1 {
                    self.buf.push((-i) as u8);
                    break;
                }
            }
            self.buf.extend_from_slice(&bytes);
        }
        self
    }

    fn bytes(&mut self, data: &[u8]) -> &mut Self {
        self.long(data.len() as i64);
        self.buf.extend_from_slice(data);
        self
    }

    pub fn raw(&mut self, data: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(data);
        self
    }

    pub fn nil(&mut self) -> &mut Self {
        self.raw(b"0")
    }

    pub fn bool(&mut self, v: bool) -> &mut Self {
        self.raw(if v { b"T" } else { b"F" })
    }

    pub fn int(&mut self, v: i64) -> &mut Self {
        self.raw(b"i").long(v)
    }

    pub fn float(&mut self, text: &str) -> &mut Self {
        self.raw(b"f").bytes(text.as_bytes())
    }

    /// A symbol, written as a link if it was written before.
    pub fn sym(&mut self, name: &str) -> &mut Self {
        match self.symbols.get(name) {
            Some(&index) => self.raw(b";").long(index as i64),
            None => {
                let index = self.symbols.len();
                self.symbols.insert(name.to_string(), index);
                self.raw(b":").bytes(name.as_bytes())
            }
        }
    }

    /// A UTF-8 string, the way Ruby 1.9+ writes one.
    pub fn str(&mut self, text: &str) -> &mut Self {
        self.raw(b"I\"").bytes(text.as_bytes()).long(1).sym("E").bool(true)
    }

    /// A string without an encoding.
    pub fn bare_str(&mut self, text: &str) -> &mut Self {
        self.raw(b"\"").bytes(text.as_bytes())
    }

    pub fn array(&mut self, len: usize) -> &mut Self {
        self.raw(b"[").long(len as i64)
    }

    pub fn hash(&mut self, len: usize) -> &mut Self {
        self.raw(b"{").long(len as i64)
    }

    /// Object header. Follow with `len` calls of `sym(field)` and a value.
    pub fn object(&mut self, class: &str, len: usize) -> &mut Self {
        self.raw(b"o").sym(class).long(len as i64)
    }

    pub fn user(&mut self, class: &str, data: &[u8]) -> &mut Self {
        self.raw(b"u").sym(class).bytes(data)
    }

    pub fn table(&mut self, x: i32, y: i32, z: i32, data: &[i16]) -> &mut Self {
        let mut payload = Vec::new();
        for v in [3, x, y, z, data.len() as i32].iter() {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        for v in data {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        self.user("Table", &payload)
    }

    pub fn tone(&mut self, red: f64, green: f64, blue: f64, gray: f64) -> &mut Self {
        let mut payload = Vec::new();
        for v in [red, green, blue, gray].iter() {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        self.user("Tone", &payload)
    }

    pub fn sound(&mut self, name: &str, volume: i64, pitch: i64) -> &mut Self {
        self.object("RPG::BGM", 3)
            .sym("@name")
            .str(name)
            .sym("@volume")
            .int(volume)
            .sym("@pitch")
            .int(pitch)
    }
}
