//! RPG Maker VX Ace (RGSS3) data.
//!
//! The editor saves each database as a `.rvdata2` file: a marshal stream holding `RPG::*`
//! objects, plus two classes from the engine runtime that marshal themselves as raw payloads,
//! [`Table`] and [`Tone`]. [`Extensions::rgss`] registers handlers for both, and
//! [`records`] declares the objects. [`Project`] ties them together for a project folder.

mod project;
pub mod records;
mod table;
mod tone;

pub use self::project::{DataSource, DirSource, Project, PROJECT_FILE, PROJECT_SIGNATURE};
pub use self::records::*;
pub use self::table::Table;
pub use self::tone::Tone;

use crate::de::Decoder;
use crate::element::Element;
use crate::error::Result;
use crate::extension::Extensions;
use crate::unmarshal::Unmarshal;

impl Extensions {
    /// Registry with handlers for the engine's `Table` and `Tone` payloads.
    pub fn rgss() -> Self {
        Extensions::new()
            .with(Table::CLASS, Table::load)
            .with(Tone::CLASS, Tone::load)
    }
}

// Extension types bind their own payload. Nil leaves them empty.
macro_rules! impl_unmarshal_extension {
    ($t: ty) => {
        impl Unmarshal for $t {
            fn unmarshal<'a>(&mut self, elem: Element<'a>, de: &mut Decoder<'a>) -> Result<()> {
                match elem {
                    Element::Null => {
                        *self = <$t>::default();
                        Ok(())
                    }
                    elem => de.bind_other(self, elem),
                }
            }
        }
    };
}

impl_unmarshal_extension!(Table);
impl_unmarshal_extension!(Tone);
