use crate::error::{Error, Result};

/// Symbols read so far, in order of first appearance. Symbol links refer back into this table
/// by index.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly read symbol and hand back a copy of it.
    pub fn push(&mut self, symbol: String) -> String {
        self.symbols.push(symbol.clone());
        symbol
    }

    /// Look up a symbol link.
    pub fn resolve(&self, index: i64) -> Result<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.symbols.get(i))
            .map(|s| s.as_str())
            .ok_or(Error::BadSymbolLink {
                index,
                len: self.symbols.len(),
            })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }
}
