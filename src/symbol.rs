use std::collections::HashMap;

use crate::error::{EnvError, EnvResult};
use crate::value::SymbolId;

/// Interned symbol table. Each unique symbol name maps to a unique SymbolId,
/// so two symbols are textually equal exactly when their ids are equal.
#[derive(Default)]
pub struct SymbolTable {
    name_to_id: HashMap<String, SymbolId>,
    id_to_name: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a symbol name. Returns the existing ID if already interned,
    /// or creates a new one.
    pub fn intern(&mut self, name: &str) -> EnvResult<SymbolId> {
        if let Some(&id) = self.name_to_id.get(name) {
            return Ok(id);
        }
        let index = u32::try_from(self.id_to_name.len())
            .map_err(|_| EnvError::SymbolOverflow(self.id_to_name.len()))?;
        let id = SymbolId(index);
        self.name_to_id.insert(name.to_string(), id);
        self.id_to_name.push(name.to_string());
        Ok(id)
    }

    /// Look up a symbol name by its ID. None for ids this table never issued.
    pub fn name(&self, id: SymbolId) -> Option<&str> {
        self.id_to_name.get(id.0 as usize).map(String::as_str)
    }

    /// Look up a symbol ID by name, without interning.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.name_to_id.get(name).copied()
    }
}
