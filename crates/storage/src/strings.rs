//! String interning
//!
//! Index 0 is reserved for the empty string so that `StringId::NULL` is
//! always resolvable.

use rustc_hash::FxHashMap;
use trackforge_core::types::StringId;

/// Interned string storage
#[derive(Debug)]
pub struct StringPool {
    strings: Vec<String>,
    index: FxHashMap<String, StringId>,
}

impl StringPool {
    /// Create a pool holding only the null string
    pub fn new() -> Self {
        let mut index = FxHashMap::default();
        index.insert(String::new(), StringId::NULL);
        Self {
            strings: vec![String::new()],
            index,
        }
    }

    /// Stable handle for `s`
    pub fn intern(&mut self, s: &str) -> StringId {
        if let Some(id) = self.index.get(s) {
            return *id;
        }
        let id = StringId::new(self.strings.len() as u32);
        self.strings.push(s.to_owned());
        self.index.insert(s.to_owned(), id);
        id
    }

    /// Handle of `s` if it was interned before
    pub fn lookup(&self, s: &str) -> Option<StringId> {
        self.index.get(s).copied()
    }

    /// Resolve a handle
    pub fn get(&self, id: StringId) -> Option<&str> {
        self.strings.get(id.value() as usize).map(String::as_str)
    }

    /// Number of interned strings, including the null string
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Always false: the null string is present from construction
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}
