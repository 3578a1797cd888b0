//! String interner for identifiers, operator symbols and string literals.
//!
//! Every phase shares one interner through [`SharedInterner`], so a `Name`
//! produced by the lexer can be looked up by the evaluator when it reports a
//! missing global.

use super::Name;
use crate::ast::RESERVED_WORDS;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

#[derive(Default, Debug)]
struct Table {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

/// Interner with O(1) lookup in both directions.
///
/// Strings are leaked to get `'static` lifetimes; the set of distinct
/// identifiers in a program is small and lives for the whole run.
#[derive(Debug)]
pub struct StringInterner {
    table: RwLock<Table>,
}

impl StringInterner {
    /// Create a new interner with the empty string and reserved words
    /// pre-interned.
    pub fn new() -> Self {
        let interner = StringInterner {
            table: RwLock::new(Table::default()),
        };
        interner.intern("");
        for word in RESERVED_WORDS {
            interner.intern(word);
        }
        interner
    }

    /// Intern a string, returning its `Name`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&name) = self.table.read().map.get(s) {
            return name;
        }

        let mut table = self.table.write();
        // Another writer may have won the race between the two locks.
        if let Some(&name) = table.map.get(s) {
            return name;
        }
        let index = u32::try_from(table.strings.len())
            .unwrap_or_else(|_| panic!("string interner overflow"));
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let name = Name::from_raw(index);
        table.strings.push(leaked);
        table.map.insert(leaked, name);
        name
    }

    /// Text of an interned name. Unknown names resolve to `""`.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Existing `Name` for `s`, without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.read().map.get(s).copied()
    }

    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Interner handle shared by the lexer, builder, resolver and evaluator.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
