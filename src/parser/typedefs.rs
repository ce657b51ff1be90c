//! Registry of typedef names recognized during one parse.
//!
//! A `typedef-name` is only accepted as a type-specifier if the identifier's
//! spelling was registered by a previously parsed `typedef` declaration.
//! The table is append-only for the duration of a parse session: names are
//! never removed, and re-registering the same spelling is tolerated.

use rustc_hash::FxHashSet;

/// Upper bound on distinct typedef names per parse session. Exhausting it
/// surfaces as [`ParseError::OutOfSpace`](super::parse::ParseError) and
/// aborts the parse.
pub const TYPEDEF_CAPACITY: usize = 512;

#[derive(Debug, Default)]
pub struct TypedefTable {
    names: FxHashSet<String>,
}

impl TypedefTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a typedef name. Returns `false` only when the table is full
    /// and `name` is not already present.
    pub fn register(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            return true;
        }
        if self.names.len() >= TYPEDEF_CAPACITY {
            return false;
        }
        self.names.insert(name.to_string());
        true
    }

    /// Exact-spelling membership query.
    pub fn is_registered(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_query() {
        let mut table = TypedefTable::new();
        assert!(!table.is_registered("myint"));
        assert!(table.register("myint"));
        assert!(table.is_registered("myint"));
        assert!(!table.is_registered("myin"));
        assert!(!table.is_registered("myints"));
    }

    #[test]
    fn test_duplicate_registration_is_tolerated() {
        let mut table = TypedefTable::new();
        assert!(table.register("t"));
        assert!(table.register("t"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_capacity_exhaustion() {
        let mut table = TypedefTable::new();
        for i in 0..TYPEDEF_CAPACITY {
            assert!(table.register(&format!("t{}", i)));
        }
        assert!(!table.register("one_too_many"));
        // Re-registering an existing name still succeeds at capacity.
        assert!(table.register("t0"));
    }
}
