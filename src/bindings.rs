//! Let-binding environment and variable size table.
//!
//! Both tables are owned by one `ExpressionTranslator` instance per
//! assertion; nothing is shared across assertions.

use std::collections::HashMap;

/// Descriptor produced by the `_` indexed-family operator.  Transient:
/// consumed immediately by the enclosing application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor {
    SignExtend { bits: u32 },
    Extract { hi: u32, lo: u32 },
}

/// Value a let-bound name resolves to: readable display text, or an
/// operator descriptor awaiting application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    Text(String),
    Op(Descriptor),
}

/// Ordered mapping from let-bound names (serializer convention
/// `.def_<digits>`, not enforced) to their resolved values.
///
/// Entries are only ever added; a name collision overwrites the value in
/// place.  Scope is the whole assertion — the serializer emits all lets in
/// one top-level chain, not block-scoped.
#[derive(Debug, Default)]
pub struct BindingEnvironment {
    entries: Vec<(String, Bound)>,
    index: HashMap<String, usize>,
}

impl BindingEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, overwriting any previous binding.
    pub fn bind(&mut self, name: &str, value: Bound) {
        match self.index.get(name) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Bound> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// The resolved display text of `name`, if it is bound to text.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(Bound::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Iterate bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bound)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Inferred bit-widths of free array variables, keyed by name.
///
/// Populated lazily on the first `select` referencing a name; consulted
/// only for diagnostics and output formatting.
#[derive(Debug, Default)]
pub struct SizeTable {
    sizes: HashMap<String, u32>,
}

impl SizeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the width of `name` if not already known.
    pub fn record(&mut self, name: &str, bits: u32) {
        self.sizes.entry(name.to_string()).or_insert(bits);
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.sizes.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.sizes.iter().map(|(n, &b)| (n.as_str(), b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_get() {
        let mut env = BindingEnvironment::new();
        env.bind(".def_1", Bound::Text("x + y".into()));
        assert_eq!(env.get_text(".def_1"), Some("x + y"));
        assert_eq!(env.get_text(".def_2"), None);
    }

    #[test]
    fn test_collision_overwrites_in_place() {
        let mut env = BindingEnvironment::new();
        env.bind(".def_1", Bound::Text("a".into()));
        env.bind(".def_2", Bound::Text("b".into()));
        env.bind(".def_1", Bound::Text("c".into()));

        assert_eq!(env.get_text(".def_1"), Some("c"));
        let order: Vec<&str> = env.iter().map(|(n, _)| n).collect();
        assert_eq!(order, vec![".def_1", ".def_2"]);
    }

    #[test]
    fn test_descriptor_binding_has_no_text() {
        let mut env = BindingEnvironment::new();
        env.bind(".def_1", Bound::Op(Descriptor::SignExtend { bits: 32 }));
        assert!(env.get(".def_1").is_some());
        assert_eq!(env.get_text(".def_1"), None);
    }

    #[test]
    fn test_size_table_first_record_wins() {
        let mut sizes = SizeTable::new();
        sizes.record("foo", 32);
        sizes.record("foo", 64);
        assert_eq!(sizes.get("foo"), Some(32));
        assert_eq!(sizes.get("bar"), None);
    }
}
