//! Identifier sources for registry entries and surfaces.

use std::cell::Cell;

/// Produces ids that are unique within the process.
///
/// Uniqueness only needs to hold in practice; ids are not security tokens.
pub trait IdSource {
    fn next_id(&self) -> String;
}

/// Random UUID v4 ids (the default).
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-N` ids, counting from 1.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Cell::new(1),
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.get();
        self.next.set(n + 1);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_ids_do_not_repeat() {
        let source = UuidSource;
        let ids: HashSet<String> = (0..256).map(|_| source.next_id()).collect();
        assert_eq!(ids.len(), 256);
    }

    #[test]
    fn sequential_ids_count_up() {
        let source = SequentialIds::new("shape");
        assert_eq!(source.next_id(), "shape-1");
        assert_eq!(source.next_id(), "shape-2");
    }
}
