//! Identifier sources
//!
//! Anything that mints new guids (synthesised filters, opened dashboard
//! instances) takes an `IdSource` from the caller.

use super::filter::FilterGuid;

pub trait IdSource {
    fn next_id(&mut self) -> FilterGuid;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> FilterGuid {
        FilterGuid(uuid::Uuid::new_v4().to_string())
    }
}

/// `prefix-1`, `prefix-2`, ... Deterministic, handy in tests
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: 1 }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> FilterGuid {
        let id = FilterGuid(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
