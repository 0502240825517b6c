//! Shared test utilities for integration tests

#![allow(dead_code)]

use dashfilter::{parser, AttributeRef, Dashboard, Filter};

/// Load a test fixture from the tests/test_data directory
pub fn load_fixture(name: &str) -> Dashboard {
    let path = format!("tests/test_data/{}", name);
    parser::parse_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// Members filter on `dimension.column` selecting a single value
pub fn member(guid: &str, attribute: &str, value: &str) -> Filter {
    let attribute: AttributeRef = attribute
        .parse()
        .unwrap_or_else(|e| panic!("Bad attribute in test: {}", e));
    Filter::members(guid, attribute, vec![value.to_string()])
}

/// Guids of a filter list, in order
pub fn guids(filters: &[Filter]) -> Vec<&str> {
    filters.iter().map(|f| f.guid.as_str()).collect()
}

/// Leaf guids of an optional tree, sorted
pub fn sorted_leaves(tree: Option<&dashfilter::RelationNode>) -> Vec<String> {
    let mut leaves: Vec<String> = tree
        .map(|t| t.leaves().into_iter().map(|g| g.to_string()).collect())
        .unwrap_or_default();
    leaves.sort();
    leaves
}

/// Small deterministic generator for operation sequences
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Lcg(seed)
    }

    pub fn below(&mut self, n: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % n.max(1)
    }
}
