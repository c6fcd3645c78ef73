use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::source::scan;

/// Label name (upper-case) to instruction address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelTable {
    map: BTreeMap<String, usize>,
}

impl LabelTable {
    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.map.get(&name.to_uppercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.map.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Labels ordered by address, then name.
    pub fn by_address(&self) -> Vec<(&str, usize)> {
        let mut v: Vec<_> = self.iter().collect();
        v.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
        v
    }

    fn define(&mut self, name: String, addr: usize) {
        if let Some(prev) = self.map.insert(name.clone(), addr) {
            warn!(label = %name, prev, addr, "label redefined; later definition wins");
        }
    }
}

/// First pass: bind every label to the address of the instruction it names.
///
/// The address counts instructions, not lines. Label-only lines bind to the
/// next instruction; a label sharing a line with an instruction binds to it.
pub fn resolve_labels(source: &str) -> LabelTable {
    let mut table = LabelTable::default();
    let mut addr = 0usize;
    for line in scan(source) {
        if let Some(name) = line.label.clone() {
            debug!(line = line.number, "label found: {name} -> address {addr}");
            table.define(name, addr);
        }
        if line.is_instruction() {
            addr += 1;
        }
    }
    table
}
