use std::collections::HashMap;

use super::prelude::Value;

/// Index of a scope inside [`Environments`]. Closures hold on to these,
/// so records are never removed, only added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvId(pub usize);

pub const GLOBAL: EnvId = EnvId(0);

#[derive(Default, Debug, Clone, PartialEq)]
pub struct EnvRecord {
    pub parent: Option<EnvId>,
    pub store: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Environments {
    records: Vec<EnvRecord>,
}

impl Default for Environments {
    fn default() -> Self {
        Self::new()
    }
}

impl Environments {
    /// Starts with the global scope already in place.
    pub fn new() -> Self {
        Self {
            records: vec![EnvRecord::default()]
        }
    }

    pub fn global(&self) -> EnvId {
        GLOBAL
    }

    pub fn push(&mut self, parent: EnvId) -> EnvId {
        let id = EnvId(self.records.len());

        self.records.push(EnvRecord {
            parent: Some(parent),
            store: HashMap::new()
        });

        id
    }

    /// Defines in the given scope directly, shadowing any outer binding
    /// of the same name.
    pub fn define(&mut self, env: EnvId, name: String, value: Value) {
        self.records[env.0].store.insert(name, value);
    }

    /// Walks the parent chain and overwrites the nearest binding.
    /// Returns false when the name is not bound anywhere.
    pub fn assign(&mut self, env: EnvId, name: &str, value: Value) -> bool {
        let mut current = Some(env);

        while let Some(id) = current {
            let record = &mut self.records[id.0];

            if let Some(slot) = record.store.get_mut(name) {
                *slot = value;
                return true;
            }

            current = record.parent;
        }

        false
    }

    pub fn get(&self, env: EnvId, name: &str) -> Option<Value> {
        let mut current = Some(env);

        while let Some(id) = current {
            let record = &self.records[id.0];

            if let Some(value) = record.store.get(name) {
                return Some(value.clone());
            }

            current = record.parent;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadowing_and_assignment() {
        let mut envs = Environments::new();
        let global = envs.global();

        envs.define(global, "a".into(), Value::Number(1.0));

        let inner = envs.push(global);
        envs.define(inner, "a".into(), Value::Number(2.0));

        assert_eq!(envs.get(inner, "a"), Some(Value::Number(2.0)));
        assert_eq!(envs.get(global, "a"), Some(Value::Number(1.0)));

        // assignment without a local binding walks up to the global
        let other = envs.push(global);
        assert!(envs.assign(other, "a", Value::Number(3.0)));
        assert_eq!(envs.get(global, "a"), Some(Value::Number(3.0)));

        assert!(!envs.assign(other, "neznámá", Value::Null));
        assert_eq!(envs.get(other, "neznámá"), None);
    }
}
