use anyhow::Result;
use std::collections::HashMap;

use super::KeyValue;

/// Non-durable substrate for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryKv {
    entries: HashMap<String, String>,
}

impl MemoryKv {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
