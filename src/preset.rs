use std::collections::HashMap;

use parking_lot::RwLock;

use crate::catalog::ModuleKind;
use crate::selection::Snapshot;

/// Saved selection per module, one slot each under the module's fixed key.
/// Values are stored as flat JSON objects (`{"category": "value", ...}`).
#[derive(Debug, Default)]
pub struct PresetStore {
    slots: RwLock<HashMap<String, String>>,
}

impl PresetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the module's slot.
    pub fn save(&self, module: ModuleKind, snapshot: &Snapshot) -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(snapshot)?;
        self.slots.write().insert(module.preset_key().to_string(), json);
        tracing::info!("💾 Saved preset {} ({} fields)", module.preset_key(), snapshot.len());
        Ok(())
    }

    /// `Ok(None)` when nothing was saved for the module.
    pub fn load(&self, module: ModuleKind) -> Result<Option<Snapshot>, serde_json::Error> {
        let raw = self.slots.read().get(module.preset_key()).cloned();
        raw.map(|json| serde_json::from_str(&json)).transpose()
    }

    #[cfg(test)]
    pub fn raw(&self, module: ModuleKind) -> Option<String> {
        self.slots.read().get(module.preset_key()).cloned()
    }
}
