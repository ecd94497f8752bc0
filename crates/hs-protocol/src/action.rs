use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One device-control call, in the shape the backend's intent endpoint
/// accepts: `{"name": "HassTurnOn", "data": {"area": "kitchen"}}`.
///
/// Only the structure is checked. Whether `name` is a real intent or
/// `data` names a real device is left to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionCommand {
    /// Intent name (e.g., "HassTurnOn").
    pub name: String,
    /// Intent slots. Missing in the payload means no slots.
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Any other top-level keys (e.g. `language`), forwarded unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActionCommand {
    pub fn new(name: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            data,
            extra: Map::new(),
        }
    }

    /// Best-effort label for the thing this command targets, for logs.
    pub fn target(&self) -> Option<&str> {
        ["name", "area", "device_class", "floor"]
            .iter()
            .find_map(|key| self.data.get(*key).and_then(Value::as_str))
    }
}
