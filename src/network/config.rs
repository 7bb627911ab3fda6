use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// key holding a replacement for the provider's symbol
pub const SYMBOL_KEY: &str = "symbol";

/// key holding text appended to the effective symbol
pub const SYMBOL_SUFFIX_KEY: &str = "symbol_suffix";

/// Options chosen for one generation run.
///
/// Produced by a provider's `configure` step and handed back, unchanged, to
/// every `generate` call of the run. An empty config means provider
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkConfig(Map<String, Value>);

impl NetworkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.0
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
    }

    /// Symbol recorded in each wallet and in the vault file name: the
    /// configured override or `default`, followed by any configured suffix.
    pub fn effective_symbol(&self, default: &str) -> String {
        let base = self
            .get_str(SYMBOL_KEY)
            .filter(|s| !s.is_empty())
            .unwrap_or(default);
        let suffix = self.get_str(SYMBOL_SUFFIX_KEY).unwrap_or_default();
        format!("{base}{suffix}")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}
