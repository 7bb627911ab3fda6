use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use zeroize::Zeroize;

/// keys every record carries, in serialization order
pub const CORE_KEYS: [&str; 5] = ["network", "address", "private_key", "mnemonic", "passphrase"];

/// One generated identity.
///
/// The core fields are always present. Providers may contribute extra flat
/// fields (`path`, `type`, `public_key`, ...) which are kept in insertion
/// order after the core fields and never replace them.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletRecord {
    pub network: String,
    pub address: String,
    pub private_key: String,
    pub mnemonic: String,
    #[serde(default)]
    pub passphrase: String,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl WalletRecord {
    pub fn new(
        network: impl Into<String>,
        address: impl Into<String>,
        private_key: impl Into<String>,
        mnemonic: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            network: network.into(),
            address: address.into(),
            private_key: private_key.into(),
            mnemonic: mnemonic.into(),
            passphrase: passphrase.into(),
            extra: Map::new(),
        }
    }

    /// Add a provider field.
    ///
    /// Returns `false`, leaving the record untouched, if `key` is a core key,
    /// is already present, or `value` is an array or object.
    pub fn merge_extra(&mut self, key: impl Into<String>, value: Value) -> bool {
        let key = key.into();
        if CORE_KEYS.contains(&key.as_str()) || self.extra.contains_key(&key) || !is_flat(&value)
        {
            return false;
        }
        self.extra.insert(key, value);
        true
    }

    /// builder form of [`Self::merge_extra`]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.merge_extra(key, value.into());
        self
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// true if no extra field holds nested structure
    pub fn is_flat(&self) -> bool {
        self.extra.values().all(is_flat)
    }

    /// all field names: core keys first, then extras in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        CORE_KEYS
            .iter()
            .copied()
            .chain(self.extra.keys().map(String::as_str))
    }

    /// Field value rendered as text, for tables and CSV. Strings are returned
    /// verbatim, other primitives in their JSON form, null as empty.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "network" => Some(self.network.clone()),
            "address" => Some(self.address.clone()),
            "private_key" => Some(self.private_key.clone()),
            "mnemonic" => Some(self.mnemonic.clone()),
            "passphrase" => Some(self.passphrase.clone()),
            other => self.extra.get(other).map(render_value),
        }
    }
}

fn is_flat(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// secrets are redacted
impl std::fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletRecord")
            .field("network", &self.network)
            .field("address", &self.address)
            .field("private_key", &"[REDACTED]")
            .field("mnemonic", &"[REDACTED]")
            .field("passphrase", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}

impl Drop for WalletRecord {
    fn drop(&mut self) {
        self.private_key.zeroize();
        self.mnemonic.zeroize();
        self.passphrase.zeroize();
    }
}

/// Ordered sequence of records produced by one generation run.
///
/// Order is generation order and survives a trip through a vault.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletBatch(Vec<WalletRecord>);

impl WalletBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: WalletRecord) {
        self.0.push(record);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&WalletRecord> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WalletRecord> {
        self.0.iter()
    }

    pub fn records(&self) -> &[WalletRecord] {
        &self.0
    }
}

impl From<Vec<WalletRecord>> for WalletBatch {
    fn from(records: Vec<WalletRecord>) -> Self {
        Self(records)
    }
}

impl FromIterator<WalletRecord> for WalletBatch {
    fn from_iter<I: IntoIterator<Item = WalletRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a WalletBatch {
    type Item = &'a WalletRecord;
    type IntoIter = std::slice::Iter<'a, WalletRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
