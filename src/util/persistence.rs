//! localStorage access for the two things this client persists: the
//! settings snapshot under `hypothesis-testing-config` and the optional
//! bearer token under `auth_token`.
//!
//! Browser storage exists only under `hydrate`; server renders see an
//! absent store and callers fall back to their defaults.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Read a stored string as-is (the bearer token is not JSON).
pub fn read_string(key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        local_storage()?.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Read and deserialize a stored JSON value. Missing keys, a denied store,
/// and corrupt JSON all come back as `None`.
pub fn read_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    read_string(key).and_then(|raw| serde_json::from_str(&raw).ok())
}

/// Serialize and store a JSON value. Best effort: a full or denied store
/// loses the write silently.
pub fn write_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        let _ = storage.set_item(key, &raw);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}
