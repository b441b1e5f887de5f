use serde::{de::DeserializeOwned, Serialize};

/// Round-trips `value` through JSON into a plain `U`.
///
/// Platform responses carry transport metadata and loosely typed fields;
/// everything handed back to callers goes through here first.
pub fn normalize<T, U>(value: &T) -> Result<U, serde_json::Error>
where
    T: Serialize + ?Sized,
    U: DeserializeOwned,
{
    let json = serde_json::to_string(value)?;
    serde_json::from_str(&json)
}
