// A response body kept verbatim next to its typed view.

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A monitoring body as the backend sent it, plus a typed view of it.
///
/// Serializes as the raw body, so keys the view does not model survive a
/// round trip. Derefs to the view for typed access.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload<T> {
    raw: Value,
    view: T,
}

impl<T> Payload<T> {
    pub fn new(raw: Value, view: T) -> Self {
        Self { raw, view }
    }

    /// The body exactly as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    pub fn into_view(self) -> T {
        self.view
    }
}

impl<T: DeserializeOwned + Default> Payload<T> {
    /// Decode the view leniently. A body that is not the expected shape at
    /// all yields the default view; `raw` is kept either way.
    pub fn from_raw(raw: Value) -> Self {
        let view = T::deserialize(&raw).unwrap_or_default();
        Self { raw, view }
    }
}

impl<T: Serialize> Payload<T> {
    /// Wrap a locally built value. The raw form is its own serialization.
    pub fn from_view(view: T) -> Self {
        let raw = serde_json::to_value(&view).unwrap_or(Value::Null);
        Self { raw, view }
    }
}

impl<T> Deref for Payload<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.view
    }
}

impl<T> Serialize for Payload<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}
