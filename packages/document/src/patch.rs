//! # Merge Patches
//!
//! Partial updates are JSON objects whose keys are shallow-merged into the
//! serialized target, which is then deserialized back into the same type.
//!
//! - Keys the target type does not know are dropped on the way back.
//! - `null` clears an optional field.
//! - A patch that does not type-check leaves the target untouched.

use crate::PatchError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A partial object merged into content, style, theme or item values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch(Map<String, Value>);

impl Patch {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a patch from a JSON value; `None` unless it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Map<String, Value>> for Patch {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Shallow-merge `patch` into `target`, returning the merged copy
pub fn merge_patch<T>(target: &T, patch: &Patch) -> Result<T, PatchError>
where
    T: Serialize + DeserializeOwned,
{
    let mut object = match serde_json::to_value(target)? {
        Value::Object(map) => map,
        _ => return Err(PatchError::NotAnObject),
    };

    for (key, value) in &patch.0 {
        object.insert(key.clone(), value.clone());
    }

    Ok(serde_json::from_value(Value::Object(object))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Card {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_src: Option<String>,
    }

    #[test]
    fn test_merge_overwrites_known_keys() {
        let card = Card { title: "Old".to_string(), image_src: None };
        let patch = Patch::new().set("title", "New").set("imageSrc", "a.png");

        let merged = merge_patch(&card, &patch).unwrap();
        assert_eq!(merged.title, "New");
        assert_eq!(merged.image_src.as_deref(), Some("a.png"));
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let card = Card { title: "Same".to_string(), image_src: None };
        let patch = Patch::new().set("price", "R$ 10");

        let merged = merge_patch(&card, &patch).unwrap();
        assert_eq!(merged, card);
    }

    #[test]
    fn test_null_clears_optional_field() {
        let card = Card { title: "T".to_string(), image_src: Some("x".to_string()) };
        let patch = Patch::from_value(json!({ "imageSrc": null })).unwrap();

        let merged = merge_patch(&card, &patch).unwrap();
        assert_eq!(merged.image_src, None);
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let card = Card { title: "T".to_string(), image_src: None };
        let patch = Patch::new().set("title", 42);

        assert!(matches!(merge_patch(&card, &patch), Err(PatchError::TypeMismatch(_))));
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(Patch::from_value(json!([1, 2])).is_none());
        assert!(Patch::from_value(json!({})).unwrap().is_empty());
    }
}
