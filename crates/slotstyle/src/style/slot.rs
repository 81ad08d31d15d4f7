//! Per-slot style maps and their merge rules.
//!
//! A [`SlotStyle`] holds the plain properties of one slot plus any
//! state-selector partial styles. In YAML/JSON a selector is written as a
//! property whose key is the state name prefixed with [`SELECTOR_PREFIX`]:
//!
//! ```yaml
//! root:
//!   fg: white
//!   _active:
//!     fg: darkred
//! ```
//!
//! In memory selectors are keyed by the bare state name (`active`); the
//! prefix only exists at the serialization boundary.
//!
//! # Merging
//!
//! Merges are override-wins per property. A `None` (explicit undefined)
//! value in the override never erases a defined base value. Selector partial
//! styles merge one level deeper with the same rule.

use std::fmt;

use indexmap::map::{Entry, IndexMap};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::value::PropValue;

/// Reserved key prefix marking a state-selector entry.
pub const SELECTOR_PREFIX: char = '_';

/// An ordered map of style properties.
///
/// Values are `Option<PropValue>`: `None` is an explicit "undefined" that
/// contributes nothing at resolution time and never overwrites a base value
/// during a merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleProps(IndexMap<String, Option<PropValue>>);

impl StyleProps {
    /// Creates an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, returning `self` for chaining.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.0.insert(name.into(), Some(value.into()));
        self
    }

    /// Marks a property as explicitly undefined.
    pub fn unset(mut self, name: impl Into<String>) -> Self {
        self.0.insert(name.into(), None);
        self
    }

    /// Returns the defined value of a property.
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.0.get(name).and_then(Option::as_ref)
    }

    /// Returns true if the key is present, defined or not.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterates over all entries, including undefined ones.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&PropValue>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Iterates over defined entries only.
    pub fn defined(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v)))
    }

    /// Returns the number of entries, including undefined ones.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges `other` onto a copy of `self`; `other` wins per property.
    pub fn merge(&self, other: &StyleProps) -> StyleProps {
        let mut merged = self.clone();
        merged.merge_from(other);
        merged
    }

    pub(crate) fn merge_from(&mut self, other: &StyleProps) {
        for (name, value) in &other.0 {
            match value {
                Some(v) => {
                    self.0.insert(name.clone(), Some(v.clone()));
                }
                None => {
                    self.0.entry(name.clone()).or_insert(None);
                }
            }
        }
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for StyleProps {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        )
    }
}

/// The style of one slot: plain properties plus state selectors.
///
/// # Example
///
/// ```rust
/// use slotstyle::{SlotStyle, StyleProps};
///
/// let root = SlotStyle::new()
///     .set("fg", "red")
///     .on("active", StyleProps::new().set("fg", "darkred"));
///
/// assert_eq!(root.props().get("fg").and_then(|v| v.as_str()), Some("red"));
/// assert!(root.selector("active").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotStyle {
    props: StyleProps,
    selectors: IndexMap<String, StyleProps>,
}

impl SlotStyle {
    /// Creates an empty slot style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a plain property.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props = self.props.set(name, value);
        self
    }

    /// Marks a plain property as explicitly undefined.
    pub fn unset(mut self, name: impl Into<String>) -> Self {
        self.props = self.props.unset(name);
        self
    }

    /// Adds (or merges into) the selector style for a state key.
    pub fn on(mut self, state: impl Into<String>, style: StyleProps) -> Self {
        match self.selectors.entry(state.into()) {
            Entry::Occupied(mut e) => e.get_mut().merge_from(&style),
            Entry::Vacant(e) => {
                e.insert(style);
            }
        }
        self
    }

    /// Returns the plain properties.
    pub fn props(&self) -> &StyleProps {
        &self.props
    }

    /// Returns the selector style for a state key.
    pub fn selector(&self, state: &str) -> Option<&StyleProps> {
        self.selectors.get(state)
    }

    /// Iterates over selectors in declaration order.
    pub fn selectors(&self) -> impl Iterator<Item = (&str, &StyleProps)> {
        self.selectors.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if neither properties nor selectors are present.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty() && self.selectors.is_empty()
    }

    /// Merges `other` onto a copy of `self`.
    ///
    /// Plain properties merge override-wins; selectors merge per state key,
    /// shallow-merging the override's partial style onto the base's.
    pub fn merge(&self, other: &SlotStyle) -> SlotStyle {
        let mut merged = self.clone();
        merged.props.merge_from(&other.props);
        for (state, partial) in &other.selectors {
            match merged.selectors.entry(state.clone()) {
                Entry::Occupied(mut e) => e.get_mut().merge_from(partial),
                Entry::Vacant(e) => {
                    e.insert(partial.clone());
                }
            }
        }
        merged
    }
}

/// Per-slot style map: slot name → [`SlotStyle`].
///
/// This is the shape of `base`, of every variant value, of compound
/// variant payloads and of inline overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotStyles(IndexMap<String, SlotStyle>);

impl SlotStyles {
    /// Creates an empty slot map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a slot style, returning `self` for chaining.
    ///
    /// Adding the same slot twice merges the second onto the first.
    pub fn slot(mut self, name: impl Into<String>, style: SlotStyle) -> Self {
        match self.0.entry(name.into()) {
            Entry::Occupied(mut e) => {
                let merged = e.get().merge(&style);
                e.insert(merged);
            }
            Entry::Vacant(e) => {
                e.insert(style);
            }
        }
        self
    }

    /// Returns the style for a slot.
    pub fn get(&self, slot: &str) -> Option<&SlotStyle> {
        self.0.get(slot)
    }

    /// Iterates over slots in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SlotStyle)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the slot names in declaration order.
    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no slot is styled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deep-merges `other` onto a copy of `self`.
    ///
    /// A slot defined on one side only is taken as-is; a slot defined on
    /// both sides merges with [`SlotStyle::merge`].
    pub fn merge(&self, other: &SlotStyles) -> SlotStyles {
        let mut merged = self.clone();
        for (slot, style) in &other.0 {
            match merged.0.entry(slot.clone()) {
                Entry::Occupied(mut e) => {
                    let combined = e.get().merge(style);
                    e.insert(combined);
                }
                Entry::Vacant(e) => {
                    e.insert(style.clone());
                }
            }
        }
        merged
    }
}

impl<K: Into<String>> FromIterator<(K, SlotStyle)> for SlotStyles {
    fn from_iter<I: IntoIterator<Item = (K, SlotStyle)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(SlotStyles::new(), |acc, (k, v)| acc.slot(k, v))
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for StyleProps {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StyleProps {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropsVisitor;

        impl<'de> Visitor<'de> for PropsVisitor {
            type Value = StyleProps;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of style properties")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut props = IndexMap::new();
                while let Some(key) = access.next_key::<String>()? {
                    if key.starts_with(SELECTOR_PREFIX) {
                        return Err(de::Error::custom(format!(
                            "selector '{}' cannot be nested inside another selector",
                            key
                        )));
                    }
                    let value = access.next_value::<Option<PropValue>>()?;
                    props.insert(key, value);
                }
                Ok(StyleProps(props))
            }
        }

        deserializer.deserialize_map(PropsVisitor)
    }
}

impl Serialize for SlotStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.props.len() + self.selectors.len()))?;
        for (name, value) in &self.props.0 {
            map.serialize_entry(name, value)?;
        }
        for (state, partial) in &self.selectors {
            map.serialize_entry(&format!("{}{}", SELECTOR_PREFIX, state), partial)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SlotStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SlotVisitor;

        impl<'de> Visitor<'de> for SlotVisitor {
            type Value = SlotStyle;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of style properties and state selectors")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut style = SlotStyle::new();
                while let Some(key) = access.next_key::<String>()? {
                    match key.strip_prefix(SELECTOR_PREFIX) {
                        Some("") => {
                            return Err(de::Error::custom(
                                "selector key must name a state after the prefix",
                            ));
                        }
                        Some(state) => {
                            let partial = access.next_value::<StyleProps>()?;
                            style = style.on(state, partial);
                        }
                        None => {
                            let value = access.next_value::<Option<PropValue>>()?;
                            style.props.0.insert(key, value);
                        }
                    }
                }
                Ok(style)
            }
        }

        deserializer.deserialize_map(SlotVisitor)
    }
}

impl Serialize for SlotStyles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SlotStyles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IndexMap::<String, SlotStyle>::deserialize(deserializer).map(SlotStyles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fg(style: &SlotStyle) -> Option<&str> {
        style.props().get("fg").and_then(PropValue::as_str)
    }

    // =========================================================================
    // StyleProps
    // =========================================================================

    #[test]
    fn test_props_merge_override_wins() {
        let base = StyleProps::new().set("fg", "white").set("bold", true);
        let over = StyleProps::new().set("fg", "red");
        let merged = base.merge(&over);

        assert_eq!(merged.get("fg"), Some(&PropValue::from("red")));
        assert_eq!(merged.get("bold"), Some(&PropValue::Bool(true)));
    }

    #[test]
    fn test_props_undefined_never_erases() {
        let base = StyleProps::new().set("fg", "white");
        let over = StyleProps::new().unset("fg").unset("bg");
        let merged = base.merge(&over);

        assert_eq!(merged.get("fg"), Some(&PropValue::from("white")));
        assert!(merged.contains("bg"));
        assert_eq!(merged.get("bg"), None);
    }

    #[test]
    fn test_props_defined_skips_undefined() {
        let props = StyleProps::new().set("fg", "red").unset("bg");
        let defined: Vec<_> = props.defined().map(|(k, _)| k).collect();
        assert_eq!(defined, vec!["fg"]);
        assert_eq!(props.len(), 2);
    }

    // =========================================================================
    // SlotStyle
    // =========================================================================

    #[test]
    fn test_slot_merge_selectors_one_level_deeper() {
        let base = SlotStyle::new()
            .set("fg", "white")
            .on("active", StyleProps::new().set("fg", "gray").set("bold", true));
        let over = SlotStyle::new().on("active", StyleProps::new().set("fg", "black"));

        let merged = base.merge(&over);
        let active = merged.selector("active").unwrap();

        assert_eq!(fg(&merged), Some("white"));
        assert_eq!(active.get("fg"), Some(&PropValue::from("black")));
        assert_eq!(active.get("bold"), Some(&PropValue::Bool(true)));
    }

    #[test]
    fn test_slot_merge_selector_undefined_keeps_base() {
        let base = SlotStyle::new().on("focused", StyleProps::new().set("fg", "cyan"));
        let over = SlotStyle::new().on("focused", StyleProps::new().unset("fg"));

        let merged = base.merge(&over);
        assert_eq!(
            merged.selector("focused").unwrap().get("fg"),
            Some(&PropValue::from("cyan"))
        );
    }

    #[test]
    fn test_slot_on_twice_merges() {
        let style = SlotStyle::new()
            .on("hovered", StyleProps::new().set("fg", "a").set("bg", "b"))
            .on("hovered", StyleProps::new().set("fg", "c"));

        let hovered = style.selector("hovered").unwrap();
        assert_eq!(hovered.get("fg"), Some(&PropValue::from("c")));
        assert_eq!(hovered.get("bg"), Some(&PropValue::from("b")));
    }

    // =========================================================================
    // SlotStyles
    // =========================================================================

    #[test]
    fn test_slots_merge_one_sided_slots_pass_through() {
        let base = SlotStyles::new().slot("root", SlotStyle::new().set("fg", "white"));
        let over = SlotStyles::new().slot("label", SlotStyle::new().set("bold", true));

        let merged = base.merge(&over);
        let names: Vec<_> = merged.slot_names().collect();
        assert_eq!(names, vec!["root", "label"]);
        assert_eq!(fg(merged.get("root").unwrap()), Some("white"));
    }

    #[test]
    fn test_slots_merge_both_sides() {
        let base = SlotStyles::new().slot("root", SlotStyle::new().set("fg", "white").set("bg", "black"));
        let over = SlotStyles::new().slot("root", SlotStyle::new().set("fg", "red"));

        let root = base.merge(&over).get("root").cloned().unwrap();
        assert_eq!(fg(&root), Some("red"));
        assert_eq!(root.props().get("bg"), Some(&PropValue::from("black")));
    }

    // =========================================================================
    // Serde
    // =========================================================================

    #[test]
    fn test_deserialize_selector_prefix() {
        let styles: SlotStyles = serde_yaml::from_str(
            r#"
            root:
              fg: red
              padding: 1
              _active:
                fg: darkred
            "#,
        )
        .unwrap();

        let root = styles.get("root").unwrap();
        assert_eq!(fg(root), Some("red"));
        assert_eq!(root.props().get("padding"), Some(&PropValue::Int(1)));
        assert_eq!(
            root.selector("active").unwrap().get("fg"),
            Some(&PropValue::from("darkred"))
        );
    }

    #[test]
    fn test_deserialize_null_is_undefined() {
        let style: SlotStyle = serde_json::from_str(r#"{"fg": null}"#).unwrap();
        assert!(style.props().contains("fg"));
        assert_eq!(style.props().get("fg"), None);
    }

    #[test]
    fn test_deserialize_rejects_nested_selector() {
        let result: Result<SlotStyle, _> =
            serde_json::from_str(r#"{"_active": {"_focused": {"fg": "red"}}}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("cannot be nested"));
    }

    #[test]
    fn test_deserialize_rejects_bare_prefix() {
        let result: Result<SlotStyle, _> = serde_json::from_str(r#"{"_": {"fg": "red"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_restores_prefix() {
        let style = SlotStyle::new()
            .set("fg", "red")
            .on("active", StyleProps::new().set("fg", "darkred"));
        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"fg": "red", "_active": {"fg": "darkred"}})
        );
    }
}
