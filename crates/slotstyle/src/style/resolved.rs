//! Resolver output: flat, selector-free per-slot styles.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use super::value::PropValue;

/// The final properties of one slot.
///
/// Every value is concrete; selectors and undefined values never appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedStyle(IndexMap<String, PropValue>);

impl ResolvedStyle {
    /// Returns a property value.
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.0.get(name)
    }

    /// Iterates over properties in the order they were first set.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no property is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn write(&mut self, name: &str, value: &PropValue) {
        match self.0.get_mut(name) {
            Some(slot) => *slot = value.clone(),
            None => {
                self.0.insert(name.to_string(), value.clone());
            }
        }
    }
}

/// Resolved styles for every slot touched by any layer.
///
/// Produced fresh by each resolution call; the engine never caches it.
///
/// The `Display` form prints one slot per line:
///
/// ```text
/// root { fg: darkred; padding: 1 }
/// label { bold: true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedSlotStyles(IndexMap<String, ResolvedStyle>);

impl ResolvedSlotStyles {
    /// Returns the resolved style of a slot.
    pub fn slot(&self, name: &str) -> Option<&ResolvedStyle> {
        self.0.get(name)
    }

    /// Returns one property of one slot.
    pub fn get(&self, slot: &str, prop: &str) -> Option<&PropValue> {
        self.0.get(slot).and_then(|style| style.get(prop))
    }

    /// Iterates over slots in the order they were first touched.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedStyle)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no slot was touched.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the accumulator entry for a slot, creating it on first use.
    pub(crate) fn slot_mut(&mut self, name: &str) -> &mut ResolvedStyle {
        let index = match self.0.get_index_of(name) {
            Some(index) => index,
            None => {
                self.0
                    .insert_full(name.to_string(), ResolvedStyle::default())
                    .0
            }
        };
        &mut self.0[index]
    }
}

impl fmt::Display for ResolvedSlotStyles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (slot, style)) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} {{", slot)?;
            for (j, (name, value)) in style.0.iter().enumerate() {
                let sep = if j == 0 { " " } else { "; " };
                write!(f, "{}{}: {}", sep, name, value)?;
            }
            write!(f, " }}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ResolvedSlotStyles {
    type Item = (&'a String, &'a ResolvedStyle);
    type IntoIter = indexmap::map::Iter<'a, String, ResolvedStyle>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
