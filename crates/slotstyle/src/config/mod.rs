//! Author-facing style configuration, normalization and composition.
//!
//! A [`StyledConfig`] describes one layer of styling intent:
//!
//! ```yaml
//! base:
//!   root: { fg: white }
//! variants:
//!   intent:
//!     danger:
//!       root:
//!         fg: red
//!         _active: { fg: darkred }
//! compoundVariants:
//!   - intent: danger
//!     size: sm
//!     styles:
//!       root: { bold: true }
//! defaultVariants:
//!   intent: danger
//! ```
//!
//! Every field is optional. [`normalize`] fills absent fields with their
//! empty form and precomputes the variant-name set the resolver and the
//! prop splitter rely on. [`merge`] combines two author configs when one
//! styled definition wraps another.
//!
//! # Module Structure
//!
//! - [`normalize`](normalize()): author config → [`ProcessedConfig`]
//! - [`merge`](merge()): author config + override → author config
//! - `loader`: YAML/JSON/file parsing
//! - [`ConfigRegistry`]: named configs from inline text and directories

mod loader;
mod merge;
mod normalize;
mod registry;

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{self, SerializeMap};
use serde::{Deserialize, Serialize, Serializer};

use crate::style::{PropValue, SlotStyles};

pub use loader::CONFIG_EXTENSIONS;
pub use merge::merge;
pub use normalize::{normalize, ProcessedConfig};
pub use registry::ConfigRegistry;

/// Variant value → slot styles, for one variant name.
pub type VariantValues = IndexMap<String, SlotStyles>;

/// Variant name → [`VariantValues`], in declaration order.
pub type VariantTable = IndexMap<String, VariantValues>;

/// One layer of author styling intent.
///
/// # Example
///
/// ```rust
/// use slotstyle::{CompoundVariant, SlotStyle, SlotStyles, StyleProps, StyledConfig};
///
/// let config = StyledConfig::new()
///     .with_base(SlotStyles::new().slot("root", SlotStyle::new().set("fg", "white")))
///     .with_variant(
///         "intent",
///         "danger",
///         SlotStyles::new().slot(
///             "root",
///             SlotStyle::new()
///                 .set("fg", "red")
///                 .on("active", StyleProps::new().set("fg", "darkred")),
///         ),
///     )
///     .with_compound(
///         CompoundVariant::new()
///             .when("intent", "danger")
///             .when("size", "sm")
///             .with_styles(SlotStyles::new().slot("root", SlotStyle::new().set("bold", true))),
///     )
///     .with_default_variant("intent", "danger");
///
/// assert_eq!(config.variants.as_ref().map(|v| v.len()), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StyledConfig {
    /// Styles applied before any variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<SlotStyles>,

    /// Variant name → value → styles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<VariantTable>,

    /// Styles applied when several variant values hold at once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compound_variants: Option<Vec<CompoundVariant>>,

    /// Variant values assumed when no explicit selection is made.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_defaults"
    )]
    pub default_variants: Option<IndexMap<String, String>>,
}

impl StyledConfig {
    /// Creates a config with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base layer, merging onto any base already present.
    pub fn with_base(mut self, styles: SlotStyles) -> Self {
        self.base = Some(match self.base.take() {
            Some(existing) => existing.merge(&styles),
            None => styles,
        });
        self
    }

    /// Adds the styles for one variant value.
    ///
    /// Adding the same name/value twice merges the styles.
    pub fn with_variant(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        styles: SlotStyles,
    ) -> Self {
        let values = self
            .variants
            .get_or_insert_with(IndexMap::new)
            .entry(name.into())
            .or_default();
        let value = value.into();
        let merged = match values.get(&value) {
            Some(existing) => existing.merge(&styles),
            None => styles,
        };
        values.insert(value, merged);
        self
    }

    /// Appends a compound variant.
    pub fn with_compound(mut self, compound: CompoundVariant) -> Self {
        self.compound_variants
            .get_or_insert_with(Vec::new)
            .push(compound);
        self
    }

    /// Sets the default value for a variant.
    pub fn with_default_variant(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_variants
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Merges `other` on top of `self`. See [`merge`].
    pub fn merge(&self, other: &StyledConfig) -> StyledConfig {
        merge(self, other)
    }
}

// `disabled: true` in YAML selects the variant value "true".
fn deserialize_defaults<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<IndexMap<String, String>>, D::Error> {
    let raw = Option::<IndexMap<String, PropValue>>::deserialize(deserializer)?;
    Ok(raw.map(|defaults| {
        defaults
            .into_iter()
            .map(|(name, value)| (name, value.to_variant_key()))
            .collect()
    }))
}

/// Styles that apply only when every listed condition holds.
///
/// A compound variant with no conditions never matches.
///
/// In YAML/JSON every key except `styles` is a condition:
///
/// ```yaml
/// - intent: danger
///   size: sm
///   styles:
///     root: { bold: true }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundVariant {
    /// Required variant name → value pairs.
    pub conditions: IndexMap<String, String>,
    /// Styles applied when all conditions hold.
    pub styles: SlotStyles,
}

impl CompoundVariant {
    /// Creates a compound variant with no conditions and no styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required condition.
    pub fn when(mut self, variant: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.insert(variant.into(), value.into());
        self
    }

    /// Sets the styles payload.
    pub fn with_styles(mut self, styles: SlotStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Returns true if every condition holds in `effective`.
    ///
    /// `effective` maps variant names to the values in effect for one
    /// resolution. An entry without conditions never matches.
    pub fn matches(&self, effective: &IndexMap<&str, &str>) -> bool {
        !self.conditions.is_empty()
            && self
                .conditions
                .iter()
                .all(|(name, value)| effective.get(name.as_str()) == Some(&value.as_str()))
    }
}

/// Key holding a compound entry's styles; cannot double as a variant name.
pub(crate) const STYLES_KEY: &str = "styles";

impl Serialize for CompoundVariant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.conditions.contains_key(STYLES_KEY) {
            return Err(ser::Error::custom(format!(
                "compound condition cannot use the reserved key '{}'",
                STYLES_KEY
            )));
        }
        let mut map = serializer.serialize_map(Some(self.conditions.len() + 1))?;
        for (name, value) in &self.conditions {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(STYLES_KEY, &self.styles)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for CompoundVariant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CompoundVisitor;

        impl<'de> Visitor<'de> for CompoundVisitor {
            type Value = CompoundVariant;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of variant conditions plus 'styles'")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut compound = CompoundVariant::new();
                let mut styles = None;
                while let Some(key) = access.next_key::<String>()? {
                    if key == STYLES_KEY {
                        if styles.is_some() {
                            return Err(de::Error::duplicate_field(STYLES_KEY));
                        }
                        styles = Some(access.next_value::<SlotStyles>()?);
                    } else {
                        // Boolean and numeric conditions select the stringified value.
                        let value = access.next_value::<PropValue>()?;
                        compound.conditions.insert(key, value.to_variant_key());
                    }
                }
                compound.styles = styles.unwrap_or_default();
                Ok(compound)
            }
        }

        deserializer.deserialize_map(CompoundVisitor)
    }
}
