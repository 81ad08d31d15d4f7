//! Normalization: author config → resolution-ready config.

use indexmap::{IndexMap, IndexSet};

use super::{CompoundVariant, StyledConfig, VariantTable};
use crate::style::SlotStyles;

/// A config with every field present, ready for the resolver.
///
/// Carries the owning component's state keys so resolution needs no second
/// lookup, and the set of variant names for O(1) prop classification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedConfig {
    pub(crate) base: SlotStyles,
    pub(crate) variants: VariantTable,
    pub(crate) compound_variants: Vec<CompoundVariant>,
    pub(crate) default_variants: IndexMap<String, String>,
    pub(crate) state_keys: Vec<String>,
    pub(crate) variant_names: IndexSet<String>,
}

impl ProcessedConfig {
    /// Returns the base layer.
    pub fn base(&self) -> &SlotStyles {
        &self.base
    }

    /// Returns the variant table.
    pub fn variants(&self) -> &VariantTable {
        &self.variants
    }

    /// Returns the compound variants in list order.
    pub fn compound_variants(&self) -> &[CompoundVariant] {
        &self.compound_variants
    }

    /// Returns the default variant selections.
    pub fn default_variants(&self) -> &IndexMap<String, String> {
        &self.default_variants
    }

    /// Returns the state keys copied from the component metadata.
    pub fn state_keys(&self) -> &[String] {
        &self.state_keys
    }

    /// Returns the set of declared variant names, in declaration order.
    pub fn variant_names(&self) -> &IndexSet<String> {
        &self.variant_names
    }

    /// Returns true if `name` is a declared variant.
    pub fn is_variant(&self, name: &str) -> bool {
        self.variant_names.contains(name)
    }

    /// Projects back to the author-facing shape, with every field present.
    ///
    /// Normalizing the projection yields an equal config.
    pub fn to_config(&self) -> StyledConfig {
        StyledConfig {
            base: Some(self.base.clone()),
            variants: Some(self.variants.clone()),
            compound_variants: Some(self.compound_variants.clone()),
            default_variants: Some(self.default_variants.clone()),
        }
    }
}

/// Normalizes an author config against a component's state keys.
///
/// Absent fields become their empty form. Variant-name and compound-variant
/// order is preserved. Pure and total: never fails, never mutates `config`.
///
/// # Example
///
/// ```rust
/// use slotstyle::{normalize, SlotStyles, StyledConfig};
///
/// let config = StyledConfig::new().with_variant("size", "sm", SlotStyles::new());
/// let processed = normalize(&config, &["focused".to_string()]);
///
/// assert!(processed.is_variant("size"));
/// assert!(processed.base().is_empty());
/// assert_eq!(processed.state_keys(), ["focused"]);
/// ```
pub fn normalize(config: &StyledConfig, state_keys: &[String]) -> ProcessedConfig {
    let variants = config.variants.clone().unwrap_or_default();
    let variant_names = variants.keys().cloned().collect();

    ProcessedConfig {
        base: config.base.clone().unwrap_or_default(),
        variants,
        compound_variants: config.compound_variants.clone().unwrap_or_default(),
        default_variants: config.default_variants.clone().unwrap_or_default(),
        state_keys: state_keys.to_vec(),
        variant_names,
    }
}
