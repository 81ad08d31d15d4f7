//! The styled-definition factory.
//!
//! [`styled`] binds an author config to a component kind. Styling an
//! existing [`StyledDefinition`] composes: the new config is merged on top of
//! the prior author config, so the outermost call wins.
//!
//! ```rust
//! use slotstyle::{catalog, styled, SlotStyle, SlotStyles, State, StyledConfig, VariantSelections};
//!
//! let base = styled(
//!     &catalog::badge(),
//!     StyledConfig::new().with_base(SlotStyles::new().slot("root", SlotStyle::new().set("fg", "white"))),
//! )
//! .unwrap();
//! let alert = styled(
//!     &base,
//!     StyledConfig::new().with_base(SlotStyles::new().slot("root", SlotStyle::new().set("fg", "red"))),
//! )
//! .unwrap();
//!
//! assert_eq!(alert.depth(), 2);
//! let resolved = alert.resolve(&State::new(), &VariantSelections::new(), None);
//! assert_eq!(resolved.get("root", "fg").and_then(|v| v.as_str()), Some("red"));
//! ```

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::config::{merge, normalize, ProcessedConfig, StyledConfig};
use crate::error::StyledError;
use crate::meta::{ComponentMeta, Styleable};
use crate::resolve::{resolve, State, VariantSelections};
use crate::style::{PropValue, ResolvedSlotStyles, SlotStyles};

/// A component kind bound to a processed style config.
///
/// Immutable once built. Cheap to share: the metadata is behind an `Arc` and
/// resolution only borrows the config.
#[derive(Debug, Clone)]
pub struct StyledDefinition {
    meta: Arc<ComponentMeta>,
    config: ProcessedConfig,
    source: StyledConfig,
    depth: usize,
}

impl StyledDefinition {
    /// Returns the component metadata.
    pub fn meta(&self) -> &Arc<ComponentMeta> {
        &self.meta
    }

    /// Returns the processed config used for resolution.
    pub fn config(&self) -> &ProcessedConfig {
        &self.config
    }

    /// Returns the merged author config, before normalization.
    pub fn source(&self) -> &StyledConfig {
        &self.source
    }

    /// Returns the declared variant names.
    pub fn variant_names(&self) -> &IndexSet<String> {
        self.config.variant_names()
    }

    /// Number of `styled` calls that produced this definition.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Resolves styles for one render. See [`resolve`](crate::resolve()).
    pub fn resolve(
        &self,
        state: &State,
        selections: &VariantSelections,
        inline: Option<&SlotStyles>,
    ) -> ResolvedSlotStyles {
        resolve(&self.config, state, selections, inline)
    }

    /// Splits a prop bag into variant props and forward props.
    pub fn split_props<V, I>(&self, props: I) -> SplitProps<V>
    where
        I: IntoIterator<Item = (String, V)>,
    {
        split_props(props, self.config.variant_names())
    }
}

impl Styleable for StyledDefinition {
    fn component_name(&self) -> &str {
        self.meta.name()
    }

    fn component_meta(&self) -> Option<Arc<ComponentMeta>> {
        Some(Arc::clone(&self.meta))
    }

    fn as_styled(&self) -> Option<&StyledDefinition> {
        Some(self)
    }
}

/// Builds a styled definition for a component or an existing definition.
///
/// Config entries the component does not declare are reported through
/// `tracing` warnings and otherwise kept.
///
/// # Errors
///
/// Returns [`StyledError::MissingMetadata`] if the target declares no
/// component metadata.
pub fn styled<T>(target: &T, config: StyledConfig) -> Result<StyledDefinition, StyledError>
where
    T: Styleable + ?Sized,
{
    let meta = target
        .component_meta()
        .ok_or_else(|| StyledError::MissingMetadata {
            component: target.component_name().to_string(),
        })?;

    for warning in meta.check(&config) {
        tracing::warn!(component = meta.name(), "{}", warning);
    }

    let (source, depth) = match target.as_styled() {
        Some(prior) => (merge(&prior.source, &config), prior.depth + 1),
        None => (config, 1),
    };

    let processed = normalize(&source, meta.state_keys());
    tracing::debug!(
        component = meta.name(),
        depth,
        variants = processed.variant_names().len(),
        compounds = processed.compound_variants().len(),
        "styled definition built"
    );

    Ok(StyledDefinition {
        meta,
        config: processed,
        source,
        depth,
    })
}

/// A prop bag partitioned by variant-name membership.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitProps<V> {
    /// Props whose key is a declared variant name.
    pub variants: IndexMap<String, V>,
    /// Everything else, in original order.
    pub forward: IndexMap<String, V>,
}

impl<V> Default for SplitProps<V> {
    fn default() -> Self {
        Self {
            variants: IndexMap::new(),
            forward: IndexMap::new(),
        }
    }
}

impl SplitProps<PropValue> {
    /// Turns the variant props into selections.
    ///
    /// Booleans and numbers select their string form, so `disabled: true`
    /// selects the variant value `"true"`.
    pub fn selections(&self) -> VariantSelections {
        self.variants
            .iter()
            .map(|(name, value)| (name.as_str(), value.to_variant_key()))
            .collect()
    }
}

/// Partitions props into variant props and forward props.
///
/// Runs in time proportional to the number of props: each key is one set
/// lookup. Every key lands in exactly one partition.
///
/// # Example
///
/// ```rust
/// use indexmap::IndexSet;
/// use slotstyle::{split_props, PropValue};
///
/// let names: IndexSet<String> = ["size".to_string()].into_iter().collect();
/// let props = vec![
///     ("size".to_string(), PropValue::from("sm")),
///     ("title".to_string(), PropValue::from("Save")),
/// ];
///
/// let split = split_props(props, &names);
/// assert!(split.variants.contains_key("size"));
/// assert!(split.forward.contains_key("title"));
/// ```
pub fn split_props<V, I>(props: I, variant_names: &IndexSet<String>) -> SplitProps<V>
where
    I: IntoIterator<Item = (String, V)>,
{
    let mut split = SplitProps::default();
    for (key, value) in props {
        if variant_names.contains(&key) {
            split.variants.insert(key, value);
        } else {
            split.forward.insert(key, value);
        }
    }
    split
}
