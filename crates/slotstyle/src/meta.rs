//! Component metadata: the slots and states a component kind exposes.
//!
//! Every styleable component kind declares, once, which named parts
//! ("slots") it draws and which boolean interaction states it recognizes
//! for selector styling. The metadata is immutable and shared by `Arc`
//! across every styled definition of that kind.
//!
//! ```rust
//! use slotstyle::{ComponentMeta, StyleShape};
//!
//! let meta = ComponentMeta::builder("checkbox")
//!     .slot("root", StyleShape::Box)
//!     .slot("indicator", StyleShape::Text)
//!     .slot("label", StyleShape::Text)
//!     .state("checked")
//!     .state("focused")
//!     .build();
//!
//! assert_eq!(meta.state_keys(), ["checked", "focused"]);
//! assert!(meta.has_slot("indicator"));
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::config::{StyledConfig, STYLES_KEY};
use crate::style::{SlotStyles, SELECTOR_PREFIX};
use crate::styled::StyledDefinition;

/// The style shape a slot accepts.
///
/// This documents which property names the rendering layer recognizes for a
/// slot. The engine itself never rejects other names; [`ComponentMeta::check`]
/// only reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleShape {
    /// A rectangular container: colors, borders, spacing and sizing.
    Box,
    /// A run of text: colors and text attributes.
    Text,
}

const TEXT_PROPERTIES: &[&str] = &[
    "fg",
    "bg",
    "bold",
    "dim",
    "italic",
    "underline",
    "strikethrough",
    "reverse",
    "align",
    "wrap",
];

const BOX_PROPERTIES: &[&str] = &[
    "fg",
    "bg",
    "bold",
    "dim",
    "italic",
    "underline",
    "strikethrough",
    "reverse",
    "align",
    "wrap",
    "border",
    "borderColor",
    "padding",
    "paddingX",
    "paddingY",
    "margin",
    "marginX",
    "marginY",
    "width",
    "height",
    "minWidth",
    "maxWidth",
    "minHeight",
    "maxHeight",
    "gap",
    "direction",
    "justify",
    "visible",
    "opacity",
];

impl StyleShape {
    /// Returns the property names this shape recognizes.
    pub fn properties(self) -> &'static [&'static str] {
        match self {
            StyleShape::Box => BOX_PROPERTIES,
            StyleShape::Text => TEXT_PROPERTIES,
        }
    }

    /// Returns true if the property name is recognized.
    pub fn recognizes(self, property: &str) -> bool {
        self.properties().contains(&property)
    }
}

/// Static description of one component kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMeta {
    name: String,
    slots: IndexMap<String, StyleShape>,
    state_keys: Vec<String>,
}

impl ComponentMeta {
    /// Starts building metadata for a component kind.
    pub fn builder(name: impl Into<String>) -> ComponentMetaBuilder {
        ComponentMetaBuilder {
            name: name.into(),
            slots: IndexMap::new(),
            state_keys: Vec::new(),
        }
    }

    /// Returns the component kind name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterates over slot names in declaration order.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Returns the style shape of a slot.
    pub fn slot_shape(&self, slot: &str) -> Option<StyleShape> {
        self.slots.get(slot).copied()
    }

    /// Returns true if the slot is declared.
    pub fn has_slot(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }

    /// Returns the recognized state keys in declaration order.
    ///
    /// Order matters at resolution time: when two active states set the
    /// same property, the later-declared one wins.
    pub fn state_keys(&self) -> &[String] {
        &self.state_keys
    }

    /// Reports config entries this component does not declare or recognize.
    ///
    /// Never fails: the engine stays total over structurally valid configs,
    /// so these are advisory only.
    pub fn check(&self, config: &StyledConfig) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if let Some(base) = &config.base {
            self.check_styles(base, "base", &mut warnings);
        }
        if let Some(variants) = &config.variants {
            for (name, values) in variants {
                push_reserved(name, &mut warnings);
                if self.has_slot(name) {
                    warnings.push(ConfigWarning::VariantShadowsSlot {
                        variant: name.clone(),
                    });
                }
                for (value, styles) in values {
                    self.check_styles(styles, &format!("variants.{}.{}", name, value), &mut warnings);
                }
            }
        }
        if let Some(compounds) = &config.compound_variants {
            for (i, compound) in compounds.iter().enumerate() {
                for name in compound.conditions.keys() {
                    push_reserved(name, &mut warnings);
                }
                self.check_styles(
                    &compound.styles,
                    &format!("compoundVariants[{}]", i),
                    &mut warnings,
                );
            }
        }

        warnings
    }

    fn check_styles(&self, styles: &SlotStyles, layer: &str, warnings: &mut Vec<ConfigWarning>) {
        for (slot, style) in styles.iter() {
            let Some(shape) = self.slot_shape(slot) else {
                warnings.push(ConfigWarning::UnknownSlot {
                    layer: layer.to_string(),
                    slot: slot.to_string(),
                });
                continue;
            };

            let selector_props = style.selectors().flat_map(|(_, partial)| partial.iter());
            for (property, _) in style.props().iter().chain(selector_props) {
                if !shape.recognizes(property) {
                    warnings.push(ConfigWarning::UnrecognizedProperty {
                        layer: layer.to_string(),
                        slot: slot.to_string(),
                        property: property.to_string(),
                    });
                }
            }

            for (state, _) in style.selectors() {
                if !self.state_keys.iter().any(|k| k == state) {
                    warnings.push(ConfigWarning::UnknownState {
                        layer: layer.to_string(),
                        slot: slot.to_string(),
                        state: state.to_string(),
                    });
                }
            }
        }
    }
}

/// Variant names that collide with config syntax: the compound `styles` key
/// and the selector prefix.
fn is_reserved_variant_name(name: &str) -> bool {
    name == STYLES_KEY || name.starts_with(SELECTOR_PREFIX)
}

fn push_reserved(name: &str, warnings: &mut Vec<ConfigWarning>) {
    if !is_reserved_variant_name(name) {
        return;
    }
    let warning = ConfigWarning::ReservedVariantName {
        variant: name.to_string(),
    };
    if !warnings.contains(&warning) {
        warnings.push(warning);
    }
}

/// Builder for [`ComponentMeta`].
#[derive(Debug)]
pub struct ComponentMetaBuilder {
    name: String,
    slots: IndexMap<String, StyleShape>,
    state_keys: Vec<String>,
}

impl ComponentMetaBuilder {
    /// Declares a slot. Re-declaring a slot replaces its shape and keeps
    /// its original position.
    pub fn slot(mut self, name: impl Into<String>, shape: StyleShape) -> Self {
        self.slots.insert(name.into(), shape);
        self
    }

    /// Declares a state key. Duplicates are ignored.
    pub fn state(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !self.state_keys.contains(&key) {
            self.state_keys.push(key);
        }
        self
    }

    /// Finishes the metadata, ready to be shared.
    pub fn build(self) -> Arc<ComponentMeta> {
        Arc::new(ComponentMeta {
            name: self.name,
            slots: self.slots,
            state_keys: self.state_keys,
        })
    }
}

/// An advisory finding from [`ComponentMeta::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A layer styles a slot the component does not declare.
    UnknownSlot { layer: String, slot: String },
    /// A property is not in the slot's [`StyleShape`].
    UnrecognizedProperty {
        layer: String,
        slot: String,
        property: String,
    },
    /// A selector names a state the component does not declare; it can
    /// never apply.
    UnknownState {
        layer: String,
        slot: String,
        state: String,
    },
    /// A variant name equals a slot name, which makes prop bags ambiguous.
    VariantShadowsSlot { variant: String },
    /// A variant name is `styles` or starts with `_`; configs using it
    /// cannot round-trip through YAML or JSON.
    ReservedVariantName { variant: String },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::UnknownSlot { layer, slot } => {
                write!(f, "{}: slot '{}' is not declared by the component", layer, slot)
            }
            ConfigWarning::UnrecognizedProperty {
                layer,
                slot,
                property,
            } => write!(
                f,
                "{}: property '{}' is not recognized on slot '{}'",
                layer, property, slot
            ),
            ConfigWarning::UnknownState { layer, slot, state } => write!(
                f,
                "{}: selector '{}' on slot '{}' names an undeclared state",
                layer, state, slot
            ),
            ConfigWarning::VariantShadowsSlot { variant } => {
                write!(f, "variant '{}' has the same name as a slot", variant)
            }
            ConfigWarning::ReservedVariantName { variant } => {
                write!(f, "variant name '{}' is reserved", variant)
            }
        }
    }
}

/// Anything that can be passed to [`styled`](crate::styled()).
///
/// Implementors report their component metadata, and whether they are
/// themselves a styled definition (which triggers composition).
pub trait Styleable {
    /// Name used in diagnostics.
    fn component_name(&self) -> &str;

    /// The metadata of the underlying component kind, if declared.
    fn component_meta(&self) -> Option<Arc<ComponentMeta>>;

    /// The prior definition when styling an already-styled component.
    fn as_styled(&self) -> Option<&StyledDefinition> {
        None
    }
}

impl Styleable for Arc<ComponentMeta> {
    fn component_name(&self) -> &str {
        self.name()
    }

    fn component_meta(&self) -> Option<Arc<ComponentMeta>> {
        Some(Arc::clone(self))
    }
}

/// A renderable component as seen by the framework adapters.
///
/// Components without metadata can exist (plain layout helpers, third-party
/// leaves) but cannot be styled.
#[derive(Debug, Clone)]
pub struct Component {
    name: String,
    meta: Option<Arc<ComponentMeta>>,
}

impl Component {
    /// Creates a component that declares no style metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meta: None,
        }
    }

    /// Creates a component carrying the given metadata.
    pub fn with_meta(meta: Arc<ComponentMeta>) -> Self {
        Self {
            name: meta.name().to_string(),
            meta: Some(meta),
        }
    }

    /// Returns the component name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Styleable for Component {
    fn component_name(&self) -> &str {
        &self.name
    }

    fn component_meta(&self) -> Option<Arc<ComponentMeta>> {
        self.meta.clone()
    }
}
