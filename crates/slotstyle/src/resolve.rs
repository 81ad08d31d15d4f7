//! Style resolution: processed config + live inputs → flat per-slot styles.
//!
//! Four layers are written into one accumulator, in this order:
//!
//! 1. `base`
//! 2. variants, in declaration order, using the explicit selection, else the
//!    default, else nothing
//! 3. every matching compound variant, in list order
//! 4. the inline override
//!
//! Within a layer, a slot's plain properties are written first, then the
//! selector styles of each active state in the component's declared state
//! order. Later writes win property by property, never slot-wise.
//!
//! Resolution is total: unknown variant names, unknown values and absent
//! state keys contribute nothing.

use indexmap::IndexMap;

use crate::config::ProcessedConfig;
use crate::style::{ResolvedSlotStyles, ResolvedStyle, SlotStyles, StyleProps};

/// Interaction state for one resolution: state key → active.
///
/// Keys not present are inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State(IndexMap<String, bool>);

impl State {
    /// Creates a state with every key inactive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a key, builder style.
    pub fn with(mut self, key: impl Into<String>, active: bool) -> Self {
        self.set(key, active);
        self
    }

    /// Sets a key in place.
    pub fn set(&mut self, key: impl Into<String>, active: bool) {
        self.0.insert(key.into(), active);
    }

    /// Returns true if the key is present and `true`.
    pub fn is_active(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for State {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Explicit variant choices for one resolution: variant name → value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSelections(IndexMap<String, String>);

impl VariantSelections {
    /// Creates an empty selection; every variant uses its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a value, builder style.
    pub fn with(mut self, variant: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(variant.into(), value.into());
        self
    }

    /// Returns the selected value of a variant.
    pub fn get(&self, variant: &str) -> Option<&str> {
        self.0.get(variant).map(String::as_str)
    }

    /// Iterates over selections in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of selections.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariantSelections {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Resolves a processed config against live inputs.
///
/// Never fails and never mutates its inputs; each call returns a fresh map.
///
/// # Example
///
/// ```rust
/// use slotstyle::{normalize, resolve, SlotStyle, SlotStyles, State, StyleProps, StyledConfig, VariantSelections};
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
///     .with_default_variant("intent", "danger");
/// let processed = normalize(&config, &["active".to_string()]);
///
/// let pressed = resolve(&processed, &State::new().with("active", true), &VariantSelections::new(), None);
/// assert_eq!(pressed.get("root", "fg").and_then(|v| v.as_str()), Some("darkred"));
///
/// let idle = resolve(&processed, &State::new(), &VariantSelections::new(), None);
/// assert_eq!(idle.get("root", "fg").and_then(|v| v.as_str()), Some("red"));
/// ```
pub fn resolve(
    config: &ProcessedConfig,
    state: &State,
    selections: &VariantSelections,
    inline: Option<&SlotStyles>,
) -> ResolvedSlotStyles {
    let mut acc = ResolvedSlotStyles::default();
    let state_keys = config.state_keys();

    apply_layer(&mut acc, config.base(), state, state_keys);

    let mut effective: IndexMap<&str, &str> = IndexMap::new();
    for (name, values) in config.variants() {
        let selected = selections
            .get(name)
            .or_else(|| config.default_variants().get(name).map(String::as_str));
        let Some(value) = selected else {
            continue;
        };
        effective.insert(name.as_str(), value);

        match values.get(value) {
            Some(styles) => apply_layer(&mut acc, styles, state, state_keys),
            None => tracing::trace!(variant = %name, value, "variant value not declared"),
        }
    }

    for (name, _) in selections.iter() {
        if !config.is_variant(name) {
            tracing::trace!(variant = name, "selection names an undeclared variant");
        }
    }

    for compound in config.compound_variants() {
        if compound.matches(&effective) {
            apply_layer(&mut acc, &compound.styles, state, state_keys);
        }
    }

    if let Some(inline) = inline {
        apply_layer(&mut acc, inline, state, state_keys);
    }

    acc
}

/// Flattens one layer onto the accumulator.
fn apply_layer(acc: &mut ResolvedSlotStyles, styles: &SlotStyles, state: &State, state_keys: &[String]) {
    for (slot, style) in styles.iter() {
        let target = acc.slot_mut(slot);
        write_props(target, style.props());

        for key in state_keys {
            if !state.is_active(key) {
                continue;
            }
            if let Some(partial) = style.selector(key) {
                write_props(target, partial);
            }
        }
    }
}

fn write_props(target: &mut ResolvedStyle, props: &StyleProps) {
    for (name, value) in props.defined() {
        target.write(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{normalize, CompoundVariant, StyledConfig};
    use crate::style::{PropValue, SlotStyle};

    fn root(style: SlotStyle) -> SlotStyles {
        SlotStyles::new().slot("root", style)
    }

    fn fg<'a>(resolved: &'a ResolvedSlotStyles, slot: &str) -> Option<&'a str> {
        resolved.get(slot, "fg").and_then(PropValue::as_str)
    }

    fn button() -> ProcessedConfig {
        let config = StyledConfig::new()
            .with_base(root(SlotStyle::new().set("fg", "white")))
            .with_variant(
                "intent",
                "danger",
                root(
                    SlotStyle::new()
                        .set("fg", "red")
                        .on("active", StyleProps::new().set("fg", "darkred")),
                ),
            )
            .with_default_variant("intent", "danger");
        normalize(&config, &["active".to_string()])
    }

    // =========================================================================
    // Layering
    // =========================================================================

    #[test]
    fn test_resolve_active_state_applies_selector() {
        let resolved = resolve(
            &button(),
            &State::new().with("active", true),
            &VariantSelections::new(),
            None,
        );
        assert_eq!(fg(&resolved, "root"), Some("darkred"));
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn test_resolve_default_variant_without_state() {
        let resolved = resolve(&button(), &State::new(), &VariantSelections::new(), None);
        assert_eq!(fg(&resolved, "root"), Some("red"));
    }

    #[test]
    fn test_resolve_unknown_value_falls_through_to_base() {
        let resolved = resolve(
            &button(),
            &State::new(),
            &VariantSelections::new().with("intent", "nonexistent"),
            None,
        );
        assert_eq!(fg(&resolved, "root"), Some("white"));
    }

    #[test]
    fn test_resolve_unknown_variant_is_ignored() {
        let resolved = resolve(
            &button(),
            &State::new(),
            &VariantSelections::new().with("tone", "loud"),
            None,
        );
        assert_eq!(fg(&resolved, "root"), Some("red"));
    }

    #[test]
    fn test_resolve_variant_without_selection_or_default_is_skipped() {
        let config = StyledConfig::new()
            .with_base(root(SlotStyle::new().set("fg", "white")))
            .with_variant("size", "sm", root(SlotStyle::new().set("fg", "gray")));
        let resolved = resolve(&normalize(&config, &[]), &State::new(), &VariantSelections::new(), None);
        assert_eq!(fg(&resolved, "root"), Some("white"));
    }

    #[test]
    fn test_resolve_merges_property_wise_not_slot_wise() {
        let config = StyledConfig::new()
            .with_base(root(SlotStyle::new().set("fg", "white").set("padding", 1)))
            .with_variant("intent", "danger", root(SlotStyle::new().set("fg", "red")))
            .with_default_variant("intent", "danger");
        let resolved = resolve(&normalize(&config, &[]), &State::new(), &VariantSelections::new(), None);

        assert_eq!(fg(&resolved, "root"), Some("red"));
        assert_eq!(resolved.get("root", "padding"), Some(&PropValue::Int(1)));
    }

    #[test]
    fn test_resolve_undefined_never_erases() {
        let config = StyledConfig::new()
            .with_base(root(SlotStyle::new().set("fg", "white")))
            .with_variant("intent", "quiet", root(SlotStyle::new().unset("fg")))
            .with_default_variant("intent", "quiet");
        let resolved = resolve(&normalize(&config, &[]), &State::new(), &VariantSelections::new(), None);
        assert_eq!(fg(&resolved, "root"), Some("white"));
    }

    #[test]
    fn test_resolve_inline_wins() {
        let inline = root(SlotStyle::new().set("fg", "cyan"));
        let resolved = resolve(
            &button(),
            &State::new().with("active", true),
            &VariantSelections::new(),
            Some(&inline),
        );
        assert_eq!(fg(&resolved, "root"), Some("cyan"));
    }

    #[test]
    fn test_resolve_inline_selector_is_gated() {
        let inline = root(SlotStyle::new().on("active", StyleProps::new().set("bold", true)));
        let idle = resolve(&button(), &State::new(), &VariantSelections::new(), Some(&inline));
        assert_eq!(idle.get("root", "bold"), None);

        let active = resolve(
            &button(),
            &State::new().with("active", true),
            &VariantSelections::new(),
            Some(&inline),
        );
        assert_eq!(active.get("root", "bold"), Some(&PropValue::Bool(true)));
    }

    #[test]
    fn test_resolve_includes_touched_empty_slot() {
        let config = StyledConfig::new().with_base(SlotStyles::new().slot("label", SlotStyle::new()));
        let resolved = resolve(&normalize(&config, &[]), &State::new(), &VariantSelections::new(), None);
        assert_eq!(resolved.slot("label").map(|s| s.is_empty()), Some(true));
    }

    // =========================================================================
    // States
    // =========================================================================

    #[test]
    fn test_resolve_later_declared_state_wins() {
        let config = StyledConfig::new().with_base(root(
            SlotStyle::new()
                .on("focused", StyleProps::new().set("fg", "blue"))
                .on("checked", StyleProps::new().set("fg", "green")),
        ));
        let state = State::new().with("checked", true).with("focused", true);

        let checked_last = normalize(&config, &["focused".to_string(), "checked".to_string()]);
        let resolved = resolve(&checked_last, &state, &VariantSelections::new(), None);
        assert_eq!(fg(&resolved, "root"), Some("green"));

        let focused_last = normalize(&config, &["checked".to_string(), "focused".to_string()]);
        let resolved = resolve(&focused_last, &state, &VariantSelections::new(), None);
        assert_eq!(fg(&resolved, "root"), Some("blue"));
    }

    #[test]
    fn test_resolve_undeclared_state_never_applies() {
        let config = StyledConfig::new().with_base(root(
            SlotStyle::new().on("hovered", StyleProps::new().set("fg", "yellow")),
        ));
        let resolved = resolve(
            &normalize(&config, &["active".to_string()]),
            &State::new().with("hovered", true),
            &VariantSelections::new(),
            None,
        );
        assert_eq!(fg(&resolved, "root"), None);
    }

    #[test]
    fn test_resolve_false_state_is_inactive() {
        let resolved = resolve(
            &button(),
            &State::new().with("active", false),
            &VariantSelections::new(),
            None,
        );
        assert_eq!(fg(&resolved, "root"), Some("red"));
    }

    // =========================================================================
    // Compound variants
    // =========================================================================

    fn sized() -> StyledConfig {
        StyledConfig::new()
            .with_variant("intent", "danger", SlotStyles::new())
            .with_variant("size", "sm", SlotStyles::new())
            .with_variant("size", "lg", SlotStyles::new())
            .with_default_variant("size", "sm")
    }

    #[test]
    fn test_resolve_all_matching_compounds_apply() {
        let config = sized()
            .with_compound(
                CompoundVariant::new()
                    .when("intent", "danger")
                    .with_styles(root(SlotStyle::new().set("fg", "red").set("bold", true))),
            )
            .with_compound(
                CompoundVariant::new()
                    .when("size", "sm")
                    .with_styles(root(SlotStyle::new().set("fg", "orange"))),
            );
        let resolved = resolve(
            &normalize(&config, &[]),
            &State::new(),
            &VariantSelections::new().with("intent", "danger"),
            None,
        );

        assert_eq!(fg(&resolved, "root"), Some("orange"));
        assert_eq!(resolved.get("root", "bold"), Some(&PropValue::Bool(true)));
    }

    #[test]
    fn test_resolve_compound_uses_defaults() {
        let config = sized().with_compound(
            CompoundVariant::new()
                .when("intent", "danger")
                .when("size", "sm")
                .with_styles(root(SlotStyle::new().set("dim", true))),
        );
        let processed = normalize(&config, &[]);

        let small = resolve(
            &processed,
            &State::new(),
            &VariantSelections::new().with("intent", "danger"),
            None,
        );
        assert_eq!(small.get("root", "dim"), Some(&PropValue::Bool(true)));

        let large = resolve(
            &processed,
            &State::new(),
            &VariantSelections::new().with("intent", "danger").with("size", "lg"),
            None,
        );
        assert_eq!(large.get("root", "dim"), None);
    }

    #[test]
    fn test_resolve_compound_without_conditions_never_applies() {
        let config = sized().with_compound(
            CompoundVariant::new().with_styles(root(SlotStyle::new().set("fg", "magenta"))),
        );
        let resolved = resolve(&normalize(&config, &[]), &State::new(), &VariantSelections::new(), None);
        assert_eq!(fg(&resolved, "root"), None);
    }

    #[test]
    fn test_resolve_compound_ignores_undeclared_variant_selection() {
        let config = sized().with_compound(
            CompoundVariant::new()
                .when("tone", "loud")
                .with_styles(root(SlotStyle::new().set("fg", "magenta"))),
        );
        let resolved = resolve(
            &normalize(&config, &[]),
            &State::new(),
            &VariantSelections::new().with("tone", "loud"),
            None,
        );
        assert_eq!(fg(&resolved, "root"), None);
    }

    #[test]
    fn test_resolve_compound_beats_variant() {
        let config = StyledConfig::new()
            .with_variant("intent", "danger", root(SlotStyle::new().set("fg", "red")))
            .with_compound(
                CompoundVariant::new()
                    .when("intent", "danger")
                    .with_styles(root(SlotStyle::new().set("fg", "crimson"))),
            );
        let resolved = resolve(
            &normalize(&config, &[]),
            &State::new(),
            &VariantSelections::new().with("intent", "danger"),
            None,
        );
        assert_eq!(fg(&resolved, "root"), Some("crimson"));
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    #[test]
    fn test_state_from_iter() {
        let state: State = [("checked", true), ("focused", false)].into_iter().collect();
        assert!(state.is_active("checked"));
        assert!(!state.is_active("focused"));
        assert!(!state.is_active("hovered"));
    }

    #[test]
    fn test_selections_from_iter() {
        let selections: VariantSelections = [("size", "sm")].into_iter().collect();
        assert_eq!(selections.get("size"), Some("sm"));
        assert_eq!(selections.len(), 1);
        assert!(VariantSelections::new().is_empty());
    }
}
