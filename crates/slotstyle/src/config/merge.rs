//! Composition of two author configs.
//!
//! Used when a styled definition wraps another one: the wrapped definition's
//! author config is the base layer, the new config is the override.
//!
//! | Field | Rule |
//! |-------|------|
//! | `base` | per-slot deep merge, override wins per property |
//! | `variants` | by name, then by value; shared values slot-merge like `base` |
//! | `compoundVariants` | concatenation, base entries first |
//! | `defaultVariants` | shallow merge, override wins per name |
//!
//! Undefined values in the override never erase defined base values. Every
//! rule is override-wins per key or order-preserving concatenation, so
//! merging is associative as far as resolution can observe.

use indexmap::map::Entry;
use indexmap::IndexMap;

use super::{StyledConfig, VariantTable};

/// Merges `over` on top of `base`, returning a new author config.
///
/// A field absent on both sides stays absent.
///
/// # Example
///
/// ```rust
/// use slotstyle::{merge, SlotStyle, SlotStyles, StyledConfig};
///
/// let inner = StyledConfig::new()
///     .with_base(SlotStyles::new().slot("root", SlotStyle::new().set("fg", "white").set("bold", true)));
/// let outer = StyledConfig::new()
///     .with_base(SlotStyles::new().slot("root", SlotStyle::new().set("fg", "red")));
///
/// let merged = merge(&inner, &outer);
/// let root = merged.base.as_ref().and_then(|b| b.get("root")).unwrap();
/// assert_eq!(root.props().get("fg").and_then(|v| v.as_str()), Some("red"));
/// assert_eq!(root.props().get("bold").and_then(|v| v.as_bool()), Some(true));
/// ```
pub fn merge(base: &StyledConfig, over: &StyledConfig) -> StyledConfig {
    StyledConfig {
        base: merge_field(&base.base, &over.base, |b, o| b.merge(o)),
        variants: merge_field(&base.variants, &over.variants, merge_variants),
        compound_variants: merge_field(&base.compound_variants, &over.compound_variants, |b, o| {
            b.iter().chain(o.iter()).cloned().collect()
        }),
        default_variants: merge_field(&base.default_variants, &over.default_variants, |b, o| {
            let mut merged = b.clone();
            merged.extend(o.iter().map(|(k, v)| (k.clone(), v.clone())));
            merged
        }),
    }
}

fn merge_field<T: Clone>(base: &Option<T>, over: &Option<T>, combine: impl Fn(&T, &T) -> T) -> Option<T> {
    match (base, over) {
        (Some(b), Some(o)) => Some(combine(b, o)),
        (Some(b), None) => Some(b.clone()),
        (None, Some(o)) => Some(o.clone()),
        (None, None) => None,
    }
}

fn merge_variants(base: &VariantTable, over: &VariantTable) -> VariantTable {
    let mut merged: VariantTable = base.clone();
    for (name, over_values) in over {
        match merged.entry(name.clone()) {
            Entry::Occupied(mut e) => {
                let values: &mut IndexMap<_, _> = e.get_mut();
                for (value, styles) in over_values {
                    match values.entry(value.clone()) {
                        Entry::Occupied(mut v) => {
                            let combined = v.get().merge(styles);
                            v.insert(combined);
                        }
                        Entry::Vacant(v) => {
                            v.insert(styles.clone());
                        }
                    }
                }
            }
            Entry::Vacant(e) => {
                e.insert(over_values.clone());
            }
        }
    }
    merged
}
