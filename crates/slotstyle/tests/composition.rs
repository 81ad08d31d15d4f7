//! Styling already-styled definitions, and failures at setup time.

use slotstyle::{
    catalog, styled, Component, CompoundVariant, ComponentMeta, PropValue, SlotStyle, SlotStyles,
    State, StyleShape, Styleable, StyledConfig, StyledError, VariantSelections,
};

fn root(style: SlotStyle) -> SlotStyles {
    SlotStyles::new().slot("root", style)
}

#[test]
fn test_unstyled_component_fails() {
    let result = styled(&Component::new("divider"), StyledConfig::new());
    let err = result.unwrap_err();
    assert!(matches!(err, StyledError::MissingMetadata { ref component } if component == "divider"));
    assert!(err.to_string().contains("divider"));
}

#[test]
fn test_custom_component_can_be_styled() {
    let meta = ComponentMeta::builder("meter")
        .slot("track", StyleShape::Box)
        .slot("fill", StyleShape::Box)
        .state("busy")
        .build();
    let component = Component::with_meta(meta);
    assert_eq!(component.component_name(), "meter");

    let definition = styled(
        &component,
        StyledConfig::new().with_base(SlotStyles::new().slot("fill", SlotStyle::new().set("bg", "green"))),
    )
    .unwrap();
    assert_eq!(definition.config().state_keys(), ["busy"]);
}

#[test]
fn test_composition_depth_grows_per_wrap() {
    let mut definition = styled(&catalog::text(), StyledConfig::new()).unwrap();
    for expected in 2..=5 {
        definition = styled(&definition, StyledConfig::new()).unwrap();
        assert_eq!(definition.depth(), expected);
    }
}

#[test]
fn test_composition_merges_every_field() {
    let inner = styled(
        &catalog::badge(),
        StyledConfig::new()
            .with_base(root(SlotStyle::new().set("fg", "white")))
            .with_variant("tone", "info", root(SlotStyle::new().set("fg", "blue")))
            .with_compound(
                CompoundVariant::new()
                    .when("tone", "info")
                    .with_styles(root(SlotStyle::new().set("bold", true))),
            )
            .with_default_variant("tone", "info"),
    )
    .unwrap();

    let outer = styled(
        &inner,
        StyledConfig::new()
            .with_variant("tone", "info", root(SlotStyle::new().set("fg", "cyan")))
            .with_compound(
                CompoundVariant::new()
                    .when("tone", "info")
                    .with_styles(root(SlotStyle::new().set("bold", false))),
            ),
    )
    .unwrap();

    assert_eq!(outer.source().compound_variants.as_ref().map(Vec::len), Some(2));

    let resolved = outer.resolve(&State::new(), &VariantSelections::new(), None);
    assert_eq!(resolved.get("root", "fg"), Some(&PropValue::from("cyan")));
    // Outer compound is appended last.
    assert_eq!(resolved.get("root", "bold"), Some(&PropValue::Bool(false)));
}

#[test]
fn test_composition_adds_variants_to_prior_definition() {
    let inner = styled(
        &catalog::badge(),
        StyledConfig::new().with_variant("size", "sm", root(SlotStyle::new().set("padding", 0))),
    )
    .unwrap();
    let outer = styled(
        &inner,
        StyledConfig::new().with_variant("tone", "muted", root(SlotStyle::new().set("dim", true))),
    )
    .unwrap();

    let names: Vec<_> = outer.variant_names().iter().map(String::as_str).collect();
    assert_eq!(names, vec!["size", "tone"]);
    assert!(!inner.variant_names().contains("tone"));
}

#[test]
fn test_definition_reports_its_meta() {
    let definition = styled(&catalog::toast(), StyledConfig::new()).unwrap();
    let meta = definition.component_meta().unwrap();
    assert_eq!(meta.name(), "toast");
    assert!(definition.as_styled().is_some());
    assert!(catalog::toast().as_styled().is_none());
}
