//! # Slotstyle - Slot-Based Variant Styling for Terminal Components
//!
//! `slotstyle` turns declarative styling intent into concrete per-slot style
//! maps for terminal UI components. A component kind declares its named parts
//! ("slots") and the interaction states it understands; authors describe how
//! those slots look by default, per variant value, for combinations of
//! variants and per active state; the engine resolves all of it, every frame,
//! into flat property maps the rendering layer can draw.
//!
//! ## Core Concepts
//!
//! - [`ComponentMeta`]: slots and state keys of a component kind
//! - [`StyledConfig`]: author intent (`base`, `variants`, `compoundVariants`, `defaultVariants`)
//! - [`styled`](styled()): binds a config to a component, composing when wrapping a definition
//! - [`StyledDefinition::resolve`]: live state + variant selections + inline override → [`ResolvedSlotStyles`]
//! - [`split_props`](split_props()): separates variant props from forwarded props
//!
//! ## Quick Start
//!
//! ```rust
//! use slotstyle::{catalog, styled, State, StyledConfig, VariantSelections};
//!
//! let config = StyledConfig::from_yaml(r#"
//! base:
//!   root: { fg: white }
//! variants:
//!   intent:
//!     danger:
//!       root:
//!         fg: red
//!         _focused: { fg: darkred }
//! defaultVariants:
//!   intent: danger
//! "#).unwrap();
//!
//! let checkbox = styled(&catalog::checkbox(), config).unwrap();
//!
//! let focused = checkbox.resolve(&State::new().with("focused", true), &VariantSelections::new(), None);
//! assert_eq!(focused.to_string(), "root { fg: darkred }");
//!
//! let idle = checkbox.resolve(&State::new(), &VariantSelections::new(), None);
//! assert_eq!(idle.to_string(), "root { fg: red }");
//!
//! let unknown = checkbox.resolve(&State::new(), &VariantSelections::new().with("intent", "nonexistent"), None);
//! assert_eq!(unknown.to_string(), "root { fg: white }");
//! ```
//!
//! ## Layer Order
//!
//! Resolution writes four layers into one accumulator, later layers winning
//! property by property:
//!
//! 1. `base`
//! 2. variants (explicit selection, else default, else skipped)
//! 3. every matching compound variant, in list order
//! 4. the inline override
//!
//! Within each layer, state selectors (`_focused`, `_checked`) apply after
//! plain properties, in the component's declared state order.
//!
//! ## Composition
//!
//! ```rust
//! use slotstyle::{catalog, styled, SlotStyle, SlotStyles, StyledConfig};
//!
//! let badge = styled(&catalog::badge(), StyledConfig::new()
//!     .with_base(SlotStyles::new().slot("root", SlotStyle::new().set("bold", true))))
//!     .unwrap();
//! let alert = styled(&badge, StyledConfig::new()
//!     .with_base(SlotStyles::new().slot("root", SlotStyle::new().set("fg", "red"))))
//!     .unwrap();
//!
//! assert_eq!(alert.depth(), 2);
//! ```
//!
//! ## File-Based Configs
//!
//! [`ConfigRegistry`] loads named configs from directories of `.yaml`,
//! `.yml` and `.json` files, see [`config`].
//!
//! ## Logging
//!
//! The crate emits `tracing` events (definition builds at `debug`, config
//! findings at `warn`, ignored selections at `trace`) and installs no
//! subscriber.

// Internal modules
pub mod catalog;
pub mod config;
mod error;
pub mod meta;
mod resolve;
pub mod style;
mod styled;

// Error types
pub use error::{ConfigError, StyledError};

// Style exports
pub use style::{
    PropValue, ResolvedSlotStyles, ResolvedStyle, SlotStyle, SlotStyles, StyleProps,
    SELECTOR_PREFIX,
};

// Config exports
pub use config::{
    merge, normalize, CompoundVariant, ConfigRegistry, ProcessedConfig, StyledConfig,
    VariantTable, VariantValues, CONFIG_EXTENSIONS,
};

// Metadata exports
pub use meta::{Component, ComponentMeta, ComponentMetaBuilder, ConfigWarning, StyleShape, Styleable};

// Resolution and factory
pub use resolve::{resolve, State, VariantSelections};
pub use styled::{split_props, styled, SplitProps, StyledDefinition};
