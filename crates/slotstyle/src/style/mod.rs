//! Style primitives: property values, per-slot style maps and resolved output.
//!
//! - [`PropValue`]: an opaque scalar property value
//! - [`StyleProps`]: ordered property map where `None` means "explicitly undefined"
//! - [`SlotStyle`]: plain properties plus state-selector partial styles
//! - [`SlotStyles`]: slot name → [`SlotStyle`]
//! - [`ResolvedSlotStyles`]: the flat output of resolution

mod resolved;
mod slot;
mod value;

pub use resolved::{ResolvedSlotStyles, ResolvedStyle};
pub use slot::{SlotStyle, SlotStyles, StyleProps, SELECTOR_PREFIX};
pub use value::PropValue;
