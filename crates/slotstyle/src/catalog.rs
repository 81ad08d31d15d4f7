//! Metadata for the built-in component kinds.
//!
//! Each kind is built once, on first access, and shared by `Arc` afterwards.
//!
//! | Kind | Slots | States |
//! |------|-------|--------|
//! | `box` | root | |
//! | `text` | root | |
//! | `checkbox` | root, indicator, label | checked, focused, disabled, hovered |
//! | `badge` | root, label | |
//! | `dialog` | overlay, content, title, body | open, focused |
//! | `toast` | root, title, description, action | entering, leaving, hovered |

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::meta::{ComponentMeta, StyleShape};

static BOX: Lazy<Arc<ComponentMeta>> =
    Lazy::new(|| ComponentMeta::builder("box").slot("root", StyleShape::Box).build());

static TEXT: Lazy<Arc<ComponentMeta>> =
    Lazy::new(|| ComponentMeta::builder("text").slot("root", StyleShape::Text).build());

static CHECKBOX: Lazy<Arc<ComponentMeta>> = Lazy::new(|| {
    ComponentMeta::builder("checkbox")
        .slot("root", StyleShape::Box)
        .slot("indicator", StyleShape::Text)
        .slot("label", StyleShape::Text)
        .state("checked")
        .state("focused")
        .state("disabled")
        .state("hovered")
        .build()
});

static BADGE: Lazy<Arc<ComponentMeta>> = Lazy::new(|| {
    ComponentMeta::builder("badge")
        .slot("root", StyleShape::Box)
        .slot("label", StyleShape::Text)
        .build()
});

static DIALOG: Lazy<Arc<ComponentMeta>> = Lazy::new(|| {
    ComponentMeta::builder("dialog")
        .slot("overlay", StyleShape::Box)
        .slot("content", StyleShape::Box)
        .slot("title", StyleShape::Text)
        .slot("body", StyleShape::Box)
        .state("open")
        .state("focused")
        .build()
});

static TOAST: Lazy<Arc<ComponentMeta>> = Lazy::new(|| {
    ComponentMeta::builder("toast")
        .slot("root", StyleShape::Box)
        .slot("title", StyleShape::Text)
        .slot("description", StyleShape::Text)
        .slot("action", StyleShape::Text)
        .state("entering")
        .state("leaving")
        .state("hovered")
        .build()
});

/// Names of all built-in kinds.
pub const KINDS: &[&str] = &["box", "text", "checkbox", "badge", "dialog", "toast"];

/// Plain container.
pub fn box_() -> Arc<ComponentMeta> {
    Arc::clone(&*BOX)
}

/// Text run.
pub fn text() -> Arc<ComponentMeta> {
    Arc::clone(&*TEXT)
}

/// Toggleable checkbox with a label.
pub fn checkbox() -> Arc<ComponentMeta> {
    Arc::clone(&*CHECKBOX)
}

/// Stateless badge.
pub fn badge() -> Arc<ComponentMeta> {
    Arc::clone(&*BADGE)
}

/// Modal dialog.
pub fn dialog() -> Arc<ComponentMeta> {
    Arc::clone(&*DIALOG)
}

/// Transient toast notification.
pub fn toast() -> Arc<ComponentMeta> {
    Arc::clone(&*TOAST)
}

/// Looks up a built-in kind by name.
pub fn lookup(name: &str) -> Option<Arc<ComponentMeta>> {
    match name {
        "box" => Some(box_()),
        "text" => Some(text()),
        "checkbox" => Some(checkbox()),
        "badge" => Some(badge()),
        "dialog" => Some(dialog()),
        "toast" => Some(toast()),
        _ => None,
    }
}
