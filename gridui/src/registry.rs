//! Control type registration.
//!
//! Hosts that render controls server-side provide a [`ControlRegistry`] so
//! the page can load each control type's client support once. Control types
//! are also collected statically through `inventory`.

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::PoisonError;

/// Static description of a control type.
#[derive(Debug)]
pub struct ControlType {
    /// Type name, as registered with the host.
    pub name: &'static str,
    /// Class applied to the root element of every instance.
    pub root_class: &'static str,
}

impl ControlType {
    pub const fn new(name: &'static str, root_class: &'static str) -> Self {
        Self { name, root_class }
    }
}

// Collect all control types
inventory::collect!(ControlType);

/// Get all control types linked into the binary.
pub fn registered_control_types() -> impl Iterator<Item = &'static ControlType> {
    inventory::iter::<ControlType>()
}

/// Look up a control type by name.
pub fn control_type(name: &str) -> Option<&'static ControlType> {
    registered_control_types().find(|t| t.name == name)
}

/// Host service receiving control type registrations.
pub trait ControlRegistry {
    /// Record that a control of type `name` is present on the page.
    fn register_type(&self, name: &str);
}

/// In-memory registry that records each type once.
#[derive(Debug, Default)]
pub struct ScriptManager {
    types: Mutex<BTreeSet<String>>,
}

impl ScriptManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered type names in sorted order.
    pub fn types(&self) -> Vec<String> {
        self.types
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.types
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }
}

impl ControlRegistry for ScriptManager {
    fn register_type(&self, name: &str) {
        let inserted = self
            .types
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string());
        if inserted {
            log::debug!("registered control type {name}");
        }
    }
}
