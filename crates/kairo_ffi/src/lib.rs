//! Flutter-facing bindings over `kairo_core`.

pub mod api;
