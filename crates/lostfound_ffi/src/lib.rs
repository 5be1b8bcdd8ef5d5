//! Flutter-facing bindings for the lost-and-found core.

pub mod api;
