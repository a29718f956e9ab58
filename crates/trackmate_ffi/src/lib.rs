//! Flutter-facing bindings for the TrackMate core.

pub mod api;
