//! Plugin Matter Bridge library.
//!
//! Exposes devices provided by plugins as bridged Matter endpoints: resolves
//! the clusters each device type needs, maps attribute access onto typed
//! cluster state, and intercepts inbound cluster commands so the plugin's
//! handler sees them before the local state machines run.

pub mod config;
pub mod error;
pub mod matter;
