//! The dashboard shell: a capability-trait registry of dashboards, the
//! serializable layout tree they emit, the interaction-loop view state,
//! and the TOML application config.
//!
//! Dashboards are registered explicitly in [`registry::DashboardRegistry::builtin`];
//! there is no runtime discovery. Each dashboard turns fetched market data
//! into a [`layout::Layout`] that an external rendering surface consumes
//! as JSON.

pub mod config;
pub mod dashboard;
pub mod dashboards;
pub mod descriptor;
pub mod layout;
pub mod registry;
pub mod view;
