//! Auralis application layer
//!
//! [`AppCoordinator`] is the single owner of the library and the active
//! selection. Front ends talk to it and pump playback notifications through
//! it; the playback engine never touches the library directly.

mod coordinator;
mod insight_view;
mod settings;

pub use coordinator::AppCoordinator;
pub use insight_view::{InsightTicket, InsightView};
pub use settings::{engine_from_config, CoordinatorSettings};
