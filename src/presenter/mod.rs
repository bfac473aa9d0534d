pub mod state;
pub mod tracker;
pub(crate) mod updates;

pub use state::{PresenceState, format_elapsed};
pub use tracker::PresentationTracker;
