pub mod handler;
pub mod messages;
pub mod ops;

pub use handler::AppState;
pub use messages::{Command, InboundEvent};
