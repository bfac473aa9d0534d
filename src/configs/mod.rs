pub mod base;
pub mod bot;
pub mod logging;

pub use base::*;
pub use bot::*;
pub use logging::*;
