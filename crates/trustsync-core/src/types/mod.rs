mod command;
mod platform;
mod store;

pub use command::*;
pub use platform::*;
pub use store::*;
