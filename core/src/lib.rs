mod actuator;
mod alert;
mod plant;
mod sample;
mod status;
mod threshold;

pub use actuator::*;
pub use alert::*;
pub use plant::*;
pub use sample::*;
pub use status::*;
pub use threshold::*;

pub static CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
