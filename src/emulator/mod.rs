pub mod driver;
#[allow(clippy::module_inception)]
pub mod emulator;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod instruction;
pub mod key_latch;
pub mod memory;
pub mod output;
pub mod quirks;
pub mod render;

pub use self::driver::{Config, Driver};
pub use self::emulator::{Emulator, Flow};
pub use self::error::{Error, Result};
