pub mod codec;
pub mod format;

pub use codec::*;
pub use format::*;
