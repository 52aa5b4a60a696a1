pub mod build_info;
pub mod compute;

pub use build_info::*;
pub use compute::*;
