#![deny(unsafe_op_in_unsafe_fn)]

/// Incremented on each incompatible change to the in-memory layout of [`SOption`]
pub const ABI: u32 = 0;

mod error;
mod nominal;
mod option;

pub use error::UnwrapOnNoneError;
pub use nominal::{is_option, UNIVERSAL_NOMINALITY};
pub use option::{zip, SOption};
