//! Reading and writing tabulated functions.
//!
//! - `text`: count line followed by `x y` lines
//! - `binary`: big-endian count and `f64` pairs
//! - `opaque`: serde_json encoding of the serde representation

pub mod binary;
pub mod opaque;
pub mod text;

pub use binary::{read_binary, write_binary};
pub use opaque::{deserialize, serialize};
pub use text::{read_text, write_text, DecimalSeparator};
