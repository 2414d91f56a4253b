//! Scalar wrapper types that give `Value` a total order and a stable text form.

mod blob;
mod float64;
mod timestamp;

pub use blob::{Blob, BlobDecodeError};
pub(crate) use blob::encode_hex;
pub use float64::Float64;
pub use timestamp::{Timestamp, TimestampError};
