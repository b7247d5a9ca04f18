//! IO sample decoding.
//!
//! An IO sample starts with a 4-byte header (sample-set count, 16-bit
//! digital mask, 8-bit analog mask). A 16-bit digital state field follows
//! only when the digital mask is non-zero, then one big-endian 16-bit
//! reading per analog mask bit in ascending bit order. Analog bit 7 is the
//! module supply voltage and is kept apart from the per-line readings.
//!
//! Layering follows the other decoders of this workspace:
//! - `layout`: byte offsets and field widths
//! - `reader`: bounds-checked reads and the mask-driven length rule
//! - `parser`: decoding into an immutable [`IoSample`]
//! - `error`: decode and query errors

pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod reader;

pub use error::{QueryError, SampleError, ValueKind};
pub use model::IoSample;
pub use parser::{parse_io_sample, parse_optional_io_sample};
