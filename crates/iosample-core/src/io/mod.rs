//! Line and value vocabulary shared by the decoder and its consumers.

mod line;
mod value;

pub use line::IoLine;
pub use value::IoValue;
