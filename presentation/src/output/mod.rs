//! Result output

pub mod console;
pub mod formatter;
pub mod writer;
