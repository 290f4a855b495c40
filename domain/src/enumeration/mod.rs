//! Enumeration run parameters: transport/deadline options and source selection.

pub mod options;
pub mod selection;
