//! Scraping vocabulary: what sources produce and how they describe themselves.

pub mod result;
pub mod source_info;
