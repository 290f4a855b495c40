//! HTTP scrape session
//!
//! Adapter implementing the [`ScrapeSession`](scout_application::ScrapeSession)
//! and [`SessionFactory`](scout_application::SessionFactory) ports on top of
//! `reqwest`, with a `governor` rate limiter shared by every source of a run.

mod extractor;
mod http_session;

pub use extractor::SubdomainExtractor;
pub use http_session::{HttpSession, HttpSessionFactory, USER_AGENT};
