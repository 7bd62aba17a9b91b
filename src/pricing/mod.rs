// src/pricing/mod.rs
pub mod catalog;
pub mod quote;
pub mod selection;

pub use catalog::{Metric, Metrics, Package, SubscriberBracket};
pub use quote::{quote, QuoteVideo, VideoQuote};
pub use selection::{QuoteSession, QuoteSummary, SubscriberAddon, VideoSelection};
