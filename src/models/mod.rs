pub mod channel;
pub mod api;
