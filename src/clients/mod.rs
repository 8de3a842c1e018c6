//! Outbound HTTP clients
//!
//! Gateways to the two external collaborators: the dealer backend (owner of
//! dealer and review records) and the sentiment service. Both degrade on
//! failure instead of propagating errors: the dealer client yields `None`
//! ("no data") and the sentiment client yields the neutral label.

pub mod dealer;
pub mod sentiment;

pub use dealer::{DealerApi, DealerClient};
pub use sentiment::{SentimentApi, SentimentClient};
