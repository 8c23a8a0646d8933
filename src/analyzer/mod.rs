// Analyzer module: offer ranking, basket totals and headline statistics.

pub mod basket;
pub mod ranking;
pub mod summary;

pub use basket::{compute_basket, BasketState};
pub use ranking::rank_offers;
pub use summary::{deal_badge, summarize, OfferSummary};
