// Job search pipeline: fan out to every board, score against keywords, threshold and rank.
// Board adapters live in `crate::sources`; nothing here talks HTTP directly.

pub mod aggregator;
pub mod handlers;
pub mod ranking;
pub mod scoring;
