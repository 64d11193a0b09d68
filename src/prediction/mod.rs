pub mod interface;
pub mod ranker;
