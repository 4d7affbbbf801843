pub mod aggregator;
pub mod archive;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod markup;
pub mod menu;
pub mod normalize;
pub mod page_parser;
pub mod pipeline;
pub mod sync;
pub mod types;
