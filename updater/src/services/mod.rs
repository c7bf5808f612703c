pub mod feed_fetcher;
pub mod feed_parser;
pub mod rate_updater;
pub mod scheduler;
