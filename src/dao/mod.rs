mod crawler_db;

pub use crawler_db::{CrawledNode, CrawlerDb};

#[cfg(test)]
pub(crate) use crawler_db::tests;
