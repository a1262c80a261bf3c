// Extractors that turn the parsed CNBC page into tabular rows.
//
// Both degrade to empty results when the expected markup is absent.

pub mod market;
pub mod news;

pub use market::{extract_market, Alignment, MarketCounts, MarketExtraction, MarketRow};
pub use news::{extract_news, resolve_link, NewsRow};
