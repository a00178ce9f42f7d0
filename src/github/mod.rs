pub mod attributes;
pub mod code_search;
pub mod renderer;
pub mod search_api;

pub use attributes::{AttributeFetcher, AttributeSource, HttpAttributeSource};
pub use code_search::{CodeSearchCrawler, FixedDelay, Pacer};
pub use renderer::{HttpRenderer, PageRenderer, RenderedPage};
pub use search_api::{HttpSearchFetch, SearchApiMiner, SearchFetch};
