/// One named mining pass with its own output subfolder and report section.
#[derive(Debug, Clone)]
pub struct QueryGroup {
    pub name: String,
    /// Opaque query string embedded directly into request URLs.
    pub query: String,
    pub strategy: MiningStrategy,
}

impl QueryGroup {
    pub fn new(
        name: impl Into<String>,
        query: impl Into<String>,
        strategy: MiningStrategy,
    ) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
            strategy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningStrategy {
    /// Structured search API, paginated JSON.
    SearchApi,
    /// Logged-in code search, paginated HTML.
    CodeSearch,
}
