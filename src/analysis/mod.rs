pub mod attributes_analyzer;

pub use attributes_analyzer::AttributesAnalyzer;
