mod analysis_graph;

pub use analysis_graph::AnalysisGraph;
