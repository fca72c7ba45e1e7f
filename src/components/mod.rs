//! UI components.

pub mod signal_graph;
