//! Property-based tests for the narrative converter.

mod narrative_props;
