//! Edge case and property tests for the full pipeline.
