//! Integration tests for the scrape, analyze and render pipeline
//!
//! These tests build a small mirrored site on disk and run it through the
//! whole pipeline end-to-end.

mod pipeline_tests;
