//! Unit tests for the composed operation surface.

mod read_tests;
mod support;
