//! Prompt module for LLM-based operations.
//!
//! This module provides prompt templates for the grounded paper search.

pub mod paper_search;

pub use paper_search::*;
