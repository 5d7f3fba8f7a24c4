//! Test Module
//!
//! Cross-module test suite for the MindReader engine.
//!
//! ## Test Categories
//! - `heuristics_tests`: score clamping, reply repair, deception flags, crisis detection
//! - `orchestrator_tests`: `MindReader` pipeline against a scripted backend
//! - `integration_tests`: full workflow over HTTP against a mocked Gemini API

pub mod heuristics_tests;
pub mod integration_tests;
