//! Core library for wptools
//!
//! This crate implements the **Functional Core** of the wptools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! - **`wptools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`wptools`**: HTTP requests against the WordPress REST API and
//!   orchestration (the Imperative Shell)
//!
//! Every function in this crate is deterministic: raw WordPress payloads go
//! in, simplified records come out. Nothing here touches the network, the
//! environment, or the clock, so the whole crate is testable with fixture
//! data alone - no mocking required.
//!
//! # Module Organization
//!
//! - [`wordpress`]: Raw response shapes for the wp-json REST API, the
//!   simplified records returned to CLI and MCP callers, and the
//!   transformations between them (field normalization, truncation).

pub mod wordpress;
