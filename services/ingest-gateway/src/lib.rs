//! Ingestion Intake Gateway
//!
//! Accepts untyped external submissions (market data, user queries, news),
//! validates and normalizes them, assigns a durable reference identity, and
//! hands them off exactly once to the downstream pipeline queue under
//! backpressure and partial-failure conditions.
//!
//! # Architecture
//!
//! ```text
//!  POST /v1/ingest
//!        │
//!    ┌───▼────────┐
//!    │ Admission  │  ← backpressure, orchestration
//!    │   Gate     │
//!    └───┬────────┘
//!        │
//!   ┌────┴─────────────┐
//!   │                  │
//! ┌─▼─────────┐  ┌─────▼──────┐
//! │ Validator │  │ Reference  │
//! │           │  │ Allocator  │
//! └───────────┘  └────────────┘
//!        │
//!    ┌───▼────────┐
//!    │ Outbound   │  ← at-least-once collaborator
//!    │  Queue     │
//!    └────────────┘
//! ```
//!
//! The gate never reports `accepted: true` unless the publish to the
//! outbound queue genuinely succeeded.

pub mod allocator;
pub mod backpressure;
pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod health;
pub mod ledger;
pub mod metrics;
pub mod models;
pub mod queue;
pub mod router;
pub mod state;
pub mod validator;

// Service version
pub const SERVICE_VERSION: &str = "0.1.0";
