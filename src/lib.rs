//! # qlvalue
//!
//! The typed value layer of a CQL-compatible database:
//! - Value records: one tagged scalar or collection payload, or null
//! - Typed accessors with hard assertions on tag mismatch
//! - Client wire codec (big-endian, length-prefixed, nested collections)
//! - Ordering with SQL null semantics collapsed to `false`
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │          Parser / Executor / Virtual tables (callers)        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  DataType + typed values
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Value                                │
//! │        (tagged payload, accessors, collection append)        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │          │   Compare   │
//!   │ (wire I/O)  │          │ (ordering)  │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! Everything here is synchronous and single-owner; callers sharing a value
//! across threads provide their own synchronization.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod types;
pub mod value;
pub mod compare;
pub mod codec;
pub mod row;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{QlError, Result};
pub use config::Config;
pub use types::{DataType, Timestamp, ValueType};
pub use value::{MapValue, Payload, Value};
pub use codec::{ClientProtocol, WireCodec};
pub use row::{set_column_value, ColumnSchema, ColumnValue, Row, Schema};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of qlvalue
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
