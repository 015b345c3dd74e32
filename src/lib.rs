//! # devreport - device provisioning report parsing
//!
//! devreport parses pipe-delimited device provisioning files
//! (header/record/trailer lines) into a validated [`DeviceReport`] and
//! renders it as pretty-printed JSON or XML.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Raw bytes  │────▶│  Classifier │────▶│  Assembler  │────▶│   Renderer  │
//! │ (auto-enc)  │     │ (per line)  │     │ (per file)  │     │ (JSON/XML)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Data flows one way: raw text to classified lines to an assembled report to
//! a rendered string. Every stage is a pure function of its input; a report
//! can be re-rendered in another format without re-parsing.
//!
//! ## Quick Start
//!
//! ```rust
//! use devreport::{assemble, render, OutputFormat};
//!
//! let report = assemble("H|SRV1\nR|111|222|SN1|DevA\nT|1").unwrap();
//! assert_eq!(report.record_count, 1);
//!
//! let json = render(&report, OutputFormat::Json).unwrap();
//! assert!(json.contains("\"serverId\": \"SRV1\""));
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Layered error types
//! - [`models`] - Domain models (ClassifiedLine, DeviceReport, envelope)
//! - [`parser`] - Line classifier, report assembler, encoding front-end
//! - [`render`] - JSON/XML rendering
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Rendering
pub mod render;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ParseError, ParseResult, RenderError, RenderResult, ReportError, ReportResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    ClassifiedLine,
    DeviceLine,
    DeviceManagement,
    DeviceReport,
    LineKind,
    OutputFormat,
};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    assemble,
    classify,
    decode_content,
    detect_encoding,
    parse_report_bytes,
    parse_report_file,
    ParsedReport,
};

// =============================================================================
// Re-exports - Rendering
// =============================================================================

pub use render::render;

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, ResponseMetadata, UploadResponse};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
