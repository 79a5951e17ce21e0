//! Data models for lipikar.

mod document;

pub use document::{
    ExtractionResult, ExtractionStrategy, OutputFormat, PageResult, PageStatus, ProcessOutcome,
    ProcessRequest, ScriptCategory,
};
