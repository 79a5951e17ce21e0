//! Lipikar - text extraction for Bangla and English PDFs.
//!
//! Three strategies turn a PDF into text: read the embedded text layer
//! (repairing legacy Bijoy-encoded Bangla), OCR rasterized pages, or ask a
//! multimodal vision model to transcribe them. Results are written as plain
//! text or DOCX.

#![allow(clippy::should_implement_trait)]

pub mod cli;
pub mod config;
pub mod detect;
pub mod extract;
pub mod legacy;
pub mod models;
pub mod ocr;
pub mod output;
pub mod pdf;
pub mod server;
pub mod vision;
