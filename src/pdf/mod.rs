//! PDF text-layer access.

mod text_layer;

pub use text_layer::{
    split_pages, LopdfReader, PageRange, PdftotextReader, TextLayerError, TextLayerReader,
};
