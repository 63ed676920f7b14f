//! md2guide-core: Core library for converting Markdown trees into AmigaGuide
//!
//! This crate provides:
//! - The guide document model (nodes, paragraphs, styled runs, cross links)
//! - A renderer walking an mdast tree into one guide node
//! - A lexical colorizer for code-block lines
//! - Table-of-contents generation
//! - The guide serializer with single-byte output encoding

pub mod colourize;
pub mod guide;
pub mod render;
pub mod toc;
pub mod writer;

pub use guide::{Colour, GuideError, Justify, Node, NodeId, NodeKind, Para, Registry, Run, Span};
pub use render::{GUIDE_SCHEME, render_document};
pub use toc::build_toc;
pub use writer::GuideWriter;
