//! md2guide-mdast: Markdown AST types for md2guide
//!
//! This crate provides the subset of mdast nodes the guide renderer consumes:
//! block kinds (heading, paragraph, blockquote, list, code) and inline kinds
//! (text, emphasis, strong, inline code, link, container, break).
//!
//! ## Example
//!
//! ```rust
//! use md2guide_mdast::{Node, Root};
//!
//! let doc = Root::new(vec![
//!     Node::heading(1, vec![Node::text("Hello")]),
//!     Node::paragraph(vec![Node::text("World")]),
//! ]);
//!
//! assert_eq!(doc.children.len(), 2);
//! ```

pub mod mdast;

pub use mdast::{
    Blockquote, Code, Container, Emphasis, Heading, InlineCode, Link, List, ListItem, Node,
    Paragraph, Root, Strong, Text,
};
