//! The AmigaGuide document model.
//!
//! A guide is a graph of named [`Node`]s owned by a [`Registry`]. Node names
//! are case-insensitive and canonicalized to uppercase; two names are reserved
//! (`MAIN` for the entry node, `TOC` for the table of contents) and give a
//! node its [`NodeKind`]. Nodes hold [`Para`]graphs, paragraphs hold [`Run`]s.
//!
//! Links reference their target by [`NodeId`] rather than by name, so a
//! rename never invalidates them and the target's *current* title is used
//! when the guide is saved.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Reserved name of the entry node.
pub const ENTRY_NODE: &str = "MAIN";

/// Reserved name of the table-of-contents node.
pub const TOC_NODE: &str = "TOC";

#[derive(Debug, Error)]
pub enum GuideError {
    #[error("node already exists with this name: {0}")]
    NameCollision(String),
}

/// Paragraph justification. Only emitted when explicitly set on a paragraph;
/// an unset justification and an explicit `Left` produce different output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Left,
    Center,
    Right,
}

/// The viewer's pen colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    Text,
    Shine,
    Shadow,
    Fill,
    FillText,
    Background,
    Highlight,
}

impl Colour {
    pub fn as_str(self) -> &'static str {
        match self {
            Colour::Text => "Text",
            Colour::Shine => "Shine",
            Colour::Shadow => "Shadow",
            Colour::Fill => "Fill",
            Colour::FillText => "FillText",
            Colour::Background => "Background",
            Colour::Highlight => "Highlight",
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to a node inside its [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Derived from the canonical name, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Entry,
    TableOfContents,
    Content,
}

/// A styled stretch of text. Unset colours inherit the viewer default and
/// emit nothing; set colours emit open and restore markup even when the
/// chosen colour equals the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub underline: bool,
    pub italic: bool,
    pub foreground: Option<Colour>,
    pub background: Option<Colour>,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            ..Default::default()
        }
    }

    fn save(&self, out: &mut String) {
        if self.text.is_empty() {
            return;
        }
        if let Some(fg) = self.foreground {
            out.push_str(&format!("@{{FG {fg}}}"));
        }
        if let Some(bg) = self.background {
            out.push_str(&format!("@{{BG {bg}}}"));
        }
        if self.bold {
            out.push_str("@{b}");
        }
        if self.underline {
            out.push_str("@{u}");
        }
        if self.italic {
            out.push_str("@{i}");
        }
        push_escaped(out, &self.text);
        if self.underline {
            out.push_str("@{uu}");
        }
        if self.bold {
            out.push_str("@{ub}");
        }
        if self.italic {
            out.push_str("@{ui}");
        }
        if self.background.is_some() {
            out.push_str("@{BG Background}");
        }
        if self.foreground.is_some() {
            out.push_str("@{FG Text}");
        }
    }
}

/// One fragment of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum Run {
    /// Styled text, escaped on emission.
    Span(Span),
    /// Raw markup injected verbatim (colorizer output).
    Emit(String),
    /// Cross-reference. An empty or whitespace `text` falls back to the
    /// target's title at save time.
    Link { target: NodeId, text: String },
}

impl Run {
    fn save(&self, registry: &Registry, out: &mut String) {
        match self {
            Run::Span(span) => span.save(out),
            Run::Emit(text) => out.push_str(text),
            Run::Link { target, text } => {
                let node = registry.node(*target);
                let label = if text.trim().is_empty() {
                    node.title()
                } else {
                    text
                };
                out.push_str(&format!("@{{\"{label}\" LINK {}}}", node.name()));
            }
        }
    }
}

/// An ordered run sequence terminated by one line feed on output.
#[derive(Debug, Clone, Default)]
pub struct Para {
    runs: Vec<Run>,
    pub break_before: bool,
    pub break_after: bool,
    pub justify: Option<Justify>,
}

impl Para {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn runs_mut(&mut self) -> &mut [Run] {
        &mut self.runs
    }

    pub fn push(&mut self, run: Run) -> &mut Self {
        self.runs.push(run);
        self
    }

    pub fn span(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Run::Span(Span::new(text)))
    }

    pub fn emit(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Run::Emit(text.into()))
    }

    pub fn link(&mut self, target: NodeId, text: impl Into<String>) -> &mut Self {
        self.push(Run::Link {
            target,
            text: text.into(),
        })
    }

    fn save(&self, registry: &Registry, out: &mut String) {
        if self.break_before {
            push_line(out, "");
        }
        if let Some(justify) = self.justify {
            out.push_str(match justify {
                Justify::Left => "@{JLEFT}",
                Justify::Center => "@{JCENTER}",
                Justify::Right => "@{JRIGHT}",
            });
        }
        for run in &self.runs {
            run.save(registry, out);
        }
        push_line(out, "");
        if self.justify.is_some() {
            out.push_str("@{JLEFT}");
        }
        if self.break_after {
            push_line(out, "");
        }
    }
}

/// One addressable unit of guide hypertext.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    title: String,
    paragraphs: Vec<Para>,
}

impl Node {
    /// Canonical (uppercase) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Derived from the canonical name against the two reserved names.
    pub fn kind(&self) -> NodeKind {
        match self.name.as_str() {
            ENTRY_NODE => NodeKind::Entry,
            TOC_NODE => NodeKind::TableOfContents,
            _ => NodeKind::Content,
        }
    }

    pub fn paragraphs(&self) -> &[Para] {
        &self.paragraphs
    }

    /// Append and return a new empty paragraph.
    pub fn paragraph(&mut self) -> &mut Para {
        let index = self.paragraphs.len();
        self.paragraphs.push(Para::new());
        &mut self.paragraphs[index]
    }

    pub fn push_para(&mut self, para: Para) {
        self.paragraphs.push(para);
    }

    fn apply_default_title(&mut self) {
        if self.title.trim().is_empty() {
            self.title = match self.kind() {
                NodeKind::Content => self.name.clone(),
                NodeKind::Entry => "Main".to_string(),
                NodeKind::TableOfContents => "Table of Contents".to_string(),
            };
        }
    }

    fn save(&self, registry: &Registry, out: &mut String) {
        push_line(out, "");
        push_directive_line(out, &format!("@NODE {} \"{}\"", self.name, self.title));
        for para in &self.paragraphs {
            para.save(registry, out);
        }
        push_directive_line(out, "@ENDNODE");
    }
}

/// Maps canonical node names to nodes for one conversion run.
///
/// Nodes live in an arena indexed by [`NodeId`]; the name map only holds
/// handles, so renames move a key without touching the node's identity.
#[derive(Debug, Default)]
pub struct Registry {
    nodes: Vec<Node>,
    names: HashMap<String, NodeId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register a node, failing when the canonical name is already
    /// taken by a different node.
    pub fn insert(&mut self, name: &str) -> Result<NodeId, GuideError> {
        let canonical = canonical_name(name);
        if self.names.contains_key(&canonical) {
            return Err(GuideError::NameCollision(canonical));
        }
        Ok(self.register(canonical))
    }

    /// Case-insensitive lookup-or-create; equivalent names always yield the
    /// same node.
    pub fn get_or_create(&mut self, name: &str) -> NodeId {
        let canonical = canonical_name(name);
        if let Some(&id) = self.names.get(&canonical) {
            return id;
        }
        self.register(canonical)
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.names.get(&canonical_name(name)).copied()
    }

    /// Atomically move a node's registration to a new canonical name.
    pub fn rename(&mut self, id: NodeId, new_name: &str) -> Result<(), GuideError> {
        let canonical = canonical_name(new_name);
        if let Some(&existing) = self.names.get(&canonical) {
            if existing != id {
                return Err(GuideError::NameCollision(canonical));
            }
        }
        let old = self.nodes[id.0].name.clone();
        self.names.remove(&old);
        self.names.insert(canonical.clone(), id);
        let node = &mut self.nodes[id.0];
        node.name = canonical;
        node.apply_default_title();
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Node handles in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize one node, including its leading blank line and directives.
    pub fn save_node(&self, id: NodeId, out: &mut String) {
        self.nodes[id.0].save(self, out);
    }

    fn register(&mut self, canonical: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = Node {
            name: canonical.clone(),
            title: String::new(),
            paragraphs: Vec::new(),
        };
        node.apply_default_title();
        self.nodes.push(node);
        self.names.insert(canonical, id);
        id
    }
}

fn canonical_name(name: &str) -> String {
    name.to_uppercase()
}

/// Append a directive on its own line, closing any unterminated line first.
pub(crate) fn push_directive_line(out: &mut String, text: &str) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(text);
    out.push('\n');
}

pub(crate) fn push_line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

/// Escape paragraph text for emission. `@` and `\` gain a backslash; control
/// characters and anything above the 7-bit range are dropped.
pub(crate) fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '@' => out.push_str("\\@"),
            '\\' => out.push_str("\\\\"),
            c if c.is_control() => {}
            c if (c as u32) > 127 => {}
            c => out.push(c),
        }
    }
}
