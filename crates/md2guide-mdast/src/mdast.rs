//! mdast (Markdown Abstract Syntax Tree) types
//!
//! The subset of mdast nodes needed for guide rendering.
//! Reference: https://github.com/syntax-tree/mdast

use serde::{Deserialize, Serialize};

/// Root node of an mdast document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub children: Vec<Node>,
}

/// An mdast node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    // Block nodes
    Heading(Heading),
    Paragraph(Paragraph),
    Blockquote(Blockquote),
    List(List),
    ListItem(ListItem),
    Code(Code),

    // Inline nodes
    Text(Text),
    Emphasis(Emphasis),
    Strong(Strong),
    InlineCode(InlineCode),
    Link(Link),
    Container(Container),
    Break,
}

/// Heading node (# to ######)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub depth: u8,
    pub children: Vec<Node>,
}

/// Paragraph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub children: Vec<Node>,
}

/// Blockquote node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blockquote {
    pub children: Vec<Node>,
}

/// List node (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    pub start: Option<u32>,
    pub children: Vec<Node>,
}

/// List item node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub children: Vec<Node>,
}

/// Code block node
///
/// `fenced` distinguishes ``` blocks from indented blocks; the renderer only
/// colorizes and blank-wraps fenced blocks, so plain mdast (which folds the
/// distinction into `lang`) cannot carry enough here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub lang: Option<String>,
    pub fenced: bool,
    pub value: String,
}

/// Text node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

/// Emphasis node (*text* or _text_)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    pub children: Vec<Node>,
}

/// Strong node (**text** or __text__)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strong {
    pub children: Vec<Node>,
}

/// Inline code node (`code`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineCode {
    pub value: String,
}

/// Link node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub title: Option<String>,
    pub children: Vec<Node>,
}

/// Generic inline wrapper with no meaning of its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub children: Vec<Node>,
}

// Convenience constructors
impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(Text { value: s.into() })
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(Paragraph { children })
    }

    pub fn heading(depth: u8, children: Vec<Node>) -> Self {
        Node::Heading(Heading { depth, children })
    }

    pub fn blockquote(children: Vec<Node>) -> Self {
        Node::Blockquote(Blockquote { children })
    }

    pub fn fenced_code(lang: Option<String>, value: impl Into<String>) -> Self {
        Node::Code(Code {
            lang,
            fenced: true,
            value: value.into(),
        })
    }

    pub fn indented_code(value: impl Into<String>) -> Self {
        Node::Code(Code {
            lang: None,
            fenced: false,
            value: value.into(),
        })
    }

    pub fn inline_code(value: impl Into<String>) -> Self {
        Node::InlineCode(InlineCode {
            value: value.into(),
        })
    }

    pub fn emphasis(children: Vec<Node>) -> Self {
        Node::Emphasis(Emphasis { children })
    }

    pub fn strong(children: Vec<Node>) -> Self {
        Node::Strong(Strong { children })
    }

    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Link(Link {
            url: url.into(),
            title: None,
            children,
        })
    }

    pub fn link_with_title(
        url: impl Into<String>,
        title: impl Into<String>,
        children: Vec<Node>,
    ) -> Self {
        Node::Link(Link {
            url: url.into(),
            title: Some(title.into()),
            children,
        })
    }

    pub fn container(children: Vec<Node>) -> Self {
        Node::Container(Container { children })
    }

    pub fn list(ordered: bool, children: Vec<Node>) -> Self {
        Node::List(List {
            ordered,
            start: if ordered { Some(1) } else { None },
            children,
        })
    }

    pub fn ordered_list_from(start: u32, children: Vec<Node>) -> Self {
        Node::List(List {
            ordered: true,
            start: Some(start),
            children,
        })
    }

    pub fn list_item(children: Vec<Node>) -> Self {
        Node::ListItem(ListItem { children })
    }

    pub fn line_break() -> Self {
        Node::Break
    }

    /// Whether this node can only appear inside a paragraph-level context.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Node::Text(_)
                | Node::Emphasis(_)
                | Node::Strong(_)
                | Node::InlineCode(_)
                | Node::Link(_)
                | Node::Container(_)
                | Node::Break
        )
    }
}

impl Root {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_constructors() {
        let text = Node::text("hello");
        assert!(matches!(text, Node::Text(Text { value }) if value == "hello"));

        let heading = Node::heading(2, vec![Node::text("Title")]);
        assert!(matches!(heading, Node::Heading(Heading { depth: 2, .. })));

        let para = Node::paragraph(vec![Node::text("content")]);
        assert!(matches!(para, Node::Paragraph(_)));
    }

    #[test]
    fn test_code_constructors() {
        let code = Node::fenced_code(Some("csharp".to_string()), "int x = 5;");
        if let Node::Code(c) = code {
            assert_eq!(c.lang, Some("csharp".to_string()));
            assert!(c.fenced);
            assert_eq!(c.value, "int x = 5;");
        } else {
            panic!("Expected Code node");
        }

        let indented = Node::indented_code("x = 1");
        if let Node::Code(c) = indented {
            assert_eq!(c.lang, None);
            assert!(!c.fenced);
        } else {
            panic!("Expected Code node");
        }
    }

    #[test]
    fn test_list_constructors() {
        let unordered = Node::list(false, vec![Node::list_item(vec![Node::text("item")])]);
        if let Node::List(l) = unordered {
            assert!(!l.ordered);
            assert_eq!(l.start, None);
        } else {
            panic!("Expected List node");
        }

        let ordered = Node::ordered_list_from(5, vec![Node::list_item(vec![Node::text("item")])]);
        if let Node::List(l) = ordered {
            assert!(l.ordered);
            assert_eq!(l.start, Some(5));
        } else {
            panic!("Expected List node");
        }
    }

    #[test]
    fn test_link_constructors() {
        let link = Node::link("guide://other", vec![Node::text("Other")]);
        if let Node::Link(l) = link {
            assert_eq!(l.url, "guide://other");
            assert_eq!(l.title, None);
        } else {
            panic!("Expected Link node");
        }

        let link_titled =
            Node::link_with_title("guide://other", "Other Node", vec![Node::text("Other")]);
        if let Node::Link(l) = link_titled {
            assert_eq!(l.title, Some("Other Node".to_string()));
        } else {
            panic!("Expected Link node");
        }
    }

    #[test]
    fn test_is_inline() {
        assert!(Node::text("x").is_inline());
        assert!(Node::inline_code("x").is_inline());
        assert!(Node::line_break().is_inline());
        assert!(Node::container(vec![]).is_inline());
        assert!(!Node::paragraph(vec![]).is_inline());
        assert!(!Node::indented_code("x").is_inline());
        assert!(!Node::list(false, vec![]).is_inline());
    }

    #[test]
    fn test_serde_roundtrip() {
        let root = Root::new(vec![
            Node::heading(1, vec![Node::text("Title")]),
            Node::paragraph(vec![
                Node::text("Hello "),
                Node::emphasis(vec![Node::text("world")]),
            ]),
            Node::fenced_code(Some("csharp".to_string()), "int x = 5;\n"),
        ]);

        let json = serde_json::to_string(&root).unwrap();
        let parsed: Root = serde_json::from_str(&json).unwrap();
        assert_eq!(root, parsed);
    }
}
