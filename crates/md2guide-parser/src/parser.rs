//! Event-to-tree builder over pulldown-cmark.

use md2guide_mdast::{
    Blockquote, Code, Emphasis, Heading, Link, List, ListItem, Node, Paragraph, Root, Strong,
};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Parser, Tag};

/// Parse CommonMark text into an mdast tree.
pub fn parse(source: &str) -> Root {
    let mut builder = TreeBuilder::default();
    for event in Parser::new(source) {
        match event {
            Event::Start(tag) => builder.start(tag),
            Event::End(_) => builder.close(),
            Event::Text(text) => builder.text(&text),
            Event::Code(code) => builder.leaf(Node::inline_code(code.as_ref())),
            Event::SoftBreak | Event::HardBreak => builder.leaf(Node::Break),
            // Raw HTML, rules, footnotes etc. have no guide representation.
            _ => {}
        }
    }
    Root::new(builder.root)
}

/// An open container collecting children until its End event arrives.
struct Open {
    frame: Frame,
    children: Vec<Node>,
}

enum Frame {
    Heading { depth: u8 },
    Paragraph,
    Blockquote,
    List { ordered: bool, start: Option<u32> },
    Item,
    Emphasis,
    Strong,
    Link { url: String, title: Option<String> },
    Code { lang: Option<String>, fenced: bool, value: String },
    /// Anything outside the closed node set; its content is discarded.
    Discard,
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    stack: Vec<Open>,
}

impl TreeBuilder {
    fn start(&mut self, tag: Tag) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph,
            Tag::Heading { level, .. } => Frame::Heading {
                depth: heading_depth(level),
            },
            Tag::BlockQuote(_) => Frame::Blockquote,
            Tag::List(start) => Frame::List {
                ordered: start.is_some(),
                start: start.map(|n| n as u32),
            },
            Tag::Item => Frame::Item,
            Tag::Emphasis => Frame::Emphasis,
            Tag::Strong => Frame::Strong,
            Tag::Link {
                dest_url, title, ..
            } => Frame::Link {
                url: dest_url.to_string(),
                title: non_empty(&title),
            },
            // A text guide has nowhere to put pixels; the alt text and URL
            // travel the link path instead.
            Tag::Image {
                dest_url, title, ..
            } => Frame::Link {
                url: dest_url.to_string(),
                title: non_empty(&title),
            },
            Tag::CodeBlock(kind) => {
                let (lang, fenced) = match kind {
                    CodeBlockKind::Fenced(info) => {
                        (info.split_whitespace().next().map(str::to_string), true)
                    }
                    CodeBlockKind::Indented => (None, false),
                };
                Frame::Code {
                    lang,
                    fenced,
                    value: String::new(),
                }
            }
            _ => Frame::Discard,
        };
        self.stack.push(Open {
            frame,
            children: Vec::new(),
        });
    }

    fn close(&mut self) {
        let Some(open) = self.stack.pop() else {
            return;
        };
        let node = match open.frame {
            Frame::Heading { depth } => Some(Node::Heading(Heading {
                depth,
                children: open.children,
            })),
            Frame::Paragraph => Some(Node::Paragraph(Paragraph {
                children: open.children,
            })),
            Frame::Blockquote => Some(Node::Blockquote(Blockquote {
                children: open.children,
            })),
            Frame::List { ordered, start } => Some(Node::List(List {
                ordered,
                start,
                children: open.children,
            })),
            Frame::Item => Some(Node::ListItem(ListItem {
                children: group_item_children(open.children),
            })),
            Frame::Emphasis => Some(Node::Emphasis(Emphasis {
                children: open.children,
            })),
            Frame::Strong => Some(Node::Strong(Strong {
                children: open.children,
            })),
            Frame::Link { url, title } => Some(Node::Link(Link {
                url,
                title,
                children: open.children,
            })),
            Frame::Code {
                lang,
                fenced,
                value,
            } => Some(Node::Code(Code {
                lang,
                fenced,
                value,
            })),
            Frame::Discard => None,
        };
        if let Some(node) = node {
            self.leaf(node);
        }
    }

    fn text(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some(Open {
                frame: Frame::Code { value, .. },
                ..
            }) => value.push_str(text),
            Some(Open {
                frame: Frame::Discard,
                ..
            }) => {}
            _ => self.leaf(Node::text(text)),
        }
    }

    fn leaf(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(open) => open.children.push(node),
            None => self.root.push(node),
        }
    }
}

/// Group a tight list item's bare inlines into a paragraph, so items always
/// hold block content like their loose counterparts.
fn group_item_children(children: Vec<Node>) -> Vec<Node> {
    let mut result = Vec::new();
    let mut inlines: Vec<Node> = Vec::new();
    for child in children {
        if child.is_inline() {
            inlines.push(child);
        } else {
            if !inlines.is_empty() {
                result.push(Node::paragraph(std::mem::take(&mut inlines)));
            }
            result.push(child);
        }
    }
    if !inlines.is_empty() {
        result.push(Node::paragraph(inlines));
    }
    result
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn non_empty(text: &CowStr) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
