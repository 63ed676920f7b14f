//! Renders a parsed Markdown tree into one guide node.
//!
//! The walk keeps two pieces of state: a quote depth and a stack of list
//! contexts. Everything else lands directly on the target node's paragraphs.

use md2guide_mdast::{Code, Heading, Link, List, Node as MdNode, Root};

use crate::colourize::colourize_line;
use crate::guide::{Colour, NodeId, Para, Registry, Run, Span};

/// URL scheme marking links that resolve to nodes inside the guide.
pub const GUIDE_SCHEME: &str = "guide://";

/// Render a document into `target`. Link targets that do not exist yet are
/// created in `registry` as empty placeholder nodes.
pub fn render_document(registry: &mut Registry, target: NodeId, root: &Root) {
    let mut renderer = Renderer {
        registry,
        target,
        quote_depth: 0,
        lists: Vec::new(),
    };
    for block in &root.children {
        renderer.write_block(block);
    }
}

enum ListContext {
    Unordered,
    Ordered(u32),
}

/// Style attributes forced onto literal text by an enclosing inline.
#[derive(Debug, Clone, Copy, Default)]
struct Forced {
    italic: bool,
    bold: bool,
    colour: Option<Colour>,
}

struct Renderer<'a> {
    registry: &'a mut Registry,
    target: NodeId,
    quote_depth: usize,
    lists: Vec<ListContext>,
}

impl Renderer<'_> {
    fn write_block(&mut self, block: &MdNode) {
        match block {
            MdNode::Heading(heading) => self.write_heading(heading),
            MdNode::Paragraph(para) => self.write_paragraph(&para.children),
            MdNode::Blockquote(quote) => self.write_quote(&quote.children),
            MdNode::List(list) => self.write_list(list),
            MdNode::ListItem(item) => self.write_children(&item.children),
            MdNode::Code(code) => self.write_code(code),
            // Inline kinds at block position produce nothing.
            _ => {}
        }
    }

    fn write_children(&mut self, children: &[MdNode]) {
        for child in children {
            self.write_block(child);
        }
    }

    fn write_heading(&mut self, heading: &Heading) {
        let mut para = Para::new();
        self.write_inlines(&mut para, &heading.children, Forced::default());
        para.break_after = true;

        if heading.depth == 1 {
            let mut title = String::new();
            for run in para.runs_mut() {
                if let Run::Span(span) = run {
                    span.bold = true;
                    span.underline = true;
                    title.push_str(&span.text);
                }
            }
            self.registry.node_mut(self.target).set_title(title);
        } else if heading.depth < 3 {
            for run in para.runs_mut() {
                if let Run::Span(span) = run {
                    span.bold = true;
                }
            }
            para.break_before = true;
        }

        self.registry.node_mut(self.target).push_para(para);
    }

    fn write_paragraph(&mut self, children: &[MdNode]) {
        let mut para = Para::new();
        let prefix = self.list_prefix();
        para.span(prefix);
        para.span(self.quote_prefix());
        self.write_inlines(&mut para, children, Forced::default());
        self.registry.node_mut(self.target).push_para(para);
    }

    fn write_quote(&mut self, children: &[MdNode]) {
        self.quote_depth += 1;
        self.write_children(children);
        self.quote_depth -= 1;
    }

    fn write_list(&mut self, list: &List) {
        let context = if list.ordered {
            ListContext::Ordered(list.start.unwrap_or(0))
        } else {
            ListContext::Unordered
        };
        self.lists.push(context);
        self.write_children(&list.children);
        self.lists.pop();
    }

    fn write_code(&mut self, code: &Code) {
        let node = self.target;
        if code.fenced {
            let lang = code.lang.as_deref().unwrap_or("").trim().to_lowercase();

            let begin = self.registry.node_mut(node).paragraph();
            begin.break_before = true;

            for line in code.value.lines() {
                let para = self.registry.node_mut(node).paragraph();
                para.span("  ");
                para.push(colourize_line(line, &lang));
            }

            let after = self.registry.node_mut(node).paragraph();
            after.break_after = true;
        } else {
            for line in code.value.lines() {
                let para = self.registry.node_mut(node).paragraph();
                para.span("  ");
                para.push(colourize_line(line, ""));
            }
        }
    }

    /// One prefix fragment per open list context, outermost first. Computing
    /// the prefix advances every ordered context's counter.
    fn list_prefix(&mut self) -> String {
        let mut prefix = String::new();
        for context in &mut self.lists {
            match context {
                ListContext::Unordered => prefix.push_str("*  "),
                ListContext::Ordered(index) => {
                    prefix.push_str(&format!("{index}. "));
                    *index += 1;
                }
            }
        }
        prefix
    }

    fn quote_prefix(&self) -> String {
        "> ".repeat(self.quote_depth)
    }

    fn write_inlines(&mut self, para: &mut Para, inlines: &[MdNode], forced: Forced) {
        for inline in inlines {
            match inline {
                MdNode::Text(text) => {
                    let mut span = Span::new(text.value.clone());
                    span.italic = forced.italic;
                    span.bold = forced.bold;
                    span.foreground = forced.colour;
                    para.push(Run::Span(span));
                }
                MdNode::Emphasis(emphasis) => self.write_inlines(
                    para,
                    &emphasis.children,
                    Forced {
                        italic: true,
                        ..Default::default()
                    },
                ),
                MdNode::Strong(strong) => self.write_inlines(
                    para,
                    &strong.children,
                    Forced {
                        bold: true,
                        ..Default::default()
                    },
                ),
                MdNode::InlineCode(code) => {
                    let mut span = Span::new(code.value.clone());
                    span.foreground = Some(Colour::Shine);
                    para.push(Run::Span(span));
                }
                MdNode::Link(link) => self.write_link(para, link),
                MdNode::Container(container) => {
                    self.write_inlines(para, &container.children, Forced::default())
                }
                // Line breaks and anything unrecognized produce no run.
                _ => {}
            }
        }
    }

    fn write_link(&mut self, para: &mut Para, link: &Link) {
        let Some(rest) = link.url.strip_prefix(GUIDE_SCHEME) else {
            // Not an internal link; the guide has no output for it.
            return;
        };
        let name = rest.trim().to_lowercase();

        let mut label = String::new();
        for child in &link.children {
            if let MdNode::Text(text) = child {
                label.push_str(&text.value);
            }
        }

        let target = self.registry.get_or_create(&name);
        para.link(target, label);
    }
}
