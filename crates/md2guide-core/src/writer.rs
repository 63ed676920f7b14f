//! Guide serialization.
//!
//! [`GuideWriter`] owns the node registry for one conversion run and produces
//! the final guide text: database directives, the entry node, the generated
//! table of contents, then every content node ordered by name.

use crate::guide::{ENTRY_NODE, NodeId, NodeKind, Registry, TOC_NODE, push_directive_line};
use crate::toc::build_toc;

#[derive(Debug, Default)]
pub struct GuideWriter {
    registry: Registry,
}

impl GuideWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Case-insensitive lookup-or-create; equivalent names return the same
    /// node.
    pub fn node(&mut self, name: &str) -> NodeId {
        self.registry.get_or_create(name)
    }

    /// Serialize the whole graph to guide text.
    ///
    /// Builds the table of contents on demand; the entry and TOC nodes are
    /// created if nothing rendered into them.
    pub fn save(&mut self) -> String {
        let mut out = String::new();
        push_directive_line(&mut out, "@DATABASE");
        push_directive_line(&mut out, "@TOC TOC");

        let main = self.registry.get_or_create(ENTRY_NODE);
        self.registry.save_node(main, &mut out);

        let toc = self.registry.get_or_create(TOC_NODE);
        build_toc(&mut self.registry, toc);
        self.registry.save_node(toc, &mut out);

        let mut content: Vec<NodeId> = self
            .registry
            .ids()
            .filter(|&id| self.registry.node(id).kind() == NodeKind::Content)
            .collect();
        content.sort_by(|&a, &b| self.registry.node(a).name().cmp(self.registry.node(b).name()));
        for id in content {
            self.registry.save_node(id, &mut out);
        }

        out
    }

    /// Serialize and transcode to the single-byte output encoding.
    ///
    /// Escaping already drops everything above the 7-bit range from
    /// paragraph text, so the encode only touches stray title bytes.
    pub fn save_bytes(&mut self) -> Vec<u8> {
        let text = self.save();
        let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(&text);
        bytes.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_guide_layout() {
        let mut writer = GuideWriter::new();
        let text = writer.save();
        assert_eq!(
            text,
            "@DATABASE\n\
             @TOC TOC\n\
             \n\
             @NODE MAIN \"Main\"\n\
             @ENDNODE\n\
             \n\
             @NODE TOC \"Table of Contents\"\n\
             @{b}@{u}Table of Contents@{uu}@{ub}\n\
             \n\
             @{b}M@{ub}\n\
             \n\
             \x20 @{\"Main\" LINK MAIN}\n\
             @ENDNODE\n"
        );
    }

    #[test]
    fn test_content_nodes_ordered_by_name() {
        let mut writer = GuideWriter::new();
        writer.node("zeta");
        writer.node("alpha");
        let text = writer.save();

        let alpha = text.find("@NODE ALPHA").expect("alpha emitted");
        let zeta = text.find("@NODE ZETA").expect("zeta emitted");
        assert!(alpha < zeta);
        // MAIN and TOC always come first.
        let main = text.find("@NODE MAIN").expect("main emitted");
        let toc = text.find("@NODE TOC").expect("toc emitted");
        assert!(main < toc && toc < alpha);
    }

    #[test]
    fn test_same_node_for_equivalent_names() {
        let mut writer = GuideWriter::new();
        assert_eq!(writer.node("intro"), writer.node("INTRO"));
    }

    #[test]
    fn test_save_bytes_is_seven_bit() {
        let mut writer = GuideWriter::new();
        let id = writer.node("intro");
        writer.registry_mut().node_mut(id).paragraph().span("Hello");
        let bytes = writer.save_bytes();
        assert!(bytes.iter().all(|&b| b < 128));
        let text = String::from_utf8(bytes).expect("pure ASCII output");
        assert!(text.contains("@NODE INTRO \"INTRO\""));
    }

    #[test]
    fn test_link_resolves_title_at_save_time() {
        let mut writer = GuideWriter::new();
        let main = writer.node("main");
        let other = writer.node("other");
        writer.registry_mut().node_mut(main).paragraph().link(other, "");

        // Title finalized only after the link was created.
        writer.registry_mut().node_mut(other).set_title("Other Page");
        let text = writer.save();
        assert!(text.contains("@{\"Other Page\" LINK OTHER}"));
    }
}
