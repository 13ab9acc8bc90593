//! Attribute access with file and line context

use std::path::Path;
use std::str::FromStr;

use roxmltree::{Document, Node};
use tq_core::TemplateId;

use crate::DataError;

/// A parsed document and the file it came from
pub(crate) struct Source<'d, 'input> {
    path: &'d Path,
    doc: Document<'input>,
}

impl<'d, 'input> Source<'d, 'input> {
    pub(crate) fn parse(path: &'d Path, raw: &'input str) -> Result<Self, DataError> {
        let doc = Document::parse(raw).map_err(|source| DataError::Xml {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { path, doc })
    }

    /// Root element, which must be named `name`
    pub(crate) fn root(&self, name: &str) -> Result<Node<'_, 'input>, DataError> {
        let root = self.doc.root_element();
        if root.tag_name().name() != name {
            return Err(self.error_at(root, format!("root element must be <{name}>")));
        }
        Ok(root)
    }

    pub(crate) fn error_at(&self, node: Node<'_, '_>, message: impl Into<String>) -> DataError {
        let pos = self.doc.text_pos_at(node.range().start);
        DataError::Invalid {
            path: self.path.to_path_buf(),
            line: pos.row,
            column: pos.col,
            message: message.into(),
        }
    }

    pub(crate) fn attr<'a>(
        &self,
        node: Node<'a, 'input>,
        name: &str,
    ) -> Result<&'a str, DataError> {
        node.attribute(name).ok_or_else(|| {
            self.error_at(
                node,
                format!("<{}> is missing attribute '{name}'", node.tag_name().name()),
            )
        })
    }

    pub(crate) fn hex(&self, node: Node<'_, 'input>, name: &str) -> Result<TemplateId, DataError> {
        let raw = self.attr(node, name)?;
        TemplateId::from_hex(raw.trim()).map_err(|_| {
            self.error_at(node, format!("attribute '{name}' = '{raw}' is not a hex id"))
        })
    }

    pub(crate) fn number<T: FromStr>(
        &self,
        node: Node<'_, 'input>,
        name: &str,
    ) -> Result<T, DataError> {
        let raw = self.attr(node, name)?;
        raw.trim().parse().map_err(|_| {
            self.error_at(node, format!("attribute '{name}' = '{raw}' is not a valid number"))
        })
    }

    /// Optional boolean attribute: `true`/`false`, `1`/`0`
    pub(crate) fn flag(
        &self,
        node: Node<'_, 'input>,
        name: &str,
        default: bool,
    ) -> Result<bool, DataError> {
        match node.attribute(name).map(str::trim) {
            None => Ok(default),
            Some("true" | "1") => Ok(true),
            Some("false" | "0") => Ok(false),
            Some(raw) => Err(self.error_at(
                node,
                format!("attribute '{name}' = '{raw}' is not a boolean"),
            )),
        }
    }
}

/// Element children of `node`
pub(crate) fn elements<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

/// First element child named `name`
pub(crate) fn section<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    elements(node).find(|child| child.tag_name().name() == name)
}
