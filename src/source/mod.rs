// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The parse tree handed over by the HTML parser.
//!
//! Everything here is read-only during a conversion, apart from the
//! per-attribute `reprocess` flag.

use std::cell::Cell;
use std::mem;

use tendril::StrTendril;

pub use self::tag::{normalize_svg_tag_name, Tag, TAG_COUNT};

mod tag;

/// Namespace the parser placed an element in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TagNamespace {
    Html,
    Svg,
    MathMl,
}

impl TagNamespace {
    pub fn url(self) -> &'static str {
        match self {
            TagNamespace::Html => "http://www.w3.org/1999/xhtml",
            TagNamespace::Svg => "http://www.w3.org/2000/svg",
            TagNamespace::MathMl => "http://www.w3.org/1998/Math/MathML",
        }
    }
}

/// How the parser classified an attribute name in foreign content.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum AttrNamespace {
    None,
    XLink,
    Xml,
    Xmlns,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct SourcePosition {
    pub line: u64,
    pub column: u64,
    pub offset: u64,
}

/// An attribute on an element.
///
/// `name` is the name after the parser's adjustments (for foreign content the
/// prefix is already stripped and recorded in `attr_namespace`).
#[derive(Debug)]
pub struct Attribute {
    pub name: StrTendril,
    pub value: StrTendril,
    pub original_name: StrTendril,
    pub attr_namespace: AttrNamespace,
    reprocess: Cell<bool>,
}

impl Attribute {
    pub fn new(name: &str, value: &str) -> Attribute {
        Attribute::with_namespace(AttrNamespace::None, name, value)
    }

    pub fn with_namespace(attr_namespace: AttrNamespace, name: &str, value: &str) -> Attribute {
        Attribute {
            name: StrTendril::from_slice(name),
            value: StrTendril::from_slice(value),
            original_name: StrTendril::from_slice(name),
            attr_namespace,
            reprocess: Cell::new(false),
        }
    }

    pub fn needs_reprocess(&self) -> bool {
        self.reprocess.get()
    }

    pub(crate) fn mark_reprocess(&self) {
        self.reprocess.set(true);
    }

    pub(crate) fn clear_reprocess(&self) {
        self.reprocess.set(false);
    }

    /// Clears the flag, returning its previous state.
    pub(crate) fn take_reprocess(&self) -> bool {
        self.reprocess.replace(false)
    }
}

#[derive(Debug)]
pub struct Element {
    pub tag: Tag,
    pub tag_namespace: TagNamespace,
    /// The raw start tag as it appeared in the input, e.g. `<my-el a=b>`.
    pub original_tag: StrTendril,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    pub start_pos: SourcePosition,
}

impl Element {
    pub fn new(tag: Tag, tag_namespace: TagNamespace) -> Element {
        let original_tag = match tag.name() {
            Some(name) => StrTendril::from(format!("<{}>", name)),
            None => StrTendril::new(),
        };
        Element {
            tag,
            tag_namespace,
            original_tag,
            attributes: Vec::new(),
            children: Vec::new(),
            start_pos: SourcePosition::default(),
        }
    }

    /// An element whose tag is outside the known table.
    pub fn unknown(raw_name: &str, tag_namespace: TagNamespace) -> Element {
        let mut elem = Element::new(Tag::Unknown, tag_namespace);
        elem.original_tag = StrTendril::from(format!("<{}>", raw_name));
        elem
    }

    pub fn with_attr(mut self, attr: Attribute) -> Element {
        self.attributes.push(attr);
        self
    }

    pub fn with_child(mut self, child: Node) -> Element {
        self.children.push(child);
        self
    }

    pub fn at_line(mut self, line: u64) -> Element {
        self.start_pos.line = line;
        self
    }

    /// The tag name as written, extracted from `original_tag`.
    pub fn original_tag_name(&self) -> &str {
        let raw: &str = &self.original_tag;
        let raw = raw.strip_prefix('<').unwrap_or(raw);
        let raw = raw.strip_prefix('/').unwrap_or(raw);
        let end = raw
            .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
            .unwrap_or(raw.len());
        &raw[..end]
    }
}

#[derive(Debug)]
pub enum NodeData {
    /// Only valid as the top of a tree; never expected while walking.
    Document(Box<Document>),
    Element(Element),
    Template(Element),
    Text(StrTendril),
    Whitespace(StrTendril),
    Comment(StrTendril),
    CData(StrTendril),
}

#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
}

impl Node {
    pub fn element(elem: Element) -> Node {
        Node {
            data: NodeData::Element(elem),
        }
    }

    pub fn template(elem: Element) -> Node {
        Node {
            data: NodeData::Template(elem),
        }
    }

    pub fn text(text: &str) -> Node {
        Node {
            data: NodeData::Text(StrTendril::from_slice(text)),
        }
    }

    pub fn whitespace(text: &str) -> Node {
        Node {
            data: NodeData::Whitespace(StrTendril::from_slice(text)),
        }
    }

    pub fn comment(text: &str) -> Node {
        Node {
            data: NodeData::Comment(StrTendril::from_slice(text)),
        }
    }

    pub fn cdata(text: &str) -> Node {
        Node {
            data: NodeData::CData(StrTendril::from_slice(text)),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self.data {
            NodeData::Element(ref elem) | NodeData::Template(ref elem) => Some(elem),
            _ => None,
        }
    }

    fn take_children(&mut self) -> Vec<Node> {
        match self.data {
            NodeData::Element(ref mut elem) | NodeData::Template(ref mut elem) => {
                mem::take(&mut elem.children)
            },
            NodeData::Document(ref mut doc) => mem::take(&mut doc.children),
            _ => Vec::new(),
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut nodes = self.take_children();
        while let Some(mut node) = nodes.pop() {
            nodes.extend(node.take_children());
        }
    }
}

#[derive(Debug, Default)]
pub struct Doctype {
    pub name: StrTendril,
    pub public_id: StrTendril,
    pub system_id: StrTendril,
}

#[derive(Debug, Default)]
pub struct Document {
    /// `None` when the input had no `<!DOCTYPE>`.
    pub doctype: Option<Doctype>,
    /// The root element plus any comments before and after it.
    pub children: Vec<Node>,
}

impl Document {
    pub fn root_element(&self) -> Option<&Node> {
        self.children.iter().find(|node| node.as_element().is_some())
    }
}

/// What the parser returns: the document and everything under it.
#[derive(Debug, Default)]
pub struct Output {
    pub document: Document,
}

impl Output {
    /// A document holding just `root`.
    pub fn new(root: Node) -> Output {
        Output {
            document: Document {
                doctype: None,
                children: vec![root],
            },
        }
    }

    pub fn with_doctype(mut self, name: &str, public_id: &str, system_id: &str) -> Output {
        self.document.doctype = Some(Doctype {
            name: StrTendril::from_slice(name),
            public_id: StrTendril::from_slice(public_id),
            system_id: StrTendril::from_slice(system_id),
        });
        self
    }

    pub fn root_element(&self) -> Option<&Node> {
        self.document.root_element()
    }
}
