// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversion into a plain tag/object tree.
//!
//! No namespaces are tracked here: foreign attributes keep their prefix as
//! part of the name (`xlink:href`), and CDATA sections become strings.

use std::borrow::Cow;

use log::debug;
use tendril::StrTendril;

use crate::converter::names::{classify_tag, sanitize_name, TagSpelling};
use crate::driver::ConvertOpts;
use crate::error::{ConvertError, Result};
use crate::source::{AttrNamespace, Attribute, Element, NodeData, Output};
use crate::stack::Stack;

/// Callbacks building host objects.
pub trait ObjectSink {
    /// A host object. Cloning must yield another reference to the same object.
    type Node: Clone;

    fn new_tag(&mut self, name: &str, attrs: Vec<(String, StrTendril)>) -> Result<Self::Node>;

    fn new_string(&mut self, text: &StrTendril) -> Result<Self::Node>;

    fn new_comment(&mut self, text: &StrTendril) -> Result<Self::Node>;

    /// Append `child` as the last child of `parent`.
    fn append(&mut self, parent: &Self::Node, child: Self::Node) -> Result<()>;

    /// Called once, after the whole tree is built, when the document has a
    /// doctype that should be kept.
    fn new_doctype(
        &mut self,
        _name: &StrTendril,
        _public_id: &StrTendril,
        _system_id: &StrTendril,
    ) -> Result<()> {
        Ok(())
    }

    /// Release a node of an abandoned conversion, with everything appended
    /// to it.
    fn discard(&mut self, _node: Self::Node) {}
}

fn flatten_attribute(attr: &Attribute, sanitize: bool) -> String {
    let local: Cow<str> = if sanitize {
        sanitize_name(&attr.name)
    } else {
        Cow::Borrowed(&*attr.name)
    };
    match attr.attr_namespace {
        AttrNamespace::None => local.into_owned(),
        AttrNamespace::XLink => format!("xlink:{}", local),
        AttrNamespace::Xml => format!("xml:{}", local),
        AttrNamespace::Xmlns => format!("xmlns:{}", local),
    }
}

fn create_tag<Sink: ObjectSink>(sink: &mut Sink, elem: &Element, sanitize: bool) -> Result<Sink::Node> {
    let attrs = elem
        .attributes
        .iter()
        .map(|attr| (flatten_attribute(attr, sanitize), attr.value.clone()))
        .collect();
    match classify_tag(elem, false, sanitize) {
        TagSpelling::Standard(tag) => match tag.name() {
            Some(name) => sink.new_tag(name, attrs),
            None => Err(structural!("Unknown tag has no standard name")),
        },
        TagSpelling::Svg(name) => sink.new_tag(name, attrs),
        TagSpelling::Custom { name, .. } => sink.new_tag(&name, attrs),
    }
}

pub(crate) fn convert_objects<Sink: ObjectSink>(
    output: &Output,
    sink: &mut Sink,
    opts: &ConvertOpts,
) -> Result<Sink::Node> {
    let mut root = None;
    match build_objects(output, sink, opts, &mut root) {
        Ok(()) => {
            debug!("object tree conversion finished");
            root.ok_or_else(|| structural!("No root node was built"))
        },
        Err(err) => {
            debug!("object tree conversion failed: {}", err);
            if let Some(root) = root {
                sink.discard(root);
            }
            Err(err)
        },
    }
}

// Records the root in `root` as soon as it exists, so the caller can release
// it whatever happens afterwards.
fn build_objects<Sink: ObjectSink>(
    output: &Output,
    sink: &mut Sink,
    opts: &ConvertOpts,
    root: &mut Option<Sink::Node>,
) -> Result<()> {
    let source_root = match output.root_element() {
        Some(node) => node,
        None => return Err(structural!("The document has no root element")),
    };

    let mut stack = Stack::with_capacity(opts.stack_size)?;
    stack.push(source_root, None)?;
    while let Some((source, parent)) = stack.pop() {
        let child = match source.data {
            NodeData::Element(ref elem) | NodeData::Template(ref elem) => {
                create_tag(sink, elem, opts.sanitize_names)?
            },
            NodeData::Text(ref text) | NodeData::Whitespace(ref text) | NodeData::CData(ref text) => {
                sink.new_string(text)?
            },
            NodeData::Comment(ref text) => sink.new_comment(text)?,
            NodeData::Document(_) => {
                return Err(ConvertError::UnknownNodeKind(Cow::Borrowed(errmsg!(
                    "unknown node type: document inside the tree"
                ))))
            },
        };
        match parent {
            Some(ref parent) => {
                if let Err(err) = sink.append(parent, child.clone()) {
                    sink.discard(child);
                    return Err(err);
                }
            },
            None => *root = Some(child.clone()),
        }
        if let Some(elem) = source.as_element() {
            for grandchild in elem.children.iter().rev() {
                stack.push(grandchild, Some(child.clone()))?;
            }
        }
    }

    if opts.keep_doctype {
        if let Some(ref doctype) = output.document.doctype {
            sink.new_doctype(&doctype.name, &doctype.public_id, &doctype.system_id)?;
        }
    }
    Ok(())
}

/// A node of an `ObjectTree`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectNode {
    Tag {
        name: String,
        attrs: Vec<(String, StrTendril)>,
        children: Vec<usize>,
    },
    Text(StrTendril),
    Comment(StrTendril),
}

/// An arena of host objects; nodes are referred to by index.
///
/// Nodes are allocated in order, so discarding a node drops it together with
/// everything allocated after it.
#[derive(Debug, Default)]
pub struct ObjectTree {
    pub nodes: Vec<ObjectNode>,
    pub doctype: Option<(StrTendril, StrTendril, StrTendril)>,
}

impl ObjectTree {
    pub fn new() -> ObjectTree {
        ObjectTree::default()
    }

    pub fn get(&self, node: usize) -> Option<&ObjectNode> {
        self.nodes.get(node)
    }

    pub fn children(&self, node: usize) -> &[usize] {
        match self.nodes.get(node) {
            Some(ObjectNode::Tag { children, .. }) => children,
            _ => &[],
        }
    }

    /// Element name, or `None` for strings and comments.
    pub fn name(&self, node: usize) -> Option<&str> {
        match self.nodes.get(node) {
            Some(ObjectNode::Tag { name, .. }) => Some(name),
            _ => None,
        }
    }

    fn push(&mut self, node: ObjectNode) -> Result<usize> {
        self.nodes
            .try_reserve(1)
            .map_err(|_| nomem!("Out of memory allocating an object"))?;
        self.nodes.push(node);
        Ok(self.nodes.len() - 1)
    }
}

impl ObjectSink for ObjectTree {
    type Node = usize;

    fn new_tag(&mut self, name: &str, attrs: Vec<(String, StrTendril)>) -> Result<usize> {
        self.push(ObjectNode::Tag {
            name: name.to_owned(),
            attrs,
            children: Vec::new(),
        })
    }

    fn new_string(&mut self, text: &StrTendril) -> Result<usize> {
        self.push(ObjectNode::Text(text.clone()))
    }

    fn new_comment(&mut self, text: &StrTendril) -> Result<usize> {
        self.push(ObjectNode::Comment(text.clone()))
    }

    fn append(&mut self, parent: &usize, child: usize) -> Result<()> {
        match self.nodes.get_mut(*parent) {
            Some(ObjectNode::Tag { children, .. }) => {
                children.push(child);
                Ok(())
            },
            _ => Err(structural!("Only tags can have children")),
        }
    }

    fn new_doctype(
        &mut self,
        name: &StrTendril,
        public_id: &StrTendril,
        system_id: &StrTendril,
    ) -> Result<()> {
        self.doctype = Some((name.clone(), public_id.clone(), system_id.clone()));
        Ok(())
    }

    fn discard(&mut self, node: usize) {
        self.nodes.truncate(node);
    }
}
