// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The tree walker: source parse tree in, `TreeSink` calls out.

use std::borrow::Cow;
use std::ptr;

use log::debug;
use tendril::StrTendril;

use self::names::{classify_tag, TagSpelling};
use crate::driver::ConvertOpts;
use crate::error::{ConvertError, Result};
use crate::interface::TreeSink;
use crate::source::{Element, Node, NodeData, Output, Tag, TagNamespace, TAG_COUNT};
use crate::stack::Stack;

mod attributes;
pub(crate) mod names;
mod namespaces;

/// The target parent of a queued source node, with the namespace of the
/// source element it was built from.
struct Parent<H> {
    handle: H,
    ns: TagNamespace,
}

type WorkStack<'a, H> = Stack<&'a Node, Option<Parent<H>>>;

/// State for one conversion call.
pub(crate) struct Converter<'o, Sink: TreeSink> {
    sink: Sink,
    opts: &'o ConvertOpts,
    namespace_elements: bool,
    xlink: Option<Sink::Namespace>,
    xml: Option<Sink::Namespace>,
    /// The first node built; owns everything attached so far.
    root: Option<Sink::Handle>,
    /// Comments placed next to the root.
    root_siblings: Vec<Sink::Handle>,
    standard_tags: Vec<Option<Sink::Name>>,
    lang_attribute: Sink::Name,
    line_number_attr: Option<Sink::Name>,
}

/// Convert `output` into `sink`. On error every node built so far has been
/// handed back to `sink.discard`.
pub(crate) fn convert_document<Sink: TreeSink>(
    output: &Output,
    sink: Sink,
    opts: &ConvertOpts,
) -> Result<Sink::Output> {
    let root = match output.root_element() {
        Some(root) => root,
        None => return Err(structural!("The document has no root element")),
    };
    let mut stack = Stack::with_capacity(opts.stack_size)?;
    stack.push(root, None)?;

    let mut converter = Converter::new(sink, opts)?;
    let result = converter.run(output, root, &mut stack);
    drop(stack);
    match result {
        Ok(()) => Ok(converter.sink.finish()),
        Err(err) => {
            debug!("conversion failed: {}", err);
            converter.abandon();
            Err(err)
        },
    }
}

impl<'o, Sink: TreeSink> Converter<'o, Sink> {
    fn new(mut sink: Sink, opts: &'o ConvertOpts) -> Result<Converter<'o, Sink>> {
        let lang_attribute = sink.intern("lang")?;
        let line_number_attr = match opts.line_number_attr {
            Some(ref name) => Some(sink.intern(name)?),
            None => None,
        };
        let mut standard_tags = Vec::new();
        standard_tags.try_reserve_exact(TAG_COUNT)?;
        standard_tags.resize(TAG_COUNT, None);
        Ok(Converter {
            sink,
            opts,
            namespace_elements: opts.namespace_elements || opts.maybe_xhtml,
            xlink: None,
            xml: None,
            root: None,
            root_siblings: Vec::new(),
            standard_tags,
            lang_attribute,
            line_number_attr,
        })
    }

    fn run<'a>(
        &mut self,
        output: &'a Output,
        root: &'a Node,
        stack: &mut WorkStack<'a, Sink::Handle>,
    ) -> Result<()> {
        if self.opts.keep_doctype {
            if let Some(ref doctype) = output.document.doctype {
                self.sink.create_internal_subset(
                    &doctype.name,
                    &doctype.public_id,
                    &doctype.system_id,
                )?;
            }
        }

        while let Some((source, parent)) = stack.pop() {
            let child = self.convert_node(source, parent.as_ref())?;
            match parent {
                Some(ref parent) => self.sink.append(&parent.handle, child.clone()),
                None => self.root = Some(child.clone()),
            }
            if let Some(elem) = source.as_element() {
                for grandchild in elem.children.iter().rev() {
                    let parent = Parent {
                        handle: child.clone(),
                        ns: elem.tag_namespace,
                    };
                    stack.push(grandchild, Some(parent))?;
                }
            }
        }

        let root_handle = match self.root {
            Some(ref handle) => handle.clone(),
            None => return Err(structural!("No root node was built")),
        };
        if self.opts.maybe_xhtml {
            self.mirror_root_lang(&root_handle)?;
        }
        self.sink.set_root(&root_handle)?;
        self.add_root_comments(output, root, &root_handle)
    }

    fn convert_node(
        &mut self,
        source: &Node,
        parent: Option<&Parent<Sink::Handle>>,
    ) -> Result<Sink::Handle> {
        match source.data {
            NodeData::Element(ref elem) | NodeData::Template(ref elem) => {
                self.create_element(elem, parent)
            },
            NodeData::Text(ref text) | NodeData::Whitespace(ref text) => self.sink.create_text(text),
            NodeData::Comment(ref text) => self.sink.create_comment(text),
            NodeData::CData(ref text) => self.sink.create_cdata(text),
            NodeData::Document(_) => Err(ConvertError::UnknownNodeKind(Cow::Borrowed(errmsg!(
                "unknown node type: document inside the tree"
            )))),
        }
    }

    fn standard_tag_name(&mut self, tag: Tag) -> Result<Sink::Name> {
        let name = match tag.name() {
            Some(name) => name,
            None => return Err(structural!("Unknown tag has no standard name")),
        };
        if let Some(Some(cached)) = self.standard_tags.get(tag.index()) {
            return Ok(cached.clone());
        }
        let interned = self.sink.intern(name)?;
        self.standard_tags[tag.index()] = Some(interned.clone());
        Ok(interned)
    }

    fn create_element(
        &mut self,
        elem: &Element,
        parent: Option<&Parent<Sink::Handle>>,
    ) -> Result<Sink::Handle> {
        let sanitize = self.opts.sanitize_names;
        let (name, prefix) = match classify_tag(elem, self.opts.maybe_xhtml, sanitize) {
            TagSpelling::Standard(tag) => (self.standard_tag_name(tag)?, None),
            TagSpelling::Svg(name) => (self.sink.intern(name)?, None),
            TagSpelling::Custom { name, prefix } => (self.sink.intern(&name)?, prefix),
        };
        let node = self.sink.create_element(name, elem.start_pos.line)?;
        match self.fill_element(&node, elem, parent, prefix) {
            Ok(()) => Ok(node),
            Err(err) => {
                self.sink.discard(node);
                Err(err)
            },
        }
    }

    fn fill_element(
        &mut self,
        node: &Sink::Handle,
        elem: &Element,
        parent: Option<&Parent<Sink::Handle>>,
        prefix: Option<&str>,
    ) -> Result<()> {
        if let Some(ref attr_name) = self.line_number_attr {
            let line = StrTendril::from(elem.start_pos.line.to_string());
            let attr_name = attr_name.clone();
            self.sink.set_attribute(node, None, attr_name, &line)?;
        }

        if self.namespace_elements {
            let ns = match parent {
                Some(parent) if parent.ns == elem.tag_namespace => {
                    self.sink.namespace_of(&parent.handle)
                },
                _ => match self.sink.new_namespace(node, elem.tag_namespace.url(), None)? {
                    Some(ns) => Some(ns),
                    None => return Err(structural!("Failed to declare the element namespace")),
                },
            };
            self.sink.set_namespace(node, ns);
        }

        let parent_handle = parent.map(|parent| &parent.handle);
        self.create_attributes(node, elem, parent_handle)?;

        if let Some(prefix) = prefix {
            if let Some(ns) = self.find_namespace_by_prefix(node, parent_handle, prefix) {
                self.sink.set_namespace(node, Some(ns));
            }
        }
        Ok(())
    }

    fn mirror_root_lang(&mut self, root: &Sink::Handle) -> Result<()> {
        let lang = match self.sink.get_attribute(root, &self.lang_attribute) {
            Some(lang) => lang,
            None => return Ok(()),
        };
        if let Some(xml) = self.ensure_xml(root) {
            let name = self.lang_attribute.clone();
            self.sink.set_attribute(root, Some(&xml), name, &lang)?;
        }
        Ok(())
    }

    fn add_root_comments(
        &mut self,
        output: &Output,
        root: &Node,
        root_handle: &Sink::Handle,
    ) -> Result<()> {
        let mut before_root = true;
        for node in output.document.children.iter() {
            if ptr::eq(node, root) {
                before_root = false;
                continue;
            }
            if let NodeData::Comment(ref text) = node.data {
                let comment = self.sink.create_comment(text)?;
                self.root_siblings.push(comment.clone());
                if before_root {
                    self.sink.add_prev_sibling(root_handle, comment)?;
                } else {
                    self.sink.add_next_sibling(root_handle, comment)?;
                }
            }
        }
        Ok(())
    }

    /// Release everything built so far.
    fn abandon(&mut self) {
        self.xlink = None;
        self.xml = None;
        if let Some(root) = self.root.take() {
            self.sink.discard(root);
        }
        for sibling in self.root_siblings.drain(..) {
            self.sink.discard(sibling);
        }
    }
}
