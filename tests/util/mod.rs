// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![allow(dead_code)]

use std::fmt::Write;

use html5tree::source::{AttrNamespace, Attribute, Element, Node, Tag, TagNamespace};
use html5tree::xmldom::{Handle, NodeData};

pub fn html(tag: Tag) -> Element {
    Element::new(tag, TagNamespace::Html)
}

pub fn svg(tag: Tag) -> Element {
    Element::new(tag, TagNamespace::Svg)
}

pub fn math(tag: Tag) -> Element {
    Element::new(tag, TagNamespace::MathMl)
}

pub fn custom(name: &str, ns: TagNamespace) -> Element {
    Element::unknown(name, ns)
}

pub fn attr(name: &str, value: &str) -> Attribute {
    Attribute::new(name, value)
}

pub fn xlink(name: &str, value: &str) -> Attribute {
    Attribute::with_namespace(AttrNamespace::XLink, name, value)
}

pub fn el(elem: Element) -> Node {
    Node::element(elem)
}

/// Wrap `children` in `<html><body>`.
pub fn in_body(children: Vec<Node>) -> Node {
    let mut body = html(Tag::Body);
    body.children = children;
    el(html(Tag::Html).with_child(el(body)))
}

/// Every element under `root` (inclusive), in document order.
pub fn elements(root: &Handle) -> Vec<Handle> {
    let mut out = vec![];
    let mut todo = vec![root.clone()];
    while let Some(node) = todo.pop() {
        if node.is_element() {
            out.push(node.clone());
        }
        todo.extend(node.children.borrow().iter().rev().cloned());
    }
    out
}

/// The first element called `name`.
pub fn find(root: &Handle, name: &str) -> Handle {
    elements(root)
        .into_iter()
        .find(|node| node.name().map(|n| &**n) == Some(name))
        .unwrap_or_else(|| panic!("no <{}> in tree", name))
}

/// An indented outline of the tree, one node per line.
///
/// ```text
/// <html> {http://www.w3.org/1999/xhtml} xmlns=...
///   lang="en"
///   "text"
/// ```
pub fn dump(root: &Handle) -> String {
    let mut out = String::new();
    let mut todo = vec![(root.clone(), 0)];
    while let Some((node, depth)) = todo.pop() {
        let indent = "  ".repeat(depth);
        match node.data {
            NodeData::Document => out.push_str("#document\n"),
            NodeData::Element { ref name, .. } => {
                write!(out, "{}<{}>", indent, name).unwrap();
                if let Some(ns) = node.namespace() {
                    write!(out, " {{{}}}", ns.href()).unwrap();
                }
                for decl in node.namespace_declarations() {
                    write!(out, " {:?}", decl).unwrap();
                }
                out.push('\n');
                for a in node.attributes() {
                    let line = match a.ns {
                        Some(ref ns) => format!("{{{}}}{}", ns.href(), a.name),
                        None => a.name.to_string(),
                    };
                    writeln!(out, "{}  {}={:?}", indent, line, &*a.value).unwrap();
                }
            },
            NodeData::Text { ref contents } => {
                writeln!(out, "{}{:?}", indent, &**contents).unwrap()
            },
            NodeData::Comment { ref contents } => {
                writeln!(out, "{}<!-- {} -->", indent, contents).unwrap()
            },
            NodeData::CData { ref contents } => {
                writeln!(out, "{}<![CDATA[{}]]>", indent, contents).unwrap()
            },
        }
        let child_depth = if matches!(node.data, NodeData::Document) { 0 } else { depth + 1 };
        for child in node.children.borrow().iter().rev() {
            todo.push((child.clone(), child_depth));
        }
    }
    out
}
