// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A simple reference-counted XML DOM with namespace bindings.
//!
//! Nodes own their children and hold weak references to their parents, so
//! handles can outlive the document. Element namespaces are real bindings:
//! each one is declared on exactly one element and is visible to that
//! element's descendants, the way an XML serializer would need them.
//!
//! ```text
//! html              xmlns="http://www.w3.org/1999/xhtml"
//!  +- body
//!      +- svg       xmlns="http://www.w3.org/2000/svg"
//!          +- "text"
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

use string_cache::DefaultAtom;
use tendril::StrTendril;

use crate::error::Result;
use crate::interface::TreeSink;

pub use self::dict::{Dict, Name};

mod dict;

pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

struct NsDef {
    href: DefaultAtom,
    prefix: Option<Name>,
}

/// A namespace binding: a URI and the prefix it is declared under.
///
/// Clones refer to the same binding; two bindings declaring the same URI on
/// different elements are distinct.
#[derive(Clone)]
pub struct Namespace(Rc<NsDef>);

impl Namespace {
    fn new(href: &str, prefix: Option<Name>) -> Namespace {
        Namespace(Rc::new(NsDef {
            href: DefaultAtom::from(href),
            prefix,
        }))
    }

    pub fn href(&self) -> &str {
        &self.0.href
    }

    /// `None` for a default namespace declaration.
    pub fn prefix(&self) -> Option<&str> {
        self.0.prefix.as_deref()
    }

    pub fn same_binding(&self, other: &Namespace) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn key(&self) -> *const NsDef {
        Rc::as_ptr(&self.0)
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.prefix() {
            Some(prefix) => write!(f, "xmlns:{}={:?}", prefix, self.href()),
            None => write!(f, "xmlns={:?}", self.href()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Attribute {
    pub name: Name,
    pub ns: Option<Namespace>,
    pub value: StrTendril,
}

/// The different kinds of nodes in the DOM.
pub enum NodeData {
    /// The `Document` itself; its children are the root element and any
    /// comments around it.
    Document,

    Element {
        name: Name,
        namespace: RefCell<Option<Namespace>>,
        /// Bindings declared on this element.
        ns_defs: RefCell<Vec<Namespace>>,
        attrs: RefCell<Vec<Attribute>>,
        line: u64,
    },

    Text { contents: StrTendril },

    Comment { contents: StrTendril },

    CData { contents: StrTendril },
}

/// A DOM node.
pub struct Node {
    pub parent: Cell<Option<WeakHandle>>,
    pub children: RefCell<Vec<Handle>>,
    pub data: NodeData,
}

/// Reference to a DOM node.
pub type Handle = Rc<Node>;

/// Weak reference to a DOM node, used for parent pointers.
pub type WeakHandle = Weak<Node>;

impl Node {
    pub fn new(data: NodeData) -> Handle {
        Rc::new(Node {
            data,
            parent: Cell::new(None),
            children: RefCell::new(Vec::new()),
        })
    }

    pub fn parent(&self) -> Option<Handle> {
        let parent = self.parent.take();
        self.parent.set(parent.clone());
        parent.and_then(|weak| weak.upgrade())
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element { .. })
    }

    pub fn name(&self) -> Option<&Name> {
        match self.data {
            NodeData::Element { ref name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn namespace(&self) -> Option<Namespace> {
        match self.data {
            NodeData::Element { ref namespace, .. } => namespace.borrow().clone(),
            _ => None,
        }
    }

    pub fn namespace_declarations(&self) -> Vec<Namespace> {
        match self.data {
            NodeData::Element { ref ns_defs, .. } => ns_defs.borrow().clone(),
            _ => Vec::new(),
        }
    }

    pub fn attributes(&self) -> Vec<Attribute> {
        match self.data {
            NodeData::Element { ref attrs, .. } => attrs.borrow().clone(),
            _ => Vec::new(),
        }
    }

    /// Look up an attribute by namespace URI (`None` for plain attributes)
    /// and local name.
    pub fn get_attribute(&self, ns_href: Option<&str>, local: &str) -> Option<StrTendril> {
        let attrs = match self.data {
            NodeData::Element { ref attrs, .. } => attrs.borrow(),
            _ => return None,
        };
        attrs
            .iter()
            .find(|attr| &*attr.name == local && attr.ns.as_ref().map(Namespace::href) == ns_href)
            .map(|attr| attr.value.clone())
    }

    /// Source line of an element's start tag.
    pub fn line(&self) -> Option<u64> {
        match self.data {
            NodeData::Element { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Contents of a text, comment or CDATA node.
    pub fn text(&self) -> Option<&StrTendril> {
        match self.data {
            NodeData::Text { ref contents } |
            NodeData::Comment { ref contents } |
            NodeData::CData { ref contents } => Some(contents),
            _ => None,
        }
    }

    /// Concatenated text of all descendant text and CDATA nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut nodes: Vec<Handle> = self.children.borrow().iter().rev().cloned().collect();
        while let Some(node) = nodes.pop() {
            match node.data {
                NodeData::Text { ref contents } | NodeData::CData { ref contents } => {
                    out.push_str(contents)
                },
                _ => nodes.extend(node.children.borrow().iter().rev().cloned()),
            }
        }
        out
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut nodes = mem::take(&mut *self.children.borrow_mut());
        while let Some(node) = nodes.pop() {
            let children = mem::take(&mut *node.children.borrow_mut());
            nodes.extend(children);
        }
    }
}

impl fmt::Debug for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            NodeData::Document => f.write_str("Document"),
            NodeData::Element {
                ref name,
                ref namespace,
                ref attrs,
                ..
            } => f
                .debug_struct("Element")
                .field("name", name)
                .field("namespace", &*namespace.borrow())
                .field("attrs", &*attrs.borrow())
                .finish(),
            NodeData::Text { ref contents } => f.debug_tuple("Text").field(contents).finish(),
            NodeData::Comment { ref contents } => f.debug_tuple("Comment").field(contents).finish(),
            NodeData::CData { ref contents } => f.debug_tuple("CData").field(contents).finish(),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Node")
            .field("data", &self.data)
            .field("children", &self.children)
            .finish()
    }
}

/// Append a parentless node to another node's children.
fn append(new_parent: &Handle, child: Handle) {
    let previous_parent = child.parent.replace(Some(Rc::downgrade(new_parent)));
    debug_assert!(previous_parent.is_none());
    new_parent.children.borrow_mut().push(child);
}

/// If the node has a parent, get it and this node's position in its children.
fn get_parent_and_index(target: &Handle) -> Option<(Handle, usize)> {
    let parent = target.parent()?;
    let i = parent
        .children
        .borrow()
        .iter()
        .position(|child| Rc::ptr_eq(child, target))?;
    Some((parent, i))
}

fn remove_from_parent(target: &Handle) {
    if let Some((parent, i)) = get_parent_and_index(target) {
        parent.children.borrow_mut().remove(i);
        target.parent.set(None);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Doctype {
    pub name: StrTendril,
    pub public_id: StrTendril,
    pub system_id: StrTendril,
}

/// A converted document.
pub struct XmlDom {
    /// The `Document` itself.
    pub document: Handle,

    /// The internal DTD subset, if the source had a doctype and it was kept.
    pub doctype: Option<Doctype>,

    dict: Dict,
    xml_ns: Namespace,
}

impl Default for XmlDom {
    fn default() -> XmlDom {
        XmlDom {
            document: Node::new(NodeData::Document),
            doctype: None,
            dict: Dict::new(),
            xml_ns: Namespace::new(XML_NAMESPACE, None),
        }
    }
}

impl fmt::Debug for XmlDom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("XmlDom")
            .field("doctype", &self.doctype)
            .field("document", &self.document)
            .finish()
    }
}

impl XmlDom {
    pub fn new() -> XmlDom {
        XmlDom::default()
    }

    /// The document element.
    pub fn root(&self) -> Option<Handle> {
        self.document
            .children
            .borrow()
            .iter()
            .find(|node| node.is_element())
            .cloned()
    }

    pub fn dict(&self) -> &Dict {
        &self.dict
    }

    /// The binding for `prefix` visible at `node`, walking up through its
    /// ancestors. `xml` is always bound.
    pub fn search_namespace(&self, node: &Handle, prefix: &str) -> Option<Namespace> {
        if prefix == "xml" {
            return Some(self.xml_ns.clone());
        }
        let mut current = Some(node.clone());
        while let Some(node) = current {
            if let NodeData::Element { ref ns_defs, .. } = node.data {
                let found = ns_defs
                    .borrow()
                    .iter()
                    .find(|ns| ns.prefix() == Some(prefix))
                    .cloned();
                if found.is_some() {
                    return found;
                }
            }
            current = node.parent();
        }
        None
    }

    /// An independent copy of the whole document.
    ///
    /// Namespace bindings are recreated on the copies of the elements that
    /// declare them and every reference is pointed at the new binding.
    pub fn deep_copy(&self) -> Result<XmlDom> {
        let mut copy = XmlDom::new();
        copy.doctype = self.doctype.clone();

        let mut bindings: HashMap<*const NsDef, Namespace> = HashMap::new();
        bindings.insert(self.xml_ns.key(), copy.xml_ns.clone());

        let mut work: Vec<(Handle, Handle)> = self
            .document
            .children
            .borrow()
            .iter()
            .rev()
            .map(|child| (child.clone(), copy.document.clone()))
            .collect();

        while let Some((source, parent)) = work.pop() {
            let node = match source.data {
                NodeData::Document => continue,
                NodeData::Element {
                    ref name,
                    ref namespace,
                    ref ns_defs,
                    ref attrs,
                    line,
                } => {
                    let mut defs = Vec::with_capacity(ns_defs.borrow().len());
                    for ns in ns_defs.borrow().iter() {
                        let prefix = match ns.prefix() {
                            Some(prefix) => Some(copy.dict.intern(prefix)?),
                            None => None,
                        };
                        let new_ns = Namespace::new(ns.href(), prefix);
                        bindings.insert(ns.key(), new_ns.clone());
                        defs.push(new_ns);
                    }
                    let namespace = match *namespace.borrow() {
                        Some(ref ns) => Some(copy.remap(&mut bindings, ns)?),
                        None => None,
                    };
                    let mut new_attrs = Vec::with_capacity(attrs.borrow().len());
                    for attr in attrs.borrow().iter() {
                        let ns = match attr.ns {
                            Some(ref ns) => Some(copy.remap(&mut bindings, ns)?),
                            None => None,
                        };
                        new_attrs.push(Attribute {
                            name: copy.dict.intern(&attr.name)?,
                            ns,
                            value: attr.value.clone(),
                        });
                    }
                    Node::new(NodeData::Element {
                        name: copy.dict.intern(name)?,
                        namespace: RefCell::new(namespace),
                        ns_defs: RefCell::new(defs),
                        attrs: RefCell::new(new_attrs),
                        line,
                    })
                },
                NodeData::Text { ref contents } => Node::new(NodeData::Text {
                    contents: contents.clone(),
                }),
                NodeData::Comment { ref contents } => Node::new(NodeData::Comment {
                    contents: contents.clone(),
                }),
                NodeData::CData { ref contents } => Node::new(NodeData::CData {
                    contents: contents.clone(),
                }),
            };
            work.extend(
                source
                    .children
                    .borrow()
                    .iter()
                    .rev()
                    .map(|child| (child.clone(), node.clone())),
            );
            append(&parent, node);
        }
        Ok(copy)
    }

    // A binding declared outside the copied tree gets a fresh, undeclared twin.
    fn remap(
        &mut self,
        bindings: &mut HashMap<*const NsDef, Namespace>,
        ns: &Namespace,
    ) -> Result<Namespace> {
        if let Some(mapped) = bindings.get(&ns.key()) {
            return Ok(mapped.clone());
        }
        let prefix = match ns.prefix() {
            Some(prefix) => Some(self.dict.intern(prefix)?),
            None => None,
        };
        let mapped = Namespace::new(ns.href(), prefix);
        bindings.insert(ns.key(), mapped.clone());
        Ok(mapped)
    }
}

impl TreeSink for XmlDom {
    type Handle = Handle;
    type Namespace = Namespace;
    type Name = Name;
    type Output = Self;

    fn finish(self) -> Self {
        self
    }

    fn intern(&mut self, name: &str) -> Result<Name> {
        self.dict.intern(name)
    }

    fn create_element(&mut self, name: Name, line: u64) -> Result<Handle> {
        Ok(Node::new(NodeData::Element {
            name,
            namespace: RefCell::new(None),
            ns_defs: RefCell::new(Vec::new()),
            attrs: RefCell::new(Vec::new()),
            line,
        }))
    }

    fn create_text(&mut self, text: &StrTendril) -> Result<Handle> {
        Ok(Node::new(NodeData::Text {
            contents: text.clone(),
        }))
    }

    fn create_comment(&mut self, text: &StrTendril) -> Result<Handle> {
        Ok(Node::new(NodeData::Comment {
            contents: text.clone(),
        }))
    }

    fn create_cdata(&mut self, text: &StrTendril) -> Result<Handle> {
        Ok(Node::new(NodeData::CData {
            contents: text.clone(),
        }))
    }

    fn new_namespace(
        &mut self,
        node: &Handle,
        href: &str,
        prefix: Option<&str>,
    ) -> Result<Option<Namespace>> {
        // `xml` is predefined and may not be rebound.
        if prefix == Some("xml") {
            return Ok(None);
        }
        let ns_defs = match node.data {
            NodeData::Element { ref ns_defs, .. } => ns_defs,
            _ => return Err(structural!("Namespaces can only be declared on elements")),
        };
        if ns_defs.borrow().iter().any(|ns| ns.prefix() == prefix) {
            return Ok(None);
        }
        let prefix = match prefix {
            Some(prefix) => Some(self.dict.intern(prefix)?),
            None => None,
        };
        let ns = Namespace::new(href, prefix);
        ns_defs.borrow_mut().push(ns.clone());
        Ok(Some(ns))
    }

    fn search_namespace(&self, node: &Handle, prefix: &str) -> Option<Namespace> {
        XmlDom::search_namespace(self, node, prefix)
    }

    fn set_namespace(&mut self, node: &Handle, ns: Option<Namespace>) {
        if let NodeData::Element { ref namespace, .. } = node.data {
            *namespace.borrow_mut() = ns;
        }
    }

    fn namespace_of(&self, node: &Handle) -> Option<Namespace> {
        node.namespace()
    }

    fn set_attribute(
        &mut self,
        node: &Handle,
        ns: Option<&Namespace>,
        name: Name,
        value: &StrTendril,
    ) -> Result<()> {
        let attrs = match node.data {
            NodeData::Element { ref attrs, .. } => attrs,
            _ => return Err(structural!("Attributes can only be set on elements")),
        };
        let mut attrs = attrs.borrow_mut();
        let href = ns.map(Namespace::href);
        if let Some(existing) = attrs
            .iter_mut()
            .find(|attr| *attr.name == *name && attr.ns.as_ref().map(Namespace::href) == href)
        {
            existing.value = value.clone();
            return Ok(());
        }
        attrs.push(Attribute {
            name,
            ns: ns.cloned(),
            value: value.clone(),
        });
        Ok(())
    }

    fn get_attribute(&self, node: &Handle, name: &Name) -> Option<StrTendril> {
        node.get_attribute(None, name)
    }

    fn append(&mut self, parent: &Handle, child: Handle) {
        append(parent, child);
    }

    fn set_root(&mut self, root: &Handle) -> Result<()> {
        if !root.is_element() {
            return Err(structural!("The document root must be an element"));
        }
        if let Some(old) = self.root() {
            if Rc::ptr_eq(&old, root) {
                return Ok(());
            }
            remove_from_parent(&old);
        }
        remove_from_parent(root);
        append(&self.document, root.clone());
        Ok(())
    }

    fn add_prev_sibling(&mut self, sibling: &Handle, node: Handle) -> Result<()> {
        let (parent, i) = match get_parent_and_index(sibling) {
            Some(found) => found,
            None => return Err(structural!("Failed to add sibling to root node")),
        };
        node.parent.set(Some(Rc::downgrade(&parent)));
        parent.children.borrow_mut().insert(i, node);
        Ok(())
    }

    fn add_next_sibling(&mut self, sibling: &Handle, node: Handle) -> Result<()> {
        match sibling.parent() {
            Some(parent) => {
                append(&parent, node);
                Ok(())
            },
            None => Err(structural!("Failed to add sibling to root node")),
        }
    }

    fn create_internal_subset(
        &mut self,
        name: &StrTendril,
        public_id: &StrTendril,
        system_id: &StrTendril,
    ) -> Result<()> {
        self.doctype = Some(Doctype {
            name: name.clone(),
            public_id: public_id.clone(),
            system_id: system_id.clone(),
        });
        Ok(())
    }

    fn discard(&mut self, node: Handle) {
        remove_from_parent(&node);
    }
}
