// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The interface the converter uses to build a target tree.

use tendril::StrTendril;

use crate::error::Result;

/// Types which can build an XML-style document with namespace bindings.
///
/// Every creation method may fail with `ConvertError::OutOfMemory`; the
/// converter then unwinds through `discard` and never calls `finish`.
pub trait TreeSink {
    /// Reference to a node owned by the sink.
    type Handle: Clone;

    /// A namespace binding declared on some element.
    type Namespace: Clone;

    /// An interned name.
    type Name: Clone;

    /// The overall result of building the tree.
    type Output;

    /// Consume this sink and return the finished document.
    fn finish(self) -> Self::Output;

    /// Intern a tag or attribute name in the document's dictionary.
    fn intern(&mut self, name: &str) -> Result<Self::Name>;

    /// Create a detached element. `line` is the source line of its start tag.
    fn create_element(&mut self, name: Self::Name, line: u64) -> Result<Self::Handle>;

    fn create_text(&mut self, text: &StrTendril) -> Result<Self::Handle>;

    fn create_comment(&mut self, text: &StrTendril) -> Result<Self::Handle>;

    fn create_cdata(&mut self, text: &StrTendril) -> Result<Self::Handle>;

    /// Declare `prefix` (or the default namespace for `None`) as `href` on
    /// `node`.
    ///
    /// Returns `Ok(None)` if `node` already declares that prefix.
    fn new_namespace(
        &mut self,
        node: &Self::Handle,
        href: &str,
        prefix: Option<&str>,
    ) -> Result<Option<Self::Namespace>>;

    /// Find the binding for `prefix` visible at `node`: its own declarations
    /// first, then those of its ancestors.
    fn search_namespace(&self, node: &Self::Handle, prefix: &str) -> Option<Self::Namespace>;

    /// Put `node` itself in a namespace.
    fn set_namespace(&mut self, node: &Self::Handle, ns: Option<Self::Namespace>);

    fn namespace_of(&self, node: &Self::Handle) -> Option<Self::Namespace>;

    /// Set an attribute, replacing the value if an attribute with the same
    /// namespace and name is already present.
    fn set_attribute(
        &mut self,
        node: &Self::Handle,
        ns: Option<&Self::Namespace>,
        name: Self::Name,
        value: &StrTendril,
    ) -> Result<()>;

    /// Value of an attribute outside any namespace.
    fn get_attribute(&self, node: &Self::Handle, name: &Self::Name) -> Option<StrTendril>;

    /// Append a detached node as the last child of `parent`.
    fn append(&mut self, parent: &Self::Handle, child: Self::Handle);

    /// Make `root` the document element.
    fn set_root(&mut self, root: &Self::Handle) -> Result<()>;

    /// Insert a detached node right before `sibling`.
    fn add_prev_sibling(&mut self, sibling: &Self::Handle, node: Self::Handle) -> Result<()>;

    /// Append a detached node after the last sibling of `sibling`.
    fn add_next_sibling(&mut self, sibling: &Self::Handle, node: Self::Handle) -> Result<()>;

    /// Record the document type declaration.
    fn create_internal_subset(
        &mut self,
        name: &StrTendril,
        public_id: &StrTendril,
        system_id: &StrTendril,
    ) -> Result<()>;

    /// Release a node and, if attached to nothing, everything below it.
    fn discard(&mut self, node: Self::Handle);
}
