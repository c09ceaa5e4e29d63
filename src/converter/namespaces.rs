// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Namespace bookkeeping for one conversion.

use log::debug;

use super::Converter;
use crate::error::Result;
use crate::interface::TreeSink;

pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

impl<'o, Sink: TreeSink> Converter<'o, Sink> {
    /// Where document-wide declarations go: the root, or `node` while the
    /// root itself is still being built.
    fn anchor(&self, node: &Sink::Handle) -> Sink::Handle {
        self.root.clone().unwrap_or_else(|| node.clone())
    }

    /// The `xlink` binding, declared on the anchor the first time it is needed.
    pub(super) fn ensure_xlink(&mut self, node: &Sink::Handle) -> Result<Sink::Namespace> {
        if let Some(ref ns) = self.xlink {
            return Ok(ns.clone());
        }
        let anchor = self.anchor(node);
        let ns = match self.sink.new_namespace(&anchor, XLINK_NAMESPACE, Some("xlink"))? {
            Some(ns) => ns,
            // The anchor already declares the prefix itself.
            None => match self.sink.search_namespace(&anchor, "xlink") {
                Some(ns) => ns,
                None => return Err(structural!("Failed to declare the xlink namespace")),
            },
        };
        debug!("declared xlink namespace");
        self.xlink = Some(ns.clone());
        Ok(ns)
    }

    /// The `xml` binding, which the target tree always has in scope.
    pub(super) fn ensure_xml(&mut self, node: &Sink::Handle) -> Option<Sink::Namespace> {
        if self.xml.is_none() {
            let anchor = self.anchor(node);
            self.xml = self.sink.search_namespace(&anchor, "xml");
        }
        self.xml.clone()
    }

    /// Resolve `prefix` for an element that is not attached yet: its own
    /// declarations first, then whatever is in scope at its parent.
    pub(super) fn find_namespace_by_prefix(
        &self,
        node: &Sink::Handle,
        parent: Option<&Sink::Handle>,
        prefix: &str,
    ) -> Option<Sink::Namespace> {
        self.sink
            .search_namespace(node, prefix)
            .or_else(|| parent.and_then(|parent| self.sink.search_namespace(parent, prefix)))
    }
}
