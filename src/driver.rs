// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! High-level interface to the converter.

use std::default::Default;

use crate::converter::convert_document;
use crate::error::Result;
use crate::interface::TreeSink;
use crate::objtree::{convert_objects, ObjectSink};
use crate::source::Output;
use crate::xmldom::XmlDom;

/// All-encompassing options struct for a conversion.
#[derive(Clone, Debug)]
pub struct ConvertOpts {
    /// Copy the document's doctype into the result?
    pub keep_doctype: bool,

    /// Put elements in the XHTML, SVG or MathML namespace?
    pub namespace_elements: bool,

    /// Rewrite element and attribute names that are not valid XML names?
    pub sanitize_names: bool,

    /// Apply XHTML rules: `prefix:name` tags and attributes, `xmlns:prefix`
    /// declarations, and `lang`/`xml:lang` folding. Implies
    /// `namespace_elements`.
    pub maybe_xhtml: bool,

    /// Initial capacity of the work stack, in entries.
    pub stack_size: usize,

    /// If set, every element gets an attribute of this name holding the
    /// source line of its start tag.
    pub line_number_attr: Option<String>,
}

impl Default for ConvertOpts {
    fn default() -> ConvertOpts {
        ConvertOpts {
            keep_doctype: true,
            namespace_elements: false,
            sanitize_names: true,
            maybe_xhtml: false,
            stack_size: 16 * 1024,
            line_number_attr: None,
        }
    }
}

/// Convert into an `XmlDom`.
///
/// ## Example
///
/// ```rust
/// let dom = convert(&output, Default::default())?;
/// ```
pub fn convert(output: &Output, opts: ConvertOpts) -> Result<XmlDom> {
    convert_to(output, XmlDom::default(), opts)
}

/// Convert and send results to a `TreeSink`.
pub fn convert_to<Sink: TreeSink>(
    output: &Output,
    sink: Sink,
    opts: ConvertOpts,
) -> Result<Sink::Output> {
    convert_document(output, sink, &opts)
}

/// Convert into a host object tree, returning the root object.
pub fn convert_to_objects<Sink: ObjectSink>(
    output: &Output,
    sink: &mut Sink,
    opts: ConvertOpts,
) -> Result<Sink::Node> {
    convert_objects(output, sink, &opts)
}
