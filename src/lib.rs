// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turns the parse tree produced by an HTML5 parser into a tree you can
//! actually work with.
//!
//! Two outputs are supported:
//!
//!   * an XML-style DOM with real namespace bindings ([`xmldom::XmlDom`], or
//!     any other backend implementing [`TreeSink`]), and
//!   * a plain tag/object tree built through the callbacks of an
//!     [`ObjectSink`].
//!
//! The conversion walks the source tree exactly once with an explicit work
//! stack, so hostile input nesting cannot exhaust the call stack. Either a
//! complete tree comes back, or an error does and every node created so far
//! has been released.
//!
//! ```text
//! let dom = html5tree::convert(&output, ConvertOpts::default())?;
//! ```

pub extern crate tendril;

#[macro_use]
mod macros;

pub mod driver;
pub mod error;
pub mod interface;
pub mod objtree;
pub mod source;
pub mod stack;
pub mod xmldom;

mod converter;

pub use crate::driver::{convert, convert_to, convert_to_objects, ConvertOpts};
pub use crate::error::{ConvertError, Result};
pub use crate::interface::TreeSink;
pub use crate::objtree::{ObjectSink, ObjectTree};
pub use crate::source::{Output, Tag, TagNamespace};
pub use crate::xmldom::XmlDom;
