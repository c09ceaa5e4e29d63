// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors raised while converting a parse tree.

use std::borrow::Cow;
use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;

/// Why a conversion was abandoned.
///
/// None of these are recoverable: by the time the caller sees one, every
/// target node built so far has already been released.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConvertError {
    /// An allocation failed: stack growth, node creation or name interning.
    OutOfMemory(Cow<'static, str>),

    /// The source tree contained a node the walker has no conversion for.
    /// This is a defect in the upstream parser.
    UnknownNodeKind(Cow<'static, str>),

    /// The target backend refused an operation, e.g. setting the root.
    StructuralFailure(Cow<'static, str>),
}

impl ConvertError {
    /// The diagnostic message.
    pub fn message(&self) -> &str {
        match *self {
            ConvertError::OutOfMemory(ref msg) |
            ConvertError::UnknownNodeKind(ref msg) |
            ConvertError::StructuralFailure(ref msg) => &**msg,
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConvertError::OutOfMemory(ref msg) => write!(f, "out of memory: {}", msg),
            ConvertError::UnknownNodeKind(ref msg) => write!(f, "unknown node kind: {}", msg),
            ConvertError::StructuralFailure(ref msg) => write!(f, "structural failure: {}", msg),
        }
    }
}

impl Error for ConvertError {}

impl From<TryReserveError> for ConvertError {
    fn from(_: TryReserveError) -> ConvertError {
        nomem!("Out of memory growing the work stack")
    }
}

pub type Result<T> = ::std::result::Result<T, ConvertError>;
