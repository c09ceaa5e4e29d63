// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// A diagnostic tagged with the file and line that raised it.
macro_rules! errmsg {
    ($msg:expr) => {
        concat!("File: ", file!(), " Line: ", line!(), ": ", $msg)
    };
}

/// `ConvertError::OutOfMemory` carrying a tagged message.
macro_rules! nomem {
    () => {
        $crate::error::ConvertError::OutOfMemory(::std::borrow::Cow::Borrowed(errmsg!(
            "Out of memory"
        )))
    };
    ($msg:expr) => {
        $crate::error::ConvertError::OutOfMemory(::std::borrow::Cow::Borrowed(errmsg!($msg)))
    };
}

/// `ConvertError::StructuralFailure` carrying a tagged message.
macro_rules! structural {
    ($msg:expr) => {
        $crate::error::ConvertError::StructuralFailure(::std::borrow::Cow::Borrowed(errmsg!(
            $msg
        )))
    };
}
