// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-document name dictionary.

use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::error::Result;

/// An interned tag or attribute name.
///
/// Names handed out by the same `Dict` for equal strings share storage, so
/// `ptr_eq` is a valid identity test within one document.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Name(Rc<str>);

impl Name {
    pub fn ptr_eq(&self, other: &Name) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Default)]
pub struct Dict {
    names: HashSet<Rc<str>>,
}

impl Dict {
    pub fn new() -> Dict {
        Dict::default()
    }

    pub fn intern(&mut self, name: &str) -> Result<Name> {
        if let Some(existing) = self.names.get(name) {
            return Ok(Name(existing.clone()));
        }
        self.names
            .try_reserve(1)
            .map_err(|_| nomem!("Out of memory interning a name"))?;
        let name: Rc<str> = Rc::from(name);
        self.names.insert(name.clone());
        Ok(Name(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
