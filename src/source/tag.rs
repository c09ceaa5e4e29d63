// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The closed table of tags the parser knows about.

include!(concat!(env!("OUT_DIR"), "/tags.rs"));

impl Tag {
    /// Canonical lowercase name, or `None` for `Tag::Unknown`.
    pub fn name(self) -> Option<&'static str> {
        TAG_NAMES.get(self as usize).copied()
    }

    /// Dense index, `0..TAG_COUNT` for known tags.
    pub fn index(self) -> usize {
        self as usize
    }

    /// ASCII case-insensitive lookup.
    pub fn from_name(name: &str) -> Tag {
        if let Some(tag) = TAG_LOOKUP.get(name) {
            return *tag;
        }
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            let lower = name.to_ascii_lowercase();
            if let Some(tag) = TAG_LOOKUP.get(&*lower) {
                return *tag;
            }
        }
        Tag::Unknown
    }

    /// Every known tag, in table order.
    pub fn all() -> &'static [Tag] {
        &ALL_TAGS
    }
}

/// Camel-case spelling of an SVG element name the parser lowercased.
///
/// `foreignobject` becomes `foreignObject`; names without an adjustment
/// return `None`.
pub fn normalize_svg_tag_name(name: &str) -> Option<&'static str> {
    if name.len() > SVG_TAG_MAX_LEN {
        return None;
    }
    if let Some(adjusted) = SVG_TAG_NAMES.get(name) {
        return Some(*adjusted);
    }
    let lower = name.to_ascii_lowercase();
    SVG_TAG_NAMES.get(&*lower).copied()
}
