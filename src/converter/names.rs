// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Element and attribute naming.

use std::borrow::Cow;

use crate::source::{normalize_svg_tag_name, Element, Tag, TagNamespace};

/// Longest custom tag name kept, in bytes.
pub const MAX_TAG_NAME_SZ: usize = 100;

// Only an ASCII subset of the XML name grammar is accepted. The checks run
// directly on UTF-8 bytes, so every byte of a multi-byte character is
// replaced on its own.
fn valid_first_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn valid_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.'
}

/// Replace every byte that may not appear in a name with `_`.
pub fn sanitize_name(name: &str) -> Cow<'_, str> {
    let ok = |(i, &b): (usize, &u8)| {
        if i == 0 {
            valid_first_byte(b)
        } else {
            valid_byte(b)
        }
    };
    let bytes = name.as_bytes();
    if bytes.iter().enumerate().all(ok) {
        return Cow::Borrowed(name);
    }
    let sanitized: String = bytes
        .iter()
        .enumerate()
        .map(|item| if ok(item) { *item.1 as char } else { '_' })
        .collect();
    Cow::Owned(sanitized)
}

/// Split `prefix:local` at the first colon. Names without a colon, or with
/// nothing after it, are not prefixed.
pub fn split_prefix(name: &str) -> Option<(&str, &str)> {
    let colon = name.find(':')?;
    if colon + 1 >= name.len() {
        return None;
    }
    Some((&name[..colon], &name[colon + 1..]))
}

fn truncate(name: &str, max: usize) -> &str {
    if name.len() <= max {
        return name;
    }
    let mut end = max;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// How an element's target name is obtained.
#[derive(Debug, PartialEq, Eq)]
pub enum TagSpelling<'a> {
    /// The canonical name of a known tag.
    Standard(Tag),
    /// The camel-case form of an SVG element.
    Svg(&'static str),
    /// A tag outside the table, spelled as in the input.
    Custom {
        name: Cow<'a, str>,
        prefix: Option<&'a str>,
    },
}

/// Decide the target name of `elem`.
///
/// SVG adjustment wins over everything else, so SVG elements the parser did
/// not recognize still get their canonical spelling. Custom names are
/// truncated, split at a prefix colon when `split_prefixes` is set, and
/// sanitized when asked.
pub fn classify_tag(elem: &Element, split_prefixes: bool, sanitize: bool) -> TagSpelling<'_> {
    if elem.tag_namespace == TagNamespace::Svg {
        if let Some(adjusted) = normalize_svg_tag_name(elem.original_tag_name()) {
            return TagSpelling::Svg(adjusted);
        }
    }
    if elem.tag != Tag::Unknown {
        return TagSpelling::Standard(elem.tag);
    }

    let raw = truncate(elem.original_tag_name(), MAX_TAG_NAME_SZ);
    let (prefix, local) = match split_prefixes.then(|| split_prefix(raw)).flatten() {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, raw),
    };
    let name = if sanitize {
        match sanitize_name(local) {
            Cow::Borrowed("") => Cow::Borrowed("_"),
            name => name,
        }
    } else {
        Cow::Borrowed(local)
    };
    TagSpelling::Custom { name, prefix }
}
