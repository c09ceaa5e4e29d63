// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Copying source attributes onto target elements.
//!
//! Prefixed attribute names (under XHTML rules) may refer to a prefix that
//! is declared by a later attribute of the same element, so resolution runs
//! in up to two passes: the first pass flags attributes whose prefix is not
//! yet known, the second handles only the flagged ones.

use std::borrow::Cow;

use log::{debug, trace};

use super::names::{sanitize_name, split_prefix};
use super::Converter;
use crate::error::Result;
use crate::interface::TreeSink;
use crate::source::{AttrNamespace, Attribute, Element};

/// Which source, if any, set the element's plain `lang` attribute.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(super) enum LangState {
    Absent,
    FromXmlLang,
    FromLang,
}

enum Step<N> {
    Skip,
    Set(Option<N>),
}

// `p:local` -> `local`, keeping a borrow where there is one.
fn suffix(name: Cow<'_, str>, start: usize) -> Cow<'_, str> {
    match name {
        Cow::Borrowed(name) => Cow::Borrowed(&name[start..]),
        Cow::Owned(name) => Cow::Owned(name[start..].to_owned()),
    }
}

impl<'o, Sink: TreeSink> Converter<'o, Sink> {
    /// Set every attribute of `elem` on `node`.
    pub(super) fn create_attributes(
        &mut self,
        node: &Sink::Handle,
        elem: &Element,
        parent: Option<&Sink::Handle>,
    ) -> Result<()> {
        let mut lang = LangState::Absent;
        let needs_reprocess = self.attributes_pass(node, elem, parent, false, &mut lang)?;
        if needs_reprocess {
            debug!("second attribute pass on <{}>", elem.original_tag_name());
            self.attributes_pass(node, elem, parent, true, &mut lang)?;
        }
        Ok(())
    }

    fn attributes_pass(
        &mut self,
        node: &Sink::Handle,
        elem: &Element,
        parent: Option<&Sink::Handle>,
        reprocess: bool,
        lang: &mut LangState,
    ) -> Result<bool> {
        let mut needs_reprocess = false;
        for attr in elem.attributes.iter() {
            if reprocess {
                if !attr.take_reprocess() {
                    continue;
                }
            } else {
                attr.clear_reprocess();
            }

            let mut name: Cow<str> = Cow::Borrowed(&*attr.name);
            let ns = match self.classify(node, attr, &mut name, lang)? {
                Step::Skip => continue,
                Step::Set(ns) => ns,
            };

            let (ns, name) = match self.resolve_prefix(node, parent, name, ns, reprocess) {
                Some(resolved) => resolved,
                None => {
                    trace!("deferring attribute {}", attr.name);
                    attr.mark_reprocess();
                    needs_reprocess = true;
                    continue;
                },
            };

            let name = if self.opts.sanitize_names {
                sanitize_name(&name).into_owned()
            } else {
                name.into_owned()
            };

            if self.opts.maybe_xhtml && ns.is_none() && name == "lang" {
                if *lang == LangState::FromLang {
                    continue;
                }
                *lang = LangState::FromLang;
                let lang_name = self.lang_attribute.clone();
                self.sink.set_attribute(node, None, lang_name, &attr.value)?;
            } else {
                let interned = self.sink.intern(&name)?;
                self.sink.set_attribute(node, ns.as_ref(), interned, &attr.value)?;
            }
        }
        Ok(needs_reprocess)
    }

    /// Apply the rules for the parser's namespace classification. May rewrite
    /// `name`; returns the namespace to use, or `Skip` when the attribute has
    /// been consumed or dropped.
    fn classify(
        &mut self,
        node: &Sink::Handle,
        attr: &Attribute,
        name: &mut Cow<str>,
        lang: &mut LangState,
    ) -> Result<Step<Sink::Namespace>> {
        match attr.attr_namespace {
            AttrNamespace::XLink => Ok(Step::Set(Some(self.ensure_xlink(node)?))),
            AttrNamespace::Xml => {
                let xml = match self.ensure_xml(node) {
                    Some(xml) => xml,
                    None => return Err(structural!("The xml namespace is not in scope")),
                };
                if self.opts.maybe_xhtml && *name == "lang" {
                    self.set_lang_from_xml_lang(node, attr, lang)?;
                    return Ok(Step::Skip);
                }
                Ok(Step::Set(Some(xml)))
            },
            AttrNamespace::Xmlns => {
                if name.starts_with("xlink") {
                    // The value is ignored so xlink is never rebound.
                    self.ensure_xlink(node)?;
                    return Ok(Step::Skip);
                }
                if name.starts_with("xmlns") {
                    // Element namespaces come from tag names alone.
                    return Ok(Step::Skip);
                }
                Ok(Step::Set(None))
            },
            AttrNamespace::None => {
                if self.opts.maybe_xhtml && *name == "xml:lang" {
                    self.set_lang_from_xml_lang(node, attr, lang)?;
                    return Ok(Step::Skip);
                }
                let declared = match name.strip_prefix("xmlns") {
                    Some(rest) => rest,
                    None => return Ok(Step::Set(None)),
                };
                if declared.is_empty() {
                    return Ok(Step::Skip);
                }
                let prefix = match declared.strip_prefix(':') {
                    Some(prefix) => prefix,
                    None => return Ok(Step::Set(None)),
                };
                if prefix.is_empty() {
                    return Ok(Step::Skip);
                }
                if self.opts.maybe_xhtml {
                    // A prefix this element already declares keeps its
                    // first binding.
                    if self.sink.new_namespace(node, &attr.value, Some(prefix))?.is_none() {
                        debug!("ignoring redeclaration of namespace prefix {}", prefix);
                    }
                    return Ok(Step::Skip);
                }
                let rewritten = format!("xmlns_{}", prefix);
                *name = Cow::Owned(rewritten);
                Ok(Step::Set(None))
            },
        }
    }

    fn set_lang_from_xml_lang(
        &mut self,
        node: &Sink::Handle,
        attr: &Attribute,
        lang: &mut LangState,
    ) -> Result<()> {
        if *lang == LangState::Absent {
            *lang = LangState::FromXmlLang;
            let lang_name = self.lang_attribute.clone();
            self.sink.set_attribute(node, None, lang_name, &attr.value)?;
        }
        Ok(())
    }

    /// Under XHTML rules, bind `prefix:local` names to the namespace the
    /// prefix refers to. `None` means the prefix is unknown on a first pass
    /// and the attribute must wait for the second one.
    fn resolve_prefix<'n>(
        &self,
        node: &Sink::Handle,
        parent: Option<&Sink::Handle>,
        name: Cow<'n, str>,
        ns: Option<Sink::Namespace>,
        reprocess: bool,
    ) -> Option<(Option<Sink::Namespace>, Cow<'n, str>)> {
        if !self.opts.maybe_xhtml {
            return Some((ns, name));
        }
        let (prefix_len, found) = match split_prefix(&name) {
            Some((prefix, _)) => (
                prefix.len(),
                self.find_namespace_by_prefix(node, parent, prefix),
            ),
            None => return Some((ns, name)),
        };
        match found {
            Some(found) => Some((Some(found), suffix(name, prefix_len + 1))),
            None if !reprocess => None,
            None => Some((ns, Cow::Owned(name.replacen(':', "_", 1)))),
        }
    }
}
