// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate html5tree;

mod util;

use std::default::Default;
use std::rc::Rc;

use html5tree::source::{
    AttrNamespace, Attribute, Document, Node, NodeData as SourceData, Output, Tag, TagNamespace,
};
use html5tree::xmldom::{Handle, XmlDom, XML_NAMESPACE};
use html5tree::{convert, ConvertError, ConvertOpts};

use util::{attr, custom, dump, el, elements, find, html, in_body, math, svg, xlink};

const XHTML: &str = "http://www.w3.org/1999/xhtml";
const SVG: &str = "http://www.w3.org/2000/svg";
const MATHML: &str = "http://www.w3.org/1998/Math/MathML";
const XLINK: &str = "http://www.w3.org/1999/xlink";

fn namespaced() -> ConvertOpts {
    ConvertOpts {
        namespace_elements: true,
        ..Default::default()
    }
}

fn xhtml() -> ConvertOpts {
    ConvertOpts {
        maybe_xhtml: true,
        ..Default::default()
    }
}

fn root(dom: &XmlDom) -> Handle {
    dom.root().expect("no root element")
}

fn child_summary(node: &Handle) -> Vec<String> {
    node.children
        .borrow()
        .iter()
        .map(|child| match child.name() {
            Some(name) => format!("<{}>", name),
            None => child.text().map(|t| t.to_string()).unwrap_or_default(),
        })
        .collect()
}

#[test]
fn children_keep_document_order() {
    let output = Output::new(in_body(vec![
        el(html(Tag::P)),
        Node::text("one"),
        Node::comment("two"),
        el(html(Tag::Div)),
        Node::cdata("three"),
        el(html(Tag::Span)),
        Node::whitespace("\n"),
    ]));
    let dom = convert(&output, Default::default()).unwrap();
    let body = find(&root(&dom), "body");
    assert_eq!(
        child_summary(&body),
        ["<p>", "one", "two", "<div>", "three", "<span>", "\n"]
    );
}

#[test]
fn template_contents_are_children() {
    let template = html(Tag::Template).with_child(el(html(Tag::Li)));
    let output = Output::new(in_body(vec![Node::template(template)]));
    let dom = convert(&output, Default::default()).unwrap();
    let template = find(&root(&dom), "template");
    assert_eq!(child_summary(&template), ["<li>"]);
}

#[test]
fn namespaces_change_only_at_boundaries() {
    let output = Output::new(in_body(vec![
        el(svg(Tag::Svg).with_child(el(custom("circle", TagNamespace::Svg)))),
        el(math(Tag::Math).with_child(el(math(Tag::Mi)))),
        el(html(Tag::P)),
    ]));
    let dom = convert(&output, namespaced()).unwrap();
    let root = root(&dom);

    let html_decls = root.namespace_declarations();
    assert_eq!(html_decls.len(), 1);
    assert_eq!(html_decls[0].href(), XHTML);
    assert_eq!(html_decls[0].prefix(), None);

    for name in &["body", "p"] {
        let node = find(&root, name);
        assert!(node.namespace_declarations().is_empty());
        assert!(node.namespace().unwrap().same_binding(&html_decls[0]));
    }

    let svg = find(&root, "svg");
    let svg_decls = svg.namespace_declarations();
    assert_eq!(svg_decls.len(), 1);
    assert_eq!(svg_decls[0].href(), SVG);
    let circle = find(&root, "circle");
    assert!(circle.namespace_declarations().is_empty());
    assert!(circle.namespace().unwrap().same_binding(&svg_decls[0]));

    let math = find(&root, "math");
    assert_eq!(math.namespace_declarations().len(), 1);
    assert_eq!(math.namespace().unwrap().href(), MATHML);
    let mi = find(&root, "mi");
    assert!(mi.namespace().unwrap().same_binding(&math.namespace().unwrap()));

    let declared: usize = elements(&root)
        .iter()
        .map(|node| node.namespace_declarations().len())
        .sum();
    assert_eq!(declared, 3);
}

#[test]
fn no_namespaces_unless_asked() {
    let output = Output::new(in_body(vec![el(svg(Tag::Svg))]));
    let dom = convert(&output, Default::default()).unwrap();
    for node in elements(&root(&dom)) {
        assert!(node.namespace().is_none());
        assert!(node.namespace_declarations().is_empty());
    }
}

#[test]
fn standard_names_are_shared() {
    let output = Output::new(in_body(vec![
        el(html(Tag::P)),
        el(html(Tag::Div).with_child(el(html(Tag::P)))),
    ]));
    let dom = convert(&output, Default::default()).unwrap();
    let ps: Vec<Handle> = elements(&root(&dom))
        .into_iter()
        .filter(|node| node.name().map(|n| &**n) == Some("p"))
        .collect();
    assert_eq!(ps.len(), 2);
    assert!(ps[0].name().unwrap().ptr_eq(ps[1].name().unwrap()));
}

#[test]
fn svg_names_are_camel_cased() {
    let output = Output::new(in_body(vec![el(svg(Tag::Svg)
        .with_child(el(svg(Tag::Foreignobject)))
        .with_child(el(custom("animatecolor", TagNamespace::Svg))))]));
    let dom = convert(&output, Default::default()).unwrap();
    let svg = find(&root(&dom), "svg");
    assert_eq!(child_summary(&svg), ["<foreignObject>", "<animateColor>"]);
}

#[test]
fn custom_names_are_sanitized() {
    let output = Output::new(in_body(vec![
        el(custom("123<bad", TagNamespace::Html)),
        el(custom("my-widget", TagNamespace::Html).with_attr(attr("a<b", "1"))),
    ]));
    let dom = convert(&output, Default::default()).unwrap();
    let body = find(&root(&dom), "body");
    assert_eq!(child_summary(&body), ["<_23_bad>", "<my-widget>"]);
    let widget = find(&body, "my-widget");
    assert_eq!(widget.get_attribute(None, "a_b").as_deref(), Some("1"));

    let raw = ConvertOpts {
        sanitize_names: false,
        ..Default::default()
    };
    let dom = convert(&output, raw).unwrap();
    let body = find(&root(&dom), "body");
    assert_eq!(child_summary(&body), ["<123<bad>", "<my-widget>"]);
}

#[test]
fn forward_prefix_references_resolve() {
    for attrs in vec![
        vec![attr("q:a", "1"), attr("xmlns:q", "http://x")],
        vec![attr("xmlns:q", "http://x"), attr("q:a", "1")],
    ] {
        let mut div = html(Tag::Div);
        div.attributes = attrs;
        let output = Output::new(in_body(vec![el(div)]));
        // Converting twice must not be affected by leftover bookkeeping.
        for _ in 0..2 {
            let dom = convert(&output, xhtml()).unwrap();
            let div = find(&root(&dom), "div");
            let attrs = div.attributes();
            assert_eq!(attrs.len(), 1, "{}", dump(&div));
            assert_eq!(&*attrs[0].name, "a");
            assert_eq!(attrs[0].ns.as_ref().unwrap().href(), "http://x");
            assert_eq!(div.get_attribute(Some("http://x"), "a").as_deref(), Some("1"));
        }
        let div = output.root_element().unwrap().as_element().unwrap().children[0]
            .as_element()
            .unwrap()
            .children[0]
            .as_element()
            .unwrap();
        assert!(div.attributes.iter().all(|a| !a.needs_reprocess()));
    }
}

#[test]
fn prefix_declared_by_an_ancestor() {
    let output = Output::new(el(html(Tag::Html)
        .with_attr(attr("xmlns:q", "http://x"))
        .with_child(el(html(Tag::Body).with_attr(attr("q:b", "2"))))));
    let dom = convert(&output, xhtml()).unwrap();
    let body = find(&root(&dom), "body");
    assert_eq!(body.get_attribute(Some("http://x"), "b").as_deref(), Some("2"));
}

#[test]
fn unknown_prefixes_become_plain_names() {
    let output = Output::new(in_body(vec![el(html(Tag::Div).with_attr(attr("q:b", "v")))]));
    let dom = convert(&output, xhtml()).unwrap();
    let div = find(&root(&dom), "div");
    assert_eq!(div.get_attribute(None, "q_b").as_deref(), Some("v"));
    assert_eq!(div.attributes().len(), 1);
}

#[test]
fn prefixed_tags_under_xhtml_rules() {
    let output = Output::new(el(html(Tag::Html)
        .with_attr(attr("xmlns:x", "http://x"))
        .with_child(el(html(Tag::Body)
            .with_child(el(custom("x:widget", TagNamespace::Html)))
            .with_child(el(
                custom("y:thing", TagNamespace::Html).with_attr(attr("xmlns:y", "http://y"))
            ))
            .with_child(el(custom("z:none", TagNamespace::Html)))))));
    let dom = convert(&output, xhtml()).unwrap();
    let root = root(&dom);

    let widget = find(&root, "widget");
    let ns = widget.namespace().unwrap();
    assert_eq!((ns.href(), ns.prefix()), ("http://x", Some("x")));

    let thing = find(&root, "thing");
    assert_eq!(thing.namespace().unwrap().href(), "http://y");

    // Unresolved element prefixes leave the inherited namespace alone.
    let none = find(&root, "none");
    assert_eq!(none.namespace().unwrap().href(), XHTML);

    // Without XHTML rules the colon is just sanitized away.
    let dom = convert(&output, Default::default()).unwrap();
    find(&dom.root().unwrap(), "x_widget");
}

#[test]
fn lang_and_xml_lang() {
    let output = Output::new(el(html(Tag::Html)
        .with_attr(attr("lang", "en"))
        .with_child(el(html(Tag::Body)
            .with_child(el(html(Tag::P)
                .with_attr(attr("xml:lang", "fr"))
                .with_attr(attr("lang", "de"))))
            .with_child(el(html(Tag::Div)
                .with_attr(attr("lang", "de"))
                .with_attr(attr("xml:lang", "fr"))))
            .with_child(el(html(Tag::Span)
                .with_attr(attr("lang", "a"))
                .with_attr(attr("lang", "b"))))
            .with_child(el(html(Tag::Em).with_attr(Attribute::with_namespace(
                AttrNamespace::Xml,
                "lang",
                "nl",
            ))))))));
    let dom = convert(&output, xhtml()).unwrap();
    let root = root(&dom);

    assert_eq!(root.get_attribute(None, "lang").as_deref(), Some("en"));
    assert_eq!(root.get_attribute(Some(XML_NAMESPACE), "lang").as_deref(), Some("en"));

    let lang_of = |name: &str| {
        let node = find(&root, name);
        assert_eq!(node.attributes().len(), 1, "{}", dump(&node));
        node.get_attribute(None, "lang").map(|v| v.to_string())
    };
    assert_eq!(lang_of("p").as_deref(), Some("de"));
    assert_eq!(lang_of("div").as_deref(), Some("de"));
    assert_eq!(lang_of("span").as_deref(), Some("a"));
    assert_eq!(lang_of("em").as_deref(), Some("nl"));
}

#[test]
fn xml_attributes_outside_xhtml_rules() {
    let output = Output::new(in_body(vec![el(html(Tag::P).with_attr(
        Attribute::with_namespace(AttrNamespace::Xml, "lang", "en"),
    ))]));
    let dom = convert(&output, Default::default()).unwrap();
    let p = find(&root(&dom), "p");
    assert_eq!(p.get_attribute(Some(XML_NAMESPACE), "lang").as_deref(), Some("en"));
    assert!(p.get_attribute(None, "lang").is_none());
    assert!(dom.root().unwrap().get_attribute(Some(XML_NAMESPACE), "lang").is_none());
}

#[test]
fn xlink_is_declared_once_on_the_root() {
    let output = Output::new(in_body(vec![el(svg(Tag::Svg)
        .with_attr(xlink("href", "#a"))
        .with_child(el(custom("use", TagNamespace::Svg).with_attr(xlink("href", "#b")))))]));
    let dom = convert(&output, namespaced()).unwrap();
    let root = root(&dom);

    let xlinks: Vec<_> = root
        .namespace_declarations()
        .into_iter()
        .filter(|ns| ns.prefix() == Some("xlink"))
        .collect();
    assert_eq!(xlinks.len(), 1);
    assert_eq!(xlinks[0].href(), XLINK);

    for name in &["svg", "use"] {
        let node = find(&root, name);
        let attrs = node.attributes();
        assert_eq!(attrs.len(), 1);
        assert!(attrs[0].ns.as_ref().unwrap().same_binding(&xlinks[0]));
    }
    let total: usize = elements(&root)
        .iter()
        .map(|node| node.namespace_declarations().len())
        .sum();
    // xhtml + xlink on the root, svg on <svg>
    assert_eq!(total, 3);
}

#[test]
fn xmlns_attributes_without_xhtml_rules() {
    let output = Output::new(in_body(vec![el(html(Tag::Div)
        .with_attr(attr("xmlns", "http://a"))
        .with_attr(attr("xmlns:", "http://b"))
        .with_attr(attr("xmlns:foo", "http://c"))
        .with_attr(attr("xmlnsbar", "d"))
        .with_attr(Attribute::with_namespace(AttrNamespace::Xmlns, "xlink", "http://evil"))
        .with_attr(Attribute::with_namespace(AttrNamespace::Xmlns, "xmlns", "http://e")))]));
    let dom = convert(&output, Default::default()).unwrap();
    let root = root(&dom);
    let div = find(&root, "div");
    let names: Vec<String> = div.attributes().iter().map(|a| a.name.to_string()).collect();
    assert_eq!(names, ["xmlns_foo", "xmlnsbar"]);
    assert!(div.namespace_declarations().is_empty());

    // xmlns:xlink only makes sure the real xlink namespace exists.
    let decls = root.namespace_declarations();
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].href(), XLINK);
}

#[test]
fn comments_around_the_root() {
    let output = Output {
        document: Document {
            doctype: None,
            children: vec![
                Node::comment("a"),
                Node::comment("b"),
                el(html(Tag::Html)),
                Node::comment("c"),
            ],
        },
    };
    let dom = convert(&output, Default::default()).unwrap();
    assert_eq!(child_summary(&dom.document), ["a", "b", "<html>", "c"]);
    assert!(Rc::ptr_eq(&root(&dom).parent().unwrap(), &dom.document));
}

#[test]
fn doctype_is_optional() {
    let output = Output::new(in_body(vec![])).with_doctype(
        "html",
        "-//W3C//DTD XHTML 1.0 Strict//EN",
        "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd",
    );
    let dom = convert(&output, Default::default()).unwrap();
    let doctype = dom.doctype.as_ref().unwrap();
    assert_eq!(&*doctype.name, "html");
    assert_eq!(&*doctype.public_id, "-//W3C//DTD XHTML 1.0 Strict//EN");

    let opts = ConvertOpts {
        keep_doctype: false,
        ..Default::default()
    };
    assert!(convert(&output, opts).unwrap().doctype.is_none());

    let bare = Output::new(in_body(vec![]));
    assert!(convert(&bare, Default::default()).unwrap().doctype.is_none());
}

#[test]
fn line_numbers() {
    let body = html(Tag::Body).at_line(3).with_child(el(html(Tag::P).at_line(4)));
    let output = Output::new(el(html(Tag::Html).at_line(1).with_child(el(body))));
    let opts = ConvertOpts {
        line_number_attr: Some("data-line".to_owned()),
        ..Default::default()
    };
    let dom = convert(&output, opts).unwrap();
    let root = root(&dom);
    assert_eq!(root.get_attribute(None, "data-line").as_deref(), Some("1"));
    let p = find(&root, "p");
    assert_eq!(p.get_attribute(None, "data-line").as_deref(), Some("4"));
    assert_eq!(p.line(), Some(4));

    let dom = convert(&output, Default::default()).unwrap();
    let p = find(&crate::root(&dom), "p");
    assert!(p.attributes().is_empty());
    assert_eq!(p.line(), Some(4));
}

#[test]
fn nested_document_is_rejected() {
    let inner = Node {
        data: SourceData::Document(Box::default()),
    };
    let output = Output::new(in_body(vec![el(html(Tag::P)), inner]));
    match convert(&output, Default::default()) {
        Err(ConvertError::UnknownNodeKind(msg)) => assert!(msg.starts_with("File: ")),
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }
}

#[test]
fn missing_root_element() {
    let output = Output {
        document: Document {
            doctype: None,
            children: vec![Node::comment("lonely")],
        },
    };
    match convert(&output, Default::default()) {
        Err(ConvertError::StructuralFailure(_)) => (),
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }
}

#[test]
fn deep_copy_is_independent() {
    let output = Output::new(el(html(Tag::Html)
        .with_attr(attr("xmlns:q", "http://x"))
        .with_child(el(html(Tag::Body)
            .with_attr(attr("q:a", "1"))
            .with_child(el(svg(Tag::Svg).with_attr(xlink("href", "#a"))))
            .with_child(Node::text("hi"))))))
    .with_doctype("html", "", "");
    let dom = convert(&output, xhtml()).unwrap();
    let copy = dom.deep_copy().unwrap();

    assert_eq!(dump(&dom.document), dump(&copy.document));
    assert_eq!(dom.doctype, copy.doctype);

    let (root, copied) = (root(&dom), copy.root().unwrap());
    assert!(!Rc::ptr_eq(&root, &copied));
    let decl = &copied.namespace_declarations()[0];
    let body = find(&copied, "body");
    assert!(body.namespace().unwrap().same_binding(decl));
    assert!(!body.namespace().unwrap().same_binding(&root.namespace_declarations()[0]));
    assert!(body.name().unwrap().ptr_eq(find(&copied, "body").name().unwrap()));

    drop(dom);
    assert_eq!(find(&copied, "body").text_content(), "hi");
}

#[test]
fn deep_nesting_does_not_recurse() {
    let depth = 50_000;
    let mut node = Node::text("leaf");
    for _ in 0..depth {
        node = el(html(Tag::Div).with_child(node));
    }
    let output = Output::new(el(html(Tag::Html).with_child(node)));
    let opts = ConvertOpts {
        stack_size: 4,
        ..Default::default()
    };
    let dom = convert(&output, opts).unwrap();

    let mut count = 0;
    let mut current = root(&dom);
    loop {
        let next = current.children.borrow().first().cloned();
        match next {
            Some(child) if child.is_element() => {
                count += 1;
                current = child;
            },
            Some(child) => {
                assert_eq!(&**child.text().unwrap(), "leaf");
                break;
            },
            None => panic!("lost the leaf"),
        }
    }
    assert_eq!(count, depth);
    drop(current);
    drop(dom);
    drop(output);
}

#[test]
fn wide_trees_grow_the_stack() {
    let children = (0..1000).map(|i| Node::text(&i.to_string())).collect();
    let output = Output::new(in_body(children));
    let opts = ConvertOpts {
        stack_size: 1,
        ..Default::default()
    };
    let dom = convert(&output, opts).unwrap();
    let body = find(&root(&dom), "body");
    let texts = child_summary(&body);
    assert_eq!(texts.len(), 1000);
    assert_eq!(texts[999], "999");
}
