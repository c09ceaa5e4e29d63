// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

fn read_names(file: &str) -> Vec<String> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(file);
    println!("cargo:rerun-if-changed={}", path.display());
    let contents = fs::read_to_string(&path).expect("can't read tag table");
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

// `annotation-xml` -> `AnnotationXml`
fn variant_name(tag: &str) -> String {
    tag.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

fn main() {
    let tags = read_names("tags.txt");
    let svg_tags = read_names("svg_tags.txt");

    let path = Path::new(&env::var("OUT_DIR").unwrap()).join("tags.rs");
    let mut file = BufWriter::new(File::create(&path).unwrap());

    writeln!(file, "/// A tag recognized by the HTML parser.").unwrap();
    writeln!(file, "///").unwrap();
    writeln!(file, "/// `Unknown` covers custom elements and any foreign tag outside the table;").unwrap();
    writeln!(file, "/// such elements keep their original spelling in the source tree.").unwrap();
    writeln!(file, "#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]").unwrap();
    writeln!(file, "pub enum Tag {{").unwrap();
    for tag in tags.iter() {
        writeln!(file, "    {},", variant_name(tag)).unwrap();
    }
    writeln!(file, "    Unknown,").unwrap();
    writeln!(file, "}}\n").unwrap();

    writeln!(file, "/// Number of known tags; `Tag::Unknown as usize` equals this.").unwrap();
    writeln!(file, "pub const TAG_COUNT: usize = {};\n", tags.len()).unwrap();

    writeln!(file, "static TAG_NAMES: [&str; TAG_COUNT] = [").unwrap();
    for tag in tags.iter() {
        writeln!(file, "    {:?},", tag).unwrap();
    }
    writeln!(file, "];\n").unwrap();

    writeln!(file, "static ALL_TAGS: [Tag; TAG_COUNT] = [").unwrap();
    for tag in tags.iter() {
        writeln!(file, "    Tag::{},", variant_name(tag)).unwrap();
    }
    writeln!(file, "];\n").unwrap();

    let mut lookup = phf_codegen::Map::new();
    for tag in tags.iter() {
        lookup.entry(&**tag, &format!("Tag::{}", variant_name(tag)));
    }
    writeln!(
        file,
        "static TAG_LOOKUP: ::phf::Map<&'static str, Tag> = {};\n",
        lookup.build()
    )
    .unwrap();

    let lowered: Vec<String> = svg_tags.iter().map(|t| t.to_ascii_lowercase()).collect();
    let mut svg = phf_codegen::Map::new();
    for (key, value) in lowered.iter().zip(svg_tags.iter()) {
        svg.entry(&**key, &format!("{:?}", value));
    }
    writeln!(
        file,
        "static SVG_TAG_NAMES: ::phf::Map<&'static str, &'static str> = {};",
        svg.build()
    )
    .unwrap();

    let longest = svg_tags.iter().map(|t| t.len()).max().unwrap_or(0);
    writeln!(file, "\nconst SVG_TAG_MAX_LEN: usize = {};", longest).unwrap();
}
