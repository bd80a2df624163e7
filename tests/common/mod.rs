//! Shared fixtures: small PDFs assembled with lopdf's object API.

#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text placed with `Td` at a baseline position.
pub struct TextLine {
    pub text: &'static str,
    pub size: i64,
    pub x: i64,
    pub y: i64,
    pub bold: bool,
}

pub fn line(text: &'static str, size: i64, y: i64) -> TextLine {
    TextLine {
        text,
        size,
        x: 72,
        y,
        bold: false,
    }
}

pub fn bold(text: &'static str, size: i64, y: i64) -> TextLine {
    TextLine {
        bold: true,
        ..line(text, size, y)
    }
}

/// `count` body lines of size 10, starting at baseline `top` and stepping down.
pub fn body(count: i64, top: i64) -> Vec<TextLine> {
    (0..count)
        .map(|i| line("Plain body text describing the topic in simple terms.", 10, top - i * 14))
        .collect()
}

/// Build a US Letter PDF, one entry of `pages` per page.
pub fn build_pdf(title: Option<&str>, pages: Vec<Vec<TextLine>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let heavy = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => heavy,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for l in lines {
            let font = if l.bold { "F2" } else { "F1" };
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec![font.into(), l.size.into()]));
            operations.push(Operation::new("Td", vec![l.x.into(), l.y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(l.text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", info_id);
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Write a PDF built by [`build_pdf`] to `path`.
pub fn write_pdf(path: &Path, title: Option<&str>, pages: Vec<Vec<TextLine>>) {
    std::fs::write(path, build_pdf(title, pages)).unwrap();
}

/// A two-page guide with a chapter marker, a wrapped heading, a numbered
/// heading and a references heading.
pub fn guide_pages() -> Vec<Vec<TextLine>> {
    let mut first = vec![
        bold("CHAPTER 1", 24, 740),
        line("Introduction to", 18, 690),
        line("Machine Learning", 18, 670),
    ];
    first.extend(body(10, 630));
    first.push(line("2. Methods", 16, 460));

    let mut second = vec![line("Evaluation Results", 18, 740)];
    second.extend(body(10, 700));
    second.push(line("References", 14, 530));

    vec![first, second]
}

/// A one-page US Letter PDF with a hand-written content stream. `font`
/// builds the `/F1` font dictionary and may add objects it refers to.
pub fn raw_pdf<F>(font: F, operations: Vec<Operation>) -> Vec<u8>
where
    F: FnOnce(&mut Document) -> lopdf::Dictionary,
{
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_dict = font(&mut doc);
    let font_id = doc.add_object(font_dict);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });

    let kids: Vec<Object> = vec![page_id.into()];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
