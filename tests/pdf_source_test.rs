//! Integration tests for text decoding and positioning in the PDF source.

mod common;

use docoutline::{LayoutSource, PdfSource};
use lopdf::content::Operation;
use lopdf::{dictionary, Object, Stream, StringFormat};

use common::raw_pdf;

const FIELD_GUIDE_TOUNICODE: &str = r#"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS)
/Supplement 0
>> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
8 beginbfchar
<0001> <0046>
<0002> <0069>
<0003> <0065>
<0004> <006C>
<0005> <0064>
<0006> <0020>
<0007> <0047>
<0008> <0075>
endbfchar
endcmap
CMapName currentdict /CMap defineresource pop
end
end
"#;

fn show(text: Object, y: i64) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), y.into()]),
        Operation::new("Tj", vec![text]),
        Operation::new("ET", vec![]),
    ]
}

fn span_texts(source: &PdfSource) -> Vec<(String, f32)> {
    source
        .page(1)
        .unwrap()
        .spans()
        .map(|s| (s.text.clone(), s.bbox.y0))
        .collect()
}

#[test]
fn test_win_ansi_punctuation() {
    let pdf = raw_pdf(
        |_| {
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Helvetica",
                "Encoding" => "WinAnsiEncoding",
            }
        },
        show(
            Object::string_literal(b"Reader\x92s Guide \x96 Overview".to_vec()),
            700,
        ),
    );

    let source = PdfSource::from_bytes(&pdf).unwrap();
    let spans = span_texts(&source);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].0, "Reader\u{2019}s Guide \u{2013} Overview");
}

#[test]
fn test_to_unicode_cmap() {
    let pdf = raw_pdf(
        |doc| {
            let cmap = FIELD_GUIDE_TOUNICODE.as_bytes().to_vec();
            let cmap_id = doc.add_object(Stream::new(
                dictionary! { "Length" => cmap.len() as i64 },
                cmap,
            ));
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type0",
                "BaseFont" => "FieldSans-Bold",
                "Encoding" => "Identity-H",
                "ToUnicode" => Object::Reference(cmap_id),
            }
        },
        // glyph ids, not character codes
        show(
            Object::String(
                vec![
                    0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04, 0x00, 0x05, 0x00, 0x06,
                    0x00, 0x07, 0x00, 0x08, 0x00, 0x02, 0x00, 0x05, 0x00, 0x03,
                ],
                StringFormat::Hexadecimal,
            ),
            700,
        ),
    );

    let source = PdfSource::from_bytes(&pdf).unwrap();
    let page = source.page(1).unwrap();
    let span = page.spans().next().unwrap();
    assert_eq!(span.text, "Field Guide");
    assert!(span.flags.contains(docoutline::StyleFlags::BOLD));
}

#[test]
fn test_flipped_transform_keeps_reading_order() {
    let mut operations = vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![1.into(), 0.into(), 0.into(), (-1).into(), 0.into(), 792.into()],
        ),
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new(
            "Tm",
            vec![1.into(), 0.into(), 0.into(), (-1).into(), 72.into(), 100.into()],
        ),
        Operation::new("Tj", vec![Object::string_literal("Top")]),
        Operation::new(
            "Tm",
            vec![1.into(), 0.into(), 0.into(), (-1).into(), 72.into(), 200.into()],
        ),
        Operation::new("Tj", vec![Object::string_literal("Below")]),
        Operation::new("ET", vec![]),
        Operation::new("Q", vec![]),
    ];
    // after Q the page is back in unflipped user space
    operations.extend(show(Object::string_literal("Footer"), 50));

    let pdf = raw_pdf(
        |_| {
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Helvetica",
                "Encoding" => "WinAnsiEncoding",
            }
        },
        operations,
    );

    let source = PdfSource::from_bytes(&pdf).unwrap();
    let spans = span_texts(&source);
    let texts: Vec<&str> = spans.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(texts, vec!["Top", "Below", "Footer"]);

    // Top's baseline sits 100pt below the page top
    assert!((spans[0].1 - (100.0 - 12.0 * 0.8)).abs() < 0.01);
    assert!((spans[1].1 - (200.0 - 12.0 * 0.8)).abs() < 0.01);
    assert!(spans[2].1 > 700.0);
}
