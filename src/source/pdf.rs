//! Layout source backed by lopdf.
//!
//! Walks each page's content stream with a text matrix composed onto the
//! current transformation matrix to recover positioned spans, decodes span
//! text through each font's encoding, converts to top-down coordinates, then
//! groups spans into lines by baseline and lines into blocks by spacing.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Encoding, Object, ObjectId};

use crate::detect::{check_pdf_file, check_pdf_header};
use crate::error::{Error, Result};
use crate::model::{BoundingBox, LayoutBlock, LayoutLine, PageLayout, StyleFlags, TextSpan};

use super::LayoutSource;

/// Default page size when no MediaBox can be resolved (US Letter).
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// TJ adjustments beyond this many thousandths of an em are word breaks.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A [`LayoutSource`] reading a PDF document through lopdf.
pub struct PdfSource {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
}

impl PdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        check_pdf_file(path)?;
        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Read a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        check_pdf_header(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let pages = doc.get_pages();
        Ok(Self { doc, pages })
    }

    /// Resolve a page's (width, height), walking up the page tree for MediaBox.
    fn page_size(&self, page_id: ObjectId) -> (f32, f32) {
        self.doc
            .get_dictionary(page_id)
            .ok()
            .and_then(|dict| self.find_media_box(dict))
            .filter(|nums| nums.len() >= 4)
            .map(|nums| (nums[2] - nums[0], nums[3] - nums[1]))
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    fn find_media_box(&self, dict: &Dictionary) -> Option<Vec<f32>> {
        if let Ok(obj) = dict.get(b"MediaBox") {
            let resolved = match obj {
                Object::Reference(id) => self.doc.get_object(*id).ok()?,
                other => other,
            };
            if let Ok(array) = resolved.as_array() {
                return array.iter().map(get_number).collect();
            }
        }

        let parent_id = dict.get(b"Parent").ok()?.as_reference().ok()?;
        let parent = self.doc.get_dictionary(parent_id).ok()?;
        self.find_media_box(parent)
    }

    /// Font resource name → base font and resolved text encoding.
    fn font_table(&self, page_id: ObjectId) -> Result<HashMap<Vec<u8>, FontInfo<'_>>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(format!("cannot get page fonts: {}", e)))?;

        let mut table = HashMap::new();
        for (name, dict) in fonts {
            let base_font = dict
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            let identity = dict
                .get(b"Encoding")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| n.starts_with(b"Identity"))
                .unwrap_or(false);
            let encoding = match dict.get_font_encoding(&self.doc) {
                Ok(encoding) => Some(encoding),
                Err(e) => {
                    log::debug!("Font {}: no usable encoding ({})", base_font, e);
                    None
                }
            };
            table.insert(
                name,
                FontInfo {
                    base_font,
                    encoding,
                    identity,
                },
            );
        }
        Ok(table)
    }

    /// Walk a page's content stream and collect positioned text runs.
    fn extract_runs(&self, page_id: ObjectId) -> Result<Vec<TextRun>> {
        let fonts = self.font_table(page_id)?;
        let data = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::PdfParse(format!("cannot get page content: {}", e)))?;
        let content = lopdf::content::Content::decode(&data)
            .map_err(|e| Error::PdfParse(format!("content stream decode error: {}", e)))?;

        let mut runs = Vec::new();
        let mut font: Option<&FontInfo> = None;
        let mut font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut ctm = Transform::IDENTITY;
        let mut ctm_stack: Vec<Transform> = Vec::new();
        let mut in_text = false;

        for op in &content.operations {
            match op.operator.as_str() {
                "q" => ctm_stack.push(ctm),
                "Q" => {
                    if let Some(saved) = ctm_stack.pop() {
                        ctm = saved;
                    }
                }
                "cm" => {
                    if let Some(m) = Transform::from_operands(&op.operands) {
                        ctm = m.then(ctm);
                    }
                }
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix::default();
                }
                "ET" => in_text = false,
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(name) = &op.operands[0] {
                            font = fonts.get(name.as_slice());
                        }
                        font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number) {
                        matrix.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            matrix.leading = -ty;
                        }
                        matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = Transform::from_operands(&op.operands) {
                        matrix.set(m);
                    }
                }
                "T*" => matrix.next_line(),
                "Tj" | "TJ" | "'" | "\"" => {
                    if matches!(op.operator.as_str(), "'" | "\"") {
                        matrix.next_line();
                    }
                    if !in_text {
                        continue;
                    }
                    let text = match op.operator.as_str() {
                        "TJ" => match op.operands.first() {
                            Some(Object::Array(items)) => decode_tj_array(font, items),
                            _ => String::new(),
                        },
                        "\"" => string_operand(font, op.operands.get(2)),
                        _ => string_operand(font, op.operands.first()),
                    };
                    if !text.trim().is_empty() {
                        let (x, y) = matrix.position(ctm);
                        runs.push(TextRun {
                            text,
                            x,
                            y,
                            font_size: font_size * matrix.scale(ctm),
                            flags: font
                                .map(|f| StyleFlags::from_font_name(&f.base_font))
                                .unwrap_or_default(),
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(runs)
    }

    /// Read the Info dictionary's Title entry.
    fn info_title(&self) -> Option<String> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        let dict = match info {
            Object::Reference(id) => self.doc.get_dictionary(*id).ok()?,
            Object::Dictionary(d) => d,
            _ => return None,
        };
        match dict.get(b"Title").ok()? {
            Object::String(bytes, _) => Some(decode_text_simple(bytes)),
            Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).to_string()),
            _ => None,
        }
    }
}

impl LayoutSource for PdfSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn title(&self) -> Option<String> {
        self.info_title()
    }

    fn page(&self, number: u32) -> Result<PageLayout> {
        let page_id = *self
            .pages
            .get(&number)
            .ok_or(Error::PageOutOfRange(number, self.page_count()))?;
        let (width, height) = self.page_size(page_id);

        let spans: Vec<TextSpan> = self
            .extract_runs(page_id)?
            .into_iter()
            .map(|run| run.into_span(number, height))
            .collect();
        log::debug!("Page {}: {} spans", number, spans.len());

        let lines = group_spans_into_lines(spans);
        let mut page = PageLayout::new(number, width, height);
        page.blocks = group_lines_into_blocks(lines);
        Ok(page)
    }
}

/// Font information from a page's resource dictionary.
struct FontInfo<'a> {
    base_font: String,
    encoding: Option<Encoding<'a>>,
    /// Declared `Identity-H`/`Identity-V`: two-byte codes.
    identity: bool,
}

/// A text run in PDF user space (y grows upward, `y` is the baseline).
#[derive(Debug, Clone)]
struct TextRun {
    text: String,
    x: f32,
    y: f32,
    font_size: f32,
    flags: StyleFlags,
}

impl TextRun {
    /// Convert to a span with a top-down bounding box on a page of `height`.
    fn into_span(self, page: u32, height: f32) -> TextSpan {
        let width = self.text.chars().count() as f32 * self.font_size * 0.5;
        let bbox = BoundingBox::new(
            self.x,
            height - (self.y + self.font_size * 0.8), // approximate ascender
            self.x + width,
            height - (self.y - self.font_size * 0.2), // approximate descender
        );
        TextSpan::new(self.text, self.font_size, page, bbox).with_flags(self.flags)
    }
}

/// Group spans into lines by baseline, top to bottom, left to right.
///
/// When the horizontal gap between neighbouring spans suggests a word break
/// and neither side already carries whitespace, the later span gets a leading
/// space so that concatenating span texts reproduces the visual line.
pub(crate) fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<LayoutLine> {
    if spans.is_empty() {
        return vec![];
    }

    spans.sort_by(|a, b| {
        baseline(a)
            .partial_cmp(&baseline(b))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                a.bbox
                    .x0
                    .partial_cmp(&b.bbox.x0)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });

    let mut lines: Vec<Vec<TextSpan>> = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * 0.3;
        match current_y {
            Some(y) if (baseline(&span) - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current_y = Some(baseline(&span));
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
        .into_iter()
        .map(|mut spans| {
            spans.sort_by(|a, b| {
                a.bbox
                    .x0
                    .partial_cmp(&b.bbox.x0)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            insert_word_gaps(&mut spans);
            LayoutLine::new(spans)
        })
        .collect()
}

fn baseline(span: &TextSpan) -> f32 {
    span.bbox.y1 - span.font_size * 0.2
}

fn insert_word_gaps(spans: &mut [TextSpan]) {
    for i in 1..spans.len() {
        let (prev, curr) = (&spans[i - 1], &spans[i]);
        let gap = curr.bbox.x0 - prev.bbox.x1;
        let char_count = curr.text.chars().count().max(1) as f32;
        let avg_char_width = (curr.bbox.x1 - curr.bbox.x0) / char_count;

        let prev_last = prev.text.chars().last();
        let curr_first = curr.text.chars().next();
        let has_space = prev_last.map(char::is_whitespace).unwrap_or(true)
            || curr_first.map(char::is_whitespace).unwrap_or(true);
        let both_spaceless = prev_last.map(is_spaceless_script_char).unwrap_or(false)
            && curr_first.map(is_spaceless_script_char).unwrap_or(false);

        if gap > avg_char_width * 0.2 && !has_space && !both_spaceless {
            spans[i].text.insert(0, ' ');
        }
    }
}

/// Group lines into blocks: a block breaks on a large vertical gap, a font
/// size change, or a left-margin shift.
pub(crate) fn group_lines_into_blocks(lines: Vec<LayoutLine>) -> Vec<LayoutBlock> {
    if lines.is_empty() {
        return vec![];
    }

    let metrics: Vec<LineMetrics> = lines.iter().map(LineMetrics::of).collect();
    let avg_spacing = average_spacing(&metrics);

    let mut blocks = Vec::new();
    let mut current: Vec<LayoutLine> = Vec::new();
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 && metrics[i - 1].breaks_before(&metrics[i], avg_spacing) {
            blocks.push(LayoutBlock::new(std::mem::take(&mut current)));
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(LayoutBlock::new(current));
    }
    blocks
}

#[derive(Debug, Clone, Copy)]
struct LineMetrics {
    top: f32,
    left: f32,
    font_size: f32,
}

impl LineMetrics {
    fn of(line: &LayoutLine) -> Self {
        let top = line
            .spans
            .iter()
            .map(|s| s.bbox.y0)
            .fold(f32::INFINITY, f32::min);
        let left = line
            .spans
            .iter()
            .map(|s| s.bbox.x0)
            .fold(f32::INFINITY, f32::min);
        let font_size = if line.spans.is_empty() {
            0.0
        } else {
            line.spans.iter().map(|s| s.font_size).sum::<f32>() / line.spans.len() as f32
        };
        Self {
            top,
            left,
            font_size,
        }
    }

    fn breaks_before(&self, next: &LineMetrics, avg_spacing: f32) -> bool {
        (next.top - self.top).abs() > avg_spacing * 1.5
            || (next.font_size - self.font_size).abs() > 1.0
            || (next.left - self.left).abs() > 20.0
    }
}

fn average_spacing(metrics: &[LineMetrics]) -> f32 {
    let spacings: Vec<f32> = metrics
        .windows(2)
        .map(|w| (w[1].top - w[0].top).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

/// An affine transform `[a b c d e f]`, in the operand order of `cm` and `Tm`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Transform {
    const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_operands(operands: &[Object]) -> Option<Self> {
        if operands.len() < 6 {
            return None;
        }
        let n: Vec<f32> = operands
            .iter()
            .take(6)
            .map(|o| get_number(o).unwrap_or(0.0))
            .collect();
        Some(Transform {
            a: n[0],
            b: n[1],
            c: n[2],
            d: n[3],
            e: n[4],
            f: n[5],
        })
    }

    /// `self` followed by `next`.
    fn then(self, next: Transform) -> Transform {
        Transform {
            a: self.a * next.a + self.b * next.c,
            b: self.a * next.b + self.b * next.d,
            c: self.c * next.a + self.d * next.c,
            d: self.c * next.b + self.d * next.d,
            e: self.e * next.a + self.f * next.c + next.e,
            f: self.e * next.b + self.f * next.d + next.f,
        }
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    m: Transform,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            m: Transform::IDENTITY,
            leading: 12.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, m: Transform) {
        self.m = m;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        let m = &mut self.m;
        m.e += tx * m.a + ty * m.c;
        m.f += tx * m.b + ty * m.d;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    /// Text origin in default user space under `ctm`.
    fn position(&self, ctm: Transform) -> (f32, f32) {
        ctm.apply(self.m.e, self.m.f)
    }

    fn scale(&self, ctm: Transform) -> f32 {
        let r = self.m.then(ctm);
        (r.a * r.a + r.c * r.c).sqrt()
    }
}

fn string_operand(font: Option<&FontInfo>, operand: Option<&Object>) -> String {
    match operand {
        Some(Object::String(bytes, _)) => decode_bytes(font, bytes),
        _ => String::new(),
    }
}

/// Decode a TJ array, turning large negative adjustments into word spaces.
fn decode_tj_array(font: Option<&FontInfo>, items: &[Object]) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode_bytes(font, bytes)),
            Object::Integer(_) | Object::Real(_) => {
                let adjustment = -get_number(item).unwrap_or(0.0);
                let breaks_word = combined
                    .chars()
                    .last()
                    .map(|c| !c.is_whitespace() && !is_spaceless_script_char(c))
                    .unwrap_or(false);
                if adjustment > TJ_SPACE_THRESHOLD && breaks_word {
                    combined.push(' ');
                }
            }
            _ => {}
        }
    }
    combined
}

fn decode_bytes(font: Option<&FontInfo>, bytes: &[u8]) -> String {
    if let Some(encoding) = font.and_then(|f| f.encoding.as_ref()) {
        if let Ok(text) = LopdfDocument::decode_text(encoding, bytes) {
            return text;
        }
    }

    // Identity fonts without a ToUnicode map: codes often coincide with UTF-16.
    let identity = font.map(|f| f.identity).unwrap_or(false);
    if identity && bytes.len() >= 2 && bytes.len() % 2 == 0 {
        let units: Vec<u16> = bytes
            .chunks(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        let decoded = String::from_utf16_lossy(&units);
        if !decoded.chars().all(|c| c == '\u{FFFD}' || c == '\0') {
            return decoded;
        }
    }

    decode_text_simple(bytes)
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter(|c| c.len() == 2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

/// Check if a character is from a script that doesn't use word spaces.
///
/// Chinese and Japanese don't use spaces between words; Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // Extensions B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana and Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}
