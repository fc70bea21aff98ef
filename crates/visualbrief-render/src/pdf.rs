//! PDF serialization of a laid out document.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::error::RenderError;
use crate::layout::{Color, Element, PageGeometry, RenderedDocument, TextElement};
use crate::metrics::{win_ansi_code, Font, PT_PER_MM};

/// Write the document as PDF 1.5 using the standard Helvetica fonts.
pub fn write_pdf(document: &RenderedDocument) -> Result<Vec<u8>, RenderError> {
    let geometry = document.geometry;
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = add_font(&mut doc, Font::Regular);
    let bold_id = add_font(&mut doc, Font::Bold);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource_name() => regular_id,
            Font::Bold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let operations: Vec<Operation> = page
            .body
            .iter()
            .chain(page.footer.iter())
            .flat_map(|element| element_operations(element, &geometry))
            .collect();

        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Content(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            real(geometry.width * PT_PER_MM),
            real(geometry.height * PT_PER_MM),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| RenderError::Write(e.to_string()))?;

    tracing::debug!(pages = page_count, bytes = buffer.len(), "PDF written");
    Ok(buffer)
}

fn add_font(doc: &mut Document, font: Font) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}

fn element_operations(element: &Element, geometry: &PageGeometry) -> Vec<Operation> {
    match element {
        Element::Text(text) => text_operations(text, geometry),
        Element::Rule {
            x1,
            x2,
            y,
            width,
            color,
        } => {
            let y = to_pdf_y(*y, geometry);
            vec![
                stroke_color(*color),
                Operation::new("w", vec![real(width * PT_PER_MM)]),
                Operation::new("m", vec![real(x1 * PT_PER_MM), real(y)]),
                Operation::new("l", vec![real(x2 * PT_PER_MM), real(y)]),
                Operation::new("S", vec![]),
            ]
        }
    }
}

fn text_operations(text: &TextElement, geometry: &PageGeometry) -> Vec<Operation> {
    vec![
        fill_color(text.style.color),
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(text.style.font.resource_name().as_bytes().to_vec()),
                real(text.style.size),
            ],
        ),
        Operation::new(
            "Td",
            vec![
                real(text.x * PT_PER_MM),
                real(to_pdf_y(text.y, geometry)),
            ],
        ),
        Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&text.text), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ]
}

fn fill_color(Color(r, g, b): Color) -> Operation {
    Operation::new("rg", color_operands(r, g, b))
}

fn stroke_color(Color(r, g, b): Color) -> Operation {
    Operation::new("RG", color_operands(r, g, b))
}

fn color_operands(r: u8, g: u8, b: u8) -> Vec<Object> {
    [r, g, b]
        .iter()
        .map(|c| real(*c as f32 / 255.0))
        .collect()
}

fn real(value: f32) -> Object {
    Object::from(value)
}

/// Layout y (mm from top) to PDF y (pt from bottom).
fn to_pdf_y(y: f32, geometry: &PageGeometry) -> f32 {
    (geometry.height - y) * PT_PER_MM
}

/// Encode text as WinAnsi (CP1252). Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_code(c).unwrap_or(b'?'))
        .collect()
}
