//! Page layout model and the cursor-driven layout engine.
//!
//! Positions are in millimetres from the top-left corner of the page; `y` is
//! the text baseline.

use crate::metrics::{text_width, Font};

/// A4 portrait geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Lowest baseline body text may use.
    pub printable_bottom: f32,
    pub footer_baseline: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin: 20.0,
            printable_bottom: 272.0,
            footer_baseline: 282.0,
        }
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.width - self.margin * 2.0
    }

    pub fn top(&self) -> f32 {
        self.margin
    }

    /// Vertical space available to body text on a fresh page.
    pub fn usable_height(&self) -> f32 {
        self.printable_bottom - self.top()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    /// Font size in points
    pub size: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextElement),
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        width: f32,
        color: Color,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub body: Vec<Element>,
    pub footer: Vec<Element>,
}

impl Page {
    pub fn body_texts(&self) -> impl Iterator<Item = &TextElement> {
        self.body.iter().filter_map(|e| match e {
            Element::Text(t) => Some(t),
            Element::Rule { .. } => None,
        })
    }

    pub fn footer_texts(&self) -> impl Iterator<Item = &TextElement> {
        self.footer.iter().filter_map(|e| match e {
            Element::Text(t) => Some(t),
            Element::Rule { .. } => None,
        })
    }
}

/// Fully laid out document, ready to be written as PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl RenderedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every body text element with its zero-based page index, in writing order.
    pub fn body_texts(&self) -> impl Iterator<Item = (usize, &TextElement)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, page)| page.body_texts().map(move |t| (i, t)))
    }

    /// First body text element equal to `text`.
    pub fn find(&self, text: &str) -> Option<(usize, &TextElement)> {
        self.body_texts().find(|(_, t)| t.text == text)
    }
}

/// Text drawn on the first line of a block at its own x position.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineText {
    pub x: f32,
    pub text: String,
    pub style: TextStyle,
}

/// Lines written as a unit, starting at the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub x: f32,
    pub lines: Vec<String>,
    pub style: TextStyle,
    pub line_height: f32,
    pub inline: Option<InlineText>,
}

impl TextBlock {
    pub fn new(x: f32, lines: Vec<String>, style: TextStyle, line_height: f32) -> Self {
        Self {
            x,
            lines,
            style,
            line_height,
            inline: None,
        }
    }

    pub fn with_inline(mut self, inline: InlineText) -> Self {
        self.inline = Some(inline);
        self
    }

    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }
}

/// Cursor-driven layout with a single page-break rule.
///
/// Before `height` millimetres are written, if `cursor + height` would pass the
/// printable bottom a new page is started and the cursor returns to the top
/// margin. The check happens once per block; blocks taller than a page are
/// written line by line under the same rule.
#[derive(Debug)]
pub struct LayoutEngine {
    geometry: PageGeometry,
    pages: Vec<Page>,
    cursor: f32,
}

impl LayoutEngine {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::default()],
            cursor: geometry.top(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor += dy;
    }

    /// Start a new page if `height` does not fit below the cursor.
    /// Returns whether a page was added.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if self.cursor + height <= self.geometry.printable_bottom {
            return false;
        }

        self.pages.push(Page::default());
        self.cursor = self.geometry.top();
        tracing::trace!(page = self.pages.len(), "Page break");
        true
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn push_text(&mut self, x: f32, text: String, style: TextStyle) {
        let y = self.cursor;
        self.current_page().body.push(Element::Text(TextElement { x, y, style, text }));
    }

    /// Write a block at the cursor and advance past it.
    pub fn write_block(&mut self, block: TextBlock) {
        let TextBlock {
            x,
            lines,
            style,
            line_height,
            mut inline,
        } = block;

        if lines.len() as f32 * line_height <= self.geometry.usable_height() {
            self.ensure_space(lines.len() as f32 * line_height);
            for line in lines {
                if let Some(InlineText { x, text, style }) = inline.take() {
                    self.push_text(x, text, style);
                }
                self.push_text(x, line, style);
                self.cursor += line_height;
            }
        } else {
            for line in lines {
                self.ensure_space(line_height);
                if let Some(InlineText { x, text, style }) = inline.take() {
                    self.push_text(x, text, style);
                }
                self.push_text(x, line, style);
                self.cursor += line_height;
            }
        }
    }

    /// Horizontal rule across the content width at `y` (absolute on the current page).
    pub fn rule(&mut self, y: f32, width: f32, color: Color) {
        let x1 = self.geometry.margin;
        let x2 = self.geometry.width - self.geometry.margin;
        self.current_page().body.push(Element::Rule {
            x1,
            x2,
            y,
            width,
            color,
        });
    }

    /// Finish layout, adding the footer to every page.
    pub fn finish(self, attribution: &str, style: TextStyle) -> RenderedDocument {
        let geometry = self.geometry;
        let total = self.pages.len();
        let right_edge = geometry.width - geometry.margin;

        let pages = self
            .pages
            .into_iter()
            .enumerate()
            .map(|(i, mut page)| {
                let counter = format!("Page {} of {}", i + 1, total);
                let counter_x = right_edge - text_width(&counter, style.font, style.size);
                page.footer = vec![
                    Element::Text(TextElement {
                        x: geometry.margin,
                        y: geometry.footer_baseline,
                        style,
                        text: attribution.to_string(),
                    }),
                    Element::Text(TextElement {
                        x: counter_x,
                        y: geometry.footer_baseline,
                        style,
                        text: counter,
                    }),
                ];
                page
            })
            .collect();

        RenderedDocument { geometry, pages }
    }
}
