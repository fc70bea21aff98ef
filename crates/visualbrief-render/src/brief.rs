//! Creative brief document layout.

use chrono::{DateTime, Utc};
use visualbrief_core::constants::PRODUCT_ATTRIBUTION;
use visualbrief_core::CreativeBrief;

use crate::layout::{
    Color, InlineText, LayoutEngine, PageGeometry, RenderedDocument, TextBlock, TextStyle,
};
use crate::metrics::{wrap_text, Font};

const LINE_HEIGHT: f32 = 7.0;
const BULLET_GLYPH: &str = "\u{2022}";
const BULLET_GLYPH_INDENT: f32 = 4.0;
const BULLET_TEXT_INDENT: f32 = 10.0;
const META_COLUMN_OFFSET: f32 = 80.0;
const SUBSECTION_GAP: f32 = 3.0;
const SECTION_GAP: f32 = 5.0;

const INK: Color = Color(32, 32, 32);
const BODY: Color = Color(68, 75, 78);
const MUTED: Color = Color(167, 163, 154);
const RULE: Color = Color(229, 231, 235);

const DOCUMENT_TITLE: TextStyle = TextStyle {
    font: Font::Bold,
    size: 20.0,
    color: INK,
};
const META: TextStyle = TextStyle {
    font: Font::Regular,
    size: 10.0,
    color: MUTED,
};
const SECTION_TITLE: TextStyle = TextStyle {
    font: Font::Bold,
    size: 14.0,
    color: INK,
};
const SUBSECTION_TITLE: TextStyle = TextStyle {
    font: Font::Bold,
    size: 11.0,
    color: BODY,
};
const TEXT: TextStyle = TextStyle {
    font: Font::Regular,
    size: 10.0,
    color: BODY,
};
const FOOTER: TextStyle = TextStyle {
    font: Font::Regular,
    size: 8.0,
    color: MUTED,
};

/// Lays out a [`CreativeBrief`] on A4 pages.
#[derive(Debug)]
pub struct BriefRenderer {
    engine: LayoutEngine,
}

impl Default for BriefRenderer {
    fn default() -> Self {
        Self::new(PageGeometry::default())
    }
}

impl BriefRenderer {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            engine: LayoutEngine::new(geometry),
        }
    }

    pub fn render(mut self, brief: &CreativeBrief) -> RenderedDocument {
        self.header(brief.meta.analyzed_at, brief.meta.image_count);

        let sections = &brief.sections;
        let style = &sections.visual_style;
        self.title("Visual Identity");
        self.subtitle("Color Palette");
        self.text(&format!("Primary: {}", style.color_palette.primary));
        if !style.color_palette.secondary.is_empty() {
            self.text(&format!(
                "Secondary: {}",
                style.color_palette.secondary.join(", ")
            ));
        }
        self.text(&format!("Accent: {}", style.color_palette.accent));
        self.engine.advance(SUBSECTION_GAP);

        self.subtitle("Typography");
        self.text(&format!("Style: {}", style.typography.style));
        self.text(&format!("Hierarchy: {}", style.typography.hierarchy));
        self.engine.advance(SUBSECTION_GAP);

        if !style.visual_motifs.is_empty() {
            self.subtitle("Visual Motifs");
            self.text(&style.visual_motifs.join(", "));
            self.engine.advance(SUBSECTION_GAP);
        }
        self.bullet_subsection("Layout Patterns", &style.layout_patterns);
        self.engine.advance(SECTION_GAP);

        let voice = &sections.brand_voice;
        self.title("Brand Voice & Tone");
        self.text_subsection("Tone Profile", &voice.tone);
        self.text_subsection("Emotional Appeal", &voice.emotional_appeal);
        self.bullet_subsection("Personality Traits", &voice.personality);
        self.engine.advance(SECTION_GAP);

        let audience = &sections.target_audience;
        self.title("Target Audience");
        self.text_subsection("Demographics", &audience.inferred_demographic);
        self.bullet_subsection("Psychographics", &audience.psychographics);
        self.engine.advance(SECTION_GAP);

        let messaging = &sections.messaging;
        self.title("Messaging Strategy");
        self.text_subsection("Value Proposition", &messaging.value_proposition);
        self.text_subsection("Call-to-Action Style", &messaging.call_to_action_style);
        self.bullet_subsection("Key Themes", &messaging.key_themes);
        self.engine.advance(SECTION_GAP);

        let recommendations = &sections.recommendations;
        self.title("Strategic Recommendations");
        self.bullet_subsection("Do This", &recommendations.do_this);
        self.bullet_subsection("Avoid This", &recommendations.avoid_this);
        self.bullet_subsection("Content Ideas", &recommendations.content_ideas);

        self.engine.finish(PRODUCT_ATTRIBUTION, FOOTER)
    }

    fn header(&mut self, analyzed_at: DateTime<Utc>, image_count: usize) {
        let margin = self.engine.geometry().margin;

        self.engine.write_block(TextBlock::new(
            margin,
            vec!["Creative Brief".to_string()],
            DOCUMENT_TITLE,
            LINE_HEIGHT * 1.5,
        ));

        let generated = format!("Generated on {}", format_date(analyzed_at));
        let based_on = InlineText {
            x: margin + META_COLUMN_OFFSET,
            text: format!("Based on {} analyzed assets", image_count),
            style: META,
        };
        self.engine.write_block(
            TextBlock::new(margin, vec![generated], META, LINE_HEIGHT * 2.0).with_inline(based_on),
        );

        let rule_y = self.engine.cursor() - 5.0;
        self.engine.rule(rule_y, 0.2, RULE);
        self.engine.advance(5.0);
    }

    fn title(&mut self, text: &str) {
        let margin = self.engine.geometry().margin;
        self.engine.write_block(TextBlock::new(
            margin,
            vec![text.to_string()],
            SECTION_TITLE,
            LINE_HEIGHT * 1.5,
        ));
    }

    fn subtitle(&mut self, text: &str) {
        let margin = self.engine.geometry().margin;
        self.engine.write_block(TextBlock::new(
            margin,
            vec![text.to_string()],
            SUBSECTION_TITLE,
            LINE_HEIGHT,
        ));
    }

    fn text(&mut self, text: &str) {
        let geometry = *self.engine.geometry();
        let lines = wrap_text(text, TEXT.font, TEXT.size, geometry.content_width());
        self.engine
            .write_block(TextBlock::new(geometry.margin, lines, TEXT, LINE_HEIGHT));
        self.engine.advance(2.0);
    }

    fn bullet(&mut self, text: &str) {
        let geometry = *self.engine.geometry();
        let lines = wrap_text(
            text,
            TEXT.font,
            TEXT.size,
            geometry.content_width() - BULLET_TEXT_INDENT,
        );
        let glyph = InlineText {
            x: geometry.margin + BULLET_GLYPH_INDENT,
            text: BULLET_GLYPH.to_string(),
            style: TEXT,
        };
        self.engine.write_block(
            TextBlock::new(geometry.margin + BULLET_TEXT_INDENT, lines, TEXT, LINE_HEIGHT)
                .with_inline(glyph),
        );
        self.engine.advance(1.0);
    }

    fn text_subsection(&mut self, heading: &str, text: &str) {
        self.subtitle(heading);
        self.text(text);
        self.engine.advance(SUBSECTION_GAP);
    }

    /// Heading plus one bullet per non-blank item; nothing at all when empty.
    fn bullet_subsection(&mut self, heading: &str, items: &[String]) {
        let items: Vec<&str> = items
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if items.is_empty() {
            return;
        }

        self.subtitle(heading);
        for item in items {
            self.bullet(item);
        }
        self.engine.advance(SUBSECTION_GAP);
    }
}

/// "Month D, YYYY"
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}
