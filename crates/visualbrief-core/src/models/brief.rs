use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub primary: String,
    #[serde(default)]
    pub secondary: Vec<String>,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub style: String,
    pub hierarchy: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualStyle {
    pub color_palette: ColorPalette,
    pub typography: Typography,
    #[serde(default)]
    pub layout_patterns: Vec<String>,
    #[serde(default)]
    pub visual_motifs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandVoice {
    pub tone: String,
    #[serde(default)]
    pub personality: Vec<String>,
    pub emotional_appeal: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Messaging {
    #[serde(default)]
    pub key_themes: Vec<String>,
    pub call_to_action_style: String,
    pub value_proposition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAudience {
    pub inferred_demographic: String,
    #[serde(default)]
    pub psychographics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    #[serde(default)]
    pub do_this: Vec<String>,
    #[serde(default)]
    pub avoid_this: Vec<String>,
    #[serde(default)]
    pub content_ideas: Vec<String>,
}

/// The five analytical sections, exactly as the analysis service returns them.
///
/// Every section and every scalar field is required; lists that are absent
/// deserialize as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefSections {
    pub visual_style: VisualStyle,
    pub brand_voice: BrandVoice,
    pub messaging: Messaging,
    pub target_audience: TargetAudience,
    pub recommendations: Recommendations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefMeta {
    pub analyzed_at: DateTime<Utc>,
    pub image_count: usize,
}

/// A complete creative brief: the analytical sections plus the analysis stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreativeBrief {
    pub meta: BriefMeta,
    #[serde(flatten)]
    pub sections: BriefSections,
}

/// Summary counts shown above a finished brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefStats {
    pub colors: usize,
    pub traits: usize,
    pub themes: usize,
}

impl CreativeBrief {
    pub fn new(sections: BriefSections, analyzed_at: DateTime<Utc>, image_count: usize) -> Self {
        Self {
            meta: BriefMeta {
                analyzed_at,
                image_count,
            },
            sections,
        }
    }

    pub fn stats(&self) -> BriefStats {
        let palette = &self.sections.visual_style.color_palette;
        BriefStats {
            // primary + secondaries + accent
            colors: palette.secondary.len() + 2,
            traits: self.sections.brand_voice.personality.len(),
            themes: self.sections.messaging.key_themes.len(),
        }
    }
}
