//! Fixed instruction and output schema sent with every analysis.

use serde_json::{json, Map, Value};

pub const SYSTEM_INSTRUCTION: &str = "You are a world-class Creative Director and Brand Strategist. \
Your goal is to reverse-engineer a creative brief from existing visual assets.";

pub const ANALYSIS_PROMPT: &str = "Analyze these marketing assets to create a comprehensive creative brief.
Extract the visual style, brand voice, messaging strategy, and target audience.
Provide actionable recommendations for future content creation that aligns with this style.

For the color palette, return specific Hex codes found in the images.
For typography, describe the style (e.g., 'Modern Sans-Serif', 'Classic Serif').";

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn string_list() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

/// Object node whose every property is required, in declaration order.
fn object(fields: Vec<(&str, Value)>) -> Value {
    let required: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
    let properties: Map<String, Value> = fields
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect();
    json!({ "type": "OBJECT", "properties": properties, "required": required })
}

/// Structured-output schema in the Gemini `responseSchema` dialect.
pub fn response_schema() -> Value {
    object(vec![
        (
            "visualStyle",
            object(vec![
                (
                    "colorPalette",
                    object(vec![
                        ("primary", string()),
                        ("secondary", string_list()),
                        ("accent", string()),
                    ]),
                ),
                (
                    "typography",
                    object(vec![("style", string()), ("hierarchy", string())]),
                ),
                ("layoutPatterns", string_list()),
                ("visualMotifs", string_list()),
            ]),
        ),
        (
            "brandVoice",
            object(vec![
                ("tone", string()),
                ("personality", string_list()),
                ("emotionalAppeal", string()),
            ]),
        ),
        (
            "messaging",
            object(vec![
                ("keyThemes", string_list()),
                ("callToActionStyle", string()),
                ("valueProposition", string()),
            ]),
        ),
        (
            "targetAudience",
            object(vec![
                ("inferredDemographic", string()),
                ("psychographics", string_list()),
            ]),
        ),
        (
            "recommendations",
            object(vec![
                ("doThis", string_list()),
                ("avoidThis", string_list()),
                ("contentIdeas", string_list()),
            ]),
        ),
    ])
}

/// Example answer shape, for providers without structured output.
fn answer_shape() -> Value {
    json!({
        "visualStyle": {
            "colorPalette": { "primary": "#hex", "secondary": ["#hex"], "accent": "#hex" },
            "typography": { "style": "string", "hierarchy": "string" },
            "layoutPatterns": ["string"],
            "visualMotifs": ["string"]
        },
        "brandVoice": { "tone": "string", "personality": ["string"], "emotionalAppeal": "string" },
        "messaging": { "keyThemes": ["string"], "callToActionStyle": "string", "valueProposition": "string" },
        "targetAudience": { "inferredDemographic": "string", "psychographics": ["string"] },
        "recommendations": { "doThis": ["string"], "avoidThis": ["string"], "contentIdeas": ["string"] }
    })
}

/// Prompt text with the expected JSON shape spelled out.
pub fn prompt_with_shape() -> String {
    let shape = serde_json::to_string_pretty(&answer_shape()).unwrap_or_default();
    format!(
        "{}\n\nRespond with a single JSON object and nothing else, using exactly this structure:\n{}",
        ANALYSIS_PROMPT, shape
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED_SECTIONS: [&str; 5] = [
        "visualStyle",
        "brandVoice",
        "messaging",
        "targetAudience",
        "recommendations",
    ];

    #[test]
    fn test_schema_has_every_section() {
        let schema = response_schema();
        for section in REQUIRED_SECTIONS {
            assert_eq!(schema["properties"][section]["type"], "OBJECT", "{section}");
        }
        assert_eq!(
            schema["properties"]["visualStyle"]["properties"]["colorPalette"]["properties"]
                ["secondary"]["type"],
            "ARRAY"
        );
    }

    fn required_of(node: &Value) -> Vec<&str> {
        node["required"]
            .as_array()
            .map(|keys| keys.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_schema_requires_sections_and_fields() {
        let schema = response_schema();
        assert_eq!(required_of(&schema), REQUIRED_SECTIONS);

        let visual = &schema["properties"]["visualStyle"];
        let palette = &visual["properties"]["colorPalette"];
        assert!(required_of(palette).contains(&"primary"));
        assert!(required_of(palette).contains(&"accent"));
        assert!(required_of(&visual["properties"]["typography"]).contains(&"style"));
        assert!(required_of(&schema["properties"]["brandVoice"]).contains(&"tone"));
        assert!(required_of(&schema["properties"]["messaging"]).contains(&"valueProposition"));
        assert!(
            required_of(&schema["properties"]["targetAudience"]).contains(&"inferredDemographic")
        );
    }

    #[test]
    fn test_every_object_lists_all_properties_as_required() {
        fn walk(node: &Value) {
            if node["type"] == "OBJECT" {
                let properties = node["properties"].as_object().expect("properties");
                let required = required_of(node);
                assert_eq!(required.len(), properties.len());
                for (key, child) in properties {
                    assert!(required.contains(&key.as_str()), "{key}");
                    walk(child);
                }
            }
        }
        walk(&response_schema());
    }

    #[test]
    fn test_prompt_with_shape() {
        let prompt = prompt_with_shape();
        assert!(prompt.starts_with("Analyze these marketing assets"));
        assert!(prompt.contains("Hex codes"));
        for section in REQUIRED_SECTIONS {
            assert!(prompt.contains(section), "{section}");
        }
    }
}
