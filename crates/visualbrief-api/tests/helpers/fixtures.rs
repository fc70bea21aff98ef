//! Test fixtures: image files and a complete brief.

#![allow(dead_code)]

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::{json, Value};
use std::io::Cursor;

fn noise_image(width: u32, height: u32, seed: u32) -> RgbImage {
    let mut state = seed | 1;
    RgbImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        Rgb([r, g, b])
    })
}

/// Noisy JPEG of the given dimensions, so the encoded size is realistic.
pub fn noise_jpeg(width: u32, height: u32, seed: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(noise_image(width, height, seed))
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .expect("encode jpeg");
    buffer
}

/// Noisy 4:3 JPEG at full quality, grown until it reaches `min_bytes`.
pub fn noise_jpeg_of_at_least(min_bytes: usize, seed: u32) -> Vec<u8> {
    let (mut width, mut height) = (400, 300);
    loop {
        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, 100)
            .encode_image(&noise_image(width, height, seed))
            .expect("encode jpeg");
        if buffer.len() >= min_bytes {
            return buffer;
        }
        width = width * 11 / 10;
        height = height * 11 / 10;
    }
}

/// Small flat-colored PNG.
pub fn solid_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 90]));
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("encode png");
    buffer
}

/// The analysis answer as the provider returns it (no `meta`).
pub fn brief_sections() -> Value {
    json!({
        "visualStyle": {
            "colorPalette": { "primary": "#1A1A2E", "secondary": ["#E94560", "#F5F5F5"], "accent": "#0F3460" },
            "typography": { "style": "Modern Sans-Serif", "hierarchy": "Bold headlines over light body copy" },
            "layoutPatterns": ["Asymmetric grids", "Generous whitespace"],
            "visualMotifs": ["Geometric shapes"]
        },
        "brandVoice": {
            "tone": "Confident",
            "personality": ["Bold", "Modern", "Approachable"],
            "emotionalAppeal": "Aspiration"
        },
        "messaging": {
            "keyThemes": ["Innovation", "Simplicity"],
            "callToActionStyle": "Direct imperatives",
            "valueProposition": "Design that gets out of the way"
        },
        "targetAudience": {
            "inferredDemographic": "Urban professionals, 25-40",
            "psychographics": ["Early adopters"]
        },
        "recommendations": {
            "doThis": ["Lead with product close-ups"],
            "avoidThis": ["Stock photography"],
            "contentIdeas": ["Behind-the-scenes design series"]
        }
    })
}

/// A finished brief as served by the API.
pub fn brief_document(image_count: usize) -> Value {
    let mut brief = brief_sections();
    brief["meta"] = json!({
        "analyzedAt": "2026-03-14T10:30:00Z",
        "imageCount": image_count,
    });
    brief
}
