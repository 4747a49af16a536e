use fontdb::{Database, Family, Query};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

/// Measured extents of one line of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtents {
    pub width: f32,
    pub height: f32,
}

/// Per-face metrics in em units, precomputed once per font family so the
/// hot path never re-parses the font.
struct FaceMetrics {
    ascender: f32,
    descender: f32,
    ascii_advances: [f32; 128],
    mean_advance: f32,
}

pub struct TextMeasurer {
    db: Database,
    faces: HashMap<String, Option<FaceMetrics>>,
}

// Rough proportions used when no matching font can be loaded at all
// (headless systems with no font database).
const FALLBACK_ADVANCE: f32 = 0.6;
const FALLBACK_LINE_HEIGHT: f32 = 1.2;

impl TextMeasurer {
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        Self {
            db,
            faces: HashMap::new(),
        }
    }

    pub fn measure(&mut self, text: &str, font_family: &str, font_size: f32) -> TextExtents {
        if !self.faces.contains_key(font_family) {
            let metrics = self.load_metrics(font_family);
            self.faces.insert(font_family.to_string(), metrics);
        }
        let Some(Some(metrics)) = self.faces.get(font_family) else {
            return TextExtents {
                width: text.chars().count() as f32 * FALLBACK_ADVANCE * font_size,
                height: FALLBACK_LINE_HEIGHT * font_size,
            };
        };

        let mut width_em = 0.0f32;
        for ch in text.chars() {
            let code = ch as usize;
            if code < 128 && metrics.ascii_advances[code] > 0.0 {
                width_em += metrics.ascii_advances[code];
            } else {
                width_em += metrics.mean_advance;
            }
        }

        let mut height_em = metrics.ascender - metrics.descender;
        if height_em <= 0.0 {
            height_em = FALLBACK_LINE_HEIGHT;
        }

        TextExtents {
            width: width_em * font_size,
            height: height_em * font_size,
        }
    }

    fn load_metrics(&self, font_family: &str) -> Option<FaceMetrics> {
        let query = Query {
            families: &[Family::Name(font_family), Family::SansSerif],
            ..Query::default()
        };
        let id = self.db.query(&query)?;
        self.db.with_face_data(id, |data, index| {
            let face = Face::parse(data, index).ok()?;
            let upem = face.units_per_em() as f32;
            if upem <= 0.0 {
                return None;
            }
            let mut ascii_advances = [0.0f32; 128];
            let mut sum = 0.0f32;
            let mut count = 0u32;
            for code in 0..128u8 {
                if let Some(glyph) = face.glyph_index(code as char)
                    && let Some(advance) = face.glyph_hor_advance(glyph)
                {
                    let advance = advance as f32 / upem;
                    ascii_advances[code as usize] = advance;
                    if advance > 0.0 {
                        sum += advance;
                        count += 1;
                    }
                }
            }
            let mean_advance = if count > 0 {
                sum / count as f32
            } else {
                FALLBACK_ADVANCE
            };
            Some(FaceMetrics {
                ascender: face.ascender() as f32 / upem,
                descender: face.descender() as f32 / upem,
                ascii_advances,
                mean_advance,
            })
        })?
    }
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

static MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

pub fn measure_text(text: &str, font_family: &str, font_size: f32) -> TextExtents {
    let mut measurer = MEASURER.lock().unwrap_or_else(|e| e.into_inner());
    measurer.measure(text, font_family, font_size)
}
