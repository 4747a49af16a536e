pub mod board;
pub mod scale;
pub mod spiral;
pub mod sprite;
pub(crate) mod types;
pub use types::*;

use crate::config::CloudConfig;
use crate::error::ConfigError;
use crate::input::{WordEntry, WordRecord, extract_entries};
use crate::text_metrics::measure_text;
use board::Board;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scale::{FontScale, font_range_for_width, rotation_set};
use spiral::SpiralCursor;
use sprite::Sprite;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

// Per-word spiral budget on top of the diagonal cutoff. Keeps a run
// bounded even when the spiral orbits inside the diagonal for a long time.
const MAX_STEPS_PER_WORD: usize = 20_000;

/// Lays out `records` on the configured canvas. Words that cannot be
/// placed within the search budget are dropped; the returned list holds
/// only the survivors, in placement order.
pub fn compute_cloud(
    records: &[WordRecord],
    config: &CloudConfig,
) -> Result<CloudLayout, ConfigError> {
    match place_words(records, config, None)? {
        Some(layout) => Ok(layout),
        // unreachable: a run without a token is never cancelled
        None => {
            let (width, height) = config.clamped_size();
            Ok(CloudLayout {
                words: Vec::new(),
                width,
                height,
            })
        }
    }
}

/// Like [`compute_cloud`], but observes `cancel` between words. A run
/// cancelled mid-way returns `Ok(None)` and none of its partial results.
pub fn compute_cloud_cancellable(
    records: &[WordRecord],
    config: &CloudConfig,
    cancel: &AtomicBool,
) -> Result<Option<CloudLayout>, ConfigError> {
    place_words(records, config, Some(cancel))
}

fn place_words(
    records: &[WordRecord],
    config: &CloudConfig,
    cancel: Option<&AtomicBool>,
) -> Result<Option<CloudLayout>, ConfigError> {
    config.validate()?;
    let entries = extract_entries(records, &config.word_key, &config.weight_key)?;
    let (width, height) = config.clamped_size();

    // cap first, then rank: the scale domain comes from the kept words only
    let mut entries = entries;
    entries.truncate(config.max_words);
    entries.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(Ordering::Equal)
    });

    let weights: Vec<f64> = entries.iter().map(|entry| entry.weight).collect();
    let scale = FontScale::build(&weights, config.scale, font_range_for_width(width));
    let angles = rotation_set(config.min_angle, config.max_angle, config.orientations);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut board = Board::new(width, height);
    let mut words = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(token) = cancel
            && token.load(AtomicOrdering::Relaxed)
        {
            return Ok(None);
        }
        if let Some(word) = place_one(&entry, config, &scale, &angles, &mut board, &mut rng) {
            words.push(word);
        } else {
            log::debug!("no free position for {:?}; word dropped", entry.text);
        }
    }

    Ok(Some(CloudLayout {
        words,
        width,
        height,
    }))
}

fn place_one(
    entry: &WordEntry,
    config: &CloudConfig,
    scale: &FontScale,
    angles: &[f32],
    board: &mut Board,
    rng: &mut StdRng,
) -> Option<PlacedWord> {
    let size = scale.px(entry.weight);
    let rotate = angles[rng.gen_range(0..angles.len())];
    let extents = measure_text(&entry.text, &config.font_family, size);
    let sprite = Sprite::rasterize(extents.width, extents.height, rotate, config.padding);

    let width = board.width() as f32;
    let height = board.height() as f32;
    // start somewhere in the middle half of the canvas
    let start_x = ((width * (rng.r#gen::<f32>() + 0.5)) as i32) >> 1;
    let start_y = ((height * (rng.r#gen::<f32>() + 0.5)) as i32) >> 1;
    let dt = if rng.r#gen::<bool>() { 1.0 } else { -1.0 };
    let mut cursor = SpiralCursor::new(config.spiral, width, height, dt);
    let max_delta = (width * width + height * height).sqrt();

    let mut last = (i32::MIN, i32::MIN);
    for _ in 0..MAX_STEPS_PER_WORD {
        let (ox, oy) = cursor.step();
        let dx = ox as i32;
        let dy = oy as i32;
        if dx.abs().min(dy.abs()) as f32 >= max_delta {
            break;
        }
        if (dx, dy) == last {
            continue;
        }
        last = (dx, dy);

        let cx = start_x + dx;
        let cy = start_y + dy;
        if !board.in_bounds(&sprite, cx, cy) {
            continue;
        }
        if !board.collides(&sprite, cx, cy) {
            board.commit(&sprite, cx, cy);
            return Some(PlacedWord {
                text: entry.text.clone(),
                weight: entry.weight,
                size,
                rotate,
                x: cx as f32 - width / 2.0,
                y: cy as f32 - height / 2.0,
                sprite,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MIN_HEIGHT, MIN_WIDTH, ScaleKind};
    use serde_json::json;

    fn record(text: &str, value: f64) -> WordRecord {
        let mut map = WordRecord::new();
        map.insert("text".to_string(), json!(text));
        map.insert("value".to_string(), json!(value));
        map
    }

    fn seeded_config() -> CloudConfig {
        CloudConfig {
            seed: Some(42),
            ..CloudConfig::default()
        }
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        let layout = compute_cloud(&[], &seeded_config()).unwrap();
        assert!(layout.words.is_empty());
        assert_eq!(layout.width, 700.0);
        assert_eq!(layout.height, 400.0);
    }

    #[test]
    fn words_come_back_in_descending_weight_order() {
        let records = vec![
            record("low", 1.0),
            record("high", 10.0),
            record("mid", 5.0),
        ];
        let layout = compute_cloud(&records, &seeded_config()).unwrap();
        for pair in layout.words.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
    }

    #[test]
    fn truncation_happens_before_ranking() {
        // the heaviest word sits past the cap, so it must not appear at all
        let mut records: Vec<WordRecord> = (0..5).map(|i| record(&format!("w{i}"), 2.0)).collect();
        records.push(record("heavy", 100.0));
        let config = CloudConfig {
            max_words: 5,
            ..seeded_config()
        };
        let layout = compute_cloud(&records, &config).unwrap();
        assert!(layout.words.iter().all(|w| w.text != "heavy"));
        assert!(layout.words.len() <= 5);
    }

    #[test]
    fn invalid_config_fails_before_placement() {
        let config = CloudConfig {
            min_angle: 50.0,
            max_angle: -50.0,
            ..CloudConfig::default()
        };
        let err = compute_cloud(&[record("a", 1.0)], &config).unwrap_err();
        assert!(matches!(err, ConfigError::AngleOrder { .. }));
    }

    #[test]
    fn invalid_record_fails_before_placement() {
        let mut bad = WordRecord::new();
        bad.insert("value".to_string(), json!(1.0));
        let err = compute_cloud(&[record("ok", 2.0), bad], &seeded_config()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingWordKey { index: 1, .. }));
    }

    #[test]
    fn same_seed_reproduces_the_layout() {
        let records: Vec<WordRecord> = (0..20)
            .map(|i| record(&format!("word{i}"), (i + 1) as f64))
            .collect();
        let config = seeded_config();
        let a = compute_cloud(&records, &config).unwrap();
        let b = compute_cloud(&records, &config).unwrap();
        assert_eq!(a.words.len(), b.words.len());
        for (wa, wb) in a.words.iter().zip(&b.words) {
            assert_eq!(wa.text, wb.text);
            assert_eq!(wa.x, wb.x);
            assert_eq!(wa.y, wb.y);
            assert_eq!(wa.rotate, wb.rotate);
            assert_eq!(wa.size, wb.size);
        }
    }

    #[test]
    fn placed_words_never_overlap() {
        let records: Vec<WordRecord> = (0..30)
            .map(|i| record(&format!("word{i}"), ((i % 7) + 1) as f64))
            .collect();
        let layout = compute_cloud(&records, &seeded_config()).unwrap();
        assert!(!layout.words.is_empty());
        for (i, a) in layout.words.iter().enumerate() {
            for b in layout.words.iter().skip(i + 1) {
                let (ax, ay) = anchor(a, &layout);
                let (bx, by) = anchor(b, &layout);
                assert!(
                    !a.sprite.overlaps(ax, ay, &b.sprite, bx, by),
                    "{} overlaps {}",
                    a.text,
                    b.text
                );
            }
        }
    }

    #[test]
    fn starved_canvas_drops_words_but_keeps_a_valid_subset() {
        let records: Vec<WordRecord> = (0..50)
            .map(|i| record(&format!("crowded-word-{i}"), 50.0 + i as f64))
            .collect();
        let config = CloudConfig {
            width: MIN_WIDTH,
            height: MIN_HEIGHT,
            ..seeded_config()
        };
        let layout = compute_cloud(&records, &config).unwrap();
        assert!(layout.words.len() < records.len());
        for (i, a) in layout.words.iter().enumerate() {
            for b in layout.words.iter().skip(i + 1) {
                let (ax, ay) = anchor(a, &layout);
                let (bx, by) = anchor(b, &layout);
                assert!(!a.sprite.overlaps(ax, ay, &b.sprite, bx, by));
            }
        }
    }

    #[test]
    fn equal_top_weights_share_the_max_size() {
        let records = vec![record("aaa", 10.0), record("bbb", 10.0), record("c", 1.0)];
        let layout = compute_cloud(&records, &seeded_config()).unwrap();
        let a = layout.words.iter().find(|w| w.text == "aaa");
        let b = layout.words.iter().find(|w| w.text == "bbb");
        let c = layout.words.iter().find(|w| w.text == "c");
        if let (Some(a), Some(b)) = (a, b) {
            assert_eq!(a.size, b.size);
            if let Some(c) = c {
                assert!(c.size < a.size);
            }
        }
        // the light word ranks last
        if let Some(last) = layout.words.last() {
            assert!(last.weight <= layout.words[0].weight);
        }
    }

    #[test]
    fn uniform_weights_use_the_top_of_the_range() {
        let records = vec![record("one", 3.0), record("two", 3.0), record("three", 3.0)];
        let config = CloudConfig {
            scale: ScaleKind::Linear,
            ..seeded_config()
        };
        let layout = compute_cloud(&records, &config).unwrap();
        let (_, max_px) = font_range_for_width(700.0);
        for word in &layout.words {
            assert_eq!(word.size, max_px);
        }
    }

    #[test]
    fn rotations_come_from_the_configured_set() {
        let config = CloudConfig {
            min_angle: -60.0,
            max_angle: 60.0,
            orientations: 3,
            ..seeded_config()
        };
        let angles = rotation_set(-60.0, 60.0, 3);
        let records: Vec<WordRecord> = (0..15)
            .map(|i| record(&format!("w{i}"), (i + 1) as f64))
            .collect();
        let layout = compute_cloud(&records, &config).unwrap();
        for word in &layout.words {
            assert!(angles.iter().any(|a| (a - word.rotate).abs() < 1e-6));
        }
    }

    #[test]
    fn placed_words_stay_on_the_canvas() {
        let records: Vec<WordRecord> = (0..25)
            .map(|i| record(&format!("canvas{i}"), (i + 1) as f64))
            .collect();
        let layout = compute_cloud(&records, &seeded_config()).unwrap();
        for word in &layout.words {
            let (cx, cy) = anchor(word, &layout);
            assert!(cx + word.sprite.x0 >= 0);
            assert!(cy + word.sprite.y0 >= 0);
            assert!((cx + word.sprite.x1) as f32 <= layout.width);
            assert!((cy + word.sprite.y1) as f32 <= layout.height);
        }
    }

    #[test]
    fn cancelled_run_returns_none() {
        let cancel = AtomicBool::new(true);
        let records = vec![record("a", 1.0), record("b", 2.0)];
        let result = compute_cloud_cancellable(&records, &seeded_config(), &cancel).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn uncancelled_token_completes_normally() {
        let cancel = AtomicBool::new(false);
        let records = vec![record("a", 1.0), record("b", 2.0)];
        let result = compute_cloud_cancellable(&records, &seeded_config(), &cancel).unwrap();
        assert!(result.is_some());
    }

    fn anchor(word: &PlacedWord, layout: &CloudLayout) -> (i32, i32) {
        (
            (word.x + layout.width / 2.0) as i32,
            (word.y + layout.height / 2.0) as i32,
        )
    }
}
