use crate::layout::sprite::Sprite;

/// One placed word. Coordinates are the offset of the word's center from
/// the canvas center, matching the rendered `translate`.
#[derive(Debug, Clone)]
pub struct PlacedWord {
    pub text: String,
    pub weight: f64,
    pub size: f32,
    pub rotate: f32,
    pub x: f32,
    pub y: f32,
    pub sprite: Sprite,
}

/// A finished layout. `words` is in placement order (descending weight);
/// an empty list is a valid result. `width`/`height` are the effective
/// (clamped) canvas dimensions.
#[derive(Debug, Clone)]
pub struct CloudLayout {
    pub words: Vec<PlacedWord>,
    pub width: f32,
    pub height: f32,
}
