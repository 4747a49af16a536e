use crate::layout::sprite::Sprite;

// Side length of one coarse occupancy block, in pixels.
const BLOCK: i32 = 32;

/// The canvas occupancy grid. Bit-packed rows mirror the sprite layout
/// (LSB-first columns); a coarse block index lets candidate tests skip
/// regions no committed word has touched. Owned by exactly one run and
/// only ever grows.
pub struct Board {
    width: i32,
    height: i32,
    row_words: usize,
    bits: Vec<u32>,
    block_cols: usize,
    blocks: Vec<bool>,
}

impl Board {
    pub fn new(width: f32, height: f32) -> Self {
        let width = width.ceil() as i32;
        let height = height.ceil() as i32;
        let row_words = (width as usize).div_ceil(32);
        let block_cols = (width + BLOCK - 1).div_euclid(BLOCK) as usize;
        let block_rows = (height + BLOCK - 1).div_euclid(BLOCK) as usize;
        Self {
            width,
            height,
            row_words,
            bits: vec![0u32; row_words * height as usize],
            block_cols,
            blocks: vec![false; block_cols * block_rows],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether a sprite anchored at `(cx, cy)` lies entirely on the board.
    pub fn in_bounds(&self, sprite: &Sprite, cx: i32, cy: i32) -> bool {
        cx + sprite.x0 >= 0
            && cy + sprite.y0 >= 0
            && cx + sprite.x1 <= self.width
            && cy + sprite.y1 <= self.height
    }

    /// Exact bit-level collision test. Cost scales with the candidate mask
    /// area; untouched coarse blocks short-circuit to false. Callers must
    /// have checked `in_bounds` first.
    pub fn collides(&self, sprite: &Sprite, cx: i32, cy: i32) -> bool {
        if self.blocks_clear(sprite, cx, cy) {
            return false;
        }
        let x = cx + sprite.x0;
        let y = cy + sprite.y0;
        let shift = (x & 31) as u32;
        let word_x = (x >> 5) as usize;
        for ry in 0..sprite.height() as usize {
            let brow_start = (y as usize + ry) * self.row_words;
            let brow = &self.bits[brow_start..brow_start + self.row_words];
            for (i, &sw) in sprite.row(ry).iter().enumerate() {
                if sw == 0 {
                    continue;
                }
                let wi = word_x + i;
                let lo = brow.get(wi).copied().unwrap_or(0) as u64;
                let hi = brow.get(wi + 1).copied().unwrap_or(0) as u64;
                let window = ((lo | (hi << 32)) >> shift) as u32;
                if sw & window != 0 {
                    return true;
                }
            }
        }
        false
    }

    /// ORs the sprite into the board at `(cx, cy)`.
    pub fn commit(&mut self, sprite: &Sprite, cx: i32, cy: i32) {
        let x = cx + sprite.x0;
        let y = cy + sprite.y0;
        let shift = (x & 31) as u32;
        let word_x = (x >> 5) as usize;
        for ry in 0..sprite.height() as usize {
            let brow_start = (y as usize + ry) * self.row_words;
            for (i, &sw) in sprite.row(ry).iter().enumerate() {
                if sw == 0 {
                    continue;
                }
                let wi = word_x + i;
                let wide = (sw as u64) << shift;
                self.bits[brow_start + wi] |= wide as u32;
                // in-bounds sprites never carry set bits past the last word
                if wi + 1 < self.row_words {
                    self.bits[brow_start + wi + 1] |= (wide >> 32) as u32;
                }
            }
        }
        self.mark_blocks(sprite, cx, cy);
    }

    fn block_range(&self, sprite: &Sprite, cx: i32, cy: i32) -> (usize, usize, usize, usize) {
        let bx0 = ((cx + sprite.x0).max(0) / BLOCK) as usize;
        let by0 = ((cy + sprite.y0).max(0) / BLOCK) as usize;
        let bx1 = (((cx + sprite.x1 - 1).min(self.width - 1)) / BLOCK) as usize;
        let by1 = (((cy + sprite.y1 - 1).min(self.height - 1)) / BLOCK) as usize;
        (bx0, by0, bx1, by1)
    }

    fn blocks_clear(&self, sprite: &Sprite, cx: i32, cy: i32) -> bool {
        let (bx0, by0, bx1, by1) = self.block_range(sprite, cx, cy);
        for by in by0..=by1 {
            for bx in bx0..=bx1 {
                if self.blocks[by * self.block_cols + bx] {
                    return false;
                }
            }
        }
        true
    }

    fn mark_blocks(&mut self, sprite: &Sprite, cx: i32, cy: i32) {
        let (bx0, by0, bx1, by1) = self.block_range(sprite, cx, cy);
        for by in by0..=by1 {
            for bx in bx0..=bx1 {
                self.blocks[by * self.block_cols + bx] = true;
            }
        }
    }
}
