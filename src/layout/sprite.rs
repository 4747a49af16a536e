/// A word's collision mask: the padded text box, rotated, rasterized into
/// bit-packed rows. Bounds are in pixels relative to the word anchor (the
/// box center); bit columns run LSB-first within each `u32`.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    row_words: usize,
    bits: Vec<u32>,
}

impl Sprite {
    /// Rasterizes a `width` x `height` box rotated by `rotate_deg` around
    /// its center, inflated by `padding` on every side. A pixel is set when
    /// its center falls inside the rotated box.
    pub fn rasterize(width: f32, height: f32, rotate_deg: f32, padding: f32) -> Self {
        let hw = (width.max(1.0) / 2.0) + padding.max(0.0);
        let hh = (height.max(1.0) / 2.0) + padding.max(0.0);
        let theta = rotate_deg.to_radians();
        let (sin, cos) = theta.sin_cos();

        // axis-aligned extents of the rotated box
        let ex = (hw * cos.abs() + hh * sin.abs()).ceil() as i32;
        let ey = (hw * sin.abs() + hh * cos.abs()).ceil() as i32;
        let w = (2 * ex) as usize;
        let h = (2 * ey) as usize;
        let row_words = w.div_ceil(32);
        let mut bits = vec![0u32; row_words * h];

        for ry in 0..h {
            let py = (ry as i32 - ey) as f32 + 0.5;
            let row = &mut bits[ry * row_words..(ry + 1) * row_words];
            for rx in 0..w {
                let px = (rx as i32 - ex) as f32 + 0.5;
                // inverse-rotate the pixel center into box space
                let u = px * cos + py * sin;
                let v = -px * sin + py * cos;
                if u.abs() <= hw && v.abs() <= hh {
                    row[rx >> 5] |= 1 << (rx & 31);
                }
            }
        }

        Self {
            x0: -ex,
            y0: -ey,
            x1: ex,
            y1: ey,
            row_words,
            bits,
        }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    pub fn row_words(&self) -> usize {
        self.row_words
    }

    pub fn row(&self, ry: usize) -> &[u32] {
        &self.bits[ry * self.row_words..(ry + 1) * self.row_words]
    }

    /// Reads one mask pixel, `(rx, ry)` counted from the top-left corner.
    pub fn bit(&self, rx: usize, ry: usize) -> bool {
        self.bits[ry * self.row_words + (rx >> 5)] & (1 << (rx & 31)) != 0
    }

    /// True when the set pixels of two sprites, placed at the given anchor
    /// positions, share any pixel.
    pub fn overlaps(&self, ax: i32, ay: i32, other: &Sprite, bx: i32, by: i32) -> bool {
        let left = (ax + self.x0).max(bx + other.x0);
        let right = (ax + self.x1).min(bx + other.x1);
        let top = (ay + self.y0).max(by + other.y0);
        let bottom = (ay + self.y1).min(by + other.y1);
        for y in top..bottom {
            for x in left..right {
                let sa = self.bit((x - ax - self.x0) as usize, (y - ay - self.y0) as usize);
                let sb = other.bit((x - bx - other.x0) as usize, (y - by - other.y0) as usize);
                if sa && sb {
                    return true;
                }
            }
        }
        false
    }
}
