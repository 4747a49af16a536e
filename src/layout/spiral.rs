use crate::config::SpiralKind;

/// Stateful candidate-offset generator. One cursor per word; offsets are
/// relative to the word's start position and grow outward each step.
#[derive(Debug, Clone)]
pub struct SpiralCursor {
    kind: SpiralKind,
    aspect: f32,
    dt: f32,
    t: f32,
    // rectangular state
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
}

impl SpiralCursor {
    /// `dt` is the walk direction, +1.0 or -1.0; both trace the same path
    /// in opposite senses.
    pub fn new(kind: SpiralKind, width: f32, height: f32, dt: f32) -> Self {
        let aspect = width / height;
        let dy = 4.0;
        Self {
            kind,
            aspect,
            dt,
            // first step evaluates t == 0
            t: -dt,
            x: 0.0,
            y: 0.0,
            dx: dy * aspect,
            dy,
        }
    }

    pub fn step(&mut self) -> (f32, f32) {
        self.t += self.dt;
        match self.kind {
            SpiralKind::Archimedean => {
                let r = 0.1 * self.t;
                (self.aspect * r * r.cos(), r * r.sin())
            }
            SpiralKind::Rectangular => {
                let sign = if self.t < 0.0 { -1.0f32 } else { 1.0 };
                let leg = ((1.0 + 4.0 * sign * self.t).sqrt() - sign) as i32 & 3;
                match leg {
                    0 => self.x += self.dx,
                    1 => self.y += self.dy,
                    2 => self.x -= self.dx,
                    _ => self.y -= self.dy,
                }
                (self.x, self.y)
            }
        }
    }
}
