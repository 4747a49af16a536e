use crate::config::ScaleKind;

// Lower bound fed to the log scale so zero weights stay mappable.
const LOG_FLOOR: f64 = 1e-9;

/// Font size range in px for a given canvas width. Wider canvases can
/// afford larger type.
pub fn font_range_for_width(width: f32) -> (f32, f32) {
    if width >= 650.0 {
        (18.0, 70.0)
    } else if width >= 550.0 {
        (16.0, 55.0)
    } else {
        (16.0, 40.0)
    }
}

/// Total map from weight to font size in px. Built once per run from the
/// truncated word list.
#[derive(Debug, Clone)]
pub struct FontScale {
    kind: ScaleKind,
    domain: (f64, f64),
    range: (f32, f32),
    constant: bool,
}

impl FontScale {
    pub fn build(weights: &[f64], kind: ScaleKind, range: (f32, f32)) -> Self {
        let mut sorted: Vec<f64> = weights.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        sorted.dedup();
        // with at most one distinct weight there is nothing to rank against,
        // so every word gets the top size
        let constant = sorted.len() <= 1;
        let domain = if constant {
            (0.0, 1.0)
        } else {
            (sorted[0], sorted[sorted.len() - 1])
        };
        Self {
            kind,
            domain,
            range,
            constant,
        }
    }

    pub fn px(&self, weight: f64) -> f32 {
        if self.constant {
            return self.range.1;
        }
        let (d0, d1) = self.domain;
        let t = match self.kind {
            ScaleKind::Linear => (weight - d0) / (d1 - d0),
            ScaleKind::Sqrt => (weight.sqrt() - d0.sqrt()) / (d1.sqrt() - d0.sqrt()),
            ScaleKind::Log => {
                let lo = d0.max(LOG_FLOOR).ln();
                let hi = d1.max(LOG_FLOOR).ln();
                (weight.max(LOG_FLOOR).ln() - lo) / (hi - lo)
            }
        };
        self.range.0 + (t as f32) * (self.range.1 - self.range.0)
    }
}

/// The set of angles words may take. A single orientation collapses to the
/// minimum angle; otherwise the endpoints are always present and interior
/// angles accumulate by a fixed increment. The accumulation can land one
/// entry short of (or past) an exact split; that slack is accepted.
pub fn rotation_set(min_angle: f32, max_angle: f32, orientations: usize) -> Vec<f32> {
    if orientations <= 1 {
        return vec![min_angle];
    }
    let mut angles = vec![min_angle, max_angle];
    let increment = (max_angle - min_angle) / (orientations - 1) as f32;
    if increment <= 0.0 {
        return angles;
    }
    let mut angle = min_angle + increment;
    while angle < max_angle {
        angles.push(angle);
        angle += increment;
    }
    angles
}
