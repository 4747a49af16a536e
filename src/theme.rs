use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub background: String,
    pub palette: Vec<String>,
}

impl Theme {
    pub fn category10() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            palette: [
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
                "#7f7f7f", "#bcbd22", "#17becf",
            ]
            .iter()
            .map(|value| value.to_string())
            .collect(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: "#1C2430".to_string(),
            palette: [
                "#8AB4F8", "#F28B82", "#FDD663", "#81C995", "#FF8BCB", "#C58AF9", "#78D9EC",
                "#FCAD70",
            ]
            .iter()
            .map(|value| value.to_string())
            .collect(),
        }
    }
}

/// Picks a fill color for one word. Falls back to black when the palette is
/// empty so a misconfigured theme still renders something visible.
pub fn pick_color<'a>(palette: &'a [String], rng: &mut impl Rng) -> &'a str {
    if palette.is_empty() {
        return "#000000";
    }
    &palette[rng.gen_range(0..palette.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pick_color_stays_in_palette() {
        let theme = Theme::category10();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let color = pick_color(&theme.palette, &mut rng);
            assert!(theme.palette.iter().any(|c| c == color));
        }
    }

    #[test]
    fn pick_color_empty_palette_falls_back() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(pick_color(&[], &mut rng), "#000000");
    }
}
