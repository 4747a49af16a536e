use crate::config::Config;
use crate::layout::CloudLayout;
use crate::theme::pick_color;
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

pub fn render_svg(layout: &CloudLayout, config: &Config) -> String {
    let width = layout.width;
    let height = layout.height;
    let cx = width / 2.0;
    let cy = height / 2.0;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        config.render.background
    ));

    // color assignment reuses the layout seed so a seeded run renders
    // identically every time
    let mut rng = match config.cloud.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    svg.push_str(&format!("<g transform=\"translate({cx:.2},{cy:.2})\">"));
    for word in &layout.words {
        let color = pick_color(&config.theme.palette, &mut rng);
        svg.push_str(&format!(
            "<text transform=\"translate({:.2},{:.2}) rotate({})\" text-anchor=\"middle\" dy=\"0.35em\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            word.x,
            word.y,
            word.rotate,
            escape_xml(&config.cloud.font_family),
            word.size,
            color,
            escape_xml(&word.text)
        ));
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = config.cloud.font_family.clone();
    opt.default_size = usvg::Size::from_wh(config.cloud.width, config.cloud.height)
        .unwrap_or(usvg::Size::from_wh(700.0, 400.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
