use crate::layout::CloudLayout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub words: Vec<WordDump>,
}

#[derive(Debug, Serialize)]
pub struct WordDump {
    pub text: String,
    pub weight: f64,
    pub size: f32,
    pub rotate: f32,
    pub x: f32,
    pub y: f32,
    pub mask_bounds: [i32; 4],
}

impl LayoutDump {
    pub fn from_layout(layout: &CloudLayout) -> Self {
        let words = layout
            .words
            .iter()
            .map(|word| WordDump {
                text: word.text.clone(),
                weight: word.weight,
                size: word.size,
                rotate: word.rotate,
                x: word.x,
                y: word.y,
                mask_bounds: [word.sprite.x0, word.sprite.y0, word.sprite.x1, word.sprite.y1],
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            words,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &CloudLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
