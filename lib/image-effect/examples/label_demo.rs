/// Environment badge example
/// Run `create_test_icon` first to produce data/icon.png

use image::ImageReader;
use image_effect::{Effect, LabelConfig, LabelEffect, RecolorConfig, SystemFontResolver};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = ImageReader::open("data/icon.png")?.decode()?.to_rgba8();

    let recolor = RecolorConfig::from_rgb(255, 107, 53);
    let label = LabelEffect::new(LabelConfig::new("test"), SystemFontResolver::new());
    let out = image_effect::apply_all(img, &[&recolor, &label])?;

    let geometry = label.config().geometry(out.width());
    out.save(output_dir.join("label_effect.png"))?;

    println!("✓ Label effect applied successfully!");
    println!("  Font size: {}", geometry.font_size);
    println!("  Effect:    tmp/label_effect.png");

    Ok(())
}
