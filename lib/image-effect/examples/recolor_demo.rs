/// Cyan background recolor example
/// Run `create_test_icon` first to produce data/icon.png

use image::ImageReader;
use image_effect::{Effect, RecolorConfig};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = ImageReader::open("data/icon.png")?.decode()?.to_rgba8();

    for (name, rgb) in [("orange", [255, 107, 53]), ("purple", [155, 89, 182]), ("green", [49, 87, 44])] {
        let effect = RecolorConfig::from_rgb(rgb[0], rgb[1], rgb[2]);
        let out = effect.apply(img.clone())?;
        let path = output_dir.join(format!("recolor_{name}.png"));
        out.save(&path)?;
        println!("✓ {name}: {}", path.display());
    }

    Ok(())
}
