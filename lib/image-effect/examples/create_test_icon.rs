use image::{Rgba, RgbaImage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all("data")?;

    // Cyan rounded-ish tile with a dark glyph and transparent corners
    let size = 256;
    let img = RgbaImage::from_fn(size, size, |x, y| {
        let corner = (x < 16 || x >= size - 16) && (y < 16 || y >= size - 16);
        let glyph = (96..160).contains(&x) && (64..192).contains(&y);

        if corner {
            Rgba([0, 0, 0, 0])
        } else if glyph {
            Rgba([30, 30, 30, 255])
        } else {
            let shade = (y * 60 / size) as u8;
            Rgba([0, 195 + shade, 215 + shade / 2, 255])
        }
    });

    img.save("data/icon.png")?;
    println!("Created data/icon.png");

    Ok(())
}
