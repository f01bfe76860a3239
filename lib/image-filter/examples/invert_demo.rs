use image_filter::{Filter, ImageBuffer};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let mut buffer = ImageBuffer::load("data/test.png")?;
    buffer.apply(&Filter::Invert)?;
    buffer.save(output_dir.join("invert_effect.png"))?;

    println!("✓ Invert effect applied successfully!");
    println!("  Effect:   tmp/invert_effect.png");

    Ok(())
}
