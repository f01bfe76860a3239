use image_filter::{Filter, GrayscaleConfig, GrayscaleMode, ImageBuffer};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let source = ImageBuffer::load("data/test.png")?;

    for mode in [GrayscaleMode::Luminance, GrayscaleMode::Average] {
        let mut buffer = source.clone();
        buffer.apply(&Filter::Grayscale(GrayscaleConfig::new().with_mode(mode)))?;

        let filename = format!("grayscale_{mode:?}.png").to_lowercase();
        buffer.save(output_dir.join(&filename))?;

        println!("✓ Generated {}", filename);
    }

    println!("\n✓ All grayscale effects applied successfully!");
    println!("  Images saved to: tmp/");

    Ok(())
}
