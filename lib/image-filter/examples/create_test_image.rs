use image::{Rgb, RgbImage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all("data")?;

    // 400x300 gradient covering the full range of every channel
    let img = RgbImage::from_fn(400, 300, |x, y| {
        Rgb([
            (x * 255 / 399) as u8,
            (y * 255 / 299) as u8,
            ((x + y) * 255 / 698) as u8,
        ])
    });

    img.save("data/test.png")?;
    println!("Created data/test.png");

    Ok(())
}
