use crate::render::{self, RenderParams};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

/// The extension manifest references exactly these sizes.
pub const DEFAULT_SIZES: [u32; 4] = [16, 32, 48, 128];

#[derive(Debug)]
pub struct Args {
    pub output: PathBuf,
    pub sizes: Option<Vec<u32>>,
    pub primary: String,
    pub secondary: String,
}

pub fn generate_icons(args: Args) -> Result<()> {
    let primary = parse_color(&args.primary)?;
    let secondary = parse_color(&args.secondary)?;

    let sizes = args.sizes.unwrap_or_else(|| DEFAULT_SIZES.to_vec());
    if sizes.iter().any(|&size| size == 0) {
        anyhow::bail!("Icon sizes must be positive");
    }

    // Ensure the output directory exists
    create_dir_all(&args.output).context("Can't create output directory")?;

    // Resolve the text capability once; a missing font means every size
    // takes the stroked fallback glyph path.
    let font = render::load_label_font();
    if font.is_none() {
        println!("No label font found, falling back to stroked glyphs");
    }

    println!("Generating Code Drill icons...");

    for &size in &sizes {
        let params = RenderParams::new(size, primary, secondary);
        let icon = render::render(&params, font.as_ref());

        let path = args.output.join(format!("icon-{size}.png"));
        save_png(&icon, &path).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ Created {} ({size}x{size})", path.display());
    }

    println!("\nAll icons generated successfully!");
    Ok(())
}

/// Parse a CSS color string (e.g. "#3B82F6") into an RGB triple.
fn parse_color(color: &str) -> Result<[u8; 3]> {
    let srgb = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow::anyhow!("Invalid CSS color: {color}"))?;
    Ok([
        (srgb.red * 255.0).round() as u8,
        (srgb.green * 255.0).round() as u8,
        (srgb.blue * 255.0).round() as u8,
    ])
}

// Encode the canvas as PNG with compression
fn save_png(icon: &RgbaImage, path: &Path) -> Result<()> {
    let mut out_file = BufWriter::new(File::create(path)?);
    let encoder =
        PngEncoder::new_with_quality(&mut out_file, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(icon.as_raw(), icon.width(), icon.height(), ColorType::Rgba8)?;
    out_file.flush()?;
    Ok(())
}
