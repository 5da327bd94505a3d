use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pulpgfx::foundation::math::premultiply;
use pulpgfx::{
    AnimatedImage, BlendMode, EdgeClamp, Graphics, GraphicsOpts, PixelBuffer, PngMetadata,
    assets::png,
};

#[derive(Parser, Debug)]
#[command(name = "pulpgfx", version)]
struct Cli {
    /// Log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the size, opacity and engine metadata of a PNG.
    Info(InfoArgs),
    /// Decode a PNG and write it back out, optionally rescaled.
    Recode(RecodeArgs),
    /// Render a small test scene exercising every drawing primitive.
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    path: PathBuf,
}

#[derive(Parser, Debug)]
struct RecodeArgs {
    input: PathBuf,
    output: PathBuf,

    /// Target width; height follows the aspect ratio unless given.
    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Drop hoTS/foNt/anIm chunks.
    #[arg(long)]
    strip_metadata: bool,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    output: PathBuf,

    #[arg(long, default_value_t = 256)]
    size: u32,

    /// Graphics options JSON.
    #[arg(long)]
    opts: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Recode(args) => cmd_recode(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let decoded = png::read_file(&args.path)?;
    let img = &decoded.image;
    println!("{}", args.path.display());
    println!("  size: {}x{}", img.width(), img.height());
    println!("  opaque: {}", img.is_opaque());

    let meta = &decoded.metadata;
    if let Some(h) = meta.hotspot {
        println!("  hotspot: ({}, {})", h.x, h.y);
    }
    if let Some(font) = &meta.font {
        println!(
            "  font: {} glyphs U+{:04X}..=U+{:04X}, tracking {}{}",
            font.glyph_count(),
            font.first_char,
            font.last_char,
            font.tracking,
            if font.bearings.is_some() { ", bearings" } else { "" }
        );
    }
    if meta.animation.is_some() {
        let anim = AnimatedImage::from_decoded(decoded.clone())?;
        println!(
            "  animation: {} steps over {} cells, {} ms{}",
            anim.frame_count(),
            anim.cell_count(),
            anim.duration_ms(),
            if anim.is_looping() { ", looping" } else { "" }
        );
    }
    Ok(())
}

fn cmd_recode(args: RecodeArgs) -> anyhow::Result<()> {
    let decoded = png::read_file(&args.input)?;
    let src = &decoded.image;

    let image = match (args.width, args.height) {
        (None, None) => src.clone(),
        (w, h) => {
            let w = w.unwrap_or_else(|| {
                let h = u64::from(h.unwrap_or(src.height()));
                (u64::from(src.width()) * h / u64::from(src.height().max(1))) as u32
            });
            let h = h.unwrap_or_else(|| {
                (u64::from(src.height()) * u64::from(w) / u64::from(src.width().max(1))) as u32
            });
            anyhow::ensure!(w > 0 && h > 0, "target size {w}x{h} is empty");
            src.scaled(w, h)
        }
    };

    let metadata = if args.strip_metadata {
        PngMetadata::default()
    } else {
        decoded.metadata.clone()
    };
    png::write_file(&args.output, &image, &metadata)
        .with_context(|| format!("recode '{}'", args.input.display()))?;
    eprintln!("wrote {}", args.output.display());
    Ok(())
}

fn checkerboard(size: u32, cell: u32) -> PixelBuffer {
    let mut img = PixelBuffer::new(size, size, false);
    let (on, off) = (premultiply(0xffe0_4040), premultiply(0x8040_40e0));
    for y in 0..size {
        for x in 0..size {
            let even = (x / cell + y / cell) % 2 == 0;
            img.set_pixel(x, y, if even { on } else { off });
        }
    }
    img
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let opts = match &args.opts {
        Some(path) => GraphicsOpts::from_path(path)?,
        None => GraphicsOpts::default(),
    };
    anyhow::ensure!(args.size >= 16, "demo size must be at least 16");
    let s = f64::from(args.size);
    let sprite = checkerboard(32, 4);

    let mut surface = PixelBuffer::new(args.size, args.size, true);
    {
        let mut g = Graphics::with_opts(&mut surface, opts);
        g.set_color(0xff20_2430);
        g.fill();

        g.set_color(0xff3a_7bd5);
        g.fill_rect(s * 0.05, s * 0.05, s * 0.4, s * 0.25);
        g.set_color(0x80ff_d000);
        g.fill_rect(s * 0.2 + 0.5, s * 0.15 + 0.25, s * 0.4, s * 0.25);

        g.set_color(0xffff_ffff);
        for i in 0..8 {
            let t = f64::from(i) / 8.0;
            g.draw_line(s * 0.55, s * 0.05, s * 0.95, s * (0.05 + 0.4 * t));
        }
        g.draw_rect(s * 0.5, s * 0.5, s * 0.45, s * 0.45);

        g.draw_scaled_image(&sprite, s * 0.05, s * 0.55, s * 0.4, s * 0.4);

        g.push_transform();
        g.translate(s * 0.725, s * 0.725);
        g.rotate(std::f64::consts::FRAC_PI_6);
        g.set_edge_clamp(EdgeClamp::NONE);
        g.set_alpha(200);
        g.draw_image_at(&sprite, -16.0, -16.0);
        g.pop_transform()?;

        g.set_blend_mode(BlendMode::Multiply);
        g.set_alpha(255);
        g.set_color(0xff80_ff80);
        g.fill_rect(0.0, s * 0.45, s, s * 0.1);
    }

    png::write_file(&args.output, &surface, &PngMetadata::default())?;
    eprintln!("wrote {}", args.output.display());
    Ok(())
}
