use std::env;
use std::fs;

use anyhow::{anyhow, Context, Result};
use glam::{DMat4, Vec2};

use gps_radar::{
    render_targets, AlwaysFlush, DrawCommand, FlushPolicy, MapConfig, MillisParity, NeverFlush,
    RecordingSurface, RenderTarget, TargetKind,
};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let custom_data = fs::read_to_string(&options.path)
        .with_context(|| format!("failed to read panel file {}", options.path))?;

    if MapConfig::ensure_defaults(&custom_data).is_some() {
        println!("Panel file is missing configuration keys; defaults apply.");
    }
    let config = MapConfig::from_custom_data(&custom_data);
    let marks = gps_radar::parse_custom_data(&custom_data);
    println!(
        "Loaded {} waypoints (detection radius {})",
        marks.len(),
        config.detection_radius
    );
    for mark in &marks {
        println!(
            " - {} ({:.1}, {:.1}, {:.1})",
            mark.name, mark.coords.x, mark.coords.y, mark.coords.z
        );
    }

    let surface = RecordingSurface::new(Vec2::new(options.width, options.height));
    let handle = surface.clone();
    let mut targets = vec![RenderTarget {
        label: options.path.clone(),
        kind: options.kind,
        observer: DMat4::IDENTITY,
        custom_data,
        surface: Box::new(surface),
    }];

    let flush_policy: Box<dyn FlushPolicy> = match options.flush {
        Some(true) => Box::new(AlwaysFlush),
        Some(false) => Box::new(NeverFlush),
        None => Box::new(MillisParity),
    };
    let mut reports = render_targets(&mut targets, flush_policy.as_ref());
    let report = reports
        .pop()
        .ok_or_else(|| anyhow!("no render target was processed"))?;
    let stats = report
        .outcome
        .with_context(|| format!("failed to render '{}'", report.label))?;

    let frame = handle
        .last_frame()
        .ok_or_else(|| anyhow!("sink recorded no frame"))?;
    println!("Submitted frame with {} commands:", frame.len());
    for command in &frame {
        println!(" - {}", describe(command));
    }
    println!(
        "Drew {} markers (cache flush: {})",
        stats.marks_drawn, stats.cache_flushed
    );
    Ok(())
}

fn describe(command: &DrawCommand) -> String {
    match command {
        DrawCommand::Texture {
            texture,
            position,
            size,
            ..
        } => format!(
            "texture {} at ({:.1}, {:.1}) size ({:.1}, {:.1})",
            texture, position.x, position.y, size.x, size.y
        ),
        DrawCommand::Text {
            text,
            position,
            scale,
            ..
        } => format!(
            "text '{}' at ({:.1}, {:.1}) scale {:.2}",
            text, position.x, position.y, scale
        ),
    }
}

struct CliOptions {
    path: String,
    kind: TargetKind,
    width: f32,
    height: f32,
    flush: Option<bool>,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let Some(path) = args.next() else {
            return Err(anyhow!(
                "Usage: gps-radar <panel.cfg> [--mobile] [--width N] [--height N] [--flush|--no-flush]"
            ));
        };
        let mut kind = TargetKind::Stationary;
        let mut width = 512.0;
        let mut height = 512.0;
        let mut flush = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--mobile" => kind = TargetKind::Mobile,
                "--width" => width = parse_dimension(&mut args, "--width")?,
                "--height" => height = parse_dimension(&mut args, "--height")?,
                "--flush" => flush = Some(true),
                "--no-flush" => flush = Some(false),
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Expected --mobile, --width, --height, --flush or --no-flush"
                    ));
                }
            }
        }
        Ok(Self {
            path,
            kind,
            width,
            height,
            flush,
        })
    }
}

fn parse_dimension(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<f32> {
    let value = args
        .next()
        .ok_or_else(|| anyhow!("{flag} expects a value"))?;
    let parsed: f32 = value
        .parse()
        .map_err(|_| anyhow!("{flag} expects a number, got {value}"))?;
    if parsed <= 0.0 {
        return Err(anyhow!("{flag} must be positive"));
    }
    Ok(parsed)
}
