//! Planetgen CLI - Procedural planet mesh generator.
//!
//! Generate cube-sphere planet meshes from layered noise and export
//! them as OBJ, raw GPU buffers or PNG color previews.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use planetgen::config::PlanetConfig;
use planetgen::export::{export_planet_buffers, export_planet_color_png, export_planet_obj};
use planetgen::{BiomePalette, GradientScope, Seed};

/// Procedural planet mesh generator.
#[derive(Parser)]
#[command(name = "planetgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a planet and export it.
    Generate {
        /// JSON configuration file; flags below override its values.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for reproducible generation (number or text). Random when omitted.
        #[arg(short, long)]
        seed: Option<String>,

        /// Vertices per face side (at least 2).
        #[arg(short, long)]
        resolution: Option<u32>,

        /// Base planet radius.
        #[arg(long)]
        radius: Option<f32>,

        /// Built-in palette used for every face.
        #[arg(short, long)]
        palette: Option<String>,

        /// Color every face against the planet-wide elevation range.
        #[arg(long)]
        global_gradient: bool,

        /// Export format.
        #[arg(short, long, default_value = "obj")]
        format: ExportFormat,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "planet")]
        name: String,
    },
    /// List the built-in palettes.
    Presets,
    /// Print the default configuration as JSON.
    DefaultConfig,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    /// Single Wavefront OBJ with vertex colors.
    Obj,
    /// Little-endian position/normal/color/index buffers per face.
    Raw,
    /// RGBA8 color preview per face.
    Png,
    /// Every format above.
    All,
}

struct GenerateArgs {
    config: Option<PathBuf>,
    seed: Option<String>,
    resolution: Option<u32>,
    radius: Option<f32>,
    palette: Option<String>,
    global_gradient: bool,
    format: ExportFormat,
    output: PathBuf,
    name: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            config,
            seed,
            resolution,
            radius,
            palette,
            global_gradient,
            format,
            output,
            name,
        } => run_generate(GenerateArgs {
            config,
            seed,
            resolution,
            radius,
            palette,
            global_gradient,
            format,
            output,
            name,
        }),
        Commands::Presets => {
            run_presets();
            Ok(())
        }
        Commands::DefaultConfig => run_default_config(),
    };

    if let Err(message) = result {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

fn parse_seed(text: &str) -> Seed {
    match text.parse::<u64>() {
        Ok(n) => Seed::Number(n),
        Err(_) => Seed::Text(text.to_string()),
    }
}

fn build_config(args: &GenerateArgs) -> Result<PlanetConfig, String> {
    let mut config = match &args.config {
        Some(path) => PlanetConfig::from_json_file(path)
            .map_err(|e| format!("failed to load {}: {}", path.display(), e))?,
        None => PlanetConfig::default(),
    };

    if let Some(seed) = &args.seed {
        config.seed = parse_seed(seed);
    }
    if let Some(resolution) = args.resolution {
        config.resolution = resolution;
    }
    if let Some(radius) = args.radius {
        config.radius = radius;
    }
    if let Some(name) = &args.palette {
        let palette = BiomePalette::preset(name).ok_or_else(|| {
            let known: Vec<String> = BiomePalette::presets().into_iter().map(|p| p.name).collect();
            format!("unknown palette '{}' (known: {})", name, known.join(", "))
        })?;
        config.palettes = vec![palette];
        config.face_palettes = None;
    }
    if args.global_gradient {
        config.gradient_scope = GradientScope::Global;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let config = build_config(&args)?;

    println!("Planetgen - Procedural Planet Generator");
    println!("=======================================");
    println!("Resolution: {}x{} per face", config.resolution, config.resolution);
    println!("Seed: {}", config.seed);
    println!("Radius: {}", config.radius);
    println!("Noise layers: {}", config.layers.len());
    println!("Gradient scope: {:?}", config.gradient_scope);
    println!("Output: {}", args.output.display());

    let start = Instant::now();

    println!("\nGenerating planet...");
    let generator = config.generator().map_err(|e| e.to_string())?;
    let planet = generator.generate().map_err(|e| e.to_string())?;
    let gen_time = start.elapsed();

    if let Some((min, max)) = planet.elevation_range() {
        println!("Elevation range: [{:.4}, {:.4}]", min, max);
    }
    println!(
        "Mesh: {} vertices, {} triangles",
        planet.vertex_count(),
        planet.triangle_count()
    );

    println!("Exporting...");
    let export_start = Instant::now();
    std::fs::create_dir_all(&args.output)
        .map_err(|e| format!("failed to create {}: {}", args.output.display(), e))?;

    let wants = |f: ExportFormat| args.format == f || args.format == ExportFormat::All;
    if wants(ExportFormat::Obj) {
        let path = args.output.join(format!("{}.obj", args.name));
        export_planet_obj(&planet, &path).map_err(|e| e.to_string())?;
        println!("  OBJ: {}", path.display());
    }
    if wants(ExportFormat::Raw) {
        export_planet_buffers(&planet, &args.output, &args.name).map_err(|e| e.to_string())?;
        println!("  RAW buffers: {}/{}_*.{{pos,nrm,col}}.f32, *.idx.u32", args.output.display(), args.name);
    }
    if wants(ExportFormat::Png) {
        export_planet_color_png(&planet, &args.output, &args.name).map_err(|e| e.to_string())?;
        println!("  PNG previews: {}/{}_*.png", args.output.display(), args.name);
    }
    let export_time = export_start.elapsed();

    println!("\nComplete!");
    println!("  Generation: {:.2?}", gen_time);
    println!("  Export:     {:.2?}", export_time);
    println!("  Total:      {:.2?}", start.elapsed());

    Ok(())
}

fn run_presets() {
    println!("Built-in palettes (low to high elevation):");
    for palette in BiomePalette::presets() {
        println!("  {}", palette);
    }
}

fn run_default_config() -> Result<(), String> {
    let json = PlanetConfig::default().to_json_string().map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}
