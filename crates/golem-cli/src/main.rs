//! Golem CLI - generate a humanoid mesh and report its statistics

use anyhow::{Context, Result};
use clap::{Args, Parser};
use golem_engine::{
    BodyPart, GenerationConfig, Generator, MeshResult, ShapeParameters, SmoothingConfig,
};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "golem")]
#[command(about = "Procedural humanoid meshes from signed distance fields", long_about = None)]
#[command(version)]
struct Cli {
    /// Shape parameters as a JSON object; missing fields keep their defaults
    #[arg(long, value_name = "JSON")]
    params_json: Option<String>,

    #[command(flatten)]
    shape: ShapeArgs,

    /// Cells along each axis of the sampling lattice
    #[arg(short, long, default_value = "32")]
    resolution: u32,

    /// Laplacian smoothing passes applied after extraction
    #[arg(long, default_value = "0")]
    smooth: u32,

    /// Fraction each vertex moves per smoothing pass
    #[arg(long, default_value = "0.5")]
    smooth_factor: f32,

    /// Skip per-vertex region colors
    #[arg(long)]
    no_colors: bool,

    /// Skip gradient normals
    #[arg(long)]
    no_normals: bool,
}

/// Individual overrides, applied on top of `--params-json`
#[derive(Args, Debug, Default)]
struct ShapeArgs {
    #[arg(long)]
    height: Option<f32>,
    #[arg(long)]
    torso_width: Option<f32>,
    #[arg(long)]
    waist_width: Option<f32>,
    #[arg(long)]
    hip_width: Option<f32>,
    #[arg(long)]
    shoulder_width: Option<f32>,
    /// Blend radius where limbs meet the torso
    #[arg(long)]
    muscle_tone: Option<f32>,
    /// Head radius
    #[arg(long)]
    head_size: Option<f32>,
    #[arg(long)]
    arm_length: Option<f32>,
    #[arg(long)]
    arm_thickness: Option<f32>,
    #[arg(long)]
    leg_length: Option<f32>,
    #[arg(long)]
    leg_thickness: Option<f32>,
    #[arg(long)]
    neck_thickness: Option<f32>,
}

impl ShapeArgs {
    fn apply(&self, params: &mut ShapeParameters) {
        let overrides = [
            (&mut params.height, self.height),
            (&mut params.torso_width, self.torso_width),
            (&mut params.waist_width, self.waist_width),
            (&mut params.hip_width, self.hip_width),
            (&mut params.shoulder_width, self.shoulder_width),
            (&mut params.muscle_tone, self.muscle_tone),
            (&mut params.head_size, self.head_size),
            (&mut params.arm_length, self.arm_length),
            (&mut params.arm_thickness, self.arm_thickness),
            (&mut params.leg_length, self.leg_length),
            (&mut params.leg_thickness, self.leg_thickness),
            (&mut params.neck_thickness, self.neck_thickness),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

impl Cli {
    fn shape_parameters(&self) -> Result<ShapeParameters> {
        let mut params = match &self.params_json {
            Some(json) => serde_json::from_str(json).context("Invalid --params-json")?,
            None => ShapeParameters::default(),
        };
        self.shape.apply(&mut params);
        Ok(params)
    }

    fn generation_config(&self) -> GenerationConfig {
        let mut config = GenerationConfig::default()
            .with_resolution(self.resolution)
            .with_colors(!self.no_colors);
        config.mesh.compute_normals = !self.no_normals;
        config.mesh.smoothing = SmoothingConfig::new(self.smooth, self.smooth_factor);
        config
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the report
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let params = cli.shape_parameters()?;
    tracing::debug!(?params, resolution = cli.resolution, "starting generation");
    let generator = Generator::new(cli.generation_config());

    let started = Instant::now();
    let mesh = generator
        .generate(params)
        .context("Mesh generation failed")?;
    let elapsed = started.elapsed();

    print_stats(&mesh, &params);
    println!("Time:      {:.1} ms", elapsed.as_secs_f64() * 1000.0);
    Ok(())
}

fn print_stats(mesh: &MeshResult, params: &ShapeParameters) {
    println!("Parameters:");
    for (name, value) in params.fields() {
        println!("  {name:<16} {value:.3}");
    }
    println!("Vertices:  {}", mesh.vertex_count());
    println!("Triangles: {}", mesh.triangle_count());

    match mesh.bounds() {
        Some(bounds) => println!(
            "Bounds:    [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
            bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
        ),
        None => println!("Bounds:    (empty mesh)"),
    }

    if let Some(colors) = &mesh.colors {
        println!("Regions:");
        for (part, count) in region_counts(colors) {
            if count > 0 {
                println!("  {:<16} {count}", part.name());
            }
        }
    }
}

/// Vertex count per body region, recovered from the region colors
fn region_counts(colors: &[f32]) -> Vec<(BodyPart, usize)> {
    let mut counts: Vec<(BodyPart, usize)> = BodyPart::ALL.iter().map(|&p| (p, 0)).collect();
    for color in colors.chunks_exact(4) {
        if let Some(entry) = counts.iter_mut().find(|(part, _)| part.color()[..] == *color) {
            entry.1 += 1;
        }
    }
    counts
}
