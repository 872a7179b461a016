//! `candor` batch harness.
//!
//! The scoring engine is an embeddable library; this binary is its external
//! caller for batch and test use. It decodes two images, reads the face
//! samples an external detection subsystem already produced for them (JSON),
//! and prints the discrepancy score. No detection, no persistence, no
//! capture happens here.
//!
//! Usage:
//!   candor --reference raw.jpg --reference-face raw.json \
//!          --candidate edited.jpg --candidate-face edited.json
//!   candor ... --json                # machine-readable output
//!   candor ... --tunables knobs.toml # override scoring constants

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use candor_core::{identity, FaceSample, Photo, PixelFrame, Scorer, Tunables};

#[derive(Parser, Debug)]
#[command(name = "candor")]
#[command(author, version, about = "Score a retouched photo against an unedited reference", long_about = None)]
struct Args {
    /// Unedited reference image
    #[arg(long)]
    reference: PathBuf,

    /// Face sample JSON for the reference image
    #[arg(long)]
    reference_face: PathBuf,

    /// Retouched candidate image
    #[arg(long)]
    candidate: PathBuf,

    /// Face sample JSON for the candidate image
    #[arg(long)]
    candidate_face: PathBuf,

    /// TOML file overriding scoring tunables
    #[arg(long)]
    tunables: Option<PathBuf>,

    /// Seed for grade-message selection (entropy-seeded when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

/// Decode an image into a flat RGBA frame and pair it with its face sample.
fn load_photo(image_path: &Path, face_path: &Path) -> Result<Photo> {
    let img = image::open(image_path)
        .with_context(|| format!("failed to decode image {}", image_path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    let frame = PixelFrame::from_rgba(width, height, img.into_raw())
        .with_context(|| format!("bad pixel buffer for {}", image_path.display()))?;

    let face_json = fs::read_to_string(face_path)
        .with_context(|| format!("failed to read face sample {}", face_path.display()))?;
    let face: FaceSample = serde_json::from_str(&face_json)
        .with_context(|| format!("failed to parse face sample {}", face_path.display()))?;

    Ok(Photo { frame, face })
}

fn load_tunables(path: Option<&Path>) -> Result<Tunables> {
    match path {
        None => Ok(Tunables::default()),
        Some(p) => {
            let text = fs::read_to_string(p)
                .with_context(|| format!("failed to read tunables {}", p.display()))?;
            toml::from_str(&text).with_context(|| format!("failed to parse tunables {}", p.display()))
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let reference = load_photo(&args.reference, &args.reference_face)?;
    let candidate = load_photo(&args.candidate, &args.candidate_face)?;
    tracing::info!(
        reference = %args.reference.display(),
        candidate = %args.candidate.display(),
        "photos loaded"
    );

    let tunables = load_tunables(args.tunables.as_deref())?;
    let mut scorer = match args.seed {
        Some(seed) => Scorer::with_seed(tunables, seed),
        None => Scorer::new(tunables),
    };

    let result = scorer
        .score(&reference, &candidate)
        .context("scoring failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Discrepancy score: {}/100", result.score);
    println!("Grade: {}", result.grade_name);
    println!("{}", result.message);
    if result.filter_bonus > 0 {
        println!("(includes +{} from pixel filter signals)", result.filter_bonus);
    }

    if let (Some(a), Some(b)) = (
        reference.face.embedding.as_deref(),
        candidate.face.embedding.as_deref(),
    ) {
        if let Some(distance) = identity::embedding_distance(a, b) {
            println!("Embedding distance: {distance:.3}");
        }
    }

    Ok(())
}
