//! tonemark: headless annotation driver.
//!
//! Loads a photo, replays a JSON stroke script through the annotation
//! session as if a user had painted it, then prints the session state
//! and the export payload layout. With `--submit` the payload is
//! actually POSTed to a running analysis service and the report
//! printed as JSON.
//!
//! # Stroke scripts
//!
//! A script is a JSON array of strokes in workflow order. Points are
//! in backing-bitmap coordinates (the script "display" is 1:1):
//!
//! ```json
//! [
//!   {"region": "hair", "points": [{"x": 100.0, "y": 60.0}, {"x": 110.0, "y": 62.0}]},
//!   {"region": "skin", "points": [{"x": 200.0, "y": 180.0}]}
//! ]
//! ```
//!
//! # Usage
//!
//! ```text
//! cargo run --bin tonemark -- photo.jpg --strokes strokes.json --composite preview.png
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;

use tonemark_annotate::{
    AnnotateConfig, AnnotationSession, Dimensions, DisplayBox, Point, Region,
};
use tonemark_client::AnalysisClient;
use tonemark_export::{REGION_TYPE_MULTI, build_payload};

/// Replay a stroke script over a photo and package the painted region
/// masks for tone analysis.
#[derive(Parser)]
#[command(name = "tonemark", version)]
struct Cli {
    /// Path to the photo (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Path to the JSON stroke script.
    #[arg(long)]
    strokes: PathBuf,

    /// Backing resolution width.
    #[arg(long, default_value_t = AnnotateConfig::DEFAULT_BACKING_WIDTH)]
    backing_width: u32,

    /// Backing resolution height.
    #[arg(long, default_value_t = AnnotateConfig::DEFAULT_BACKING_HEIGHT)]
    backing_height: u32,

    /// Write the composite preview PNG to this path.
    #[arg(long)]
    composite: Option<PathBuf>,

    /// Analysis service endpoint.
    #[arg(long, default_value = AnalysisClient::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Workflow-variant tag sent as the `region_type` part.
    #[arg(long, default_value = REGION_TYPE_MULTI)]
    region_tag: String,

    /// Actually submit to the analysis service (default: dry run that
    /// only prints the payload layout).
    #[arg(long)]
    submit: bool,
}

/// One scripted stroke: pointer-down on the first point, pointer-move
/// through the rest, pointer-up.
#[derive(Debug, Deserialize)]
struct Stroke {
    region: Region,
    points: Vec<Point>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let backing = Dimensions::new(cli.backing_width, cli.backing_height);
    let config = AnnotateConfig {
        backing,
        ..AnnotateConfig::default()
    };

    let mut session = AnnotationSession::new(config);
    let token = session.begin_load();
    let bytes = std::fs::read(&cli.image_path)?;
    let filename = cli
        .image_path
        .file_name()
        .map_or_else(|| "image".to_owned(), |n| n.to_string_lossy().into_owned());
    session.finish_load(token, bytes, filename)?;

    let script = std::fs::read_to_string(&cli.strokes)?;
    let strokes: Vec<Stroke> = serde_json::from_str(&script)?;
    replay(&mut session, &strokes)?;

    println!("active region: {}", session.active_region());
    for region in Region::ALL {
        println!("  {region}: {} brush applications", session.paint_count(region));
    }
    println!("submit gate: {}", if session.can_submit() { "open" } else { "closed" });

    if let (Some(path), Some(surface)) = (&cli.composite, session.composite()) {
        surface.save(path)?;
        println!("composite written to {}", path.display());
    }

    if !session.can_submit() {
        return Ok(());
    }

    let payload = {
        let handle = session.handle().ok_or("no image loaded after replay")?;
        build_payload(handle, session.store(), &cli.region_tag)?
    };

    println!("payload parts:");
    for part in payload.parts() {
        println!("  {} ({}, {} bytes)", part.name, part.mime, part.bytes.len());
    }

    if cli.submit {
        session.begin_submission()?;
        let client = AnalysisClient::new(&cli.endpoint);
        let outcome = client.analyze(payload).await;
        session.complete_submission();

        let response = outcome?;
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    Ok(())
}

/// Drive the session through the scripted strokes, advancing the
/// workflow between regions as a user would press "next".
fn replay(
    session: &mut AnnotationSession,
    strokes: &[Stroke],
) -> Result<(), Box<dyn std::error::Error>> {
    let backing = session.config().backing;
    let display = DisplayBox::new(0.0, 0.0, f64::from(backing.width), f64::from(backing.height));

    for stroke in strokes {
        while session.active_region() < stroke.region {
            session.advance()?;
        }
        if session.active_region() > stroke.region {
            return Err(format!(
                "stroke for {} arrives after the workflow already passed it; \
                 scripts must paint regions in hair, skin, hand order",
                stroke.region
            )
            .into());
        }

        let mut points = stroke.points.iter();
        if let Some(first) = points.next() {
            session.pointer_down(*first, display);
            for point in points {
                session.pointer_move(*point, display);
            }
            session.pointer_up();
        }
    }

    Ok(())
}
