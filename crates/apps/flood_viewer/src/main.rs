use std::io;
use std::process::ExitCode;

use clap::Parser;
use flood_viewer::{Args, FloodViewer, run_stream};
use gpu::renderer::JsonLinesRenderer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // stdout carries frames; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let layers = args.layer_set()?;
    let view = args.view_controller()?;
    info!(
        tileset = layers.tileset().root_url(),
        draped = layers.draped().len(),
        "flood viewer starting"
    );

    let mut viewer = FloodViewer::new(layers, view);
    let mut renderer = JsonLinesRenderer::new(io::stdout().lock());
    let drawn = run_stream(&mut viewer, io::stdin().lock(), &mut renderer)?;

    info!(frames = drawn, "input closed");
    Ok(())
}
