use anyhow::{Context, Result};
use clap::Parser;
use geotri::{Document, Method, TriangleCollection};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod viewer;

/// Directory shipping the sample input; relative paths resolve here by default.
const SAMPLE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data");

#[derive(Parser)]
#[command(name = "geotri")]
#[command(about = "Triangulate a GeoJSON polygon and open the triangles in geojson.io")]
struct Cmd {
    /// Triangulation backend: `earcut` (flat, no holes) or `cesium` (WGS84, with holes)
    #[arg(default_value = "cesium")]
    method: String,

    /// Input GeoJSON; relative paths resolve against the base directory
    #[arg(default_value = "polyerr-good.geojson")]
    infile: PathBuf,

    /// Base directory for relative paths [default: the repository's `data/` directory]
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Output file; relative paths resolve against the base directory
    #[arg(long, default_value = "tris.geojson")]
    out: PathBuf,

    /// Viewer URL prefix; the percent-encoded compact GeoJSON is appended
    #[arg(long, default_value = viewer::GEOJSON_IO)]
    viewer_url: String,

    /// Write the output but do not launch the viewer
    #[arg(long)]
    no_open: bool,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    // Reject unknown methods before touching the filesystem.
    let method: Method = cmd.method.parse()?;
    run(method, &cmd)
}

fn run(method: Method, cmd: &Cmd) -> Result<()> {
    let base = match &cmd.base_dir {
        Some(dir) => dir.clone(),
        None => PathBuf::from(SAMPLE_DIR),
    };
    let infile = base.join(&cmd.infile);
    let outfile = base.join(&cmd.out);
    tracing::info!(%method, infile = %infile.display(), "triangulate");

    let doc = Document::from_path(&infile)?;
    let triangles = method
        .triangulate(&doc)
        .with_context(|| format!("triangulating {} with {method}", infile.display()))?;
    let out = TriangleCollection::from_triangles(&triangles);

    std::fs::write(&outfile, out.to_pretty_json()?)
        .with_context(|| format!("writing {}", outfile.display()))?;
    tracing::info!(triangles = out.len(), "wrote {}", outfile.display());

    let url = viewer::viewer_url(&cmd.viewer_url, &out.to_compact_json()?);
    if cmd.no_open {
        tracing::info!(url_len = url.len(), "viewer launch skipped");
    } else {
        viewer::open(&url);
    }
    Ok(())
}
