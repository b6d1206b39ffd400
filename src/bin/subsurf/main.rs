//! subsurf CLI - subdivision surfaces from the command line.
//!
//! Usage: subsurf <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `subsurf --help` for available commands. Set `RUST_LOG=debug` to see
//! per-pass statistics.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};

use subsurf::algo::subdivide::{BoundaryMap, Scheme, Subdivider, RECOMMENDED_MAX_DEPTH};
use subsurf::algo::Progress;
use subsurf::io;
use subsurf::mesh::HalfEdgeMesh;

#[derive(Parser)]
#[command(name = "subsurf")]
#[command(author, version, about = "Catmull-Clark and Loop subdivision CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// Subdivide a mesh
    Subdivide {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Subdivision scheme
        #[arg(short, long, value_enum, default_value = "catmull-clark")]
        scheme: SchemeArg,

        /// Steps per batch; several values apply several batches in order
        #[arg(short, long, num_args = 1.., default_values_t = [1usize])]
        times: Vec<usize>,

        /// Refuse any batch that would push the total depth past this
        #[arg(long, default_value_t = RECOMMENDED_MAX_DEPTH)]
        max_depth: usize,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SchemeArg {
    /// Catmull-Clark subdivision (any polygon mesh)
    CatmullClark,
    /// Loop subdivision (triangle meshes only)
    Loop,
}

impl From<SchemeArg> for Scheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::CatmullClark => Scheme::CatmullClark,
            SchemeArg::Loop => Scheme::Loop,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }

        Commands::Subdivide {
            input,
            output,
            scheme,
            times,
            max_depth,
            sequential,
        } => {
            cmd_subdivide(&input, &output, scheme.into(), &times, max_depth, sequential)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let percent = if current >= total {
            100
        } else {
            (current * 100) / total
        };

        // Batches restart at 0; only redraw when the bar moves or finishes.
        let previous = max_percent.swap(percent, Ordering::Relaxed);
        if percent == previous && percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {} ({}/{})", bar, space, percent, message, current, total);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn mesh_type(mesh: &HalfEdgeMesh) -> &'static str {
    if mesh.is_triangle_mesh() {
        "Triangle mesh"
    } else if mesh.is_quad_mesh() {
        "Quad mesh"
    } else {
        "Mixed polygon mesh"
    }
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Edges: {}", mesh.num_edges());
    println!("Faces: {}", mesh.num_faces());
    println!("Half-edges: {}", mesh.num_halfedges());
    println!("Mesh type: {}", mesh_type(&mesh));

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    let boundary = BoundaryMap::classify(&mesh);
    if boundary.is_closed() {
        println!("Topology: Closed (no boundary)");
    } else {
        println!(
            "Topology: Open ({} boundary vertices, {} boundary edges)",
            boundary.num_boundary_vertices(),
            boundary.num_boundary_edges()
        );
    }
    println!("Euler characteristic: {}", mesh.euler_characteristic());

    let schemes = if mesh.is_triangle_mesh() {
        "catmull-clark, loop"
    } else {
        "catmull-clark"
    };
    println!("Available schemes: {}", schemes);

    Ok(())
}

fn cmd_subdivide(
    input: &Path,
    output: &Path,
    scheme: Scheme,
    batches: &[usize],
    max_depth: usize,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;
    println!("Loaded: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());

    let mut subdivider = Subdivider::new(mesh).with_parallel(!sequential);
    let mode = if sequential { "sequential" } else { "parallel" };
    let progress = create_progress();
    let start = Instant::now();

    for &times in batches {
        if subdivider.exceeds_depth(times, max_depth) {
            return Err(format!(
                "{} more steps would reach depth {}, above the limit of {}",
                times,
                subdivider.depth_after(times),
                max_depth
            )
            .into());
        }

        if scheme == Scheme::Loop && !subdivider.is_triangle_mesh() {
            return Err("Loop subdivision needs a triangle mesh; use --scheme catmull-clark".into());
        }

        println!("Applying {} subdivision ({} steps, {})...", scheme, times, mode);
        subdivider.apply_with_progress(scheme, times, &progress)?;
    }

    let elapsed = start.elapsed();
    let mesh = subdivider.current_mesh();
    println!(
        "Result: {} vertices, {} faces, depth {}",
        mesh.num_vertices(),
        mesh.num_faces(),
        subdivider.applied_depth()
    );

    io::save(mesh, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}
