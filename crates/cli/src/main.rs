use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use quiltmap_core::dataset::{load_papers_path, PaperStyle};
use quiltmap_core::naming::{path_string, PathStyle};
use quiltmap_core::scanner::{scan_path, FsStyle};
use quiltmap_core::treemap::{displayed, expand_all, layout, node_at};
use quiltmap_core::{Rect, Rgb, Tree};

/// Treemap reports for weighted trees
#[derive(Parser, Debug)]
#[command(name = "quiltmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lay out a directory tree sized by file bytes
    Scan {
        /// Root directory or file to scan
        root: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Lay out a citation dataset grouped by year and category
    Papers {
        /// CSV dataset file
        file: PathBuf,

        /// Root label for the tree
        #[arg(long, default_value = "papers")]
        name: String,

        /// Group by categories only, ignoring the year column
        #[arg(long)]
        flat: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Bounds width
    #[arg(long, default_value_t = 1024)]
    width: i64,

    /// Bounds height
    #[arg(long, default_value_t = 768)]
    height: i64,

    /// Emit the tile list as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Hit-test a point and print the matching tile's full path
    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    at: Option<(i64, i64)>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Scan { root, layout } => {
            let mut tree = scan_path(&root)?;
            report(&mut tree, &layout, &FsStyle)
        }
        Commands::Papers {
            file,
            name,
            flat,
            layout,
        } => {
            let mut tree = load_papers_path(&file, &name, !flat)?;
            report(&mut tree, &layout, &PaperStyle)
        }
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report(tree: &mut Tree, opts: &LayoutArgs, style: &impl PathStyle) -> Result<()> {
    let Some(root) = tree.root() else {
        anyhow::bail!("nothing to lay out");
    };
    expand_all(tree, root);
    layout(tree, root, Rect::new(0, 0, opts.width, opts.height));

    if let Some((x, y)) = opts.at {
        match node_at(tree, root, (x, y)) {
            Some(hit) => println!("{}", path_string(tree, hit, style)),
            None => println!("no tile at ({x}, {y})"),
        }
        return Ok(());
    }

    let shown = displayed(tree, root);
    debug!(tiles = shown.len(), total = tree.node(root).weight, "laid out");
    if opts.json {
        let tiles: Vec<_> = shown
            .iter()
            .map(|id| {
                let node = tree.node(*id);
                serde_json::json!({
                    "rect": node.rect,
                    "color": hex_color(node.color),
                    "path": path_string(tree, *id, style),
                })
            })
            .collect();
        let out = serde_json::json!({
            "bounds": { "w": opts.width, "h": opts.height },
            "total": tree.node(root).weight,
            "tiles": tiles,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for id in shown {
            let node = tree.node(id);
            let r = node.rect;
            println!(
                "{:>6} {:>6} {:>6} {:>6}  {}  {}",
                r.x,
                r.y,
                r.w,
                r.h,
                hex_color(node.color),
                path_string(tree, id, style)
            );
        }
    }
    Ok(())
}

fn hex_color(c: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", c.0, c.1, c.2)
}

fn parse_point(s: &str) -> Result<(i64, i64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| String::from("expected X,Y"))?;
    let x = x.trim().parse().map_err(|_| format!("bad X {x:?}"))?;
    let y = y.trim().parse().map_err(|_| format!("bad Y {y:?}"))?;
    Ok((x, y))
}
