//! Stroke index builder.
//!
//! Reads a JSON table of per-character line segments, converts every glyph
//! into stroke records and writes the resulting octree as a JSON document.
//!
//! Segment table format: `{ "A": [[x1, y1, x2, y2], ...], ... }`

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use stroke_octree::{IndexBuilder, SegmentTable, StrokeOctree};
use tracing_subscriber::EnvFilter;

use config::Config;

/// Stroke octree index builder.
#[derive(Parser, Debug)]
#[command(name = "stroke-indexer")]
#[command(about = "Builds a stroke octree index from glyph segment tables")]
struct Args {
	/// Path to configuration TOML file.
	#[arg(short, long)]
	config: PathBuf,

	/// Segment table (overrides the config's `segments`).
	#[arg(short, long)]
	segments: Option<PathBuf>,

	/// Output document (overrides the config's `output`).
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Extract characters on the calling thread only.
	#[arg(long)]
	sequential: bool,

	/// Reload the written document and compare it with the built tree.
	#[arg(long)]
	verify: bool,
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();

	// Paths in the config are relative to the config file
	let base_dir = args
		.config
		.parent()
		.unwrap_or(Path::new("."))
		.to_path_buf();

	println!("Loading config from: {}", args.config.display());
	let config = Config::load(&args.config)?;

	let segments_path = args
		.segments
		.unwrap_or_else(|| Config::resolve(&base_dir, &config.segments));
	let output_path = args
		.output
		.unwrap_or_else(|| Config::resolve(&base_dir, &config.output));

	let table = load_table(&segments_path, &config)?;
	let charset = config
		.charset()
		.unwrap_or_else(|| table.labels().collect());

	println!(
		"Indexing {} characters ({} glyphs in table) at size {}, capacity {}",
		charset.len(),
		table.len(),
		config.index.size,
		config.index.capacity
	);

	let mut builder = IndexBuilder::new(config.index_config()).context("Creating index builder")?;
	let built = if config.parallel && !args.sequential {
		builder.par_extend_from(&table, &charset)
	} else {
		builder.extend_from(&table, charset.iter().copied())
	};
	built.context("Building index")?;
	let (tree, build_stats) = builder.finish();

	write_index(&tree, &output_path, config.pretty)?;
	println!("  ✓ {}", output_path.display());

	if args.verify {
		verify_index(&tree, &output_path)?;
		println!("  ✓ reload matches");
	}

	let stats = tree.stats();
	println!(
		"\nDone! {} records from {} characters ({} skipped) in {:.2}ms",
		build_stats.records_inserted,
		build_stats.characters_indexed(),
		build_stats.characters_skipped,
		build_stats.build_time_us as f64 / 1000.0
	);
	println!(
		"  {} nodes ({} leaves, {} empty), depth {}, mean occupancy {:.2}",
		stats.node_count(),
		stats.leaf_count,
		stats.empty_leaf_count,
		stats.max_depth,
		stats.mean_occupancy()
	);

	Ok(())
}

/// Read the segment table and apply the config's stroke budget.
fn load_table(path: &Path, config: &Config) -> Result<SegmentTable> {
	let file = File::open(path)
		.with_context(|| format!("Failed to open segment table: {}", path.display()))?;
	let table = SegmentTable::from_json_reader(BufReader::new(file), config.index.size)
		.with_context(|| format!("Failed to parse segment table: {}", path.display()))?;
	Ok(table.with_budget(config.index.stroke_budget))
}

fn write_index(tree: &StrokeOctree, path: &Path, pretty: bool) -> Result<()> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent)
			.with_context(|| format!("Failed to create output dir: {}", parent.display()))?;
	}
	let file = File::create(path)
		.with_context(|| format!("Failed to create output: {}", path.display()))?;
	let mut writer = BufWriter::new(file);
	tree
		.write_json(&mut writer, pretty)
		.with_context(|| format!("Failed to write index: {}", path.display()))?;
	writer.flush().context("Flushing index output")?;
	Ok(())
}

fn verify_index(tree: &StrokeOctree, path: &Path) -> Result<()> {
	let file = File::open(path)
		.with_context(|| format!("Failed to reopen index: {}", path.display()))?;
	let reloaded = StrokeOctree::read_json(BufReader::new(file))
		.with_context(|| format!("Failed to reload index: {}", path.display()))?;
	if reloaded != *tree {
		anyhow::bail!("Reloaded index differs from the built tree");
	}
	Ok(())
}
