//! Configuration parsing for stroke index builds.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use stroke_octree::{IndexConfig, DEFAULT_CAPACITY, DEFAULT_SIZE, DEFAULT_STROKE_BUDGET};

/// Root configuration for one index build.
#[derive(Debug, Deserialize)]
pub struct Config {
	/// JSON segment table, relative to the config file.
	pub segments: String,
	/// Output index document, relative to the config file.
	pub output: String,
	/// Characters to index, in order. Defaults to every glyph in the table.
	#[serde(default)]
	pub charset: Option<String>,
	/// Extract characters on the rayon pool.
	#[serde(default = "default_parallel")]
	pub parallel: bool,
	/// Indent the output JSON.
	#[serde(default)]
	pub pretty: bool,
	/// Octree parameters.
	#[serde(default)]
	pub index: IndexSection,
}

/// `[index]` table.
#[derive(Debug, Deserialize)]
pub struct IndexSection {
	/// Edge length of the indexed cube (power of two).
	#[serde(default = "default_size")]
	pub size: u32,
	/// Records a leaf holds before it splits.
	#[serde(default = "default_capacity")]
	pub capacity: usize,
	/// Weight budget shared across a glyph's strokes.
	#[serde(default = "default_stroke_budget")]
	pub stroke_budget: u32,
}

impl Default for IndexSection {
	fn default() -> Self {
		Self {
			size: DEFAULT_SIZE,
			capacity: DEFAULT_CAPACITY,
			stroke_budget: DEFAULT_STROKE_BUDGET,
		}
	}
}

fn default_parallel() -> bool {
	true
}

fn default_size() -> u32 {
	DEFAULT_SIZE
}

fn default_capacity() -> usize {
	DEFAULT_CAPACITY
}

fn default_stroke_budget() -> u32 {
	DEFAULT_STROKE_BUDGET
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content)
	}

	/// Parse and validate configuration TOML.
	pub fn parse(content: &str) -> Result<Self> {
		let config: Config =
			toml::from_str(content).with_context(|| "Failed to parse config TOML")?;

		if config.segments.is_empty() {
			anyhow::bail!("segments path must not be empty");
		}
		if config.output.is_empty() {
			anyhow::bail!("output path must not be empty");
		}
		if config.charset.as_deref() == Some("") {
			anyhow::bail!("charset must not be empty when given");
		}
		config
			.index_config()
			.validate()
			.context("Invalid [index] section")?;

		Ok(config)
	}

	/// Octree config described by the `[index]` table.
	pub fn index_config(&self) -> IndexConfig {
		IndexConfig::new(self.index.size, self.index.capacity)
	}

	/// Charset to index, if the config pins one.
	pub fn charset(&self) -> Option<Vec<char>> {
		self.charset.as_ref().map(|s| s.chars().collect())
	}

	/// Resolve a config-relative path against `base_dir`.
	pub fn resolve(base_dir: &Path, relative: &str) -> PathBuf {
		base_dir.join(relative)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_minimal_config_uses_defaults() {
		let config = Config::parse(
			r#"
segments = "glyphs.json"
output = "index.json"
"#,
		)
		.unwrap();

		assert_eq!(config.index_config(), IndexConfig::default());
		assert_eq!(config.index.stroke_budget, DEFAULT_STROKE_BUDGET);
		assert!(config.parallel);
		assert!(!config.pretty);
		assert!(config.charset().is_none());
	}

	#[test]
	fn test_full_config() {
		let config = Config::parse(
			r#"
segments = "glyphs.json"
output = "out/index.json"
charset = "ABC"
parallel = false
pretty = true

[index]
size = 256
capacity = 4
stroke_budget = 20
"#,
		)
		.unwrap();

		assert_eq!(config.index_config(), IndexConfig::new(256, 4));
		assert_eq!(config.index.stroke_budget, 20);
		assert_eq!(config.charset(), Some(vec!['A', 'B', 'C']));
		assert!(!config.parallel);
		assert!(config.pretty);
	}

	#[test]
	fn test_rejects_bad_size() {
		let err = Config::parse(
			r#"
segments = "glyphs.json"
output = "index.json"

[index]
size = 500
"#,
		)
		.unwrap_err();
		assert!(err.to_string().contains("[index]"));
	}

	#[test]
	fn test_rejects_zero_capacity() {
		assert!(Config::parse(
			r#"
segments = "glyphs.json"
output = "index.json"

[index]
capacity = 0
"#,
		)
		.is_err());
	}

	#[test]
	fn test_rejects_empty_charset() {
		assert!(Config::parse(
			r#"
segments = "glyphs.json"
output = "index.json"
charset = ""
"#,
		)
		.is_err());
	}

	#[test]
	fn test_missing_segments_is_parse_error() {
		assert!(Config::parse(r#"output = "index.json""#).is_err());
	}

	#[test]
	fn test_resolve_is_relative_to_base() {
		let path = Config::resolve(Path::new("fonts/mono"), "glyphs.json");
		assert_eq!(path, Path::new("fonts/mono/glyphs.json"));
	}
}
