//! Heuristic thresholds and processing options.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::FontStats;

/// All tunable constants of the outline pipeline.
///
/// Loadable from JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Pages examined for font statistics and headings
    pub max_pages: usize,

    /// Percentile for the `q75` threshold
    pub q75_percentile: f64,

    /// Percentile for the `q90` threshold
    pub q90_percentile: f64,

    /// Statistics used when a document has no extractable text
    pub default_stats: FontStats,

    /// Lines shorter than this (in characters) are discarded as noise
    pub min_line_chars: usize,

    /// Shortest accepted heading
    pub min_heading_chars: usize,

    /// Longest accepted heading
    pub max_heading_chars: usize,

    /// Period-terminated lines longer than this are treated as prose
    pub prose_min_chars: usize,

    /// Font size relative to the average that marks a heading
    pub avg_ratio_threshold: f32,

    /// Font ratio for H1
    pub h1_ratio: f32,

    /// Font ratio for H2
    pub h2_ratio: f32,

    /// Shortest all upper-case line accepted as a heading
    pub uppercase_min_chars: usize,

    /// Longest all upper-case line accepted as a heading
    pub uppercase_max_chars: usize,

    /// A single-page document with more headings than this is treated as
    /// over-segmented and gets an empty outline
    pub oversegment_limit: usize,

    /// Additional noise patterns (regular expressions)
    pub extra_noise_patterns: Vec<String>,

    /// Process documents of a batch in parallel
    pub parallel: bool,
}

impl OutlineConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Parse a configuration from JSON text.
    pub fn from_json(data: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(data).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        for (name, p) in [
            ("q75_percentile", self.q75_percentile),
            ("q90_percentile", self.q90_percentile),
        ] {
            if !(0.0..1.0).contains(&p) {
                return Err(Error::Config(format!("{} must be in [0, 1), got {}", name, p)));
            }
        }
        if self.q75_percentile > self.q90_percentile {
            return Err(Error::Config(
                "q75_percentile must not exceed q90_percentile".to_string(),
            ));
        }
        if self.h2_ratio > self.h1_ratio {
            return Err(Error::Config("h2_ratio must not exceed h1_ratio".to_string()));
        }
        if self.min_heading_chars > self.max_heading_chars {
            return Err(Error::Config(
                "min_heading_chars must not exceed max_heading_chars".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the page scan cap.
    pub fn with_max_pages(mut self, pages: usize) -> Self {
        self.max_pages = pages;
        self
    }

    /// Set the over-segmentation limit.
    pub fn with_oversegment_limit(mut self, limit: usize) -> Self {
        self.oversegment_limit = limit;
        self
    }

    /// Set the level ratios.
    pub fn with_level_ratios(mut self, h1: f32, h2: f32) -> Self {
        self.h1_ratio = h1;
        self.h2_ratio = h2;
        self
    }

    /// Add a noise pattern.
    pub fn with_noise_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.extra_noise_patterns.push(pattern.into());
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            max_pages: 50,
            q75_percentile: 0.75,
            q90_percentile: 0.90,
            default_stats: FontStats::DEFAULT,
            min_line_chars: 3,
            min_heading_chars: 3,
            max_heading_chars: 200,
            prose_min_chars: 20,
            avg_ratio_threshold: 1.2,
            h1_ratio: 1.5,
            h2_ratio: 1.3,
            uppercase_min_chars: 5,
            uppercase_max_chars: 50,
            oversegment_limit: 15,
            extra_noise_patterns: Vec::new(),
            parallel: true,
        }
    }
}
