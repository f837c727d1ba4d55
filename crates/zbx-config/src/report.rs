//! Report generation configuration.

use serde::{Deserialize, Serialize};
use zbx_core::enums::{GroupBy, ReportLayout};

fn default_output_dir() -> String {
    ".".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Group spaces to audit: `host`, `template`, or `both`.
    #[serde(default)]
    pub group_by: GroupBy,

    /// File split: `per-kind` or `combined`.
    #[serde(default)]
    pub layout: ReportLayout,

    /// Directory the CSV reports are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            group_by: GroupBy::default(),
            layout: ReportLayout::default(),
            output_dir: default_output_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_reports() {
        let config = ReportConfig::default();
        assert_eq!(config.group_by, GroupBy::Host);
        assert_eq!(config.layout, ReportLayout::PerKind);
        assert_eq!(config.output_dir, ".");
    }
}
