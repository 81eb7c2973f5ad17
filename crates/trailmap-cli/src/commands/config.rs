//! Config command implementation

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;
use trailmap_core::config::LayeredConfig;

use crate::output::OutputWriter;

#[derive(Debug, Serialize, Tabled)]
struct ConfigRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    source: String,
}

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow { key, value, source: format!("{:?}", source) })
        .collect();

    // Sort by key for consistent output
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    output.section("Configuration Values");
    output.table(rows)?;

    output.section("Configuration Precedence");
    output.info("CLI arguments > Environment variables > Config file > Defaults");
    Ok(())
}
