//! Config command implementation

use crate::config_loader::load_config;
use crate::output::OutputWriter;
use crate::output_types::{ConfigOutput, ConfigValue};
use anyhow::Result;
use std::path::Path;
use tabled::Tabled;

pub fn execute(config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let config = load_config(config_path)?;

    if output.is_json() {
        output.result(ConfigOutput {
            format: ConfigValue {
                value: config.format.value.clone(),
                source: format!("{:?}", config.format.source),
            },
            input_format: ConfigValue {
                value: config.input_format.value.to_string(),
                source: format!("{:?}", config.input_format.source),
            },
            progress: ConfigValue {
                value: config.progress.value,
                source: format!("{:?}", config.progress.source),
            },
        })?;
    } else {
        output.section("Configuration Values");

        #[derive(Tabled)]
        struct ConfigRow {
            #[tabled(rename = "Key")]
            key: String,
            #[tabled(rename = "Value")]
            value: String,
            #[tabled(rename = "Source")]
            source: String,
        }

        let mut rows: Vec<ConfigRow> = config
            .to_inspection_map()
            .into_iter()
            .map(|(key, (value, source))| ConfigRow {
                key,
                value,
                source: format!("{:?}", source),
            })
            .collect();
        rows.sort_by(|a, b| a.key.cmp(&b.key));

        output.table(rows);
    }

    Ok(())
}
