//! Formats command implementation

use super::default_registry;
use crate::output::OutputWriter;
use crate::output_types::{DriverInfo, FormatsOutput};
use anyhow::Result;
use tabled::Tabled;

pub fn execute(output: &OutputWriter) -> Result<()> {
    let registry = default_registry();

    if output.is_json() {
        let drivers = registry
            .drivers()
            .iter()
            .map(|d| DriverInfo {
                name: d.driver_name().to_string(),
                export_formats: d.export_formats().iter().map(|f| f.to_string()).collect(),
                import_formats: d.import_formats().iter().map(|f| f.to_string()).collect(),
                description: d
                    .export_formats()
                    .first()
                    .and_then(|f| d.format_description(f))
                    .map(str::to_string),
            })
            .collect();
        output.result(FormatsOutput { drivers })?;
    } else {
        output.section("Registered Drivers");

        #[derive(Tabled)]
        struct FormatRow {
            #[tabled(rename = "Driver")]
            driver: String,
            #[tabled(rename = "Extension")]
            extension: String,
            #[tabled(rename = "Export")]
            export: String,
            #[tabled(rename = "Import")]
            import: String,
            #[tabled(rename = "Description")]
            description: String,
        }

        let mut rows = Vec::new();
        for driver in registry.drivers() {
            let mut extensions: Vec<&str> = driver.export_formats().to_vec();
            for f in driver.import_formats() {
                if !extensions.contains(f) {
                    extensions.push(f);
                }
            }

            for extension in extensions {
                rows.push(FormatRow {
                    driver: driver.driver_name().to_string(),
                    extension: format!(".{}", extension),
                    export: yes_no(driver.export_formats().contains(&extension)),
                    import: yes_no(driver.import_formats().contains(&extension)),
                    description: driver
                        .format_description(extension)
                        .unwrap_or_default()
                        .to_string(),
                });
            }
        }

        output.table(rows);
    }

    Ok(())
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "yes" } else { "no" };
    text.to_string()
}
