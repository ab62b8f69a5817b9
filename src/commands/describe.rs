use std::path::Path;

use greet_action::error::Result;
use greet_action::metadata::ActionMetadata;
use greet_action::output::{self, Column};
use serde_json::json;

const INPUT_COLUMNS: &[Column] = &[
    Column::new("Input", "name"),
    Column::new("Description", "description"),
    Column::new("Required", "required"),
    Column::new("Default", "default"),
    Column::wide("Deprecated", "deprecation_message"),
];

const OUTPUT_COLUMNS: &[Column] = &[
    Column::new("Output", "name"),
    Column::new("Description", "description"),
];

pub fn run(metadata_path: &Path, output_format: &str) -> Result<()> {
    let meta = ActionMetadata::load(metadata_path)?;

    if output_format == "json" || output_format == "yaml" {
        let value = json!({
            "name": meta.name,
            "description": meta.description,
            "inputs": meta.inputs_value(),
            "outputs": meta.outputs_value(),
        });
        output::render(&value, &[], output_format);
        return Ok(());
    }

    output::print_heading(&meta.name);
    if !meta.description.is_empty() {
        println!("{}", meta.description);
    }
    output::render(&meta.inputs_value(), INPUT_COLUMNS, output_format);
    output::render(&meta.outputs_value(), OUTPUT_COLUMNS, output_format);
    Ok(())
}
