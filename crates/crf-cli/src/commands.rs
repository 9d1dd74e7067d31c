use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use crf_core::naming::initial_values;
use crf_core::state::FormValues;
use crf_core::submit::build_payload;
use crf_model::{FormSchema, validate_schema};

use crf_cli::logging::redact_value;

use crate::cli::{PayloadArgs, SchemaArgs};
use crate::summary::{print_schema_report, print_schema_table};

/// Load a schema document; failure here is a whole-form error, so the
/// caller reports it and exits instead of rendering partial content.
fn load_schema(path: &Path) -> Result<FormSchema> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read schema file {}", path.display()))?;
    let schema = FormSchema::from_json(&raw)
        .with_context(|| format!("parse schema file {}", path.display()))?;
    Ok(schema)
}

pub fn run_inspect(args: &SchemaArgs) -> Result<()> {
    let schema = load_schema(&args.schema)?;
    let version = schema.active_version().context("select active version")?;
    let span = info_span!("inspect", version = %version.version);
    let _guard = span.enter();
    print_schema_table(version);
    let report = validate_schema(&schema);
    if !report.issues.is_empty() {
        println!();
        print_schema_report(&report);
    }
    Ok(())
}

/// Returns whether the schema passed without errors.
pub fn run_validate(args: &SchemaArgs) -> Result<bool> {
    let schema = load_schema(&args.schema)?;
    let report = validate_schema(&schema);
    print_schema_report(&report);
    Ok(!report.has_errors())
}

pub fn run_defaults(args: &SchemaArgs) -> Result<()> {
    let schema = load_schema(&args.schema)?;
    let version = schema.active_version().context("select active version")?;
    let values = initial_values(version);
    info!(fields = values.len(), "derived default form values");
    let json = serde_json::to_string_pretty(&values).context("serialize defaults")?;
    println!("{json}");
    Ok(())
}

pub fn run_payload(args: &PayloadArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.values)
        .with_context(|| format!("read values file {}", args.values.display()))?;
    let values: FormValues = serde_json::from_str(&raw)
        .with_context(|| format!("parse values file {}", args.values.display()))?;
    for (key, value) in &values {
        debug!(%key, value = redact_value(&value.as_display_string()), "loaded form value");
    }

    let payload = build_payload(&values);
    info!(
        input_fields = values.len(),
        payload_fields = payload.len(),
        "built submission payload"
    );
    let json = serde_json::to_string_pretty(&payload).context("serialize payload")?;
    match &args.output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("write payload to {}", path.display()))?;
            println!("Payload written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
