//! CLI logic for the Flujo compiler.
//!
//! This module contains the core CLI logic for the Flujo compiler.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use flujo::{FlowCompiler, FlujoError};

use error_adapter::DiagnosticAdapter;

/// Run the Flujo CLI application
///
/// This function compiles the input file and writes the resulting JSON
/// document to the output file. Lint warnings are rendered to the log
/// whether or not compilation succeeds.
///
/// # Errors
///
/// Returns `FlujoError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Compilation errors
/// - Serialization errors
pub fn run(args: &Args) -> Result<(), FlujoError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Compiling flow"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Compile using the FlowCompiler API
    let compiler = FlowCompiler::new(app_config);
    let outcome = compiler.compile(&source);

    report_warnings(&outcome.warnings, &source);

    if let Some(error) = outcome.error {
        return Err(FlujoError::new_parse_error(error, source));
    }

    if args.check {
        info!(input_path = args.input; "Flow compiles cleanly");
        return Ok(());
    }

    if let Some(document) = &outcome.document {
        let json = compiler.to_json(document)?;
        fs::write(&args.output, json)?;
        info!(output_file = args.output; "Document written successfully");
    }

    Ok(())
}

/// Render lint warnings through miette, each one independently.
fn report_warnings(warnings: &[flujo::Diagnostic], source: &str) {
    if warnings.is_empty() {
        return;
    }

    let reporter = miette::GraphicalReportHandler::new();
    for warning in warnings {
        let adapter = DiagnosticAdapter::new(warning, source);
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &adapter)
            .expect("Writing to String buffer is infallible");

        warn!("{writer}");
    }
}
