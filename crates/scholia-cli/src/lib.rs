//! CLI logic for the Scholia annotation tools.
//!
//! This module contains the core CLI logic for the Scholia annotation
//! toolkit: extracting relation records from annotation files, rendering
//! element graphs as DOT, checking scheme documents, and validating and
//! summarising record sets.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::fs;

use log::{debug, info};
use miette::GraphicalReportHandler;

use scholia::{
    AnnotationBuilder, ScholiaError,
    config::{AppConfig, GraphConfig},
    export,
    record::validate_records,
    summary::RecordSummary,
};
use scholia_parser::{SchemeDoc, check_corpus};

use crate::error_adapter::DiagnosticAdapter;

/// Outcome of a command that ran to completion.
///
/// The inspection commands (`check`, `validate`) can complete normally and
/// still report findings; the outcome tells the binary which exit code to
/// use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The command completed without findings.
    Clean,
    /// The command completed but reported findings.
    FindingsReported,
}

/// Run the Scholia CLI application
///
/// This function dispatches the selected subcommand, with behavior drawn
/// from the loaded configuration.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ScholiaError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Annotation and scheme document parsing errors
/// - Record set errors
pub fn run(args: &Args) -> Result<RunOutcome, ScholiaError> {
    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Extract {
            annotations,
            output,
        } => extract(&app_config, annotations, output),
        Command::Graph {
            input,
            output,
            arrowheads,
            no_edges,
        } => graph(&app_config, input, output, *arrowheads, *no_edges),
        Command::Check { documents } => check(documents),
        Command::Validate { records } => validate(records),
        Command::Stats { records } => stats(records),
    }
}

/// Flatten a directory of annotation files into a record set on disk.
fn extract(
    config: &AppConfig,
    annotations: &str,
    output: &str,
) -> Result<RunOutcome, ScholiaError> {
    info!(
        annotations = annotations,
        output = output;
        "Extracting relation records"
    );

    let builder = AnnotationBuilder::new(config.clone());
    let records = builder.extract(annotations)?;
    export::write_records(output, &records)?;

    info!(records = records.len(), output = output; "Record set exported successfully");

    Ok(RunOutcome::Clean)
}

/// Render the element graph of one annotation file as DOT.
fn graph(
    config: &AppConfig,
    input: &str,
    output: &str,
    arrowheads: bool,
    no_edges: bool,
) -> Result<RunOutcome, ScholiaError> {
    info!(input = input, output = output; "Rendering element graph");

    // Flags widen or narrow whatever the configuration file selected.
    let graph_config = GraphConfig::new(
        config.graph().include_arrowheads() || arrowheads,
        config.graph().include_edges() && !no_edges,
    );
    let builder = AnnotationBuilder::new(AppConfig::new(graph_config, config.extract().clone()));

    let annotation = builder.load(input)?;
    let elements = builder.element_graph(&annotation);
    fs::write(output, export::element_dot(&elements))?;

    info!(output = output; "DOT exported successfully");

    Ok(RunOutcome::Clean)
}

/// Check scheme documents against the coded taxonomy and each other.
fn check(documents: &[String]) -> Result<RunOutcome, ScholiaError> {
    info!(documents = documents.len(); "Checking scheme documents");

    let mut sources = Vec::with_capacity(documents.len());
    for path in documents {
        sources.push(fs::read_to_string(path)?);
    }

    let mut docs = Vec::with_capacity(documents.len());
    for (path, source) in documents.iter().zip(&sources) {
        let doc = SchemeDoc::parse(source)
            .map_err(|err| ScholiaError::new_scheme_error(err, source.clone()))?;
        debug!(path = path.as_str(); "Scheme document scanned");
        docs.push(doc);
    }

    let named: Vec<(&str, &SchemeDoc)> = documents.iter().map(String::as_str).zip(&docs).collect();
    let report = check_corpus(&named);

    let reporter = GraphicalReportHandler::new();
    for item in report.items() {
        let adapter = DiagnosticAdapter::new(item.diagnostic(), &sources[item.doc_index()]);
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &adapter)
            .expect("Writing to String buffer is infallible");

        eprintln!("{writer}");
    }

    println!(
        "{} documents checked: {} errors, {} warnings",
        documents.len(),
        report.error_count(),
        report.warning_count()
    );

    if report.has_errors() {
        Ok(RunOutcome::FindingsReported)
    } else {
        Ok(RunOutcome::Clean)
    }
}

/// Validate the judgements of a record set.
fn validate(records_path: &str) -> Result<RunOutcome, ScholiaError> {
    info!(records = records_path; "Validating relation records");

    let records = export::read_records(records_path)?;
    let violations = validate_records(&records);

    for violation in &violations {
        println!("{violation}");
    }

    let judged = records.iter().filter(|record| record.is_judged()).count();
    println!(
        "{} records checked ({} judged): {} violations",
        records.len(),
        judged,
        violations.len()
    );

    if violations.is_empty() {
        Ok(RunOutcome::Clean)
    } else {
        Ok(RunOutcome::FindingsReported)
    }
}

/// Print summary statistics over a record set.
fn stats(records_path: &str) -> Result<RunOutcome, ScholiaError> {
    info!(records = records_path; "Summarising relation records");

    let records = export::read_records(records_path)?;
    print!("{}", RecordSummary::of(&records));

    Ok(RunOutcome::Clean)
}
