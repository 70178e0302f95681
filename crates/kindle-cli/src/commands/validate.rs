//! Implementation of the `kindle validate` command.
//!
//! Responsibility: turn the path arguments into documents, run the core
//! validation service over them and display the outcomes. No validation
//! rules live here.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use kindle_adapters::LocalSource;
use kindle_core::{
    application::{ApplicationError, ValidationService},
    error::KindleError,
};

use crate::{
    cli::{OutputFormat, ValidateArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `kindle validate` command.
///
/// 1. Build a [`LocalSource`] from the discovery settings (`--ext` wins)
/// 2. Discover documents under every path, failing fast on a missing one
/// 3. Validate every document, continuing past load failures
/// 4. Render the outcomes and fail if any document did not pass
#[instrument(skip_all, fields(paths = args.paths.len()))]
pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let source = build_source(&args, &config)?;
    debug!(extensions = ?source.extensions(), "Document source ready");

    let service = ValidationService::new(Box::new(source));

    let ids = service.discover(&args.paths).map_err(not_found_as_path)?;
    if ids.is_empty() {
        return Err(CliError::InvalidInput {
            message: format!(
                "no documents found under {}",
                display_paths(&args.paths)
            ),
            source: None,
        });
    }

    if output.format() == OutputFormat::Human {
        output.info(&format!("Validating {} document(s)", ids.len()))?;
    }

    let outcomes = service.validate_all(&ids);
    output.report(&outcomes, args.no_warnings)?;

    let failed = outcomes.iter().filter(|o| !o.passed()).count();
    info!(total = outcomes.len(), failed, "Validation finished");

    if failed > 0 {
        return Err(CliError::ValidationFailed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

fn build_source(args: &ValidateArgs, config: &AppConfig) -> CliResult<LocalSource> {
    let extensions = if args.extensions.is_empty() {
        &config.discovery.extensions
    } else {
        &args.extensions
    };

    let source = LocalSource::new()
        .with_extensions(extensions)
        .follow_links(config.discovery.follow_links);
    source.check()?;
    Ok(source)
}

/// A missing command-line path is reported as such, not as a document.
fn not_found_as_path(err: KindleError) -> CliError {
    match err {
        KindleError::Application(ApplicationError::DocumentNotFound { path }) => {
            CliError::PathNotFound { path }
        }
        other => CliError::Core(other),
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extensions: &[&str]) -> ValidateArgs {
        ValidateArgs {
            paths: vec![PathBuf::from(".")],
            no_warnings: false,
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn configured_extensions_are_used_by_default() {
        let mut config = AppConfig::default();
        config.discovery.extensions = vec!["ign".into()];
        let source = build_source(&args(&[]), &config).unwrap();
        assert_eq!(source.extensions(), ["ign"]);
    }

    #[test]
    fn ext_flag_overrides_config() {
        let source = build_source(&args(&["json"]), &AppConfig::default()).unwrap();
        assert_eq!(source.extensions(), ["json"]);
    }

    #[test]
    fn missing_root_becomes_path_not_found() {
        let err = not_found_as_path(
            ApplicationError::DocumentNotFound {
                path: "/nope".into(),
            }
            .into(),
        );
        assert!(matches!(err, CliError::PathNotFound { .. }));
        assert_eq!(err.exit_code(), 3);
    }
}
