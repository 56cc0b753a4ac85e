//! `fitdiff diff`, `run`, `validate` and `parse` commands.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use fitdiff_config::Settings;
use fitdiff_recon::{InputFormat, InventorySource, ReconConfig, ReconReport};

use crate::exit_codes::EXIT_DIFFS;
use crate::report::{render_inventory, render_table, render_views, summary_line};
use crate::{CliError, OutputArgs};

const STDIN: &str = "-";

/// Read a file, or stdin for `-`.
fn read_input(path: &str) -> Result<String, CliError> {
    if path == STDIN {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| CliError::io(format!("cannot read stdin: {e}")))?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(|e| CliError::io(format!("cannot read {path}: {e}")))
}

/// Flag, then settings default, then file extension.
fn resolve_format(
    side: &str,
    path: &str,
    flag: Option<String>,
    default: Option<&String>,
) -> Result<InputFormat, CliError> {
    if let Some(tag) = flag.as_ref().or(default) {
        return tag.parse::<InputFormat>().map_err(CliError::recon);
    }
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(InputFormat::from_extension)
        .ok_or_else(|| {
            CliError::args(format!("cannot infer {side} format from '{path}'"))
                .with_hint(format!("pass --{side}-format (contents, multibuy, eft)"))
        })
}

pub fn cmd_diff(
    settings: &Settings,
    subject: String,
    reference: String,
    subject_format: Option<String>,
    reference_format: Option<String>,
    output: OutputArgs,
) -> Result<(), CliError> {
    if subject == STDIN && reference == STDIN {
        return Err(CliError::args("stdin (-) can be used for only one side"));
    }

    let subject_fmt = resolve_format(
        "subject",
        &subject,
        subject_format,
        settings.defaults.subject_format.as_ref(),
    )?;
    let reference_fmt = resolve_format(
        "reference",
        &reference,
        reference_format,
        settings.defaults.reference_format.as_ref(),
    )?;

    let subject_text = read_input(&subject)?;
    let reference_text = read_input(&reference)?;

    let started = Instant::now();
    let report = fitdiff_recon::reconcile(
        InventorySource::new(&subject_text, subject_fmt),
        InventorySource::new(&reference_text, reference_fmt),
    )?;
    tracing::info!("reconciled in {} ms", started.elapsed().as_millis());

    emit_report(settings, &report, &output)
}

pub fn cmd_run(settings: &Settings, job: PathBuf, output: OutputArgs) -> Result<(), CliError> {
    let config = ReconConfig::from_path(&job)?;

    // Inventory paths are relative to the job file's directory
    let base_dir = job.parent().unwrap_or_else(|| Path::new("."));
    let input = config.load_input(base_dir)?;

    let started = Instant::now();
    let report = fitdiff_recon::run(&config, &input)?;
    tracing::info!("reconciled in {} ms", started.elapsed().as_millis());

    emit_report(settings, &report, &output)
}

pub fn cmd_validate(job: PathBuf) -> Result<(), CliError> {
    let config = ReconConfig::from_path(&job)?;
    let base_dir = job.parent().unwrap_or_else(|| Path::new("."));

    eprintln!(
        "valid: job '{}': subject {} ({}), reference {} ({})",
        config.name.as_deref().unwrap_or("unnamed"),
        config.subject.file,
        config.subject.format,
        config.reference.file,
        config.reference.format,
    );

    for source in [&config.subject, &config.reference] {
        let path = source.path(base_dir);
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "inventory file not found");
        }
    }
    Ok(())
}

pub fn cmd_parse(
    settings: &Settings,
    file: String,
    format: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let fmt = match format {
        Some(tag) => tag.parse::<InputFormat>().map_err(CliError::recon)?,
        None => resolve_format("input", &file, None, settings.defaults.subject_format.as_ref())
            .map_err(|e| e.with_hint("pass --format (contents, multibuy, eft)"))?,
    };

    let text = read_input(&file)?;
    let inventory = fitdiff_recon::load_inventory(InventorySource::new(&text, fmt))?;
    tracing::debug!(items = inventory.len(), units = inventory.total_units(), "parsed inventory");

    if json {
        let out = serde_json::to_string_pretty(&inventory)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        println!("{out}");
    } else {
        print!("{}", render_inventory(&inventory));
    }
    Ok(())
}

fn emit_report(
    settings: &Settings,
    report: &ReconReport,
    output: &OutputArgs,
) -> Result<(), CliError> {
    let rendered = if output.json || settings.output.json {
        let mut json = report.to_json_pretty()?;
        json.push('\n');
        json
    } else {
        let mut text = render_views(&report.views);
        if output.table || settings.output.table {
            text.push('\n');
            text.push_str(&render_table(&report.table));
        }
        text
    };

    match &output.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
            if !output.quiet {
                eprintln!("wrote {}", path.display());
            }
        }
        None => print!("{rendered}"),
    }

    if !output.quiet {
        eprintln!("{}", summary_line(&report.summary));
    }

    if output.strict && !report.summary.is_reconciled() {
        return Err(CliError::new(EXIT_DIFFS, ""));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_default_and_extension() {
        let default = "multibuy".to_string();
        let fmt = resolve_format("subject", "fit.eft", Some("contents".into()), Some(&default)).unwrap();
        assert_eq!(fmt, InputFormat::Contents);
    }

    #[test]
    fn default_wins_over_extension() {
        let default = "multibuy".to_string();
        let fmt = resolve_format("subject", "fit.eft", None, Some(&default)).unwrap();
        assert_eq!(fmt, InputFormat::Multibuy);
    }

    #[test]
    fn extension_inference() {
        assert_eq!(resolve_format("subject", "hangar.TSV", None, None).unwrap(), InputFormat::Contents);
        assert_eq!(resolve_format("reference", "dir/doctrine.eft", None, None).unwrap(), InputFormat::Eft);
    }

    #[test]
    fn uninferable_is_usage_error() {
        let err = resolve_format("reference", "doctrine.txt", None, None).unwrap_err();
        assert_eq!(err.code, crate::exit_codes::EXIT_USAGE);
        assert!(err.hint.unwrap().contains("--reference-format"));

        let err = resolve_format("subject", "-", None, None).unwrap_err();
        assert_eq!(err.code, crate::exit_codes::EXIT_USAGE);
    }

    #[test]
    fn bad_tag_is_unsupported() {
        let err = resolve_format("subject", "fit.txt", Some("pyfa".into()), None).unwrap_err();
        assert_eq!(err.code, crate::exit_codes::EXIT_UNSUPPORTED_FORMAT);
        assert!(err.message.contains("pyfa"));
    }
}
