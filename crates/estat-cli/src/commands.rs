use std::path::PathBuf;

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use estat_cli::catalog::resolve_catalog;
use estat_cli::output::{OutputFormat, write_output};
use estat_ingest::DataSource;
use estat_model::DatasetProfile;
use estat_transform::{PipelineError, PipelineStats, attach_iso3, run_pipeline};

use crate::cli::{OutputFormatArg, ProfilesArgs, RunArgs};
use crate::summary::print_profiles;

/// Outcome of `estat run`.
pub struct RunResult {
    pub profile: DatasetProfile,
    pub source: String,
    pub stats: PipelineStats,
    /// Rows removed by ISO alpha-3 enrichment, when requested.
    pub iso3_removed: Option<usize>,
    pub frame: DataFrame,
    pub output: Option<PathBuf>,
}

pub fn run_profiles(args: &ProfilesArgs) -> Result<()> {
    let catalog = resolve_catalog(args.catalog.as_deref())?;
    print_profiles(catalog.profiles());
    Ok(())
}

pub fn run_profile(args: &RunArgs) -> Result<RunResult> {
    let catalog = resolve_catalog(args.catalog.as_deref())?;
    let profile = catalog.get(&args.profile)?.clone();
    let source = DataSource::parse(&args.source);

    let span = info_span!("run", profile = %profile.name);
    let _guard = span.enter();

    let output = run_pipeline(&source, &profile)?;
    let (frame, iso3_removed) = if args.iso3 {
        let enriched = attach_iso3(&output.frame).map_err(PipelineError::from)?;
        let removed = output.frame.height() - enriched.height();
        (enriched, Some(removed))
    } else {
        (output.frame, None)
    };

    if let Some(path) = &args.output {
        write_output(&frame, &profile, path, output_format(args.format))?;
        info!(path = %path.display(), rows = frame.height(), "wrote output");
    }

    Ok(RunResult {
        profile,
        source: source.origin(),
        stats: output.stats,
        iso3_removed,
        frame,
        output: args.output.clone(),
    })
}

fn output_format(format: OutputFormatArg) -> OutputFormat {
    match format {
        OutputFormatArg::Csv => OutputFormat::Csv,
        OutputFormatArg::Json => OutputFormat::JsonLines,
    }
}
