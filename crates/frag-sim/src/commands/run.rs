use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use frag_ana::{run_pipeline, RecordExporter, RowContext, RunManifest};
use frag_core::EventSource;
use frag_gen::ToyStringSource;
use tracing::info;

use crate::ConfigArgs;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Output CSV path; overrides the configured one.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Skip the manifest (`<out>` with its extension replaced by `.manifest.json`).
    #[arg(long)]
    pub no_manifest: bool,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let mut config = args.config.resolve()?;
    if let Some(out) = &args.out {
        config.output.path = out.clone();
    }

    let mut source = ToyStringSource::new(config.generator.clone())?;
    let context = RowContext {
        string_energy: config.string_energy(),
        direction_threshold: config.resolver.direction_threshold,
    };
    let mut exporter =
        RecordExporter::create(&config.output.path, config.output.format.clone(), context)?;
    let summary = run_pipeline(&mut source, &config, &mut exporter, |_, _, _| {})?;
    exporter.finish()?;

    println!("{}", summary.statistics);
    println!(
        "{} rows from {} of {} events written to {}",
        summary.rows_written,
        summary.events_generated,
        summary.events_requested,
        config.output.path.display()
    );

    if !args.no_manifest {
        let manifest = RunManifest::from_run(&config, source.name(), &summary)?;
        let path = RunManifest::path_for(&config.output.path);
        manifest.write(&path)?;
        info!(path = %path.display(), hash = %manifest.provenance.input_hash, "manifest written");
    }
    Ok(())
}
