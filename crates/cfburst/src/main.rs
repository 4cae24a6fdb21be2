use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cfburst_extract::{
    ExtractOptions, dump_diagnostics, extract, open_container, output_root_for, report,
};

use crate::app::App;

mod app;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let app = App::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for input in &app.inputs {
        process(input, &app, &mut out)
            .with_context(|| format!("processing '{}'", input.display()))?;
    }
    Ok(())
}

fn process(input: &Path, app: &App, out: &mut impl Write) -> anyhow::Result<()> {
    let mut source = open_container(input)?;

    if app.debug {
        writeln!(out, "DEBUGGING")?;
        dump_diagnostics(&source, out)?;
        return Ok(());
    }
    if app.meta {
        report(&mut source, out)?;
        return Ok(());
    }

    let dest = output_root_for(input);
    let options = ExtractOptions::default().thumbs(app.thumbs);
    let result = extract(&mut source, &dest, &options, out)?;
    info!(
        entries = result.entry_count,
        bytes = result.total_bytes,
        dest = %dest.display(),
        "extraction complete"
    );
    Ok(())
}
