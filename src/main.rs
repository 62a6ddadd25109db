use std::{fs, io::Write, path::Path, process};

use anyhow::Context;
use owo_colors::{OwoColorize, Stream};

use crate::{
    cli::{Cli, Output},
    reference::LiteratureRef,
};

mod cli;
mod entry;
mod error;
mod latex;
mod reference;
mod render;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse_checked();
    init_logging(args.verbose);

    let src = fs::read_to_string(&args.bib_file)
        .with_context(|| format!("failed to read {}", args.bib_file.display()))?;
    let entries = entry::parse_bibliography(&src)?;

    // Normalise everything before writing anything: one bad entry aborts the run.
    let refs = entries
        .iter()
        .map(LiteratureRef::from_entry)
        .collect::<Result<Vec<_>, _>>()?;
    let total = refs.len();
    let refs = reference::sort_and_dedup(refs);
    let dropped = total - refs.len();
    log::info!("{} references after dropping {dropped} duplicates", refs.len());

    let title = render::title_from_path(&args.bib_file);
    let doc = args.format.render(&refs, &title);

    match &args.output_file {
        Output::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(doc.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write to stdout")?;
        }
        Output::File(path) => {
            fs::write(path, &doc).with_context(|| format!("failed to write {}", path.display()))?;
            if args.open {
                open_in_viewer(path)?;
            }
        }
    }

    eprintln!(
        "{} {} references ({dropped} duplicates dropped) → {}",
        "✓".if_supports_color(Stream::Stderr, |t| t.green()),
        refs.len(),
        args.output_file
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Hand the written file to the platform's default viewer.
fn open_in_viewer(path: &Path) -> anyhow::Result<()> {
    let mut cmd = if cfg!(target_os = "macos") {
        process::Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut cmd = process::Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else {
        process::Command::new("xdg-open")
    };
    let status = cmd
        .arg(path)
        .status()
        .with_context(|| format!("failed to open {}", path.display()))?;
    if !status.success() {
        log::warn!("viewer exited with {status} for {}", path.display());
    }
    Ok(())
}
