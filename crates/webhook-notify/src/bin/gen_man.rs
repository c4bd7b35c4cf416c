//! Render roff man pages for `webhook-notify` and each of its subcommands.
//!
//! Usage: `gen-man [OUT_DIR]` (defaults to the current directory).

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_mangen::Man;
use webhook_notify::cli::Cli;

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Creating {}", out_dir.display()))?;

    for path in write_pages(&out_dir)? {
        eprintln!("Generated man page at {}", path.display());
    }
    Ok(())
}

/// Write `webhook-notify.1` plus one `webhook-notify-<sub>.1` per subcommand.
fn write_pages(out_dir: &Path) -> Result<Vec<PathBuf>> {
    let root = Cli::command();
    let root_name = root.get_name().to_string();

    let mut pages = vec![(root_name.clone(), root.clone())];
    for sub in root.get_subcommands().filter(|s| s.get_name() != "help") {
        let name = format!("{root_name}-{}", sub.get_name());
        pages.push((name.clone(), sub.clone().name(name)));
    }

    let mut written = Vec::with_capacity(pages.len());
    for (name, cmd) in pages {
        let path = out_dir.join(format!("{name}.1"));
        let mut buf = Vec::new();
        Man::new(cmd)
            .render(&mut buf)
            .with_context(|| format!("Rendering man page for {name}"))?;
        File::create(&path)
            .and_then(|mut file| file.write_all(&buf))
            .with_context(|| format!("Writing {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
