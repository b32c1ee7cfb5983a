use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{UnwrapOrExit, sources::SourceArgs};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output directory; replaces [output].directory
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print generated code instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let mut manifest = self.sources.manifest().unwrap_or_exit();
        if let Some(out) = &self.out {
            manifest.output.directory = out.clone();
        }

        let report = ops::generate(&manifest, self.dry_run)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
