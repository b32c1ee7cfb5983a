use clap::Args;
use eyre::Result;

use super::{UnwrapOrExit, sources::SourceArgs};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub sources: SourceArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifest = self.sources.manifest().unwrap_or_exit();
        let report = ops::check(&manifest)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
