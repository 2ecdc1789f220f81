use std::io::{self, Write};

use anyhow::Context;
use stratiform::cfn::{Config, to_writer};

use crate::util::Input;

#[derive(clap::Args)]
pub struct Args {
    /// Path to the template to translate (use - for stdin)
    pub file: String,
    /// Emit single-line JSON
    #[arg(long, conflicts_with = "indent")]
    pub compact: bool,
    /// Spaces per indentation level
    #[arg(long, default_value_t = 2)]
    pub indent: usize,
}

impl Args {
    fn config(&self) -> Config {
        if self.compact {
            Config::compact()
        } else {
            Config::pretty(self.indent)
        }
    }
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let input = Input::read(&args.file)?;
    let translation = input.translate()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    to_writer(&mut out, &translation.document, &args.config())
        .context("failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}
