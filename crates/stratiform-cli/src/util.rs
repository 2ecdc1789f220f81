use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::Context;
use stratiform::Translation;
use stratiform::report::format_error;
use stratiform::syntax::{Template, parse};

/// An error whose annotated report has already been rendered.
#[derive(Debug)]
pub struct Reported(pub String);

impl std::fmt::Display for Reported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.trim_end())
    }
}

impl std::error::Error for Reported {}

/// An input file given on the command line, `-` meaning stdin.
pub struct Input {
    pub path: String,
    pub source: String,
}

impl Input {
    pub fn read(path: &str) -> anyhow::Result<Self> {
        let source = if path == "-" {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read from stdin")?;
            buffer
        } else {
            stratiform::read_source(Path::new(path))
                .map_err(|err| Reported(format_error(&err, "", path, use_color())))?
        };
        Ok(Self {
            path: path.to_string(),
            source,
        })
    }

    /// Name shown in reports.
    pub fn display_path(&self) -> &str {
        if self.path == "-" { "<stdin>" } else { &self.path }
    }

    /// Parse only, rendering any error as an annotated report.
    pub fn parse(&self) -> anyhow::Result<Template> {
        parse(&self.source).map_err(|err| self.report(err.into()))
    }

    /// Parse and translate, rendering any error as an annotated report.
    pub fn translate(&self) -> anyhow::Result<Translation> {
        stratiform::translate_source(&self.source).map_err(|err| self.report(err))
    }

    fn report(&self, err: stratiform::Error) -> anyhow::Error {
        let rendered = format_error(&err, &self.source, self.display_path(), use_color());
        Reported(rendered).into()
    }
}

pub fn use_color() -> bool {
    io::stderr().is_terminal()
}
