//! Check command: translate without emitting JSON and report references
//! that no parameter or resource declares.

use stratiform::report::{format_report, report_unresolved};

use crate::util::{Input, Reported, use_color};

#[derive(clap::Args)]
pub struct Args {
    /// Path to the template to check (use - for stdin)
    pub file: String,
    /// Fail when any warning is reported
    #[arg(long)]
    pub deny_warnings: bool,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let input = Input::read(&args.file)?;
    let translation = input.translate()?;
    let unresolved = translation.unresolved_references();

    let reports: Vec<String> = unresolved
        .iter()
        .map(|reference| {
            format_report(
                &report_unresolved(reference),
                &input.source,
                input.display_path(),
                use_color(),
            )
        })
        .collect();

    if args.deny_warnings && !reports.is_empty() {
        return Err(Reported(reports.join("\n")).into());
    }
    for report in &reports {
        eprintln!("{report}");
    }

    let (parameters, resources) = (
        translation.document.parameters().map_or(0, |p| p.len()),
        translation.document.resources().map_or(0, |r| r.len()),
    );
    println!(
        "{}: {parameters} parameters, {resources} resources, {} warnings",
        input.display_path(),
        reports.len()
    );
    Ok(())
}
