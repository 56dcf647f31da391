//! `export` command handler.

use std::path::{Path, PathBuf};

use bizdir_store::{
    export_phone_csv, first_existing_input, load_records, DEFAULT_INPUT_CANDIDATES,
};

/// Exports records with a usable phone to CSV and prints a summary.
///
/// # Errors
///
/// Fails when no input file exists or reading/writing fails.
pub(crate) fn run_export(input: Option<&Path>, output: &Path) -> anyhow::Result<()> {
    let input: PathBuf = match input {
        Some(path) => path.to_path_buf(),
        None => first_existing_input(Path::new("."), &DEFAULT_INPUT_CANDIDATES)?,
    };
    println!("loading data from {}", input.display());

    let records = load_records(&input)?;
    let summary = export_phone_csv(&records, output)?;

    if summary.written == 0 {
        println!("no companies with phone numbers found in the data");
    }
    println!("created {}", output.display());
    println!("companies with phones: {}", summary.written);
    println!("out of {} total companies", summary.total);
    println!("success rate: {:.1}%", summary.success_rate_percent());
    Ok(())
}
