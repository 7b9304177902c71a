use app::{load_submitter_config, process_submission, summarize, write_document};
use clearinghouse::{Edi837Encoder, SubmitterConfig};
use intake::{parse_line, read_file, Config};
use log::{error, info};
use std::env;
use std::fs;
use std::path::Path;

fn main() -> Result<(), String> {
    env_logger::init();

    let config = Config::build(env::args()).map_err(|e| e.to_string())?;

    let submitter = match &config.submitter_config_path {
        Some(path) => load_submitter_config(path).map_err(|e| format!("Submitter config {}: {}", path, e))?,
        None => SubmitterConfig::default(),
    };
    let encoder = Edi837Encoder::new(submitter);

    let output_dir = Path::new(&config.output_dir);
    fs::create_dir_all(output_dir).map_err(|e| format!("Cannot create {}: {}", config.output_dir, e))?;

    info!("Reading claim submissions from {}", config.claims_path);
    let lines = read_file(&config).map_err(|e| e.to_string())?;

    let mut outcomes = Vec::new();
    for (i, line) in lines.enumerate() {
        let submission = match line.and_then(|line| parse_line(&line)) {
            Ok(submission) => submission,
            Err(e) => {
                error!("Skipping submission {}: {}", i + 1, e);
                continue;
            }
        };

        let mut outcome = process_submission(&submission, &encoder);
        if let Some(path) = write_document(output_dir, &mut outcome) {
            info!("Wrote {}", path.display());
        }
        outcomes.push(outcome);
    }

    let summary = summarize(&outcomes);
    println!(
        "Processed {} claims: {} accepted, {} rejected, {} billed",
        outcomes.len(),
        summary.accepted,
        summary.rejected,
        summary.total_billed
    );
    for (message, count) in &summary.error_counts {
        println!("  {} x {}", count, message);
    }
    Ok(())
}
