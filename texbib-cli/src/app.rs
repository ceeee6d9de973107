use std::{
    collections::BTreeSet,
    env,
    io::{self, Write},
    path::PathBuf,
};

use eyre::eyre;
use log::trace;
use texbib::{
    batch::{Batch, BatchOptions, KeyOutcome},
    key, HttpClient, Source,
};

use crate::{config::Config, file, Cli};

const DEFAULT_OUTPUT: &str = "references.bib";
const DEFAULT_MAX_AUTHORS: usize = 3;

pub fn run(cli: Cli, config: Config) -> eyre::Result<()> {
    let output = cli
        .output
        .or(config.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let max_authors = cli
        .max_authors
        .or(config.max_authors)
        .unwrap_or(DEFAULT_MAX_AUTHORS);
    let source = cli
        .preferred_source
        .or(config.preferred_source)
        .unwrap_or(Source::Ads);
    // Flag beats config file beats environment.
    let ads_api_key = cli
        .ads_api_key
        .or(config.ads_api_key)
        .or_else(|| env::var("ADS_API_KEY").ok());
    let ss_api_key = cli
        .semantic_scholar_api_key
        .or(config.semantic_scholar_api_key)
        .or_else(|| env::var("SEMANTIC_SCHOLAR_API_KEY").ok());

    let tex_files = file::collect_tex_files(&cli.path)?;
    let mut all_keys = BTreeSet::new();
    let mut warnings = Vec::new();
    for tex_file in &tex_files {
        let document = file::read_to_string(tex_file)?;
        let (keys, file_warnings) = texbib::extract::cite_keys(&document);
        all_keys.extend(keys);
        warnings.extend(
            file_warnings
                .into_iter()
                .map(|warning| format!("{}: {warning}", tex_file.display())),
        );
    }

    if !warnings.is_empty() {
        println!("Warnings:");
        for warning in &warnings {
            println!("  {warning}");
        }
        println!();
    }

    println!("Found {} unique citation keys", all_keys.len());

    if cli.list_keys {
        for key in &all_keys {
            println!("{key}");
        }
        return Ok(());
    }

    if ads_api_key.is_none() {
        if matches!(source, Source::Ads | Source::Auto) {
            return Err(eyre!(
                "ADS_API_KEY is not set\n\
                 Get an API key from: https://ui.adsabs.harvard.edu/user/settings/token\n\
                 (Or use --preferred-source inspire to fetch from INSPIRE without an ADS key)"
            ));
        }
        if all_keys.iter().any(|key| key::is_bibcode(key)) {
            println!(
                "Warning: found ADS bibcode keys but ADS_API_KEY is not set - \
                 ADS lookups will be skipped"
            );
        }
    }

    let existing_content = if !cli.fresh && output.is_file() {
        file::read_to_string(&output)?.trim().to_owned()
    } else {
        if cli.fresh && output.is_file() {
            println!("Starting fresh (ignoring existing {})", output.display());
        }
        String::new()
    };

    let keys_to_fetch: Vec<String> = if existing_content.is_empty() {
        all_keys.into_iter().collect()
    } else {
        let existing_keys = texbib::extract::existing_bib_keys(&existing_content);
        let new_keys: Vec<String> = all_keys
            .into_iter()
            .filter(|key| !existing_keys.contains(key))
            .collect();
        println!(
            "Found {} existing entries in {}",
            existing_keys.len(),
            output.display()
        );
        println!("Fetching {} new keys", new_keys.len());
        new_keys
    };

    let mut batch = Batch::<HttpClient>::new(BatchOptions {
        source,
        ads_api_key,
        ss_api_key,
        max_authors,
    });

    let mut not_found = Vec::new();
    let mut duplicates = Vec::new();
    let mut failed = Vec::new();
    for key in &keys_to_fetch {
        print!("Fetching {key}... ");
        io::stdout().flush().ok();
        match batch.add_key(key) {
            Ok(KeyOutcome::Added { provenance }) => println!("\u{2713} {provenance}"),
            Ok(KeyOutcome::NotFound) => {
                println!("\u{2717} Not found");
                not_found.push(key.clone());
            }
            Ok(KeyOutcome::Duplicate(duplicate)) => {
                println!(
                    "\u{2717} Duplicate of '{}' ({})",
                    duplicate.existing_key, duplicate.reason
                );
                duplicates.push(duplicate);
            }
            Err(err) => {
                println!("\u{2717} Failed: {err}");
                failed.push(key.clone());
            }
        }
    }

    let entries = batch.into_entries();
    trace!("Updating the bibliography file..");
    file::write_output(&output, &existing_content, &entries)?;

    println!();
    println!("Wrote {} new entries to {}", entries.len(), output.display());

    if !not_found.is_empty() {
        println!();
        println!("Could not find {} keys:", not_found.len());
        for key in &not_found {
            println!("  - {key}");
        }
    }
    if !duplicates.is_empty() {
        println!();
        println!("Dropped {} duplicate keys:", duplicates.len());
        for duplicate in &duplicates {
            println!(
                "  - {} duplicates '{}' ({})",
                duplicate.key, duplicate.existing_key, duplicate.reason
            );
        }
    }
    if !failed.is_empty() {
        println!();
        println!("Failed to fetch {} keys:", failed.len());
        for key in &failed {
            println!("  - {key}");
        }
    }

    Ok(())
}
