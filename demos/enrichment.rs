use std::fs::read_to_string;
use std::process;

use goea::annotations::ProteinMatch;
use goea::enrichment::{EmptyReason, Outcome};
use goea::{Background, DomainCache, DomainResolver, EnrichmentAnalyzer, Progress};

/// Reads one protein accession per line
fn dataset(path: &str) -> Vec<ProteinMatch> {
    read_to_string(path)
        .expect("unable to read dataset file")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|accession| ProteinMatch::new(accession).validated(true))
        .collect()
}

fn main() {
    simple_logger::SimpleLogger::new()
        .env()
        .init()
        .expect("logger can only be initialized once");

    let mut args = std::env::args();
    if args.len() < 3 {
        println!("Performs a GO enrichment analysis of a protein dataset\n\n");
        println!("Usage:\nenrichment <BACKGROUND MAPPING> <DATASET> [<DOMAIN CACHE>]");
        println!("e.g.:\nenrichment tests/background.tsv proteins.txt\n");
        process::exit(1)
    }
    let background_file = args.nth(1).expect("argument count was checked");
    let dataset_file = args.next().expect("argument count was checked");

    let background = Background::from_mapping_file("Homo sapiens", &background_file)
        .expect("invalid background mapping");

    let cache = match args.next() {
        Some(path) => DomainCache::open(path).expect("invalid domain cache"),
        None => DomainCache::in_memory(),
    };

    let analyzer = EnrichmentAnalyzer::builder()
        .background(background)
        .domains(DomainResolver::new(cache).into())
        .build()
        .expect("background was provided");

    let outcome = analyzer
        .analyze(dataset(&dataset_file), &Progress::new())
        .expect("dataset must fit into the background");

    let mut result = match outcome {
        Outcome::Completed(result) => result,
        Outcome::Empty(EmptyReason::NoMappedProteins) => {
            println!("None of the proteins is annotated with a GO term");
            return;
        }
        Outcome::Empty(EmptyReason::NoTerms) => {
            println!("No GO terms to test");
            return;
        }
        Outcome::Canceled { .. } => unreachable!("the analysis is never canceled"),
    };

    let counts = result.representation_counts();
    println!(
        "{} GO-mapped proteins in the background, {} in the dataset",
        result.total_background_mapped(),
        result.total_dataset_mapped()
    );
    println!(
        "{} significant terms: {} over-, {} underrepresented\n",
        result.significant_count(),
        counts.over,
        counts.under
    );

    let records = result.records().to_vec();
    let mut records: Vec<_> = records.iter().collect();
    records.sort_by(|a, b| a.corrected_pvalue().total_cmp(&b.corrected_pvalue()));
    println!("ID\tName\tDomain\tBackground\tDataset\tlog2 FC\tp-value\tcorrected");
    for record in records {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{:e}\t{:e}",
            record.id(),
            record.name(),
            record
                .domain()
                .map_or_else(|| "-".to_string(), |domain| domain.to_string()),
            record.background_frequency(),
            record.dataset_frequency(),
            record.fold_change(),
            record.pvalue(),
            record.corrected_pvalue(),
        );
        if !record.is_significant() {
            if let Some(rec) = result.record_mut(&record.id()) {
                rec.set_selected_for_plot(false);
            }
        }
    }

    println!("\nPlot:");
    for point in result.plot_points() {
        println!(
            "{}\t{:.3}\t{:.3}",
            point.name,
            point.log2_fold_change,
            -point.pvalue.log10()
        );
    }
}
