use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rayon::prelude::*;

use goea::annotations::ProteinMatch;
use goea::{
    Background, BackgroundBuilder, DomainCache, DomainResolver, EnrichmentAnalyzer, GoTermId,
    Progress,
};

/// A background of 20,000 proteins and 2,000 GO terms
fn background() -> Background {
    let mut builder = BackgroundBuilder::new();
    builder.species("Homo sapiens");
    for term in 1..=2000u32 {
        builder.add_term(GoTermId::from(term), &format!("term {term}"));
    }
    for protein in 0..20_000u32 {
        let accession = format!("P{protein:05}");
        for offset in 0..8 {
            let term = (protein * 7 + offset * 13) % 2000 + 1;
            builder.add_annotation(accession.as_str(), GoTermId::from(term));
        }
    }
    builder.build().expect("background is valid")
}

fn dataset(size: u32, start: u32) -> Vec<ProteinMatch> {
    (start..start + size)
        .map(|protein| ProteinMatch::new(format!("P{protein:05}")).validated(true))
        .collect()
}

fn single(analyzer: &EnrichmentAnalyzer, size: u32) -> usize {
    analyzer
        .analyze(dataset(size, 0), &Progress::new())
        .expect("dataset fits into background")
        .completed()
        .map_or(0, |result| result.significant_count())
}

fn parallel(analyzer: &EnrichmentAnalyzer, runs: u32) -> usize {
    (0..runs)
        .into_par_iter()
        .map(|run| {
            analyzer
                .analyze(dataset(500, run * 500), &Progress::new())
                .expect("dataset fits into background")
                .completed()
                .map_or(0, |result| result.significant_count())
        })
        .sum()
}

fn enrichment_benchmark(c: &mut Criterion) {
    let resolver = Arc::new(DomainResolver::new(DomainCache::in_memory()));
    let analyzer = EnrichmentAnalyzer::builder()
        .background(background())
        .domains(resolver)
        .build()
        .expect("background was provided");

    c.bench_function("enrichment 500 proteins", |b| {
        b.iter(|| single(black_box(&analyzer), black_box(500)))
    });

    c.bench_function("enrichment 5000 proteins", |b| {
        b.iter(|| single(black_box(&analyzer), black_box(5000)))
    });

    c.bench_function("enrichment-parallel 8 datasets", |b| {
        b.iter(|| parallel(black_box(&analyzer), black_box(8)))
    });
}

criterion_group! {
    name = enrichment;
    config = Criterion::default().sample_size(20).measurement_time(Duration::from_secs(10));
    targets = enrichment_benchmark
}
criterion_main!(enrichment);
