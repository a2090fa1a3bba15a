//! Benchmarks for the sampler and the iterative solver on synthetic corpora.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use surfrank_core::{CorpusGraph, RankConfig, iterate_pagerank, sample_pagerank_with};

/// Corpus sizes, from a handful of pages up to a small site.
const SIZES: [usize; 3] = [8, 64, 256];

/// Random corpus where each page links to up to `max_links` others and
/// roughly one page in ten is a sink.
fn synthetic_corpus(pages: usize, max_links: usize, seed: u64) -> CorpusGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    CorpusGraph::from_links((0..pages).map(|i| {
        let links: Vec<String> = if rng.gen_ratio(1, 10) {
            Vec::new()
        } else {
            let count = rng.gen_range(1..=max_links);
            (0..count)
                .map(|_| format!("page-{}.html", rng.gen_range(0..pages)))
                .collect()
        };
        (format!("page-{i}.html"), links)
    }))
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let samples = 10_000;
    group.throughput(Throughput::Elements(samples as u64));

    for pages in SIZES {
        let corpus = synthetic_corpus(pages, 6, 0x5EED_u64 + pages as u64);
        group.bench_with_input(BenchmarkId::from_parameter(pages), &corpus, |b, corpus| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| black_box(sample_pagerank_with(corpus, 0.85, samples, &mut rng)));
        });
    }

    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");
    let config = RankConfig::default();

    for pages in SIZES {
        let corpus = synthetic_corpus(pages, 6, 0x5EED_u64 + pages as u64);
        group.bench_with_input(BenchmarkId::from_parameter(pages), &corpus, |b, corpus| {
            b.iter(|| black_box(iterate_pagerank(corpus, &config)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sampling, bench_iteration);
criterion_main!(benches);
