use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kintree::config::LayoutConfig;
use kintree::layout::layout;
use kintree::model::{Person, Sex};
use kintree::normalize::normalize_and_link;
use std::hint::black_box;

/// Synthetic family: `generations` rows of `couples` couples, every couple
/// with two children who marry into the next row. Only one side of each
/// parent/child link is recorded so the normalizer has real work to do.
fn synthetic_family(generations: usize, couples: usize) -> Vec<Person> {
    let mut nodes = Vec::new();
    for row in 0..generations {
        for couple in 0..couples {
            let left_id = format!("g{row}c{couple}l");
            let right_id = format!("g{row}c{couple}r");
            let mut left = Person::new(&left_id, &format!("L{row}-{couple}"));
            left.sex = Some(Sex::Male);
            left.partners.push(right_id.clone());
            let mut right = Person::new(&right_id, &format!("R{row}-{couple}"));
            right.sex = Some(Sex::Female);
            if row > 0 {
                // Each spouse descends from a different couple above; link
                // one parent only and let co-parent inference fill the rest.
                left.parent_ids.push(format!("g{}c{}l", row - 1, couple % couples));
                right
                    .parent_ids
                    .push(format!("g{}c{}l", row - 1, (couple + 1) % couples));
            }
            nodes.push(left);
            nodes.push(right);
        }
    }
    nodes
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for (generations, couples) in [(3, 4), (5, 8), (8, 16)] {
        let nodes = synthetic_family(generations, couples);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", generations, couples)),
            &nodes,
            |b, nodes| b.iter(|| normalize_and_link(black_box(nodes.clone()))),
        );
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let mut group = c.benchmark_group("layout");
    for (generations, couples) in [(3, 4), (5, 8), (8, 16)] {
        let nodes = normalize_and_link(synthetic_family(generations, couples));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", generations, couples)),
            &nodes,
            |b, nodes| b.iter(|| layout(black_box(nodes), &config)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_layout);
criterion_main!(benches);
