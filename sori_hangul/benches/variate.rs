// Throughput of the rule cascade over a sung phrase.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use sori_hangul::{RuleSet, decompose, variate_text};

const PHRASE: &str = "닭장 앞에서 무릎 위로 착하게 많다고 칼날처럼 막론하고 꽃향기 속에 앉아";

fn bench_variate_text(c: &mut Criterion) {
    let rules = RuleSet::default();
    c.bench_function("variate_text_phrase", |b| {
        b.iter(|| variate_text(black_box(PHRASE), &rules))
    });
}

fn bench_decompose_block(c: &mut Criterion) {
    c.bench_function("decompose_block", |b| {
        b.iter(|| {
            let mut codas = 0u32;
            for code in sori_hangul::codec::SYLLABLE_BASE..=sori_hangul::codec::SYLLABLE_LAST {
                if let Some(triple) = char::from_u32(code).and_then(|c| decompose(c).ok()) {
                    codas += u32::from(triple.tail.is_some());
                }
            }
            black_box(codas)
        })
    });
}

criterion_group!(benches, bench_variate_text, bench_decompose_block);
criterion_main!(benches);
