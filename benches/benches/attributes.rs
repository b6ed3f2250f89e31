// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_text_attributes`.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Once;

use kurbo::Affine;
use peniko::{Brush, Color};
use understory_text_attributes::{AttributeId, AttributeMask, AttributeSet, AttributeValue};

fn styled() -> AttributeSet {
    AttributeSet::new()
        .with(AttributeId::Family, "Serif")
        .with(AttributeId::Size, 14.0_f32)
        .with(AttributeId::Weight, 2.0_f32)
        .with(AttributeId::Underline, 1)
        .with(AttributeId::Foreground, Brush::Solid(Color::BLACK))
        .with(AttributeId::Kerning, 1)
}

fn bench_set(c: &mut Criterion) {
    static PRINT_SIZES: Once = Once::new();
    PRINT_SIZES.call_once(|| {
        eprintln!(
            "sizes: AttributeSet={} AttributeValue={}",
            core::mem::size_of::<AttributeSet>(),
            core::mem::size_of::<AttributeValue>(),
        );
    });

    let mut group = c.benchmark_group("attributes/set");

    group.bench_function("typed", |b| {
        let mut set = AttributeSet::new();
        b.iter(|| {
            set.set_size(black_box(18.0));
            black_box(set.size())
        });
    });

    group.bench_function("generic", |b| {
        let mut set = AttributeSet::new();
        b.iter(|| set.set(AttributeId::Weight, black_box(AttributeValue::Float(2.5))));
    });

    group.bench_function("rejected", |b| {
        let mut set = AttributeSet::new();
        b.iter(|| set.set(AttributeId::Weight, black_box(AttributeValue::Float(50.0))));
    });

    group.bench_function("transform", |b| {
        let mut set = AttributeSet::new();
        let rotated = Affine::rotate(0.3) * Affine::scale(2.0);
        b.iter(|| set.set_transform(black_box(rotated)));
    });

    group.bench_function("get_absent", |b| {
        let set = styled();
        b.iter(|| black_box(set.get(black_box(AttributeId::Tracking))));
    });

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("attributes/merge");
    let source = styled();
    let map = source.to_map();

    group.bench_function("set", |b| {
        b.iter_batched(
            AttributeSet::new,
            |mut set| {
                set.merge(&source);
                set
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("set_masked", |b| {
        let mask = AttributeId::Size.mask() | AttributeId::Weight.mask();
        b.iter_batched(
            AttributeSet::new,
            |mut set| {
                set.merge_masked(&source, mask);
                set
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("map", |b| {
        b.iter_batched(
            AttributeSet::new,
            |mut set| {
                set.merge_map(&map);
                set
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("to_map", |b| b.iter(|| black_box(source.to_map())));

    group.bench_function("to_persisted", |b| {
        b.iter(|| black_box(source.to_persisted()));
    });

    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("attributes/compare");
    let a = styled();
    let same = styled();
    let mut size_differs = styled();
    size_differs.set_size(15.0);
    let mut tail_differs = styled();
    tail_differs.set_kerning(0);

    group.bench_function("equal", |b| b.iter(|| black_box(&a) == black_box(&same)));
    group.bench_function("early_mismatch", |b| {
        b.iter(|| black_box(&a) == black_box(&size_differs));
    });
    group.bench_function("late_mismatch", |b| {
        b.iter(|| black_box(&a) == black_box(&tail_differs));
    });
    group.bench_function("mask_query", |b| {
        let mask = AttributeMask::from_iter([AttributeId::Weight, AttributeId::Posture]);
        b.iter(|| black_box(a.any_non_default(black_box(mask))));
    });

    group.finish();
}

criterion_group!(benches, bench_set, bench_merge, bench_compare);
criterion_main!(benches);
