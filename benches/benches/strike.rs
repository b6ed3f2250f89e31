// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_strike`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;

use hashbrown::HashMap;
use kurbo::Affine;
use peniko::{Brush, Color};
use understory_strike::{
    AntialiasHint, FractionalMetricsHint, GaspTable, ShapingProjection, StrikeKey,
    glyph_point_size,
};
use understory_text_attributes::{AttributeId, AttributeSet};

fn attributes(shade: u8) -> AttributeSet {
    AttributeSet::new()
        .with(AttributeId::Weight, 2.0_f32)
        .with(AttributeId::WeightX, 1.25_f32)
        .with(AttributeId::FlipHorizontal, true)
        .with(AttributeId::Foreground, Brush::Solid(Color::from_rgb8(shade, 0, 0)))
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("strike/build");
    let device = Arc::new(Affine::scale(2.0));
    let glyph = Arc::new(Affine::scale(24.0));
    let gasp = GaspTable::new().with_range(8, false).with_range(0xFFFF, true);
    let set = attributes(0);

    group.bench_function("projection", |b| {
        b.iter(|| black_box(ShapingProjection::from_attributes(black_box(&set))));
    });

    group.bench_function("key", |b| {
        b.iter(|| {
            StrikeKey::builder(device.clone(), glyph.clone())
                .attributes(&set)
                .hints(
                    AntialiasHint::Gasp,
                    FractionalMetricsHint::On,
                    &gasp,
                    glyph_point_size(*device, 12.0, Affine::IDENTITY),
                )
                .build()
        });
    });

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("strike/lookup");
    let device = Arc::new(Affine::IDENTITY);

    group.bench_function("hash_cold", |b| {
        b.iter_batched(
            || {
                StrikeKey::builder(device.clone(), Affine::scale(12.0))
                    .attributes(&attributes(0))
                    .build()
            },
            |key| black_box(key.hash_code()),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("hash_cached", |b| {
        let key = StrikeKey::builder(device.clone(), Affine::scale(12.0)).build();
        let _ = key.hash_code();
        b.iter(|| black_box(key.hash_code()));
    });

    for sizes in [16_u16, 256] {
        let mut cache = HashMap::new();
        for size in 1..=sizes {
            let key = StrikeKey::builder(device.clone(), Affine::scale(f64::from(size)))
                .attributes(&attributes(0))
                .build();
            cache.insert(key, size);
        }
        // Differs from the cached key only in paint.
        let probe = StrikeKey::builder(device.clone(), Affine::scale(12.0))
            .attributes(&attributes(200))
            .build();
        group.bench_function(BenchmarkId::new("hit", sizes), |b| {
            b.iter(|| black_box(cache.get(black_box(&probe))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_lookup);
criterion_main!(benches);
