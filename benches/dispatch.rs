// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for message dispatch.
//!
//! Measures the performance of:
//! - Emitting a message to a channel subscriber
//! - Ingesting a batch of server messages
//! - Emitting through the Fluent translator

use criterion::{criterion_group, criterion_main, Criterion};
use growl::{FluentTranslator, GrowlConfig, MessageOptions, NotificationService, Options};
use serde_json::json;
use std::hint::black_box;
use tokio::sync::mpsc;

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut service = NotificationService::default();
    service.configure(Options::new().ttl(5));
    service.subscribe(tx);

    group.bench_function("emit_error", |b| {
        b.iter(|| {
            service.error(black_box("Upload failed"), Some(MessageOptions::new().ttl(10)));
            black_box(rx.try_recv().ok());
        });
    });

    group.finish();
}

fn bench_server_messages(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut service = NotificationService::default();
    service.subscribe(tx);
    let entries: Vec<_> = (0..16)
        .map(|i| json!({"text": format!("field {i} is invalid"), "severity": "warn"}))
        .collect();

    group.bench_function("add_server_messages_16", |b| {
        b.iter(|| {
            black_box(service.add_server_messages(black_box(&entries)));
            while rx.try_recv().is_ok() {}
        });
    });

    group.finish();
}

fn bench_translated_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    let config = GrowlConfig::default();
    let translator = FluentTranslator::new(Some("en-US"), &config);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut service = NotificationService::new(config).with_translator(translator);
    service.subscribe(tx);

    group.bench_function("emit_translated", |b| {
        b.iter(|| {
            service.success(
                black_box("growl-saved"),
                Some(MessageOptions::new().variable("name", "report.pdf")),
            );
            black_box(rx.try_recv().ok());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_emit, bench_server_messages, bench_translated_emit);
criterion_main!(benches);
