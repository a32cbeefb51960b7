//! Benchmarks for the markdown preview and formatting.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use stackit_editor::editor::{DeclinePrompt, FormatOp, Selection, apply_format};
use stackit_editor::preview;

fn sample_answer(paragraphs: usize) -> String {
    let block = "## Borrowing\n\
                 You can **not** hold a `&mut` and a `&` at once.\n\
                 > see the *book*\n\
                 - one\n\
                 1. two\n\
                 ![diagram](borrow.png) and [docs](https://doc.rust-lang.org)\n\
                 ---\n";
    block.repeat(paragraphs)
}

fn bench_render(c: &mut Criterion) {
    let short = sample_answer(1);
    let long = sample_answer(200);

    c.bench_function("preview_short", |b| {
        b.iter(|| preview::render(black_box(&short)))
    });
    c.bench_function("preview_long", |b| {
        b.iter(|| preview::render(black_box(&long)))
    });
}

fn bench_format(c: &mut Criterion) {
    let text = sample_answer(200);
    let mid = text.chars().count() / 2;

    c.bench_function("bold_mid_document", |b| {
        b.iter(|| {
            apply_format(
                black_box(&text),
                Selection::new(mid, mid + 10),
                FormatOp::Bold,
                &mut DeclinePrompt,
            )
        })
    });
}

criterion_group!(benches, bench_render, bench_format);
criterion_main!(benches);
