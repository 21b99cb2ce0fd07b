use criterion::{Criterion, black_box, criterion_group, criterion_main};

use larder_core::record::{Ingredient, Recipe};
use larder_core::staged::StagedSequence;
use larder_core::warnings::find_duplicate_ids;

fn ingredients(n: i64) -> Vec<Ingredient> {
    (1..=n)
        .map(|id| Ingredient::new(id, format!("Ingredient {id}")))
        .collect()
}

// ---------------------------------------------------------------------------
// Commit / discard
// ---------------------------------------------------------------------------

fn bench_commit_single_edit(c: &mut Criterion) {
    let mut seq = StagedSequence::new(ingredients(1000));
    c.bench_function("commit_1000_one_edit", |b| {
        b.iter(|| {
            if let Ok(row) = seq.get_mut(500) {
                row.name.push('x');
            }
            seq.commit();
            black_box(seq.len());
        });
    });
}

fn bench_discard_after_append(c: &mut Criterion) {
    let mut seq = StagedSequence::new(ingredients(1000));
    c.bench_function("discard_1000_after_append", |b| {
        b.iter(|| {
            seq.append(Ingredient::new(1001, "extra"));
            seq.discard();
            black_box(seq.len());
        });
    });
}

fn bench_replace_working_shrink_grow(c: &mut Criterion) {
    let small = ingredients(100);
    let large = ingredients(1000);
    let mut seq = StagedSequence::new(large.clone());
    c.bench_function("replace_working_100_1000", |b| {
        b.iter(|| {
            seq.replace_working(black_box(&small));
            seq.replace_working(black_box(&large));
        });
    });
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

fn bench_sort_by_name_reverse(c: &mut Criterion) {
    let rows = ingredients(1000);
    c.bench_function("sort_by_key_name_reverse_1000", |b| {
        b.iter(|| {
            let mut seq = StagedSequence::from_slice(&rows);
            seq.sort_by_key(|row| row.name.clone(), true);
            black_box(seq.len());
        });
    });
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn bench_duplicate_scan(c: &mut Criterion) {
    let rows: Vec<Recipe> = (0..2000)
        .map(|i| Recipe::new(i % 1500, format!("Recipe {i}")))
        .collect();
    c.bench_function("find_duplicate_ids_2000", |b| {
        b.iter(|| black_box(find_duplicate_ids(black_box(&rows))));
    });
}

criterion_group!(
    benches,
    bench_commit_single_edit,
    bench_discard_after_append,
    bench_replace_working_shrink_grow,
    bench_sort_by_name_reverse,
    bench_duplicate_scan,
);
criterion_main!(benches);
