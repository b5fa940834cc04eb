use criterion::{criterion_group, criterion_main, Criterion};
use ordlex::{Priority, Rule, RuleSet, ScanEngine};
use rand::{seq::SliceRandom, Rng};

pub fn scan_declarations(criterion: &mut Criterion) {
    // Setup
    let mut group = criterion.benchmark_group("Declarations");
    let mut rules = RuleSet::skipping_whitespace().unwrap();
    rules
        .insert_at_current(Rule::with_priority(r"int|float", Priority::Immediate).unwrap())
        .insert_at_current(Rule::new(r"[=;]").unwrap())
        .advance_order()
        .insert_at_current(Rule::with_priority(r"[0-9]+\.[0-9]+", Priority::Immediate).unwrap())
        .insert_at_current(Rule::new(r"[0-9]+").unwrap())
        .advance_order()
        .insert_at_current(Rule::new(r"[a-z_][a-z0-9_]*").unwrap());
    let mut rng = rand::thread_rng();
    let names = ["alpha", "beta_2", "gamma", "delta_delta", "x"];
    let size = 10_000;
    let content = (0..size)
        .map(|_| {
            let name = names.choose(&mut rng).unwrap();
            if rng.gen_bool(0.5) {
                format!("int {} = {};\n", name, rng.gen_range(0..100_000))
            } else {
                format!("float {} = {}.{};\n", name, rng.gen_range(0..100), rng.gen_range(0..100))
            }
        })
        .collect::<String>();
    let engine = ScanEngine::new(&rules);
    // Start benchmark
    group.bench_function("Scan 10k declarations", |b| b.iter(|| engine.scan(&content)));
    group.finish();
}

criterion_group!(benches, scan_declarations);
criterion_main!(benches);
