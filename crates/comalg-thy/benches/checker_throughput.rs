use comalg_core::Ring;
use comalg_module::Module;
use comalg_thy::{
    check_associated_primes_identity, check_projective_equivalence, ScenarioFile, TheoremChecker,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_builtin_run(c: &mut Criterion) {
    let checker = TheoremChecker::new();
    let file = ScenarioFile::builtin();
    c.bench_function("checker_builtin_run", |b| {
        b.iter(|| {
            let report = checker.run(black_box(&file)).expect("report");
            black_box(report.analysis_hash);
        })
    });
}

fn bench_wide_presentation(c: &mut Criterion) {
    let z = Ring::integers();
    let relations: Vec<Vec<i64>> = (0..6)
        .map(|row| (0..6).map(|col| ((row * 7 + col * 3) % 11) as i64 - 5).collect())
        .collect();
    let generators = (0..6).map(|idx| format!("g{idx}")).collect::<Vec<_>>();
    c.bench_function("checker_six_generators", |b| {
        b.iter(|| {
            let module = Module::new(&z, generators.clone(), relations.clone()).expect("module");
            let equivalence = check_projective_equivalence(&z, &module).expect("equivalence");
            let identity = check_associated_primes_identity(&z, &module).expect("identity");
            black_box((equivalence.equivalence_holds, identity.identity_holds));
        })
    });
}

criterion_group!(benches, bench_builtin_run, bench_wide_presentation);
criterion_main!(benches);
