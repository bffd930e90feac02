use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use orrery_mesh::{IcosphereMesh, SubdivisionLevel};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("icosphere_generate");
    for level in [0_u32, 2, 4, 6] {
        let level = SubdivisionLevel::new(level).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(level), &level, |b, &level| {
            b.iter(|| black_box(IcosphereMesh::generate(level)))
        });
    }
    group.finish();
}

fn bench_to_buffers(c: &mut Criterion) {
    let mesh = IcosphereMesh::generate(SubdivisionLevel::new(5).unwrap());
    c.bench_function("icosphere_to_buffers_l5", |b| {
        b.iter(|| black_box(mesh.to_buffers()))
    });
}

criterion_group!(benches, bench_generate, bench_to_buffers);
criterion_main!(benches);
