use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndtransform::element::ciarlet::nedelec;
use ndtransform::transformations::PreparedTransformations;
use ndtransform::types::{Continuity, ReferenceCellType};

pub fn apply_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");
    group.sample_size(20);

    for degree in 3..6 {
        let element =
            nedelec::create(ReferenceCellType::Tetrahedron, degree, Continuity::Continuous)
                .unwrap();
        let transformations = PreparedTransformations::<f64>::from_element(&element).unwrap();
        let rotation = transformations.get("triangle rotation").unwrap();
        let n = rotation.operator.dim();
        let nfaces = 100000;
        let mut data = (0..n * nfaces).map(|i| i as f64).collect::<Vec<_>>();

        group.bench_function(
            format!("Rotation of {nfaces} degree {degree} Nedelec faces ({n} DOFs each)"),
            |b| b.iter(|| black_box(rotation.operator.apply_batch(&mut data))),
        );
    }
    group.finish();
}

criterion_group!(benches, apply_benchmark);
criterion_main!(benches);
