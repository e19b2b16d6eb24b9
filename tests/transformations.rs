use approx::assert_relative_eq;
use ndtransform::element::ciarlet::{lagrange, nedelec, raviart_thomas};
use ndtransform::element::{CiarletElement, Functional};
use ndtransform::symbolic::{Matrix, Polynomial};
use ndtransform::traits::FiniteElement;
use ndtransform::transformations::{
    compute_transformations, PreparedTransformations, TransformationCache,
};
use ndtransform::types::{Continuity, Error, Family, MapType, Rational, ReferenceCellType};
use num::BigInt;
use paste::paste;
use std::sync::Arc;

fn exact(rows: &[&[i64]]) -> Matrix<Rational> {
    Matrix::from_rows(
        rows.iter()
            .map(|r| {
                r.iter()
                    .map(|v| Rational::from_integer(BigInt::from(*v)))
                    .collect()
            })
            .collect(),
    )
    .unwrap()
}

macro_rules! test_lagrange_2d {

    ($($cell:ident),+) => {

    $(
        paste! {

            #[test]
            fn [<test_lagrange_degree_4_ $cell:lower>]() {
                let e = lagrange::create(ReferenceCellType::[<$cell>], 4, Continuity::Continuous)
                    .unwrap();
                let t = compute_transformations(&e).unwrap();
                assert_eq!(t.len(), 1);
                assert_eq!(
                    t["interval reflection"],
                    exact(&[&[0, 0, 1], &[0, 1, 0], &[1, 0, 0]])
                );
            }

        }
    )*
    };
}

test_lagrange_2d!(Triangle, Quadrilateral);

#[test]
fn test_lagrange_tetrahedron() {
    let e = lagrange::create(ReferenceCellType::Tetrahedron, 4, Continuity::Continuous).unwrap();
    let t = compute_transformations(&e).unwrap();
    assert_eq!(t.len(), 3);
    assert_eq!(
        t["interval reflection"],
        exact(&[&[0, 0, 1], &[0, 1, 0], &[1, 0, 0]])
    );
    assert_eq!(
        t["triangle rotation"],
        exact(&[&[0, 0, 1], &[1, 0, 0], &[0, 1, 0]])
    );
    assert_eq!(
        t["triangle reflection"],
        exact(&[&[1, 0, 0], &[0, 0, 1], &[0, 1, 0]])
    );
}

#[test]
fn test_lagrange_hexahedron() {
    let e = lagrange::create(ReferenceCellType::Hexahedron, 3, Continuity::Continuous).unwrap();
    let t = compute_transformations(&e).unwrap();
    assert_eq!(t.len(), 3);
    assert_eq!(t["interval reflection"], exact(&[&[0, 1], &[1, 0]]));
    assert_eq!(
        t["quadrilateral rotation"],
        exact(&[&[0, 0, 1, 0], &[1, 0, 0, 0], &[0, 0, 0, 1], &[0, 1, 0, 0]])
    );
    assert_eq!(
        t["quadrilateral reflection"],
        exact(&[&[1, 0, 0, 0], &[0, 0, 1, 0], &[0, 1, 0, 0], &[0, 0, 0, 1]])
    );
}

#[test]
fn test_lagrange_prism() {
    let e = lagrange::create(ReferenceCellType::Prism, 2, Continuity::Continuous).unwrap();
    let t = compute_transformations(&e).unwrap();
    assert_eq!(t.len(), 5);
    assert_eq!(t["interval reflection"], exact(&[&[1]]));
    assert_eq!(t["quadrilateral rotation"], exact(&[&[1]]));
    assert_eq!(t["triangle rotation"].shape(), [0, 0]);
}

#[test]
fn test_nedelec_triangle() {
    let e = nedelec::create(ReferenceCellType::Triangle, 3, Continuity::Continuous).unwrap();
    let t = compute_transformations(&e).unwrap();
    assert_eq!(t.len(), 1);
    assert_eq!(
        t["interval reflection"],
        exact(&[&[0, -1, 0], &[-1, 0, 0], &[0, 0, -1]])
    );
}

#[test]
fn test_nedelec_tetrahedron() {
    let e = nedelec::create(ReferenceCellType::Tetrahedron, 3, Continuity::Continuous).unwrap();
    let t = compute_transformations(&e).unwrap();
    assert_eq!(t.len(), 3);
    assert_eq!(
        t["interval reflection"],
        exact(&[&[0, -1, 0], &[-1, 0, 0], &[0, 0, -1]])
    );
    assert_eq!(
        t["triangle rotation"],
        exact(&[
            &[0, 0, 0, 0, -1, -1],
            &[0, 0, 0, 0, 1, 0],
            &[-1, -1, 0, 0, 0, 0],
            &[1, 0, 0, 0, 0, 0],
            &[0, 0, -1, -1, 0, 0],
            &[0, 0, 1, 0, 0, 0],
        ])
    );
    assert_eq!(
        t["triangle reflection"],
        exact(&[
            &[0, 1, 0, 0, 0, 0],
            &[1, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 1],
            &[0, 0, 0, 0, 1, 0],
            &[0, 0, 0, 1, 0, 0],
            &[0, 0, 1, 0, 0, 0],
        ])
    );
}

#[test]
fn test_nedelec_tetrahedron_degree_2() {
    let e = nedelec::create(ReferenceCellType::Tetrahedron, 2, Continuity::Continuous).unwrap();
    let t = compute_transformations(&e).unwrap();
    assert_eq!(t["interval reflection"], exact(&[&[0, -1], &[-1, 0]]));
    assert_eq!(t["triangle rotation"], exact(&[&[-1, -1], &[1, 0]]));
    assert_eq!(t["triangle reflection"], exact(&[&[0, 1], &[1, 0]]));
}

#[test]
fn test_nedelec_quadrilateral() {
    let e = nedelec::create(ReferenceCellType::Quadrilateral, 3, Continuity::Continuous).unwrap();
    let t = compute_transformations(&e).unwrap();
    assert_eq!(t.len(), 1);
    assert_eq!(
        t["interval reflection"],
        exact(&[&[0, -1, 0], &[-1, 0, 0], &[0, 0, -1]])
    );
}

#[test]
fn test_nedelec_hexahedron() {
    let e = nedelec::create(ReferenceCellType::Hexahedron, 2, Continuity::Continuous).unwrap();
    let t = compute_transformations(&e).unwrap();
    assert_eq!(t.len(), 3);
    assert_eq!(t["interval reflection"], exact(&[&[0, -1], &[-1, 0]]));
    assert_eq!(
        t["quadrilateral rotation"],
        exact(&[&[0, -1, 0, 0], &[0, 0, 0, 1], &[1, 0, 0, 0], &[0, 0, -1, 0]])
    );
    assert_eq!(
        t["quadrilateral reflection"],
        exact(&[&[0, -1, 0, 0], &[-1, 0, 0, 0], &[0, 0, 0, -1], &[0, 0, -1, 0]])
    );
}

#[test]
fn test_nedelec_hexahedron_operators() {
    let e = nedelec::create(ReferenceCellType::Hexahedron, 2, Continuity::Continuous).unwrap();
    let prepared = PreparedTransformations::<f64>::from_element(&e).unwrap();
    let mut data = vec![1.0, 2.0, 3.0, 4.0];
    prepared.apply("quadrilateral rotation", &mut data).unwrap();
    assert_eq!(data, vec![-2.0, 4.0, 1.0, -3.0]);
}

#[test]
fn test_raviart_thomas_triangle() {
    let e = raviart_thomas::create(ReferenceCellType::Triangle, 1, Continuity::Continuous)
        .unwrap();
    let t = compute_transformations(&e).unwrap();
    assert_eq!(t["interval reflection"], exact(&[&[-1]]));

    let e = raviart_thomas::create(ReferenceCellType::Triangle, 2, Continuity::Continuous)
        .unwrap();
    let t = compute_transformations(&e).unwrap();
    assert_eq!(t["interval reflection"], exact(&[&[0, -1], &[-1, 0]]));
}

#[test]
fn test_raviart_thomas_tetrahedron() {
    let e = raviart_thomas::create(ReferenceCellType::Tetrahedron, 2, Continuity::Continuous)
        .unwrap();
    let t = compute_transformations(&e).unwrap();
    assert_eq!(t["interval reflection"].shape(), [0, 0]);
    assert_eq!(
        t["triangle rotation"],
        exact(&[&[0, 0, 1], &[1, 0, 0], &[0, 1, 0]])
    );
    assert_eq!(
        t["triangle reflection"],
        exact(&[&[-1, 0, 0], &[0, 0, -1], &[0, -1, 0]])
    );
}

#[test]
fn test_discontinuous() {
    let e = nedelec::create(ReferenceCellType::Triangle, 2, Continuity::Discontinuous).unwrap();
    let t = compute_transformations(&e).unwrap();
    assert_eq!(t["interval reflection"].shape(), [0, 0]);
}

fn mixed_element() -> CiarletElement {
    let x = Polynomial::variables(2);
    let zero = Rational::from_integer(BigInt::from(0));
    let one = Rational::from_integer(BigInt::from(1));
    let functionals = [
        vec![
            vec![Functional::point_evaluation(
                vec![zero.clone(), zero.clone()],
                MapType::Identity,
            )],
            vec![Functional::point_evaluation(
                vec![one.clone(), zero.clone()],
                MapType::Identity,
            )],
            vec![Functional::point_evaluation(
                vec![zero, one],
                MapType::CovariantPiola,
            )],
        ],
        vec![vec![], vec![], vec![]],
        vec![vec![]],
        vec![],
    ];
    CiarletElement::create(
        Family::Custom,
        ReferenceCellType::Triangle,
        1,
        vec![],
        vec![vec![Polynomial::one()], vec![x[0].clone()], vec![x[1].clone()]],
        functionals,
        Continuity::Continuous,
        1,
    )
    .unwrap()
}

#[test]
fn test_mixed_mapping() {
    let e = mixed_element();
    assert_eq!(
        compute_transformations(&e).unwrap_err(),
        Error::MixedMapping(MapType::Identity, MapType::CovariantPiola)
    );
    assert!(PreparedTransformations::<f64>::from_element(&e).is_err());
    let cache = TransformationCache::<f64>::new();
    assert!(cache.get_or_compute(&e).is_err());
    assert!(cache.is_empty());
}

#[test]
fn test_prepared_operators_match_matrices() {
    let e = nedelec::create(ReferenceCellType::Tetrahedron, 3, Continuity::Continuous).unwrap();
    let prepared = PreparedTransformations::<f64>::from_element(&e).unwrap();
    assert_eq!(prepared.len(), 3);
    for t in prepared.iter() {
        let n = t.operator.dim();
        assert_eq!(t.matrix.shape(), [n, n]);
        let input = (0..n).map(|i| (i + 1) as f64).collect::<Vec<_>>();
        let mut data = input.clone();
        t.operator.apply(&mut data).unwrap();
        let expected = t.matrix.map(|v| num::ToPrimitive::to_f64(v).unwrap());
        let expected = expected.mat_vec(&input).unwrap();
        for (a, b) in data.iter().zip(&expected) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }
    let rotation = prepared.get("triangle rotation").unwrap();
    assert_eq!(rotation.entity, (2, 3));
    assert_eq!(
        e.entity_dofs(2, 3).unwrap().len(),
        rotation.operator.dim()
    );
}

#[test]
fn test_cache_is_shared_between_threads() {
    let cache = Arc::new(TransformationCache::<f64>::new());
    let handles = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                let e = lagrange::create(ReferenceCellType::Tetrahedron, 4, Continuity::Continuous)
                    .unwrap();
                let prepared = cache.get_or_compute(&e).unwrap();
                let mut data = vec![1.0, 2.0, 3.0];
                prepared.apply("triangle rotation", &mut data).unwrap();
                data
            })
        })
        .collect::<Vec<_>>();
    for h in handles {
        assert_eq!(h.join().unwrap(), vec![3.0, 1.0, 2.0]);
    }
    assert_eq!(cache.len(), 1);

    let e = lagrange::create(ReferenceCellType::Tetrahedron, 3, Continuity::Continuous).unwrap();
    cache.get_or_compute(&e).unwrap();
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_custom_elements_are_not_cached() {
    let x = Polynomial::variables(1);
    let zero = Rational::from_integer(BigInt::from(0));
    let one = Rational::from_integer(BigInt::from(1));
    let e = CiarletElement::create(
        Family::Custom,
        ReferenceCellType::Interval,
        1,
        vec![],
        vec![vec![Polynomial::one()], vec![x[0].clone()]],
        [
            vec![
                vec![Functional::point_evaluation(vec![zero], MapType::Identity)],
                vec![Functional::point_evaluation(vec![one], MapType::Identity)],
            ],
            vec![vec![]],
            vec![],
            vec![],
        ],
        Continuity::Continuous,
        1,
    )
    .unwrap();
    let cache = TransformationCache::<f64>::new();
    assert!(cache.get_or_compute(&e).unwrap().is_empty());
    assert!(cache.is_empty());
}
