//! The symmetries of the sub-entities of each reference cell
use crate::reference_cell::Reference;
use crate::symbolic::Polynomial;
use crate::types::{Error, ReferenceCellType, Result};
use std::fmt;

/// A remapping of the coordinates of a reference cell
///
/// The input and output both have one entry per coordinate.
pub type Remap = fn(&[Polynomial]) -> Vec<Polynomial>;

/// A symmetry of a sub-entity, written as a remapping of the coordinates of the cell
#[derive(Clone, Copy)]
pub struct SubEntitySymmetry {
    /// The name of the symmetry
    pub name: &'static str,
    /// The dimension and index of the sub-entity that the remap maps to itself
    pub entity: (usize, usize),
    /// The remap
    pub remap: Remap,
}

impl fmt::Debug for SubEntitySymmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubEntitySymmetry")
            .field("name", &self.name)
            .field("entity", &self.entity)
            .finish()
    }
}

fn one_minus(x: &[&Polynomial]) -> Polynomial {
    x.iter().fold(Polynomial::one(), |acc, xi| acc - *xi)
}

fn interval_reflection_triangle(x: &[Polynomial]) -> Vec<Polynomial> {
    vec![x[1].clone(), x[0].clone()]
}

fn interval_reflection_quadrilateral(x: &[Polynomial]) -> Vec<Polynomial> {
    vec![one_minus(&[&x[0]]), x[1].clone()]
}

fn interval_reflection_tetrahedron(x: &[Polynomial]) -> Vec<Polynomial> {
    vec![x[0].clone(), x[2].clone(), x[1].clone()]
}

fn interval_reflection_hexahedron(x: &[Polynomial]) -> Vec<Polynomial> {
    vec![one_minus(&[&x[0]]), x[1].clone(), x[2].clone()]
}

fn interval_reflection_prism(x: &[Polynomial]) -> Vec<Polynomial> {
    vec![one_minus(&[&x[0], &x[1]]), x[1].clone(), x[2].clone()]
}

// Triangle faces lying in the plane x2 = 0
fn triangle_rotation_xy(x: &[Polynomial]) -> Vec<Polynomial> {
    vec![x[1].clone(), one_minus(&[&x[0], &x[1]]), x[2].clone()]
}

fn triangle_reflection_xy(x: &[Polynomial]) -> Vec<Polynomial> {
    vec![x[1].clone(), x[0].clone(), x[2].clone()]
}

// Quadrilateral faces lying in the plane x2 = 0
fn quadrilateral_rotation_xy(x: &[Polynomial]) -> Vec<Polynomial> {
    vec![x[1].clone(), one_minus(&[&x[0]]), x[2].clone()]
}

fn quadrilateral_reflection_xy(x: &[Polynomial]) -> Vec<Polynomial> {
    vec![x[1].clone(), x[0].clone(), x[2].clone()]
}

// Prism face 1 lies in the plane x1 = 0
fn quadrilateral_rotation_prism(x: &[Polynomial]) -> Vec<Polynomial> {
    vec![x[2].clone(), x[1].clone(), one_minus(&[&x[0]])]
}

fn reflection_xz(x: &[Polynomial]) -> Vec<Polynomial> {
    vec![x[2].clone(), x[1].clone(), x[0].clone()]
}

// Pyramid face 1 lies in the plane x1 = 0
fn triangle_rotation_pyramid(x: &[Polynomial]) -> Vec<Polynomial> {
    vec![x[2].clone(), x[1].clone(), one_minus(&[&x[0], &x[2]])]
}

const fn symmetry(name: &'static str, entity: (usize, usize), remap: Remap) -> SubEntitySymmetry {
    SubEntitySymmetry {
        name,
        entity,
        remap,
    }
}

const TRIANGLE: [SubEntitySymmetry; 1] = [symmetry(
    "interval reflection",
    (1, 0),
    interval_reflection_triangle,
)];

const QUADRILATERAL: [SubEntitySymmetry; 1] = [symmetry(
    "interval reflection",
    (1, 0),
    interval_reflection_quadrilateral,
)];

const TETRAHEDRON: [SubEntitySymmetry; 3] = [
    symmetry("interval reflection", (1, 0), interval_reflection_tetrahedron),
    symmetry("triangle rotation", (2, 3), triangle_rotation_xy),
    symmetry("triangle reflection", (2, 3), triangle_reflection_xy),
];

const HEXAHEDRON: [SubEntitySymmetry; 3] = [
    symmetry("interval reflection", (1, 0), interval_reflection_hexahedron),
    symmetry("quadrilateral rotation", (2, 0), quadrilateral_rotation_xy),
    symmetry("quadrilateral reflection", (2, 0), quadrilateral_reflection_xy),
];

const PRISM: [SubEntitySymmetry; 5] = [
    symmetry("interval reflection", (1, 0), interval_reflection_prism),
    symmetry("quadrilateral rotation", (2, 1), quadrilateral_rotation_prism),
    symmetry("quadrilateral reflection", (2, 1), reflection_xz),
    symmetry("triangle rotation", (2, 0), triangle_rotation_xy),
    symmetry("triangle reflection", (2, 0), triangle_reflection_xy),
];

const PYRAMID: [SubEntitySymmetry; 5] = [
    symmetry("interval reflection", (1, 0), interval_reflection_hexahedron),
    symmetry("quadrilateral rotation", (2, 0), quadrilateral_rotation_xy),
    symmetry("quadrilateral reflection", (2, 0), quadrilateral_reflection_xy),
    symmetry("triangle rotation", (2, 1), triangle_rotation_pyramid),
    symmetry("triangle reflection", (2, 1), reflection_xz),
];

/// The symmetries of a cell type's sub-entities
///
/// One representative of each kind of symmetry is given: every other symmetry of a sub-entity
/// of the cell can be made by composing these.
pub fn cell_symmetries(cell_type: ReferenceCellType) -> Result<&'static [SubEntitySymmetry]> {
    match cell_type {
        ReferenceCellType::Interval => Ok(&[]),
        ReferenceCellType::Triangle => Ok(&TRIANGLE),
        ReferenceCellType::Quadrilateral => Ok(&QUADRILATERAL),
        ReferenceCellType::Tetrahedron => Ok(&TETRAHEDRON),
        ReferenceCellType::Hexahedron => Ok(&HEXAHEDRON),
        ReferenceCellType::Prism => Ok(&PRISM),
        ReferenceCellType::Pyramid => Ok(&PYRAMID),
        ReferenceCellType::Point => Err(Error::UnsupportedCell(String::from(
            "a point has no sub-entity symmetries",
        ))),
    }
}

/// The symmetries of the sub-entities of a reference
///
/// Fails with [`Error::UnsupportedReference`] if the reference is not the default reference.
pub fn sub_entity_symmetries(reference: &Reference) -> Result<&'static [SubEntitySymmetry]> {
    if !reference.is_default() {
        return Err(Error::UnsupportedReference);
    }
    cell_symmetries(reference.cell_type())
}

/// The symmetries of the sub-entities of a cell given by name
pub fn sub_entity_symmetries_by_name(cell_name: &str) -> Result<&'static [SubEntitySymmetry]> {
    cell_symmetries(cell_name.parse()?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::Rational;
    use num::BigInt;
    use paste::paste;

    macro_rules! test_bijection {

        ($($cell:ident, $count:expr),+) => {

        $(
            paste! {

                #[test]
                fn [<test_bijection_ $cell:lower>]() {
                    let reference = Reference::new(ReferenceCellType::[<$cell>]);
                    let symmetries = sub_entity_symmetries(&reference).unwrap();
                    assert_eq!(symmetries.len(), $count);
                    let x = Polynomial::variables(reference.dim());
                    for s in symmetries {
                        let mapped = (s.remap)(&x);
                        assert_eq!(mapped.len(), reference.dim());
                        let vertices = reference.sub_entity(s.entity.0, s.entity.1).unwrap();
                        let mut images = vertices
                            .iter()
                            .map(|v| mapped.iter().map(|m| m.evaluate(v)).collect::<Vec<_>>())
                            .collect::<Vec<_>>();
                        for image in &images {
                            assert!(vertices.contains(image), "{}: {image:?}", s.name);
                        }
                        images.sort();
                        images.dedup();
                        assert_eq!(images.len(), vertices.len());
                    }
                }

            }
        )*
        };
    }

    test_bijection!(
        Interval, 0,
        Triangle, 1,
        Quadrilateral, 1,
        Tetrahedron, 3,
        Hexahedron, 3,
        Prism, 5,
        Pyramid, 5
    );

    #[test]
    fn test_names() {
        let names = sub_entity_symmetries_by_name("prism")
            .unwrap()
            .iter()
            .map(|s| s.name)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "interval reflection",
                "quadrilateral rotation",
                "quadrilateral reflection",
                "triangle rotation",
                "triangle reflection",
            ]
        );
    }

    #[test]
    fn test_unsupported() {
        assert!(matches!(
            sub_entity_symmetries_by_name("polygon"),
            Err(Error::UnsupportedCell(_))
        ));
        assert!(matches!(
            sub_entity_symmetries_by_name("point"),
            Err(Error::UnsupportedCell(_))
        ));
        let one = Rational::from_integer(BigInt::from(1));
        let zero = Rational::from_integer(BigInt::from(0));
        let two = Rational::from_integer(BigInt::from(2));
        let reference = Reference::from_vertices(
            ReferenceCellType::Triangle,
            vec![
                vec![zero.clone(), zero.clone()],
                vec![two, zero.clone()],
                vec![zero, one],
            ],
        )
        .unwrap();
        assert_eq!(
            sub_entity_symmetries(&reference).unwrap_err(),
            Error::UnsupportedReference
        );
    }
}
