//! Cell definitions

use crate::types::{Error, Rational, ReferenceCellType, Result};
use num::{BigInt, One, Zero};

fn r(numerator: i64, denominator: i64) -> Rational {
    Rational::new(BigInt::from(numerator), BigInt::from(denominator))
}

/// The topological dimension of the cell
pub fn dim(cell: ReferenceCellType) -> usize {
    match cell {
        ReferenceCellType::Point => 0,
        ReferenceCellType::Interval => 1,
        ReferenceCellType::Triangle => 2,
        ReferenceCellType::Quadrilateral => 2,
        ReferenceCellType::Tetrahedron => 3,
        ReferenceCellType::Hexahedron => 3,
        ReferenceCellType::Prism => 3,
        ReferenceCellType::Pyramid => 3,
    }
}
/// Is the cell a simplex?
pub fn is_simplex(cell: ReferenceCellType) -> bool {
    match cell {
        ReferenceCellType::Point => true,
        ReferenceCellType::Interval => true,
        ReferenceCellType::Triangle => true,
        ReferenceCellType::Quadrilateral => false,
        ReferenceCellType::Tetrahedron => true,
        ReferenceCellType::Hexahedron => false,
        ReferenceCellType::Prism => false,
        ReferenceCellType::Pyramid => false,
    }
}

/// The vertices of the reference cell
pub fn vertices(cell: ReferenceCellType) -> Vec<Vec<Rational>> {
    let v = |coords: &[i64]| coords.iter().map(|c| r(*c, 1)).collect::<Vec<_>>();
    match cell {
        ReferenceCellType::Point => vec![vec![]],
        ReferenceCellType::Interval => vec![v(&[0]), v(&[1])],
        ReferenceCellType::Triangle => vec![v(&[0, 0]), v(&[1, 0]), v(&[0, 1])],
        ReferenceCellType::Quadrilateral => {
            vec![v(&[0, 0]), v(&[1, 0]), v(&[0, 1]), v(&[1, 1])]
        }
        ReferenceCellType::Tetrahedron => vec![
            v(&[0, 0, 0]),
            v(&[1, 0, 0]),
            v(&[0, 1, 0]),
            v(&[0, 0, 1]),
        ],
        ReferenceCellType::Hexahedron => vec![
            v(&[0, 0, 0]),
            v(&[1, 0, 0]),
            v(&[0, 1, 0]),
            v(&[1, 1, 0]),
            v(&[0, 0, 1]),
            v(&[1, 0, 1]),
            v(&[0, 1, 1]),
            v(&[1, 1, 1]),
        ],
        ReferenceCellType::Prism => vec![
            v(&[0, 0, 0]),
            v(&[1, 0, 0]),
            v(&[0, 1, 0]),
            v(&[0, 0, 1]),
            v(&[1, 0, 1]),
            v(&[0, 1, 1]),
        ],
        ReferenceCellType::Pyramid => vec![
            v(&[0, 0, 0]),
            v(&[1, 0, 0]),
            v(&[0, 1, 0]),
            v(&[1, 1, 0]),
            v(&[0, 0, 1]),
        ],
    }
}

/// The midpoint of the cell
pub fn midpoint(cell: ReferenceCellType) -> Vec<Rational> {
    let half = r(1, 2);
    let third = r(1, 3);
    match cell {
        ReferenceCellType::Point => vec![],
        ReferenceCellType::Interval => vec![half],
        ReferenceCellType::Triangle => vec![third; 2],
        ReferenceCellType::Quadrilateral => vec![half; 2],
        ReferenceCellType::Tetrahedron => vec![r(1, 4); 3],
        ReferenceCellType::Hexahedron => vec![half; 3],
        ReferenceCellType::Prism => vec![third.clone(), third, half],
        ReferenceCellType::Pyramid => vec![r(2, 5), r(2, 5), r(1, 5)],
    }
}

/// The edges of the reference cell
pub fn edges(cell: ReferenceCellType) -> Vec<Vec<usize>> {
    match cell {
        ReferenceCellType::Point => vec![],
        ReferenceCellType::Interval => vec![vec![0, 1]],
        ReferenceCellType::Triangle => vec![vec![1, 2], vec![0, 2], vec![0, 1]],
        ReferenceCellType::Quadrilateral => vec![vec![0, 1], vec![0, 2], vec![1, 3], vec![2, 3]],
        ReferenceCellType::Tetrahedron => vec![
            vec![2, 3],
            vec![1, 3],
            vec![1, 2],
            vec![0, 3],
            vec![0, 2],
            vec![0, 1],
        ],
        ReferenceCellType::Hexahedron => vec![
            vec![0, 1],
            vec![0, 2],
            vec![0, 4],
            vec![1, 3],
            vec![1, 5],
            vec![2, 3],
            vec![2, 6],
            vec![3, 7],
            vec![4, 5],
            vec![4, 6],
            vec![5, 7],
            vec![6, 7],
        ],
        ReferenceCellType::Prism => vec![
            vec![0, 1],
            vec![0, 2],
            vec![0, 3],
            vec![1, 2],
            vec![1, 4],
            vec![2, 5],
            vec![3, 4],
            vec![3, 5],
            vec![4, 5],
        ],
        ReferenceCellType::Pyramid => vec![
            vec![0, 1],
            vec![0, 2],
            vec![0, 4],
            vec![1, 3],
            vec![1, 4],
            vec![2, 3],
            vec![2, 4],
            vec![3, 4],
        ],
    }
}

/// The faces of the reference cell
pub fn faces(cell: ReferenceCellType) -> Vec<Vec<usize>> {
    match cell {
        ReferenceCellType::Point => vec![],
        ReferenceCellType::Interval => vec![],
        ReferenceCellType::Triangle => vec![vec![0, 1, 2]],
        ReferenceCellType::Quadrilateral => vec![vec![0, 1, 2, 3]],
        ReferenceCellType::Tetrahedron => {
            vec![vec![1, 2, 3], vec![0, 2, 3], vec![0, 1, 3], vec![0, 1, 2]]
        }
        ReferenceCellType::Hexahedron => vec![
            vec![0, 1, 2, 3],
            vec![0, 1, 4, 5],
            vec![0, 2, 4, 6],
            vec![1, 3, 5, 7],
            vec![2, 3, 6, 7],
            vec![4, 5, 6, 7],
        ],
        ReferenceCellType::Prism => vec![
            vec![0, 1, 2],
            vec![0, 1, 3, 4],
            vec![0, 2, 3, 5],
            vec![1, 2, 4, 5],
            vec![3, 4, 5],
        ],
        ReferenceCellType::Pyramid => vec![
            vec![0, 1, 2, 3],
            vec![0, 1, 4],
            vec![0, 2, 4],
            vec![1, 3, 4],
            vec![2, 3, 4],
        ],
    }
}

/// The types of the subentities of the reference cell
pub fn entity_types(cell: ReferenceCellType) -> Vec<Vec<ReferenceCellType>> {
    match cell {
        ReferenceCellType::Point => vec![vec![ReferenceCellType::Point], vec![], vec![], vec![]],
        ReferenceCellType::Interval => vec![
            vec![ReferenceCellType::Point; 2],
            vec![ReferenceCellType::Interval],
            vec![],
            vec![],
        ],
        ReferenceCellType::Triangle => vec![
            vec![ReferenceCellType::Point; 3],
            vec![ReferenceCellType::Interval; 3],
            vec![ReferenceCellType::Triangle],
            vec![],
        ],
        ReferenceCellType::Quadrilateral => vec![
            vec![ReferenceCellType::Point; 4],
            vec![ReferenceCellType::Interval; 4],
            vec![ReferenceCellType::Quadrilateral],
            vec![],
        ],
        ReferenceCellType::Tetrahedron => vec![
            vec![ReferenceCellType::Point; 4],
            vec![ReferenceCellType::Interval; 6],
            vec![ReferenceCellType::Triangle; 4],
            vec![ReferenceCellType::Tetrahedron],
        ],
        ReferenceCellType::Hexahedron => vec![
            vec![ReferenceCellType::Point; 8],
            vec![ReferenceCellType::Interval; 12],
            vec![ReferenceCellType::Quadrilateral; 6],
            vec![ReferenceCellType::Hexahedron],
        ],
        ReferenceCellType::Prism => vec![
            vec![ReferenceCellType::Point; 6],
            vec![ReferenceCellType::Interval; 9],
            vec![
                ReferenceCellType::Triangle,
                ReferenceCellType::Quadrilateral,
                ReferenceCellType::Quadrilateral,
                ReferenceCellType::Quadrilateral,
                ReferenceCellType::Triangle,
            ],
            vec![ReferenceCellType::Prism],
        ],
        ReferenceCellType::Pyramid => vec![
            vec![ReferenceCellType::Point; 5],
            vec![ReferenceCellType::Interval; 8],
            vec![
                ReferenceCellType::Quadrilateral,
                ReferenceCellType::Triangle,
                ReferenceCellType::Triangle,
                ReferenceCellType::Triangle,
                ReferenceCellType::Triangle,
            ],
            vec![ReferenceCellType::Pyramid],
        ],
    }
}

/// The number of subentities of each dimension
pub fn entity_counts(cell: ReferenceCellType) -> Vec<usize> {
    match cell {
        ReferenceCellType::Point => vec![1, 0, 0, 0],
        ReferenceCellType::Interval => vec![2, 1, 0, 0],
        ReferenceCellType::Triangle => vec![3, 3, 1, 0],
        ReferenceCellType::Quadrilateral => vec![4, 4, 1, 0],
        ReferenceCellType::Tetrahedron => vec![4, 6, 4, 1],
        ReferenceCellType::Hexahedron => vec![8, 12, 6, 1],
        ReferenceCellType::Prism => vec![6, 9, 5, 1],
        ReferenceCellType::Pyramid => vec![5, 8, 5, 1],
    }
}

/// The vertex numbers of a subentity, or `None` if there is no such subentity
pub fn sub_entity_vertices(
    cell: ReferenceCellType,
    entity_dim: usize,
    entity_number: usize,
) -> Option<Vec<usize>> {
    let counts = entity_counts(cell);
    if entity_dim > 3 || entity_number >= counts[entity_dim] {
        return None;
    }
    if entity_dim == dim(cell) {
        return Some((0..counts[0]).collect());
    }
    match entity_dim {
        0 => Some(vec![entity_number]),
        1 => edges(cell).get(entity_number).cloned(),
        2 => faces(cell).get(entity_number).cloned(),
        _ => None,
    }
}

/// The positions in a cell's vertex list of the vertices that span its parametrisation
///
/// For a cell with vertices `v`, a point with parameters `s` is `v[0] + sum_a s[a] (v[i_a] - v[0])`.
fn axis_vertices(cell: ReferenceCellType) -> &'static [usize] {
    match cell {
        ReferenceCellType::Point => &[],
        ReferenceCellType::Interval => &[1],
        ReferenceCellType::Triangle => &[1, 2],
        ReferenceCellType::Quadrilateral => &[1, 2],
        ReferenceCellType::Tetrahedron => &[1, 2, 3],
        ReferenceCellType::Hexahedron => &[1, 2, 4],
        ReferenceCellType::Prism => &[1, 2, 3],
        ReferenceCellType::Pyramid => &[1, 2, 4],
    }
}

/// A reference cell: a cell type together with the coordinates of its vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    cell_type: ReferenceCellType,
    vertices: Vec<Vec<Rational>>,
}

impl Reference {
    /// Create the default reference for a cell type
    pub fn new(cell_type: ReferenceCellType) -> Self {
        Self {
            cell_type,
            vertices: vertices(cell_type),
        }
    }

    /// Create a reference with custom vertex coordinates
    pub fn from_vertices(cell_type: ReferenceCellType, vertices: Vec<Vec<Rational>>) -> Result<Self> {
        let expected = entity_counts(cell_type)[0];
        if vertices.len() != expected {
            return Err(Error::ShapeMismatch {
                expected,
                actual: vertices.len(),
            });
        }
        let gdim = dim(cell_type);
        for v in &vertices {
            if v.len() != gdim {
                return Err(Error::ShapeMismatch {
                    expected: gdim,
                    actual: v.len(),
                });
            }
        }
        Ok(Self {
            cell_type,
            vertices,
        })
    }

    /// Is this the default reference for its cell type?
    pub fn is_default(&self) -> bool {
        self.vertices == vertices(self.cell_type)
    }

    /// The cell type
    pub fn cell_type(&self) -> ReferenceCellType {
        self.cell_type
    }

    /// The name of the cell
    pub fn name(&self) -> &'static str {
        self.cell_type.name()
    }

    /// The topological dimension
    pub fn dim(&self) -> usize {
        dim(self.cell_type)
    }

    /// The vertex coordinates
    pub fn vertices(&self) -> &[Vec<Rational>] {
        &self.vertices
    }

    /// The number of subentities of a dimension
    pub fn sub_entity_count(&self, entity_dim: usize) -> usize {
        entity_counts(self.cell_type).get(entity_dim).copied().unwrap_or(0)
    }

    fn missing(&self, entity_dim: usize, entity_number: usize) -> Error {
        Error::UnsupportedCell(format!(
            "{} has no subentity ({entity_dim}, {entity_number})",
            self.name()
        ))
    }

    /// The coordinates of the vertices of a subentity
    pub fn sub_entity(&self, entity_dim: usize, entity_number: usize) -> Result<Vec<Vec<Rational>>> {
        let numbers = sub_entity_vertices(self.cell_type, entity_dim, entity_number)
            .ok_or_else(|| self.missing(entity_dim, entity_number))?;
        Ok(numbers.iter().map(|v| self.vertices[*v].clone()).collect())
    }

    /// The cell type of a subentity
    pub fn sub_entity_type(
        &self,
        entity_dim: usize,
        entity_number: usize,
    ) -> Result<ReferenceCellType> {
        entity_types(self.cell_type)
            .get(entity_dim)
            .and_then(|types| types.get(entity_number))
            .copied()
            .ok_or_else(|| self.missing(entity_dim, entity_number))
    }

    /// The origin and axes that parametrise a subentity
    pub fn axes(
        &self,
        entity_dim: usize,
        entity_number: usize,
    ) -> Result<(Vec<Rational>, Vec<Vec<Rational>>)> {
        let vs = self.sub_entity(entity_dim, entity_number)?;
        let sub_type = self.sub_entity_type(entity_dim, entity_number)?;
        let origin = vs[0].clone();
        let axes = axis_vertices(sub_type)
            .iter()
            .map(|i| vs[*i].iter().zip(&origin).map(|(a, b)| a - b).collect())
            .collect();
        Ok((origin, axes))
    }

    /// The point in a subentity with the given parameters
    pub fn sub_entity_point(
        &self,
        entity_dim: usize,
        entity_number: usize,
        parameters: &[Rational],
    ) -> Result<Vec<Rational>> {
        let (origin, axes) = self.axes(entity_dim, entity_number)?;
        if parameters.len() != axes.len() {
            return Err(Error::ShapeMismatch {
                expected: axes.len(),
                actual: parameters.len(),
            });
        }
        let mut point = origin;
        for (s, axis) in parameters.iter().zip(&axes) {
            if s.is_zero() {
                continue;
            }
            for (p, a) in point.iter_mut().zip(axis) {
                *p += s * a;
            }
        }
        Ok(point)
    }
}

/// The volume of the default reference cell
pub fn volume(cell: ReferenceCellType) -> Rational {
    match cell {
        ReferenceCellType::Triangle | ReferenceCellType::Prism => r(1, 2),
        ReferenceCellType::Tetrahedron => r(1, 6),
        ReferenceCellType::Pyramid => r(1, 3),
        _ => Rational::one(),
    }
}
