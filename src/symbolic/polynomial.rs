//! Multivariate polynomials with exact rational coefficients
use crate::symbolic::matrix::independent_rows;
use crate::types::{Rational, ReferenceCellType};
use num::{BigInt, One, Zero};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};

/// The maximum number of variables a polynomial can depend on
pub const MAX_VARIABLES: usize = 3;

/// The exponents of x0, x1 and x2 in a monomial
pub type Monomial = [usize; MAX_VARIABLES];

/// A polynomial in the variables x0, x1 and x2
///
/// Terms with a zero coefficient are never stored, so two polynomials are equal if and only if
/// they have the same terms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, Rational>,
}

fn factorial(n: usize) -> BigInt {
    (1..=n).fold(BigInt::one(), |acc, i| acc * BigInt::from(i))
}

fn rational(numerator: BigInt, denominator: BigInt) -> Rational {
    Rational::new(numerator, denominator)
}

impl Polynomial {
    /// The zero polynomial
    pub fn zero() -> Self {
        Self::default()
    }

    /// The constant polynomial 1
    pub fn one() -> Self {
        Self::constant(Rational::one())
    }

    /// A constant polynomial
    pub fn constant(value: Rational) -> Self {
        Self::from_terms([([0; MAX_VARIABLES], value)])
    }

    /// A constant integer polynomial
    pub fn from_integer(value: i64) -> Self {
        Self::constant(Rational::from_integer(BigInt::from(value)))
    }

    /// The polynomial x_i
    pub fn variable(index: usize) -> Self {
        let mut exponents = [0; MAX_VARIABLES];
        exponents[index] = 1;
        Self::monomial(exponents)
    }

    /// The polynomials x_0, ..., x_{n-1}
    pub fn variables(n: usize) -> Vec<Self> {
        (0..n).map(Self::variable).collect()
    }

    /// A monomial with coefficient 1
    pub fn monomial(exponents: Monomial) -> Self {
        Self::from_terms([(exponents, Rational::one())])
    }

    /// Create a polynomial from (exponents, coefficient) pairs
    ///
    /// Repeated monomials are summed.
    pub fn from_terms(terms: impl IntoIterator<Item = (Monomial, Rational)>) -> Self {
        let mut p = Self::zero();
        for (m, c) in terms {
            p.add_term(m, c);
        }
        p
    }

    fn add_term(&mut self, monomial: Monomial, coefficient: Rational) {
        if coefficient.is_zero() {
            return;
        }
        match self.terms.entry(monomial) {
            Entry::Occupied(mut e) => {
                let sum = e.get().clone() + coefficient;
                if sum.is_zero() {
                    e.remove();
                } else {
                    *e.get_mut() = sum;
                }
            }
            Entry::Vacant(e) => {
                e.insert(coefficient);
            }
        }
    }

    /// Is this the zero polynomial?
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over the nonzero terms
    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &Rational)> {
        self.terms.iter()
    }

    /// The coefficient of a monomial
    pub fn coefficient(&self, monomial: &Monomial) -> Rational {
        self.terms
            .get(monomial)
            .cloned()
            .unwrap_or_else(Rational::zero)
    }

    /// The total degree (0 for the zero polynomial)
    pub fn degree(&self) -> usize {
        self.terms
            .keys()
            .map(|m| m.iter().sum())
            .max()
            .unwrap_or(0)
    }

    /// The value of this polynomial if it is constant
    pub fn as_constant(&self) -> Option<Rational> {
        if self.degree() == 0 {
            Some(self.coefficient(&[0; MAX_VARIABLES]))
        } else {
            None
        }
    }

    /// Multiply by a scalar
    pub fn scale(&self, factor: &Rational) -> Self {
        Self::from_terms(self.terms.iter().map(|(m, c)| (*m, c * factor)))
    }

    /// Evaluate at a point
    ///
    /// Variables without a coordinate in `point` are taken to be zero.
    pub fn evaluate(&self, point: &[Rational]) -> Rational {
        let mut result = Rational::zero();
        'terms: for (m, c) in &self.terms {
            let mut value = c.clone();
            for (i, e) in m.iter().enumerate() {
                if *e > 0 {
                    match point.get(i) {
                        Some(x) => value *= num::pow(x.clone(), *e),
                        None => continue 'terms,
                    }
                }
            }
            result += value;
        }
        result
    }

    /// Substitute polynomials for the variables
    ///
    /// Variable `i` is replaced by `values[i]`; variables past the end of `values` are left
    /// unchanged.
    pub fn substitute(&self, values: &[Polynomial]) -> Polynomial {
        let mut powers: Vec<Vec<Polynomial>> = (0..MAX_VARIABLES)
            .map(|i| {
                vec![
                    Polynomial::one(),
                    values.get(i).cloned().unwrap_or_else(|| Self::variable(i)),
                ]
            })
            .collect();
        let mut result = Polynomial::zero();
        for (m, c) in &self.terms {
            let mut term = Polynomial::constant(c.clone());
            for (i, e) in m.iter().enumerate() {
                while powers[i].len() <= *e {
                    let next = &powers[i][powers[i].len() - 1] * &powers[i][1];
                    powers[i].push(next);
                }
                if *e > 0 {
                    term = &term * &powers[i][*e];
                }
            }
            result = result + term;
        }
        result
    }

    /// Differentiate with respect to a variable
    pub fn diff(&self, variable: usize) -> Polynomial {
        Self::from_terms(self.terms.iter().filter(|(m, _)| m[variable] > 0).map(|(m, c)| {
            let mut d = *m;
            d[variable] -= 1;
            (d, c * Rational::from_integer(BigInt::from(m[variable])))
        }))
    }

    /// Integrate over the default reference cell
    ///
    /// The variables x_0, ..., x_{tdim-1} are the cell's coordinates; higher variables are
    /// taken to be zero.
    pub fn integrate(&self, cell: ReferenceCellType) -> Rational {
        let tdim = crate::reference_cell::dim(cell);
        let mut result = Rational::zero();
        for (m, c) in &self.terms {
            if m[tdim..].iter().any(|e| *e > 0) {
                continue;
            }
            result += c * integrate_monomial(cell, m);
        }
        result
    }
}

/// The integral of a monomial over a reference cell
fn integrate_monomial(cell: ReferenceCellType, m: &Monomial) -> Rational {
    let one = BigInt::one();
    match cell {
        ReferenceCellType::Point => Rational::one(),
        ReferenceCellType::Interval => rational(one, BigInt::from(m[0] + 1)),
        ReferenceCellType::Triangle => rational(
            factorial(m[0]) * factorial(m[1]),
            factorial(m[0] + m[1] + 2),
        ),
        ReferenceCellType::Tetrahedron => rational(
            factorial(m[0]) * factorial(m[1]) * factorial(m[2]),
            factorial(m[0] + m[1] + m[2] + 3),
        ),
        ReferenceCellType::Quadrilateral => rational(one, BigInt::from((m[0] + 1) * (m[1] + 1))),
        ReferenceCellType::Hexahedron => rational(
            one,
            BigInt::from((m[0] + 1) * (m[1] + 1) * (m[2] + 1)),
        ),
        ReferenceCellType::Prism => rational(
            factorial(m[0]) * factorial(m[1]),
            factorial(m[0] + m[1] + 2) * BigInt::from(m[2] + 1),
        ),
        ReferenceCellType::Pyramid => rational(
            factorial(m[2]) * factorial(m[0] + m[1] + 2),
            BigInt::from((m[0] + 1) * (m[1] + 1)) * factorial(m[0] + m[1] + m[2] + 3),
        ),
    }
}

/// Select a maximal linearly independent subset of a set of vector-valued polynomials
///
/// Returns the indices of the selected members, in increasing order.
pub fn independent_subset(set: &[Vec<Polynomial>]) -> Vec<usize> {
    let mut keys = BTreeSet::new();
    for f in set {
        for (component, p) in f.iter().enumerate() {
            for (m, _) in p.terms() {
                keys.insert((component, *m));
            }
        }
    }
    let keys = keys.into_iter().collect::<Vec<_>>();
    let rows = set
        .iter()
        .map(|f| {
            keys.iter()
                .map(|(component, m)| {
                    f.get(*component)
                        .map(|p| p.coefficient(m))
                        .unwrap_or_else(Rational::zero)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    independent_rows(&rows)
}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;
    fn add(self, other: &Polynomial) -> Polynomial {
        let mut result = self.clone();
        for (m, c) in &other.terms {
            result.add_term(*m, c.clone());
        }
        result
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;
    fn sub(self, other: &Polynomial) -> Polynomial {
        let mut result = self.clone();
        for (m, c) in &other.terms {
            result.add_term(*m, -c.clone());
        }
        result
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;
    fn mul(self, other: &Polynomial) -> Polynomial {
        let mut result = Polynomial::zero();
        for (m0, c0) in &self.terms {
            for (m1, c1) in &other.terms {
                result.add_term([m0[0] + m1[0], m0[1] + m1[1], m0[2] + m1[2]], c0 * c1);
            }
        }
        result
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;
    fn neg(self) -> Polynomial {
        Polynomial::from_terms(self.terms.iter().map(|(m, c)| (*m, -c.clone())))
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;
    fn neg(self) -> Polynomial {
        -&self
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait<Polynomial> for Polynomial {
            type Output = Polynomial;
            fn $method(self, other: Polynomial) -> Polynomial {
                <&Polynomial as $trait<&Polynomial>>::$method(&self, &other)
            }
        }
        impl $trait<&Polynomial> for Polynomial {
            type Output = Polynomial;
            fn $method(self, other: &Polynomial) -> Polynomial {
                <&Polynomial as $trait<&Polynomial>>::$method(&self, other)
            }
        }
        impl $trait<Polynomial> for &Polynomial {
            type Output = Polynomial;
            fn $method(self, other: Polynomial) -> Polynomial {
                <&Polynomial as $trait<&Polynomial>>::$method(self, &other)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Sum for Polynomial {
    fn sum<I: Iterator<Item = Polynomial>>(iter: I) -> Self {
        iter.fold(Polynomial::zero(), |acc, p| acc + p)
    }
}
