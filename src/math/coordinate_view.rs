use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use super::{Point2, Point3, Vector2, Vector3};

/// Read access to the Cartesian coordinates of a fixed-size entity.
pub trait Cartesian {
    /// Scalar type of a single coordinate.
    type Scalar: Copy;

    /// Number of coordinates (2 or 3 for the kernel's entities).
    fn dimension(&self) -> usize;

    /// Returns the coordinate at `index` (0-based).
    ///
    /// Callers must keep `index < self.dimension()`.
    fn cartesian(&self, index: usize) -> Self::Scalar;
}

impl<T, const D: usize> Cartesian for nalgebra::Point<T, D>
where
    T: nalgebra::Scalar + Copy,
{
    type Scalar = T;

    fn dimension(&self) -> usize {
        D
    }

    fn cartesian(&self, index: usize) -> T {
        self[index]
    }
}

impl<T, const D: usize> Cartesian for nalgebra::SVector<T, D>
where
    T: nalgebra::Scalar + Copy,
{
    type Scalar = T;

    fn dimension(&self) -> usize {
        D
    }

    fn cartesian(&self, index: usize) -> T {
        self[index]
    }
}

/// The entity a [`CoordinateView`] reads from: a point or a free vector.
pub enum Entity<'a, P, V> {
    Point(&'a P),
    Vector(&'a V),
}

impl<P, V> Clone for Entity<'_, P, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, V> Copy for Entity<'_, P, V> {}

impl<P, V> Entity<'_, P, V> {
    /// Returns whether both entities are the same instance with the same kind.
    fn same_instance(self, other: Self) -> bool {
        match (self, other) {
            (Entity::Point(a), Entity::Point(b)) => std::ptr::eq(a, b),
            (Entity::Vector(a), Entity::Vector(b)) => std::ptr::eq(a, b),
            _ => false,
        }
    }
}

/// Random-access, read-only cursor over the coordinates of a point or a vector.
///
/// The view borrows the entity and never copies it. Index arithmetic never
/// touches the entity; only [`get`](Self::get) and its variants read from it.
/// Two views are equal iff they refer to the same entity instance and sit on
/// the same index. Ordering and differences are only meaningful between views
/// over the same entity.
pub struct CoordinateView<'a, P, V> {
    entity: Entity<'a, P, V>,
    index: isize,
}

/// Coordinate view over 2D kernel points and vectors.
pub type CoordinateView2<'a> = CoordinateView<'a, Point2, Vector2>;

/// Coordinate view over 3D kernel points and vectors.
pub type CoordinateView3<'a> = CoordinateView<'a, Point3, Vector3>;

impl<P, V> Clone for CoordinateView<'_, P, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, V> Copy for CoordinateView<'_, P, V> {}

impl<P, V> fmt::Debug for CoordinateView<'_, P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, addr): (&str, *const ()) = match self.entity {
            Entity::Point(p) => ("point", std::ptr::from_ref(p).cast()),
            Entity::Vector(v) => ("vector", std::ptr::from_ref(v).cast()),
        };
        f.debug_struct("CoordinateView")
            .field("kind", &kind)
            .field("entity", &addr)
            .field("index", &self.index)
            .finish()
    }
}

impl<'a, P, V> CoordinateView<'a, P, V>
where
    P: Cartesian,
    V: Cartesian<Scalar = P::Scalar>,
{
    /// Creates a view over the coordinates of a point, starting at index 0.
    #[must_use]
    pub fn point(point: &'a P) -> Self {
        Self::point_at(point, 0)
    }

    /// Creates a view over the coordinates of a point, starting at `index`.
    #[must_use]
    pub fn point_at(point: &'a P, index: isize) -> Self {
        Self {
            entity: Entity::Point(point),
            index,
        }
    }

    /// Creates a view over the coordinates of a vector, starting at index 0.
    #[must_use]
    pub fn vector(vector: &'a V) -> Self {
        Self::vector_at(vector, 0)
    }

    /// Creates a view over the coordinates of a vector, starting at `index`.
    #[must_use]
    pub fn vector_at(vector: &'a V, index: isize) -> Self {
        Self {
            entity: Entity::Vector(vector),
            index,
        }
    }

    /// Returns the referenced entity.
    #[must_use]
    pub fn entity(&self) -> Entity<'a, P, V> {
        self.entity
    }

    /// Returns the current coordinate index.
    #[must_use]
    pub fn index(&self) -> isize {
        self.index
    }

    /// Returns whether the view reads from a point.
    #[must_use]
    pub fn is_point(&self) -> bool {
        matches!(self.entity, Entity::Point(_))
    }

    /// Returns whether the view reads from a vector.
    #[must_use]
    pub fn is_vector(&self) -> bool {
        matches!(self.entity, Entity::Vector(_))
    }

    /// Returns the dimension of the referenced entity.
    #[must_use]
    pub fn dimension(&self) -> usize {
        match self.entity {
            Entity::Point(p) => p.dimension(),
            Entity::Vector(v) => v.dimension(),
        }
    }

    /// Returns the coordinate at the current index.
    ///
    /// # Panics
    ///
    /// Panics if the index is outside `0..dimension`, like slice indexing.
    #[must_use]
    pub fn get(&self) -> P::Scalar {
        match self.try_get() {
            Some(value) => value,
            None => panic!(
                "coordinate index {} out of range for dimension {}",
                self.index,
                self.dimension()
            ),
        }
    }

    /// Returns the coordinate at the current index, or `None` if out of range.
    #[must_use]
    pub fn try_get(&self) -> Option<P::Scalar> {
        let index = usize::try_from(self.index).ok()?;
        if index >= self.dimension() {
            return None;
        }
        Some(self.read(index))
    }

    /// Returns the coordinate at the current index taken modulo the dimension.
    #[must_use]
    pub fn get_cyclic(&self) -> P::Scalar {
        let dim = self.dimension();
        // Dimension is 2 or 3, the cast cannot truncate.
        #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
        let index = self.index.rem_euclid(dim as isize) as usize;
        self.read(index)
    }

    /// Returns the coordinate `offset` positions away from the current index.
    ///
    /// # Panics
    ///
    /// Panics if the resulting index is out of range.
    #[must_use]
    pub fn at(&self, offset: isize) -> P::Scalar {
        (*self + offset).get()
    }

    /// Moves the view forward by `n` coordinates.
    pub fn advance(&mut self, n: isize) -> &mut Self {
        self.index += n;
        self
    }

    /// Moves the view backward by `n` coordinates.
    pub fn retreat(&mut self, n: isize) -> &mut Self {
        self.index -= n;
        self
    }

    /// Pre-increment: moves forward by one and returns the moved view.
    pub fn increment(&mut self) -> &mut Self {
        self.advance(1)
    }

    /// Pre-decrement: moves backward by one and returns the moved view.
    pub fn decrement(&mut self) -> &mut Self {
        self.retreat(1)
    }

    /// Post-increment: moves forward by one and returns the previous view.
    pub fn post_increment(&mut self) -> Self {
        let previous = *self;
        self.advance(1);
        previous
    }

    /// Post-decrement: moves backward by one and returns the previous view.
    pub fn post_decrement(&mut self) -> Self {
        let previous = *self;
        self.retreat(1);
        previous
    }

    /// Index difference `self - other`.
    ///
    /// Both views must refer to the same entity instance; violating this is a
    /// caller error checked in debug builds only.
    #[must_use]
    pub fn difference(&self, other: &Self) -> isize {
        debug_assert!(
            self.entity.same_instance(other.entity),
            "difference between coordinate views over different entities"
        );
        self.index - other.index
    }

    /// Returns an iterator over the coordinates from the current index to the end.
    #[must_use]
    pub fn coordinates(self) -> Coordinates<'a, P, V> {
        let dim = self.dimension();
        #[allow(clippy::cast_possible_wrap)]
        let end = dim as isize;
        let front = Self {
            entity: self.entity,
            index: self.index.clamp(0, end),
        };
        let back = Self {
            entity: self.entity,
            index: end,
        };
        Coordinates { front, back }
    }

    fn read(&self, index: usize) -> P::Scalar {
        match self.entity {
            Entity::Point(p) => p.cartesian(index),
            Entity::Vector(v) => v.cartesian(index),
        }
    }
}

impl<P, V> PartialEq for CoordinateView<'_, P, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entity.same_instance(other.entity) && self.index == other.index
    }
}

impl<P, V> Eq for CoordinateView<'_, P, V> {}

impl<P, V> PartialOrd for CoordinateView<'_, P, V>
where
    P: Cartesian,
    V: Cartesian<Scalar = P::Scalar>,
{
    /// Views over different entities are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.entity.same_instance(other.entity) {
            return None;
        }
        Some(self.difference(other).cmp(&0))
    }
}

impl<P, V> Add<isize> for CoordinateView<'_, P, V> {
    type Output = Self;

    fn add(mut self, rhs: isize) -> Self {
        self += rhs;
        self
    }
}

impl<P, V> AddAssign<isize> for CoordinateView<'_, P, V> {
    fn add_assign(&mut self, rhs: isize) {
        self.index += rhs;
    }
}

impl<P, V> Sub<isize> for CoordinateView<'_, P, V> {
    type Output = Self;

    fn sub(mut self, rhs: isize) -> Self {
        self -= rhs;
        self
    }
}

impl<P, V> SubAssign<isize> for CoordinateView<'_, P, V> {
    fn sub_assign(&mut self, rhs: isize) {
        self.index -= rhs;
    }
}

impl<P, V> Sub for CoordinateView<'_, P, V>
where
    P: Cartesian,
    V: Cartesian<Scalar = P::Scalar>,
{
    type Output = isize;

    fn sub(self, rhs: Self) -> isize {
        self.difference(&rhs)
    }
}

/// Iterator over the coordinates between two views of the same entity.
#[derive(Debug, Clone)]
pub struct Coordinates<'a, P, V> {
    front: CoordinateView<'a, P, V>,
    back: CoordinateView<'a, P, V>,
}

impl<P, V> Iterator for Coordinates<'_, P, V>
where
    P: Cartesian,
    V: Cartesian<Scalar = P::Scalar>,
{
    type Item = P::Scalar;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let value = self.front.get();
        self.front.increment();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.back - self.front).unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl<P, V> DoubleEndedIterator for Coordinates<'_, P, V>
where
    P: Cartesian,
    V: Cartesian<Scalar = P::Scalar>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back.decrement();
        Some(self.back.get())
    }
}

impl<P, V> ExactSizeIterator for Coordinates<'_, P, V>
where
    P: Cartesian,
    V: Cartesian<Scalar = P::Scalar>,
{
}
