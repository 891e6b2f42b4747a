use crate::misc::FloatingPoint;

/// A closed interval `[lo, hi]` on one axis.
///
/// # Examples
/// ```
/// use orthant::prelude::Interval;
///
/// let i = Interval::new(0., 1.);
/// assert!(i.contains(0.) && i.contains(1.) && i.contains(0.5));
/// assert!(!i.contains(1. + 1e-9));
/// assert_eq!(i.distance_to(1.5), 0.5);
/// assert_eq!(i.distance_to(0.25), 0.);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T: FloatingPoint> {
    lo: T,
    hi: T,
}

impl<T: FloatingPoint> Interval<T> {
    pub fn new(lo: T, hi: T) -> Self {
        Self { lo, hi }
    }

    pub fn lo(&self) -> T {
        self.lo
    }

    pub fn hi(&self) -> T {
        self.hi
    }

    /// A valid interval has strictly positive width.
    pub fn is_valid(&self) -> bool {
        self.hi > self.lo
    }

    /// Closed containment: both endpoints belong to the interval.
    pub fn contains(&self, x: T) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// Zero inside the interval, otherwise the gap to the nearest endpoint.
    pub fn distance_to(&self, x: T) -> T {
        if self.contains(x) {
            T::zero()
        } else {
            (x - self.lo).abs().min((x - self.hi).abs())
        }
    }

    pub fn midpoint(&self) -> T {
        (self.lo + self.hi) * T::from_f64(0.5).unwrap()
    }

    /// The half `[lo, mid]` kept when bisecting.
    pub fn lower_half(&self) -> Self {
        Self::new(self.lo, self.midpoint())
    }

    /// The half `[mid, hi]` kept when bisecting.
    pub fn upper_half(&self) -> Self {
        Self::new(self.midpoint(), self.hi)
    }

    /// Clamp `x` into the interval. Identity for contained values.
    pub fn clamp(&self, x: T) -> T {
        if x < self.lo {
            self.lo
        } else if x > self.hi {
            self.hi
        } else {
            x
        }
    }

    /// The smallest interval covering both. Widens, never narrows.
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.lo.min(other.lo), self.hi.max(other.hi))
    }
}
