/// Errors surfaced by 3D constructors and solvers.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    /// The system has no solution (e.g. a line parallel to, and off, a plane).
    #[error("no solution: {reason}")]
    NoSolution { reason: &'static str },
    /// The system is underdetermined (e.g. a line lying within a plane).
    #[error("infinite solutions: {reason}")]
    InfiniteSolutions { reason: &'static str },
    /// Input had the wrong number of components.
    #[error("input vector of length {found} does not have the expected length {expected}")]
    Shape { expected: usize, found: usize },
    /// Input is geometrically degenerate (zero direction, collinear points, ...).
    #[error("degenerate input: {reason}")]
    Degenerate { reason: &'static str },
}

impl GeomError {
    pub(crate) fn none(reason: &'static str) -> Self {
        Self::NoSolution { reason }
    }

    pub(crate) fn infinite(reason: &'static str) -> Self {
        Self::InfiniteSolutions { reason }
    }

    pub(crate) fn degenerate(reason: &'static str) -> Self {
        Self::Degenerate { reason }
    }
}
