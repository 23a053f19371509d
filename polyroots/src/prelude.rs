pub use crate::error::ParseCoefficientsError;
pub use crate::error::PlotError;
pub use crate::error::PolynomialError;
pub use crate::error::RootFindingError;
pub use crate::error::SolveError;
pub use crate::newton::NewtonApproximator;
pub use crate::newton::RoundingMode;
pub use crate::newton::approximate_root;
pub use crate::parse::parse_coefficients;
pub use crate::plot::Plot;
pub use crate::plot::PlotConfig;
pub use crate::polynomial::Polynomial;
pub use crate::solver::RootSolver;
pub use crate::solver::Solution;
pub use crate::solver::solve;
