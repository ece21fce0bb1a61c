//! The strategies a **HypersphereSampler** dispatches to.
//!
//! - BoxRejectionSampler
//! - GaussianSampler
//! - InverseEqualAreaSampler
//! - SphericalAnglesSampler
//!
//! ## Box Rejection Sampler
//!
//! Draws candidates uniformly from the cube [-1,1]^D and keeps those
//! inside the unit ball. The fraction kept is the ratio of ball to
//! cube volume, π^(D/2) / (Γ(D/2 + 1) 2^D), which is π/4 for D = 2,
//! π/6 for D = 3 and falls below 10^-6 around D = 18. A retry cap
//! bounds the work spent on a single sample.
//!
//! ## Gaussian Sampler
//!
//! A vector of independent standard normal deviates is rotationally
//! symmetric, so normalizing it gives a uniform point on the sphere
//! in any dimension. This is the default strategy.
//!
//! ## Inverse Equal-Area Sampler
//!
//! On the 2-sphere the area between two heights is proportional to
//! their difference, so a uniform height and a uniform azimuth give a
//! uniform point. The point is built by mapping the height to a disc
//! radius and applying the inverse equal-area projection. Only D = 3
//! is supported.
//!
//! ## Spherical Angles Sampler
//!
//! Picks the polar and azimuthal angles uniformly. Because the area
//! element is sin(φ) dφ dθ, the points bunch up at both poles. The
//! strategy exists to make that bias visible in a density plot and
//! must not be used to produce uniform points.

pub mod boxrejection;
pub mod gaussian;
pub mod inverseequalarea;
pub mod sphericalangles;
