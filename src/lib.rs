//! # hypersphere
//!
//! [Rust][rust] crate to draw points uniformly distributed on the
//! surface of the unit sphere in D dimensions and to check how
//! uniform they really are.
//!
//! Four sampling strategies are offered (see [samplers]):
//!
//! 1. box rejection, the classic "throw darts at a cube" method
//! 2. uniform spherical angles, which is **biased** and only kept to
//!    show the bias
//! 3. normalized Gaussian vectors, the default for every dimension
//! 4. the inverse equal-area construction, for D = 3 only
//!
//! Points on the 2-sphere are mapped onto a disc of radius 2 by the
//! Lambert azimuthal [equal-area projection][projection] and counted in
//! a [density histogram][histogram]. Because the projection preserves
//! area, a uniform sampler gives a flat histogram inside the disc.
//!
//! ```rust
//! use rs_hypersphere::core::rng::Rng;
//! use rs_hypersphere::core::sampler::{sample_unit_vector, Strategy};
//!
//!     let mut rng = Rng::with_seed(42);
//!     let v = sample_unit_vector(5, Strategy::GaussianNormalization, &mut rng).unwrap();
//!     assert!(v.is_unit(1.0e-9));
//! ```
//!
//! [rust]: https://www.rust-lang.org
//! [samplers]: samplers/index.html
//! [projection]: core/projection/index.html
//! [histogram]: core/histogram/index.html

#[macro_use]
extern crate impl_ops;

pub mod batchqueue;
pub mod core;
pub mod samplers;
