use rs_hypersphere::core::geometry::{DiscPoint, Vector3f};
use rs_hypersphere::core::histogram::{Extent, HistogramConfig, HistogramGrid, OutOfRange};
use rs_hypersphere::core::hypersphere::{Float, DEFAULT_TOLERANCE};
use rs_hypersphere::core::projection::EqualAreaProjection;
use rs_hypersphere::core::rng::Rng;
use rs_hypersphere::core::sampler::{HypersphereSampler, SampleCounts, SamplerConfig, Strategy};
use proptest::prelude::*;

const EPSILON: Float = 1.0e-9;
/// Largest disc radius (and smallest 1 - z) the round trips cover.
const RIM_GAP: Float = 1.0e-6;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10_000))]

    #[test]
    fn prop_forward_inverts_inverse(
        r in 0.0f64..(2.0 - RIM_GAP),
        theta in 0.0f64..std::f64::consts::TAU
    ) {
        let projection = EqualAreaProjection::default();
        let p = DiscPoint { x: r * theta.cos(), y: r * theta.sin() };
        let v = projection.inverse(&p).unwrap();
        prop_assert!((v.length() - 1.0).abs() < EPSILON);
        let q = projection.forward(&v).unwrap();
        prop_assert!((q.x - p.x).abs() < EPSILON, "{:?} -> {:?}", p, q);
        prop_assert!((q.y - p.y).abs() < EPSILON, "{:?} -> {:?}", p, q);
    }

    #[test]
    fn prop_inverse_inverts_forward(
        gap in RIM_GAP..2.0f64,
        theta in 0.0f64..std::f64::consts::TAU
    ) {
        let projection = EqualAreaProjection::default();
        // (1 - z)(1 + z) keeps its precision next to the north pole
        let z = 1.0 - gap;
        let s = ((1.0 - z) * (1.0 + z)).sqrt();
        let v = Vector3f { x: s * theta.cos(), y: s * theta.sin(), z };
        let p = projection.forward(&v).unwrap();
        prop_assert!(p.radius() <= 2.0 + EPSILON);
        let w = projection.inverse(&p).unwrap();
        prop_assert!((w - v).length() < EPSILON, "{:?} -> {:?}", v, w);
    }
}

proptest! {
    #[test]
    fn prop_samples_have_unit_length(
        dimension in 2usize..12,
        seed in any::<u64>(),
        gaussian in any::<bool>()
    ) {
        let strategy = if gaussian {
            Strategy::GaussianNormalization
        } else {
            Strategy::BoxRejection
        };
        let sampler = HypersphereSampler::create(&SamplerConfig::new(strategy, dimension)).unwrap();
        let mut rng = Rng::with_seed(seed);
        let mut counts = SampleCounts::default();
        let cloud = sampler.sample_cloud(20, &mut rng, &mut counts).unwrap();
        prop_assert_eq!(cloud.dimension(), dimension);
        prop_assert_eq!(counts.accepted, 20);
        for v in &cloud {
            prop_assert!(v.is_unit(DEFAULT_TOLERANCE));
        }
    }

    #[test]
    fn prop_histogram_accounts_for_every_point(
        bins_x in 1usize..20,
        bins_y in 1usize..20,
        half_width in 0.1f64..3.0,
        clamp in any::<bool>(),
        coords in prop::collection::vec((-4.0f64..4.0, -4.0f64..4.0), 0..200)
    ) {
        let policy = if clamp { OutOfRange::Clamp } else { OutOfRange::Drop };
        let config = HistogramConfig::new(bins_x, bins_y, Extent::square(half_width), policy);
        let points: Vec<DiscPoint> = coords.iter().map(|&(x, y)| DiscPoint { x, y }).collect();
        let grid = HistogramGrid::build(&points, &config).unwrap();
        prop_assert_eq!(grid.total() + grid.dropped(), points.len() as u64);
        let inside = points.iter().filter(|p| config.extent.contains(p)).count() as u64;
        if clamp {
            prop_assert_eq!(grid.dropped(), 0);
        } else {
            prop_assert_eq!(grid.total(), inside);
        }
        // identical input gives an identical grid
        prop_assert_eq!(grid, HistogramGrid::build(&points, &config).unwrap());
    }
}
