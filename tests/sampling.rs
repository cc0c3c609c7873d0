use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snoplus_style::Error;
use snoplus_style::models::{Expr1D, Expr2D, Function1D, Function2D, Histogram1D, Histogram2D};
use snoplus_style::stats;

fn gaussian() -> Function1D {
    Function1D::new(
        "f",
        Expr1D::Gaussian { amplitude: 1.0, mean: 0.0, sigma: 0.5 },
        0.0,
        1.0,
    )
    .unwrap()
}

#[test]
fn same_seed_same_histogram() {
    let fill = |seed| {
        let mut h = Histogram1D::new("h", 10, 0.0, 1.0).unwrap();
        h.fill_random(&gaussian(), 100, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        h.contents().to_vec()
    };
    assert_eq!(fill(4357), fill(4357));
    assert_ne!(fill(4357), fill(1));
}

#[test]
fn draws_follow_the_function() {
    let mut h = Histogram1D::new("h", 10, 0.0, 1.0).unwrap();
    h.fill_random(&gaussian(), 20_000, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
    let f = gaussian();
    let total = f.integral(0.0, 1.0);
    for i in 0..10 {
        let (lo, hi) = h.bin_edges(i);
        let expected = 20_000.0 * f.integral(lo, hi) / total;
        let got = h.contents()[i];
        assert!((got - expected).abs() < 5.0 * expected.sqrt() + 1.0, "bin {i}: {got} vs {expected}");
    }
    assert_eq!(h.underflow() + h.overflow(), 0.0);

    let s = stats::summarize(&h);
    assert_eq!(s.entries, 20_000);
    let mean = s.mean.unwrap();
    assert!(mean > 0.3 && mean < 0.5, "mean {mean}");
}

#[test]
fn function_that_is_zero_cannot_be_sampled() {
    let zero = Function1D::new("zero", Expr1D::Polynomial(vec![0.0]), 0.0, 1.0).unwrap();
    let mut h = Histogram1D::new("h", 5, 0.0, 1.0).unwrap();
    let err = h.fill_random(&zero, 10, &mut ChaCha8Rng::seed_from_u64(1)).unwrap_err();
    assert!(matches!(err, Error::Sampling(ref name, _) if name == "zero"));
    assert_eq!(h.entries(), 0);
}

#[test]
fn two_dimensional_draws_stay_in_domain() {
    let f2 = Function2D::new(
        "f2",
        Expr2D::polynomial(&[(1.0, 2, 0), (1.0, 0, 2)]).unwrap(),
        (-4.0, 4.0),
        (-4.0, 4.0),
    )
    .unwrap();
    assert_eq!(f2.expr().to_string(), "x^2+y^2");
    let mut h2 = Histogram2D::new("h2", 40, (-4.0, 4.0), 40, (-20.0, 20.0)).unwrap();
    h2.fill_random(&f2, 5000, &mut ChaCha8Rng::seed_from_u64(4357)).unwrap();
    assert_eq!(h2.entries(), 5000);
    assert_eq!(h2.out_of_range(), 0);
    assert!((h2.integral() - 5000.0).abs() < 1e-9);
    for ix in 0..40 {
        for iy in 0..40 {
            let ((_, _), (ylo, yhi)) = h2.bin_edges(ix, iy);
            if yhi <= -4.0 || ylo >= 4.0 {
                assert_eq!(h2.content(ix, iy), Some(0.0));
            }
        }
    }
}
