use attnviz::encoding::{
    dot_product, encoding_matrix, encoding_value, similarity_matrix, wavelength,
};

#[test]
fn sin_cos_pairs_have_unit_norm() {
    // Each even/odd dimension pair is (sin, cos) of the same angle.
    for d_model in [6, 8, 64] {
        for pos in [0, 1, 7, 100] {
            for k in 0..d_model / 2 {
                let s = encoding_value(pos, 2 * k, d_model);
                let c = encoding_value(pos, 2 * k + 1, d_model);
                assert!(
                    (s * s + c * c - 1.0).abs() < 1e-5,
                    "pos {} pair {} d_model {}",
                    pos,
                    k,
                    d_model
                );
            }
        }
    }
}

#[test]
fn position_zero_alternates_zero_one() {
    let d_model = 8;
    for i in 0..d_model {
        let v = encoding_value(0, i, d_model);
        let expected = if i % 2 == 0 { 0.0 } else { 1.0 };
        assert!((v - expected).abs() < 1e-6);
    }
}

#[test]
fn matrix_has_expected_shape_and_values() {
    let m = encoding_matrix(4, 6);
    assert_eq!(m.rows, 4);
    assert_eq!(m.cols, 6);
    for pos in 0..4 {
        for i in 0..6 {
            assert_eq!(m.get(pos, i), encoding_value(pos, i, 6));
        }
    }
}

#[test]
fn odd_d_model_is_supported() {
    // The formulas do not require a power of two, or even an even width.
    let m = encoding_matrix(3, 7);
    assert_eq!(m.cols, 7);
    assert!(m.data.iter().all(|v| v.is_finite()));
}

#[test]
fn wavelength_is_non_decreasing() {
    for d_model in [8, 64, 512] {
        let mut prev = wavelength(0, d_model);
        for i in 1..d_model {
            let w = wavelength(i, d_model);
            assert!(w >= prev, "dim {} d_model {}", i, d_model);
            prev = w;
        }
    }
}

#[test]
fn lowest_dimension_wavelength_is_two_pi() {
    let w = wavelength(0, 64);
    assert!((w - 2.0 * std::f32::consts::PI).abs() < 1e-5);
}

#[test]
fn dot_product_is_symmetric() {
    for d_model in [8, 33, 64] {
        for (a, b) in [(0, 5), (3, 17), (10, 11)] {
            let ab = dot_product(a, b, d_model);
            let ba = dot_product(b, a, d_model);
            assert!((ab - ba).abs() < 1e-4, "{} {} d_model {}", a, b, d_model);
        }
    }
}

#[test]
fn self_similarity_is_maximal_on_samples() {
    let d_model = 64;
    for p in [0, 3, 9] {
        let own = dot_product(p, p, d_model);
        for q in 0..20 {
            if q == p {
                continue;
            }
            assert!(
                own >= dot_product(p, q, d_model),
                "self-similarity beaten at p={} q={}",
                p,
                q
            );
        }
    }
}

#[test]
fn self_similarity_equals_half_d_model() {
    // sin^2 + cos^2 over d/2 pairs sums to d/2.
    let d_model = 64;
    let own = dot_product(5, 5, d_model);
    assert!((own - 32.0).abs() < 1e-3);
}

#[test]
fn similarity_matrix_is_symmetric() {
    let sim = similarity_matrix(8, 32);
    assert_eq!(sim.rows, 8);
    assert_eq!(sim.cols, 8);
    for i in 0..8 {
        for j in 0..8 {
            assert!((sim.get(i, j) - sim.get(j, i)).abs() < 1e-4);
        }
    }
}
