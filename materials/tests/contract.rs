//! Checks the sampling contract every scattering model must honour.

use float_cmp::*;
use materials::*;
use proptest::prelude::*;
use scatter::common::*;
use scatter::geometry::*;
use scatter::interaction::*;
use scatter::paramset::*;
use scatter::reflection::*;
use scatter::spectrum::*;
use std::sync::Arc;

fn reference_materials() -> Vec<ArcBSDF> {
    let mask_params = ParamSet::with_id("mask");
    vec![
        Arc::new(DiffuseBSDF::from(&ParamSet::with_id("diffuse"))),
        Arc::new(ConductorBSDF::from(&ParamSet::with_id("conductor"))),
        Arc::new(DielectricBSDF::from(&ParamSet::with_id("dielectric"))),
        Arc::new(PlasticBSDF::from(&ParamSet::with_id("plastic"))),
        Arc::new(NullBSDF::from(&ParamSet::with_id("null"))),
        Arc::new(MaskBSDF::from_params(
            &mask_params,
            Arc::new(PlasticBSDF::from(&ParamSet::with_id("nested"))),
        )),
    ]
}

fn smooth_materials() -> Vec<ArcBSDF> {
    vec![
        Arc::new(DiffuseBSDF::new("diffuse", Spectrum::new(0.8))),
        Arc::new(PlasticBSDF::new("plastic", Spectrum::new(0.5), Spectrum::new(0.25), 32.0)),
        Arc::new(PlasticBSDF::new("rough", Spectrum::new(0.1), Spectrum::new(0.9), 4.0)),
        Arc::new(MaskBSDF::new(
            "mask",
            0.6,
            Arc::new(PlasticBSDF::new("nested", Spectrum::new(0.5), Spectrum::new(0.5), 8.0)),
        )),
    ]
}

#[test]
fn compounds_are_unions_of_primitives() {
    assert_eq!(
        BSDFFlags::REFLECTION,
        BSDFFlags::DIFFUSE_REFLECTION
            | BSDFFlags::DELTA_REFLECTION
            | BSDFFlags::DELTA_1D_REFLECTION
            | BSDFFlags::GLOSSY_REFLECTION
    );
    assert_eq!(
        BSDFFlags::TRANSMISSION,
        BSDFFlags::DIFFUSE_TRANSMISSION
            | BSDFFlags::DELTA_TRANSMISSION
            | BSDFFlags::DELTA_1D_TRANSMISSION
            | BSDFFlags::GLOSSY_TRANSMISSION
            | BSDFFlags::NULL
    );
    assert_eq!(BSDFFlags::DIFFUSE, BSDFFlags::DIFFUSE_REFLECTION | BSDFFlags::DIFFUSE_TRANSMISSION);
    assert_eq!(BSDFFlags::GLOSSY, BSDFFlags::GLOSSY_REFLECTION | BSDFFlags::GLOSSY_TRANSMISSION);
    assert_eq!(BSDFFlags::SMOOTH, BSDFFlags::DIFFUSE | BSDFFlags::GLOSSY);
    assert_eq!(
        BSDFFlags::DELTA,
        BSDFFlags::NULL | BSDFFlags::DELTA_REFLECTION | BSDFFlags::DELTA_TRANSMISSION
    );
    assert_eq!(
        BSDFFlags::DELTA_1D,
        BSDFFlags::DELTA_1D_REFLECTION | BSDFFlags::DELTA_1D_TRANSMISSION
    );
    assert_eq!(
        BSDFFlags::ALL,
        BSDFFlags::DIFFUSE | BSDFFlags::GLOSSY | BSDFFlags::DELTA | BSDFFlags::DELTA_1D
    );
}

#[test]
fn has_flag_semantics() {
    let f1 = BSDFFlags::GLOSSY_REFLECTION;
    let f2 = BSDFFlags::DELTA_TRANSMISSION | BSDFFlags::NON_SYMMETRIC;
    assert!(has_flag(f1 | f2, f1));
    assert!(has_flag(f1 | f2, BSDFFlags::NON_SYMMETRIC));
    assert!(!has_flag(BSDFFlags::NONE, f1));
    assert!(!has_flag(BSDFFlags::NONE, BSDFFlags::ALL));
}

#[test]
fn reverse_toggles_mode() {
    let mut ctx = BSDFContext::default();
    assert_eq!(ctx.mode, TransportMode::Radiance);
    ctx.reverse();
    assert_eq!(ctx.mode, TransportMode::Importance);
    ctx.reverse();
    assert_eq!(ctx, BSDFContext::default());
}

#[test]
fn default_context_enables_every_component() {
    let ctx = BSDFContext::default();
    for bsdf in reference_materials() {
        for i in 0..bsdf.component_count() {
            assert!(ctx.is_enabled(bsdf.component_flags(i), i), "{} component {}", bsdf, i);
        }
    }
}

#[test]
fn diffuse_reflection_mask() {
    let ctx = BSDFContext::new(TransportMode::Radiance, BSDFFlags::DIFFUSE_REFLECTION, None);
    assert!(ctx.is_enabled(BSDFFlags::DIFFUSE_REFLECTION, 0));
    assert!(!ctx.is_enabled(BSDFFlags::GLOSSY_REFLECTION, 0));
    assert!(!ctx.is_enabled(BSDFFlags::DIFFUSE, 0));
}

#[test]
fn reference_sample_is_valid() {
    let _ = env_logger::builder().is_test(true).try_init();

    let si = SurfaceInteraction::from_local(Vector3f::new(0.0, 0.0, 1.0));
    for bsdf in reference_materials() {
        let (bs, w) = bsdf.sample(&BSDFContext::default(), &si, 0.3, &Point2f::new(0.5, 0.5), true);
        assert!(approx_eq!(f32, bs.wo.length(), 1.0, epsilon = 0.0001), "{}", bsdf);
        assert!(bs.pdf > 0.0, "{}", bsdf);
        assert!(!w.is_black(), "{}", bsdf);
        assert!(bs.sampled_component.is_some(), "{}", bsdf);
        let c = bs.sampled_component.unwrap_or_default();
        assert!(has_flag(bsdf.component_flags(c), bs.sampled_type), "{}", bsdf);
    }
}

#[test]
fn delta_only_eval_is_zero() {
    let delta: Vec<ArcBSDF> = vec![
        Arc::new(ConductorBSDF::new("conductor", Spectrum::ONE)),
        Arc::new(DielectricBSDF::new("dielectric", 1.5, Spectrum::ONE, Spectrum::ONE)),
        Arc::new(NullBSDF::new("null")),
    ];
    let contexts = [
        BSDFContext::default(),
        BSDFContext::with_mode(TransportMode::Importance),
        BSDFContext::new(TransportMode::Radiance, BSDFFlags::DELTA, None),
        BSDFContext::new(TransportMode::Radiance, BSDFFlags::ALL, Some(0)),
    ];
    let directions = [
        Vector3f::new(0.0, 0.0, 1.0),
        Vector3f::new(0.0, 0.0, -1.0),
        Vector3f::new(0.6, 0.0, 0.8),
        Vector3f::new(-0.6, 0.0, 0.8),
        Vector3f::new(0.0, 0.8, -0.6),
    ];
    for bsdf in delta.iter() {
        assert!(bsdf.flags().is_delta_only());
        for ctx in contexts.iter() {
            for wi in directions.iter() {
                let si = SurfaceInteraction::from_local(*wi);
                for wo in directions.iter() {
                    assert!(bsdf.eval(ctx, &si, wo, true).is_black(), "{}", bsdf);
                    assert_eq!(bsdf.pdf(ctx, &si, wo, true), 0.0, "{}", bsdf);
                }
            }
        }
    }
}

#[test]
fn diffuse_component_never_samples_glossy() {
    let bsdf = PlasticBSDF::new("plastic", Spectrum::new(0.5), Spectrum::new(0.5), 16.0);
    let ctx = BSDFContext::new(TransportMode::Radiance, BSDFFlags::ALL, Some(0));
    let si = SurfaceInteraction::from_local(Vector3f::new(0.2, -0.3, 0.93).normalize());
    for i in 0..64 {
        let u = (i as Float + 0.5) / 64.0;
        let (bs, w) = bsdf.sample(&ctx, &si, u, &Point2f::new(u, 1.0 - u), true);
        if !w.is_black() {
            assert!(!has_flag(bs.sampled_type, BSDFFlags::GLOSSY));
            assert_eq!(bs.sampled_component, Some(0));
        }
    }
}

#[test]
fn transport_mode_changes_refraction_weight() {
    let bsdf = DielectricBSDF::new("glass", 1.5, Spectrum::ONE, Spectrum::ONE);
    let si = SurfaceInteraction::from_local(Vector3f::new(0.0, 0.0, 1.0));
    let mut ctx = BSDFContext::new(TransportMode::Radiance, BSDFFlags::DELTA_TRANSMISSION, None);
    let (_, radiance) = bsdf.sample(&ctx, &si, 0.5, &Point2f::new(0.5, 0.5), true);
    ctx.reverse();
    let (_, importance) = bsdf.sample(&ctx, &si, 0.5, &Point2f::new(0.5, 0.5), true);
    assert!(approx_eq!(f32, radiance[0] * 2.25, importance[0], epsilon = 0.0001));
}

#[test]
fn batch_and_parallel_agree() {
    let bsdf = PlasticBSDF::new("plastic", Spectrum::new(0.5), Spectrum::new(0.25), 32.0);
    let ctx = BSDFContext::default();
    let n = 257;
    let si: Vec<SurfaceInteraction> = (0..n)
        .map(|i| {
            let phi = TWO_PI * i as Float / n as Float;
            SurfaceInteraction::from_local(Vector3f::new(0.5 * phi.cos(), 0.5 * phi.sin(), 0.8).normalize())
        })
        .collect();
    let s1: Vec<Float> = (0..n).map(|i| (i as Float * 0.618).fract()).collect();
    let s2: Vec<Point2f> = (0..n)
        .map(|i| Point2f::new((i as Float * 0.383).fract(), (i as Float * 0.137).fract()))
        .collect();
    let active: Vec<bool> = (0..n).map(|i| i % 5 != 0).collect();

    let sequential = sample_batch(&bsdf, &ctx, &si, &s1, &s2, &active);
    let parallel = sample_parallel(&bsdf, &ctx, &si, &s1, &s2, &active, 4, 16);
    assert_eq!(sequential, parallel);

    let wo: Vec<Vector3f> = sequential.iter().map(|(bs, _)| bs.wo).collect();
    let pdf = pdf_batch(&bsdf, &ctx, &si, &wo, &active);
    for i in 0..n {
        if !sequential[i].1.is_black() {
            assert!(approx_eq!(f32, pdf[i], sequential[i].0.pdf, epsilon = 0.0001));
        } else if !active[i] {
            assert_eq!(pdf[i], 0.0);
        }
    }
}

#[test]
fn masked_null_transmission() {
    let bsdf = MaskBSDF::new("leaf", 0.3, Arc::new(NullBSDF::new("inner")));
    let si = SurfaceInteraction::from_local(Vector3f::new(0.0, 0.0, 1.0));
    let tr = eval_tr_batch(&bsdf, &[si, si], &[true, false]);
    for c in 0..3 {
        assert!(approx_eq!(f32, tr[0][c], 1.0, epsilon = 0.00001));
    }
    assert!(tr[1].is_black());
}

#[test]
fn prepare_for_bsdf_only_when_needed() {
    let bsdf = DiffuseBSDF::new("diffuse", Spectrum::ONE);
    let mut si = SurfaceInteraction::from_local(Vector3f::new(0.0, 0.0, 1.0));
    let ray = Ray::new_with_differentials(
        Point3f::new(0.0, 0.0, 1.0),
        Vector3f::new(0.0, 0.0, -1.0),
        Float::INFINITY,
        RayDifferential {
            rx_origin: Point3f::new(0.1, 0.0, 1.0),
            ry_origin: Point3f::new(0.0, 0.1, 1.0),
            rx_direction: Vector3f::new(0.0, 0.0, -1.0),
            ry_direction: Vector3f::new(0.0, 0.0, -1.0),
        },
    );
    si.prepare_for_bsdf(&bsdf, &ray);
    assert!(!bsdf.needs_differentials());
    assert!(!si.has_uv_partials());
}

const COS_CELLS: usize = 400;
const PHI_CELLS: usize = 800;
const BINS: usize = 8;

/// Integrates `pdf` over the upper hemisphere with the midpoint rule in
/// (cos theta, phi) and returns the mass falling in each coarse bin.
fn pdf_histogram(bsdf: &ArcBSDF, ctx: &BSDFContext, si: &SurfaceInteraction) -> Vec<f64> {
    let mut bins = vec![0.0; BINS * BINS];
    let cell = (1.0 / COS_CELLS as f64) * (TWO_PI as f64 / PHI_CELLS as f64);
    for i in 0..COS_CELLS {
        let cos_theta = (i as Float + 0.5) / COS_CELLS as Float;
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        for j in 0..PHI_CELLS {
            let phi = (j as Float + 0.5) * TWO_PI / PHI_CELLS as Float;
            let wo = Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta);
            let pdf = bsdf.pdf(ctx, si, &wo, true) as f64;
            bins[(i * BINS / COS_CELLS) * BINS + j * BINS / PHI_CELLS] += pdf * cell;
        }
    }
    bins
}

/// Draws a stratified grid of samples and returns the fraction of smooth
/// samples with non-zero weight falling in each coarse bin.
fn sample_histogram(bsdf: &ArcBSDF, ctx: &BSDFContext, si: &SurfaceInteraction) -> Vec<f64> {
    const LOBE_STRATA: usize = 100;
    const DIRECTION_STRATA: usize = 48;

    let mut bins = vec![0.0; BINS * BINS];
    let total = (LOBE_STRATA * DIRECTION_STRATA * DIRECTION_STRATA) as f64;
    for k in 0..LOBE_STRATA {
        let s1 = (k as Float + 0.5) / LOBE_STRATA as Float;
        for a in 0..DIRECTION_STRATA {
            for b in 0..DIRECTION_STRATA {
                let u = Point2f::new(
                    (a as Float + 0.5) / DIRECTION_STRATA as Float,
                    (b as Float + 0.5) / DIRECTION_STRATA as Float,
                );
                let (bs, w) = bsdf.sample(ctx, si, s1, &u, true);
                if w.is_black() || !has_flag(bs.sampled_type, BSDFFlags::SMOOTH) {
                    continue;
                }
                let cos_bin = min((bs.wo.z * BINS as Float) as usize, BINS - 1);
                let mut phi = bs.wo.y.atan2(bs.wo.x);
                if phi < 0.0 {
                    phi += TWO_PI;
                }
                let phi_bin = min((phi / TWO_PI * BINS as Float) as usize, BINS - 1);
                bins[cos_bin * BINS + phi_bin] += 1.0 / total;
            }
        }
    }
    bins
}

#[test]
fn pdf_is_normalized() {
    let si = SurfaceInteraction::from_local(Vector3f::new(0.0, 0.0, 1.0));
    let ctx = BSDFContext::default();
    // The mask sends 40% of the samples through the null lobe, which has no
    // density over solid angle.
    let expected = [1.0, 1.0, 1.0, 0.6];
    for (bsdf, expected) in smooth_materials().iter().zip(expected) {
        let mass: f64 = pdf_histogram(bsdf, &ctx, &si).iter().sum();
        assert!(
            approx_eq!(f64, mass, expected, epsilon = 0.005),
            "{}: pdf integrates to {}",
            bsdf,
            mass
        );
    }

    let glossy = BSDFContext::new(TransportMode::Radiance, BSDFFlags::GLOSSY, None);
    let materials = smooth_materials();
    let mass: f64 = pdf_histogram(&materials[1], &glossy, &si).iter().sum();
    assert!(approx_eq!(f64, mass, 1.0, epsilon = 0.005), "glossy lobe integrates to {}", mass);
}

#[test]
fn sampled_directions_follow_pdf() {
    let incidences = [Vector3f::new(0.0, 0.0, 1.0), Vector3f::new(0.6, 0.0, 0.8)];
    for wi in incidences {
        let si = SurfaceInteraction::from_local(wi);
        for bsdf in smooth_materials() {
            for ctx in [
                BSDFContext::default(),
                BSDFContext::new(TransportMode::Importance, BSDFFlags::GLOSSY, None),
                BSDFContext::new(TransportMode::Radiance, BSDFFlags::ALL, Some(0)),
            ] {
                let expected = pdf_histogram(&bsdf, &ctx, &si);
                let observed = sample_histogram(&bsdf, &ctx, &si);
                let expected_mass: f64 = expected.iter().sum();
                let observed_mass: f64 = observed.iter().sum();
                assert!(expected_mass <= 1.005, "{}: pdf integrates to {}", bsdf, expected_mass);
                assert!(
                    approx_eq!(f64, expected_mass, observed_mass, epsilon = 0.01),
                    "{} ({}): pdf mass {} != sampled mass {}",
                    bsdf,
                    wi,
                    expected_mass,
                    observed_mass
                );
                for (bin, (e, o)) in expected.iter().zip(&observed).enumerate() {
                    assert!(
                        approx_eq!(f64, *e, *o, epsilon = 0.01),
                        "{} ({}): bin {} pdf mass {} != sampled mass {}",
                        bsdf,
                        wi,
                        bin,
                        e,
                        o
                    );
                }
            }
        }
    }
}

prop_compose! {
    fn incident()(x in -0.9..0.9f32, y in -0.9..0.9f32, z in 0.1..1.0f32) -> Vector3f {
        Vector3f::new(x, y, z).normalize()
    }
}

proptest! {
    #[test]
    fn sample_pdf_consistency(
        wi in incident(),
        s1 in 0.0..1.0f32,
        u in 0.0..1.0f32,
        v in 0.0..1.0f32,
    ) {
        let si = SurfaceInteraction::from_local(wi);
        for bsdf in smooth_materials() {
            for ctx in [
                BSDFContext::default(),
                BSDFContext::new(TransportMode::Importance, BSDFFlags::GLOSSY, None),
                BSDFContext::new(TransportMode::Radiance, BSDFFlags::ALL, Some(0)),
            ] {
                let (bs, w) = bsdf.sample(&ctx, &si, s1, &Point2f::new(u, v), true);
                if w.is_black() || !has_flag(bs.sampled_type, BSDFFlags::SMOOTH) {
                    continue;
                }
                let pdf = bsdf.pdf(&ctx, &si, &bs.wo, true);
                prop_assert!(
                    approx_eq!(f32, pdf, bs.pdf, epsilon = 0.0001, ulps = 16),
                    "{}: pdf {} != sampled pdf {}", bsdf, pdf, bs.pdf
                );
            }
        }
    }

    #[test]
    fn inactive_lane_is_inert(wi in incident(), s1 in 0.0..1.0f32) {
        let si = SurfaceInteraction::from_local(wi);
        for bsdf in reference_materials() {
            let ctx = BSDFContext::default();
            let (bs, w) = bsdf.sample(&ctx, &si, s1, &Point2f::new(0.5, 0.5), false);
            prop_assert_eq!(bs, BSDFSample::default());
            prop_assert!(w.is_black());
            prop_assert!(bsdf.eval(&ctx, &si, &wi, false).is_black());
            prop_assert_eq!(bsdf.pdf(&ctx, &si, &wi, false), 0.0);
            prop_assert!(bsdf.eval_tr(&si, false).is_black());
        }
    }
}
