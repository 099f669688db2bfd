//! Batch Evaluation
//!
//! Drives a scattering model over a batch of lanes where each lane carries
//! its own surface interaction, random samples and `active` predicate.
//! Inactive lanes never reach the model and yield the default result.

use super::*;
use crate::common::*;
use crate::geometry::*;
use crate::interaction::*;
use crate::spectrum::*;
use std::thread;

/// Samples a batch of lanes sequentially.
///
/// * `bsdf`    - The scattering model.
/// * `ctx`     - Query context shared by all lanes.
/// * `si`      - Surface interaction per lane.
/// * `sample1` - Component selection sample per lane.
/// * `sample2` - Direction sample per lane.
/// * `active`  - Live lanes.
pub fn sample_batch(
    bsdf: &dyn BSDF,
    ctx: &BSDFContext,
    si: &[SurfaceInteraction],
    sample1: &[Float],
    sample2: &[Point2f],
    active: &[bool],
) -> Vec<(BSDFSample, Spectrum)> {
    let n = check_lanes(si.len(), active.len());
    assert_eq!(n, sample1.len(), "sample1 has {} lanes, expected {}", sample1.len(), n);
    assert_eq!(n, sample2.len(), "sample2 has {} lanes, expected {}", sample2.len(), n);

    (0..n)
        .map(|i| sample_lane(bsdf, ctx, &si[i], sample1[i], &sample2[i], active[i]))
        .collect()
}

/// Evaluates a batch of lanes sequentially.
///
/// * `bsdf`   - The scattering model.
/// * `ctx`    - Query context shared by all lanes.
/// * `si`     - Surface interaction per lane.
/// * `wo`     - Outgoing direction per lane.
/// * `active` - Live lanes.
pub fn eval_batch(
    bsdf: &dyn BSDF,
    ctx: &BSDFContext,
    si: &[SurfaceInteraction],
    wo: &[Vector3f],
    active: &[bool],
) -> Vec<Spectrum> {
    let n = check_lanes(si.len(), active.len());
    assert_eq!(n, wo.len(), "wo has {} lanes, expected {}", wo.len(), n);

    (0..n)
        .map(|i| {
            if active[i] {
                bsdf.eval(ctx, &si[i], &wo[i], true)
            } else {
                Spectrum::ZERO
            }
        })
        .collect()
}

/// Returns the densities of a batch of lanes.
///
/// * `bsdf`   - The scattering model.
/// * `ctx`    - Query context shared by all lanes.
/// * `si`     - Surface interaction per lane.
/// * `wo`     - Outgoing direction per lane.
/// * `active` - Live lanes.
pub fn pdf_batch(
    bsdf: &dyn BSDF,
    ctx: &BSDFContext,
    si: &[SurfaceInteraction],
    wo: &[Vector3f],
    active: &[bool],
) -> Vec<Float> {
    let n = check_lanes(si.len(), active.len());
    assert_eq!(n, wo.len(), "wo has {} lanes, expected {}", wo.len(), n);

    (0..n)
        .map(|i| if active[i] { bsdf.pdf(ctx, &si[i], &wo[i], true) } else { 0.0 })
        .collect()
}

/// Returns the null-lobe transmission of a batch of lanes.
///
/// * `bsdf`   - The scattering model.
/// * `si`     - Surface interaction per lane.
/// * `active` - Live lanes.
pub fn eval_tr_batch(bsdf: &dyn BSDF, si: &[SurfaceInteraction], active: &[bool]) -> Vec<Spectrum> {
    let n = check_lanes(si.len(), active.len());

    (0..n)
        .map(|i| if active[i] { bsdf.eval_tr(&si[i], true) } else { Spectrum::ZERO })
        .collect()
}

/// Samples a batch of lanes on worker threads. Lanes are handed out in chunks
/// and the results are returned in lane order.
///
/// * `bsdf`       - The scattering model.
/// * `ctx`        - Query context shared by all lanes.
/// * `si`         - Surface interaction per lane.
/// * `sample1`    - Component selection sample per lane.
/// * `sample2`    - Direction sample per lane.
/// * `active`     - Live lanes.
/// * `n_threads`  - Number of worker threads.
/// * `chunk_size` - Number of lanes per work item.
#[allow(clippy::too_many_arguments)]
pub fn sample_parallel(
    bsdf: &dyn BSDF,
    ctx: &BSDFContext,
    si: &[SurfaceInteraction],
    sample1: &[Float],
    sample2: &[Point2f],
    active: &[bool],
    n_threads: usize,
    chunk_size: usize,
) -> Vec<(BSDFSample, Spectrum)> {
    let n = check_lanes(si.len(), active.len());
    assert_eq!(n, sample1.len(), "sample1 has {} lanes, expected {}", sample1.len(), n);
    assert_eq!(n, sample2.len(), "sample2 has {} lanes, expected {}", sample2.len(), n);

    let n_threads = n_threads.max(1);
    let chunk_size = chunk_size.max(1);
    let mut results = vec![(BSDFSample::default(), Spectrum::ZERO); n];
    let out = &mut results;

    thread::scope(|scope| {
        let (tx_collector, rx_collector) =
            crossbeam_channel::bounded::<(usize, Vec<(BSDFSample, Spectrum)>)>(n_threads);
        let (tx_worker, rx_worker) = crossbeam_channel::bounded::<usize>(n_threads);

        // Spawn collector thread.
        scope.spawn(move || {
            for (start, chunk) in rx_collector.iter() {
                out[start..start + chunk.len()].copy_from_slice(&chunk);
            }
        });

        // Spawn worker threads.
        for _ in 0..n_threads {
            let rx_worker = rx_worker.clone();
            let tx_collector = tx_collector.clone();
            scope.spawn(move || {
                for start in rx_worker.iter() {
                    let end = (start + chunk_size).min(n);
                    let chunk: Vec<(BSDFSample, Spectrum)> = (start..end)
                        .map(|i| sample_lane(bsdf, ctx, &si[i], sample1[i], &sample2[i], active[i]))
                        .collect();
                    if tx_collector.send((start, chunk)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(rx_worker); // Drop extra since we've cloned one for each worker.
        drop(tx_collector);

        // Send work.
        for start in (0..n).step_by(chunk_size) {
            if tx_worker.send(start).is_err() {
                error!("Batch workers exited before lane {} was dispatched", start);
                break;
            }
        }
    });

    results
}

/// Samples a single lane.
#[inline]
fn sample_lane(
    bsdf: &dyn BSDF,
    ctx: &BSDFContext,
    si: &SurfaceInteraction,
    sample1: Float,
    sample2: &Point2f,
    active: bool,
) -> (BSDFSample, Spectrum) {
    if active {
        bsdf.sample(ctx, si, sample1, sample2, true)
    } else {
        (BSDFSample::default(), Spectrum::ZERO)
    }
}

/// Returns the lane count after checking the predicate covers every lane.
fn check_lanes(n: usize, n_active: usize) -> usize {
    assert_eq!(n, n_active, "active has {} lanes, expected {}", n_active, n);
    n
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
