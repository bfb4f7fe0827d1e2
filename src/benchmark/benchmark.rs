use std::time::Instant;

use crate::error::SimResult;
use crate::simulation::forces::{AccelSet, Acceleration, NewtonianGravity};
use crate::simulation::integrator::{ExplicitEuler, Integrator, Rk4};
use crate::simulation::states::{NVec3, SystemState};

/// Helper to build a deterministic snapshot of size `n`
fn make_state(n: usize) -> SystemState {
    let positions = (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            NVec3::new(
                (i_f * 0.37).sin() * 5.0 + i_f * 1e-3,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            )
        })
        .collect();

    SystemState {
        t: 0.0,
        positions,
        velocities: vec![NVec3::zeros(); n],
        masses: vec![1.0; n],
    }
}

/// Time one direct-sum evaluation, sequential vs rayon rows
pub fn bench_gravity() -> SimResult<()> {
    // Different system sizes to test
    let ns = [200, 400, 800, 1600, 3200];

    for n in ns {
        let sys = make_state(n);
        let mut out = vec![NVec3::zeros(); n];

        let sequential = NewtonianGravity::new(0.1);
        let parallel = NewtonianGravity::new(0.1).parallel(true);

        // Warm up
        sequential.acceleration(&sys, &mut out)?;
        parallel.acceleration(&sys, &mut out)?;

        let t0 = Instant::now();
        sequential.acceleration(&sys, &mut out)?;
        let dt_seq = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        parallel.acceleration(&sys, &mut out)?;
        let dt_par = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, sequential = {:8.6} s, parallel = {:8.6} s", dt_seq, dt_par);
    }
    Ok(())
}

/// Time a few steps of each integrator for a range of n
/// Output is CSV so it can be pasted into a spreadsheet
pub fn bench_integrators() -> SimResult<()> {
    let steps = 3;
    let dt = 1e-3;

    println!("N,euler_ms,rk4_ms");

    for n in (200..=1600).step_by(200) {
        let template = make_state(n);
        let forces = AccelSet::new().with(NewtonianGravity::new(0.1).parallel(true));

        let euler_ms = time_steps(&ExplicitEuler, &template, &forces, dt, steps)?;
        let rk4_ms = time_steps(&Rk4, &template, &forces, dt, steps)?;

        println!("{},{:.6},{:.6}", n, euler_ms, rk4_ms);
    }
    Ok(())
}

/// Average wall time per step in milliseconds
fn time_steps(integrator: &dyn Integrator, template: &SystemState, forces: &AccelSet, dt: f64, steps: usize) -> SimResult<f64> {
    let mut state = template.clone();
    let t0 = Instant::now();
    for _ in 0..steps {
        state = integrator.step(dt, &state, forces)?;
    }
    Ok(t0.elapsed().as_secs_f64() * 1000.0 / steps as f64)
}
