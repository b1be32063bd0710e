use crate::core::PhysicsError;
use crate::rigid_body_system::StepReport;
use crate::systems::contact::Contact;

use super::{PerfTimer, WorldCore};

pub(super) fn step(world: &mut WorldCore, contacts: &[Contact], dt: f32) -> Result<StepReport, PhysicsError> {
    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    let saved_forces = world.rigid_bodies.accumulators();

    // === EXTERNAL ACCELERATIONS ===
    // Only accumulates force; velocities change when bodies integrate
    world.rigid_bodies.apply_gravity();

    // === RIGID BODY PHYSICS ===
    // resolve velocities -> correct positions -> integrate
    let (result, solve_ms) =
        PerfTimer::measure(perf_on, || world.rigid_bodies.step(contacts, dt));

    let report = match result {
        Ok(report) => report,
        Err(err) => {
            tracing::warn!(frame = world.frame, contacts = contacts.len(), %err, "step rejected");
            // Back to the caller's forces, without this step's gravity
            world.rigid_bodies.restore_accumulators(&saved_forces);
            return Err(err);
        }
    };

    if perf_on {
        let stats = &mut world.perf_stats;
        stats.solve_ms = solve_ms;
        stats.contacts = report.resolve.contacts;
        stats.separating = report.resolve.separating;
        stats.impulses_applied = report.resolve.impulses_applied;
        stats.friction_clamped = report.resolve.friction_clamped;
        stats.total_normal_impulse = report.resolve.total_normal_impulse;
        stats.within_slop = report.correction.within_slop;
        stats.max_depth = report.correction.max_depth;
        stats.integrated = report.integrated;
        stats.bodies = world.rigid_bodies.body_count() as u32;
        stats.kinetic_energy = world
            .rigid_bodies
            .bodies()
            .iter()
            .map(|b| b.kinetic_energy())
            .sum();
        if let Some(start) = step_start {
            stats.step_ms = start.elapsed_ms();
        }
    }

    world.frame += 1;
    Ok(report)
}
