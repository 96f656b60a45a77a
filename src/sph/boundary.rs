//! Collision response against static boundary segments.
//!
//! Particles are not prevented from entering walls by forces. Instead, after the solver moved them, every particle
//! whose motion during the tick crossed (or ended within one particle radius of) a wall is put back onto a line
//! offset by one particle radius from the wall and its velocity is reflected with damping.

use super::config::Restitution;
use super::dimension::Dimension;
use super::particlesystem::{Material, ParticleSystem};
use crate::units::*;
use microprofile::scope;
use cgmath::prelude::*;
use rayon::prelude::*;

/// Static wall between two points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundarySegment {
    pub start: Point,
    pub end: Point,
}

impl BoundarySegment {
    pub fn new(start: Point, end: Point) -> BoundarySegment {
        BoundarySegment { start, end }
    }
}

// 2D normal, rotated by 90° clockwise.
#[inline]
fn normal(direction: Vector) -> Vector {
    Vector::new(direction.y, -direction.x)
}

/// Velocity after bouncing off a wall.
///
/// `vn` is the velocity component along the wall normal, `vt` the tangential one.
/// The normal part is reversed and scaled by μ_n, the tangential part loses speed proportional to the normal impulse (Coulomb-like friction).
pub fn restitution_velocity(vn: Vector, vt: Vector, restitution: &Restitution) -> Vector {
    let vt_len = vt.magnitude();
    let vt = if vt_len > 0.0 {
        let a = 1.0 - restitution.tangential * (1.0 + restitution.normal) * vn.magnitude() / vt_len;
        a.max(0.0) * vt
    } else {
        vt
    };
    -restitution.normal * vn + vt
}

/// Tests the motion of a particle during a tick from `previous_position` to `position` against a single wall.
///
/// On collision, `position` is moved to the radius-offset wall line and `velocity` is reflected if it still points into the wall.
/// Returns true if the particle collided.
pub fn segment_collision(
    previous_position: Point,
    position: &mut Point,
    velocity: &mut Vector,
    segment: &BoundarySegment,
    particle_radius: Real,
    restitution: &Restitution,
) -> bool {
    let p1 = previous_position;
    let p2 = *position;
    let q1 = segment.start;

    let p12 = p2 - p1;
    let q12 = segment.end - q1;
    if p12.magnitude2() <= 0.0 || q12.magnitude2() <= 0.0 {
        return false;
    }
    let p12 = p12.normalize();
    let q12 = q12.normalize();

    let normal_p = normal(p12);
    let mut normal_q = normal(q12);

    // Does the motion end on the other side of the wall line or close to it?
    let pa = normal_q.dot(p1 - q1);
    let pb = normal_q.dot(p2 - q1);
    if pa * pb >= 0.0 && pb.abs() >= particle_radius {
        return false;
    }

    // Does the motion line pass between the wall's endpoints?
    let qa = normal_p.dot(q1 - p1);
    let qb = normal_p.dot(segment.end - p1);
    if qa * qb >= 0.0 {
        return false;
    }

    // Wall normal faces the side the particle came from.
    if pa < 0.0 {
        normal_q = -normal_q;
    }

    let offset_q1 = q1 + normal_q * particle_radius;
    let q1p2 = p2 - offset_q1;
    let q1p2_on_q12 = q1p2.dot(q12) * q12;
    *position = offset_q1 + q1p2_on_q12;

    let correction = q1p2_on_q12 - q1p2;
    let direction = if correction.magnitude2() > 0.0 { correction.normalize() } else { normal_q };
    let normal_velocity = velocity.dot(direction);
    if normal_velocity < 0.0 {
        let vn = normal_velocity * direction;
        let vt = *velocity - vn;
        *velocity = restitution_velocity(vn, vt, restitution);
    }

    true
}

/// Runs the collision response for every fluid particle against every boundary segment.
///
/// Segments are processed in order, so a particle hitting two walls in one tick (i.e. in a corner) is corrected twice,
/// with the result depending on the segment order.
/// Boundaries are line segments and therefore only handled for 2D simulations.
/// Returns the number of applied corrections.
pub fn enforce_boundary(particles: &mut ParticleSystem, restitution: &Restitution) -> usize {
    microprofile::scope!("Boundary", "enforce_boundary");
    if particles.dimension() != Dimension::Two || particles.boundary_segments.is_empty() {
        return 0;
    }

    let particle_radius = particles.particle_radius();
    let segments = &particles.boundary_segments;

    particles
        .positions
        .par_iter_mut()
        .zip(particles.velocities.par_iter_mut())
        .zip(particles.previous_positions.par_iter())
        .zip(particles.materials.par_iter())
        .map(|(((position, velocity), &previous_position), &material)| {
            if material != Material::Fluid {
                return 0;
            }
            segments
                .iter()
                .filter(|segment| segment_collision(previous_position, position, velocity, segment, particle_radius, restitution))
                .count()
        })
        .sum()
}
