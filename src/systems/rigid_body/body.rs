use crate::core::PhysicsError;

use super::vec2::Vec2;

/// Rigid Body - moves as a single unit
///
/// The shape is a list of sample points stored as offsets from the center of
/// mass. `pos` is the world-space center of mass, so every offset rotated by
/// `angle` and added to `pos` gives a world vertex.
#[derive(Clone, Debug)]
pub struct RigidBody {
    // === Physics State ===
    /// World position (center of mass)
    pub pos: Vec2,
    /// Velocity vector (simulation units per second)
    pub velocity: Vec2,
    /// Rotation angle (radians)
    pub angle: f32,
    /// Angular velocity, always `inverse_inertia * angular_momentum`
    angular_vel: f32,
    angular_momentum: f32,
    /// Accumulated force for the current step
    force: Vec2,
    /// Accumulated torque for the current step
    torque: f32,

    // === Mass Properties (fixed after construction) ===
    /// Total mass (sum of sample masses), 0 for static bodies
    mass: f32,
    inverse_mass: f32,
    /// Moment of inertia about the center of mass (I = Σ m*r²)
    inertia: f32,
    inverse_inertia: f32,
    /// Center of mass relative to the construction origin
    center_of_mass: Vec2,

    // === Shape Definition ===
    /// Sample points relative to the center of mass (local coords)
    offsets: Vec<Vec2>,

    /// Is body active (simulated)?
    pub active: bool,
    /// Unique ID for this body (assigned by the system)
    pub id: u32,
}

impl RigidBody {
    /// Build a dynamic body from `(offset from position, mass)` samples.
    ///
    /// Total mass, center of mass and inertia all follow from the samples.
    /// A single sample (or all samples at one point) gives zero inertia; such
    /// a body gets inverse inertia 0 and never rotates.
    pub fn from_samples(position: Vec2, samples: &[(Vec2, f32)]) -> Result<Self, PhysicsError> {
        if samples.is_empty() {
            return Err(PhysicsError::EmptyShape);
        }

        if let Some(&(_, m)) = samples.iter().find(|&&(_, m)| !(m.is_finite() && m >= 0.0)) {
            return Err(PhysicsError::InvalidMass { mass: m });
        }

        let mass: f32 = samples.iter().map(|&(_, m)| m).sum();
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidMass { mass });
        }

        let weighted = samples
            .iter()
            .fold(Vec2::zero(), |acc, &(p, m)| acc + p * m);
        let center_of_mass = weighted / mass;

        let mut offsets = Vec::with_capacity(samples.len());
        let mut inertia = 0.0f32;
        for &(p, m) in samples {
            let offset = p - center_of_mass;
            inertia += m * offset.length_squared();
            offsets.push(offset);
        }

        let inverse_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };

        Ok(Self {
            pos: position + center_of_mass,
            velocity: Vec2::zero(),
            angle: 0.0,
            angular_vel: 0.0,
            angular_momentum: 0.0,
            force: Vec2::zero(),
            torque: 0.0,
            mass,
            inverse_mass: 1.0 / mass,
            inertia,
            inverse_inertia,
            center_of_mass,
            offsets,
            active: true,
            id: 0,
        })
    }

    /// Create an immovable body (inverse mass and inverse inertia are 0).
    ///
    /// `outline` is relative to `position` and only used for rendering and
    /// contact offsets.
    pub fn new_static(position: Vec2, outline: Vec<Vec2>) -> Self {
        Self {
            pos: position,
            velocity: Vec2::zero(),
            angle: 0.0,
            angular_vel: 0.0,
            angular_momentum: 0.0,
            force: Vec2::zero(),
            torque: 0.0,
            mass: 0.0,
            inverse_mass: 0.0,
            inertia: 0.0,
            inverse_inertia: 0.0,
            center_of_mass: Vec2::zero(),
            offsets: outline,
            active: true,
            id: 0,
        }
    }

    /// Create a box with its mass split evenly over the four corners
    pub fn rectangle(center: Vec2, size: Vec2, mass: f32) -> Result<Self, PhysicsError> {
        Self::polygon(center, &rect_corners(size), mass)
    }

    /// Create a circle approximated by a regular polygon
    pub fn circle(center: Vec2, radius: f32, segments: usize, mass: f32) -> Result<Self, PhysicsError> {
        Self::polygon(center, &circle_points(radius, segments), mass)
    }

    /// Create a polygon body; `mass` is split evenly over the vertices
    pub fn polygon(center: Vec2, vertices: &[Vec2], mass: f32) -> Result<Self, PhysicsError> {
        if vertices.is_empty() {
            return Err(PhysicsError::EmptyShape);
        }
        let per_vertex = mass / vertices.len() as f32;
        let samples: Vec<(Vec2, f32)> = vertices.iter().map(|&v| (v, per_vertex)).collect();
        Self::from_samples(center, &samples)
    }

    pub fn static_rectangle(center: Vec2, size: Vec2) -> Self {
        Self::new_static(center, rect_corners(size).to_vec())
    }

    /// Static segment from `start` to `end` (positioned at its midpoint)
    pub fn static_line(start: Vec2, end: Vec2) -> Self {
        let mid = (start + end) * 0.5;
        Self::new_static(mid, vec![start - mid, end - mid])
    }

    // === Queries ===

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    pub fn inverse_inertia(&self) -> f32 {
        self.inverse_inertia
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_vel
    }

    pub fn angular_momentum(&self) -> f32 {
        self.angular_momentum
    }

    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn torque(&self) -> f32 {
        self.torque
    }

    /// Center of mass relative to the origin the samples were given in
    pub fn center_of_mass(&self) -> Vec2 {
        self.center_of_mass
    }

    /// Sample offsets from the center of mass (body-local)
    pub fn offsets(&self) -> &[Vec2] {
        &self.offsets
    }

    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0 && self.inverse_inertia == 0.0
    }

    /// Transform a body-local offset into world coordinates
    #[inline]
    pub fn local_to_world(&self, offset: Vec2) -> Vec2 {
        self.pos + offset.rotate(self.angle)
    }

    /// Velocity of the material point at world-space `offset` from the center of mass
    #[inline]
    pub fn velocity_at(&self, offset: Vec2) -> Vec2 {
        self.velocity + Vec2::cross_scalar(self.angular_vel, offset)
    }

    /// World-space outline for rendering
    pub fn world_vertices(&self) -> Vec<Vec2> {
        self.offsets.iter().map(|&o| self.local_to_world(o)).collect()
    }

    /// World velocity of every sample point, derived from linear and angular state
    pub fn vertex_velocities(&self) -> Vec<Vec2> {
        self.offsets
            .iter()
            .map(|&o| self.velocity_at(o.rotate(self.angle)))
            .collect()
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
            + 0.5 * self.inertia * self.angular_vel * self.angular_vel
    }

    // === Mutators ===

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Set spin; ignored for bodies that cannot rotate
    pub fn set_angular_velocity(&mut self, omega: f32) {
        if self.inverse_inertia > 0.0 {
            self.angular_vel = omega;
            self.angular_momentum = omega * self.inertia;
        }
    }

    /// Accumulate a uniform acceleration (e.g. gravity) as force
    pub fn accelerate(&mut self, acceleration: Vec2) {
        self.force += acceleration * self.mass;
    }

    /// Accumulate an acceleration acting at world `point`; off-center points add torque
    pub fn accelerate_at(&mut self, point: Vec2, acceleration: Vec2) {
        let force = acceleration * self.mass;
        self.force += force;
        self.torque += (point - self.pos).cross(force);
    }

    /// Apply impulse at world-space `offset` from the center of mass
    pub fn apply_impulse(&mut self, impulse: Vec2, offset: Vec2) {
        self.velocity += impulse * self.inverse_mass;
        if self.inverse_inertia > 0.0 {
            let angular = offset.cross(impulse);
            self.angular_momentum += angular;
            self.angular_vel += self.inverse_inertia * angular;
        }
    }

    /// Translate without touching velocity (position correction only)
    pub fn move_by(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Integrate one step and reset the force/torque accumulators.
    ///
    /// `world_scale` converts the physical acceleration and spin into
    /// simulation units; 1.0 keeps everything in raw units.
    pub fn update(&mut self, dt: f32, world_scale: f32) {
        self.pos += self.velocity * dt;
        self.velocity += self.force * (self.inverse_mass * dt * world_scale);
        self.angle += self.angular_vel * dt * world_scale;

        self.angular_momentum += self.torque * dt;
        self.angular_vel = self.inverse_inertia * self.angular_momentum;

        self.clear_accumulators();
    }

    /// Drop accumulated force and torque without integrating
    pub fn clear_accumulators(&mut self) {
        self.force = Vec2::zero();
        self.torque = 0.0;
    }

    /// Current `(force, torque)` accumulators
    pub fn accumulators(&self) -> (Vec2, f32) {
        (self.force, self.torque)
    }

    pub fn restore_accumulators(&mut self, (force, torque): (Vec2, f32)) {
        self.force = force;
        self.torque = torque;
    }
}

fn rect_corners(size: Vec2) -> [Vec2; 4] {
    let h = size * 0.5;
    [
        Vec2::new(-h.x, -h.y),
        Vec2::new(h.x, -h.y),
        Vec2::new(h.x, h.y),
        Vec2::new(-h.x, h.y),
    ]
}

fn circle_points(radius: f32, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(3);
    let step = std::f32::consts::TAU / segments as f32;
    (0..segments)
        .map(|i| Vec2::new(radius, 0.0).rotate(step * i as f32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> RigidBody {
        RigidBody::rectangle(Vec2::zero(), Vec2::new(2.0, 2.0), 4.0).unwrap()
    }

    #[test]
    fn symmetric_samples_center_at_origin() {
        let samples = [
            (Vec2::new(1.0, 0.0), 1.0),
            (Vec2::new(-1.0, 0.0), 1.0),
            (Vec2::new(0.0, 2.0), 1.0),
            (Vec2::new(0.0, -2.0), 1.0),
        ];
        let body = RigidBody::from_samples(Vec2::zero(), &samples).unwrap();

        assert_eq!(body.center_of_mass(), Vec2::zero());
        assert_eq!(body.pos, Vec2::zero());
        assert_eq!(body.mass(), 4.0);
        assert_eq!(body.inverse_mass(), 0.25);
        // Σ m r² = 1 + 1 + 4 + 4
        assert_relative_eq!(body.inverse_inertia(), 1.0 / 10.0);
    }

    #[test]
    fn position_is_shifted_to_center_of_mass() {
        let samples = [(Vec2::new(0.0, 0.0), 1.0), (Vec2::new(4.0, 0.0), 3.0)];
        let body = RigidBody::from_samples(Vec2::new(10.0, 5.0), &samples).unwrap();

        assert_eq!(body.center_of_mass(), Vec2::new(3.0, 0.0));
        assert_eq!(body.pos, Vec2::new(13.0, 5.0));
        assert_eq!(body.offsets(), &[Vec2::new(-3.0, 0.0), Vec2::new(1.0, 0.0)]);
        // 1*9 + 3*1
        assert_relative_eq!(body.inertia(), 12.0);
    }

    #[test]
    fn rejects_massless_and_empty_bodies() {
        assert!(matches!(
            RigidBody::from_samples(Vec2::zero(), &[]),
            Err(PhysicsError::EmptyShape)
        ));
        assert!(matches!(
            RigidBody::from_samples(Vec2::zero(), &[(Vec2::new(1.0, 0.0), 0.0)]),
            Err(PhysicsError::InvalidMass { .. })
        ));
        assert!(matches!(
            RigidBody::rectangle(Vec2::zero(), Vec2::new(1.0, 1.0), -2.0),
            Err(PhysicsError::InvalidMass { .. })
        ));
    }

    #[test]
    fn single_point_body_does_not_rotate() {
        let body = RigidBody::from_samples(Vec2::zero(), &[(Vec2::zero(), 2.0)]).unwrap();
        assert_eq!(body.inverse_inertia(), 0.0);
        assert!(!body.is_static());
    }

    #[test]
    fn zero_force_update_is_inertial() {
        let mut body = unit_square();
        body.set_velocity(Vec2::new(3.0, -1.0));
        body.set_angular_velocity(0.5);

        body.update(0.1, 1.0);

        assert_relative_eq!(body.pos.x, 0.3, epsilon = 1e-6);
        assert_relative_eq!(body.pos.y, -0.1, epsilon = 1e-6);
        assert_relative_eq!(body.angle, 0.05, epsilon = 1e-6);
        assert_eq!(body.velocity, Vec2::new(3.0, -1.0));
        assert_relative_eq!(body.angular_velocity(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn gravity_effect_is_mass_independent() {
        let mut light = RigidBody::rectangle(Vec2::zero(), Vec2::new(1.0, 1.0), 1.0).unwrap();
        let mut heavy = RigidBody::rectangle(Vec2::zero(), Vec2::new(1.0, 1.0), 50.0).unwrap();
        let g = Vec2::new(0.0, 9.81);

        light.accelerate(g);
        heavy.accelerate(g);
        light.update(0.5, 1.0);
        heavy.update(0.5, 1.0);

        assert_relative_eq!(light.velocity.y, 4.905, epsilon = 1e-5);
        assert_relative_eq!(heavy.velocity.y, 4.905, epsilon = 1e-4);
    }

    #[test]
    fn world_scale_multiplies_velocity_and_spin_updates() {
        let mut body = unit_square();
        body.accelerate(Vec2::new(1.0, 0.0));
        body.set_angular_velocity(1.0);

        body.update(0.1, 10.0);

        assert_relative_eq!(body.velocity.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(body.angle, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn accumulators_reset_after_update() {
        let mut body = unit_square();
        body.accelerate_at(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
        assert!(body.torque() != 0.0);

        body.update(0.01, 1.0);

        assert_eq!(body.force(), Vec2::zero());
        assert_eq!(body.torque(), 0.0);
    }

    #[test]
    fn off_center_acceleration_spins_body() {
        let mut body = unit_square();
        // force (0, 4) at lever arm (1, 0): torque = 4
        body.accelerate_at(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
        assert_relative_eq!(body.torque(), 4.0);

        body.update(1.0, 1.0);
        assert_relative_eq!(body.angular_momentum(), 4.0);
        assert_relative_eq!(body.angular_velocity(), 4.0 * body.inverse_inertia());
    }

    #[test]
    fn torque_arm_is_measured_from_world_position() {
        // heavier sample on the right: center of mass sits off the origin
        let samples = [(Vec2::new(-1.0, 0.0), 1.0), (Vec2::new(1.0, 0.0), 3.0)];
        let mut body = RigidBody::from_samples(Vec2::new(10.0, 0.0), &samples).unwrap();
        assert_relative_eq!(body.center_of_mass().x, 0.5);
        assert_relative_eq!(body.pos.x, 10.5);

        // force (0, 4) applied 1 unit right of the world center of mass
        body.accelerate_at(Vec2::new(11.5, 0.0), Vec2::new(0.0, 1.0));
        assert_relative_eq!(body.torque(), 4.0);

        // a point at the world center of mass gives no torque
        body.clear_accumulators();
        body.accelerate_at(body.pos, Vec2::new(0.0, 1.0));
        assert_relative_eq!(body.torque(), 0.0);
    }

    #[test]
    fn rejects_negative_or_non_finite_sample_mass() {
        let negative = [(Vec2::zero(), 2.0), (Vec2::new(1.0, 0.0), -1.0)];
        assert!(matches!(
            RigidBody::from_samples(Vec2::zero(), &negative),
            Err(PhysicsError::InvalidMass { mass }) if mass == -1.0
        ));

        let nan = [(Vec2::zero(), 1.0), (Vec2::new(1.0, 0.0), f32::NAN)];
        assert!(matches!(
            RigidBody::from_samples(Vec2::zero(), &nan),
            Err(PhysicsError::InvalidMass { .. })
        ));

        // massless samples are fine as long as the total is positive
        let with_zero = [(Vec2::zero(), 1.0), (Vec2::new(1.0, 0.0), 0.0)];
        assert!(RigidBody::from_samples(Vec2::zero(), &with_zero).is_ok());
    }

    #[test]
    fn impulse_changes_linear_and_angular_velocity() {
        let mut body = unit_square();
        body.apply_impulse(Vec2::new(0.0, 2.0), Vec2::new(1.0, 0.0));

        assert_relative_eq!(body.velocity.y, 0.5);
        assert_relative_eq!(body.angular_velocity(), 2.0 * body.inverse_inertia());

        // spin survives integration because angular momentum tracks it
        body.update(0.1, 1.0);
        assert_relative_eq!(body.angular_velocity(), 2.0 * body.inverse_inertia(), epsilon = 1e-6);
    }

    #[test]
    fn static_body_ignores_impulses_and_gravity() {
        let mut floor = RigidBody::static_rectangle(Vec2::new(0.0, 10.0), Vec2::new(20.0, 1.0));
        floor.accelerate(Vec2::new(0.0, 9.81));
        floor.apply_impulse(Vec2::new(5.0, 5.0), Vec2::new(3.0, 0.0));
        floor.set_angular_velocity(2.0);
        floor.update(0.1, 10.0);

        assert!(floor.is_static());
        assert_eq!(floor.pos, Vec2::new(0.0, 10.0));
        assert_eq!(floor.velocity, Vec2::zero());
        assert_eq!(floor.angular_velocity(), 0.0);
    }

    #[test]
    fn move_by_keeps_velocity() {
        let mut body = unit_square();
        body.set_velocity(Vec2::new(1.0, 1.0));
        body.move_by(Vec2::new(0.0, -0.25));
        assert_eq!(body.pos, Vec2::new(0.0, -0.25));
        assert_eq!(body.velocity, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn vertex_velocities_include_rotation() {
        let mut body = unit_square();
        body.set_velocity(Vec2::new(1.0, 0.0));
        body.set_angular_velocity(2.0);

        let v = body.vertex_velocities();
        // corner (1, 1): v + ω × r = (1, 0) + 2 * (-1, 1)
        assert_relative_eq!(v[2].x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(v[2].y, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn world_vertices_follow_pose() {
        let mut body = unit_square();
        body.pos = Vec2::new(5.0, 5.0);
        body.angle = std::f32::consts::FRAC_PI_2;

        let verts = body.world_vertices();
        // local (1, -1) rotated a quarter turn is (1, 1)
        assert_relative_eq!(verts[1].x, 6.0, epsilon = 1e-5);
        assert_relative_eq!(verts[1].y, 6.0, epsilon = 1e-5);
    }

    #[test]
    fn circle_and_line_helpers() {
        let circle = RigidBody::circle(Vec2::new(1.0, 1.0), 2.0, 16, 8.0).unwrap();
        assert_eq!(circle.offsets().len(), 16);
        assert_relative_eq!(circle.pos.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(circle.inertia(), 8.0 * 4.0, epsilon = 1e-3);

        let line = RigidBody::static_line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        assert_eq!(line.pos, Vec2::new(5.0, 0.0));
        assert_eq!(line.world_vertices(), vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)]);
    }
}
