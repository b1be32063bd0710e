use approx::assert_relative_eq;
use rigid2d_engine::{
    CollisionResolver, Contact, PositionCorrector, RigidBody, RigidBodySystem, SimulationConfig, Vec2,
};

const DT: f32 = 1.0 / 60.0;

fn unit_config() -> SimulationConfig {
    SimulationConfig {
        gravity: Vec2::new(0.0, -9.81),
        ..SimulationConfig::unit_scale()
    }
}

/// Static floor at index 0, unit-mass box at index 1 falling at 5 units/s
fn falling_box() -> (Vec<RigidBody>, Contact) {
    let floor = RigidBody::static_rectangle(Vec2::new(0.0, -0.5), Vec2::new(20.0, 1.0));
    let mut body = RigidBody::rectangle(Vec2::new(0.0, 0.4), Vec2::new(1.0, 1.0), 1.0).unwrap();
    body.set_velocity(Vec2::new(0.0, -5.0));
    let bodies = vec![floor, body];
    let contact = Contact::between(&bodies, 0, 1, Vec2::new(0.0, 1.0), 0.1, Vec2::new(0.0, -0.1)).unwrap();
    (bodies, contact)
}

#[test]
fn falling_box_bounces_with_restitution() {
    let config = unit_config();
    let (mut bodies, contact) = falling_box();

    CollisionResolver::new(&config)
        .resolve(&mut bodies, &[contact], DT)
        .unwrap();

    // j = -(1 + 0.3) * -5 / 1
    assert_relative_eq!(bodies[1].velocity.y, 1.5, epsilon = 1e-5);
    assert_relative_eq!(bodies[1].velocity.x, 0.0, epsilon = 1e-6);
    assert_eq!(bodies[0].velocity, Vec2::zero());
}

#[test]
fn resting_box_does_not_bounce() {
    let config = unit_config();
    let (mut bodies, _) = falling_box();
    // slower than one step of gravity: treated as resting
    bodies[1].set_velocity(Vec2::new(0.0, -0.1));
    let contact = Contact::between(&bodies, 0, 1, Vec2::new(0.0, 1.0), 0.1, Vec2::new(0.0, -0.1)).unwrap();

    CollisionResolver::new(&config)
        .resolve(&mut bodies, &[contact], DT)
        .unwrap();

    assert_relative_eq!(bodies[1].velocity.y, 0.0, epsilon = 1e-6);
}

#[test]
fn correction_lifts_box_and_leaves_floor() {
    let config = unit_config();
    let (mut bodies, contact) = falling_box();

    PositionCorrector::new(&config)
        .correct(&mut bodies, &[contact])
        .unwrap();

    // (0.1 - 0.05) / 1 * 0.3
    assert_relative_eq!(bodies[1].pos.y, 0.4 + 0.015, epsilon = 1e-6);
    assert_eq!(bodies[0].pos, Vec2::new(0.0, -0.5));
    assert_eq!(bodies[1].velocity, Vec2::new(0.0, -5.0));
}

#[test]
fn full_step_bounces_then_integrates() {
    let mut system = RigidBodySystem::new(unit_config());
    system.add_body(RigidBody::static_rectangle(Vec2::new(0.0, -0.5), Vec2::new(20.0, 1.0)));
    let id = system.add_body(RigidBody::rectangle(Vec2::new(0.0, 0.4), Vec2::new(1.0, 1.0), 1.0).unwrap());
    system.body_mut(id).unwrap().set_velocity(Vec2::new(0.0, -5.0));
    let contact = Contact::between(system.bodies(), 0, 1, Vec2::new(0.0, 1.0), 0.1, Vec2::new(0.0, -0.1)).unwrap();

    system.apply_gravity();
    let report = system.step(&[contact], DT).unwrap();

    assert_eq!(report.resolve.impulses_applied, 1);
    assert_eq!(report.integrated, 2);
    let body = system.body(id).unwrap();
    // corrected to 0.415, then moved by the post-bounce velocity
    assert_relative_eq!(body.pos.y, 0.415 + 1.5 * DT, epsilon = 1e-5);
    assert_relative_eq!(body.velocity.y, 1.5 - 9.81 * DT, epsilon = 1e-5);
}
