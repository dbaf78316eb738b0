use approx::assert_relative_eq;
use impulse2d::*;

const DT: f32 = 1.0 / 60.0;

fn floor() -> WallDef {
    WallDef {
        start: Vec2::new(-50.0, 0.0),
        end: Vec2::new(50.0, 0.0),
    }
}

fn falling_box(restitution: f32, velocity_y: f32) -> SceneDef {
    SceneDef {
        name: "falling box".into(),
        bodies: vec![BodyDef {
            mass: Some(1.0),
            width: 2.0,
            height: 2.0,
            restitution,
            position: Vec2::new(0.0, 5.0),
            linear_velocity: Vec2::new(0.0, velocity_y),
            ..Default::default()
        }],
        walls: vec![floor()],
    }
}

/// Linear plus rotational kinetic energy of a body's accepted state.
fn kinetic_energy(body: &RigidBody) -> f32 {
    let state = body.current();
    let mass = 1.0 / body.inverse_mass;
    let inertia = 1.0 / body.inverse_inertia;
    0.5 * mass * state.velocity.linear.length_squared()
        + 0.5 * inertia * state.velocity.angular * state.velocity.angular
}

#[test]
fn elastic_bounce_reflects_and_conserves_energy() {
    // A 2x2 box, mass 1, restitution 1, dropped straight down at a floor
    // wall with the default tolerance band.
    let mut world = World::new(vec![falling_box(1.0, -10.0)]);
    world.set_gravity_state(GravityState::None);

    let energy_before = kinetic_energy(&world.bodies()[0]);
    let tolerance = world.penetration_tolerance();

    let mut bounced = false;
    for _ in 0..120 {
        world.simulate(DT).expect("bounce should resolve");
        let state = world.body(0).unwrap().current();
        if state.velocity.linear.y > 0.0 {
            bounced = true;
            break;
        }
    }
    assert!(bounced, "body never rebounded off the floor");

    let body = &world.bodies()[0];
    let state = body.current();
    // The lowest vertex never ends an accepted step below the tolerance
    // band, so the center stays above half-height minus tolerance.
    assert!(state.pose.position.y >= 1.0 - tolerance - 1e-4);
    // Restitution 1 leaves the kinetic energy intact even when the flat
    // impact is drained corner by corner.
    assert_relative_eq!(kinetic_energy(body), energy_before, epsilon = 1e-2);
}

#[test]
fn dead_contact_leaves_no_rebound_speed() {
    let mut world = World::new(vec![falling_box(0.0, -4.0)]);
    world.set_gravity_state(GravityState::None);
    world.set_penetration_tolerance(0.1);

    for _ in 0..240 {
        world.simulate(DT).expect("inelastic contact should resolve");
    }

    let state = world.body(0).unwrap().current();
    // After every touching contact drained at restitution 0, no contact
    // point may still be approaching, and the residual normal speed at the
    // surface is negligible.
    for &vertex in &state.vertices {
        let r = vertex - state.pose.position;
        let normal_speed = (state.velocity.linear
            + state.velocity.angular * Vec2::new(-r.y, r.x))
        .y;
        if vertex.y < 0.1 {
            assert!(
                normal_speed >= -1e-3,
                "contact point still approaching at {normal_speed}"
            );
        }
    }
    assert!(state.velocity.linear.y.abs() < 0.5);
}

#[test]
fn fast_bodies_never_tunnel_through_walls() {
    let mut world = World::new(vec![falling_box(1.0, -1000.0)]);
    world.set_gravity_state(GravityState::None);
    let tolerance = world.penetration_tolerance();

    // One tick covers many body-lengths of travel; bisection has to carry
    // the body to the wall without ever accepting a penetrating state.
    for _ in 0..30 {
        world.simulate(0.1).expect("bisection should avoid tunneling");
        let state = world.body(0).unwrap().current();
        for &vertex in &state.vertices {
            assert!(
                vertex.y >= -tolerance,
                "accepted state penetrates the floor: vertex at y = {}",
                vertex.y
            );
        }
    }
}

#[test]
fn equal_masses_exchange_velocities_corner_to_corner() {
    // Two diamonds (squares rotated 45°) meeting corner to corner on the
    // line between their centers: the rotational terms vanish and the
    // impulse exchanges the approach velocities exactly.
    let quarter_turn = std::f32::consts::FRAC_PI_4;
    let scene = SceneDef {
        name: "corner exchange".into(),
        bodies: vec![
            BodyDef {
                mass: Some(1.0),
                width: 2.0,
                height: 2.0,
                restitution: 1.0,
                position: Vec2::new(-2.0, 0.0),
                orientation: quarter_turn,
                linear_velocity: Vec2::new(5.0, 0.0),
                ..Default::default()
            },
            BodyDef {
                mass: Some(1.0),
                width: 2.0,
                height: 2.0,
                restitution: 1.0,
                position: Vec2::new(2.0, 0.0),
                orientation: quarter_turn,
                linear_velocity: Vec2::new(-5.0, 0.0),
                ..Default::default()
            },
        ],
        walls: Vec::new(),
    };

    let mut world = World::new(vec![scene]);
    world.set_gravity_state(GravityState::None);

    let mut exchanged = false;
    for _ in 0..120 {
        world.simulate(DT).expect("corner contact should resolve");
        if world.body(0).unwrap().current().velocity.linear.x < 0.0 {
            exchanged = true;
            break;
        }
    }
    assert!(exchanged, "bodies never exchanged velocities");

    let a = world.body(0).unwrap().current();
    let b = world.body(1).unwrap().current();
    assert_relative_eq!(a.velocity.linear.x, -5.0, epsilon = 1e-3);
    assert_relative_eq!(b.velocity.linear.x, 5.0, epsilon = 1e-3);
    assert_relative_eq!(a.velocity.angular, 0.0, epsilon = 1e-3);
    assert_relative_eq!(b.velocity.angular, 0.0, epsilon = 1e-3);
}

#[test]
fn immovable_pair_reports_unresolvable_vertex_vertex() {
    // Two infinite-mass diamonds driven into each other: impulses cannot
    // change their velocities, so the iteration bound must trip with the
    // specific vertex-vertex status.
    let quarter_turn = std::f32::consts::FRAC_PI_4;
    let scene = SceneDef {
        name: "degenerate pair".into(),
        bodies: vec![
            BodyDef {
                mass: None,
                width: 2.0,
                height: 2.0,
                position: Vec2::new(-2.0, 0.0),
                orientation: quarter_turn,
                linear_velocity: Vec2::new(2.0, 0.0),
                ..Default::default()
            },
            BodyDef {
                mass: None,
                width: 2.0,
                height: 2.0,
                position: Vec2::new(2.0, 0.0),
                orientation: quarter_turn,
                linear_velocity: Vec2::new(-2.0, 0.0),
                ..Default::default()
            },
        ],
        walls: Vec::new(),
    };

    let mut world = World::new(vec![scene]);
    world.set_gravity_state(GravityState::None);

    let mut outcome = Ok(());
    for _ in 0..300 {
        outcome = world.simulate(DT);
        if outcome.is_err() {
            break;
        }
    }
    assert_eq!(outcome, Err(StepError::VertexVertexUnresolved));
}

#[test]
fn immovable_body_reports_unresolvable_wall_contact() {
    let scene = SceneDef {
        name: "kinematic ram".into(),
        bodies: vec![BodyDef {
            mass: None,
            width: 2.0,
            height: 2.0,
            position: Vec2::new(0.0, 5.0),
            linear_velocity: Vec2::new(0.0, -2.0),
            ..Default::default()
        }],
        walls: vec![floor()],
    };

    let mut world = World::new(vec![scene]);
    world.set_gravity_state(GravityState::None);

    let mut outcome = Ok(());
    for _ in 0..300 {
        outcome = world.simulate(DT);
        if outcome.is_err() {
            break;
        }
    }
    assert_eq!(outcome, Err(StepError::WallContactUnresolved));
}

#[test]
fn immovable_vertex_into_edge_reports_unresolvable_vertex_edge() {
    // A driven diamond corner meets the flat left face of a second
    // infinite-mass box away from its corners.
    let quarter_turn = std::f32::consts::FRAC_PI_4;
    let scene = SceneDef {
        name: "degenerate edge".into(),
        bodies: vec![
            BodyDef {
                mass: None,
                width: 2.0,
                height: 2.0,
                position: Vec2::new(-2.0, 0.0),
                orientation: quarter_turn,
                linear_velocity: Vec2::new(2.0, 0.0),
                ..Default::default()
            },
            BodyDef {
                mass: None,
                width: 2.0,
                height: 2.0,
                position: Vec2::new(2.0, 0.0),
                linear_velocity: Vec2::ZERO,
                ..Default::default()
            },
        ],
        walls: Vec::new(),
    };

    let mut world = World::new(vec![scene]);
    world.set_gravity_state(GravityState::None);
    world.set_penetration_tolerance(0.5);

    let mut outcome = Ok(());
    for _ in 0..300 {
        outcome = world.simulate(DT);
        if outcome.is_err() {
            break;
        }
    }
    assert_eq!(outcome, Err(StepError::VertexEdgeUnresolved));
}

#[test]
fn preexisting_deep_penetration_reports_bisection_failure() {
    // A body spawned buried in the floor penetrates at any sub-step size,
    // so the bisection depth bound has to surface the failure.
    let scene = SceneDef {
        name: "buried".into(),
        bodies: vec![BodyDef {
            mass: Some(1.0),
            width: 2.0,
            height: 2.0,
            position: Vec2::new(0.0, -5.0),
            ..Default::default()
        }],
        walls: vec![floor()],
    };

    let mut world = World::new(vec![scene]);
    assert_eq!(world.simulate(DT), Err(StepError::PenetrationUnresolved));
}
