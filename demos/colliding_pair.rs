use impulse2d::*;

fn main() {
    let quarter_turn = std::f32::consts::FRAC_PI_4;
    let scene = SceneDef {
        name: "corner exchange".into(),
        bodies: vec![
            BodyDef {
                mass: Some(1.0),
                width: 2.0,
                height: 2.0,
                restitution: 1.0,
                position: Vec2::new(-4.0, 0.0),
                orientation: quarter_turn,
                linear_velocity: Vec2::new(3.0, 0.0),
                color: [1.0, 0.4, 0.2],
                ..Default::default()
            },
            BodyDef {
                mass: Some(1.0),
                width: 2.0,
                height: 2.0,
                restitution: 1.0,
                position: Vec2::new(4.0, 0.0),
                orientation: quarter_turn,
                linear_velocity: Vec2::new(-3.0, 0.0),
                color: [0.2, 0.6, 1.0],
                ..Default::default()
            },
        ],
        walls: Vec::new(),
    };

    let mut sim = Simulation::new(vec![scene]);
    sim.set_gravity_state(GravityState::None);

    for tick in 0..300 {
        if let Err(err) = sim.step(config::DEFAULT_TIME_STEP) {
            eprintln!("simulation halted: {err}");
            break;
        }
        if tick % 30 == 0 {
            let a = sim.world().body(0).expect("body a").current();
            let b = sim.world().body(1).expect("body b").current();
            println!(
                "t = {:>5.2}s  a: x = {:>6.2} vx = {:>5.2}  b: x = {:>6.2} vx = {:>5.2}",
                tick as f32 / 60.0,
                a.pose.position.x,
                a.velocity.linear.x,
                b.pose.position.x,
                b.velocity.linear.x
            );
        }
    }
}
