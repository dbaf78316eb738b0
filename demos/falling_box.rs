use impulse2d::*;

fn main() {
    let scene = SceneDef {
        name: "falling box".into(),
        bodies: vec![BodyDef {
            mass: Some(1.0),
            width: 2.0,
            height: 2.0,
            restitution: 0.8,
            position: Vec2::new(0.0, 10.0),
            ..Default::default()
        }],
        walls: vec![WallDef {
            start: Vec2::new(-20.0, 0.0),
            end: Vec2::new(20.0, 0.0),
        }],
    };

    let mut sim = Simulation::new(vec![scene]);

    for tick in 0..240 {
        if let Err(err) = sim.step(config::DEFAULT_TIME_STEP) {
            eprintln!("simulation halted: {err}");
            break;
        }
        if tick % 30 == 0 {
            let state = sim.world().body(0).expect("body should exist").current();
            println!(
                "t = {:>5.2}s  y = {:>6.2}  vy = {:>7.2}",
                tick as f32 / 60.0,
                state.pose.position.y,
                state.velocity.linear.y
            );
        }
    }
}
