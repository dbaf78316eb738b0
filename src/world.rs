use glam::{Mat4, Vec2};
use log::error;

use crate::{
    collision::{contact::CollisionState, detection::NarrowPhase},
    config::{
        DEFAULT_GRAVITY, DEFAULT_PENETRATION_TOLERANCE, MAX_BISECTION_DEPTH,
        MAX_IMPULSE_ITERATIONS,
    },
    core::{
        rigidbody::{RigidBody, Slot},
        types::GravityState,
        wall::Wall,
    },
    dynamics::{forces::ForceRegistry, impulse::ImpulseSolver, integrator::Integrator},
    error::{Result, StepError},
    scene::SceneDef,
    utils::logging::ScopedTimer,
};

/// Read-only sink for per-tick draw data. The world pushes pose transforms
/// and wall segments; it never touches a graphics API itself.
pub trait SceneRenderer {
    fn draw_body(&mut self, model: Mat4, color: [f32; 3]);
    fn draw_wall(&mut self, start: Vec2, end: Vec2, normal: Vec2);
}

/// Central simulation container owning the active scene's bodies and walls
/// and driving the adaptive time-stepping loop.
pub struct World {
    bodies: Vec<RigidBody>,
    walls: Vec<Wall>,
    scenes: Vec<SceneDef>,
    active_scene: usize,
    gravity: Vec2,
    gravity_state: GravityState,
    restitution_override: Option<f32>,
    penetration_tolerance: f32,
    pub force_registry: ForceRegistry,
    integrator: Integrator,
    solver: ImpulseSolver,
}

impl World {
    /// Creates a world over the given scene list and loads the first scene
    /// if one exists.
    pub fn new(scenes: Vec<SceneDef>) -> Self {
        let mut world = Self {
            bodies: Vec::new(),
            walls: Vec::new(),
            scenes,
            active_scene: 0,
            gravity: Vec2::from(DEFAULT_GRAVITY),
            gravity_state: GravityState::default(),
            restitution_override: None,
            penetration_tolerance: DEFAULT_PENETRATION_TOLERANCE,
            force_registry: ForceRegistry::new(),
            integrator: Integrator::new(),
            solver: ImpulseSolver::new(),
        };
        if !world.scenes.is_empty() {
            world.load_scene(0);
        }
        world
    }

    /// Switches to another scene, fully replacing bodies and walls. Must be
    /// called between ticks only. Out-of-range indices leave the world
    /// untouched and return false.
    pub fn change_scene(&mut self, index: usize) -> bool {
        if index >= self.scenes.len() {
            return false;
        }
        self.load_scene(index);
        true
    }

    /// Reinitializes the active scene's bodies from their definitions
    /// without reloading wall geometry.
    pub fn reset_scene(&mut self) {
        if self.scenes.is_empty() {
            return;
        }
        let restitution = self.restitution_override;
        self.bodies = self.scenes[self.active_scene]
            .bodies
            .iter()
            .map(|def| def.instantiate(restitution))
            .collect();
    }

    pub fn set_gravity_state(&mut self, state: GravityState) {
        self.gravity_state = state;
    }

    pub fn gravity_state(&self) -> GravityState {
        self.gravity_state
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    /// Records a restitution override. It is applied to every body at the
    /// next scene load or reset, not retroactively.
    pub fn set_coefficient_of_restitution(&mut self, restitution: f32) {
        self.restitution_override = Some(restitution);
    }

    pub fn set_penetration_tolerance(&mut self, tolerance: f32) {
        debug_assert!(tolerance > 0.0);
        self.penetration_tolerance = tolerance;
    }

    pub fn penetration_tolerance(&self) -> f32 {
        self.penetration_tolerance
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn body(&self, index: usize) -> Option<&RigidBody> {
        self.bodies.get(index)
    }

    pub fn active_scene(&self) -> usize {
        self.active_scene
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Advances the simulation by `delta_time` seconds.
    ///
    /// Each attempted sub-step integrates the current state into the future
    /// slot and classifies the result: penetrating sub-steps are rejected
    /// and the remaining interval halved; touching-and-closing contacts are
    /// drained by bounded impulse iteration; clear sub-steps are accepted
    /// by swapping the state buffers. On an error the last accepted state
    /// is still current and no partial step has been published.
    pub fn simulate(&mut self, delta_time: f32) -> Result<()> {
        let mut current_time = 0.0_f32;
        let mut target_time = delta_time;
        let mut bisections = 0u32;

        while current_time < delta_time {
            let h = target_time - current_time;
            self.compute_forces(h);
            for body in &mut self.bodies {
                self.integrator.integrate(body, h);
                body.compute_vertices(Slot::Future);
            }

            let state = {
                let _timer = ScopedTimer::new("collision::detect");
                NarrowPhase::detect(&self.bodies, &self.walls, self.penetration_tolerance)
            };

            match state {
                CollisionState::Penetrating => {
                    bisections += 1;
                    if bisections > MAX_BISECTION_DEPTH {
                        error!("time bisection exhausted at t = {current_time}");
                        return Err(StepError::PenetrationUnresolved);
                    }
                    target_time = 0.5 * (current_time + target_time);
                    continue;
                }
                CollisionState::Colliding(first) => {
                    let _timer = ScopedTimer::new("collision::resolve");
                    let mut contact = first;
                    let mut iterations = 0u32;
                    loop {
                        self.solver.resolve(&mut self.bodies, &contact);
                        iterations += 1;
                        match NarrowPhase::detect(
                            &self.bodies,
                            &self.walls,
                            self.penetration_tolerance,
                        ) {
                            CollisionState::Colliding(next) => {
                                if iterations >= MAX_IMPULSE_ITERATIONS {
                                    error!("impulse iteration bound exceeded on {:?}", next.kind);
                                    return Err(StepError::from_contact(next.kind));
                                }
                                contact = next;
                            }
                            // Impulses leave positions untouched, so the
                            // re-scan can only settle to clear here.
                            _ => break,
                        }
                    }
                }
                CollisionState::Clear => {}
            }

            for body in &mut self.bodies {
                body.swap_states();
            }
            current_time = target_time;
            target_time = delta_time;
            bisections = 0;
        }

        Ok(())
    }

    /// Pushes the accepted state of every body and wall to an external
    /// renderer.
    pub fn render(&self, renderer: &mut dyn SceneRenderer) {
        for body in &self.bodies {
            renderer.draw_body(body.model_matrix(Slot::Current), body.color);
        }
        for wall in &self.walls {
            renderer.draw_wall(wall.start(), wall.end(), wall.normal());
        }
    }

    /// Resets the current slot's accumulators and applies the active force
    /// model. Rerun on every control-loop iteration: bisection changes the
    /// step size, not the forces.
    fn compute_forces(&mut self, h: f32) {
        let gravity = match self.gravity_state {
            GravityState::None => Vec2::ZERO,
            GravityState::Normal => self.gravity,
            GravityState::Inverted => -self.gravity,
        };
        for body in &mut self.bodies {
            body.clear_accumulators();
            if body.inverse_mass > 0.0 {
                body.add_force(gravity / body.inverse_mass);
            }
        }
        self.force_registry.apply_all(&mut self.bodies, h);
    }

    fn load_scene(&mut self, index: usize) {
        self.walls = self.scenes[index].walls.iter().map(|def| def.build()).collect();
        let restitution = self.restitution_override;
        self.bodies = self.scenes[index]
            .bodies
            .iter()
            .map(|def| def.instantiate(restitution))
            .collect();
        self.active_scene = index;
    }
}
