//! Physical entity properties, kinematic state, colors and actions.

use crate::math::{Vec2, ZERO};

/// RGB color in `[0, 1]`, used for rendering and as an observation
/// feature (e.g. "go to the green landmark").
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub [f32; 3]);

impl Color {
    /// Number of color channels (`dim_color`).
    pub const DIM: usize = 3;

    /// All channels zero.
    pub const BLACK: Color = Color([0.0, 0.0, 0.0]);
    /// Default agent color.
    pub const GRAY: Color = Color([0.25, 0.25, 0.25]);
    /// Default landmark color.
    pub const LIGHT_GRAY: Color = Color([0.75, 0.75, 0.75]);
    /// Muted red.
    pub const RED: Color = Color([0.75, 0.25, 0.25]);
    /// Muted green.
    pub const GREEN: Color = Color([0.25, 0.75, 0.25]);
    /// Muted blue.
    pub const BLUE: Color = Color([0.25, 0.25, 0.75]);

    /// Channels as a slice, for concatenation into observations.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Kinematic state shared by all entities.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EntityState {
    /// Physical position.
    pub p_pos: Vec2,
    /// Physical velocity.
    pub p_vel: Vec2,
}

/// Properties and state of a physical body in the world.
///
/// Both agents and landmarks embed an `Entity`. Immovable entities still
/// take part in collisions but never integrate forces.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Display name, e.g. `"agent 0"`.
    pub name: String,
    /// Radius of the body.
    pub size: f32,
    /// Whether the entity integrates forces.
    pub movable: bool,
    /// Whether the entity exerts and receives contact forces.
    pub collide: bool,
    /// Material density. Physics integrates `initial_mass` only; the value
    /// is available to scenario authors who derive properties from it.
    pub density: f32,
    /// Render and observation color.
    pub color: Color,
    /// Speed cap applied after integration, if any.
    pub max_speed: Option<f32>,
    /// Action sensitivity override. `None` uses the environment default.
    pub accel: Option<f32>,
    /// Mass used for force integration.
    pub initial_mass: f32,
    /// Kinematic state.
    pub state: EntityState,
}

impl Entity {
    /// Default body radius.
    pub const DEFAULT_SIZE: f32 = 0.050;
    /// Default material density.
    pub const DEFAULT_DENSITY: f32 = 25.0;

    /// Create an entity with default physical properties at the origin.
    pub fn new(name: impl Into<String>, movable: bool) -> Self {
        Self {
            name: name.into(),
            size: Self::DEFAULT_SIZE,
            movable,
            collide: true,
            density: Self::DEFAULT_DENSITY,
            color: Color::default(),
            max_speed: None,
            accel: None,
            initial_mass: 1.0,
            state: EntityState::default(),
        }
    }

    /// Mass of the body.
    pub fn mass(&self) -> f32 {
        self.initial_mass
    }

    /// Stop the entity and place it at `pos`.
    pub fn place(&mut self, pos: Vec2) {
        self.state.p_pos = pos;
        self.state.p_vel = ZERO;
    }
}

/// An agent's action for one step.
///
/// `u` is the physical force, `c` the communication utterance
/// (length `dim_c`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Action {
    /// Physical action.
    pub u: Vec2,
    /// Communication action.
    pub c: Vec<f32>,
}

impl Action {
    /// A zero action for a world with `dim_c` communication channels.
    pub fn zeros(dim_c: usize) -> Self {
        Self {
            u: ZERO,
            c: vec![0.0; dim_c],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entity_defaults() {
        let e = Entity::new("landmark 0", false);
        assert_eq!(e.size, 0.050);
        assert!(e.collide);
        assert!(!e.movable);
        assert_eq!(e.mass(), 1.0);
        assert_eq!(e.state, EntityState::default());
    }

    #[test]
    fn place_clears_velocity() {
        let mut e = Entity::new("agent 0", true);
        e.state.p_vel = [1.0, -1.0];
        e.place([0.5, 0.5]);
        assert_eq!(e.state.p_pos, [0.5, 0.5]);
        assert_eq!(e.state.p_vel, ZERO);
    }

    #[test]
    fn zero_action_has_comm_width() {
        let a = Action::zeros(10);
        assert_eq!(a.c.len(), 10);
        assert_eq!(a.u, ZERO);
    }
}
