//! Render frames: a drawable snapshot of the world.
//!
//! A [`Frame`] carries everything a viewer needs to draw one step (entity
//! names, positions, sizes and colors) plus the communication log that is
//! printed alongside it. Drawing itself is left to the caller.

use std::fmt;

use mpe_core::math::{self, Vec2};
use mpe_core::Color;
use mpe_world::World;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Whether a drawn entity is an agent or a landmark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// A (policy or scripted) agent.
    Agent,
    /// A landmark.
    Landmark,
}

/// One entity as drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameEntity {
    /// Entity name.
    pub name: String,
    /// Agent or landmark.
    pub kind: EntityKind,
    /// Position.
    pub position: Vec2,
    /// Radius.
    pub size: f32,
    /// RGB color.
    pub color: Color,
}

/// A snapshot of the world for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Environment step counter when the frame was taken.
    pub time: u64,
    /// Agents first, then landmarks.
    pub entities: Vec<FrameEntity>,
    /// `"<speaker> to <listener>: <word>"`, one per ordered agent pair.
    pub messages: Vec<String>,
}

impl Frame {
    /// Capture `world` at step `time`.
    pub fn capture(world: &World, time: u64) -> Self {
        let agents = world.agents.iter().map(|a| (EntityKind::Agent, &a.entity));
        let landmarks = world
            .landmarks
            .iter()
            .map(|l| (EntityKind::Landmark, &l.entity));
        let entities = agents
            .chain(landmarks)
            .map(|(kind, e)| FrameEntity {
                name: e.name.clone(),
                kind,
                position: e.state.p_pos,
                size: e.size,
                color: e.color,
            })
            .collect();

        let mut messages = Vec::new();
        if world.dim_c > 0 {
            for listener in &world.agents {
                for speaker in &world.agents {
                    if std::ptr::eq(speaker, listener) {
                        continue;
                    }
                    messages.push(format!(
                        "{} to {}: {}",
                        speaker.entity.name,
                        listener.entity.name,
                        word(&speaker.comm)
                    ));
                }
            }
        }

        Self {
            time,
            entities,
            messages,
        }
    }
}

/// `_` for silence, otherwise the letter of the loudest channel.
fn word(comm: &[f32]) -> char {
    if comm.iter().all(|&c| c == 0.0) {
        return '_';
    }
    math::argmax(comm)
        .and_then(|i| ALPHABET.get(i))
        .map_or('?', |&b| b as char)
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "t={}", self.time)?;
        for e in &self.entities {
            writeln!(
                f,
                "  {:<12} ({:+.3}, {:+.3}) r={:.3}",
                e.name, e.position[0], e.position[1], e.size
            )?;
        }
        for m in &self.messages {
            writeln!(f, "  {m}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpe_world::{Agent, Landmark};

    fn world() -> World {
        let mut w = World::new();
        w.dim_c = 3;
        for i in 0..2 {
            let mut a = Agent::new(format!("agent {i}"));
            a.reset_comm(3);
            w.agents.push(a);
        }
        w.landmarks.push(Landmark::new("landmark 0"));
        w
    }

    #[test]
    fn entities_agents_first() {
        let f = Frame::capture(&world(), 7);
        assert_eq!(f.time, 7);
        let kinds: Vec<EntityKind> = f.entities.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [EntityKind::Agent, EntityKind::Agent, EntityKind::Landmark]
        );
    }

    #[test]
    fn messages_use_underscore_for_silence() {
        let mut w = world();
        w.agents[1].comm = vec![0.1, 0.0, 0.7];
        let f = Frame::capture(&w, 0);
        assert_eq!(
            f.messages,
            ["agent 1 to agent 0: C", "agent 0 to agent 1: _"]
        );
    }

    #[test]
    fn no_messages_without_channels() {
        let mut w = world();
        w.dim_c = 0;
        assert!(Frame::capture(&w, 0).messages.is_empty());
    }

    #[test]
    fn display_lists_entities_and_messages() {
        let text = Frame::capture(&world(), 3).to_string();
        assert!(text.starts_with("t=3\n"));
        assert!(text.contains("landmark 0"));
        assert!(text.contains("agent 0 to agent 1: _"));
    }
}
