//! Per-agent action layout and routing.
//!
//! A policy agent's flat action vector is split into segments in space
//! order: the physical segment first (movable agents only), then the
//! communication segment (non-silent agents in worlds with channels).
//! [`ActionLayout::route`] turns one flat vector into an [`Action`].

use rand::Rng;
use smallvec::SmallVec;

use mpe_core::math;
use mpe_core::{Action, ActionError, AgentId};
use mpe_world::{Agent, World};

use crate::config::EnvConfig;
use crate::space::Space;

/// What an action segment controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// Physical force.
    Physical,
    /// Communication utterance.
    Communication,
}

/// A contiguous slice of an agent's flat action vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// What this segment drives.
    pub kind: SegmentKind,
    /// The component space.
    pub space: Space,
    /// Start index within the flat vector.
    pub offset: usize,
    /// Number of entries this segment occupies.
    pub width: usize,
}

impl Segment {
    fn slice<'a>(&self, action: &'a [f32]) -> &'a [f32] {
        &action[self.offset..self.offset + self.width]
    }
}

/// How one policy agent's flat action vector maps onto its action.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionLayout {
    agent: AgentId,
    segments: SmallVec<[Segment; 2]>,
    dim_c: usize,
    index_input: bool,
    discrete: bool,
    force_discrete: bool,
    sensitivity: f32,
}

impl ActionLayout {
    /// Derive the layout of agent `id` in `world` under `config`.
    ///
    /// `force_discrete` is the resolved `force_discrete_action` flag.
    pub fn new(
        id: AgentId,
        agent: &Agent,
        world: &World,
        config: &EnvConfig,
        force_discrete: bool,
    ) -> Self {
        let index_input = config.discrete_action_input;
        let mut segments: SmallVec<[Segment; 2]> = SmallVec::new();
        let mut offset = 0;
        let mut push = |kind, space: Space| {
            let width = if index_input { 1 } else { space.flat_dim() };
            segments.push(Segment {
                kind,
                space,
                offset,
                width,
            });
            offset += width;
        };

        if agent.entity.movable {
            let space = if config.discrete_action_space {
                Space::Discrete {
                    n: 2 * world.dim_p() + 1,
                }
            } else {
                Space::boxed(-agent.u_range, agent.u_range, world.dim_p())
            };
            push(SegmentKind::Physical, space);
        }
        if !agent.silent && world.dim_c > 0 {
            let space = if config.discrete_action_space {
                Space::Discrete { n: world.dim_c }
            } else {
                Space::boxed(0.0, 1.0, world.dim_c)
            };
            push(SegmentKind::Communication, space);
        }

        Self {
            agent: id,
            segments,
            dim_c: world.dim_c,
            index_input,
            discrete: config.discrete_action_space,
            force_discrete,
            sensitivity: config.action_sensitivity,
        }
    }

    /// The agent this layout belongs to.
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    /// Segments in flat-vector order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The segment of the given kind, if the agent has one.
    pub fn segment(&self, kind: SegmentKind) -> Option<&Segment> {
        self.segments.iter().find(|s| s.kind == kind)
    }

    /// Required length of the flat action vector.
    pub fn width(&self) -> usize {
        self.segments.iter().map(|s| s.width).sum()
    }

    /// The agent's action space.
    ///
    /// A single component is returned as-is; several discrete components
    /// form a `MultiDiscrete`, anything else a `Tuple`.
    pub fn space(&self) -> Space {
        match self.segments.as_slice() {
            [only] => only.space.clone(),
            segs if !segs.is_empty() && segs.iter().all(|s| s.space.is_discrete()) => {
                Space::MultiDiscrete {
                    nvec: segs.iter().map(|s| s.space.flat_dim()).collect(),
                }
            }
            segs => Space::Tuple(segs.iter().map(|s| s.space.clone()).collect()),
        }
    }

    /// Convert a flat action vector into an [`Action`] for `agent`.
    pub fn route(&self, agent: &Agent, action: &[f32]) -> Result<Action, ActionError> {
        let expected = self.width();
        if action.len() != expected {
            return Err(ActionError::LengthMismatch {
                agent: self.agent,
                expected,
                got: action.len(),
            });
        }

        let mut out = Action::zeros(self.dim_c);
        if let Some(seg) = self.segment(SegmentKind::Physical) {
            let a = seg.slice(action);
            let mut u = math::ZERO;
            if self.index_input {
                match self.index(a[0], seg.space.flat_dim())? {
                    1 => u[0] = -1.0,
                    2 => u[0] = 1.0,
                    3 => u[1] = -1.0,
                    4 => u[1] = 1.0,
                    _ => {}
                }
            } else {
                let mut a: SmallVec<[f32; 5]> = SmallVec::from_slice(a);
                if self.force_discrete {
                    if let Some(hot) = math::argmax(&a) {
                        a.iter_mut().for_each(|v| *v = 0.0);
                        a[hot] = 1.0;
                    }
                }
                if self.discrete {
                    u[0] += a[1] - a[2];
                    u[1] += a[3] - a[4];
                } else {
                    u.copy_from_slice(&a[..World::DIM_P]);
                }
            }
            let sensitivity = agent.entity.accel.unwrap_or(self.sensitivity);
            out.u = math::scale(u, sensitivity);
        }
        if let Some(seg) = self.segment(SegmentKind::Communication) {
            let a = seg.slice(action);
            if self.index_input {
                let i = self.index(a[0], self.dim_c)?;
                out.c[i] = 1.0;
            } else {
                out.c.copy_from_slice(a);
            }
        }
        Ok(out)
    }

    /// Draw a random flat action vector of length [`width`](Self::width).
    ///
    /// With index input each segment gets a random index; otherwise each
    /// segment is sampled from its space.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.width());
        for seg in &self.segments {
            if self.index_input {
                let n = seg.space.flat_dim().max(1);
                out.push(rng.random_range(0..n) as f32);
            } else {
                out.extend(seg.space.sample(rng));
            }
        }
        out
    }

    fn index(&self, value: f32, n: usize) -> Result<usize, ActionError> {
        let v = value.round();
        if v.is_finite() && v >= 0.0 && (v as usize) < n {
            Ok(v as usize)
        } else {
            Err(ActionError::IndexOutOfRange {
                agent: self.agent,
                value: v as i64,
                n,
            })
        }
    }
}
