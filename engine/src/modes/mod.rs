//! Mode Machine
//!
//! The character is always in exactly one of three modes: Weapon, Build or
//! Edit. Each mode's `update` inspects input for switches to the other two and
//! returns the mode it wants next. The machine commits a switch only when the
//! target is registered, running exit(old) before enter(new).
//!
//! ```rust,ignore
//! let mut machine = ModeMachine::new(ModeKind::Build, [
//!     ModeHandler::Weapon(WeaponMode::new()),
//!     ModeHandler::Build(BuildMode::default()),
//! ]);
//! machine.start(&ctx);
//! let tick = machine.tick(&ctx);
//! ```

pub mod build;
pub mod edit;
pub mod weapon;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::building::{ConstructionFactory, SharedRegistry};
use crate::error::GameplayError;
use crate::input::InputSnapshot;
use crate::sensor::SensorReading;
use crate::world::GridSpace;

pub use build::{
    BuildConfig, BuildMode, GhostConstruction, Placement, compute_placement, pitch_bucket, snap_yaw,
    wall_address_for_yaw,
};
pub use edit::{EditMode, EditTarget};
pub use weapon::WeaponMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    Weapon,
    Build,
    Edit,
}

impl ModeKind {
    pub const ALL: [ModeKind; 3] = [ModeKind::Weapon, ModeKind::Build, ModeKind::Edit];
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModeKind::Weapon => "weapon",
            ModeKind::Build => "build",
            ModeKind::Edit => "edit",
        };
        f.write_str(name)
    }
}

impl FromStr for ModeKind {
    type Err = GameplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "weapon" => Ok(ModeKind::Weapon),
            "build" => Ok(ModeKind::Build),
            "edit" => Ok(ModeKind::Edit),
            other => Err(GameplayError::Config(format!("unknown mode '{other}'"))),
        }
    }
}

/// Everything a mode may read during one tick.
pub struct ModeContext<'a> {
    pub input: &'a InputSnapshot,
    pub grid: &'a GridSpace,
    pub registry: &'a SharedRegistry,
    pub factory: &'a dyn ConstructionFactory,
    /// Character origin (feet)
    pub character_position: Vec3,
    pub facing: Quat,
    pub controller_height: f32,
    /// Camera pitch in degrees, positive looking down
    pub camera_pitch: f32,
    pub sensor: &'a SensorReading,
}

/// A registered mode.
#[derive(Debug, Clone)]
pub enum ModeHandler {
    Weapon(WeaponMode),
    Build(BuildMode),
    Edit(EditMode),
}

impl ModeHandler {
    pub fn kind(&self) -> ModeKind {
        match self {
            ModeHandler::Weapon(_) => ModeKind::Weapon,
            ModeHandler::Build(_) => ModeKind::Build,
            ModeHandler::Edit(_) => ModeKind::Edit,
        }
    }

    /// Default handler for `kind`.
    pub fn for_kind(kind: ModeKind, build: &BuildConfig) -> Self {
        match kind {
            ModeKind::Weapon => ModeHandler::Weapon(WeaponMode::new()),
            ModeKind::Build => ModeHandler::Build(BuildMode::new(build.clone())),
            ModeKind::Edit => ModeHandler::Edit(EditMode::new()),
        }
    }

    fn enter(&mut self, ctx: &ModeContext<'_>) {
        match self {
            ModeHandler::Weapon(mode) => mode.enter(),
            ModeHandler::Build(mode) => mode.enter(ctx),
            ModeHandler::Edit(mode) => mode.enter(),
        }
    }

    fn exit(&mut self) {
        match self {
            ModeHandler::Weapon(mode) => mode.exit(),
            ModeHandler::Build(mode) => mode.exit(),
            ModeHandler::Edit(mode) => mode.exit(),
        }
    }

    fn update(&mut self, ctx: &ModeContext<'_>) -> ModeKind {
        match self {
            ModeHandler::Weapon(mode) => mode.update(ctx),
            ModeHandler::Build(mode) => mode.update(ctx),
            ModeHandler::Edit(mode) => mode.update(ctx),
        }
    }
}

/// Lifecycle hook invocations, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    Exited(ModeKind),
    Entered(ModeKind),
}

/// What the machine did with a mode's request.
#[derive(Debug)]
pub enum Transition {
    /// No registered initial mode, nothing ran
    Idle,
    Stay,
    Switched { from: ModeKind, to: ModeKind },
    /// Requested mode has no handler; the machine stayed
    Rejected(GameplayError),
}

#[derive(Debug)]
pub struct ModeTick {
    pub requested: Option<ModeKind>,
    pub transition: Transition,
    pub events: Vec<ModeEvent>,
}

impl ModeTick {
    fn idle() -> Self {
        Self {
            requested: None,
            transition: Transition::Idle,
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModeMachine {
    active: ModeKind,
    handlers: BTreeMap<ModeKind, ModeHandler>,
    started: bool,
}

impl ModeMachine {
    /// Register `handlers` with `initial` as the configured starting mode.
    ///
    /// Only the first handler of each kind is kept.
    pub fn new(initial: ModeKind, handlers: impl IntoIterator<Item = ModeHandler>) -> Self {
        let mut map = BTreeMap::new();
        for handler in handlers {
            map.entry(handler.kind()).or_insert(handler);
        }
        Self {
            active: initial,
            handlers: map,
            started: false,
        }
    }

    pub fn active(&self) -> ModeKind {
        self.active
    }

    pub fn is_registered(&self, kind: ModeKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// True when the configured initial mode has no handler.
    pub fn is_idle(&self) -> bool {
        !self.is_registered(self.active)
    }

    pub fn handler(&self, kind: ModeKind) -> Option<&ModeHandler> {
        self.handlers.get(&kind)
    }

    pub fn build_mode(&self) -> Option<&BuildMode> {
        match self.handlers.get(&ModeKind::Build) {
            Some(ModeHandler::Build(mode)) => Some(mode),
            _ => None,
        }
    }

    pub fn edit_mode(&self) -> Option<&EditMode> {
        match self.handlers.get(&ModeKind::Edit) {
            Some(ModeHandler::Edit(mode)) => Some(mode),
            _ => None,
        }
    }

    /// Enter the initial mode. Later calls do nothing.
    pub fn start(&mut self, ctx: &ModeContext<'_>) -> Vec<ModeEvent> {
        if self.started {
            return Vec::new();
        }
        self.started = true;
        match self.handlers.get_mut(&self.active) {
            Some(handler) => {
                handler.enter(ctx);
                vec![ModeEvent::Entered(self.active)]
            }
            None => {
                log::warn!(
                    "[Modes] Initial mode {:?} is not registered, machine idle",
                    self.active
                );
                Vec::new()
            }
        }
    }

    /// Run the active mode and apply the switch it asks for.
    ///
    /// Starts the machine first if [`Self::start`] was never called.
    pub fn tick(&mut self, ctx: &ModeContext<'_>) -> ModeTick {
        let mut events = self.start(ctx);

        let current = self.active;
        let Some(handler) = self.handlers.get_mut(&current) else {
            return ModeTick::idle();
        };
        let requested = handler.update(ctx);

        let transition = if requested == current {
            Transition::Stay
        } else if self.handlers.contains_key(&requested) {
            if let Some(old) = self.handlers.get_mut(&current) {
                old.exit();
                events.push(ModeEvent::Exited(current));
            }
            if let Some(new) = self.handlers.get_mut(&requested) {
                new.enter(ctx);
                events.push(ModeEvent::Entered(requested));
            }
            self.active = requested;
            log::info!("[Modes] {:?} -> {:?}", current, requested);
            Transition::Switched {
                from: current,
                to: requested,
            }
        } else {
            log::warn!("[Modes] {:?} requested but not registered", requested);
            Transition::Rejected(GameplayError::ModeNotRegistered(requested))
        };

        ModeTick {
            requested: Some(requested),
            transition,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_kind_parse() {
        assert_eq!("Build".parse::<ModeKind>().ok(), Some(ModeKind::Build));
        assert_eq!("edit".parse::<ModeKind>().ok(), Some(ModeKind::Edit));
        assert!("shoot".parse::<ModeKind>().is_err());
    }

    #[test]
    fn test_duplicate_handlers_keep_first() {
        let machine = ModeMachine::new(
            ModeKind::Weapon,
            [
                ModeHandler::Weapon(WeaponMode::new()),
                ModeHandler::Weapon(WeaponMode::new()),
                ModeHandler::Edit(EditMode::new()),
            ],
        );
        assert!(machine.is_registered(ModeKind::Edit));
        assert!(!machine.is_registered(ModeKind::Build));
        assert!(!machine.is_idle());
    }

    #[test]
    fn test_unregistered_initial_is_idle() {
        let machine = ModeMachine::new(ModeKind::Build, [ModeHandler::Weapon(WeaponMode::new())]);
        assert!(machine.is_idle());
    }
}
