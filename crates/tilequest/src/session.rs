//! One map, one player, a simulated clock

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use tq_core::data::{EntityFactory, TemplateRegistry};
use tq_core::dungeon::{HitReport, Slot};
use tq_core::{Direction, EntityKind, Frame, GameRng, Map, Position, TemplateId, WorldConfig};
use tq_data::DataDir;

use crate::AsciiView;

/// Simulated milliseconds per frame
pub const FRAME_MS: u64 = 16;

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub seed: u64,
    /// Starting cell; the first free ground cell when unset
    pub player: Option<Position>,
    /// Swing at an adjacent monster whenever the attack cooldown allows
    pub auto_attack: bool,
}

/// End-of-run report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub map: String,
    pub map_id: String,
    pub seed: u64,
    pub frames: u64,
    pub elapsed_ms: u64,
    pub monsters_alive: usize,
    pub kills: u32,
    pub camera: Position,
    pub player: Option<PlayerSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub level: u32,
    pub exp: u64,
    pub gold: u64,
    pub items: usize,
}

pub struct Session {
    map: Map,
    registry: TemplateRegistry,
    rng: GameRng,
    frames: u64,
    auto_attack: bool,
    next_swing_ms: u64,
    kills: u32,
}

impl Session {
    /// Load map `map_id` from `data` and place the lowest-id player template
    pub fn load(
        data: &DataDir,
        map_id: TemplateId,
        config: WorldConfig,
        options: SessionOptions,
    ) -> Result<Self> {
        let registry = data
            .load_registry()
            .with_context(|| format!("failed to load templates from {}", data.root().display()))?;
        let def = data
            .load_map(map_id)
            .with_context(|| format!("failed to load map {map_id}"))?;
        let mut rng = GameRng::new(options.seed);
        let map = Map::load(&def, &registry, &mut rng, config)
            .with_context(|| format!("failed to build map {map_id}"))?;
        Self::start(map, registry, rng, options)
    }

    /// Place the player on an already built map
    pub fn start(
        mut map: Map,
        registry: TemplateRegistry,
        mut rng: GameRng,
        options: SessionOptions,
    ) -> Result<Self> {
        let template = registry
            .first_of_kind(EntityKind::Player)
            .context("no player template defined")?
            .id();
        let player = registry.create(template, &mut rng)?;
        let pos = match options.player {
            Some(pos) => pos,
            None => first_free_cell(&map).context("map has no free cell for the player")?,
        };
        map.place_entity(player, pos)
            .with_context(|| format!("cannot place player at ({}, {})", pos.x, pos.y))?;
        info!(map = %map.name(), seed = rng.seed(), x = pos.x, y = pos.y, "session started");

        Ok(Self {
            map,
            registry,
            rng,
            frames: 0,
            auto_attack: options.auto_attack,
            next_swing_ms: 0,
            kills: 0,
        })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn now_ms(&self) -> u64 {
        self.frames * FRAME_MS
    }

    /// Run up to `frames` frames, stopping early once the player has fallen
    ///
    /// Returns the number of frames actually run.
    pub fn run(&mut self, frames: u64) -> u64 {
        let start = self.frames;
        for _ in 0..frames {
            if self.player_fallen() {
                info!(frame = self.frames, "run stopped");
                break;
            }
            self.step();
        }
        self.frames - start
    }

    /// Advance the world by one frame
    pub fn step(&mut self) {
        let now_ms = self.now_ms();
        let mut frame = Frame::new(now_ms, &mut self.rng, &self.registry);
        self.map.update(&mut frame);

        if self.auto_attack && now_ms >= self.next_swing_ms {
            if let Some(report) = swing(&mut self.map, &mut frame) {
                self.next_swing_ms = now_ms + self.map.config().attack_cooldown_ms;
                if report.killed {
                    self.kills += 1;
                }
            }
        }
        self.frames += 1;
    }

    fn player_fallen(&self) -> bool {
        self.map.player().is_some_and(|p| p.is_dead())
    }

    /// Current viewport as text
    pub fn render_ascii(&self) -> AsciiView {
        let mut view = AsciiView::new(self.map.camera().view());
        self.map.render(&mut view);
        view
    }

    pub fn summary(&self) -> Summary {
        let player = self.map.player().map(|p| PlayerSummary {
            name: p.name.clone(),
            position: p.position(),
            hp: p.hp(),
            max_hp: p.max_hp(),
            level: p.level(),
            exp: p.exp(),
            gold: p.gold(),
            items: p.inventory().len(),
        });
        Summary {
            map: self.map.name().to_string(),
            map_id: self.map.id().hex(),
            seed: self.rng.seed(),
            frames: self.frames,
            elapsed_ms: self.now_ms(),
            monsters_alive: self.map.monsters().filter(|m| !m.is_dead()).count(),
            kills: self.kills,
            camera: self.map.view_offset(),
            player,
        }
    }
}

fn first_free_cell(map: &Map) -> Option<Position> {
    map.cells()
        .find(|(_, slot)| slot.has_ground() && slot.can_accept_strong())
        .map(|(pos, _)| pos)
}

/// Turn toward an adjacent live monster, keeping the current facing if it
/// already points at one, and strike
fn swing(map: &mut Map, frame: &mut Frame<'_>) -> Option<HitReport> {
    let player = map.player()?;
    let pos = player.position();
    let dir = std::iter::once(player.facing)
        .chain(Direction::ALL)
        .find(|&dir| map.get(pos.step(dir)).is_some_and(has_live_monster))?;

    map.player_mut()?.facing = dir;
    let report = map.player_attack(frame)?;
    debug!(damage = report.damage, killed = report.killed, "player swings");
    Some(report)
}

fn has_live_monster(slot: &Slot) -> bool {
    slot.monster().is_some_and(|m| !m.is_dead())
}
