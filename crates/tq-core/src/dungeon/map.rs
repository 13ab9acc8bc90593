//! The slot grid and everything that happens on it

use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use super::{Camera, CameraCommand, CameraControl, Frame, RenderPass, Renderer, Slot, Spawner};
use crate::data::{EntityFactory, MapDefinition, Placement};
use crate::entity::{
    Block, Category, Direction, Entity, EntityFlags, EntityKind, EntityUid, Object, Portal,
    Position, TemplateId,
};
use crate::monster::{Loot, Monster};
use crate::player::Player;
use crate::{GameRng, WorldConfig, WorldError};

/// Result of striking a monster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitReport {
    pub monster: EntityUid,
    pub damage: i32,
    pub killed: bool,
    /// Rewards, present only on the killing blow
    pub loot: Option<Loot>,
}

/// Row-major index of `pos` in a `width x height` grid
fn cell_index(width: i32, height: i32, pos: Position) -> Option<usize> {
    if pos.x < 0 || pos.y < 0 || pos.x >= width || pos.y >= height {
        return None;
    }
    usize::try_from(pos.y * width + pos.x).ok()
}

fn expect_kind(entity: &Entity, expected: EntityKind) -> Result<(), WorldError> {
    let found = entity.kind();
    if found == expected {
        Ok(())
    } else {
        Err(WorldError::WrongKind {
            id: entity.template(),
            expected,
            found,
        })
    }
}

/// A fixed-size grid of slots
///
/// The map owns every entity through its slots. The player is tracked by a
/// non-owning `(uid, position)` handle kept in sync by every operation that
/// moves or removes it.
#[derive(Debug)]
pub struct Map {
    id: TemplateId,
    name: String,
    width: i32,
    height: i32,
    slots: Vec<Slot>,
    camera: Camera,
    control: CameraControl,
    player: Option<(EntityUid, Position)>,
    spawners: Vec<Spawner>,
    config: WorldConfig,
}

impl Map {
    /// Empty map: every slot exists but holds nothing
    pub fn new(
        id: TemplateId,
        name: impl Into<String>,
        width: i32,
        height: i32,
        config: WorldConfig,
    ) -> Result<Self, WorldError> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        let cells = width
            .checked_mul(height)
            .and_then(|cells| usize::try_from(cells).ok())
            .ok_or(WorldError::InvalidDimensions { width, height })?;

        Ok(Self {
            id,
            name: name.into(),
            width,
            height,
            slots: vec![Slot::new(); cells],
            camera: Camera::new(config.view, width, height),
            control: CameraControl::default(),
            player: None,
            spawners: Vec::new(),
            config,
        })
    }

    /// Build a populated map from its definition
    ///
    /// Tiles fill the grid row-major, then portals, monsters, NPCs and
    /// objects go to their explicit cells. Every monster gets a spawner.
    pub fn load(
        definition: &MapDefinition,
        factory: &dyn EntityFactory,
        rng: &mut GameRng,
        config: WorldConfig,
    ) -> Result<Self, WorldError> {
        let mut map = Self::new(
            definition.id,
            definition.name.clone(),
            definition.width,
            definition.height,
            config,
        )?;

        let expected = map.slots.len();
        let actual = definition.tile_supply();
        if actual != expected {
            return Err(WorldError::TileCountMismatch { expected, actual });
        }

        for (i, id) in definition.expand_tiles().into_iter().enumerate() {
            let tile = factory.create(id, rng)?;
            expect_kind(&tile, EntityKind::Tile)?;
            let pos = map.position_of(i);
            map.place_entity(tile, pos)?;
        }

        map.load_placements(&definition.portals, EntityKind::Portal, factory, rng)?;
        map.load_placements(&definition.monsters, EntityKind::Monster, factory, rng)?;
        map.load_placements(&definition.npcs, EntityKind::Npc, factory, rng)?;
        map.load_placements(&definition.objects, EntityKind::Object, factory, rng)?;

        info!(
            map = %map.name,
            id = %map.id,
            width = map.width,
            height = map.height,
            monsters = map.spawners.len(),
            "map loaded"
        );
        Ok(map)
    }

    fn load_placements(
        &mut self,
        placements: &[Placement],
        kind: EntityKind,
        factory: &dyn EntityFactory,
        rng: &mut GameRng,
    ) -> Result<(), WorldError> {
        for placement in placements {
            let entity = factory.create(placement.id, rng)?;
            expect_kind(&entity, kind)?;
            let respawn = match &entity {
                Entity::Monster(m) => Some(m.respawn),
                _ => None,
            };
            let uid = self.place_entity(entity, Position::new(placement.x, placement.y))?;
            if let Some(respawn) = respawn {
                self.spawners.push(Spawner::new(
                    placement.id,
                    uid,
                    respawn,
                    self.config.spawn_cooldown_ms,
                ));
            }
        }
        Ok(())
    }

    pub fn id(&self) -> TemplateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    fn index(&self, pos: Position) -> Option<usize> {
        cell_index(self.width, self.height, pos)
    }

    fn position_of(&self, index: usize) -> Position {
        let i = index as i32;
        Position::new(i % self.width, i / self.width)
    }

    pub fn is_within_map(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Slot at `pos`, `None` past the edges
    pub fn get(&self, pos: Position) -> Option<&Slot> {
        self.index(pos).map(|i| &self.slots[i])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Slot> {
        self.index(pos).map(|i| &mut self.slots[i])
    }

    /// Every slot, row-major
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Every slot with its position, row-major
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Slot)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (self.position_of(i), slot))
    }

    pub fn strong_entities(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().filter_map(Slot::strong)
    }

    pub fn monsters(&self) -> impl Iterator<Item = &Monster> {
        self.slots.iter().filter_map(Slot::monster)
    }

    pub fn spawners(&self) -> &[Spawner] {
        &self.spawners
    }

    /// True if `pos` is on the map and free of strong entities
    pub fn can_enter(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Slot::can_accept_strong)
    }

    /// Put `entity` at `pos`
    ///
    /// A non-strong object also drops one strong block per footprint offset;
    /// blocks that fall off the map or onto an occupied cell are skipped.
    /// Placing a player records the handle and recenters the camera.
    pub fn place_entity(
        &mut self,
        mut entity: Entity,
        pos: Position,
    ) -> Result<EntityUid, WorldError> {
        let id = entity.template();
        let Some(idx) = self.index(pos) else {
            return Err(WorldError::OutOfBounds { id, x: pos.x, y: pos.y });
        };
        if entity.category() == Category::Strong && !self.slots[idx].can_accept_strong() {
            return Err(WorldError::Occupied { id, x: pos.x, y: pos.y });
        }

        entity.set_position(pos);
        let uid = entity.uid();
        let is_player = matches!(entity, Entity::Player(_));
        if let Entity::Object(object) = &mut entity {
            if !object.base.flags.contains(EntityFlags::STRONG) {
                self.place_blocks(object);
            }
        }
        self.slots[idx].place(entity);

        if is_player {
            if let Some((old, _)) = self.player {
                warn!(old = old.raw(), new = uid.raw(), "second player placed, handle replaced");
            }
            self.player = Some((uid, pos));
            self.center_view();
        }
        Ok(uid)
    }

    fn place_blocks(&mut self, object: &mut Object) {
        object.placed_blocks.clear();
        let anchor = object.base.pos;
        for (dx, dy) in object.block_offsets.clone() {
            let at = anchor.offset(dx, dy);
            let Some(slot) = self.get_mut(at) else {
                warn!(object = %object.name, x = at.x, y = at.y, "block outside the map, skipped");
                continue;
            };
            if !slot.can_accept_strong() {
                warn!(object = %object.name, x = at.x, y = at.y, "block cell occupied, skipped");
                continue;
            }
            let mut block = Block::new(object);
            block.base.pos = at;
            object.placed_blocks.push((block.base.uid, at));
            slot.place(Entity::Block(block));
        }
    }

    /// Remove the entity `uid` from the slot at `pos`
    ///
    /// Removing an object also removes the blocks it placed. Removing a
    /// monster is permanent: its spawner is dropped and it never respawns.
    /// Nothing happens if the entity is not there.
    pub fn remove_entity(&mut self, uid: EntityUid, pos: Position) -> Option<Entity> {
        let removed = self.get_mut(pos)?.remove(uid)?;
        match &removed {
            Entity::Object(object) => {
                for &(block, at) in object.placed_blocks() {
                    if let Some(slot) = self.get_mut(at) {
                        slot.remove(block);
                    }
                }
            }
            Entity::Monster(_) => self.spawners.retain(|s| !s.watches(uid)),
            _ => {}
        }
        if self.player.is_some_and(|(player, _)| player == uid) {
            self.player = None;
        }
        Some(removed)
    }

    /// Take the player off the map; a no-op without a player
    pub fn remove_player(&mut self) -> Option<Player> {
        let (uid, pos) = self.player.take()?;
        let removed = self.get_mut(pos)?.remove(uid)?;
        match removed {
            Entity::Player(player) => Some(*player),
            other => {
                warn!(kind = %other.kind(), "player handle pointed at another entity");
                self.get_mut(pos)?.place(other);
                None
            }
        }
    }

    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }

    pub fn player_position(&self) -> Option<Position> {
        self.player.map(|(_, pos)| pos)
    }

    pub fn is_player_at(&self, pos: Position) -> bool {
        self.player_position() == Some(pos)
    }

    pub fn player(&self) -> Option<&Player> {
        self.get(self.player_position()?)?.player()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        let pos = self.player_position()?;
        self.get_mut(pos)?.player_mut()
    }

    /// Turn the strong entity at `from` toward `dir` and move it one cell if
    /// the destination can take it
    ///
    /// Returns true if it moved. The entity keeps its new facing either way.
    pub fn step(&mut self, from: Position, dir: Direction) -> bool {
        let Some(from_idx) = self.index(from) else {
            return false;
        };
        let Some(mut entity) = self.slots[from_idx].take_strong() else {
            return false;
        };
        entity.face(dir);

        let dest = from.step(dir);
        let dest_idx = self
            .index(dest)
            .filter(|&i| self.slots[i].can_accept_strong());
        let moved = dest_idx.is_some();
        let (idx, at) = match dest_idx {
            Some(i) => (i, dest),
            None => (from_idx, from),
        };

        entity.set_position(at);
        let uid = entity.uid();
        let is_player = matches!(entity, Entity::Player(_));
        self.slots[idx].place(entity);

        if is_player {
            self.player = Some((uid, at));
            if moved {
                self.center_view();
            }
        }
        moved
    }

    /// Step the player, if there is one
    pub fn move_player(&mut self, dir: Direction) -> bool {
        match self.player_position() {
            Some(pos) => self.step(pos, dir),
            None => false,
        }
    }

    /// Advance the world by one frame
    ///
    /// Pending camera commands apply first. Every live monster is updated
    /// once, in row-major order of where it stood when the pass began, then
    /// spawners tick.
    pub fn update(&mut self, frame: &mut Frame<'_>) {
        for command in self.control.drain() {
            self.apply_camera(command);
        }

        let monsters: Vec<(usize, EntityUid)> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                slot.monster()
                    .filter(|m| !m.is_dead())
                    .map(|m| (i, m.base.uid))
            })
            .collect();
        for (idx, uid) in monsters {
            self.update_monster(idx, uid, frame);
        }

        self.tick_spawners(frame);
    }

    fn update_monster(&mut self, idx: usize, uid: EntityUid, frame: &mut Frame<'_>) {
        if self.slots[idx].strong_uid() != Some(uid) {
            return;
        }
        let Some(Entity::Monster(mut monster)) = self.slots[idx].take_strong() else {
            return;
        };

        let player = self.player_position();
        let cooldown = self.config.attack_cooldown_ms;
        let outcome = monster.update(
            player,
            frame.now_ms,
            cooldown,
            |p| self.can_enter(p),
            frame.rng,
        );

        if let Some(skill) = outcome.strike {
            if let Some(target) = self.player_mut() {
                let dealt = skill.attack(monster.damage, target);
                debug!(
                    monster = %monster.name,
                    skill = %skill.id,
                    dealt,
                    hp = target.hp(),
                    "monster strikes"
                );
                if target.is_dead() {
                    info!(player = %target.name, "player has fallen");
                }
            }
        }

        let at = self.index(monster.position()).unwrap_or(idx);
        self.slots[at].place(Entity::Monster(monster));
    }

    /// Advance every spawner; due ones respawn onto free cells
    pub fn tick_spawners(&mut self, frame: &mut Frame<'_>) {
        for i in 0..self.spawners.len() {
            let Some(pos) = self.spawners[i].poll(frame.now_ms) else {
                continue;
            };
            if !self.can_enter(pos) {
                continue;
            }
            let template = self.spawners[i].template();
            match frame.factory.create(template, frame.rng) {
                Ok(entity @ Entity::Monster(_)) => match self.place_entity(entity, pos) {
                    Ok(uid) => {
                        info!(template = %template, x = pos.x, y = pos.y, "monster respawned");
                        self.spawners[i].respawned(uid);
                    }
                    Err(err) => warn!(%err, "respawn failed"),
                },
                Ok(other) => warn!(
                    template = %template,
                    kind = %other.kind(),
                    "spawner template is not a monster"
                ),
                Err(err) => warn!(%err, "respawn failed"),
            }
        }
    }

    /// Damage the monster at `pos`
    ///
    /// On the killing blow the monster leaves the map, its drops land on the
    /// cell, the player collects exp and gold, active quests hear about the
    /// kill and the spawner starts its cooldown.
    pub fn hit_monster_at(
        &mut self,
        pos: Position,
        damage: i32,
        frame: &mut Frame<'_>,
    ) -> Option<HitReport> {
        let idx = self.index(pos)?;
        let monster = self.slots[idx].monster_mut()?;
        let uid = monster.base.uid;
        if !monster.hit(damage) {
            return Some(HitReport {
                monster: uid,
                damage,
                killed: false,
                loot: None,
            });
        }

        let loot = monster.die(frame.rng);
        self.slots[idx].remove(uid);
        if let Some(loot) = &loot {
            self.resolve_loot(loot, frame);
        }
        for spawner in self.spawners.iter_mut().filter(|s| s.watches(uid)) {
            spawner.monster_died(pos, frame.now_ms);
        }

        Some(HitReport {
            monster: uid,
            damage,
            killed: true,
            loot,
        })
    }

    fn resolve_loot(&mut self, loot: &Loot, frame: &mut Frame<'_>) {
        for &item in &loot.drops {
            match frame.factory.create(item, frame.rng) {
                Ok(entity) if entity.kind() == EntityKind::Item => {
                    if let Err(err) = self.place_entity(entity, loot.position) {
                        warn!(%err, "drop could not be placed");
                    }
                }
                Ok(other) => warn!(template = %item, kind = %other.kind(), "drop is not an item"),
                Err(err) => warn!(%err, "drop could not be created"),
            }
        }

        if let Some(player) = self.player_mut() {
            player.gain_exp(loot.exp);
            player.gain_gold(loot.gold);
            for quest in player.active_quests_mut() {
                quest.notify_monster_killed(loot.monster);
            }
        }
    }

    /// The player strikes the cell it faces with its own damage
    pub fn player_attack(&mut self, frame: &mut Frame<'_>) -> Option<HitReport> {
        let player = self.player()?;
        let target = player.position().step(player.facing);
        let damage = player.damage;
        self.hit_monster_at(target, damage, frame)
    }

    /// Move the first item under the player into its inventory
    pub fn pick_up(&mut self) -> Option<TemplateId> {
        let pos = self.player_position()?;
        let template = self.get(pos)?.items().first()?.template();
        self.pick_up_item(template)
    }

    /// Move the first item built from `template` under the player into its
    /// inventory
    pub fn pick_up_item(&mut self, template: TemplateId) -> Option<TemplateId> {
        let pos = self.player_position()?;
        let slot = self.get_mut(pos)?;
        let item = match slot.take_item(template)? {
            Entity::Item(item) => item,
            other => {
                slot.place(other);
                return None;
            }
        };
        let player = self.player_mut()?;
        debug!(player = %player.name, item = %item.name, "picked up");
        player.add_item(item);
        Some(template)
    }

    /// Portal built from template `id`
    pub fn find_portal(&self, id: TemplateId) -> Option<&Portal> {
        self.slots.iter().find_map(|slot| match slot.get(Category::Portal) {
            Some(Entity::Portal(portal)) if portal.base.template == id => Some(portal),
            _ => None,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn view_offset(&self) -> Position {
        self.camera.offset()
    }

    /// Handle for queueing camera commands from outside the update loop
    pub fn camera_control(&self) -> CameraControl {
        self.control.clone()
    }

    pub fn move_view(&mut self, dx: i32, dy: i32) {
        self.camera.move_view(dx, dy);
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    /// Scroll until the player is clear of the viewport edges
    pub fn center_view(&mut self) {
        if let Some(player) = self.player_position() {
            self.apply_camera_with(CameraCommand::Center, Some(player));
        }
    }

    fn apply_camera(&mut self, command: CameraCommand) {
        let player = self.player_position();
        self.apply_camera_with(command, player);
    }

    fn apply_camera_with(&mut self, command: CameraCommand, player: Option<Position>) {
        let (width, height) = (self.width, self.height);
        let slots = &self.slots;
        self.camera.apply(command, player, |p| {
            cell_index(width, height, p).is_some_and(|i| slots[i].has_ground())
        });
    }

    /// Slot under a viewport cell, for hit-testing
    pub fn slot_at_screen(&self, screen: Position) -> Option<&Slot> {
        if !self.camera.view().contains(screen) {
            return None;
        }
        self.get(self.camera.to_map(screen))
    }

    /// Draw the visible part of the map
    ///
    /// For each pass, layers go ground, portal, items, strong, object, and
    /// within a layer slots go row-major. Invisible entities and dead
    /// monsters are skipped.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let view = self.camera.view();
        for pass in RenderPass::iter() {
            for category in Category::iter() {
                for (pos, slot) in self.cells() {
                    let screen = self.camera.to_screen(pos);
                    if !view.contains(screen) {
                        continue;
                    }
                    for entity in slot.layer(category) {
                        if entity.is_invisible() || is_dead_monster(entity) {
                            continue;
                        }
                        renderer.draw(pass, entity, screen);
                    }
                }
            }
        }
    }
}

fn is_dead_monster(entity: &Entity) -> bool {
    matches!(entity, Entity::Monster(m) if m.is_dead())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        DropEntry, ItemTemplate, MonsterTemplate, ObjectTemplate, PlayerTemplate, PortalTemplate,
        Template, TemplateRegistry, TileRun, TileTemplate,
    };
    use crate::entity::PortalLink;
    use crate::monster::MonsterState;
    use crate::player::Quest;
    use crate::ViewConfig;

    const GRASS: TemplateId = TemplateId(0x1);
    const DOOR: TemplateId = TemplateId(0x100);
    const SLIME: TemplateId = TemplateId(0x300);
    const HERB: TemplateId = TemplateId(0x500);
    const HOUSE: TemplateId = TemplateId(0x600);
    const HERO: TemplateId = TemplateId(0x900);

    fn registry() -> TemplateRegistry {
        [
            Template::Tile(TileTemplate {
                id: GRASS,
                invisible: false,
            }),
            Template::Portal(PortalTemplate {
                id: DOOR,
                invisible: false,
                destination: Some(PortalLink {
                    map: TemplateId(0x2),
                    portal: TemplateId(0x101),
                }),
            }),
            Template::Item(ItemTemplate {
                id: HERB,
                name: "herb".into(),
            }),
            Template::Object(ObjectTemplate {
                id: HOUSE,
                name: "house".into(),
                strong: false,
                blocks: vec![(0, 0), (1, 0), (5, 0)],
            }),
            Template::Monster(MonsterTemplate {
                id: SLIME,
                name: "slime".into(),
                damage: 3,
                max_hp: 20,
                exp: 40,
                min_gold: 5,
                max_gold: 6,
                drops: vec![DropEntry {
                    item: HERB,
                    chance: 100,
                }],
                skills: vec![],
                respawn: true,
            }),
            Template::Player(PlayerTemplate {
                id: HERO,
                name: "hero".into(),
                max_hp: 50,
                damage: 10,
            }),
        ]
        .into_iter()
        .collect()
    }

    fn definition(width: i32, height: i32) -> MapDefinition {
        MapDefinition {
            id: TemplateId(0x1),
            name: "meadow".into(),
            width,
            height,
            tiles: vec![TileRun {
                id: GRASS,
                amount: (width * height) as usize,
            }],
            ..MapDefinition::default()
        }
    }

    fn config() -> WorldConfig {
        WorldConfig {
            view: ViewConfig::new(10, 10),
            ..WorldConfig::default()
        }
    }

    fn load(def: &MapDefinition) -> Map {
        let mut rng = GameRng::new(42);
        Map::load(def, &registry(), &mut rng, config()).unwrap()
    }

    fn spawn(map: &mut Map, id: TemplateId, pos: Position) -> EntityUid {
        let mut rng = GameRng::new(7);
        let entity = registry().create(id, &mut rng).unwrap();
        map.place_entity(entity, pos).unwrap()
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert_eq!(
            Map::new(TemplateId(1), "void", 0, 5, config()).unwrap_err(),
            WorldError::InvalidDimensions {
                width: 0,
                height: 5
            }
        );
    }

    #[test]
    fn test_new_rejects_overflowing_dimensions() {
        assert_eq!(
            Map::new(TemplateId(1), "vast", 70_000, 70_000, config()).unwrap_err(),
            WorldError::InvalidDimensions {
                width: 70_000,
                height: 70_000
            }
        );
    }

    #[test]
    fn test_load_fills_every_slot() {
        let map = load(&definition(4, 3));
        assert_eq!(map.slots().count(), 12);
        assert!(map.slots().all(Slot::has_ground));
        assert_eq!(map.name(), "meadow");
    }

    #[test]
    fn test_load_tile_mismatch() {
        let mut def = definition(4, 3);
        def.tiles[0].amount = 11;
        let mut rng = GameRng::new(42);
        assert_eq!(
            Map::load(&def, &registry(), &mut rng, config()).unwrap_err(),
            WorldError::TileCountMismatch {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_load_huge_tile_runs_are_a_mismatch() {
        let mut def = definition(2, 1);
        def.tiles = vec![
            TileRun {
                id: GRASS,
                amount: usize::MAX,
            },
            TileRun {
                id: GRASS,
                amount: 3,
            },
        ];
        let mut rng = GameRng::new(42);
        assert_eq!(
            Map::load(&def, &registry(), &mut rng, config()).unwrap_err(),
            WorldError::TileCountMismatch {
                expected: 2,
                actual: usize::MAX
            }
        );
    }

    #[test]
    fn test_load_rejects_bad_placements() {
        let mut rng = GameRng::new(42);

        let mut def = definition(4, 3);
        def.monsters.push(Placement { id: SLIME, x: 9, y: 0 });
        assert!(matches!(
            Map::load(&def, &registry(), &mut rng, config()),
            Err(WorldError::OutOfBounds { .. })
        ));

        let mut def = definition(4, 3);
        def.monsters.push(Placement { id: SLIME, x: 1, y: 1 });
        def.monsters.push(Placement { id: SLIME, x: 1, y: 1 });
        assert!(matches!(
            Map::load(&def, &registry(), &mut rng, config()),
            Err(WorldError::Occupied { .. })
        ));

        let mut def = definition(4, 3);
        def.npcs.push(Placement { id: SLIME, x: 1, y: 1 });
        assert!(matches!(
            Map::load(&def, &registry(), &mut rng, config()),
            Err(WorldError::WrongKind {
                expected: EntityKind::Npc,
                found: EntityKind::Monster,
                ..
            })
        ));
    }

    #[test]
    fn test_load_registers_spawners_and_portals() {
        let mut def = definition(4, 3);
        def.portals.push(Placement { id: DOOR, x: 3, y: 2 });
        def.monsters.push(Placement { id: SLIME, x: 1, y: 1 });
        let map = load(&def);

        assert_eq!(map.spawners().len(), 1);
        assert_eq!(map.monsters().count(), 1);
        let portal = map.find_portal(DOOR).unwrap();
        assert_eq!(portal.base.pos, Position::new(3, 2));
        assert!(map.find_portal(TemplateId(0x101)).is_none());
    }

    #[test]
    fn test_object_places_and_removes_blocks() {
        let mut def = definition(4, 3);
        def.objects.push(Placement { id: HOUSE, x: 1, y: 0 });
        let mut map = load(&def);

        // (6, 0) is off the map and skipped
        assert!(map.get(Position::new(1, 0)).unwrap().block().is_some());
        assert!(map.get(Position::new(2, 0)).unwrap().block().is_some());
        assert_eq!(map.strong_entities().count(), 2);
        assert!(!map.can_enter(Position::new(2, 0)));

        let uid = map
            .get(Position::new(1, 0))
            .unwrap()
            .get(Category::Object)
            .unwrap()
            .uid();
        let removed = map.remove_entity(uid, Position::new(1, 0)).unwrap();
        assert_eq!(removed.kind(), EntityKind::Object);
        assert_eq!(map.strong_entities().count(), 0);
    }

    #[test]
    fn test_player_handle_follows_steps() {
        let mut map = load(&definition(4, 3));
        spawn(&mut map, HERO, Position::new(0, 0));
        assert!(map.is_player_at(Position::new(0, 0)));

        assert!(map.move_player(Direction::Right));
        assert!(map.is_player_at(Position::new(1, 0)));
        assert_eq!(map.player().unwrap().position(), Position::new(1, 0));

        // off the top edge: turns but stays
        assert!(!map.move_player(Direction::Up));
        assert_eq!(map.player().unwrap().facing, Direction::Up);
        assert!(map.is_player_at(Position::new(1, 0)));

        let player = map.remove_player().unwrap();
        assert_eq!(player.name, "hero");
        assert!(!map.has_player());
        assert!(map.remove_player().is_none());
        assert!(map.can_enter(Position::new(1, 0)));
    }

    #[test]
    fn test_step_blocked_by_strong_entity() {
        let mut map = load(&definition(4, 3));
        spawn(&mut map, HERO, Position::new(0, 0));
        spawn(&mut map, SLIME, Position::new(1, 0));
        assert!(!map.move_player(Direction::Right));
        assert!(map.is_player_at(Position::new(0, 0)));
        assert_eq!(map.player().unwrap().facing, Direction::Right);
    }

    #[test]
    fn test_kill_resolves_rewards_and_respawns() {
        let mut def = definition(4, 3);
        def.monsters.push(Placement { id: SLIME, x: 1, y: 0 });
        let mut map = load(&def);
        spawn(&mut map, HERO, Position::new(0, 0));
        map.player_mut().unwrap().facing = Direction::Right;
        map.player_mut()
            .unwrap()
            .add_quest(Quest::kill(1, "slime cull", SLIME, 1));

        let registry = registry();
        let mut rng = GameRng::new(42);
        let mut frame = Frame::new(1000, &mut rng, &registry);

        let first = map.player_attack(&mut frame).unwrap();
        assert!(!first.killed);
        assert_eq!(
            map.get(Position::new(1, 0)).unwrap().monster().unwrap().state(),
            MonsterState::Aggro
        );

        let second = map.player_attack(&mut frame).unwrap();
        assert!(second.killed);
        let loot = second.loot.unwrap();
        assert_eq!(loot.gold, 5);

        let cell = map.get(Position::new(1, 0)).unwrap();
        assert!(cell.can_accept_strong());
        assert_eq!(cell.items().len(), 1);

        let player = map.player().unwrap();
        assert_eq!(player.exp(), 40);
        assert_eq!(player.gold(), 5);
        assert!(player.quests()[0].is_complete());

        // nothing left to hit
        assert!(map.player_attack(&mut frame).is_none());

        // first tick arms, cooldown then has to pass
        map.tick_spawners(&mut Frame::new(1016, &mut rng, &registry));
        map.tick_spawners(&mut Frame::new(2000, &mut rng, &registry));
        assert_eq!(map.monsters().count(), 0);
        map.tick_spawners(&mut Frame::new(3000, &mut rng, &registry));
        assert_eq!(map.monsters().count(), 1);
        assert_eq!(
            map.get(Position::new(1, 0)).unwrap().monster().unwrap().hp(),
            20
        );
    }

    #[test]
    fn test_pick_up_moves_item_to_inventory() {
        let mut map = load(&definition(4, 3));
        spawn(&mut map, HERB, Position::new(2, 2));
        spawn(&mut map, HERO, Position::new(2, 2));
        assert_eq!(map.pick_up(), Some(HERB));
        assert_eq!(map.player().unwrap().inventory().len(), 1);
        assert!(map.get(Position::new(2, 2)).unwrap().items().is_empty());
        assert_eq!(map.pick_up(), None);
    }

    #[test]
    fn test_pick_up_item_by_template() {
        let mut map = load(&definition(4, 3));
        spawn(&mut map, HERB, Position::new(1, 1));
        spawn(&mut map, HERO, Position::new(1, 1));
        assert_eq!(map.pick_up_item(TemplateId(0x501)), None);
        assert_eq!(map.get(Position::new(1, 1)).unwrap().items().len(), 1);
        assert_eq!(map.pick_up_item(HERB), Some(HERB));
        assert_eq!(map.player().unwrap().inventory()[0].base.template, HERB);
    }

    #[test]
    fn test_removed_monster_never_respawns() {
        let mut def = definition(4, 3);
        def.monsters.push(Placement { id: SLIME, x: 2, y: 1 });
        let mut map = load(&def);
        let uid = map.monsters().next().unwrap().base.uid;

        let removed = map.remove_entity(uid, Position::new(2, 1)).unwrap();
        assert_eq!(removed.kind(), EntityKind::Monster);
        assert!(map.spawners().is_empty());

        let registry = registry();
        let mut rng = GameRng::new(42);
        for now_ms in [0, 5_000, 10_000] {
            map.tick_spawners(&mut Frame::new(now_ms, &mut rng, &registry));
        }
        assert_eq!(map.monsters().count(), 0);
    }

    #[derive(Default)]
    struct Recorder {
        draws: Vec<(RenderPass, EntityKind, Position)>,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, pass: RenderPass, entity: &Entity, screen: Position) {
            self.draws.push((pass, entity.kind(), screen));
        }
    }

    #[test]
    fn test_render_order_and_clipping() {
        let mut map = load(&definition(12, 12));
        spawn(&mut map, SLIME, Position::new(0, 0));
        spawn(&mut map, HERB, Position::new(11, 11));
        spawn(&mut map, HOUSE, Position::new(3, 3));

        let mut recorder = Recorder::default();
        map.render(&mut recorder);

        // 10x10 viewport of tiles, one monster, one object; blocks are invisible
        // and the herb is outside the viewport
        let per_pass = 100 + 1 + 1;
        assert_eq!(recorder.draws.len(), per_pass * 3);

        let base: Vec<_> = recorder
            .draws
            .iter()
            .filter(|(pass, ..)| *pass == RenderPass::Base)
            .map(|(_, kind, _)| *kind)
            .collect();
        assert!(base[..100].iter().all(|k| *k == EntityKind::Tile));
        assert_eq!(base[100], EntityKind::Monster);
        assert_eq!(base[101], EntityKind::Object);
    }

    #[test]
    fn test_camera_commands_apply_on_update() {
        let mut map = load(&definition(20, 20));
        let control = map.camera_control();
        control.move_view(3, 2);

        let registry = registry();
        let mut rng = GameRng::new(42);
        assert_eq!(map.view_offset(), Position::ORIGIN);
        map.update(&mut Frame::new(0, &mut rng, &registry));
        assert_eq!(map.view_offset(), Position::new(3, 2));
        assert!(map.slot_at_screen(Position::new(0, 0)).is_some());
        assert!(map.slot_at_screen(Position::new(10, 0)).is_none());

        control.move_view(500, -500);
        map.update(&mut Frame::new(16, &mut rng, &registry));
        assert_eq!(map.view_offset(), Position::new(10, 0));
        assert!(map.slot_at_screen(Position::new(9, 9)).is_some());
    }

    #[test]
    fn test_placing_player_centers_view() {
        let mut map = load(&definition(20, 20));
        spawn(&mut map, HERO, Position::new(15, 3));
        assert_eq!(map.view_offset(), Position::new(10, 0));
    }
}
