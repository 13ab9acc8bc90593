//! Shared fixtures for tq-core integration tests

#![allow(dead_code)]

use tq_core::data::{
    DropEntry, ItemTemplate, MapDefinition, MonsterTemplate, NpcTemplate, Placement,
    PlayerTemplate, Template, TemplateRegistry, TileRun, TileTemplate,
};
use tq_core::{GameRng, Map, Position, TemplateId, ViewConfig, WorldConfig};

pub const GRASS: TemplateId = TemplateId(0x1);
pub const ELDER: TemplateId = TemplateId(0x200);
pub const SLIME: TemplateId = TemplateId(0x300);
pub const HERB: TemplateId = TemplateId(0x500);
pub const HERO: TemplateId = TemplateId(0x900);

pub fn registry() -> TemplateRegistry {
    [
        Template::Tile(TileTemplate {
            id: GRASS,
            invisible: false,
        }),
        Template::Npc(NpcTemplate {
            id: ELDER,
            name: "elder".into(),
        }),
        Template::Item(ItemTemplate {
            id: HERB,
            name: "herb".into(),
        }),
        Template::Monster(MonsterTemplate {
            id: SLIME,
            name: "slime".into(),
            damage: 3,
            max_hp: 20,
            exp: 40,
            min_gold: 10,
            max_gold: 20,
            drops: vec![DropEntry {
                item: HERB,
                chance: 50,
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

pub fn meadow(width: i32, height: i32) -> MapDefinition {
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

pub fn at(id: TemplateId, x: i32, y: i32) -> Placement {
    Placement { id, x, y }
}

pub fn config() -> WorldConfig {
    WorldConfig {
        view: ViewConfig::new(10, 8),
        ..WorldConfig::default()
    }
}

pub fn load(definition: &MapDefinition, seed: u64) -> Map {
    let mut rng = GameRng::new(seed);
    Map::load(definition, &registry(), &mut rng, config()).expect("fixture map loads")
}

pub fn place(map: &mut Map, id: TemplateId, pos: Position) {
    let mut rng = GameRng::new(0);
    let entity = tq_core::data::EntityFactory::create(&registry(), id, &mut rng)
        .expect("fixture template exists");
    map.place_entity(entity, pos).expect("fixture cell is free");
}
