//! Headless sessions over sample and hand-written data

use std::fs;
use std::path::{Path, PathBuf};

use tilequest::{FRAME_MS, Session, SessionOptions, parse_config};
use tq_core::{Position, TemplateId, WorldConfig};
use tq_data::DataDir;

fn sample_data() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A 3x1 corridor: player spot, a boxed-in slime, a boulder
fn corridor(slime_damage: i32) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        &dir.path().join("entities.xml"),
        r#"<Entities>
            <Tile id="1"/>
            <Item id="501" name="slime jelly"/>
            <Object id="601" name="boulder" strong="true"/>
            <Player id="900" name="wanderer" maxHP="60" damage="12"/>
        </Entities>"#,
    );
    write_file(
        &dir.path().join("monsters/300.xml"),
        &format!(
            r#"<Monster name="slime" damage="{slime_damage}" maxHP="20" exp="40" minGold="10" maxGold="20" respawn="false">
                <drops><drop id="501" chance="100"/></drops>
            </Monster>"#
        ),
    );
    write_file(
        &dir.path().join("maps/1.xml"),
        r#"<Map name="corridor" width="3" height="1">
            <Tiles><tile id="1" amount="3"/></Tiles>
            <Monsters><monster x="1" y="0" id="300"/></Monsters>
            <Objects><object x="2" y="0" id="601"/></Objects>
        </Map>"#,
    );
    dir
}

fn start(dir: &Path, options: SessionOptions) -> Session {
    Session::load(&DataDir::new(dir), TemplateId(0x1), WorldConfig::default(), options).unwrap()
}

// ============================================================================
// Sample data
// ============================================================================

#[test]
fn test_sample_meadow_runs() {
    let mut session = start(
        &sample_data(),
        SessionOptions {
            seed: 7,
            ..SessionOptions::default()
        },
    );
    assert_eq!(session.run(100), 100);

    let summary = session.summary();
    assert_eq!(summary.map, "Sunny Meadow");
    assert_eq!(summary.map_id, "1");
    assert_eq!(summary.frames, 100);
    assert_eq!(summary.elapsed_ms, 100 * FRAME_MS);
    assert_eq!(summary.monsters_alive, 4);
    assert_eq!(summary.kills, 0);

    let player = summary.player.unwrap();
    assert_eq!(player.name, "wanderer");
    assert_eq!(player.hp, player.max_hp);
}

#[test]
fn test_same_seed_same_summary() {
    let options = SessionOptions {
        seed: 99,
        ..SessionOptions::default()
    };
    let mut a = start(&sample_data(), options);
    let mut b = start(&sample_data(), options);
    a.run(300);
    b.run(300);
    assert_eq!(a.summary(), b.summary());
    assert_eq!(a.render_ascii().to_string(), b.render_ascii().to_string());
}

#[test]
fn test_summary_serializes() {
    let session = start(&sample_data(), SessionOptions::default());
    let json = serde_json::to_value(session.summary()).unwrap();
    assert_eq!(json["frames"], 0);
    assert_eq!(json["player"]["level"], 1);
    assert!(json["camera"]["x"].is_number());
}

// ============================================================================
// Combat
// ============================================================================

#[test]
fn test_auto_attack_kills_boxed_slime() {
    let dir = corridor(3);
    let mut session = start(
        dir.path(),
        SessionOptions {
            seed: 1,
            player: Some(Position::new(0, 0)),
            auto_attack: true,
        },
    );

    // 20 hp at 12 damage takes two swings, one attack cooldown apart
    session.run(120);
    assert_eq!(session.kills(), 0);
    session.run(80);
    assert_eq!(session.kills(), 1);

    let summary = session.summary();
    assert_eq!(summary.monsters_alive, 0);
    let player = summary.player.unwrap();
    assert_eq!(player.exp, 40);
    assert!((10..20).contains(&player.gold), "gold {}", player.gold);
    assert!(player.hp < player.max_hp);
    assert!(player.hp > 0);

    let drop_cell = session.map().get(Position::new(1, 0)).unwrap();
    assert_eq!(drop_cell.items().len(), 1);
}

#[test]
fn test_run_stops_when_player_falls() {
    let dir = corridor(100);
    let mut session = start(
        dir.path(),
        SessionOptions {
            seed: 1,
            player: Some(Position::new(0, 0)),
            auto_attack: true,
        },
    );
    assert_eq!(session.run(50), 2);
    assert!(session.summary().player.unwrap().hp <= 0);
}

#[test]
fn test_without_auto_attack_nothing_fights() {
    let dir = corridor(3);
    let mut session = start(
        dir.path(),
        SessionOptions {
            seed: 1,
            player: Some(Position::new(0, 0)),
            auto_attack: false,
        },
    );
    session.run(200);
    let summary = session.summary();
    assert_eq!(summary.kills, 0);
    assert_eq!(summary.monsters_alive, 1);
    assert_eq!(summary.player.unwrap().hp, 60);
}

// ============================================================================
// Setup errors and rendering
// ============================================================================

#[test]
fn test_player_on_occupied_cell_is_an_error() {
    let dir = corridor(3);
    let result = Session::load(
        &DataDir::new(dir.path()),
        TemplateId(0x1),
        WorldConfig::default(),
        SessionOptions {
            player: Some(Position::new(2, 0)),
            ..SessionOptions::default()
        },
    );
    let err = result.err().unwrap();
    assert!(format!("{err:#}").contains("(2, 0)"), "{err:#}");
}

#[test]
fn test_unknown_map_is_an_error() {
    let result = Session::load(
        &DataDir::new(sample_data()),
        TemplateId(0x7f),
        WorldConfig::default(),
        SessionOptions::default(),
    );
    assert!(format!("{:#}", result.err().unwrap()).contains("7f"));
}

#[test]
fn test_corridor_renders() {
    let dir = corridor(3);
    let config = parse_config(r#"{ "view": { "width": 3, "height": 1 } }"#).unwrap();
    let session = Session::load(
        &DataDir::new(dir.path()),
        TemplateId(0x1),
        config,
        SessionOptions {
            player: Some(Position::new(0, 0)),
            ..SessionOptions::default()
        },
    )
    .unwrap();
    assert_eq!(session.render_ascii().to_string(), "@m#\n");
}
