//! `monsters/<hex>.xml`: one monster template per file

use std::path::Path;

use tq_core::TemplateId;
use tq_core::combat::SkillId;
use tq_core::data::{DropEntry, MonsterTemplate};

use crate::DataError;
use crate::xml::{Source, elements, section};

/// Parse a `<Monster>` document for template `id`
///
/// `respawn` defaults to true. `drops` and `skills` are optional sections;
/// drop chances must lie in 0..=100.
pub fn parse_monster(
    path: &Path,
    raw: &str,
    id: TemplateId,
) -> Result<MonsterTemplate, DataError> {
    let source = Source::parse(path, raw)?;
    let root = source.root("Monster")?;

    let mut drops = Vec::new();
    if let Some(list) = section(root, "drops") {
        for node in elements(list) {
            let chance: u8 = source.number(node, "chance")?;
            if chance > 100 {
                return Err(source.error_at(node, format!("drop chance {chance} exceeds 100")));
            }
            drops.push(DropEntry {
                item: source.hex(node, "id")?,
                chance,
            });
        }
    }

    let mut skills = Vec::new();
    if let Some(list) = section(root, "skills") {
        for node in elements(list) {
            skills.push(SkillId(source.hex(node, "id")?.0));
        }
    }

    let template = MonsterTemplate {
        id,
        name: source.attr(root, "name")?.to_string(),
        damage: source.number(root, "damage")?,
        max_hp: source.number(root, "maxHP")?,
        exp: source.number(root, "exp")?,
        min_gold: source.number(root, "minGold")?,
        max_gold: source.number(root, "maxGold")?,
        drops,
        skills,
        respawn: source.flag(root, "respawn", true)?,
    };
    template
        .validate()
        .map_err(|err| source.error_at(root, err.to_string()))?;
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tq_core::combat::MELEE;

    const GOBLIN: &str = r#"<Monster name="goblin" damage="4" maxHP="30" exp="12" minGold="10" maxGold="20">
        <drops>
            <drop id="500" chance="100"/>
            <drop id="501" chance="5"/>
        </drops>
        <skills>
            <skill id="700"/>
        </skills>
    </Monster>"#;

    #[test]
    fn test_parse_monster() {
        let m = parse_monster(Path::new("monsters/300.xml"), GOBLIN, TemplateId(0x300)).unwrap();
        assert_eq!(m.id, TemplateId(0x300));
        assert_eq!(m.name, "goblin");
        assert_eq!(m.damage, 4);
        assert_eq!(m.max_hp, 30);
        assert_eq!(m.exp, 12);
        assert_eq!((m.min_gold, m.max_gold), (10, 20));
        assert_eq!(
            m.drops,
            vec![
                DropEntry {
                    item: TemplateId(0x500),
                    chance: 100
                },
                DropEntry {
                    item: TemplateId(0x501),
                    chance: 5
                },
            ]
        );
        assert_eq!(m.skills, vec![MELEE]);
        assert!(m.respawn);
    }

    #[test]
    fn test_sections_are_optional() {
        let raw = r#"<Monster name="rat" damage="1" maxHP="5" exp="1" minGold="0" maxGold="0" respawn="false"/>"#;
        let m = parse_monster(Path::new("monsters/301.xml"), raw, TemplateId(0x301)).unwrap();
        assert!(m.drops.is_empty());
        assert!(m.skills.is_empty());
        assert!(!m.respawn);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let path = Path::new("monsters/302.xml");
        let raw = r#"<Monster name="x" damage="lots" maxHP="5" exp="1" minGold="0" maxGold="1"/>"#;
        assert!(matches!(
            parse_monster(path, raw, TemplateId(0x302)),
            Err(DataError::Invalid { .. })
        ));

        let raw = r#"<Monster name="x" damage="1" maxHP="5" exp="1" minGold="0" maxGold="1">
            <drops><drop id="500" chance="150"/></drops>
        </Monster>"#;
        assert!(matches!(
            parse_monster(path, raw, TemplateId(0x302)),
            Err(DataError::Invalid { .. })
        ));

        let raw = r#"<Monster name="x" damage="1" maxHP="5" exp="1" minGold="9" maxGold="1"/>"#;
        assert!(matches!(
            parse_monster(path, raw, TemplateId(0x302)),
            Err(DataError::Invalid { .. })
        ));
    }
}
