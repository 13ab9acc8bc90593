//! `entities.xml`: the catalog of non-monster templates

use std::path::Path;

use roxmltree::Node;
use tq_core::data::{
    ItemTemplate, NpcTemplate, ObjectTemplate, PlayerTemplate, PortalTemplate, Template,
    TileTemplate,
};
use tq_core::entity::PortalLink;

use crate::DataError;
use crate::xml::{Source, elements};

/// Parse an `<Entities>` document
///
/// ```xml
/// <Entities>
///   <Tile id="1"/>
///   <Portal id="100" map="2" portal="101"/>
///   <Item id="500" name="herb"/>
///   <Object id="600" name="house">
///     <Block dx="0" dy="0"/>
///   </Object>
///   <Npc id="200" name="elder"/>
///   <Player id="900" name="hero" maxHP="50" damage="10"/>
/// </Entities>
/// ```
pub fn parse_entities(path: &Path, raw: &str) -> Result<Vec<Template>, DataError> {
    let source = Source::parse(path, raw)?;
    let root = source.root("Entities")?;
    elements(root)
        .map(|node| parse_template(&source, node))
        .collect()
}

fn parse_template<'input>(
    source: &Source<'_, 'input>,
    node: Node<'_, 'input>,
) -> Result<Template, DataError> {
    let id = source.hex(node, "id")?;
    let template = match node.tag_name().name() {
        "Tile" => Template::Tile(TileTemplate {
            id,
            invisible: source.flag(node, "invisible", false)?,
        }),
        "Portal" => {
            let destination = match node.attribute("map") {
                Some(_) => Some(PortalLink {
                    map: source.hex(node, "map")?,
                    portal: source.hex(node, "portal")?,
                }),
                None => None,
            };
            Template::Portal(PortalTemplate {
                id,
                invisible: source.flag(node, "invisible", false)?,
                destination,
            })
        }
        "Item" => Template::Item(ItemTemplate {
            id,
            name: source.attr(node, "name")?.to_string(),
        }),
        "Object" => {
            let blocks = elements(node)
                .filter(|child| child.tag_name().name() == "Block")
                .map(|block| -> Result<(i32, i32), DataError> {
                    Ok((source.number(block, "dx")?, source.number(block, "dy")?))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Template::Object(ObjectTemplate {
                id,
                name: source.attr(node, "name")?.to_string(),
                strong: source.flag(node, "strong", false)?,
                blocks,
            })
        }
        "Npc" => Template::Npc(NpcTemplate {
            id,
            name: source.attr(node, "name")?.to_string(),
        }),
        "Player" => Template::Player(PlayerTemplate {
            id,
            name: source.attr(node, "name")?.to_string(),
            max_hp: source.number(node, "maxHP")?,
            damage: source.number(node, "damage")?,
        }),
        other => {
            return Err(source.error_at(node, format!("unknown entity type <{other}>")));
        }
    };
    Ok(template)
}
