//! `maps/<hex>.xml`: map layout

use std::path::Path;

use roxmltree::Node;
use tq_core::TemplateId;
use tq_core::data::{MapDefinition, Placement, TileRun};

use crate::DataError;
use crate::xml::{Source, elements, section};

/// Parse a `<Map>` document for map `id`
///
/// ```xml
/// <Map name="meadow" width="3" height="2">
///   <Tiles><tile id="1" amount="6"/></Tiles>
///   <Portals><portal x="2" y="1" id="100"/></Portals>
///   <Monsters><monster x="1" y="0" id="300"/></Monsters>
///   <NPCs/>
///   <Objects/>
/// </Map>
/// ```
///
/// The tile supply is not checked against the dimensions here; that is a
/// load-time error of the map itself.
pub fn parse_map(path: &Path, raw: &str, id: TemplateId) -> Result<MapDefinition, DataError> {
    let source = Source::parse(path, raw)?;
    let root = source.root("Map")?;

    let mut tiles = Vec::new();
    if let Some(list) = section(root, "Tiles") {
        for node in elements(list) {
            tiles.push(TileRun {
                id: source.hex(node, "id")?,
                amount: source.number(node, "amount")?,
            });
        }
    }

    Ok(MapDefinition {
        id,
        name: source.attr(root, "name")?.to_string(),
        width: source.number(root, "width")?,
        height: source.number(root, "height")?,
        tiles,
        portals: placements(&source, root, "Portals")?,
        monsters: placements(&source, root, "Monsters")?,
        npcs: placements(&source, root, "NPCs")?,
        objects: placements(&source, root, "Objects")?,
    })
}

fn placements<'input>(
    source: &Source<'_, 'input>,
    root: Node<'_, 'input>,
    name: &str,
) -> Result<Vec<Placement>, DataError> {
    let Some(list) = section(root, name) else {
        return Ok(Vec::new());
    };
    elements(list)
        .map(|node| -> Result<Placement, DataError> {
            Ok(Placement {
                id: source.hex(node, "id")?,
                x: source.number(node, "x")?,
                y: source.number(node, "y")?,
            })
        })
        .collect()
}
