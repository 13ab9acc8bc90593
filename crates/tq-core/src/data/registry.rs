//! Template registry: creates entities by template id

use std::collections::HashMap;

use super::Template;
use crate::entity::{
    Entity, EntityFlags, EntityKind, Item, Npc, Object, Portal, TemplateId, Tile,
};
use crate::monster::Monster;
use crate::player::Player;
use crate::{GameRng, WorldError};

/// Instantiates entities from static template data
///
/// Implementations must not touch the world: the only side effect of
/// `create` is building the entity (and drawing from `rng` where the
/// variant needs randomized initial state).
pub trait EntityFactory {
    fn create(&self, id: TemplateId, rng: &mut GameRng) -> Result<Entity, WorldError>;
}

fn visibility(invisible: bool) -> EntityFlags {
    if invisible {
        EntityFlags::INVISIBLE
    } else {
        EntityFlags::empty()
    }
}

/// In-memory template store
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<TemplateId, Template>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, returning the one it replaces
    pub fn insert(&mut self, template: Template) -> Option<Template> {
        self.templates.insert(template.id(), template)
    }

    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.get(&id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// All templates, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.values()
    }

    /// Lowest-id template of `kind`
    pub fn first_of_kind(&self, kind: EntityKind) -> Option<&Template> {
        self.iter()
            .filter(|t| t.kind() == kind)
            .min_by_key(|t| t.id())
    }
}

impl Extend<Template> for TemplateRegistry {
    fn extend<I: IntoIterator<Item = Template>>(&mut self, iter: I) {
        for template in iter {
            self.insert(template);
        }
    }
}

impl FromIterator<Template> for TemplateRegistry {
    fn from_iter<I: IntoIterator<Item = Template>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

impl EntityFactory for TemplateRegistry {
    fn create(&self, id: TemplateId, rng: &mut GameRng) -> Result<Entity, WorldError> {
        let template = self.get(id).ok_or(WorldError::UnknownTemplate(id))?;
        let entity = match template {
            Template::Tile(t) => Entity::Tile(Tile::new(t.id, visibility(t.invisible))),
            Template::Portal(t) => {
                Entity::Portal(Portal::new(t.id, visibility(t.invisible), t.destination))
            }
            Template::Item(t) => Entity::Item(Item::new(t.id, t.name.clone())),
            Template::Object(t) => {
                let flags = if t.strong {
                    EntityFlags::STRONG
                } else {
                    EntityFlags::empty()
                };
                Entity::Object(Object::new(t.id, flags, t.name.clone(), t.blocks.clone()))
            }
            Template::Npc(t) => Entity::Npc(Npc::new(t.id, t.name.clone())),
            Template::Monster(t) => {
                t.validate()?;
                Entity::Monster(Box::new(Monster::from_template(t, rng)))
            }
            Template::Player(t) => {
                Entity::Player(Box::new(Player::new(t.id, t.name.clone(), t.max_hp, t.damage)))
            }
        };
        Ok(entity)
    }
}
