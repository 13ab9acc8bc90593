//! One grid cell and its layered occupants

use crate::entity::{Block, Category, Entity, EntityUid, Npc, TemplateId};
use crate::monster::Monster;
use crate::player::Player;

/// Occupants of a single cell
///
/// Every field except `items` holds at most one entity. The strong field is
/// the movement blocker: at most one monster, NPC, player, block or other
/// strong entity lives here at any time.
#[derive(Debug, Clone, Default)]
pub struct Slot {
    ground: Option<Entity>,
    portal: Option<Entity>,
    strong: Option<Entity>,
    object: Option<Entity>,
    items: Vec<Entity>,
}

impl Slot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `entity` in the field matching its category
    ///
    /// Ground, portal and object replace any previous occupant. Items append.
    ///
    /// # Panics
    ///
    /// Panics if the strong field is already taken.
    pub fn place(&mut self, entity: Entity) {
        match entity.category() {
            Category::Ground => self.ground = Some(entity),
            Category::Portal => self.portal = Some(entity),
            Category::Strong => {
                assert!(
                    self.strong.is_none(),
                    "slot already holds strong entity {:?}, cannot place {:?}",
                    self.strong.as_ref().map(Entity::kind),
                    entity.kind()
                );
                self.strong = Some(entity);
            }
            Category::Object => self.object = Some(entity),
            Category::Item => self.items.push(entity),
        }
    }

    /// Remove the entity with identity `uid` from whichever field holds it
    pub fn remove(&mut self, uid: EntityUid) -> Option<Entity> {
        let matches = |e: &mut Entity| e.uid() == uid;
        if let Some(entity) = self.strong.take_if(matches) {
            return Some(entity);
        }
        if let Some(entity) = self.ground.take_if(matches) {
            return Some(entity);
        }
        if let Some(entity) = self.portal.take_if(matches) {
            return Some(entity);
        }
        if let Some(entity) = self.object.take_if(matches) {
            return Some(entity);
        }
        let idx = self.items.iter().position(|e| e.uid() == uid)?;
        Some(self.items.remove(idx))
    }

    /// Remove the first item built from `template`
    pub fn take_item(&mut self, template: TemplateId) -> Option<Entity> {
        let idx = self.items.iter().position(|e| e.template() == template)?;
        Some(self.items.remove(idx))
    }

    /// Move the strong occupant out of the slot
    pub fn take_strong(&mut self) -> Option<Entity> {
        self.strong.take()
    }

    /// First entity of `category`
    pub fn get(&self, category: Category) -> Option<&Entity> {
        self.layer(category).first()
    }

    /// Every entity of `category`, in insertion order
    pub fn layer(&self, category: Category) -> &[Entity] {
        match category {
            Category::Ground => self.ground.as_slice(),
            Category::Portal => self.portal.as_slice(),
            Category::Strong => self.strong.as_slice(),
            Category::Object => self.object.as_slice(),
            Category::Item => &self.items,
        }
    }

    /// All occupants: strong, ground, portal, object, then items
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.strong
            .iter()
            .chain(self.ground.iter())
            .chain(self.portal.iter())
            .chain(self.object.iter())
            .chain(self.items.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.entities().next().is_none()
    }

    pub fn has_ground(&self) -> bool {
        self.ground.is_some()
    }

    pub fn can_accept_strong(&self) -> bool {
        self.strong.is_none()
    }

    pub fn strong(&self) -> Option<&Entity> {
        self.strong.as_ref()
    }

    pub fn strong_uid(&self) -> Option<EntityUid> {
        self.strong.as_ref().map(Entity::uid)
    }

    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    pub fn monster(&self) -> Option<&Monster> {
        match &self.strong {
            Some(Entity::Monster(m)) => Some(&**m),
            _ => None,
        }
    }

    pub fn monster_mut(&mut self) -> Option<&mut Monster> {
        match &mut self.strong {
            Some(Entity::Monster(m)) => Some(&mut **m),
            _ => None,
        }
    }

    pub fn player(&self) -> Option<&Player> {
        match &self.strong {
            Some(Entity::Player(p)) => Some(&**p),
            _ => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        match &mut self.strong {
            Some(Entity::Player(p)) => Some(&mut **p),
            _ => None,
        }
    }

    pub fn npc(&self) -> Option<&Npc> {
        match &self.strong {
            Some(Entity::Npc(n)) => Some(n),
            _ => None,
        }
    }

    pub fn npc_mut(&mut self) -> Option<&mut Npc> {
        match &mut self.strong {
            Some(Entity::Npc(n)) => Some(n),
            _ => None,
        }
    }

    pub fn block(&self) -> Option<&Block> {
        match &self.strong {
            Some(Entity::Block(b)) => Some(b),
            _ => None,
        }
    }
}
