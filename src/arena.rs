//! Shared in-memory state behind the HTTP layer.
//!
//! The index in each Vec is the entity id.

use std::sync::Arc;

use rocket::futures::lock::Mutex;

use crate::battle::journal::BattleJournal;
use crate::battle::Battle;
use crate::monster::{Monster, MonsterCreate};

pub type SharedArena = Arc<Mutex<ArenaState>>;

#[derive(Debug, Default)]
pub struct ArenaState {
    pub monsters: Vec<Monster>,
    pub battles: Vec<Battle>,
    pub journal: Option<BattleJournal>,
}

impl ArenaState {
    pub fn new(journal: Option<BattleJournal>) -> Self {
        ArenaState {
            monsters: Vec::new(),
            battles: Vec::new(),
            journal,
        }
    }

    pub fn add_monster(&mut self, create: MonsterCreate) -> usize {
        let id = self.monsters.len();
        self.monsters.push(Monster {
            id,
            name: create.name,
            attack: create.attack,
            defense: create.defense,
            speed: create.speed,
            hp: create.hp,
            image_url: create.image_url,
        });
        id
    }

    pub fn monster(&self, id: usize) -> Option<&Monster> {
        self.monsters.get(id)
    }

    /// Store a finished battle and forward it to the journal, if one is open.
    pub fn record_battle(&mut self, monster_a: usize, monster_b: usize, winner: usize) -> Battle {
        let battle = Battle {
            id: self.battles.len(),
            monster_a,
            monster_b,
            winner,
        };
        self.battles.push(battle.clone());
        if let Some(journal) = &self.journal {
            journal.send(battle.clone());
        }
        battle
    }

    pub fn battle(&self, id: usize) -> Option<&Battle> {
        self.battles.get(id)
    }

    /// Flush the journal writer; called on shutdown.
    pub fn shutdown(&self) {
        if let Some(journal) = &self.journal {
            journal.close();
        }
    }
}

pub fn new_shared(journal: Option<BattleJournal>) -> SharedArena {
    Arc::new(Mutex::new(ArenaState::new(journal)))
}
