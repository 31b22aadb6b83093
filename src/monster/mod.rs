use log::{info, warn};
use rocket::response::status::{BadRequest, Created, NotFound};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};

use crate::arena::SharedArena;
use crate::battle::resolver::Combatant;
use crate::status_messages::{new_status, Status};

/// A registered creature.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct Monster {
    pub id: usize,
    pub name: String,
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
    pub hp: i64,
    pub image_url: Option<String>,
}

impl Monster {
    /// Snapshot the fighting stats for the resolver.
    pub fn as_combatant(&self) -> Combatant {
        Combatant {
            id: self.id,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
            hit_points: self.hp,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct MonsterCreate {
    pub name: String,
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
    pub hp: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl MonsterCreate {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Monster name is required".to_string());
        }
        if self.hp <= 0 {
            return Err(format!("Monster hp must be positive, got {}", self.hp));
        }
        for (field, value) in [
            ("attack", self.attack),
            ("defense", self.defense),
            ("speed", self.speed),
        ] {
            if value < 0 {
                return Err(format!("Monster {field} must not be negative, got {value}"));
            }
        }
        Ok(())
    }
}

#[openapi]
#[post("/monsters", format = "json", data = "<monster>")]
pub async fn create_monster(
    arena: &State<SharedArena>,
    monster: Json<MonsterCreate>,
) -> Result<Created<Json<Monster>>, BadRequest<Json<Status>>> {
    let create = monster.0;
    if let Err(reason) = create.validate() {
        warn!("rejected monster registration: {}", reason);
        return Err(BadRequest(new_status(reason)));
    }

    let mut arena = arena.lock().await;
    let id = arena.add_monster(create);
    let stored = arena.monsters[id].clone();
    info!("registered monster {} ({})", id, stored.name);
    Ok(Created::new(format!("/monsters/{}", id)).body(Json(stored)))
}

#[openapi]
#[get("/monsters/<id>")]
pub async fn get_monster(
    arena: &State<SharedArena>,
    id: usize,
) -> Result<Json<Monster>, NotFound<Json<Status>>> {
    let arena = arena.lock().await;
    match arena.monster(id) {
        Some(monster) => Ok(Json(monster.clone())),
        None => Err(NotFound(new_status(format!("Monster {} not found", id)))),
    }
}

/// Look up both fighters, reporting which one is missing.
pub(crate) fn find_pair(
    monsters: &[Monster],
    a: usize,
    b: usize,
) -> Result<(Combatant, Combatant), Vec<usize>> {
    match (monsters.get(a), monsters.get(b)) {
        (Some(ma), Some(mb)) => Ok((ma.as_combatant(), mb.as_combatant())),
        (ma, mb) => Err(
            [(a, ma.is_none()), (b, mb.is_none())]
                .into_iter()
                .filter(|(_, missing)| *missing)
                .map(|(id, _)| id)
                .collect(),
        ),
    }
}
