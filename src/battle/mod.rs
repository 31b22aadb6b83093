use either::{Either, Left, Right};
use log::{debug, info, warn};
use rocket::response::status::{BadRequest, Created, NotFound};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};

use crate::arena::SharedArena;
use crate::monster::find_pair;
use crate::status_messages::{new_status, Status};

pub mod journal;
pub mod resolver;

use resolver::{BattleReport, Combatant};

/// A stored fight between two registered monsters.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct Battle {
    pub id: usize,
    pub monster_a: usize,
    pub monster_b: usize,
    pub winner: usize,
}

/// Body of `POST /battles`. Ids are optional so a missing one is a 400, not a parse failure.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct BattleRequest {
    #[serde(default)]
    pub monster_a: Option<usize>,
    #[serde(default)]
    pub monster_b: Option<usize>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct SimulateRequest {
    pub monster_a: Combatant,
    pub monster_b: Combatant,
}

#[openapi]
#[post("/battles", format = "json", data = "<request>")]
pub async fn start_battle(
    arena: &State<SharedArena>,
    request: Json<BattleRequest>,
) -> Result<Created<Json<Battle>>, Either<NotFound<Json<Status>>, BadRequest<Json<Status>>>> {
    let (a_id, b_id) = match (request.monster_a, request.monster_b) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(Right(BadRequest(new_status("Missing ID")))),
    };

    // Copy the snapshots out so the fight runs without holding the lock.
    let pair = {
        let arena = arena.lock().await;
        find_pair(&arena.monsters, a_id, b_id)
    };
    let (a, b) = match pair {
        Ok(pair) => pair,
        Err(missing) => {
            debug!("battle requested for unknown monsters {:?}", missing);
            return Err(Left(NotFound(new_status("Missing Monster"))));
        }
    };

    let winner = match resolver::resolve(&a, &b) {
        Ok(winner) => winner,
        Err(e) => {
            warn!("battle {} vs {} rejected: {}", a_id, b_id, e);
            return Err(Right(BadRequest(new_status(e.to_string()))));
        }
    };

    let battle = arena.lock().await.record_battle(a_id, b_id, winner);
    info!(
        "battle {}: monster {} vs monster {}, winner {}",
        battle.id, a_id, b_id, winner
    );
    Ok(Created::new(format!("/battles/{}", battle.id)).body(Json(battle)))
}

#[openapi]
#[get("/battles/<id>")]
pub async fn get_battle(
    arena: &State<SharedArena>,
    id: usize,
) -> Result<Json<Battle>, NotFound<Json<Status>>> {
    let arena = arena.lock().await;
    match arena.battle(id) {
        Some(battle) => Ok(Json(battle.clone())),
        None => Err(NotFound(new_status("Battle not found"))),
    }
}

/// Dry run: fight two inline snapshots and return the full report. Nothing is stored.
#[openapi]
#[post("/battles/simulate", format = "json", data = "<request>")]
pub async fn simulate_battle(
    request: Json<SimulateRequest>,
) -> Result<Json<BattleReport>, BadRequest<Json<Status>>> {
    resolver::simulate(&request.monster_a, &request.monster_b)
        .map(Json)
        .map_err(|e| BadRequest(new_status(e.to_string())))
}
