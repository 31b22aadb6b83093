//! # Battle of Monsters
//!
//! A web API for registering monsters and pitting two of them against each
//! other in a simulated fight.
//!
//! ## Overview
//!
//! The only real game logic lives in [`battle::resolver`]: given two
//! combatant snapshots it decides who strikes first, trades blows until one
//! side is down and reports the survivor. Everything around it is plumbing:
//! registering monsters, looking them up by id and storing the outcome.
//!
//! ## Architecture
//!
//! The API is built using the Rocket web framework with OpenAPI documentation
//! support. Monsters and battles live in an in-memory [`arena::ArenaState`]
//! behind an `Arc<Mutex<T>>` so concurrent requests can share it. Setting
//! `BATTLE_JOURNAL_FILE` additionally appends every stored battle to a
//! JSON-lines file.

// Rocket makes this a bit tricky to support
#![allow(clippy::module_name_repetitions)]
#[macro_use]
extern crate rocket;

use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};

pub mod arena;
pub mod battle;
pub mod monster;
pub mod status_messages;

pub use crate::battle::resolver::{resolve, simulate, BattleError, BattleReport, Combatant};

/// Initializes and configures the Rocket web server with all routes and OpenAPI documentation.
///
/// # Returns
///
/// A configured Rocket instance ready to be launched.
///
/// # Example
///
/// ```no_run
/// use battle_of_monsters::rocket_initialize;
///
/// #[rocket::main]
/// async fn main() {
///     rocket_initialize().launch().await.expect("Failed to launch rocket");
/// }
/// ```
pub fn rocket_initialize() -> rocket::Rocket<rocket::Build> {
    rocket_with_arena(arena::new_shared(battle::journal::BattleJournal::from_env()))
}

/// Same as [`rocket_initialize`] but with caller-supplied state, so tests can
/// plug in their own journal.
pub fn rocket_with_arena(arena_state: arena::SharedArena) -> rocket::Rocket<rocket::Build> {
    use crate::battle::okapi_add_operation_for_get_battle_;
    use crate::battle::okapi_add_operation_for_simulate_battle_;
    use crate::battle::okapi_add_operation_for_start_battle_;
    use crate::battle::{get_battle, simulate_battle, start_battle};
    use crate::monster::okapi_add_operation_for_create_monster_;
    use crate::monster::okapi_add_operation_for_get_monster_;
    use crate::monster::{create_monster, get_monster};
    use rocket::fairing::AdHoc;

    #[allow(clippy::no_effect_underscore_binding)]
    let _ = env_logger::try_init();

    rocket::build()
        .mount(
            "/",
            openapi_get_routes![
                create_monster,
                get_monster,
                start_battle,
                get_battle,
                simulate_battle
            ],
        )
        .mount("/swagger", make_swagger_ui(&get_docs()))
        .manage(arena_state)
        .attach(AdHoc::on_shutdown("battle-journal-flush", |rocket| {
            Box::pin(async move {
                if let Some(arena) = rocket.state::<arena::SharedArena>() {
                    arena.lock().await.shutdown();
                }
            })
        }))
}

fn get_docs() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/openapi.json".to_string(),
        ..Default::default()
    }
}
