use battle_of_monsters::arena::{new_shared, ArenaState};
use battle_of_monsters::battle::journal::BattleJournal;
use battle_of_monsters::battle::Battle;
use battle_of_monsters::rocket_with_arena;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use std::io::Read;

fn temp_dir(tag: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "battle_of_monsters_{}_{}",
        tag,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn read_battles(path: &std::path::Path) -> Vec<Battle> {
    let mut contents = String::new();
    std::fs::File::open(path)
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    contents
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid JSON"))
        .collect()
}

#[test]
fn journal_writes_and_flushes() {
    let dir = temp_dir("journal");
    let path = dir.join("battles.jsonl");

    let journal = BattleJournal::new(path.clone()).expect("create journal");
    let mut arena = ArenaState::new(Some(journal.clone()));
    for i in 0..3 {
        arena.record_battle(i, i + 1, i);
    }
    journal.close();

    let battles = read_battles(&path);
    assert_eq!(battles.len(), 3);
    assert_eq!(battles, arena.battles);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn journal_close_is_idempotent() {
    let dir = temp_dir("journal_close");
    let path = dir.join("battles.jsonl");

    let journal = BattleJournal::new(path.clone()).expect("create journal");
    journal.send(Battle {
        id: 0,
        monster_a: 0,
        monster_b: 1,
        winner: 1,
    });
    journal.close();
    journal.close();
    // Dropped silently once closed.
    journal.send(Battle {
        id: 1,
        monster_a: 1,
        monster_b: 0,
        winner: 0,
    });

    assert_eq!(read_battles(&path).len(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn journal_open_fails_for_missing_directory() {
    let dir = temp_dir("journal_missing");
    let path = dir.join("nope").join("battles.jsonl");
    assert!(BattleJournal::new(path).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn api_battles_reach_the_journal() {
    let dir = temp_dir("journal_api");
    let path = dir.join("battles.jsonl");
    let journal = BattleJournal::new(path.clone()).expect("create journal");

    let arena = new_shared(Some(journal.clone()));
    let client = Client::tracked(rocket_with_arena(arena)).expect("valid rocket instance");

    for body in [
        r#"{ "name": "Red Dragon", "attack": 50, "defense": 30, "speed": 40, "hp": 100 }"#,
        r#"{ "name": "Goblin", "attack": 20, "defense": 10, "speed": 30, "hp": 100 }"#,
    ] {
        let response = client
            .post("/monsters")
            .header(ContentType::JSON)
            .body(body)
            .dispatch();
        assert_eq!(response.status(), Status::Created);
    }
    let response = client
        .post("/battles")
        .header(ContentType::JSON)
        .body(r#"{ "monster_a": 1, "monster_b": 0 }"#)
        .dispatch();
    assert_eq!(response.status(), Status::Created);

    journal.close();
    let battles = read_battles(&path);
    assert_eq!(
        battles,
        vec![Battle {
            id: 0,
            monster_a: 1,
            monster_b: 0,
            winner: 0,
        }]
    );

    let _ = std::fs::remove_dir_all(&dir);
}
