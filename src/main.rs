use battle_of_monsters::rocket_initialize;

#[rocket::main]
async fn main() {
    if let Err(e) = rocket_initialize().launch().await {
        log::error!("battle-of-monsters stopped: {}", e);
        std::process::exit(1);
    }
}
