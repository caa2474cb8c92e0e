use sea_orm::{EntityTrait, PaginatorTrait};

use school_meal::{
    config::AppConfig,
    db::{
        connection,
        entities::prelude::{Meal, SchoolInfo},
    },
    logging::init_tracing,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("school-meal failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env()?;
    init_tracing(&cfg.logging);

    let db = connection::connect(&cfg.database).await?;

    let schools = SchoolInfo::find().count(&db).await?;
    let meals = Meal::find().count(&db).await?;
    tracing::info!(schools, meals, "database ready");

    db.close().await?;
    Ok(())
}
