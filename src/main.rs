mod commands;
mod config;
mod db;
mod errors;
mod form;
mod handlers;
mod migrations;
mod schema;
mod translate;
mod utils;

use std::sync::Arc;

use teloxide::prelude::*;

use crate::{
    config::Config,
    db::StudentDb,
    errors::BotResult,
    form::FormController,
    schema::{Form, schema},
    translate::Translator,
};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    pretty_env_logger::init();
    log::info!("Starting school bot...");

    if let Err(e) = run().await {
        log::error!("Bot stopped with error: {}", e);
        std::process::exit(1);
    }

    log::info!("Bot stopped");
}

async fn run() -> BotResult<()> {
    let config = Config::from_env()?;
    config.ensure_dirs().await?;

    // The bot must not serve without a working database
    let db = StudentDb::connect(&config.database_url).await?;
    let form: Arc<Form> = Arc::new(FormController::new(Arc::new(db)));
    let translator = Arc::new(Translator::new(config.translate_api_url.clone())?);

    let bot = Bot::new(&config.bot_token);
    bot.delete_webhook().drop_pending_updates(true).await?;
    log::info!("Webhook removed, starting polling");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![form, translator, Arc::new(config)])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
