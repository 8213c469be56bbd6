//! Local chat console
//!
//! Interactive loop for talking to a historical character from the terminal,
//! useful for trying prompts and inspecting session state without any
//! messaging frontend.

use anyhow::Result;
use dotenvy::dotenv;
use log::info;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use figura::core::Config;
use figura::features::characters::CharacterStore;
use figura::features::chat::ChatService;
use figura::features::provider::OpenAiProvider;
use figura::features::sessions::{
    MemorySessionStore, SessionManager, SessionStore, SqliteSessionStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    // The openai crate reads credentials from env vars, not from our config.
    // Set both OPENAI_API_KEY and OPENAI_KEY for compatibility.
    std::env::set_var("OPENAI_API_KEY", &config.ai_api_key);
    std::env::set_var("OPENAI_KEY", &config.ai_api_key);
    if let Some(base_url) = &config.ai_base_url {
        std::env::set_var("OPENAI_BASE_URL", base_url);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting local chat console | model: {}", config.ai_model);

    let store: Arc<dyn SessionStore> = match &config.database_path {
        Some(path) => {
            info!("Persisting sessions to {path}");
            Arc::new(SqliteSessionStore::open(path)?)
        }
        None => {
            info!("No DATABASE_PATH set - sessions are kept in memory");
            Arc::new(MemorySessionStore::new())
        }
    };

    let characters = Arc::new(CharacterStore::new());
    let sessions = Arc::new(
        SessionManager::new(store, characters.clone()).with_history_limit(config.history_limit),
    );
    let provider = Arc::new(OpenAiProvider::new(config.ai_model.clone()));
    let service = ChatService::new(sessions, provider);

    println!("Available characters:");
    for (id, profile) in characters.list_characters() {
        println!("  {id:<12} {} ({})", profile.name, profile.era);
    }

    let character_id = prompt_line("\nCharacter id: ")?;
    let user_id = {
        let raw = prompt_line("User id (blank for 'local'): ")?;
        if raw.is_empty() {
            "local".to_string()
        } else {
            raw
        }
    };

    let session = service.sessions().create_session(&user_id, &character_id)?;
    let profile = characters.get_profile(&character_id)?;
    println!(
        "\nSession {} opened with {}. Type a message, ':history', ':export', or ':quit'.\n",
        session.id, profile.name
    );

    let stdin = io::stdin();
    loop {
        print!("you> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            ":quit" | ":exit" => break,
            ":history" => {
                let session = service.sessions().get_session(&session.id)?;
                for message in &session.messages {
                    println!(
                        "[{:>3}] {:<9} {}",
                        message.position,
                        message.role.as_str(),
                        message.content
                    );
                }
            }
            ":export" => {
                let session = service.sessions().get_session(&session.id)?;
                println!("{}", serde_json::to_string_pretty(&session)?);
            }
            text => match service.handle_message(&session.id, text).await {
                Ok(reply) => println!("{}> {reply}\n", profile.name),
                Err(e) => eprintln!("error: {e}\n"),
            },
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
