use anyhow::Context;
use chatsync_api::{Chat, User, UserId};
use chatsync_chats::ChatState;
use chatsync_config::load as load_config;
use chatsync_runtime::{restore_session, telemetry, ChatSession, SessionError};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser)]
#[command(name = "chatsync")]
#[command(about = "Chat client state sync (console by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and list your chats
    Chats,
    /// Search users by name or email
    Search { query: String },
    /// Open the one-to-one chat with the best match for a user search
    Open { query: String },
    /// Forget the stored session
    Logout,
    /// Start interactive console (default)
    Console,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;
    let Some(mut session) = restore_session(&config)
        .await
        .context("failed to restore session")?
    else {
        println!(
            "Not signed in: no session record at {}",
            config.session.path.display()
        );
        return Ok(());
    };

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Chats => list_chats(&mut session).await,
        Commands::Search { query } => search(&mut session, &query).await,
        Commands::Open { query } => open(&mut session, &query).await,
        Commands::Logout => logout(&mut session).await,
        Commands::Console => run_console(&mut session).await,
    }
}

async fn list_chats(session: &mut ChatSession) -> anyhow::Result<()> {
    session
        .refresh_chats()
        .await
        .context("failed to fetch chats")?;
    print_chats(session);
    Ok(())
}

async fn search(session: &mut ChatSession, query: &str) -> anyhow::Result<()> {
    let users = session
        .search_users(query)
        .await
        .context("user search failed")?;
    print_users(users);
    Ok(())
}

async fn open(session: &mut ChatSession, query: &str) -> anyhow::Result<()> {
    session
        .refresh_chats()
        .await
        .context("failed to fetch chats")?;

    let Some(user) = pick_user(session, query).await? else {
        println!("No user matches '{query}'");
        return Ok(());
    };

    let chat = session
        .open_chat_with(&user)
        .await
        .context("failed to open chat")?;
    let me = session.current_user().id().clone();
    println!("Opened {} ({})", chat.display_name(&me), chat.id);
    Ok(())
}

async fn logout(session: &mut ChatSession) -> anyhow::Result<()> {
    session.logout().await.context("failed to log out")?;
    println!("Logged out");
    Ok(())
}

/// Exact id match first, otherwise the first search result.
async fn pick_user(session: &mut ChatSession, query: &str) -> anyhow::Result<Option<User>> {
    let users = session
        .search_users(query)
        .await
        .context("user search failed")?;
    let query = query.trim();
    Ok(users
        .iter()
        .find(|user| user.id == query)
        .or_else(|| users.first())
        .cloned())
}

fn print_chats(session: &ChatSession) {
    let me = session.current_user().id();
    let state = session.state();

    if state.cache().is_empty() {
        println!("No chats found");
        return;
    }

    println!("Chats:");
    for chat in state.cache().iter() {
        println!("  {}", chat_line(chat, state, me));
    }
}

fn chat_line(chat: &Chat, state: &ChatState, me: &UserId) -> String {
    let marker = if state.selection().is_selected(&chat.id) { "*" } else { " " };
    let unread = state.notifications().count_for(&chat.id);
    let mut line = format!("{marker} {}: {}", chat.id, chat.display_name(me));
    if unread > 0 {
        line.push_str(&format!(" [{unread} new]"));
    }
    if let Some(preview) = chat.preview(me) {
        line.push_str(&format!(" - {preview}"));
    }
    line
}

fn print_users(users: &[User]) {
    if users.is_empty() {
        println!("No users found");
        return;
    }
    for (index, user) in users.iter().enumerate() {
        println!("  {index}: {} <{}> ({})", user.name, user.email, user.id);
    }
}

fn print_notifications(session: &ChatSession) {
    let titles = session
        .state()
        .notification_titles(session.current_user().id());
    if titles.is_empty() {
        println!("No new messages");
        return;
    }
    for (title, note) in titles {
        println!("  {title} ({}): {}", note.chat, note.message.content);
    }
}

/// Print a session error; an expired credential ends the console.
fn report(error: SessionError) -> bool {
    println!("Error: {error}");
    if error.is_recoverable() {
        return true;
    }
    println!("Session is no longer valid; sign in again");
    false
}

async fn run_console(session: &mut ChatSession) -> anyhow::Result<()> {
    info!(user = %session.current_user().id(), "starting interactive console");

    println!("chatsync console, signed in as {}", session.current_user().user.name);
    println!("Type '/help' for commands, '/quit' to exit");
    println!("---");

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break; // EOF
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let (command, argument) = input.split_once(' ').unwrap_or((input, ""));

        let outcome = match command {
            "/quit" | "/exit" | "/q" => {
                println!("Goodbye!");
                break;
            }
            "/help" | "/h" => {
                println!("Available commands:");
                println!("  /help, /h            - Show this help");
                println!("  /chats, /c           - Refresh and list chats");
                println!("  /search, /s <query>  - Search users");
                println!("  /open, /o <index>    - Open chat with a user from the last search");
                println!("  /select <chat id>    - Open a listed chat");
                println!("  /close               - Close the open chat");
                println!("  /notifications, /n   - Show new messages");
                println!("  /logout              - Forget the session and exit");
                println!("  /quit, /exit, /q     - Exit console");
                Ok(())
            }
            "/chats" | "/c" => session.refresh_chats().await.map(|_| print_chats(session)),
            "/search" | "/s" => session.search_users(argument).await.map(print_users),
            "/open" | "/o" => {
                let picked = argument
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| session.search().results().get(index).cloned());
                match picked {
                    Some(user) => session.open_chat_with(&user).await.map(|chat| {
                        let me = session.current_user().id();
                        println!("Opened {}", chat.display_name(me));
                    }),
                    None => {
                        println!("Pick a result index from the last /search");
                        Ok(())
                    }
                }
            }
            "/select" => session.open_chat(argument.trim()),
            "/close" => {
                session.close_chat();
                Ok(())
            }
            "/notifications" | "/n" => {
                print_notifications(session);
                Ok(())
            }
            "/logout" => {
                session.logout().await.context("failed to log out")?;
                println!("Logged out");
                break;
            }
            _ => {
                println!("Unknown command: {command}. Type '/help' for available commands.");
                Ok(())
            }
        };

        if let Err(error) = outcome {
            if !report(error) {
                break;
            }
        }
    }

    Ok(())
}
