use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use askify_client::{BackendConfig, ConfigStore, HttpReplyService, HttpSessionStore};
use askify_core::ReplyService;
use askify_core::session::{SessionLifecycleController, SessionStore, SubmitOutcome};

mod render;

/// CLI helper for rustyline that provides completion, highlighting, and hints
/// for the slash commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/new".to_string(),
                "/sessions".to_string(),
                "/open".to_string(),
                "/delete".to_string(),
                "/clear".to_string(),
                "/mute".to_string(),
                "/theme".to_string(),
                "/logout".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn welcome_text(display_name: &str) -> String {
    format!(
        "Hey {}! I'm Askify - your friendly AI buddy. Let's start chatting!",
        display_name
    )
}

/// Resolves a 1-based session-list index to a session id.
fn session_id_at(controller: &SessionLifecycleController, arg: Option<&str>) -> Option<String> {
    let index: usize = arg?.parse().ok()?;
    controller
        .sessions()
        .get(index.checked_sub(1)?)
        .map(|s| s.session_id.clone())
}

/// The main entry point for the Askify REPL client.
///
/// Loads the stored profile (written by the external login flow), wires the
/// reqwest-backed clients into a `SessionLifecycleController`, and drives it
/// from a rustyline loop. Each submit is awaited to completion before the
/// next line is read, so remote calls never interleave.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // ===== Identity and preferences =====
    let config_store = ConfigStore::open_default()?;
    let (profile, mut prefs) = config_store.load()?;
    let Some(profile) = profile else {
        println!(
            "{}",
            "No Askify profile found. Complete the login flow first, or write".yellow()
        );
        println!(
            "{}",
            "~/.config/askify/config.toml with a [profile] email entry.".yellow()
        );
        return Ok(());
    };
    let display_name = profile.display_name();

    // ===== Backend wiring =====
    let backend = BackendConfig::for_user(&profile.email);
    let store: Arc<dyn SessionStore> = Arc::new(HttpSessionStore::new(backend.clone()));
    let replies: Arc<dyn ReplyService> = Arc::new(HttpReplyService::new(backend));
    let mut controller = SessionLifecycleController::new(store, replies);

    // ===== REPL setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Askify ===".bright_magenta().bold());
    println!(
        "{}",
        "Slash commands: /new /sessions /open <n> /delete <n> /clear /mute /theme /logout. 'quit' to exit."
            .bright_black()
    );
    println!();

    let welcome = welcome_text(&display_name);
    controller.start(&welcome).await;
    // Cursor into the transcript: everything before it is already printed
    let mut rendered = render::flush_transcript(controller.transcript(), 0, &prefs);

    // ===== Main REPL loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if let Some(command) = trimmed.strip_prefix('/') {
                    let mut parts = command.split_whitespace();
                    let name = parts.next().unwrap_or_default();
                    let arg = parts.next();

                    match name {
                        "new" => {
                            controller.new_chat(&welcome);
                            println!();
                            rendered = render::flush_transcript(controller.transcript(), 0, &prefs);
                        }
                        "sessions" => {
                            controller.refresh_sessions().await;
                            render::print_sessions(controller.sessions());
                        }
                        "open" => match session_id_at(&controller, arg) {
                            Some(session_id) => {
                                controller.select_session(&session_id).await;
                                println!();
                                rendered =
                                    render::flush_transcript(controller.transcript(), 0, &prefs);
                            }
                            None => println!("{}", "Usage: /open <n> (see /sessions)".yellow()),
                        },
                        "delete" => match session_id_at(&controller, arg) {
                            Some(session_id) => {
                                if controller.delete_session(&session_id).await {
                                    println!("{}", "Session deleted.".bright_green());
                                    rendered = rendered.min(controller.transcript().len());
                                } else {
                                    println!("{}", "Could not delete the session.".red());
                                }
                            }
                            None => println!("{}", "Usage: /delete <n> (see /sessions)".yellow()),
                        },
                        "clear" => {
                            if controller.clear_active_session().await {
                                println!("{}", "Active session deleted.".bright_green());
                                rendered = 0;
                            } else {
                                println!("{}", "No active session to clear.".bright_black());
                            }
                        }
                        "mute" => {
                            prefs.muted = !prefs.muted;
                            save_prefs(&config_store, &profile, prefs);
                            let state = if prefs.muted { "muted" } else { "unmuted" };
                            println!("{}", format!("Sounds {}.", state).bright_black());
                        }
                        "theme" => {
                            prefs.theme = prefs.theme.toggled();
                            save_prefs(&config_store, &profile, prefs);
                            println!("{}", format!("Theme: {:?}.", prefs.theme).bright_black());
                        }
                        "logout" => {
                            if let Err(e) = config_store.clear_profile() {
                                eprintln!("{}", format!("Logout failed: {}", e).red());
                            } else {
                                println!("{}", "Logged out. Goodbye!".bright_green());
                                break;
                            }
                        }
                        _ => println!("{}", "Unknown command".bright_black()),
                    }
                    continue;
                }

                println!("{}", "Askify is typing...".bright_black().italic());
                let outcome = controller.handle_user_submit(trimmed).await;
                rendered = render::flush_transcript(controller.transcript(), rendered, &prefs);

                match outcome {
                    SubmitOutcome::SessionCreateFailed => {
                        println!("{}", "Failed to create session".red());
                    }
                    SubmitOutcome::Replied {
                        session_id: Some(_),
                        user_persisted,
                        reply_persisted,
                    } if !user_persisted || !reply_persisted => {
                        println!(
                            "{}",
                            "Note: part of this exchange could not be saved to history."
                                .yellow()
                        );
                    }
                    _ => {}
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

fn save_prefs(
    config_store: &ConfigStore,
    profile: &askify_client::UserProfile,
    prefs: askify_client::Prefs,
) {
    if let Err(e) = config_store.save(Some(profile), prefs) {
        eprintln!("{}", format!("Could not save preferences: {}", e).red());
    }
}
