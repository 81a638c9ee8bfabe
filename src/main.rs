//! STARRT interactive shell
//!
//! Walks through the screens in a terminal. Each prompt takes a command such
//! as `email jane@example.com` or `submit`; `help` lists what the current
//! screen accepts.

use anyhow::Context;
use clap::Parser;
use starrt::render::render;
use starrt::{
    ActiveScreen, ApiClient, App, AudioClip, Config, EducationLevel, FileSessionStore, InputMode,
    MemorySessionStore, MockTranscriber, Navigation, Route, ScreenSettings, SessionStore,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "starrt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive STARRT.ai career guidance client")]
struct Args {
    /// Config file (default: platform config dir, then ./starrt.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the service base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Keep the session in memory only
    #[arg(long)]
    ephemeral: bool,
}

enum Control {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(url) = args.api_url {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }

    starrt::logging::init(&config.logging);
    tracing::info!("STARRT shell v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(base_url = %config.api.base_url, "Using recommendation service");

    let session: Arc<dyn SessionStore> = if args.ephemeral {
        Arc::new(MemorySessionStore::new())
    } else {
        let path = config.session.path();
        tracing::debug!("Session file: {:?}", path);
        Arc::new(FileSessionStore::new(path))
    };

    let client = Arc::new(ApiClient::new(&config.api, Arc::clone(&session))?);
    let mut app = App::new(
        client,
        session,
        Arc::new(MockTranscriber::new()),
        ScreenSettings::from_config(&config),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", render(app.screen()));
    print_help(app.screen());

    loop {
        eprint!("{} > ", app.route());
        let Some(line) = lines.next_line().await.context("reading input")? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, arg) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        match handle(&mut app, command, arg).await {
            Control::Continue => println!("\n{}", render(app.screen())),
            Control::Quit => break,
        }
    }

    tracing::info!("Goodbye");
    Ok(())
}

async fn handle(app: &mut App, command: &str, arg: &str) -> Control {
    match command {
        "quit" | "exit" => return Control::Quit,
        "help" => {
            print_help(app.screen());
            return Control::Continue;
        }
        "go" => {
            match parse_route(arg) {
                Some(route) => app.navigate(route).await,
                None => eprintln!("unknown route '{}'", arg),
            }
            return Control::Continue;
        }
        _ => {}
    }

    let nav = match app.screen_mut() {
        ActiveScreen::Home(home) => match command {
            "login" => home.login(),
            "register" => home.register(),
            _ => unknown(command),
        },
        ActiveScreen::Login(login) => match command {
            "email" => set(&mut login.form.email, arg),
            "password" => set(&mut login.form.password, arg),
            "submit" => login.submit().await,
            "register" => Navigation::To(Route::Register),
            _ => unknown(command),
        },
        ActiveScreen::Register(register) => match command {
            "name" => set(&mut register.form.name, arg),
            "email" => set(&mut register.form.email, arg),
            "password" => set(&mut register.form.password, arg),
            "submit" => register.submit().await,
            "login" => Navigation::To(Route::Login { registered: false }),
            _ => unknown(command),
        },
        ActiveScreen::Dashboard(dashboard) => match command {
            "profile" => dashboard.open_profile(),
            "recommend" => dashboard.open_recommend(),
            "logout" => dashboard.logout(),
            _ => unknown(command),
        },
        ActiveScreen::Profile(profile) => match command {
            "name" => {
                profile.edit(|f| f.name = arg.to_string());
                Navigation::Stay
            }
            "education" => {
                match arg.parse::<EducationLevel>() {
                    Ok(level) => profile.edit(|f| f.highest_education_level = level),
                    Err(e) => eprintln!("{}", e),
                }
                Navigation::Stay
            }
            "goal" => {
                profile.edit(|f| f.short_term_goal = arg.to_string());
                Navigation::Stay
            }
            "languages" => {
                profile.edit(|f| f.programming_languages = arg.to_string());
                Navigation::Stay
            }
            "technical" => {
                profile.edit(|f| f.technical_domains = arg.to_string());
                Navigation::Stay
            }
            "preferred" => {
                profile.edit(|f| f.preferred_domains = arg.to_string());
                Navigation::Stay
            }
            "save" => profile.submit().await,
            "back" => Navigation::To(Route::Dashboard),
            _ => unknown(command),
        },
        ActiveScreen::Recommend(recommend) => match command {
            "mode" => {
                match arg {
                    "text" => recommend.set_mode(InputMode::Text),
                    "voice" => recommend.set_mode(InputMode::Voice),
                    _ => eprintln!("mode is 'text' or 'voice'"),
                }
                Navigation::Stay
            }
            "say" => {
                recommend.set_input_text(arg);
                Navigation::Stay
            }
            "audio" => {
                let clip = match arg {
                    "" | "none" => None,
                    path => Some(AudioClip::from_path(Path::new(path))),
                };
                recommend.choose_audio(clip);
                Navigation::Stay
            }
            "transcribe" => {
                recommend.generate_transcript().await;
                Navigation::Stay
            }
            "transcript" => {
                recommend.set_transcript(arg);
                Navigation::Stay
            }
            "send" => match recommend.mode() {
                InputMode::Text => recommend.submit_text().await,
                InputMode::Voice => recommend.submit_voice().await,
            },
            "new" => {
                recommend.new_recommendation();
                Navigation::Stay
            }
            "back" => Navigation::To(Route::Dashboard),
            _ => unknown(command),
        },
    };

    if let Navigation::After(delay, route) = nav {
        println!("\n{}", render(app.screen()));
        eprintln!("Continuing to {} in {:?}...", route, delay);
    }
    app.follow(nav).await;
    Control::Continue
}

fn set(field: &mut String, value: &str) -> Navigation {
    *field = value.to_string();
    Navigation::Stay
}

fn unknown(command: &str) -> Navigation {
    eprintln!("unknown command '{}', try 'help'", command);
    Navigation::Stay
}

fn parse_route(s: &str) -> Option<Route> {
    let route = match s.trim_start_matches('/') {
        "" | "home" => Route::Home,
        "login" => Route::Login { registered: false },
        "register" => Route::Register,
        "dashboard" => Route::Dashboard,
        "profile" => Route::Profile,
        "recommend" => Route::Recommend,
        _ => return None,
    };
    Some(route)
}

fn print_help(screen: &ActiveScreen) {
    let commands = match screen {
        ActiveScreen::Home(_) => "login | register",
        ActiveScreen::Login(_) => "email <addr> | password <pw> | submit | register",
        ActiveScreen::Register(_) => {
            "name <full name> | email <addr> | password <pw> | submit | login"
        }
        ActiveScreen::Dashboard(_) => "profile | recommend | logout",
        ActiveScreen::Profile(_) => {
            "name <v> | education <High School|Bachelor|Master|PhD> | goal <v> | \
             languages <a, b> | technical <a, b> | preferred <a, b> | save | back"
        }
        ActiveScreen::Recommend(_) => {
            "mode <text|voice> | say <text> | audio <path|none> | transcribe | \
             transcript <text> | send | new | back"
        }
    };
    eprintln!("commands: {} | go <route> | help | quit", commands);
}
