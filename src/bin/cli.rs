//! STARRT CLI
//!
//! One-shot commands against the recommendation service:
//! - Create an account, sign in and out
//! - Show or save the profile
//! - Ask for a recommendation from text or a (simulated) voice clip
//! - Generate a config template

use anyhow::Context;
use clap::{Parser, Subcommand};
use starrt::render::{render_profile, render_result};
use starrt::screens::{
    DashboardScreen, InputMode, LoginScreen, ProfileScreen, RecommendScreen, RegisterScreen,
    Screen,
};
use starrt::{
    ApiClient, AudioClip, Config, EducationLevel, FileSessionStore, MockTranscriber, Navigation,
    Route, ScreenSettings, ScreenState, SessionStore, DEFAULT_DISPLAY_NAME,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "starrt-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "One-shot commands for the STARRT.ai career guidance service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Service base URL (overrides config and environment)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: platform config dir, then ./starrt.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show who is signed in
    Whoami,

    /// Show or save the profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Ask for a career recommendation
    Recommend {
        #[command(subcommand)]
        input: RecommendInput,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the stored profile
    Show,

    /// Save the profile; omitted fields keep their stored values
    Save {
        #[arg(long)]
        name: Option<String>,
        /// High School, Bachelor, Master or PhD
        #[arg(long)]
        education: Option<EducationLevel>,
        #[arg(long)]
        goal: Option<String>,
        /// Comma-separated
        #[arg(long)]
        languages: Option<String>,
        /// Comma-separated
        #[arg(long)]
        technical: Option<String>,
        /// Comma-separated
        #[arg(long)]
        preferred: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RecommendInput {
    /// Send typed text
    Text { text: String },

    /// Send a simulated transcript of an audio clip
    Voice {
        /// Audio file; only its name is used
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Use this transcript instead of generating one
        #[arg(short, long)]
        transcript: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_config(output.as_ref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    starrt::logging::init(&config.logging);

    let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(config.session.path()));
    let client = Arc::new(ApiClient::new(&config.api, Arc::clone(&session))?);
    let settings = ScreenSettings::from_config(&config);

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
        } => {
            let mut screen = RegisterScreen::new(client, session);
            screen.form.name = name;
            screen.form.email = email;
            screen.form.password = password;
            screen.submit().await;
            exit_on_failure(&screen);
            println!("Account created. Sign in with `starrt-cli login`.");
        }

        Commands::Login { email, password } => {
            let mut screen = LoginScreen::new(
                client,
                Arc::clone(&session),
                false,
                settings.registered_banner,
            );
            screen.form.email = email;
            screen.form.password = password;
            screen.submit().await;
            exit_on_failure(&screen);

            let mut dashboard = DashboardScreen::new(session);
            dashboard.mount();
            println!("Signed in as {}", dashboard.user_name());
        }

        Commands::Logout => {
            let mut dashboard = DashboardScreen::new(session);
            if dashboard.mount() != Navigation::Stay {
                println!("Not signed in");
                return Ok(());
            }
            dashboard.logout();
            exit_on_failure(&dashboard);
            println!("Signed out");
        }

        Commands::Whoami => match session.get()? {
            Some(s) => println!("{}", s.name_or(DEFAULT_DISPLAY_NAME)),
            None => {
                println!("Not signed in");
                std::process::exit(1);
            }
        },

        Commands::Profile { action } => {
            let mut screen = ProfileScreen::new(client, session, settings.profile_redirect_delay);
            exit_on_redirect(screen.mount().await);

            match action {
                ProfileAction::Show => print!("{}", render_profile(&screen)),
                ProfileAction::Save {
                    name,
                    education,
                    goal,
                    languages,
                    technical,
                    preferred,
                } => {
                    screen.edit(|form| {
                        if let Some(v) = name {
                            form.name = v;
                        }
                        if let Some(v) = education {
                            form.highest_education_level = v;
                        }
                        if let Some(v) = goal {
                            form.short_term_goal = v;
                        }
                        if let Some(v) = languages {
                            form.programming_languages = v;
                        }
                        if let Some(v) = technical {
                            form.technical_domains = v;
                        }
                        if let Some(v) = preferred {
                            form.preferred_domains = v;
                        }
                    });
                    exit_on_redirect(screen.submit().await);
                    exit_on_failure(&screen);
                    print!("{}", render_profile(&screen));
                }
            }
        }

        Commands::Recommend { input } => {
            let mut screen = RecommendScreen::new(
                client,
                session,
                Arc::new(MockTranscriber::new()),
                settings.recommend_timeout,
            );
            exit_on_redirect(screen.mount().await);

            let nav = match input {
                RecommendInput::Text { text } => {
                    screen.set_input_text(text);
                    screen.submit_text().await
                }
                RecommendInput::Voice { file, transcript } => {
                    screen.set_mode(InputMode::Voice);
                    screen.choose_audio(file.as_deref().map(AudioClip::from_path));
                    if let Some(t) = transcript {
                        screen.set_transcript(t);
                    }
                    screen.submit_voice().await
                }
            };
            exit_on_redirect(nav);
            exit_on_failure(&screen);

            if let Some(last) = screen.last_message() {
                let who = if last.from_voice { "Voice input" } else { "You" };
                println!("{}: {}\n", who, last.text);
            }
            if let Some(result) = screen.result() {
                print!("{}", render_result(result));
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn write_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let template = starrt::config::generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, template)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Config written to {}", path.display());
        }
        None => print!("{}", template),
    }
    Ok(())
}

fn exit_on_failure(screen: &dyn Screen) {
    if let ScreenState::Failed(msg) = screen.state() {
        eprintln!("Error: {}", msg);
        std::process::exit(1);
    }
}

fn exit_on_redirect(nav: Navigation) {
    match nav {
        Navigation::To(Route::Login { .. }) => {
            eprintln!("Not signed in. Run `starrt-cli login` first.");
            std::process::exit(1);
        }
        Navigation::To(Route::Profile) => {
            eprintln!("No profile yet. Run `starrt-cli profile save` first.");
            std::process::exit(1);
        }
        _ => {}
    }
}
