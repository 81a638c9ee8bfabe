//! Plain-text rendering of screens for terminals

use crate::app::ActiveScreen;
use crate::client::{EducationLevel, RecommendationResult};
use crate::screens::{
    DashboardScreen, InputMode, LoginScreen, ProfileScreen, RecommendScreen, RegisterScreen,
    Screen, ScreenState,
};
use std::fmt::Write;

const BRAND: &str = "STARRT.ai";
const RULE_WIDTH: usize = 60;

pub fn render(screen: &ActiveScreen) -> String {
    match screen {
        ActiveScreen::Home(_) => render_home(),
        ActiveScreen::Login(s) => render_login(s),
        ActiveScreen::Register(s) => render_register(s),
        ActiveScreen::Dashboard(s) => render_dashboard(s),
        ActiveScreen::Profile(s) => render_profile(s),
        ActiveScreen::Recommend(s) => render_recommend(s),
    }
}

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "{} · {}", BRAND, title);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
}

fn status_line(out: &mut String, state: &ScreenState, busy_label: &str) {
    match state {
        ScreenState::Submitting => {
            let _ = writeln!(out, "… {}", busy_label);
        }
        ScreenState::Failed(msg) => {
            let _ = writeln!(out, "! {}", msg);
        }
        _ => {}
    }
}

fn field(out: &mut String, label: &str, value: &str) {
    let shown = if value.is_empty() { "-" } else { value };
    let _ = writeln!(out, "  {:<34} {}", label, shown);
}

pub fn render_home() -> String {
    let mut out = String::new();
    header(&mut out, "AI-Powered Career Guidance");
    out.push_str("Discover Your Perfect Career Path\n\n");
    out.push_str(
        "Let AI analyze your skills, interests, and goals to recommend the best\n\
         career trajectory and learning roadmap for you.\n\n",
    );
    out.push_str("  AI Analysis      Your profile is matched to an expertise field\n");
    out.push_str("  Roadmaps         Personalized learning paths\n");
    out.push_str("  Expert Matching  Connect with people in your chosen field\n");
    out
}

pub fn render_login(screen: &LoginScreen) -> String {
    let mut out = String::new();
    header(&mut out, "Welcome Back");
    if let Some(banner) = screen.banner() {
        let _ = writeln!(out, "✓ {}", banner);
    }
    status_line(&mut out, screen.state(), "Signing in...");
    field(&mut out, "Email", &screen.form.email);
    field(
        &mut out,
        "Password",
        &"•".repeat(screen.form.password.chars().count()),
    );
    out
}

pub fn render_register(screen: &RegisterScreen) -> String {
    let mut out = String::new();
    header(&mut out, "Create Account");
    status_line(&mut out, screen.state(), "Creating account...");
    field(&mut out, "Full Name", &screen.form.name);
    field(&mut out, "Email", &screen.form.email);
    field(
        &mut out,
        "Password",
        &"•".repeat(screen.form.password.chars().count()),
    );
    out
}

pub fn render_dashboard(screen: &DashboardScreen) -> String {
    let mut out = String::new();
    header(&mut out, "Dashboard");
    status_line(&mut out, screen.state(), "");
    let _ = writeln!(out, "Hello, {} 👋", screen.user_name());
    out.push_str("Let's help you choose your best career path\n\n");
    out.push_str("  Profile Setup        Tell us about your skills, interests, and goals\n");
    out.push_str("  Get Recommendations  Discover the career path tailored for you\n");
    out
}

pub fn render_profile(screen: &ProfileScreen) -> String {
    let mut out = String::new();
    header(&mut out, "Your Profile");
    if let Some(msg) = screen.success_message() {
        let _ = writeln!(out, "✓ {}", msg);
    }
    status_line(&mut out, screen.state(), "Saving...");

    let form = screen.form();
    field(&mut out, "Full Name", &form.name);
    field(
        &mut out,
        "Education Level",
        &education_choices(form.highest_education_level),
    );
    field(&mut out, "Short-term Goal", &form.short_term_goal);
    field(
        &mut out,
        "Programming Languages (comma-separated)",
        &form.programming_languages,
    );
    field(
        &mut out,
        "Technical Domains (comma-separated)",
        &form.technical_domains,
    );
    field(
        &mut out,
        "Preferred Domains (comma-separated)",
        &form.preferred_domains,
    );
    out
}

fn education_choices(selected: EducationLevel) -> String {
    EducationLevel::ALL
        .iter()
        .map(|level| {
            if *level == selected {
                format!("[{}]", level)
            } else {
                level.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_recommend(screen: &RecommendScreen) -> String {
    let mut out = String::new();
    header(&mut out, "Recommendations");

    if let Some(result) = screen.result() {
        if let Some(last) = screen.last_message() {
            let who = if last.from_voice { "🎙️ Voice input" } else { "You" };
            let _ = writeln!(out, "{}:", who);
            let _ = writeln!(out, "  {}\n", last.text);
        }
        out.push_str(&render_result(result));
        return out;
    }

    let _ = writeln!(out, "Hello, {} 🎯", screen.user_name());
    out.push_str("Tell me about your interests, and I'll recommend the perfect career path ");
    out.push_str("for you.\n\n");
    status_line(&mut out, screen.state(), "Analyzing...");

    match screen.mode() {
        InputMode::Text => {
            out.push_str("Mode: Text Input\n");
            field(&mut out, "Message", screen.input_text());
        }
        InputMode::Voice => {
            out.push_str("Mode: Voice Input (Simulated)\n");
            let audio = screen
                .audio()
                .map(|clip| format!("{} selected", clip.file_name))
                .unwrap_or_else(|| "No audio selected".to_string());
            field(&mut out, "Audio", &audio);
            field(&mut out, "Transcript", screen.transcript());
        }
    }
    out
}

/// Result bubble for a recommendation
pub fn render_result(result: &RecommendationResult) -> String {
    let mut out = String::new();
    out.push_str("Career recommendation\n");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(out, "Recommended Field: {}", result.expertise_field);
    let _ = writeln!(out, "Confidence:        {}", result.confidence_percent());
    out.push_str("\nLearning Roadmap:\n");
    for line in result.roadmap.lines() {
        let _ = writeln!(out, "  {}", line);
    }
    out.push_str("\nWhy this path?\n");
    let _ = writeln!(out, "  {}", result.explanation);
    out
}
