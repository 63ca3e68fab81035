use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use signup_flow::api::{ApiClient, SocialProvider};
use signup_flow::config::ApiConfig;
use signup_flow::store::FileTokenStore;
use signup_flow::wizard::{Role, SignupStep, ThemePreference, WizardCommand, WizardController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ApiConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let token_path = std::env::var("SIGNUP_TOKEN_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            std::path::PathBuf::from(home).join(".signup-flow/token.json")
        });

    eprintln!("✨ signup-flow v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "   API base: {}",
        if config.base_url.is_empty() {
            "(same origin)"
        } else {
            &config.base_url
        }
    );
    eprintln!("   Token file: {}", token_path.display());
    eprintln!("   Type 'help' for commands. /quit to exit.\n");

    let store = Arc::new(FileTokenStore::new(token_path));
    let api = Arc::new(ApiClient::new(config, store));
    let mut controller = WizardController::new(api);

    render(&controller);

    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }
        if line == "/quit" {
            break;
        }

        match parse(line, &mut controller) {
            Input::Command(command) => {
                if let Err(rejection) = controller.dispatch(command).await {
                    eprintln!("✋ {rejection}");
                }
                render(&controller);
            }
            Input::Updated => render(&controller),
            Input::Help => help(),
            Input::Unknown => eprintln!("Unknown command. Type 'help' for the list."),
        }
        eprint!("> ");
    }

    Ok(())
}

enum Input {
    Command(WizardCommand),
    Updated,
    Help,
    Unknown,
}

fn parse(line: &str, controller: &mut WizardController) -> Input {
    let (verb, rest) = match line.split_once(' ') {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let session = controller.session_mut();
    match verb {
        "help" => Input::Help,
        "email" => {
            session.email = rest.to_string();
            Input::Updated
        }
        "name" => {
            session.full_name = rest.to_string();
            Input::Updated
        }
        "password" => {
            session.set_password(rest);
            Input::Updated
        }
        "role" => match rest {
            "user" => {
                session.role = Role::User;
                Input::Updated
            }
            "creator" => {
                session.role = Role::Creator;
                Input::Updated
            }
            "admin" => {
                session.role = Role::Admin;
                Input::Updated
            }
            _ => Input::Unknown,
        },
        "newsletter" => match rest {
            "on" => {
                session.newsletter_opt_in = true;
                Input::Updated
            }
            "off" => {
                session.newsletter_opt_in = false;
                Input::Updated
            }
            _ => Input::Unknown,
        },
        "theme" => match rest {
            "dark" => {
                session.theme_preference = ThemePreference::Dark;
                Input::Updated
            }
            "light" => {
                session.theme_preference = ThemePreference::Light;
                Input::Updated
            }
            "system" => {
                session.theme_preference = ThemePreference::System;
                Input::Updated
            }
            _ => Input::Unknown,
        },
        "register" => Input::Command(WizardCommand::SubmitRegistration),
        "login" => Input::Command(WizardCommand::SubmitLogin),
        "google" => Input::Command(WizardCommand::SocialSignIn {
            provider: SocialProvider::Google,
            id_token: "placeholder-id-token".to_string(),
        }),
        "apple" => Input::Command(WizardCommand::SocialSignIn {
            provider: SocialProvider::Apple,
            id_token: "placeholder-id-token".to_string(),
        }),
        "continue" => Input::Command(WizardCommand::SubmitProfile),
        "finish" => Input::Command(WizardCommand::FinishPreferences),
        "back" => Input::Command(WizardCommand::Back),
        _ => Input::Unknown,
    }
}

fn render(controller: &WizardController) {
    let session = controller.session();

    let marker = |step: SignupStep| if session.step == step { "●" } else { "○" };
    println!(
        "\n{} Account  {} Profile  {} Preferences",
        marker(SignupStep::Account),
        marker(SignupStep::Profile),
        marker(SignupStep::Preferences),
    );

    if let Some(error) = &session.last_error {
        println!("❌ {error}");
    }
    if let Some(success) = &session.last_success {
        println!("✅ {success}");
    }

    match session.step {
        SignupStep::Account => {
            println!(
                "   email: {}   name: {}",
                or_unset(&session.email),
                or_unset(&session.full_name)
            );
            println!("   actions: register | login | google | apple");
        }
        SignupStep::Profile => {
            println!(
                "   role: {}   newsletter: {}",
                session.role,
                if session.newsletter_opt_in { "on" } else { "off" }
            );
            println!("   actions: continue | back");
        }
        SignupStep::Preferences => {
            println!("   theme: {}", session.theme_preference);
            if session.onboarded {
                println!("   Onboarding complete. You can still go back or /quit.");
            } else {
                println!("   actions: finish | back");
            }
        }
    }
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() { "(unset)" } else { value }
}

fn help() {
    println!("Fields:   email <addr> | name <full name> | password <pw>");
    println!("          role user|creator|admin | newsletter on|off | theme dark|light|system");
    println!("Actions:  register | login | google | apple | continue | finish | back");
    println!("Other:    help | /quit");
}
