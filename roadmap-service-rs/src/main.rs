// roadmap-service-rs/src/main.rs
// Command-line host for the career roadmap service
// Screens input, generates a roadmap and prints it as JSON

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use content_safety_rs::moderator_from_env;
use log::{info, warn};

use roadmap_service_rs::{
    CancellationToken, CareerAdvisor, RoadmapConfig, RoadmapGenerator, SessionContext,
};

/// Exit code when moderation rejects the input
const EXIT_UNSAFE_INPUT: u8 = 2;

#[derive(Parser)]
#[command(name = "career-roadmap")]
#[command(about = "Generate a six-month career roadmap", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a roadmap and print it as JSON
    Generate {
        /// Your name
        name: String,
        /// The career you are aiming for
        career: String,
        /// Optional contact address for the session
        #[arg(long)]
        email: Option<String>,
    },
    /// Ask a career question
    Advice {
        question: String,
        /// Area of interest used to frame the answer
        context: Option<String>,
    },
    /// Compare your skills with a target career
    Skills {
        career: String,
        /// Comma separated list of current skills
        #[arg(value_delimiter = ',')]
        skills: Vec<String>,
    },
}

/// Returns false (after reporting) when any text is rejected
async fn screen_inputs(texts: &[&str]) -> Result<bool, Box<dyn std::error::Error>> {
    let moderator = moderator_from_env()?;
    for text in texts {
        let verdict = moderator.screen(text).await;
        if !verdict.safe {
            warn!("Input rejected by {} moderation", verdict.source.as_str());
            eprintln!("Input was rejected by content moderation; please rephrase and try again.");
            return Ok(false);
        }
    }
    Ok(true)
}

async fn generate(
    config: &RoadmapConfig,
    name: &str,
    career: &str,
    email: Option<&str>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if !screen_inputs(&[name, career]).await? {
        return Ok(ExitCode::from(EXIT_UNSAFE_INPUT));
    }

    let session = SessionContext::login(name, email)?;
    let generator = RoadmapGenerator::from_env(config)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted; finishing with fallback roadmap");
            on_interrupt.cancel();
        }
    });

    let user = session.require_user()?.name.clone();
    let roadmap = generator
        .generate_roadmap_with_cancel(&user, career, &cancel)
        .await?;

    println!("{}", serde_json::to_string_pretty(&roadmap)?);

    let provenance = roadmap.provenance();
    if provenance.quota_exceeded {
        eprintln!("Note: the AI service is at capacity right now, so this is a sample roadmap. Try again later for a personalised one.");
    } else if provenance.is_fallback {
        eprintln!("Note: this is a sample roadmap; the AI service was not available.");
    }
    Ok(ExitCode::SUCCESS)
}

async fn advice(
    advisor: &CareerAdvisor,
    question: &str,
    context: Option<&str>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut texts = vec![question];
    texts.extend(context);
    if !screen_inputs(&texts).await? {
        return Ok(ExitCode::from(EXIT_UNSAFE_INPUT));
    }

    let advice = advisor.get_career_advice(question, context).await?;
    println!("{}", advice.text);
    if advice.is_fallback {
        eprintln!("Note: general guidance only; the AI advisor was not available.");
    }
    Ok(ExitCode::SUCCESS)
}

async fn skills(
    advisor: &CareerAdvisor,
    career: &str,
    skills: &[String],
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if !screen_inputs(&[career]).await? {
        return Ok(ExitCode::from(EXIT_UNSAFE_INPUT));
    }

    let analysis = advisor.analyze_skill_gap(skills, career).await?;
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(ExitCode::SUCCESS)
}

fn build_advisor(config: &RoadmapConfig) -> Result<CareerAdvisor, Box<dyn std::error::Error>> {
    let backend = if config_rs::get_credential(llm_sdk::config::API_KEY_VARS).is_some() {
        let client: std::sync::Arc<dyn llm_sdk::CompletionService> =
            std::sync::Arc::new(llm_sdk::openai_client()?);
        Some(client)
    } else {
        None
    };
    Ok(CareerAdvisor::new(backend, config))
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    config_rs::load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = RoadmapConfig::from_env()?;
    info!(
        "Candidate models: {}",
        config
            .models
            .iter()
            .map(|m| format!("{} ({})", m.id, m.strategy))
            .collect::<Vec<_>>()
            .join(", ")
    );

    match cli.command {
        Commands::Generate { name, career, email } => {
            generate(&config, &name, &career, email.as_deref()).await
        }
        Commands::Advice { question, context } => {
            advice(&build_advisor(&config)?, &question, context.as_deref()).await
        }
        Commands::Skills { career, skills: current } => {
            skills(&build_advisor(&config)?, &career, &current).await
        }
    }
}
