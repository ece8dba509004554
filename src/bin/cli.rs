use clap::{Parser, Subcommand};
use shopwatch::{
    config::{ScraperConfig, ServerConfig},
    db,
    repositories::SqliteCredentialRepository,
    services::{
        credential_service::{CreateCredentialRequest, CredentialService},
        ProductScraper, ReqwestPageFetcher,
    },
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shopwatch-cli")]
#[command(about = "Credential provisioning and product scraping for shopwatch", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Credential management commands
    Credential {
        #[command(subcommand)]
        command: CredentialCommands,
    },

    /// Scrape a single product page and print it as JSON
    Scrape {
        /// Product page URL
        url: String,
    },
}

#[derive(Subcommand)]
enum CredentialCommands {
    /// Create a credential with a fresh salt and auth token
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Hash work factor (defaults to DEFAULT_HASH_ITERATIONS)
        #[arg(short, long)]
        iterations: Option<i64>,
    },
}

fn get_password(prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
    use std::io::{self, Write};
    eprint!("{}: ", prompt);
    io::stderr().flush()?;

    Ok(rpassword::read_password()?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape { url } => {
            let config = Arc::new(ScraperConfig::from_env()?);
            let scraper = ProductScraper::new(config, Arc::new(ReqwestPageFetcher::new()));

            let product = scraper.scrape_or_empty(&url).await;
            println!("{}", serde_json::to_string(&product)?);
        }

        Commands::Credential { command } => match command {
            CredentialCommands::Create {
                email,
                password,
                iterations,
            } => {
                let config = ServerConfig::from_env()?;

                // Connect to database
                let pool = db::create_pool(&config.database_url).await?;
                db::run_migrations(&pool).await?;

                let repository = Arc::new(SqliteCredentialRepository::new(pool));
                let service = CredentialService::new(repository);

                let password = match password {
                    Some(pw) => pw,
                    None => {
                        let password = get_password("Password")?;
                        if password != get_password("Confirm password")? {
                            eprintln!("❌ Passwords do not match");
                            std::process::exit(1);
                        }
                        password
                    }
                };

                let request = CreateCredentialRequest {
                    email,
                    password,
                    iterations: iterations.unwrap_or(config.default_iterations),
                };

                match service.create_credential(request).await {
                    Ok(credential) => {
                        println!("✅ Credential created successfully!");
                        println!("  Email: {}", credential.email);
                        println!("  Iterations: {}", credential.iterations);
                        println!("  Auth token: {}", credential.auth_token);
                    }
                    Err(err) => {
                        eprintln!("❌ Failed to create credential: {}", err);
                        std::process::exit(1);
                    }
                }
            }
        },
    }

    Ok(())
}
