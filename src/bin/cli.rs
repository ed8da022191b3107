use clap::{Parser, Subcommand};
use coachdesk::cli::create_admin_code;
use coachdesk::cli::seeder::{clear_database, seed_database};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "coachdesk-cli")]
#[command(about = "Administrative tools for the Coachdesk backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint a one-time code for registering an admin account
    CreateAdminCode,
    /// Seed the database with development fixtures
    Seed,
    /// Delete all rows from every application table
    Clear,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdminCode => match create_admin_code(&pool).await {
            Ok(code) => {
                println!("Admin creation code (single use):");
                println!("  {code}");
            }
            Err(e) => {
                eprintln!("Error creating admin code: {e}");
                std::process::exit(1);
            }
        },
        Commands::Seed => {
            if let Err(e) = seed_database(&pool).await {
                eprintln!("Error seeding database: {e}");
                std::process::exit(1);
            }
        }
        Commands::Clear => {
            if let Err(e) = clear_database(&pool).await {
                eprintln!("Error clearing database: {e}");
                std::process::exit(1);
            }
        }
    }
}
