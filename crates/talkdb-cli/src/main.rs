mod report;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "talkdb-cli")]
#[command(about = "Talk topic database command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Daily-update pipeline
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommands,
    },
    /// News search without classification or persistence
    News {
        #[command(subcommand)]
        command: NewsCommands,
    },
    /// Print the keyword cloud over recent talks
    Keywords {
        /// Number of recent talks to scan
        #[arg(long, default_value = "100")]
        limit: i64,
    },
    /// Five-elements team analysis
    Elements {
        /// Team member as `name:YYYY-MM-DD` or `name:YYYY-MM-DD:HH:MM`
        #[arg(long = "member", required = true)]
        members: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[derive(Debug, Subcommand)]
enum PipelineCommands {
    /// Run one full update now: collect, classify, save, log
    Run,
}

#[derive(Debug, Subcommand)]
enum NewsCommands {
    /// Collect and print headlines
    Collect {
        /// Maximum number of headlines to keep
        #[arg(long, default_value = "20")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let default_level = std::env::var("TALKDB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&default_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Db { command }) => {
            let pool = connect(&talkdb_core::load_app_config_from_env()?).await?;
            match command {
                DbCommands::Ping => {
                    talkdb_db::health_check(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = talkdb_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        Some(Commands::Pipeline {
            command: PipelineCommands::Run,
        }) => {
            let config = talkdb_core::load_app_config_from_env()?;
            let pool = connect(&config).await?;
            report::run_pipeline(&config, pool).await?;
        }
        Some(Commands::News {
            command: NewsCommands::Collect { count },
        }) => report::run_news_collect(&talkdb_core::load_app_config_from_env()?, count).await?,
        Some(Commands::Keywords { limit }) => {
            let pool = connect(&talkdb_core::load_app_config_from_env()?).await?;
            report::run_keywords(&pool, limit).await?;
        }
        // Team analysis needs neither the database nor any credentials.
        Some(Commands::Elements { members }) => report::run_elements(&members)?,
        None => println!("talkdb-cli ready; run with --help to list commands"),
    }

    Ok(())
}

async fn connect(config: &talkdb_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = talkdb_db::PoolConfig::from_app_config(config);
    Ok(talkdb_db::connect_pool(&config.database_url, pool_config).await?)
}
