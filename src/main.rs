use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use cookbook::config::Config;
use cookbook::{build_app, cli, db};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web server (the default)
    Serve,
    /// Create an empty recipe book and print its id
    CreateBook { title: String },
    /// Import recipes from a JSON array file into an existing recipe book
    Import {
        #[arg(long)]
        book: String,
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::load()?;
    let pool = db::init_pool(&config.database_url).await?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let app = build_app(pool, config.upload_dir);

            let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
            let listener = TcpListener::bind(addr).await?;

            tracing::info!("listening on {}", addr);
            axum::serve(listener, app).await?;
        }
        Command::CreateBook { title } => {
            cli::create_book(&pool, &title).await?;
        }
        Command::Import { book, file } => {
            cli::import_recipes(&pool, &file, &book).await?;
        }
    }

    Ok(())
}
