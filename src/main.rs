use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vehicle_directory::{AppError, DirectoryConfig, HttpVehicleStore, ValidationRules, VehicleDirectory};

/// Vehicle Directory - cliente de la API REST de vehículos
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Listar todos los vehículos
    List,
    /// Obtener un vehículo por id
    Get { id: i64 },
    /// Vehículo más cercano a otro
    Nearest { id: i64 },
    /// Distancia en metros entre dos vehículos
    Distance { from: i64, to: i64 },
    /// Eliminar un vehículo
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // El año máximo se fija aquí, una vez por proceso
    let config = DirectoryConfig::from_env(ValidationRules::at_startup())?;
    info!("🚚 Vehicle Directory - {} (años {}-{})", config.resource_url(), config.rules.min_year, config.rules.max_year);

    let rules = config.rules;
    let directory = VehicleDirectory::new(HttpVehicleStore::new(config)?, rules);

    if let Err(e) = run(&directory, args.command).await {
        error!("❌ [{}] {}", e.code(), e);
        return Err(anyhow::anyhow!("[{}] {}", e.code(), e));
    }

    Ok(())
}

async fn run(directory: &VehicleDirectory<HttpVehicleStore>, command: Command) -> Result<(), AppError> {
    match command {
        Command::List => {
            for vehicle in directory.list().await? {
                println!("{}", vehicle);
            }
        }
        Command::Get { id } => println!("{}", directory.get(id).await?),
        Command::Nearest { id } => println!("{}", directory.nearest(id).await?),
        Command::Distance { from, to } => println!("{:.2}", directory.distance(from, to).await?),
        Command::Delete { id } => directory.delete(id).await?,
    }

    Ok(())
}
