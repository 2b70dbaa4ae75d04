use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use drivvo_rs::{Credentials, DataKind, DrivvoClient, DrivvoConfig, TokioHub, VehicleId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drivvo_rs=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <email> <password> <command> [vehicle_id]", args[0]);
        eprintln!("  command: vehicles, fuel-log, base");
        eprintln!("  vehicle_id: required for fuel-log and base");
        std::process::exit(1);
    }

    let credentials = Credentials::new(&args[1], &args[2]);
    let client = DrivvoClient::with_config(Arc::new(TokioHub::new()), DrivvoConfig::from_env());

    let output = match args[3].as_str() {
        "vehicles" => {
            let token = client
                .authenticate(&credentials, true)
                .await
                .into_token()
                .context("Login failed")?;
            client
                .list_vehicles(&token)
                .await
                .context("Failed to list vehicles")?
        }
        command => {
            let kind: DataKind = command.parse()?;
            let vehicle = args
                .get(4)
                .map(|id| VehicleId::new(id.as_str()))
                .context("Missing vehicle_id")?;

            let data = client
                .get_vehicle_data(&credentials, &vehicle, kind)
                .await
                .with_context(|| format!("Failed to fetch {} for vehicle {}", kind, vehicle))?;

            match data {
                drivvo_rs::VehicleData::FuelLog(entries) => serde_json::to_value(entries)?,
                drivvo_rs::VehicleData::Base(value) => value,
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
