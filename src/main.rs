//! # fuel-swift
//!
//! Scripted walk through one delivery: sign in, register a vehicle, check out and, with
//! `--follow`, watch the order move through every delivery stage in real time.
//!
//! ```bash
//! RUST_LOG=info cargo run -- --phone 9876543210 --litres 5 --follow
//! cargo run -- --config fuel-swift.toml
//! ```

use actor_framework::ActorClient;
use clap::Parser;
use fuel_swift::config::AppConfig;
use fuel_swift::identity_actor::Access;
use fuel_swift::lifecycle::{setup_tracing, FuelSystem};
use fuel_swift::model::{FuelType, PaymentMethod, VehicleCreate, VehicleType};
use fuel_swift::pricing::QuantityRequest;
use std::path::PathBuf;
use tracing::{info, info_span, Instrument};

#[derive(Debug, Parser)]
#[command(name = "fuel-swift", about = "Doorstep fuel delivery, simulated end to end")]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Mobile number to sign in with
    #[arg(long, default_value = "9876543210")]
    phone: String,

    /// Litres of fuel to order
    #[arg(long, default_value_t = 5.0)]
    litres: f64,

    /// Stay until the delivery completes
    #[arg(long)]
    follow: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path).await?,
        None => AppConfig::default(),
    };
    setup_tracing(&config.logging.filter);

    info!("Starting fuel-swift");
    let system = FuelSystem::launch(config.clone()).await?;

    let profile = async {
        let profile = system.sign_in(&cli.phone, &config.auth.accepted_code).await?;
        if system.access().await? == Access::ProfileSetup {
            return system.complete_profile("Demo Driver", None).await;
        }
        Ok(profile)
    }
    .instrument(info_span!("sign_in"))
    .await?;
    info!(user_id = %profile.id, name = %profile.full_name, "Signed in");

    let vehicle = match system.vehicles.list().await?.into_iter().next() {
        Some(existing) => existing,
        None => {
            let id = system
                .vehicles
                .add_vehicle(VehicleCreate {
                    nickname: "Daily Driver".to_string(),
                    registration_number: "MH 01 AB 1234".to_string(),
                    fuel_type: FuelType::Petrol,
                    vehicle_type: VehicleType::Car,
                })
                .await?;
            system.vehicles.require(id).await?
        }
    };
    info!(vehicle_id = %vehicle.id, nickname = %vehicle.nickname, "Vehicle ready");

    let order = async {
        system
            .select_vehicle(vehicle.id.clone(), "221B Marine Drive, Mumbai", None)
            .await?;
        let quote = system
            .configure_quantity(QuantityRequest::Litres(cli.litres))
            .await?;
        info!(
            fuel_cost = quote.fuel_cost,
            fee = quote.convenience_fee,
            gst = quote.gst_on_fee,
            total = quote.total_amount,
            "Quote"
        );
        system.choose_payment(PaymentMethod::Upi).await?;
        system.place_order().await
    }
    .instrument(info_span!("checkout"))
    .await?;
    info!(order_id = %order.id, status = %order.status, "Order placed");

    if cli.follow {
        let mut active = system.orders.watch_active();
        loop {
            active.changed().await?;
            let Some(current) = active.borrow_and_update().clone() else {
                break;
            };
            info!(status = %current.status, otp = ?current.otp, "Delivery update");
            if current.status.is_terminal() {
                break;
            }
        }
    }

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
