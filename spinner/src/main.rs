use shared::validation::validate_rig_configuration;
use shared::DEFAULT_PRIZES;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use crate::config::WheelConfig;
use crate::console::ConsoleCommand;
use crate::controller::WheelController;

mod admin;
mod config;
mod console;
mod controller;
mod effects;
mod error;
mod logging;
mod runtime;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_path(".env").ok();
    logging::setup();

    let config = WheelConfig::from_env()?;
    info!(
        mode = %config.rig.mode,
        chance = config.rig.win_probability_percent,
        prize_id = config.rig.target_prize_id,
        spin_ms = config.spin_duration.as_millis() as u64,
        "wheel starting"
    );

    if let Ok(Some(warning)) = validate_rig_configuration(&DEFAULT_PRIZES, &config.rig) {
        warn!(
            prize_id = config.rig.target_prize_id,
            reason = %warning.code,
            "configured target prize will fall back to a default entry"
        );
    }

    let controller = WheelController::new(
        DEFAULT_PRIZES.clone(),
        &config,
        console::collaborators(config.seed),
    );
    let (wheel, task) = runtime::spawn(controller, &config);

    println!("{}", console::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let sent = match command {
            ConsoleCommand::Spin => wheel.request_spin(),
            ConsoleCommand::Acknowledge => wheel.acknowledge(),
            ConsoleCommand::Status => wheel.snapshot().await.map(|state| {
                match serde_json::to_string_pretty(&state) {
                    Ok(json) => println!("{}", json),
                    Err(e) => warn!("Failed to encode wheel state: {}", e),
                }
            }),
            ConsoleCommand::Admin(admin) => match wheel.admin(admin).await {
                Ok(reply) => {
                    println!("{}", reply);
                    Ok(())
                }
                Err(e) => {
                    println!("{}", e);
                    Ok(())
                }
            },
            ConsoleCommand::Help => {
                println!("{}", console::HELP);
                Ok(())
            }
            ConsoleCommand::Quit => break,
        };

        if let Err(e) = sent {
            error!("Wheel stopped responding: {}", e);
            break;
        }
    }

    wheel.shutdown();
    drop(wheel);
    let controller = task.await?;
    info!(spins = controller.state().spin_id, "wheel stopped");

    Ok(())
}
