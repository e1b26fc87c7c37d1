#![allow(unexpected_cfgs)]

mod commands;
mod error;
mod util;
use argh::FromArgs;
use core::error::Error;

#[derive(FromArgs, Debug)]
/// Converts between images and Angel Studios TEX/XTEX textures
struct TopLevel {
    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Commands {
    Encode(commands::encode::EncodeCmd),
    Decode(commands::decode::DecodeCmd),
    Info(commands::info::InfoCmd),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli: TopLevel = argh::from_env();

    match cli.command {
        Commands::Encode(cmd) => {
            commands::encode::handle_encode_command(cmd)?;
        }
        Commands::Decode(cmd) => {
            commands::decode::handle_decode_command(cmd)?;
        }
        Commands::Info(cmd) => {
            commands::info::handle_info_command(cmd)?;
        }
    }

    Ok(())
}
