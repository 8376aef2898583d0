use anyhow::{bail, Context, Result};
use retro8080::ProgramSource;
use retro8080_core::MachineConfig;

const USAGE: &str = "usage: retro8080 [image-path] [load-address-hex] [max-steps]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let image_path = args.next().unwrap_or_default();
    let load_address = match args.next() {
        Some(text) => parse_hex_u16(&text)?,
        None => 0x0000,
    };
    let max_steps = match args.next() {
        Some(text) => Some(
            text.parse::<u64>()
                .with_context(|| format!("invalid step limit '{text}'\n{USAGE}"))?,
        ),
        None => None,
    };

    let source = if image_path.is_empty() {
        log::info!("No image path provided, running bundled demo program");
        ProgramSource::Demo
    } else {
        log::info!("Loading image: '{}'", image_path);
        let image = std::fs::read(&image_path)
            .with_context(|| format!("failed to read image '{image_path}'"))?;
        ProgramSource::Image(image)
    };

    let mut config = MachineConfig::builder().load_address(load_address).build();
    config.max_steps = max_steps;
    let (machine, summary) = retro8080::run(config, source)?;
    println!("{}", machine.cpu());
    println!(
        "{:?} after {} instructions ({} cycles)",
        summary.stop, summary.steps, summary.cycles
    );
    Ok(())
}

fn parse_hex_u16(text: &str) -> Result<u16> {
    let digits = text.trim_start_matches("0x").trim_start_matches("0X");
    if digits.is_empty() {
        bail!("empty load address\n{USAGE}");
    }
    u16::from_str_radix(digits, 16)
        .with_context(|| format!("invalid load address '{text}'\n{USAGE}"))
}
