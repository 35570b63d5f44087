#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    broadside::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!(
            "Usage: {} <seed> [games]",
            args.first().map_or("sim", String::as_str)
        );
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let games: u64 = match args.get(2) {
        Some(n) => n.parse()?,
        None => 1,
    };

    for offset in 0..games {
        let report = broadside::simulate(seed.wrapping_add(offset))?;
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}
