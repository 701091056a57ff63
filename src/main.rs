// Evolve can-collecting policies and stream the best score per generation.
//
//   cargo run --release -- --population 1000 --generations 500 --seed 42
//   cargo run -- --smoke
//
// Logs go to stderr (filter with RUST_LOG); stdout carries `generation,bestScore` rows.

use std::env;
use std::process;

use canbot::{EvolutionConfig, Evolver, GenerationReport, Genome, GridWorld, SensorReading};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--smoke") {
        let seed = parse_or(&args, "--seed", 42u64);
        smoke_test(seed);
        return;
    }

    let config = match config_from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(2);
        }
    };
    let show_best = args.iter().any(|a| a == "--show-best");

    let mut evolver = match Evolver::new(config) {
        Ok(evolver) => evolver,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(2);
        }
    };

    println!("{}", GenerationReport::CSV_HEADER);
    let mut sink = |report: &GenerationReport| println!("{}", report);
    if let Err(e) = evolver.run(&mut sink) {
        eprintln!("Evolution aborted: {}", e);
        process::exit(1);
    }

    if let Some((index, genome, score)) = evolver.population().best() {
        info!(index, score, "best genome of final generation");
        if show_best {
            print!("{}", genome);
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn config_from_args(args: &[String]) -> Result<EvolutionConfig, String> {
    let defaults = EvolutionConfig::default();
    let seed = match arg_value(args, "--seed") {
        Some(raw) => Some(parse(raw, "--seed")?),
        None => None,
    };
    let config = EvolutionConfig {
        population_size: parse_flag(args, "--population", defaults.population_size)?,
        generations: parse_flag(args, "--generations", defaults.generations)?,
        mutation_count: parse_flag(args, "--mutations", defaults.mutation_count)?,
        fill_rate: parse_flag(args, "--fill", defaults.fill_rate)?,
        max_steps: parse_flag(args, "--steps", defaults.max_steps)?,
        seed,
        ..defaults
    };
    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;
    Ok(config)
}

fn smoke_test(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let defaults = EvolutionConfig::default();

    println!("Example world");
    match GridWorld::create_random(defaults.fill_rate, &mut rng) {
        Ok(world) => {
            let center = GridWorld::center();
            print!("{}", world);
            println!("Total cans: {}", world.remaining_item_count());
            println!("Current input: {}", world.read_sensors(center.x, center.y));
        }
        Err(e) => eprintln!("Could not build world: {}", e),
    }
    println!();

    println!("Input combinations + integer conversion");
    for (code, reading) in SensorReading::all().enumerate() {
        println!("{} -> {} -> {}", code, reading, reading.encode());
    }
    println!();

    println!("Random robot");
    print!("{}", Genome::create_random(&mut rng));
    println!();
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

fn parse<T: std::str::FromStr>(raw: &str, key: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("Invalid value '{}' for {}", raw, key))
}

fn parse_flag<T: std::str::FromStr>(args: &[String], key: &str, default: T) -> Result<T, String> {
    match arg_value(args, key) {
        Some(raw) => parse(raw, key),
        None => Ok(default),
    }
}

fn parse_or<T: std::str::FromStr>(args: &[String], key: &str, default: T) -> T {
    parse_flag(args, key, default).unwrap_or_else(|message| {
        eprintln!("{}", message);
        process::exit(2);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags_override_defaults() {
        let config = config_from_args(&args(&[
            "canbot",
            "--population",
            "50",
            "--mutations",
            "3",
            "--seed",
            "9",
        ]))
        .unwrap();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.mutation_count, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_steps, EvolutionConfig::default().max_steps);
    }

    #[test]
    fn unparsable_value_is_reported() {
        let err = config_from_args(&args(&["canbot", "--fill", "lots"])).unwrap_err();
        assert_eq!(err, "Invalid value 'lots' for --fill");
    }

    #[test]
    fn invalid_config_is_reported_as_message() {
        let err = config_from_args(&args(&["canbot", "--population", "1"])).unwrap_err();
        assert!(err.starts_with("Invalid configuration:"));
        assert!(err.contains(&canbot::ContractError::PopulationTooSmall(1).to_string()));

        let err = config_from_args(&args(&["canbot", "--mutations", "243"])).unwrap_err();
        assert!(err.starts_with("Invalid configuration:"));
    }
}
