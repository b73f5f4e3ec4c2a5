use clap::Parser;

use grid_astar::batch_simulation::{algorithms_for, print_comparison_results, BatchSimulation};
use grid_astar::config::Config;
use grid_astar::error::Result;
use grid_astar::scenario::ScenarioSetup;
use grid_astar::statistics::AlgorithmStats;

fn main() {
    let config = Config::parse();

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    if !config.quiet {
        println!("Grid size: {}x{}", config.width, config.height);
        println!("Walls: {}", config.num_walls);
        println!("Algorithm: {}", config.algorithm);
        println!(
            "Movement: {}",
            if config.allow_diagonal { "8-directional" } else { "4-directional" }
        );
        println!();
    }

    let outcome = if config.batch_mode {
        run_batch(config)
    } else {
        run_single(&config)
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_batch(config: Config) -> Result<()> {
    let quiet = config.quiet;
    let mut batch = BatchSimulation::new(config);
    batch.run()?;
    if !quiet {
        batch.print_summary();
    }
    Ok(())
}

fn run_single(config: &Config) -> Result<()> {
    let algorithms = algorithms_for(&config.algorithm)?;
    let setup = ScenarioSetup::generate(config, config.seed)?;
    let options = config.search_options();

    let runs: Vec<_> = algorithms
        .iter()
        .map(|a| setup.run(a.as_ref(), &options))
        .collect();

    if config.quiet {
        return Ok(());
    }

    if !config.no_visualization {
        let grid = setup.final_grid();
        for (algorithm, routes) in algorithms.iter().zip(&runs) {
            for route in routes {
                println!("[{}] {} route from ({},{}):", algorithm.name(), route.edge, route.start.x, route.start.y);
                match &route.path {
                    Some(path) => println!("{}", grid.render(path, options.reachable_value)),
                    None => println!("No path found\n"),
                }
            }
        }
    }

    if algorithms.len() > 1 {
        let names: Vec<&str> = algorithms.iter().map(|a| a.name()).collect();
        print_comparison_results(&setup, &names, &runs);
    } else {
        let mut stats = AlgorithmStats::new(algorithms[0].name());
        for route in &runs[0] {
            stats.record(route.path.as_deref(), route.elapsed);
        }
        println!("\n=== FINAL RESULTS ===");
        println!("Seed: {}", setup.seed);
        print!("{}", stats);
    }
    Ok(())
}
