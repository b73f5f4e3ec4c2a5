use crate::algorithms::common::SearchOptions;
use clap::Parser;

/// Edge-to-centre route planning on a random grid.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 30)]
    pub width: usize,

    #[arg(long, default_value_t = 16)]
    pub height: usize,

    /// Minimum distance of the centre point from the left and right edges
    #[arg(long, default_value_t = 7)]
    pub margin_x: usize,

    /// Minimum distance of the centre point from the top and bottom edges
    #[arg(long, default_value_t = 4)]
    pub margin_y: usize,

    /// Extra randomly placed blocked cells
    #[arg(long, default_value_t = 0)]
    pub num_walls: usize,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub reachable_value: i32,

    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    pub blocked_value: i32,

    #[arg(long, default_value_t = false)]
    pub allow_diagonal: bool,

    /// Seed for reproducible grids; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// One of a_star, reference, all
    #[arg(long, default_value = "a_star")]
    pub algorithm: String,

    #[arg(long, default_value_t = false)]
    pub batch_mode: bool,

    /// Number of scenarios in batch mode
    #[arg(long, default_value_t = 100)]
    pub runs: usize,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            reachable_value: self.reachable_value,
            allow_diagonal: self.allow_diagonal,
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => log::LevelFilter::Warn,
            (false, 0) => log::LevelFilter::Info,
            (false, 1) => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_map() {
        let config = Config::parse_from(["grid_astar"]);
        assert_eq!((config.width, config.height), (30, 16));
        assert_eq!((config.margin_x, config.margin_y), (7, 4));
        assert_eq!(config.search_options(), SearchOptions::default());
        assert_eq!(config.blocked_value, -1);
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn flags_parse() {
        let config = Config::parse_from([
            "grid_astar",
            "--allow-diagonal",
            "--reachable-value",
            "-3",
            "--seed",
            "42",
            "-vv",
        ]);
        assert!(config.allow_diagonal);
        assert_eq!(config.reachable_value, -3);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_level(), log::LevelFilter::Trace);
    }
}
