use std::path::{Path, PathBuf};

use clap::Parser;
use crate::prelude::*;

#[derive(Clone, Debug, Default, Parser)]
#[command(version, about = "Plays cookie crunch levels over a line-oriented text protocol")]
pub struct CrunchServerOptions {
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Seed for every random draw; a random seed is chosen (and logged) when absent.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// JSON level played by `newgame` when no file is given.
    #[arg(long)]
    pub level: Option<PathBuf>,
}

impl CrunchServerOptions {
    /// The random source the server draws each game's seed from.
    pub fn rng(&self) -> StdRng {
        let seed = self.seed.unwrap_or_else(rand::random::<u64>);
        log::info!("using seed {seed}");
        StdRng::seed_from_u64(seed)
    }

    /// Loads a level from `path`, else from `--level`, else the default full 9x9 level.
    pub fn load_level(&self, path: Option<&Path>) -> Result<LevelDescriptor> {
        let Some(path) = path.or(self.level.as_deref()) else {
            return Ok(LevelDescriptor::filled(9, 9, 1000, 15));
        };
        let json = std::fs::read_to_string(path).with_context(|| format!("could not read level {}", path.display()))?;
        let level = LevelDescriptor::parse(&json).with_context(|| format!("invalid level {}", path.display()))?;
        log::info!("loaded level {}", path.display());
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_command_line() {
        let options = CrunchServerOptions::parse_from(["crunch", "-l", "debug", "--seed", "42", "--level", "level_1.json"]);
        assert_eq!(options.log_level.as_deref(), Some("debug"));
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.level, Some(PathBuf::from("level_1.json")));
    }

    #[test]
    fn seeded_options_are_reproducible() {
        let options = CrunchServerOptions { seed: Some(7), ..Default::default() };
        assert_eq!(options.rng().random::<u64>(), options.rng().random::<u64>());
    }

    #[test]
    fn default_level_and_missing_files() {
        let options = CrunchServerOptions::default();
        let level = options.load_level(None).unwrap();
        assert_eq!((level.width(), level.height()), (9, 9));
        assert!(options.load_level(Some(Path::new("/nonexistent/level.json"))).is_err());
    }

    #[test]
    fn bundled_levels_load() {
        let options = CrunchServerOptions { level: Some(PathBuf::from("levels/level_1.json")), ..Default::default() };
        let level = options.load_level(None).unwrap();
        assert_eq!(level.playable_coords().len(), 81 - 16);

        let level = options.load_level(Some(Path::new("levels/level_2.json"))).unwrap();
        assert_eq!(level.cookie_types, 5);
        assert_eq!(level.target_score, 2000);
    }
}
