use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::optimizer::config::{FineTuneConfig, FineTuneStrategy};

/// MealAdjuster: rescales a meal's food quantities toward a macro and calorie target.
#[derive(Parser, Debug)]
#[command(name = "meal_adjuster")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the meal request JSON file.
    #[arg(short, long, default_value = "meal_request.json", global = true)]
    pub file: String,

    /// Optional optimizer config JSON file.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rescale the meal toward the target and print the adjusted meal.
    Adjust(AdjustArgs),

    /// Report totals and deviation of the meal as given.
    Score,
}

impl Default for Command {
    fn default() -> Self {
        Command::Adjust(AdjustArgs::default())
    }
}

#[derive(clap::Args, Debug, Default)]
pub struct AdjustArgs {
    /// Write the result JSON to this path.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the result as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Fine-tune update rule.
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Maximum fine-tune rounds.
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Deviation tolerance in percent.
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Prompt for the target and confirm before overwriting output.
    #[arg(short, long)]
    pub interactive: bool,
}

impl AdjustArgs {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut FineTuneConfig) {
        if let Some(strategy) = self.strategy {
            config.strategy = strategy.into();
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance_percent = tolerance;
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyArg {
    /// One ratio per item, quantity and nutrients in lockstep.
    PerItem,
    /// Compatibility update rule (carried last ratio).
    Legacy,
}

impl From<StrategyArg> for FineTuneStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::PerItem => FineTuneStrategy::PerItem,
            StrategyArg::Legacy => FineTuneStrategy::Legacy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_adjust() {
        let cli = Cli::try_parse_from(["meal_adjuster"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, "meal_request.json");
        assert!(matches!(cli.command.unwrap_or_default(), Command::Adjust(_)));
    }

    #[test]
    fn test_adjust_overrides() {
        let cli = Cli::try_parse_from([
            "meal_adjuster",
            "adjust",
            "--strategy",
            "legacy",
            "--max-iterations",
            "7",
            "--tolerance",
            "2.5",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);

        let Some(Command::Adjust(args)) = cli.command else {
            panic!("expected adjust");
        };
        let mut config = FineTuneConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.strategy, FineTuneStrategy::Legacy);
        assert_eq!(config.max_iterations, 7);
        assert_eq!(config.tolerance_percent, 2.5);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let args = AdjustArgs::default();
        let mut config = FineTuneConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config, FineTuneConfig::default());
    }
}
