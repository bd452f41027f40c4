use clap::{Args, Parser, Subcommand};
use letscover::{
    read_instance, run, RoundingConfig, RunConfig, RunMode, SolverBackend, SolverConfig,
    SolverFactory,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "letscover")]
#[command(
    about = "Weighted set cover by integer programming or LP randomized rounding",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the 0/1 covering program exactly
    Exact {
        #[command(flatten)]
        solve: SolveArgs,
    },
    /// Approximate with LP relaxation and randomized rounding
    Approx {
        #[command(flatten)]
        solve: SolveArgs,
    },
    /// Run both solvers and report the approximation ratio
    Compare {
        #[command(flatten)]
        solve: SolveArgs,
    },
    /// Parse and validate an instance file
    Check {
        /// The instance file
        file: PathBuf,
    },
}

#[derive(Args)]
struct SolveArgs {
    /// The instance file
    file: PathBuf,
    /// Backend: auto, highs or cbc
    #[arg(short, long, default_value = "auto")]
    backend: SolverBackend,
    /// Time limit in seconds for the exact solve
    #[arg(short, long)]
    time_limit: Option<f64>,
    /// Relative MIP gap accepted by the exact solve
    #[arg(long)]
    gap: Option<f64>,
    /// Seed for the rounding trials
    #[arg(short, long)]
    seed: Option<u64>,
    /// Counter value ending the doubling trial schedule (defaults to the set count)
    #[arg(long)]
    threshold: Option<usize>,
    /// Show backend output
    #[arg(short, long)]
    verbose: bool,
}

impl SolveArgs {
    fn into_config(self, mode: RunMode) -> RunConfig {
        let solver_config = SolverConfig {
            backend: self.backend,
            time_limit: self.time_limit,
            gap_tolerance: self.gap,
            verbose: self.verbose,
        };
        let solver = SolverFactory::create_solver(&solver_config);

        let mut rounding = RoundingConfig::default();
        if let Some(threshold) = self.threshold {
            rounding = rounding.with_trial_threshold(threshold);
        }

        let config = RunConfig::new(self.file, mode, solver)
            .with_solver_config(solver_config)
            .with_rounding(rounding);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Exact { solve } => solve.into_config(RunMode::Exact),
        Commands::Approx { solve } => solve.into_config(RunMode::Approximate),
        Commands::Compare { solve } => solve.into_config(RunMode::Compare),
        Commands::Check { file } => {
            match read_instance(&file) {
                Ok(instance) => {
                    println!(
                        "✓ {}: {} elements, {} sets",
                        file.display(),
                        instance.universe_size(),
                        instance.set_count()
                    );
                }
                Err(e) => {
                    eprintln!("✗ {}", e);
                    std::process::exit(1);
                }
            }
            return;
        }
    };

    match run(&config) {
        Ok(report) => print!("{}", report),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
