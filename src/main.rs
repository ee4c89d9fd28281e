use clap::{Parser, Subcommand};
use coup_solver::cli::{output, validation};
use coup_solver::models::GameState;
use coup_solver::solver::{Solver, TraversalMode};

/// Coup MCCFR solver utilities
#[derive(Parser)]
#[command(name = "coup-solver")]
#[command(about = "MCCFR self-play solver for two-player Coup", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RNG seed for the solver's own randomness
    #[arg(long, default_value_t = 0, global = true)]
    seed: u64,

    /// Recursion depth cap for a single traversal
    #[arg(long, default_value_t = 300, global = true)]
    max_depth: u32,

    /// Traversal strategy: sampled (outcome-sampling) or full (full-branch)
    #[arg(long, default_value = "sampled", global = true)]
    traversal_mode: TraversalMode,

    /// Log truncated/sampled traversal detail
    #[arg(long, global = true)]
    debug: bool,

    /// Log the infoset key visited at every decision
    #[arg(long, global = true)]
    log_infoset_hash: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run MCCFR self-play iterations and save a checkpoint
    Train {
        /// Number of self-play iterations
        #[arg(long, default_value_t = 1000)]
        iterations: u32,

        /// Fixed game seed; omit to draw a fresh deal from the solver's RNG each rollout
        #[arg(long)]
        game_seed: Option<u64>,

        /// Run directory; defaults to a fresh timestamped `runs/<epoch>` directory
        #[arg(long, default_value = "")]
        out: String,

        /// Emit a progress log every N iterations (0 disables chunking)
        #[arg(long, default_value_t = 10)]
        log_interval: u32,
    },
    /// Evaluate the average strategy via self-play
    Eval {
        /// Number of self-play episodes
        #[arg(long, default_value_t = 100)]
        episodes: u32,

        /// Seed for the evaluation episodes' RNG
        #[arg(long)]
        eval_seed: Option<u64>,

        /// Run directory for the eval report; empty skips writing one
        #[arg(long, default_value = "")]
        out: String,

        /// Checkpoint to load before evaluating
        #[arg(long, default_value = "")]
        checkpoint: String,
    },
    /// Print action probabilities at the initial state of a fresh deal
    Inspect {
        /// Seed for the inspected deal
        #[arg(long, default_value_t = 3)]
        game_seed: u64,

        /// Checkpoint to load before inspecting
        #[arg(long, default_value = "")]
        checkpoint: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let exit_code = match &cli.command {
        Commands::Train {
            iterations,
            game_seed,
            out,
            log_interval,
        } => run_train(&cli, *iterations, *game_seed, out, *log_interval),
        Commands::Eval {
            episodes,
            eval_seed,
            out,
            checkpoint,
        } => run_eval(&cli, *episodes, *eval_seed, out, checkpoint),
        Commands::Inspect {
            game_seed,
            checkpoint,
        } => run_inspect(&cli, *game_seed, checkpoint),
    };

    std::process::exit(exit_code);
}

fn new_solver(cli: &Cli) -> Solver {
    Solver::new(
        cli.seed,
        cli.max_depth,
        cli.traversal_mode,
        cli.debug,
        cli.log_infoset_hash,
    )
}

fn run_train(cli: &Cli, iterations: u32, game_seed: Option<u64>, out: &str, log_interval: u32) -> i32 {
    let mut solver = new_solver(cli);
    let out_dir = match validation::ensure_out_dir(out) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error creating output directory: {e}");
            return 1;
        }
    };

    output::emit(
        "train_start",
        serde_json::json!({
            "iterations": iterations,
            "seed": cli.seed,
            "game_seed": game_seed,
            "max_depth": cli.max_depth,
            "traversal_mode": cli.traversal_mode.to_string(),
            "debug": cli.debug,
        }),
    );

    match validation::log_chunk_size(iterations, log_interval) {
        None => {
            solver.iterate(iterations, game_seed);
            output::emit(
                "train_progress",
                serde_json::json!({"completed": iterations, "total": iterations}),
            );
        }
        Some(chunk) => {
            let mut done = 0;
            while done < iterations {
                let step = chunk.min(iterations - done);
                solver.iterate(step, game_seed);
                done += step;
                output::emit("train_progress", serde_json::json!({"completed": done, "total": iterations}));
            }
        }
    }

    output::emit(
        "train_end",
        serde_json::json!({
            "iterations": iterations,
            "seed": cli.seed,
            "game_seed": game_seed,
            "max_depth": cli.max_depth,
            "traversal_mode": cli.traversal_mode.to_string(),
            "debug": cli.debug,
        }),
    );

    let checkpoint_path = out_dir.join("checkpoint.json");
    if let Err(e) = solver.save_checkpoint(&checkpoint_path) {
        eprintln!("Error saving checkpoint: {e}");
        return 1;
    }
    println!("Saved checkpoint to {}", checkpoint_path.display());
    0
}

fn run_eval(cli: &Cli, episodes: u32, eval_seed: Option<u64>, out: &str, checkpoint: &str) -> i32 {
    let mut solver = new_solver(cli);
    if !checkpoint.is_empty() {
        if let Err(e) = solver.load_checkpoint(checkpoint) {
            eprintln!("Error loading checkpoint: {e}");
            return 1;
        }
    }

    output::emit(
        "eval_start",
        serde_json::json!({
            "episodes": episodes,
            "seed": cli.seed,
            "max_depth": cli.max_depth,
            "traversal_mode": cli.traversal_mode.to_string(),
        }),
    );

    let value = solver.evaluate(episodes, eval_seed);
    let result = serde_json::json!({"avg_utility_p0": value});
    output::emit("eval_result", result.clone());

    if !out.is_empty() {
        let out_dir = match validation::ensure_out_dir(out) {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error creating output directory: {e}");
                return 1;
            }
        };
        let path = out_dir.join("eval.json");
        let mut payload = result;
        if let serde_json::Value::Object(ref mut map) = payload {
            map.insert("event".to_string(), serde_json::json!("eval_result"));
        }
        if let Err(e) = std::fs::write(&path, payload.to_string()) {
            eprintln!("Error writing eval report: {e}");
            return 1;
        }
        println!("Saved eval to {}", path.display());
    }
    0
}

fn run_inspect(cli: &Cli, game_seed: u64, checkpoint: &str) -> i32 {
    let mut solver = new_solver(cli);
    if !checkpoint.is_empty() {
        if let Err(e) = solver.load_checkpoint(checkpoint) {
            eprintln!("Error loading checkpoint: {e}");
            return 1;
        }
    }

    let state = match GameState::new(2, game_seed, coup_solver::models::Rules::default()) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error building game state: {e}");
            return 1;
        }
    };

    let distribution = solver.action_probabilities(&state);
    println!("{}", output::format_action_table(&distribution));
    0
}
