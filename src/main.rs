//! deltagrid CLI
//!
//! Renders iterated prime differences as PNG frames and trains small
//! self-organizing maps.

use clap::{Parser, Subcommand};
use deltagrid::som::data::{load_vectors, random_colors};
use deltagrid::{
    iterate_rule, primes_up_to, som_to_image, Config, DiffRule, FrameWriter, Result, ScatterPlot,
    Som, SomConfig, SomTrainer, StopReason,
};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::error;
use num_bigint::BigInt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "deltagrid")]
#[command(version)]
#[command(about = "Iterated prime differences and self-organizing maps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file; command-line flags take precedence
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the iterated differences of the primes as numbered PNG frames
    Frames {
        /// Largest number fed to the prime sieve (default: 10000)
        #[arg(short, long)]
        limit: Option<u64>,

        /// Difference operator: plain or symmetric (default: plain)
        #[arg(short, long)]
        rule: Option<DiffRule>,

        /// Output directory for the frames (default: "frames")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Frame width in pixels (default: 2000)
        #[arg(long)]
        width: Option<u32>,

        /// Frame height in pixels (default: 1000)
        #[arg(long)]
        height: Option<u32>,
    },

    /// Train a self-organizing map
    Som {
        /// Grid rows (default: 20)
        #[arg(long)]
        height: Option<usize>,

        /// Grid columns (default: 20)
        #[arg(long)]
        width: Option<usize>,

        /// Initial neighborhood radius (default: 10)
        #[arg(long)]
        sigma0: Option<f64>,

        /// Initial learning rate (default: 0.1)
        #[arg(short = 'l', long)]
        learning_rate: Option<f64>,

        /// Decay time constant (default: 100)
        #[arg(long)]
        lambda: Option<f64>,

        /// Hard cap on training steps (default: 100000)
        #[arg(short = 'n', long)]
        max_steps: Option<usize>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Training vectors, one per line, comma or whitespace separated
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Number of random RGB colors to train on when no data file is given
        #[arg(long, default_value = "100")]
        samples: usize,

        /// Write every grid snapshot as a numbered PNG into this directory
        #[arg(long)]
        history_dir: Option<PathBuf>,

        /// Write the trained grid as a PNG
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pixels per grid cell in written images (default: 10)
        #[arg(long, default_value = "10")]
        scale: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = load_config(cli.config).and_then(|mut config| match cli.command {
        Commands::Frames {
            limit,
            rule,
            output,
            width,
            height,
        } => {
            if let Some(limit) = limit {
                config.diff.prime_limit = limit;
            }
            if let Some(rule) = rule {
                config.diff.rule = rule;
            }
            if let Some(output) = output {
                config.diff.output_dir = output;
            }
            if let Some(width) = width {
                config.render.width = width;
            }
            if let Some(height) = height {
                config.render.height = height;
            }
            render_frames(config)
        }

        Commands::Som {
            height,
            width,
            sigma0,
            learning_rate,
            lambda,
            max_steps,
            seed,
            data,
            samples,
            history_dir,
            output,
            scale,
        } => {
            let som = &mut config.som;
            som.height = height.unwrap_or(som.height);
            som.width = width.unwrap_or(som.width);
            som.sigma0 = sigma0.unwrap_or(som.sigma0);
            som.initial_learning_rate = learning_rate.unwrap_or(som.initial_learning_rate);
            som.lambda = lambda.unwrap_or(som.lambda);
            som.max_steps = max_steps.unwrap_or(som.max_steps);
            som.seed = seed.or(som.seed);
            train_som(config.som, data, samples, history_dir, output, scale)
        }
    });

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(&path),
        None => Ok(Config::default()),
    }
}

const BAR_TEMPLATE: &str = concat!(
    "{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] ",
    "{pos}/{len} ({percent}%) ETA: {eta}"
);

const FFMPEG_HINT: &str = concat!(
    "ffmpeg -framerate 25 -i %d.png -c:v libx264 ",
    "-profile:v high -crf 20 -pix_fmt yuv420p output.mp4"
);

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(BAR_TEMPLATE)
        .unwrap()
        .progress_chars("█▓▒░  ")
}

fn render_frames(config: Config) -> Result<()> {
    let start_time = Instant::now();
    let diff = config.diff;

    println!("deltagrid - iterated differences of the primes");
    println!("   Using rule: {}", diff.rule.name());
    println!("   Frames are saved in: {}", diff.output_dir.display());
    println!("   Rendering fails once values outgrow the float range (around 1e304).");
    println!();

    let primes: Vec<BigInt> = primes_up_to(diff.prime_limit)
        .into_iter()
        .map(BigInt::from)
        .collect();
    println!(
        "✓ Sieved {} primes up to {}",
        format_number(primes.len()),
        format_number(diff.prime_limit as usize)
    );

    let plot = ScatterPlot::new(config.render)?;
    let mut frames = FrameWriter::new(&diff.output_dir)?;
    let sequences = iterate_rule(primes, diff.rule);

    let pb = ProgressBar::new(sequences.len() as u64);
    pb.set_style(bar_style());
    pb.set_message("Generating frames...");

    for seq in sequences {
        let img = match plot.render(&seq) {
            Ok(img) => img,
            Err(e) => {
                pb.abandon();
                println!(
                    "Stopped after {} frames at a sequence of length {}",
                    format_number(frames.frames_written()),
                    format_number(seq.len())
                );
                return Err(e);
            }
        };
        frames.write(&img)?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    println!("✓ Generated {} frames", format_number(frames.frames_written()));
    println!();
    println!("To assemble a video, run in {}:", frames.dir().display());
    println!("   {}", FFMPEG_HINT);
    println!("  Time: {}", HumanDuration(start_time.elapsed()));

    Ok(())
}

fn train_som(
    mut config: SomConfig,
    data_path: Option<PathBuf>,
    samples: usize,
    history_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    scale: u32,
) -> Result<()> {
    let start_time = Instant::now();

    println!("deltagrid - self-organizing map");

    let data = match &data_path {
        Some(path) => {
            let data = load_vectors(path)?;
            if let Some(first) = data.first() {
                config.feature_dim = first.len();
            }
            println!("✓ Loaded {} vectors from {}", format_number(data.len()), path.display());
            data
        }
        None => {
            let mut rng = match config.seed {
                Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
                None => ChaCha8Rng::from_entropy(),
            };
            config.feature_dim = 3;
            println!("✓ Generated {} random colors", format_number(samples));
            random_colors(samples, &mut rng)
        }
    };

    if history_dir.is_some() {
        config.keep_history = true;
    }

    println!(
        "   Grid: {}x{}, sigma0={}, lr={}, lambda={}",
        config.height, config.width, config.sigma0, config.initial_learning_rate, config.lambda
    );

    let expected_steps = config
        .schedule()
        .convergence_step()
        .map_or(config.max_steps, |s| s.min(config.max_steps));

    let mut som = Som::from_config(&config);
    let mut trainer = SomTrainer::new(config);

    let pb = ProgressBar::new(expected_steps as u64);
    pb.set_style(bar_style());
    pb.set_message("Training SOM...");

    let outcome = trainer.train_observed(&mut som, &data, |report| {
        pb.set_position(report.step as u64 + 1);
        if report.step % 50 == 0 {
            pb.set_message(format!(
                "Training SOM... sigma={:.3} lr={:.5}",
                report.sigma, report.learning_rate
            ));
        }
    });
    pb.finish_and_clear();
    let outcome = outcome?;

    match outcome.stop {
        StopReason::Converged => println!(
            "✓ Converged after {} steps (sigma={:.4}, lr={:.6})",
            format_number(outcome.steps),
            outcome.final_sigma,
            outcome.final_learning_rate
        ),
        StopReason::StepBudgetExhausted => println!(
            "! Step budget of {} exhausted (sigma={:.4}, lr={:.6})",
            format_number(outcome.steps),
            outcome.final_sigma,
            outcome.final_learning_rate
        ),
    }

    if let Some(dir) = history_dir {
        let mut frames = FrameWriter::new(&dir)?;
        for snapshot in &outcome.history {
            frames.write(&som_to_image(snapshot, scale)?)?;
        }
        println!(
            "✓ Wrote {} snapshots to {}",
            format_number(frames.frames_written()),
            dir.display()
        );
    }

    if let Some(path) = output {
        som_to_image(&som.snapshot(), scale)?.save(&path)?;
        println!("✓ Saved trained grid to {}", path.display());
    }

    println!("  Time: {}", HumanDuration(start_time.elapsed()));
    Ok(())
}

fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
