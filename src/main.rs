//! mrep CLI
//!
//! Entry point for the `mrep` command-line tool.

use clap::{ArgAction, Args, Parser, Subcommand};
use mrep::events::{Runner, Suite, Test};
use mrep::{
    MultiReporter, MultiReporterError, OptionsResolver, Overrides, ReporterOptionsExtractor,
    ReporterRegistry,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "mrep")]
#[command(about = "Drive several test reporters from one run", version)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// Custom configuration file (reporterOptions.configFile)
    #[arg(long, short = 'c')]
    config_file: Option<PathBuf>,

    /// Defaults file (default: the compiled-in config.json)
    #[arg(long)]
    defaults: Option<PathBuf>,

    /// Inline reporterEnabled override, e.g. "spec,tap"
    #[arg(long, short = 'e')]
    enable: Option<String>,
}

impl ConfigArgs {
    fn overrides(&self) -> Overrides {
        let mut overrides = Overrides::default();
        overrides.reporter_options.config_file = self.config_file.clone();
        if let Some(enable) = &self.enable {
            overrides = overrides.set("reporterEnabled", enable.as_str());
        }
        overrides
    }

    fn resolver(&self) -> OptionsResolver {
        match &self.defaults {
            Some(path) => OptionsResolver::with_default_path(path),
            None => OptionsResolver::new(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective options with provenance
    Options {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print the options one reporter would receive
    ReporterOptions {
        /// Reporter identifier, e.g. "xunit" or "mocha-junit-reporter"
        id: String,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// List built-in reporters
    Reporters,

    /// Run a two-test sample suite through every enabled reporter
    Demo {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Options { config } => run_options(&config),
        Commands::ReporterOptions { id, config } => run_reporter_options(&id, &config),
        Commands::Reporters => run_reporters(),
        Commands::Demo { config } => run_demo(&config),
    }
}

fn setup_logging(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_options(config: &ConfigArgs) {
    let options = match config.resolver().get_options(Some(&config.overrides())) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error resolving options: {}", e);
            process::exit(2);
        }
    };

    match options.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing options: {}", e);
            process::exit(1);
        }
    }
}

fn run_reporter_options(id: &str, config: &ConfigArgs) {
    let options = match config.resolver().get_options(Some(&config.overrides())) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error resolving options: {}", e);
            process::exit(2);
        }
    };

    let descriptor = ReporterOptionsExtractor::default().descriptor(&options, id);
    match serde_json::to_string_pretty(&descriptor) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing reporter options: {}", e);
            process::exit(1);
        }
    }
}

fn run_reporters() {
    for name in ReporterRegistry::with_builtins().names() {
        println!("{}", name);
    }
}

fn run_demo(config: &ConfigArgs) {
    let registry = ReporterRegistry::with_builtins();
    let mut multi = match MultiReporter::builder(&registry)
        .resolver(config.resolver())
        .build(Some(&config.overrides()))
    {
        Ok(m) => m,
        Err(e @ MultiReporterError::Config(_)) => {
            eprintln!("Error resolving options: {}", e);
            process::exit(2);
        }
        Err(e) => {
            eprintln!("Error setting up reporters: {}", e);
            process::exit(1);
        }
    };

    let mut suite = Suite::new("#multi-reporter");
    suite.add_test(Test::new("#test-1", || Ok(())));
    suite.add_test(Test::new("#test-2", || Err("expected failure".to_string())));

    let mut runner = Runner::new(suite);
    match multi.run(&mut runner) {
        Ok(failures) => process::exit(failures.min(255) as i32),
        Err(e) => {
            eprintln!("Reporter failed: {}", e);
            process::exit(1);
        }
    }
}
