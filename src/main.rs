use clap::{Parser as ClapParser, Subcommand};
use guard_lang::cli::{self, CheckOptions, CheckResult, CliError, PrintOptions, VarsOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "guard")]
#[command(about = "Guard - a typed guard-expression language for data-aware process models")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a guard and evaluate it against variable bindings
    Check {
        /// The guard expression to check
        guard: String,

        /// Variable bindings as a JSON object (reads from stdin if piped)
        #[arg(short, long)]
        bind: Option<String>,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Render a guard in one of the printer styles
    Print {
        /// The guard expression to render
        guard: String,

        /// Output style: canonical, pretty, or tree
        #[arg(short, long, default_value = "canonical")]
        style: String,

        /// Spaces around operators in the pretty style
        #[arg(long, default_value_t = 1)]
        spaces: usize,

        /// Indent step in the tree style
        #[arg(long, default_value_t = 2)]
        indent: usize,
    },

    /// Report the variables, literals, and comparison atoms of a guard
    Vars {
        /// The guard expression to analyze
        guard: String,

        /// Pretty-print the report
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            guard,
            bind,
            syntax_only,
        } => run_check(guard, bind, syntax_only),
        Commands::Print {
            guard,
            style,
            spaces,
            indent,
        } => run_print(guard, style, spaces, indent),
        Commands::Vars { guard, pretty } => run_vars(guard, pretty),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(guard: String, bind: Option<String>, syntax_only: bool) -> Result<(), CliError> {
    let bindings = match bind {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        guard,
        bindings,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Evaluated(output) => println!("{}", output),
    }
    Ok(())
}

fn run_print(guard: String, style: String, spaces: usize, indent: usize) -> Result<(), CliError> {
    let options = PrintOptions {
        guard,
        style,
        spaces,
        indent,
    };

    println!("{}", cli::execute_print(&options)?);
    Ok(())
}

fn run_vars(guard: String, pretty: bool) -> Result<(), CliError> {
    let options = VarsOptions { guard };
    let report = cli::execute_vars(&options)?;

    let json = if pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .unwrap();
    println!("{}", json);
    Ok(())
}
