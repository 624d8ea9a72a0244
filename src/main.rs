use cexpr_lang::cli::{self, CliError, EvalOptions, EvalResult, RunOptions, RunResult};
use cexpr_lang::numeric::format_number;
use cexpr_lang::output;
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "cexpr")]
#[command(about = "cexpr - Evaluate C-like mathematical expressions and small scripts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and evaluate a single expression
    Eval {
        /// The expression to evaluate
        expression: String,

        /// Variable binding, NAME=VALUE (repeatable)
        #[arg(short = 'v', long = "var")]
        vars: Vec<String>,

        /// Create variables that are not bound with --var
        #[arg(short, long)]
        auto: bool,

        /// Seed for urand and nrand
        #[arg(long)]
        seed: Option<u32>,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Run a script and print its variables as JSON
    Run {
        /// Script text (reads --file or stdin if not provided)
        script: Option<String>,

        /// Read the script from a file
        #[arg(short, long)]
        file: Option<String>,

        /// Variable binding, NAME=VALUE (repeatable)
        #[arg(short = 'v', long = "var")]
        vars: Vec<String>,

        /// Initial values as a JSON object
        #[arg(long = "vars")]
        vars_json: Option<String>,

        /// Number of times to run the script
        #[arg(short, long, default_value_t = 1)]
        runs: usize,

        /// Seed for urand and nrand
        #[arg(long)]
        seed: Option<u32>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't run
        #[arg(long)]
        syntax_only: bool,
    },

    /// List the variables a script uses
    Vars {
        /// Script text (reads --file or stdin if not provided)
        script: Option<String>,

        /// Read the script from a file
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Show the parse tree of an expression or a script
    Tree {
        /// Expression or script text
        input: String,

        /// Parse the input as a script
        #[arg(short, long)]
        script: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'cexpr docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval {
            expression,
            vars,
            auto,
            seed,
            syntax_only,
        } => run_eval(expression, vars, auto, seed, syntax_only),
        Commands::Run {
            script,
            file,
            vars,
            vars_json,
            runs,
            seed,
            pretty,
            syntax_only,
        } => read_script(script, file).and_then(|script| {
            let bindings = cli::collect_bindings(&vars, vars_json.as_deref())?;
            let options = RunOptions {
                script,
                bindings,
                runs,
                seed,
                syntax_only,
            };
            run_script(&options, pretty)
        }),
        Commands::Vars { script, file } => read_script(script, file)
            .and_then(|script| cli::execute_vars(&script))
            .map(|names| {
                for name in names {
                    println!("{}", name);
                }
            }),
        Commands::Tree { input, script } => {
            cli::execute_tree(&input, script).map(|tree| print!("{}", tree))
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| print!("{}", content)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_script(script: Option<String>, file: Option<String>) -> Result<String, CliError> {
    match (script, file) {
        (Some(s), _) => Ok(s),
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
        (None, None) if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Ok(buffer)
        }
        (None, None) => Err(CliError::NoInput),
    }
}

fn run_eval(
    expression: String,
    vars: Vec<String>,
    auto: bool,
    seed: Option<u32>,
    syntax_only: bool,
) -> Result<(), CliError> {
    let options = EvalOptions {
        expression,
        bindings: cli::collect_bindings(&vars, None)?,
        auto,
        seed,
        syntax_only,
    };

    match cli::execute_eval(&options, io::stdout())? {
        EvalResult::SyntaxValid => println!("Syntax is valid"),
        EvalResult::Value(value) => println!("{}", format_number(value)),
    }
    Ok(())
}

fn run_script(options: &RunOptions, pretty: bool) -> Result<(), CliError> {
    match cli::execute_run(options, io::stdout())? {
        RunResult::SyntaxValid => println!("Syntax is valid"),
        RunResult::Success(variables) => println!("{}", output::to_json(&variables, pretty)?),
    }
    Ok(())
}
