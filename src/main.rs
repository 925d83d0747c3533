use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    thread,
};

use blazescript::{
    DEFAULT_MAX_CALL_DEPTH, Error, Session, SessionConfig,
    error::position::SourceFile,
    interpreter::{lexer::tokenize, parser::parse},
};
use clap::Parser;
use walkdir::WalkDir;

/// Stack of the interpreter thread. Deep recursion in a script has to hit
/// the call depth limit long before it exhausts this.
const STACK_SIZE: usize = 512 * 1024 * 1024;

const PROMPT: &str = "blazescript> ";

/// blazescript runs BlazeScript programs, a small statically checked
/// scripting language.
///
/// Without a path or `--eval`, an interactive session is started.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// A `.bzs` file to run, or a folder whose `.bzs` files are all run.
    path: Option<PathBuf>,

    /// Evaluates the given code instead of reading a file.
    #[arg(short, long, conflicts_with = "path")]
    eval: Option<String>,

    /// How many function calls may be active at once.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Forgets all definitions after each line in the interactive session.
    #[arg(long)]
    fresh: bool,

    /// Prints the tokens instead of running the program.
    #[arg(long, conflicts_with = "ast")]
    tokens: bool,

    /// Prints the parsed program instead of running it.
    #[arg(long)]
    ast: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let worker = thread::Builder::new().name("interpreter".to_string())
                                       .stack_size(STACK_SIZE)
                                       .spawn(move || execute(&args));

    match worker.map(thread::JoinHandle::join) {
        Ok(Ok(true)) => ExitCode::SUCCESS,
        Ok(Ok(false)) => ExitCode::FAILURE,
        Ok(Err(_)) => {
            eprintln!("The interpreter stopped unexpectedly.");
            ExitCode::FAILURE
        },
        Err(e) => {
            eprintln!("Failed to start the interpreter: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs whatever the arguments ask for and tells whether it succeeded.
fn execute(args: &Args) -> bool {
    let config = SessionConfig::default().with_max_call_depth(args.max_call_depth);

    if let Some(code) = &args.eval {
        return run_source(args, config, "<eval>", code);
    }

    match &args.path {
        Some(path) if path.is_dir() => run_folder(args, config, path),
        Some(path) => run_file(args, config, path),
        None => {
            let config = config.with_persist_globals(!args.fresh);
            run_prompt(config).unwrap_or_else(|e| {
                                  eprintln!("Failed to read the input: {e}");
                                  false
                              })
        },
    }
}

fn run_folder(args: &Args, config: SessionConfig, folder: &Path) -> bool {
    let mut success = true;

    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("Failed to read '{}': {e}", folder.display());
                success = false;
                continue;
            },
        };

        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "bzs") {
            println!("==> {}", path.display());
            success &= run_file(args, config, path);
        }
    }

    success
}

fn run_file(args: &Args, config: SessionConfig, path: &Path) -> bool {
    match fs::read_to_string(path) {
        Ok(source) => run_source(args, config, &path.display().to_string(), &source),
        Err(e) => {
            eprintln!("Failed to read the input file '{}': {e}", path.display());
            false
        },
    }
}

fn run_source(args: &Args, config: SessionConfig, name: &str, source: &str) -> bool {
    if args.tokens || args.ast {
        return inspect(args, name, source);
    }

    match Session::new(config).run(name, source) {
        Ok(Some(value)) => {
            println!("{value}");
            true
        },
        Ok(None) => true,
        Err(e) => {
            eprintln!("{e}");
            false
        },
    }
}

/// Prints the tokens or the tree of a program without running it.
fn inspect(args: &Args, name: &str, source: &str) -> bool {
    let source = SourceFile::new(name, source);

    let result = tokenize(&source).map_err(Error::from).and_then(|tokens| {
        if args.tokens {
            for token in &tokens {
                println!("{}", token.kind);
            }
            return Ok(());
        }
        let program = parse(&tokens)?;
        println!("{program}");
        Ok(())
    });

    result.map_err(|e| eprintln!("{e}")).is_ok()
}

fn run_prompt(config: SessionConfig) -> io::Result<bool> {
    let mut session = Session::new(config);
    let mut stdout = io::stdout();
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    loop {
        stdout.write_all(PROMPT.as_bytes())?;
        stdout.flush()?;

        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            println!();
            break;
        }

        let line = input.trim();
        if line == ".exit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match session.run("<stdin>", line) {
            Ok(Some(value)) => println!("{value}"),
            Ok(None) => {},
            Err(e) => eprintln!("{e}"),
        }
    }

    Ok(true)
}
