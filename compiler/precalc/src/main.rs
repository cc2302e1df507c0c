use std::ffi::OsString;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use precalc::{evaluate_source, format_value, to_postfix, trace_source, Report};
use precalc_env::{is_identifier, parse_binding, parse_bindings, BindingError, ValueEnv};
use precalc_parser::parser::render_table;

/// Environment variable holding a log filter, e.g. `precalc_parser=trace`
const LOG_ENV: &str = "PRECALC_LOG";
/// Environment variable holding comma-separated `name=value` bindings
const DEFINES_ENV: &str = "PRECALC_DEFINES";

/// The expressions evaluated by `precalc demo`
const DEMO_EXPRESSIONS: [&str; 4] = [
    "(10 + 2.0 * 30) / 42.8 * 5 / 2 + 4 - 10 + 0",
    "0 / 0",
    "1 / 0",
    "-1 / 0",
];

#[derive(Debug, Parser)]
#[command(
    name = "precalc",
    version,
    about = "Evaluate arithmetic with an operator-precedence parser",
    long_about = "precalc parses infix arithmetic over + - * / and parentheses with a\n\
        table-driven operator-precedence parser, converts it to postfix and\n\
        evaluates it. Division follows IEEE 754: 1 / 0 is Infinity, 0 / 0 is NaN.\n\
        Unary operators are rejected.\n\n\
        EXAMPLES:\n\
        \n  precalc '(1 + 2) * 3'                   Evaluate an expression\n\
        \n  precalc eval -D rate=0.2 'rate * 100'   Evaluate with a binding\n\
        \n  precalc postfix --trace '1 + 2 * 3'     Show the shift/reduce steps\n\
        \n  precalc table                           Print the precedence table\n\
        \n  echo '2 * pi' | precalc eval            Read expressions from stdin",
    after_help = "Set PRECALC_LOG to a log filter and PRECALC_DEFINES to name=value,... for default bindings."
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate expressions and print their values
    #[command(
        about = "Evaluate expressions and print their values",
        long_about = "Evaluates each expression and prints '<expression> = <value>'.\n\n\
            Without expressions, reads one expression per line from --file or stdin.\n\
            Blank lines and lines starting with '#' are skipped."
    )]
    Eval(InputArgs),

    /// Print the postfix form of expressions
    #[command(about = "Print the postfix form produced by the shift/reduce parser")]
    Postfix(PostfixArgs),

    /// Output results as JSON
    #[command(about = "Output the analysis of each expression as JSON")]
    Json(InputArgs),

    /// Print the precedence relation table
    #[command(about = "Print the operator-precedence relation table")]
    Table,

    /// Evaluate the built-in sample expressions
    #[command(about = "Evaluate the built-in sample expressions, including a rejected one")]
    Demo,

    /// Start an interactive Read-Eval-Print Loop
    #[command(
        about = "Start an interactive REPL session",
        long_about = "Start an interactive Read-Eval-Print Loop for evaluating expressions.\n\n\
            Commands:\n\
            \n  :let NAME = EXPR   Bind NAME to the value of EXPR\n\
            \n  :vars              List session bindings\n\
            \n  :postfix EXPR      Show the postfix form of EXPR\n\
            \n  :table             Print the precedence table\n\
            \n  :help              Show available REPL commands\n\
            \n  :quit              Exit the REPL (also :q, :exit)"
    )]
    Repl(DefineArgs),
}

#[derive(Debug, Args, Clone, Default)]
struct DefineArgs {
    /// Bind a name for use in expressions (repeatable)
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE")]
    defines: Vec<String>,
}

#[derive(Debug, Args, Clone, Default)]
struct SourceArgs {
    /// Expressions to process (read from --file or stdin if none are given)
    #[arg(value_name = "EXPR")]
    expressions: Vec<String>,

    /// Read expressions from a file, one per line
    #[arg(short, long, value_name = "FILE", conflicts_with = "expressions")]
    file: Option<PathBuf>,
}

#[derive(Debug, Args, Clone, Default)]
struct InputArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    defines: DefineArgs,
}

/// Parsing never looks at bindings, so `postfix` takes no `--define`
#[derive(Debug, Args, Clone)]
struct PostfixArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Also print every shift and reduce step
    #[arg(long)]
    trace: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format_timestamp(None)
        .parse_env(env_logger::Env::new().filter(LOG_ENV));
    let _ = builder.try_init();
}

/// Prelude constants, then `PRECALC_DEFINES`, then `-D` flags; later wins.
fn build_env(env_defines: Option<&str>, defines: &DefineArgs) -> Result<ValueEnv, BindingError> {
    let mut env = ValueEnv::with_prelude();
    if let Some(list) = env_defines {
        env.extend(parse_bindings(list)?);
    }
    for define in &defines.defines {
        let (name, value) = parse_binding(define)?;
        env.insert(name, value);
    }
    Ok(env)
}

fn env_from_args(defines: &DefineArgs) -> Result<ValueEnv, i32> {
    let env_defines = std::env::var(DEFINES_ENV).ok();
    build_env(env_defines.as_deref(), defines).map_err(|e| {
        eprintln!("error: {e}");
        2
    })
}

fn read_source_from_input(input: &Option<PathBuf>) -> Result<String, String> {
    if let Some(path) = input {
        fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read from stdin: {e}"))?;
        Ok(buf)
    }
}

/// One expression per non-blank line; `#` starts a comment line
fn split_expressions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn collect_expressions(args: &SourceArgs) -> Result<Vec<String>, i32> {
    if !args.expressions.is_empty() {
        return Ok(args.expressions.clone());
    }
    match read_source_from_input(&args.file) {
        Ok(text) => Ok(split_expressions(&text)),
        Err(e) => {
            eprintln!("error: {e}");
            Err(2)
        }
    }
}

/// Evaluate and print each expression. Returns 1 if any of them failed.
fn run_eval(expressions: &[String], env: &ValueEnv) -> i32 {
    let mut rc = 0;
    for expression in expressions {
        match evaluate_source(expression, env) {
            Ok(value) => println!("{expression} = {}", format_value(value)),
            Err(err) => {
                eprintln!("{}", err.render(expression));
                rc = 1;
            }
        }
    }
    rc
}

fn run_postfix(expressions: &[String], trace: bool) -> i32 {
    let mut rc = 0;
    for expression in expressions {
        let result = if trace {
            trace_source(expression)
        } else {
            to_postfix(expression).map(|postfix| (postfix, Vec::new()))
        };
        match result {
            Ok((postfix, steps)) => {
                for step in steps {
                    println!("  {step}");
                }
                println!("{postfix}");
            }
            Err(err) => {
                eprintln!("{}", err.render(expression));
                rc = 1;
            }
        }
    }
    rc
}

fn run_json(expressions: &[String], env: &ValueEnv) -> i32 {
    let reports: Vec<Report> = expressions
        .iter()
        .map(|expression| Report::analyze(expression, env))
        .collect();
    let rendered = if let [report] = reports.as_slice() {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string_pretty(&reports)
    };
    match rendered {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: failed to serialize report: {e}");
            return 2;
        }
    }
    if reports.iter().all(Report::is_ok) {
        0
    } else {
        1
    }
}

/// The sample run always succeeds; the unary sample prints its rejection.
fn run_demo() -> i32 {
    let env = ValueEnv::new();
    for expression in DEMO_EXPRESSIONS {
        match evaluate_source(expression, &env) {
            Ok(value) => println!("{expression} = {}", format_value(value)),
            Err(err) => println!("{expression} = {err}"),
        }
    }
    0
}

#[derive(Debug)]
struct ReplSession {
    buffer: String,
    env: ValueEnv,
    prelude: ValueEnv,
}

impl ReplSession {
    fn new(env: ValueEnv) -> Self {
        Self {
            buffer: String::new(),
            env,
            prelude: ValueEnv::with_prelude(),
        }
    }

    fn prompt(&self) -> &'static str {
        if self.buffer.is_empty() {
            "precalc> "
        } else {
            "....> "
        }
    }

    /// Input is complete once every `(` has been closed
    fn is_complete_input(s: &str) -> bool {
        let mut depth: i32 = 0;
        for ch in s.chars() {
            match ch {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
        }
        depth <= 0
    }

    fn handle_command(&mut self, line: &str) -> (Vec<String>, bool) {
        let trimmed = line.trim();
        if trimmed == ":help" {
            return (
                vec![
                    "commands: :help, :quit, :let <name> = <expr>, :vars, :postfix <expr>, :table"
                        .to_string(),
                    "note: the last result is available as 'ans'".to_string(),
                ],
                false,
            );
        }

        if trimmed == ":q" || trimmed == ":quit" || trimmed == ":exit" {
            return (Vec::new(), true);
        }

        if let Some(rest) = trimmed.strip_prefix(":let") {
            let Some((name, expression)) = rest.split_once('=') else {
                return (vec!["error: usage: :let <name> = <expr>".to_string()], false);
            };
            let name = name.trim();
            if !is_identifier(name) {
                return (
                    vec![format!("error: '{name}' is not a valid identifier")],
                    false,
                );
            }
            let out = match evaluate_source(expression, &self.env) {
                Ok(value) => {
                    self.env.insert(name.to_string(), value);
                    vec![format!("{name} = {}", format_value(value))]
                }
                Err(err) => vec![err.render(expression.trim())],
            };
            (out, false)
        } else if let Some(rest) = trimmed.strip_prefix(":postfix") {
            let out = match to_postfix(rest) {
                Ok(postfix) => postfix.to_string(),
                Err(err) => err.render(rest.trim()),
            };
            (vec![out], false)
        } else if trimmed == ":table" {
            (render_table().lines().map(str::to_string).collect(), false)
        } else if trimmed == ":vars" {
            let lines: Vec<String> = self
                .env
                .bindings()
                .into_iter()
                .filter(|(name, value)| self.prelude.get(name) != Some(*value))
                .map(|(name, value)| format!("{name} = {}", format_value(value)))
                .collect();
            if lines.is_empty() {
                (vec!["(no session bindings)".to_string()], false)
            } else {
                (lines, false)
            }
        } else {
            (vec![format!("error: unknown command '{trimmed}'")], false)
        }
    }

    /// Returns the lines to print, whether to exit, and whether the input
    /// was consumed (as opposed to buffered for continuation).
    fn handle_line(&mut self, line: &str) -> (Vec<String>, bool, bool) {
        let trimmed = line.trim();
        if self.buffer.is_empty() && trimmed.starts_with(':') {
            let (out, exit) = self.handle_command(trimmed);
            return (out, exit, true);
        }

        if trimmed.is_empty() {
            return (Vec::new(), false, false);
        }

        self.buffer.push_str(line);
        self.buffer.push('\n');
        if Self::is_complete_input(&self.buffer) {
            let source = std::mem::take(&mut self.buffer);
            return (self.submit_source(&source), false, true);
        }
        (Vec::new(), false, false)
    }

    fn submit_source(&mut self, source: &str) -> Vec<String> {
        match evaluate_source(source, &self.env) {
            Ok(value) => {
                self.env.insert("ans".to_string(), value);
                vec![format_value(value)]
            }
            Err(err) => vec![err.render(source.trim_end())],
        }
    }
}


fn run_repl(defines: &DefineArgs) -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;

    let env = match env_from_args(defines) {
        Ok(env) => env,
        Err(rc) => return rc,
    };
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize repl: {e}");
            return 2;
        }
    };

    let mut session = ReplSession::new(env);
    loop {
        let prompt = session.prompt();
        match rl.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let (out, exit, _committed) = session.handle_line(&line);
                for l in out {
                    println!("{l}");
                }
                if exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => {
                session.buffer.clear();
                continue;
            }
            Err(ReadlineError::Eof) => {
                return 0;
            }
            Err(e) => {
                eprintln!("error: repl failed: {e}");
                return 2;
            }
        }
    }
}

fn is_verbose_flag(arg: &str) -> bool {
    arg == "--verbose"
        || (arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v'))
}

/// Map bare invocations such as `precalc '1 + 2'` onto `precalc eval`, and
/// a `--json`/`-j` flag in a bare invocation onto the `json` subcommand.
/// Leading `-v` flags are kept in front.
fn normalize_cli_args(args: Vec<OsString>) -> Vec<OsString> {
    let Some(first) = args
        .iter()
        .skip(1)
        .position(|a| !is_verbose_flag(&a.to_string_lossy()))
        .map(|i| i + 1)
    else {
        return args;
    };

    let is_known_subcommand = matches!(
        args[first].to_string_lossy().as_ref(),
        "eval"
            | "postfix"
            | "json"
            | "table"
            | "demo"
            | "repl"
            | "help"
            | "--help"
            | "-h"
            | "--version"
            | "-V"
    );
    if is_known_subcommand {
        return args;
    }

    let mut out: Vec<OsString> = Vec::with_capacity(args.len() + 1);
    out.extend(args[..first].iter().cloned());

    let mut subcmd = OsString::from("eval");
    let mut rest: Vec<OsString> = Vec::with_capacity(args.len() - first);
    for a in args.into_iter().skip(first) {
        let s = a.to_string_lossy();
        if s == "--json" || s == "-j" {
            subcmd = OsString::from("json");
            continue;
        }
        rest.push(a);
    }

    out.push(subcmd);
    out.extend(rest);
    out
}

fn normalized_cli_args() -> Vec<OsString> {
    normalize_cli_args(std::env::args_os().collect())
}

fn run_cli() -> i32 {
    let cli = Cli::parse_from(normalized_cli_args());
    init_logging(cli.verbose);

    let cmd = cli.command.unwrap_or(Command::Eval(InputArgs::default()));
    log::debug!("running {cmd:?}");

    match cmd {
        Command::Eval(args) => {
            let env = match env_from_args(&args.defines) {
                Ok(env) => env,
                Err(rc) => return rc,
            };
            match collect_expressions(&args.source) {
                Ok(expressions) => run_eval(&expressions, &env),
                Err(rc) => rc,
            }
        }
        Command::Postfix(args) => match collect_expressions(&args.source) {
            Ok(expressions) => run_postfix(&expressions, args.trace),
            Err(rc) => rc,
        },
        Command::Json(args) => {
            let env = match env_from_args(&args.defines) {
                Ok(env) => env,
                Err(rc) => return rc,
            };
            match collect_expressions(&args.source) {
                Ok(expressions) => run_json(&expressions, &env),
                Err(rc) => rc,
            }
        }
        Command::Table => {
            print!("{}", render_table());
            0
        }
        Command::Demo => run_demo(),
        Command::Repl(defines) => run_repl(&defines),
    }
}

fn main() {
    std::process::exit(run_cli());
}
