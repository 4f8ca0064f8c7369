use anyhow::{anyhow, bail, Context};
use getopts::Options;
use std::env;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::{TcpListener, TcpStream};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info, Level};

use wordcompletion::completion::binary_dictionary;
use wordcompletion::completion::dictionary::Dictionary;
use wordcompletion::completion::index::*;
use wordcompletion::completion::loader;
use wordcompletion::service::batch::{answer_questions, answer_questions_with};
use wordcompletion::service::protocol::{read_answer, Command};
use wordcompletion::service::server::serve;

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Help,
    Compile { output: String },
    NetworkClient { host: String, port: u16 },
    Server { port: u16 },
    Word(String),
    Interactive,
    Batch,
}

#[derive(Debug)]
struct Config {
    mode: Mode,
    dict: Option<String>,
    binary: bool,
    thread_safety: ThreadSafety,
    quiet: bool,
    log_level: Level,
}

fn options() -> Options {
    let mut opts = Options::new();
    opts.optopt("d", "dict", "Use a file <dict> for dictionary.", "<dict>");
    opts.optflag("b", "binary", "The dictionary file is in binary format.");
    opts.optopt(
        "c",
        "compile",
        "Compile the dictionary into binary format <out> and exit.",
        "<out>",
    );
    opts.optopt("w", "word", "Complete a <word> and soon exit.", "<word>");
    opts.optopt("p", "port", "Listen on <port> for queries via TCP.", "<port>");
    opts.optopt(
        "s",
        "server",
        "Send queries to a server on <host> at --port.",
        "<host>",
    );
    opts.optflag(
        "t",
        "thread-safe",
        "Precompute the completions of every prefix.",
    );
    opts.optflag("q", "quiet", "Show no message except results.");
    opts.optopt(
        "l",
        "log-level",
        "error, warn, info, debug or trace. (default: warn)",
        "<level>",
    );
    opts.optflag("h", "help", "Show this message.");
    opts
}

fn print_usage(program: &str, opts: &Options) {
    let brief = format!(
        "Usage: {} [options]\n\nWithout --dict, a dictionary and then the questions are read from stdin.",
        program
    );
    print!("{}", opts.usage(&brief));
}

fn parse_config(opts: &Options, args: &[String]) -> anyhow::Result<Config> {
    let matches = opts.parse(args)?;
    let log_level = match matches.opt_str("l") {
        Some(level) => Level::from_str(&level).map_err(|_| anyhow!("invalid log level: {}", level))?,
        None => Level::WARN,
    };
    let port = match matches.opt_str("p") {
        Some(port) => Some(
            port.parse::<u16>()
                .map_err(|_| anyhow!("invalid port number: {}", port))?,
        ),
        None => None,
    };
    let dict = matches.opt_str("d");

    let mode = if matches.opt_present("h") {
        Mode::Help
    } else if let Some(output) = matches.opt_str("c") {
        if dict.is_none() {
            bail!("--compile needs a --dict to compile");
        }
        Mode::Compile { output }
    } else if let Some(host) = matches.opt_str("s") {
        match port {
            Some(port) => Mode::NetworkClient { host, port },
            None => bail!("--server needs a --port"),
        }
    } else if let Some(port) = port {
        if dict.is_none() {
            bail!("--port needs a --dict to serve");
        }
        Mode::Server { port }
    } else if let Some(word) = matches.opt_str("w") {
        if dict.is_none() {
            bail!("--word needs a --dict");
        }
        Mode::Word(word)
    } else if dict.is_some() {
        Mode::Interactive
    } else {
        Mode::Batch
    };

    Ok(Config {
        mode,
        dict,
        binary: matches.opt_present("b"),
        thread_safety: if matches.opt_present("t") {
            ThreadSafety::ThreadSafe
        } else {
            ThreadSafety::None
        },
        quiet: matches.opt_present("q"),
        log_level,
    })
}

fn load_dictionary(config: &Config) -> anyhow::Result<Dictionary> {
    let path = config
        .dict
        .as_deref()
        .ok_or_else(|| anyhow!("no dictionary file given"))?;
    let dictionary = if config.binary {
        let buffer = fs::read(path).with_context(|| format!("failed to read {}", path))?;
        binary_dictionary::decode(&buffer)
    } else {
        let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
        loader::load(&mut BufReader::new(file))
    };
    dictionary.with_context(|| format!("failed to load dictionary {}", path))
}

fn run_interactive<R, W>(
    input: &mut R,
    output: &mut W,
    index: &impl CompletionIndex,
    quiet: bool,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        line.clear();
        if !quiet {
            write!(output, "QUERY: ")?;
            output.flush()?;
        }
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim_end_matches(&['\r', '\n'][..]);
        if query.is_empty() {
            break;
        }
        for entry in &index.ten_best(query) {
            if quiet {
                writeln!(output, "{}", entry.word())?;
            } else {
                writeln!(output, "{}\t{}", entry.word(), entry.frequency())?;
            }
        }
    }
    Ok(())
}

fn run_network_client(host: &str, port: u16) -> anyhow::Result<()> {
    let mut stream = TcpStream::connect((host, port))
        .with_context(|| format!("failed to connect to {}:{}", host, port))?;
    let mut reader = BufReader::new(stream.try_clone()?);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = BufWriter::new(stdout.lock());

    answer_questions_with(&mut input, &mut output, |question| {
        Command::Get(question.to_string()).write_to(&mut stream)?;
        Ok(read_answer(&mut reader)?)
    })?;
    output.flush()?;
    Command::Shutdown.write_to(&mut stream)?;
    Ok(())
}

fn run(config: Config) -> anyhow::Result<()> {
    match config.mode {
        Mode::Help => unreachable!("help is handled before running"),
        Mode::Compile { ref output } => {
            let dictionary = load_dictionary(&config)?;
            fs::write(output, binary_dictionary::encode(&dictionary)?)
                .with_context(|| format!("failed to write {}", output))?;
            info!(entries = dictionary.len(), output = %output, "binary dictionary written");
        }
        Mode::NetworkClient { ref host, port } => run_network_client(host, port)?,
        Mode::Server { port } => {
            let index = Arc::new(PrecomputedCompletionIndex::new(load_dictionary(&config)?));
            let listener = TcpListener::bind(("0.0.0.0", port))
                .with_context(|| format!("failed to listen on port {}", port))?;
            serve(listener, index)?;
        }
        Mode::Word(ref word) => {
            let index = Completer::build(load_dictionary(&config)?, config.thread_safety);
            for word in index.ten_best(word).words() {
                println!("{}", word);
            }
        }
        Mode::Interactive => {
            let index = Completer::build(load_dictionary(&config)?, config.thread_safety);
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_interactive(&mut stdin.lock(), &mut stdout.lock(), &index, config.quiet)?;
        }
        Mode::Batch => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let dictionary = loader::load(&mut input).context("failed to load dictionary from stdin")?;
            let index = Completer::build(dictionary, config.thread_safety);
            let stdout = io::stdout();
            let mut output = BufWriter::new(stdout.lock());
            answer_questions(&mut input, &mut output, &index)?;
        }
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();
    let opts = options();
    let config = match parse_config(&opts, &args[1..]) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            print_usage(&program, &opts);
            std::process::exit(2);
        }
    };
    if config.mode == Mode::Help {
        print_usage(&program, &opts);
        return;
    }
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .init();
    if let Err(err) = run(config) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}
