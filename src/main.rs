//! ferrolink CLI - autolink pasted text or replay keystroke scripts

use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use ferrolink::{classify, Options, PasteMethod, Session};

#[derive(Parser, Debug)]
#[command(name = "ferrolink", about, version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Classify a single word and print its href
    #[arg(long = "check", value_name = "WORD")]
    check: Option<String>,

    /// Link scheme-less URLs verbatim instead of prefixing http://
    #[arg(long = "no-append-protocol")]
    no_append_protocol: bool,

    /// Turn off the host's native URL autodetection when binding
    #[arg(long = "suppress-native-autodetect")]
    suppress_native_autodetect: bool,

    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    verbosity: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the normalized form of pasted content (stdin or "-" by default)
    Paste { file: Option<PathBuf> },
    /// Replay a keystroke script and print the resulting HTML
    Replay { file: Option<PathBuf> },
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            append_protocol: !self.no_append_protocol,
            suppress_native_autodetect: self.suppress_native_autodetect,
            ..Options::default()
        }
    }
}

fn main() -> ferrolink::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);
    let options = cli.options();

    let output = match (&cli.command, &cli.check) {
        (_, Some(word)) => match classify(word) {
            Some(kind) => format!("{kind:?} {}\n", kind.href(word, options.append_protocol)),
            None => "none\n".to_owned(),
        },
        (Some(Command::Paste { file }), None) => {
            let input = read_input(file.as_ref())?;
            let mut session = Session::new(options);
            session.paste(PasteMethod::Paste, &input)?
        }
        (Some(Command::Replay { file }), None) => {
            let input = read_input(file.as_ref())?;
            let mut session = Session::new(options);
            // A trailing newline ends the file, not the script
            let script = input.strip_suffix('\n').unwrap_or(&input);
            let links = session.replay(script)?;
            log::info!("replay created {} link(s)", links.len());
            let mut html = session.document().to_html();
            html.push('\n');
            html
        }
        (None, None) => {
            let input = read_input(None)?;
            ferrolink::linkify(&input)
        }
    };

    io::stdout().write_all(output.as_bytes())?;
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Read from a file, or stdin when absent or "-".
fn read_input(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
