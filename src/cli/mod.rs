mod render;

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::application::{Session, SplitOutcome, DEFAULT_CURRENCY};
use crate::domain::{format_amount, FriendLedger, Selection};

pub use render::OutputFormat;
use render::{write_friend_list, write_history, write_split_form, write_title};

/// Eat N' Split - split bills with friends
#[derive(Parser)]
#[command(name = "eatnsplit")]
#[command(about = "Keep track of who owes whom while splitting bills with friends")]
#[command(version)]
pub struct Cli {
    /// Start without the starter friends
    #[arg(long)]
    pub empty: bool,

    /// Currency symbol shown after amounts
    #[arg(short, long, default_value = DEFAULT_CURRENCY)]
    pub currency: String,

    /// Do not print the prompt (useful when piping commands in)
    #[arg(long)]
    pub no_prompt: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// One line typed into the shell.
#[derive(Parser)]
#[command(name = "eatnsplit", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
pub enum ShellCommand {
    /// List friends and their balances
    #[command(alias = "ls")]
    List {
        /// Output format: table, json, csv
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Open or close the add-friend panel
    ToggleAdd,

    /// Fill in the add-friend form and submit it
    Add {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        phone: Option<String>,

        #[arg(short, long)]
        address: Option<String>,

        /// Image URL (defaults to a random avatar)
        #[arg(short, long)]
        image: Option<String>,
    },

    /// Select a friend by position, id or name; selecting again deselects
    Select {
        friend: String,
    },

    /// Set the bill value
    Bill {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Set your own expense (ignored if above the bill)
    Paid {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Set who is paying the bill: user or friend
    Payer {
        payer: String,
    },

    /// Show the split form for the selected friend
    Form,

    /// Split the bill with the selected friend
    Split {
        /// Bill value
        #[arg(short, long, allow_hyphen_values = true)]
        bill: Option<String>,

        /// Your expense
        #[arg(short = 'u', long, allow_hyphen_values = true)]
        paid: Option<String>,

        /// Who is paying: user or friend
        #[arg(short, long)]
        payer: Option<String>,
    },

    /// Show a friend's transaction history (selected friend by default)
    History {
        friend: Option<String>,

        /// Output format: table, json, csv
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

/// Whether the shell keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

impl Cli {
    pub fn session(&self) -> Session {
        let ledger = if self.empty {
            FriendLedger::new()
        } else {
            FriendLedger::seeded()
        };
        Session::new(ledger).with_currency(self.currency.clone())
    }

    pub fn run(self) -> Result<()> {
        init_tracing(self.verbose);

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut stderr = io::stderr();
        self.run_with(stdin.lock(), &mut stdout, &mut stderr)
    }

    /// Run the shell until `quit` or end of input. Command errors go to `err`
    /// and the session keeps going.
    pub fn run_with<R: BufRead, W: Write, E: Write>(
        &self,
        input: R,
        out: &mut W,
        err: &mut E,
    ) -> Result<()> {
        let mut session = self.session();
        info!(friends = session.ledger().len(), "session started");

        write_title(out)?;
        write_friend_list(&session, OutputFormat::Table, out)?;

        let mut lines = input.lines();
        loop {
            if !self.no_prompt {
                write!(out, "> ")?;
            }
            out.flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let words = match split_words(&line) {
                Ok(words) => words,
                Err(e) => {
                    writeln!(err, "Error: {}", e)?;
                    continue;
                }
            };

            let command = match ShellLine::try_parse_from(words) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    use clap::error::ErrorKind;
                    match e.kind() {
                        ErrorKind::DisplayHelp
                        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                            write!(out, "{}", e)?
                        }
                        _ => write!(err, "{}", e)?,
                    }
                    continue;
                }
            };

            match run_command(&mut session, command, out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => writeln!(err, "Error: {}", e)?,
            }
        }

        info!(friends = session.ledger().len(), "session ended");
        Ok(())
    }
}

fn init_tracing(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(io::stderr)
        .try_init();
}

/// `-v` forces debug logging; otherwise `RUST_LOG` applies, defaulting to warnings.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("eatnsplit=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("eatnsplit=warn"))
    }
}

fn run_command<W: Write>(session: &mut Session, command: ShellCommand, out: &mut W) -> Result<Flow> {
    match command {
        ShellCommand::List { format } => {
            write_friend_list(session, format.parse()?, out)?;
        }

        ShellCommand::ToggleAdd => {
            let open = session.toggle_add_friend();
            if open {
                writeln!(out, "Add-friend panel open. Fill it in with `add`.")?;
            } else {
                writeln!(out, "Add-friend panel closed.")?;
            }
        }

        ShellCommand::Add {
            name,
            email,
            phone,
            address,
            image,
        } => {
            if !session.is_add_friend_open() {
                session.toggle_add_friend();
            }

            let form = session.add_friend_form_mut();
            for (field, value) in [
                (&mut form.name, name),
                (&mut form.email, email),
                (&mut form.phone, phone),
                (&mut form.address, address),
                (&mut form.image, image),
            ] {
                if let Some(value) = value {
                    *field = value;
                }
            }

            match session.submit_add_friend() {
                Some(friend) => writeln!(out, "Added {} ({})", friend.name, friend.id)?,
                None => writeln!(
                    out,
                    "Name, email, phone and address are all required. Nothing added."
                )?,
            }
        }

        ShellCommand::Select { friend } => match session.select(&friend)? {
            Selection::Selected(_) => {
                if let Some(view) = session.split_form_view() {
                    write_split_form(&view, session.currency(), out)?;
                }
            }
            Selection::None => writeln!(out, "Selection cleared.")?,
        },

        ShellCommand::Bill { amount } => {
            require_selection(session)?;
            if !session.set_bill(&amount)? {
                debug!(amount = %amount, "bill out of range ignored");
            }
            write_form(session, out)?;
        }

        ShellCommand::Paid { amount } => {
            require_selection(session)?;
            if !session.set_paid_by_user(&amount)? {
                debug!(amount = %amount, "expense above bill ignored");
            }
            write_form(session, out)?;
        }

        ShellCommand::Payer { payer } => {
            require_selection(session)?;
            session.set_who_is_paying(&payer)?;
            write_form(session, out)?;
        }

        ShellCommand::Form => {
            if session.selected_friend().is_none() {
                writeln!(out, "Select a friend to split a bill.")?;
            } else {
                write_form(session, out)?;
            }
        }

        ShellCommand::Split { bill, paid, payer } => {
            if session.selected_friend().is_some() {
                if let Some(bill) = bill {
                    session.set_bill(&bill)?;
                }
                if let Some(paid) = paid {
                    session.set_paid_by_user(&paid)?;
                }
                if let Some(payer) = payer {
                    session.set_who_is_paying(&payer)?;
                }
            }

            match session.split_bill() {
                SplitOutcome::Applied(transaction) => {
                    writeln!(
                        out,
                        "Recorded {}{} with {} on {}",
                        format_amount(transaction.amount),
                        session.currency(),
                        transaction.expense,
                        transaction.date.format("%Y-%m-%d")
                    )?;
                    write_friend_list(session, OutputFormat::Table, out)?;
                }
                SplitOutcome::NoSelection => writeln!(out, "Select a friend to split a bill.")?,
                SplitOutcome::Incomplete => {
                    writeln!(out, "Enter the bill value and your expense first.")?
                }
            }
        }

        ShellCommand::History { friend, format } => {
            let format: OutputFormat = format.parse()?;
            match session.history(friend.as_deref())? {
                Some(history) => write_history(&history, session.currency(), format, out)?,
                None => writeln!(out, "Select a friend or name one to see their history.")?,
            }
        }

        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

fn require_selection(session: &Session) -> Result<()> {
    if session.selected_friend().is_none() {
        bail!("Select a friend first");
    }
    Ok(())
}

fn write_form<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    if let Some(view) = session.split_form_view() {
        write_split_form(&view, session.currency(), out)?;
    }
    if let Some(history) = session.history(None)? {
        write_history(&history, session.currency(), OutputFormat::Table, out)?;
    }
    Ok(())
}

/// Split a line into words, honouring single and double quotes and
/// backslash escapes.
fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => match chars.next() {
                Some(escaped) => {
                    current.push(escaped);
                    in_word = true;
                }
                None => bail!("Trailing backslash"),
            },
            (Some(_), c) => current.push(c),
            (None, '"') | (None, '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("Unterminated {} quote", q);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
