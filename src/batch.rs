//! CSV batch driver: parse order command files and feed them to a book.
//!
//! Line-oriented UTF-8, one command per line, comma-separated, no
//! quoting:
//!
//! ```text
//! CREATE,<id>,<BUY|SELL>,<GTC|FOK>,<price>,<quantity>
//! MODIFY,<id>,<BUY|SELL>,<GTC|FOK>,<price>,<quantity>
//! CANCEL,<id>
//! # comment lines and blank lines are skipped
//! ```
//!
//! Malformed or out-of-range lines are reported via `log` and skipped;
//! the run continues. The engine only ever sees validated commands.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use log::{info, warn};

use crate::{EngineError, Order, OrderBook, OrderId, OrderModify, Price, Side, TimeInForce, Trade};

/// One parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Create(Order),
    Modify(OrderModify),
    Cancel(OrderId),
}

/// Errors for a single command line.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("invalid {field} '{value}'")]
    InvalidField {
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Totals for one batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Lines read, including blanks and comments
    pub lines: usize,
    /// Commands applied to the book
    pub commands: usize,
    /// Trades generated
    pub trades: usize,
    /// Lines reported and skipped
    pub skipped: usize,
}

/// Parse one line into a command.
///
/// Returns `Ok(None)` for blank lines and `#` comments. `str::parse`
/// supplies the range checking: an id outside u64, a price outside i32,
/// or a quantity outside u32 is an [`ParseError::InvalidField`].
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split(',');
    let action = next_field(&mut fields, "action")?;
    let id = OrderId(parse_field(&mut fields, "id")?);

    match action {
        "CANCEL" => Ok(Some(Command::Cancel(id))),
        "CREATE" | "MODIFY" => {
            let side = parse_side(next_field(&mut fields, "side")?)?;
            let tif = parse_tif(next_field(&mut fields, "type")?)?;
            let price = Price(parse_field::<i32>(&mut fields, "price")?);
            let quantity = parse_field::<u32>(&mut fields, "quantity")?;

            if action == "CREATE" {
                // Order construction enforces positive price and quantity.
                Ok(Some(Command::Create(Order::new(
                    id, side, tif, price, quantity,
                )?)))
            } else {
                // Validate the shape now; the engine re-checks when the
                // replacement order is built.
                Order::new(id, side, tif, price, quantity)?;
                Ok(Some(Command::Modify(OrderModify::new(
                    id, side, tif, price, quantity,
                ))))
            }
        }
        other => Err(ParseError::UnknownAction(other.to_string())),
    }
}

/// Apply one command to the book, returning any trades generated.
pub fn apply(book: &mut OrderBook, command: Command) -> Result<Vec<Trade>, EngineError> {
    match command {
        Command::Create(order) => book.submit(order),
        Command::Modify(modify) => book.modify(modify),
        Command::Cancel(id) => {
            book.cancel(id);
            Ok(Vec::new())
        }
    }
}

/// Run every command from `reader` against the book.
///
/// Per-line failures (parse or engine) are logged and counted as
/// skipped; only I/O errors abort the run.
pub fn run_reader<R: BufRead>(reader: R, book: &mut OrderBook) -> io::Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for line in reader.lines() {
        let line = line?;
        summary.lines += 1;

        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(command)) => match apply(book, command) {
                Ok(trades) => {
                    summary.commands += 1;
                    summary.trades += trades.len();
                }
                Err(e) => {
                    warn!("line {}: {}", summary.lines, e);
                    summary.skipped += 1;
                }
            },
            Err(e) => {
                warn!("line {}: {} ({})", summary.lines, e, line);
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

/// Run a command file against the book.
pub fn run_file(path: &Path, book: &mut OrderBook) -> io::Result<BatchSummary> {
    let file = File::open(path)?;
    info!("processing command file {}", path.display());

    let summary = run_reader(BufReader::new(file), book)?;
    info!(
        "batch complete: {} lines, {} commands, {} trades, {} skipped, {} orders resting",
        summary.lines,
        summary.commands,
        summary.trades,
        summary.skipped,
        book.order_count()
    );
    Ok(summary)
}

fn next_field<'a>(
    fields: &mut std::str::Split<'a, char>,
    name: &'static str,
) -> Result<&'a str, ParseError> {
    fields.next().ok_or(ParseError::MissingField(name))
}

fn parse_field<T: FromStr>(
    fields: &mut std::str::Split<'_, char>,
    name: &'static str,
) -> Result<T, ParseError> {
    let raw = next_field(fields, name)?;
    raw.parse().map_err(|_| ParseError::InvalidField {
        field: name,
        value: raw.to_string(),
    })
}

fn parse_side(raw: &str) -> Result<Side, ParseError> {
    raw.parse().map_err(|_| ParseError::InvalidField {
        field: "side",
        value: raw.to_string(),
    })
}

fn parse_tif(raw: &str) -> Result<TimeInForce, ParseError> {
    raw.parse().map_err(|_| ParseError::InvalidField {
        field: "type",
        value: raw.to_string(),
    })
}
