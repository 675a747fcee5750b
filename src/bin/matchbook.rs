//! Order book CLI.
//!
//! `matchbook <file.csv>` runs a command file in batch mode.
//! `matchbook` with no arguments starts an interactive loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use matchbook::{batch, Order, OrderBook, OrderId, OrderModify, Price, Side, TimeInForce, Trade};

#[derive(Parser)]
#[command(name = "matchbook")]
#[command(about = "Single-instrument limit order book with price-time priority matching")]
#[command(version)]
struct Cli {
    /// CSV command file to run in batch mode; interactive when omitted
    file: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();
    let mut book = OrderBook::new();

    match cli.file {
        Some(path) => {
            if let Err(e) = batch::run_file(&path, &mut book) {
                eprintln!("Error: cannot process {}: {}", path.display(), e);
                process::exit(1);
            }
        }
        None => repl(&mut book),
    }
}

fn repl(book: &mut OrderBook) {
    println!("matchbook interactive order book");
    println!("Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("book> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break, // EOF
            Ok(_) => {}
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts.first().map(|s| s.to_lowercase());

        match cmd.as_deref() {
            Some("help" | "h" | "?") => print_help(),
            Some("quit" | "exit" | "q") => break,
            Some("book" | "b") => print_book(book),
            Some("size" | "s") => println!("{} orders resting", book.order_count()),
            Some("create") => handle_create(book, &parts[1..]),
            Some("modify") => handle_modify(book, &parts[1..]),
            Some("cancel" | "c") => handle_cancel(book, &parts[1..]),
            Some("clear") => {
                *book = OrderBook::new();
                println!("Book cleared.");
            }
            Some(cmd) => println!("Unknown command: '{}'. Type 'help' for commands.", cmd),
            None => {}
        }
    }

    println!("Goodbye!");
}

fn print_help() {
    println!(
        r#"
Commands:
  create <id> <buy|sell> <gtc|fok> <price> <qty>   Submit an order
  modify <id> <buy|sell> <gtc|fok> <price> <qty>   Replace an order (keeps its duration)
  cancel <id>                                      Cancel an order
  book                                             Show aggregated book
  size                                             Count resting orders
  clear                                            Reset the book
  help                                             Show this help
  quit                                             Exit

Prices and quantities are integers (smallest currency unit / units).

Examples:
  create 1 buy gtc 100 10
  create 2 sell fok 100 25
  modify 1 buy gtc 99 20
  cancel 1
"#
    );
}

fn print_book(book: &OrderBook) {
    let snap = book.depth(10);

    println!();
    println!("            ORDER BOOK");
    println!("  ------------------------------");

    if snap.asks.is_empty() && snap.bids.is_empty() {
        println!("  (empty)");
        println!();
        return;
    }

    // Asks reversed so the best ask sits just above the spread line
    for level in snap.asks.iter().rev() {
        println!(
            "  ASK {:>10}  {:>8}  ({} orders)",
            level.price, level.quantity, level.order_count
        );
    }

    match snap.spread() {
        Some(spread) => println!("  ------- spread: {} -------", spread),
        None => println!("  ------- (no spread) -------"),
    }

    for level in &snap.bids {
        println!(
            "  BID {:>10}  {:>8}  ({} orders)",
            level.price, level.quantity, level.order_count
        );
    }

    println!();
}

fn parse_order_args(args: &[&str]) -> Option<(OrderId, Side, TimeInForce, Price, u32)> {
    if args.len() < 5 {
        return None;
    }

    let id: u64 = args[0].parse().ok()?;
    let side = match args[1].to_lowercase().as_str() {
        "b" => Side::Buy,
        "s" => Side::Sell,
        _ => args[1].to_uppercase().parse::<Side>().ok()?,
    };
    let tif = args[2].to_uppercase().parse::<TimeInForce>().ok()?;
    let price: i32 = args[3].parse().ok()?;
    let qty: u32 = args[4].parse().ok()?;

    Some((OrderId(id), side, tif, Price(price), qty))
}

fn print_trades(trades: &[Trade]) {
    if trades.is_empty() {
        return;
    }
    println!("  Generated {} trade(s):", trades.len());
    for trade in trades {
        println!("    {}", trade);
    }
}

fn handle_create(book: &mut OrderBook, args: &[&str]) {
    let Some((id, side, tif, price, qty)) = parse_order_args(args) else {
        println!("Usage: create <id> <buy|sell> <gtc|fok> <price> <qty>");
        return;
    };

    let order = match Order::new(id, side, tif, price, qty) {
        Ok(o) => o,
        Err(e) => {
            println!("Rejected: {}", e);
            return;
        }
    };

    match book.submit(order) {
        Ok(trades) => {
            println!("Order {}: {} {} {} x {}", id, side, tif, price, qty);
            print_trades(&trades);
            println!("  {} orders resting", book.order_count());
        }
        Err(e) => println!("Engine error: {}", e),
    }
}

fn handle_modify(book: &mut OrderBook, args: &[&str]) {
    let Some((id, side, tif, price, qty)) = parse_order_args(args) else {
        println!("Usage: modify <id> <buy|sell> <gtc|fok> <price> <qty>");
        return;
    };

    let existed = book.contains_order(id);
    match book.modify(OrderModify::new(id, side, tif, price, qty)) {
        Ok(trades) => {
            if existed {
                println!("Order {} replaced: {} {} x {}", id, side, price, qty);
                print_trades(&trades);
            } else {
                println!("Order {} not found", id);
            }
        }
        Err(e) => println!("Rejected: {}", e),
    }
}

fn handle_cancel(book: &mut OrderBook, args: &[&str]) {
    let Some(id) = args.first().and_then(|s| s.parse().ok()).map(OrderId) else {
        println!("Usage: cancel <id>");
        return;
    };

    match book.cancel(id) {
        Some(qty) => println!("Cancelled order {} ({} units)", id, qty),
        None => println!("Order {} not found", id),
    }
}
