use std::io::{self, BufRead, Write};
use std::process;

use colored::Colorize;

use split_core::config::{Preferences, PreferencesStore, Theme};
use split_core::engine::{BalanceEngine, BalanceMode, NetStatus};
use split_core::errors::SplitError;
use split_core::expense::{DropSide, ExpenseDraft, ExpenseStore, Participant};
use split_core::init;
use split_core::money::Money;
use split_core::storage::JsonStorage;

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let storage = JsonStorage::new_default()?;
    let mut store = ExpenseStore::open(Box::new(storage));
    let preferences = PreferencesStore::new()?;

    println!("split_core session. Type `help` for commands, `exit` to quit.");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };
        match command {
            "exit" | "quit" => break,
            "help" => print_help(),
            _ => {
                if let Err(err) = dispatch(command, args, &mut store, &preferences) {
                    eprintln!("Error: {err}");
                }
            }
        }
    }
    Ok(())
}

fn dispatch(
    command: &str,
    args: &[&str],
    store: &mut ExpenseStore,
    preferences: &PreferencesStore,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        "add" => cmd_add(args, store)?,
        "list" => cmd_list(store),
        "balances" => cmd_balances(args, store),
        "summary" => cmd_summary(store),
        "breakdown" => cmd_breakdown(store),
        "delete" => {
            let id = id_at(store, args.first().copied())?;
            store.delete(id)?;
            println!("Deleted. `undo` restores it for a short while.");
        }
        "undo" => match store.undo_delete() {
            Some(expense) => println!("Restored `{}`.", expense.title),
            None => println!("Nothing to undo."),
        },
        "move-up" => {
            let id = id_at(store, args.first().copied())?;
            report_move(store.move_up(id));
        }
        "move-down" => {
            let id = id_at(store, args.first().copied())?;
            report_move(store.move_down(id));
        }
        "move" => cmd_move(args, store)?,
        "theme" => cmd_theme(args, preferences)?,
        other => {
            eprintln!("Unknown command `{other}`. Type `help` for the command list.");
        }
    }
    Ok(())
}

fn cmd_add(args: &[&str], store: &mut ExpenseStore) -> Result<(), Box<dyn std::error::Error>> {
    let [title, total, date, people @ ..] = args else {
        return Err("usage: add <title> <total> <yyyy-mm-dd> <name=amount>...".into());
    };
    if people.is_empty() {
        return Err("usage: add <title> <total> <yyyy-mm-dd> <name=amount>...".into());
    }
    let total: Money = total.parse()?;
    let date = date.parse()?;
    let participants = people
        .iter()
        .map(|spec| parse_participant(spec))
        .collect::<Result<Vec<_>, _>>()?;
    let expense = store.add(ExpenseDraft::new(*title, total, date, participants))?;
    println!("Added `{}` ({}).", expense.title, expense.total);
    Ok(())
}

fn parse_participant(spec: &str) -> Result<Participant, String> {
    let (name, amount) = spec
        .split_once('=')
        .ok_or_else(|| format!("`{spec}` should look like name=amount"))?;
    Ok(Participant {
        name: name.to_string(),
        contribution: amount.parse()?,
    })
}

fn cmd_list(store: &ExpenseStore) {
    if store.is_empty() {
        println!("No expenses added yet.");
        return;
    }
    for (index, expense) in store.list().iter().enumerate() {
        let contributions = expense
            .participants
            .iter()
            .map(|p| format!("{}: {}", p.name, p.contribution))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:>3}. {} - {} | {} | {}",
            index + 1,
            expense.title,
            expense.total,
            expense.date,
            contributions
        );
    }
}

fn cmd_balances(args: &[&str], store: &ExpenseStore) {
    let mode = if args.first() == Some(&"pooled") {
        BalanceMode::Pooled
    } else {
        BalanceMode::PerExpense
    };
    let balances = BalanceEngine::balances(store.list(), mode);
    if balances.is_empty() {
        println!("No expenses added yet to calculate balances.");
        return;
    }
    for entry in balances {
        if entry.amount.is_positive() {
            println!(
                "{}",
                format!("{} should receive {}", entry.name, entry.amount).green()
            );
        } else if entry.amount.is_negative() {
            println!(
                "{}",
                format!("{} owes {}", entry.name, entry.amount.abs()).red()
            );
        } else {
            println!("{} is settled up.", entry.name);
        }
    }
}

fn cmd_summary(store: &ExpenseStore) {
    let summary = BalanceEngine::summary(store.list());
    println!("Total: {}", summary.total);
    match summary.highest_spender {
        Some((name, amount)) => println!("Highest spender: {} ({})", name, amount),
        None => println!("Highest spender: -"),
    }
    println!("Average per person: {}", summary.average_per_person);
}

fn cmd_breakdown(store: &ExpenseStore) {
    let report = BalanceEngine::breakdown(store.list());
    if report.is_empty() {
        println!("No expenses added yet.");
        return;
    }
    for entry in report {
        println!(
            "{} - {} | {} | equal share {}",
            entry.title, entry.total, entry.date, entry.equal_share
        );
        for share in entry.participants {
            let status = match share.status {
                NetStatus::Receives => format!("receives {}", share.net).green(),
                NetStatus::Owes => format!("owes {}", share.net.abs()).red(),
                NetStatus::Settled => "settled up".normal(),
            };
            println!("    {} paid {} -> {}", share.name, share.contribution, status);
        }
    }
}

fn cmd_move(args: &[&str], store: &mut ExpenseStore) -> Result<(), Box<dyn std::error::Error>> {
    let [moved, side, target] = args else {
        return Err("usage: move <n> before|after <m>".into());
    };
    let side = match *side {
        "before" => DropSide::Before,
        "after" => DropSide::After,
        _ => return Err("usage: move <n> before|after <m>".into()),
    };
    let moved = id_at(store, Some(moved))?;
    let target = id_at(store, Some(target))?;
    report_move(store.move_before(moved, target, side));
    Ok(())
}

fn cmd_theme(
    args: &[&str],
    preferences: &PreferencesStore,
) -> Result<(), Box<dyn std::error::Error>> {
    match args.first() {
        None => {
            let current = preferences.load();
            println!("Theme: {:?}", current.theme);
        }
        Some(&"light") => {
            preferences.save(&Preferences {
                theme: Theme::Light,
            })?;
            println!("Theme set to light.");
        }
        Some(&"dark") => {
            preferences.save(&Preferences { theme: Theme::Dark })?;
            println!("Theme set to dark.");
        }
        Some(other) => return Err(format!("unknown theme `{other}`").into()),
    }
    Ok(())
}

/// Maps a 1-based list position (as printed by `list`) to an expense id.
fn id_at(store: &ExpenseStore, arg: Option<&str>) -> Result<uuid::Uuid, SplitError> {
    let arg = arg.ok_or_else(|| SplitError::Validation("expected a list position".into()))?;
    let index: usize = arg
        .parse()
        .map_err(|_| SplitError::Validation(format!("`{arg}` is not a list position")))?;
    store
        .list()
        .get(index.wrapping_sub(1))
        .map(|expense| expense.id)
        .ok_or_else(|| SplitError::Validation(format!("no expense at position {index}")))
}

fn report_move(moved: bool) {
    if moved {
        println!("Moved.");
    } else {
        println!("Nothing moved.");
    }
}

fn print_help() {
    println!(
        "Available commands:\n  \
         add <title> <total> <yyyy-mm-dd> <name=amount>...\n  \
         list\n  \
         balances [pooled]\n  \
         summary\n  \
         breakdown\n  \
         delete <n>\n  \
         undo\n  \
         move-up <n> | move-down <n> | move <n> before|after <m>\n  \
         theme [light|dark]\n  \
         exit"
    );
}
