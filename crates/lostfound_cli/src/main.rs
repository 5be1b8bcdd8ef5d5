//! Command-line front end for the lost-and-found board.
//!
//! # Responsibility
//! - Map subcommands onto `ItemService` use-cases over a SQLite slot.
//! - Print plain text for humans and JSON for `export`.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use lostfound_core::{
    default_log_level, encode_snapshot, init_logging, init_stderr_logging, open_db, ItemCounts,
    ItemDraft, ItemFilter, ItemQuery, ItemRecord, ItemService, ItemServiceError, SortKey,
    SortOrder, SqliteSlotStorage, StoreConfig,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lostfound", version, about = "Campus lost-and-found board")]
struct Cli {
    /// SQLite database holding the item slot
    #[arg(long, env = "LOSTFOUND_DB", default_value = "lostfound.sqlite3")]
    db: PathBuf,

    /// Storage slot key
    #[arg(long, env = "LOSTFOUND_SLOT")]
    slot: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "LOSTFOUND_LOG")]
    log_level: Option<String>,

    /// Write rolling log files here instead of stderr
    #[arg(long, value_name = "DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report a lost or found item
    Report(ReportArgs),
    /// List items matching the given filters
    List(ListArgs),
    /// Mark an item as resolved
    Resolve { id: String },
    /// Reopen a resolved item
    Unresolve { id: String },
    /// Print dashboard counters
    Stats {
        /// Count resolved items in the visible total
        #[arg(long)]
        show_resolved: bool,
    },
    /// Dump the stored snapshot as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// `lost` or `found`
    #[arg(long)]
    status: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: String,
    /// Incident date, YYYY-MM-DD
    #[arg(long)]
    date: String,
    #[arg(long)]
    location: String,
    /// Email address or phone number
    #[arg(long)]
    contact: String,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// all|lost|found
    #[arg(long, default_value = "all")]
    filter: ItemFilter,
    /// Case-insensitive text over name, description and location
    #[arg(long, default_value = "")]
    search: String,
    /// name|date|created
    #[arg(long, default_value = "created")]
    sort: SortKey,
    /// asc|desc
    #[arg(long, default_value = "desc")]
    order: SortOrder,
    /// Include resolved items
    #[arg(long)]
    show_resolved: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let conn = open_db(&cli.db).with_context(|| format!("opening {}", cli.db.display()))?;
    let storage = SqliteSlotStorage::try_new(&conn).context("preparing slot storage")?;
    let config = StoreConfig::with_slot_key(cli.slot.as_deref());
    let mut service = ItemService::open(storage, config.slot_key);

    match cli.command {
        Command::Report(args) => report(&mut service, args),
        Command::List(args) => {
            let query = ItemQuery {
                filter: args.filter,
                search: args.search,
                sort_key: args.sort,
                sort_order: args.order,
                show_resolved: args.show_resolved,
            };
            list(&service, &query);
            Ok(())
        }
        Command::Resolve { id } => set_resolved(&mut service, &id, true),
        Command::Unresolve { id } => set_resolved(&mut service, &id, false),
        Command::Stats { show_resolved } => {
            print_counts(service.counts(), show_resolved);
            Ok(())
        }
        Command::Export { out } => {
            let json = encode_snapshot(service.snapshot()).context("encoding snapshot")?;
            match out {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{json}"),
            }
            Ok(())
        }
    }
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    let outcome = match cli.log_dir.as_deref() {
        Some(dir) => init_logging(&level, dir),
        None => init_stderr_logging(&level),
    };
    outcome.map_err(anyhow::Error::msg)
}

fn report(service: &mut ItemService<SqliteSlotStorage<'_>>, args: ReportArgs) -> Result<()> {
    let draft = ItemDraft {
        name: args.name,
        description: args.description,
        date: args.date,
        location: args.location,
        contact_info: args.contact,
        status: args.status,
    };

    match service.create(&draft) {
        Ok(record) => {
            println!("{} item reported successfully!", record.status.label());
            print_record(&record);
            Ok(())
        }
        Err(ItemServiceError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("  {field}: {message}");
            }
            bail!("Please fix the errors before submitting")
        }
        Err(err) => Err(err.into()),
    }
}

fn list(service: &ItemService<SqliteSlotStorage<'_>>, query: &ItemQuery) {
    let items = service.query(query);
    if items.is_empty() {
        if query.search.is_empty() {
            println!("No items yet");
        } else {
            println!("No matching items found");
        }
        return;
    }
    for record in &items {
        print_record(record);
    }
}

fn set_resolved(
    service: &mut ItemService<SqliteSlotStorage<'_>>,
    id: &str,
    resolved: bool,
) -> Result<()> {
    let known = service.get(id).is_some();
    if resolved {
        service.resolve(id);
    } else {
        service.unresolve(id);
    }

    if !known {
        info!("event=item_set_resolved module=cli status=unknown_id id={id}");
        println!("No item with id {id}; nothing changed.");
    } else if resolved {
        println!("Item marked as resolved!");
    } else {
        println!("Item reopened.");
    }
    Ok(())
}

fn print_record(record: &ItemRecord) {
    let marker = if record.resolved { " (resolved)" } else { "" };
    println!(
        "[{}] {}  {}{}",
        record.status.as_str().to_uppercase(),
        record.id,
        record.name,
        marker
    );
    println!(
        "    {} @ {} | {}",
        record.date.format("%Y-%m-%d"),
        record.location,
        record.contact_link()
    );
    println!("    {}", record.description);
}

fn print_counts(counts: ItemCounts, show_resolved: bool) {
    println!("all      {}", counts.visible(show_resolved));
    println!("lost     {}", counts.lost);
    println!("found    {}", counts.found);
    println!("resolved {}", counts.resolved);
}
