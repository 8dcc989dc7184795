mod reader;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use engine::{paginate, Document, DocumentStatus, RequestQueue, SearchServer};
use reader::LineReader;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "In-memory TF-IDF document search", long_about = None)]
struct Cli {
    /// Space-separated stop words (repl mode)
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Results per printed page
    #[arg(long, default_value_t = 2)]
    page_size: usize,
    /// Print results as JSON lines instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a small built-in corpus and run example queries
    Demo,
    /// Read documents and then queries from stdin
    ///
    /// Input format: a document count, then per document an id line,
    /// a text line, and a ratings line ("<count> <r1> <r2> ..."),
    /// followed by one query per line until end of input.
    Repl,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => run_demo(cli.page_size, cli.json),
        Commands::Repl => run_repl(&cli.stop_words, cli.page_size, cli.json),
    }
}

fn run_demo(page_size: usize, json: bool) -> Result<()> {
    let mut server = SearchServer::from_stop_words_text("и в на")?;
    server.add_document(0, "белый кот и модный ошейник", DocumentStatus::Actual, &[8, -3])?;
    server.add_document(1, "пушистый кот пушистый хвост", DocumentStatus::Actual, &[7, 2, 7])?;
    server.add_document(2, "ухоженный пёс выразительные глаза", DocumentStatus::Actual, &[5, -12, 2, 1])?;
    server.add_document(3, "ухоженный скворец евгений", DocumentStatus::Banned, &[9])?;
    tracing::info!(documents = server.document_count(), "demo corpus indexed");

    let mut queue = RequestQueue::new(&server);

    let found = queue.add_find_request("пушистый ухоженный кот")?;
    print_results("пушистый ухоженный кот (ACTUAL)", &found, page_size, json)?;

    let found = queue.add_find_request_with_status("пушистый ухоженный кот", DocumentStatus::Banned)?;
    print_results("пушистый ухоженный кот (BANNED)", &found, page_size, json)?;

    let found = queue.add_find_request_with("пушистый ухоженный кот", |id, _status, _rating| id % 2 == 0)?;
    print_results("пушистый ухоженный кот (even ids)", &found, page_size, json)?;

    let found = queue.add_find_request("белый -ошейник")?;
    print_results("белый -ошейник", &found, page_size, json)?;

    let (matched, status) = server.match_document("пушистый кот", 1)?;
    println!("document 1 matches [{}] with status {status}", matched.join(", "));

    println!("no-result requests in the last day: {}", queue.no_result_requests());
    Ok(())
}

fn run_repl(stop_words: &str, page_size: usize, json: bool) -> Result<()> {
    let stdin = std::io::stdin();
    let mut reader = LineReader::new(stdin.lock());
    let mut server = SearchServer::from_stop_words_text(stop_words)?;

    let document_count = reader.read_int()?;
    for _ in 0..document_count {
        let id = reader.read_int()?;
        let text = reader
            .read_line()?
            .context("unexpected end of input while reading a document")?;
        let ratings = reader.read_ratings()?;
        if let Err(err) = server.add_document(id, &text, DocumentStatus::Actual, &ratings) {
            eprintln!("skipping document: {err}");
        }
    }
    tracing::info!(documents = server.document_count(), "corpus loaded");

    let mut queue = RequestQueue::new(&server);
    while let Some(query) = reader.read_line()? {
        if query.is_empty() {
            continue;
        }
        match queue.add_find_request(&query) {
            Ok(found) => print_results(&query, &found, page_size, json)?,
            Err(err) => eprintln!("bad query: {err}"),
        }
    }

    println!("no-result requests in the last day: {}", queue.no_result_requests());
    Ok(())
}

fn print_results(heading: &str, found: &[Document], page_size: usize, json: bool) -> Result<()> {
    println!("query: {heading}");
    if json {
        for document in found {
            println!("{}", serde_json::to_string(document)?);
        }
        return Ok(());
    }
    if found.is_empty() {
        println!("  no results");
        return Ok(());
    }
    for (number, page) in paginate(found, page_size).iter().enumerate() {
        println!("  page {}: {page}", number + 1);
    }
    Ok(())
}
