use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use std::io::Read;
use trellis_core::layout::Viewport;
use trellis_core::{output, Engine, Page};
use url::Url;

#[derive(Parser)]
#[command(name = "trellis", about = "Parse HTML and CSS into positioned layout boxes")]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a local HTML file and print its layout
    Parse {
        /// The HTML file to parse (use - for stdin)
        file: String,

        /// Output as JSON instead of compact format
        #[arg(long)]
        json: bool,

        /// Viewport size as WxH (default: 1920x1080)
        #[arg(long, default_value = "1920x1080")]
        viewport: String,

        /// Extra stylesheet, applied after the document's own <style> blocks
        #[arg(long = "css")]
        css: Vec<String>,

        /// Base URL for resolving relative image sources
        #[arg(long)]
        base_url: Option<String>,
    },
    /// List elements with a given tag and their text content
    Query {
        /// The HTML file to parse (use - for stdin)
        file: String,

        /// Tag name to look for
        #[arg(long)]
        tag: String,
    },
    /// Print the text content of a document
    Text {
        /// The HTML file to parse (use - for stdin)
        file: String,
    },
    /// Fetch a URL and print its layout
    #[cfg(feature = "fetch")]
    Fetch {
        /// The URL to fetch
        url: String,

        /// Output as JSON instead of compact format
        #[arg(long)]
        json: bool,

        /// Viewport size as WxH (default: 1920x1080)
        #[arg(long, default_value = "1920x1080")]
        viewport: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Parse {
            file,
            json,
            viewport,
            css,
            base_url,
        } => {
            let html = read_input(&file)?;
            let mut engine = Engine::new();
            let document = engine.load(&html);
            for path in &css {
                let sheet = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read stylesheet {path}"))?;
                let added = engine.parse_css(&sheet);
                debug!("loaded {added} rules from {path}");
            }

            let viewport = Viewport::parse(&viewport);
            let root = engine.layout(&document, viewport);
            let base_url = base_url
                .map(|u| Url::parse(&u).with_context(|| format!("invalid base URL {u}")))
                .transpose()?;
            let page = Page {
                document,
                root,
                viewport,
                base_url,
            };
            print_page(&page, &engine, json)
        }
        Commands::Query { file, tag } => {
            let html = read_input(&file)?;
            let document = trellis_core::dom::parse_html(&html);
            for element in document.elements_by_tag(&tag) {
                let text = element.text_content();
                let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
                println!("<{}> {}", tag.to_ascii_lowercase(), text);
            }
            Ok(())
        }
        Commands::Text { file } => {
            let html = read_input(&file)?;
            let document = trellis_core::dom::parse_html(&html);
            println!("{}", document.text_content());
            Ok(())
        }
        #[cfg(feature = "fetch")]
        Commands::Fetch {
            url,
            json,
            viewport,
        } => {
            let mut engine = Engine::new();
            let config = trellis_core::fetch::FetchConfig::default();
            let viewport = Viewport::parse(&viewport);
            let page = trellis_core::fetch::fetch(&url, &config, &mut engine, viewport)?;
            print_page(&page, &engine, json)
        }
    }
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
    }
}

fn print_page(page: &Page, engine: &Engine, as_json: bool) -> Result<()> {
    let dump = page.summarize();
    if as_json {
        println!("{}", output::to_json(&dump)?);
        return Ok(());
    }

    if !dump.title.is_empty() {
        println!("title: {}", dump.title);
    }
    println!("vp: {}x{}", dump.vp[0] as i32, dump.vp[1] as i32);
    println!("boxes: {}", dump.boxes.len());
    let pending = page.image_requests(engine);
    if !pending.is_empty() {
        println!("images: {}", pending.len());
        for request in &pending {
            match &request.url {
                Some(url) => println!("  {url}"),
                None => println!("  {} (unresolved)", request.src),
            }
        }
    }
    println!("---");
    println!("{}", output::to_compact_string(&dump));
    Ok(())
}
