use bevgen::pipeline::{self, BuildError, Paths};
use bevgen::{config, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "bevgen")]
#[command(about = "Build pages.json and an RSS feed from a directory of Markdown")]
#[command(long_about = "\
Build pages.json and an RSS feed from a directory of Markdown

Every .md file under the content directory becomes one page. Front matter
is optional YAML between --- lines at the top of the file.

Content structure:

  content/
  ├── config.toml            # Feed channel, reading speed (optional)
  ├── cocktails/             # Directory name → category
  │   ├── negroni.md         # slug: negroni
  │   └── Old Fashioned.md   # slug: old-fashioned
  └── coffee/
      └── pour-over.md

Derived fields:
  slug:       front matter, else filename (lowercased, spaces → -, no dots)
  category:   parent directory, only when slug was derived
  read_time:  minutes at 200 words/minute, always recomputed

Running with no command does a full build.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Path of the JSON page collection
    #[arg(long, default_value = "static/data/pages.json", global = true)]
    json: PathBuf,

    /// Path of the RSS feed
    #[arg(long, default_value = "static/rss.xml", global = true)]
    rss: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: scan → pages.json → rss.xml
    Build,
    /// Scan content and write pages.json only
    Scan,
    /// Generate rss.xml from an existing pages.json
    Feed,
    /// Validate content without writing anything
    Check,
    /// Show one page from pages.json by category and slug
    Show { category: String, slug: String },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), BuildError> {
    let paths = Paths {
        source: cli.source,
        json: cli.json,
        rss: cli.rss,
    };

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            println!("==> Stage 1: Scanning {}", paths.source.display());
            let result = pipeline::run_build(&paths)?;
            output::print_scan_output(&result.pages);

            println!("==> Stage 2: Wrote {}", paths.json.display());
            println!("==> Stage 3: Generating feed");
            output::print_feed_output(&result.channel, &paths.rss);

            println!(
                "Successfully generated {} and {}",
                paths.json.display(),
                paths.rss.display()
            );
        }
        Command::Scan => {
            let pages = pipeline::run_scan(&paths)?;
            output::print_scan_output(&pages);
            println!("==> Wrote {}", paths.json.display());
        }
        Command::Feed => {
            let channel = pipeline::run_feed(&paths)?;
            output::print_feed_output(&channel, &paths.rss);
        }
        Command::Check => {
            println!("==> Checking {}", paths.source.display());
            let pages = pipeline::check(&paths.source)?;
            output::print_scan_output(&pages);
            println!("==> Content is valid");
        }
        Command::Show { category, slug } => {
            let page = pipeline::show(&paths.json, &category, &slug)?;
            output::print_page_output(&page);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
