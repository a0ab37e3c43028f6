use clap::{Parser, Subcommand};
use docs_nav::engine::Navigator;
use docs_nav::site::{self, MountOptions, PageStatus};
use docs_nav::{config, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docs-nav")]
#[command(about = "Navigation engine for multi-language documentation sites")]
#[command(long_about = "\
Navigation engine for multi-language documentation sites

Resolves which page a URL path points at, renders the global navigation
list and the language switcher for it, and mounts both into built HTML
pages.

Pages are matched by file name:

  site/
  ├── index.html                   # English home (id: home)
  ├── index_ru.html                # Russian home (\"_ru.\" marks the language)
  └── docs/
      ├── repository-server.html   # Same id in both languages
      ├── repository-server_ru.html
      └── changelog.html           # Unmapped: no active link, switcher links to itself

Containers are located with CSS selectors (first match):

  .nav-links                 primary navigation list
  .mobile-nav .nav-links     mobile navigation list
  .language-switcher         language buttons

Run 'docs-nav gen-config' to generate a documented docs-nav.toml.")]
#[command(version)]
struct Cli {
    /// Navigation config file (stock defaults when missing)
    #[arg(long, default_value = "docs-nav.toml", global = true)]
    config: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the navigation for one URL path
    Render {
        /// URL path of the page, e.g. /docs/repository-server_ru.html
        url_path: String,
        /// Print the identity and fragments as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mount navigation into every HTML page of a built site
    Mount {
        /// Root directory of the built site
        site_dir: PathBuf,
        /// Report what would change without writing any file
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate the configuration and summarize the link table
    Check,
    /// Print a stock docs-nav.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // -v forces debug, otherwise RUST_LOG or warn
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Render { url_path, json } => {
            let navigator = load_navigator(&cli.config)?;
            let fragments = navigator.render(&url_path);
            if json {
                println!("{}", serde_json::to_string_pretty(&fragments)?);
            } else {
                output::print_render_output(&fragments);
            }
        }
        Command::Mount { site_dir, dry_run } => {
            let navigator = load_navigator(&cli.config)?;
            println!("==> Mounting navigation into {}", site_dir.display());
            let report = site::mount_site(&site_dir, &navigator, &MountOptions { dry_run })?;
            output::print_site_report(&report, dry_run);
            let failed = report.count(PageStatus::Failed);
            if failed > 0 {
                return Err(format!("{failed} of {} pages failed", report.pages.len()).into());
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let navigator = load_navigator(&cli.config)?;
            output::print_table_summary(navigator.table());
            println!("==> Configuration is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_navigator(path: &std::path::Path) -> Result<Navigator, config::ConfigError> {
    let config = config::load_config(path)?;
    Navigator::new(&config)
}
