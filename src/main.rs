use anyhow::Context;
use clap::{ArgGroup, Parser};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vendor_roster::cli::{self, Prompter};
use vendor_roster::store::{SpreadsheetStore, StoreConfig};

#[derive(Parser)]
#[command(name = "vendor-roster")]
#[command(about = "Keep a clean overview of the vendors of a translation project.")]
#[command(long_about = "Vendor Roster - validated vendor lists per project and source language

Vendors are stored in <ProjectName>_<SourceLang>.xlsx (sheet \"VendorData\")
with the columns Target Language, Vendor, E-mail, CAT Tool, Word Rate, Status.

ACTIONS:
  -a, --add      Add a vendor (interactive)
  -m, --modify   Modify an existing vendor by index (interactive)
  -l, --list     Show the vendors of one project and source language
  -i, --import   Add vendors from a JSON or YAML file

EXAMPLES:
  vendor-roster --add
  vendor-roster --modify --dir ~/projects
  vendor-roster --list --project \"Toyota MM24\" --source English
  vendor-roster --import vendors.json")]
#[command(version)]
#[command(group(ArgGroup::new("action").required(true).args(["add", "modify", "list", "import"])))]
struct Cli {
    /// Add a vendor
    #[arg(short, long)]
    add: bool,

    /// Modify an existing vendor
    #[arg(short, long)]
    modify: bool,

    /// List the vendors of a project (needs --project and --source)
    #[arg(short, long, requires_all = ["project", "source"])]
    list: bool,

    /// Add every vendor described in a JSON (.json) or YAML file
    #[arg(short, long, value_name = "FILE")]
    import: Option<PathBuf>,

    /// Project name, used with --list
    #[arg(short, long)]
    project: Option<String>,

    /// Source language, used with --list
    #[arg(short, long)]
    source: Option<String>,

    /// Print the listing as JSON (column → row index → value)
    #[arg(long, requires = "list")]
    json: bool,

    /// Directory holding the vendor spreadsheets
    #[arg(short, long, env = "VENDOR_ROSTER_DIR", default_value = ".")]
    dir: PathBuf,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "vendor_roster=debug"
    } else {
        "vendor_roster=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = StoreConfig { root: cli.dir };
    let store = SpreadsheetStore::from_config(&config);
    let root = config.root.display().to_string();

    if cli.add {
        let mut prompt = Prompter::new(io::stdin().lock(), io::stdout());
        cli::add(&store, &mut prompt).context("Adding a vendor failed")?;
    } else if cli.modify {
        let mut prompt = Prompter::new(io::stdin().lock(), io::stdout());
        cli::modify(&store, &mut prompt).context("Modifying a vendor failed")?;
    } else if cli.list {
        let (Some(project), Some(source)) = (cli.project, cli.source) else {
            anyhow::bail!("--list needs --project and --source");
        };
        let mut out = io::stdout().lock();
        cli::list(&store, &project, &source, cli.json, &mut out)
            .with_context(|| format!("Listing vendors in {} failed", root))?;
        out.flush()?;
    } else if let Some(file) = cli.import {
        let mut out = io::stdout().lock();
        cli::import(&store, &file, &mut out)
            .with_context(|| format!("Importing {} failed", file.display()))?;
        out.flush()?;
    }

    Ok(())
}
