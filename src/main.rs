use clap::{Parser, Subcommand};
use simple_docs::assets::Stage;
use simple_docs::{config, generate, output, route, scan};
use std::path::PathBuf;

/// Shared flags for commands that run the asset pipeline.
#[derive(clap::Args, Clone)]
struct StageArgs {
    /// Configure the asset pipeline for the production stage
    /// (bundles all component stylesheets into one styles.css)
    #[arg(long)]
    production: bool,
}

impl StageArgs {
    fn stage(&self) -> Stage {
        if self.production {
            Stage::Production
        } else {
            Stage::Develop
        }
    }
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "simple-docs")]
#[command(about = "Static site generator for component library documentation")]
#[command(long_about = "\
Static site generator for component library documentation

Your source repositories are the data source. Component doc markdown,
core library examples, and standalone content pages are discovered on
disk, routed to canonical URL paths, and rendered as plain HTML.

Site structure:

  site/
  ├── config.toml                        # Site config (optional)
  ├── sources/react/                     # Component documentation markdown
  │   └── react-core/AboutModal/
  │       └── examples/index.md          # Front-matter: title, section, fullscreen
  ├── sources/core/                      # Core library examples + partials
  │   └── src/patternlib/components/Button/
  │       ├── button.hbs                 # Partial, referenced as {{> button}}
  │       ├── button.css                 # Joins the production styles bundle
  │       └── examples/index.hbs         # Example entry → embed page pair
  └── content/                           # Standalone pages
      └── get-started.md                 # Front-matter `path` is the URL

Derived paths (always lowercase):
  Doc:        /documentation/react/<section>/<component>/
  Fullscreen: /documentation/react/<section>/<category>/<component>/
  Example:    /documentation/core/<type>/<component>  (+ a -full variant)
  Content:    the literal front-matter path

Run 'simple-docs gen-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site directory containing config.toml and the source trees
    #[arg(long, default_value = ".", global = true)]
    site_dir: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate manifests
    #[arg(long, default_value = ".simple-docs-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the source trees into a manifest
    Scan,
    /// Derive the route plan from the scan manifest
    Route,
    /// Render the HTML site from the manifest and route plan
    Generate(StageArgs),
    /// Run the full pipeline: scan → route → generate
    Build(StageArgs),
    /// Validate sources and routes without writing the site
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.site_dir)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(cli.temp_dir.join("manifest.json"), json)?;
            output::print_scan_output(&manifest);
        }
        Command::Route => {
            let manifest = read_manifest(&cli.temp_dir)?;
            let plan = route::route_manifest(&manifest);
            let json = serde_json::to_string_pretty(&plan)?;
            std::fs::write(cli.temp_dir.join("routes.json"), json)?;
            output::print_route_output(&plan);
        }
        Command::Generate(stage_args) => {
            let manifest = read_manifest(&cli.temp_dir)?;
            let plan_content = std::fs::read_to_string(cli.temp_dir.join("routes.json"))?;
            let plan: route::RoutePlan = serde_json::from_str(&plan_content)?;
            let summary = generate::generate(
                &manifest,
                &plan,
                &cli.site_dir,
                &cli.output,
                stage_args.stage(),
            )?;
            output::print_generate_output(&summary);
        }
        Command::Build(stage_args) => {
            std::fs::create_dir_all(&cli.temp_dir)?;

            println!("==> Stage 1: Scanning {}", cli.site_dir.display());
            let manifest = scan::scan(&cli.site_dir)?;
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(cli.temp_dir.join("manifest.json"), json)?;
            output::print_scan_output(&manifest);

            println!("==> Stage 2: Deriving routes");
            let plan = route::route_manifest(&manifest);
            let json = serde_json::to_string_pretty(&plan)?;
            std::fs::write(cli.temp_dir.join("routes.json"), json)?;
            output::print_route_output(&plan);

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            let summary = generate::generate(
                &manifest,
                &plan,
                &cli.site_dir,
                &cli.output,
                stage_args.stage(),
            )?;
            output::print_generate_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.site_dir.display());
            let manifest = scan::scan(&cli.site_dir)?;
            output::print_scan_output(&manifest);
            let plan = route::route_manifest(&manifest);
            output::print_route_output(&plan);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn read_manifest(temp_dir: &std::path::Path) -> Result<scan::Manifest, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(temp_dir.join("manifest.json"))?;
    Ok(serde_json::from_str(&content)?)
}
