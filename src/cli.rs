use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::error::Result;
use crate::render::{ChartConfig, MapConfig};
use crate::service::DatasetSource;

#[derive(Parser, Debug)]
#[command(name = "node-atlas")]
#[command(author = "Node Atlas")]
#[command(version = "0.1.0")]
#[command(about = "Map and ASN chart for crawled network nodes", long_about = None)]
pub struct Args {
    /// TOML configuration file
    #[arg(short = 'c', long = "config", env = "ATLAS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short = 'v', long, env = "ATLAS_VERBOSE", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build nodes.json from the crawler database and GeoIP databases
    Export(ExportArgs),
    /// Write a static site (page, map scene, chart) for a dataset
    Build(BuildArgs),
    /// Serve the page and its data over HTTP
    Serve(ServeArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ExportArgs {
    /// Crawler SQLite database
    #[arg(long, env = "ATLAS_CRAWLER_DB")]
    pub crawler_db: Option<String>,

    /// MaxMind GeoLite2 City database
    #[arg(long, env = "ATLAS_CITY_DB")]
    pub city_db: Option<String>,

    /// MaxMind GeoLite2 ASN database
    #[arg(long, env = "ATLAS_ASN_DB")]
    pub asn_db: Option<String>,

    /// Output file for the dataset
    #[arg(short = 'o', long, env = "ATLAS_NODES_OUT")]
    pub out: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct BuildArgs {
    /// Dataset path or http(s) URL
    #[arg(short = 'n', long, env = "ATLAS_NODES")]
    pub nodes: Option<String>,

    /// Directory the site is written to
    #[arg(short = 'o', long, env = "ATLAS_OUT_DIR")]
    pub out_dir: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct ServeArgs {
    /// Dataset path or http(s) URL
    #[arg(short = 'n', long, env = "ATLAS_NODES")]
    pub nodes: Option<String>,

    /// Listen address
    #[arg(long, env = "ATLAS_HOST")]
    pub host: Option<String>,

    /// Listen port
    #[arg(short = 'p', long, env = "ATLAS_PORT")]
    pub port: Option<u16>,

    /// Directory served under /static
    #[arg(long, env = "ATLAS_STATIC_DIR")]
    pub static_dir: Option<String>,
}

/// What to run, with file configuration and flags merged
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Export {
        crawler_db: PathBuf,
        city_db: PathBuf,
        asn_db: PathBuf,
        out: PathBuf,
    },
    Build {
        nodes: DatasetSource,
        out_dir: PathBuf,
    },
    Serve {
        nodes: DatasetSource,
        host: String,
        port: u16,
        static_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub verbose: bool,
    pub map: MapConfig,
    pub chart: ChartConfig,
    pub task: Task,
}

impl Args {
    /// Load the configuration file (if any) and let flags override it
    pub fn merge_with_config(self) -> Result<Settings> {
        let config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        self.merge(config)
    }

    pub fn merge(self, config: AppConfig) -> Result<Settings> {
        let task = match self.command {
            Command::Export(args) => Task::Export {
                crawler_db: args.crawler_db.unwrap_or(config.export.crawler_db).into(),
                city_db: args.city_db.unwrap_or(config.export.city_db).into(),
                asn_db: args.asn_db.unwrap_or(config.export.asn_db).into(),
                out: args.out.unwrap_or(config.dataset.nodes).into(),
            },
            Command::Build(args) => Task::Build {
                nodes: args.nodes.unwrap_or(config.dataset.nodes).parse()?,
                out_dir: args.out_dir.unwrap_or(config.build.out_dir).into(),
            },
            Command::Serve(args) => Task::Serve {
                nodes: args.nodes.unwrap_or(config.dataset.nodes).parse()?,
                host: args.host.unwrap_or(config.server.host),
                port: args.port.unwrap_or(config.server.port),
                static_dir: args.static_dir.or(config.server.static_dir).map(PathBuf::from),
            },
        };

        Ok(Settings {
            verbose: self.verbose,
            map: config.map,
            chart: config.chart,
            task,
        })
    }
}
