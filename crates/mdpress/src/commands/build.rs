//! `mdpress build` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdpress_config::{CliSettings, Config};
use mdpress_site::{BuildConfig, SiteBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// URL prefix for root-relative links, e.g. `/my-repo/` (overrides config).
    #[arg(env = "MDPRESS_BASE_PATH")]
    pub base_path: Option<String>,

    /// Path to configuration file (default: auto-discover mdpress.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Static asset directory (overrides config).
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Page template file (overrides config).
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Enable verbose output (log every generated page and copied asset).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base_path: self.base_path,
            content_dir: self.content_dir,
            static_dir: self.static_dir,
            output_dir: self.output_dir,
            template: self.template,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let paths = config.paths_resolved;

        tracing::info!(
            content_dir = %paths.content_dir.display(),
            output_dir = %paths.output_dir.display(),
            base_path = %config.site.base_path,
            "Building site"
        );

        let output_dir = paths.output_dir.clone();
        let builder = SiteBuilder::new(BuildConfig {
            content_dir: paths.content_dir,
            static_dir: paths.static_dir,
            output_dir: paths.output_dir,
            template: paths.template,
            base_path: config.site.base_path,
        });
        let summary = builder.build()?;

        output.success(&format!(
            "Built {} pages and copied {} assets to {}",
            summary.pages,
            summary.assets,
            output_dir.display()
        ));
        Ok(())
    }
}
