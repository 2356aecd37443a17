use crate::{
    BuildArgs,
    build::{Builder, base_path_from_config},
    config::RootConfig,
};

use super::absolute_config_path;

pub fn run(args: &BuildArgs) -> Result<(), anyhow::Error> {
    // Determine the config file path
    let config_path = absolute_config_path(args.config_file.as_deref())?;

    let config = RootConfig::load_from_arg(Some(config_path.as_path()))?;

    // Get the base path for resolving relative paths
    let base_path = base_path_from_config(&config_path);

    let builder = Builder::new(config, base_path);
    let result = builder.build()?;

    println!(
        "Built site to {} ({} pages, {} asset files, {} stylesheets)",
        result.output_dir.display(),
        result.pages,
        result.assets,
        result.stylesheets
    );

    Ok(())
}
