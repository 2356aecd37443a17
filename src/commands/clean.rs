use crate::{
    CleanArgs,
    build::{backup_dir, base_path_from_config, resolve_path, staging_dir},
    config::RootConfig,
};

use super::absolute_config_path;

pub fn run(args: &CleanArgs) -> Result<(), anyhow::Error> {
    // Determine the config file path
    let config_path = absolute_config_path(args.config_file.as_deref())?;

    let config = RootConfig::load_from_arg(Some(config_path.as_path()))?;

    // Get the base path for resolving relative paths
    let base_path = base_path_from_config(&config_path);

    // Delete the generated site folder and any staging or backup leftovers
    // from an interrupted atomic build
    let site_path = resolve_path(&base_path, &config.site.output);
    for path in [staging_dir(&site_path), backup_dir(&site_path), site_path] {
        if !path.exists() {
            continue;
        }
        if args.dry_run {
            println!("Would delete {}", path.display());
        } else {
            std::fs::remove_dir_all(&path)?;
            println!("Deleted {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_output_and_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("sagasite.yaml");
        std::fs::write(&config_path, "site:\n  name: Tales\n").unwrap();
        let leftovers = ["_site", "_site.staging", "_site.previous"];
        for name in leftovers {
            std::fs::create_dir_all(dir.path().join(name).join("demo")).unwrap();
        }

        run(&CleanArgs {
            config_file: Some(config_path.clone()),
            dry_run: true,
        })
        .unwrap();
        assert!(leftovers.iter().all(|name| dir.path().join(name).exists()));

        run(&CleanArgs {
            config_file: Some(config_path),
            dry_run: false,
        })
        .unwrap();
        assert!(leftovers.iter().all(|name| !dir.path().join(name).exists()));
    }
}
