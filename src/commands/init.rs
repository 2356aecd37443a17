use std::path::PathBuf;

use crate::{
    InitArgs,
    build::PAGE_TEMPLATE,
    config::{IndexLink, OrdinalNaming, RootConfig, SagaConfig, SiteConfig, ThemeConfig},
};

const STARTER_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    {{ head }}
  </head>
  <body>
    {{ body }}
  </body>
</html>
"#;

const STARTER_EPISODE: &str = "<h2>The Beginning</h2>\n<p>Our heroes meet in a tavern.</p>\n";

pub fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        if args.create {
            std::fs::create_dir_all(&path)?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let config_file = path.join("sagasite.yaml");
    if config_file.exists() {
        return Err(anyhow::anyhow!(
            "Refusing to overwrite existing config file {config_file}",
            config_file = config_file.display()
        ));
    }

    let default_config = RootConfig {
        site: SiteConfig {
            name: "My Sagas".into(),
            description: "<p>Session summaries from our campaigns.</p>".into(),
            output: "_site".into(),
            stylesheets: vec!["/style.css".into()],
            atomic: false,
        },
        theme: ThemeConfig {
            path: "theme".into(),
            settings: serde_json::json!({}),
        },
        sagas: vec![SagaConfig {
            name: "First Saga".into(),
            slug: None,
            source: "first-saga".into(),
            description: "Where it all started.".into(),
            fragment: "partial.html".into(),
            naming: OrdinalNaming::Strict,
            index_link: IndexLink::Saga,
        }],
        collections: vec![],
        imports: vec![],
        assets: vec![],
        stylesheets: vec![],
    };

    println!("Initializing project in {}", path.display());

    let config_text = serde_yaml::to_string(&default_config)?;
    std::fs::write(&config_file, config_text)?;
    println!(
        "Created config file {config_file}",
        config_file = config_file.display()
    );

    let starter_files: [(PathBuf, &str); 2] = [
        (
            path.join("theme").join("templates").join(PAGE_TEMPLATE),
            STARTER_PAGE,
        ),
        (
            path.join("first-saga").join("1").join("partial.html"),
            STARTER_EPISODE,
        ),
    ];
    for (file, content) in starter_files {
        if file.exists() {
            continue;
        }
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&file, content)?;
        println!("Created {}", file.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{Builder, base_path_from_config};

    #[test]
    fn test_init_project_builds() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("site");
        run(&InitArgs {
            path: project.clone(),
            create: true,
        })
        .unwrap();

        let config_path = project.join("sagasite.yaml");
        let config = RootConfig::load_from_arg(Some(config_path.as_path())).unwrap();
        let result = Builder::new(config, base_path_from_config(&config_path))
            .build()
            .unwrap();

        // One episode, the saga index and the site index
        assert_eq!(result.pages, 3);
        let episode =
            std::fs::read_to_string(project.join("_site/first-saga/1/index.html")).unwrap();
        assert!(episode.contains("<title>First Saga 1: The Beginning</title>"));
    }

    #[test]
    fn test_init_requires_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&InitArgs {
            path: dir.path().join("missing"),
            create: false,
        })
        .unwrap_err();
        assert!(err.to_string().contains("Directory does not exist"));
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sagasite.yaml"), "site:\n  name: Keep\n").unwrap();
        assert!(
            run(&InitArgs {
                path: dir.path().to_path_buf(),
                create: false,
            })
            .is_err()
        );
        let kept = std::fs::read_to_string(dir.path().join("sagasite.yaml")).unwrap();
        assert_eq!(kept, "site:\n  name: Keep\n");
    }
}
