mod assets;
mod builder;
mod document;
mod fragment;
mod import;
mod nav;
mod paths;
mod render;
mod scan;
mod stylesheet;

pub use builder::{BuildResult, Builder};
pub use paths::{backup_dir, base_path_from_config, resolve_path, staging_dir};
pub use render::PAGE_TEMPLATE;
