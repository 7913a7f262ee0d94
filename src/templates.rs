use log::info;
use tera::Tera;

/// Load every template under `dir`.
pub fn load(dir: &str) -> tera::Result<Tera> {
    let glob = format!("{}/**/*", dir.trim_end_matches('/'));
    let templates = Tera::new(&glob)?;
    info!(
        "Loaded {} templates from {}",
        templates.get_template_names().count(),
        dir
    );
    Ok(templates)
}
