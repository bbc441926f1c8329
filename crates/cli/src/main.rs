use clap::{Parser, Subcommand};
use log::debug;
#[cfg(feature = "catalog-mealdb")]
use mycobrew_core::catalog::MealDbCatalog;
use mycobrew_core::catalog::{Catalog, CatalogProvider, FileCatalog, StaticCatalog};
#[cfg(feature = "mailer-emailjs")]
use mycobrew_core::mailer::EmailJsMailer;
use mycobrew_core::mailer::{ContactError, ContactForm, ContactMailer, MockMailer};
use mycobrew_core::shell::run_shell;
use mycobrew_core::storefront::Storefront;
#[cfg(feature = "catalog-mealdb")]
use mycobrew_core::types::Price;
use mycobrew_core::types::{AppConfig, JsonEnvelope};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use toml::Value;

#[derive(Debug, Parser)]
#[command(
    name = "mycobrew",
    version,
    about = "The mycoBrew menu, basket and contact form in your terminal"
)]
struct Cli {
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    InitConfig {
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    Shell {
        #[arg(long)]
        catalog: Option<String>,
        #[arg(long)]
        mailer: Option<String>,
    },
    Menu {
        #[arg(long)]
        catalog: Option<String>,
    },
    Page {
        path: String,
    },
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        mailer: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Commands::InitConfig { force } = cli.cmd {
        init_config_file(Path::new(".mycobrew.toml"), force)?;
        println!("initialized .mycobrew.toml");
        return Ok(());
    }

    let mut cfg = load_config()?;

    match cli.cmd {
        Commands::InitConfig { .. } => {}
        Commands::Shell { catalog, mailer } => {
            if let Some(source) = catalog {
                cfg.catalog.source = source;
            }
            if let Some(provider) = mailer {
                cfg.contact.provider = provider;
            }
            let storefront = open_storefront(&cfg).await?;
            let mailer = build_mailer(&cfg, |k| std::env::var(k).ok())?;
            run_shell(storefront, mailer).await?;
        }
        Commands::Menu { catalog } => {
            if let Some(source) = catalog {
                cfg.catalog.source = source;
            }
            let mut storefront = open_storefront(&cfg).await?;
            if cli.json {
                print_envelope(
                    "load",
                    "menu loaded",
                    serde_json::to_value(storefront.catalog())?,
                )?;
            } else {
                println!("{}", storefront.navigate("/menu"));
            }
        }
        Commands::Page { path } => {
            let mut storefront = open_storefront(&cfg).await?;
            let body = storefront.navigate(&path);
            if cli.json {
                print_envelope(
                    "render",
                    "page rendered",
                    json!({
                        "path": path,
                        "route": storefront.current_route().to_string(),
                        "body": body,
                    }),
                )?;
            } else {
                println!("{}", storefront.nav());
                println!("{body}");
                println!("{}", storefront.footer());
            }
        }
        Commands::Contact {
            name,
            email,
            message,
            mailer,
        } => {
            if let Some(provider) = mailer {
                cfg.contact.provider = provider;
            }
            let mailer = build_mailer(&cfg, |k| std::env::var(k).ok())?;
            let delivery = mailer
                .send(&ContactForm::new(name, email, message))
                .await
                .map_err(render_contact_error)?;
            if cli.json {
                print_envelope(
                    "send",
                    "message sent",
                    json!({
                        "provider": delivery.provider,
                        "response": delivery.response,
                    }),
                )?;
            } else {
                println!("Your message has been sent!");
            }
        }
    }

    Ok(())
}

fn print_envelope(phase: &str, message: &str, details: serde_json::Value) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonEnvelope {
            status: "ok".to_string(),
            phase: phase.to_string(),
            message: message.to_string(),
            details,
        })?
    );
    Ok(())
}

async fn open_storefront(cfg: &AppConfig) -> anyhow::Result<Storefront> {
    let provider = build_catalog_provider(cfg)?;
    let catalog = Catalog::from_provider(&*provider).await?;
    Ok(Storefront::new(catalog, &cfg.shop))
}

fn request_timeout(cfg: &AppConfig) -> Duration {
    Duration::from_millis(cfg.timeouts.request_ms)
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}

fn build_catalog_provider(cfg: &AppConfig) -> anyhow::Result<Box<dyn CatalogProvider>> {
    let source = cfg.catalog.source.to_ascii_lowercase();
    debug!("catalog source: {source}");
    match source.as_str() {
        "static" => Ok(Box::new(StaticCatalog)),
        "file" => {
            let Some(path) = non_blank(&cfg.catalog.path) else {
                anyhow::bail!("catalog source `file` needs catalog.path to be set");
            };
            Ok(Box::new(FileCatalog::new(path)))
        }
        #[cfg(feature = "catalog-mealdb")]
        "mealdb" => Ok(Box::new(MealDbCatalog::new(
            non_blank(&cfg.catalog.endpoint)
                .unwrap_or_else(|| MealDbCatalog::DEFAULT_ENDPOINT.to_string()),
            Price::try_from(cfg.catalog.default_price)?,
            request_timeout(cfg),
        )?)),
        other => anyhow::bail!("unknown or disabled catalog source `{other}`"),
    }
}

fn build_mailer<F>(cfg: &AppConfig, env_get: F) -> anyhow::Result<Box<dyn ContactMailer>>
where
    F: Fn(&str) -> Option<String>,
{
    let provider = cfg.contact.provider.to_ascii_lowercase();
    debug!("contact provider: {provider}");
    match provider.as_str() {
        "mock" => Ok(Box::new(MockMailer::default())),
        #[cfg(feature = "mailer-emailjs")]
        "emailjs" => Ok(Box::new(EmailJsMailer::new(
            non_blank(&cfg.contact.endpoint)
                .unwrap_or_else(|| EmailJsMailer::DEFAULT_ENDPOINT.to_string()),
            cfg.contact.service_id.clone(),
            cfg.contact.template_id.clone(),
            env_get(&cfg.contact.public_key_env_var),
            cfg.contact.contact_number.clone(),
            request_timeout(cfg),
        )?)),
        other => {
            let _ = env_get;
            anyhow::bail!("unknown or disabled contact provider `{other}`")
        }
    }
}

fn load_config() -> anyhow::Result<AppConfig> {
    let local_path = PathBuf::from(".mycobrew.toml");
    let home_path = std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".mycobrew.toml"));

    let home = match &home_path {
        Some(path) => read_config_value(path)?,
        None => None,
    };
    let local = read_config_value(&local_path)?;

    resolve_config(home, local, |k| std::env::var(k).ok())
}

fn resolve_config<F>(
    home: Option<Value>,
    local: Option<Value>,
    env_get: F,
) -> anyhow::Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut merged = Value::try_from(AppConfig::default())?;
    if let Some(home_value) = home {
        merge_toml(&mut merged, home_value);
    }
    if let Some(local_value) = local {
        merge_toml(&mut merged, local_value);
    }

    let mut cfg: AppConfig = merged.try_into()?;
    apply_env_overrides(&mut cfg, env_get);
    Ok(cfg)
}

fn read_config_value(path: &Path) -> anyhow::Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)?;
    let parsed = raw.parse::<Value>()?;
    Ok(Some(parsed))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_map), Value::Table(overlay_map)) => {
            for (key, value) in overlay_map {
                if let Some(base_value) = base_map.get_mut(&key) {
                    merge_toml(base_value, value);
                } else {
                    base_map.insert(key, value);
                }
            }
        }
        (base_value, overlay_value) => {
            *base_value = overlay_value;
        }
    }
}

fn apply_env_overrides<F>(cfg: &mut AppConfig, env_get: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = env_get("MYCOBREW_CATALOG_SOURCE") {
        cfg.catalog.source = v;
    }
    if let Some(v) = env_get("MYCOBREW_CATALOG_PATH") {
        cfg.catalog.path = Some(v);
    }
    if let Some(v) = env_get("MYCOBREW_CATALOG_ENDPOINT") {
        cfg.catalog.endpoint = Some(v);
    }
    if let Some(v) = env_get("MYCOBREW_DEFAULT_PRICE").and_then(|v| v.parse::<f64>().ok()) {
        cfg.catalog.default_price = v;
    }

    if let Some(v) = env_get("MYCOBREW_CONTACT_PROVIDER") {
        cfg.contact.provider = v;
    }
    if let Some(v) = env_get("MYCOBREW_CONTACT_ENDPOINT") {
        cfg.contact.endpoint = Some(v);
    }
    if let Some(v) = env_get("MYCOBREW_EMAILJS_SERVICE_ID") {
        cfg.contact.service_id = v;
    }
    if let Some(v) = env_get("MYCOBREW_EMAILJS_TEMPLATE_ID") {
        cfg.contact.template_id = v;
    }
    if let Some(v) = env_get("MYCOBREW_PUBLIC_KEY_ENV_VAR") {
        cfg.contact.public_key_env_var = v;
    }

    if let Some(v) = env_get("MYCOBREW_BRAND") {
        cfg.shop.brand = v;
    }
    if let Some(v) = env_get("MYCOBREW_CURRENCY") {
        cfg.shop.currency_symbol = v;
    }

    if let Some(v) = env_get("MYCOBREW_REQUEST_TIMEOUT_MS").and_then(|v| v.parse::<u64>().ok()) {
        cfg.timeouts.request_ms = v;
    }
}

fn init_config_file(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; re-run with --force to overwrite",
            path.display()
        );
    }
    fs::write(path, config_template())?;
    Ok(())
}

fn config_template() -> &'static str {
    r#"# mycobrew configuration
# precedence: CLI > env > local .mycobrew.toml > home ~/.mycobrew.toml > defaults

[catalog]
# source options: static, file, mealdb
source = "static"
# path = "menu.toml"
# endpoint = "https://www.themealdb.com/api/json/v1/1/search.php"
# price used for catalogs without prices (mealdb)
default_price = 4.5

[contact]
# provider options: emailjs, mock
provider = "emailjs"
# endpoint = "https://api.emailjs.com/api/v1.0/email/send"
service_id = "service_ra3g46m"
template_id = "template_oe3wdmz"
# name of the env var holding the EmailJS public key
public_key_env_var = "MYCOBREW_EMAILJS_PUBLIC_KEY"
contact_number = "697483"

[shop]
brand = "mycoBrew"
currency_symbol = "£"

[timeouts]
request_ms = 15000
"#
}

fn render_contact_error(err: ContactError) -> anyhow::Error {
    match err {
        ContactError::Invalid(reason) => anyhow::anyhow!("please fix the form: {reason}"),
        ContactError::Rejected { status, body } => {
            anyhow::anyhow!("Failed to send message (status {status}): {body}")
        }
        other => anyhow::anyhow!(other),
    }
}
