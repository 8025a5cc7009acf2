use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use pdsync_core::{LookupKey, ProductUpdateEvent, ShopDomain, SyncOutcome, WebhookVariant};
use pdsync_purpledot::PurpleDotClient;
use pdsync_server::SyncPipeline;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pdsync-cli")]
#[command(about = "Preorder delivery-date metafield sync, run by hand")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one product through the same sync the webhook performs
    Sync {
        /// Numeric product ID
        #[arg(long)]
        product_id: i64,
        /// Product handle used for the preorder lookup
        #[arg(long)]
        handle: String,
        /// Variant SKU, used only when the handle is blank
        #[arg(long)]
        sku: Option<String>,
        /// Shop domain (defaults to SHOPIFY_SHOP_DOMAIN)
        #[arg(long)]
        shop: Option<String>,
    },
    /// Print the delivery date the preorder service reports
    #[command(group(ArgGroup::new("key").required(true).args(["handle", "sku"])))]
    Lookup {
        #[arg(long)]
        handle: Option<String>,
        #[arg(long)]
        sku: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = pdsync_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Sync {
            product_id,
            handle,
            sku,
            shop,
        } => {
            let shop = resolve_shop(shop.as_deref(), config.shopify_shop_domain.as_ref())?;
            let event = ProductUpdateEvent {
                id: product_id,
                handle,
                title: String::new(),
                variants: sku
                    .map(|sku| WebhookVariant {
                        id: None,
                        sku: Some(sku),
                    })
                    .into_iter()
                    .collect(),
            };
            let pipeline = SyncPipeline::from_config(&config)?;
            let outcome = pipeline
                .run(&event, shop.as_ref())
                .await
                .with_context(|| format!("sync failed for product {product_id}"))?;
            tracing::info!(
                product_id,
                shop = ?shop.as_ref().map(ShopDomain::as_str),
                "sync finished"
            );
            println!("{}", describe_outcome(&outcome));
        }
        Commands::Lookup { handle, sku } => {
            let key = lookup_key(handle, sku)?;
            let client = PurpleDotClient::new(
                &config.purple_dot_api_url,
                &config.purple_dot_api_key,
                config.request_timeout_secs,
                &config.user_agent,
            )?;
            let info = client.fetch(&key).await?;
            tracing::info!(lookup = %key, found = info.date().is_some(), "lookup finished");
            println!("{}", info.date().unwrap_or("no preorder data"));
        }
    }

    Ok(())
}

/// `--shop` wins over `SHOPIFY_SHOP_DOMAIN`. Neither is needed when the
/// product turns out to have no preorder date.
fn resolve_shop(
    flag: Option<&str>,
    default_shop: Option<&ShopDomain>,
) -> anyhow::Result<Option<ShopDomain>> {
    match flag {
        Some(raw) => Ok(Some(ShopDomain::parse(raw)?)),
        None => Ok(default_shop.cloned()),
    }
}

fn lookup_key(handle: Option<String>, sku: Option<String>) -> anyhow::Result<LookupKey> {
    match (handle, sku) {
        (Some(handle), _) => Ok(LookupKey::Handle(handle)),
        (None, Some(sku)) => Ok(LookupKey::Sku(sku)),
        (None, None) => anyhow::bail!("one of --handle or --sku is required"),
    }
}

fn describe_outcome(outcome: &SyncOutcome) -> String {
    match outcome {
        SyncOutcome::Skipped(reason) => format!("skipped: {reason}"),
        SyncOutcome::Created(record) => format!(
            "created metafield {} = {}",
            record.id,
            record.value.as_deref().unwrap_or_default()
        ),
        SyncOutcome::Updated(record) => format!(
            "updated metafield {} = {}",
            record.id,
            record.value.as_deref().unwrap_or_default()
        ),
    }
}
