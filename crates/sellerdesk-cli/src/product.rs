//! Product commands: listing, inspection and the headless editor.
//!
//! `create` and `edit` drive an [`EditorSession`] from a YAML draft file, so
//! they go through the same completeness gate, validation and submission
//! phases as the interactive console.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use sellerdesk_catalog::CatalogClient;
use sellerdesk_core::display::{image_file_stem, nationality_label};
use sellerdesk_core::listing::toggle_status;
use sellerdesk_core::{
    filter_by_name, load_draft_file, AppConfig, DraftFile, ImageFile, ImagePolicy,
};
use sellerdesk_editor::{AttributeResolver, EditorError, EditorSession, ModalMessage};

use crate::connect;

#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// List products, optionally filtered by name
    List {
        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one product as the editor would load it
    Show {
        /// Product id
        id: String,
    },
    /// Flip a product between active and inactive
    Toggle {
        /// Product id
        id: String,
    },
    /// Check a draft file against the completeness gate and schema
    Check {
        #[arg(long)]
        file: PathBuf,
        /// Check against an existing product instead of a new one
        #[arg(long)]
        product: Option<String>,
    },
    /// Create a product from a draft file
    Create {
        #[arg(long)]
        file: PathBuf,
        /// Viewport width used to pick the listing route
        #[arg(long, default_value = "1280")]
        viewport_width: u32,
    },
    /// Apply a draft file to an existing product
    Edit {
        /// Product id
        id: String,
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "1280")]
        viewport_width: u32,
    },
}

pub(crate) async fn run(config: &AppConfig, command: ProductCommands) -> anyhow::Result<()> {
    match command {
        ProductCommands::List { search } => run_list(config, search.as_deref()).await,
        ProductCommands::Show { id } => run_show(config, &id).await,
        ProductCommands::Toggle { id } => run_toggle(config, &id).await,
        ProductCommands::Check { file, product } => {
            run_check(config, &file, product.as_deref()).await
        }
        ProductCommands::Create {
            file,
            viewport_width,
        } => run_submit(config, &file, None, viewport_width).await,
        ProductCommands::Edit {
            id,
            file,
            viewport_width,
        } => run_submit(config, &file, Some(&id), viewport_width).await,
    }
}

async fn run_list(config: &AppConfig, search: Option<&str>) -> anyhow::Result<()> {
    let client = connect(config).await?;
    let items = client.list_products().await?;
    let matches = filter_by_name(&items, search.unwrap_or_default());

    if matches.is_empty() {
        println!("no products found");
        return Ok(());
    }

    println!(
        "{:<26}{:<10}{:<12}{:>10}{:>7}  NAME",
        "ID", "STATUS", "SKU", "PRICE", "STOCK"
    );
    for p in matches {
        println!(
            "{:<26}{:<10}{:<12}{:>10.2}{:>7}  {}",
            p.id, p.status, p.sku, p.price, p.stock, p.name
        );
    }
    Ok(())
}

async fn run_toggle(config: &AppConfig, id: &str) -> anyhow::Result<()> {
    let client = connect(config).await?;
    let mut items = client.list_products().await?;
    let status = toggle_status(&mut items, id)
        .ok_or_else(|| anyhow::anyhow!("product {id} is not in the listing"))?;
    client.set_product_status(id, status).await?;
    println!("{id} is now {status}");
    Ok(())
}

async fn run_show(config: &AppConfig, id: &str) -> anyhow::Result<()> {
    let client = connect(config).await?;
    let session = open_edit(client, id, ImagePolicy::from_app_config(config)).await?;
    let fields = session.fields();
    let placement = session.placement();

    println!(
        "{} ({})",
        fields.name.as_deref().unwrap_or("<unnamed>"),
        nationality_label(&placement.nationality)
    );
    println!("category:  {} / {}", placement.category, placement.subcategory);
    println!("brand:     {}", fields.brand.as_deref().unwrap_or("-"));
    println!("sku:       {}", fields.sku.as_deref().unwrap_or("-"));
    println!("gender:    {}", fields.gender.unwrap_or_default());
    if let Some(price) = fields.price {
        println!("price:     {price}");
    }
    if let Some(discounted) = fields.price_discounted {
        println!("discount:  {discounted}");
    }
    println!("images:");
    for url in session.images().urls() {
        println!("  {:<24}{url}", image_file_stem(url));
    }
    println!("variations ({}):", session.profile().field_name());
    for (i, v) in session.variations().iter().enumerate() {
        println!(
            "  [{i}] size={} stock={} {}={} id={}",
            v.size.as_deref().unwrap_or("-"),
            v.stock.map_or_else(|| "-".to_string(), |s| s.to_string()),
            session.profile().field_name(),
            v.descriptor(session.profile()).unwrap_or("-"),
            v.id.as_deref().unwrap_or("-"),
        );
    }
    println!("progress:  {}", session.progress_label());
    Ok(())
}

async fn run_check(config: &AppConfig, file: &Path, product: Option<&str>) -> anyhow::Result<()> {
    let draft = load_draft_file(file)?;
    let client = connect(config).await?;
    let session = prepare_session(config, client, draft, product).await?;

    println!("progress: {}", session.progress_label());
    match session.check() {
        Ok(_) => {
            println!("draft is ready to submit");
            Ok(())
        }
        Err(err) => {
            print_modal(&err.to_modal());
            Err(err.into())
        }
    }
}

async fn run_submit(
    config: &AppConfig,
    file: &Path,
    product: Option<&str>,
    viewport_width: u32,
) -> anyhow::Result<()> {
    let draft = load_draft_file(file)?;
    let client = connect(config).await?;
    let mut session = prepare_session(config, client, draft, product).await?;

    match session.submit().await {
        Ok(outcome) => {
            print_modal(&outcome.modal());
            if let Some(id) = &outcome.product_id {
                println!("product id: {id}");
            }
            println!("next: {}", outcome.redirect_route(viewport_width));
            Ok(())
        }
        Err(err) => {
            print_modal(&err.to_modal());
            Err(err.into())
        }
    }
}

/// Opens the right editor flow and applies the draft file to it.
async fn prepare_session(
    config: &AppConfig,
    client: CatalogClient,
    draft: DraftFile,
    product: Option<&str>,
) -> anyhow::Result<EditorSession> {
    let policy = ImagePolicy::from_app_config(config);
    let mut session = match product {
        Some(id) => open_edit(client, id, policy).await?,
        None => {
            let placement = draft.placement.clone().ok_or_else(|| {
                anyhow::anyhow!("draft file needs a `placement` section to create a product")
            })?;
            let mut resolver = AttributeResolver::new();
            EditorSession::open_create(client, &mut resolver, placement, policy).await
        }
    };

    session.apply_draft(draft.product);

    for url in &draft.remove_images {
        if !session.remove_image(url) {
            tracing::warn!(%url, "image to remove is not on the product");
        }
    }

    let files = draft
        .images
        .iter()
        .map(|path| {
            ImageFile::from_path(path)
                .map_err(|e| anyhow::anyhow!("failed to read image {}: {e}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let report = session.accept_images(files);
    for rejected in &report.rejected {
        print_modal(&EditorError::from(rejected.clone()).to_modal());
    }

    Ok(session)
}

async fn open_edit(
    client: CatalogClient,
    id: &str,
    policy: ImagePolicy,
) -> anyhow::Result<EditorSession> {
    let mut resolver = AttributeResolver::new();
    Ok(EditorSession::open_edit(client, &mut resolver, id, policy).await?)
}

fn print_modal(modal: &ModalMessage) {
    println!("[{:?}] {}", modal.kind, modal.title);
    for line in &modal.message {
        println!("  {line}");
    }
}
