//! Account and category lookups.

use sellerdesk_core::AppConfig;

use crate::connect;

pub(crate) async fn run_account(config: &AppConfig) -> anyhow::Result<()> {
    let client = sellerdesk_catalog::CatalogClient::from_app_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))?;
    let detail = client.account_detail().await?;
    println!("shop id:   {}", detail.shop_info.id);
    if let Some(name) = &detail.shop_info.name {
        println!("shop name: {name}");
    }
    Ok(())
}

/// Prints the attributes of `category` and the form profile they imply.
pub(crate) async fn run_attributes(config: &AppConfig, category: &str) -> anyhow::Result<()> {
    let client = connect(config).await?;
    let attributes = client.category_attributes(category).await?;

    if attributes.is_empty() {
        println!("category {category} declares no attributes (profile: color)");
        return Ok(());
    }

    let profile = sellerdesk_core::AttributeProfile::from_attributes(&attributes);
    println!("{:<16}{:<12}LABEL", "NAME", "TYPE");
    for attr in &attributes {
        println!(
            "{:<16}{:<12}{}",
            attr.name,
            attr.kind.as_deref().unwrap_or("-"),
            attr.label.as_deref().unwrap_or("")
        );
    }
    println!("profile: {}", profile.field_name());
    Ok(())
}
