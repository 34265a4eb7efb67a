use std::path::PathBuf;

use super::*;

#[test]
fn parses_account_command() {
    let cli = Cli::try_parse_from(["sellerdesk", "account"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Account));
}

#[test]
fn parses_attributes_command() {
    let cli = Cli::try_parse_from(["sellerdesk", "attributes", "cat-1"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Attributes { ref category } if category == "cat-1"
    ));
}

#[test]
fn command_is_required() {
    assert!(Cli::try_parse_from(["sellerdesk"]).is_err());
}

#[test]
fn product_list_search_is_optional() {
    let cli = Cli::try_parse_from(["sellerdesk", "product", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Product {
            command: ProductCommands::List { search: None }
        }
    ));

    let cli =
        Cli::try_parse_from(["sellerdesk", "product", "list", "--search", "camiseta"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Product {
            command: ProductCommands::List { search: Some(ref s) }
        } if s == "camiseta"
    ));
}

#[test]
fn product_show_takes_id() {
    let cli = Cli::try_parse_from(["sellerdesk", "product", "show", "p1"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Product {
            command: ProductCommands::Show { ref id }
        } if id == "p1"
    ));
}

#[test]
fn product_toggle_takes_id() {
    let cli = Cli::try_parse_from(["sellerdesk", "product", "toggle", "p1"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Product {
            command: ProductCommands::Toggle { ref id }
        } if id == "p1"
    ));
}

#[test]
fn product_check_requires_file() {
    assert!(Cli::try_parse_from(["sellerdesk", "product", "check"]).is_err());

    let cli =
        Cli::try_parse_from(["sellerdesk", "product", "check", "--file", "draft.yaml"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Product {
            command: ProductCommands::Check { ref file, product: None }
        } if *file == PathBuf::from("draft.yaml")
    ));
}

#[test]
fn product_create_defaults_to_desktop_viewport() {
    let cli =
        Cli::try_parse_from(["sellerdesk", "product", "create", "--file", "draft.yaml"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Product {
            command: ProductCommands::Create {
                viewport_width: 1280,
                ..
            }
        }
    ));
}

#[test]
fn product_edit_takes_id_and_file() {
    let cli = Cli::try_parse_from([
        "sellerdesk",
        "product",
        "edit",
        "p1",
        "--file",
        "draft.yaml",
        "--viewport-width",
        "390",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Product {
            command: ProductCommands::Edit {
                ref id,
                viewport_width: 390,
                ..
            }
        } if id == "p1"
    ));
}
