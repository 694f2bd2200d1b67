//! Command-line front-end for the catalog API.
//!
//! Every subcommand maps to one `CatalogService` call; results are printed
//! as pretty JSON on stdout and the call's log line goes to stderr.

use catalog_core::{
    ArticlePatch, CatalogService, ClientConfig, ListQuery, NewArticle, NewProduct, ProductPatch,
    ResourceId,
};
use clap::Parser;
use eyre::Result;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{ArticleCommand, Cli, ProductCommand, Resource};

/// Structured logging filtered by `RUST_LOG`; defaults to `info`.
fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_products(service: &CatalogService, command: ProductCommand) -> Result<()> {
    match command {
        ProductCommand::List(args) => {
            print_json(&service.get_product_list(&ListQuery::from(args)).await?)
        }
        ProductCommand::Get { id } => {
            print_json(&service.get_product(&ResourceId::from(id)).await?)
        }
        ProductCommand::Create {
            name,
            description,
            price,
            tags,
            images,
        } => {
            let input = NewProduct {
                name,
                description,
                price,
                tags,
                images,
            };
            print_json(&service.create_product(&input).await?)
        }
        ProductCommand::Patch {
            id,
            name,
            description,
            price,
            tags,
            images,
        } => {
            let patch = ProductPatch {
                name,
                description,
                price,
                tags,
                images,
            };
            print_json(&service.patch_product(&ResourceId::from(id), &patch).await?)
        }
        ProductCommand::Delete { id } => {
            let id = ResourceId::from(id);
            service.delete_product(&id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
    }
}

async fn run_articles(service: &CatalogService, command: ArticleCommand) -> Result<()> {
    match command {
        ArticleCommand::List(args) => {
            print_json(&service.get_article_list(&ListQuery::from(args)).await?)
        }
        ArticleCommand::Get { id } => {
            print_json(&service.get_article(&ResourceId::from(id)).await?)
        }
        ArticleCommand::Create {
            title,
            content,
            writer,
            image,
        } => {
            let input = NewArticle {
                title,
                content,
                writer,
                image,
            };
            print_json(&service.create_article(&input).await?)
        }
        ArticleCommand::Patch {
            id,
            title,
            content,
            writer,
            image,
        } => {
            let patch = ArticlePatch {
                title,
                content,
                writer,
                image,
            };
            print_json(&service.patch_article(&ResourceId::from(id), &patch).await?)
        }
        ArticleCommand::Delete { id } => {
            let deleted = service.delete_article(&ResourceId::from(id)).await?;
            print_json(&serde_json::json!({ "deleted": deleted }))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let config = match cli.base_url {
        Some(url) => ClientConfig::with_base_url(url)?,
        None => ClientConfig::from_env()?,
    };
    tracing::debug!(base_url = %config.base_url, "using catalog endpoint");
    let service = CatalogService::new(&config);

    match cli.resource {
        Resource::Products(command) => run_products(&service, command).await,
        Resource::Articles(command) => run_articles(&service, command).await,
    }
}
