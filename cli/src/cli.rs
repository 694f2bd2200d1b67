use clap::{Args, Parser, Subcommand};

use catalog_core::ListQuery;

#[derive(Debug, Parser)]
#[command(name = "catalog")]
#[command(about = "Browse and edit products and articles on the catalog API")]
pub struct Cli {
    /// API endpoint. Overrides CATALOG_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub resource: Resource,
}

#[derive(Debug, Subcommand)]
pub enum Resource {
    /// Product operations
    #[command(subcommand)]
    Products(ProductCommand),

    /// Article operations
    #[command(subcommand)]
    Articles(ArticleCommand),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub page: Option<u64>,

    #[arg(long)]
    pub page_size: Option<u64>,

    /// Sort order, e.g. recent, favorite (products) or like (articles)
    #[arg(long)]
    pub order_by: Option<String>,

    #[arg(long)]
    pub keyword: Option<String>,
}

impl From<ListArgs> for ListQuery {
    fn from(args: ListArgs) -> Self {
        ListQuery {
            page: args.page,
            page_size: args.page_size,
            order_by: args.order_by,
            keyword: args.keyword,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// List products
    List(ListArgs),

    /// Fetch one product
    Get { id: String },

    /// Create a product
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        price: f64,

        /// Repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Repeatable
        #[arg(long = "image")]
        images: Vec<String>,
    },

    /// Update some fields of a product
    Patch {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        /// Replaces all tags. Repeatable
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,

        /// Replaces all images. Repeatable
        #[arg(long = "image")]
        images: Option<Vec<String>>,
    },

    /// Delete a product
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum ArticleCommand {
    /// List articles
    List(ListArgs),

    /// Fetch one article
    Get { id: String },

    /// Create an article
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        #[arg(long)]
        writer: String,

        #[arg(long)]
        image: String,
    },

    /// Update some fields of an article
    Patch {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        writer: Option<String>,

        #[arg(long)]
        image: Option<String>,
    },

    /// Delete an article
    Delete { id: String },
}
