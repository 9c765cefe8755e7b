use catalog_cache::{Config, InventoryStatus, Product, ProductCache, ProductDraft};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use color_eyre::{eyre::eyre, Result};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(about = "Manage products through the catalog cache")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/catalog-cache/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// API root URL, overrides the config file
  #[arg(long)]
  api_url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Fetch and print all products
  List,
  /// Create a product
  Create {
    /// Product name
    #[arg(long)]
    name: String,
    /// Product code; generated when omitted
    #[arg(long)]
    code: Option<String>,
    #[command(flatten)]
    fields: FieldArgs,
  },
  /// Change fields of an existing product
  Update {
    id: i64,
    #[arg(long)]
    name: Option<String>,
    #[command(flatten)]
    fields: FieldArgs,
  },
  /// Delete a product
  Delete { id: i64 },
}

#[derive(ClapArgs, Debug)]
struct FieldArgs {
  #[arg(long)]
  description: Option<String>,
  #[arg(long)]
  category: Option<String>,
  #[arg(long)]
  price: Option<f64>,
  #[arg(long)]
  quantity: Option<i32>,
  #[arg(long, value_enum)]
  status: Option<StatusArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
  InStock,
  LowStock,
  OutOfStock,
}

impl From<StatusArg> for InventoryStatus {
  fn from(status: StatusArg) -> Self {
    match status {
      StatusArg::InStock => InventoryStatus::InStock,
      StatusArg::LowStock => InventoryStatus::LowStock,
      StatusArg::OutOfStock => InventoryStatus::OutOfStock,
    }
  }
}

impl FieldArgs {
  fn apply_to(self, product: &mut Product) {
    if let Some(description) = self.description {
      product.description = Some(description);
    }
    if let Some(category) = self.category {
      product.category = Some(category);
    }
    if let Some(price) = self.price {
      product.price = price;
    }
    if let Some(quantity) = self.quantity {
      product.quantity = quantity;
    }
    if let Some(status) = self.status {
      product.inventory_status = status.into();
    }
  }
}

fn print_json(value: &impl Serialize) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  // Before logging, so --help and usage errors touch nothing on disk
  let args = Args::parse();
  let _log_guard = catalog_cache::logging::init()?;

  // Load configuration
  let mut config = Config::load(args.config.as_deref())?;
  if let Some(url) = args.api_url {
    config.api.url = url;
  }

  let cache = ProductCache::from_config(&config)?;

  match args.command {
    Command::List => {
      let products = cache.fetch_all().await?;
      tracing::info!(source = ?cache.source(), "Listed products");
      print_json(&products)?;
    }
    Command::Create { name, code, fields } => {
      let draft = ProductDraft {
        code,
        description: fields.description,
        category: fields.category,
        price: fields.price,
        quantity: fields.quantity,
        inventory_status: fields.status.map(Into::into),
        ..ProductDraft::new(name)
      };
      let product = cache.create(draft).await?;
      print_json(&product)?;
    }
    Command::Update { id, name, fields } => {
      cache.fetch_all().await?;
      let mut product = cache
        .subscribe()
        .get(id)
        .ok_or_else(|| eyre!("Product {} not found", id))?;

      if let Some(name) = name {
        product.name = name;
      }
      fields.apply_to(&mut product);

      let updated = cache.update(&product).await?;
      print_json(&updated)?;
    }
    Command::Delete { id } => {
      cache.delete(id).await?;
      println!("Deleted product {}", id);
    }
  }

  Ok(())
}
