use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info, Instrument};

use cart_store::{
    setup_tracing, CartConfig, CartSystem, MutationOutcome, ProductId, TracingNotifier,
    UpdateProductAmount,
};

/// Drive the storefront cart from the command line.
#[derive(Debug, Parser)]
#[command(name = "cart-demo", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add one unit of each product
    Add { ids: Vec<u64> },
    /// Remove products from the cart
    Remove { ids: Vec<u64> },
    /// Set the amount of a product
    Update {
        id: u64,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Print the cart
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let config = CartConfig::from_env().context("loading configuration")?;
    info!(api_url = %config.api_url, storage = %config.storage_path.display(), "Starting cart session");

    let system = CartSystem::from_config(&config, Arc::new(TracingNotifier))
        .context("starting cart system")?;
    let client = system.cart_client.clone();

    let mut outcomes = Vec::new();
    match cli.command.unwrap_or(Command::Show) {
        Command::Add { ids } => {
            for id in ids {
                let span = tracing::info_span!("add", product_id = id);
                outcomes.push(client.add_product(ProductId(id)).instrument(span).await?);
            }
        }
        Command::Remove { ids } => {
            for id in ids {
                outcomes.push(client.remove_product(ProductId(id)).await?);
            }
        }
        Command::Update { id, amount } => {
            let update = UpdateProductAmount { product_id: ProductId(id), amount };
            outcomes.push(client.update_product_amount(update).await?);
        }
        Command::Show => {}
    }

    for outcome in &outcomes {
        if let MutationOutcome::Rejected(e) = outcome {
            error!(error = %e, "Cart mutation rejected");
        }
    }

    let cart = client.cart();
    for item in cart.items() {
        println!("{:>4}  {:<40} {:>3} x {:>9.2} = {:>10.2}", item.id, item.title, item.amount, item.price, item.subtotal());
    }
    println!("{} item(s), total {:.2}", cart.len(), cart.total());

    drop(client);
    system.shutdown().await.map_err(anyhow::Error::msg)?;
    Ok(())
}
