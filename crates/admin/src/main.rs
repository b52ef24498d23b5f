use admin::{
    api::{DynCouponApi, HttpCouponApi, NewCoupon},
    store::{CouponStore, DeleteOutcome},
    view::render_table,
};
use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::Confirm;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DELETE_PROMPT: &str = "Are you sure you want to delete this coupon?";

#[derive(Parser)]
#[command(name = "coupon-admin")]
#[command(about = "Manage storefront coupons from the terminal", long_about = None)]
struct Cli {
    /// Base URL of the storefront API
    #[arg(long, env = "STOREFRONT_API_URL", default_value = "http://localhost:3001")]
    api_url: String,

    /// Super admin access token, sent as the accessToken cookie
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    token: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every coupon (default)
    List,
    /// Delete a coupon, then show the refreshed list
    Delete {
        /// Id of the coupon to delete
        id: Uuid,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Create a new coupon
    Create {
        #[arg(long)]
        code: String,

        /// Discount in percent (1-100)
        #[arg(long)]
        discount: i32,

        /// First valid day, YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,

        /// Day the coupon expires, YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,

        /// Maximum number of uses
        #[arg(long)]
        limit: i32,
    },
}

fn print_list(store: &CouponStore) {
    if store.is_loading() {
        return;
    }
    println!("{}", style("All Coupons").cyan().bold());
    println!("{}", render_table(store.coupons(), Utc::now()));
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = Arc::new(HttpCouponApi::new(&cli.api_url, &cli.token)) as DynCouponApi;
    let mut store = CouponStore::new(api);

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => {
            store
                .fetch_all_coupons()
                .await
                .context("Failed to fetch coupons")?;
            print_list(&store);
        }
        Commands::Delete { id, yes } => {
            store
                .fetch_all_coupons()
                .await
                .context("Failed to fetch coupons")?;
            print_list(&store);

            if let Some(coupon) = store.find(id) {
                println!("\n{} {}", style("Selected:").bold(), coupon.code);
            }

            let outcome = store
                .confirm_and_delete(id, || {
                    yes || Confirm::new()
                        .with_prompt(DELETE_PROMPT)
                        .default(false)
                        .interact()
                        .unwrap_or(false)
                })
                .await;

            match outcome {
                DeleteOutcome::Declined => {
                    println!("{}", style("Nothing deleted").dim());
                }
                DeleteOutcome::Deleted => {
                    println!("{} Coupon deleted successfully", style("✓").green());
                    print_list(&store);
                }
                DeleteOutcome::Failed(message) => {
                    eprintln!("{} {message}", style("Error:").red().bold());
                    std::process::exit(1);
                }
            }
        }
        Commands::Create {
            code,
            discount,
            start,
            end,
            limit,
        } => {
            if end <= start {
                bail!("--end must be after --start");
            }

            let coupon = NewCoupon {
                code,
                discount_percent: discount,
                start_date: start.and_time(NaiveTime::MIN).and_utc(),
                end_date: end.and_time(NaiveTime::MIN).and_utc(),
                usage_limit: limit,
            };

            let created = store
                .create_coupon(&coupon)
                .await
                .context("Failed to create coupon")?;
            println!(
                "{} Coupon {} created successfully",
                style("✓").green(),
                created.code
            );

            store
                .fetch_all_coupons()
                .await
                .context("Failed to fetch coupons")?;
            print_list(&store);
        }
    }

    Ok(())
}
