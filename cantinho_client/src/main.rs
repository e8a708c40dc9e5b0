//! Cantinho - command-line front for the point-of-sale backend
//!
//! Signs in, browses the inventory, edits products and records sales
//! against the same backend and session file the desktop app uses.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use cantinho_client::edit::EditForm;
use cantinho_client::formatters::format_currency;
use cantinho_client::listing::{sort_products, SortColumn, SortDirection, SortFilter};
use cantinho_client::models::{PriceTier, ProductQuery};
use cantinho_client::product::ProductDetail;
use cantinho_client::qr_label;
use cantinho_client::sale::{DiscountKind, SaleDraft};
use cantinho_client::session::{ConfirmTokenForm, SignInForm, SignUpForm};
use cantinho_client::{ApiClient, Config, FileStorage, Session, SharedStorage};

/// Cantinho inventory and sales client
#[derive(Parser, Debug)]
#[command(name = "cantinho")]
#[command(version, about, long_about = None)]
struct Args {
    /// Backend base URL (overrides CANTINHO_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file (overrides CANTINHO_STORAGE)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token
    Signin {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
    /// Register a new account; a verification code is sent by SMS
    Signup {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
    /// Confirm the SMS verification code
    Verify {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        code: String,
    },
    /// Remove the stored session token
    Signout,
    /// List inventory, one page at a time
    List {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Page size (defaults to CANTINHO_PAGE_SIZE)
        #[arg(long)]
        step: Option<u32>,
        #[arg(long)]
        sort: Option<SortArg>,
        #[arg(long, default_value_t = false)]
        desc: bool,
        #[arg(long, default_value_t = false)]
        with_deleted: bool,
    },
    /// Show one product with its profit projection
    Show { sku: String },
    /// Change product fields; omitted fields keep their value
    Edit {
        sku: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        buy: Option<String>,
        #[arg(long)]
        sell: Option<String>,
        #[arg(long)]
        cash: Option<String>,
        #[arg(long)]
        inventory: Option<String>,
    },
    /// Soft-delete a product
    Delete { sku: String },
    /// Restore a soft-deleted product
    Reactivate { sku: String },
    /// Record a sale
    Sell {
        sku: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
        /// Charge the cash price instead of the card price
        #[arg(long, default_value_t = false)]
        cash: bool,
        /// Discount per unit; a percentage unless --value is given
        #[arg(short, long, default_value = "")]
        discount: String,
        #[arg(long, default_value_t = false)]
        value: bool,
    },
    /// Save the product's QR label as a PNG
    Qr {
        sku: String,
        /// Target directory (defaults to <pictures>/Cantinho)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Quantity,
    Buy,
    Sell,
}

impl From<SortArg> for SortColumn {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Quantity => SortColumn::Quantity,
            SortArg::Buy => SortColumn::BuyPrice,
            SortArg::Sell => SortColumn::SellPrice,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to read .env: {e}");
        }
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(url) = args.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    if let Some(path) = args.storage {
        config.storage_path = path;
    }
    log::debug!("Using backend {} and session file {}", config.api_url, config.storage_path.display());

    let storage: SharedStorage = Arc::new(FileStorage::new(&config.storage_path));
    let api = ApiClient::new(&config.api_url, storage.clone());
    let mut session = Session::load(storage);

    let needs_session = !matches!(
        args.command,
        Command::Signin { .. } | Command::Signup { .. } | Command::Verify { .. } | Command::Signout
    );
    if needs_session && !session.is_signed_in() {
        bail!("Nenhuma sessão ativa. Use `cantinho signin` primeiro.");
    }

    match args.command {
        Command::Signin { phone, password } => {
            session.sign_in(&api, &SignInForm { phone, password }).await?;
            println!("Sessão iniciada.");
        }
        Command::Signup { phone, password } => {
            let form = SignUpForm {
                phone,
                confirm_password: password.clone(),
                password,
            };
            session.sign_up(&api, &form).await?;
            println!("Cadastro realizado. Confirme o código enviado por SMS com `cantinho verify`.");
        }
        Command::Verify { phone, code } => {
            session.expect_confirmation(&phone);
            session.confirm_token(&api, &ConfirmTokenForm { code }).await?;
            println!("Telefone verificado, sessão iniciada.");
        }
        Command::Signout => {
            session.sign_out();
            println!("Sessão encerrada.");
        }
        Command::List {
            search,
            page,
            step,
            sort,
            desc,
            with_deleted,
        } => {
            let query = ProductQuery {
                search,
                page: page.max(1),
                step: step.unwrap_or(config.page_size).max(1),
                with_deleted,
            };
            let mut products = api
                .list_products(&query)
                .await
                .context("Failed to list products")?;
            if let Some(column) = sort {
                let direction = if desc {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                sort_products(
                    &mut products,
                    SortFilter {
                        column: column.into(),
                        direction,
                    },
                );
            }
            if products.is_empty() {
                println!("Nenhum item encontrado.");
            }
            for p in &products {
                println!(
                    "{:<16} {:<32} {:>6} {:>12} {:>12}{}",
                    p.sku,
                    p.name,
                    p.inventory,
                    format_currency(p.buy_price),
                    format_currency(p.sell_price),
                    if p.is_deleted() { "  (excluído)" } else { "" }
                );
            }
        }
        Command::Show { sku } => {
            let product = api.get_product(&sku).await.context("Erro ao carregar este item.")?;
            print_detail(&ProductDetail::new(&product));
        }
        Command::Edit {
            sku,
            name,
            buy,
            sell,
            cash,
            inventory,
        } => {
            let product = api.get_product(&sku).await.context("Erro ao carregar este item.")?;
            let mut form = EditForm::from_product(&product);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(buy) = buy {
                form.buy_price = buy;
            }
            if let Some(sell) = sell {
                form.sell_price = sell;
            }
            if let Some(cash) = cash {
                form.sell_price_cash = cash;
            }
            if let Some(inventory) = inventory {
                form.inventory = inventory;
            }
            let update = form.to_update()?;
            api.update_product(&sku, &update)
                .await
                .context("Failed to update product")?;
            println!("Item atualizado com sucesso!");
        }
        Command::Delete { sku } => {
            api.delete_product(&sku).await.context("Failed to delete product")?;
            println!("Item {sku} excluído.");
        }
        Command::Reactivate { sku } => {
            api.reactivate_product(&sku)
                .await
                .context("Failed to reactivate product")?;
            println!("Item {sku} reativado.");
        }
        Command::Sell {
            sku,
            quantity,
            cash,
            discount,
            value,
        } => {
            let product = api.get_product(&sku).await.context("Erro ao carregar este item.")?;
            let mut draft = SaleDraft::new(product)?;
            draft.set_quantity(quantity)?;
            if cash {
                draft.set_tier(PriceTier::Cash);
            }
            if value {
                draft.set_kind(DiscountKind::Value);
            }
            draft.set_discount(&discount)?;
            if let Some(warning) = draft.warning() {
                log::warn!("{}", warning);
            }
            let request = draft.sale_request()?;
            let summary = draft.summary();
            api.sell(&sku, &request).await.context("Failed to record sale")?;
            println!(
                "Vendido! {} x {} ({}) por {}",
                summary.quantity,
                draft.product().name,
                draft.tier().label(),
                format_currency(summary.total_discounted)
            );
        }
        Command::Qr { sku, out } => {
            let product = api.get_product(&sku).await.context("Erro ao carregar este item.")?;
            let dir = out.unwrap_or_else(qr_label::default_label_dir);
            let path = qr_label::export_label(&api, &product, &dir)
                .await
                .context("Failed to export QR label")?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn print_detail(detail: &ProductDetail) {
    println!("{} ({})", detail.name, detail.sku);
    println!("  Estoque:     {}", detail.inventory);
    println!("  Criado em:   {}", detail.created_at);
    if let Some(updated) = &detail.updated_at {
        println!("  Atualizado:  {updated}");
    }
    println!("  Compra:      {}", detail.buy_price);
    for tier in [&detail.card, &detail.cash] {
        println!(
            "  {:<12} {} (lucro {} / {})",
            format!("{}:", tier.tier.label()),
            tier.price,
            tier.profit_percentage,
            tier.profit_value
        );
    }
    if detail.deleted {
        println!("  Item excluído");
    }
}
