use std::future::Future;

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use poultry_ops::{
    auth::{Screen, ViewSet},
    breeds::REPORT_BREEDS,
    config::{self, ClientConfig},
    errors::{ClientError, ClientResult, ErrorAction},
    models::{
        LoginCredentials, Order, StockBatch, Transaction, TransactionType, VendorSignup,
    },
    services::{
        ledger::LedgerSummary, AdminOrderForm, DeliveryForm, Ledger, OrderBoard, OrderTab,
        ReportDraft, SortBy, StockFilter, StockForm, StockSummary, TransactionDraft,
        VendorOrderForm,
    },
    validation, AppContext,
};
use serde::Serialize;
use tracing::debug;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        render_failure(&err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let context = CliContext::initialize()?;

    match cli.command {
        Commands::Auth(command) => handle_auth_command(&context, command, cli.json).await,
        Commands::Stock(command) => handle_stock_command(&context, command, cli.json).await,
        Commands::Orders(command) => handle_orders_command(&context, command, cli.json).await,
        Commands::Vendor(command) => handle_vendor_command(&context, command, cli.json).await,
        Commands::Ledger(command) => handle_ledger_command(&context, command, cli.json).await,
        Commands::Report(command) => handle_report_command(&context, command, cli.json).await,
    }
}

#[derive(Parser)]
#[command(name = "poultry", about = "Poultry farm CLI for stock, orders and vendor reports", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON when available"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    Auth(AuthCommands),
    #[command(subcommand)]
    Stock(StockCommands),
    #[command(subcommand)]
    Orders(OrdersCommands),
    #[command(subcommand)]
    Vendor(VendorCommands),
    #[command(subcommand)]
    Ledger(LedgerCommands),
    #[command(subcommand)]
    Report(ReportCommands),
}

#[derive(Subcommand)]
enum AuthCommands {
    Login(AuthLoginArgs),
    Signup(AuthSignupArgs),
    Logout,
    Whoami,
    /// Show which screens the stored session is dispatched to
    Route,
}

#[derive(Args)]
struct AuthLoginArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
}

#[derive(Args)]
struct AuthSignupArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    phone: String,
}

#[derive(Subcommand)]
enum StockCommands {
    List,
    Summary(StockSummaryArgs),
    /// Add a batch, or correct it in place when the batch code already exists
    Upsert(StockUpsertArgs),
}

#[derive(Args)]
struct StockSummaryArgs {
    /// Breed label to show instead of the overall total
    #[arg(long)]
    breed: Option<String>,
}

#[derive(Args)]
struct StockUpsertArgs {
    #[arg(long)]
    batch_code: String,
    #[arg(long)]
    hens: String,
    #[arg(long)]
    weight: String,
    #[arg(long)]
    breed: String,
}

#[derive(Subcommand)]
enum OrdersCommands {
    List(OrdersListArgs),
    Place(OrdersPlaceArgs),
    Assign(OrdersAssignArgs),
    Reject(OrdersRejectArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TabArg {
    Pending,
    Processed,
}

impl From<TabArg> for OrderTab {
    fn from(value: TabArg) -> Self {
        match value {
            TabArg::Pending => OrderTab::Pending,
            TabArg::Processed => OrderTab::Processed,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderByArg {
    Quantity,
    Weight,
}

impl From<OrderByArg> for poultry_ops::models::OrderKind {
    fn from(value: OrderByArg) -> Self {
        match value {
            OrderByArg::Quantity => poultry_ops::models::OrderKind::Quantity,
            OrderByArg::Weight => poultry_ops::models::OrderKind::Weight,
        }
    }
}

#[derive(Args)]
struct OrdersListArgs {
    #[arg(long, value_enum, default_value = "pending")]
    tab: TabArg,
}

#[derive(Args)]
struct OrdersPlaceArgs {
    #[arg(long)]
    vendor_name: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    shop_name: String,
    #[arg(long)]
    address: String,
    #[arg(long, value_enum, default_value = "quantity")]
    by: OrderByArg,
    /// Head count or kilograms, depending on --by
    #[arg(long)]
    value: String,
    /// Code of the stock batch to order from
    #[arg(long)]
    batch_code: String,
}

#[derive(Args)]
struct OrdersAssignArgs {
    id: i64,
    #[arg(long)]
    vehicle: String,
    #[arg(long)]
    driver: String,
    #[arg(long)]
    driver_phone: String,
    #[arg(long)]
    final_weight: String,
    /// Defaults to the ordered head count for orders placed by quantity
    #[arg(long)]
    final_quantity: Option<String>,
    #[arg(long)]
    price_per_kg: String,
}

#[derive(Args)]
struct OrdersRejectArgs {
    id: i64,
}

#[derive(Subcommand)]
enum VendorCommands {
    Batches(VendorBatchesArgs),
    Order(VendorOrderArgs),
    History(VendorHistoryArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    Recent,
    Size,
    Available,
}

impl From<SortArg> for SortBy {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Recent => SortBy::Recent,
            SortArg::Size => SortBy::SizeDesc,
            SortArg::Available => SortBy::AvailableDesc,
        }
    }
}

#[derive(Args)]
struct VendorBatchesArgs {
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, value_enum, default_value = "recent")]
    sort: SortArg,
}

#[derive(Args)]
struct VendorOrderArgs {
    batch_id: i64,
    #[arg(long, value_enum, default_value = "quantity")]
    by: OrderByArg,
    #[arg(long)]
    quantity: Option<String>,
    #[arg(long)]
    weight: Option<String>,
    #[arg(long)]
    vendor_name: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    shop_name: String,
    #[arg(long)]
    address: String,
    /// YYYY-MM-DD
    #[arg(long)]
    delivery_date: String,
}

#[derive(Args)]
struct VendorHistoryArgs {
    /// Falls back to the phone carried by the session token
    #[arg(long)]
    phone: Option<String>,
}

#[derive(Subcommand)]
enum LedgerCommands {
    List,
    Summary,
    /// Validate and preview a new entry against the sample ledger
    Add(LedgerAddArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Debit,
    Credit,
}

#[derive(Args)]
struct LedgerAddArgs {
    #[arg(long)]
    date: String,
    #[arg(long)]
    particular: String,
    #[arg(long, default_value = "")]
    ref_no: String,
    #[arg(long, value_enum, default_value = "debit")]
    kind: KindArg,
    /// Computed from --weight and --rate when omitted
    #[arg(long)]
    amount: Option<String>,
    #[arg(long, default_value = "")]
    vehicle_no: String,
    #[arg(long, default_value = "")]
    birds: String,
    #[arg(long, default_value = "")]
    weight: String,
    #[arg(long, default_value = "")]
    rate: String,
}

#[derive(Subcommand)]
enum ReportCommands {
    Submit(ReportSubmitArgs),
    List,
    Breeds,
}

#[derive(Args)]
struct ReportSubmitArgs {
    #[arg(long)]
    farm_name: String,
    #[arg(long)]
    reporter_name: String,
    #[arg(long)]
    reporter_phone: String,
    #[arg(long)]
    location: String,
    #[arg(long, default_value = "")]
    notes: String,
    #[arg(long, action = ArgAction::SetTrue)]
    payment_collected: bool,
    /// Breed count as `id=qty`, repeatable
    #[arg(long = "breed", value_parser = parse_key_value)]
    breeds: Vec<(String, String)>,
    /// Set every breed to 10 before applying --breed
    #[arg(long, action = ArgAction::SetTrue)]
    all_breeds: bool,
    /// Photo URI, repeatable
    #[arg(long = "image")]
    images: Vec<String>,
}

struct CliContext {
    app: AppContext,
}

impl CliContext {
    fn initialize() -> Result<Self> {
        let config = config::load_config().context("failed to load client config")?;
        config::init_tracing(config.log_level(), config.log_json);
        Self::from_config(config)
    }

    fn from_config(config: ClientConfig) -> Result<Self> {
        let app = AppContext::new(config).context("failed to build client")?;
        debug!(target: "poultry_cli", client = ?app.client, "client ready");
        Ok(Self { app })
    }

    /// Fails unless the stored session is dispatched to a view set that shows `screen`.
    async fn require_screen(&self, screen: Screen) -> Result<ViewSet> {
        let view_set = self.app.auth().view_set().await;
        if view_set.allows(screen) {
            return Ok(view_set);
        }
        match view_set {
            ViewSet::Unauthenticated => bail!("not logged in; run `poultry auth login` first"),
            other => bail!("Access denied: the {} view has no {} screen", other, screen),
        }
    }
}

/// Runs a fetch, giving up if Ctrl-C arrives first.
async fn interruptible<T>(fut: impl Future<Output = ClientResult<T>>) -> Result<T> {
    tokio::select! {
        result = fut => Ok(result?),
        _ = tokio::signal::ctrl_c() => Err(anyhow!("interrupted")),
    }
}

async fn handle_auth_command(context: &CliContext, command: AuthCommands, json: bool) -> Result<()> {
    let service = context.app.auth();
    match command {
        AuthCommands::Login(args) => {
            let outcome = service
                .login(LoginCredentials {
                    username: args.username,
                    password: args.password,
                })
                .await
                .context("login failed")?;
            if json {
                print_json(&outcome)?;
            } else {
                println!("Logged in as {}", outcome.username);
                render_view_set(outcome.view_set);
                if outcome.view_set == ViewSet::Unauthenticated {
                    println!("Token carries no recognised role; nothing to show.");
                }
            }
            Ok(())
        }
        AuthCommands::Signup(args) => {
            service
                .signup(VendorSignup {
                    username: args.username,
                    email: args.email,
                    password: args.password,
                    phone: args.phone,
                })
                .await
                .context("signup failed")?;
            println!("Account created. Please log in.");
            Ok(())
        }
        AuthCommands::Logout => {
            service.logout().await.context("failed to clear session")?;
            println!("Logged out.");
            Ok(())
        }
        AuthCommands::Whoami => {
            let session = context.app.session().load().await?;
            let claims = service.current_claims().await.ok().flatten();
            if json {
                print_json(&serde_json::json!({
                    "username": session.as_ref().map(|s| s.username.clone()),
                    "savedAt": session.as_ref().map(|s| s.saved_at),
                    "claims": claims,
                }))?;
                return Ok(());
            }
            match session {
                Some(session) => {
                    println!("User: {}", session.username);
                    println!("Logged in at: {}", session.saved_at.to_rfc3339());
                    if let Some(claims) = claims {
                        if !claims.roles.is_empty() {
                            println!("Roles: {}", claims.roles.join(", "));
                        }
                        if let Some(phone) = claims.contact_phone() {
                            println!("Contact: {}", phone);
                        }
                    }
                }
                None => println!("Not logged in."),
            }
            Ok(())
        }
        AuthCommands::Route => {
            let view_set = service.view_set().await;
            if json {
                print_json(&serde_json::json!({
                    "viewSet": view_set,
                    "screens": view_set.views(),
                    "landing": view_set.landing(),
                }))?;
            } else {
                render_view_set(view_set);
            }
            Ok(())
        }
    }
}

async fn handle_stock_command(context: &CliContext, command: StockCommands, json: bool) -> Result<()> {
    context.require_screen(Screen::Dashboard).await?;
    let service = context.app.stock();

    match command {
        StockCommands::List => {
            let batches = interruptible(service.fetch_stock())
                .await
                .context("failed to fetch stock")?;
            if json {
                print_json(&batches)?;
            } else {
                println!("{} batch(es)", batches.len());
                for batch in &batches {
                    render_batch(batch);
                }
            }
            Ok(())
        }
        StockCommands::Summary(args) => {
            let batches = interruptible(service.fetch_stock())
                .await
                .context("failed to fetch stock")?;
            let summary = StockSummary::from_batches(&batches);
            let filter: StockFilter = args.breed.as_deref().unwrap_or("all").parse()?;
            if json {
                print_json(&serde_json::json!({
                    "summary": summary,
                    "selected": summary.display(&filter),
                }))?;
            } else {
                render_stock_summary(&summary, &filter);
            }
            Ok(())
        }
        StockCommands::Upsert(args) => {
            let existing = interruptible(service.fetch_stock())
                .await
                .context("failed to fetch stock")?;
            let form = StockForm {
                batch_code: args.batch_code,
                hens: args.hens,
                weight: args.weight,
                breed: args.breed,
            };
            let write = service
                .upsert_stock(&form, &existing)
                .await
                .context("failed to save stock")?;
            if json {
                print_json(&write)?;
            } else {
                println!("{}", write);
            }
            Ok(())
        }
    }
}

async fn handle_orders_command(context: &CliContext, command: OrdersCommands, json: bool) -> Result<()> {
    context.require_screen(Screen::Vendors).await?;
    let service = context.app.orders();

    match command {
        OrdersCommands::List(args) => {
            let board = interruptible(service.list_orders())
                .await
                .context("failed to fetch orders")?;
            let tab = OrderTab::from(args.tab);
            let orders = board.tab(tab);
            if json {
                print_json(&orders)?;
            } else {
                println!("{} {} order(s)", orders.len(), tab);
                for order in orders {
                    render_order(order);
                }
            }
            Ok(())
        }
        OrdersCommands::Place(args) => {
            let batches = interruptible(context.app.stock().fetch_stock())
                .await
                .context("failed to fetch stock")?;
            let batch = batches
                .iter()
                .find(|b| b.has_code(&args.batch_code))
                .ok_or_else(|| anyhow!("no batch with code {}", args.batch_code))?;

            let mut form = AdminOrderForm {
                vendor_name: args.vendor_name,
                phone: args.phone,
                shop_name: args.shop_name,
                address: args.address,
                order_by: args.by.into(),
                order_value: args.value,
                batch: None,
            };
            form.select_batch(batch);

            let request = service
                .place_order(&form)
                .await
                .context("failed to place order")?;
            if json {
                print_json(&request)?;
            } else {
                println!(
                    "Order placed for {} from batch {} ({})",
                    request.vendor_name,
                    request.batch_code,
                    form.request()
                );
            }
            Ok(())
        }
        OrdersCommands::Assign(args) => {
            let board = interruptible(service.list_orders())
                .await
                .context("failed to fetch orders")?;
            let order = board
                .find(args.id)
                .ok_or_else(|| anyhow!("order {} not found", args.id))?;

            let mut form = DeliveryForm::for_order(order);
            form.vehicle_number = args.vehicle;
            form.driver_name = args.driver;
            form.driver_phone = args.driver_phone;
            form.final_weight = args.final_weight;
            form.price_per_kg = args.price_per_kg;
            if let Some(quantity) = args.final_quantity {
                form.final_quantity = quantity;
            }

            let request = service
                .assign_delivery(args.id, &form)
                .await
                .with_context(|| format!("failed to assign vehicle to order {}", args.id))?;
            if json {
                print_json(&request)?;
            } else {
                println!(
                    "Vehicle {} assigned to order {} • total ₹{}",
                    request.vehicle_number, args.id, request.total_amount
                );
            }
            Ok(())
        }
        OrdersCommands::Reject(args) => {
            let mut board: OrderBoard = interruptible(service.list_orders())
                .await
                .context("failed to fetch orders")?;
            let order = board.reject(args.id)?;
            if json {
                print_json(order)?;
            } else {
                println!("Order {} marked {} on this board only.", order.id, order.status);
            }
            Ok(())
        }
    }
}

async fn handle_vendor_command(context: &CliContext, command: VendorCommands, json: bool) -> Result<()> {
    let service = context.app.vendor();

    match command {
        VendorCommands::Batches(args) => {
            context.require_screen(Screen::Orders).await?;
            let batches = interruptible(service.available_batches())
                .await
                .context("failed to fetch batches")?;
            let shown = poultry_ops::services::filter_batches(&batches, &args.search, args.sort.into());
            if json {
                print_json(&shown)?;
            } else {
                println!("{} of {} batch(es)", shown.len(), batches.len());
                for batch in shown {
                    render_batch(batch);
                }
            }
            Ok(())
        }
        VendorCommands::Order(args) => {
            context.require_screen(Screen::Orders).await?;
            let batches = interruptible(service.available_batches())
                .await
                .context("failed to fetch batches")?;
            let batch = batches
                .iter()
                .find(|b| b.id == args.batch_id)
                .ok_or_else(|| anyhow!("batch {} is not available", args.batch_id))?;

            let mut form = VendorOrderForm::for_batch(batch)?;
            form.order_by = args.by.into();
            if let Some(quantity) = args.quantity {
                form.quantity = quantity;
            }
            if let Some(weight) = args.weight {
                form.weight = weight;
            }
            form.vendor_name = args.vendor_name;
            form.phone_number = args.phone;
            form.shop_name = args.shop_name;
            form.address = args.address;
            form.delivery_date = args.delivery_date;

            let request = service.place_order(&form).await.context("failed to place order")?;
            if json {
                print_json(&request)?;
            } else {
                println!("Order placed: {} from batch {}", form.request(), request.batch_code);
            }
            Ok(())
        }
        VendorCommands::History(args) => {
            context.require_screen(Screen::History).await?;
            let claims = context.app.auth().current_claims().await.ok().flatten();
            let phone = match args.phone {
                Some(phone) => phone,
                None => poultry_ops::services::resolve_history_phone(claims.as_ref(), ""),
            };

            let orders = interruptible(service.my_orders(&phone)).await?;
            if json {
                print_json(&orders)?;
            } else {
                println!("{} order(s) for {}", orders.len(), phone.trim());
                for order in &orders {
                    render_order(order);
                }
            }
            Ok(())
        }
    }
}

async fn handle_ledger_command(context: &CliContext, command: LedgerCommands, json: bool) -> Result<()> {
    context.require_screen(Screen::Transactions).await?;
    let mut ledger = Ledger::with_sample_entries();

    match command {
        LedgerCommands::List => {
            if json {
                print_json(&ledger.entries())?;
            } else {
                for entry in ledger.entries() {
                    render_transaction(entry);
                }
            }
            Ok(())
        }
        LedgerCommands::Summary => {
            let summary = ledger.summary();
            if json {
                print_json(&summary)?;
            } else {
                render_ledger_summary(&summary);
            }
            Ok(())
        }
        LedgerCommands::Add(args) => {
            let mut draft = TransactionDraft {
                date: args.date,
                particular: args.particular,
                ref_no: args.ref_no,
                kind: match args.kind {
                    KindArg::Debit => TransactionType::Debit,
                    KindArg::Credit => TransactionType::Credit,
                },
                amount: args.amount.unwrap_or_default(),
                vehicle_no: args.vehicle_no,
                birds: args.birds,
                weight: args.weight,
                rate: args.rate,
            };
            if draft.amount.trim().is_empty() {
                draft.autofill_amount();
            }

            let entry = ledger.add(draft)?.clone();
            let summary = ledger.summary();
            if json {
                print_json(&serde_json::json!({ "entry": entry, "summary": summary }))?;
            } else {
                render_transaction(&entry);
                render_ledger_summary(&summary);
                println!("(entries are not persisted)");
            }
            Ok(())
        }
    }
}

async fn handle_report_command(context: &CliContext, command: ReportCommands, json: bool) -> Result<()> {
    let store = context.app.reports();

    match command {
        ReportCommands::Submit(args) => {
            context.require_screen(Screen::Report).await?;
            let mut draft = ReportDraft::new();
            draft.farm_name = args.farm_name;
            draft.reporter_name = args.reporter_name;
            draft.reporter_phone = args.reporter_phone;
            draft.location = args.location;
            draft.notes = args.notes;
            draft.payment_collected = args.payment_collected;
            if args.all_breeds {
                draft.select_all_breeds();
            }
            for (id, qty) in args.breeds {
                if !draft.set_quantity(&id, qty) {
                    bail!("unknown breed '{}'; see `poultry report breeds`", id);
                }
            }
            for image in args.images {
                draft.add_image(image);
            }

            let report = store.submit(draft).await.context("failed to submit report")?;
            if json {
                print_json(&report)?;
            } else {
                println!("Report {} saved to {}", report.id, store.path().display());
                println!("Total birds: {}", report.total_birds());
            }
            Ok(())
        }
        ReportCommands::List => {
            let reports = store.list().await.context("failed to read reports")?;
            if json {
                print_json(&reports)?;
            } else {
                for report in &reports {
                    println!(
                        "- {} • {} • {} • {} birds{}",
                        report.id,
                        report.farm_name,
                        report.created_at.format("%Y-%m-%d %H:%M"),
                        report.total_birds(),
                        if report.payment_collected { " • paid" } else { "" }
                    );
                }
            }
            Ok(())
        }
        ReportCommands::Breeds => {
            if json {
                print_json(&REPORT_BREEDS)?;
            } else {
                for breed in REPORT_BREEDS.iter() {
                    println!("- {:<10} {} ({})", breed.id, breed.name, breed.hint);
                }
            }
            Ok(())
        }
    }
}

fn render_failure(err: &anyhow::Error) {
    let client_error = err.chain().find_map(|e| e.downcast_ref::<ClientError>());

    match client_error {
        Some(ClientError::InvalidForm(errors)) => {
            eprintln!("Please fix the following:");
            for line in validation::describe(errors) {
                eprintln!("  • {}", line);
            }
        }
        Some(client_error) => match client_error.action() {
            ErrorAction::Relogin => {
                eprintln!("Session expired. Please log in again with `poultry auth login`.")
            }
            ErrorAction::Forbidden => eprintln!("Access denied. Check your permissions."),
            ErrorAction::OperationFailed => eprintln!("Error: {}", client_error.user_message()),
        },
        None => eprintln!("Error: {:#}", err),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_view_set(view_set: ViewSet) {
    let screens: Vec<String> = view_set.views().iter().map(|s| s.to_string()).collect();
    println!("View: {} • screens: {}", view_set, screens.join(", "));
}

fn render_batch(batch: &StockBatch) {
    let status = if batch.is_sold_out() {
        "SOLD OUT".to_string()
    } else {
        format!("{:.0}% left", batch.remaining_ratio() * 100.0)
    };
    println!(
        "- #{} {} • {} • {}/{} birds • {} kg • {}",
        batch.id,
        batch.batch_code,
        batch.breed_label(),
        batch.available_hens,
        batch.total_hens,
        batch.weight,
        status
    );
}

fn render_stock_summary(summary: &StockSummary, filter: &StockFilter) {
    let selected = summary.display(filter);
    println!(
        "{}: {} birds • {:.1} kg • avg {:.2} kg/bird",
        filter,
        selected.birds,
        selected.weight,
        selected.average_weight()
    );
    println!("Total hens ever stocked: {}", summary.total_hens);
    for (label, totals) in &summary.breeds {
        println!("  • {:<28} {:>6} birds {:>10.1} kg", label, totals.birds, totals.weight);
    }
}

fn render_order(order: &Order) {
    println!(
        "- #{} {} • {} {} • {} • {} • {} • {}",
        order.id,
        order.order_code,
        order.vendor_name,
        order.shop_name_or_blank(),
        order.breed_or_default(),
        order.request(),
        order.status,
        order.display_date()
    );
    if let Some(fulfillment) = order.fulfillment() {
        println!(
            "  • vehicle {} • driver {} {}",
            fulfillment.vehicle_no,
            fulfillment.driver_name.as_deref().unwrap_or("-"),
            fulfillment.driver_phone.as_deref().unwrap_or("")
        );
        if order.has_billing() {
            println!(
                "  • billed {} kg / {} birds @ ₹{}/kg = ₹{}",
                fulfillment.final_weight.map(|w| w.to_string()).unwrap_or_else(|| "-".into()),
                fulfillment.final_quantity.map(|q| q.to_string()).unwrap_or_else(|| "-".into()),
                fulfillment.price_per_kg.map(|p| p.to_string()).unwrap_or_else(|| "-".into()),
                fulfillment.total_amount.map(|t| t.to_string()).unwrap_or_else(|| "-".into())
            );
        }
    }
}

fn render_transaction(entry: &Transaction) {
    println!(
        "- {} • {} • {}{} • ₹{}",
        entry.date,
        entry.particular,
        entry.kind,
        entry
            .ref_no
            .as_deref()
            .map(|r| format!(" ({r})"))
            .unwrap_or_default(),
        entry.amount
    );
    if let Some(sale) = &entry.sale {
        println!(
            "  • {} • {} birds • {} kg @ {}",
            sale.vehicle_no, sale.birds, sale.weight, sale.rate
        );
    }
}

fn render_ledger_summary(summary: &LedgerSummary) {
    println!(
        "Debit ₹{} • Credit ₹{} • Net ₹{}",
        summary.debit, summary.credit, summary.net
    );
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected id=qty, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err("breed id cannot be empty".to_string());
    }
    Ok((key.to_string(), value.trim().to_string()))
}
