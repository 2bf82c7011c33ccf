use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};

use catalog_admin::api::activity_api::ActivityApi;
use catalog_admin::api::product_api::ProductApi;
use catalog_admin::config::Settings;
use catalog_admin::models::schema_model::{load_schema, FieldSchema, FieldType, FieldValue};
use catalog_admin::services::activity_service::ActivityService;
use catalog_admin::services::dashboard_service::DashboardService;
use catalog_admin::services::form_service::{CreateOutcome, FormService, ProductForm, UpdateOutcome};
use catalog_admin::services::list_service::{ListService, StatusFilter};

#[derive(Parser)]
#[command(name = "catalog-admin", about = "Admin console for the product catalog API", version)]
struct Cli {
    /// Base URL of the catalog API (overrides configuration)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the key-metrics dashboard
    Dashboard,
    /// Browse the product list page by page
    Products {
        /// Page to open
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Availability filter
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Case-insensitive name or category search
        #[arg(long)]
        search: Option<String>,
    },
    /// Create a product by filling the schema form
    Add,
    /// Update an existing product, looked up by its name field
    Edit,
    /// Delete a product by name
    Delete {
        /// Product name; prompted for when omitted
        name: Option<String>,
    },
    /// Show the activity log
    Activities,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    /// Only products in stock
    InStock,
    /// Only products out of stock
    OutOfStock,
}

impl From<StatusArg> for StatusFilter {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::InStock => StatusFilter::InStock,
            StatusArg::OutOfStock => StatusFilter::OutOfStock,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;

    let level = settings.log_level.parse().unwrap_or(Level::WARN);
    tracing_subscriber::fmt().with_max_level(level).init();

    let base_url = cli.api_url.unwrap_or_else(|| settings.api_base_url.clone());
    let schema_path = PathBuf::from(&settings.schema_path);
    info!("Using catalog API at {}", base_url);

    match cli.command {
        Command::Dashboard => run_dashboard(&base_url).await,
        Command::Products {
            page,
            status,
            search,
        } => run_products(&base_url, page, status, search).await,
        Command::Add => run_add(&base_url, &schema_path).await,
        Command::Edit => run_edit(&base_url, &schema_path).await,
        Command::Delete { name } => run_delete(&base_url, &schema_path, name).await,
        Command::Activities => run_activities(&base_url).await,
    }
}

async fn run_dashboard(base_url: &str) -> anyhow::Result<()> {
    let service = DashboardService::new(ProductApi::new(base_url));
    let metrics = service.fetch_metrics().await?;
    println!("Key Metrics");
    println!("  Total Products       {}", metrics.total_products);
    println!("  Total Sales          {:.2}", metrics.total_sales);
    println!("  Average Order Value  {:.2}", metrics.average_order_value);
    Ok(())
}

async fn run_products(
    base_url: &str,
    page: usize,
    status: Option<StatusArg>,
    search: Option<String>,
) -> anyhow::Result<()> {
    let mut list = ListService::new(ProductApi::new(base_url));

    // Initial load, then apply command-line filters the way the view
    // would: each change resets to page 1 and refetches.
    list.refresh().await?;
    if let Some(status) = status {
        list.set_status_filter(Some(status.into())).await?;
    }
    if let Some(term) = search {
        list.set_search_term(term).await?;
    }
    if page > 1 {
        list.go_to_page(page).await?;
    }

    loop {
        render_products(&list);
        let command = prompt("[n]ext [p]rev [f]ilter [s]earch <page#> [q]uit: ")?;
        match command.trim() {
            "n" => list.next_page().await?,
            "p" => list.previous_page().await?,
            "f" => {
                let choice = prompt("Filter: [i]n stock, [o]ut of stock, [a]ll: ")?;
                let filter = match choice.trim() {
                    "i" => Some(StatusFilter::InStock),
                    "o" => Some(StatusFilter::OutOfStock),
                    _ => None,
                };
                list.set_status_filter(filter).await?;
            }
            "s" => {
                let term = prompt("Search (empty clears): ")?;
                list.set_search_term(term).await?;
            }
            "q" | "" => break,
            other => {
                if let Ok(target) = other.parse::<usize>() {
                    list.go_to_page(target).await?;
                }
            }
        }
    }
    Ok(())
}

fn render_products(list: &ListService) {
    let state = list.state();
    println!();
    println!(
        "{:<20} {:<14} {:<12} {:>10} {:>10} {:<12} {:>4}",
        "Name", "Category", "Brand", "Price", "Sale", "Status", "Qty"
    );
    for product in list.products() {
        println!(
            "{:<20} {:<14} {:<12} {:>10.2} {:>10.2} {:<12} {:>4}",
            product.name,
            product.category,
            product.brand,
            product.price,
            product.sale_price,
            product.availability(),
            product.quantity
        );
    }
    if list.products().is_empty() {
        println!("(no products on this page match the filters)");
    }
    let pager: Vec<String> = state
        .pages()
        .iter()
        .map(|p| {
            if *p == state.page() {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect();
    println!(
        "Page {} of {}  {}",
        state.page(),
        state.total_pages(),
        pager.join(" ")
    );
    if let Some(filter) = state.status_filter() {
        println!("Filter: {}", filter.label());
    }
    if !state.search_term().is_empty() {
        println!("Search: {}", state.search_term());
    }
}

async fn run_add(base_url: &str, schema_path: &Path) -> anyhow::Result<()> {
    let mut form = build_form(schema_path)?;
    println!("New product");
    fill_form(&mut form)?;
    let service = FormService::new(ProductApi::new(base_url));
    match service.submit_create(&mut form).await {
        CreateOutcome::Created => println!("Product created."),
        CreateOutcome::Invalid => {
            println!("The form has errors:");
            print_form_errors(&form);
        }
        // The failure already went to the log.
        CreateOutcome::Failed => {}
    }
    Ok(())
}

async fn run_edit(base_url: &str, schema_path: &Path) -> anyhow::Result<()> {
    let mut form = build_form(schema_path)?;
    println!("Edit product (looked up by the name field)");
    fill_form(&mut form)?;
    let service = FormService::new(ProductApi::new(base_url));
    let outcome = service.submit_update(&mut form).await;
    if let Some(alert) = outcome.alert() {
        println!("{}", alert);
    }
    if outcome == UpdateOutcome::Invalid {
        println!("The form has errors:");
        print_form_errors(&form);
    }
    Ok(())
}

async fn run_delete(
    base_url: &str,
    schema_path: &Path,
    name: Option<String>,
) -> anyhow::Result<()> {
    let mut form = build_form(schema_path)?;
    let name = match name {
        Some(name) => name,
        None => prompt("Product name: ")?,
    };
    form.set_value("name", FieldValue::Text(name));
    let service = FormService::new(ProductApi::new(base_url));
    let outcome = service
        .delete(&mut form, |name| {
            confirm(&format!(
                "Are you sure you want to delete product \"{}\"?",
                name
            ))
        })
        .await;
    if let Some(alert) = outcome.alert() {
        println!("{}", alert);
    }
    Ok(())
}

async fn run_activities(base_url: &str) -> anyhow::Result<()> {
    let service = ActivityService::new(ActivityApi::new(base_url));
    let activities = service.fetch_activities().await?;
    if activities.is_empty() {
        println!("No activity recorded.");
        return Ok(());
    }
    println!(
        "{:<24} {:<16} {:<16} {}",
        "Timestamp", "Name", "Action", "Details"
    );
    for activity in &activities {
        println!(
            "{:<24} {:<16} {:<16} {}",
            activity.timestamp, activity.name, activity.action, activity.details
        );
    }
    Ok(())
}

fn build_form(schema_path: &Path) -> anyhow::Result<ProductForm> {
    let schema = load_schema(schema_path).with_context(|| {
        format!("Failed to load form schema from {}", schema_path.display())
    })?;
    Ok(ProductForm::from_schema(&schema))
}

/// Prompt for every schema field in order. Checkboxes ask yes/no, all
/// other fields take the line verbatim.
fn fill_form(form: &mut ProductForm) -> anyhow::Result<()> {
    let fields: Vec<FieldSchema> = form
        .fields()
        .iter()
        .map(|field| field.schema().clone())
        .collect();
    for schema in fields {
        let value = match schema.field_type {
            FieldType::Checkbox => {
                let answer = prompt(&format!("{} [y/N]: ", schema.display_label()))?;
                FieldValue::Bool(is_yes(&answer))
            }
            _ => {
                let suffix = if schema.required { " (required)" } else { "" };
                FieldValue::Text(prompt(&format!("{}{}: ", schema.display_label(), suffix))?)
            }
        };
        form.set_value(&schema.name, value);
    }
    Ok(())
}

fn print_form_errors(form: &ProductForm) {
    for field in form.fields() {
        if let Some(error) = field.visible_error() {
            println!("  {}: {}", field.schema().display_label(), error);
        }
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

fn confirm(question: &str) -> bool {
    match prompt(&format!("{} [y/N] ", question)) {
        Ok(answer) => is_yes(&answer),
        Err(_) => false,
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
