use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use pno_dashboard::{
    auth::{visible_navigation, Action, Module, NavItem, RbacService, Role},
    config::{self, AppConfig},
    models::work_order::OrderType,
    AnyOrder, Dashboard,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let app_config = config::load_config().context("failed to load configuration")?;
    config::init_tracing(&app_config.log_level, app_config.log_json);
    debug!(environment = %app_config.environment, "configuration ready");

    match cli.command {
        Commands::Permissions(args) => handle_permissions(args, cli.json)?,
        Commands::Nav(args) => handle_nav(args, cli.json)?,
        Commands::Orders(args) => handle_orders(&app_config, args, cli.json)?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(
    name = "pno-cli",
    about = "Inspect roles, menus and orders of the PNO dashboard",
    version
)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Permission table rows for a role
    Permissions(PermissionsArgs),
    /// Menu visible to a role
    Nav(NavArgs),
    /// Demo orders adapted to their specialized views
    Orders(OrdersArgs),
}

#[derive(Args)]
struct PermissionsArgs {
    #[arg(long, help = "Role id, e.g. workshop")]
    role: Role,
    #[arg(long, help = "Limit output to one module id, e.g. prosthesis_orders")]
    module: Option<Module>,
}

#[derive(Args)]
struct NavArgs {
    #[arg(long, help = "Role id, e.g. warehouse")]
    role: Role,
}

#[derive(Args)]
struct OrdersArgs {
    #[arg(long, help = "Role id; defaults to the configured role")]
    role: Option<Role>,
    #[arg(long = "type", help = "Order type id, e.g. repair")]
    order_type: Option<OrderType>,
}

fn handle_permissions(args: PermissionsArgs, json: bool) -> Result<()> {
    let rbac = RbacService::new();
    let rows: Vec<_> = rbac
        .permissions_for(args.role)
        .into_iter()
        .filter(|(module, _)| args.module.map_or(true, |m| m == *module))
        .collect();

    if json {
        let rows: Vec<_> = rows
            .iter()
            .map(|(module, permission)| json!({ "module": module, "permission": permission }))
            .collect();
        return print_json(&json!({ "role": args.role, "permissions": rows }));
    }

    println!("{} ({})", args.role.title(), args.role);
    for (module, permission) in rows {
        let actions: Vec<String> = permission.actions().iter().map(Action::to_string).collect();
        let actions = if actions.is_empty() {
            "-".to_string()
        } else {
            actions.join(", ")
        };
        println!("  {:<24} {}", module.to_string(), actions);
    }
    Ok(())
}

fn handle_nav(args: NavArgs, json: bool) -> Result<()> {
    let menu = visible_navigation(args.role);
    if json {
        return print_json(&menu);
    }

    println!("{} ({})", args.role.title(), args.role);
    for item in &menu {
        render_nav(item, 1);
    }
    Ok(())
}

fn render_nav(item: &NavItem, depth: usize) {
    println!("{}- {} [{}]", "  ".repeat(depth), item.title, item.id);
    for child in &item.children {
        render_nav(child, depth + 1);
    }
}

fn handle_orders(app_config: &AppConfig, args: OrdersArgs, json: bool) -> Result<()> {
    let mut dashboard = Dashboard::from_config(app_config);
    if let Some(role) = args.role {
        dashboard.set_role(role);
    }

    let orders = match args.order_type {
        Some(order_type) => dashboard
            .specialized_of_type(order_type)
            .with_context(|| format!("cannot list {} orders", order_type.code()))?,
        None => dashboard.all_specialized(),
    };

    if json {
        let values = orders
            .iter()
            .map(AnyOrder::to_json)
            .collect::<serde_json::Result<Vec<_>>>()?;
        return print_json(&values);
    }

    if orders.is_empty() {
        println!("No orders visible to {}", dashboard.role());
    }
    for order in &orders {
        render_order(order);
    }
    Ok(())
}

fn render_order(order: &AnyOrder) {
    let common = order.common();
    println!(
        "- {} • {} • {} • {}",
        common.order_number,
        order.order_type(),
        common.client_name,
        common.order_date
    );
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
