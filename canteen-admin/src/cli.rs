//! Command line surface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::AdminConfig;
use crate::views::orders::StatusFilter;
use shared::models::{Availability, OrderStatus};

#[derive(Debug, Parser)]
#[command(name = "canteen-admin")]
#[command(about = "Admin dashboard for the canteen ordering backend", version)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "CANTEEN_API_URL")]
    pub api_url: Option<String>,

    /// Directory holding the persisted session
    #[arg(long, global = true, env = "CANTEEN_ADMIN_HOME")]
    pub home: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Environment config with the flags applied on top
    pub fn config(&self) -> AdminConfig {
        self.apply(AdminConfig::from_env())
    }

    pub fn apply(&self, mut config: AdminConfig) -> AdminConfig {
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url.clone());
        }
        if let Some(home) = &self.home {
            config = config.with_home(home.clone());
        }
        if let Some(level) = &self.log_level {
            config = config.with_log_level(level.clone());
        }
        config
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CANTEEN_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the persisted session
    Logout,
    /// Show the logged-in identity
    Whoami,
    /// Show the navigation entries visible to this login
    Nav,
    #[command(subcommand)]
    Canteens(CanteenCommand),
    #[command(subcommand)]
    Companies(CompanyCommand),
    #[command(subcommand)]
    Users(UserCommand),
    #[command(subcommand)]
    Categories(CategoryCommand),
    #[command(subcommand)]
    Subcategories(SubcategoryCommand),
    #[command(subcommand)]
    SubcategoryTypes(SubcategoryTypeCommand),
    #[command(subcommand)]
    MenuItems(MenuItemCommand),
    #[command(subcommand)]
    Orders(OrderCommand),
}

/// Case-insensitive substring filter applied to the listed rows
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    #[arg(long, default_value = "")]
    pub search: String,
}

fn parse_availability(raw: &str) -> Result<Availability, String> {
    raw.parse()
}

fn parse_status(raw: &str) -> Result<OrderStatus, String> {
    let lowered = raw.trim().to_ascii_lowercase();
    OrderStatus::ALL
        .into_iter()
        .find(|s| s.as_backend() == lowered)
        .ok_or_else(|| format!("unknown status '{raw}' (expected ordered|preparing|completed|cancelled)"))
}

fn parse_filter(raw: &str) -> Result<StatusFilter, String> {
    raw.parse()
}

#[derive(Debug, Subcommand)]
pub enum CanteenCommand {
    List(SearchArgs),
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
        /// Manager login email
        #[arg(long)]
        manager: String,
        #[arg(long)]
        phone: String,
        #[arg(long, hide_env_values = true, env = "CANTEEN_MANAGER_PASSWORD")]
        password: String,
        #[arg(long)]
        slug: String,
        #[arg(long, default_value = "active", value_parser = parse_availability)]
        status: Availability,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        manager: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, value_parser = parse_availability)]
        status: Option<Availability>,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CompanyCommand {
    List(SearchArgs),
    /// List the roles offered by the create form
    Roles,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, hide_env_values = true, env = "COMPANY_PASSWORD")]
        password: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        employees: String,
        #[arg(long)]
        restaurants: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        role: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    List(SearchArgs),
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, hide_env_values = true, env = "USER_PASSWORD")]
        password: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        empid: String,
        #[arg(long)]
        address: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    List(SearchArgs),
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "active", value_parser = parse_availability)]
        status: Availability,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_availability)]
        status: Option<Availability>,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum SubcategoryCommand {
    List(SearchArgs),
    /// List the subtype picker options
    Types,
    Create {
        #[arg(long = "type-id")]
        type_id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        price: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long, default_value = "")]
        counter: String,
        #[arg(long)]
        unavailable: bool,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum SubcategoryTypeCommand {
    List,
    Create {
        #[arg(long = "category-id")]
        category_id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long)]
        unavailable: bool,
    },
    Update {
        id: String,
        #[arg(long = "category-id")]
        category_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        available: Option<bool>,
    },
}

/// Menu item fields shared by create and update
#[derive(Debug, Clone, Default, Args)]
pub struct MenuItemFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long = "category-id")]
    pub category_id: Option<String>,
    #[arg(long = "subcategory-id")]
    pub subcategory_id: Option<String>,
    #[arg(long = "canteen-id")]
    pub canteen_id: Option<String>,
    #[arg(long, value_parser = parse_availability)]
    pub status: Option<Availability>,
}

#[derive(Debug, Subcommand)]
pub enum MenuItemCommand {
    List {
        #[arg(long, default_value_t = 0)]
        start: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long, default_value = "")]
        search: String,
    },
    Create(MenuItemFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: MenuItemFields,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    List {
        #[arg(long, default_value = "all", value_parser = parse_filter)]
        status: StatusFilter,
        #[arg(long, default_value = "")]
        search: String,
    },
    Show {
        id: String,
    },
    SetStatus {
        id: String,
        #[arg(value_parser = parse_status)]
        status: OrderStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "canteen-admin",
            "--api-url",
            "http://127.0.0.1:4000",
            "orders",
            "list",
            "--status",
            "preparing",
        ])
        .unwrap();
        let config = cli.apply(AdminConfig::default());
        assert_eq!(config.client.base_url, "http://127.0.0.1:4000");
        match cli.command {
            Command::Orders(OrderCommand::List { status, .. }) => {
                assert_eq!(status, StatusFilter::Only(OrderStatus::Preparing));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_set_status_parses_any_case() {
        let cli = Cli::try_parse_from(["canteen-admin", "orders", "set-status", "7", "COMPLETED"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Orders(OrderCommand::SetStatus { status: OrderStatus::Completed, .. })
        ));
        assert!(Cli::try_parse_from(["canteen-admin", "orders", "set-status", "7", "lost"]).is_err());
    }
}
