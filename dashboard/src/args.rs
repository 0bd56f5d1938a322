//! [`Args`] definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use common::{Date, Money};
use service::domain::{
    contract::{self, RentalType},
    damage_report, payment, property, tenant,
};
use url::Url;

/// Dashboard of the property rental management system.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "dashboard.toml", global = true)]
    pub config: String,

    /// [`Command`] to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Top-level dashboard command.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage properties.
    Properties {
        /// Action to perform.
        #[command(subcommand)]
        action: PropertyAction,
    },

    /// Manage rental contracts.
    Contracts {
        /// Action to perform.
        #[command(subcommand)]
        action: ContractAction,
    },

    /// Manage payments of rental contracts.
    Payments {
        /// Action to perform.
        #[command(subcommand)]
        action: PaymentAction,
    },

    /// Manage damage reports of rental contracts.
    Damages {
        /// Action to perform.
        #[command(subcommand)]
        action: DamageAction,
    },

    /// Report revenue over rental contracts.
    Revenue {
        /// Only report contracts of this property.
        #[arg(long)]
        property: Option<property::Id>,

        /// Only report contracts in this status.
        #[arg(long)]
        status: Option<contract::Status>,
    },
}

/// [`Command::Properties`] action.
#[derive(Debug, Subcommand)]
pub enum PropertyAction {
    /// List properties.
    List {
        /// Only list properties of this category.
        #[arg(long)]
        category: Option<property::Category>,

        /// Lowest unit price to list.
        #[arg(long)]
        min_price: Option<Money>,

        /// Highest unit price to list.
        #[arg(long)]
        max_price: Option<Money>,

        /// Keyword to search in names and addresses.
        #[arg(long)]
        keyword: Option<String>,
    },

    /// Add a new property.
    Add {
        /// Name of the property.
        #[arg(long)]
        name: property::Name,

        /// Address of the property.
        #[arg(long)]
        address: property::Address,

        /// Unit price of the property, per day or per month.
        #[arg(long)]
        price: Money,

        /// Free-form description of the property.
        #[arg(long)]
        description: Option<property::Description>,

        /// Category of the property.
        #[arg(long)]
        category: Option<property::Category>,

        /// URL of the property image.
        #[arg(long)]
        image_url: Option<Url>,
    },

    /// Delete a property.
    Delete {
        /// ID of the property.
        id: property::Id,
    },
}

/// [`Command::Contracts`] action.
#[derive(Debug, Subcommand)]
pub enum ContractAction {
    /// List contracts.
    List {
        /// Only list contracts of this property.
        #[arg(long)]
        property: Option<property::Id>,

        /// Only list contracts in this status.
        #[arg(long)]
        status: Option<contract::Status>,
    },

    /// Quote the total price of renting a property, without signing anything.
    Quote {
        /// ID of the property to rent.
        #[arg(long)]
        property: property::Id,

        /// First day of the rental, like `2024-01-01`.
        #[arg(long)]
        start: Date,

        /// Last day of the rental, like `2024-01-05`.
        #[arg(long)]
        end: Date,

        /// Billing mode of the rental.
        #[arg(long)]
        rental_type: Option<RentalType>,
    },

    /// Sign a new contract.
    Create {
        /// ID of the property to rent.
        #[arg(long)]
        property: property::Id,

        /// E-mail of the tenant.
        #[arg(long)]
        tenant_email: tenant::Email,

        /// First day of the rental, like `2024-01-01`.
        #[arg(long)]
        start: Date,

        /// Last day of the rental, like `2024-01-05`.
        #[arg(long)]
        end: Date,

        /// Deposit paid at signing.
        #[arg(long, default_value = "0")]
        deposit: Money,

        /// Billing mode of the rental.
        #[arg(long)]
        rental_type: Option<RentalType>,
    },

    /// Cancel a contract.
    Cancel {
        /// ID of the contract.
        id: contract::Id,
    },

    /// Show what is paid and what remains to be paid on a contract.
    Balance {
        /// ID of the contract.
        id: contract::Id,
    },

    /// Download the printable contract document.
    Download {
        /// ID of the contract.
        id: contract::Id,

        /// File to write the HTML document to, instead of the standard
        /// output.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// [`Command::Payments`] action.
#[derive(Debug, Subcommand)]
pub enum PaymentAction {
    /// List payments of a contract.
    List {
        /// ID of the contract.
        contract: contract::Id,
    },

    /// Record a new payment.
    Add {
        /// ID of the paid contract.
        #[arg(long)]
        contract: contract::Id,

        /// Paid amount.
        #[arg(long)]
        amount: Money,

        /// Day of the payment, today by default.
        #[arg(long)]
        date: Option<payment::PaymentDate>,

        /// Note of the payment.
        #[arg(long)]
        note: Option<payment::Note>,
    },

    /// Amend an existing payment.
    Edit {
        /// ID of the payment.
        id: payment::Id,

        /// ID of the paid contract.
        #[arg(long)]
        contract: contract::Id,

        /// Paid amount.
        #[arg(long)]
        amount: Money,

        /// Day of the payment.
        #[arg(long)]
        date: payment::PaymentDate,

        /// Note of the payment.
        #[arg(long)]
        note: Option<payment::Note>,
    },

    /// Delete a payment.
    Delete {
        /// ID of the payment.
        id: payment::Id,
    },

    /// Pay the whole remaining balance of a contract.
    TopUp {
        /// ID of the contract.
        contract: contract::Id,

        /// Day of the payment, today by default.
        #[arg(long)]
        date: Option<payment::PaymentDate>,
    },
}

/// [`Command::Damages`] action.
#[derive(Debug, Subcommand)]
pub enum DamageAction {
    /// List damage reports of a contract.
    List {
        /// ID of the contract.
        contract: contract::Id,
    },

    /// Report a new damage.
    Report {
        /// ID of the contract the damage happened under.
        #[arg(long)]
        contract: contract::Id,

        /// Description of the damage.
        #[arg(long)]
        description: damage_report::Description,

        /// Severity of the damage.
        #[arg(long, default_value = "low")]
        severity: damage_report::Severity,

        /// Estimated repair cost.
        #[arg(long, default_value = "0")]
        repair_cost: Money,

        /// Day the damage was reported, today by default.
        #[arg(long)]
        reported_at: Option<damage_report::ReportDate>,
    },

    /// Amend an existing damage report.
    Edit {
        /// ID of the damage report.
        id: damage_report::Id,

        /// ID of the contract the damage happened under.
        #[arg(long)]
        contract: contract::Id,

        /// Description of the damage.
        #[arg(long)]
        description: damage_report::Description,

        /// Severity of the damage.
        #[arg(long)]
        severity: damage_report::Severity,

        /// Estimated repair cost.
        #[arg(long)]
        repair_cost: Money,

        /// Day the damage was reported.
        #[arg(long)]
        reported_at: damage_report::ReportDate,
    },

    /// Mark a damage as repaired.
    Repaired {
        /// ID of the damage report.
        id: damage_report::Id,
    },

    /// Delete a damage report.
    Delete {
        /// ID of the damage report.
        id: damage_report::Id,
    },
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;
    use common::Money;
    use service::domain::{contract::RentalType, damage_report::Severity};

    use super::{
        Args, Command, ContractAction, DamageAction, PaymentAction,
        PropertyAction,
    };

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(
            ["rental-dashboard"].into_iter().chain(args.iter().copied()),
        )
    }

    #[test]
    fn parses_contract_creation() {
        let args = parse(&[
            "contracts",
            "create",
            "--property",
            "3",
            "--tenant-email",
            "khach@thue.com",
            "--start",
            "2024-01-01",
            "--end",
            "2024-02-20",
            "--rental-type",
            "monthly",
        ])
        .unwrap();

        assert_eq!(args.config, "dashboard.toml");
        let Command::Contracts {
            action:
                ContractAction::Create {
                    property,
                    deposit,
                    rental_type,
                    start,
                    end,
                    ..
                },
        } = args.command
        else {
            panic!("unexpected command: {:?}", args.command);
        };
        assert_eq!(property, 3.into());
        assert_eq!(deposit, Money::ZERO);
        assert_eq!(rental_type, Some(RentalType::Monthly));
        assert_eq!(start.days_until(end), 50);
    }

    #[test]
    fn takes_global_config() {
        let args = parse(&["revenue", "--config", "other.toml"]).unwrap();

        assert_eq!(args.config, "other.toml");
        assert!(matches!(
            args.command,
            Command::Revenue {
                property: None,
                status: None,
            },
        ));
    }

    #[test]
    fn parses_grouped_amounts() {
        let args =
            parse(&["payments", "add", "--contract", "1", "--amount", "1_500_000"])
                .unwrap();

        let Command::Payments {
            action: PaymentAction::Add { amount, date, .. },
        } = args.command
        else {
            panic!("unexpected command: {:?}", args.command);
        };
        assert_eq!(amount, Money::from(1_500_000_u32));
        assert!(date.is_none());
    }

    #[test]
    fn defaults_damage_severity() {
        let args = parse(&[
            "damages",
            "report",
            "--contract",
            "1",
            "--description",
            "Broken window",
        ])
        .unwrap();

        assert!(matches!(
            args.command,
            Command::Damages {
                action: DamageAction::Report {
                    severity: Severity::Low,
                    ..
                },
            },
        ));
    }

    #[test]
    fn rejects_invalid_values() {
        for args in [
            &["contracts", "quote", "--property", "1", "--start", "2024-13-01",
              "--end", "2024-12-01"][..],
            &["contracts", "create", "--property", "1", "--tenant-email",
              "not-an-email", "--start", "2024-01-01", "--end", "2024-01-02"],
            &["properties", "add", "--name", " padded", "--address", "1 A",
              "--price", "100"],
            &["properties", "list", "--min-price", "cheap"],
            &["damages", "edit", "1", "--contract", "1", "--description", "x",
              "--severity", "catastrophic", "--repair-cost", "0",
              "--reported-at", "2024-01-01"],
        ] {
            assert!(parse(args).is_err(), "{args:?}");
        }
    }

    #[test]
    fn parses_property_deletion() {
        let args = parse(&["properties", "delete", "7"]).unwrap();

        assert!(matches!(
            args.command,
            Command::Properties {
                action: PropertyAction::Delete { id },
            } if id == 7.into(),
        ));
    }
}
