//! Table rendering of the dashboard output.

use common::Money;
use service::{
    domain::{Contract, DamageReport, Payment, Property},
    pricing::Balance,
    query::report::revenue,
};
use tabled::{settings::Style, Table, Tabled};

/// Placeholder of a missing value.
const NONE: &str = "-";

/// Renders the provided `rows` as a [`Table`].
fn render<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    let mut table = Table::new(rows);
    _ = table.with(Style::modern());
    table.to_string()
}

/// Formats the provided [`Money`] for humans.
fn money(amount: Money) -> String {
    amount.to_grouped_string()
}

/// Renders [`Property`]s.
#[must_use]
pub fn properties(properties: &[Property]) -> String {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Address")]
        address: String,
        #[tabled(rename = "Category")]
        category: String,
        #[tabled(rename = "Price")]
        price: String,
        #[tabled(rename = "Status")]
        status: String,
    }

    render(properties.iter().map(|p| Row {
        id: p.id.to_string(),
        name: p.name.to_string(),
        address: p.address.to_string(),
        category: p.category.to_string(),
        price: money(p.price),
        status: p.status.to_string(),
    }))
}

/// Renders [`Contract`]s.
#[must_use]
pub fn contracts(contracts: &[Contract]) -> String {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Property")]
        property: String,
        #[tabled(rename = "Tenant")]
        tenant: String,
        #[tabled(rename = "Period")]
        period: String,
        #[tabled(rename = "Days")]
        days: i64,
        #[tabled(rename = "Deposit")]
        deposit: String,
        #[tabled(rename = "Total")]
        total: String,
        #[tabled(rename = "Status")]
        status: String,
    }

    render(contracts.iter().map(|c| Row {
        id: c.id.to_string(),
        property: c.property_id.to_string(),
        tenant: c.tenant_id.to_string(),
        period: c.period.to_string(),
        days: c.period.days(),
        deposit: money(c.deposit),
        total: money(c.total_price),
        status: c.status.to_string(),
    }))
}

/// Renders [`Payment`]s.
#[must_use]
pub fn payments(payments: &[Payment]) -> String {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Amount")]
        amount: String,
        #[tabled(rename = "Note")]
        note: String,
        #[tabled(rename = "Paid")]
        paid: &'static str,
    }

    render(payments.iter().map(|p| Row {
        id: p.id.to_string(),
        date: p.date.to_string(),
        amount: money(p.amount),
        note: p.note.as_ref().map_or_else(|| NONE.to_owned(), ToString::to_string),
        paid: if p.is_paid { "yes" } else { "no" },
    }))
}

/// Renders [`DamageReport`]s.
#[must_use]
pub fn damage_reports(reports: &[DamageReport]) -> String {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Severity")]
        severity: String,
        #[tabled(rename = "Description")]
        description: String,
        #[tabled(rename = "Repair cost")]
        repair_cost: String,
        #[tabled(rename = "Reported")]
        reported_at: String,
        #[tabled(rename = "Repaired")]
        repaired_at: String,
        #[tabled(rename = "Status")]
        status: String,
    }

    render(reports.iter().map(|r| Row {
        id: r.id.to_string(),
        severity: r.severity.to_string(),
        description: r.description.to_string(),
        repair_cost: money(r.repair_cost),
        reported_at: r.reported_at.to_string(),
        repaired_at: r
            .repaired_at
            .map_or_else(|| NONE.to_owned(), |d| d.to_string()),
        status: r.status.to_string(),
    }))
}

/// Renders a [`Balance`] of a single contract.
#[must_use]
pub fn balance(balance: &Balance) -> String {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Total")]
        total: String,
        #[tabled(rename = "Paid")]
        paid: String,
        #[tabled(rename = "Outstanding")]
        outstanding: String,
    }

    render([Row {
        total: money(balance.total),
        paid: money(balance.paid),
        outstanding: money(balance.outstanding),
    }])
}

/// Renders a revenue report.
#[must_use]
pub fn revenue(report: &revenue::Output) -> String {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Contract")]
        contract: String,
        #[tabled(rename = "Property")]
        property: String,
        #[tabled(rename = "Period")]
        period: String,
        #[tabled(rename = "Billed")]
        billed: String,
        #[tabled(rename = "Paid")]
        paid: String,
        #[tabled(rename = "Outstanding")]
        outstanding: String,
    }

    let totals = Row {
        contract: "Total".to_owned(),
        property: String::new(),
        period: String::new(),
        billed: money(report.billed),
        paid: money(report.received),
        outstanding: money(report.outstanding),
    };
    render(
        report
            .rows
            .iter()
            .map(|revenue::Row { contract, balance }| Row {
                contract: contract.id.to_string(),
                property: contract.property_id.to_string(),
                period: contract.period.to_string(),
                billed: money(balance.total),
                paid: money(balance.paid),
                outstanding: money(balance.outstanding),
            })
            .chain([totals]),
    )
}

#[cfg(test)]
mod tests {
    use common::Money;
    use service::{
        domain::{contract, Contract},
        pricing::Balance,
        query::report::revenue,
    };

    fn contract(id: i64, total: u32) -> Contract {
        Contract {
            id: id.into(),
            property_id: 1.into(),
            tenant_id: 2.into(),
            period: contract::RentalPeriod::new(
                "2024-01-01".parse().unwrap(),
                "2024-01-05".parse().unwrap(),
            ),
            deposit: Money::ZERO,
            total_price: total.into(),
            status: contract::Status::Active,
        }
    }

    #[test]
    fn groups_money_in_contracts() {
        let table = super::contracts(&[contract(1, 1_250_000)]);

        assert!(table.contains("1,250,000"), "{table}");
        assert!(table.contains("2024-01-01..2024-01-05"), "{table}");
        assert!(table.contains("active"), "{table}");
    }

    #[test]
    fn totals_revenue() {
        let rows = vec![
            revenue::Row {
                contract: contract(1, 1_000_000),
                balance: Balance::of(Money::from(1_000_000_u32), &[]),
            },
            revenue::Row {
                contract: contract(2, 300_000),
                balance: Balance::of(Money::from(300_000_u32), &[]),
            },
        ];
        let table = super::revenue(&revenue::Output {
            rows,
            billed: Money::from(1_300_000_u32),
            received: Money::ZERO,
            outstanding: Money::from(1_300_000_u32),
        });

        let last = table.lines().rev().nth(1).unwrap();
        assert!(last.contains("Total"), "{table}");
        assert!(last.contains("1,300,000"), "{table}");
    }
}
