//! Integration tests of the [`Service`] over the REST backend.

use std::time::Duration;

use common::Money;
use serde_json::json;
use service::{
    command::{
        create_contract, delete_property, record_payment, top_up_payment,
        CreateContract, DeleteProperty, MarkDamageRepaired, RecordPayment,
        TopUpPayment,
    },
    domain::{contract, damage_report, property, Property},
    infra::{backend, http, Http},
    pricing,
    query::{self, quote, Quote, Revenue},
    read::property::list::Filter,
    Command as _, Config, Service,
};
use wiremock::{
    matchers::{body_partial_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

async fn service(server: &MockServer) -> Service<Http> {
    let backend = Http::new(&http::Config {
        url: server.uri().parse().unwrap(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();
    Service::new(Config::default(), backend)
}

fn money(amount: i64) -> Money {
    Money::new(amount.into())
}

fn studio(price: f64) -> serde_json::Value {
    json!({
        "id": 1,
        "name": "Studio 12",
        "address": "12 Le Loi, District 1",
        "description": null,
        "price": price,
        "category": "real_estate",
        "image_url": "",
        "status": "available",
        "owner_id": 1,
    })
}

fn contract(id: i64, start: &str, end: &str, total: f64) -> serde_json::Value {
    json!({
        "id": id,
        "property_id": 1,
        "tenant_id": 3,
        "start_date": start,
        "end_date": end,
        "deposit": 0.0,
        "total_price": total,
        "status": "active",
        "created_at": "2024-01-01T10:00:00",
    })
}

fn payment(id: i64, amount: f64) -> serde_json::Value {
    json!({
        "id": id,
        "amount": amount,
        "payment_date": "2024-01-02",
        "note": null,
        "is_paid": true,
    })
}

async fn mount_get(server: &MockServer, at: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn lists_properties_with_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/properties/"))
        .and(query_param("category", "real_estate"))
        .and(query_param("keyword", "Studio"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([studio(100000.0)])),
        )
        .expect(1)
        .mount(&server)
        .await;
    let svc = service(&server).await;

    let properties = svc
        .execute(query::property::List::by(Filter {
            category: property::Category::new("real_estate"),
            keyword: Some("Studio".into()),
            ..Filter::default()
        }))
        .await
        .unwrap();

    assert_eq!(properties.len(), 1);
    let Property {
        price,
        description,
        image_url,
        status,
        ..
    } = &properties[0];
    assert_eq!(*price, money(100_000));
    assert_eq!(*description, None);
    assert_eq!(*image_url, None);
    assert_eq!(*status, property::Status::Available);
}

#[tokio::test]
async fn rejects_malformed_properties() {
    let server = MockServer::start().await;
    mount_get(&server, "/properties/", json!([studio(-5.0)])).await;
    let svc = service(&server).await;

    let err = svc
        .execute(query::property::List::by(Filter::default()))
        .await
        .unwrap_err();

    assert!(
        matches!(
            err.as_ref(),
            backend::Error::Http(http::Error::Malformed(_)),
        ),
        "unexpected error: {err}",
    );
}

#[tokio::test]
async fn quotes_monthly_rent() {
    let server = MockServer::start().await;
    mount_get(&server, "/properties/", json!([studio(1_000_000.0)])).await;
    let svc = service(&server).await;

    let quote::Output { total_price, .. } = svc
        .execute(Quote {
            property_id: 1.into(),
            period: contract::RentalPeriod::new(
                "2024-01-01".parse().unwrap(),
                "2024-02-20".parse().unwrap(),
            ),
            rental_type: Some(contract::RentalType::Monthly),
        })
        .await
        .unwrap();

    assert_eq!(total_price, money(3_000_000));
}

#[tokio::test]
async fn quote_rejects_invalid_period() {
    let server = MockServer::start().await;
    mount_get(&server, "/properties/", json!([studio(100_000.0)])).await;
    let svc = service(&server).await;

    let err = svc
        .execute(Quote {
            property_id: 1.into(),
            period: contract::RentalPeriod::new(
                "2024-01-05".parse().unwrap(),
                "2024-01-01".parse().unwrap(),
            ),
            rental_type: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        quote::ExecutionError::Pricing(pricing::Error::InvalidPeriod(_)),
    ));
}

#[tokio::test]
async fn creates_contract_with_local_quote() {
    let server = MockServer::start().await;
    mount_get(&server, "/properties/", json!([studio(100_000.0)])).await;
    mount_get(&server, "/contracts/", json!([])).await;
    Mock::given(method("POST"))
        .and(path("/contracts/"))
        .and(body_partial_json(json!({
            "property_id": 1,
            "tenant_email": "tenant@example.com",
            "start_date": "2024-01-01",
            "end_date": "2024-01-05",
            "rental_type": "daily",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract(
            9,
            "2024-01-01",
            "2024-01-05",
            400_000.0,
        )))
        .expect(1)
        .mount(&server)
        .await;
    let svc = service(&server).await;

    let create_contract::Output { contract, quote } = svc
        .execute(CreateContract {
            property_id: 1.into(),
            tenant_email: "tenant@example.com".parse().unwrap(),
            period: contract::RentalPeriod::new(
                "2024-01-01".parse().unwrap(),
                "2024-01-05".parse().unwrap(),
            ),
            deposit: Money::ZERO,
            rental_type: None,
        })
        .await
        .unwrap();

    assert_eq!(quote, money(400_000));
    assert_eq!(contract.id, 9.into());
    assert_eq!(contract.total_price, quote);
}

#[tokio::test]
async fn refuses_overlapping_contract() {
    let server = MockServer::start().await;
    mount_get(&server, "/properties/", json!([studio(100_000.0)])).await;
    mount_get(
        &server,
        "/contracts/",
        json!([contract(7, "2024-01-03", "2024-01-10", 700_000.0)]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/contracts/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let svc = service(&server).await;

    let err = svc
        .execute(CreateContract {
            property_id: 1.into(),
            tenant_email: "tenant@example.com".parse().unwrap(),
            period: contract::RentalPeriod::new(
                "2024-01-01".parse().unwrap(),
                "2024-01-05".parse().unwrap(),
            ),
            deposit: Money::ZERO,
            rental_type: Some(contract::RentalType::Daily),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        create_contract::ExecutionError::PeriodOccupied(id)
            if *id == contract::Id::from(7),
    ));
}

#[tokio::test]
async fn maps_property_deletion_conflicts() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/properties/1"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "detail": "property has an active contract",
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/properties/2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "property not found",
        })))
        .mount(&server)
        .await;
    let svc = service(&server).await;

    let err = svc
        .execute(DeleteProperty {
            property_id: 1.into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        delete_property::ExecutionError::PropertyRented(_),
    ));

    let err = svc
        .execute(DeleteProperty {
            property_id: 2.into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        delete_property::ExecutionError::PropertyNotExists(_),
    ));
}

#[tokio::test]
async fn surfaces_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contracts/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "detail": "database is down",
        })))
        .mount(&server)
        .await;
    let svc = service(&server).await;

    let err = svc
        .execute(query::contract::List::by(Default::default()))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("database is down"), "{err}");
}

#[tokio::test]
async fn rejects_non_positive_payment_without_backend() {
    let server = MockServer::start().await;
    let svc = service(&server).await;

    let err = svc
        .execute(RecordPayment {
            contract_id: 1.into(),
            amount: Money::ZERO,
            date: "2024-01-02".parse().unwrap(),
            note: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        record_payment::ExecutionError::InvalidAmount(_),
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn tops_up_remaining_balance() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/contracts/",
        json!([contract(1, "2024-01-01", "2024-01-06", 500_000.0)]),
    )
    .await;
    mount_get(&server, "/contracts/1/payments", json!([payment(1, 200_000.0)]))
        .await;
    Mock::given(method("POST"))
        .and(path("/payments/"))
        .and(body_partial_json(json!({
            "contract_id": 1,
            "amount": 300_000.0,
            "payment_date": "2024-01-20",
            "note": "Top up remaining balance",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(payment(2, 300_000.0)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let svc = service(&server).await;

    let topped = svc
        .execute(TopUpPayment {
            contract_id: 1.into(),
            date: Some("2024-01-20".parse().unwrap()),
        })
        .await
        .unwrap();

    assert_eq!(topped.amount, money(300_000));
    assert_eq!(topped.contract_id, 1.into());
}

#[tokio::test]
async fn does_not_top_up_settled_contract() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/contracts/",
        json!([contract(1, "2024-01-01", "2024-01-06", 500_000.0)]),
    )
    .await;
    mount_get(&server, "/contracts/1/payments", json!([payment(1, 600_000.0)]))
        .await;
    let svc = service(&server).await;

    let err = svc
        .execute(TopUpPayment {
            contract_id: 1.into(),
            date: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        top_up_payment::ExecutionError::NothingOutstanding(_),
    ));
}

#[tokio::test]
async fn reports_revenue_as_received_cash() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/contracts/",
        json!([
            contract(1, "2024-01-01", "2024-02-01", 1_000_000.0),
            contract(2, "2024-03-01", "2024-03-04", 300_000.0),
            contract(3, "2024-04-01", "2024-04-08", 700_000.0),
        ]),
    )
    .await;
    mount_get(
        &server,
        "/contracts/1/payments",
        json!([payment(1, 200_000.0), payment(2, 50_000.0)]),
    )
    .await;
    mount_get(&server, "/contracts/2/payments", json!([payment(3, 400_000.0)]))
        .await;
    mount_get(&server, "/contracts/3/payments", json!([])).await;
    let svc = service(&server).await;

    let report = svc.execute(Revenue::default()).await.unwrap();

    assert_eq!(report.rows.len(), 3);
    assert_eq!(report.received, money(650_000));
    assert_eq!(report.billed, money(2_000_000));
    assert_eq!(report.outstanding, money(750_000 + 700_000));
    assert!(report.rows[1].balance.is_settled());
}

#[tokio::test]
async fn marks_damage_repaired() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/damage-reports/4/mark-repaired"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "contract_id": 1,
            "property_id": 1,
            "description": "Broken window",
            "severity": "medium",
            "repair_cost": 250_000.0,
            "reported_date": "2024-01-03",
            "repaired_date": "2024-01-09",
            "status": "repaired",
        })))
        .expect(1)
        .mount(&server)
        .await;
    let svc = service(&server).await;

    let report = svc
        .execute(MarkDamageRepaired {
            report_id: 4.into(),
        })
        .await
        .unwrap();

    assert!(report.is_repaired());
    assert_eq!(report.severity, damage_report::Severity::Medium);
    assert_eq!(report.repaired_at, Some("2024-01-09".parse().unwrap()));
}

#[tokio::test]
async fn prints_contract_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contracts/1/download"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html>contract #1</html>", "text/html"),
        )
        .mount(&server)
        .await;
    let svc = service(&server).await;

    let document = svc
        .execute(query::contract::Print::by(1.into()))
        .await
        .unwrap();

    assert_eq!(document.html(), "<html>contract #1</html>");
}

#[tokio::test]
async fn selects_property_by_id() {
    let server = MockServer::start().await;
    mount_get(&server, "/properties/", json!([studio(100_000.0)])).await;
    let svc = service(&server).await;

    let found = svc
        .execute(query::property::ById::by(1.into()))
        .await
        .unwrap();
    let missing = svc
        .execute(query::property::ById::by(2.into()))
        .await
        .unwrap();

    assert_eq!(found.map(|p| p.id), Some(property::Id::from(1)));
    assert!(missing.is_none());
}
