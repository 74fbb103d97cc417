use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info, Instrument};

use barber_dispatch::app_system::{setup_tracing, DispatchConfig, DispatchSystem};
use barber_dispatch::auth::Actor;
use barber_dispatch::clock::SystemClock;
use barber_dispatch::domain::{AvailabilityWindow, BarberCreate, CustomerRef, JobStatus, LineItem, OrderCreate, PaymentStatus};
use barber_dispatch::earnings::EarningsPeriod;
use barber_dispatch::notifications::LogNotifier;
use barber_dispatch::DispatchResult;

fn barber(code: &str, name: &str) -> DispatchResult<BarberCreate> {
    let availability = (0..7)
        .map(|day| AvailabilityWindow::parse(day, "00:00", "23:59", true))
        .collect::<DispatchResult<Vec<_>>>()?;
    Ok(BarberCreate {
        code: code.to_string(),
        name: name.to_string(),
        email: Some(format!("{}@barbers.example", code.to_lowercase())),
        phone: None,
        commission_rate: None,
        availability,
        created_at: Utc::now(),
    })
}

/// Walk one order through decline, reassignment and completion.
async fn run_scenario(system: &DispatchSystem) -> DispatchResult<()> {
    let b1 = system.barber_client.create_barber(barber("B1", "Rafi")?).await?;
    let b2 = system.barber_client.create_barber(barber("B2", "Dewi")?).await?;
    info!(%b1, %b2, "Barbers onboarded");

    let order_id = system
        .order_client
        .create_order(OrderCreate {
            order_number: "BK-0001".to_string(),
            items: vec![
                LineItem::new("Haircut", 1, Decimal::new(100_000, 0)),
                LineItem::new("Beard trim", 1, Decimal::new(50_000, 0)),
            ],
            payment_status: PaymentStatus::Pending,
            payment_method: "cash".to_string(),
            customer: CustomerRef {
                customer_id: Some("customer_1".to_string()),
                name: "Budi".to_string(),
                email: Some("budi@example.com".to_string()),
                phone: None,
                location: Some("Jl. Merdeka 10".to_string()),
            },
            created_at: Utc::now(),
        })
        .await?;

    let operator = Actor::operator("operator_1");
    let first = Actor::barber(b1.clone());
    let second = Actor::barber(b2.clone());
    let service = &system.service;

    for id in [&first, &second] {
        service.set_online_status(Some(id), true).await?;
    }
    let eligible = service.find_eligible_barbers(Some(&operator)).await?;
    info!(count = eligible.len(), "Eligible barbers");

    service.assign_barber_to_order(Some(&operator), &order_id, &b1).await?;
    service.decline_order(Some(&first), &order_id, "sick").await?;
    service.assign_barber_to_order(Some(&operator), &order_id, &b2).await?;
    service.accept_order(Some(&second), &order_id).await?;
    for target in [JobStatus::OnTheWay, JobStatus::Arrived, JobStatus::Completed] {
        service.advance_order(Some(&second), &order_id, target).await?;
    }

    if let Err(e) = service.advance_order(Some(&second), &order_id, JobStatus::OnTheWay).await {
        info!(error = %e, "Completed order rejected a further transition as expected");
    }

    service
        .record_review(Some(&Actor::customer("customer_1")), &order_id, 5)
        .await?;

    let earnings = service.get_earnings(Some(&second), EarningsPeriod::Today).await?;
    info!(
        total = %earnings.total_earnings,
        orders = earnings.order_count,
        "Today's earnings for {}",
        b2
    );
    let stats = service.get_dashboard_stats(Some(&second)).await?;
    info!(?stats, "Dashboard");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenv::dotenv().ok();
    setup_tracing();

    let config = DispatchConfig::from_env();
    info!(?config, "Starting barber dispatch");

    let system = DispatchSystem::new(config, Arc::new(LogNotifier), Arc::new(SystemClock));

    let span = tracing::info_span!("dispatch_scenario");
    match run_scenario(&system).instrument(span).await {
        Ok(()) => info!("Scenario completed successfully"),
        Err(e) => error!(error = %e, "Scenario failed"),
    }

    // Give the detached notification tasks a moment to log before exiting.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
