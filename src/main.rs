//! # Coffee Order Engine demo
//!
//! Walks one customer through the full loop:
//!
//! 1. A scripted agent proposes candidate orders turn by turn; the session
//!    repairs restatements and refuses an early "done".
//! 2. The confirmed order goes to the [`OrderSystem`] store.
//! 3. The barista advances it and the shop prints a receipt and a report.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

use chrono::Utc;
use coffee_order_engine::config::EngineConfig;
use coffee_order_engine::conversation::{ConversationSession, ScriptedAgent};
use coffee_order_engine::lifecycle::{setup_tracing, OrderSystem};
use coffee_order_engine::metrics::ReportWindow;
use tracing::{error, info, warn, Instrument};

// Turn 2 restates the latte with a size while also adding the cookie, and
// claims completion before the temperature is known.
const SCRIPT: [&str; 3] = [
    r#"{"assistantMessage": "A latte! What size, and what kind of milk?",
        "updatedOrderState": {"items": [{"type": "drink", "name": "latte", "milk": "oat"}]},
        "isComplete": false}"#,
    r#"```json
{"assistantMessage": "Got it, anything else?",
 "updatedOrderState": {"items": [
    {"type": "drink", "name": "latte", "milk": "oat"},
    {"type": "drink", "name": "latte", "size": "large", "milk": "oat", "addOns": ["caramel_syrup"]},
    {"type": "pastry", "name": "chocolate_chip_cookie", "quantity": 2}]},
 "isComplete": true}
```"#,
    r#"{"assistantMessage": "One large hot oat latte with caramel and two cookies. Coming up!",
        "updatedOrderState": {"items": [
            {"type": "drink", "name": "latte", "size": "large", "temperature": "hot", "milk": "oat", "addOns": ["caramel_syrup"]},
            {"type": "pastry", "name": "chocolate_chip_cookie", "quantity": 2}]},
        "isComplete": true}"#,
];

const CUSTOMER: [&str; 3] = [
    "Can I get an oat latte?",
    "Large, with caramel. And two cookies, that's all.",
    "Hot please.",
];

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = EngineConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting coffee order engine");

    let system = OrderSystem::new(&config);

    let agent = ScriptedAgent::new();
    for reply in SCRIPT {
        agent.push_raw(reply).await;
    }
    let mut session = ConversationSession::new(agent);

    let span = tracing::info_span!("conversation");
    async {
        for text in CUSTOMER {
            println!("Customer: {text}");
            match session.handle_turn(text).await {
                Ok(reply) => println!("Barista:  {}", reply.assistant_message),
                Err(e) => {
                    error!(error = %e, "Agent turn failed");
                    break;
                }
            }
            for (index, fields) in session.missing_fields() {
                info!(index, ?fields, "Still missing");
            }
        }
    }
    .instrument(span)
    .await;

    let unused = session.agent().remaining().await;
    if unused > 0 {
        warn!(unused, "Scripted replies left over");
    }

    if !session.is_complete() {
        warn!("Conversation ended without a complete order");
        system.shutdown().await?;
        return Ok(());
    }

    let span = tracing::info_span!("fulfillment");
    let result = async {
        let order_id = system.order_client.place_order(session.into_state()).await?;
        let status = system.order_client.advance(order_id).await?;
        info!(%order_id, %status, "Barista picked up the order");
        let status = system.order_client.advance(order_id).await?;
        info!(%order_id, %status, "Order ready");

        let receipt = system.order_client.receipt(order_id).await?;
        println!("\n{order_id}\n{receipt}");

        let now = Utc::now().with_timezone(&config.offset());
        let report = system.order_client.report(ReportWindow::AllTime, now).await?;
        println!("{report}");
        Ok::<_, coffee_order_engine::order_actor::OrderError>(())
    }
    .instrument(span)
    .await;

    if let Err(e) = result {
        error!(error = %e, "Fulfillment failed");
    }

    system.shutdown().await?;
    info!("Demo completed");
    Ok(())
}
