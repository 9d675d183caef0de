//! Router integration tests
//!
//! Drive the event router end to end against an in-memory catalog store:
//! authorization, the full product-entry dialogue, cancellation, catalog
//! browsing, and delete callbacks.

use futures::future::join_all;
use sqlx::sqlite::SqlitePoolOptions;

use storebot::config::Settings;
use storebot::database::DatabaseService;
use storebot::router::events::{Command, InboundEvent};
use storebot::router::Router;
use storebot::services::AuthService;
use storebot::state::SessionStore;

const ADMIN: i64 = 1_000;
const OTHER_ADMIN: i64 = 1_001;
const CUSTOMER: i64 = 2_000;

async fn test_router() -> (Router, DatabaseService) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    let db = DatabaseService::new(pool);
    let mut settings = Settings::default();
    settings.bot.admin_ids = vec![ADMIN, OTHER_ADMIN];
    let auth = AuthService::new(&settings);

    (Router::new(auth, db.clone(), SessionStore::new()), db)
}

fn command(user_id: i64, command: Command) -> InboundEvent {
    InboundEvent::Command { user_id, command }
}

fn text(user_id: i64, text: &str) -> InboundEvent {
    InboundEvent::Text {
        user_id,
        text: text.to_string(),
    }
}

fn callback(user_id: i64, payload: &str) -> InboundEvent {
    InboundEvent::Callback {
        user_id,
        payload: payload.to_string(),
    }
}

/// Run the whole add-product dialogue for a user.
async fn add_product(router: &Router, user_id: i64, name: &str, description: &str, price: &str) {
    router.dispatch(command(user_id, Command::AddProduct)).await;
    router.dispatch(text(user_id, name)).await;
    router.dispatch(text(user_id, description)).await;
    router.dispatch(text(user_id, price)).await;
}

#[tokio::test]
async fn non_admins_are_denied_and_the_store_stays_untouched() {
    let (router, db) = test_router().await;

    let denied = [
        command(CUSTOMER, Command::AddProduct),
        command(CUSTOMER, Command::ListProducts),
        callback(CUSTOMER, "delete_1"),
    ];
    for event in denied {
        let replies = router.dispatch(event).await;
        assert_eq!(replies.len(), 1);
        assert!(replies[0].text.contains("not allowed"), "{}", replies[0].text);
    }

    assert_eq!(db.products.count().await.unwrap(), 0);

    // The denied entry command must not have opened a dialogue.
    let replies = router.dispatch(text(CUSTOMER, "Case")).await;
    assert!(replies.is_empty());
}

#[tokio::test]
async fn admin_dialogue_creates_exactly_one_product() {
    let (router, db) = test_router().await;

    let replies = router.dispatch(command(ADMIN, Command::AddProduct)).await;
    assert!(replies[0].text.contains("product name"));

    let replies = router.dispatch(text(ADMIN, "Case")).await;
    assert!(replies[0].text.contains("description"));

    let replies = router.dispatch(text(ADMIN, "Phone case")).await;
    assert!(replies[0].text.contains("price"));

    let replies = router.dispatch(text(ADMIN, "150000")).await;
    assert!(replies[0].text.contains("added"));

    let products = db.products.list_all().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Case");
    assert_eq!(products[0].description, "Phone case");
    assert_eq!(products[0].price, 150_000);

    // The session is gone: further text is ignored again.
    let replies = router.dispatch(text(ADMIN, "anything")).await;
    assert!(replies.is_empty());
}

#[tokio::test]
async fn invalid_price_is_retried_in_place() {
    let (router, db) = test_router().await;

    router.dispatch(command(ADMIN, Command::AddProduct)).await;
    router.dispatch(text(ADMIN, "Case")).await;
    router.dispatch(text(ADMIN, "Phone case")).await;

    let replies = router.dispatch(text(ADMIN, "abc")).await;
    assert!(replies[0].text.contains("whole number"));
    assert_eq!(db.products.count().await.unwrap(), 0);

    let replies = router.dispatch(text(ADMIN, "99000")).await;
    assert!(replies[0].text.contains("added"));

    let products = db.products.list_all().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].price, 99_000);
}

#[tokio::test]
async fn cancel_discards_the_draft_at_every_step() {
    let (router, db) = test_router().await;

    for steps in 0..3 {
        router.dispatch(command(ADMIN, Command::AddProduct)).await;
        let inputs = ["Case", "Phone case", "abc"];
        for input in &inputs[..steps] {
            router.dispatch(text(ADMIN, input)).await;
        }

        let replies = router.dispatch(command(ADMIN, Command::Cancel)).await;
        assert!(replies[0].text.contains("cancelled"));
        assert_eq!(db.products.count().await.unwrap(), 0);

        // No session is left behind.
        let replies = router.dispatch(text(ADMIN, "orphan reply")).await;
        assert!(replies.is_empty());
    }
}

#[tokio::test]
async fn cancel_without_a_session_is_acknowledged() {
    let (router, _db) = test_router().await;

    let replies = router.dispatch(command(ADMIN, Command::Cancel)).await;
    assert!(replies[0].text.contains("nothing to cancel"));
}

#[tokio::test]
async fn deleting_a_missing_id_is_a_silent_no_op() {
    let (router, db) = test_router().await;
    add_product(&router, ADMIN, "Case", "Phone case", "150000").await;

    let replies = router.dispatch(callback(ADMIN, "delete_999")).await;
    assert!(replies[0].text.contains("deleted"));

    let products = db.products.list_all().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Case");
}

#[tokio::test]
async fn listing_preserves_insertion_order_and_survives_a_middle_delete() {
    let (router, db) = test_router().await;
    add_product(&router, ADMIN, "A", "", "1").await;
    add_product(&router, ADMIN, "B", "", "2").await;
    add_product(&router, ADMIN, "C", "", "3").await;

    let products = db.products.list_all().await.unwrap();
    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);

    let b_id = products[1].id;
    router
        .dispatch(callback(ADMIN, &format!("delete_{b_id}")))
        .await;

    let names: Vec<String> = db
        .products
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["A", "C"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_deletes_of_distinct_ids_both_succeed() {
    let (router, db) = test_router().await;
    add_product(&router, ADMIN, "A", "", "1").await;
    add_product(&router, ADMIN, "B", "", "2").await;
    add_product(&router, ADMIN, "C", "", "3").await;

    let products = db.products.list_all().await.unwrap();
    let a_id = products[0].id;
    let c_id = products[2].id;

    let results = join_all([
        router.dispatch(callback(ADMIN, &format!("delete_{a_id}"))),
        router.dispatch(callback(OTHER_ADMIN, &format!("delete_{c_id}"))),
    ])
    .await;

    for replies in &results {
        assert!(replies[0].text.contains("deleted"));
    }

    let remaining = db.products.list_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "B");
    assert_eq!(remaining[0].price, 2);
}

#[tokio::test]
async fn show_products_on_an_empty_catalog_says_so() {
    let (router, _db) = test_router().await;

    let replies = router.dispatch(callback(CUSTOMER, "show_products")).await;
    assert_eq!(replies[0].text, "No products have been added yet.");
    assert!(replies[0].buttons.is_empty());
}

#[tokio::test]
async fn show_products_is_public_and_carries_no_controls() {
    let (router, _db) = test_router().await;
    add_product(&router, ADMIN, "Case", "Phone case", "150000").await;

    let replies = router.dispatch(callback(CUSTOMER, "show_products")).await;
    assert!(replies[0].text.contains("Case — 150000"));
    assert!(replies[0].buttons.is_empty());
}

#[tokio::test]
async fn admin_listing_attaches_delete_controls() {
    let (router, db) = test_router().await;
    add_product(&router, ADMIN, "Case", "", "150000").await;
    add_product(&router, ADMIN, "Charger", "", "99000").await;

    let replies = router.dispatch(command(ADMIN, Command::ListProducts)).await;
    let reply = &replies[0];
    assert!(reply.text.contains("Case — 150000"));
    assert!(reply.text.contains("Charger — 99000"));
    assert_eq!(reply.buttons.len(), 2);

    let products = db.products.list_all().await.unwrap();
    assert_eq!(reply.buttons[0][0].payload, format!("delete_{}", products[0].id));
    assert_eq!(reply.buttons[1][0].payload, format!("delete_{}", products[1].id));
}

#[tokio::test]
async fn reentering_the_dialogue_resets_with_a_notice() {
    let (router, db) = test_router().await;

    router.dispatch(command(ADMIN, Command::AddProduct)).await;
    router.dispatch(text(ADMIN, "First")).await;

    let replies = router.dispatch(command(ADMIN, Command::AddProduct)).await;
    assert_eq!(replies.len(), 2);
    assert!(replies[0].text.contains("discarded"));
    assert!(replies[1].text.contains("product name"));

    router.dispatch(text(ADMIN, "Second")).await;
    router.dispatch(text(ADMIN, "kept draft")).await;
    router.dispatch(text(ADMIN, "10")).await;

    let products = db.products.list_all().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Second");
}

#[tokio::test]
async fn free_text_without_a_session_is_ignored() {
    let (router, _db) = test_router().await;

    assert!(router.dispatch(text(CUSTOMER, "hello")).await.is_empty());
    assert!(router.dispatch(text(ADMIN, "hello")).await.is_empty());
}

#[tokio::test]
async fn unknown_callback_payloads_are_reported() {
    let (router, _db) = test_router().await;

    let replies = router.dispatch(callback(ADMIN, "frobnicate")).await;
    assert!(replies[0].text.contains("Unrecognized"));

    // A malformed delete id is not a delete.
    let replies = router.dispatch(callback(ADMIN, "delete_abc")).await;
    assert!(replies[0].text.contains("Unrecognized"));
}

#[tokio::test]
async fn users_in_separate_dialogues_do_not_share_state() {
    let (router, db) = test_router().await;

    router.dispatch(command(ADMIN, Command::AddProduct)).await;
    router.dispatch(command(OTHER_ADMIN, Command::AddProduct)).await;

    router.dispatch(text(ADMIN, "Case")).await;
    router.dispatch(text(OTHER_ADMIN, "Charger")).await;
    router.dispatch(text(ADMIN, "For phones")).await;
    router.dispatch(text(OTHER_ADMIN, "For laptops")).await;
    router.dispatch(text(ADMIN, "150000")).await;
    router.dispatch(text(OTHER_ADMIN, "99000")).await;

    let products = db.products.list_all().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Case");
    assert_eq!(products[0].description, "For phones");
    assert_eq!(products[1].name, "Charger");
    assert_eq!(products[1].description, "For laptops");
}
