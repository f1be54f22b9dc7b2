use super::*;
use crate::db::DbService;
use crate::db::repository::{bill, dining_table, food};
use crate::session::InMemorySessionStore;

struct TestContext {
    workflow: OrderWorkflow,
    pool: SqlitePool,
    sessions: Arc<InMemorySessionStore>,
    foods: Vec<Food>,
    _dir: tempfile::TempDir,
}

impl TestContext {
    fn food_id(&self, name: &str) -> i64 {
        self.foods
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("seed food {name} missing"))
            .id
    }

    async fn order(&self, session_id: &str, text: &str) -> TurnReply {
        self.workflow
            .execute(
                session_id,
                TurnCommand::Order {
                    text: text.to_string(),
                    hints: vec![],
                },
            )
            .await
            .expect("order turn")
    }

    async fn choose(&self, session_id: &str, choice: &str) -> TurnReply {
        self.workflow
            .execute(
                session_id,
                TurnCommand::Choose {
                    reply: choice.to_string(),
                },
            )
            .await
            .expect("choose turn")
    }

    async fn confirm(&self, session_id: &str) -> TurnReply {
        self.workflow
            .execute(session_id, TurnCommand::Confirm)
            .await
            .expect("confirm turn")
    }

    async fn line_count(&self, bill_id: i64, food_id: i64) -> Option<i64> {
        bill::find_lines(&self.pool, bill_id)
            .await
            .expect("lines")
            .into_iter()
            .find(|l| l.food_id == food_id)
            .map(|l| l.count)
    }
}

async fn setup(menu: &[(&str, f64)]) -> TestContext {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("orders.db");
    let db = DbService::new(db_path.to_str().expect("utf-8 path"))
        .await
        .expect("db init");

    let mut foods = Vec::new();
    for (name, price) in menu {
        foods.push(food::insert(&db.pool, name, *price).await.expect("seed"));
    }

    let sessions = Arc::new(InMemorySessionStore::new());
    let config = Config::with_overrides(
        dir.path().to_string_lossy().to_string(),
        db_path.to_string_lossy().to_string(),
    );
    let workflow = OrderWorkflow::new(db.pool.clone(), sessions.clone(), &config);
    TestContext {
        workflow,
        pool: db.pool,
        sessions,
        foods,
        _dir: dir,
    }
}

async fn first_bill_id(pool: &SqlitePool) -> i64 {
    let (id,): (i64,) = sqlx::query_as("SELECT id FROM bill LIMIT 1")
        .fetch_one(pool)
        .await
        .expect("bill row");
    id
}

// ========================================================================
// Unambiguous path: extraction → resolution → confirmation → commit
// ========================================================================

#[tokio::test]
async fn test_order_and_commit_two_items() {
    let ctx = setup(&[("Phở Bò", 45000.0), ("Coca Cola", 15000.0)]).await;

    let turn = ctx.order("s1", "2 phở bò và 1 coca bàn 5").await;
    let payload = turn.payload.expect("confirmation payload");
    assert_eq!(payload.status, STATUS_PENDING_CONFIRMATION);
    assert_eq!(payload.table, "Bàn 5");
    assert_eq!(payload.order.len(), 2);
    assert_eq!(payload.order[0].food, "Phở Bò");
    assert_eq!(payload.order[0].quantity, 2);
    assert_eq!(payload.order[0].food_id, Some(ctx.food_id("Phở Bò")));
    assert_eq!(payload.order[1].food, "Coca Cola");
    assert_eq!(payload.order[1].quantity, 1);
    assert!(
        turn.text
            .contains("Dạ, bạn gọi 2 Phở Bò và 1 Coca Cola tại Bàn 5")
    );

    let done = ctx.confirm("s1").await;
    assert!(done.text.contains("Mã hóa đơn"), "got: {}", done.text);

    let table = dining_table::find_by_name(&ctx.pool, "Bàn 5")
        .await
        .unwrap()
        .expect("table row");
    assert_eq!(table.status, "Trống");

    assert_eq!(bill::count(&ctx.pool).await.unwrap(), 1);
    let bill_id = first_bill_id(&ctx.pool).await;
    assert_eq!(
        ctx.line_count(bill_id, ctx.food_id("Phở Bò")).await,
        Some(2)
    );
    assert_eq!(
        ctx.line_count(bill_id, ctx.food_id("Coca Cola")).await,
        Some(1)
    );

    // State cleared: a second confirm has nothing to work with
    let again = ctx.confirm("s1").await;
    assert_eq!(again.text, reply::MSG_NOTHING_TO_CONFIRM);
}

#[tokio::test]
async fn test_takeaway_wins_over_table_number() {
    let ctx = setup(&[("Cơm Gà Xối Mỡ", 55000.0)]).await;

    let turn = ctx.order("s1", "mang về 1 cơm gà bàn 9").await;
    let payload = turn.payload.expect("confirmation payload");
    assert_eq!(payload.table, "Mang về");
    assert_eq!(payload.order[0].food, "Cơm Gà Xối Mỡ");
}

#[tokio::test]
async fn test_no_table_defaults_to_takeaway_and_persists() {
    let ctx = setup(&[("Coca Cola", 15000.0)]).await;

    let turn = ctx.order("s1", "1 coca").await;
    assert_eq!(turn.payload.expect("payload").table, "Mang về");
    assert_eq!(
        ctx.sessions.get("s1", SLOT_TABLE).await.as_deref(),
        Some("Mang về")
    );

    ctx.confirm("s1").await;
    assert!(
        dining_table::find_by_name(&ctx.pool, "Mang về")
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_table_carries_over_turns() {
    let ctx = setup(&[("Coca Cola", 15000.0)]).await;

    ctx.order("s1", "1 coca bàn 7").await;
    // New utterance without a table mention keeps the previous designator
    let turn = ctx.order("s1", "2 coca").await;
    assert_eq!(turn.payload.expect("payload").table, "Bàn 7");
}

// ========================================================================
// Unknown foods: shown, never persisted
// ========================================================================

#[tokio::test]
async fn test_unknown_food_shown_but_not_persisted() {
    let ctx = setup(&[("Coca Cola", 15000.0)]).await;

    let turn = ctx.order("s1", "1 coca và 1 bún mắm bàn 2").await;
    let payload = turn.payload.expect("payload");
    assert_eq!(payload.order.len(), 2);
    assert_eq!(payload.order[1].food, "bún mắm");
    assert_eq!(payload.order[1].food_id, None);

    ctx.confirm("s1").await;
    let bill_id = first_bill_id(&ctx.pool).await;
    let lines = bill::find_lines(&ctx.pool, bill_id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].food_id, ctx.food_id("Coca Cola"));
}

#[tokio::test]
async fn test_order_with_no_recognizable_items() {
    let ctx = setup(&[("Coca Cola", 15000.0)]).await;

    let turn = ctx.order("s1", "xin chào bạn").await;
    assert!(turn.text.contains("không có món rõ ràng"));

    let turn = ctx.confirm("s1").await;
    assert_eq!(turn.text, reply::MSG_EMPTY_ORDER);
    assert_eq!(ctx.sessions.get("s1", SLOT_PENDING_ORDER).await, None);
}

// ========================================================================
// Disambiguation
// ========================================================================

async fn pho_menu() -> TestContext {
    setup(&[
        ("Phở Bò", 45000.0),
        ("Phở Gà", 40000.0),
        ("Coca Cola", 15000.0),
        ("Trà Đá", 5000.0),
        ("Trà Bí Đao", 10000.0),
    ])
    .await
}

#[tokio::test]
async fn test_ambiguous_phrase_lists_candidates_sorted() {
    let ctx = pho_menu().await;

    let turn = ctx.order("s1", "2 phở").await;
    assert!(turn.payload.is_none());
    assert!(turn.text.contains("Có 2 món liên quan đến 'ph'"));
    let bo = turn.text.find("1. Phở Bò - 45,000đ").expect("first option");
    let ga = turn.text.find("2. Phở Gà - 40,000đ").expect("second option");
    assert!(bo < ga);
    assert!(turn.text.contains("Vui lòng trả lời bằng số"));
}

#[tokio::test]
async fn test_choose_by_index() {
    let ctx = pho_menu().await;

    ctx.order("s1", "2 phở").await;
    let turn = ctx.choose("s1", "1").await;
    let payload = turn.payload.expect("confirmation payload");
    assert_eq!(payload.order[0].food, "Phở Bò");
    assert_eq!(payload.order[0].quantity, 2);
}

#[tokio::test]
async fn test_choose_by_name() {
    let ctx = pho_menu().await;

    ctx.order("s1", "2 phở").await;
    let turn = ctx.choose("s1", "phở gà").await;
    assert_eq!(turn.payload.expect("payload").order[0].food, "Phở Gà");
}

#[tokio::test]
async fn test_choice_out_of_bounds_re_presents_list() {
    let ctx = pho_menu().await;

    ctx.order("s1", "2 phở").await;
    let turn = ctx.choose("s1", "9").await;
    assert!(turn.text.contains("Vui lòng trả lời bằng số"));

    // Queue untouched, a valid pick still works
    let turn = ctx.choose("s1", "2").await;
    assert_eq!(turn.payload.expect("payload").order[0].food, "Phở Gà");
}

#[tokio::test]
async fn test_pending_queue_processed_in_order() {
    let ctx = pho_menu().await;

    let turn = ctx.order("s1", "1 phở và 1 trà bàn 2").await;
    assert!(turn.text.contains("'ph'"));

    // First choice resolves, the next pending item is presented
    let turn = ctx.choose("s1", "1").await;
    assert!(turn.text.contains("'trà'"), "got: {}", turn.text);
    assert!(turn.payload.is_none());

    let turn = ctx.choose("s1", "Trà Đá").await;
    let payload = turn.payload.expect("payload");
    assert_eq!(payload.order.len(), 2);
    assert_eq!(payload.order[0].food, "Phở Bò");
    assert_eq!(payload.order[1].food, "Trà Đá");
    assert_eq!(payload.table, "Bàn 2");
}

#[tokio::test]
async fn test_confirm_during_disambiguation_prompts_choice() {
    let ctx = pho_menu().await;

    ctx.order("s1", "2 phở").await;
    let turn = ctx.confirm("s1").await;
    assert!(turn.text.contains(reply::MSG_CHOOSE_BEFORE_CONFIRM));
    // Nothing was committed
    assert_eq!(bill::count(&ctx.pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_options() {
    let ctx = pho_menu().await;

    let fresh = ctx
        .workflow
        .execute("s1", TurnCommand::ListOptions)
        .await
        .unwrap();
    assert_eq!(fresh.text, reply::MSG_NOTHING_TO_CHOOSE);

    ctx.order("s1", "2 phở").await;
    let listing = ctx
        .workflow
        .execute("s1", TurnCommand::ListOptions)
        .await
        .unwrap();
    assert!(listing.text.contains("1. Phở Bò"));
    assert!(!listing.text.contains("Vui lòng trả lời"));

    ctx.choose("s1", "1").await;
    let empty = ctx
        .workflow
        .execute("s1", TurnCommand::ListOptions)
        .await
        .unwrap();
    assert_eq!(empty.text, reply::MSG_NO_PENDING_CHOICE);
}

// ========================================================================
// Accumulation on the open bill
// ========================================================================

#[tokio::test]
async fn test_duplicate_mentions_accumulate_into_one_line() {
    let ctx = setup(&[("Coca Cola", 15000.0)]).await;

    ctx.order("s1", "1 coca, 2 coca bàn 1").await;
    ctx.confirm("s1").await;

    let bill_id = first_bill_id(&ctx.pool).await;
    let lines = bill::find_lines(&ctx.pool, bill_id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].count, 3);
}

#[tokio::test]
async fn test_reconfirm_reuses_open_bill_and_increments() {
    let ctx = setup(&[("Coca Cola", 15000.0)]).await;

    ctx.order("s1", "1 coca bàn 3").await;
    ctx.confirm("s1").await;
    ctx.order("s1", "2 coca bàn 3").await;
    ctx.confirm("s1").await;

    assert_eq!(bill::count(&ctx.pool).await.unwrap(), 1);
    let bill_id = first_bill_id(&ctx.pool).await;
    assert_eq!(
        ctx.line_count(bill_id, ctx.food_id("Coca Cola")).await,
        Some(3)
    );
}

// ========================================================================
// Cancel / edit / failure handling
// ========================================================================

#[tokio::test]
async fn test_cancel_clears_state_and_table() {
    let ctx = setup(&[("Coca Cola", 15000.0)]).await;

    ctx.order("s1", "1 coca bàn 4").await;
    assert!(ctx.sessions.get("s1", SLOT_TABLE).await.is_some());

    let turn = ctx
        .workflow
        .execute("s1", TurnCommand::Cancel)
        .await
        .unwrap();
    assert!(turn.text.contains("đã được huỷ"));
    assert_eq!(ctx.sessions.get("s1", SLOT_PENDING_ORDER).await, None);
    assert_eq!(ctx.sessions.get("s1", SLOT_TABLE).await, None);

    let confirm = ctx.confirm("s1").await;
    assert_eq!(confirm.text, reply::MSG_NOTHING_TO_CONFIRM);
}

#[tokio::test]
async fn test_change_quantity_before_commit() {
    let ctx = setup(&[("Coca Cola", 15000.0)]).await;

    ctx.order("s1", "2 coca bàn 1").await;
    let turn = ctx
        .workflow
        .execute(
            "s1",
            TurnCommand::Change {
                food: Some("coca".to_string()),
                quantity: Some("5".to_string()),
            },
        )
        .await
        .unwrap();
    assert!(turn.text.contains("Đã cập nhật"));
    assert!(turn.text.contains("5 Coca Cola"));

    ctx.confirm("s1").await;
    let bill_id = first_bill_id(&ctx.pool).await;
    assert_eq!(
        ctx.line_count(bill_id, ctx.food_id("Coca Cola")).await,
        Some(5)
    );
}

#[tokio::test]
async fn test_change_unknown_food_leaves_state_alone() {
    let ctx = setup(&[("Coca Cola", 15000.0)]).await;

    ctx.order("s1", "2 coca").await;
    let turn = ctx
        .workflow
        .execute(
            "s1",
            TurnCommand::Change {
                food: Some("trà".to_string()),
                quantity: Some("9".to_string()),
            },
        )
        .await
        .unwrap();
    assert!(turn.text.contains("Trong đơn chưa có món trà"));

    ctx.confirm("s1").await;
    let bill_id = first_bill_id(&ctx.pool).await;
    assert_eq!(
        ctx.line_count(bill_id, ctx.food_id("Coca Cola")).await,
        Some(2)
    );
}

#[tokio::test]
async fn test_corrupt_state_reports_invalid_data() {
    let ctx = setup(&[("Coca Cola", 15000.0)]).await;

    ctx.sessions
        .set("s1", SLOT_PENDING_ORDER, "{not valid json".to_string())
        .await;
    let turn = ctx.confirm("s1").await;
    assert_eq!(turn.text, reply::MSG_INVALID_STATE);

    // Cancel is the restart path: it never parses the state
    ctx.workflow
        .execute("s1", TurnCommand::Cancel)
        .await
        .unwrap();
    let turn = ctx.order("s1", "1 coca").await;
    assert!(turn.payload.is_some());
}

#[tokio::test]
async fn test_commit_failure_preserves_state_for_retry() {
    let ctx = setup(&[("Coca Cola", 15000.0)]).await;

    ctx.order("s1", "1 coca bàn 6").await;
    ctx.pool.close().await;

    let turn = ctx.confirm("s1").await;
    assert_eq!(turn.text, reply::MSG_COMMIT_FAILED);
    assert!(
        ctx.sessions.get("s1", SLOT_PENDING_ORDER).await.is_some(),
        "state must survive a failed commit"
    );
}

// ========================================================================
// Entity hint fallback
// ========================================================================

#[tokio::test]
async fn test_entity_hints_used_when_regex_finds_nothing() {
    let ctx = setup(&[("Coca Cola", 15000.0)]).await;

    let turn = ctx
        .workflow
        .execute(
            "s1",
            TurnCommand::Order {
                text: "cho mình coca".to_string(),
                hints: vec![EntityHint::new(
                    shared::request::EntityKind::Food,
                    "coca cola",
                )],
            },
        )
        .await
        .unwrap();
    let payload = turn.payload.expect("payload");
    assert_eq!(payload.order.len(), 1);
    assert_eq!(payload.order[0].food, "Coca Cola");
    assert_eq!(payload.order[0].quantity, 1);
}
