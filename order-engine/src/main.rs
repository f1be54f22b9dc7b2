use order_engine::{Config, DbService, InMemorySessionStore, OrderWorkflow, init_logger_with_file};
use shared::request::TurnCommand;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, working directory, logging)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    init_logger_with_file(Some(&config.log_level), None);

    tracing::info!("🍜 Order engine starting...");

    // 2. Database + workflow
    let db = DbService::new(&config.database_path).await?;
    let sessions = Arc::new(InMemorySessionStore::new());
    let workflow = OrderWorkflow::new(db.pool.clone(), sessions, &config);

    // 3. Console session (the dialogue manager owns intent routing in
    //    production; here a prefix does the job)
    println!("Gõ câu gọi món, hoặc:");
    println!("  :ok                     xác nhận đơn");
    println!("  :huy                    hủy đơn");
    println!("  :ds                     xem lựa chọn đang chờ");
    println!("  :chon <trả lời>         chọn món đang chờ");
    println!("  :doi <món> <số lượng>   đổi số lượng");
    println!("  :thoat                  thoát");

    let session_id = "console";
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(command) = parse_command(line) else {
            break;
        };
        match workflow.execute(session_id, command).await {
            Ok(turn) => println!("{}", turn.text),
            Err(e) => {
                tracing::error!(error = %e, "Turn failed");
                println!("Lỗi hệ thống, vui lòng thử lại.");
            }
        }
    }

    Ok(())
}

/// `None` means quit; anything without a `:` prefix is an ordering utterance
fn parse_command(line: &str) -> Option<TurnCommand> {
    let Some(rest) = line.strip_prefix(':') else {
        return Some(TurnCommand::Order {
            text: line.to_string(),
            hints: vec![],
        });
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().unwrap_or("").trim();
    match name {
        "ok" => Some(TurnCommand::Confirm),
        "huy" => Some(TurnCommand::Cancel),
        "ds" => Some(TurnCommand::ListOptions),
        "chon" => Some(TurnCommand::Choose {
            reply: arg.to_string(),
        }),
        "doi" => {
            let mut words: Vec<&str> = arg.split_whitespace().collect();
            let quantity = match words.last() {
                Some(w) if w.chars().all(|c| c.is_ascii_digit()) => {
                    words.pop().map(str::to_string)
                }
                _ => None,
            };
            let food = (!words.is_empty()).then(|| words.join(" "));
            Some(TurnCommand::Change { food, quantity })
        }
        "thoat" => None,
        _ => Some(TurnCommand::Order {
            text: line.to_string(),
            hints: vec![],
        }),
    }
}
