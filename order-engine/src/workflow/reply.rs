//! Reply texts (Vietnamese)
//!
//! Every user-visible sentence the workflow can produce lives here so
//! the state machine reads as transitions, not string plumbing.

use shared::models::{Food, PendingChoice, ResolvedItem};
use shared::util::format_price;

pub const MSG_NOTHING_TO_CONFIRM: &str = "❌ Không có đơn hàng nào để xác nhận.";
pub const MSG_EMPTY_ORDER: &str = "❌ Không có món ăn nào trong đơn để xác nhận.";
pub const MSG_CANCELLED: &str = "❌ Đơn hàng đã được huỷ.\n👉 Bạn có muốn bắt đầu gọi món mới không?";
pub const MSG_COMMIT_FAILED: &str = "❌ Có lỗi khi lưu đơn, vui lòng thử lại.";
pub const MSG_INVALID_STATE: &str =
    "❌ Dữ liệu đơn hàng không hợp lệ. Vui lòng hủy và bắt đầu đơn mới.";
pub const MSG_NOTHING_TO_CHOOSE: &str = "Không có mục nào để chọn.";
pub const MSG_NO_PENDING_CHOICE: &str = "Không có lựa chọn nào đang chờ.";
pub const MSG_CHOOSE_BEFORE_CONFIRM: &str = "Vui lòng chọn món trước khi xác nhận.";
pub const MSG_NOTHING_TO_EDIT: &str = "❌ Hiện tại không có đơn hàng nào để sửa.";
pub const MSG_EMPTY_EDIT: &str = "❌ Đơn hàng trống, không có gì để sửa.";
pub const MSG_WHICH_FOOD: &str = "⚠️ Bạn muốn đổi món nào?";

/// "2 Phở Bò và 1 Coca Cola", or the no-clear-items fallback
pub fn summary(items: &[ResolvedItem]) -> String {
    if items.is_empty() {
        return "không có món rõ ràng".to_string();
    }
    items
        .iter()
        .map(|r| format!("{} {}", r.quantity, r.food))
        .collect::<Vec<_>>()
        .join(" và ")
}

fn option_lines(options: &[Food]) -> Vec<String> {
    options
        .iter()
        .enumerate()
        .map(|(idx, opt)| format!("{}. {} - {}đ", idx + 1, opt.name, format_price(opt.price)))
        .collect()
}

/// Numbered candidate list plus the how-to-answer instruction
pub fn choices_prompt(choice: &PendingChoice) -> String {
    let mut lines = vec![format!(
        "Có {} món liên quan đến '{}', bạn muốn món nào?\n",
        choice.options.len(),
        choice.raw
    )];
    lines.extend(option_lines(&choice.options));
    lines.push("Vui lòng trả lời bằng số (ví dụ: 1) hoặc tên món.".to_string());
    lines.join("\n")
}

/// Candidate list re-rendered on request, without the instruction line
pub fn choices_list(choice: &PendingChoice) -> String {
    let mut lines = vec![format!(
        "Có {} món liên quan đến '{}':",
        choice.options.len(),
        choice.raw
    )];
    lines.extend(option_lines(&choice.options));
    lines.join("\n")
}

/// The confirmation question
pub fn confirm_question(summary: &str, table_label: &str) -> String {
    format!("Dạ, bạn gọi {summary} tại {table_label}, đúng không ạ?")
}

/// Success message after the bill is persisted
pub fn commit_success(bill_id: i64, items: &[ResolvedItem], table_label: &str) -> String {
    let names = items
        .iter()
        .map(|r| format!("{} {}", r.quantity, r.food))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "✅ Đã lưu đơn thành công! Mã hóa đơn: {bill_id}\n📦 Món đã đặt: {names}\n🍽️ Bàn: {table_label}\n\n👉 Bạn có muốn gọi thêm món mới không?"
    )
}

/// Edit target not present in the order
pub fn not_in_order(food: &str) -> String {
    format!("⚠️ Trong đơn chưa có món {food}. Bạn có muốn thêm mới không?")
}

/// Order updated after an edit
pub fn updated(summary: &str) -> String {
    format!("✅ Đã cập nhật lại đơn: {summary}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_joins_with_va() {
        let items = vec![
            ResolvedItem::unmatched("Phở Bò", 2),
            ResolvedItem::unmatched("Coca Cola", 1),
        ];
        assert_eq!(summary(&items), "2 Phở Bò và 1 Coca Cola");
        assert_eq!(summary(&[]), "không có món rõ ràng");
    }

    #[test]
    fn test_choices_prompt_numbers_and_prices() {
        let choice = PendingChoice {
            raw: "phở".to_string(),
            quantity: 2,
            options: vec![
                Food {
                    id: 1,
                    name: "Phở Bò".to_string(),
                    price: 45000.0,
                },
                Food {
                    id: 2,
                    name: "Phở Gà".to_string(),
                    price: 40000.0,
                },
            ],
        };
        let prompt = choices_prompt(&choice);
        assert!(prompt.contains("Có 2 món liên quan đến 'phở'"));
        assert!(prompt.contains("1. Phở Bò - 45,000đ"));
        assert!(prompt.contains("2. Phở Gà - 40,000đ"));
        assert!(prompt.contains("Vui lòng trả lời bằng số"));

        let listing = choices_list(&choice);
        assert!(!listing.contains("Vui lòng trả lời"));
    }

    #[test]
    fn test_confirm_question() {
        assert_eq!(
            confirm_question("2 Phở Bò", "Bàn 5"),
            "Dạ, bạn gọi 2 Phở Bò tại Bàn 5, đúng không ạ?"
        );
    }
}
