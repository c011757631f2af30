use crate::support::print_json_or_exit;
use pig_validate::{CheckId, StatusCode};
use serde_json::json;

pub fn run(json_output: bool) {
    if json_output {
        let checks: Vec<_> = CheckId::ALL
            .iter()
            .enumerate()
            .map(|(position, check)| {
                json!({
                    "order": position + 1,
                    "id": check,
                    "statuses": check.statuses(),
                })
            })
            .collect();
        let codes: Vec<_> = StatusCode::ALL
            .iter()
            .map(|status| json!({ "code": status, "category": status.category() }))
            .collect();
        print_json_or_exit(&json!({ "checks": checks, "statusCodes": codes }), "checks");
        return;
    }

    println!("pig checks (run order)");
    for (position, check) in CheckId::ALL.iter().enumerate() {
        let codes: Vec<String> = check
            .statuses()
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("  {:>2}. {:<24} {}", position + 1, check.as_str(), codes.join(", "));
    }
    println!();
    println!("status codes");
    for status in StatusCode::ALL {
        println!("  {:>3}  {}", status.code(), status.category());
    }
}
