use crate::support::{load_config_or_exit, load_package_or_exit, print_json_or_exit};
use pig_validate::{CheckId, ValidationResult, check_constraints};
use serde_json::json;

const CHECK_KIND: &str = "pig.package_check.v1";

pub struct Args {
    pub package: String,
    pub checks: Vec<CheckId>,
    pub config: Option<String>,
    pub max_bytes: Option<usize>,
    pub json: bool,
}

pub fn run(args: Args) {
    let config = load_config_or_exit(args.config.as_deref());
    let settings = config.resolve(args.checks, args.max_bytes);
    let loaded = load_package_or_exit(&args.package, settings.limits);
    tracing::debug!(
        path = %args.package,
        digest = %loaded.digest,
        bytes = loaded.byte_len,
        "package loaded"
    );
    let selected = settings.options.selected();

    let result = check_constraints(&loaded.package, &settings.options);

    if args.json {
        let payload = json!({
            "schema": 1,
            "checkKind": CHECK_KIND,
            "packagePath": args.package,
            "packageId": loaded.package.id,
            "digest": loaded.digest,
            "byteLen": loaded.byte_len,
            "itemCount": loaded.package.graph.len(),
            "checks": selected,
            "result": result,
        });
        print_json_or_exit(&payload, "package check");
    } else {
        print_report(&args.package, loaded.package.graph.len(), selected.len(), &result);
    }

    if !result.is_accepted() {
        std::process::exit(1);
    }
}

fn print_report(path: &str, item_count: usize, check_count: usize, result: &ValidationResult) {
    if result.is_accepted() {
        println!("[pig-check] OK {path} (items={item_count}, checks={check_count})");
        return;
    }
    let check = result
        .check
        .map(|check| check.as_str())
        .unwrap_or("unknown");
    println!(
        "[pig-check] FAIL {path} (status={}, check={check})",
        result.status
    );
    if let Some(text) = &result.status_text {
        println!("  - {text}");
    }
}
