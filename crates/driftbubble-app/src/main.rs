//! Replay entry point (native).

#[cfg(feature = "native")]
fn main() {
    use std::path::PathBuf;

    env_logger::init();
    log::info!("Starting DriftBubble replay");

    let mut args = std::env::args().skip(1);
    let Some(script) = args.next().map(PathBuf::from) else {
        eprintln!("usage: driftbubble <script.json> [config.json]");
        std::process::exit(2);
    };
    let config = args.next().map(PathBuf::from);

    let calls = match driftbubble_app::run_script_file(&script, config.as_deref()) {
        Ok(calls) => calls,
        Err(e) => {
            log::error!("Replay failed: {}", e);
            std::process::exit(1);
        }
    };
    for call in calls {
        match serde_json::to_string(&call) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Failed to serialize {:?}: {}", call, e),
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
