use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// 二進位檔的 target 與 library crate 不同
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "tube_tutor=debug,poll_bot=debug,update_webhook=debug,tower_http=debug,info"
    } else {
        "tube_tutor=info,poll_bot=info,update_webhook=info"
    }
}

pub fn init_logger(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    // 容器環境使用 JSON 格式方便收集
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.compact())
            .init();
    }
}
