use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tower_http=info,reqwest=warn,aws_config=warn";

/// `SBC_GATEWAY_ENV=development` switches to multi-line, human-oriented
/// output with request spans at debug level.
pub fn init_tracing() {
    let development = std::env::var("SBC_GATEWAY_ENV").is_ok_and(|v| v == "development");
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if development {
            format!("{DEFAULT_FILTER},tower_http=debug,sbc_gateway=debug")
        } else {
            DEFAULT_FILTER.to_string()
        }
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false);
    if development {
        builder.pretty().init();
    } else {
        builder.compact().init();
    }
}
