use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once. `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(env_logger::WriteStyle::Auto);
        builder.init();

        log::debug!("logging initialized");
    });
}
