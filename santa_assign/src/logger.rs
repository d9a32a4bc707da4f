use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;
use std::time::Instant;

/// 環境変数 RUST_LOG があればそちらを優先します。
pub fn build_logger(level: LevelFilter) {
    let start_time = Instant::now();

    let env = Env::default().default_filter_or(level.as_str());
    let mut builder = Builder::from_env(env);
    builder
        .format(move |buf, record| {
            let elapsed = start_time.elapsed().as_millis();
            writeln!(
                buf,
                "{:>6}.{:03} [{}] - {}",
                elapsed / 1000,
                elapsed % 1000,
                record.level(),
                record.args()
            )
        })
        .init();
}

// 明示されたレベルがなければ quiet のときはエラーだけ出す
pub fn resolve_level(log_level: Option<LevelFilter>, quiet: bool) -> LevelFilter {
    match log_level {
        Some(level) => level,
        None if quiet => LevelFilter::Error,
        None => LevelFilter::Info,
    }
}
