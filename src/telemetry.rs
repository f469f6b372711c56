use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// stderr로 출력하는 tracing 구독자를 설치한다. 콘솔 결과 출력(stdout)과 섞이지 않는다.
/// `RUST_LOG`가 없으면 경고 이상만 출력한다.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,eframe=warn,egui_glow=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
