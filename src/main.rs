use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use ac_power_analyzer::{
    app, config,
    i18n::{self, keys, Translator},
    input::StdinInput,
    plot_view::{self, EguiPlotSink},
    telemetry, ui_cli,
    waveform::PlotSink,
};
use clap::Parser;
use tracing::error;

/// 단상 교류 전력 분석기(대화형 콘솔).
#[derive(Debug, Parser)]
#[command(version, about = "Single-phase AC power analyzer")]
struct Cli {
    /// 표시 언어(auto/ko/en)
    #[arg(short = 'L', long)]
    lang: Option<String>,
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// 계산 후 그래프 창을 띄우지 않는다
    #[arg(long)]
    no_plot: bool,
    /// 보상 목표 역률(설정 파일 값보다 우선)
    #[arg(long)]
    target_pf: Option<f64>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 한 번의 계산 세션을 실행한다.
fn main() -> ExitCode {
    telemetry::init_tracing();
    let cli = Cli::parse();

    let loaded = config::load_from(&cli.config).and_then(|cfg| match cli.target_pf {
        Some(target) => cfg.with_target_power_factor(target),
        None => Ok(cfg),
    });
    let mut cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            let tr = Translator::new(&i18n::resolve_language(cli.lang.as_deref(), None));
            eprintln!("{}", tr.fmt(keys::CONFIG_ERROR, &[("error", e.to_string())]));
            return ExitCode::FAILURE;
        }
    };
    if cli.no_plot {
        cfg.show_plot = false;
    }
    let lang = i18n::resolve_language(cli.lang.as_deref(), Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, Some(std::path::Path::new("locales")));

    if let Err(err) = try_run(&cfg, &tr) {
        error!(error = %err, kind = ?err.kind(), "session aborted");
        println!("{}", ui_cli::format_error(&err, &tr));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn try_run(cfg: &config::Config, tr: &Translator) -> Result<(), app::AppError> {
    let mut input = StdinInput;
    let mut out = io::stdout();
    let mut sink = EguiPlotSink::new();
    let plot_target: Option<&mut dyn PlotSink> = if cfg.show_plot {
        Some(&mut sink)
    } else {
        None
    };
    app::run_session(&mut input, &mut out, cfg, tr, plot_target)?;

    if cfg.show_plot {
        plot_view::open_plot_window(sink, &tr.t(keys::GUI_TITLE), cfg.font_path.clone())?;
    }
    Ok(())
}
