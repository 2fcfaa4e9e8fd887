use gpui::prelude::*;
use gpui::*;
use gpui_stream_dashboard::config::DashboardConfig;
use gpui_stream_dashboard::{init, Dashboard, DataStream};
use tracing_subscriber::EnvFilter;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DashboardConfig::from_env()?;
    let stream = DataStream::spawn(&config.stream)?;

    Application::new().run(move |cx: &mut App| {
        init(cx);

        let bounds = Bounds::centered(None, size(px(1200.0), px(1000.0)), cx);
        let opened = cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                ..Default::default()
            },
            |window, cx| {
                let dashboard = cx.new(|cx| Dashboard::new(stream, window, cx));
                window.focus(&dashboard.focus_handle(cx));
                dashboard
            },
        );
        if let Err(e) = opened {
            tracing::error!(error = %e, "failed to open window");
            cx.quit();
        }
    });
    Ok(())
}
