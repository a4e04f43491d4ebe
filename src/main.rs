use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use riskboard::api::HttpApi;
use riskboard::dashboard::Dashboard;
use riskboard::logging::{json_log, obj, v_str};
use riskboard::model::SortKey;
use riskboard::state::Config;
use riskboard::tui::{self, TuiView};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    json_log("startup", obj(&[("api_base", v_str(&cfg.api_base))]));

    let api = HttpApi::new(&cfg)?;
    let view = TuiView::new();
    let mut dash = Dashboard::new(api, view, cfg.clone());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut dash, &cfg).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    json_log("shutdown", obj(&[]));
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    dash: &mut Dashboard<HttpApi, TuiView>,
    cfg: &Config,
) -> Result<()> {
    dash.reload_all().await;

    loop {
        terminal.draw(|f| tui::draw(f, dash.view()))?;

        if !event::poll(Duration::from_millis(cfg.tick_ms))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Modal gets the keyboard first.
        if dash.view().confirm_prompt.is_some() {
            dash.view_mut().confirm_prompt = None;
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                dash.view_mut().arm_confirm();
                dash.run_analysis().await;
            }
            continue;
        }

        if dash.view().search_mode {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => dash.view_mut().search_mode = false,
                KeyCode::Backspace => {
                    dash.view_mut().search_query.pop();
                    let query = dash.view().search_query.clone();
                    dash.filter(&query);
                }
                KeyCode::Char(c) => {
                    dash.view_mut().search_query.push(c);
                    let query = dash.view().search_query.clone();
                    dash.filter(&query);
                }
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('r') => dash.reload_all().await,
            KeyCode::Char('a') => {
                dash.view_mut().confirm_prompt = Some("Re-run the risk analysis?".to_string());
            }
            KeyCode::Char('s') => {
                let key = dash
                    .view()
                    .sort_key
                    .map(SortKey::next)
                    .unwrap_or(SortKey::TotalLoan);
                dash.view_mut().sort_key = Some(key);
                dash.sort(key);
            }
            KeyCode::Char('/') => {
                dash.view_mut().search_mode = true;
                dash.view_mut().search_query.clear();
                dash.filter("");
            }
            _ => {}
        }
    }
    Ok(())
}
