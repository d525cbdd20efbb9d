use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use study_buddy::{
    logger, spawn_api_worker, ui, ApiRequest, ApiResponse, App, Config, StudyApi, StudyApiClient,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

const TICK_RATE: Duration = Duration::from_millis(120);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logger::init(&config.log_file);
    logger::log(&format!("Starting Study Buddy against {}", config.api_url));

    let api: Arc<dyn StudyApi> = Arc::new(StudyApiClient::from_config(&config)?);
    let (req_tx, req_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (resp_tx, resp_rx) = mpsc::unbounded_channel::<ApiResponse>();
    let worker = spawn_api_worker(api, resp_tx, req_rx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.api_url.clone());
    let result = run(&mut terminal, &mut app, req_tx, resp_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    worker.abort();
    logger::log("Study Buddy exited");
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    req_tx: UnboundedSender<ApiRequest>,
    mut resp_rx: UnboundedReceiver<ApiResponse>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);

    for request in app.startup_requests() {
        send(&req_tx, request);
    }

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    for request in app.handle_key(key) {
                        send(&req_tx, request);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(response) = resp_rx.recv() => {
                if let Some(request) = app.handle_response(response) {
                    send(&req_tx, request);
                }
            }
            _ = ticker.tick() => app.on_tick(),
        }
    }
    Ok(())
}

fn send(req_tx: &UnboundedSender<ApiRequest>, request: ApiRequest) {
    logger::log(&format!("Sending {:?} request", request.kind()));
    if req_tx.send(request).is_err() {
        logger::log("Worker gone, request dropped");
    }
}
