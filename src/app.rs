use crate::api::load::{load_feed, load_item, load_user, search};
use crate::api::{BatchError, Feed, HnApi, Item, User};
use crate::input::{Action, KeyState};
use crate::opener;
use crate::tui::Tui;
use crate::ui;
use crate::ui::theme::{Layout, Theme};
use crate::views::{Command, CommentsView, ListView, Phase, UserView};
use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Comments,
    User,
}

/// Where the story list comes from, kept so refresh can repeat it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListSource {
    Feed { feed: Feed, count: usize },
    Search { query: String, limit: usize },
}

impl ListSource {
    pub fn title(&self) -> String {
        match self {
            ListSource::Feed { feed, .. } => feed.title().to_string(),
            ListSource::Search { query, .. } => format!("Search: {query:?}"),
        }
    }
}

/// The screen a session starts on.
#[derive(Debug, Clone)]
pub enum Launch {
    List(ListSource),
    /// Results fetched before the UI started, e.g. a search.
    Prefetched {
        source: ListSource,
        items: Vec<Item>,
    },
    Item(u64),
    User(String),
}

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub concurrency: usize,
}

/// One completion per logical load, tagged with the generation that issued it.
#[derive(Debug)]
pub enum AppEvent {
    ListLoaded {
        generation: u64,
        items: Vec<Item>,
        error: Option<String>,
    },
    ItemLoaded {
        generation: u64,
        story: Option<Item>,
        children: Vec<Option<Item>>,
        error: Option<String>,
    },
    UserLoaded {
        generation: u64,
        user: Option<User>,
        submissions: Vec<Item>,
        error: Option<String>,
    },
}

pub struct App<A: HnApi> {
    pub view: View,
    pub help_visible: bool,
    pub list: ListView,
    pub comments: CommentsView,
    pub user: UserView,

    api: A,
    settings: Settings,
    tx: mpsc::UnboundedSender<AppEvent>,

    list_source: Option<ListSource>,
    current_item: Option<u64>,
    current_user: Option<String>,

    list_generation: u64,
    comments_generation: u64,
    user_generation: u64,

    input: KeyState,
    should_quit: bool,
    spinner_idx: usize,
}

impl<A: HnApi> App<A> {
    pub fn new(
        api: A,
        settings: Settings,
        layout: Layout,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            view: View::List,
            help_visible: false,
            list: ListView::new("", layout.list_chrome_lines),
            comments: CommentsView::new(layout.comments_chrome_lines),
            user: UserView::new(layout.user_chrome_lines),

            api,
            settings,
            tx,

            list_source: None,
            current_item: None,
            current_user: None,

            list_generation: 0,
            comments_generation: 0,
            user_generation: 0,

            input: KeyState::default(),
            should_quit: false,
            spinner_idx: 0,
        }
    }

    pub fn start(&mut self, launch: Launch) {
        match launch {
            Launch::List(source) => {
                self.list.title = source.title();
                self.list_source = Some(source);
                self.refresh_list();
            }
            Launch::Prefetched { source, items } => {
                self.list.title = source.title();
                self.list_source = Some(source);
                self.list_generation = self.list_generation.wrapping_add(1);
                self.list.on_load_complete(items, None);
            }
            Launch::Item(id) => self.open_item(id),
            Launch::User(name) => self.open_user(name),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether the visible view is waiting on a load.
    pub fn is_busy(&self) -> bool {
        let phase = match self.view {
            View::List => &self.list.phase,
            View::Comments => &self.comments.phase,
            View::User => &self.user.phase,
        };
        *phase == Phase::Loading
    }

    pub fn tick(&mut self) {
        if self.is_busy() {
            self.spinner_idx = self.spinner_idx.wrapping_add(1);
        }
    }

    pub fn spinner_frame(&self) -> char {
        const FRAMES: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];
        FRAMES[self.spinner_idx % FRAMES.len()]
    }

    /// Every view tracks the terminal size, so switching back never needs a
    /// re-measure.
    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.list.on_resize(width, height);
        self.comments.on_resize(width, height);
        self.user.on_resize(width, height);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if let Some(action) = self.input.on_key(key) {
            self.handle_action(action);
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }
        if action == Action::ToggleHelp {
            self.help_visible = !self.help_visible;
            return;
        }
        if self.help_visible {
            if action == Action::Back {
                self.help_visible = false;
            }
            return;
        }

        let command = match self.view {
            View::List => self.list.on_action(action),
            View::Comments => self.comments.on_action(action),
            View::User => self.user.on_action(action),
        };
        if let Some(command) = command {
            self.dispatch(command);
        }
    }

    fn dispatch(&mut self, command: Command) {
        match command {
            Command::OpenItem(id) => self.open_item(id),
            Command::OpenUser(name) => self.open_user(name),
            Command::OpenUrl(url) => {
                if let Err(err) = opener::open_url(&url) {
                    tracing::warn!("open url: {err:#}");
                }
            }
            Command::CopyUrl(url) => {
                if let Err(err) = opener::copy_to_clipboard(&url) {
                    tracing::warn!("copy url: {err:#}");
                }
            }
            Command::Refresh => match self.view {
                View::List => self.refresh_list(),
                View::Comments => {
                    if let Some(id) = self.current_item {
                        self.open_item(id);
                    }
                }
                View::User => {
                    if let Some(name) = self.current_user.clone() {
                        self.open_user(name);
                    }
                }
            },
            Command::Back => {
                if self.list_source.is_some() {
                    self.view = View::List;
                } else {
                    self.should_quit = true;
                }
            }
        }
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ListLoaded {
                generation,
                items,
                error,
            } => {
                if generation != self.list_generation {
                    tracing::debug!(generation, "ignoring stale list load");
                    return;
                }
                if let Some(err) = &error {
                    tracing::error!("list load failed: {err}");
                }
                self.list.on_load_complete(items, error);
            }
            AppEvent::ItemLoaded {
                generation,
                story,
                children,
                error,
            } => {
                if generation != self.comments_generation {
                    tracing::debug!(generation, "ignoring stale item load");
                    return;
                }
                if let Some(err) = &error {
                    tracing::error!("item load failed: {err}");
                }
                self.comments.on_load_complete(story, children, error);
            }
            AppEvent::UserLoaded {
                generation,
                user,
                submissions,
                error,
            } => {
                if generation != self.user_generation {
                    tracing::debug!(generation, "ignoring stale user load");
                    return;
                }
                if let Some(err) = &error {
                    tracing::error!("user load failed: {err}");
                }
                self.user.on_load_complete(user, submissions, error);
            }
        }
    }

    fn refresh_list(&mut self) {
        let Some(source) = self.list_source.clone() else {
            return;
        };
        self.list_generation = self.list_generation.wrapping_add(1);
        let generation = self.list_generation;
        self.list.begin_loading();

        let api = self.api.clone();
        let tx = self.tx.clone();
        let cap = self.settings.concurrency;
        tokio::spawn(async move {
            let res = match &source {
                ListSource::Feed { feed, count } => load_feed(&api, *feed, *count, cap)
                    .await
                    .map(|load| (load.items, load.error.map(describe))),
                ListSource::Search { query, limit } => {
                    search(&api, query, *limit).await.map(|items| (items, None))
                }
            };
            let (items, error) = match res {
                Ok(loaded) => loaded,
                Err(err) => (vec![], Some(format!("{err:#}"))),
            };
            let _ = tx.send(AppEvent::ListLoaded {
                generation,
                items,
                error,
            });
        });
    }

    fn open_item(&mut self, id: u64) {
        self.comments_generation = self.comments_generation.wrapping_add(1);
        let generation = self.comments_generation;
        self.view = View::Comments;
        self.current_item = Some(id);
        self.comments.reset_for_load();

        let api = self.api.clone();
        let tx = self.tx.clone();
        let cap = self.settings.concurrency;
        tokio::spawn(async move {
            let event = match load_item(&api, id, cap).await {
                Ok(load) => AppEvent::ItemLoaded {
                    generation,
                    story: Some(load.story),
                    children: load.children,
                    error: load.error.map(describe),
                },
                Err(err) => AppEvent::ItemLoaded {
                    generation,
                    story: None,
                    children: vec![],
                    error: Some(format!("{err:#}")),
                },
            };
            let _ = tx.send(event);
        });
    }

    fn open_user(&mut self, name: String) {
        self.user_generation = self.user_generation.wrapping_add(1);
        let generation = self.user_generation;
        self.view = View::User;
        self.user.reset_for_load(&name);
        self.current_user = Some(name.clone());

        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = match load_user(&api, &name).await {
                Ok(load) => AppEvent::UserLoaded {
                    generation,
                    user: load.user,
                    submissions: load.submissions,
                    error: None,
                },
                Err(err) => AppEvent::UserLoaded {
                    generation,
                    user: None,
                    submissions: vec![],
                    error: Some(format!("{err:#}")),
                },
            };
            let _ = tx.send(event);
        });
    }
}

/// Batch error text for a view, with its cause chain.
fn describe(err: BatchError) -> String {
    format!("{:#}", anyhow::Error::new(err))
}

/// Drives the interactive session until the user quits.
pub async fn run<A: HnApi>(api: A, launch: Launch, settings: Settings, theme: Theme) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut app = App::new(api, settings, theme.layout, tx);

    let mut tui = Tui::init()?;
    let (width, height) = tui.size()?;
    app.on_resize(width, height);
    app.start(launch);

    let mut events = EventStream::new();
    loop {
        tui.draw(|f| ui::render(f, &app, &theme))?;

        let tick_duration = if app.is_busy() {
            Duration::from_millis(120)
        } else {
            Duration::from_secs(3600)
        };

        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    return Err(anyhow::anyhow!("crossterm event stream ended unexpectedly"));
                };
                match event.context("read terminal event")? {
                    Event::Key(key) => app.handle_key(key),
                    Event::Resize(width, height) => app.on_resize(width, height),
                    _ => {}
                }
            }
            maybe_app_event = rx.recv() => {
                let Some(app_event) = maybe_app_event else {
                    return Err(anyhow::anyhow!("app event channel closed unexpectedly"));
                };
                app.handle_app_event(app_event);
            }
            _ = tokio::time::sleep(tick_duration) => {
                app.tick();
            }
        }

        if app.should_quit() {
            break;
        }
    }

    tracing::info!("session ended");
    Ok(())
}
