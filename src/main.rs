use std::sync::Arc;

use iced::widget::image::Handle;
use iced::widget::{column, scrollable};
use iced::{Element, Length, Task, Theme};
use reqwest::Url;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod route;
mod state;
mod ui;

use api::{ApiError, PhotoSource, PicsumClient};
use config::GalleryConfig;
use route::Route;
use state::data::Photo;
use state::detail::{DetailRequest, DetailResponse};
use state::gallery::{PageOutcome, PageRequest, PageResponse};
use state::scroll::{LoadGate, ScrollViewport};
use ui::common::ImageState;
use ui::detail::DetailScreen;
use ui::gallery::GalleryScreen;

/// Main application state
struct PhotoGallery {
    /// Lorem Picsum client shared with background tasks
    api: Arc<PicsumClient>,
    config: GalleryConfig,
    /// Route currently shown
    route: Route,
    /// State owned by the mounted screen
    screen: Screen,
}

/// The mounted screen and the state it owns
#[derive(Debug)]
enum Screen {
    Gallery(GalleryScreen),
    Detail(DetailScreen),
    NotFound(String),
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Switch to another route, tearing down the current screen
    Navigate(Route),
    /// The gallery scrollable moved or resized
    GalleryScrolled(scrollable::Viewport),
    /// A gallery page request finished
    PageLoaded(PageResponse),
    /// User asked to retry after a gallery failure
    RetryGallery,
    /// A grid thumbnail finished downloading
    ThumbnailLoaded(String, Result<Handle, ApiError>),
    /// A detail request finished
    DetailLoaded(DetailResponse),
    /// The detail preview finished downloading
    DetailImageLoaded(String, Result<Handle, ApiError>),
    /// User asked to retry after a detail failure
    RetryDetail,
    /// Open a link in the system browser
    OpenExternal(String),
}

impl PhotoGallery {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = GalleryConfig::load();

        let base_url = config.api_base_url().unwrap_or_else(|e| {
            error!("{}; falling back to the public API", e);
            Url::parse("https://picsum.photos").expect("default base URL is valid")
        });
        let api = Arc::new(PicsumClient::new(base_url, config.request_timeout()));
        info!("🎨 Photo gallery starting against {}", api.base_url());
        let start = Route::parse(&config.start_path);

        let mut app = PhotoGallery {
            api,
            config,
            // Mounted below; NotFound placeholder holds no loader
            route: Route::NotFound(String::new()),
            screen: Screen::NotFound(String::new()),
        };
        let task = app.navigate(start);

        (app, task)
    }

    fn title(&self) -> String {
        match &self.route {
            Route::Gallery => "Photo Gallery".to_string(),
            Route::Detail(id) => format!("Photo #{} - Photo Gallery", id),
            Route::NotFound(_) => "Page Not Found - Photo Gallery".to_string(),
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => self.navigate(route),

            Message::GalleryScrolled(viewport) => {
                let Screen::Gallery(gallery) = &mut self.screen else {
                    return Task::none();
                };
                let viewport = ScrollViewport::from(viewport);

                let mut request = None;
                gallery
                    .trigger
                    .on_viewport(&viewport, LoadGate::from(&gallery.loader), || {
                        request = gallery.loader.load_more();
                    });

                match request {
                    Some(request) => self.request_page(request),
                    None => Task::none(),
                }
            }

            Message::PageLoaded(response) => {
                let Screen::Gallery(gallery) = &mut self.screen else {
                    debug!(page = response.page, "page arrived after the gallery closed");
                    return Task::none();
                };

                match gallery.loader.complete(response) {
                    PageOutcome::Appended(count) => {
                        debug!(page = gallery.loader.current_page(), count, "page appended");
                        gallery.attach_sentinel();

                        let items = gallery.loader.items();
                        let fresh: Vec<Photo> = items[items.len() - count..].to_vec();
                        for photo in &fresh {
                            gallery
                                .thumbnails
                                .insert(photo.id.clone(), ImageState::Loading);
                        }
                        Task::batch(fresh.iter().map(|photo| self.fetch_thumbnail(photo)))
                    }
                    PageOutcome::Exhausted | PageOutcome::Failed | PageOutcome::Discarded => {
                        Task::none()
                    }
                }
            }

            Message::RetryGallery => {
                let Screen::Gallery(gallery) = &mut self.screen else {
                    return Task::none();
                };
                match gallery.loader.retry() {
                    Some(request) => self.request_page(request),
                    None => Task::none(),
                }
            }

            Message::ThumbnailLoaded(id, result) => {
                let Screen::Gallery(gallery) = &mut self.screen else {
                    return Task::none();
                };
                if let Some(slot) = gallery.thumbnails.get_mut(&id) {
                    *slot = match result {
                        Ok(handle) => ImageState::Loaded(handle),
                        Err(e) => {
                            warn!(id = %id, "thumbnail failed: {}", e);
                            ImageState::Failed
                        }
                    };
                }
                Task::none()
            }

            Message::DetailLoaded(response) => {
                let Screen::Detail(detail) = &mut self.screen else {
                    debug!(id = %response.id, "details arrived after the view closed");
                    return Task::none();
                };

                if !detail.loader.complete(response) {
                    return Task::none();
                }
                match detail.loader.photo().cloned() {
                    Some(photo) => {
                        detail.image = ImageState::Loading;
                        self.fetch_detail_image(&photo)
                    }
                    None => Task::none(),
                }
            }

            Message::DetailImageLoaded(id, result) => {
                let Screen::Detail(detail) = &mut self.screen else {
                    return Task::none();
                };
                if detail.loader.id() != Some(id.as_str()) {
                    return Task::none();
                }
                detail.image = match result {
                    Ok(handle) => ImageState::Loaded(handle),
                    Err(e) => {
                        warn!(id = %id, "detail image failed: {}", e);
                        ImageState::Failed
                    }
                };
                Task::none()
            }

            Message::RetryDetail => {
                let Screen::Detail(detail) = &mut self.screen else {
                    return Task::none();
                };
                let id = detail.loader.id().map(str::to_string);
                match detail.loader.load(id.as_deref()) {
                    Some(request) => self.request_detail(request),
                    None => Task::none(),
                }
            }

            Message::OpenExternal(url) => {
                if let Err(e) = open::that(&url) {
                    warn!("Could not open {}: {}", url, e);
                }
                Task::none()
            }
        }
    }

    /// Unmount the current screen and mount the one for `route`
    fn navigate(&mut self, route: Route) -> Task<Message> {
        if route == self.route {
            return Task::none();
        }
        info!("Navigating to {}", route.path());

        match &mut self.screen {
            Screen::Gallery(gallery) => gallery.teardown(),
            Screen::Detail(detail) => detail.teardown(),
            Screen::NotFound(_) => {}
        }

        self.route = route.clone();
        match route {
            Route::Gallery => {
                let mut gallery = GalleryScreen::new(self.config.scroll_threshold);
                let request = gallery.loader.initialize();
                self.screen = Screen::Gallery(gallery);
                request.map_or_else(Task::none, |r| self.request_page(r))
            }
            Route::Detail(id) => {
                // Each photo gets a fresh loader scoped to its id
                let mut detail = DetailScreen::new();
                let request = detail.loader.load(Some(&id));
                self.screen = Screen::Detail(detail);
                request.map_or_else(Task::none, |r| self.request_detail(r))
            }
            Route::NotFound(path) => {
                self.screen = Screen::NotFound(path);
                Task::none()
            }
        }
    }

    fn request_page(&self, request: PageRequest) -> Task<Message> {
        let source: Arc<dyn PhotoSource> = self.api.clone();
        Task::perform(request.run(source), Message::PageLoaded)
    }

    fn request_detail(&self, request: DetailRequest) -> Task<Message> {
        let source: Arc<dyn PhotoSource> = self.api.clone();
        Task::perform(request.run(source), Message::DetailLoaded)
    }

    fn fetch_thumbnail(&self, photo: &Photo) -> Task<Message> {
        let api = self.api.clone();
        let url = api.image_url(
            &photo.id,
            self.config.thumbnail_width,
            self.config.thumbnail_height,
        );
        let id = photo.id.clone();

        Task::perform(
            async move { (id, api.fetch_image(url).await) },
            |(id, result)| Message::ThumbnailLoaded(id, result.map(Handle::from)),
        )
    }

    fn fetch_detail_image(&self, photo: &Photo) -> Task<Message> {
        let api = self.api.clone();
        let (width, height) = photo.fit_within(self.config.detail_max_edge);
        let url = api.image_url(&photo.id, width, height);
        let id = photo.id.clone();

        Task::perform(
            async move { (id, api.fetch_image(url).await) },
            |(id, result)| Message::DetailImageLoaded(id, result.map(Handle::from)),
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let body = match &self.screen {
            Screen::Gallery(gallery) => ui::gallery::view(
                gallery,
                self.config.thumbnail_width as f32,
                self.config.thumbnail_height as f32,
            ),
            Screen::Detail(detail) => ui::detail::view(detail),
            Screen::NotFound(path) => ui::not_found::view(path),
        };

        column![ui::common::header(&self.route), body]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Log to stderr; `RUST_LOG` overrides the default filter
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("picsum_gallery=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> iced::Result {
    init_logging();

    iced::application(PhotoGallery::title, PhotoGallery::update, PhotoGallery::view)
        .theme(PhotoGallery::theme)
        .centered()
        .run_with(PhotoGallery::new)
}
