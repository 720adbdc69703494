//! Gallery screen: a wrapping grid of photo cards with infinite scroll

use std::collections::HashMap;

use iced::widget::scrollable::Viewport;
use iced::widget::{button, column, container, image, row, scrollable, text, Space};
use iced::{Alignment, ContentFit, Element, Length};
use iced_aw::Wrap;

use super::common::{self, ImageState};
use crate::route::Route;
use crate::state::data::Photo;
use crate::state::gallery::PhotoListLoader;
use crate::state::scroll::{ScrollTrigger, ScrollViewport, Sentinel};
use crate::Message;

/// Height of the invisible marker after the last card
const SENTINEL_HEIGHT: f32 = 16.0;

/// Everything the gallery owns while it is on screen
#[derive(Debug, Default)]
pub struct GalleryScreen {
    pub loader: PhotoListLoader,
    pub trigger: ScrollTrigger,
    /// Thumbnail state by photo id
    pub thumbnails: HashMap<String, ImageState>,
    threshold: f32,
}

impl GalleryScreen {
    pub fn new(threshold: f32) -> Self {
        let mut screen = Self {
            threshold,
            ..Self::default()
        };
        // Nothing rendered yet, so there is no sentinel to watch
        screen.trigger.observe(None, threshold);
        screen
    }

    /// The grid now ends in a sentinel; start watching it
    pub fn attach_sentinel(&mut self) {
        self.trigger
            .observe(Some(Sentinel::at_end(SENTINEL_HEIGHT)), self.threshold);
    }

    /// Unmount: drop observation and make late responses harmless
    pub fn teardown(&mut self) {
        if self.trigger.is_observing() {
            self.trigger.unobserve();
        }
        self.loader.dispose();
        self.thumbnails.clear();
    }
}

impl From<Viewport> for ScrollViewport {
    fn from(viewport: Viewport) -> Self {
        ScrollViewport {
            offset_y: viewport.absolute_offset().y,
            viewport_height: viewport.bounds().height,
            content_height: viewport.content_bounds().height,
        }
    }
}

/// Build the gallery screen
pub fn view(screen: &GalleryScreen, thumb_width: f32, thumb_height: f32) -> Element<'_, Message> {
    let loader = &screen.loader;
    let photos = loader.items();

    // Initial load failed: nothing to show but the error
    if let (Some(err), true) = (loader.error(), photos.is_empty()) {
        return common::error_message(
            "Failed to Load Photos",
            err.to_string(),
            Some(Message::RetryGallery),
        );
    }

    let mut content = column![
        text("Explore Photos").size(30),
        text("Discover beautiful images from talented photographers").size(14),
    ]
    .spacing(8)
    .width(Length::Fill);

    if !photos.is_empty() {
        let cards = photos
            .iter()
            .map(|photo| {
                photo_card(
                    photo,
                    screen.thumbnails.get(&photo.id),
                    thumb_width,
                    thumb_height,
                )
            })
            .collect();

        content = content.push(Space::with_height(Length::Fixed(16.0)));
        content = content.push(Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0));
    } else if !loader.is_loading() {
        content = content.push(common::loading("No photos to display"));
    }

    if loader.is_loading() {
        let label = if photos.is_empty() {
            "Loading photos..."
        } else {
            "Loading more photos..."
        };
        content = content.push(common::loading(label));
    }

    if let Some(err) = loader.error() {
        content = content.push(common::error_message(
            "Failed to Load More",
            err.to_string(),
            Some(Message::RetryGallery),
        ));
    } else if !loader.has_more() && !photos.is_empty() {
        content = content.push(common::loading("You've reached the end of the gallery"));
    }

    content = content.push(Space::with_height(Length::Fixed(SENTINEL_HEIGHT)));

    scrollable(container(content).padding(24).width(Length::Fill))
        .on_scroll(Message::GalleryScrolled)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// A clickable card: thumbnail, author initial, author, dimensions
fn photo_card<'a>(
    photo: &'a Photo,
    thumbnail: Option<&'a ImageState>,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match thumbnail {
        Some(ImageState::Loaded(handle)) => image(handle.clone())
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .content_fit(ContentFit::Cover)
            .into(),
        Some(ImageState::Failed) => common::placeholder("Image unavailable", width, height),
        _ => common::placeholder("Loading...", width, height),
    };

    let avatar = container(text(photo.author_initial()).size(14))
        .width(Length::Fixed(32.0))
        .height(Length::Fixed(32.0))
        .center_x(Length::Fixed(32.0))
        .center_y(Length::Fixed(32.0))
        .style(container::rounded_box);

    let info = row![
        avatar,
        column![
            text(&photo.author).size(14),
            text(photo.dimensions_label()).size(12),
        ]
        .spacing(2),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    button(column![preview, info].spacing(8))
        .on_press(Message::Navigate(Route::Detail(photo.id.clone())))
        .padding(8)
        .style(button::secondary)
        .width(Length::Fixed(width + 16.0))
        .into()
}
